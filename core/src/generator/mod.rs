use crate::*;
pub use random::*;

mod random;

/// Lays out mines for a fresh board, called once per game and never again for the same board.
pub trait LayoutGenerator {
    fn generate(&mut self, mines: CellCount) -> MineLayout;
}

/// Hands out the same layout for every game, regardless of the requested mine count.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedLayoutGenerator {
    layout: MineLayout,
}

impl FixedLayoutGenerator {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }
}

impl LayoutGenerator for FixedLayoutGenerator {
    fn generate(&mut self, mines: CellCount) -> MineLayout {
        if mines != self.layout.mine_count() {
            log::debug!(
                "Fixed layout has {} mines, ignoring requested {}",
                self.layout.mine_count(),
                mines
            );
        }
        self.layout.clone()
    }
}
