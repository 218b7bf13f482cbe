use rand::prelude::*;

use super::*;

/// Consecutive rejected samples tolerated before picking among the free cells directly.
pub const MAX_REJECTIONS: u32 = 32;

/// Uniform mine placement by rejection sampling: draw any cell, keep it if it has no mine yet.
///
/// Every accepted draw is uniform over the cells still free, so the finished layout is uniform over all layouts
/// with the requested number of mines.
#[derive(Clone, Debug)]
pub struct RandomLayoutGenerator {
    rng: SmallRng,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Picks the `place`-th free cell, skipping over cells that already hold a mine.
    fn place_among_free(&mut self, layout: &mut MineLayout) {
        let free_cells = layout.safe_cell_count();
        if free_cells == 0 {
            return;
        }

        let place = self.rng.random_range(0..free_cells);
        if let Some(index) = (0..CELL_COUNT)
            .filter(|&index| !layout[index])
            .nth(place.into())
        {
            layout.place_mine(index);
        }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(&mut self, mines: CellCount) -> MineLayout {
        if mines > CELL_COUNT {
            log::warn!(
                "Board already full, generated anyway, requested {} but only fits {}",
                mines,
                CELL_COUNT
            );
        }

        let mut layout = MineLayout::empty();
        let mut mines_remaining_to_place = mines.min(CELL_COUNT);
        let mut rejections = 0;
        let mut total_rejections = 0;

        while mines_remaining_to_place > 0 {
            if rejections >= MAX_REJECTIONS {
                log::warn!(
                    "{} samples in a row hit a mine, placing among free cells",
                    rejections
                );
                self.place_among_free(&mut layout);
                mines_remaining_to_place -= 1;
                rejections = 0;
                continue;
            }

            let index = self.rng.random_range(0..CELL_COUNT);
            if layout.place_mine(index) {
                mines_remaining_to_place -= 1;
                rejections = 0;
            } else {
                rejections += 1;
                total_rejections += 1;
            }
        }
        log::trace!(
            "Placed {} mines, {} samples rejected",
            layout.mine_count(),
            total_rejections
        );

        layout
    }
}
