use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use ndarray::Array2;
use rand::prelude::*;

use crate::*;

/// Strategy for placing mines when a new board is created.
pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> MineField;
}

/// Uniform random placement, deterministic per seed.
///
/// Sparse boards are filled by rejection sampling into a set; once the
/// requested count exceeds half the board that would retry too often, so a
/// full index shuffle takes over.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> MineField {
        let total = config.total_cells();
        let mut mines = config.mines;
        if mines > total {
            log::warn!("requested {mines} mines but the board only fits {total}, clamping");
            mines = total;
        }

        let (width, _) = config.size;
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mask: Array2<bool> = Array2::default(config.size.nd());

        if mines > total / 2 {
            let mut indices: Vec<CellCount> = (0..total).collect();
            indices.shuffle(&mut rng);
            for &index in &indices[..mines as usize] {
                mask[cell_coords(index, width).nd()] = true;
            }
        } else {
            let mut picked = BTreeSet::new();
            while (picked.len() as CellCount) < mines {
                picked.insert(rng.random_range(0..total));
            }
            for index in picked {
                mask[cell_coords(index, width).nd()] = true;
            }
        }

        MineField::from_mask(mask)
    }
}
