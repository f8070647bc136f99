//! Circular fire applied once at setup.

use serde::Serialize;

use crate::grid::{Grid, PATCHES_PER_HECTARE};
use crate::trees::TreePopulation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fire {
    pub center: (i32, i32),
    /// Radius in grid units; the burnt disk is closed.
    pub radius: u32,
    pub remove_deadwood: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FireReport {
    pub burnt_patches: usize,
    pub burnt_area_ha: f64,
    pub trees_before: usize,
    pub burnt_trees: usize,
    pub removed_trees: usize,
    pub trees_after: usize,
}

impl Fire {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let dx = x as i64 - self.center.0 as i64;
        let dy = y as i64 - self.center.1 as i64;
        let r = self.radius as i64;
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy)) <= r.saturating_mul(r)
    }

    /// Burns every in-bounds cell of the disk, then burns or removes the
    /// trees standing on burnt cells.
    pub fn apply(&self, grid: &mut Grid, trees: &mut TreePopulation) -> FireReport {
        let trees_before = trees.len();
        let mut burnt_patches = 0;
        for patch in grid.patches_mut() {
            if self.contains(patch.x() as i32, patch.y() as i32) {
                patch.set_burnt();
                burnt_patches += 1;
            }
        }

        let on_burnt_cell = |x: i32, y: i32| {
            grid.patch(x, y)
                .map(|patch| patch.is_burnt())
                .unwrap_or(false)
        };

        let mut burnt_trees = 0;
        let mut removed_trees = 0;
        if self.remove_deadwood {
            trees.retain(|tree| {
                let (x, y) = tree.position();
                if on_burnt_cell(x, y) {
                    removed_trees += 1;
                    false
                } else {
                    true
                }
            });
        } else {
            for tree in trees.iter_mut() {
                let (x, y) = tree.position();
                if on_burnt_cell(x, y) {
                    tree.burnt = true;
                    burnt_trees += 1;
                }
            }
        }

        FireReport {
            burnt_patches,
            burnt_area_ha: burnt_patches as f64 / PATCHES_PER_HECTARE as f64,
            trees_before,
            burnt_trees,
            removed_trees,
            trees_after: trees.len(),
        }
    }
}
