//! Drawable projection of a stand for rendering collaborators. Capturing a
//! snapshot never touches simulation state.

use serde::Serialize;

use crate::species::Species;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellView {
    /// Seeds and saplings of both species in every stage.
    pub individuals: u32,
    pub burnt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeMarker {
    pub x: u32,
    pub y: u32,
    pub species: Species,
    pub burnt: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StandSnapshot {
    pub year: u32,
    pub width: u32,
    pub height: u32,
    pub max_individuals: u32,
    /// Row-major, `width * height` cells.
    pub cells: Vec<CellView>,
    pub trees: Vec<TreeMarker>,
}

impl StandSnapshot {
    pub fn capture(world: &World) -> Self {
        let grid = world.grid();
        let cells: Vec<CellView> = grid
            .patches()
            .iter()
            .map(|patch| CellView {
                individuals: patch.total_individuals(),
                burnt: patch.is_burnt(),
            })
            .collect();
        let max_individuals = cells.iter().map(|c| c.individuals).max().unwrap_or(0);
        let trees = world
            .trees()
            .iter()
            .map(|tree| TreeMarker {
                x: tree.x,
                y: tree.y,
                species: tree.species,
                burnt: tree.burnt,
            })
            .collect();

        Self {
            year: world.year(),
            width: grid.width(),
            height: grid.height(),
            max_individuals,
            cells,
            trees,
        }
    }

    pub fn cell(&self, x: u32, y: u32) -> Option<&CellView> {
        if x < self.width && y < self.height {
            self.cells.get(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Cell density relative to the densest cell, in `[0, 1]`.
    pub fn intensity(&self, x: u32, y: u32) -> Option<f32> {
        let cell = self.cell(x, y)?;
        if self.max_individuals == 0 {
            return Some(0.0);
        }
        Some(cell.individuals as f32 / self.max_individuals as f32)
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.individuals > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disturbance::Fire;
    use crate::grid::DemographicRates;
    use crate::rng::SimRng;
    use crate::species::SpeciesCatalog;
    use crate::systems::disperse;
    use crate::world::StandParams;

    fn world() -> World {
        let params = StandParams {
            width: 40,
            height: 30,
            tree_count: 12,
            species_ratio: 0.5,
            catalog: SpeciesCatalog::default(),
            rates: DemographicRates::default(),
            fire: Some(Fire {
                center: (20, 15),
                radius: 5,
                remove_deadwood: false,
            }),
        };
        World::setup(&params, &mut SimRng::new(21))
    }

    #[test]
    fn projection_mirrors_the_stand() {
        let world = world();
        let snapshot = StandSnapshot::capture(&world);

        assert_eq!(snapshot.cells.len(), 40 * 30);
        assert_eq!(snapshot.trees.len(), world.trees().len());
        assert_eq!(snapshot.max_individuals, 0);
        assert_eq!(snapshot.occupied_cells(), 0);
        assert_eq!(snapshot.intensity(0, 0), Some(0.0));
        assert_eq!(
            snapshot.cells.iter().filter(|c| c.burnt).count(),
            world.grid().burnt_patch_count()
        );
        assert!(snapshot.cell(20, 15).unwrap().burnt);
        assert!(snapshot.cell(40, 0).is_none());
    }

    #[test]
    fn intensity_is_relative_to_densest_cell() {
        let mut world = world();
        let mut rng = SimRng::new(2);
        disperse(&mut world.grid, &world.trees, &mut rng);

        let snapshot = StandSnapshot::capture(&world);
        if snapshot.max_individuals == 0 {
            return;
        }
        let mut saw_full = false;
        for y in 0..snapshot.height {
            for x in 0..snapshot.width {
                let value = snapshot.intensity(x, y).unwrap();
                assert!((0.0..=1.0).contains(&value));
                saw_full |= value == 1.0;
            }
        }
        assert!(saw_full);
        assert_eq!(
            snapshot.cells.iter().map(|c| c.individuals as u64).sum::<u64>(),
            world.total_individuals()
        );
        assert_eq!(
            snapshot.occupied_cells(),
            world
                .grid()
                .patches()
                .iter()
                .filter(|p| p.total_individuals() > 0)
                .count()
        );
    }
}
