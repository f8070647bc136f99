//! Light and water availability derived from the distance to the nearest tree.

use serde::Serialize;

use crate::grid::{Grid, Patch};
use crate::trees::TreePopulation;

/// Below this distance (grid units) the canopy shades the patch.
pub const SHADE_DISTANCE: f32 = 6.0;

/// Water availability on burnt patches once the deadwood is gone.
pub const CLEARED_WATER_AVAILABILITY: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AvailabilityOutcome {
    Computed { patches: usize, mean_light: f32 },
    /// No tree to measure from; every patch keeps its defaults.
    NoTrees,
}

pub fn light_from_distance(distance: f32) -> f32 {
    if distance < SHADE_DISTANCE {
        if distance <= 0.0 {
            return 0.0;
        }
        (1.0 - 1.0 / distance).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

fn nearest_tree_distance(patch: &Patch, trees: &TreePopulation) -> Option<f32> {
    let px = patch.x() as f32;
    let py = patch.y() as f32;
    trees
        .iter()
        .map(|tree| (tree.x as f32 - px).hypot(tree.y as f32 - py))
        .min_by(f32::total_cmp)
}

/// Computes each patch's distance to the nearest tree (burnt trees included)
/// and the resulting light and water availability. Runs once at setup.
pub fn compute_availability(
    grid: &mut Grid,
    trees: &TreePopulation,
    deadwood_removed: bool,
) -> AvailabilityOutcome {
    if trees.is_empty() {
        tracing::warn!("no trees to compute distance to, availability left at defaults");
        return AvailabilityOutcome::NoTrees;
    }

    let mut light_sum = 0.0_f64;
    for patch in grid.patches_mut() {
        let Some(distance) = nearest_tree_distance(patch, trees) else {
            continue;
        };
        patch.distance_to_tree = Some(distance);
        patch.light_availability = light_from_distance(distance);
        if patch.is_burnt() && deadwood_removed {
            patch.water_availability = CLEARED_WATER_AVAILABILITY;
        }
        light_sum += patch.light_availability as f64;
    }

    let patches = grid.cell_count();
    let mean_light = if patches > 0 {
        (light_sum / patches as f64) as f32
    } else {
        0.0
    };
    AvailabilityOutcome::Computed {
        patches,
        mean_light,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disturbance::Fire;
    use crate::grid::DemographicRates;
    use crate::species::Species;
    use crate::trees::Tree;

    fn single_tree(x: u32, y: u32) -> TreePopulation {
        TreePopulation::from_trees(vec![Tree {
            id: 0,
            x,
            y,
            species: Species::Oak,
            dispersal_factor: 40,
            max_seed_production: 100,
            burnt: false,
        }])
    }

    #[test]
    fn light_curve() {
        assert_eq!(light_from_distance(0.0), 0.0);
        assert_eq!(light_from_distance(1.0), 0.0);
        assert_eq!(light_from_distance(2.0), 0.5);
        assert_eq!(light_from_distance(4.0), 0.75);
        assert_eq!(light_from_distance(6.0), 1.0);
        assert_eq!(light_from_distance(25.0), 1.0);
    }

    #[test]
    fn nearest_distance_and_light() {
        let mut grid = Grid::new(10, 10, DemographicRates::default());
        let trees = single_tree(0, 0);

        let outcome = compute_availability(&mut grid, &trees, false);
        assert!(matches!(outcome, AvailabilityOutcome::Computed { patches: 100, .. }));

        let on_tree = grid.patch(0, 0).unwrap();
        assert_eq!(on_tree.distance_to_tree, Some(0.0));
        assert_eq!(on_tree.light_availability, 0.0);

        let near = grid.patch(3, 4).unwrap();
        assert_eq!(near.distance_to_tree, Some(5.0));
        assert!((near.light_availability - 0.8).abs() < 1e-6);

        let far = grid.patch(9, 9).unwrap();
        assert_eq!(far.light_availability, 1.0);
        assert_eq!(far.water_availability, 1.0);
    }

    #[test]
    fn no_trees_leaves_defaults() {
        let mut grid = Grid::new(4, 4, DemographicRates::default());

        let outcome = compute_availability(&mut grid, &TreePopulation::default(), true);

        assert_eq!(outcome, AvailabilityOutcome::NoTrees);
        for patch in grid.patches() {
            assert_eq!(patch.distance_to_tree, None);
            assert_eq!(patch.light_availability, 0.0);
            assert_eq!(patch.water_availability, 1.0);
        }
    }

    #[test]
    fn cleared_burnt_patches_lose_water() {
        let mut grid = Grid::new(20, 20, DemographicRates::default());
        let mut trees = single_tree(19, 19);
        Fire {
            center: (5, 5),
            radius: 2,
            remove_deadwood: true,
        }
        .apply(&mut grid, &mut trees);

        compute_availability(&mut grid, &trees, true);

        assert_eq!(grid.patch(5, 5).unwrap().water_availability, 0.5);
        assert_eq!(grid.patch(15, 5).unwrap().water_availability, 1.0);
    }

    #[test]
    fn burnt_patches_keep_water_when_deadwood_stays() {
        let mut grid = Grid::new(20, 20, DemographicRates::default());
        let mut trees = single_tree(19, 19);
        Fire {
            center: (5, 5),
            radius: 2,
            remove_deadwood: false,
        }
        .apply(&mut grid, &mut trees);

        compute_availability(&mut grid, &trees, false);

        assert_eq!(grid.patch(5, 5).unwrap().water_availability, 1.0);
    }

    #[test]
    fn burnt_trees_still_cast_shade() {
        let mut grid = Grid::new(20, 20, DemographicRates::default());
        let mut trees = single_tree(5, 5);
        Fire {
            center: (5, 5),
            radius: 1,
            remove_deadwood: false,
        }
        .apply(&mut grid, &mut trees);
        assert!(trees.as_slice()[0].burnt);

        compute_availability(&mut grid, &trees, false);
        assert_eq!(grid.patch(5, 7).unwrap().distance_to_tree, Some(2.0));
    }
}
