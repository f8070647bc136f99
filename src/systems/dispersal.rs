use std::f32::consts::PI;

use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    grid::Grid,
    rng::{RngExt, SimRng},
    trees::{Tree, TreePopulation},
    world::World,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispersalReport {
    pub trees_dispersing: usize,
    pub seeds_produced: u64,
    pub seeds_landed: u64,
    pub seeds_lost: u64,
}

/// Yearly seed rain from every unburnt tree.
pub struct DispersalSystem {
    latest: Option<DispersalReport>,
}

impl DispersalSystem {
    pub fn new() -> Self {
        Self { latest: None }
    }

    pub fn latest_report(&self) -> Option<DispersalReport> {
        self.latest
    }
}

impl Default for DispersalSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Landing offset of seed `i` (1-based) out of `seed_count`. Directions form
/// an even fan over the full circle; `decay` scales the distance.
pub fn seed_offset(dispersal_factor: u32, seed_count: u32, i: u32, decay: f32) -> (i32, i32) {
    let direction = 2.0 * PI * i as f32 / seed_count as f32;
    let reach = dispersal_factor as f32 * decay;
    // `as` truncates toward zero
    let dx = (reach * direction.cos()) as i32;
    let dy = (reach * direction.sin()) as i32;
    (dx, dy)
}

fn disperse_tree(
    tree: &Tree,
    grid: &mut Grid,
    rng: &mut SimRng,
    report: &mut DispersalReport,
) {
    let seed_count = (tree.max_seed_production as f32 * rng.unit()) as u32;
    let (x, y) = tree.position();
    for i in 1..=seed_count {
        let decay = 2.0_f32.powf(-3.0 * rng.unit());
        let (dx, dy) = seed_offset(tree.dispersal_factor, seed_count, i, decay);
        report.seeds_produced += 1;
        match grid.patch_mut(x + dx, y + dy) {
            Ok(patch) => {
                patch.add_seeds(tree.species, 1);
                report.seeds_landed += 1;
            }
            Err(_) => report.seeds_lost += 1,
        }
    }
}

/// Disperses one year of seeds. Burnt trees stay silent; seeds landing off the
/// grid are dropped.
pub fn disperse(grid: &mut Grid, trees: &TreePopulation, rng: &mut SimRng) -> DispersalReport {
    let mut report = DispersalReport::default();
    for tree in trees.iter().filter(|t| !t.burnt) {
        report.trees_dispersing += 1;
        disperse_tree(tree, grid, rng, &mut report);
    }
    report
}

impl System for DispersalSystem {
    fn name(&self) -> &str {
        "dispersal"
    }

    fn run(&mut self, ctx: &SystemContext, world: &mut World, rng: &mut SimRng) -> Result<()> {
        let report = disperse(&mut world.grid, &world.trees, rng);
        tracing::debug!(
            year = ctx.year,
            trees = report.trees_dispersing,
            produced = report.seeds_produced,
            landed = report.seeds_landed,
            lost = report.seeds_lost,
            "seeds dispersed"
        );
        self.latest = Some(report);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::census::{Area, Census};
    use crate::grid::{DemographicRates, Stage};
    use crate::species::Species;

    fn tree(x: u32, y: u32, species: Species, dispersal_factor: u32, max_seeds: u32) -> Tree {
        Tree {
            id: 0,
            x,
            y,
            species,
            dispersal_factor,
            max_seed_production: max_seeds,
            burnt: false,
        }
    }

    #[test]
    fn offsets_fan_around_the_circle() {
        // quarter turns with full reach
        assert_eq!(seed_offset(10, 4, 1, 1.0), (0, 10));
        assert_eq!(seed_offset(10, 4, 2, 1.0), (-10, 0));
        assert_eq!(seed_offset(10, 4, 3, 1.0), (0, -10));
        assert_eq!(seed_offset(10, 4, 4, 1.0), (10, 0));
    }

    #[test]
    fn offsets_truncate_toward_zero() {
        // 2.9 * cos(2pi) = 2.9 -> 2
        assert_eq!(seed_offset(29, 1, 1, 0.1).0, 2);
        // reach below one cell keeps the seed on the tree's own cell
        assert_eq!(seed_offset(20, 3, 2, 0.04), (0, 0));
    }

    #[test]
    fn zero_production_deposits_nothing() {
        let mut grid = Grid::new(50, 50, DemographicRates::default());
        let trees = TreePopulation::from_trees(vec![tree(25, 25, Species::Birch, 20, 0)]);

        let report = disperse(&mut grid, &trees, &mut SimRng::new(1));

        assert_eq!(report.trees_dispersing, 1);
        assert_eq!(report.seeds_produced, 0);
        assert_eq!(Census::collect(&grid), Census::default());
    }

    #[test]
    fn burnt_trees_do_not_disperse() {
        let mut grid = Grid::new(50, 50, DemographicRates::default());
        let mut burnt = tree(25, 25, Species::Oak, 40, 100);
        burnt.burnt = true;
        let trees = TreePopulation::from_trees(vec![burnt]);

        let report = disperse(&mut grid, &trees, &mut SimRng::new(1));

        assert_eq!(report, DispersalReport::default());
        assert_eq!(Census::collect(&grid), Census::default());
    }

    #[test]
    fn landed_seeds_match_patch_counters() {
        let mut grid = Grid::new(60, 60, DemographicRates::default());
        let trees = TreePopulation::from_trees(vec![
            tree(30, 30, Species::Birch, 20, 50),
            tree(10, 40, Species::Oak, 40, 100),
        ]);
        let mut rng = SimRng::new(17);

        let mut landed = 0;
        for _ in 0..5 {
            let report = disperse(&mut grid, &trees, &mut rng);
            assert_eq!(report.seeds_landed + report.seeds_lost, report.seeds_produced);
            landed += report.seeds_landed;
        }

        let census = Census::collect(&grid);
        let deposited = census.count(Species::Birch, Stage::Seed, Area::Whole)
            + census.count(Species::Oak, Stage::Seed, Area::Whole);
        assert_eq!(deposited, landed);
    }

    #[test]
    fn seeds_off_the_grid_are_dropped() {
        // a corner tree throws most of its fan off the grid
        let mut grid = Grid::new(5, 5, DemographicRates::default());
        let trees = TreePopulation::from_trees(vec![tree(0, 0, Species::Oak, 40, 100)]);
        let mut rng = SimRng::new(3);

        let mut lost = 0;
        let mut landed = 0;
        for _ in 0..10 {
            let report = disperse(&mut grid, &trees, &mut rng);
            lost += report.seeds_lost;
            landed += report.seeds_landed;
        }

        assert!(lost > 0);
        let census = Census::collect(&grid);
        assert_eq!(census.count(Species::Oak, Stage::Seed, Area::Whole), landed);
    }

    #[test]
    fn seeds_stay_within_dispersal_reach() {
        let mut grid = Grid::new(101, 101, DemographicRates::default());
        let trees = TreePopulation::from_trees(vec![tree(50, 50, Species::Birch, 20, 50)]);
        disperse(&mut grid, &trees, &mut SimRng::new(8));

        for patch in grid.patches() {
            if patch.total_individuals() > 0 {
                let dx = patch.x() as i32 - 50;
                let dy = patch.y() as i32 - 50;
                assert!(dx.abs() <= 20 && dy.abs() <= 20);
            }
        }
    }

    #[test]
    fn system_keeps_latest_report() {
        let mut system = DispersalSystem::new();
        assert!(system.latest_report().is_none());

        let params = crate::world::StandParams {
            width: 30,
            height: 30,
            tree_count: 5,
            species_ratio: 0.5,
            catalog: Default::default(),
            rates: DemographicRates::default(),
            fire: None,
        };
        let mut rng = SimRng::new(2);
        let mut world = World::setup(&params, &mut rng);
        let ctx = SystemContext {
            year: 1,
            scenario_name: "unit",
        };
        system.run(&ctx, &mut world, &mut rng).unwrap();

        let report = system.latest_report().unwrap();
        assert_eq!(report.trees_dispersing, 5);
    }
}
