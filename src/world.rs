use serde::Serialize;

use crate::availability::{compute_availability, AvailabilityOutcome};
use crate::census::{Census, CensusHistory};
use crate::disturbance::{Fire, FireReport};
use crate::grid::{DemographicRates, Grid};
use crate::rng::SimRng;
use crate::species::{Species, SpeciesCatalog};
use crate::trees::TreePopulation;

/// Everything setup needs, already validated.
#[derive(Debug, Clone)]
pub struct StandParams {
    pub width: u32,
    pub height: u32,
    pub tree_count: u32,
    pub species_ratio: f64,
    pub catalog: SpeciesCatalog,
    pub rates: DemographicRates,
    pub fire: Option<Fire>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetupReport {
    pub trees_requested: u32,
    pub birch_trees: usize,
    pub oak_trees: usize,
    pub fire: Option<FireReport>,
    pub availability: AvailabilityOutcome,
}

pub struct World {
    pub(crate) grid: Grid,
    pub(crate) trees: TreePopulation,
    requested_trees: u32,
    year: u32,
    history: CensusHistory,
    setup: SetupReport,
}

impl World {
    /// Builds the stand: grid, trees, fire, availability, then the year 0
    /// census. All draws come from `rng`.
    pub fn setup(params: &StandParams, rng: &mut SimRng) -> Self {
        let mut grid = Grid::new(params.width, params.height, params.rates);
        let mut trees = TreePopulation::generate(
            params.width,
            params.height,
            params.tree_count,
            params.species_ratio,
            &params.catalog,
            rng,
        );
        let birch_trees = trees.count_species(Species::Birch);
        let oak_trees = trees.count_species(Species::Oak);
        tracing::info!(
            trees = trees.len(),
            birch = birch_trees,
            oak = oak_trees,
            "trees placed"
        );

        let fire = params.fire.map(|fire| {
            let report = fire.apply(&mut grid, &mut trees);
            tracing::info!(
                burnt_patches = report.burnt_patches,
                burnt_area_ha = report.burnt_area_ha,
                trees_before = report.trees_before,
                burnt_trees = report.burnt_trees,
                removed_trees = report.removed_trees,
                trees_after = report.trees_after,
                "fire applied"
            );
            report
        });

        let deadwood_removed = params.fire.map(|f| f.remove_deadwood).unwrap_or(false);
        let availability = compute_availability(&mut grid, &trees, deadwood_removed);
        if let AvailabilityOutcome::Computed { mean_light, .. } = availability {
            tracing::debug!(mean_light, "availability computed");
        }

        let mut history = CensusHistory::new(grid.cell_count(), grid.burnt_patch_count());
        history.push(0, Census::collect(&grid));

        Self {
            grid,
            trees,
            requested_trees: params.tree_count,
            year: 0,
            history,
            setup: SetupReport {
                trees_requested: params.tree_count,
                birch_trees,
                oak_trees,
                fire,
                availability,
            },
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn trees(&self) -> &TreePopulation {
        &self.trees
    }

    /// Trees asked for at setup, before any fire removal.
    pub fn requested_trees(&self) -> u32 {
        self.requested_trees
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn history(&self) -> &CensusHistory {
        &self.history
    }

    pub fn setup_report(&self) -> &SetupReport {
        &self.setup
    }

    pub fn latest_census(&self) -> Census {
        self.history
            .latest()
            .map(|record| record.census)
            .unwrap_or_default()
    }

    pub(crate) fn advance_year(&mut self) {
        self.year += 1;
    }

    pub(crate) fn record_census(&mut self) -> Census {
        let census = Census::collect(&self.grid);
        self.history.push(self.year, census);
        census
    }

    pub fn total_individuals(&self) -> u64 {
        self.grid
            .patches()
            .iter()
            .map(|patch| patch.total_individuals() as u64)
            .sum()
    }
}
