//! Per-stage, per-species population totals over the whole stand and over the
//! burnt area, plus the yearly history kept for charting.

use serde::Serialize;

use crate::grid::{Grid, Stage, PATCHES_PER_HECTARE, STAGE_COUNT};
use crate::species::Species;

pub type StageTotals = [u64; STAGE_COUNT];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Area {
    Whole,
    Burnt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Census {
    pub birch_total: StageTotals,
    pub oak_total: StageTotals,
    pub birch_burnt: StageTotals,
    pub oak_burnt: StageTotals,
}

impl Census {
    pub fn collect(grid: &Grid) -> Self {
        let mut census = Census::default();
        for patch in grid.patches() {
            for species in Species::ALL {
                let counts = patch.counts(species).as_array();
                add_into(census.totals_mut(species, Area::Whole), &counts);
                if patch.is_burnt() {
                    add_into(census.totals_mut(species, Area::Burnt), &counts);
                }
            }
        }
        census
    }

    pub fn totals(&self, species: Species, area: Area) -> &StageTotals {
        match (species, area) {
            (Species::Birch, Area::Whole) => &self.birch_total,
            (Species::Oak, Area::Whole) => &self.oak_total,
            (Species::Birch, Area::Burnt) => &self.birch_burnt,
            (Species::Oak, Area::Burnt) => &self.oak_burnt,
        }
    }

    fn totals_mut(&mut self, species: Species, area: Area) -> &mut StageTotals {
        match (species, area) {
            (Species::Birch, Area::Whole) => &mut self.birch_total,
            (Species::Oak, Area::Whole) => &mut self.oak_total,
            (Species::Birch, Area::Burnt) => &mut self.birch_burnt,
            (Species::Oak, Area::Burnt) => &mut self.oak_burnt,
        }
    }

    pub fn count(&self, species: Species, stage: Stage, area: Area) -> u64 {
        self.totals(species, area)[stage.index()]
    }

    pub fn species_total(&self, species: Species, area: Area) -> u64 {
        self.totals(species, area).iter().sum()
    }
}

fn add_into(totals: &mut StageTotals, counts: &[u32; STAGE_COUNT]) {
    for (total, count) in totals.iter_mut().zip(counts) {
        *total += *count as u64;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearCensus {
    pub year: u32,
    pub census: Census,
}

/// Ordered census records, year 0 being the post-setup state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CensusHistory {
    records: Vec<YearCensus>,
    cells: usize,
    burnt_cells: usize,
}

impl CensusHistory {
    pub fn new(cell_count: usize, burnt_cells: usize) -> Self {
        Self {
            records: Vec::new(),
            cells: cell_count,
            burnt_cells,
        }
    }

    pub fn push(&mut self, year: u32, census: Census) {
        self.records.push(YearCensus { year, census });
    }

    pub fn records(&self) -> &[YearCensus] {
        &self.records
    }

    pub fn latest(&self) -> Option<&YearCensus> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn series(&self, species: Species, stage: Stage, area: Area) -> Vec<u64> {
        self.records
            .iter()
            .map(|record| record.census.count(species, stage, area))
            .collect()
    }

    /// Individuals per hectare of the chosen area. The burnt series is zero
    /// when nothing burnt.
    ///
    /// This is a true per-hectare figure (`count * 400 / cells`), unlike the
    /// legacy charts which plotted `count / 400` regardless of the area.
    pub fn density_series(&self, species: Species, stage: Stage, area: Area) -> Vec<f64> {
        let cells = match area {
            Area::Whole => self.cells,
            Area::Burnt => self.burnt_cells,
        };
        self.series(species, stage, area)
            .into_iter()
            .map(|count| {
                if cells > 0 {
                    count as f64 * PATCHES_PER_HECTARE as f64 / cells as f64
                } else {
                    0.0
                }
            })
            .collect()
    }
}
