//! Patch field - one patch per 5 m x 5 m grid cell, stored row-major.

use serde::{Deserialize, Serialize};

use crate::error::BoundsError;
use crate::species::{Species, SPECIES_COUNT};

/// Edge length of a patch in meters.
pub const PATCH_EDGE_M: u32 = 5;

/// Patches per hectare (10 000 m² / 25 m²).
pub const PATCHES_PER_HECTARE: u32 = 10_000 / (PATCH_EDGE_M * PATCH_EDGE_M);

pub const STAGE_COUNT: usize = 5;

/// Life stages of the matrix model, youngest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Seed,
    Hc1,
    Hc2,
    Hc3,
    Hc4,
}

impl Stage {
    pub const ALL: [Stage; STAGE_COUNT] = [
        Stage::Seed,
        Stage::Hc1,
        Stage::Hc2,
        Stage::Hc3,
        Stage::Hc4,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The stage an individual grows into, `None` for the terminal height class.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Seed => Some(Stage::Hc1),
            Stage::Hc1 => Some(Stage::Hc2),
            Stage::Hc2 => Some(Stage::Hc3),
            Stage::Hc3 => Some(Stage::Hc4),
            Stage::Hc4 => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Seed => "Seeds",
            Stage::Hc1 => "Height class 1",
            Stage::Hc2 => "Height class 2",
            Stage::Hc3 => "Height class 3",
            Stage::Hc4 => "Height class 4",
        }
    }
}

/// Stage counters of one species within one patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCounts([u32; STAGE_COUNT]);

impl StageCounts {
    pub fn get(&self, stage: Stage) -> u32 {
        self.0[stage.index()]
    }

    pub fn add(&mut self, stage: Stage, count: u32) {
        let slot = &mut self.0[stage.index()];
        *slot = slot.saturating_add(count);
    }

    /// Removes up to `count` individuals; the counter never drops below zero.
    pub fn remove(&mut self, stage: Stage, count: u32) {
        let slot = &mut self.0[stage.index()];
        *slot = slot.saturating_sub(count);
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn as_array(&self) -> [u32; STAGE_COUNT] {
        self.0
    }
}

/// Per-patch base rates, identical for every patch and species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemographicRates {
    #[serde(default = "default_rate")]
    pub mortality_rate: f32,
    #[serde(default = "default_rate")]
    pub growth_rate: f32,
}

fn default_rate() -> f32 {
    0.2
}

impl Default for DemographicRates {
    fn default() -> Self {
        Self {
            mortality_rate: default_rate(),
            growth_rate: default_rate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    x: u32,
    y: u32,
    cohorts: [StageCounts; SPECIES_COUNT],
    pub mortality_rate: f32,
    pub growth_rate: f32,
    burnt: bool,
    pub distance_to_tree: Option<f32>,
    pub light_availability: f32,
    pub water_availability: f32,
}

impl Patch {
    fn new(x: u32, y: u32, rates: DemographicRates) -> Self {
        Self {
            x,
            y,
            cohorts: [StageCounts::default(); SPECIES_COUNT],
            mortality_rate: rates.mortality_rate,
            growth_rate: rates.growth_rate,
            burnt: false,
            distance_to_tree: None,
            light_availability: 0.0,
            water_availability: 1.0,
        }
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn counts(&self, species: Species) -> &StageCounts {
        &self.cohorts[species.index()]
    }

    pub fn counts_mut(&mut self, species: Species) -> &mut StageCounts {
        &mut self.cohorts[species.index()]
    }

    pub fn add_seeds(&mut self, species: Species, count: u32) {
        self.counts_mut(species).add(Stage::Seed, count);
    }

    /// Seeds and saplings of both species in every stage.
    pub fn total_individuals(&self) -> u32 {
        self.cohorts.iter().map(StageCounts::total).sum()
    }

    pub fn is_burnt(&self) -> bool {
        self.burnt
    }

    /// Only the fire at setup burns a patch.
    pub(crate) fn set_burnt(&mut self) {
        self.burnt = true;
    }
}

/// Center cell of a `width x height` grid, rounding down.
pub fn center_of(width: u32, height: u32) -> (i32, i32) {
    ((width / 2) as i32, (height / 2) as i32)
}

pub struct Grid {
    width: u32,
    height: u32,
    patches: Vec<Patch>,
}

impl Grid {
    pub fn new(width: u32, height: u32, rates: DemographicRates) -> Self {
        let mut patches = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                patches.push(Patch::new(x, y, rates));
            }
        }
        Self {
            width,
            height,
            patches,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.patches.len()
    }

    pub fn area_hectares(&self) -> f64 {
        self.patches.len() as f64 / PATCHES_PER_HECTARE as f64
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if self.contains(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn patch(&self, x: i32, y: i32) -> Result<&Patch, BoundsError> {
        let index = self.index_of(x, y).ok_or_else(|| self.out_of_bounds(x, y))?;
        Ok(&self.patches[index])
    }

    pub fn patch_mut(&mut self, x: i32, y: i32) -> Result<&mut Patch, BoundsError> {
        let index = self.index_of(x, y).ok_or_else(|| self.out_of_bounds(x, y))?;
        Ok(&mut self.patches[index])
    }

    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    pub fn patches_mut(&mut self) -> &mut [Patch] {
        &mut self.patches
    }

    pub fn burnt_patch_count(&self) -> usize {
        self.patches.iter().filter(|p| p.is_burnt()).count()
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> BoundsError {
        BoundsError {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}
