use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    grid::{Grid, Patch, Stage},
    rng::{RngExt, SimRng},
    species::Species,
    world::World,
};

/// Yearly matrix-model update of seeds and saplings.
pub struct PopulationDynamicsSystem;

impl PopulationDynamicsSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PopulationDynamicsSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Oldest first, so an individual promoted this year is not processed again.
const PROCESSING_ORDER: [Stage; 5] = [
    Stage::Hc4,
    Stage::Hc3,
    Stage::Hc2,
    Stage::Hc1,
    Stage::Seed,
];

pub fn mortality_factor(patch: &Patch) -> f32 {
    patch.mortality_rate * (1.0 - patch.light_availability) * (1.0 - patch.water_availability)
}

pub fn growth_factor(patch: &Patch) -> f32 {
    patch.growth_rate * patch.light_availability * patch.water_availability
}

/// Growth probability out of `stage`. Height class 1 grows with the raw
/// patch growth rate, every other stage with the light and water adjusted one.
fn growth_probability(patch: &Patch, stage: Stage) -> f32 {
    match stage {
        Stage::Hc1 => patch.growth_rate,
        _ => growth_factor(patch),
    }
}

fn step_stage(patch: &mut Patch, species: Species, stage: Stage, rng: &mut SimRng) {
    let mortality = mortality_factor(patch);
    let growth = growth_probability(patch, stage);
    let next = stage.next();
    let bound = patch.counts(species).get(stage);
    let counts = patch.counts_mut(species);
    for _ in 0..bound {
        // mortality and growth are checked independently; one individual can
        // trigger both and leave its stage twice. Only the decrement saturates.
        if rng.chance(mortality) {
            counts.remove(stage, 1);
        }
        if let Some(next) = next {
            if rng.chance(growth) {
                counts.remove(stage, 1);
                counts.add(next, 1);
            }
        }
    }
}

pub fn step_patch(patch: &mut Patch, rng: &mut SimRng) {
    for species in Species::ALL {
        for stage in PROCESSING_ORDER {
            step_stage(patch, species, stage, rng);
        }
    }
}

/// Applies one year of mortality and growth to every patch in row-major order.
pub fn step(grid: &mut Grid, rng: &mut SimRng) {
    for patch in grid.patches_mut() {
        step_patch(patch, rng);
    }
}

impl System for PopulationDynamicsSystem {
    fn name(&self) -> &str {
        "population_dynamics"
    }

    fn run(&mut self, _ctx: &SystemContext, world: &mut World, rng: &mut SimRng) -> Result<()> {
        step(&mut world.grid, rng);
        Ok(())
    }
}
