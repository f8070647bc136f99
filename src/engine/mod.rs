use std::time::Instant;

use anyhow::Result;
use serde::Serialize;

use crate::{
    census::Census,
    error::{ConfigError, SimError},
    rng::SimRng,
    systems::{DispersalSystem, PopulationDynamicsSystem},
    world::{StandParams, World},
};

pub struct EngineSettings {
    pub scenario_name: String,
    pub seed: u64,
}

pub struct EngineBuilder {
    settings: EngineSettings,
    systems: Vec<Box<dyn System>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            systems: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    /// Seed dispersal followed by population dynamics.
    pub fn with_default_systems(self) -> Self {
        self.with_system(DispersalSystem::new())
            .with_system(PopulationDynamicsSystem::new())
    }

    pub fn build(self) -> Engine {
        Engine {
            rng: SimRng::new(self.settings.seed),
            systems: self.systems,
            settings: self.settings,
        }
    }
}

pub struct Engine {
    rng: SimRng,
    systems: Vec<Box<dyn System>>,
    settings: EngineSettings,
}

#[derive(Clone, Debug, Serialize)]
pub struct SystemRunReport {
    pub name: String,
    pub duration_ms: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct YearSummary {
    pub year: u32,
    pub census: Census,
    pub system_reports: Vec<SystemRunReport>,
}

impl Engine {
    /// Builds a world from the engine's random stream so setup and the
    /// yearly systems share one sequence of draws.
    pub fn setup(&mut self, params: &StandParams) -> World {
        World::setup(params, &mut self.rng)
    }

    pub fn run(&mut self, world: &mut World, years: u32) -> Result<Vec<YearSummary>> {
        let mut summaries = Vec::with_capacity(years as usize);
        self.run_with_hook(world, years, |summary| summaries.push(summary.clone()))?;
        Ok(summaries)
    }

    /// Runs `years` ticks, handing each year's summary to `hook`. Refuses to
    /// start when setup asked for zero trees.
    pub fn run_with_hook<F>(&mut self, world: &mut World, years: u32, mut hook: F) -> Result<()>
    where
        F: FnMut(&YearSummary),
    {
        if world.requested_trees() == 0 {
            tracing::error!("cannot simulate with zero trees");
            return Err(SimError::from(ConfigError::NoTrees).into());
        }

        for i in 0..years {
            let mut system_reports = Vec::with_capacity(self.systems.len());
            for system in &mut self.systems {
                let ctx = SystemContext {
                    year: world.year() + 1,
                    scenario_name: &self.settings.scenario_name,
                };
                let start = Instant::now();
                system.run(&ctx, world, &mut self.rng)?;
                let duration_ms = start.elapsed().as_secs_f64() * 1_000.0;
                tracing::debug!(system = system.name(), duration_ms, "system finished");
                system_reports.push(SystemRunReport {
                    name: system.name().to_string(),
                    duration_ms,
                });
            }
            world.advance_year();
            let census = world.record_census();
            tracing::info!(
                scenario = %self.settings.scenario_name,
                "simulated year {} out of {} years",
                i + 1,
                years
            );
            hook(&YearSummary {
                year: world.year(),
                census,
                system_reports,
            });
        }
        Ok(())
    }
}

pub struct SystemContext<'a> {
    /// The year being simulated, starting at 1.
    pub year: u32,
    pub scenario_name: &'a str,
}

pub trait System {
    fn name(&self) -> &str;
    fn run(&mut self, ctx: &SystemContext, world: &mut World, rng: &mut SimRng) -> Result<()>;
}
