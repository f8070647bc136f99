pub mod availability;
pub mod census;
pub mod disturbance;
pub mod engine;
pub mod error;
pub mod grid;
pub mod rng;
pub mod scenario;
pub mod snapshot;
pub mod species;
pub mod systems;
pub mod trees;
pub mod world;

pub use engine::{Engine, EngineBuilder, EngineSettings, YearSummary};
pub use error::{BoundsError, ConfigError, SimError};
pub use scenario::{Scenario, ScenarioLoader};
pub use world::World;
