mod dispersal;
mod dynamics;

pub use dispersal::{disperse, seed_offset, DispersalReport, DispersalSystem};
pub use dynamics::{growth_factor, mortality_factor, step, PopulationDynamicsSystem};
