use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    disturbance::Fire,
    error::ConfigError,
    grid::{center_of, DemographicRates},
    species::SpeciesCatalog,
    world::StandParams,
};

pub const MAX_YEARS: u32 = 100;

fn default_seed() -> u64 {
    7
}

fn default_years() -> u32 {
    20
}

fn default_extent() -> u32 {
    300
}

fn default_trees_per_hectare() -> u32 {
    10
}

fn default_species_ratio() -> f64 {
    0.5
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_years")]
    pub years: u32,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub trees: TreeConfig,
    #[serde(default)]
    pub fire: FireConfig,
    #[serde(default)]
    pub dynamics: DemographicRates,
    #[serde(default)]
    pub species: SpeciesCatalog,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_extent")]
    pub width: u32,
    #[serde(default = "default_extent")]
    pub height: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_extent(),
            height: default_extent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    #[serde(default = "default_trees_per_hectare")]
    pub per_hectare: u32,
    /// Fraction of trees that are oak.
    #[serde(default = "default_species_ratio")]
    pub species_ratio: f64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            per_hectare: default_trees_per_hectare(),
            species_ratio: default_species_ratio(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FireConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub radius: u32,
    #[serde(default)]
    pub remove_deadwood: bool,
    /// Defaults to the grid center.
    #[serde(default)]
    pub center: Option<(i32, i32)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        scenario
            .validate()
            .with_context(|| format!("Invalid scenario {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    /// The 300 x 300 reference stand: 10 trees per hectare, even species
    /// mix, a 50-cell fire in the center with deadwood left standing.
    pub fn reference() -> Self {
        Self {
            name: "reference_stand".to_string(),
            description: None,
            seed: default_seed(),
            years: default_years(),
            grid: GridConfig::default(),
            trees: TreeConfig::default(),
            fire: FireConfig {
                enabled: true,
                radius: 50,
                remove_deadwood: false,
                center: None,
            },
            dynamics: DemographicRates::default(),
            species: SpeciesCatalog::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Absolute tree count, scaled from the per-hectare density by the number
    /// of grid cells (`per_hectare * cells / 10 000`).
    pub fn tree_count(&self) -> u32 {
        let cells = self.grid.width as u64 * self.grid.height as u64;
        let count = self.trees.per_hectare as u64 * cells / 10_000;
        count.min(u32::MAX as u64) as u32
    }

    pub fn fire_center(&self) -> (i32, i32) {
        self.fire
            .center
            .unwrap_or_else(|| center_of(self.grid.width, self.grid.height))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridConfig { width, height } = self.grid;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }

        let ratio = self.trees.species_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ConfigError::SpeciesRatio(ratio));
        }

        if !(1..=MAX_YEARS).contains(&self.years) {
            return Err(ConfigError::Years(self.years));
        }

        for (name, value) in [
            ("mortality_rate", self.dynamics.mortality_rate),
            ("growth_rate", self.dynamics.growth_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Rate { name, value });
            }
        }

        if self.fire.enabled {
            let (x, y) = self.fire_center();
            let inside = x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height;
            if !inside {
                return Err(ConfigError::FireCenter {
                    x,
                    y,
                    width,
                    height,
                });
            }
        }

        Ok(())
    }

    pub fn stand_params(&self) -> StandParams {
        let fire = self.fire.enabled.then(|| Fire {
            center: self.fire_center(),
            radius: self.fire.radius,
            remove_deadwood: self.fire.remove_deadwood,
        });
        StandParams {
            width: self.grid.width,
            height: self.grid.height,
            tree_count: self.tree_count(),
            species_ratio: self.trees.species_ratio,
            catalog: self.species.clone(),
            rates: self.dynamics,
            fire,
        }
    }
}
