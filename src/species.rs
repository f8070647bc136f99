//! Static per-species parameters.

use serde::{Deserialize, Serialize};

pub const SPECIES_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Birch,
    Oak,
}

impl Species {
    pub const ALL: [Species; SPECIES_COUNT] = [Species::Birch, Species::Oak];

    pub fn index(self) -> usize {
        match self {
            Species::Birch => 0,
            Species::Oak => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Species::Birch => "birch",
            Species::Oak => "oak",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeciesTraits {
    /// Maximum dispersal distance in grid units.
    pub dispersal_factor: u32,
    pub max_seed_production: u32,
    #[serde(default = "default_tag")]
    pub tag: char,
}

fn default_tag() -> char {
    '?'
}

fn default_birch() -> SpeciesTraits {
    SpeciesTraits {
        dispersal_factor: 20,
        max_seed_production: 50,
        tag: 'b',
    }
}

fn default_oak() -> SpeciesTraits {
    SpeciesTraits {
        dispersal_factor: 40,
        max_seed_production: 100,
        tag: 'o',
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesCatalog {
    #[serde(default = "default_birch")]
    pub birch: SpeciesTraits,
    #[serde(default = "default_oak")]
    pub oak: SpeciesTraits,
}

impl SpeciesCatalog {
    pub fn traits(&self, species: Species) -> &SpeciesTraits {
        match species {
            Species::Birch => &self.birch,
            Species::Oak => &self.oak,
        }
    }
}

impl Default for SpeciesCatalog {
    fn default() -> Self {
        Self {
            birch: default_birch(),
            oak: default_oak(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_matches_reference_parameters() {
        let catalog = SpeciesCatalog::default();

        let birch = catalog.traits(Species::Birch);
        assert_eq!(birch.dispersal_factor, 20);
        assert_eq!(birch.max_seed_production, 50);
        assert_eq!(birch.tag, 'b');

        let oak = catalog.traits(Species::Oak);
        assert_eq!(oak.dispersal_factor, 40);
        assert_eq!(oak.max_seed_production, 100);
        assert_eq!(oak.tag, 'o');
    }

    #[test]
    fn species_indices_are_dense() {
        for (expected, species) in Species::ALL.iter().enumerate() {
            assert_eq!(species.index(), expected);
        }
    }

    #[test]
    fn partial_override_keeps_other_species() {
        let catalog: SpeciesCatalog =
            serde_yaml::from_str("oak:\n  dispersal_factor: 10\n  max_seed_production: 5\n")
                .unwrap();
        assert_eq!(catalog.birch, default_birch());
        assert_eq!(catalog.oak.dispersal_factor, 10);
        assert_eq!(catalog.oak.max_seed_production, 5);
    }
}
