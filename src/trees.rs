//! Seed-source trees placed once at setup.

use rand::Rng;
use serde::Serialize;

use crate::rng::SimRng;
use crate::species::{Species, SpeciesCatalog};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tree {
    pub id: u32,
    pub x: u32,
    pub y: u32,
    pub species: Species,
    pub dispersal_factor: u32,
    pub max_seed_production: u32,
    pub burnt: bool,
}

impl Tree {
    pub fn position(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }
}

/// Number of birch trees for a given total; the remainder are oak.
pub fn birch_count(count: u32, species_ratio: f64) -> u32 {
    let birch = (count as f64 * (1.0 - species_ratio)).round();
    birch.clamp(0.0, count as f64) as u32
}

#[derive(Debug, Clone, Default)]
pub struct TreePopulation {
    trees: Vec<Tree>,
}

impl TreePopulation {
    /// Places `count` trees uniformly at random (with replacement) on a
    /// `width` x `height` grid. Species follow creation order: the first
    /// [`birch_count`] trees are birch.
    pub fn generate(
        width: u32,
        height: u32,
        count: u32,
        species_ratio: f64,
        catalog: &SpeciesCatalog,
        rng: &mut SimRng,
    ) -> Self {
        let birch = birch_count(count, species_ratio);
        let mut trees = Vec::with_capacity(count as usize);
        if width == 0 || height == 0 {
            return Self { trees };
        }
        for id in 0..count {
            let x = rng.gen_range(0..width);
            let y = rng.gen_range(0..height);
            let species = if id < birch {
                Species::Birch
            } else {
                Species::Oak
            };
            let traits = catalog.traits(species);
            trees.push(Tree {
                id,
                x,
                y,
                species,
                dispersal_factor: traits.dispersal_factor,
                max_seed_production: traits.max_seed_production,
                burnt: false,
            });
        }
        Self { trees }
    }

    pub fn from_trees(trees: Vec<Tree>) -> Self {
        Self { trees }
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tree> {
        self.trees.iter_mut()
    }

    pub fn as_slice(&self) -> &[Tree] {
        &self.trees
    }

    pub fn retain(&mut self, keep: impl FnMut(&Tree) -> bool) {
        self.trees.retain(keep);
    }

    pub fn count_species(&self, species: Species) -> usize {
        self.trees.iter().filter(|t| t.species == species).count()
    }

    pub fn burnt_count(&self) -> usize {
        self.trees.iter().filter(|t| t.burnt).count()
    }
}
