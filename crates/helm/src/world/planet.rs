use std::sync::Arc;
use serde::{Deserialize, Serialize};

/// A landable location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    /// What the planet calls itself in messages ("planet", "station", "moon").
    #[serde(default = "default_noun")]
    pub noun: String,
    #[serde(default)]
    pub is_wormhole: bool,
    #[serde(default)]
    pub is_inhabited: bool,
}

fn default_noun() -> String {
    "planet".to_string()
}

impl Planet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            noun: default_noun(),
            is_wormhole: false,
            is_inhabited: true,
        }
    }

    pub fn with_noun(mut self, noun: impl Into<String>) -> Self {
        self.noun = noun.into();
        self
    }

    pub fn uninhabited(mut self) -> Self {
        self.is_inhabited = false;
        self
    }

    pub fn wormhole(mut self) -> Self {
        self.is_wormhole = true;
        self
    }
}

/// A body in a star system that a ship can target. Not every stellar object
/// has a planet attached (stars, gas giants without ports).
#[derive(Debug, Clone)]
pub struct StellarObject {
    pub name: String,
    pub planet: Option<Arc<Planet>>,
}

impl StellarObject {
    pub fn new(name: impl Into<String>, planet: Option<Arc<Planet>>) -> Self {
        Self {
            name: name.into(),
            planet,
        }
    }
}
