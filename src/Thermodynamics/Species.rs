//! # Species and phases of the iron oxide / hydrogen reduction system
//!
//! The set of species is fixed: three iron oxides, metallic iron, water and hydrogen.
//! Every species supports a small set of phases, and every phase is backed by one block of
//! Shomate coefficients in [`crate::Thermodynamics::ShomateData`].
//!
//! The phase a caller gets when it does not name one is never a hidden global: it lives in
//! [`PhaseDefaults`], which is handed to the evaluator explicitly (and may be read from the
//! scenario configuration).
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Species of the Fe2O3/Fe3O4/FeO/Fe/H2O/H2 system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    /// hematite
    Fe2O3,
    /// magnetite
    Fe3O4,
    /// wustite
    FeO,
    /// iron
    Fe,
    /// water
    H2O,
    /// hydrogen
    H2,
}

impl Species {
    pub const ALL: [Species; 6] = [
        Species::Fe2O3,
        Species::Fe3O4,
        Species::FeO,
        Species::Fe,
        Species::H2O,
        Species::H2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Fe2O3 => "Fe2O3",
            Species::Fe3O4 => "Fe3O4",
            Species::FeO => "FeO",
            Species::Fe => "Fe",
            Species::H2O => "H2O",
            Species::H2 => "H2",
        }
    }

    /// atoms of (Fe, O, H) in one formula unit, used for element balance of reactions
    pub fn composition(&self) -> [u32; 3] {
        match self {
            Species::Fe2O3 => [2, 3, 0],
            Species::Fe3O4 => [3, 4, 0],
            Species::FeO => [1, 1, 0],
            Species::Fe => [1, 0, 0],
            Species::H2O => [0, 1, 2],
            Species::H2 => [0, 0, 2],
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSpecies(pub String);

impl fmt::Display for UnknownSpecies {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown species '{}'", self.0)
    }
}

impl std::error::Error for UnknownSpecies {}

impl FromStr for Species {
    type Err = UnknownSpecies;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::ALL
            .iter()
            .find(|sp| sp.as_str() == s.trim())
            .copied()
            .ok_or_else(|| UnknownSpecies(s.to_string()))
    }
}

/// Phase selector. Alpha and delta are the solid allotropes of iron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Solid,
    Liquid,
    Gas,
    Alpha,
    Delta,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Solid => "solid",
            Phase::Liquid => "liquid",
            Phase::Gas => "gas",
            Phase::Alpha => "alpha",
            Phase::Delta => "delta",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPhase(pub String);

impl fmt::Display for UnknownPhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown phase '{}'", self.0)
    }
}

impl std::error::Error for UnknownPhase {}

impl FromStr for Phase {
    type Err = UnknownPhase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s" | "solid" | "cr" => Ok(Phase::Solid),
            "l" | "liquid" => Ok(Phase::Liquid),
            "g" | "gas" => Ok(Phase::Gas),
            "alpha" => Ok(Phase::Alpha),
            "delta" => Ok(Phase::Delta),
            _ => Err(UnknownPhase(s.to_string())),
        }
    }
}

/// Phase used for each species when the caller passes no phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseDefaults {
    #[serde(rename = "Fe2O3")]
    pub fe2o3: Phase,
    #[serde(rename = "Fe3O4")]
    pub fe3o4: Phase,
    #[serde(rename = "FeO")]
    pub feo: Phase,
    #[serde(rename = "Fe")]
    pub fe: Phase,
    #[serde(rename = "H2O")]
    pub h2o: Phase,
    #[serde(rename = "H2")]
    pub h2: Phase,
}

impl PhaseDefaults {
    /// the most common phase of every species in the 300-1500 K window
    pub const STANDARD: PhaseDefaults = PhaseDefaults {
        fe2o3: Phase::Solid,
        fe3o4: Phase::Solid,
        feo: Phase::Solid,
        fe: Phase::Alpha,
        h2o: Phase::Gas,
        h2: Phase::Gas,
    };

    pub fn default_for(&self, species: Species) -> Phase {
        match species {
            Species::Fe2O3 => self.fe2o3,
            Species::Fe3O4 => self.fe3o4,
            Species::FeO => self.feo,
            Species::Fe => self.fe,
            Species::H2O => self.h2o,
            Species::H2 => self.h2,
        }
    }

    pub fn set(&mut self, species: Species, phase: Phase) {
        match species {
            Species::Fe2O3 => self.fe2o3 = phase,
            Species::Fe3O4 => self.fe3o4 = phase,
            Species::FeO => self.feo = phase,
            Species::Fe => self.fe = phase,
            Species::H2O => self.h2o = phase,
            Species::H2 => self.h2 = phase,
        }
    }

    /// explicit phase wins, otherwise the configured default
    pub fn resolve(&self, species: Species, phase: Option<Phase>) -> Phase {
        phase.unwrap_or_else(|| self.default_for(species))
    }
}

impl Default for PhaseDefaults {
    fn default() -> Self {
        Self::STANDARD
    }
}
