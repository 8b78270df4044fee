//! # Reactions of the hydrogen reduction of iron oxides
//!
//! A reaction is an ordered list of (species, phase, stoichiometric coefficient) terms.
//! Products carry positive coefficients, reactants negative ones, so the reaction free
//! energy is the plain coefficient-weighted sum of the species Gibbs energies at one T:
//!
//! ```text
//! dG(T) = SUM_i nu_i * G_i(T),    ln K = -dG / (R*T)
//! ```
//!
//! The four reduction steps and the wustite decomposition are built in
//! ([`Reaction::builtin_reductions`], [`Reaction::wustite_decomposition`]); other reactions of
//! the same six species can be parsed from an equation string with [`Reaction::from_equation`].
use crate::Thermodynamics::Shomate::ThermoError;
use crate::Thermodynamics::ShomateEvaluator::ShomateEvaluator;
use crate::Thermodynamics::Species::{Phase, Species};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// gas constant, kJ/(mol*K)
pub const R: f64 = 8.314e-3;

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<=>|=>|->|→|=").expect("valid separator regex"));
static TERM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<coef>\d+/\d+|\d+(?:\.\d*)?|\.\d+)?\s*(?P<formula>[A-Z][A-Za-z0-9]*)\s*(?:\((?P<phase>[A-Za-z]+)\))?$",
    )
    .expect("valid term regex")
});

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReactionParseError {
    #[error("no '=', '=>', '->' or '<=>' in '{0}'")]
    MissingSeparator(String),
    #[error("cannot read term '{0}'")]
    BadTerm(String),
    #[error("bad stoichiometric coefficient '{0}'")]
    BadCoefficient(String),
    #[error("unknown species '{0}'")]
    UnknownSpecies(String),
    #[error("unknown phase tag '{0}'")]
    UnknownPhase(String),
}

/// Which H2O phase applies to water terms that do not name a phase.
/// The gas fit starts at 300 K and the liquid fit ends at 500 K, so the choice depends on T.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterPhaseRule {
    /// same phase at every temperature
    Fixed(Phase),
    /// liquid below the given temperature, gas at and above it
    LiquidBelow(f64),
}

impl WaterPhaseRule {
    pub fn phase_at(&self, T: f64) -> Phase {
        match *self {
            WaterPhaseRule::Fixed(phase) => phase,
            WaterPhaseRule::LiquidBelow(t_switch) => {
                if T < t_switch {
                    Phase::Liquid
                } else {
                    Phase::Gas
                }
            }
        }
    }
}

impl Default for WaterPhaseRule {
    fn default() -> Self {
        WaterPhaseRule::Fixed(Phase::Gas)
    }
}

/// Part of the temperature axis where a reaction is thermodynamically meaningful.
/// Reactions through FeO only make sense where FeO is stable, i.e. above the crossover Tc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StabilityWindow {
    Everywhere,
    AtOrAboveCrossover,
    BelowCrossover,
}

impl StabilityWindow {
    pub fn contains(&self, T: f64, crossover: f64) -> bool {
        match self {
            StabilityWindow::Everywhere => true,
            StabilityWindow::AtOrAboveCrossover => T >= crossover,
            StabilityWindow::BelowCrossover => T < crossover,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReactionTerm {
    pub species: Species,
    /// None: H2O follows the water rule, other species use their default phase
    pub phase: Option<Phase>,
    /// positive for products, negative for reactants
    pub coefficient: f64,
}

impl ReactionTerm {
    pub fn new(species: Species, phase: Option<Phase>, coefficient: f64) -> Self {
        Self {
            species,
            phase,
            coefficient,
        }
    }

    pub fn phase_at(&self, T: f64, water: &WaterPhaseRule) -> Option<Phase> {
        match (self.phase, self.species) {
            (Some(phase), _) => Some(phase),
            (None, Species::H2O) => Some(water.phase_at(T)),
            (None, _) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reaction {
    pub name: String,
    pub equation: String,
    pub terms: Vec<ReactionTerm>,
    pub window: StabilityWindow,
}

impl Reaction {
    pub fn new(name: &str, equation: &str, terms: Vec<ReactionTerm>) -> Self {
        Self {
            name: name.to_string(),
            equation: equation.to_string(),
            terms,
            window: StabilityWindow::Everywhere,
        }
    }

    pub fn with_window(mut self, window: StabilityWindow) -> Self {
        self.window = window;
        self
    }

    ////////////////////////////////////BUILT-IN REACTIONS////////////////////////////////////////
    /// (1) 3Fe2O3 + H2 = 2Fe3O4 + H2O
    pub fn hematite_to_magnetite() -> Self {
        use Species::*;
        Reaction::new(
            "R1",
            "3Fe2O3(s) + H2(g) => 2Fe3O4(s) + H2O(g)",
            vec![
                ReactionTerm::new(Fe3O4, None, 2.0),
                ReactionTerm::new(H2O, None, 1.0),
                ReactionTerm::new(Fe2O3, None, -3.0),
                ReactionTerm::new(H2, None, -1.0),
            ],
        )
    }

    /// (2) Fe3O4 + H2 = 3FeO + H2O
    pub fn magnetite_to_wustite() -> Self {
        use Species::*;
        Reaction::new(
            "R2",
            "Fe3O4(s) + H2(g) => 3FeO(s) + H2O(g)",
            vec![
                ReactionTerm::new(FeO, None, 3.0),
                ReactionTerm::new(H2O, None, 1.0),
                ReactionTerm::new(Fe3O4, None, -1.0),
                ReactionTerm::new(H2, None, -1.0),
            ],
        )
        .with_window(StabilityWindow::AtOrAboveCrossover)
    }

    /// (3) FeO + H2 = Fe + H2O
    pub fn wustite_to_iron() -> Self {
        use Species::*;
        Reaction::new(
            "R3",
            "FeO(s) + H2(g) => Fe(s) + H2O(g)",
            vec![
                ReactionTerm::new(Fe, None, 1.0),
                ReactionTerm::new(H2O, None, 1.0),
                ReactionTerm::new(FeO, None, -1.0),
                ReactionTerm::new(H2, None, -1.0),
            ],
        )
        .with_window(StabilityWindow::AtOrAboveCrossover)
    }

    /// (4) 1/4 Fe3O4 + H2 = 3/4 Fe + H2O, per mole of H2
    pub fn magnetite_to_iron() -> Self {
        use Species::*;
        Reaction::new(
            "R4",
            "1/4 Fe3O4(s) + H2(g) => 3/4 Fe(s) + H2O(g)",
            vec![
                ReactionTerm::new(Fe, None, 0.75),
                ReactionTerm::new(H2O, None, 1.0),
                ReactionTerm::new(Fe3O4, None, -0.25),
                ReactionTerm::new(H2, None, -1.0),
            ],
        )
        .with_window(StabilityWindow::BelowCrossover)
    }

    /// (5) 4FeO = Fe + Fe3O4; its dG changes sign at the crossover temperature
    pub fn wustite_decomposition() -> Self {
        use Species::*;
        Reaction::new(
            "R5",
            "4FeO(s) => Fe(s) + Fe3O4(s)",
            vec![
                ReactionTerm::new(Fe, None, 1.0),
                ReactionTerm::new(Fe3O4, None, 1.0),
                ReactionTerm::new(FeO, None, -4.0),
            ],
        )
    }

    /// reactions (1)-(4) in order
    pub fn builtin_reductions() -> Vec<Reaction> {
        vec![
            Self::hematite_to_magnetite(),
            Self::magnetite_to_wustite(),
            Self::wustite_to_iron(),
            Self::magnetite_to_iron(),
        ]
    }

    ////////////////////////////////////PARSING////////////////////////////////////////////////////
    /// Parses "a A(ph) + b B => c C + d D". Coefficients may be integers, decimals or
    /// fractions ("3/4"). Phase tags: (s), (solid) and (cr) keep the default phase of an
    /// iron species, (l), (g), (alpha), (delta) select the phase explicitly, no tag keeps the
    /// default. A solid tag on H2 or H2O is kept and fails at evaluation.
    pub fn from_equation(name: &str, equation: &str) -> Result<Self, ReactionParseError> {
        let sides: Vec<&str> = SEPARATOR.splitn(equation, 2).collect();
        if sides.len() != 2 {
            return Err(ReactionParseError::MissingSeparator(equation.to_string()));
        }

        let mut terms = Vec::new();
        for (side, sign) in [(sides[0], -1.0), (sides[1], 1.0)] {
            for raw in side.split('+') {
                let raw = raw.trim();
                let caps = TERM
                    .captures(raw)
                    .ok_or_else(|| ReactionParseError::BadTerm(raw.to_string()))?;
                let coefficient = match caps.name("coef") {
                    Some(m) => parse_coefficient(m.as_str())?,
                    None => 1.0,
                };
                let formula = &caps["formula"];
                let species = formula
                    .parse::<Species>()
                    .map_err(|_| ReactionParseError::UnknownSpecies(formula.to_string()))?;
                let phase = match caps.name("phase").map(|m| m.as_str()) {
                    None => None,
                    Some(tag) => match tag.parse::<Phase>() {
                        Ok(Phase::Solid) if !matches!(species, Species::H2O | Species::H2) => {
                            None
                        }
                        Ok(phase) => Some(phase),
                        Err(_) => return Err(ReactionParseError::UnknownPhase(tag.to_string())),
                    },
                };
                terms.push(ReactionTerm::new(species, phase, sign * coefficient));
            }
        }
        Ok(Reaction::new(name, equation.trim(), terms))
    }

    ////////////////////////////////////CALCULATIONS///////////////////////////////////////////////
    /// net number of Fe, O and H atoms (products minus reactants)
    pub fn element_balance(&self) -> [f64; 3] {
        let mut balance = [0.0; 3];
        for term in &self.terms {
            for (b, n) in balance.iter_mut().zip(term.species.composition()) {
                *b += term.coefficient * n as f64;
            }
        }
        balance
    }

    pub fn is_balanced(&self) -> bool {
        self.element_balance().iter().all(|b| b.abs() < 1e-12)
    }

    /// reaction Gibbs free energy at T, kJ/mol
    pub fn delta_G(
        &self,
        evaluator: &ShomateEvaluator,
        T: f64,
        water: &WaterPhaseRule,
    ) -> Result<f64, ThermoError> {
        let mut dG = 0.0;
        for term in &self.terms {
            dG += term.coefficient * evaluator.gibbs(term.species, T, term.phase_at(T, water))?;
        }
        Ok(dG)
    }

    pub fn ln_K(
        &self,
        evaluator: &ShomateEvaluator,
        T: f64,
        water: &WaterPhaseRule,
    ) -> Result<f64, ThermoError> {
        Ok(ln_K_from_delta_G(self.delta_G(evaluator, T, water)?, T))
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}) {}", self.name, self.equation)
    }
}

/// ln K = -dG/(R*T), dG in kJ/mol
pub fn ln_K_from_delta_G(delta_G: f64, T: f64) -> f64 {
    -delta_G / (R * T)
}

fn parse_coefficient(s: &str) -> Result<f64, ReactionParseError> {
    let bad = || ReactionParseError::BadCoefficient(s.to_string());
    let value = match s.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.parse().map_err(|_| bad())?;
            let den: f64 = den.parse().map_err(|_| bad())?;
            if den == 0.0 {
                return Err(bad());
            }
            num / den
        }
        None => s.parse().map_err(|_| bad())?,
    };
    if value > 0.0 { Ok(value) } else { Err(bad()) }
}
