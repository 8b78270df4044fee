//! # Shomate equation
//!
//! NIST Chemistry WebBook condensed and gas phase data are given as the Shomate equation
//! in the reduced temperature t = T/1000:
//!
//! ```text
//! Cp = A + B*t + C*t^2 + D*t^3 + E/t^2                         J/(mol*K)
//! H  = A*t + B*t^2/2 + C*t^3/3 + D*t^4/4 - E/t + F              kJ/mol
//! S  = A*ln(t) + B*t + C*t^2/2 + D*t^3/3 - E/(2*t^2) + G         J/(mol*K)
//! G  = H - t*S                                                  kJ/mol
//! ```
//!
//! Coefficients are only valid over a bounded temperature interval, so the data of a species
//! is organised in two levels: a [`PhaseBlock`] covers the whole validity range of one phase,
//! and holds one or more [`ShomateSegment`]s that split that range into the intervals of the
//! NIST fit. Both levels use half-open intervals [T_min, T_max).
use crate::Thermodynamics::Species::{Phase, Species};
use serde::Serialize;
use thiserror::Error;

/// The only failure of the property evaluator: no coefficients for (species, T, phase).
/// `phase` is kept as a string so that unrecognised phase names can be reported verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThermoError {
    #[error("{species}: no Shomate coefficients for T = {temperature} K and phase '{phase}'")]
    OutOfRange {
        species: Species,
        temperature: f64,
        phase: String,
    },
}

impl ThermoError {
    pub fn out_of_range(species: Species, temperature: f64, phase: &str) -> Self {
        ThermoError::OutOfRange {
            species,
            temperature,
            phase: phase.to_string(),
        }
    }
}

/// A..G coefficients of the Shomate equation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShomateCoeffs {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
    pub g: f64,
}

/// one fitted temperature interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShomateSegment {
    pub t_min: f64,
    pub t_max: f64,
    pub coeffs: ShomateCoeffs,
    /// standard formation enthalpy H at 298.15 K, kJ/mol. Diagnostic only, G does not need it
    pub h_ref: Option<f64>,
}

impl ShomateSegment {
    pub fn contains(&self, temperature: f64) -> bool {
        self.t_min <= temperature && temperature < self.t_max
    }
}

/// all segments of one phase of one species
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseBlock {
    pub phase: Phase,
    pub t_min: f64,
    pub t_max: f64,
    pub segments: &'static [ShomateSegment],
}

impl PhaseBlock {
    pub fn contains(&self, temperature: f64) -> bool {
        self.t_min <= temperature && temperature < self.t_max
    }

    /// inner lookup: the segment whose interval holds T
    pub fn segment(&self, temperature: f64) -> Option<&'static ShomateSegment> {
        self.segments.iter().find(|seg| seg.contains(temperature))
    }
}

/// Two-level segment selection: the block of the requested phase must contain T,
/// then exactly one of its segments must contain T.
/// NaN never satisfies the range comparisons, so it falls through to OutOfRange.
pub fn select_segment(
    species: Species,
    blocks: &'static [PhaseBlock],
    temperature: f64,
    phase: Phase,
) -> Result<&'static ShomateSegment, ThermoError> {
    blocks
        .iter()
        .filter(|block| block.phase == phase && block.contains(temperature))
        .find_map(|block| block.segment(temperature))
        .ok_or_else(|| ThermoError::out_of_range(species, temperature, phase.as_str()))
}

////////////////////////////////////////NIST FORMAT FUNCTIONS//////////////////////////////////////////
pub fn calculate_cp(t: f64, k: &ShomateCoeffs) -> f64 {
    k.a + k.b * t + k.c * t.powi(2) + k.d * t.powi(3) + k.e / t.powi(2)
}

pub fn calculate_dh(t: f64, k: &ShomateCoeffs) -> f64 {
    k.a * t + k.b * t.powi(2) / 2.0 + k.c * t.powi(3) / 3.0 + k.d * t.powi(4) / 4.0 - k.e / t + k.f
}

pub fn calculate_s(t: f64, k: &ShomateCoeffs) -> f64 {
    k.a * t.ln() + k.b * t + k.c * t.powi(2) / 2.0 + k.d * t.powi(3) / 3.0
        - k.e / (2.0 * t.powi(2))
        + k.g
}

/// G in kJ/mol from H in kJ/mol and S in J/(mol*K); the 1/1000 is carried by t
pub fn calculate_g(t: f64, dh: f64, s: f64) -> f64 {
    dh - t * s
}

/// Properties of one species at one temperature. Cp and S in J/(mol*K), H and G in kJ/mol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThermoProperties {
    pub temperature: f64,
    pub cp: f64,
    pub hf: f64,
    pub sf: f64,
    pub gf: f64,
    /// H at 298.15 K of the segment used, if the data source lists it
    pub h_ref: Option<f64>,
}

impl ThermoProperties {
    /// H, S and G are always computed together because G = H - t*S
    pub fn from_segment(temperature: f64, segment: &ShomateSegment) -> Self {
        let t = temperature / 1000.0;
        let k = &segment.coeffs;
        let hf = calculate_dh(t, k);
        let sf = calculate_s(t, k);
        Self {
            temperature,
            cp: calculate_cp(t, k),
            hf,
            sf,
            gf: calculate_g(t, hf, sf),
            h_ref: segment.h_ref,
        }
    }

    /// H(T) - H(298.15 K), the tabulated "H° - H°298.15" column of NIST
    pub fn sensible_enthalpy(&self) -> Option<f64> {
        self.h_ref.map(|h| self.hf - h)
    }
}
