//! Gibbs free energies of the Fe2O3/Fe3O4/FeO/Fe/H2O/H2 system from NIST Shomate fits,
//! equilibrium constants of the hydrogen reduction of iron oxides and the FeO crossover
//! temperature.
#[allow(non_snake_case)]
pub mod ChemEquilibrium;
#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod Numerics;
#[allow(non_snake_case)]
pub mod Thermodynamics;
pub mod cli;
pub mod settings;
