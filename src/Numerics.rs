/// scalar root finding (secant, Newton with a finite-difference derivative)
pub mod root_finding;
