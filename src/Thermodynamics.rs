/// species of the iron oxide reduction system, their phases and the default phase of every species
pub mod Species;
/// Shomate equation: polynomial forms, coefficient segments, the evaluator error
pub mod Shomate;
/// NIST coefficient table
pub mod ShomateData;
/// property evaluator (Cp, H, S, G) and one entry point per species
/// # Examples
/// ```
/// use ReduThe::Thermodynamics::ShomateEvaluator::{G_Fe, G_FeO};
/// use ReduThe::Thermodynamics::Species::{Phase, PhaseDefaults};
/// let defaults = PhaseDefaults::default();
/// // alpha iron by default
/// let g_alpha = G_Fe(1000.0, None, &defaults, false).unwrap().gibbs();
/// let g_delta = G_Fe(1000.0, Some(Phase::Delta), &defaults, false).unwrap().gibbs();
/// assert!(g_alpha != g_delta);
/// // (H, S, G) on request
/// let (h, s, g) = G_FeO(800.0, None, &defaults, true).unwrap().hsg().unwrap();
/// assert!((g - (h - 0.8 * s)).abs() < 1e-9);
/// // liquid FeO starts where solid FeO ends
/// assert!(G_FeO(1650.0, None, &defaults, false).is_err());
/// assert!(G_FeO(1650.0, Some(Phase::Liquid), &defaults, false).is_ok());
/// ```
pub mod ShomateEvaluator;
