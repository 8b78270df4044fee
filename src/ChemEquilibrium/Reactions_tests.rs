#[cfg(test)]
mod tests {
    use crate::ChemEquilibrium::Reactions::{
        R, Reaction, ReactionParseError, ReactionTerm, StabilityWindow, WaterPhaseRule,
        ln_K_from_delta_G,
    };
    use crate::Thermodynamics::Shomate::ThermoError;
    use crate::Thermodynamics::ShomateEvaluator::ShomateEvaluator;
    use crate::Thermodynamics::Species::{Phase, Species};
    use approx::assert_relative_eq;

    fn gas() -> WaterPhaseRule {
        WaterPhaseRule::default()
    }

    #[test]
    fn test_builtin_reactions_are_balanced() {
        for r in Reaction::builtin_reductions() {
            assert!(r.is_balanced(), "{} is not balanced: {:?}", r, r.element_balance());
        }
        assert!(Reaction::wustite_decomposition().is_balanced());
    }

    #[test]
    fn test_parsed_equations_match_builtins() {
        let mut all = Reaction::builtin_reductions();
        all.push(Reaction::wustite_decomposition());
        for builtin in all {
            let parsed = Reaction::from_equation(&builtin.name, &builtin.equation).unwrap();
            assert_eq!(parsed.terms.len(), builtin.terms.len());
            for term in &builtin.terms {
                let found = parsed
                    .terms
                    .iter()
                    .find(|t| t.species == term.species)
                    .unwrap();
                assert_relative_eq!(found.coefficient, term.coefficient);
                // (s) keeps the default, (g) on H2 and H2O is explicit gas
                match term.species {
                    Species::H2 | Species::H2O => assert_eq!(found.phase, Some(Phase::Gas)),
                    _ => assert_eq!(found.phase, None),
                }
            }
        }
    }

    #[test]
    fn test_parse_separators_and_coefficients() {
        for eq in [
            "3Fe2O3 + H2 = 2Fe3O4 + H2O",
            "3Fe2O3 + H2 -> 2Fe3O4 + H2O",
            "3Fe2O3 + H2 <=> 2Fe3O4 + H2O",
            "3Fe2O3 + H2 → 2Fe3O4 + H2O",
            "3 Fe2O3 + 1.0 H2 => 2 Fe3O4 + H2O",
        ] {
            let r = Reaction::from_equation("R", eq).unwrap();
            assert!(r.is_balanced(), "{}", eq);
            let coefficients: Vec<f64> = r.terms.iter().map(|t| t.coefficient).collect();
            assert_eq!(coefficients, vec![-3.0, -1.0, 2.0, 1.0]);
        }
        let r = Reaction::from_equation("R4", "0.25Fe3O4 + H2 = 3/4 Fe(alpha) + H2O(l)").unwrap();
        assert!(r.is_balanced());
        assert_eq!(r.terms[0].coefficient, -0.25);
        assert_eq!(r.terms[2].coefficient, 0.75);
        assert_eq!(r.terms[2].phase, Some(Phase::Alpha));
        assert_eq!(r.terms[3].phase, Some(Phase::Liquid));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Reaction::from_equation("x", "Fe2O3 + H2").unwrap_err(),
            ReactionParseError::MissingSeparator("Fe2O3 + H2".to_string())
        );
        assert_eq!(
            Reaction::from_equation("x", "4FeO = Fe + Fe3O4 + ").unwrap_err(),
            ReactionParseError::BadTerm("".to_string())
        );
        assert_eq!(
            Reaction::from_equation("x", "4FeO = Fe + fe3o4").unwrap_err(),
            ReactionParseError::BadTerm("fe3o4".to_string())
        );
        assert_eq!(
            Reaction::from_equation("x", "4FeO = Fe + Fe3O4 + CO2").unwrap_err(),
            ReactionParseError::UnknownSpecies("CO2".to_string())
        );
        assert_eq!(
            Reaction::from_equation("x", "4FeO(aq) = Fe + Fe3O4").unwrap_err(),
            ReactionParseError::UnknownPhase("aq".to_string())
        );
        assert_eq!(
            Reaction::from_equation("x", "1/0 FeO = Fe").unwrap_err(),
            ReactionParseError::BadCoefficient("1/0".to_string())
        );
        assert_eq!(
            Reaction::from_equation("x", "0 FeO = Fe").unwrap_err(),
            ReactionParseError::BadCoefficient("0".to_string())
        );
    }

    #[test]
    fn test_solid_tag_aliases() {
        let evaluator = ShomateEvaluator::default();
        let reference = Reaction::from_equation("x", "4FeO(s) = Fe(s) + Fe3O4(s)").unwrap();
        let dG = reference.delta_G(&evaluator, 800.0, &gas()).unwrap();
        for eq in [
            "4FeO(solid) = Fe(solid) + Fe3O4(solid)",
            "4FeO(cr) = Fe(cr) + Fe3O4(cr)",
            "4FeO(S) = Fe(Cr) + Fe3O4",
        ] {
            let r = Reaction::from_equation("x", eq).unwrap();
            assert!(r.terms.iter().all(|t| t.phase.is_none()), "{}", eq);
            assert_eq!(r.delta_G(&evaluator, 800.0, &gas()).unwrap(), dG);
        }
        let r = Reaction::from_equation("x", "FeO + H2(cr) = Fe + H2O").unwrap();
        assert_eq!(r.terms[1].phase, Some(Phase::Solid));
        assert!(matches!(
            r.delta_G(&evaluator, 800.0, &gas()),
            Err(ThermoError::OutOfRange { species: Species::H2, .. })
        ));
    }

    #[test]
    fn test_unbalanced_reaction_is_detected() {
        let r = Reaction::from_equation("x", "FeO + H2 = Fe").unwrap();
        assert!(!r.is_balanced());
        assert_eq!(r.element_balance(), [0.0, -1.0, -2.0]);
    }

    #[test]
    fn test_water_rule() {
        assert_eq!(gas().phase_at(298.0), Phase::Gas);
        let rule = WaterPhaseRule::LiquidBelow(373.15);
        assert_eq!(rule.phase_at(298.0), Phase::Liquid);
        assert_eq!(rule.phase_at(373.15), Phase::Gas);

        let implicit = ReactionTerm::new(Species::H2O, None, 1.0);
        assert_eq!(implicit.phase_at(300.0, &rule), Some(Phase::Liquid));
        let explicit = ReactionTerm::new(Species::H2O, Some(Phase::Gas), 1.0);
        assert_eq!(explicit.phase_at(300.0, &rule), Some(Phase::Gas));
        let iron = ReactionTerm::new(Species::Fe, None, 1.0);
        assert_eq!(iron.phase_at(300.0, &rule), None);

        let json = serde_json::to_string(&rule).unwrap();
        let back: WaterPhaseRule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }

    #[test]
    fn test_stability_windows() {
        let tc = 455.3;
        assert!(StabilityWindow::Everywhere.contains(300.0, tc));
        assert!(StabilityWindow::AtOrAboveCrossover.contains(tc, tc));
        assert!(!StabilityWindow::AtOrAboveCrossover.contains(400.0, tc));
        assert!(StabilityWindow::BelowCrossover.contains(400.0, tc));
        assert!(!StabilityWindow::BelowCrossover.contains(tc, tc));
    }

    #[test]
    fn test_delta_G_of_builtins() {
        let ev = ShomateEvaluator::default();
        let expected = [
            (900.0, [-83.37436362235098, -15.004888173734571, 14.698204846049578, 7.272431591103555]),
            (1200.0, [-113.15554050313582, -32.23216618553076, 12.904699565259108, 1.6204831275616982]),
            (400.0, [-41.48471171806743, 24.857032012148764, 20.640967251683904, 21.69498344180012]),
        ];
        for (T, values) in expected {
            for (r, dG) in Reaction::builtin_reductions().iter().zip(values) {
                assert_relative_eq!(r.delta_G(&ev, T, &gas()).unwrap(), dG, epsilon = 1e-8);
            }
        }
        let r5 = Reaction::wustite_decomposition();
        assert_relative_eq!(r5.delta_G(&ev, 500.0, &gas()).unwrap(), 3.4055786183921555, epsilon = 1e-8);
    }

    #[test]
    fn test_reaction_1_at_reference_temperature() {
        let ev = ShomateEvaluator::default();
        let r1 = Reaction::hematite_to_magnetite();
        let liquid = WaterPhaseRule::Fixed(Phase::Liquid);
        assert_relative_eq!(
            r1.delta_G(&ev, 298.0, &liquid).unwrap(),
            -41.439130517157295,
            epsilon = 1e-8
        );
        // gas H2O starts at 300 K
        assert_eq!(
            r1.delta_G(&ev, 298.0, &gas()).unwrap_err(),
            ThermoError::out_of_range(Species::H2O, 298.0, "gas")
        );
    }

    #[test]
    fn test_ln_K() {
        let ev = ShomateEvaluator::default();
        let r1 = Reaction::hematite_to_magnetite();
        let lnk = r1.ln_K(&ev, 900.0, &gas()).unwrap();
        assert_relative_eq!(lnk, 11.142432259154702, epsilon = 1e-8);
        assert_relative_eq!(ln_K_from_delta_G(-R * 1000.0, 1000.0), 1.0);
        assert_eq!(ln_K_from_delta_G(0.0, 700.0), 0.0);
    }

    #[test]
    fn test_evaluator_error_passes_through() {
        let ev = ShomateEvaluator::default();
        // gas H2O starts at 300 K
        let err = Reaction::wustite_to_iron()
            .delta_G(&ev, 298.5, &gas())
            .unwrap_err();
        let ThermoError::OutOfRange {
            species,
            temperature,
            phase,
        } = err;
        assert_eq!(species, Species::H2O);
        assert_eq!(temperature, 298.5);
        assert_eq!(phase, "gas");
        // liquid water works there
        assert!(
            Reaction::wustite_to_iron()
                .delta_G(&ev, 298.5, &WaterPhaseRule::Fixed(Phase::Liquid))
                .is_ok()
        );
    }

    #[test]
    fn test_display() {
        let r = Reaction::wustite_decomposition();
        assert_eq!(r.to_string(), "(R5) 4FeO(s) => Fe(s) + Fe3O4(s)");
    }
}
