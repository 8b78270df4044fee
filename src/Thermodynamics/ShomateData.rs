//! Shomate coefficients of the six species, NIST Chemistry WebBook.
//!
//! Fe2O3  https://webbook.nist.gov/cgi/cbook.cgi?ID=C1317608&Mask=2
//! Fe3O4  https://webbook.nist.gov/cgi/formula?ID=C1309382&Mask=2
//! FeO    https://webbook.nist.gov/cgi/formula?ID=C1345251&Mask=2
//! Fe     https://webbook.nist.gov/cgi/formula?ID=C7439896&Mask=2#Thermo-Condensed
//! H2O    https://webbook.nist.gov/cgi/cbook.cgi?ID=C7732185&Mask=2
//! H2     https://webbook.nist.gov/cgi/cbook.cgi?ID=C1333740&Mask=2
//!
//! Values are literal copies of the tables, including the ~1e-7..1e-11 B..E coefficients of the
//! high temperature fits; they must not be rounded to zero.
//! The alpha and delta blocks of Fe both span 298-1809 K. Which one is used is decided only by
//! the phase the caller asks for.
use crate::Thermodynamics::Shomate::{PhaseBlock, ShomateCoeffs, ShomateSegment};
use crate::Thermodynamics::Species::{Phase, Species};

const fn seg(
    t_min: f64,
    t_max: f64,
    k: [f64; 7],
    h_ref: Option<f64>,
) -> ShomateSegment {
    ShomateSegment {
        t_min,
        t_max,
        coeffs: ShomateCoeffs {
            a: k[0],
            b: k[1],
            c: k[2],
            d: k[3],
            e: k[4],
            f: k[5],
            g: k[6],
        },
        h_ref,
    }
}

/////////////////////////////////////////Fe2O3/////////////////////////////////////////////////////
const FE2O3_H: Option<f64> = Some(-825.5032);
static FE2O3_SOLID: [ShomateSegment; 3] = [
    seg(
        298.0,
        950.0,
        [93.43834, 108.3577, -50.86447, 25.58683, -1.611330, -863.2094, 161.0719],
        FE2O3_H,
    ),
    seg(
        950.0,
        1050.0,
        [150.6240, 0.0, 0.0, 0.0, 0.0, -875.6066, 252.8814],
        FE2O3_H,
    ),
    seg(
        1050.0,
        2500.0,
        [110.9362, 32.04714, -9.192333, 0.901506, 0.0, -843.1470, 228.9738],
        FE2O3_H,
    ),
];
static FE2O3: [PhaseBlock; 1] = [PhaseBlock {
    phase: Phase::Solid,
    t_min: 298.0,
    t_max: 2500.0,
    segments: &FE2O3_SOLID,
}];

/////////////////////////////////////////Fe3O4/////////////////////////////////////////////////////
const FE3O4_H: Option<f64> = Some(-1120.89);
static FE3O4_SOLID: [ShomateSegment; 2] = [
    seg(
        298.0,
        900.0,
        [104.2096, 178.5108, 10.61510, 1.132534, -0.994202, -1163.336, 212.0585],
        FE3O4_H,
    ),
    seg(
        900.0,
        3000.0,
        [200.8320, 1.586435e-7, -6.661682e-8, 9.452452e-9, 3.186020e-8, -1174.135, 388.0790],
        FE3O4_H,
    ),
];
static FE3O4: [PhaseBlock; 1] = [PhaseBlock {
    phase: Phase::Solid,
    t_min: 298.0,
    t_max: 3000.0,
    segments: &FE3O4_SOLID,
}];

/////////////////////////////////////////FeO///////////////////////////////////////////////////////
static FEO_SOLID: [ShomateSegment; 1] = [seg(
    298.0,
    1650.0,
    [45.75120, 18.78553, -5.952201, 0.852779, -0.081265, -286.7429, 110.3120],
    Some(-272.0441),
)];
static FEO_LIQUID: [ShomateSegment; 1] = [seg(
    1650.0,
    5000.0,
    [68.19920, -4.501232e-10, 1.195227e-10, -1.064302e-11, -3.092680e-10, -281.4326, 137.8377],
    Some(-249.5321),
)];
static FEO: [PhaseBlock; 2] = [
    PhaseBlock {
        phase: Phase::Solid,
        t_min: 298.0,
        t_max: 1650.0,
        segments: &FEO_SOLID,
    },
    PhaseBlock {
        phase: Phase::Liquid,
        t_min: 1650.0,
        t_max: 5000.0,
        segments: &FEO_LIQUID,
    },
];

/////////////////////////////////////////Fe////////////////////////////////////////////////////////
// alpha is a four piece fit; values jump at 700, 1042 and 1100 K
static FE_ALPHA: [ShomateSegment; 4] = [
    seg(
        298.0,
        700.0,
        [18.42868, 24.64301, -8.913720, 9.664706, -0.012643, -6.573022, 42.51488],
        Some(0.0),
    ),
    seg(
        700.0,
        1042.0,
        [-57767.65, 137919.7, -122773.2, 38682.42, 3993.080, 24078.67, -87364.01],
        Some(0.0),
    ),
    seg(
        1042.0,
        1100.0,
        [-325.8859, 28.92876, 0.0, 0.0, 411.9629, 745.8231, 241.8766],
        Some(0.0),
    ),
    seg(
        1100.0,
        1809.0,
        [-776.7387, 919.4005, -383.7184, 57.08148, 242.1369, 697.6234, -558.3674],
        Some(0.0),
    ),
];
static FE_DELTA: [ShomateSegment; 1] = [seg(
    298.0,
    1809.0,
    [23.97449, 8.367750, 0.000277, -0.000086, -0.000005, 0.268027, 62.06336],
    Some(7.788015),
)];
static FE_LIQUID: [ShomateSegment; 1] = [seg(
    1809.0,
    3133.345,
    [46.02400, -1.884667e-8, 6.094750e-9, -6.640301e-10, -8.246121e-9, -10.80543, 72.54094],
    Some(12.39502),
)];
static FE: [PhaseBlock; 3] = [
    PhaseBlock {
        phase: Phase::Alpha,
        t_min: 298.0,
        t_max: 1809.0,
        segments: &FE_ALPHA,
    },
    PhaseBlock {
        phase: Phase::Delta,
        t_min: 298.0,
        t_max: 1809.0,
        segments: &FE_DELTA,
    },
    PhaseBlock {
        phase: Phase::Liquid,
        t_min: 1809.0,
        t_max: 3133.345,
        segments: &FE_LIQUID,
    },
];

/////////////////////////////////////////H2O///////////////////////////////////////////////////////
const H2O_GAS_H: Option<f64> = Some(-241.8264);
static H2O_GAS: [ShomateSegment; 2] = [
    seg(
        300.0,
        1700.0,
        [30.09200, 6.832514, 6.793435, -2.534480, 0.082139, -250.8810, 223.3967],
        H2O_GAS_H,
    ),
    seg(
        1700.0,
        6000.0,
        [41.96426, 8.622053, -1.499780, 0.098119, -11.15764, -272.1797, 219.7809],
        H2O_GAS_H,
    ),
];
static H2O_LIQUID: [ShomateSegment; 1] = [seg(
    298.0,
    500.0,
    [-203.6060, 1523.290, -3196.413, 2474.455, 3.855326, -256.5478, -488.7163],
    Some(-285.8307),
)];
static H2O: [PhaseBlock; 2] = [
    PhaseBlock {
        phase: Phase::Gas,
        t_min: 300.0,
        t_max: 6000.0,
        segments: &H2O_GAS,
    },
    PhaseBlock {
        phase: Phase::Liquid,
        t_min: 298.0,
        t_max: 500.0,
        segments: &H2O_LIQUID,
    },
];

/////////////////////////////////////////H2////////////////////////////////////////////////////////
static H2_GAS: [ShomateSegment; 3] = [
    seg(
        298.0,
        1000.0,
        [33.066178, -11.363417, 11.432816, -2.772874, -0.158558, -9.980797, 172.707974],
        None,
    ),
    seg(
        1000.0,
        2500.0,
        [18.563083, 12.257357, -2.859786, 0.268238, 1.977990, -1.147438, 156.288133],
        None,
    ),
    seg(
        2500.0,
        6000.0,
        [43.413560, -4.293079, 1.272428, -0.096876, -20.533862, -38.515158, 162.081354],
        None,
    ),
];
static H2: [PhaseBlock; 1] = [PhaseBlock {
    phase: Phase::Gas,
    t_min: 298.0,
    t_max: 6000.0,
    segments: &H2_GAS,
}];

/// coefficient blocks of a species, one per supported phase
pub fn blocks_for(species: Species) -> &'static [PhaseBlock] {
    match species {
        Species::Fe2O3 => &FE2O3,
        Species::Fe3O4 => &FE3O4,
        Species::FeO => &FEO,
        Species::Fe => &FE,
        Species::H2O => &H2O,
        Species::H2 => &H2,
    }
}

pub fn supported_phases(species: Species) -> Vec<Phase> {
    blocks_for(species).iter().map(|b| b.phase).collect()
}

/// [T_min, T_max) of a phase, None if the species has no such phase
pub fn valid_range(species: Species, phase: Phase) -> Option<(f64, f64)> {
    blocks_for(species)
        .iter()
        .find(|b| b.phase == phase)
        .map(|b| (b.t_min, b.t_max))
}

/// Checks the table invariants of a block: segments ordered, contiguous, non-overlapping,
/// and covering exactly the block range.
pub fn check_block(block: &PhaseBlock) -> Result<(), String> {
    let first = block
        .segments
        .first()
        .ok_or_else(|| format!("{} block has no segments", block.phase))?;
    let last = block.segments[block.segments.len() - 1];
    if first.t_min != block.t_min || last.t_max != block.t_max {
        return Err(format!(
            "{} segments cover {}-{} K, block declares {}-{} K",
            block.phase, first.t_min, last.t_max, block.t_min, block.t_max
        ));
    }
    for pair in block.segments.windows(2) {
        if pair[0].t_max != pair[1].t_min {
            return Err(format!(
                "{} segments are not contiguous at {} / {} K",
                block.phase, pair[0].t_max, pair[1].t_min
            ));
        }
    }
    if block.segments.iter().any(|s| s.t_min >= s.t_max) {
        return Err(format!("{} block has an empty segment", block.phase));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_blocks_are_consistent() {
        for species in Species::ALL {
            for block in blocks_for(species) {
                assert!(
                    check_block(block).is_ok(),
                    "{}: {:?}",
                    species,
                    check_block(block)
                );
            }
        }
    }

    #[test]
    fn test_one_block_per_phase() {
        for species in Species::ALL {
            let phases = supported_phases(species);
            for (i, p) in phases.iter().enumerate() {
                assert!(!phases[i + 1..].contains(p), "{} has duplicate {}", species, p);
            }
        }
    }

    #[test]
    fn test_segment_counts() {
        let count = |sp: Species, ph: Phase| {
            blocks_for(sp)
                .iter()
                .find(|b| b.phase == ph)
                .map(|b| b.segments.len())
                .unwrap_or(0)
        };
        assert_eq!(count(Species::Fe2O3, Phase::Solid), 3);
        assert_eq!(count(Species::Fe3O4, Phase::Solid), 2);
        assert_eq!(count(Species::FeO, Phase::Solid), 1);
        assert_eq!(count(Species::FeO, Phase::Liquid), 1);
        assert_eq!(count(Species::Fe, Phase::Alpha), 4);
        assert_eq!(count(Species::Fe, Phase::Delta), 1);
        assert_eq!(count(Species::Fe, Phase::Liquid), 1);
        assert_eq!(count(Species::H2O, Phase::Gas), 2);
        assert_eq!(count(Species::H2O, Phase::Liquid), 1);
        assert_eq!(count(Species::H2, Phase::Gas), 3);
        assert_eq!(count(Species::H2, Phase::Liquid), 0);
    }

    #[test]
    fn test_valid_ranges() {
        assert_eq!(valid_range(Species::Fe, Phase::Alpha), Some((298.0, 1809.0)));
        assert_eq!(valid_range(Species::Fe, Phase::Delta), Some((298.0, 1809.0)));
        assert_eq!(valid_range(Species::Fe, Phase::Liquid), Some((1809.0, 3133.345)));
        assert_eq!(valid_range(Species::H2O, Phase::Liquid), Some((298.0, 500.0)));
        assert_eq!(valid_range(Species::H2O, Phase::Gas), Some((300.0, 6000.0)));
        assert_eq!(valid_range(Species::Fe2O3, Phase::Gas), None);
    }

    #[test]
    fn test_tiny_coefficients_are_kept() {
        let high = &blocks_for(Species::Fe3O4)[0].segments[1].coeffs;
        assert_eq!(high.b, 1.586435e-7);
        assert_eq!(high.e, 3.186020e-8);
        let liquid = &blocks_for(Species::FeO)[1].segments[0].coeffs;
        assert_eq!(liquid.d, -1.064302e-11);
    }
}
