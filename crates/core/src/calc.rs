//! Closed-form molecular biology calculators.
//!
//! Every function here is a pure transformation from validated numeric or
//! sequence inputs to computed reaction quantities. Failures are
//! [`CalcError`] values; nothing panics on bad input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("invalid primer sequence: {0}")]
    InvalidPrimer(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

// ---------------------------------------------------------------------------
// Primer validation and annealing temperature
// ---------------------------------------------------------------------------

/// Bases accepted in a primer sequence: A, T, C, G plus IUPAC degenerate codes.
const VALID_PRIMER_BASES: &str = "ATCGWSMKRYBDHVN";

/// Optimal primer length window in base pairs; outside it we warn, not fail.
const PRIMER_LENGTH_RANGE: std::ops::RangeInclusive<usize> = 15..=40;

#[derive(Debug, Clone)]
pub struct ValidatedPrimer {
    pub sequence: String,
    pub warning: Option<String>,
}

/// Uppercase and validate a primer sequence.
pub fn validate_primer(primer: &str) -> Result<ValidatedPrimer, CalcError> {
    let sequence = primer.trim().to_uppercase();

    if sequence.is_empty() {
        return Err(CalcError::InvalidPrimer("sequence is empty".to_string()));
    }

    if let Some(bad) = sequence.chars().find(|c| !VALID_PRIMER_BASES.contains(*c)) {
        return Err(CalcError::InvalidPrimer(format!(
            "{sequence}: base '{bad}' not allowed; use A, T, C, G or IUPAC degenerate codes (W, S, M, K, R, Y, B, D, H, V, N)"
        )));
    }

    let warning = if PRIMER_LENGTH_RANGE.contains(&sequence.len()) {
        None
    } else {
        Some(format!(
            "primer length ({} bp) is outside the optimal 15-40 bp range",
            sequence.len()
        ))
    };

    Ok(ValidatedPrimer { sequence, warning })
}

/// Reaction conditions that enter the salt-corrected Tm computation.
#[derive(Debug, Clone, Copy)]
pub struct SaltConditions {
    pub na_mm: f64,
    pub mg_mm: f64,
    pub dntp_mm: f64,
    pub primer_nm: f64,
}

/// Polymerase preset selecting buffer conditions and the annealing offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PcrType {
    OneTaq,
    Q5,
}

impl PcrType {
    fn conditions(self) -> SaltConditions {
        match self {
            PcrType::OneTaq => SaltConditions {
                na_mm: 50.0,
                mg_mm: 1.8,
                dntp_mm: 0.2,
                primer_nm: 200.0,
            },
            PcrType::Q5 => SaltConditions {
                na_mm: 70.0,
                mg_mm: 2.0,
                dntp_mm: 0.2,
                primer_nm: 500.0,
            },
        }
    }

    /// Offset applied to the lower primer Tm to get the annealing temperature.
    fn annealing_offset(self) -> f64 {
        match self {
            PcrType::OneTaq => -3.0,
            PcrType::Q5 => 3.0,
        }
    }
}

const GAS_CONSTANT_CAL: f64 = 1.987;

/// SantaLucia unified nearest-neighbor parameters.
/// Returns (dH kcal/mol, dS cal/(K*mol)) for a 5'->3' dinucleotide step.
fn nn_params(a: char, b: char) -> Option<(f64, f64)> {
    Some(match (a, b) {
        ('A', 'A') | ('T', 'T') => (-7.9, -22.2),
        ('A', 'T') => (-7.2, -20.4),
        ('T', 'A') => (-7.2, -21.3),
        ('C', 'A') | ('T', 'G') => (-8.5, -22.7),
        ('G', 'T') | ('A', 'C') => (-8.4, -22.4),
        ('C', 'T') | ('A', 'G') => (-7.8, -21.0),
        ('G', 'A') | ('T', 'C') => (-8.2, -22.2),
        ('C', 'G') => (-10.6, -27.2),
        ('G', 'C') => (-9.8, -24.4),
        ('G', 'G') | ('C', 'C') => (-8.0, -19.9),
        _ => return None,
    })
}

/// Nearest-neighbor melting temperature in degrees Celsius.
///
/// Unified SantaLucia parameters with duplex initiation terms, an entropy
/// salt correction on the monovalent-equivalent cation concentration
/// (Na+ plus 120 * sqrt(Mg2+ - dNTPs), all in mM), and the usual CT/4 term
/// for non-self-complementary duplexes. Degenerate bases are rejected.
pub fn melting_temperature(
    sequence: &str,
    conditions: &SaltConditions,
) -> Result<f64, CalcError> {
    let bases: Vec<char> = sequence.trim().to_uppercase().chars().collect();

    if bases.len() < 2 {
        return Err(CalcError::InvalidInput(format!(
            "sequence too short for a nearest-neighbor Tm ({} bp)",
            bases.len()
        )));
    }
    if conditions.primer_nm <= 0.0 {
        return Err(CalcError::InvalidInput(
            "primer concentration must be positive".to_string(),
        ));
    }

    let mut delta_h = 0.0;
    let mut delta_s = 0.0;

    // Duplex initiation terms for the two terminal base pairs.
    for terminal in [bases[0], bases[bases.len() - 1]] {
        match terminal {
            'G' | 'C' => {
                delta_h += 0.1;
                delta_s += -2.8;
            }
            'A' | 'T' => {
                delta_h += 2.3;
                delta_s += 4.1;
            }
            other => {
                return Err(CalcError::InvalidInput(format!(
                    "cannot compute Tm for base '{other}': only A, T, C, G are supported"
                )))
            }
        }
    }

    for pair in bases.windows(2) {
        let (dh, ds) = nn_params(pair[0], pair[1]).ok_or_else(|| {
            CalcError::InvalidInput(format!(
                "cannot compute Tm for step '{}{}': only A, T, C, G are supported",
                pair[0], pair[1]
            ))
        })?;
        delta_h += dh;
        delta_s += ds;
    }

    let monovalent_mm =
        conditions.na_mm + 120.0 * (conditions.mg_mm - conditions.dntp_mm).max(0.0).sqrt();
    delta_s += 0.368 * (bases.len() - 1) as f64 * (monovalent_mm / 1000.0).ln();

    let primer_molar = conditions.primer_nm * 1e-9;
    let tm_kelvin = delta_h * 1000.0 / (delta_s + GAS_CONSTANT_CAL * (primer_molar / 4.0).ln());

    Ok(tm_kelvin - 273.15)
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnealingTemp {
    pub annealing_temp: f64,
    pub tm_forward: f64,
    pub tm_reverse: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Annealing temperature for a primer pair under a polymerase preset.
pub fn annealing_temp(
    forward: &str,
    reverse: &str,
    pcr_type: PcrType,
) -> Result<AnnealingTemp, CalcError> {
    let forward = validate_primer(forward)?;
    let reverse = validate_primer(reverse)?;

    let conditions = pcr_type.conditions();
    let tm_forward = melting_temperature(&forward.sequence, &conditions)?;
    let tm_reverse = melting_temperature(&reverse.sequence, &conditions)?;

    let annealing = tm_forward.min(tm_reverse) + pcr_type.annealing_offset();

    let tm_difference = (tm_forward - tm_reverse).abs();
    let warning = if tm_difference > 5.0 {
        Some(format!(
            "Tm difference ({tm_difference:.1} C) is more than 5 C; consider redesigning the primers"
        ))
    } else {
        forward.warning.or(reverse.warning)
    };

    Ok(AnnealingTemp {
        annealing_temp: round1(annealing),
        tm_forward: round1(tm_forward),
        tm_reverse: round1(tm_reverse),
        warning,
    })
}

// ---------------------------------------------------------------------------
// Gibson assembly
// ---------------------------------------------------------------------------

/// Base amount of the lowest-ratio fragment, in picomoles.
const GIBSON_BASE_PMOL: f64 = 0.1;

/// Average molecular weight of one double-stranded base pair, g/mol.
const DNA_MW_PER_BP: f64 = 660.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GibsonFragment {
    pub size_bp: u32,
    pub concentration_ng_ul: f64,
    #[serde(default = "default_molar_ratio")]
    pub molar_ratio: f64,
}

fn default_molar_ratio() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize)]
pub struct GibsonFragmentMix {
    pub fragment_number: usize,
    pub size_bp: u32,
    pub concentration_ng_ul: f64,
    pub volume_ul: f64,
    pub mass_ng: f64,
    pub pmol: f64,
    pub molar_ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GibsonMix {
    pub fragments: Vec<GibsonFragmentMix>,
    pub total_volume_ul: f64,
    pub total_size_bp: u64,
    pub total_pmol: f64,
    pub scale_factor: f64,
    pub molar_ratios: String,
}

/// Fragment volumes for a Gibson assembly with adjustable molar ratios.
///
/// The lowest-ratio fragment is pinned at 0.1 pmol, every other fragment is
/// scaled by its ratio, and the whole mix is then scaled to the requested
/// reaction volume.
pub fn gibson_assembly(
    fragments: &[GibsonFragment],
    total_volume_ul: f64,
) -> Result<GibsonMix, CalcError> {
    if fragments.len() < 2 {
        return Err(CalcError::InvalidInput(
            "Gibson assembly needs at least 2 fragments".to_string(),
        ));
    }
    if total_volume_ul <= 0.0 {
        return Err(CalcError::InvalidInput(
            "total volume must be positive".to_string(),
        ));
    }
    for (i, fragment) in fragments.iter().enumerate() {
        let n = i + 1;
        if fragment.size_bp == 0 {
            return Err(CalcError::InvalidInput(format!(
                "fragment {n} size must be positive"
            )));
        }
        if fragment.concentration_ng_ul <= 0.0 {
            return Err(CalcError::InvalidInput(format!(
                "fragment {n} concentration must be positive"
            )));
        }
        if fragment.molar_ratio <= 0.0 {
            return Err(CalcError::InvalidInput(format!(
                "fragment {n} molar ratio must be positive"
            )));
        }
    }

    let min_ratio = fragments
        .iter()
        .map(|f| f.molar_ratio)
        .fold(f64::INFINITY, f64::min);

    let pmols: Vec<f64> = fragments
        .iter()
        .map(|f| GIBSON_BASE_PMOL * f.molar_ratio / min_ratio)
        .collect();
    let masses_ng: Vec<f64> = fragments
        .iter()
        .zip(&pmols)
        .map(|(f, pmol)| pmol * f.size_bp as f64 * 650.0 / 1000.0)
        .collect();
    let volumes_ul: Vec<f64> = fragments
        .iter()
        .zip(&masses_ng)
        .map(|(f, mass)| mass / f.concentration_ng_ul)
        .collect();

    let unscaled_volume: f64 = volumes_ul.iter().sum();
    let scale_factor = total_volume_ul / unscaled_volume;

    let mut total_pmol = 0.0;
    let mixed: Vec<GibsonFragmentMix> = fragments
        .iter()
        .enumerate()
        .map(|(i, fragment)| {
            let pmol = pmols[i] * scale_factor;
            total_pmol += pmol;
            GibsonFragmentMix {
                fragment_number: i + 1,
                size_bp: fragment.size_bp,
                concentration_ng_ul: fragment.concentration_ng_ul,
                volume_ul: round2(volumes_ul[i] * scale_factor),
                mass_ng: round2(masses_ng[i] * scale_factor),
                pmol: round3(pmol),
                molar_ratio: fragment.molar_ratio,
            }
        })
        .collect();

    Ok(GibsonMix {
        fragments: mixed,
        total_volume_ul,
        total_size_bp: fragments.iter().map(|f| f.size_bp as u64).sum(),
        total_pmol: round3(total_pmol),
        scale_factor: round2(scale_factor),
        molar_ratios: fragments
            .iter()
            .map(|f| format!("{:.1}", f.molar_ratio))
            .collect::<Vec<_>>()
            .join(":"),
    })
}

// ---------------------------------------------------------------------------
// Restriction digest
// ---------------------------------------------------------------------------

/// Reference reaction: 1 ug DNA in 50 uL with 1 uL of enzyme.
const DIGEST_REFERENCE_MASS_UG: f64 = 1.0;
const DIGEST_REFERENCE_VOLUME_UL: f64 = 50.0;
const DIGEST_REFERENCE_ENZYME_UL: f64 = 1.0;

#[derive(Debug, Clone, Serialize)]
pub struct DigestMix {
    pub dna_mass_ng: f64,
    pub dna_volume_ul: f64,
    pub buffer_volume_ul: f64,
    pub enzyme_volume_ul: f64,
    pub water_volume_ul: f64,
    pub total_volume_ul: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Reagent volumes for a restriction digest, total volume scaled by DNA mass.
///
/// Buffer is 10% of the total; enzyme scales with mass but is capped at 10%
/// of the total so glycerol stays below inhibitory levels.
pub fn restriction_digest(dna_mass_ng: f64, dna_conc_ng_ul: f64) -> Result<DigestMix, CalcError> {
    if dna_mass_ng <= 0.0 {
        return Err(CalcError::InvalidInput("DNA mass must be positive".to_string()));
    }
    if dna_conc_ng_ul <= 0.0 {
        return Err(CalcError::InvalidInput(
            "DNA concentration must be positive".to_string(),
        ));
    }

    let scale_factor = (dna_mass_ng / 1000.0) / DIGEST_REFERENCE_MASS_UG;
    let total_volume_ul = DIGEST_REFERENCE_VOLUME_UL * scale_factor;
    let dna_volume_ul = dna_mass_ng / dna_conc_ng_ul;

    if dna_volume_ul >= total_volume_ul {
        return Err(CalcError::InvalidInput(
            "DNA volume exceeds the calculated total volume; increase DNA concentration"
                .to_string(),
        ));
    }

    let buffer_volume_ul = total_volume_ul * 0.1;
    let enzyme_volume_ul =
        (DIGEST_REFERENCE_ENZYME_UL * scale_factor).min(total_volume_ul * 0.1);
    let water_volume_ul = total_volume_ul - (dna_volume_ul + buffer_volume_ul + enzyme_volume_ul);

    if water_volume_ul < 0.0 {
        return Err(CalcError::InvalidInput(
            "calculated water volume is negative; increase DNA concentration".to_string(),
        ));
    }

    let warning = (dna_mass_ng < 100.0)
        .then(|| "DNA mass under 100 ng may yield suboptimal results".to_string());

    Ok(DigestMix {
        dna_mass_ng: round2(dna_mass_ng),
        dna_volume_ul: round2(dna_volume_ul),
        buffer_volume_ul: round2(buffer_volume_ul),
        enzyme_volume_ul: round2(enzyme_volume_ul),
        water_volume_ul: round2(water_volume_ul),
        total_volume_ul: round2(total_volume_ul),
        warning,
    })
}

// ---------------------------------------------------------------------------
// Ligation insert:vector ratio
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LigationMix {
    pub vector_mass_ng: f64,
    pub vector_volume_ul: f64,
    pub insert_mass_ng: f64,
    pub insert_volume_ul: f64,
    pub ratio: f64,
}

/// Insert and vector amounts for a ligation at the requested molar ratio.
pub fn insert_vector_ratio(
    vector_size_bp: u32,
    insert_size_bp: u32,
    vector_conc_ng_ul: f64,
    insert_conc_ng_ul: f64,
    ratio: f64,
    vector_mass_ng: f64,
) -> Result<LigationMix, CalcError> {
    if vector_size_bp == 0 {
        return Err(CalcError::InvalidInput("vector size must be positive".to_string()));
    }
    if insert_size_bp == 0 {
        return Err(CalcError::InvalidInput("insert size must be positive".to_string()));
    }
    if vector_conc_ng_ul <= 0.0 {
        return Err(CalcError::InvalidInput(
            "vector concentration must be positive".to_string(),
        ));
    }
    if insert_conc_ng_ul <= 0.0 {
        return Err(CalcError::InvalidInput(
            "insert concentration must be positive".to_string(),
        ));
    }
    if ratio <= 0.0 {
        return Err(CalcError::InvalidInput("ratio must be positive".to_string()));
    }
    if vector_mass_ng <= 0.0 {
        return Err(CalcError::InvalidInput("vector mass must be positive".to_string()));
    }

    let vector_mass_g = vector_mass_ng * 1e-9;
    let vector_moles = vector_mass_g / (vector_size_bp as f64 * DNA_MW_PER_BP);
    let insert_moles = vector_moles * ratio;
    let insert_mass_ng = insert_moles * (insert_size_bp as f64 * DNA_MW_PER_BP) * 1e9;

    Ok(LigationMix {
        vector_mass_ng: round2(vector_mass_ng),
        vector_volume_ul: round2(vector_mass_ng / vector_conc_ng_ul),
        insert_mass_ng: round2(insert_mass_ng),
        insert_volume_ul: round2(insert_mass_ng / insert_conc_ng_ul),
        ratio,
    })
}

// ---------------------------------------------------------------------------
// Oligo annealing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct OligoAnnealingMix {
    pub oligo1_volume_ul: f64,
    pub oligo2_volume_ul: f64,
    pub water_volume_ul: f64,
    pub final_volume_ul: f64,
    pub final_concentration_um: f64,
}

/// Volumes for an oligo annealing reaction (C1V1 = C2V2 per oligo).
pub fn oligo_annealing(
    oligo1_conc_um: f64,
    oligo2_conc_um: f64,
    desired_conc_um: f64,
    final_volume_ul: f64,
) -> Result<OligoAnnealingMix, CalcError> {
    if oligo1_conc_um <= 0.0 || oligo2_conc_um <= 0.0 {
        return Err(CalcError::InvalidInput(
            "oligo stock concentrations must be positive".to_string(),
        ));
    }
    if desired_conc_um <= 0.0 {
        return Err(CalcError::InvalidInput(
            "desired concentration must be positive".to_string(),
        ));
    }
    if final_volume_ul <= 0.0 {
        return Err(CalcError::InvalidInput(
            "final volume must be positive".to_string(),
        ));
    }

    let oligo1_volume_ul = desired_conc_um * final_volume_ul / oligo1_conc_um;
    let oligo2_volume_ul = desired_conc_um * final_volume_ul / oligo2_conc_um;
    let water_volume_ul = final_volume_ul - oligo1_volume_ul - oligo2_volume_ul;

    if water_volume_ul < 0.0 {
        return Err(CalcError::InvalidInput(
            "calculated water volume is negative; check concentrations".to_string(),
        ));
    }

    Ok(OligoAnnealingMix {
        oligo1_volume_ul: round2(oligo1_volume_ul),
        oligo2_volume_ul: round2(oligo2_volume_ul),
        water_volume_ul: round2(water_volume_ul),
        final_volume_ul,
        final_concentration_um: desired_conc_um,
    })
}

// ---------------------------------------------------------------------------
// Rounding helpers
// ---------------------------------------------------------------------------

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- validate_primer ----------------------------------------------------

    #[test]
    fn validate_primer_uppercases() {
        let primer = validate_primer("atgcatgcatgcatgc").unwrap();
        assert_eq!(primer.sequence, "ATGCATGCATGCATGC");
        assert!(primer.warning.is_none());
    }

    #[test]
    fn validate_primer_accepts_degenerate_bases() {
        let primer = validate_primer("ATGCNRYWSATGCATG").unwrap();
        assert_eq!(primer.sequence.len(), 16);
    }

    #[test]
    fn validate_primer_rejects_bad_characters() {
        assert!(validate_primer("ATGXATGCATGCATGC").is_err());
        assert!(validate_primer("").is_err());
    }

    #[test]
    fn validate_primer_warns_on_length() {
        let short = validate_primer("ATGCATGC").unwrap();
        assert!(short.warning.is_some());
        let long = validate_primer(&"AT".repeat(25)).unwrap();
        assert!(long.warning.is_some());
    }

    // -- melting_temperature ------------------------------------------------

    const ONETAQ: SaltConditions = SaltConditions {
        na_mm: 50.0,
        mg_mm: 1.8,
        dntp_mm: 0.2,
        primer_nm: 200.0,
    };

    #[test]
    fn tm_gc_rich_is_hotter_than_at_rich() {
        let gc = melting_temperature("GCGCGCGCGCGCGCGCGC", &ONETAQ).unwrap();
        let at = melting_temperature("ATATATATATATATATAT", &ONETAQ).unwrap();
        assert!(gc > at + 20.0, "gc={gc} at={at}");
    }

    #[test]
    fn tm_typical_primer_in_plausible_range() {
        let tm = melting_temperature("AGCGGATAACAATTTCACACAGGA", &ONETAQ).unwrap();
        assert!((45.0..75.0).contains(&tm), "tm={tm}");
    }

    #[test]
    fn tm_longer_primer_is_hotter() {
        let short = melting_temperature("ATGCATGCATGCATGC", &ONETAQ).unwrap();
        let long = melting_temperature("ATGCATGCATGCATGCATGCATGC", &ONETAQ).unwrap();
        assert!(long > short);
    }

    #[test]
    fn tm_rejects_degenerate_bases() {
        assert!(melting_temperature("ATGNATGCATGCATGC", &ONETAQ).is_err());
    }

    #[test]
    fn tm_rejects_too_short() {
        assert!(melting_temperature("A", &ONETAQ).is_err());
    }

    // -- annealing_temp -----------------------------------------------------

    #[test]
    fn annealing_onetaq_is_three_below_lower_tm() {
        let result =
            annealing_temp("ATGCATGCATGCATGCATGC", "GCATGCATGCATGCATGCAT", PcrType::OneTaq)
                .unwrap();
        let lower = result.tm_forward.min(result.tm_reverse);
        assert!((result.annealing_temp - (lower - 3.0)).abs() < 0.11);
    }

    #[test]
    fn annealing_q5_is_three_above_lower_tm() {
        let result =
            annealing_temp("ATGCATGCATGCATGCATGC", "GCATGCATGCATGCATGCAT", PcrType::Q5).unwrap();
        let lower = result.tm_forward.min(result.tm_reverse);
        assert!((result.annealing_temp - (lower + 3.0)).abs() < 0.11);
    }

    #[test]
    fn annealing_warns_on_large_tm_difference() {
        let result = annealing_temp(
            "GCGCGCGCGCGCGCGCGCGC",
            "ATATATATATATATATATAT",
            PcrType::OneTaq,
        )
        .unwrap();
        assert!(result.warning.is_some());
    }

    #[test]
    fn annealing_no_warning_for_matched_pair() {
        let result =
            annealing_temp("ATGCATGCATGCATGCATGC", "ATGCATGCATGCATGCATGC", PcrType::OneTaq)
                .unwrap();
        assert!(result.warning.is_none());
    }

    #[test]
    fn annealing_rejects_invalid_primer() {
        assert!(annealing_temp("NOTDNA!", "ATGCATGCATGCATGC", PcrType::OneTaq).is_err());
    }

    // -- gibson_assembly ----------------------------------------------------

    fn fragment(size_bp: u32, conc: f64, ratio: f64) -> GibsonFragment {
        GibsonFragment {
            size_bp,
            concentration_ng_ul: conc,
            molar_ratio: ratio,
        }
    }

    #[test]
    fn gibson_equal_ratio_two_fragments() {
        let mix = gibson_assembly(
            &[fragment(1000, 50.0, 1.0), fragment(2000, 100.0, 1.0)],
            10.0,
        )
        .unwrap();

        // Unscaled: 0.1 pmol each -> 65 ng / 1.3 uL and 130 ng / 1.3 uL,
        // so both fragments scale to 5 uL of the 10 uL reaction.
        assert_eq!(mix.fragments[0].volume_ul, 5.0);
        assert_eq!(mix.fragments[1].volume_ul, 5.0);
        assert_eq!(mix.fragments[0].mass_ng, 250.0);
        assert_eq!(mix.fragments[1].mass_ng, 500.0);
        assert_eq!(mix.total_size_bp, 3000);
        assert_eq!(mix.scale_factor, 3.85);
        assert_eq!(mix.molar_ratios, "1.0:1.0");
        assert!((mix.total_pmol - 0.769).abs() < 0.001);
    }

    #[test]
    fn gibson_ratio_scales_pmol() {
        let mix = gibson_assembly(
            &[fragment(1000, 50.0, 3.0), fragment(5000, 100.0, 1.0)],
            20.0,
        )
        .unwrap();
        let insert = &mix.fragments[0];
        let backbone = &mix.fragments[1];
        assert!((insert.pmol / backbone.pmol - 3.0).abs() < 0.01);
        assert_eq!(mix.molar_ratios, "3.0:1.0");
    }

    #[test]
    fn gibson_volumes_sum_to_total() {
        let mix = gibson_assembly(
            &[
                fragment(800, 35.0, 1.0),
                fragment(1500, 80.0, 2.0),
                fragment(4200, 120.0, 1.0),
            ],
            15.0,
        )
        .unwrap();
        let sum: f64 = mix.fragments.iter().map(|f| f.volume_ul).sum();
        assert!((sum - 15.0).abs() < 0.05);
    }

    #[test]
    fn gibson_rejects_single_fragment() {
        assert!(gibson_assembly(&[fragment(1000, 50.0, 1.0)], 10.0).is_err());
    }

    #[test]
    fn gibson_rejects_nonpositive_inputs() {
        assert!(
            gibson_assembly(&[fragment(0, 50.0, 1.0), fragment(1000, 50.0, 1.0)], 10.0).is_err()
        );
        assert!(
            gibson_assembly(&[fragment(1000, 0.0, 1.0), fragment(1000, 50.0, 1.0)], 10.0)
                .is_err()
        );
        assert!(
            gibson_assembly(&[fragment(1000, 50.0, 0.0), fragment(1000, 50.0, 1.0)], 10.0)
                .is_err()
        );
        assert!(
            gibson_assembly(&[fragment(1000, 50.0, 1.0), fragment(1000, 50.0, 1.0)], 0.0)
                .is_err()
        );
    }

    // -- restriction_digest -------------------------------------------------

    #[test]
    fn digest_reference_reaction() {
        let mix = restriction_digest(1000.0, 100.0).unwrap();
        assert_eq!(mix.total_volume_ul, 50.0);
        assert_eq!(mix.dna_volume_ul, 10.0);
        assert_eq!(mix.buffer_volume_ul, 5.0);
        assert_eq!(mix.enzyme_volume_ul, 1.0);
        assert_eq!(mix.water_volume_ul, 34.0);
        assert!(mix.warning.is_none());
    }

    #[test]
    fn digest_scales_down_and_caps_enzyme() {
        let mix = restriction_digest(50.0, 100.0).unwrap();
        assert_eq!(mix.total_volume_ul, 2.5);
        assert_eq!(mix.dna_volume_ul, 0.5);
        assert_eq!(mix.buffer_volume_ul, 0.25);
        // Scaled enzyme (0.05 uL) stays under the 10% cap (0.25 uL).
        assert_eq!(mix.enzyme_volume_ul, 0.05);
        assert_eq!(mix.water_volume_ul, 1.7);
        assert!(mix.warning.is_some());
    }

    #[test]
    fn digest_rejects_dilute_dna() {
        // 1000 ng at 10 ng/uL needs 100 uL of DNA in a 50 uL reaction.
        assert!(restriction_digest(1000.0, 10.0).is_err());
    }

    #[test]
    fn digest_rejects_nonpositive_inputs() {
        assert!(restriction_digest(0.0, 100.0).is_err());
        assert!(restriction_digest(1000.0, 0.0).is_err());
    }

    // -- insert_vector_ratio ------------------------------------------------

    #[test]
    fn ligation_three_to_one_ratio() {
        let mix = insert_vector_ratio(3000, 1000, 50.0, 25.0, 3.0, 100.0).unwrap();
        // Insert mass = 100 ng * 3 * (1000*660)/(3000*660) = 100 ng.
        assert_eq!(mix.insert_mass_ng, 100.0);
        assert_eq!(mix.insert_volume_ul, 4.0);
        assert_eq!(mix.vector_volume_ul, 2.0);
        assert_eq!(mix.ratio, 3.0);
    }

    #[test]
    fn ligation_equimolar_same_size() {
        let mix = insert_vector_ratio(2000, 2000, 50.0, 50.0, 1.0, 60.0).unwrap();
        assert_eq!(mix.insert_mass_ng, 60.0);
        assert_eq!(mix.insert_volume_ul, mix.vector_volume_ul);
    }

    #[test]
    fn ligation_rejects_nonpositive_inputs() {
        assert!(insert_vector_ratio(0, 1000, 50.0, 25.0, 3.0, 100.0).is_err());
        assert!(insert_vector_ratio(3000, 0, 50.0, 25.0, 3.0, 100.0).is_err());
        assert!(insert_vector_ratio(3000, 1000, 0.0, 25.0, 3.0, 100.0).is_err());
        assert!(insert_vector_ratio(3000, 1000, 50.0, 0.0, 3.0, 100.0).is_err());
        assert!(insert_vector_ratio(3000, 1000, 50.0, 25.0, 0.0, 100.0).is_err());
        assert!(insert_vector_ratio(3000, 1000, 50.0, 25.0, 3.0, 0.0).is_err());
    }

    // -- oligo_annealing ----------------------------------------------------

    #[test]
    fn oligo_annealing_basic() {
        let mix = oligo_annealing(100.0, 100.0, 10.0, 50.0).unwrap();
        assert_eq!(mix.oligo1_volume_ul, 5.0);
        assert_eq!(mix.oligo2_volume_ul, 5.0);
        assert_eq!(mix.water_volume_ul, 40.0);
        assert_eq!(mix.final_volume_ul, 50.0);
    }

    #[test]
    fn oligo_annealing_uneven_stocks() {
        let mix = oligo_annealing(100.0, 50.0, 10.0, 50.0).unwrap();
        assert_eq!(mix.oligo1_volume_ul, 5.0);
        assert_eq!(mix.oligo2_volume_ul, 10.0);
        assert_eq!(mix.water_volume_ul, 35.0);
    }

    #[test]
    fn oligo_annealing_rejects_negative_water() {
        // Stocks too dilute to reach the requested concentration.
        assert!(oligo_annealing(15.0, 15.0, 10.0, 50.0).is_err());
    }

    #[test]
    fn oligo_annealing_rejects_nonpositive_inputs() {
        assert!(oligo_annealing(0.0, 100.0, 10.0, 50.0).is_err());
        assert!(oligo_annealing(100.0, 0.0, 10.0, 50.0).is_err());
        assert!(oligo_annealing(100.0, 100.0, 0.0, 50.0).is_err());
        assert!(oligo_annealing(100.0, 100.0, 10.0, 0.0).is_err());
    }
}
