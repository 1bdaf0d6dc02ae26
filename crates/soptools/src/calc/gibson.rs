use colored::Colorize;

use crate::prelude::{println, *};
use soptools_core::calc::{gibson_assembly, GibsonFragment};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct GibsonOptions {
    /// Fragment spec SIZE_BP:CONC_NG_UL[:MOLAR_RATIO], repeatable (at least 2)
    #[arg(long = "fragment", value_name = "SPEC", required = true)]
    pub fragments: Vec<String>,

    /// Desired total reaction volume in uL
    #[arg(long, value_name = "UL")]
    pub total_volume: f64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse a SIZE:CONC[:RATIO] fragment spec.
fn parse_fragment(spec: &str) -> Result<GibsonFragment> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 2 && parts.len() != 3 {
        return Err(eyre!(
            "invalid fragment spec {spec:?}: expected SIZE_BP:CONC_NG_UL[:MOLAR_RATIO]"
        ));
    }

    let size_bp = parts[0]
        .parse::<u32>()
        .map_err(|_| eyre!("invalid fragment size in {spec:?}"))?;
    let concentration_ng_ul = parts[1]
        .parse::<f64>()
        .map_err(|_| eyre!("invalid fragment concentration in {spec:?}"))?;
    let molar_ratio = match parts.get(2) {
        Some(ratio) => ratio
            .parse::<f64>()
            .map_err(|_| eyre!("invalid molar ratio in {spec:?}"))?,
        None => 1.0,
    };

    Ok(GibsonFragment {
        size_bp,
        concentration_ng_ul,
        molar_ratio,
    })
}

pub async fn run(options: GibsonOptions, _global: crate::Global) -> Result<()> {
    let fragments: Vec<GibsonFragment> = options
        .fragments
        .iter()
        .map(|spec| parse_fragment(spec))
        .collect::<Result<_>>()?;

    let mix = gibson_assembly(&fragments, options.total_volume)
        .map_err(|err| eyre!(err.to_string()))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&mix)?);
        return Ok(());
    }

    println!(
        "{} {} | {} {} bp | {} {:.2}x",
        "Total volume:".green(),
        f!("{} uL", mix.total_volume_ul).white().bold(),
        "Total size:".green(),
        mix.total_size_bp,
        "Scale factor:".green(),
        mix.scale_factor
    );
    println!();

    for fragment in &mix.fragments {
        println!(
            "{} {} ({} bp at {} ng/uL)",
            f!("Fragment {}:", fragment.fragment_number).yellow().bold(),
            f!("{:.2} uL", fragment.volume_ul).white().bold(),
            fragment.size_bp,
            fragment.concentration_ng_ul
        );
        println!(
            "    {:.2} ng | {:.3} pmol | ratio {:.1}x",
            fragment.mass_ng, fragment.pmol, fragment.molar_ratio
        );
    }

    println!();
    println!(
        "{} {:.3} pmol | {} {}",
        "Total:".green(),
        mix.total_pmol,
        "Molar ratios:".green(),
        mix.molar_ratios
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fragment_with_ratio() {
        let fragment = parse_fragment("1000:50:3").unwrap();
        assert_eq!(fragment.size_bp, 1000);
        assert_eq!(fragment.concentration_ng_ul, 50.0);
        assert_eq!(fragment.molar_ratio, 3.0);
    }

    #[test]
    fn parse_fragment_default_ratio() {
        let fragment = parse_fragment("2000:87.5").unwrap();
        assert_eq!(fragment.size_bp, 2000);
        assert_eq!(fragment.concentration_ng_ul, 87.5);
        assert_eq!(fragment.molar_ratio, 1.0);
    }

    #[test]
    fn parse_fragment_rejects_malformed_specs() {
        assert!(parse_fragment("1000").is_err());
        assert!(parse_fragment("1000:50:3:9").is_err());
        assert!(parse_fragment("big:50").is_err());
        assert!(parse_fragment("1000:thick").is_err());
        assert!(parse_fragment("1000:50:lots").is_err());
    }
}
