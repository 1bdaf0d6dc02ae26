use colored::Colorize;

use crate::prelude::{println, *};
use soptools_core::calc::restriction_digest;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct DigestOptions {
    /// DNA mass in ng
    #[arg(long, value_name = "NG")]
    pub dna_mass: f64,

    /// DNA concentration in ng/uL
    #[arg(long, value_name = "NG_UL")]
    pub dna_conc: f64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: DigestOptions, _global: crate::Global) -> Result<()> {
    let mix = restriction_digest(options.dna_mass, options.dna_conc)
        .map_err(|err| eyre!(err.to_string()))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&mix)?);
        return Ok(());
    }

    println!(
        "{}",
        f!("Digest setup for {:.2} ng DNA", mix.dna_mass_ng)
            .white()
            .bold()
    );
    println!("{} {:.2} uL", "DNA:".green(), mix.dna_volume_ul);
    println!("{} {:.2} uL", "10X buffer:".green(), mix.buffer_volume_ul);
    println!("{} {:.2} uL", "Enzyme:".green(), mix.enzyme_volume_ul);
    println!("{} {:.2} uL", "Water:".green(), mix.water_volume_ul);
    println!(
        "{} {}",
        "Total:".green(),
        f!("{:.2} uL", mix.total_volume_ul).white().bold()
    );
    if let Some(warning) = &mix.warning {
        println!("{} {}", "Warning:".yellow().bold(), warning.yellow());
    }

    Ok(())
}
