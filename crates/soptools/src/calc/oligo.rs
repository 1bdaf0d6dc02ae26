use colored::Colorize;

use crate::prelude::{println, *};
use soptools_core::calc::oligo_annealing;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct OligoOptions {
    /// Oligo 1 stock concentration in uM
    #[arg(long, value_name = "UM")]
    pub oligo1_conc: f64,

    /// Oligo 2 stock concentration in uM
    #[arg(long, value_name = "UM")]
    pub oligo2_conc: f64,

    /// Desired final annealed concentration in uM
    #[arg(long, value_name = "UM")]
    pub desired_conc: f64,

    /// Final reaction volume in uL
    #[arg(long, value_name = "UL")]
    pub final_volume: f64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: OligoOptions, _global: crate::Global) -> Result<()> {
    let mix = oligo_annealing(
        options.oligo1_conc,
        options.oligo2_conc,
        options.desired_conc,
        options.final_volume,
    )
    .map_err(|err| eyre!(err.to_string()))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&mix)?);
        return Ok(());
    }

    println!(
        "{}",
        f!(
            "Oligo annealing at {} uM in {} uL",
            mix.final_concentration_um, mix.final_volume_ul
        )
        .white()
        .bold()
    );
    println!("{} {:.2} uL", "Oligo 1:".green(), mix.oligo1_volume_ul);
    println!("{} {:.2} uL", "Oligo 2:".green(), mix.oligo2_volume_ul);
    println!("{} {:.2} uL", "Water:".green(), mix.water_volume_ul);

    Ok(())
}
