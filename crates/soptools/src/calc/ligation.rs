use colored::Colorize;

use crate::prelude::{println, *};
use soptools_core::calc::insert_vector_ratio;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct LigationOptions {
    /// Vector size in bp
    #[arg(long, value_name = "BP")]
    pub vector_size: u32,

    /// Insert size in bp
    #[arg(long, value_name = "BP")]
    pub insert_size: u32,

    /// Vector concentration in ng/uL
    #[arg(long, value_name = "NG_UL")]
    pub vector_conc: f64,

    /// Insert concentration in ng/uL
    #[arg(long, value_name = "NG_UL")]
    pub insert_conc: f64,

    /// Insert:vector molar ratio (e.g. 3 for 3:1)
    #[arg(long, default_value = "3.0")]
    pub ratio: f64,

    /// Vector mass for the ligation in ng
    #[arg(long, value_name = "NG")]
    pub vector_mass: f64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: LigationOptions, _global: crate::Global) -> Result<()> {
    let mix = insert_vector_ratio(
        options.vector_size,
        options.insert_size,
        options.vector_conc,
        options.insert_conc,
        options.ratio,
        options.vector_mass,
    )
    .map_err(|err| eyre!(err.to_string()))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&mix)?);
        return Ok(());
    }

    println!(
        "{}",
        f!("Ligation at {:.1}:1 insert:vector", mix.ratio)
            .white()
            .bold()
    );
    println!(
        "{} {:.2} ng ({:.2} uL at {} ng/uL)",
        "Vector:".green(),
        mix.vector_mass_ng,
        mix.vector_volume_ul,
        options.vector_conc
    );
    println!(
        "{} {:.2} ng ({:.2} uL at {} ng/uL)",
        "Insert:".green(),
        mix.insert_mass_ng,
        mix.insert_volume_ul,
        options.insert_conc
    );

    Ok(())
}
