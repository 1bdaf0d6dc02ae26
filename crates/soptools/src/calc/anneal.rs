use colored::Colorize;

use crate::prelude::{println, *};
use soptools_core::calc::{annealing_temp, PcrType};

#[derive(Debug, Clone, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
pub enum Polymerase {
    /// OneTaq: anneal 3 C below the lower primer Tm
    #[value(name = "onetaq")]
    OneTaq,
    /// Q5: anneal 3 C above the lower primer Tm
    #[value(name = "q5")]
    Q5,
}

impl From<Polymerase> for PcrType {
    fn from(polymerase: Polymerase) -> Self {
        match polymerase {
            Polymerase::OneTaq => PcrType::OneTaq,
            Polymerase::Q5 => PcrType::Q5,
        }
    }
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct AnnealOptions {
    /// Forward primer sequence
    pub forward: String,

    /// Reverse primer sequence
    pub reverse: String,

    /// Polymerase preset
    #[arg(long, default_value = "onetaq")]
    pub polymerase: Polymerase,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: AnnealOptions, _global: crate::Global) -> Result<()> {
    let result = annealing_temp(
        &options.forward,
        &options.reverse,
        options.polymerase.clone().into(),
    )
    .map_err(|err| eyre!(err.to_string()))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Annealing temperature:".green(),
        f!("{:.1} C", result.annealing_temp).white().bold()
    );
    println!(
        "{} {:.1} C | {} {:.1} C",
        "Forward Tm:".green(),
        result.tm_forward,
        "Reverse Tm:".green(),
        result.tm_reverse
    );
    if let Some(warning) = &result.warning {
        println!("{} {}", "Warning:".yellow().bold(), warning.yellow());
    }

    Ok(())
}
