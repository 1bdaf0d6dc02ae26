use crate::prelude::*;

mod anneal;
mod digest;
mod gibson;
mod ligation;
mod oligo;

#[derive(Debug, clap::Parser)]
#[command(name = "calc")]
#[command(about = "Cloning calculators")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// PCR annealing temperature for a primer pair
    #[clap(name = "annealing-temp")]
    AnnealingTemp(anneal::AnnealOptions),

    /// Gibson assembly fragment volumes
    #[clap(name = "gibson")]
    Gibson(gibson::GibsonOptions),

    /// Restriction digest reagent volumes
    #[clap(name = "digest")]
    Digest(digest::DigestOptions),

    /// Ligation insert:vector amounts at a molar ratio
    #[clap(name = "ligation")]
    Ligation(ligation::LigationOptions),

    /// Oligo annealing reaction volumes
    #[clap(name = "oligo")]
    Oligo(oligo::OligoOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::AnnealingTemp(options) => anneal::run(options, global).await,
        Commands::Gibson(options) => gibson::run(options, global).await,
        Commands::Digest(options) => digest::run(options, global).await,
        Commands::Ligation(options) => ligation::run(options, global).await,
        Commands::Oligo(options) => oligo::run(options, global).await,
    }
}
