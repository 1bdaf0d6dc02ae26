#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod calc;
mod error;
mod mcp;
mod prelude;
mod sop;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Navigate numbered sections of lab SOP documents and run cloning calculators"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Directory containing the SOP PDF documents
    #[clap(
        long,
        env = "SOPTOOLS_SOPS_DIR",
        global = true,
        default_value = "./sops"
    )]
    sops_dir: std::path::PathBuf,

    /// Whether to display additional information.
    #[clap(long, env = "SOPTOOLS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// SOP document navigation and search
    Sop(crate::sop::App),

    /// Cloning calculators (PCR, Gibson, digest, ligation, oligo)
    Calc(crate::calc::App),

    /// Model Context Protocol server
    Mcp(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Sop(sub_app) => crate::sop::run(sub_app, app.global).await,
        SubCommands::Calc(sub_app) => crate::calc::run(sub_app, app.global).await,
        SubCommands::Mcp(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
