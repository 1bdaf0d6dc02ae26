use crate::prelude::{eprintln, *};

mod list;
mod search;
mod section;
mod sections;
pub mod store;
mod text;

pub use store::{
    DocumentRef, SearchResult, SectionOutcome, SectionsOutcome, SopStore, TextDecoder,
};

#[derive(Debug, clap::Parser)]
#[command(name = "sop")]
#[command(about = "SOP document navigation and search")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List available SOP documents
    #[clap(name = "list")]
    List(list::ListOptions),

    /// Show the numbered sections of a document
    #[clap(name = "sections")]
    Sections(sections::SectionsOptions),

    /// Read one section by its dotted number
    #[clap(name = "section")]
    Section(section::SectionOptions),

    /// Search sections across every document
    #[clap(name = "search")]
    Search(search::SearchOptions),

    /// Dump the raw decoded text of a document
    #[clap(name = "text")]
    Text(text::TextOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("SOP directory: {}", global.sops_dir.display());
        eprintln!();
    }

    let store = SopStore::new(global.sops_dir.clone());

    match app.command {
        Commands::List(options) => list::run(options, &store, &global).await,
        Commands::Sections(options) => sections::run(options, &store, &global).await,
        Commands::Section(options) => section::run(options, &store, &global).await,
        Commands::Search(options) => search::run(options, &store, &global).await,
        Commands::Text(options) => text::run(options, &store, &global).await,
    }
}

/// Shorten long section content for list-style output.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_len).collect::<String>())
    }
}
