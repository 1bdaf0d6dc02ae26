use colored::Colorize;

use crate::prelude::{eprintln, println, *};

use super::store::SopStore;
use super::truncate_text;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SearchOptions {
    /// Search term, matched case-insensitively against titles and content
    pub query: String,

    /// Characters of content to preview per match
    #[arg(long, default_value = "200")]
    pub preview: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: SearchOptions, store: &SopStore, global: &crate::Global) -> Result<()> {
    let results = store.search(&options.query).await;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if global.verbose {
        eprintln!("{} match(es) for {:?}", results.len(), options.query);
    }

    if results.is_empty() {
        println!("{}", "No matching sections.".yellow());
        return Ok(());
    }

    for result in &results {
        println!(
            "{} {}",
            f!("[{}]", result.document_id).yellow().bold(),
            result.section.full_heading.white().bold()
        );
        if !result.section.content.is_empty() {
            println!(
                "    {}",
                truncate_text(&result.section.content, options.preview)
            );
        }
        println!();
    }

    Ok(())
}
