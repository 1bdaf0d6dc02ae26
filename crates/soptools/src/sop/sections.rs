use colored::Colorize;

use crate::prelude::{eprintln, println, *};

use super::store::{SectionsOutcome, SopStore};
use super::truncate_text;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SectionsOptions {
    /// Document id (file name without extension; prefixes are accepted)
    pub document_id: String,

    /// Characters of content to preview per section
    #[arg(long, default_value = "120")]
    pub preview: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: SectionsOptions, store: &SopStore, global: &crate::Global) -> Result<()> {
    let outcome = store.get_sections(&options.document_id).await;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        SectionsOutcome::NotFound => {
            Err(Error::DocumentNotFound(options.document_id.clone()).into())
        }
        SectionsOutcome::NoSectionsDetected { raw_text_available } => {
            println!(
                "{}",
                "No numbered sections detected in this document.".yellow()
            );
            if raw_text_available {
                println!(
                    "Raw text is available: {}",
                    f!("soptools sop text {}", options.document_id).cyan()
                );
            }
            Ok(())
        }
        SectionsOutcome::Sections { sections } => {
            if global.verbose {
                eprintln!("{} section(s)", sections.len());
            }
            for section in &sections {
                println!("{}", section.full_heading.white().bold());
                if !section.content.is_empty() {
                    println!("    {}", truncate_text(&section.content, options.preview));
                }
            }
            Ok(())
        }
    }
}
