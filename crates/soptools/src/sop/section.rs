use colored::Colorize;

use crate::prelude::{println, *};

use super::store::{SectionOutcome, SopStore};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SectionOptions {
    /// Document id (file name without extension; prefixes are accepted)
    pub document_id: String,

    /// Section number, e.g. "2" or "3.1"
    pub number: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: SectionOptions, store: &SopStore, global: &crate::Global) -> Result<()> {
    let outcome = store
        .get_section(&options.document_id, &options.number)
        .await;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        SectionOutcome::NotFound => {
            Err(Error::DocumentNotFound(options.document_id.clone()).into())
        }
        SectionOutcome::NoSuchSection => Err(Error::SectionNotFound {
            document: options.document_id.clone(),
            number: options.number.clone(),
        }
        .into()),
        SectionOutcome::Found(detail) => {
            println!("{}", detail.section.full_heading.white().bold());
            println!();
            println!("{}", detail.section.content);

            if !detail.calculator_tags.is_empty() {
                let tags: Vec<String> = detail
                    .calculator_tags
                    .iter()
                    .map(|tag| tag.to_string())
                    .collect();
                println!();
                println!(
                    "{} {}",
                    "Suggested calculators:".green(),
                    tags.join(", ").cyan()
                );
            }

            Ok(())
        }
    }
}
