use colored::Colorize;

use crate::prelude::{eprintln, println, *};

use super::store::{DocumentRef, SopStore};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ListOptions, store: &SopStore, global: &crate::Global) -> Result<()> {
    let docs = store.list_documents();

    if global.verbose {
        eprintln!("Found {} document(s)", docs.len());
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&docs)?);
        return Ok(());
    }

    if docs.is_empty() {
        println!(
            "{}",
            f!(
                "No SOP documents found in {}",
                global.sops_dir.display()
            )
            .yellow()
        );
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["ID".green().bold(), "FILE".green().bold()]);
    for doc in &docs {
        table.add_row(prettytable::row![doc.id.cyan(), doc.label]);
    }
    table.printstd();

    Ok(())
}
