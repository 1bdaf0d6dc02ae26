use crate::prelude::{println, *};

use super::store::SopStore;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct TextOptions {
    /// Document id (file name without extension; prefixes are accepted)
    pub document_id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: TextOptions, store: &SopStore, global: &crate::Global) -> Result<()> {
    let Some(text) = store.get_raw_text(&options.document_id).await else {
        return Err(Error::DocumentNotFound(options.document_id.clone()).into());
    };

    if options.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "document_id": options.document_id,
                "text": text.as_str(),
            }))?
        );
    } else {
        println!("{}", text);
    }

    Ok(())
}
