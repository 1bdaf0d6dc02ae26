use serde::Deserialize;

use super::{parse_args, to_text_result, JsonRpcError, ServerState, Tool};

pub fn tool_definitions() -> Vec<Tool> {
    vec![
        Tool {
            name: "sop_list".to_string(),
            description: "List all available SOP documents. Returns each document's id (file name without extension) and file name. Use the id with sop_sections, sop_section, and sop_text.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        Tool {
            name: "sop_sections".to_string(),
            description: "Extract the numbered sections of one SOP document. Returns a status field: 'sections' with the classified section list (number, title, full_heading, content), 'no_sections_detected' when the document decodes but has no recognizable numbered headings (raw_text_available tells you whether sop_text is worth calling), or 'not_found' when the id matches no document or the document cannot be decoded.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "document_id": {
                        "type": "string",
                        "description": "Document id from sop_list; a unique prefix is also accepted"
                    }
                },
                "required": ["document_id"]
            }),
        },
        Tool {
            name: "sop_section".to_string(),
            description: "Read one section of an SOP document by its dotted number (e.g. '2' or '3.1'). The lookup is an exact string match on the number and returns the first section with that number, together with calculator_tags naming the relevant cloning calculators (pcr, gibson, restriction, ligation, oligo).".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "document_id": {
                        "type": "string",
                        "description": "Document id from sop_list; a unique prefix is also accepted"
                    },
                    "number": {
                        "type": "string",
                        "description": "Section number, e.g. '2' or '3.1'"
                    }
                },
                "required": ["document_id", "number"]
            }),
        },
        Tool {
            name: "sop_search".to_string(),
            description: "Search the sections of every SOP document for a term. The term is matched case-insensitively as a literal substring of section titles and content. Results come back in document order then section order, each tagged with document_id, document_label, and calculator_tags. An empty result list means no matches, not an error.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search term"
                    }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: "sop_text".to_string(),
            description: "Get the raw decoded text of one SOP document, without section extraction. Useful as a fallback when sop_sections reports no_sections_detected with raw_text_available true.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "document_id": {
                        "type": "string",
                        "description": "Document id from sop_list; a unique prefix is also accepted"
                    }
                },
                "required": ["document_id"]
            }),
        },
    ]
}

pub async fn handle_sop_list(
    _arguments: Option<serde_json::Value>,
    state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let docs = state.store.list_documents();
    to_text_result(&docs)
}

pub async fn handle_sop_sections(
    arguments: Option<serde_json::Value>,
    state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        document_id: String,
    }

    let args: Args = parse_args(arguments)?;
    let outcome = state.store.get_sections(&args.document_id).await;
    to_text_result(&outcome)
}

pub async fn handle_sop_section(
    arguments: Option<serde_json::Value>,
    state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        document_id: String,
        number: String,
    }

    let args: Args = parse_args(arguments)?;
    let outcome = state.store.get_section(&args.document_id, &args.number).await;
    to_text_result(&outcome)
}

pub async fn handle_sop_search(
    arguments: Option<serde_json::Value>,
    state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        query: String,
    }

    let args: Args = parse_args(arguments)?;
    let results = state.store.search(&args.query).await;
    to_text_result(&results)
}

pub async fn handle_sop_text(
    arguments: Option<serde_json::Value>,
    state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        document_id: String,
    }

    let args: Args = parse_args(arguments)?;

    match state.store.get_raw_text(&args.document_id).await {
        Some(text) => to_text_result(&serde_json::json!({
            "status": "ok",
            "document_id": args.document_id,
            "text": text.as_str(),
        })),
        None => to_text_result(&serde_json::json!({
            "status": "not_found",
            "document_id": args.document_id,
        })),
    }
}
