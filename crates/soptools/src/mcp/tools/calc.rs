use serde::Deserialize;

use soptools_core::calc;

use super::{invalid_params, parse_args, to_text_result, JsonRpcError, ServerState, Tool};

pub fn tool_definitions() -> Vec<Tool> {
    vec![
        Tool {
            name: "calc_annealing_temp".to_string(),
            description: "Calculate the PCR annealing temperature for a primer pair using nearest-neighbor melting temperatures. pcr_type selects the polymerase preset: 'OneTaq' anneals 3 C below the lower primer Tm, 'Q5' anneals 3 C above it. Returns annealing_temp, both Tm values, and a warning when the Tm difference exceeds 5 C.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "forward_primer": {
                        "type": "string",
                        "description": "Forward primer sequence (A, T, C, G)"
                    },
                    "reverse_primer": {
                        "type": "string",
                        "description": "Reverse primer sequence (A, T, C, G)"
                    },
                    "pcr_type": {
                        "type": "string",
                        "description": "Polymerase preset",
                        "enum": ["OneTaq", "Q5"]
                    }
                },
                "required": ["forward_primer", "reverse_primer", "pcr_type"]
            }),
        },
        Tool {
            name: "calc_gibson_assembly".to_string(),
            description: "Calculate Gibson assembly fragment volumes with adjustable molar ratios. Each fragment needs size_bp and concentration_ng_ul; molar_ratio defaults to 1.0. The lowest-ratio fragment is pinned at 0.1 pmol and the mix is scaled to total_volume_ul. Returns per-fragment volume, mass, and pmol plus totals and the scale factor.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "fragments": {
                        "type": "array",
                        "description": "Fragments to assemble (at least 2)",
                        "items": {
                            "type": "object",
                            "properties": {
                                "size_bp": { "type": "number", "description": "Fragment size in base pairs" },
                                "concentration_ng_ul": { "type": "number", "description": "DNA concentration in ng/uL" },
                                "molar_ratio": { "type": "number", "description": "Desired molar ratio (default 1.0)" }
                            },
                            "required": ["size_bp", "concentration_ng_ul"]
                        }
                    },
                    "total_volume_ul": {
                        "type": "number",
                        "description": "Desired total reaction volume in uL"
                    }
                },
                "required": ["fragments", "total_volume_ul"]
            }),
        },
        Tool {
            name: "calc_restriction_digest".to_string(),
            description: "Calculate restriction digest reagent volumes, scaling the total reaction volume by DNA mass (reference: 1 ug DNA in 50 uL). Buffer is 10% of the total and enzyme is capped at 10% of the total. Returns DNA, buffer, enzyme, and water volumes plus a warning for masses under 100 ng.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "dna_mass_ng": {
                        "type": "number",
                        "description": "DNA mass in nanograms"
                    },
                    "dna_conc_ng_ul": {
                        "type": "number",
                        "description": "DNA concentration in ng/uL"
                    }
                },
                "required": ["dna_mass_ng", "dna_conc_ng_ul"]
            }),
        },
        Tool {
            name: "calc_ligation_ratio".to_string(),
            description: "Calculate insert and vector amounts for a ligation at the requested insert:vector molar ratio (660 g/mol per bp). Returns masses and pipetting volumes for both species.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "vector_size_bp": { "type": "number", "description": "Vector size in bp" },
                    "insert_size_bp": { "type": "number", "description": "Insert size in bp" },
                    "vector_conc_ng_ul": { "type": "number", "description": "Vector concentration in ng/uL" },
                    "insert_conc_ng_ul": { "type": "number", "description": "Insert concentration in ng/uL" },
                    "ratio": { "type": "number", "description": "Insert:vector molar ratio (default 3.0)" },
                    "vector_mass_ng": { "type": "number", "description": "Vector mass for the ligation in ng" }
                },
                "required": ["vector_size_bp", "insert_size_bp", "vector_conc_ng_ul", "insert_conc_ng_ul", "vector_mass_ng"]
            }),
        },
        Tool {
            name: "calc_oligo_annealing".to_string(),
            description: "Calculate volumes for an oligo annealing reaction: how much of each oligo stock and how much water to reach the desired annealed concentration in the final volume.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "oligo1_conc_um": { "type": "number", "description": "Oligo 1 stock concentration in uM" },
                    "oligo2_conc_um": { "type": "number", "description": "Oligo 2 stock concentration in uM" },
                    "desired_conc_um": { "type": "number", "description": "Desired final annealed concentration in uM" },
                    "final_volume_ul": { "type": "number", "description": "Final reaction volume in uL" }
                },
                "required": ["oligo1_conc_um", "oligo2_conc_um", "desired_conc_um", "final_volume_ul"]
            }),
        },
    ]
}

pub async fn handle_annealing_temp(
    arguments: Option<serde_json::Value>,
    _state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        forward_primer: String,
        reverse_primer: String,
        pcr_type: calc::PcrType,
    }

    let args: Args = parse_args(arguments)?;

    let result = calc::annealing_temp(&args.forward_primer, &args.reverse_primer, args.pcr_type)
        .map_err(|e| invalid_params(e.to_string()))?;

    to_text_result(&result)
}

pub async fn handle_gibson_assembly(
    arguments: Option<serde_json::Value>,
    _state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        fragments: Vec<calc::GibsonFragment>,
        total_volume_ul: f64,
    }

    let args: Args = parse_args(arguments)?;

    let result = calc::gibson_assembly(&args.fragments, args.total_volume_ul)
        .map_err(|e| invalid_params(e.to_string()))?;

    to_text_result(&result)
}

pub async fn handle_restriction_digest(
    arguments: Option<serde_json::Value>,
    _state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        dna_mass_ng: f64,
        dna_conc_ng_ul: f64,
    }

    let args: Args = parse_args(arguments)?;

    let result = calc::restriction_digest(args.dna_mass_ng, args.dna_conc_ng_ul)
        .map_err(|e| invalid_params(e.to_string()))?;

    to_text_result(&result)
}

pub async fn handle_ligation_ratio(
    arguments: Option<serde_json::Value>,
    _state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        vector_size_bp: u32,
        insert_size_bp: u32,
        vector_conc_ng_ul: f64,
        insert_conc_ng_ul: f64,
        #[serde(default = "default_ligation_ratio")]
        ratio: f64,
        vector_mass_ng: f64,
    }

    fn default_ligation_ratio() -> f64 {
        3.0
    }

    let args: Args = parse_args(arguments)?;

    let result = calc::insert_vector_ratio(
        args.vector_size_bp,
        args.insert_size_bp,
        args.vector_conc_ng_ul,
        args.insert_conc_ng_ul,
        args.ratio,
        args.vector_mass_ng,
    )
    .map_err(|e| invalid_params(e.to_string()))?;

    to_text_result(&result)
}

pub async fn handle_oligo_annealing(
    arguments: Option<serde_json::Value>,
    _state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        oligo1_conc_um: f64,
        oligo2_conc_um: f64,
        desired_conc_um: f64,
        final_volume_ul: f64,
    }

    let args: Args = parse_args(arguments)?;

    let result = calc::oligo_annealing(
        args.oligo1_conc_um,
        args.oligo2_conc_um,
        args.desired_conc_um,
        args.final_volume_ul,
    )
    .map_err(|e| invalid_params(e.to_string()))?;

    to_text_result(&result)
}
