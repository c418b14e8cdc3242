//! Offline inspection commands
//!
//! `classify` and `plan` run the deterministic pipeline only. No backend is
//! contacted.

use forefront_core::{
    analyze_semantics, build_dynamic_workflow, classify as classify_intent,
    enhance_intent_with_semantics, Intent, Semantics, Workflow,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Inspection {
    intent: Intent,
    semantics: Semantics,
    #[serde(skip_serializing_if = "Option::is_none")]
    workflow: Option<Workflow>,
}

fn inspect(query: &str, with_plan: bool) -> Inspection {
    let semantics = analyze_semantics(query);
    let intent = enhance_intent_with_semantics(classify_intent(query), &semantics);
    let workflow = with_plan.then(|| build_dynamic_workflow(&intent, &semantics));
    Inspection {
        intent,
        semantics,
        workflow,
    }
}

/// Print the enhanced intent and semantics of `query`
pub fn classify(query: &str) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&inspect(query, false))?);
    Ok(())
}

/// Print intent, semantics and the planned workflow of `query`
pub fn plan(query: &str) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&inspect(query, true))?);
    Ok(())
}
