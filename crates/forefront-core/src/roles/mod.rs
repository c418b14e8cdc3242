//! Roles - step purposes, persona prompts and typed outputs
//!
//! Every workflow step is served by one fixed persona. The registry is built
//! once on first access and never mutated, so it is shared freely across
//! concurrent requests.
//!
//! # Module Structure
//!
//! - `step_type`: Step purposes and their routing task
//! - `registry`: The read-only persona table
//! - `outputs`: Typed per-role outputs and their parsers
//! - `json`: Tolerant extraction of a JSON object from model text

mod json;
mod outputs;
mod registry;
mod step_type;


pub use json::{extract_json_object, json_object_candidates, parse_json_object};
pub use outputs::{
    Citation, CodeOutput, ComposedOutput, PromptOutput, ResearchOutput, RoleOutput, TextOutput,
    VisualDirectionOutput,
};
pub use registry::{all_roles, get_system_prompt_for_purpose, role_for, RolePrompt};
pub use step_type::StepType;
