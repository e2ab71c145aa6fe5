//! Generative formulation pipeline: mood and skin profile → scent profile → formula.
//!
//! Both stages talk to an OpenAI-compatible chat backend. Any failure on the
//! generative path degrades to the deterministic fallback formula.

pub mod backend;
mod decode;
mod error;
pub mod extract;
pub mod orchestrator;
mod prompts;
pub mod stages;

pub use backend::{BackendConfig, ChatBackend, ChatRequest, OpenAiClient};
pub use error::{BackendError, GenerationError, ParseError};
pub use extract::extract_json_object;
pub use orchestrator::Formulator;
pub use stages::{generate_formula, recommend_scent};
