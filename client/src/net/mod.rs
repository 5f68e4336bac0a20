//! Model access and the async operations built on it.
//!
//! SYSTEM CONTEXT
//! ==============
//! `generator` is the boundary trait, `gemini` its HTTP implementation,
//! `prompts` and `attachment` shape requests, and `operations` fans model
//! output into the session reducer. `bridge_host` is the host end of the
//! preview iframe protocol.

pub mod attachment;
pub mod bridge_host;
pub mod config;
pub mod gemini;
pub mod generator;
pub mod operations;
pub mod prompts;
