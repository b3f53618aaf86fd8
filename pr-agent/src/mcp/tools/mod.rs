//! MCP tool implementations, one submodule per tool group
//!
//! Every tool lives in `<group>/<tool>/mod.rs` next to a `description.md`
//! that is embedded as the tool description.

pub mod actions;
pub mod changes;
pub mod templates;
