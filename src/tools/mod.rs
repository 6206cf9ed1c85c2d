//! Tool surface exposed to the calling agent.

mod definitions;
mod dispatcher;

pub use definitions::{ToolDefinition, tool_definitions};
pub use dispatcher::{SearchResponse, ToolDispatcher};
