//! Dynamic tool registry.
//!
//! Tools are the delegation surface the orchestrating model sees. A tool is
//! a [`ToolBinding`]: a definition (name, description, JSON schema) plus an
//! executor. Bindings come from three places: remote agent endpoints
//! ([`remote_binding`]), MCP plugin tools, and local [`ToolExecutor`]
//! implementations.

mod definition;
mod error;
mod name;
mod registry;
mod remote;

pub use definition::{ToolBinding, ToolExecutionFuture, ToolExecutor};
pub use error::{ToolError, ToolErrorKind};
pub use name::FunctionName;
pub use registry::{ToolRegistry, ToolSnapshot};
pub use remote::remote_binding;
