//! Core identifier types.
//!
//! Generated identifiers use TypeID format (prefix + UUIDv7) so they are
//! human-readable and time-sortable. The context id is the exception: its
//! format belongs to the caller, so it stays an opaque validated string.

mod context_id;
mod message_id;
mod request_id;

pub use context_id::{ContextId, InvalidContextId};
pub use message_id::{InvalidMessageId, MessageId};
pub use request_id::{InvalidRequestId, RequestId};
