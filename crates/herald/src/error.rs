//! Error types for message expansion.

use thiserror::Error;

/// The bounded rewrite budget was exhausted while expanding a message.
///
/// Raised at most once per top-level expansion, after the one-shot
/// diagnostic has been emitted. [`Message::resolve`](crate::Message::resolve)
/// absorbs it and keeps the partially expanded message; it only surfaces
/// through [`Message::resolve_with`](crate::Message::resolve_with).
#[derive(Debug, Clone, Error)]
#[error("replacement limit reached while expanding message (key: {})", key.as_deref().unwrap_or("<none>"))]
pub struct LimitReached {
    /// Key of the message the expansion started from, when known.
    pub key: Option<String>,
}
