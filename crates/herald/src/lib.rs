//! # Herald - interactive chat messages
//!
//! Herald turns human-writable markup into rich chat output. Messages are
//! written as plain lines with bracket tags, legacy codes and interactive
//! declarations (see [`herald_markup`]), expanded through a bounded template
//! engine (positional and named variables, cross-referenced message keys),
//! and rendered either as a legacy-code string or as wire-format JSON (see
//! [`herald_render`]).
//!
//! # Quick start
//!
//! ```rust
//! use std::collections::HashMap;
//! use herald::{Message, Replacement};
//!
//! // Any key/value store of message lines works as the language source.
//! let mut store = HashMap::new();
//! store.insert(
//!     "greeting".to_string(),
//!     vec!["[green]Hello %0%!".to_string()],
//! );
//!
//! let text = Message::from_key(&store, "greeting")
//!     .replacement(Replacement::literal("world"))
//!     .plain(&store);
//!
//! assert_eq!(text, "§aHello world!");
//! ```
//!
//! # Expansion is bounded
//!
//! Replaced values may contain variables themselves, so expansion runs to a
//! fixed point - guarded by a per-call rewrite budget. A message that ends
//! up including itself does not hang or overflow: expansion stops, the
//! condition is reported once through `tracing`, and the partial result is
//! returned. See [`Limit`].
//!
//! Herald never performs I/O. Where the rendered output goes, and where
//! language files come from, is entirely up to the host; the
//! [`MessageProvider`] and [`ReplacementProvider`] traits are the seams.

pub mod error;
mod expand;
pub mod limit;
pub mod message;
pub mod provider;

pub use error::LimitReached;
pub use limit::{Limit, MAX_DEPTH, PREVIEW_LENGTH, REPLACEMENT_LIMIT};
pub use message::{Message, PREFIX_KEY};
pub use provider::{MessageProvider, Provided, Replacement, ReplacementProvider};

pub use herald_markup as markup;
pub use herald_render as render;
