//! # Herald Render - message rendering
//!
//! `herald-render` turns a parsed [`InteractiveMessage`] into deliverable
//! output. Two renderers exist:
//!
//! - [`plain`]: a single string using legacy `§` formatting codes, for
//!   consoles, logs and clients without rich-text support. Click and hover
//!   behavior is skipped.
//! - [`wire`]: wire-format JSON, one value per visual line, for the
//!   rich-text chat protocol. Click and hover behavior becomes `clickEvent`
//!   and `hoverEvent` objects.
//!
//! Both renderers are pure: they take the message by shared reference and
//! the same message can be rendered any number of times.
//!
//! # Example
//!
//! ```rust
//! use herald_markup::parse;
//! use herald_render::{plain, wire};
//!
//! let message = parse(&["[red]hello"]);
//!
//! assert_eq!(plain::render(&message), "§chello");
//! assert_eq!(wire::render(&message), vec!["{\"text\":\"hello\",\"color\":\"red\"}"]);
//! ```
//!
//! [`InteractiveMessage`]: herald_markup::InteractiveMessage

pub mod plain;
pub mod wire;
