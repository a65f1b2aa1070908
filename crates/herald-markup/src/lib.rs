//! # Herald Markup - chat markup parsing
//!
//! `herald-markup` parses a small human-writable markup language into a
//! structured message model. The language mixes three token families:
//!
//! - bracket tags: `[red]`, `[bold]`, `[/bold]`, `[break]`, `[reset]`
//! - legacy one-character codes: `&c`, `&l`, `§r`
//! - interactive declarations on their own lines: `hover: tooltip`,
//!   `command: /help`, `link: https://...`, `suggest: /warp`
//!
//! Parsing never fails: unknown or malformed tags stay in the output as
//! literal text, and a backslash escapes any reserved character.
//!
//! # Example
//!
//! ```rust
//! use herald_markup::{parse, Color};
//!
//! let message = parse(&["[red]Click here for help", "command: /help"]);
//!
//! assert_eq!(message.len(), 1);
//! assert_eq!(message.lines[0].runs[0].text, "Click here for help");
//! assert_eq!(message.lines[0].runs[0].color, Color::Red);
//! assert!(message.lines[0].click.is_some());
//! ```
//!
//! The produced [`InteractiveMessage`] is consumed by the rendering crate,
//! which turns it into either a legacy escaped string or wire-format JSON.

pub mod escape;
pub mod message;
pub mod parser;
pub mod tag;

pub use escape::{escape, is_escaped, unescape, ESCAPE_CHAR};
pub use message::{InteractiveLine, InteractiveMessage, TextRun};
pub use parser::{is_interactive_line, normalize_lines, parse, parse_with};
pub use tag::{Click, Color, Control, Format, Hover, InteractiveTag, Tag, CODE_CHAR};
