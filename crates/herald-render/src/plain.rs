//! The plain renderer: a message as one legacy-code string.
//!
//! Click and hover behavior cannot be expressed in this form and is skipped;
//! colors and formats are emitted as `§` codes. The renderer keeps track of
//! the active color and format set across the whole message and only emits
//! codes when something changes. The legacy scheme has no way to turn off a
//! single format, so when a run drops a format the renderer emits a full
//! reset and rebuilds the style from scratch.

use std::collections::BTreeSet;

use herald_markup::tag::RESET_CODE;
use herald_markup::{Color, Format, InteractiveMessage, CODE_CHAR};

/// Renders the message as a single string with legacy formatting codes.
pub fn render(message: &InteractiveMessage) -> String {
    let mut out = String::new();
    let mut active_color = Color::default();
    let mut active_formats: BTreeSet<Format> = BTreeSet::new();

    for line in message {
        for run in &line.runs {
            // A format would have to be turned off: reset and start over.
            if !active_formats.is_subset(&run.formats) {
                out.push(CODE_CHAR);
                out.push(RESET_CODE);
                active_color = Color::default();
                active_formats.clear();
            }
            if run.color != active_color {
                out.push(CODE_CHAR);
                out.push(run.color.code());
                active_color = run.color;
            }
            for format in &run.formats {
                if active_formats.insert(*format) {
                    out.push(CODE_CHAR);
                    out.push(format.code());
                }
            }
            out.push_str(&run.text);
        }
        if line.breaks_after {
            out.push('\n');
        }
    }

    out
}

/// Removes every legacy formatting code (the `§` byte and the character
/// following it) from a rendered string.
pub fn strip_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == CODE_CHAR {
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}
