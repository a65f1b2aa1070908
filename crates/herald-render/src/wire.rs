//! The wire renderer: a message as wire-format JSON, one value per visual
//! line.
//!
//! Lines are grouped into visual lines at forced breaks; every group becomes
//! one JSON value so each can be delivered separately. The JSON is emitted
//! directly rather than through a serializer: the protocol demands a
//! specific escaping scheme (solidus escaped, invisible and format-control
//! Unicode ranges emitted as `\uXXXX`) that a general-purpose serializer
//! does not produce.
//!
//! Value shapes:
//!
//! - a run without styling is a bare string, otherwise an object with
//!   `text`, `color` (omitted for the default) and one boolean key per
//!   active format;
//! - a line with a single run reuses that run's value; multiple runs are
//!   wrapped as `{"text":"","extra":[...]}`; click and hover behavior is
//!   appended as `clickEvent` / `hoverEvent` objects;
//! - a visual line that ends up as a bare string is wrapped in a
//!   one-element array, since the consuming protocol rejects top-level
//!   strings.

use herald_markup::{InteractiveLine, InteractiveMessage, TextRun};

/// Renders the message as wire-format JSON values, one per visual line.
pub fn render(message: &InteractiveMessage) -> Vec<String> {
    let mut result = Vec::new();
    let mut group: Vec<&InteractiveLine> = Vec::new();

    let count = message.len();
    for (index, line) in message.iter().enumerate() {
        // A bare break carries no content of its own.
        if !(line.breaks_after && line.is_empty()) {
            group.push(line);
        }
        if line.breaks_after || index + 1 == count {
            result.push(render_group(&group));
            group.clear();
        }
    }

    result
}

/// Renders one visual line (a group of lines joined without breaks).
fn render_group(group: &[&InteractiveLine]) -> String {
    let mut out = String::new();
    match group {
        [] => out.push_str("\"\""),
        [line] => line_json(line, &mut out),
        lines => {
            out.push_str("{\"text\":\"\",\"extra\":[");
            for (index, line) in lines.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                line_json(line, &mut out);
            }
            out.push_str("]}");
        }
    }

    // The protocol rejects a top-level bare string.
    if out.starts_with('"') && out.ends_with('"') {
        format!("[{out}]")
    } else {
        out
    }
}

/// Appends the JSON value for one line.
fn line_json(line: &InteractiveLine, out: &mut String) {
    // Safeguard; the parser drops such lines before they get here.
    if line.runs.is_empty() {
        out.push_str("\"\"");
        return;
    }

    let hover = line
        .hover
        .as_ref()
        .filter(|(_, runs)| !runs.is_empty());
    let interactive = line.click.is_some() || hover.is_some();

    if let [run] = line.runs.as_slice() {
        if !interactive {
            run_json(run, out);
            return;
        }
        // A single run becomes the base object the events attach to.
        out.push('{');
        run_fields(run, out);
    } else {
        out.push_str("{\"text\":\"\",\"extra\":[");
        for (index, run) in line.runs.iter().enumerate() {
            if index > 0 {
                out.push(',');
            }
            run_json(run, out);
        }
        out.push(']');
    }

    if let Some((click, content)) = &line.click {
        out.push_str(",\"clickEvent\":{\"action\":\"");
        out.push_str(click.action_key());
        out.push_str("\",\"value\":");
        push_json_string(content, out);
        out.push('}');
    }

    if let Some((kind, runs)) = hover {
        out.push_str(",\"hoverEvent\":{\"action\":\"");
        out.push_str(kind.action_key());
        out.push_str("\",\"value\":");
        if let [run] = runs.as_slice() {
            run_json(run, out);
        } else {
            out.push('[');
            for (index, run) in runs.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                run_json(run, out);
            }
            out.push(']');
        }
        out.push('}');
    }

    out.push('}');
}

/// Appends the JSON value for one run: a bare string when unstyled, an
/// object otherwise.
fn run_json(run: &TextRun, out: &mut String) {
    if !run.has_formatting() {
        push_json_string(&run.text, out);
        return;
    }
    out.push('{');
    run_fields(run, out);
    out.push('}');
}

/// Appends the object fields of a run, without the surrounding braces.
fn run_fields(run: &TextRun, out: &mut String) {
    out.push_str("\"text\":");
    push_json_string(&run.text, out);
    if run.color != herald_markup::Color::default() {
        out.push_str(",\"color\":\"");
        out.push_str(run.color.wire_name());
        out.push('"');
    }
    for format in &run.formats {
        out.push_str(",\"");
        out.push_str(format.wire_key());
        out.push_str("\":true");
    }
}

/// Appends a JSON string literal.
///
/// Besides the standard escapes, the solidus is escaped and every code
/// point at or below U+001F, in U+007F..=U+009F or in U+2000..=U+20FF is
/// written as an uppercase `\uXXXX` escape to neutralize invisible and
/// format-control characters.
fn push_json_string(text: &str, out: &mut String) {
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' | '"' | '/' => {
                out.push('\\');
                out.push(c);
            }
            '\u{0008}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{000C}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            c if c <= '\u{001F}'
                || ('\u{007F}'..='\u{009F}').contains(&c)
                || ('\u{2000}'..='\u{20FF}').contains(&c) =>
            {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
