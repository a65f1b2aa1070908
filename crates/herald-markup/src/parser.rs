//! The markup parser: raw lines in, an [`InteractiveMessage`] out.
//!
//! Parsing never fails. Anything that does not resolve to a known tag stays
//! in the output as literal text, so malformed markup degrades gracefully
//! instead of erroring.
//!
//! Each raw line is classified first: a line that starts (after optional
//! whitespace) with a known interactive tag followed by `": "` is a
//! declaration that attaches click or hover behavior to the previous content
//! line; everything else is a content line that opens a new
//! [`InteractiveLine`]. Content is then scanned left to right for bracket
//! tags (`[red]`, `[/bold]`), legacy one-character codes (`&c`, `§l`) and the
//! literal two-character `\n` break sequence.
//!
//! Color and formatting persist across content lines until changed, reset or
//! broken. Hover content is scanned with its own fresh state and never
//! inherits from (or leaks into) the surrounding line.

use std::collections::BTreeSet;

use crate::escape::is_escaped;
use crate::escape::unescape;
use crate::message::{InteractiveLine, InteractiveMessage, TextRun};
use crate::tag::{self, Color, Control, Format, InteractiveTag, Tag, CODE_CHAR};

/// Parses raw lines into a message, including interactive declarations.
pub fn parse<S: AsRef<str>>(input: &[S]) -> InteractiveMessage {
    parse_with(input, true)
}

/// Parses raw lines into a message.
///
/// With `interactive` set to false, declaration lines (hover, click) are
/// skipped entirely and only content lines are parsed.
pub fn parse_with<S: AsRef<str>>(input: &[S], interactive: bool) -> InteractiveMessage {
    let mut message = InteractiveMessage::new();
    let mut state = ScanState::default();

    for raw in input {
        let raw = raw.as_ref();
        match interactive_split(raw) {
            None => {
                let mut line = InteractiveLine::new();
                if scan_line(raw, &mut state, &mut line.runs, false) {
                    line.breaks_after = true;
                }
                message.lines.push(line);
            }
            Some(_) if !interactive => continue,
            // A declaration before any content line has nothing to attach to.
            Some((InteractiveTag::Click(click), content)) => {
                if let Some(last) = message.lines.last_mut() {
                    last.click = Some((click, content.to_string()));
                }
            }
            Some((InteractiveTag::Hover(hover), content)) => {
                let Some(last) = message.lines.last_mut() else {
                    continue;
                };
                match &mut last.hover {
                    // Same kind declared again: continue the tooltip on a new
                    // line instead of replacing it.
                    Some((kind, runs)) if *kind == hover => {
                        if let Some(previous) = runs.last_mut() {
                            previous.text.push('\n');
                        }
                    }
                    _ => last.hover = Some((hover, Vec::new())),
                }
                let Some((_, runs)) = &mut last.hover else {
                    continue;
                };
                let mut hover_state = ScanState::default();
                if scan_line(content, &mut hover_state, runs, true) {
                    last.breaks_after = true;
                }
            }
        }
    }

    // Lines without content that only carried formatting changes are
    // artifacts of the scan, not part of the message.
    message
        .lines
        .retain(|line| !line.runs.is_empty() || line.breaks_after);
    message
}

/// True when the line declares an interactive property (`hover: ...`,
/// `command: ...`) rather than content.
pub fn is_interactive_line(line: &str) -> bool {
    interactive_split(line).is_some()
}

/// Splits raw lines at embedded physical line terminators and drops
/// declaration lines that precede the first content line.
pub fn normalize_lines<S: AsRef<str>>(input: &[S]) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in input {
        for piece in raw.as_ref().split('\n') {
            lines.push(piece.strip_suffix('\r').unwrap_or(piece).to_string());
        }
    }
    while lines.first().is_some_and(|line| is_interactive_line(line)) {
        lines.remove(0);
    }
    lines
}

/// Formatting state carried across a content scan.
#[derive(Debug, Default)]
struct ScanState {
    color: Color,
    formats: BTreeSet<Format>,
}

/// A resolved tag found in a line, with the text around it.
struct TagMatch<'a> {
    preceding: &'a str,
    tag: Tag,
    closing: bool,
    rest: &'a str,
}

/// Scans one content (or hover) line, appending text runs to `runs`.
///
/// Returns true when a break token ended the line early; the caller marks
/// the owning line and discards the remainder.
fn scan_line(full: &str, state: &mut ScanState, runs: &mut Vec<TextRun>, in_hover: bool) -> bool {
    let mut line = full;
    while !line.is_empty() {
        let found = next_tag(line);
        let text = match &found {
            Some(m) => m.preceding,
            None => line,
        };
        if !text.is_empty() {
            runs.push(TextRun {
                text: unescape(text),
                color: state.color,
                formats: state.formats.clone(),
            });
        }
        let Some(found) = found else {
            break;
        };
        line = found.rest;

        match (found.tag, found.closing) {
            // A closing color tag behaves like the color itself.
            (Tag::Color(color), _) => state.color = color,
            (Tag::Format(format), false) => {
                state.formats.insert(format);
            }
            (Tag::Format(format), true) => {
                state.formats.remove(&format);
            }
            (Tag::Control(Control::Reset), _) => {
                state.formats.clear();
                state.color = Color::default();
            }
            (Tag::Control(Control::Break), _) => {
                if in_hover && !runs.is_empty() {
                    // Inside a tooltip a break is just a newline in the text.
                    if let Some(last) = runs.last_mut() {
                        last.text.push('\n');
                    }
                } else {
                    // One logical break per raw line: formatting resets,
                    // color persists, trailing content is discarded.
                    state.formats.clear();
                    return true;
                }
            }
        }
    }
    false
}

/// An unresolved tag candidate found while scanning.
enum Candidate<'a> {
    Bracket { content: &'a str },
    Legacy(char),
    Break,
}

fn is_bracket_name_char(c: char) -> bool {
    matches!(c, '/' | '_' | 'a'..='z' | 'A'..='Z' | '1'..='9')
}

/// Finds the next tag-shaped piece of text at or after byte `from`.
///
/// Returns the candidate with its byte range. Whether it actually resolves
/// to a tag is decided by the caller; a candidate that does not resolve is
/// skipped and scanning resumes after it.
fn find_candidate(line: &str, from: usize) -> Option<(usize, usize, Candidate<'_>)> {
    for (offset, c) in line[from..].char_indices() {
        let at = from + offset;
        match c {
            '[' => {
                let rest = &line[at + 1..];
                if let Some(len) = rest.find(|ch: char| !is_bracket_name_char(ch)) {
                    if len > 0 && rest.as_bytes()[len] == b']' {
                        return Some((
                            at,
                            at + 1 + len + 1,
                            Candidate::Bracket {
                                content: &rest[..len],
                            },
                        ));
                    }
                }
            }
            '&' | CODE_CHAR => {
                if let Some(code) = line[at + c.len_utf8()..].chars().next() {
                    if code.is_ascii_alphanumeric() {
                        return Some((at, at + c.len_utf8() + 1, Candidate::Legacy(code)));
                    }
                }
            }
            '\\' => {
                if line[at..].starts_with("\\n") {
                    return Some((at, at + 2, Candidate::Break));
                }
            }
            _ => {}
        }
    }
    None
}

/// Finds the first tag in the line that resolves and is not escaped.
fn next_tag(line: &str) -> Option<TagMatch<'_>> {
    let mut from = 0;
    while let Some((start, end, candidate)) = find_candidate(line, from) {
        if is_escaped(line, start) {
            from = end;
            continue;
        }

        let resolved = match candidate {
            Candidate::Break => Some((Tag::Control(Control::Break), false)),
            Candidate::Legacy(code) => tag::legacy_tag(code).map(|tag| (tag, false)),
            Candidate::Bracket { content } => {
                let name = content.to_ascii_lowercase();
                match tag::bracket_tag(&name) {
                    Some(tag) => Some((tag, false)),
                    None => name.strip_prefix('/').and_then(|opening| {
                        match tag::bracket_tag(opening) {
                            // Control tags cannot be closed.
                            Some(Tag::Control(_)) | None => None,
                            Some(tag) => Some((tag, true)),
                        }
                    }),
                }
            }
        };

        match resolved {
            Some((tag, closing)) => {
                return Some(TagMatch {
                    preceding: &line[..start],
                    tag,
                    closing,
                    rest: &line[end..],
                })
            }
            None => from = end,
        }
    }
    None
}

/// Returns the interactive tag heading the line and the content after the
/// `": "` separator, if the line is a declaration.
fn interactive_split(line: &str) -> Option<(InteractiveTag, &str)> {
    let start = line.find(|c: char| c != ' ' && c != '\t')?;
    let end = start + line[start..].find(": ")?;
    let name = line[start..end].to_ascii_lowercase();
    let tag = tag::interactive_tag(&name)?;
    Some((tag, &line[end + 2..]))
}
