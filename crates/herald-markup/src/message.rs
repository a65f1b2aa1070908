//! The parsed message model.
//!
//! A [`InteractiveMessage`] is an ordered list of [`InteractiveLine`]s; each
//! line is an ordered list of [`TextRun`]s plus optional click and hover
//! behavior. The model is built once by the parser and read-only afterwards:
//! both renderers take it by shared reference and never mutate it.

use std::collections::BTreeSet;

use crate::tag::{Click, Color, Format, Hover};

/// An atomic run of text with a uniform style.
///
/// The color is always concrete (defaulting to white) and the format set is
/// a snapshot of everything active when the run was created, not a diff.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextRun {
    pub text: String,
    pub color: Color,
    pub formats: BTreeSet<Format>,
}

impl TextRun {
    /// A run of the given text in the default style.
    pub fn new(text: impl Into<String>) -> Self {
        TextRun {
            text: text.into(),
            ..TextRun::default()
        }
    }

    /// Sets the color.
    pub fn colored(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Adds a format.
    pub fn formatted(mut self, format: Format) -> Self {
        self.formats.insert(format);
        self
    }

    /// True when this run carries any styling beyond the defaults.
    pub fn has_formatting(&self) -> bool {
        self.color != Color::default() || !self.formats.is_empty()
    }
}

/// One non-wrapping visual segment of a message.
///
/// At most one click and one hover attach to a line. `breaks_after` marks a
/// forced line break following this line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractiveLine {
    pub runs: Vec<TextRun>,
    pub click: Option<(Click, String)>,
    pub hover: Option<(Hover, Vec<TextRun>)>,
    pub breaks_after: bool,
}

impl InteractiveLine {
    pub fn new() -> Self {
        InteractiveLine::default()
    }

    /// Appends a run.
    pub fn run(mut self, run: TextRun) -> Self {
        self.runs.push(run);
        self
    }

    /// Attaches a click action.
    pub fn click(mut self, click: Click, content: impl Into<String>) -> Self {
        self.click = Some((click, content.into()));
        self
    }

    /// Attaches a hover action.
    pub fn hover(mut self, hover: Hover, runs: Vec<TextRun>) -> Self {
        self.hover = Some((hover, runs));
        self
    }

    /// Marks a forced break after this line.
    pub fn breaks_after(mut self) -> Self {
        self.breaks_after = true;
        self
    }

    /// True when the line has click or hover behavior.
    pub fn is_interactive(&self) -> bool {
        self.click.is_some() || self.hover.is_some()
    }

    /// True when the line carries no text runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// A fully parsed message, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractiveMessage {
    pub lines: Vec<InteractiveLine>,
}

impl InteractiveMessage {
    pub fn new() -> Self {
        InteractiveMessage::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InteractiveLine> {
        self.lines.iter()
    }
}

impl From<Vec<InteractiveLine>> for InteractiveMessage {
    fn from(lines: Vec<InteractiveLine>) -> Self {
        InteractiveMessage { lines }
    }
}

impl<'a> IntoIterator for &'a InteractiveMessage {
    type Item = &'a InteractiveLine;
    type IntoIter = std::slice::Iter<'a, InteractiveLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
