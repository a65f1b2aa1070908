//! Message values.
//!
//! A [`Message`] is a list of raw markup lines plus the replacement
//! arguments to expand into them. It is built up with chainable methods,
//! expanded against a [`MessageProvider`], and finally turned into raw
//! lines, a single string, a legacy-code string or wire-format JSON.
//!
//! Expansion is bounded and never fails: when a message (indirectly)
//! includes itself the rewrite budget runs out, a diagnostic is emitted
//! once, and the message keeps whatever was expanded so far.

use herald_markup::parse;
use herald_render::{plain, wire};

use crate::expand::LANGUAGE_KEY_PREFIX;
use crate::limit::{Limit, PREVIEW_LENGTH, REPLACEMENT_LIMIT};
use crate::provider::{MessageProvider, Replacement};

/// Key of the message inserted by [`Message::prefix`].
pub const PREFIX_KEY: &str = "prefix";

/// Raw message lines plus replacement arguments.
#[derive(Debug, Clone)]
pub struct Message {
    pub(crate) lines: Vec<String>,
    pub(crate) replacements: Vec<Replacement>,
    pub(crate) key: Option<String>,
    pub(crate) key_expansion: bool,
    pub(crate) inline: bool,
}

impl Default for Message {
    fn default() -> Self {
        Message::empty()
    }
}

impl Message {
    /// A message without content.
    pub fn empty() -> Self {
        Message {
            lines: Vec::new(),
            replacements: Vec::new(),
            key: None,
            key_expansion: true,
            inline: false,
        }
    }

    /// A single-line message.
    pub fn from_string(line: impl Into<String>) -> Self {
        let mut message = Message::empty();
        message.lines.push(line.into());
        message
    }

    /// A message from raw lines.
    pub fn from_lines(lines: Vec<String>) -> Self {
        let mut message = Message::empty();
        message.lines = lines;
        message
    }

    /// A message looked up by key. Unknown keys yield an empty message; the
    /// key is kept for diagnostics either way.
    pub fn from_key(provider: &dyn MessageProvider, key: impl Into<String>) -> Self {
        let key = key.into();
        let mut message = Message::empty();
        message.lines = provider.get_lines(&key);
        message.key = Some(key);
        message
    }

    /// Sets the replacement arguments.
    pub fn replacements(mut self, replacements: Vec<Replacement>) -> Self {
        self.replacements = replacements;
        self
    }

    /// Adds one replacement argument.
    pub fn replacement(mut self, replacement: impl Into<Replacement>) -> Self {
        self.replacements.push(replacement.into());
        self
    }

    /// Marks this message for inline insertion: when used as a replacement
    /// it is flattened to a single string instead of spreading over lines.
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    /// Disables `%lang:key%` expansion for this message.
    pub fn no_key_expansion(mut self) -> Self {
        self.key_expansion = false;
        self
    }

    /// Prepends the shared prefix line (`%lang:prefix%`).
    pub fn prefix(self) -> Self {
        self.prefix_if(true)
    }

    /// Prepends the shared prefix line when `add` is true.
    pub fn prefix_if(mut self, add: bool) -> Self {
        if add {
            self.lines
                .insert(0, format!("%{LANGUAGE_KEY_PREFIX}{PREFIX_KEY}%"));
        }
        self
    }

    /// Appends a raw line.
    pub fn append_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Appends raw lines.
    pub fn append_lines(mut self, lines: Vec<String>) -> Self {
        self.lines.extend(lines);
        self
    }

    /// Appends another message's raw lines.
    pub fn append(self, other: Message) -> Self {
        self.append_lines(other.lines)
    }

    /// Prepends a raw line.
    pub fn prepend_line(mut self, line: impl Into<String>) -> Self {
        self.lines.insert(0, line.into());
        self
    }

    /// Prepends raw lines.
    pub fn prepend_lines(mut self, lines: Vec<String>) -> Self {
        self.lines.splice(0..0, lines);
        self
    }

    /// Prepends another message's raw lines.
    pub fn prepend(self, other: Message) -> Self {
        self.prepend_lines(other.lines)
    }

    /// True when every line is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.is_empty())
    }

    /// The key this message was looked up by, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The raw lines, without any expansion.
    pub fn raw_lines(&self) -> &[String] {
        &self.lines
    }

    /// The raw lines joined to one string, without any expansion.
    pub fn single_raw(&self) -> String {
        self.lines.concat()
    }

    /// At most `max` characters of the raw message, for diagnostics.
    pub fn preview(&self, max: usize) -> String {
        let mut out = String::new();
        for line in &self.lines {
            if out.chars().count() >= max {
                break;
            }
            out.extend(line.chars().take(max));
        }
        out.chars().take(max).collect()
    }

    /// Expands all replacements in place.
    ///
    /// Never fails: if the rewrite budget runs out the message keeps the
    /// partial expansion and the condition has already been reported.
    pub fn resolve(&mut self, provider: &dyn MessageProvider) -> &mut Self {
        let mut limit = Limit::new(
            REPLACEMENT_LIMIT,
            self.key.clone(),
            self.preview(PREVIEW_LENGTH),
        );
        let _ = self.resolve_with(provider, &mut limit);
        self
    }

    /// The expanded lines.
    pub fn lines(mut self, provider: &dyn MessageProvider) -> Vec<String> {
        self.resolve(provider);
        self.lines
    }

    /// The expanded lines joined to one string.
    pub fn single(mut self, provider: &dyn MessageProvider) -> String {
        self.resolve(provider);
        self.lines.concat()
    }

    /// Expands, parses and renders to a legacy-code string.
    pub fn plain(mut self, provider: &dyn MessageProvider) -> String {
        self.resolve(provider);
        plain::render(&parse(&self.lines))
    }

    /// Expands, parses and renders to wire-format JSON values.
    pub fn wire(mut self, provider: &dyn MessageProvider) -> Vec<String> {
        self.resolve(provider);
        wire::render(&parse(&self.lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_messages() -> HashMap<String, Vec<String>> {
        HashMap::new()
    }

    #[test]
    fn empty_message() {
        let message = Message::empty();
        assert!(message.is_empty());
        assert!(message.raw_lines().is_empty());
        assert_eq!(message.single_raw(), "");
        assert_eq!(message.clone().plain(&no_messages()), "");
        assert!(message.clone().lines(&no_messages()).is_empty());
    }

    #[test]
    fn construction() {
        assert_eq!(Message::from_string("a").raw_lines(), ["a"]);
        assert_eq!(Message::from_string("").raw_lines(), [""]);
        assert_eq!(
            Message::from_lines(vec!["abc".into(), "def".into()]).raw_lines(),
            ["abc", "def"]
        );
        assert!(Message::from_lines(Vec::new()).raw_lines().is_empty());
    }

    #[test]
    fn from_key_keeps_the_key() {
        let mut store = no_messages();
        store.insert("single".to_string(), vec!["Hello world!".to_string()]);

        let message = Message::from_key(&store, "single");
        assert_eq!(message.raw_lines(), ["Hello world!"]);
        assert_eq!(message.key(), Some("single"));

        let missing = Message::from_key(&store, "doesNotExist");
        assert!(missing.raw_lines().is_empty());
        assert_eq!(missing.key(), Some("doesNotExist"));
    }

    #[test]
    fn emptiness() {
        assert!(Message::empty().is_empty());
        assert!(Message::from_string("").is_empty());
        assert!(!Message::from_string("a").is_empty());
        assert!(Message::from_lines(vec!["".into(), "".into()]).is_empty());
        assert!(!Message::from_lines(vec!["a".into(), "".into()]).is_empty());
        assert!(!Message::from_lines(vec!["".into(), "a".into()]).is_empty());
    }

    #[test]
    fn append_and_prepend() {
        assert_eq!(
            Message::empty()
                .append_line("abc")
                .append_line("def")
                .raw_lines(),
            ["abc", "def"]
        );
        assert_eq!(
            Message::empty()
                .prepend_line("abc")
                .prepend_line("def")
                .raw_lines(),
            ["def", "abc"]
        );
        assert_eq!(
            Message::from_string("a")
                .append_lines(vec!["b".into(), "c".into()])
                .prepend_lines(vec!["x".into(), "y".into()])
                .raw_lines(),
            ["x", "y", "a", "b", "c"]
        );
        assert_eq!(
            Message::from_string("a")
                .append(Message::from_string("b"))
                .prepend(Message::from_string("c"))
                .raw_lines(),
            ["c", "a", "b"]
        );
    }

    #[test]
    fn prefix_inserts_the_lookup_line() {
        assert!(Message::empty().prefix_if(false).is_empty());
        let message = Message::from_string("hi").prefix();
        assert_eq!(message.raw_lines(), ["%lang:prefix%", "hi"]);
        assert!(!message.is_empty());
    }

    #[test]
    fn preview_is_bounded() {
        let message = Message::from_lines(vec!["a".repeat(150), "b".repeat(150)]);
        let preview = message.preview(200);
        assert_eq!(preview.chars().count(), 200);
        assert!(preview.starts_with('a'));
        assert!(preview.ends_with('b'));
    }
}
