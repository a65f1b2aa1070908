//! The bounded template expansion engine.
//!
//! Expansion rewrites the raw lines of a [`Message`] to a fixed point: an
//! argument pass substitutes positional (`%0%`) and named (`%player%`)
//! variables, a key pass substitutes `%lang:key%` and
//! `%lang:key|arg|...|%` references, and the two repeat until a full round
//! changes nothing. Substituted text can itself contain variables; it is
//! only picked up by a later round, which is what makes the fixed point
//! necessary - and the [`Limit`] is what keeps it finite.
//!
//! Scanning rules shared by all passes:
//!
//! - a token preceded by an odd number of backslashes is left alone;
//! - at most one substitution happens per scan position, and scanning
//!   restarts right after the inserted text, so a value containing another
//!   token is never re-expanded within the same pass.

use once_cell::sync::Lazy;
use regex::Regex;

use herald_markup::{escape, is_escaped, is_interactive_line, parse};
use herald_render::plain;

use crate::error::LimitReached;
use crate::limit::Limit;
use crate::message::Message;
use crate::provider::{MessageProvider, Provided, Replacement, ReplacementProvider};

/// Prefix distinguishing key references from named variables.
pub(crate) const LANGUAGE_KEY_PREFIX: &str = "lang:";

/// A named variable: `%player%`.
static NAMED_VARIABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new("%[a-zA-Z]+%").expect("named variable pattern"));

/// A key reference: `%lang:key%` or `%lang:key|arg|...|%`. Every argument,
/// including the last, is terminated by `|`.
static KEY_VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%lang:[a-zA-Z-]+(?:\|(?:[^|]*\|)+)?%").expect("key variable pattern")
});

impl Message {
    /// Expands all replacements in place against an explicit budget.
    ///
    /// Errors when the budget runs out; the message keeps everything
    /// expanded up to that point and the condition has been reported once
    /// through the limit.
    pub fn resolve_with(
        &mut self,
        provider: &dyn MessageProvider,
        limit: &mut Limit,
    ) -> Result<(), LimitReached> {
        limit.enter()?;
        let result = self.fixed_point(provider, limit);
        limit.exit();
        result
    }

    /// Expands and joins to a single string, for inline insertion.
    pub(crate) fn single_with(
        &mut self,
        provider: &dyn MessageProvider,
        limit: &mut Limit,
    ) -> Result<String, LimitReached> {
        self.resolve_with(provider, limit)?;
        Ok(self.lines.concat())
    }

    fn fixed_point(
        &mut self,
        provider: &dyn MessageProvider,
        limit: &mut Limit,
    ) -> Result<(), LimitReached> {
        loop {
            let before_round = self.lines.clone();
            limit.decrease()?;

            loop {
                let before = self.lines.clone();
                self.argument_pass(provider, limit)?;
                if self.lines == before {
                    break;
                }
                limit.decrease()?;
            }

            if self.key_expansion {
                loop {
                    let before = self.lines.clone();
                    self.key_pass(provider, limit)?;
                    if self.lines == before {
                        break;
                    }
                    limit.decrease()?;
                }
            }

            if self.lines == before_round {
                break;
            }
        }

        // The final round observed no change; give its round back.
        if !limit.reached() {
            limit.increase();
        }
        Ok(())
    }

    fn argument_pass(
        &mut self,
        provider: &dyn MessageProvider,
        limit: &mut Limit,
    ) -> Result<(), LimitReached> {
        if self.lines.is_empty() || self.replacements.is_empty() {
            return Ok(());
        }
        // The replacements step aside while the lines are rewritten; a
        // replacement never applies to itself.
        let mut replacements = std::mem::take(&mut self.replacements);
        let result = argument_pass(&mut self.lines, &mut replacements, provider, limit);
        self.replacements = replacements;
        result
    }

    fn key_pass(
        &mut self,
        provider: &dyn MessageProvider,
        limit: &mut Limit,
    ) -> Result<(), LimitReached> {
        let mut i: isize = 0;
        while i < self.lines.len() as isize {
            let idx = i as usize;
            let mut from = 0;
            loop {
                let (start, end) = {
                    let line = &self.lines[idx];
                    match KEY_VARIABLE.find_at(line, from) {
                        None => break,
                        Some(found) => (found.start(), found.end()),
                    }
                };
                if is_escaped(&self.lines[idx], start) {
                    from = end;
                    continue;
                }

                let token = self.lines[idx][start..end].to_string();
                let inner = &token[1 + LANGUAGE_KEY_PREFIX.len()..token.len() - 1];
                let (key, arguments) = match inner.find('|') {
                    None => (inner, Vec::new()),
                    Some(split) => {
                        let mut parts: Vec<&str> = inner[split + 1..].split('|').collect();
                        while parts.last() == Some(&"") {
                            parts.pop();
                        }
                        // Arguments are wrapped as inline sub-messages so
                        // they cannot spread over output lines.
                        let arguments = parts
                            .into_iter()
                            .map(|argument| {
                                Replacement::Message(Message::from_string(argument).inline())
                            })
                            .collect();
                        (&inner[..split], arguments)
                    }
                };

                let mut insert = Message::from_key(provider, key);
                if !arguments.is_empty() {
                    insert = insert.replacements(arguments);
                }

                let start_diff = self.lines.len() as isize - i;
                insert.resolve_with(provider, limit)?;
                insert_lines(&mut self.lines, insert.raw_lines(), idx, start, end);
                i = self.lines.len() as isize - start_diff;
                break; // one key per line per pass
            }
            i += 1;
        }
        Ok(())
    }
}

fn argument_pass(
    lines: &mut Vec<String>,
    replacements: &mut [Replacement],
    provider: &dyn MessageProvider,
    limit: &mut Limit,
) -> Result<(), LimitReached> {
    let mut i: isize = 0;
    while i < lines.len() as isize {
        let mut position = 0;
        let mut spliced = false;
        for replacement in replacements.iter_mut() {
            let idx = i as usize;
            match replacement {
                Replacement::Provider(capability) => {
                    if let Some(new_i) =
                        named_variables(lines, i, capability.as_ref(), provider, limit)?
                    {
                        i = new_i;
                        spliced = true;
                    }
                }
                Replacement::Literal(value) => {
                    let token = format!("%{position}%");
                    position += 1;
                    if let Some(start) = find_unescaped(&lines[idx], &token, 0) {
                        let value = escape(value);
                        lines[idx] = splice(&lines[idx], &value, start, start + token.len());
                    }
                }
                Replacement::Message(sub) => {
                    let token = format!("%{position}%");
                    position += 1;
                    if let Some(start) = find_unescaped(&lines[idx], &token, 0) {
                        let end = start + token.len();
                        if sub.inline {
                            let value = sub.single_with(provider, limit)?;
                            lines[idx] = splice(&lines[idx], &value, start, end);
                        } else {
                            let start_diff = lines.len() as isize - i;
                            sub.resolve_with(provider, limit)?;
                            let sub_lines = sub.raw_lines().to_vec();
                            insert_lines(lines, &sub_lines, idx, start, end);
                            i = lines.len() as isize - start_diff;
                            spliced = true;
                        }
                    }
                }
            }
            // The line was split; the pieces are picked up by the next pass.
            if spliced {
                break;
            }
        }
        i += 1;
    }
    Ok(())
}

/// Substitutes every named variable the capability answers on line `i`.
///
/// Returns the adjusted line index when an answer was a multi-line message
/// and the line was split, `None` otherwise.
fn named_variables(
    lines: &mut Vec<String>,
    i: isize,
    capability: &dyn ReplacementProvider,
    provider: &dyn MessageProvider,
    limit: &mut Limit,
) -> Result<Option<isize>, LimitReached> {
    let idx = i as usize;
    let mut from = 0;
    loop {
        let (start, end) = {
            let line = &lines[idx];
            match NAMED_VARIABLE.find_at(line, from) {
                None => return Ok(None),
                Some(found) => (found.start(), found.end()),
            }
        };
        if is_escaped(&lines[idx], start) {
            from = end;
            continue;
        }

        let name = lines[idx][start + 1..end - 1].to_string();
        match capability.provide_replacement(&name) {
            None => from = end,
            Some(Provided::Text(value)) => {
                let value = escape(&value);
                lines[idx] = splice(&lines[idx], &value, start, end);
                from = start + value.len();
            }
            Some(Provided::Message(mut sub)) => {
                if sub.inline {
                    let value = sub.single_with(provider, limit)?;
                    lines[idx] = splice(&lines[idx], &value, start, end);
                    from = start + value.len();
                } else {
                    let start_diff = lines.len() as isize - i;
                    sub.resolve_with(provider, limit)?;
                    let sub_lines = sub.raw_lines().to_vec();
                    insert_lines(lines, &sub_lines, idx, start, end);
                    return Ok(Some(lines.len() as isize - start_diff));
                }
            }
        }
    }
}

/// Finds the next unescaped occurrence of `token` at or after `from`.
fn find_unescaped(line: &str, token: &str, mut from: usize) -> Option<usize> {
    while let Some(at) = line.get(from..).and_then(|rest| rest.find(token)) {
        let start = from + at;
        if is_escaped(line, start) {
            from = start + token.len();
            continue;
        }
        return Some(start);
    }
    None
}

/// Replaces `base[start..end]` with `insert`.
fn splice(base: &str, insert: &str, start: usize, end: usize) -> String {
    let mut out = String::with_capacity(base.len() - (end - start) + insert.len());
    out.push_str(&base[..start]);
    out.push_str(insert);
    out.push_str(&base[end..]);
    out
}

/// Splices a multi-line insert into `lines`, replacing `lines[index][start..end]`.
///
/// The replaced line is split into a prefix and a suffix line as needed.
/// Interactive declaration lines that trailed it are re-attached after every
/// resulting piece so their click/hover behavior still covers all of them.
/// A declaration line itself cannot be split over lines, so an insert into
/// one is flattened through the plain renderer instead.
fn insert_lines(lines: &mut Vec<String>, insert: &[String], index: usize, start: usize, end: usize) {
    if index >= lines.len() {
        return;
    }
    let content = lines.remove(index);
    if start > content.len() || end > content.len() {
        lines.insert(index, content);
        return;
    }

    if is_interactive_line(&content) {
        let flattened = plain::render(&parse(insert));
        let mut rebuilt = String::with_capacity(content.len() + flattened.len());
        rebuilt.push_str(&content[..start]);
        rebuilt.push_str(&flattened);
        rebuilt.push_str(&content[end..]);
        lines.insert(index, rebuilt);
        return;
    }

    let mut declarations = Vec::new();
    while index < lines.len() && is_interactive_line(&lines[index]) {
        declarations.push(lines.remove(index));
    }

    let mut at = index;
    if start > 0 {
        lines.insert(at, content[..start].to_string());
        at += 1;
        lines.splice(at..at, declarations.iter().cloned());
        at += declarations.len();
    }
    lines.splice(at..at, insert.iter().cloned());
    at += insert.len();
    lines.splice(at..at, declarations.iter().cloned());
    at += declarations.len();
    if end < content.len() {
        lines.insert(at, content[end..].to_string());
        at += 1;
        lines.splice(at..at, declarations.iter().cloned());
    }
}
