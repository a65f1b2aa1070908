//! The bounded rewrite budget.
//!
//! Template expansion is a fixed-point rewrite and nothing stops a message
//! from (indirectly) including itself, so every top-level expansion owns a
//! [`Limit`]: a budget of rewrite rounds threaded by mutable reference
//! through the recursive expansion calls. When the budget runs out the
//! expansion stops where it is, a diagnostic is emitted exactly once, and
//! the partially expanded message is returned as the best-effort result.
//!
//! A depth guard backs the budget up: expansion recursing deeper than
//! [`MAX_DEPTH`] levels is treated exactly like budget exhaustion, so a
//! self-including message can never take the stack down.

use crate::error::LimitReached;

/// Rewrite rounds available to one top-level expansion.
pub const REPLACEMENT_LIMIT: u32 = 100;

/// Maximum nesting depth of sub-message expansions.
pub const MAX_DEPTH: u32 = 64;

/// Characters of raw message kept for the diagnostic.
pub const PREVIEW_LENGTH: usize = 200;

/// Budget state for one top-level expansion. Not shared between expansions.
#[derive(Debug)]
pub struct Limit {
    left: u32,
    depth: u32,
    notified: bool,
    key: Option<String>,
    preview: String,
}

impl Limit {
    /// A fresh budget. `key` and `preview` identify the originating message
    /// in the diagnostic.
    pub fn new(count: u32, key: Option<String>, preview: String) -> Self {
        Limit {
            left: count,
            depth: 0,
            notified: false,
            key,
            preview,
        }
    }

    /// Spends one round. Errors when the budget is gone.
    pub fn decrease(&mut self) -> Result<(), LimitReached> {
        self.left = self.left.saturating_sub(1);
        if self.left == 0 {
            self.notify();
            return Err(self.error());
        }
        Ok(())
    }

    /// Gives one round back.
    pub fn increase(&mut self) {
        self.left += 1;
    }

    /// True once the budget is exhausted.
    pub fn reached(&self) -> bool {
        self.left == 0
    }

    /// True once the one-shot diagnostic has been emitted.
    pub fn notified(&self) -> bool {
        self.notified
    }

    /// Enters one level of sub-message expansion.
    ///
    /// Exceeding [`MAX_DEPTH`] forces the budget to zero and reports the
    /// same condition as an exhausted budget.
    pub(crate) fn enter(&mut self) -> Result<(), LimitReached> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            self.left = 0;
            self.notify();
            return Err(self.error());
        }
        Ok(())
    }

    /// Leaves one level of sub-message expansion.
    pub(crate) fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn error(&self) -> LimitReached {
        LimitReached {
            key: self.key.clone(),
        }
    }

    fn notify(&mut self) {
        if self.notified {
            return;
        }
        self.notified = true;
        tracing::error!(
            key = self.key.as_deref().unwrap_or("<none>"),
            preview = %self.preview,
            "replacement budget exhausted, the message most likely includes itself as a replacement"
        );
    }
}
