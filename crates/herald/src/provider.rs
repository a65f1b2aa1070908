//! Collaborator traits at the edges of the expansion engine.
//!
//! [`MessageProvider`] resolves message keys (`%lang:key%`) to raw lines,
//! typically backed by a language store the host owns. [`ReplacementProvider`]
//! answers named variables (`%player%`) on demand. Both are object-safe so
//! hosts can plug in whatever they have.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::message::Message;

/// Resolves message keys to raw lines.
pub trait MessageProvider {
    /// Lines for the key; empty when the key is unknown.
    fn get_lines(&self, key: &str) -> Vec<String>;
}

/// A plain map works as a message store.
impl MessageProvider for HashMap<String, Vec<String>> {
    fn get_lines(&self, key: &str) -> Vec<String> {
        self.get(key).cloned().unwrap_or_default()
    }
}

/// The answer of a [`ReplacementProvider`].
#[derive(Debug, Clone)]
pub enum Provided {
    /// Plain text; escaped before splicing so it cannot activate markup.
    Text(String),
    /// A sub-message, spliced like a positional message replacement.
    Message(Message),
}

impl From<String> for Provided {
    fn from(value: String) -> Self {
        Provided::Text(value)
    }
}

impl From<&str> for Provided {
    fn from(value: &str) -> Self {
        Provided::Text(value.to_string())
    }
}

impl From<Message> for Provided {
    fn from(value: Message) -> Self {
        Provided::Message(value)
    }
}

/// A host capability answering named variables.
pub trait ReplacementProvider {
    /// The replacement for `variable`, or `None` when this provider does not
    /// know it (the next provider in argument order is asked).
    fn provide_replacement(&self, variable: &str) -> Option<Provided>;
}

/// Closures work as providers.
impl<F> ReplacementProvider for F
where
    F: Fn(&str) -> Option<Provided>,
{
    fn provide_replacement(&self, variable: &str) -> Option<Provided> {
        self(variable)
    }
}

/// One replacement argument for a message.
///
/// Literals and sub-messages consume positional indices (`%0%`, `%1%`, ...)
/// in argument order; providers answer named variables and do not consume
/// an index.
#[derive(Clone)]
pub enum Replacement {
    /// Replaces its positional token inline, markup-escaped.
    Literal(String),
    /// Replaces its positional token with a whole message.
    Message(Message),
    /// Answers named variables.
    Provider(Arc<dyn ReplacementProvider + Send + Sync>),
}

impl Replacement {
    /// A literal from anything printable.
    pub fn literal(value: impl ToString) -> Self {
        Replacement::Literal(value.to_string())
    }

    /// Wraps a provider implementation.
    pub fn provider(provider: impl ReplacementProvider + Send + Sync + 'static) -> Self {
        Replacement::Provider(Arc::new(provider))
    }

    /// A provider answering exactly one variable, case-insensitively.
    pub fn named(name: impl Into<String>, value: impl ToString) -> Self {
        Replacement::provider(Named {
            name: name.into(),
            value: value.to_string(),
        })
    }

    /// A provider that strips `prefix` from the variable before delegating.
    pub fn prefixed(
        prefix: impl Into<String>,
        inner: Arc<dyn ReplacementProvider + Send + Sync>,
    ) -> Self {
        Replacement::Provider(Arc::new(Prefixed {
            prefix: prefix.into(),
            inner,
        }))
    }
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Replacement::Message(message) => f.debug_tuple("Message").field(message).finish(),
            Replacement::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

impl From<&str> for Replacement {
    fn from(value: &str) -> Self {
        Replacement::literal(value)
    }
}

impl From<String> for Replacement {
    fn from(value: String) -> Self {
        Replacement::Literal(value)
    }
}

impl From<Message> for Replacement {
    fn from(value: Message) -> Self {
        Replacement::Message(value)
    }
}

struct Named {
    name: String,
    value: String,
}

impl ReplacementProvider for Named {
    fn provide_replacement(&self, variable: &str) -> Option<Provided> {
        variable
            .eq_ignore_ascii_case(&self.name)
            .then(|| Provided::Text(self.value.clone()))
    }
}

struct Prefixed {
    prefix: String,
    inner: Arc<dyn ReplacementProvider + Send + Sync>,
}

impl ReplacementProvider for Prefixed {
    fn provide_replacement(&self, variable: &str) -> Option<Provided> {
        let rest = variable.strip_prefix(&self.prefix)?;
        self.inner.provide_replacement(rest)
    }
}
