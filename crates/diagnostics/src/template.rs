//! Positional message templates.
//!
//! A template is plain text with `{N}` placeholders, where `N` is a
//! zero-based argument index. `{{` and `}}` stand for literal braces.
//! Indices may repeat and appear in any order, but every index below the
//! highest one must be used at least once, so the number of arguments a
//! template takes is always `max index + 1`.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::syntax::{self, Segment};
pub use crate::syntax::TemplateError;

/// A parsed message template.
///
/// Keeps the original source text so it can be handed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: &'static str,
    segments: Vec<Segment>,
    arity: usize,
}

impl Template {
    /// Parse `source` into a template.
    pub fn parse(source: &'static str) -> Result<Self, TemplateError> {
        let syntax::Parsed { segments, arity } = syntax::parse(source)?;
        Ok(Self {
            source,
            segments,
            arity,
        })
    }

    /// The template text exactly as it was parsed.
    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Number of arguments [`Template::render`] expects.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Substitute `args` into the placeholders.
    ///
    /// Returns `None` when `args.len()` differs from [`Template::arity`].
    pub fn render(&self, args: &[&str]) -> Option<String> {
        if args.len() != self.arity {
            return None;
        }
        let capacity = self.source.len() + args.iter().map(|a| a.len()).sum::<usize>();
        let mut out = String::with_capacity(capacity);
        for segment in &self.segments {
            match segment {
                Segment::Text(range) => out.push_str(&self.source[range.clone()]),
                Segment::Arg(index) => out.push_str(args[*index]),
            }
        }
        Some(out)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source)
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.source)
    }
}
