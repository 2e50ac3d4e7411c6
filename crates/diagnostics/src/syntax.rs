//! Placeholder syntax of message templates.
//!
//! Compiled into both the library and `build.rs` (via `#[path]`), so the
//! build-time catalog check and [`crate::template::Template::parse`] accept
//! exactly the same templates.

use std::collections::BTreeSet;
use std::ops::Range;

/// Syntax error found while parsing a template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TemplateError {
    /// A `{` is not followed by an argument index or a second `{`.
    #[error("expected an argument index after `{{` at byte {offset}")]
    MissingIndex {
        /// Byte offset of the opening brace.
        offset: usize,
    },
    /// A placeholder index is not closed by `}`.
    #[error("unterminated placeholder starting at byte {offset}")]
    Unterminated {
        /// Byte offset of the opening brace.
        offset: usize,
    },
    /// A `}` appears outside a placeholder and is not doubled.
    #[error("unmatched `}}` at byte {offset}")]
    UnmatchedClose {
        /// Byte offset of the stray brace.
        offset: usize,
    },
    /// The placeholder index does not fit in `usize`.
    #[error("argument index starting at byte {offset} is too large")]
    IndexOverflow {
        /// Byte offset of the opening brace.
        offset: usize,
    },
    /// A higher index is used while a lower one never appears.
    #[error("argument {{{missing}}} is never used although higher indices are")]
    SkippedIndex {
        /// The lowest unused index.
        missing: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Byte range of literal text in the source.
    Text(Range<usize>),
    /// Positional argument index.
    Arg(usize),
}

/// A template split into literal text and argument slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Parsed {
    pub(crate) segments: Vec<Segment>,
    pub(crate) arity: usize,
}

/// Split `source` into segments and count the arguments it takes.
///
/// `{N}` is argument `N`, `{{` and `}}` are literal braces, and indices must
/// cover `0..arity` without gaps.
pub(crate) fn parse(source: &str) -> Result<Parsed, TemplateError> {
    let bytes = source.as_bytes();
    let mut segments = Vec::new();
    let mut indices = BTreeSet::new();
    let mut text_start = 0usize;
    let mut i = 0usize;

    let flush = |segments: &mut Vec<Segment>, range: Range<usize>| {
        if !range.is_empty() {
            segments.push(Segment::Text(range));
        }
    };

    while i < bytes.len() {
        match bytes[i] {
            open @ (b'{' | b'}') if bytes.get(i + 1) == Some(&open) => {
                // Keep one brace of the pair as literal text.
                flush(&mut segments, text_start..i + 1);
                i += 2;
                text_start = i;
            }
            b'{' => {
                flush(&mut segments, text_start..i);
                let digits = bytes[i + 1..]
                    .iter()
                    .take_while(|b| b.is_ascii_digit())
                    .count();
                if digits == 0 {
                    return Err(TemplateError::MissingIndex { offset: i });
                }
                let close = i + 1 + digits;
                if bytes.get(close) != Some(&b'}') {
                    return Err(TemplateError::Unterminated { offset: i });
                }
                let index: usize = source[i + 1..close]
                    .parse()
                    .map_err(|_| TemplateError::IndexOverflow { offset: i })?;
                indices.insert(index);
                segments.push(Segment::Arg(index));
                i = close + 1;
                text_start = i;
            }
            b'}' => return Err(TemplateError::UnmatchedClose { offset: i }),
            _ => i += 1,
        }
    }
    flush(&mut segments, text_start..bytes.len());

    if let Some(missing) = (0..).zip(&indices).find_map(|(k, &n)| (k != n).then_some(k)) {
        return Err(TemplateError::SkippedIndex { missing });
    }

    Ok(Parsed {
        segments,
        arity: indices.len(),
    })
}
