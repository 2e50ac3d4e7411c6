//! Diagnostics for the GraphQL schema validator.
//!
//! Provides the [`DiagnosticRegistry`] that maps stable [`DiagnosticCode`]s
//! to message templates, plus the [`Diagnostic`], [`Severity`] and [`Span`]
//! types the validator reports with. Builtin codes are defined in the
//! [`codes`] module and served by the process-wide [`registry()`].
//!
//! ```
//! use gql_validator_diagnostics::{codes, registry};
//!
//! let message = registry()
//!     .render(codes::INVALID_INPUT_PARAMETER_TYPE, &["map<json>"])
//!     .unwrap();
//! assert_eq!(message, "Invalid GraphQL input parameter type `map<json>`");
//! ```

#![warn(missing_docs)]

/// The builtin catalog compiled from `spec/diagnostics.jsonc`.
pub mod catalog;
#[cfg(test)]
mod catalog_check;
/// Diagnostic code constants auto-generated from the catalog.
pub mod codes;
mod error;
mod registry;
mod syntax;
/// Positional message templates.
pub mod template;

pub use error::RegistryError;
pub use registry::{DiagnosticEntry, DiagnosticRegistry, RegistryBuilder};

use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, Cow};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

// ── DiagnosticCode ───────────────────────────────────────────────────────

/// Stable identifier of a diagnostic (e.g. `"ERROR_114"`).
///
/// A published code keeps its meaning forever; downstream tooling matches on
/// it. Serialized as the bare string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DiagnosticCode(&'static str);

impl DiagnosticCode {
    /// Wrap a code string.
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    /// The code as a string slice.
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl AsRef<str> for DiagnosticCode {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl Borrow<str> for DiagnosticCode {
    fn borrow(&self) -> &str {
        self.0
    }
}

impl PartialEq<&str> for DiagnosticCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<DiagnosticCode> for Cow<'static, str> {
    fn from(code: DiagnosticCode) -> Self {
        Cow::Borrowed(code.0)
    }
}

// ── Severity / Span ──────────────────────────────────────────────────────

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// Hard error: the schema is invalid.
    Error,
    /// Warning: the schema may not behave as intended.
    Warn,
    /// Informational note.
    Info,
}

/// Byte span in the validated source, supplied by the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character (0-based).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }

    /// Create a zero-width span at the given position.
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }
}

// ── Diagnostic ───────────────────────────────────────────────────────────

/// A finished diagnostic produced by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Diagnostic code (e.g., `"ERROR_103"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Optional byte span in the source that this diagnostic relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Machine-readable context for tooling. Keys and values are free-form strings.
    /// Serialized only when present, in key order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Shorthand for an `Error` diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Error, message, span)
    }

    /// Shorthand for a `Warn` diagnostic.
    pub fn warn(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Warn, message, span)
    }

    /// Shorthand for an `Info` diagnostic.
    pub fn info(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Info, message, span)
    }

    /// Attach a source span (builder pattern).
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach machine-readable context metadata (builder pattern).
    ///
    /// Keys are short descriptors like `"type"`, `"field"` or `"service"`.
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Returns the long-form explanation for this diagnostic's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)
    }
}

// ── Process-wide registry ────────────────────────────────────────────────

static REGISTRY: LazyLock<DiagnosticRegistry> = LazyLock::new(|| {
    let registry = catalog::builtin_registry()
        .unwrap_or_else(|err| panic!("builtin diagnostic catalog is invalid: {err}"));
    log::debug!("built diagnostic registry with {} codes", registry.len());
    registry
});

/// The registry holding every builtin code.
///
/// Built on first use and read-only afterwards; safe to share across threads.
pub fn registry() -> &'static DiagnosticRegistry {
    &REGISTRY
}

/// Returns the long-form explanation for a diagnostic code, if known.
///
/// Auto-generated from `spec/diagnostics.jsonc` at build time.
pub fn explain(id: &str) -> Option<&'static str> {
    include!(concat!(env!("OUT_DIR"), "/generated_explain.rs"))
}
