//! The builtin GraphQL validator diagnostics.
//!
//! Generated at build time from `spec/diagnostics.jsonc`. The build script
//! already rejects duplicate ids and malformed templates, so
//! [`builtin_registry`] only fails if that check is bypassed.

use crate::error::RegistryError;
use crate::registry::{DiagnosticRegistry, RegistryBuilder};
use crate::{DiagnosticCode, Severity, codes};

/// A catalog row as compiled into the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinEntry {
    /// Stable diagnostic code.
    pub code: DiagnosticCode,
    /// Name of the matching constant in [`crate::codes`].
    pub name: &'static str,
    /// Default severity.
    pub severity: Severity,
    /// One-line summary of when the diagnostic fires.
    pub summary: &'static str,
    /// Message template with `{N}` placeholders.
    pub template: &'static str,
}

include!(concat!(env!("OUT_DIR"), "/generated_catalog.rs"));

/// Every builtin entry, in catalog order.
pub fn builtin_entries() -> &'static [BuiltinEntry] {
    BUILTIN
}

/// Find the builtin entry for `id`.
pub fn lookup(id: &str) -> Option<&'static BuiltinEntry> {
    BUILTIN.iter().find(|entry| entry.code.as_str() == id)
}

/// Build a fresh registry holding every builtin entry.
pub fn builtin_registry() -> Result<DiagnosticRegistry, RegistryError> {
    let mut builder = RegistryBuilder::new();
    for entry in BUILTIN {
        builder.register(entry.code, entry.severity, entry.template)?;
    }
    Ok(builder.build())
}
