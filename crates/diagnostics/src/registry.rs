//! The code → template table.
//!
//! Tables are assembled with a [`RegistryBuilder`] and frozen into a
//! [`DiagnosticRegistry`], which only offers read access. The builtin table
//! lives behind [`crate::registry()`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::RegistryError;
use crate::template::Template;
use crate::{Diagnostic, DiagnosticCode, Severity};

/// One row of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticEntry {
    code: DiagnosticCode,
    severity: Severity,
    template: Template,
}

impl DiagnosticEntry {
    /// The stable code of this entry.
    pub fn code(&self) -> DiagnosticCode {
        self.code
    }

    /// Default severity reported for this code.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The parsed message template.
    pub fn template(&self) -> &Template {
        &self.template
    }
}

/// Collects entries before they are frozen into a [`DiagnosticRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: BTreeMap<DiagnosticCode, DiagnosticEntry>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `code` with its severity and message template.
    ///
    /// Fails if `code` is already present or if `template` does not parse.
    /// Nothing is added when an error is returned.
    pub fn register(
        &mut self,
        code: DiagnosticCode,
        severity: Severity,
        template: &'static str,
    ) -> Result<&mut Self, RegistryError> {
        if self.entries.contains_key(&code) {
            return Err(RegistryError::DuplicateCode { code });
        }
        let template = Template::parse(template)
            .map_err(|source| RegistryError::MalformedTemplate { code, source })?;
        self.entries.insert(
            code,
            DiagnosticEntry {
                code,
                severity,
                template,
            },
        );
        Ok(self)
    }

    /// Freeze the collected entries.
    pub fn build(self) -> DiagnosticRegistry {
        DiagnosticRegistry {
            entries: self.entries,
        }
    }
}

/// Immutable mapping from [`DiagnosticCode`] to message template.
///
/// Every lookup takes anything that reads as a code string, so both
/// `codes::` constants and ids received from elsewhere (e.g. `"ERROR_103"`)
/// work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticRegistry {
    entries: BTreeMap<DiagnosticCode, DiagnosticEntry>,
}

impl DiagnosticRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Look up the full entry for `code`.
    pub fn entry(&self, code: impl AsRef<str>) -> Result<&DiagnosticEntry, RegistryError> {
        let code = code.as_ref();
        self.entries
            .get(code)
            .ok_or_else(|| RegistryError::UnknownCode {
                code: code.to_owned(),
            })
    }

    /// The raw template registered for `code`, unchanged.
    pub fn get(&self, code: impl AsRef<str>) -> Result<&'static str, RegistryError> {
        self.entry(code).map(|entry| entry.template.source())
    }

    /// Severity registered for `code`.
    pub fn severity(&self, code: impl AsRef<str>) -> Result<Severity, RegistryError> {
        self.entry(code).map(DiagnosticEntry::severity)
    }

    /// Render the message for `code`, substituting `args` into its placeholders.
    ///
    /// `args[n]` replaces every `{n}`. The argument count must match the
    /// template exactly.
    pub fn render(&self, code: impl AsRef<str>, args: &[&str]) -> Result<String, RegistryError> {
        render_entry(self.entry(code)?, args)
    }

    /// Render `code` into a [`Diagnostic`] carrying the registered severity.
    ///
    /// The returned diagnostic has no span or context; attach them with
    /// [`Diagnostic::with_span`] and [`Diagnostic::with_context`].
    pub fn diagnostic(
        &self,
        code: impl AsRef<str>,
        args: &[&str],
    ) -> Result<Diagnostic, RegistryError> {
        let entry = self.entry(code)?;
        let message = render_entry(entry, args)?;
        Ok(Diagnostic::new(entry.code, entry.severity, message, None))
    }

    /// Whether `code` is registered.
    pub fn contains(&self, code: impl AsRef<str>) -> bool {
        self.entries.contains_key(code.as_ref())
    }

    /// Number of registered codes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, ordered by code.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &DiagnosticEntry> {
        self.entries.values()
    }

    /// All registered codes, in order.
    pub fn codes(&self) -> impl ExactSizeIterator<Item = DiagnosticCode> + '_ {
        self.entries.keys().copied()
    }
}

fn render_entry(entry: &DiagnosticEntry, args: &[&str]) -> Result<String, RegistryError> {
    log::trace!("rendering {} with {} argument(s)", entry.code, args.len());
    entry
        .template
        .render(args)
        .ok_or(RegistryError::ArgumentMismatch {
            code: entry.code,
            expected: entry.template.arity(),
            actual: args.len(),
        })
}
