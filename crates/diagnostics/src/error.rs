//! Typed errors returned by the diagnostic registry.

use crate::DiagnosticCode;
use crate::template::TemplateError;

/// Failures raised while building or querying a [`crate::DiagnosticRegistry`].
///
/// None of these are recoverable at runtime: each one points at a defect in
/// the diagnostic table or in the code that calls it.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The same code was registered twice.
    #[error("diagnostic code {code} is already registered")]
    DuplicateCode {
        /// The code that was registered a second time.
        code: DiagnosticCode,
    },

    /// A lookup used a code that is not in the registry.
    #[error("unknown diagnostic code: {code}")]
    UnknownCode {
        /// The code as supplied by the caller.
        code: String,
    },

    /// The number of render arguments differs from the template's placeholders.
    #[error("diagnostic {code} expects {expected} argument(s), got {actual}")]
    ArgumentMismatch {
        /// The code being rendered.
        code: DiagnosticCode,
        /// Number of arguments the template takes.
        expected: usize,
        /// Number of arguments supplied.
        actual: usize,
    },

    /// The template given at registration does not parse.
    #[error("malformed template for diagnostic {code}: {source}")]
    MalformedTemplate {
        /// The code whose template was rejected.
        code: DiagnosticCode,
        /// What is wrong with the template.
        #[source]
        source: TemplateError,
    },
}
