//! Validation of `spec/diagnostics.jsonc` rows.
//!
//! `build.rs` compiles this file through `#[path]` and refuses to generate
//! code for a catalog that fails [`check_catalog`]. The library only builds
//! it for tests.

use std::collections::HashSet;

use crate::syntax::{self, TemplateError};

/// The fields of one catalog row that [`check_catalog`] inspects.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawEntry<'a> {
    pub(crate) id: &'a str,
    pub(crate) const_name: &'a str,
    pub(crate) severity: &'a str,
    pub(crate) template: &'a str,
}

/// Why a catalog was rejected. `index` is the row's position in the
/// `diagnostics` array.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum CatalogError {
    #[error("diagnostics[{index}]: duplicate id '{id}'")]
    DuplicateId { index: usize, id: String },

    #[error("diagnostics[{index}] (id={id}): duplicate constName '{const_name}'")]
    DuplicateConstName {
        index: usize,
        id: String,
        const_name: String,
    },

    #[error("diagnostics[{index}]: id '{id}' must be uppercase letters, digits and underscores")]
    InvalidId { index: usize, id: String },

    #[error(
        "diagnostics[{index}] (id={id}): constName '{const_name}' is not a valid SCREAMING_SNAKE_CASE identifier"
    )]
    InvalidConstName {
        index: usize,
        id: String,
        const_name: String,
    },

    #[error("diagnostics[{index}] (id={id}): invalid severity '{severity}'")]
    UnknownSeverity {
        index: usize,
        id: String,
        severity: String,
    },

    #[error("diagnostics[{index}] (id={id}): malformed template: {source}")]
    MalformedTemplate {
        index: usize,
        id: String,
        #[source]
        source: TemplateError,
    },
}

/// `Severity` variant named by a catalog severity string.
pub(crate) fn severity_variant(name: &str) -> Option<&'static str> {
    match name {
        "error" => Some("Error"),
        "warn" => Some("Warn"),
        "info" => Some("Info"),
        _ => None,
    }
}

/// Check every row on its own, then ids and const names across rows.
///
/// Stops at the first problem, in row order.
pub(crate) fn check_catalog(entries: &[RawEntry<'_>]) -> Result<(), CatalogError> {
    let mut seen_ids = HashSet::new();
    let mut seen_names = HashSet::new();
    for (index, entry) in entries.iter().enumerate() {
        check_entry(index, entry)?;
        if !seen_ids.insert(entry.id) {
            return Err(CatalogError::DuplicateId {
                index,
                id: entry.id.to_owned(),
            });
        }
        if !seen_names.insert(entry.const_name) {
            return Err(CatalogError::DuplicateConstName {
                index,
                id: entry.id.to_owned(),
                const_name: entry.const_name.to_owned(),
            });
        }
    }
    Ok(())
}

fn check_entry(index: usize, entry: &RawEntry<'_>) -> Result<(), CatalogError> {
    let id = entry.id;
    if !is_screaming_snake(id) {
        return Err(CatalogError::InvalidId {
            index,
            id: id.to_owned(),
        });
    }
    if !is_screaming_snake(entry.const_name) {
        return Err(CatalogError::InvalidConstName {
            index,
            id: id.to_owned(),
            const_name: entry.const_name.to_owned(),
        });
    }
    if severity_variant(entry.severity).is_none() {
        return Err(CatalogError::UnknownSeverity {
            index,
            id: id.to_owned(),
            severity: entry.severity.to_owned(),
        });
    }
    syntax::parse(entry.template).map_err(|source| CatalogError::MalformedTemplate {
        index,
        id: id.to_owned(),
        source,
    })?;
    Ok(())
}

fn is_screaming_snake(name: &str) -> bool {
    name.as_bytes().first().is_some_and(u8::is_ascii_uppercase)
        && name
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_entries;

    fn row<'a>(id: &'a str, const_name: &'a str) -> RawEntry<'a> {
        RawEntry {
            id,
            const_name,
            severity: "error",
            template: "Invalid GraphQL field type `{0}`",
        }
    }

    #[test]
    fn builtin_catalog_passes() {
        let severities: Vec<String> = builtin_entries()
            .iter()
            .map(|entry| entry.severity.to_string())
            .collect();
        let rows: Vec<RawEntry<'_>> = builtin_entries()
            .iter()
            .zip(&severities)
            .map(|(entry, severity)| RawEntry {
                id: entry.code.as_str(),
                const_name: entry.name,
                severity,
                template: entry.template,
            })
            .collect();
        assert_eq!(check_catalog(&rows), Ok(()));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let rows = [
            row("ERROR_101", "REMOTE_METHOD_IN_SERVICE_CLASS"),
            row("ERROR_101", "INVALID_FIELD_TYPE"),
        ];
        let err = check_catalog(&rows).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateId {
                index: 1,
                id: "ERROR_101".into()
            }
        );
        assert_eq!(err.to_string(), "diagnostics[1]: duplicate id 'ERROR_101'");
    }

    #[test]
    fn duplicate_const_name_is_rejected() {
        let rows = [
            row("ERROR_101", "INVALID_FIELD_TYPE"),
            row("ERROR_102", "INVALID_FIELD_TYPE"),
        ];
        assert!(matches!(
            check_catalog(&rows),
            Err(CatalogError::DuplicateConstName { index: 1, const_name, .. })
                if const_name == "INVALID_FIELD_TYPE"
        ));
    }

    #[test]
    fn lowercase_const_name_is_rejected() {
        let rows = [row("ERROR_102", "invalid_field_type")];
        let err = check_catalog(&rows).unwrap_err();
        assert_eq!(
            err.to_string(),
            "diagnostics[0] (id=ERROR_102): constName 'invalid_field_type' is not a valid SCREAMING_SNAKE_CASE identifier"
        );
    }

    #[test]
    fn const_name_must_start_with_a_letter() {
        assert!(matches!(
            check_catalog(&[row("ERROR_102", "_FIELD")]),
            Err(CatalogError::InvalidConstName { .. })
        ));
        assert!(matches!(
            check_catalog(&[row("ERROR_102", "")]),
            Err(CatalogError::InvalidConstName { .. })
        ));
    }

    #[test]
    fn malformed_id_is_rejected() {
        assert_eq!(
            check_catalog(&[row("error-102", "INVALID_FIELD_TYPE")]),
            Err(CatalogError::InvalidId {
                index: 0,
                id: "error-102".into()
            })
        );
    }

    #[test]
    fn unknown_severity_is_rejected() {
        let rows = [RawEntry {
            severity: "fatal",
            ..row("ERROR_102", "INVALID_FIELD_TYPE")
        }];
        let err = check_catalog(&rows).unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownSeverity {
                index: 0,
                id: "ERROR_102".into(),
                severity: "fatal".into()
            }
        );
        assert_eq!(
            err.to_string(),
            "diagnostics[0] (id=ERROR_102): invalid severity 'fatal'"
        );
    }

    #[test]
    fn template_with_skipped_index_is_rejected() {
        let rows = [RawEntry {
            template: "{1}",
            ..row("ERROR_102", "INVALID_FIELD_TYPE")
        }];
        let err = check_catalog(&rows).unwrap_err();
        assert_eq!(
            err,
            CatalogError::MalformedTemplate {
                index: 0,
                id: "ERROR_102".into(),
                source: TemplateError::SkippedIndex { missing: 0 },
            }
        );
        assert_eq!(
            err.to_string(),
            "diagnostics[0] (id=ERROR_102): malformed template: argument {0} is never used although higher indices are"
        );
    }

    #[test]
    fn severity_names_map_to_variants() {
        assert_eq!(severity_variant("error"), Some("Error"));
        assert_eq!(severity_variant("warn"), Some("Warn"));
        assert_eq!(severity_variant("info"), Some("Info"));
        assert_eq!(severity_variant("Error"), None);
    }
}
