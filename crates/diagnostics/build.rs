//! Build script for generating the builtin diagnostic catalog at compile time.
//!
//! This script reads `spec/diagnostics.jsonc` and generates Rust files:
//! - `generated_codes.rs`: one `DiagnosticCode` constant per diagnostic
//! - `generated_catalog.rs`: the static slice of builtin entries
//! - `generated_explain.rs`: a match expression mapping ids to their descriptions
//!
//! Any defect in the catalog (duplicate ids, malformed templates, ...) fails
//! the build so it can never reach the runtime registry.

use std::env;
use std::fs;
use std::path::Path;

use gql_validator_jsonc::to_json;

#[allow(dead_code, unreachable_pub)]
#[path = "src/syntax.rs"]
mod syntax;

#[allow(dead_code, unreachable_pub)]
#[path = "src/catalog_check.rs"]
mod catalog_check;

use catalog_check::{RawEntry, check_catalog, severity_variant};

const HEADER: &str = "// Auto-generated from spec/diagnostics.jsonc. DO NOT EDIT.\n\n";

struct CatalogEntry<'a> {
    raw: RawEntry<'a>,
    summary: &'a str,
    description: &'a str,
}

fn main() {
    let spec_path = Path::new("spec/diagnostics.jsonc");
    println!("cargo:rerun-if-changed={}", spec_path.display());
    println!("cargo:rerun-if-changed=src/syntax.rs");
    println!("cargo:rerun-if-changed=src/catalog_check.rs");

    let raw = fs::read_to_string(spec_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", spec_path.display()));

    let spec: serde_json::Value = serde_json::from_str(&to_json(&raw))
        .unwrap_or_else(|e| panic!("failed to parse {} as JSON: {e}", spec_path.display()));

    let diagnostics = spec["diagnostics"]
        .as_array()
        .expect("diagnostics.jsonc: expected `diagnostics` array");

    let entries: Vec<CatalogEntry<'_>> = diagnostics
        .iter()
        .enumerate()
        .map(|(i, entry)| read_entry(i, entry))
        .collect();

    let rows: Vec<RawEntry<'_>> = entries.iter().map(|entry| entry.raw).collect();
    if let Err(err) = check_catalog(&rows) {
        panic!("{err}");
    }

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let out_path = Path::new(&out_dir);

    // ── generated_codes.rs ──────────────────────────────────────────────
    let mut codes = String::from(HEADER);
    for entry in &entries {
        let RawEntry { id, const_name, .. } = entry.raw;
        codes.push_str(&format!("/// `{id}`: {}\n", entry.summary));
        codes.push_str(&format!(
            "pub const {const_name}: DiagnosticCode = DiagnosticCode::new(\"{id}\");\n\n"
        ));
    }
    fs::write(out_path.join("generated_codes.rs"), &codes)
        .expect("failed to write generated_codes.rs");

    // ── generated_catalog.rs ────────────────────────────────────────────
    let mut catalog = String::from(HEADER);
    catalog.push_str("static BUILTIN: &[BuiltinEntry] = &[\n");
    for entry in &entries {
        let RawEntry {
            const_name,
            severity,
            template,
            ..
        } = entry.raw;
        // Checked above.
        let variant = severity_variant(severity).unwrap_or_default();
        catalog.push_str("    BuiltinEntry {\n");
        catalog.push_str(&format!("        code: codes::{const_name},\n"));
        catalog.push_str(&format!("        name: \"{const_name}\",\n"));
        catalog.push_str(&format!("        severity: Severity::{variant},\n"));
        catalog.push_str(&format!(
            "        summary: \"{}\",\n",
            escape_rust_string_literal(entry.summary)
        ));
        catalog.push_str(&format!(
            "        template: \"{}\",\n",
            escape_rust_string_literal(template)
        ));
        catalog.push_str("    },\n");
    }
    catalog.push_str("];\n");
    fs::write(out_path.join("generated_catalog.rs"), &catalog)
        .expect("failed to write generated_catalog.rs");

    // ── generated_explain.rs ────────────────────────────────────────────
    let mut explain = String::from("match id {\n");
    for entry in &entries {
        explain.push_str(&format!(
            "    \"{}\" => Some(\"{}\"),\n",
            entry.raw.id,
            escape_rust_string_literal(entry.description)
        ));
    }
    explain.push_str("    _ => None,\n}\n");
    fs::write(out_path.join("generated_explain.rs"), &explain)
        .expect("failed to write generated_explain.rs");
}

fn read_entry(i: usize, entry: &serde_json::Value) -> CatalogEntry<'_> {
    let id = entry["id"]
        .as_str()
        .unwrap_or_else(|| panic!("diagnostics[{i}] missing `id`"));
    CatalogEntry {
        raw: RawEntry {
            id,
            const_name: str_field(entry, i, id, "constName"),
            severity: str_field(entry, i, id, "severity"),
            template: str_field(entry, i, id, "template"),
        },
        summary: str_field(entry, i, id, "summary"),
        description: str_field(entry, i, id, "description"),
    }
}

fn str_field<'a>(entry: &'a serde_json::Value, i: usize, id: &str, name: &str) -> &'a str {
    entry[name]
        .as_str()
        .unwrap_or_else(|| panic!("diagnostics[{i}] (id={id}) missing `{name}`"))
}

fn escape_rust_string_literal(value: &str) -> String {
    value.chars().flat_map(char::escape_default).collect()
}
