//! JSONC normalisation for build scripts.
//!
//! The diagnostic catalog is authored as JSONC: plain JSON plus `//` and
//! `/* ... */` comments and trailing commas. [`to_json`] rewrites it into
//! input that `serde_json` accepts. String literals (including escaped quotes)
//! are never modified.

/// Remove `//` line comments and `/* */` block comments outside string literals.
///
/// Newlines are kept, including those inside block comments, so line numbers
/// reported by the JSON parser still point at the original source. An
/// unterminated block comment swallows the rest of the input.
#[must_use]
pub fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        let lookahead = chars.peek().copied();
        match (c, lookahead) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                while chars.next_if(|&next| next != '\n').is_some() {}
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        out.push('\n');
                    }
                    prev = next;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }
    out
}

/// Drop every `,` whose next non-whitespace character is `}` or `]`.
///
/// Expects comment-free input; run [`strip_comments`] first.
#[must_use]
pub fn strip_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;
    // Byte offset in `out` of the last comma not yet followed by a value.
    let mut pending_comma: Option<usize> = None;

    for c in input.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            out.push(c);
            continue;
        }

        match c {
            '}' | ']' => {
                if let Some(at) = pending_comma.take() {
                    out.remove(at);
                }
            }
            c if c.is_whitespace() => {}
            _ => pending_comma = None,
        }
        match c {
            '"' => in_string = true,
            ',' => pending_comma = Some(out.len()),
            _ => {}
        }
        out.push(c);
    }
    out
}

/// Convert JSONC text into strict JSON.
#[must_use]
pub fn to_json(input: &str) -> String {
    strip_trailing_commas(&strip_comments(input))
}
