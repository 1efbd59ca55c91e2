//! Source Text Normalization
//!
//! Strips everything that could produce a false structural match before
//! pattern extraction runs:
//! - block comments (newlines inside them are kept)
//! - line comments
//! - string, text-block and char literal bodies (delimiters are kept)
//! - `import` and `package` lines
//!
//! Literals are tracked so comment markers inside them (`"http://x"`) are
//! left alone. Never fails; unterminated constructs run to end of input.
//!
//! @module trace/normalize

use once_cell::sync::Lazy;
use regex::Regex;

/// `import a.b.C;`, `import static a.b.C.*;`, `package a.b;`
static IMPORT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[\t ]*(?:import|package)\s[^;\n]*;?").unwrap()
});

/// Normalize raw source text for extraction
pub fn normalize(source: &str) -> String {
    let stripped = strip_comments_and_literals(source);
    IMPORT_LINE.replace_all(&stripped, "").into_owned()
}

/// Single pass over the bytes; all delimiters are ASCII so every cut lands
/// on a char boundary.
fn strip_comments_and_literals(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0usize;

    while i < bytes.len() {
        let b = bytes[i];

        if b == b'/' && i + 1 < bytes.len() {
            if bytes[i + 1] == b'/' {
                i += 2;
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                continue;
            }
            if bytes[i + 1] == b'*' {
                i += 2;
                out.push(b' ');
                while i < bytes.len() {
                    if bytes[i] == b'*' && i + 1 < bytes.len() && bytes[i + 1] == b'/' {
                        i += 2;
                        break;
                    }
                    if bytes[i] == b'\n' {
                        out.push(b'\n');
                    }
                    i += 1;
                }
                continue;
            }
        }

        match b {
            b'"' if bytes[i..].starts_with(b"\"\"\"") => {
                out.extend_from_slice(b"\"\"");
                i = skip_text_block(bytes, i + 3);
            }
            b'"' | b'\'' => {
                out.push(b);
                out.push(b);
                i = skip_literal(bytes, i + 1, b);
            }
            _ => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Skip a quoted literal body; returns the index after the closing quote.
/// A newline also ends the literal so a stray quote cannot swallow the file.
fn skip_literal(bytes: &[u8], mut i: usize, quote: u8) -> usize {
    let mut escaped = false;
    while i < bytes.len() {
        let b = bytes[i];
        if escaped {
            escaped = false;
        } else if b == b'\\' {
            escaped = true;
        } else if b == quote {
            return i + 1;
        } else if b == b'\n' {
            return i;
        }
        i += 1;
    }
    i
}

/// Skip a `"""` text block body; returns the index after the closing `"""`
fn skip_text_block(bytes: &[u8], mut i: usize) -> usize {
    let mut escaped = false;
    while i < bytes.len() {
        let b = bytes[i];
        if escaped {
            escaped = false;
        } else if b == b'\\' {
            escaped = true;
        } else if bytes[i..].starts_with(b"\"\"\"") {
            return i + 3;
        }
        i += 1;
    }
    i
}
