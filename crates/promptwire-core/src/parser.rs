//! Command-template parsing.
//!
//! Translates a curl-style command template into a
//! [`RequestDescriptor`]: placeholder substitution, URL extraction with
//! scheme defaulting, header accumulation, and inline or deferred body
//! handling. A small quote-aware tokenizer replaces the regex scraping the
//! original prototypes used, with one canonical (permissive) URL policy:
//! the first non-flag token after `curl` is the URL, and a bare
//! `host[:port][/path]` gets `http://` prepended.

use std::collections::HashMap;

use serde_json::Value;

use promptwire_protocols::{ParseError, RequestDescriptor};

/// Placeholder substituted with the caller-supplied message text.
pub const MESSAGE_PLACEHOLDER: &str = "$message$";

/// Placeholder marking a deferred, caller-built payload.
pub const SCHEMA_PLACEHOLDER: &str = "$data_json_schema$";

const HEADER_FLAGS: &[&str] = &["-H", "--header"];
const DATA_FLAGS: &[&str] = &["-d", "--data", "--data-raw"];

/// Curl flags that take a value we have no use for; the value token is
/// skipped so it cannot be mistaken for the URL.
const SKIPPED_VALUE_FLAGS: &[&str] = &[
    "-X",
    "--request",
    "-A",
    "--user-agent",
    "-u",
    "--user",
    "-o",
    "--output",
];

/// Parse an inline-data command template.
///
/// Every `$key$` placeholder named in `substitutions` is replaced across
/// the whole template before tokenization; string fields of an inline JSON
/// object body get a second substitution pass, covering placeholders nested
/// inside the payload.
pub fn parse(
    template: &str,
    substitutions: &HashMap<String, String>,
) -> Result<RequestDescriptor, ParseError> {
    let substituted = apply_substitutions(template, substitutions);
    let raw = scan(&substituted)?;
    let mut descriptor = RequestDescriptor::new(raw.url);
    for (name, value) in raw.headers {
        descriptor.headers.insert(name, value);
    }
    descriptor.body = raw.data.map(|literal| parse_body(&literal, substitutions));
    Ok(descriptor)
}

/// Parse a deferred-schema command template.
///
/// The data literal must be exactly the schema placeholder; the payload
/// itself is attached by the caller at dispatch time via
/// [`RequestDescriptor::with_body`].
pub fn parse_deferred(template: &str) -> Result<RequestDescriptor, ParseError> {
    let raw = scan(template)?;
    if raw.data.as_deref() != Some(SCHEMA_PLACEHOLDER) {
        return Err(ParseError::MissingPayloadPlaceholder);
    }
    let mut descriptor = RequestDescriptor::new(raw.url);
    for (name, value) in raw.headers {
        descriptor.headers.insert(name, value);
    }
    Ok(descriptor)
}

struct RawCommand {
    url: String,
    headers: Vec<(String, String)>,
    data: Option<String>,
}

/// Single walk over the token stream, starting after the `curl` keyword.
fn scan(command: &str) -> Result<RawCommand, ParseError> {
    let tokens = tokenize(command);
    let mut tokens = tokens.into_iter().skip_while(|token| token != "curl");
    if tokens.next().is_none() {
        return Err(ParseError::MissingUrl);
    }

    let mut url = None;
    let mut headers = Vec::new();
    let mut data = None;

    while let Some(token) = tokens.next() {
        if HEADER_FLAGS.contains(&token.as_str()) {
            if let Some(raw) = tokens.next() {
                if let Some((name, value)) = raw.split_once(':') {
                    headers.push((name.trim().to_string(), value.trim().to_string()));
                }
            }
        } else if DATA_FLAGS.contains(&token.as_str()) {
            data = tokens.next();
        } else if SKIPPED_VALUE_FLAGS.contains(&token.as_str()) {
            tokens.next();
        } else if token.starts_with('-') {
            // Boolean flag (-s, -k, ...); nothing to consume.
        } else if url.is_none() {
            url = Some(normalize_url(&token));
        }
    }

    match url {
        Some(url) => Ok(RawCommand { url, headers, data }),
        None => Err(ParseError::MissingUrl),
    }
}

/// Tolerates protocol-relative snippets and bare hosts copy-pasted from
/// other HTTP client tools.
fn normalize_url(token: &str) -> String {
    let token = token.strip_prefix("//").unwrap_or(token);
    if token.starts_with("http://") || token.starts_with("https://") {
        token.to_string()
    } else {
        format!("http://{token}")
    }
}

/// Split a command string into tokens, honoring single- and double-quoted
/// spans. Quotes are stripped; a backslash escapes the next character
/// inside a double-quoted span; a backslash-newline line continuation is
/// dropped.
fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut pending = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if pending {
                    tokens.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            '\'' => {
                pending = true;
                for c in chars.by_ref() {
                    if c == '\'' {
                        break;
                    }
                    current.push(c);
                }
            }
            '"' => {
                pending = true;
                while let Some(c) = chars.next() {
                    match c {
                        '"' => break,
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                current.push(escaped);
                            }
                        }
                        _ => current.push(c),
                    }
                }
            }
            '\\' if chars.peek() == Some(&'\n') => {
                chars.next();
            }
            _ => {
                pending = true;
                current.push(ch);
            }
        }
    }
    if pending {
        tokens.push(current);
    }
    tokens
}

fn apply_substitutions(template: &str, substitutions: &HashMap<String, String>) -> String {
    let mut out = template.to_string();
    for (key, value) in substitutions {
        out = out.replace(&format!("${key}$"), value);
    }
    out
}

/// Decode an inline data literal. Valid JSON objects get a second
/// substitution pass over top-level string fields; a literal that fails to
/// parse as JSON is used verbatim as a string body.
fn parse_body(literal: &str, substitutions: &HashMap<String, String>) -> Value {
    match serde_json::from_str::<Value>(literal) {
        Ok(mut value) => {
            if let Value::Object(fields) = &mut value {
                for field in fields.values_mut() {
                    if let Value::String(text) = field {
                        *field = Value::String(apply_substitutions(text, substitutions));
                    }
                }
            }
            value
        }
        Err(_) => Value::String(apply_substitutions(literal, substitutions)),
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
