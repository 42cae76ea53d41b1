use std::collections::HashMap;

use serde_json::json;

use promptwire_protocols::ParseError;

use super::*;

fn subs(message: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    map.insert("message".to_string(), message.to_string());
    map
}

#[test]
fn test_bare_host_gets_http_scheme() {
    let descriptor = parse("curl localhost:11434/api/chat -d '{}'", &subs("hi")).unwrap();
    assert_eq!(descriptor.url, "http://localhost:11434/api/chat");
}

#[test]
fn test_https_scheme_preserved() {
    let descriptor = parse("curl https://api.example.com/v1/chat", &subs("hi")).unwrap();
    assert_eq!(descriptor.url, "https://api.example.com/v1/chat");
}

#[test]
fn test_protocol_relative_url() {
    let descriptor = parse("curl //example.com/chat", &subs("hi")).unwrap();
    assert_eq!(descriptor.url, "http://example.com/chat");
}

#[test]
fn test_missing_url() {
    assert_eq!(parse("curl", &subs("hi")).unwrap_err(), ParseError::MissingUrl);
    assert_eq!(
        parse("wget http://example.com", &subs("hi")).unwrap_err(),
        ParseError::MissingUrl
    );
}

#[test]
fn test_default_content_type_seeded() {
    let descriptor = parse("curl localhost:8080/chat", &subs("hi")).unwrap();
    assert_eq!(descriptor.headers.get("Content-Type"), Some("application/json"));
    assert_eq!(descriptor.headers.len(), 1);
}

#[test]
fn test_headers_accumulate_with_default() {
    let descriptor = parse(
        r#"curl localhost:8080/chat -H "Authorization: Bearer abc" --header 'X-Api-Version: 2'"#,
        &subs("hi"),
    )
    .unwrap();
    assert_eq!(descriptor.headers.len(), 3);
    assert_eq!(descriptor.headers.get("Authorization"), Some("Bearer abc"));
    assert_eq!(descriptor.headers.get("X-Api-Version"), Some("2"));
}

#[test]
fn test_template_header_overrides_default() {
    let descriptor = parse(
        r#"curl localhost:8080/chat -H "Content-Type: text/plain" -H "X-A: 1""#,
        &subs("hi"),
    )
    .unwrap();
    assert_eq!(descriptor.headers.len(), 2);
    assert_eq!(descriptor.headers.get("Content-Type"), Some("text/plain"));
}

#[test]
fn test_later_header_wins() {
    let descriptor = parse(
        r#"curl localhost:8080/chat -H "X-A: first" -H "X-A: second""#,
        &subs("hi"),
    )
    .unwrap();
    assert_eq!(descriptor.headers.get("X-A"), Some("second"));
}

#[test]
fn test_header_value_with_colon_splits_once() {
    let descriptor = parse(
        r#"curl localhost:8080/chat -H "X-Target: http://inner:9090""#,
        &subs("hi"),
    )
    .unwrap();
    assert_eq!(descriptor.headers.get("X-Target"), Some("http://inner:9090"));
}

#[test]
fn test_header_without_colon_ignored() {
    let descriptor = parse(r#"curl localhost:8080/chat -H "broken""#, &subs("hi")).unwrap();
    assert_eq!(descriptor.headers.len(), 1);
}

#[test]
fn test_unknown_flags_do_not_disturb_url() {
    let descriptor = parse(
        "curl -s -X POST localhost:8080/chat -d '{}'",
        &subs("hi"),
    )
    .unwrap();
    assert_eq!(descriptor.url, "http://localhost:8080/chat");
}

#[test]
fn test_inline_body_round_trip() {
    let descriptor = parse(r#"curl https://x/y -d '{"a":"$message$"}'"#, &subs("hi")).unwrap();
    assert_eq!(descriptor.body, Some(json!({"a": "hi"})));
}

#[test]
fn test_substitution_only_in_string_fields() {
    let descriptor = parse(
        r#"curl localhost:9000/api -d '{"model": "llama3", "prompt": "$message$", "n": 3}'"#,
        &subs("tell me a joke"),
    )
    .unwrap();
    assert_eq!(
        descriptor.body,
        Some(json!({"model": "llama3", "prompt": "tell me a joke", "n": 3}))
    );
}

#[test]
fn test_substitution_applies_to_whole_command() {
    let descriptor = parse(
        r#"curl localhost:9000/api -H "X-Echo: $message$" -d '{}'"#,
        &subs("ping"),
    )
    .unwrap();
    assert_eq!(descriptor.headers.get("X-Echo"), Some("ping"));
}

#[test]
fn test_invalid_json_body_kept_verbatim() {
    let descriptor = parse("curl localhost:9000/api -d 'prompt=$message$'", &subs("hi")).unwrap();
    assert_eq!(descriptor.body, Some(json!("prompt=hi")));
}

#[test]
fn test_no_data_flag_means_no_body() {
    let descriptor = parse("curl localhost:9000/api", &subs("hi")).unwrap();
    assert!(descriptor.body.is_none());
}

#[test]
fn test_body_with_nested_message_array_untouched() {
    // Only top-level string fields get the second substitution pass; the
    // whole-command pass already covered nested occurrences.
    let descriptor = parse(
        r#"curl localhost:9000/api -d '{"messages": [{"role": "user", "content": "$message$"}]}'"#,
        &subs("hello"),
    )
    .unwrap();
    assert_eq!(
        descriptor.body,
        Some(json!({"messages": [{"role": "user", "content": "hello"}]}))
    );
}

#[test]
fn test_line_continuations() {
    let template = "curl https://api.example.com/v1/chat \\\n  -H \"X-A: 1\" \\\n  -d '{\"a\":1}'";
    let descriptor = parse(template, &subs("hi")).unwrap();
    assert_eq!(descriptor.url, "https://api.example.com/v1/chat");
    assert_eq!(descriptor.headers.get("X-A"), Some("1"));
    assert_eq!(descriptor.body, Some(json!({"a": 1})));
}

#[test]
fn test_quoted_header_value_with_spaces() {
    let descriptor = parse(
        r#"curl localhost:8080/chat -H 'User-Agent: prompt wire client'"#,
        &subs("hi"),
    )
    .unwrap();
    assert_eq!(descriptor.headers.get("User-Agent"), Some("prompt wire client"));
}

#[test]
fn test_parse_deferred_bare_placeholder() {
    let descriptor = parse_deferred("curl localhost:8080/chat -d $data_json_schema$").unwrap();
    assert_eq!(descriptor.url, "http://localhost:8080/chat");
    assert!(descriptor.body.is_none());
}

#[test]
fn test_parse_deferred_quoted_placeholder() {
    let descriptor = parse_deferred("curl localhost:8080/chat -d '$data_json_schema$'").unwrap();
    assert!(descriptor.body.is_none());
}

#[test]
fn test_parse_deferred_requires_placeholder() {
    let err = parse_deferred(r#"curl localhost:8080/chat -d '{"a":1}'"#).unwrap_err();
    assert_eq!(err, ParseError::MissingPayloadPlaceholder);

    let err = parse_deferred("curl localhost:8080/chat").unwrap_err();
    assert_eq!(err, ParseError::MissingPayloadPlaceholder);
}

#[test]
fn test_parse_deferred_placeholder_match_is_strict() {
    // Surrounding whitespace inside the quotes makes the literal a
    // different token; strict verbatim matching rejects it.
    let err = parse_deferred("curl localhost:8080/chat -d ' $data_json_schema$ '").unwrap_err();
    assert_eq!(err, ParseError::MissingPayloadPlaceholder);
}

#[test]
fn test_empty_substitutions_leave_placeholder() {
    let descriptor = parse(
        r#"curl localhost:8080/chat -d '{"a":"$message$"}'"#,
        &HashMap::new(),
    )
    .unwrap();
    assert_eq!(descriptor.body, Some(json!({"a": "$message$"})));
}
