//! Result path projection.
//!
//! A [`PathExpr`] is the dotted/bracketed accessor callers use to project a
//! value out of a parsed JSON result, e.g. `choices[0].message.content`.
//! Projection is lookup-only: a missing property or out-of-range index
//! yields `None`, never an error.

use serde_json::Value;

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Plain property access.
    Key(String),
    /// Property access followed by an array index, `name[3]`.
    Indexed { key: String, index: usize },
}

impl PathExpr {
    /// Parse a dotted accessor with optional bracketed indexes. Empty input
    /// yields the identity expression, which projects the whole value.
    /// A segment with an unparseable index is treated as a plain key.
    pub fn parse(path: &str) -> Self {
        let segments = path
            .trim()
            .split('.')
            .filter(|part| !part.is_empty())
            .map(|part| {
                if let Some((key, rest)) = part.split_once('[') {
                    if let Ok(index) = rest.trim_end_matches(']').parse() {
                        return Segment::Indexed {
                            key: key.to_string(),
                            index,
                        };
                    }
                }
                Segment::Key(part.to_string())
            })
            .collect();
        Self { segments }
    }

    /// Walk the expression over a value.
    pub fn extract<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        let mut current = value;
        for segment in &self.segments {
            current = match segment {
                Segment::Key(key) => current.get(key.as_str())?,
                Segment::Indexed { key, index } => current.get(key.as_str())?.get(*index)?,
            };
        }
        Some(current)
    }

    pub fn is_identity(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn completion() -> Value {
        json!({
            "choices": [
                {"message": {"role": "assistant", "content": "Hello!"}}
            ],
            "usage": {"total_tokens": 12}
        })
    }

    #[test]
    fn test_extract_nested_array_path() {
        let expr = PathExpr::parse("choices[0].message.content");
        assert_eq!(expr.extract(&completion()), Some(&json!("Hello!")));
    }

    #[test]
    fn test_extract_plain_path() {
        let expr = PathExpr::parse("usage.total_tokens");
        assert_eq!(expr.extract(&completion()), Some(&json!(12)));
    }

    #[test]
    fn test_missing_property_is_none() {
        let expr = PathExpr::parse("choices[0].message.reasoning");
        assert_eq!(expr.extract(&completion()), None);
    }

    #[test]
    fn test_index_out_of_range_is_none() {
        let expr = PathExpr::parse("choices[5].message.content");
        assert_eq!(expr.extract(&completion()), None);
    }

    #[test]
    fn test_identity_projects_whole_value() {
        let expr = PathExpr::parse("");
        assert!(expr.is_identity());
        let value = completion();
        assert_eq!(expr.extract(&value), Some(&value));
    }

    #[test]
    fn test_path_over_scalar_is_none() {
        let expr = PathExpr::parse("message.content");
        assert_eq!(expr.extract(&json!("just text")), None);
    }

    #[test]
    fn test_bad_index_falls_back_to_key() {
        // "items[x]" cannot be an index access; treated as a literal key.
        let expr = PathExpr::parse("items[x]");
        let value = json!({"items[x]": "ok"});
        assert_eq!(expr.extract(&value), Some(&json!("ok")));
    }
}
