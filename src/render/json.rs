//! JSON rendering for outline results.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, Result};
use crate::model::DocumentResult;

/// Indentation of pretty output.
const PRETTY_INDENT: &[u8] = b"    ";

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with four-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a result to JSON.
///
/// Output is deterministic: the same result always renders to the same bytes.
pub fn to_json(result: &DocumentResult, format: JsonFormat) -> Result<String> {
    let bytes = to_json_bytes(result, format)?;
    String::from_utf8(bytes).map_err(|e| Error::Render(e.to_string()))
}

/// Convert a result to JSON bytes.
pub fn to_json_bytes(result: &DocumentResult, format: JsonFormat) -> Result<Vec<u8>> {
    match format {
        JsonFormat::Pretty => {
            let mut out = Vec::new();
            let mut serializer =
                Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(PRETTY_INDENT));
            result.serialize(&mut serializer)?;
            Ok(out)
        }
        JsonFormat::Compact => Ok(serde_json::to_vec(result)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, OutlineEntry};

    fn sample() -> DocumentResult {
        DocumentResult {
            title: "Test".to_string(),
            outline: vec![OutlineEntry::new(HeadingLevel::H2, "Scope", 3)],
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        let expected = r#"{
    "title": "Test",
    "outline": [
        {
            "level": "H2",
            "text": "Scope",
            "page": 3
        }
    ]
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Test","outline":[{"level":"H2","text":"Scope","page":3}]}"#
        );
    }

    #[test]
    fn test_empty_result_pretty() {
        let json = to_json(&DocumentResult::empty(), JsonFormat::Pretty).unwrap();
        assert_eq!(json, "{\n    \"title\": \"\",\n    \"outline\": []\n}");
    }
}
