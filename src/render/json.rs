//! JSON output for token lists and statistics.

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize any model value to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize;
    use crate::render::RenderStats;

    #[test]
    fn test_tokens_to_json_pretty() {
        let spans = tokenize("a $x$");
        let json = to_json(&spans, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"type\": \"math\""));
        assert!(json.contains("\"body\": \"x\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_stats_to_json_compact() {
        let json = to_json(&RenderStats::default(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"inline_math\":0"));
    }
}
