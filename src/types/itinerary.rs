use serde::{Deserialize, Serialize};

/// Parsed outcome of a successful itinerary generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResult {
    /// Cities to visit, in route order
    pub cities: Vec<String>,
    /// Completion text exactly as returned by the model
    pub raw_response: String,
    /// Token usage reported by the provider (if available)
    pub usage: Option<TokenUsage>,
    /// Model that actually served the request (if reported)
    pub model: Option<String>,
}

/// Token usage information from the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl ItineraryResult {
    pub fn new(
        cities: Vec<String>,
        raw_response: String,
        usage: Option<TokenUsage>,
        model: Option<String>,
    ) -> Self {
        Self {
            cities,
            raw_response,
            usage,
            model,
        }
    }

    /// Generate a human-readable summary of the itinerary
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push("=== Itinerary ===".to_string());
        if self.cities.is_empty() {
            lines.push("(no cities returned)".to_string());
        }
        for (idx, city) in self.cities.iter().enumerate() {
            lines.push(format!("  {}. {}", idx + 1, city));
        }

        lines.push(String::new());
        lines.push("--- API Usage ---".to_string());
        lines.push(format!(
            "Model: {}",
            self.model.as_deref().unwrap_or("unknown")
        ));
        if let Some(usage) = &self.usage {
            lines.push(format!(
                "Tokens: {} prompt + {} completion = {} total",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            ));
        }

        lines.push(String::new());
        lines.push("--- Raw Response (first 200 chars) ---".to_string());
        lines.push(self.raw_response_preview(200));

        lines.join("\n")
    }

    /// First `max_chars` characters of the raw response, with an ellipsis when cut.
    pub fn raw_response_preview(&self, max_chars: usize) -> String {
        let mut chars = self.raw_response.chars();
        let preview: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{preview}...")
        } else {
            preview
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_with_wire_names() {
        let result = ItineraryResult::new(
            vec!["Paris".to_string(), "Zurich".to_string()],
            r#"{"cities":["Paris","Zurich"]}"#.to_string(),
            Some(TokenUsage {
                prompt_tokens: 120,
                completion_tokens: 30,
                total_tokens: 150,
            }),
            Some("gpt-4o-mini".to_string()),
        );

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["cities"], json!(["Paris", "Zurich"]));
        assert_eq!(value["rawResponse"], r#"{"cities":["Paris","Zurich"]}"#);
        assert_eq!(value["usage"]["total_tokens"], 150);
        assert_eq!(value["model"], "gpt-4o-mini");
    }

    #[test]
    fn test_summary_format() {
        let result = ItineraryResult::new(
            vec!["Paris".to_string(), "Milan".to_string()],
            "{}".to_string(),
            None,
            None,
        );

        let summary = result.summary();
        assert!(summary.contains("1. Paris"));
        assert!(summary.contains("2. Milan"));
        assert!(summary.contains("Model: unknown"));
        assert!(!summary.contains("Tokens"));
    }

    #[test]
    fn test_raw_response_preview() {
        let result = ItineraryResult::new(vec![], "Zürich".repeat(50), None, None);

        let expected: String = "Zürich".repeat(50).chars().take(10).collect();
        assert_eq!(result.raw_response_preview(10), format!("{expected}..."));
        assert_eq!(result.raw_response_preview(1000), "Zürich".repeat(50));
    }
}
