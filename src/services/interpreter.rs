use serde_json::Value;
use tracing::error;

use crate::{
    error::ResponseParseError,
    types::{ItineraryResult, TokenUsage},
};

/// Turn a raw chat completion envelope into an [`ItineraryResult`].
///
/// Unparseable completion text is an error carrying the text. Valid JSON
/// without a `cities` key yields an empty list.
pub fn interpret_completion(envelope: Value) -> Result<ItineraryResult, ResponseParseError> {
    let content = extract_content(&envelope);

    let parsed: Value = serde_json::from_str(&content).map_err(|err| {
        error!(
            target: "travel_planner::pipeline",
            content = %content,
            error = %err,
            "failed to parse completion JSON"
        );
        ResponseParseError::new(content.clone(), err.to_string())
    })?;

    let cities = extract_cities(&parsed)
        .map_err(|message| ResponseParseError::new(content.clone(), message))?;

    Ok(ItineraryResult::new(
        cities,
        content,
        extract_usage(&envelope),
        envelope
            .get("model")
            .and_then(Value::as_str)
            .map(str::to_string),
    ))
}

/// `choices[0].message.content`, or an empty string when absent.
pub fn extract_content(envelope: &Value) -> String {
    envelope
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn extract_cities(parsed: &Value) -> Result<Vec<String>, String> {
    let cities = match parsed.get("cities") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => return Err(format!("`cities` must be an array, got {other}")),
    };

    cities
        .iter()
        .enumerate()
        .map(|(idx, city)| {
            city.as_str()
                .map(str::to_string)
                .ok_or_else(|| format!("`cities[{idx}]` must be a string, got {city}"))
        })
        .collect()
}

fn extract_usage(envelope: &Value) -> Option<TokenUsage> {
    envelope
        .get("usage")
        .cloned()
        .and_then(|usage| serde_json::from_value(usage).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(content: Value) -> Value {
        json!({
            "id": "chatcmpl-123",
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 420, "completion_tokens": 17, "total_tokens": 437 }
        })
    }

    #[test]
    fn test_parses_cities_in_order() {
        let result =
            interpret_completion(envelope(json!(r#"{"cities":["Paris","Zurich"]}"#))).unwrap();

        assert_eq!(result.cities, vec!["Paris", "Zurich"]);
        assert_eq!(result.raw_response, r#"{"cities":["Paris","Zurich"]}"#);
        assert_eq!(result.model.as_deref(), Some("gpt-4o-mini-2024-07-18"));
        assert_eq!(
            result.usage,
            Some(TokenUsage {
                prompt_tokens: 420,
                completion_tokens: 17,
                total_tokens: 437
            })
        );
    }

    #[test]
    fn test_invalid_json_carries_text() {
        let err = interpret_completion(envelope(json!("not json"))).unwrap_err();
        assert_eq!(err.content, "not json");
    }

    #[test]
    fn test_missing_cities_key_is_empty() {
        let result = interpret_completion(envelope(json!("{}"))).unwrap();
        assert!(result.cities.is_empty());
        assert_eq!(result.raw_response, "{}");
    }

    #[test]
    fn test_absent_content_is_parse_error_on_empty_text() {
        let err = interpret_completion(json!({ "choices": [] })).unwrap_err();
        assert_eq!(err.content, "");

        let err = interpret_completion(envelope(Value::Null)).unwrap_err();
        assert_eq!(err.content, "");
    }

    #[test]
    fn test_wrong_cities_shape_is_rejected() {
        let err = interpret_completion(envelope(json!(r#"{"cities":"Paris"}"#))).unwrap_err();
        assert!(err.message.contains("must be an array"));

        let err = interpret_completion(envelope(json!(r#"{"cities":["Paris", 3]}"#))).unwrap_err();
        assert!(err.message.contains("cities[1]"));
    }

    #[test]
    fn test_usage_and_model_are_optional() {
        let result = interpret_completion(json!({
            "choices": [{ "message": { "content": "{\"cities\":[\"Milan\"]}" } }]
        }))
        .unwrap();

        assert_eq!(result.cities, vec!["Milan"]);
        assert!(result.usage.is_none());
        assert!(result.model.is_none());
    }
}
