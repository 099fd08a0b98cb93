use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Choice {
    #[serde(default)]
    pub text: String,
}

impl CompletionResponse {
    /// Text of the first candidate, untouched. `None` when the server returned no choices.
    pub fn into_first_text(self) -> Option<String> {
        self.choices.into_iter().next().map(|c| c.text)
    }
}

/// Error envelope returned by OpenAI-compatible servers on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_text_takes_first_choice() {
        let json = r#"{"id":"cmpl-1","choices":[{"text":" one","index":0},{"text":"two","index":1}]}"#;
        let resp: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.into_first_text().as_deref(), Some(" one"));
    }

    #[test]
    fn missing_choices_is_none() {
        let resp: CompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.into_first_text().is_none());
    }

    #[test]
    fn request_serializes_wire_names() {
        let req = CompletionRequest { model: "m", prompt: "ping", max_tokens: 100 };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, serde_json::json!({"model": "m", "prompt": "ping", "max_tokens": 100}));
    }
}
