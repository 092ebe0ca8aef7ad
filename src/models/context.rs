use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub category: String, // Devotion, Prayer, Meditation, Accountability, Just Chat 等
    pub topic: String,
    #[serde(default)]
    pub start_program: bool,
    #[serde(default = "default_program_length")]
    pub program_length: u32,
    #[serde(default)]
    pub chat_history: Vec<ChatTurn>,
}

fn default_program_length() -> u32 {
    7
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatAnswer {
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_take_defaults() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"category": "Prayer", "topic": "Peace"}"#).unwrap();
        assert!(!req.start_program);
        assert_eq!(req.program_length, 7);
        assert!(req.chat_history.is_empty());
    }

    #[test]
    fn chat_history_roundtrips() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"category": "Devotion", "topic": "Hope",
                "chat_history": [{"role": "user", "content": "hi"}]}"#,
        )
        .unwrap();
        assert_eq!(req.chat_history.len(), 1);
        assert_eq!(req.chat_history[0].role, "user");
    }
}
