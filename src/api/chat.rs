use axum::{extract::State, Json};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::ax_state::AppState;
use crate::core::bullets::markdown_to_bullets;
use crate::core::matcher::find_matching_file;
use crate::models::context::{ChatAnswer, ChatRequest};

const MSG_MISSING_TOPIC: &str = "Please provide a topic.";
const MSG_READ_FAILED: &str =
    "Sorry — couldn't read the local content. Try again or ask to generate content.";

/// POST /chat：定位本地内容文件并返回要点摘要
/// 所有失败路径都折算成固定文案，不向客户端抛错
pub async fn chat_endpoint(
    State(state): State<Arc<AppState>>,
    Json(query): Json<ChatRequest>,
) -> Json<ChatAnswer> {
    let answer = build_answer(&state.settings.content_dir, &query);
    Json(ChatAnswer { answer })
}

/// GET /：健康检查
pub async fn root_status() -> Json<serde_json::Value> {
    Json(json!({ "status": "DSCPL API is running" }))
}

// 同步求值，便于脱离 HTTP 层单测
fn build_answer(content_dir: &Path, query: &ChatRequest) -> String {
    let start = Instant::now();
    let category = query.category.as_str();
    let topic = query.topic.as_str();

    if topic.trim().is_empty() {
        return MSG_MISSING_TOPIC.to_string();
    }

    let Some(file_path) = find_matching_file(content_dir, category, topic) else {
        info!(
            "No local file found for {}/{}. ({:.3}s)",
            category,
            topic,
            start.elapsed().as_secs_f64()
        );
        return format!(
            "Sorry, I don't have prewritten content for **{}** in **{}**. \
             Would you like me to generate a short summary instead?",
            topic, category
        );
    };

    match std::fs::read_to_string(&file_path) {
        Ok(raw) => {
            let bullets = markdown_to_bullets(&raw);
            info!(
                "Served local file {} in {:.3}s",
                file_path.display(),
                start.elapsed().as_secs_f64()
            );
            format!("**{} — {}**\n\n{}", category, topic, bullets)
        }
        Err(e) => {
            error!("Error reading file {}: {}", file_path.display(), e);
            MSG_READ_FAILED.to_string()
        }
    }
}
