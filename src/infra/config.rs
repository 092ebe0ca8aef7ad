use axum::http::HeaderValue;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_CONTENT_DIR: &str = "content";
// 本地 Streamlit UI 的两个来源
const DEFAULT_ORIGINS: &str = "http://localhost:8501,http://127.0.0.1:8501";

/// 服务配置，启动时从环境变量读取一次，之后只读
pub struct Settings {
    pub content_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub allowed_origins: Vec<HeaderValue>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let content_dir = env::var("CONTENT_DIR")
            .unwrap_or_else(|_| DEFAULT_CONTENT_DIR.to_string())
            .into();
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()?;
        let allowed_origins =
            parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ORIGINS.to_string()))?;
        Ok(Self {
            content_dir,
            bind_addr,
            allowed_origins,
        })
    }
}

// 逗号分隔的来源列表 -> HeaderValue 列表，空段忽略
fn parse_origins(raw: &str) -> anyhow::Result<Vec<HeaderValue>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Ok(s.parse::<HeaderValue>()?))
        .collect()
}
