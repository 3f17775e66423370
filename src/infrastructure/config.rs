use serde::Deserialize;

/// Application configuration for search gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_environment() -> String {
    "dev".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// EngineConfig は検索エンジン接続の設定を表す。
/// username と password が両方設定されている場合のみ Basic 認証を使う。
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_engine_url")]
    pub url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url: default_engine_url(),
            username: String::new(),
            password: String::new(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

fn default_engine_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_request_timeout_seconds() -> u64 {
    30
}

/// SearchConfig は検索クエリの組み立てに関する設定を表す。
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// リクエストでフィールド指定が無いときに使う対象フィールド。
    #[serde(default = "default_fields")]
    pub default_fields: Vec<String>,
    #[serde(default = "default_track_total_hits")]
    pub track_total_hits: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_fields: default_fields(),
            track_total_hits: default_track_total_hits(),
        }
    }
}

fn default_fields() -> Vec<String> {
    vec![
        "meta.description^2".to_string(),
        "meta.title".to_string(),
        "source.h1".to_string(),
        "source.h2".to_string(),
        "source.p".to_string(),
    ]
}

fn default_track_total_hits() -> bool {
    true
}
