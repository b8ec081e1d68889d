use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub auth: AuthConfig,
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    File,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub kind: StoreKind,
    pub path: String,
    #[serde(default = "default_load_timeout_secs")]
    pub load_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Empty -> a random secret per process (tokens die with the process)
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_lifetime_hours")]
    pub token_lifetime_hours: i64,
    /// Allow admin/admin while the user directory is empty
    #[serde(default)]
    pub emergency_admin: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssistantConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// OpenAI-compatible endpoint; None -> api.openai.com
    pub endpoint: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: i32,
}

impl AssistantConfig {
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    pub backup_slug: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            backup_slug: "tarifas".to_string(),
        }
    }
}

fn default_max_upload_mb() -> usize {
    50
}

fn default_load_timeout_secs() -> u64 {
    4
}

fn default_token_lifetime_hours() -> i64 {
    24
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
bind = "0.0.0.0:3000"
max_upload_mb = 50

[store]
kind = "file"
path = "target/data/app_document.json"
load_timeout_secs = 4

[auth]
jwt_secret = ""
token_lifetime_hours = 24
emergency_admin = false

[assistant]
api_key_env = "GEMINI_API_KEY"
endpoint = "https://generativelanguage.googleapis.com/v1beta/openai"
model = "gemini-2.0-flash"
temperature = 0.7
max_tokens = 2048

[export]
backup_slug = "tarifas"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Get the document file path from configuration.
/// Relative paths resolve against the executable directory.
pub fn get_store_path(config: &Config) -> PathBuf {
    let path = Path::new(&config.store.path);

    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(path);
        }
    }

    PathBuf::from(&config.store.path)
}
