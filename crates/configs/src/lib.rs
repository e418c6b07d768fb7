use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const DEFAULT_ADMIN_USERNAME: &str = "alaa";
pub const DEFAULT_ADMIN_PASSWORD: &str = "0000";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

/// Where the JSON containers and the static frontend live.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir(), static_dir: default_static_dir() }
    }
}

/// The single administrator identity. Fixed for the life of the process.
#[derive(Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,
    #[serde(default = "default_admin_password")]
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self { username: default_admin_username(), password: default_admin_password() }
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 3000 }
fn default_data_dir() -> String { "data".into() }
fn default_static_dir() -> String { "public".into() }
fn default_admin_username() -> String { DEFAULT_ADMIN_USERNAME.into() }
fn default_admin_password() -> String { DEFAULT_ADMIN_PASSWORD.into() }

/// `$CONFIG_PATH`, or `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load [`config_path`], apply environment overrides and validate. A missing
    /// config file falls back to built-in defaults plus environment overrides.
    pub fn load_or_default() -> Result<Self> {
        let path = config_path();
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.normalize_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup` (normally the process environment) and validate.
    pub fn normalize_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.server.apply_overrides(&lookup)?;
        self.server.normalize()?;
        self.storage.apply_overrides(&lookup);
        self.storage.validate()?;
        self.admin.apply_overrides(&lookup);
        self.admin.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn apply_overrides<F: Fn(&str) -> Option<String>>(&mut self, lookup: &F) -> Result<()> {
        if let Some(host) = lookup("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT").or_else(|| lookup("SERVER_PORT")) {
            self.port = port
                .trim()
                .parse::<u16>()
                .map_err(|_| anyhow!("PORT must be an integer in 1..=65535, got {port:?}"))?;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.trim().parse::<usize>().ok()) {
            self.worker_threads = Some(w);
        }
        Ok(())
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    fn apply_overrides<F: Fn(&str) -> Option<String>>(&mut self, lookup: &F) {
        if let Some(dir) = lookup("DATA_DIR") {
            self.data_dir = dir;
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            self.static_dir = dir;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir is empty"));
        }
        Ok(())
    }
}

impl AdminConfig {
    fn apply_overrides<F: Fn(&str) -> Option<String>>(&mut self, lookup: &F) {
        if let Some(username) = lookup("ADMIN_USERNAME").filter(|v| !v.is_empty()) {
            self.username = username;
        }
        if let Some(password) = lookup("ADMIN_PASSWORD").filter(|v| !v.is_empty()) {
            self.password = password;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(anyhow!("admin.username is empty"));
        }
        if self.password.is_empty() {
            return Err(anyhow!("admin.password is empty"));
        }
        Ok(())
    }
}
