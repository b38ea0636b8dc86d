use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings for the matching pipeline.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub log_level: String,
    /// YAML file holding the branch and locality catalogs.
    pub catalog_path: PathBuf,
}
