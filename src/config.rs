use clap::Parser;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// shortng link-shortener server
#[derive(Parser, Serialize, Deserialize, Clone, Debug)]
#[command(name = "shortng-server", version, about = "Viewer state link shortener")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "SHORTNG_PORT", default_value = "8000")]
    pub port: u16,

    /// Bind address
    #[arg(long, env = "SHORTNG_BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind_address: String,

    /// Path to TOML config file
    #[arg(long, default_value = "./shortng.toml")]
    pub config: String,

    /// Enable structured JSON logging (for Docker/production)
    #[arg(long, env = "SHORTNG_JSON_LOGS")]
    pub json_logs: bool,

    /// Output a commented TOML config template and exit
    #[arg(long)]
    pub generate_config: bool,

    /// Data directory for stored link records
    #[arg(long, env = "SHORTNG_DATA_DIR", default_value = "./data")]
    pub data_dir: String,

    /// Externally-visible base URL of this server, used when issuing short links
    #[arg(long, env = "SHORTNG_PUBLIC_URL", default_value = "http://localhost:8000")]
    pub public_url: String,

    /// Default viewer base URL, used when raw state JSON is submitted
    /// rather than a full viewer link
    #[arg(long, env = "SHORTNG_VIEWER_URL", default_value = "https://clio-ng.janelia.org/")]
    pub viewer_url: String,

    /// Days after which a passwordless link can no longer be overwritten
    #[arg(long, env = "SHORTNG_EDIT_EXPIRATION_DAYS", default_value = "7")]
    pub edit_expiration_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_address: "0.0.0.0".to_string(),
            config: "./shortng.toml".to_string(),
            json_logs: false,
            generate_config: false,
            data_dir: "./data".to_string(),
            public_url: "http://localhost:8000".to_string(),
            viewer_url: "https://clio-ng.janelia.org/".to_string(),
            edit_expiration_days: 7,
        }
    }
}

impl Config {
    /// Load config with layered precedence:
    /// built-in defaults < TOML file < env vars (SHORTNG_*) < CLI args
    pub fn load() -> Result<Self, figment::Error> {
        let cli = Config::parse();
        let config_path = cli.config.clone();

        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed("SHORTNG_"))
            .merge(Serialized::defaults(cli))
            .extract()
    }
}

/// Generate a commented TOML config template
pub fn generate_config_template() -> String {
    r#"# shortng Link Shortener Configuration
# Place this file at ./shortng.toml or specify with --config <path>
# All settings can be overridden via environment variables (SHORTNG_PORT, etc.)
# or CLI flags (--port, etc.)

# Server port (default: 8000)
# port = 8000

# Bind address (default: 0.0.0.0 — all interfaces)
# bind_address = "0.0.0.0"

# Enable structured JSON logging for Docker/production
# json_logs = false

# Data directory for stored link records
# data_dir = "./data"

# Externally-visible base URL of this server.
# Short links embed "<public_url>/short/<filename>", so this must be the URL
# at which clients (and the viewer) can reach this server.
# public_url = "http://localhost:8000"

# Default viewer base URL, used when raw state JSON is submitted rather than
# a full viewer link.
# viewer_url = "https://clio-ng.janelia.org/"

# Days after which a link saved without a password can no longer be
# overwritten (default: 7). Links saved with a password are editable
# indefinitely.
# edit_expiration_days = 7
"#
    .to_string()
}
