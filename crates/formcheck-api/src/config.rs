//! API server configuration.

use formcheck_agents::{AgentConfig, FEEDBACK_THRESHOLD_DEGREES};
use formcheck_reference::ColumnMaps;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Environment variable prefix, e.g. `FORMCHECK__HTTP__BIND_ADDR`
pub const ENV_PREFIX: &str = "FORMCHECK";

/// Complete server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// HTTP server configuration
    pub http: HttpConfig,

    /// CORS configuration
    pub cors: CorsConfig,

    /// Reference pose catalog
    pub reference: ReferenceConfig,

    /// Text generation backend
    pub generator: GeneratorConfig,

    /// Feedback composition
    pub feedback: FeedbackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub bind_addr: SocketAddr,

    /// Request timeout (seconds)
    pub timeout_secs: u64,

    /// Maximum request body size (bytes)
    pub max_body_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any
    pub allowed_origins: Vec<String>,

    /// Max age (seconds)
    pub max_age_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// JSON array of reference pose records
    pub records_path: PathBuf,

    /// Column maps for pose types beyond the built-in ones
    pub column_maps: ColumnMaps,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Chat completion settings
    #[serde(flatten)]
    pub agent: AgentConfig,

    /// Answer every prompt with this text instead of calling the model
    pub offline_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Deviations strictly above this many degrees are reported
    pub threshold_degrees: f64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8000)),
            timeout_secs: 60,
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
            max_age_secs: 3600,
        }
    }
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            records_path: PathBuf::from("data/reference_poses.json"),
            column_maps: ColumnMaps::new(),
        }
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            threshold_degrees: FEEDBACK_THRESHOLD_DEGREES,
        }
    }
}

impl ApiConfig {
    /// Load configuration from file
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(Self::environment())
            .build()?;

        settings.try_deserialize()
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(Self::environment())
            .build()?;

        settings.try_deserialize()
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_core::JointName;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.http.bind_addr.port(), 8000);
        assert_eq!(config.reference.records_path, PathBuf::from("data/reference_poses.json"));
        assert_eq!(config.feedback.threshold_degrees, 15.0);
        assert_eq!(config.generator.agent.model, "gpt-4o");
        assert!(config.generator.offline_text.is_none());
    }

    #[test]
    fn test_from_file_overrides_and_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[http]
bind_addr = "127.0.0.1:9100"

[reference]
records_path = "fixtures/poses.json"

[reference.column_maps.lunge]
LEFT_KNEE = "LK"
RIGHT_KNEE = "RK"

[generator]
model = "gpt-4o-mini"
offline_text = "좋아요"

[feedback]
threshold_degrees = 12.5
"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let config = ApiConfig::from_file(&path).unwrap();

        assert_eq!(config.http.bind_addr.port(), 9100);
        assert_eq!(config.http.timeout_secs, 60);
        assert_eq!(config.reference.records_path, PathBuf::from("fixtures/poses.json"));
        let lunge = config.reference.column_maps.get("lunge").unwrap();
        assert_eq!(lunge.get(&JointName::LeftKnee).map(String::as_str), Some("LK"));
        assert_eq!(config.generator.agent.model, "gpt-4o-mini");
        assert_eq!(config.generator.agent.temperature, 0.7);
        assert_eq!(config.generator.offline_text.as_deref(), Some("좋아요"));
        assert_eq!(config.feedback.threshold_degrees, 12.5);
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000".to_string()]);
    }
}
