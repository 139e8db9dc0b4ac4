//! Configuration resolution
//!
//! The backend URL is taken from, in order: an explicit override, the
//! config file, `REACT_APP_BACKEND_URL` in the frontend env file, and a
//! fixed default. The direct service URL is configured independently.
//! The result is an immutable [`TesterConfig`] handed to the runner.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use super::paths::config_path;
use super::{Error, Result};

/// Env file key holding the backend base URL
pub const BACKEND_URL_KEY: &str = "REACT_APP_BACKEND_URL";

/// Env file read when none is configured
pub const DEFAULT_ENV_FILE: &str = "/app/frontend/.env";

/// Backend base URL used when discovery fails
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:4000";

/// GraphQL endpoint of the user service, bypassing the gateway
pub const DEFAULT_DIRECT_URL: &str = "http://localhost:4001/graphql";

/// Type that introspection must report
pub const DEFAULT_SCHEMA_TYPE: &str = "UserType";

/// Which GraphQL endpoint a request is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// `<backend>/api/graphql`, proxied by the gateway
    Gateway,
    /// The user service's own endpoint
    Direct,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Gateway => write!(f, "gateway"),
            Target::Direct => write!(f, "direct"),
        }
    }
}

/// Contents of the optional `config.toml`
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    /// Backend base URL (takes precedence over the env file)
    pub backend_url: Option<String>,

    /// Direct user service GraphQL URL
    pub direct_url: Option<String>,

    /// Env file to read `REACT_APP_BACKEND_URL` from
    pub env_file: Option<PathBuf>,

    /// Schema type introspection must find
    pub schema_type: Option<String>,
}

impl FileConfig {
    /// Load the config file
    ///
    /// An explicit path must exist. Without one, the platform config path is
    /// used if present, and defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::parse(&content)
    }

    /// Parse config file contents
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }
}

/// Command-line overrides, highest precedence
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub backend_url: Option<String>,
    pub direct_url: Option<String>,
    pub env_file: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub schema_type: Option<String>,
}

/// Where the backend URL came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlSource {
    Explicit,
    ConfigFile,
    EnvFile(PathBuf),
    Default,
}

impl fmt::Display for UrlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlSource::Explicit => write!(f, "command line"),
            UrlSource::ConfigFile => write!(f, "config file"),
            UrlSource::EnvFile(path) => write!(f, "{}", path.display()),
            UrlSource::Default => write!(f, "default"),
        }
    }
}

/// Resolved tester configuration
#[derive(Debug, Clone)]
pub struct TesterConfig {
    backend_url: String,
    backend_source: UrlSource,
    direct_url: String,
    schema_type: String,
}

impl TesterConfig {
    /// Resolve configuration from overrides, the config file and the env file
    pub fn resolve(overrides: Overrides) -> Result<Self> {
        let file = FileConfig::load(overrides.config_path.as_deref())?;
        Self::from_sources(overrides, file)
    }

    /// Resolve configuration from already-loaded sources
    pub fn from_sources(overrides: Overrides, file: FileConfig) -> Result<Self> {
        let (backend_url, backend_source) = if let Some(url) = overrides.backend_url {
            (url, UrlSource::Explicit)
        } else if let Some(url) = file.backend_url {
            (url, UrlSource::ConfigFile)
        } else {
            let env_file = overrides
                .env_file
                .or(file.env_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE));
            match read_backend_url(&env_file) {
                Some(url) => (url, UrlSource::EnvFile(env_file)),
                None => (DEFAULT_BACKEND_URL.to_string(), UrlSource::Default),
            }
        };

        let backend_url = validate_url(backend_url.trim_end_matches('/'), "backend URL")?;
        let direct_url = validate_url(
            overrides
                .direct_url
                .as_deref()
                .or(file.direct_url.as_deref())
                .unwrap_or(DEFAULT_DIRECT_URL),
            "direct URL",
        )?;
        let schema_type = overrides
            .schema_type
            .or(file.schema_type)
            .unwrap_or_else(|| DEFAULT_SCHEMA_TYPE.to_string());

        tracing::info!(
            backend = %backend_url,
            source = %backend_source,
            direct = %direct_url,
            "resolved endpoints"
        );

        Ok(Self {
            backend_url,
            backend_source,
            direct_url,
            schema_type,
        })
    }

    /// Backend base URL, without trailing slash
    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn backend_source(&self) -> &UrlSource {
        &self.backend_source
    }

    /// GraphQL endpoint behind the gateway
    pub fn gateway_url(&self) -> String {
        format!("{}/api/graphql", self.backend_url)
    }

    /// Liveness probe URL
    pub fn health_url(&self) -> String {
        format!("{}/api/", self.backend_url)
    }

    pub fn direct_url(&self) -> &str {
        &self.direct_url
    }

    pub fn schema_type(&self) -> &str {
        &self.schema_type
    }

    /// GraphQL endpoint for a target
    pub fn endpoint(&self, target: Target) -> String {
        match target {
            Target::Gateway => self.gateway_url(),
            Target::Direct => self.direct_url.clone(),
        }
    }
}

/// Read `REACT_APP_BACKEND_URL` from an env file
///
/// Returns `None` when the file is missing, the key is absent or the value
/// is empty. Only lines assigning the key are parsed, so other lines can
/// never affect the result. Values are taken literally: `$` is not expanded.
pub fn read_backend_url(path: &Path) -> Option<String> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "env file not readable");
            return None;
        }
    };

    let assignments: Vec<String> = content
        .lines()
        .filter(|line| line_key(line) == Some(BACKEND_URL_KEY))
        .map(literal_assignment)
        .collect();

    for item in dotenvy::from_read_iter(assignments.join("\n").as_bytes()) {
        match item {
            Ok((key, value)) if key == BACKEND_URL_KEY => {
                let value = strip_matching_quotes(value.trim());
                if value.is_empty() {
                    return None;
                }
                return Some(value.to_string());
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping unparsable env line");
            }
        }
    }

    tracing::debug!(path = %path.display(), "{} not set in env file", BACKEND_URL_KEY);
    None
}

/// Key assigned by an env line, accepting an `export ` prefix
fn line_key(line: &str) -> Option<&str> {
    let line = line.trim_start();
    let line = line.strip_prefix("export ").unwrap_or(line);
    line.split_once('=').map(|(key, _)| key.trim())
}

/// Rewrite a value containing `$` as single-quoted so dotenvy keeps it verbatim
fn literal_assignment(line: &str) -> String {
    let Some((_, raw)) = line.split_once('=') else {
        return line.to_string();
    };
    let raw = raw.trim();
    if !raw.contains('$') || raw.contains(" #") {
        return line.to_string();
    }
    let value = strip_matching_quotes(raw);
    if value.contains('\'') {
        return line.to_string();
    }
    format!("{}='{}'", BACKEND_URL_KEY, value)
}

/// Remove one pair of surrounding quotes, only when both ends match
fn strip_matching_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn validate_url(url: &str, what: &str) -> Result<String> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| Error::Config(format!("Invalid {} '{}': {}", what, url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(url.to_string()),
        scheme => Err(Error::Config(format!(
            "Invalid {} '{}': unsupported scheme '{}'",
            what, url, scheme
        ))),
    }
}
