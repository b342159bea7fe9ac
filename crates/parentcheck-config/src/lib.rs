use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

const APP_DIR: &str = "parentcheck";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_LOOKUP_PATH: &str = "/auth/parents/lookup-id-by-email";
pub const DEFAULT_CLEAR_PATH: &str = "/user/delete-parent-child";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_NOTICE_SECS: u64 = 5;

pub const ENV_BASE_URL: &str = "PARENTCHECK_BASE_URL";
pub const ENV_LOOKUP_URL: &str = "PARENTCHECK_LOOKUP_URL";
pub const ENV_CLEAR_URL: &str = "PARENTCHECK_CLEAR_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub lookup: Url,
    pub clear: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub endpoints: Endpoints,
    pub timeout: Duration,
    pub notice_duration: Duration,
}

/// Values that win over both the environment and the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub lookup_url: Option<String>,
    pub clear_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid {field} url {value:?}: {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported scheme for {field}: {value} (expected http or https)")]
    UnsupportedScheme { field: &'static str, value: String },
    #[error("invalid timeout_secs value: {0}")]
    InvalidTimeout(u64),
    #[error("invalid notifications.duration_secs value: {0}")]
    InvalidNoticeDuration(u64),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
    lookup_url: Option<String>,
    clear_url: Option<String>,
    timeout_secs: Option<u64>,
    notifications: Option<NotificationsFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NotificationsFile {
    duration_secs: Option<u64>,
}

pub fn load(config_path: Option<PathBuf>, overrides: &Overrides) -> Result<AppConfig> {
    let env_lookup = |key: &str| env::var(key).ok();
    let required = config_path.is_some();
    let file = match resolve_config_path(config_path) {
        Ok(path) => load_at_path(&path, required)?.unwrap_or_default(),
        Err(ConfigError::MissingHomeDir) if !required => ConfigFile::default(),
        Err(ConfigError::InvalidConfigPath(_)) if !required => ConfigFile::default(),
        Err(err) => return Err(err),
    };
    merge_config(file, &env_lookup, overrides)
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<ConfigFile>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(parsed))
}

fn merge_config(
    file: ConfigFile,
    env_lookup: &dyn Fn(&str) -> Option<String>,
    overrides: &Overrides,
) -> Result<AppConfig> {
    let pick = |cli: &Option<String>, key: &str, from_file: Option<String>, default: &str| {
        cli.clone()
            .or_else(|| env_lookup(key).filter(|value| !value.trim().is_empty()))
            .or(from_file)
            .unwrap_or_else(|| default.to_string())
    };

    let base_raw = pick(&overrides.base_url, ENV_BASE_URL, file.base_url, DEFAULT_BASE_URL);
    let lookup_raw = pick(
        &overrides.lookup_url,
        ENV_LOOKUP_URL,
        file.lookup_url,
        DEFAULT_LOOKUP_PATH,
    );
    let clear_raw = pick(
        &overrides.clear_url,
        ENV_CLEAR_URL,
        file.clear_url,
        DEFAULT_CLEAR_PATH,
    );

    let base = parse_absolute("base_url", &base_raw)?;
    let endpoints = Endpoints {
        lookup: resolve_endpoint("lookup_url", &base, &lookup_raw)?,
        clear: resolve_endpoint("clear_url", &base, &clear_raw)?,
    };

    let timeout_secs = file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(ConfigError::InvalidTimeout(timeout_secs));
    }
    let notice_secs = file
        .notifications
        .and_then(|notifications| notifications.duration_secs)
        .unwrap_or(DEFAULT_NOTICE_SECS);
    if notice_secs == 0 {
        return Err(ConfigError::InvalidNoticeDuration(notice_secs));
    }

    Ok(AppConfig {
        endpoints,
        timeout: Duration::from_secs(timeout_secs),
        notice_duration: Duration::from_secs(notice_secs),
    })
}

/// Absolute URLs are used as given; anything else is joined onto `base`.
pub fn resolve_endpoint(field: &'static str, base: &Url, raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    match Url::parse(trimmed) {
        Ok(url) => ensure_http(field, url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let joined = base.join(trimmed).map_err(|source| ConfigError::InvalidUrl {
                field,
                value: trimmed.to_string(),
                source,
            })?;
            ensure_http(field, joined)
        }
        Err(source) => Err(ConfigError::InvalidUrl {
            field,
            value: trimmed.to_string(),
            source,
        }),
    }
}

fn parse_absolute(field: &'static str, raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidUrl {
        field,
        value: trimmed.to_string(),
        source,
    })?;
    ensure_http(field, url)
}

fn ensure_http(field: &'static str, url: Url) -> Result<Url> {
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme {
            field,
            value: url.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        load_at_path, merge_config, ConfigError, ConfigFile, NotificationsFile, Overrides,
        DEFAULT_NOTICE_SECS, ENV_BASE_URL, ENV_CLEAR_URL, ENV_LOOKUP_URL,
    };
    use std::collections::HashMap;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_join_paths_onto_base() {
        let config = merge_config(ConfigFile::default(), &no_env, &Overrides::default())
            .expect("merge");
        assert_eq!(
            config.endpoints.lookup.as_str(),
            "http://localhost:3000/auth/parents/lookup-id-by-email"
        );
        assert_eq!(
            config.endpoints.clear.as_str(),
            "http://localhost:3000/user/delete-parent-child"
        );
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.notice_duration, Duration::from_secs(DEFAULT_NOTICE_SECS));
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let file = ConfigFile {
            base_url: Some("https://file.example".to_string()),
            lookup_url: Some("/file-lookup".to_string()),
            clear_url: Some("/file-clear".to_string()),
            timeout_secs: None,
            notifications: None,
        };
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_BASE_URL, "https://env.example"),
            (ENV_LOOKUP_URL, "/env-lookup"),
        ]);
        let env_lookup = |key: &str| env.get(key).map(|value| value.to_string());
        let overrides = Overrides {
            lookup_url: Some("https://cli.example/lookup".to_string()),
            ..Overrides::default()
        };

        let config = merge_config(file, &env_lookup, &overrides).expect("merge");
        assert_eq!(config.endpoints.lookup.as_str(), "https://cli.example/lookup");
        assert_eq!(config.endpoints.clear.as_str(), "https://env.example/file-clear");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let env_lookup = |key: &str| (key == ENV_CLEAR_URL).then(|| "  ".to_string());
        let config =
            merge_config(ConfigFile::default(), &env_lookup, &Overrides::default()).expect("merge");
        assert_eq!(config.endpoints.clear.path(), "/user/delete-parent-child");
    }

    #[test]
    fn rejects_non_http_schemes_and_bad_urls() {
        let overrides = Overrides {
            clear_url: Some("ftp://example.com/clear".to_string()),
            ..Overrides::default()
        };
        let err = merge_config(ConfigFile::default(), &no_env, &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme { field: "clear_url", .. }));

        let overrides = Overrides {
            base_url: Some("/not-absolute".to_string()),
            ..Overrides::default()
        };
        let err = merge_config(ConfigFile::default(), &no_env, &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { field: "base_url", .. }));
    }

    #[test]
    fn rejects_zero_durations() {
        let file = ConfigFile {
            timeout_secs: Some(0),
            ..ConfigFile::default()
        };
        assert!(matches!(
            merge_config(file, &no_env, &Overrides::default()),
            Err(ConfigError::InvalidTimeout(0))
        ));

        let file = ConfigFile {
            notifications: Some(NotificationsFile {
                duration_secs: Some(0),
            }),
            ..ConfigFile::default()
        };
        assert!(matches!(
            merge_config(file, &no_env, &Overrides::default()),
            Err(ConfigError::InvalidNoticeDuration(0))
        ));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
        assert!(load_at_path(&missing, false).expect("optional").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "base_url = \"https://api.example.com/v1/\"\nlookup_url = \"parents/lookup\"\ntimeout_secs = 8\n[notifications]\nduration_secs = 2\n",
        )
        .expect("write config");

        let file = load_at_path(&path, true).expect("load").expect("config");
        let config = merge_config(file, &no_env, &Overrides::default()).expect("merge");
        assert_eq!(
            config.endpoints.lookup.as_str(),
            "https://api.example.com/v1/parents/lookup"
        );
        assert_eq!(config.timeout, Duration::from_secs(8));
        assert_eq!(config.notice_duration, Duration::from_secs(2));
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "retries = 3\n").expect("write config");
        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
