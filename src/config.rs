use crate::cli::ConnectionArgs;
use crate::error::DoqlError;
use directories::ProjectDirs;
use secrecy::SecretString;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Host used when none is configured anywhere.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub connection: ConnectionConfig,
    pub verbose: bool,
}

/// Connection target for the DOQL endpoint.
#[derive(Debug)]
pub struct ConnectionConfig {
    pub host: String,
    pub user: String,
    pub passwd: SecretString,
    /// Accept self-signed certificates. On unless explicitly turned off.
    pub trust_server_certificate: bool,
}

// --- TOML config file structs ---

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    #[serde(default)]
    defaults: TomlDefaults,
    #[serde(default)]
    profiles: HashMap<String, TomlProfile>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlDefaults {
    verbose: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone)]
struct TomlProfile {
    host: Option<String>,
    user: Option<String>,
    passwd: Option<String>,
    passwd_env: Option<String>,
    trust_server_certificate: Option<bool>,
}

/// Config path resolution result; explicit paths must exist, auto-resolved
/// ones may be absent.
struct ResolvedConfigPath {
    path: PathBuf,
    /// true if the user named the path via --config or DOQL_CONFIG
    explicit: bool,
}

/// Resolve the config file path: --config flag > env var > platform default.
fn resolve_config_path(cli_config: Option<&PathBuf>) -> Option<ResolvedConfigPath> {
    if let Some(path) = cli_config {
        return Some(ResolvedConfigPath { path: path.clone(), explicit: true });
    }
    if let Ok(path) = std::env::var("DOQL_CONFIG") {
        return Some(ResolvedConfigPath { path: PathBuf::from(path), explicit: true });
    }
    ProjectDirs::from("", "", "doql").map(|dirs| ResolvedConfigPath {
        path: dirs.config_dir().join("config.toml"),
        explicit: false,
    })
}

/// Load and parse the TOML config file (if it exists).
fn load_toml_config(resolved: Option<&ResolvedConfigPath>) -> Result<TomlConfig, DoqlError> {
    let resolved = match resolved {
        Some(r) => r,
        None => return Ok(TomlConfig::default()),
    };

    if !resolved.path.exists() {
        if resolved.explicit {
            return Err(DoqlError::Config {
                message: format!("config file not found: {}", resolved.path.display()),
            });
        }
        // Auto-resolved path is allowed to be absent
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&resolved.path).map_err(|e| DoqlError::Config {
        message: format!("cannot read config file {}: {}", resolved.path.display(), e),
    })?;

    toml::from_str(&content).map_err(|e| DoqlError::Config {
        message: format!("invalid config file {}: {}", resolved.path.display(), e),
    })
}

/// Resolve a password from direct value, env indirection, or env var.
fn resolve_secret(
    direct: Option<&str>,
    env_key: Option<&str>,
    fallback_env: &str,
) -> Option<SecretString> {
    // Direct value first
    if let Some(val) = direct
        && !val.is_empty()
    {
        return Some(SecretString::from(val.to_string()));
    }
    // Env indirection (e.g., passwd_env = "MY_SECRET")
    if let Some(key) = env_key
        && let Ok(val) = std::env::var(key)
        && !val.is_empty()
    {
        return Some(SecretString::from(val));
    }
    // Fallback env var (e.g., DOQL_PASSWD)
    if let Ok(val) = std::env::var(fallback_env)
        && !val.is_empty()
    {
        return Some(SecretString::from(val));
    }
    None
}

/// Build AppConfig from a subcommand's connection args.
///
/// Precedence per field: CLI/env (clap folds env vars into args) > profile >
/// built-in default. Only `host` has a built-in default; `user` and `passwd`
/// fall back to empty, which the appliance rejects on its own.
pub fn load(
    args: &ConnectionArgs,
    verbose: bool,
    config_path: Option<&PathBuf>,
) -> Result<AppConfig, DoqlError> {
    let resolved_path = resolve_config_path(config_path);
    let toml_config = load_toml_config(resolved_path.as_ref())?;

    // Load profile if specified
    let profile = args
        .profile
        .as_ref()
        .map(|name| {
            toml_config.profiles.get(name).cloned().ok_or_else(|| DoqlError::Config {
                message: format!("profile '{}' not found in config file", name),
            })
        })
        .transpose()?;

    let profile = profile.unwrap_or_default();

    let host = args
        .host
        .as_deref()
        .filter(|h| !h.is_empty())
        .or(profile.host.as_deref())
        .unwrap_or(DEFAULT_HOST)
        .to_string();

    let user = args
        .user
        .as_deref()
        .or(profile.user.as_deref())
        .unwrap_or("")
        .to_string();

    let passwd = resolve_secret(args.passwd.as_deref(), profile.passwd_env.as_deref(), "DOQL_PASSWD")
        .or_else(|| profile.passwd.as_ref().map(|p| SecretString::from(p.clone())))
        .unwrap_or_else(|| SecretString::from(String::new()));

    let trust_server_certificate = args
        .trust_server_certificate
        .or(profile.trust_server_certificate)
        .unwrap_or(true);

    // verbose: CLI/ENV OR TOML default
    let verbose = verbose || toml_config.defaults.verbose.unwrap_or(false);

    Ok(AppConfig {
        connection: ConnectionConfig {
            host,
            user,
            passwd,
            trust_server_certificate,
        },
        verbose,
    })
}
