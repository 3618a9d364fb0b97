use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides (`CAPFLAGS__HARDWARE__CONTEXT_VERSION=2`).
pub const ENV_PREFIX: &str = "CAPFLAGS";

/// Base name of the configuration file looked up when no path is given.
pub const DEFAULT_CONFIG: &str = "capflags";

/// Custom error type for config loading.
#[capflags_derive::capflags_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// This function implements a layered configuration strategy:
/// 1. **Base File**: Loads settings from `path` (TOML, JSON or YAML by extension). The file is
///    required when a path is given; without one, an optional `capflags.*` file in the working
///    directory is used if present.
/// 2. **Environment Overrides**: Overlays values from environment variables prefixed with
///    `CAPFLAGS__`. Nested structures are accessed using double underscores (e.g.
///    `CAPFLAGS__HARDWARE__MAX_TEXTURE_SIZE` maps to `hardware.max_texture_size`).
///    `CAPFLAGS__DEVICE__TRAITS` takes a comma separated list.
///
/// # Errors
/// This function will return an error if:
/// * An explicitly given configuration file cannot be found or parsed.
/// * The merged settings do not match the structure of type `T`.
///
/// # Example
/// ```rust
/// use capflags_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     level: String,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local.toml")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    build(path, None)
}

/// Same as [`load_config`], reading environment overrides from `vars` instead of the process
/// environment. Keys keep their `CAPFLAGS__` prefix.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_env<T>(
    path: Option<impl AsRef<Path>>,
    vars: config::Map<String, String>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    build(path, Some(vars))
}

fn build<T>(
    path: Option<impl AsRef<Path>>,
    vars: Option<config::Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match path {
        Some(path) => {
            let path: PathBuf = path.as_ref().to_path_buf();
            info!("Loading config from {}", path.display());
            File::from(path.as_path()).required(true)
        },
        None => {
            info!("Loading optional config '{DEFAULT_CONFIG}'");
            File::with_name(DEFAULT_CONFIG).required(false)
        },
    };

    let environment = Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .convert_case(config::Case::Snake)
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("device.traits")
        .source(vars);

    let config = Config::builder()
        .add_source(file)
        .add_source(environment)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
