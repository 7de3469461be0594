use config::{Config, ConfigError, Map};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_MAX_SHARES, ENV_PREFIX};

/// Which interpolation formula candidates are computed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Division-free formula; see [`crate::interpolate::ReferenceInterpolator`].
    #[default]
    Reference,
    /// Rational Lagrange; see [`crate::interpolate::ExactInterpolator`].
    Exact,
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reference" => Ok(Mode::Reference),
            "exact" => Ok(Mode::Exact),
            other => Err(ConfigError::Message(format!("unknown mode {other:?}"))),
        }
    }
}

/// How reports are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::Message(format!("unknown output format {other:?}"))),
        }
    }
}

/// Settings for the `shard-recover` binary.
///
/// Values are layered: built-in defaults, then `conf.toml` in the
/// configuration directory, then `SHARD_*` environment variables
/// (e.g. `SHARD_MAX_SHARES=12`, `SHARD_MODE=exact`). Command-line flags are
/// applied on top by the binary.
///
/// # Fields
///
/// * `max_shares` - Largest share count accepted for one reconstruction.
/// * `mode` - Interpolation formula.
/// * `output` - Report format.
/// * `hex` - Render secrets as hex instead of decimal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoverConfig {
    pub max_shares: usize,
    pub mode: Mode,
    pub output: OutputFormat,
    pub hex: bool,
}

impl Default for RecoverConfig {
    fn default() -> Self {
        RecoverConfig {
            max_shares: DEFAULT_MAX_SHARES,
            mode: Mode::default(),
            output: OutputFormat::default(),
            hex: false,
        }
    }
}

impl RecoverConfig {
    /// Loads configuration from the directory at `path`.
    ///
    /// The directory and a `conf.toml` holding the defaults are created when
    /// missing.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let conf_file = Self::init(path)?;
        debug!("📝 Loaded config at path: {:#?}", conf_file);
        Self::load(Some(conf_file), None)
    }

    /// Loads defaults and environment overrides only.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None, None)
    }

    /// Creates the configuration directory and a default `conf.toml` if they
    /// do not exist, returning the file path. An existing file is left as is.
    pub fn init(path: impl AsRef<Path>) -> Result<PathBuf, ConfigError> {
        let config_path = path.as_ref();
        if !config_path.exists() {
            fs::create_dir_all(config_path).map_err(|err| ConfigError::Foreign(Box::new(err)))?;
        }

        let conf_file = config_path.join(CONFIG_FILE_NAME);
        if !conf_file.exists() {
            let toml = toml::to_string_pretty(&RecoverConfig::default())
                .map_err(|err| ConfigError::Foreign(Box::new(err)))?;
            fs::write(&conf_file, toml).map_err(|err| ConfigError::Foreign(Box::new(err)))?;
            debug!("📝 Wrote default config to {:?}", conf_file);
        }

        Ok(conf_file)
    }

    /// `env` replaces the process environment as the `SHARD_*` source when
    /// given.
    fn load(
        conf_file: Option<PathBuf>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("max_shares", DEFAULT_MAX_SHARES as i64)?
            .set_default("mode", "reference")?
            .set_default("output", "text")?
            .set_default("hex", false)?;

        if let Some(conf_file) = conf_file {
            builder = builder.add_source(config::File::from(conf_file));
        }

        let settings = builder
            // Eg.. `SHARD_MODE=exact shard-recover solve case.json`
            .add_source(config::Environment::with_prefix(ENV_PREFIX).source(env))
            .build()?;

        settings.try_into()
    }
}

impl TryFrom<Config> for RecoverConfig {
    type Error = ConfigError;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        let max_shares = config.get_int("max_shares")?;
        let max_shares = usize::try_from(max_shares).map_err(|_| {
            ConfigError::Message(format!("max_shares must be non-negative, got {max_shares}"))
        })?;

        Ok(RecoverConfig {
            max_shares,
            mode: config.get_string("mode")?.parse()?,
            output: config.get_string("output")?.parse()?,
            hex: config.get_bool("hex")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Loads `dir` the way [`RecoverConfig::new`] does, with `env` standing in
    /// for the process environment.
    fn load_isolated(dir: &Path, env: &[(&str, &str)]) -> Result<RecoverConfig, ConfigError> {
        let conf_file = RecoverConfig::init(dir)?;
        let env: Map<String, String> = env
            .iter()
            .map(|&(key, value)| (key.to_string(), value.to_string()))
            .collect();
        RecoverConfig::load(Some(conf_file), Some(env))
    }

    fn write_conf(dir: &TempDir, contents: &str) {
        fs::write(dir.path().join(CONFIG_FILE_NAME), contents).unwrap();
    }

    #[test]
    fn test_new_writes_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("conf");
        let config = load_isolated(&dir, &[]).unwrap();
        assert!(dir.join(CONFIG_FILE_NAME).exists());
        assert_eq!(config, RecoverConfig::default());

        let written = fs::read_to_string(dir.join(CONFIG_FILE_NAME)).unwrap();
        assert!(written.contains("mode = \"reference\""));
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_conf(
            &dir,
            "max_shares = 8\nmode = \"exact\"\noutput = \"json\"\nhex = true\n",
        );

        let config = load_isolated(dir.path(), &[]).unwrap();
        assert_eq!(config.max_shares, 8);
        assert_eq!(config.mode, Mode::Exact);
        assert_eq!(config.output, OutputFormat::Json);
        assert!(config.hex);
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        write_conf(&dir, "max_shares = 8\nmode = \"exact\"\n");

        let config = load_isolated(
            dir.path(),
            &[("SHARD_MODE", "reference"), ("SHARD_MAX_SHARES", "12")],
        )
        .unwrap();
        assert_eq!(config.mode, Mode::Reference);
        assert_eq!(config.max_shares, 12);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_conf(&dir, "mode = \"modular\"\n");
        assert!(load_isolated(dir.path(), &[]).is_err());

        write_conf(&dir, "max_shares = -1\n");
        assert!(load_isolated(dir.path(), &[]).is_err());

        write_conf(&dir, "");
        assert!(load_isolated(dir.path(), &[("SHARD_OUTPUT", "csv")]).is_err());
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("EXACT".parse::<Mode>().unwrap(), Mode::Exact);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("csv".parse::<OutputFormat>().is_err());
    }
}
