// Standard library
use std::path::{Path, PathBuf};
use std::{env, fs};

// 3rd party crates
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use log::{error, info, LevelFilter};

// Project imports
use crate::providers::{ProviderConfig, ProviderKind};

// Current module imports
use super::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, CONFIG_PATH_ENV, CREDENTIAL_ENV_VARS, DEFAULT_CONFIG,
    ENV_PREFIX, ENV_SEPARATOR,
};
use super::errors::ValidationError;
use super::types::{Cache, ConfigManager, Geocoding, Providers, Settings, ValidatedSettings};

impl Settings {
    pub fn get_log_level(&self) -> String {
        self.log.level.to_lowercase()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        // Validate log level
        match self.log.level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => return Err(ValidationError::InvalidLogLevel(self.log.level.clone())),
        }

        for kind in ProviderKind::ALL {
            let config = self.providers.get(kind);
            let name = kind.config_key().to_string();
            if !config.weight.is_finite() || !(0.0..=1.0).contains(&config.weight) {
                return Err(ValidationError::InvalidProviderWeight {
                    provider: name,
                    weight: config.weight,
                });
            }
            if config.timeout_secs == 0 {
                return Err(ValidationError::InvalidProviderTimeout(name));
            }
            if let Some(quota) = config.rate_limit {
                if quota.max_requests == 0 || quota.window_secs == 0 {
                    return Err(ValidationError::InvalidRateLimit(name));
                }
            }
        }

        if self.cache.ttl == 0 {
            return Err(ValidationError::InvalidCacheTtl(self.cache.ttl));
        }

        let ceiling = self.resolution.ip_accuracy_ceiling;
        if !(ceiling > 0.0 && ceiling <= 1.0) {
            return Err(ValidationError::InvalidAccuracyCeiling(ceiling));
        }

        if self.resolution.deadline_secs == 0 {
            return Err(ValidationError::InvalidDeadline(
                self.resolution.deadline_secs,
            ));
        }

        if let Some(radius) = self.consensus.outlier_radius_km {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(ValidationError::InvalidOutlierRadius(radius));
            }
        }

        Ok(())
    }
}

impl Providers {
    pub fn get(&self, kind: ProviderKind) -> &ProviderConfig {
        match kind {
            ProviderKind::IpInfo => &self.ipinfo,
            ProviderKind::IpApi => &self.ipapi,
            ProviderKind::IpApiCom => &self.ip_api,
            ProviderKind::IpGeolocation => &self.ipgeolocation,
            ProviderKind::MaxMind => &self.maxmind,
            ProviderKind::IpStack => &self.ipstack,
            ProviderKind::Ip2Location => &self.ip2location,
        }
    }
}

impl Cache {
    pub fn redis_url(&self) -> Option<&str> {
        self.redis_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl Geocoding {
    /// The Google key, ignoring blanks and the sample placeholder.
    pub fn google_api_key(&self) -> Option<&str> {
        self.google_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.starts_with("your_"))
    }
}

impl ConfigManager {
    /// Creates a new `ConfigManager` instance by loading and validating the configuration.
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path: PathBuf = Self::get_config_path()?;
        Self::from_path(config_path)
    }

    /// Loads the configuration at `config_path`, writing the default file first if missing.
    pub fn from_path(config_path: PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        Self::ensure_config_file_exists(&config_path)?;

        let settings: Settings = Self::load_settings(&config_path, |name| env::var(name).ok())?;

        // Validate settings before proceeding
        let validated_settings = ValidatedSettings::new(settings).map_err(|e| {
            error!("Configuration validation failed: {}", e);
            e
        })?;

        let manager = ConfigManager {
            settings: validated_settings,
            config_path,
        };

        manager.adjust_logging_level();

        Ok(manager)
    }

    /// Determines the configuration file path.
    fn get_config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            Ok(PathBuf::from(path))
        } else if let Some(config_dir) = dirs::config_dir() {
            Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        } else {
            let msg: &str = "Could not determine the configuration directory";
            error!("{}", msg);
            Err(ConfigError::Message(msg.into()))
        }
    }

    /// Ensures that the configuration file exists, creating it if necessary.
    fn ensure_config_file_exists(config_path: &Path) -> Result<(), ConfigError> {
        if !config_path.exists() {
            if let Some(parent_dir) = config_path.parent() {
                fs::create_dir_all(parent_dir).map_err(|e| {
                    let msg: String = format!("Failed to create configuration directory: {}", e);
                    error!("{}", msg);
                    ConfigError::Message(msg)
                })?;
            }
            fs::write(config_path, DEFAULT_CONFIG).map_err(|e| {
                let msg: String = format!("Failed to create default configuration file: {}", e);
                error!("{}", msg);
                ConfigError::Message(msg)
            })?;
            info!("Default configuration file created at: {:?}", config_path);
        }
        Ok(())
    }

    /// Loads the settings from the configuration file and environment variables.
    ///
    /// Precedence, lowest first: built-in provider defaults, the file,
    /// `GEOC__`-style variables, then the conventional credential variables
    /// looked up through `lookup`.
    pub(crate) fn load_settings<F>(config_path: &Path, lookup: F) -> Result<Settings, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_file: &str = config_path.to_str().ok_or_else(|| {
            let msg: &str = "Configuration file path contains invalid UTF-8 characters";
            error!("{}", msg);
            ConfigError::Message(msg.into())
        })?;

        let mut builder = Self::with_provider_defaults(Config::builder())?
            .add_source(File::with_name(config_file))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            );

        for (variable, key) in CREDENTIAL_ENV_VARS {
            let value = lookup(variable).filter(|value| !value.trim().is_empty());
            builder = builder.set_override_option(key, value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Per-provider weights and quotas, so a provider table may omit them.
    fn with_provider_defaults(
        mut builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        for kind in ProviderKind::ALL {
            let prefix = format!("providers.{}", kind.config_key());
            builder = builder.set_default(format!("{}.weight", prefix), kind.default_weight())?;
            if let Some(quota) = kind.default_rate_limit() {
                builder = builder
                    .set_default(
                        format!("{}.rate_limit.max_requests", prefix),
                        u64::from(quota.max_requests),
                    )?
                    .set_default(format!("{}.rate_limit.window_secs", prefix), quota.window_secs)?;
            }
        }
        Ok(builder)
    }

    /// Adjusts the logging level based on the configuration.
    fn adjust_logging_level(&self) {
        let level_filter: LevelFilter = match self.settings.get_log_level().as_str() {
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        };
        log::set_max_level(level_filter);
    }

    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    pub fn get_log_level(&self) -> String {
        self.settings.get_log_level()
    }
}

impl ValidatedSettings {
    pub fn new(settings: Settings) -> Result<Self, ValidationError> {
        settings.validate()?;
        Ok(ValidatedSettings(settings))
    }

    pub fn into_inner(self) -> Settings {
        self.0
    }
}

// Implement Deref to allow transparent access to Settings fields
impl std::ops::Deref for ValidatedSettings {
    type Target = Settings;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
