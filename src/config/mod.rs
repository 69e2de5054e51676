use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    currency::{CurrencyCode, CurrencyDisplay, FormatOptions, Formatter, LocaleConfig, NegativeStyle},
    domain::CalendarZone,
    errors::{FinanceError, Result},
};

const TMP_SUFFIX: &str = "tmp";

/// User preferences that fix the formatting policy and data location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default)]
    pub negative_style: NegativeStyle,
    #[serde(default)]
    pub currency_display: CurrencyDisplay,
    /// `local` (default), `utc` or a fixed `+HH:MM` offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "ja-JP".into(),
            currency: "JPY".into(),
            negative_style: NegativeStyle::Sign,
            currency_display: CurrencyDisplay::Symbol,
            time_zone: None,
            data_dir: None,
        }
    }
}

impl Config {
    /// Builds the formatter used for every summary; unknown locales fall back to the default.
    pub fn formatter(&self) -> Formatter {
        let locale = LocaleConfig::for_tag(&self.locale).unwrap_or_else(|| {
            tracing::warn!(locale = %self.locale, "unknown locale, using default");
            LocaleConfig::default()
        });
        Formatter::new(CurrencyCode::new(&self.currency), locale)
            .with_options(FormatOptions {
                currency_display: self.currency_display,
                negative_style: self.negative_style,
            })
            .with_zone(self.zone())
    }

    fn zone(&self) -> CalendarZone {
        let Some(name) = self.time_zone.as_deref() else {
            return CalendarZone::Local;
        };
        CalendarZone::parse(name).unwrap_or_else(|| {
            tracing::warn!(time_zone = %name, "unknown time zone, using local time");
            CalendarZone::Local
        })
    }

    /// Directory holding the transaction store, relative to `base` unless overridden.
    pub fn store_dir(&self, base: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathResolver::store_dir_in(base))
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            FinanceError::Config(format!("`{}` is invalid: {err}", self.path.display()))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
