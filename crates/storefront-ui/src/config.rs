//! Storefront configuration.
//!
//! Every section has defaults matching the stock storefront, so an empty
//! file (or no file at all) is a valid configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use storefront_cart::Currency;
use storefront_kv::validate_key;
use thiserror::Error;

/// Errors raised while loading or saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML parse or encode failure.
    #[error("Invalid TOML config {path}: {message}")]
    Toml { path: String, message: String },

    /// JSON parse or encode failure.
    #[error("Invalid JSON config {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value is outside its allowed range.
    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Top-level storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub navbar: NavbarConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub messages: MessageConfig,
    #[serde(default)]
    pub signup: SignupConfig,
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;

        let config: Self = if is_json(path) {
            serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: display,
                source,
            })?
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::Toml {
                path: display,
                message: e.to_string(),
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to a file, picking the format from the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
                path: display.clone(),
                source,
            })?
        } else {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Toml {
                path: display.clone(),
                message: e.to_string(),
            })?
        };

        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: display,
            source,
        })
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.currency().is_none() {
            return Err(ConfigError::Invalid {
                field: "store.currency",
                reason: format!("unknown currency code {:?}", self.store.currency),
            });
        }
        if self.layout.tablet_breakpoint >= self.layout.desktop_breakpoint {
            return Err(ConfigError::Invalid {
                field: "layout.tablet_breakpoint",
                reason: "must be below layout.desktop_breakpoint".to_string(),
            });
        }
        if self.navbar.quick_scroll_threshold < self.navbar.collapse_threshold {
            return Err(ConfigError::Invalid {
                field: "navbar.quick_scroll_threshold",
                reason: "must not be below navbar.collapse_threshold".to_string(),
            });
        }
        if self.signup.otp_length == 0 {
            return Err(ConfigError::Invalid {
                field: "signup.otp_length",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.search.param.is_empty() {
            return Err(ConfigError::Invalid {
                field: "search.param",
                reason: "must not be empty".to_string(),
            });
        }
        validate_key(&self.storage.cart_key).map_err(|e| ConfigError::Invalid {
            field: "storage.cart_key",
            reason: e.to_string(),
        })?;
        validate_key(&self.storage.theme_key).map_err(|e| ConfigError::Invalid {
            field: "storage.theme_key",
            reason: e.to_string(),
        })?;
        if self.storage.cart_key == self.storage.theme_key {
            return Err(ConfigError::Invalid {
                field: "storage.theme_key",
                reason: "must differ from storage.cart_key".to_string(),
            });
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Persistence slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Slot holding the cart array.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
    /// Slot holding the theme preference.
    #[serde(default = "default_theme_key")]
    pub theme_key: String,
    /// Directory for the file-backed store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_cart_key() -> String {
    storefront_cart::DEFAULT_CART_KEY.to_string()
}

fn default_theme_key() -> String {
    "theme".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".storefront")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cart_key: default_cart_key(),
            theme_key: default_theme_key(),
            data_dir: default_data_dir(),
        }
    }
}

/// Pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// ISO currency code prices are expressed in.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl StoreConfig {
    /// Parsed currency, `None` for an unknown code.
    pub fn currency(&self) -> Option<Currency> {
        Currency::from_code(&self.currency)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

/// Search box behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Catalog page the search redirects to.
    #[serde(default = "default_catalog_page")]
    pub catalog_page: String,
    /// Query parameter carrying the search term.
    #[serde(default = "default_search_param")]
    pub param: String,
    /// Inline message for an empty search.
    #[serde(default = "default_empty_message")]
    pub empty_message: String,
}

fn default_catalog_page() -> String {
    "shopping.html".to_string()
}

fn default_search_param() -> String {
    "search".to_string()
}

fn default_empty_message() -> String {
    "Please enter a medicine name to search.".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            catalog_page: default_catalog_page(),
            param: default_search_param(),
            empty_message: default_empty_message(),
        }
    }
}

/// Responsive breakpoints and event smoothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Widths above this are desktop.
    #[serde(default = "default_desktop_breakpoint")]
    pub desktop_breakpoint: u32,
    /// Widths at or below this are mobile.
    #[serde(default = "default_tablet_breakpoint")]
    pub tablet_breakpoint: u32,
    /// Quiet period for resize and scroll-stop handling.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_desktop_breakpoint() -> u32 {
    1024
}

fn default_tablet_breakpoint() -> u32 {
    768
}

fn default_debounce_ms() -> u64 {
    200
}

impl LayoutConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            desktop_breakpoint: default_desktop_breakpoint(),
            tablet_breakpoint: default_tablet_breakpoint(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Navbar scroll behaviour, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavbarConfig {
    #[serde(default = "default_collapse_threshold")]
    pub collapse_threshold: u32,
    #[serde(default = "default_quick_scroll_threshold")]
    pub quick_scroll_threshold: u32,
    #[serde(default = "default_back_to_top_threshold")]
    pub back_to_top_threshold: u32,
}

fn default_collapse_threshold() -> u32 {
    50
}

fn default_quick_scroll_threshold() -> u32 {
    150
}

fn default_back_to_top_threshold() -> u32 {
    300
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            collapse_threshold: default_collapse_threshold(),
            quick_scroll_threshold: default_quick_scroll_threshold(),
            back_to_top_threshold: default_back_to_top_threshold(),
        }
    }
}

/// Product carousels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Minimum horizontal travel for a swipe, in pixels.
    #[serde(default = "default_min_swipe")]
    pub min_swipe_distance: u32,
    #[serde(default = "default_interval_ms")]
    pub default_interval_ms: u64,
    #[serde(default = "default_featured_interval_ms")]
    pub featured_interval_ms: u64,
    #[serde(default = "default_most_selling_interval_ms")]
    pub most_selling_interval_ms: u64,
}

fn default_min_swipe() -> u32 {
    50
}

fn default_interval_ms() -> u64 {
    7000
}

fn default_featured_interval_ms() -> u64 {
    8000
}

fn default_most_selling_interval_ms() -> u64 {
    9000
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            min_swipe_distance: default_min_swipe(),
            default_interval_ms: default_interval_ms(),
            featured_interval_ms: default_featured_interval_ms(),
            most_selling_interval_ms: default_most_selling_interval_ms(),
        }
    }
}

/// Toast messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageConfig {
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u64,
}

fn default_toast_ms() -> u64 {
    3000
}

impl MessageConfig {
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            toast_ms: default_toast_ms(),
        }
    }
}

/// Signup wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupConfig {
    /// Digits in a complete one-time password.
    #[serde(default = "default_otp_length")]
    pub otp_length: usize,
    /// Delay between OTP verification and the confirmation step.
    #[serde(default = "default_otp_advance_delay_ms")]
    pub otp_advance_delay_ms: u64,
}

fn default_otp_length() -> usize {
    4
}

fn default_otp_advance_delay_ms() -> u64 {
    500
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            otp_length: default_otp_length(),
            otp_advance_delay_ms: default_otp_advance_delay_ms(),
        }
    }
}
