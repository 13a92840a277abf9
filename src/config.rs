//! Runtime configuration.
//!
//! Defaults match the deployed application; each value can be overridden
//! with a `BACHE_*` environment variable.

use std::env;

use crate::error::ConfigError;
use crate::export::map::MapView;
use crate::storage::models::Coordinates;

pub const DEFAULT_PHOTO_PREFIX: &str = "pothole_reports";
pub const DEFAULT_AVATAR_PREFIX: &str = "avatars";
pub const DEFAULT_PHOTO_CONTENT_TYPE: &str = "image/jpeg";
pub const DEFAULT_MODEL_NAME: &str = "googleai/gemini-2.0-flash";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "https://storage.bache.local";

/// Bahía Blanca city centre.
pub const DEFAULT_MAP_CENTER: Coordinates = Coordinates {
    lat: -38.7183,
    lng: -62.2661,
};
pub const DEFAULT_MAP_ZOOM: u8 = 13;

#[derive(Debug, Clone, PartialEq)]
pub struct CoreConfig {
    pub photo_prefix: String,
    pub avatar_prefix: String,
    pub photo_content_type: String,
    pub model_name: String,
    pub public_base_url: String,
    pub map_view: MapView,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            photo_prefix: DEFAULT_PHOTO_PREFIX.to_string(),
            avatar_prefix: DEFAULT_AVATAR_PREFIX.to_string(),
            photo_content_type: DEFAULT_PHOTO_CONTENT_TYPE.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            map_view: MapView {
                center: DEFAULT_MAP_CENTER,
                zoom: DEFAULT_MAP_ZOOM,
            },
        }
    }
}

impl CoreConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using `lookup` for each variable; unset variables keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = non_empty(lookup("BACHE_PHOTO_PREFIX")) {
            config.photo_prefix = v;
        }
        if let Some(v) = non_empty(lookup("BACHE_AVATAR_PREFIX")) {
            config.avatar_prefix = v;
        }
        if let Some(v) = non_empty(lookup("BACHE_PHOTO_CONTENT_TYPE")) {
            config.photo_content_type = v;
        }
        if let Some(v) = non_empty(lookup("BACHE_MODEL_NAME")) {
            config.model_name = v;
        }
        if let Some(v) = non_empty(lookup("BACHE_PUBLIC_BASE_URL")) {
            url::Url::parse(&v).map_err(|e| ConfigError::InvalidValue {
                key: "BACHE_PUBLIC_BASE_URL",
                reason: e.to_string(),
            })?;
            config.public_base_url = v;
        }
        if let Some(v) = non_empty(lookup("BACHE_MAP_CENTER")) {
            config.map_view.center = Coordinates::parse(&v)
                .filter(Coordinates::in_range)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: "BACHE_MAP_CENTER",
                    reason: format!("expected \"lat, lng\", got {:?}", v),
                })?;
        }
        if let Some(v) = non_empty(lookup("BACHE_MAP_ZOOM")) {
            config.map_view.zoom = v.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    key: "BACHE_MAP_ZOOM",
                    reason: e.to_string(),
                }
            })?;
        }

        log::debug!(
            "CONFIG_LOADED photo_prefix={} avatar_prefix={} model={} base_url={}",
            config.photo_prefix,
            config.avatar_prefix,
            config.model_name,
            config.public_base_url
        );

        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
