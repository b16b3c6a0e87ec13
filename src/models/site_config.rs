use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use std::collections::HashMap;

use crate::error::{AppError, AppResult};

/// One key-identified JSON value in the settings store.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub id: i64,
    #[sqlx(rename = "config_key")]
    pub key: String,
    #[sqlx(json)]
    pub value: Value,
    pub updated_at: i64,
}

#[derive(Debug, Deserialize)]
pub struct ConfigUpdate {
    pub key: String,
    pub value: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaintenanceMode {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingPixels {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook_pixels: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_pixels: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_google_indexing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_keywords: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MarketingPixels {
    /// Crawlers are allowed unless indexing was explicitly switched off.
    pub fn indexing_enabled(&self) -> bool {
        self.enable_google_indexing.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroImage {
    pub path: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HeroImage {
    pub fn new(path: impl Into<String>) -> Self {
        HeroImage {
            path: path.into(),
            extra: Map::new(),
        }
    }
}

/// Config keys with a known shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    MaintenanceMode,
    MarketingPixels,
    HeroImage,
    GeneralInfo,
    SectionVisibility,
}

impl SettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::MaintenanceMode => "maintenance_mode",
            SettingKey::MarketingPixels => "marketing_pixels",
            SettingKey::HeroImage => "hero_image",
            SettingKey::GeneralInfo => "general_info",
            SettingKey::SectionVisibility => "section_visibility",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "maintenance_mode" => Some(SettingKey::MaintenanceMode),
            "marketing_pixels" => Some(SettingKey::MarketingPixels),
            "hero_image" => Some(SettingKey::HeroImage),
            "general_info" => Some(SettingKey::GeneralInfo),
            "section_visibility" => Some(SettingKey::SectionVisibility),
            _ => None,
        }
    }
}

/// Check a value against the shape of its key. Unknown keys accept any JSON.
pub fn validate_setting(key: &str, value: &Value) -> AppResult<()> {
    let Some(setting) = SettingKey::parse(key) else {
        return Ok(());
    };

    let invalid = |e: serde_json::Error| AppError::Validation(format!("Invalid {}: {}", key, e));

    match setting {
        SettingKey::MaintenanceMode => {
            serde_json::from_value::<MaintenanceMode>(value.clone()).map_err(invalid)?;
        }
        SettingKey::MarketingPixels => {
            serde_json::from_value::<MarketingPixels>(value.clone()).map_err(invalid)?;
        }
        SettingKey::HeroImage => {
            let hero = serde_json::from_value::<HeroImage>(value.clone()).map_err(invalid)?;
            if hero.path.trim().is_empty() {
                return Err(AppError::Validation(
                    "Invalid hero_image: path must not be empty".to_string(),
                ));
            }
        }
        SettingKey::GeneralInfo => {
            if !value.is_object() {
                return Err(AppError::Validation(
                    "Invalid general_info: expected an object".to_string(),
                ));
            }
        }
        SettingKey::SectionVisibility => {
            serde_json::from_value::<HashMap<String, bool>>(value.clone()).map_err(invalid)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_keys_are_shape_checked() {
        assert!(validate_setting("maintenance_mode", &json!({ "enabled": true })).is_ok());
        assert!(validate_setting("maintenance_mode", &json!({ "enabled": "yes" })).is_err());

        assert!(validate_setting("hero_image", &json!({ "path": "/uploads/hero/a.png" })).is_ok());
        assert!(validate_setting("hero_image", &json!({ "path": "" })).is_err());
        assert!(validate_setting("hero_image", &json!("a.png")).is_err());

        assert!(validate_setting("section_visibility", &json!({ "faq": false })).is_ok());
        assert!(validate_setting("section_visibility", &json!({ "faq": "off" })).is_err());

        assert!(validate_setting("general_info", &json!([])).is_err());
    }

    #[test]
    fn test_unknown_keys_accept_anything() {
        assert!(validate_setting("homepage_banner", &json!([1, "two", null])).is_ok());
        assert!(validate_setting("homepage_banner", &json!("plain")).is_ok());
    }

    #[test]
    fn test_marketing_pixels_keep_unknown_fields() {
        let value = json!({
            "facebookPixels": [{ "id": "123" }],
            "enableGoogleIndexing": false,
            "tiktokPixel": "abc"
        });
        let pixels: MarketingPixels = serde_json::from_value(value).unwrap();
        assert!(!pixels.indexing_enabled());
        assert_eq!(pixels.extra.get("tiktokPixel"), Some(&json!("abc")));

        assert!(MarketingPixels::default().indexing_enabled());
    }
}
