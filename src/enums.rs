// src/enums.rs
//! Public enum types used throughout the crate

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Group a setting belongs to; also the cache key of its category aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum SettingCategory {
    #[default]
    General,
    Contact,
    Seo,
    Shipping,
    Favicon,
    ProductCard,
    Email,
    Social,
}

impl SettingCategory {
    pub const ALL: [SettingCategory; 8] = [
        SettingCategory::General,
        SettingCategory::Contact,
        SettingCategory::Seo,
        SettingCategory::Shipping,
        SettingCategory::Favicon,
        SettingCategory::ProductCard,
        SettingCategory::Email,
        SettingCategory::Social,
    ];

    /// Stored and cached name, e.g. `PRODUCT_CARD`
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingCategory::General => "GENERAL",
            SettingCategory::Contact => "CONTACT",
            SettingCategory::Seo => "SEO",
            SettingCategory::Shipping => "SHIPPING",
            SettingCategory::Favicon => "FAVICON",
            SettingCategory::ProductCard => "PRODUCT_CARD",
            SettingCategory::Email => "EMAIL",
            SettingCategory::Social => "SOCIAL",
        }
    }
}

impl fmt::Display for SettingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingCategory {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SettingsError::UnknownCategory(s.to_string()))
    }
}
