use std::path::Path;

use serde::Deserialize;

/// JPEG quality applied when a decode entry point receives no explicit value.
pub const DEFAULT_QUALITY: i32 = 75;

/// Upper bound on the bytes the codec may allocate for a single decode.
pub const DEFAULT_MAX_ALLOC: u64 = 512 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_quality: i32,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub max_alloc: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_quality: DEFAULT_QUALITY,
            max_width: None,
            max_height: None,
            max_alloc: Some(DEFAULT_MAX_ALLOC),
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        Ok(serde_yml::from_str(yaml)?)
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Quality の指定がなければ既定値を使う。値の範囲は検証しない。
    pub fn resolve_quality(&self, quality: Option<i32>) -> i32 {
        quality.unwrap_or(self.default_quality)
    }

    /// デコード時にコーデックへ渡す制限値を組み立てる。
    pub(crate) fn decode_limits(&self) -> image::Limits {
        let mut limits = image::Limits::no_limits();
        limits.max_image_width = self.max_width;
        limits.max_image_height = self.max_height;
        limits.max_alloc = self.max_alloc;
        limits
    }
}
