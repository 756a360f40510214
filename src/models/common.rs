use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error body the API sends with non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Extracts `detail` from a raw body; `None` if the body is not JSON or has no detail.
    ///
    /// Structured details (validation error lists) are returned as compact JSON.
    pub fn detail_from(body: &str) -> Option<String> {
        let detail = serde_json::from_str::<ErrorBody>(body).ok()?.detail?;
        let text = match detail {
            Value::Null => return None,
            Value::String(text) => text,
            other => other.to_string(),
        };
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

pub const DEFAULT_SAMPLER: &str = "Euler a";

pub const SAMPLERS: &[&str] = &["Euler a", "Euler", "DPM++ 2M Karras", "DPM++ SDE Karras", "DDIM"];

/// Aspect-ratio buttons and the size each one sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SizePreset {
    Square,
    #[default]
    Portrait,
    Landscape,
    Tall,
    Wide,
}

impl SizePreset {
    pub const ALL: [SizePreset; 5] = [
        SizePreset::Square,
        SizePreset::Portrait,
        SizePreset::Landscape,
        SizePreset::Tall,
        SizePreset::Wide,
    ];

    pub fn ratio(&self) -> &'static str {
        match self {
            SizePreset::Square => "1:1",
            SizePreset::Portrait => "2:3",
            SizePreset::Landscape => "3:2",
            SizePreset::Tall => "9:16",
            SizePreset::Wide => "16:9",
        }
    }

    /// Preset whose size matches `size`; `None` for a custom size.
    pub fn from_size(size: &str) -> Option<SizePreset> {
        let size = size.trim();
        SizePreset::ALL
            .into_iter()
            .find(|preset| preset.size() == size)
    }

    pub fn size(&self) -> &'static str {
        match self {
            SizePreset::Square => "512x512",
            SizePreset::Portrait => "512x768",
            SizePreset::Landscape => "768x512",
            SizePreset::Tall => "576x1024",
            SizePreset::Wide => "1024x576",
        }
    }
}

/// Parses a `WxH` size string into positive dimensions.
pub fn parse_size(size: &str) -> Option<(u32, u32)> {
    let (width, height) = size.trim().split_once('x')?;
    let width: u32 = width.trim().parse().ok()?;
    let height: u32 = height.trim().parse().ok()?;
    if width == 0 || height == 0 {
        return None;
    }
    Some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_from_body() {
        assert_eq!(
            ErrorBody::detail_from(r#"{"detail": "bad seed"}"#),
            Some("bad seed".to_string())
        );
        assert_eq!(ErrorBody::detail_from(r#"{"detail": ""}"#), None);
        assert_eq!(ErrorBody::detail_from(r#"{}"#), None);
        assert_eq!(ErrorBody::detail_from(r#"{"detail": null}"#), None);
        assert_eq!(
            ErrorBody::detail_from(r#"{"detail": [{"msg": "field required"}]}"#),
            Some(r#"[{"msg":"field required"}]"#.to_string())
        );
        assert_eq!(ErrorBody::detail_from("<html>502</html>"), None);
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("512x768"), Some((512, 768)));
        assert_eq!(parse_size(" 1024x576 "), Some((1024, 576)));
        assert_eq!(parse_size("0x512"), None);
        assert_eq!(parse_size("512"), None);
        assert_eq!(parse_size("axb"), None);
    }

    #[test]
    fn test_presets_have_valid_sizes() {
        for preset in SizePreset::ALL {
            assert!(parse_size(preset.size()).is_some(), "{}", preset.ratio());
        }
        assert_eq!(SizePreset::default().size(), "512x768");
    }

    #[test]
    fn test_preset_from_size() {
        assert_eq!(SizePreset::from_size(" 1024x576 "), Some(SizePreset::Wide));
        assert_eq!(SizePreset::from_size("512x512"), Some(SizePreset::Square));
        assert_eq!(SizePreset::from_size("640x640"), None);
    }
}
