//! Animate-on-scroll ("reveal") settings, handed to the collaborator once.

use serde::Deserialize;

use crate::error::ConfigError;

/// Easing curves the reveal library recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    #[default]
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
}

impl Easing {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ease => "ease",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
            Self::EaseInBack => "ease-in-back",
            Self::EaseOutBack => "ease-out-back",
            Self::EaseInOutBack => "ease-in-out-back",
            Self::EaseInSine => "ease-in-sine",
            Self::EaseOutSine => "ease-out-sine",
            Self::EaseInOutSine => "ease-in-out-sine",
            Self::EaseInQuad => "ease-in-quad",
            Self::EaseOutQuad => "ease-out-quad",
            Self::EaseInOutQuad => "ease-in-out-quad",
            Self::EaseInCubic => "ease-in-cubic",
            Self::EaseOutCubic => "ease-out-cubic",
            Self::EaseInOutCubic => "ease-in-out-cubic",
            Self::EaseInQuart => "ease-in-quart",
            Self::EaseOutQuart => "ease-out-quart",
            Self::EaseInOutQuart => "ease-in-out-quart",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub duration_ms: u32,
    pub easing: Easing,
    /// Animate only the first time an element enters the viewport.
    pub once: bool,
    /// Trigger offset from the viewport bottom, in pixels.
    pub offset_px: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            duration_ms: 800,
            easing: Easing::EaseOut,
            once: true,
            offset_px: 100,
        }
    }
}

impl RevealConfig {
    /// The library accepts durations in 50ms steps up to 3000ms.
    pub const MAX_DURATION_MS: u32 = 3000;

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.duration_ms > Self::MAX_DURATION_MS || self.duration_ms % 50 != 0 {
            return Err(ConfigError::invalid(
                "reveal.duration_ms",
                format!(
                    "must be a multiple of 50 up to {}, got {}",
                    Self::MAX_DURATION_MS,
                    self.duration_ms
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_page() {
        let reveal = RevealConfig::default();
        assert_eq!(reveal.duration_ms, 800);
        assert_eq!(reveal.easing.as_str(), "ease-out");
        assert!(reveal.once);
        assert_eq!(reveal.offset_px, 100);
        assert!(reveal.validate().is_ok());
    }

    #[test]
    fn test_easing_parses_kebab_case() {
        let reveal: RevealConfig = toml::from_str("easing = \"ease-in-out-cubic\"\n").unwrap();
        assert_eq!(reveal.easing, Easing::EaseInOutCubic);
    }

    #[test]
    fn test_off_step_duration_rejected() {
        let reveal = RevealConfig {
            duration_ms: 825,
            ..Default::default()
        };
        assert!(reveal.validate().is_err());
    }
}
