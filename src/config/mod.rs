//! Page configuration.
//!
//! Every threshold, factor and collaborator setting the coordinator uses.
//! Defaults reproduce the live page; a TOML file can override any subset.
//!
//! # Example
//!
//! ```rust
//! use crystal_folio::config::PageConfig;
//!
//! let config = PageConfig::from_toml_str("[nav]\nsticky_threshold = 80.0\n").unwrap();
//! assert_eq!(config.nav.sticky_threshold, 80.0);
//! assert_eq!(config.back_to_top.threshold, 500.0);
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub mod carousel;
pub mod reveal;

pub use carousel::{
    A11yConfig, BreakpointOverride, CarouselConfig, CarouselEffect, CoverflowConfig,
    CoverflowOverride, NavigationConfig, PaginationConfig, ResolvedCarousel, SlidesPerView,
};
pub use reveal::{Easing, RevealConfig};

// =============================================================================
// PageConfig
// =============================================================================

/// Top-level configuration, validated once at mount.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub nav: NavConfig,
    pub hero: HeroConfig,
    pub tilt: TiltConfig,
    pub back_to_top: BackToTopConfig,
    pub contact: ContactConfig,
    pub reveal: RevealConfig,
    pub carousels: Vec<CarouselConfig>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            nav: NavConfig::default(),
            hero: HeroConfig::default(),
            tilt: TiltConfig::default(),
            back_to_top: BackToTopConfig::default(),
            contact: ContactConfig::default(),
            reveal: RevealConfig::default(),
            carousels: vec![CarouselConfig::project(), CarouselConfig::process()],
        }
    }
}

impl PageConfig {
    /// Parse a TOML document. Missing keys fall back to defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section. Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.nav.validate()?;
        self.hero.validate()?;
        self.tilt.validate()?;
        self.back_to_top.validate()?;
        self.contact.validate()?;
        self.reveal.validate()?;
        for carousel in &self.carousels {
            carousel.validate()?;
        }
        Ok(())
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be a finite non-negative number, got {value}"),
        ))
    }
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be a finite positive number, got {value}")))
    }
}

fn finite(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be finite"))
    }
}

// =============================================================================
// Navigation
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Header turns sticky once `scroll_y` exceeds this.
    pub sticky_threshold: f64,
    /// Visible fraction at which a section becomes active.
    pub active_ratio: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            sticky_threshold: 50.0,
            active_ratio: 0.3,
        }
    }
}

impl NavConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("nav.sticky_threshold", self.sticky_threshold)?;
        if !(self.active_ratio > 0.0 && self.active_ratio <= 1.0) {
            return Err(ConfigError::invalid(
                "nav.active_ratio",
                format!("must be in (0, 1], got {}", self.active_ratio),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Hero
// =============================================================================

/// Horizontal/vertical scale applied to the base parallax offset.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LayerFactor {
    pub x: f64,
    pub y: f64,
}

impl LayerFactor {
    pub const fn uniform(factor: f64) -> Self {
        Self { x: factor, y: factor }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Effects run only when the viewport is wider than this.
    pub desktop_min_width: f64,
    /// Divides the pointer's distance from the viewport center.
    pub pointer_divisor: f64,
    pub background_text: LayerFactor,
    pub portrait: LayerFactor,
    pub role_text: LayerFactor,
    pub intro_box: LayerFactor,
    /// Fraction of the pointer-to-center offset a magnetic button follows.
    pub magnetic_pull: f64,
    pub magnetic_scale: f64,
    /// Scroll-exit speed of the role text (negative moves up).
    pub exit_role_speed: f64,
    /// Scroll-exit speed of the portrait (positive moves down).
    pub exit_portrait_speed: f64,
    /// Scroll distance over which the intro box fades from 1 to 0.
    pub intro_fade_distance: f64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            desktop_min_width: 900.0,
            pointer_divisor: 25.0,
            background_text: LayerFactor::uniform(0.5),
            portrait: LayerFactor::uniform(-0.8),
            role_text: LayerFactor::uniform(0.2),
            intro_box: LayerFactor::uniform(-1.2),
            magnetic_pull: 0.3,
            magnetic_scale: 1.05,
            exit_role_speed: -0.5,
            exit_portrait_speed: 0.2,
            intro_fade_distance: 400.0,
        }
    }
}

impl HeroConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("hero.desktop_min_width", self.desktop_min_width)?;
        positive("hero.pointer_divisor", self.pointer_divisor)?;
        for (field, factor) in [
            ("hero.background_text", self.background_text),
            ("hero.portrait", self.portrait),
            ("hero.role_text", self.role_text),
            ("hero.intro_box", self.intro_box),
        ] {
            finite(field, factor.x)?;
            finite(field, factor.y)?;
        }
        finite("hero.magnetic_pull", self.magnetic_pull)?;
        positive("hero.magnetic_scale", self.magnetic_scale)?;
        finite("hero.exit_role_speed", self.exit_role_speed)?;
        finite("hero.exit_portrait_speed", self.exit_portrait_speed)?;
        positive("hero.intro_fade_distance", self.intro_fade_distance)
    }
}

// =============================================================================
// Tilt
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Rotation at the card edge, in degrees.
    pub max_degrees: f64,
    pub perspective: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_degrees: 10.0,
            perspective: 1000.0,
        }
    }
}

impl TiltConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        finite("tilt.max_degrees", self.max_degrees)?;
        positive("tilt.perspective", self.perspective)
    }
}

// =============================================================================
// Back to top
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackToTopConfig {
    pub threshold: f64,
}

impl Default for BackToTopConfig {
    fn default() -> Self {
        Self { threshold: 500.0 }
    }
}

impl BackToTopConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("back_to_top.threshold", self.threshold)
    }
}

// =============================================================================
// Contact form
// =============================================================================

/// Submit button markup per send state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ButtonLabels {
    pub idle: String,
    pub sending: String,
    pub sent: String,
    pub failed: String,
}

impl Default for ButtonLabels {
    fn default() -> Self {
        Self {
            idle: "<span>Send Message</span>".to_string(),
            sending: "<span>Sending...</span>".to_string(),
            sent: r#"<span>Sent!</span> <i class="ri-check-line"></i>"#.to_string(),
            failed: r#"<span>Failed</span> <i class="ri-error-warning-line"></i>"#.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub service_id: String,
    pub template_id: String,
    /// Delay before a sent/failed label reverts to idle.
    pub revert_after_ms: u64,
    pub labels: ButtonLabels,
    pub success_message: String,
    /// Prefixed to the raw transport error on failure.
    pub failure_prefix: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            service_id: "service_7r1oh9f".to_string(),
            template_id: "template_6csi4fe".to_string(),
            revert_after_ms: 3000,
            labels: ButtonLabels::default(),
            success_message: "Message sent successfully! I will get back to you soon.".to_string(),
            failure_prefix: "Failed to send! Error: ".to_string(),
        }
    }
}

impl ContactConfig {
    pub fn revert_after(&self) -> Duration {
        Duration::from_millis(self.revert_after_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.service_id.trim().is_empty() {
            return Err(ConfigError::invalid("contact.service_id", "must not be empty"));
        }
        if self.template_id.trim().is_empty() {
            return Err(ConfigError::invalid("contact.template_id", "must not be empty"));
        }
        if self.revert_after_ms == 0 {
            return Err(ConfigError::invalid(
                "contact.revert_after_ms",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = PageConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.carousels.len(), 2);
        assert_eq!(config.contact.revert_after(), Duration::from_secs(3));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PageConfig::from_toml_str(
            r#"
            [hero]
            desktop_min_width = 1024.0

            [contact]
            service_id = "service_test"
            "#,
        )
        .unwrap();

        assert_eq!(config.hero.desktop_min_width, 1024.0);
        assert_eq!(config.hero.pointer_divisor, 25.0);
        assert_eq!(config.contact.service_id, "service_test");
        assert_eq!(config.contact.template_id, "template_6csi4fe");
        assert_eq!(config.carousels.len(), 2);
    }

    #[test]
    fn test_invalid_ratio_rejected() {
        let err = PageConfig::from_toml_str("[nav]\nactive_ratio = 1.5\n").unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "nav.active_ratio"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let mut config = PageConfig::default();
        config.hero.pointer_divisor = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_service_rejected() {
        let err = PageConfig::from_toml_str("[contact]\nservice_id = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("contact.service_id"));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = PageConfig::from_toml_str("[nav\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
