//! Carousel (slider) configuration and the page's two presets.
//!
//! The slider widget itself is opaque; these structs enumerate the options the
//! page actually sets, with the widget's own defaults for everything else.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::error::ConfigError;

// =============================================================================
// Option types
// =============================================================================

/// Slide transition effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CarouselEffect {
    #[default]
    Slide,
    Fade,
    Cube,
    Coverflow,
    Flip,
    Cards,
    Creative,
}

impl CarouselEffect {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slide => "slide",
            Self::Fade => "fade",
            Self::Cube => "cube",
            Self::Coverflow => "coverflow",
            Self::Flip => "flip",
            Self::Cards => "cards",
            Self::Creative => "creative",
        }
    }
}

/// Visible slide count: fixed or sized by slide width.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "SlidesPerViewRepr")]
pub enum SlidesPerView {
    Auto,
    Count(f64),
}

impl Default for SlidesPerView {
    fn default() -> Self {
        Self::Count(1.0)
    }
}

impl fmt::Display for SlidesPerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SlidesPerViewRepr {
    Text(String),
    Number(f64),
}

impl TryFrom<SlidesPerViewRepr> for SlidesPerView {
    type Error = String;

    fn try_from(repr: SlidesPerViewRepr) -> Result<Self, Self::Error> {
        match repr {
            SlidesPerViewRepr::Text(text) if text == "auto" => Ok(Self::Auto),
            SlidesPerViewRepr::Text(text) => {
                Err(format!("expected \"auto\" or a number, got {text:?}"))
            }
            SlidesPerViewRepr::Number(n) => Ok(Self::Count(n)),
        }
    }
}

/// Depth profile for [`CarouselEffect::Coverflow`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CoverflowConfig {
    /// Side-slide rotation in degrees.
    pub rotate: f64,
    /// Spacing between slides in pixels.
    pub stretch: f64,
    /// Z-axis translation in pixels.
    pub depth: f64,
    /// Multiplier for all of the above.
    pub modifier: f64,
    /// Scale of non-active slides.
    pub scale: f64,
    pub slide_shadows: bool,
}

impl Default for CoverflowConfig {
    fn default() -> Self {
        Self {
            rotate: 50.0,
            stretch: 0.0,
            depth: 100.0,
            modifier: 1.0,
            scale: 1.0,
            slide_shadows: true,
        }
    }
}

/// Partial coverflow override applied at a breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CoverflowOverride {
    pub rotate: Option<f64>,
    pub stretch: Option<f64>,
    pub depth: Option<f64>,
    pub modifier: Option<f64>,
    pub scale: Option<f64>,
}

impl CoverflowOverride {
    fn apply(&self, base: &mut CoverflowConfig) {
        if let Some(v) = self.rotate {
            base.rotate = v;
        }
        if let Some(v) = self.stretch {
            base.stretch = v;
        }
        if let Some(v) = self.depth {
            base.depth = v;
        }
        if let Some(v) = self.modifier {
            base.modifier = v;
        }
        if let Some(v) = self.scale {
            base.scale = v;
        }
    }
}

/// Settings remapped once the viewport reaches a breakpoint width.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct BreakpointOverride {
    pub slides_per_view: Option<SlidesPerView>,
    pub coverflow: Option<CoverflowOverride>,
}

/// TOML table keys are strings; parse them as pixel widths.
fn breakpoint_table<'de, D>(deserializer: D) -> Result<BTreeMap<u32, BreakpointOverride>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = BTreeMap::<String, BreakpointOverride>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            key.trim()
                .parse::<u32>()
                .map(|width| (width, value))
                .map_err(|_| {
                    serde::de::Error::custom(format!("breakpoint key {key:?} is not a pixel width"))
                })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaginationConfig {
    /// Selector of the bullet container.
    pub el: String,
    #[serde(default)]
    pub clickable: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NavigationConfig {
    pub next_el: String,
    pub prev_el: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct A11yConfig {
    pub prev_slide_message: String,
    pub next_slide_message: String,
}

impl Default for A11yConfig {
    fn default() -> Self {
        Self {
            prev_slide_message: "Previous slide".to_string(),
            next_slide_message: "Next slide".to_string(),
        }
    }
}

// =============================================================================
// CarouselConfig
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Container selector.
    pub selector: String,
    pub effect: CarouselEffect,
    pub grab_cursor: bool,
    pub centered_slides: bool,
    pub slides_per_view: SlidesPerView,
    pub initial_slide: usize,
    #[serde(rename = "loop")]
    pub loop_slides: bool,
    /// Transition duration in milliseconds.
    pub speed: u32,
    pub coverflow: CoverflowConfig,
    pub pagination: Option<PaginationConfig>,
    pub navigation: Option<NavigationConfig>,
    pub a11y: Option<A11yConfig>,
    /// Keyed by minimum viewport width in pixels.
    #[serde(deserialize_with = "breakpoint_table")]
    pub breakpoints: BTreeMap<u32, BreakpointOverride>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            selector: ".swiper".to_string(),
            effect: CarouselEffect::Slide,
            grab_cursor: false,
            centered_slides: false,
            slides_per_view: SlidesPerView::default(),
            initial_slide: 0,
            loop_slides: false,
            speed: 300,
            coverflow: CoverflowConfig::default(),
            pagination: None,
            navigation: None,
            a11y: Some(A11yConfig::default()),
            breakpoints: BTreeMap::new(),
        }
    }
}

/// Effective settings at one viewport width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedCarousel {
    pub slides_per_view: SlidesPerView,
    pub coverflow: CoverflowConfig,
}

impl CarouselConfig {
    /// The 3D project showcase: looping coverflow starting on the second card.
    pub fn project() -> Self {
        Self {
            selector: ".project-carousel".to_string(),
            effect: CarouselEffect::Coverflow,
            grab_cursor: true,
            centered_slides: true,
            slides_per_view: SlidesPerView::Auto,
            initial_slide: 1,
            loop_slides: true,
            speed: 800,
            coverflow: CoverflowConfig {
                rotate: 25.0,
                stretch: 0.0,
                depth: 300.0,
                modifier: 1.0,
                scale: 1.0,
                slide_shadows: false,
            },
            pagination: Some(PaginationConfig {
                el: ".swiper-pagination".to_string(),
                clickable: true,
            }),
            navigation: Some(NavigationConfig {
                next_el: ".swiper-button-next".to_string(),
                prev_el: ".swiper-button-prev".to_string(),
            }),
            a11y: Some(A11yConfig::default()),
            breakpoints: BTreeMap::new(),
        }
    }

    /// The process storyboard: flat, stepped-back cards with responsive counts.
    pub fn process() -> Self {
        let mut breakpoints = BTreeMap::new();
        breakpoints.insert(
            320,
            BreakpointOverride {
                slides_per_view: Some(SlidesPerView::Count(1.1)),
                coverflow: Some(CoverflowOverride {
                    depth: Some(100.0),
                    scale: Some(0.95),
                    ..Default::default()
                }),
            },
        );
        breakpoints.insert(
            768,
            BreakpointOverride {
                slides_per_view: Some(SlidesPerView::Count(2.0)),
                coverflow: None,
            },
        );
        breakpoints.insert(
            1024,
            BreakpointOverride {
                slides_per_view: Some(SlidesPerView::Count(3.0)),
                coverflow: None,
            },
        );

        Self {
            selector: ".process-carousel".to_string(),
            effect: CarouselEffect::Coverflow,
            grab_cursor: true,
            centered_slides: true,
            slides_per_view: SlidesPerView::Auto,
            initial_slide: 0,
            loop_slides: false,
            speed: 800,
            coverflow: CoverflowConfig {
                rotate: 0.0,
                stretch: 0.0,
                depth: 200.0,
                modifier: 1.0,
                scale: 0.9,
                slide_shadows: false,
            },
            pagination: Some(PaginationConfig {
                el: ".process-pagination".to_string(),
                clickable: true,
            }),
            navigation: None,
            a11y: Some(A11yConfig::default()),
            breakpoints,
        }
    }

    /// Settings in effect at `width`.
    ///
    /// Breakpoints apply cumulatively from the smallest up to the largest
    /// one not exceeding `width`, over the base settings.
    pub fn resolve_for_width(&self, width: f64) -> ResolvedCarousel {
        let mut resolved = ResolvedCarousel {
            slides_per_view: self.slides_per_view,
            coverflow: self.coverflow,
        };

        for (&min_width, over) in &self.breakpoints {
            if f64::from(min_width) > width {
                break;
            }
            if let Some(spv) = over.slides_per_view {
                resolved.slides_per_view = spv;
            }
            if let Some(cf) = &over.coverflow {
                cf.apply(&mut resolved.coverflow);
            }
        }

        resolved
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let field = |name: &str| format!("carousels[{}].{name}", self.selector);

        if self.selector.trim().is_empty() {
            return Err(ConfigError::invalid("carousels.selector", "must not be empty"));
        }
        if self.speed == 0 {
            return Err(ConfigError::invalid(field("speed"), "must be greater than zero"));
        }
        check_slides(&field("slides_per_view"), self.slides_per_view)?;
        check_coverflow(&field("coverflow"), &self.coverflow)?;

        for (&width, over) in &self.breakpoints {
            if width == 0 {
                return Err(ConfigError::invalid(
                    field("breakpoints"),
                    "breakpoint width must be positive",
                ));
            }
            if let Some(spv) = over.slides_per_view {
                check_slides(&field(&format!("breakpoints.{width}.slides_per_view")), spv)?;
            }
        }
        // Overrides can only be judged once merged.
        for &width in self.breakpoints.keys() {
            let resolved = self.resolve_for_width(f64::from(width));
            check_coverflow(
                &field(&format!("breakpoints.{width}.coverflow")),
                &resolved.coverflow,
            )?;
        }

        if let Some(pagination) = &self.pagination {
            if pagination.el.trim().is_empty() {
                return Err(ConfigError::invalid(field("pagination.el"), "must not be empty"));
            }
        }
        if let Some(navigation) = &self.navigation {
            if navigation.next_el.trim().is_empty() || navigation.prev_el.trim().is_empty() {
                return Err(ConfigError::invalid(
                    field("navigation"),
                    "arrow selectors must not be empty",
                ));
            }
        }
        Ok(())
    }
}

fn check_slides(field: &str, spv: SlidesPerView) -> Result<(), ConfigError> {
    match spv {
        SlidesPerView::Count(n) if !(n.is_finite() && n > 0.0) => Err(ConfigError::invalid(
            field,
            format!("slide count must be positive, got {n}"),
        )),
        _ => Ok(()),
    }
}

fn check_coverflow(field: &str, cf: &CoverflowConfig) -> Result<(), ConfigError> {
    let values = [cf.rotate, cf.stretch, cf.depth, cf.modifier, cf.scale];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ConfigError::invalid(field, "values must be finite"));
    }
    if cf.scale <= 0.0 {
        return Err(ConfigError::invalid(
            field,
            format!("scale must be positive, got {}", cf.scale),
        ));
    }
    Ok(())
}
