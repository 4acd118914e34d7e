//! Core types for crystal-folio.
//!
//! Geometry, transforms and element targets. These flow from the state
//! engines through the view derived and into the renderer.

use std::fmt;

// =============================================================================
// Geometry
// =============================================================================

/// A point in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center of a box of this size, in local coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Size {
    /// A common desktop viewport.
    fn default() -> Self {
        Self::new(1440.0, 900.0)
    }
}

/// An element's bounding box in viewport coordinates
/// (what `getBoundingClientRect` reports).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Visual center in viewport coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Convert a viewport point into box-local coordinates.
    pub fn local(&self, point: Point) -> Point {
        Point::new(point.x - self.left, point.y - self.top)
    }

    /// Inclusive hit test.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.left + self.width
            && point.y >= self.top
            && point.y <= self.top + self.height
    }
}

// =============================================================================
// Transform
// =============================================================================

/// Inline `transform` values produced by the effect engines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// `translate(x, y)`
    Translate { x: f64, y: f64 },
    /// `translate(x, calc(-50% + y))` for vertically pre-centered elements.
    TranslateCentered { x: f64, y: f64 },
    /// `translateY(y)`
    TranslateY(f64),
    /// `translate(x, y) scale(s)`
    TranslateScale { x: f64, y: f64, scale: f64 },
    /// `perspective(p) rotateX(rx) rotateY(ry)`, angles in degrees.
    Tilt {
        perspective: f64,
        rotate_x: f64,
        rotate_y: f64,
    },
}

impl Transform {
    /// Identity translation with unit scale (magnetic button at rest).
    pub const RESTING_SCALE: Self = Self::TranslateScale {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    /// Flat tilt at the given perspective.
    pub const fn flat(perspective: f64) -> Self {
        Self::Tilt {
            perspective,
            rotate_x: 0.0,
            rotate_y: 0.0,
        }
    }

    /// Render as a CSS `transform` value.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Translate { x, y } => write!(f, "translate({}px, {}px)", num(x), num(y)),
            Self::TranslateCentered { x, y } => {
                write!(f, "translate({}px, calc(-50% + {}px))", num(x), num(y))
            }
            Self::TranslateY(y) => write!(f, "translateY({}px)", num(y)),
            Self::TranslateScale { x, y, scale } => write!(
                f,
                "translate({}px, {}px) scale({})",
                num(x),
                num(y),
                num(scale)
            ),
            Self::Tilt {
                perspective,
                rotate_x,
                rotate_y,
            } => write!(
                f,
                "perspective({}px) rotateX({}deg) rotateY({}deg)",
                num(perspective),
                num(rotate_x),
                num(rotate_y)
            ),
        }
    }
}

/// Format a CSS number. Negative zero prints as `0`.
pub(crate) fn num(value: f64) -> f64 {
    value + 0.0
}

// =============================================================================
// Element targets
// =============================================================================

/// Hero sub-elements that carry parallax transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeroLayer {
    BackgroundText,
    Portrait,
    RoleText,
    IntroBox,
}

impl HeroLayer {
    pub const ALL: [HeroLayer; 4] = [
        HeroLayer::BackgroundText,
        HeroLayer::Portrait,
        HeroLayer::RoleText,
        HeroLayer::IntroBox,
    ];

    /// Position in per-layer arrays.
    pub const fn index(self) -> usize {
        match self {
            HeroLayer::BackgroundText => 0,
            HeroLayer::Portrait => 1,
            HeroLayer::RoleText => 2,
            HeroLayer::IntroBox => 3,
        }
    }

    /// The selector the page uses for this layer.
    pub const fn selector(self) -> &'static str {
        match self {
            HeroLayer::BackgroundText => ".hero-bg-text",
            HeroLayer::Portrait => ".hero-image-container",
            HeroLayer::RoleText => ".hero-role-text",
            HeroLayer::IntroBox => ".hero-intro-box",
        }
    }
}

/// An element the renderer can address on the page surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// `#main-nav`
    Nav,
    /// `#hamburger-btn`
    Hamburger,
    /// `#mobile-menu`
    MobileMenu,
    /// `document.body`
    Body,
    /// A `.nav-link` by id.
    NavLink(String),
    Hero(HeroLayer),
    /// A `.hero-buttons .btn` by id.
    HeroButton(String),
    /// A `.skill-card` by id.
    SkillCard(String),
    /// `#backToTop`
    BackToTop,
    /// `#contact-form button[type="submit"]`
    SubmitButton,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nav => f.write_str("#main-nav"),
            Self::Hamburger => f.write_str("#hamburger-btn"),
            Self::MobileMenu => f.write_str("#mobile-menu"),
            Self::Body => f.write_str("body"),
            Self::NavLink(id) => write!(f, ".nav-link#{id}"),
            Self::Hero(layer) => f.write_str(layer.selector()),
            Self::HeroButton(id) => write!(f, ".hero-buttons .btn#{id}"),
            Self::SkillCard(id) => write!(f, ".skill-card#{id}"),
            Self::BackToTop => f.write_str("#backToTop"),
            Self::SubmitButton => f.write_str("#contact-form button[type=\"submit\"]"),
        }
    }
}
