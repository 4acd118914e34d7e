//! Hero Module - Pointer parallax, magnetic buttons, scroll-exit parallax
//!
//! All hero effects are pure functions of the latest viewport reading and the
//! prior layer state. Pointer parallax and scroll exit both write into the
//! same `HeroLayers`; whichever ran last wins for a given layer.
//!
//! Both layer effects are desktop-only. On narrow viewports they return the
//! prior state untouched, so layers keep whatever transform they had.

use std::collections::BTreeMap;

use crate::config::{HeroConfig, LayerFactor};
use crate::state::viewport::ViewportSignal;
use crate::types::{HeroLayer, Point, Rect, Size, Transform};

// =============================================================================
// LAYER STATE
// =============================================================================

/// Inline styles currently applied to the hero layers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeroLayers {
    transforms: [Option<Transform>; 4],
    intro_opacity: Option<f64>,
}

impl HeroLayers {
    pub fn transform(&self, layer: HeroLayer) -> Option<Transform> {
        self.transforms[layer.index()]
    }

    pub fn intro_opacity(&self) -> Option<f64> {
        self.intro_opacity
    }

    fn set(&mut self, layer: HeroLayer, transform: Transform) {
        self.transforms[layer.index()] = Some(transform);
    }
}

/// Effects run only when the viewport is wider than the desktop minimum.
pub fn is_desktop(viewport: Size, config: &HeroConfig) -> bool {
    viewport.width > config.desktop_min_width
}

// =============================================================================
// POINTER PARALLAX
// =============================================================================

/// Base offset: distance from the viewport center, scaled down.
///
/// Zero when the pointer sits exactly at the center.
pub fn parallax_offset(page_pointer: Point, viewport: Size, divisor: f64) -> Point {
    Point::new(
        (viewport.width / 2.0 - page_pointer.x) / divisor,
        (viewport.height / 2.0 - page_pointer.y) / divisor,
    )
}

fn scaled(offset: Point, factor: LayerFactor) -> (f64, f64) {
    (offset.x * factor.x, offset.y * factor.y)
}

/// Pointer moved over the hero section.
pub fn pointer_parallax(
    signal: &ViewportSignal,
    prior: HeroLayers,
    config: &HeroConfig,
) -> HeroLayers {
    if !is_desktop(signal.viewport, config) {
        return prior;
    }
    let Some(page) = signal.page_pointer() else {
        return prior;
    };

    let offset = parallax_offset(page, signal.viewport, config.pointer_divisor);
    let mut next = prior;

    let (x, y) = scaled(offset, config.background_text);
    next.set(HeroLayer::BackgroundText, Transform::TranslateCentered { x, y });

    let (x, y) = scaled(offset, config.portrait);
    next.set(HeroLayer::Portrait, Transform::Translate { x, y });

    let (x, y) = scaled(offset, config.role_text);
    next.set(HeroLayer::RoleText, Transform::Translate { x, y });

    let (x, y) = scaled(offset, config.intro_box);
    next.set(HeroLayer::IntroBox, Transform::Translate { x, y });

    next
}

// =============================================================================
// SCROLL EXIT
// =============================================================================

/// Page scrolled. Active only through the first viewport height.
///
/// The intro opacity is not clamped; past the fade distance it goes negative.
pub fn scroll_exit(signal: &ViewportSignal, prior: HeroLayers, config: &HeroConfig) -> HeroLayers {
    if !is_desktop(signal.viewport, config) {
        return prior;
    }
    let scroll_y = signal.scroll_y;
    if scroll_y >= signal.viewport.height {
        return prior;
    }

    let mut next = prior;
    next.set(
        HeroLayer::RoleText,
        Transform::TranslateY(scroll_y * config.exit_role_speed),
    );
    next.set(
        HeroLayer::Portrait,
        Transform::TranslateY(scroll_y * config.exit_portrait_speed),
    );
    next.intro_opacity = Some(1.0 - scroll_y / config.intro_fade_distance);
    next
}

// =============================================================================
// MAGNETIC BUTTONS
// =============================================================================

/// Pull a button toward the pointer: offset from its center, scaled, plus a
/// slight enlargement.
pub fn magnetic_pull(pointer: Point, bounds: &Rect, config: &HeroConfig) -> Transform {
    let center = bounds.center();
    Transform::TranslateScale {
        x: (pointer.x - center.x) * config.magnetic_pull,
        y: (pointer.y - center.y) * config.magnetic_pull,
        scale: config.magnetic_scale,
    }
}

/// Per-button magnetic transforms. Buttons never affect each other.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MagneticButtons {
    buttons: BTreeMap<String, Option<Transform>>,
}

impl MagneticButtons {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            buttons: ids.into_iter().map(|id| (id.into(), None)).collect(),
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.buttons.keys().map(String::as_str)
    }

    pub fn transform(&self, id: &str) -> Option<Transform> {
        self.buttons.get(id).copied().flatten()
    }

    /// Pointer moved within `id`. Returns false for an unknown button.
    pub fn pointer_move(
        &mut self,
        id: &str,
        pointer: Point,
        bounds: &Rect,
        config: &HeroConfig,
    ) -> bool {
        match self.buttons.get_mut(id) {
            Some(slot) => {
                *slot = Some(magnetic_pull(pointer, bounds, config));
                true
            }
            None => false,
        }
    }

    /// Pointer left `id`: back to rest. Returns false for an unknown button.
    pub fn pointer_leave(&mut self, id: &str) -> bool {
        match self.buttons.get_mut(id) {
            Some(slot) => {
                *slot = Some(Transform::RESTING_SCALE);
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop(scroll_y: f64, pointer: Option<Point>) -> ViewportSignal {
        ViewportSignal {
            scroll_y,
            pointer,
            viewport: Size::new(1400.0, 900.0),
        }
    }

    fn translate_of(t: Option<Transform>) -> (f64, f64) {
        match t {
            Some(Transform::Translate { x, y } | Transform::TranslateCentered { x, y }) => (x, y),
            other => panic!("expected a translate, got {other:?}"),
        }
    }

    #[test]
    fn test_center_pointer_yields_zero_offsets() {
        let config = HeroConfig::default();
        let signal = desktop(0.0, Some(Point::new(700.0, 450.0)));
        let layers = pointer_parallax(&signal, HeroLayers::default(), &config);

        for layer in HeroLayer::ALL {
            let (x, y) = translate_of(layers.transform(layer));
            assert_eq!(x, 0.0, "{layer:?}");
            assert_eq!(y, 0.0, "{layer:?}");
        }
    }

    #[test]
    fn test_layer_factors_and_directions() {
        let config = HeroConfig::default();
        // 250px left of and 100px above center -> base offset (10, 4)
        let signal = desktop(0.0, Some(Point::new(450.0, 350.0)));
        let layers = pointer_parallax(&signal, HeroLayers::default(), &config);

        assert_eq!(
            layers.transform(HeroLayer::BackgroundText),
            Some(Transform::TranslateCentered { x: 5.0, y: 2.0 })
        );
        let (px, py) = translate_of(layers.transform(HeroLayer::Portrait));
        assert!((px + 8.0).abs() < 1e-9 && (py + 3.2).abs() < 1e-9);
        let (rx, ry) = translate_of(layers.transform(HeroLayer::RoleText));
        assert!((rx - 2.0).abs() < 1e-9 && (ry - 0.8).abs() < 1e-9);
        let (ix, iy) = translate_of(layers.transform(HeroLayer::IntroBox));
        assert!((ix + 12.0).abs() < 1e-9 && (iy + 4.8).abs() < 1e-9);
    }

    #[test]
    fn test_page_coordinates_include_scroll() {
        let config = HeroConfig::default();
        // Viewport center, but scrolled 250px: pageY is 250px below center
        let signal = desktop(250.0, Some(Point::new(700.0, 450.0)));
        let layers = pointer_parallax(&signal, HeroLayers::default(), &config);
        let (_, y) = translate_of(layers.transform(HeroLayer::RoleText));
        assert!((y - (-10.0 * 0.2)).abs() < 1e-9);
    }

    #[test]
    fn test_narrow_viewport_suppresses_parallax() {
        let config = HeroConfig::default();
        let prior = pointer_parallax(
            &desktop(0.0, Some(Point::new(100.0, 100.0))),
            HeroLayers::default(),
            &config,
        );

        let narrow = ViewportSignal {
            scroll_y: 0.0,
            pointer: Some(Point::new(10.0, 10.0)),
            viewport: Size::new(900.0, 700.0),
        };
        assert_eq!(pointer_parallax(&narrow, prior, &config), prior);
        assert_eq!(scroll_exit(&narrow, prior, &config), prior);
    }

    #[test]
    fn test_scroll_exit_speeds_and_fade() {
        let config = HeroConfig::default();
        let layers = scroll_exit(&desktop(200.0, None), HeroLayers::default(), &config);

        assert_eq!(layers.transform(HeroLayer::RoleText), Some(Transform::TranslateY(-100.0)));
        assert_eq!(layers.transform(HeroLayer::Portrait), Some(Transform::TranslateY(40.0)));
        assert_eq!(layers.intro_opacity(), Some(0.5));
        // Untouched layers keep their prior state
        assert_eq!(layers.transform(HeroLayer::BackgroundText), None);
    }

    #[test]
    fn test_scroll_exit_opacity_not_clamped() {
        let config = HeroConfig::default();
        let layers = scroll_exit(&desktop(600.0, None), HeroLayers::default(), &config);
        assert_eq!(layers.intro_opacity(), Some(-0.5));
    }

    #[test]
    fn test_scroll_exit_stops_after_first_viewport() {
        let config = HeroConfig::default();
        let prior = scroll_exit(&desktop(850.0, None), HeroLayers::default(), &config);
        let after = scroll_exit(&desktop(900.0, None), prior, &config);
        assert_eq!(after, prior);
    }

    #[test]
    fn test_scroll_exit_overwrites_pointer_parallax() {
        let config = HeroConfig::default();
        let pointer = pointer_parallax(
            &desktop(0.0, Some(Point::new(0.0, 0.0))),
            HeroLayers::default(),
            &config,
        );
        let layers = scroll_exit(&desktop(10.0, None), pointer, &config);

        assert_eq!(layers.transform(HeroLayer::RoleText), Some(Transform::TranslateY(-5.0)));
        // Intro box keeps its pointer transform; only opacity changes
        assert_eq!(
            layers.transform(HeroLayer::IntroBox),
            pointer.transform(HeroLayer::IntroBox)
        );
    }

    #[test]
    fn test_magnetic_pull_and_reset() {
        let config = HeroConfig::default();
        let mut buttons = MagneticButtons::new(["hire", "work"]);
        let bounds = Rect::new(100.0, 100.0, 200.0, 60.0);

        assert!(buttons.pointer_move("hire", Point::new(250.0, 110.0), &bounds, &config));
        match buttons.transform("hire") {
            Some(Transform::TranslateScale { x, y, scale }) => {
                assert!((x - 15.0).abs() < 1e-9);
                assert!((y + 6.0).abs() < 1e-9);
                assert_eq!(scale, 1.05);
            }
            other => panic!("unexpected {other:?}"),
        }
        // Other button untouched
        assert_eq!(buttons.transform("work"), None);

        assert!(buttons.pointer_leave("hire"));
        assert_eq!(buttons.transform("hire"), Some(Transform::RESTING_SCALE));
    }

    #[test]
    fn test_magnetic_unknown_button() {
        let config = HeroConfig::default();
        let mut buttons = MagneticButtons::new(["hire"]);
        assert!(!buttons.pointer_move("ghost", Point::default(), &Rect::default(), &config));
        assert!(!buttons.pointer_leave("ghost"));
    }
}
