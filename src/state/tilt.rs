//! Tilt Module - 3D card tilt
//!
//! Each skill card rotates toward the pointer: full tilt at the card edge,
//! none at its center. Leaving a card always flattens it.

use std::collections::BTreeMap;

use crate::config::TiltConfig;
use crate::types::{Point, Size, Transform};

/// Rotation pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

/// Rotation for a pointer at `local` (box-relative) over a box of `size`.
///
/// A zero-sized axis contributes no rotation.
pub fn tilt_at(local: Point, size: Size, max_degrees: f64) -> Tilt {
    let center = size.center();
    let axis = |value: f64, mid: f64| {
        if mid == 0.0 { 0.0 } else { (value - mid) / mid }
    };

    Tilt {
        rotate_x: -max_degrees * axis(local.y, center.y) + 0.0,
        rotate_y: max_degrees * axis(local.x, center.x) + 0.0,
    }
}

/// Per-card tilt state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TiltCards {
    cards: BTreeMap<String, Option<Tilt>>,
}

impl TiltCards {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cards: ids.into_iter().map(|id| (id.into(), None)).collect(),
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.cards.keys().map(String::as_str)
    }

    pub fn tilt(&self, id: &str) -> Option<Tilt> {
        self.cards.get(id).copied().flatten()
    }

    /// CSS transform for `id`, if it has been touched.
    pub fn transform(&self, id: &str, config: &TiltConfig) -> Option<Transform> {
        self.tilt(id).map(|t| Transform::Tilt {
            perspective: config.perspective,
            rotate_x: t.rotate_x,
            rotate_y: t.rotate_y,
        })
    }

    /// Pointer moved within `id`. Returns false for an unknown card.
    pub fn pointer_move(
        &mut self,
        id: &str,
        local: Point,
        size: Size,
        config: &TiltConfig,
    ) -> bool {
        match self.cards.get_mut(id) {
            Some(slot) => {
                *slot = Some(tilt_at(local, size, config.max_degrees));
                true
            }
            None => false,
        }
    }

    /// Pointer left `id`. Returns false for an unknown card.
    pub fn pointer_leave(&mut self, id: &str) -> bool {
        match self.cards.get_mut(id) {
            Some(slot) => {
                *slot = Some(Tilt::default());
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: Size = Size::new(300.0, 200.0);

    #[test]
    fn test_center_is_flat() {
        assert_eq!(tilt_at(Point::new(150.0, 100.0), CARD, 10.0), Tilt::default());
    }

    #[test]
    fn test_corners_reach_max() {
        let top_left = tilt_at(Point::new(0.0, 0.0), CARD, 10.0);
        assert_eq!(top_left, Tilt { rotate_x: 10.0, rotate_y: -10.0 });

        let bottom_right = tilt_at(Point::new(300.0, 200.0), CARD, 10.0);
        assert_eq!(bottom_right, Tilt { rotate_x: -10.0, rotate_y: 10.0 });
    }

    #[test]
    fn test_zero_size_card() {
        let t = tilt_at(Point::new(5.0, 5.0), Size::new(0.0, 0.0), 10.0);
        assert_eq!(t, Tilt::default());
    }

    #[test]
    fn test_leave_resets_regardless_of_last_pointer() {
        let config = TiltConfig::default();
        let mut cards = TiltCards::new(["rust", "design"]);

        cards.pointer_move("rust", Point::new(10.0, 190.0), CARD, &config);
        assert_ne!(cards.tilt("rust"), Some(Tilt::default()));

        cards.pointer_leave("rust");
        assert_eq!(cards.tilt("rust"), Some(Tilt::default()));
        assert_eq!(
            cards.transform("rust", &config).map(|t| t.to_css()),
            Some("perspective(1000px) rotateX(0deg) rotateY(0deg)".to_string())
        );
    }

    #[test]
    fn test_cards_are_independent() {
        let config = TiltConfig::default();
        let mut cards = TiltCards::new(["rust", "design"]);
        cards.pointer_move("rust", Point::new(0.0, 0.0), CARD, &config);
        assert_eq!(cards.tilt("design"), None);
        assert!(!cards.pointer_move("ghost", Point::default(), CARD, &config));
    }
}
