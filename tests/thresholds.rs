//! Threshold and symmetry properties of the pure state functions.

use proptest::prelude::*;

use crystal_folio::state::hero::parallax_offset;
use crystal_folio::state::navigation::{is_scrolled, MenuState};
use crystal_folio::state::scroll::{back_to_top, back_to_top_visible};
use crystal_folio::state::tilt::tilt_at;
use crystal_folio::{ScrollRequest, Size};

proptest! {
    #[test]
    fn sticky_header_iff_past_threshold(scroll_y in 0.0f64..5000.0) {
        prop_assert_eq!(is_scrolled(scroll_y, 50.0), scroll_y > 50.0);
    }

    #[test]
    fn back_to_top_iff_past_threshold(scroll_y in 0.0f64..5000.0) {
        prop_assert_eq!(back_to_top_visible(scroll_y, 500.0), scroll_y > 500.0);
    }

    #[test]
    fn centered_pointer_has_no_parallax(width in 901.0f64..4000.0, height in 200.0f64..3000.0) {
        let viewport = Size::new(width, height);
        let offset = parallax_offset(viewport.center(), viewport, 25.0);
        prop_assert_eq!(offset.x, 0.0);
        prop_assert_eq!(offset.y, 0.0);
    }

    #[test]
    fn card_center_is_flat(width in 0.0f64..2000.0, height in 0.0f64..2000.0) {
        let size = Size::new(width, height);
        let tilt = tilt_at(size.center(), size, 10.0);
        prop_assert_eq!(tilt.rotate_x, 0.0);
        prop_assert_eq!(tilt.rotate_y, 0.0);
    }

    #[test]
    fn tilt_stays_within_max_inside_card(
        width in 1.0f64..2000.0,
        height in 1.0f64..2000.0,
        fx in 0.0f64..=1.0,
        fy in 0.0f64..=1.0,
    ) {
        let size = Size::new(width, height);
        let local = crystal_folio::Point::new(width * fx, height * fy);
        let tilt = tilt_at(local, size, 10.0);
        prop_assert!(tilt.rotate_x.abs() <= 10.0 + 1e-9);
        prop_assert!(tilt.rotate_y.abs() <= 10.0 + 1e-9);
    }

    #[test]
    fn even_toggles_restore_menu(pairs in 0usize..20) {
        let mut menu = MenuState::CLOSED;
        for _ in 0..pairs * 2 {
            menu = menu.toggled();
            prop_assert_eq!(menu.is_open(), menu.scroll_locked());
        }
        prop_assert_eq!(menu, MenuState::CLOSED);
    }
}

#[test]
fn back_to_top_targets_zero() {
    assert_eq!(back_to_top(), ScrollRequest::ToTop);
}
