//! View Derived - Reactive render model.
//!
//! Creates a Derived that recomputes the `PageView` whenever:
//! - The scroll offset changes
//! - Menu, active section, hero, button, card or send state changes
//!
//! The derived is pure: it only reads signals and static structure. The
//! dispatcher reads it once per event and feeds the result to the renderer.

use std::rc::Rc;

use spark_signals::{derived, signal, Derived, Signal};

use crate::config::PageConfig;
use crate::renderer::{PageFlags, PageView};
use crate::state::contact::{ContactForm, SendState};
use crate::state::hero::{HeroLayers, MagneticButtons};
use crate::state::navigation::{self, MenuState, SectionTracker};
use crate::state::scroll;
use crate::state::tilt::TiltCards;
use crate::state::viewport;

/// The render model as a derived.
pub type ViewDerived = Derived<PageView>;

/// Coordinator state, one signal per single-writer state machine.
#[derive(Clone)]
pub struct PageState {
    pub menu: Signal<MenuState>,
    pub active_section: Signal<Option<String>>,
    pub hero: Signal<HeroLayers>,
    pub buttons: Signal<MagneticButtons>,
    pub cards: Signal<TiltCards>,
    pub send_state: Signal<SendState>,
}

impl PageState {
    pub fn new(buttons: MagneticButtons, cards: TiltCards) -> Self {
        Self {
            menu: signal(MenuState::CLOSED),
            active_section: signal(None),
            hero: signal(HeroLayers::default()),
            buttons: signal(buttons),
            cards: signal(cards),
            send_state: signal(SendState::Idle),
        }
    }
}

/// Create the view derived.
pub fn create_view_derived(
    state: PageState,
    config: Rc<PageConfig>,
    tracker: Rc<SectionTracker>,
) -> ViewDerived {
    let scroll_signal = viewport::scroll_y_signal();

    derived(move || {
        let scroll_y = scroll_signal.get();
        let menu = state.menu.get();
        let active = state.active_section.get();

        let mut flags = PageFlags::empty();
        flags.set(
            PageFlags::NAV_SCROLLED,
            navigation::is_scrolled(scroll_y, config.nav.sticky_threshold),
        );
        flags.set(PageFlags::MENU_OPEN, menu.is_open());
        flags.set(PageFlags::SCROLL_LOCKED, menu.scroll_locked());
        flags.set(
            PageFlags::BACK_TO_TOP_VISIBLE,
            scroll::back_to_top_visible(scroll_y, config.back_to_top.threshold),
        );

        let nav_links = tracker
            .links()
            .iter()
            .map(|link| {
                (
                    link.id.clone(),
                    SectionTracker::is_link_active(link, active.as_deref()),
                )
            })
            .collect();

        let buttons = state.buttons.get();
        let cards = state.cards.get();

        PageView {
            flags,
            nav_links,
            hero: state.hero.get(),
            buttons: buttons
                .ids()
                .map(|id| (id.to_string(), buttons.transform(id)))
                .collect(),
            cards: cards
                .ids()
                .map(|id| (id.to_string(), cards.transform(id, &config.tilt)))
                .collect(),
            submit_label: ContactForm::label_for(&config.contact, state.send_state.get())
                .to_string(),
        }
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::navigation::NavLink;
    use crate::state::viewport::{reset_viewport_state, ViewportEvent};

    fn setup() -> (PageState, ViewDerived) {
        reset_viewport_state();
        let state = PageState::new(MagneticButtons::new(["hire"]), TiltCards::new(["rust"]));
        let tracker = SectionTracker::new(
            ["about", "contact"],
            vec![NavLink::new("nav-about", "#about"), NavLink::new("nav-contact", "#contact")],
            0.3,
        );
        let view = create_view_derived(
            state.clone(),
            Rc::new(PageConfig::default()),
            Rc::new(tracker),
        );
        (state, view)
    }

    #[test]
    fn test_initial_view() {
        let (_, view) = setup();
        let v = view.get();
        assert_eq!(v.flags, PageFlags::empty());
        assert_eq!(v.active_links().count(), 0);
        assert_eq!(v.buttons.get("hire"), Some(&None));
        assert_eq!(v.submit_label, "<span>Send Message</span>");
    }

    #[test]
    fn test_view_tracks_scroll_signal() {
        let (_, view) = setup();

        viewport::dispatch(ViewportEvent::Scroll(60.0));
        let v = view.get();
        assert!(v.flags.contains(PageFlags::NAV_SCROLLED));
        assert!(!v.flags.contains(PageFlags::BACK_TO_TOP_VISIBLE));

        viewport::dispatch(ViewportEvent::Scroll(720.0));
        assert!(view.get().flags.contains(PageFlags::BACK_TO_TOP_VISIBLE));
    }

    #[test]
    fn test_view_tracks_state_signals() {
        let (state, view) = setup();

        state.menu.set(MenuState::CLOSED.toggled());
        state.active_section.set(Some("contact".to_string()));
        state.send_state.set(SendState::Sending);

        let v = view.get();
        assert!(v.flags.contains(PageFlags::MENU_OPEN | PageFlags::SCROLL_LOCKED));
        assert_eq!(v.active_links().collect::<Vec<_>>(), vec!["nav-contact"]);
        assert_eq!(v.submit_label, "<span>Sending...</span>");
    }
}
