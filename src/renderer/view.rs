//! PageView - the complete derived visual state of the page for one frame.

use std::collections::BTreeMap;

use bitflags::bitflags;

use crate::state::hero::HeroLayers;
use crate::types::Transform;

bitflags! {
    /// Page-level boolean presentation flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PageFlags: u8 {
        /// `#main-nav.scrolled`
        const NAV_SCROLLED = 1 << 0;
        /// `#hamburger-btn.active` and `#mobile-menu.active`
        const MENU_OPEN = 1 << 1;
        /// `body { overflow: hidden }`
        const SCROLL_LOCKED = 1 << 2;
        /// `#backToTop.visible`
        const BACK_TO_TOP_VISIBLE = 1 << 3;
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageView {
    pub flags: PageFlags,
    /// Nav link id -> highlighted.
    pub nav_links: BTreeMap<String, bool>,
    pub hero: HeroLayers,
    /// Hero button id -> magnetic transform.
    pub buttons: BTreeMap<String, Option<Transform>>,
    /// Skill card id -> tilt transform.
    pub cards: BTreeMap<String, Option<Transform>>,
    pub submit_label: String,
}

impl PageView {
    /// Ids of highlighted nav links.
    pub fn active_links(&self) -> impl Iterator<Item = &str> {
        self.nav_links
            .iter()
            .filter(|(_, active)| **active)
            .map(|(id, _)| id.as_str())
    }
}
