//! Navigation Module - Sticky header, mobile menu, active section
//!
//! Three independent derivations:
//! - **Sticky header** - a pure threshold on the scroll offset
//! - **Mobile menu** - a two-state machine whose scroll lock is derived
//!   from the open flag, so the two can never disagree
//! - **Active section** - resolves intersection reports to the one section
//!   whose nav links are highlighted
//!
//! # Tie-break
//!
//! When several sections cross the visibility ratio in the same report, the
//! topmost one (lowest document order) wins. Successive reports simply
//! overwrite each other.

use crate::types::Target;

// =============================================================================
// STICKY HEADER
// =============================================================================

/// Whether the nav bar carries its `scrolled` style.
pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

// =============================================================================
// MOBILE MENU
// =============================================================================

/// Mobile menu open/closed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub const CLOSED: Self = Self { open: false };

    pub fn is_open(self) -> bool {
        self.open
    }

    /// Page scrolling is suppressed exactly while the menu is open.
    pub fn scroll_locked(self) -> bool {
        self.open
    }

    /// Hamburger click.
    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    /// Mobile link or mobile call-to-action click. Idempotent.
    pub fn closed(self) -> Self {
        Self::CLOSED
    }

    /// Inline `overflow` for the page body.
    pub fn body_overflow(self) -> Option<&'static str> {
        self.scroll_locked().then_some("hidden")
    }
}

// =============================================================================
// ACTIVE SECTION
// =============================================================================

/// A page section, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDescriptor {
    pub id: String,
    pub order: usize,
}

/// A `.nav-link` and the anchor it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub id: String,
    /// Anchor of the form `#section-id`.
    pub href: String,
}

impl NavLink {
    pub fn new(id: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            href: href.into(),
        }
    }

    /// Whether this link's anchor names `section_id`.
    pub fn targets(&self, section_id: &str) -> bool {
        self.href.strip_prefix('#') == Some(section_id)
    }

    pub fn target(&self) -> Target {
        Target::NavLink(self.id.clone())
    }
}

/// One intersection observer entry.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub section_id: String,
    /// Visible fraction of the section, 0 to 1.
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn new(section_id: impl Into<String>, ratio: f64) -> Self {
        Self {
            section_id: section_id.into(),
            ratio,
        }
    }
}

/// Static section/link structure, built once at mount.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionTracker {
    sections: Vec<SectionDescriptor>,
    links: Vec<NavLink>,
    ratio: f64,
}

impl SectionTracker {
    /// `section_ids` must be in document order.
    pub fn new<I, S>(section_ids: I, links: Vec<NavLink>, ratio: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sections = section_ids
            .into_iter()
            .enumerate()
            .map(|(order, id)| SectionDescriptor { id: id.into(), order })
            .collect();
        Self { sections, links, ratio }
    }

    pub fn sections(&self) -> &[SectionDescriptor] {
        &self.sections
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    fn order_of(&self, section_id: &str) -> Option<usize> {
        self.sections
            .iter()
            .find(|s| s.id == section_id)
            .map(|s| s.order)
    }

    /// Fold one intersection report into the active section.
    ///
    /// Entries below the ratio and entries for unknown sections are ignored.
    /// If nothing triggers, `prior` is kept.
    pub fn resolve(&self, entries: &[IntersectionEntry], prior: Option<&str>) -> Option<String> {
        entries
            .iter()
            .filter(|e| e.ratio >= self.ratio)
            .filter_map(|e| self.order_of(&e.section_id).map(|order| (order, e)))
            .min_by_key(|(order, _)| *order)
            .map(|(_, e)| e.section_id.clone())
            .or_else(|| prior.map(str::to_string))
    }

    /// Whether `link` is highlighted for `active`.
    ///
    /// A section with no matching link leaves every link cleared.
    pub fn is_link_active(link: &NavLink, active: Option<&str>) -> bool {
        active.is_some_and(|id| link.targets(id))
    }
}

// =============================================================================
// TESTS
// =============================================================================
