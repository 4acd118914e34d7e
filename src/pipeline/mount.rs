//! Mount API - Page setup.
//!
//! `mount` validates configuration, initializes the third-party widgets,
//! builds the reactive pipeline and performs the first complete render.
//!
//! # Example
//!
//! ```ignore
//! use crystal_folio::pipeline::{mount, PageEvent, PageStructure};
//!
//! let mut page = mount(config, structure, &mut widgets, surface, relay)?;
//!
//! page.dispatch(PageEvent::Scroll(120.0), Instant::now());
//! page.tick(Instant::now());
//! ```

use std::collections::BTreeSet;
use std::rc::Rc;

use tracing::{debug, info};

use super::dispatch::PageCoordinator;
use super::view_derived::{create_view_derived, PageState};
use crate::collaborators::{CarouselHost, EmailRelay, RevealAnimator};
use crate::config::PageConfig;
use crate::error::ConfigError;
use crate::renderer::Surface;
use crate::state::hero::MagneticButtons;
use crate::state::navigation::{NavLink, SectionTracker};
use crate::state::tilt::TiltCards;
use crate::state::viewport::{self, ViewportEvent};
use crate::types::Size;

// =============================================================================
// Page Structure
// =============================================================================

/// The page's interactive elements, discovered once by the host.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageStructure {
    /// Section ids in document order.
    pub sections: Vec<String>,
    pub nav_links: Vec<NavLink>,
    pub hero_buttons: Vec<String>,
    pub skill_cards: Vec<String>,
    pub viewport: Size,
    pub scroll_y: f64,
}

impl PageStructure {
    fn validate(&self) -> Result<(), ConfigError> {
        unique("structure.sections", self.sections.iter().map(String::as_str))?;
        unique("structure.nav_links", self.nav_links.iter().map(|l| l.id.as_str()))?;
        unique("structure.hero_buttons", self.hero_buttons.iter().map(String::as_str))?;
        unique("structure.skill_cards", self.skill_cards.iter().map(String::as_str))?;
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Err(ConfigError::invalid(
                "structure.viewport",
                "width and height must be positive",
            ));
        }
        Ok(())
    }
}

fn unique<'a>(field: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), ConfigError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ConfigError::invalid(field, format!("duplicate id `{id}`")));
        }
    }
    Ok(())
}

// =============================================================================
// Mount Function
// =============================================================================

/// Mount the page.
///
/// This sets up:
/// 1. Config and structure validation
/// 2. Reveal animations (once) and both carousels
/// 3. Initial viewport readings
/// 4. Reactive pipeline (state signals -> view derived -> diff renderer)
/// 5. First complete render
pub fn mount<S, R, W>(
    config: PageConfig,
    structure: PageStructure,
    widgets: &mut W,
    surface: S,
    relay: R,
) -> Result<PageCoordinator<S, R>, ConfigError>
where
    S: Surface,
    R: EmailRelay,
    W: RevealAnimator + CarouselHost + ?Sized,
{
    config.validate()?;
    structure.validate()?;

    widgets.init(&config.reveal);
    for carousel in &config.carousels {
        let resolved = carousel.resolve_for_width(structure.viewport.width);
        debug!(
            selector = %carousel.selector,
            slides_per_view = ?resolved.slides_per_view,
            "mounting carousel"
        );
        widgets.mount_carousel(carousel, &resolved);
    }

    viewport::dispatch(ViewportEvent::Resize(structure.viewport));
    viewport::dispatch(ViewportEvent::Scroll(structure.scroll_y));

    let sections = structure.sections.len();
    let tracker = Rc::new(SectionTracker::new(
        structure.sections,
        structure.nav_links,
        config.nav.active_ratio,
    ));
    let state = PageState::new(
        MagneticButtons::new(structure.hero_buttons),
        TiltCards::new(structure.skill_cards),
    );
    let config = Rc::new(config);
    let view = create_view_derived(state.clone(), config.clone(), tracker.clone());

    let mut page = PageCoordinator::new(config, tracker, state, view, surface, relay);
    let patches = page.render_full();

    info!(
        sections,
        carousels = page.config().carousels.len(),
        patches,
        "page mounted"
    );
    Ok(page)
}

// =============================================================================
// Tests
// =============================================================================
