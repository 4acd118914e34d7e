//! Event dispatcher.
//!
//! Every host event goes through `PageCoordinator::dispatch`. The order per
//! event is fixed:
//!
//! 1. Record continuous input in the viewport signals
//! 2. Apply the event to the state machine that owns it
//! 3. Read the view derived and render the diff (exactly once)
//! 4. Run any surface commands the event produced
//!
//! Commands run after the render so the label change lands before a
//! blocking notification.

use std::rc::Rc;
use std::time::Instant;

use tracing::debug;

use super::view_derived::{PageState, ViewDerived};
use crate::collaborators::EmailRelay;
use crate::config::PageConfig;
use crate::error::RelayError;
use crate::renderer::{Command, DiffRenderer, PageView, Surface};
use crate::state::contact::{
    Completion, ContactForm, FormFields, SendState, SendTicket, SubmitOutcome,
};
use crate::state::hero;
use crate::state::navigation::{IntersectionEntry, SectionTracker};
use crate::state::scroll::{self, ScrollRequest};
use crate::state::viewport::{self, ViewportEvent};
use crate::types::{Point, Rect, Size};

// =============================================================================
// EVENTS
// =============================================================================

/// Host event. Pointer positions are viewport coordinates; bounds are the
/// element's bounding box in the same space.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Scroll(f64),
    Resize(Size),
    HeroPointerMove(Point),
    HeroPointerLeave,
    ButtonPointerMove { id: String, pointer: Point, bounds: Rect },
    ButtonPointerLeave { id: String },
    CardPointerMove { id: String, pointer: Point, bounds: Rect },
    CardPointerLeave { id: String },
    HamburgerClick,
    /// A mobile menu link. `href` is its target, if any.
    MobileLinkClick { href: Option<String> },
    /// Any in-page anchor.
    AnchorClick { href: String },
    BackToTopClick,
    Intersections(Vec<IntersectionEntry>),
    Submit(FormFields),
    SendCompleted {
        ticket: SendTicket,
        result: Result<(), RelayError>,
    },
}

impl PageEvent {
    fn kind(&self) -> &'static str {
        match self {
            Self::Scroll(_) => "scroll",
            Self::Resize(_) => "resize",
            Self::HeroPointerMove(_) => "hero-pointer-move",
            Self::HeroPointerLeave => "hero-pointer-leave",
            Self::ButtonPointerMove { .. } => "button-pointer-move",
            Self::ButtonPointerLeave { .. } => "button-pointer-leave",
            Self::CardPointerMove { .. } => "card-pointer-move",
            Self::CardPointerLeave { .. } => "card-pointer-leave",
            Self::HamburgerClick => "hamburger-click",
            Self::MobileLinkClick { .. } => "mobile-link-click",
            Self::AnchorClick { .. } => "anchor-click",
            Self::BackToTopClick => "back-to-top-click",
            Self::Intersections(_) => "intersections",
            Self::Submit(_) => "submit",
            Self::SendCompleted { .. } => "send-completed",
        }
    }
}

/// What the host needs to know after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatched {
    /// Suppress the browser's default action for the event.
    pub prevent_default: bool,
    /// Patches applied to the surface.
    pub patches: usize,
}

// =============================================================================
// COORDINATOR
// =============================================================================

/// Owns page state, the render pipeline and the surface.
///
/// Built by [`mount`](super::mount::mount). Viewport readings are
/// thread-local, so run one coordinator per thread.
pub struct PageCoordinator<S: Surface, R: EmailRelay> {
    config: Rc<PageConfig>,
    tracker: Rc<SectionTracker>,
    state: PageState,
    contact: ContactForm,
    view: ViewDerived,
    renderer: DiffRenderer,
    surface: S,
    relay: R,
}

impl<S: Surface, R: EmailRelay> PageCoordinator<S, R> {
    pub(crate) fn new(
        config: Rc<PageConfig>,
        tracker: Rc<SectionTracker>,
        state: PageState,
        view: ViewDerived,
        surface: S,
        relay: R,
    ) -> Self {
        let contact = ContactForm::new(config.contact.clone());
        Self {
            config,
            tracker,
            state,
            contact,
            view,
            renderer: DiffRenderer::new(),
            surface,
            relay,
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn relay(&self) -> &R {
        &self.relay
    }

    pub fn relay_mut(&mut self) -> &mut R {
        &mut self.relay
    }

    /// Current render model.
    pub fn view(&self) -> PageView {
        self.view.get()
    }

    pub fn send_state(&self) -> SendState {
        self.contact.state()
    }

    pub fn active_section(&self) -> Option<String> {
        self.state.active_section.get()
    }

    pub fn revert_pending(&self) -> bool {
        self.contact.revert_pending()
    }

    /// Emit a complete render, ignoring what the surface already shows.
    pub fn render_full(&mut self) -> usize {
        self.renderer.invalidate();
        self.render()
    }

    fn render(&mut self) -> usize {
        let view = self.view.get();
        self.renderer.render(&view, &mut self.surface)
    }

    /// Apply one host event.
    pub fn dispatch(&mut self, event: PageEvent, now: Instant) -> Dispatched {
        let kind = event.kind();
        let mut commands = Vec::new();
        let mut prevent_default = false;

        match event {
            PageEvent::Scroll(scroll_y) => {
                let signal = viewport::dispatch(ViewportEvent::Scroll(scroll_y));
                let next = hero::scroll_exit(&signal, self.state.hero.get(), &self.config.hero);
                self.state.hero.set(next);
            }
            PageEvent::Resize(size) => {
                viewport::dispatch(ViewportEvent::Resize(size));
            }
            PageEvent::HeroPointerMove(pointer) => {
                let signal = viewport::dispatch(ViewportEvent::PointerMove(pointer));
                let next =
                    hero::pointer_parallax(&signal, self.state.hero.get(), &self.config.hero);
                self.state.hero.set(next);
            }
            PageEvent::HeroPointerLeave => {
                viewport::dispatch(ViewportEvent::PointerLeave);
            }
            PageEvent::ButtonPointerMove { id, pointer, bounds } => {
                viewport::dispatch(ViewportEvent::PointerMove(pointer));
                let mut buttons = self.state.buttons.get();
                if buttons.pointer_move(&id, pointer, &bounds, &self.config.hero) {
                    self.state.buttons.set(buttons);
                } else {
                    debug!(button = %id, "pointer over undeclared button");
                }
            }
            PageEvent::ButtonPointerLeave { id } => {
                viewport::dispatch(ViewportEvent::PointerLeave);
                let mut buttons = self.state.buttons.get();
                if buttons.pointer_leave(&id) {
                    self.state.buttons.set(buttons);
                } else {
                    debug!(button = %id, "pointer left undeclared button");
                }
            }
            PageEvent::CardPointerMove { id, pointer, bounds } => {
                viewport::dispatch(ViewportEvent::PointerMove(pointer));
                let mut cards = self.state.cards.get();
                let local = bounds.local(pointer);
                if cards.pointer_move(&id, local, bounds.size(), &self.config.tilt) {
                    self.state.cards.set(cards);
                } else {
                    debug!(card = %id, "pointer over undeclared card");
                }
            }
            PageEvent::CardPointerLeave { id } => {
                viewport::dispatch(ViewportEvent::PointerLeave);
                let mut cards = self.state.cards.get();
                if cards.pointer_leave(&id) {
                    self.state.cards.set(cards);
                } else {
                    debug!(card = %id, "pointer left undeclared card");
                }
            }
            PageEvent::HamburgerClick => {
                let menu = self.state.menu.get().toggled();
                debug!(open = menu.is_open(), "menu toggled");
                self.state.menu.set(menu);
            }
            PageEvent::MobileLinkClick { href } => {
                self.state.menu.set(self.state.menu.get().closed());
                if let Some(request) = href.as_deref().and_then(ScrollRequest::for_anchor) {
                    commands.push(Command::ScrollTo(request));
                    prevent_default = true;
                }
            }
            PageEvent::AnchorClick { href } => {
                if let Some(request) = ScrollRequest::for_anchor(&href) {
                    commands.push(Command::ScrollTo(request));
                    prevent_default = true;
                }
            }
            PageEvent::BackToTopClick => {
                commands.push(Command::ScrollTo(scroll::back_to_top()));
                prevent_default = true;
            }
            PageEvent::Intersections(entries) => {
                let prior = self.state.active_section.get();
                let next = self.tracker.resolve(&entries, prior.as_deref());
                if next != prior {
                    debug!(section = ?next, "active section changed");
                    self.state.active_section.set(next);
                }
            }
            PageEvent::Submit(fields) => {
                prevent_default = true;
                if let SubmitOutcome::Started(request) = self.contact.submit(fields) {
                    self.relay.send_form(&request);
                }
                self.state.send_state.set(self.contact.state());
            }
            PageEvent::SendCompleted { ticket, result } => {
                match self.contact.complete(ticket, result, now) {
                    Completion::Sent { notice } => {
                        commands.push(Command::Notify(notice));
                        commands.push(Command::ResetForm);
                    }
                    Completion::Failed { notice, .. } => {
                        commands.push(Command::Notify(notice));
                    }
                    Completion::Stale => {}
                }
                self.state.send_state.set(self.contact.state());
            }
        }

        let patches = self.render();
        for command in &commands {
            self.surface.run(command);
        }

        debug!(event = kind, patches, commands = commands.len(), "dispatched");
        Dispatched {
            prevent_default,
            patches,
        }
    }

    /// Advance timers. Returns the number of patches applied.
    pub fn tick(&mut self, now: Instant) -> usize {
        if !self.contact.tick(now) {
            return 0;
        }
        self.state.send_state.set(self.contact.state());
        let patches = self.render();
        debug!(patches, "send label reverted");
        patches
    }
}

impl<S: Surface, R: EmailRelay> Drop for PageCoordinator<S, R> {
    fn drop(&mut self) {
        if self.contact.revert_pending() {
            debug!("coordinator dropped with a pending label revert");
        }
    }
}
