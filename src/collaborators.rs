//! External collaborators.
//!
//! Third-party widgets the page leans on. The coordinator only supplies their
//! configuration or request and reacts to what comes back; their internals
//! are opaque.

use crate::config::{CarouselConfig, ResolvedCarousel, RevealConfig};
use crate::state::contact::SendRequest;

/// Animate-on-scroll library. Initialized once at mount.
pub trait RevealAnimator {
    fn init(&mut self, config: &RevealConfig);
}

/// Slider/carousel library. Called once per carousel at mount.
///
/// `resolved` holds the settings for the viewport width at mount time. The
/// library applies `config.breakpoints` itself on later resizes.
pub trait CarouselHost {
    fn mount_carousel(&mut self, config: &CarouselConfig, resolved: &ResolvedCarousel);
}

/// Email-relay transport.
///
/// `send_form` starts the send and returns immediately. The host reports the
/// outcome later with `PageEvent::SendCompleted` carrying `request.ticket`.
pub trait EmailRelay {
    fn send_form(&mut self, request: &SendRequest);
}

/// Records initialization calls; for hosts without the widget libraries (tests, preview).
#[derive(Debug, Default, Clone)]
pub struct RecordingWidgets {
    pub reveal_inits: Vec<RevealConfig>,
    pub carousels: Vec<(CarouselConfig, ResolvedCarousel)>,
}

impl RevealAnimator for RecordingWidgets {
    fn init(&mut self, config: &RevealConfig) {
        self.reveal_inits.push(config.clone());
    }
}

impl CarouselHost for RecordingWidgets {
    fn mount_carousel(&mut self, config: &CarouselConfig, resolved: &ResolvedCarousel) {
        self.carousels.push((config.clone(), *resolved));
    }
}
