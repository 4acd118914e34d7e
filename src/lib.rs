//! # crystal-folio
//!
//! Scroll-reactive UI state for a single-page portfolio.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! Host events (scroll, pointer, clicks, intersection reports, form submits)
//! enter a single coordinator. Each event updates the state machine that owns
//! it; every piece of state is a reactive `Signal`. The render model is a
//! derived over those signals, and a diff renderer turns it into DOM patches:
//! ```text
//! PageEvent → state signals → viewDerived → DiffRenderer → Surface
//! ```
//!
//! The widgets the page relies on (reveal animations, carousels, email relay)
//! sit behind traits in [`collaborators`].
//!
//! ## Modules
//!
//! - [`types`] - Geometry, transforms, DOM targets
//! - [`config`] - Thresholds, factors and widget presets (TOML)
//! - [`state`] - Viewport, navigation, hero, tilt, scroll and contact state
//! - [`renderer`] - Page view, diff renderer, surface trait
//! - [`pipeline`] - View derived, dispatcher, mount

pub mod collaborators;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use collaborators::{CarouselHost, EmailRelay, RecordingWidgets, RevealAnimator};

pub use config::{CarouselConfig, ContactConfig, HeroConfig, PageConfig, RevealConfig};

pub use error::{ConfigError, RelayError};

pub use pipeline::{mount, Dispatched, PageCoordinator, PageEvent, PageStructure};

pub use renderer::{
    Command, DiffRenderer, DomPatch, PageFlags, PageView, RecordingSurface, StyleProperty, Surface,
};

pub use state::contact::{FormFields, SendRequest, SendState, SendTicket};
pub use state::navigation::{IntersectionEntry, NavLink};
pub use state::scroll::ScrollRequest;
