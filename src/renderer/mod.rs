//! Renderer
//!
//! Turns a `PageView` into surface patches.
//!
//! - [`view`] - The per-frame render model
//! - [`diff`] - Differential renderer (only changed properties)
//! - [`surface`] - The `Surface` trait, patches and commands

pub mod diff;
pub mod surface;
pub mod view;

pub use diff::DiffRenderer;
pub use surface::{Command, DomPatch, RecordingSurface, StyleProperty, Surface};
pub use view::{PageFlags, PageView};
