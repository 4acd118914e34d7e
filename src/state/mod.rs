//! State Module - Interaction state machines
//!
//! This module contains the state systems behind the page's interactivity:
//!
//! - **Viewport** - Scroll/pointer/size signals, consumer registry
//! - **Navigation** - Sticky header, mobile menu, active section
//! - **Hero** - Pointer parallax, magnetic buttons, scroll exit
//! - **Tilt** - 3D skill card rotation
//! - **Scroll** - Back-to-top, smooth scroll requests
//! - **Contact** - Send button state machine
//! - **Timer** - Cancellable revert deadline

pub mod contact;
pub mod hero;
pub mod navigation;
pub mod scroll;
pub mod tilt;
pub mod timer;
pub mod viewport;
