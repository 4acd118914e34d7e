//! Reactive Pipeline
//!
//! Connects host events to surface patches.
//!
//! # Pipeline Architecture
//!
//! ```text
//! PageEvent → dispatch → state signals → viewDerived → DiffRenderer → Surface
//! ```
//!
//! ## Data Flow
//!
//! 1. **dispatch** - Records viewport input, runs the owning state machine
//! 2. **viewDerived** - Reads every state signal, returns a `PageView`
//! 3. **render** - Diffs the view against the last one, patches the surface
//!
//! ## Key Design Principles
//!
//! - **Pure Derived**: the view derived only reads signals
//! - **One Render per Event**: side effects happen in exactly one place
//! - **Reactive Dependencies**: reads from signals auto-track dependencies

pub mod dispatch;
pub mod mount;
pub mod view_derived;

// Re-exports
pub use dispatch::{Dispatched, PageCoordinator, PageEvent};
pub use mount::{mount, PageStructure};
pub use view_derived::{create_view_derived, PageState, ViewDerived};
