//! Scroll State Module - Back-to-top control and smooth scroll requests
//!
//! Scroll requests are fire-and-forget: the surface animates the page and
//! nothing waits for completion.

// =============================================================================
// SCROLL REQUESTS
// =============================================================================

/// A smooth scroll the surface should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollRequest {
    /// Scroll the window to `scroll_y = 0`.
    ToTop,
    /// Bring the section with this id into view.
    ToSection(String),
}

impl ScrollRequest {
    /// Request for an in-page anchor (`#id`). A bare `#` scrolls to top.
    ///
    /// Returns `None` for anything that is not an in-page anchor.
    pub fn for_anchor(href: &str) -> Option<Self> {
        let fragment = href.strip_prefix('#')?;
        if fragment.is_empty() {
            Some(Self::ToTop)
        } else {
            Some(Self::ToSection(fragment.to_string()))
        }
    }
}

// =============================================================================
// BACK TO TOP
// =============================================================================

/// Whether the back-to-top control is shown.
pub fn back_to_top_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Activating the control.
pub fn back_to_top() -> ScrollRequest {
    ScrollRequest::ToTop
}
