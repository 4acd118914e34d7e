//! Differential renderer.
//!
//! The DiffRenderer compares the current view to the previous one and only
//! emits patches for properties that changed. Repeated scroll or pointer
//! events that land on the same derived state cost nothing on the surface.
//!
//! # Algorithm
//!
//! 1. For each property of the new view:
//!    - If a previous view exists and the property is unchanged: skip
//!    - Otherwise: emit the patch for it
//! 2. Store the current view as previous for next comparison

use std::collections::BTreeMap;

use super::surface::{DomPatch, StyleProperty, Surface};
use super::view::{PageFlags, PageView};
use crate::types::{num, HeroLayer, Target, Transform};

/// Class toggles driven by page flags.
const FLAG_CLASSES: [(PageFlags, Target, &str); 4] = [
    (PageFlags::NAV_SCROLLED, Target::Nav, "scrolled"),
    (PageFlags::MENU_OPEN, Target::Hamburger, "active"),
    (PageFlags::MENU_OPEN, Target::MobileMenu, "active"),
    (PageFlags::BACK_TO_TOP_VISIBLE, Target::BackToTop, "visible"),
];

/// Differential renderer.
///
/// Keeps track of the previous view to enable diff-based rendering.
#[derive(Debug, Default)]
pub struct DiffRenderer {
    previous: Option<PageView>,
}

impl DiffRenderer {
    /// Create a new diff renderer.
    pub fn new() -> Self {
        Self { previous: None }
    }

    /// Render a view, emitting only changed properties.
    ///
    /// Returns the number of patches emitted.
    pub fn render<S: Surface + ?Sized>(&mut self, view: &PageView, surface: &mut S) -> usize {
        let patches = diff(self.previous.as_ref(), view);
        for patch in &patches {
            surface.apply(patch);
        }
        self.previous = Some(view.clone());
        patches.len()
    }

    /// Forget the previous view so the next render is complete.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Check if we have a previous view.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

/// Patches taking `previous` (or a blank page) to `next`.
pub fn diff(previous: Option<&PageView>, next: &PageView) -> Vec<DomPatch> {
    let mut out = Vec::new();

    let prev_flags = previous.map(|p| p.flags);
    for (flag, target, class) in FLAG_CLASSES {
        let enabled = next.flags.contains(flag);
        if prev_flags.map(|f| f.contains(flag)) != Some(enabled) {
            out.push(DomPatch::Class {
                target,
                class,
                enabled,
            });
        }
    }

    let locked = next.flags.contains(PageFlags::SCROLL_LOCKED);
    if prev_flags.map(|f| f.contains(PageFlags::SCROLL_LOCKED)) != Some(locked) {
        out.push(DomPatch::Style {
            target: Target::Body,
            property: StyleProperty::Overflow,
            value: locked.then(|| "hidden".to_string()),
        });
    }

    for (id, &active) in &next.nav_links {
        if previous.and_then(|p| p.nav_links.get(id)) != Some(&active) {
            out.push(DomPatch::Class {
                target: Target::NavLink(id.clone()),
                class: "active",
                enabled: active,
            });
        }
    }

    for layer in HeroLayer::ALL {
        let transform = next.hero.transform(layer);
        if previous.map(|p| p.hero.transform(layer)) != Some(transform) {
            out.push(transform_patch(Target::Hero(layer), transform));
        }
    }
    let opacity = next.hero.intro_opacity();
    if previous.map(|p| p.hero.intro_opacity()) != Some(opacity) {
        out.push(DomPatch::Style {
            target: Target::Hero(HeroLayer::IntroBox),
            property: StyleProperty::Opacity,
            value: opacity.map(|o| num(o).to_string()),
        });
    }

    diff_transforms(
        previous.map(|p| &p.buttons),
        &next.buttons,
        Target::HeroButton,
        &mut out,
    );
    diff_transforms(
        previous.map(|p| &p.cards),
        &next.cards,
        Target::SkillCard,
        &mut out,
    );

    if previous.map(|p| p.submit_label.as_str()) != Some(next.submit_label.as_str()) {
        out.push(DomPatch::Label {
            target: Target::SubmitButton,
            html: next.submit_label.clone(),
        });
    }

    out
}

fn transform_patch(target: Target, transform: Option<Transform>) -> DomPatch {
    DomPatch::Style {
        target,
        property: StyleProperty::Transform,
        value: transform.map(|t| t.to_css()),
    }
}

fn diff_transforms(
    previous: Option<&BTreeMap<String, Option<Transform>>>,
    next: &BTreeMap<String, Option<Transform>>,
    target: fn(String) -> Target,
    out: &mut Vec<DomPatch>,
) {
    for (id, transform) in next {
        if previous.and_then(|p| p.get(id)) != Some(transform) {
            out.push(transform_patch(target(id.clone()), *transform));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::RecordingSurface;

    fn view() -> PageView {
        let mut view = PageView {
            submit_label: "<span>Send Message</span>".to_string(),
            ..Default::default()
        };
        view.nav_links.insert("nav-about".to_string(), false);
        view.cards.insert("rust".to_string(), None);
        view
    }

    #[test]
    fn test_diff_renderer_creation() {
        let renderer = DiffRenderer::new();
        assert!(!renderer.has_previous());
    }

    #[test]
    fn test_first_render_is_complete() {
        let mut renderer = DiffRenderer::new();
        let mut surface = RecordingSurface::new();
        let count = renderer.render(&view(), &mut surface);

        // 4 flag classes, body overflow, one link, 4 layers, opacity, one card, label
        assert_eq!(count, 13);
        assert_eq!(surface.class(&Target::Nav, "scrolled"), Some(false));
        assert_eq!(
            surface.style(&Target::Body, StyleProperty::Overflow),
            Some(None)
        );
    }

    #[test]
    fn test_unchanged_view_emits_nothing() {
        let mut renderer = DiffRenderer::new();
        let mut surface = RecordingSurface::new();
        renderer.render(&view(), &mut surface);
        assert_eq!(renderer.render(&view(), &mut surface), 0);
    }

    #[test]
    fn test_only_changes_emitted() {
        let mut renderer = DiffRenderer::new();
        let mut surface = RecordingSurface::new();
        renderer.render(&view(), &mut surface);
        surface.drain();

        let mut next = view();
        next.flags = PageFlags::MENU_OPEN | PageFlags::SCROLL_LOCKED;
        next.cards.insert("rust".to_string(), Some(Transform::flat(1000.0)));
        renderer.render(&next, &mut surface);

        let (patches, _) = surface.drain();
        assert_eq!(patches.len(), 4);
        assert!(patches.contains(&DomPatch::Class {
            target: Target::MobileMenu,
            class: "active",
            enabled: true,
        }));
        assert!(patches.contains(&DomPatch::Style {
            target: Target::Body,
            property: StyleProperty::Overflow,
            value: Some("hidden".to_string()),
        }));
        assert!(patches.contains(&DomPatch::Style {
            target: Target::SkillCard("rust".to_string()),
            property: StyleProperty::Transform,
            value: Some("perspective(1000px) rotateX(0deg) rotateY(0deg)".to_string()),
        }));
    }

    #[test]
    fn test_invalidate_forces_full_render() {
        let mut renderer = DiffRenderer::new();
        let mut surface = RecordingSurface::new();
        renderer.render(&view(), &mut surface);
        renderer.invalidate();
        assert!(!renderer.has_previous());
        assert_eq!(renderer.render(&view(), &mut surface), 13);
    }
}
