//! The page surface: where patches and commands land.
//!
//! In a browser this is the DOM. The coordinator never touches it directly;
//! the renderer hands it `DomPatch`es and the dispatcher hands it `Command`s.

use crate::state::scroll::ScrollRequest;
use crate::types::Target;

/// Inline style properties the coordinator writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Transform,
    Opacity,
    Overflow,
}

impl StyleProperty {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transform => "transform",
            Self::Opacity => "opacity",
            Self::Overflow => "overflow",
        }
    }
}

/// A change to persistent element state.
#[derive(Debug, Clone, PartialEq)]
pub enum DomPatch {
    /// Add (`enabled`) or remove a class.
    Class {
        target: Target,
        class: &'static str,
        enabled: bool,
    },
    /// Set an inline style, or clear it with `None`.
    Style {
        target: Target,
        property: StyleProperty,
        value: Option<String>,
    },
    /// Replace an element's inner markup.
    Label { target: Target, html: String },
}

/// A one-shot action with no persistent state to diff.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Smooth scroll; fire-and-forget.
    ScrollTo(ScrollRequest),
    /// Clear the contact form's fields.
    ResetForm,
    /// Blocking user notification.
    Notify(String),
}

pub trait Surface {
    fn apply(&mut self, patch: &DomPatch);
    fn run(&mut self, command: &Command);
}

/// Surface that records everything it receives.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub patches: Vec<DomPatch>,
    pub commands: Vec<Command>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take and clear what has been recorded so far.
    pub fn drain(&mut self) -> (Vec<DomPatch>, Vec<Command>) {
        (
            std::mem::take(&mut self.patches),
            std::mem::take(&mut self.commands),
        )
    }

    /// Latest class state recorded for `target`.
    pub fn class(&self, target: &Target, class: &str) -> Option<bool> {
        self.patches.iter().rev().find_map(|p| match p {
            DomPatch::Class {
                target: t,
                class: c,
                enabled,
            } if t == target && *c == class => Some(*enabled),
            _ => None,
        })
    }

    /// Latest inline style recorded for `target` (outer `None` if never set).
    pub fn style(&self, target: &Target, property: StyleProperty) -> Option<Option<String>> {
        self.patches.iter().rev().find_map(|p| match p {
            DomPatch::Style {
                target: t,
                property: prop,
                value,
            } if t == target && *prop == property => Some(value.clone()),
            _ => None,
        })
    }

    /// Latest label recorded for `target`.
    pub fn label(&self, target: &Target) -> Option<&str> {
        self.patches.iter().rev().find_map(|p| match p {
            DomPatch::Label { target: t, html } if t == target => Some(html.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn apply(&mut self, patch: &DomPatch) {
        self.patches.push(patch.clone());
    }

    fn run(&mut self, command: &Command) {
        self.commands.push(command.clone());
    }
}
