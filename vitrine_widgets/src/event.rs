// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime inputs and outputs: platform input events in, widget events and
//! warnings out.

use core::fmt;

use vitrine_dom::NodeId;

/// A platform input event delivered at the document root.
///
/// `target` is the node the platform reports as the event origin; the runtime
/// finds the widget it belongs to by walking outward from it.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer moved over `target`.
    PointerMove {
        /// Inner-most node under the pointer.
        target: NodeId,
    },
    /// Primary button pressed over `target`.
    PointerDown {
        /// Pressed node.
        target: NodeId,
    },
    /// Activation (click or equivalent) of `target`.
    Click {
        /// Activated node.
        target: NodeId,
    },
    /// Key pressed while `target` has focus.
    KeyDown {
        /// Focused node.
        target: NodeId,
        /// Key name as reported by the platform (`"ArrowDown"`, `"Escape"`, `"a"`).
        key: String,
    },
    /// Text input changed.
    Input {
        /// Input element.
        target: NodeId,
        /// Full current value.
        value: String,
    },
    /// Form control committed a change.
    Change {
        /// Control element.
        target: NodeId,
        /// New value.
        value: ChangeValue,
    },
}

impl InputEvent {
    /// Origin node of the event.
    pub fn target(&self) -> NodeId {
        match self {
            Self::PointerMove { target }
            | Self::PointerDown { target }
            | Self::Click { target }
            | Self::KeyDown { target, .. }
            | Self::Input { target, .. }
            | Self::Change { target, .. } => *target,
        }
    }
}

/// Payload of [`InputEvent::Change`].
#[derive(Clone, Debug, PartialEq)]
pub enum ChangeValue {
    /// Checkbox state.
    Checked(bool),
    /// Files chosen in a file input.
    Files(Vec<FileInfo>),
    /// Any other committed text value.
    Text(String),
}

/// A file chosen in a file input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileInfo {
    /// File name without directories.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
}

impl FileInfo {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Kinds of widget events the runtime emits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A dropdown menu opened.
    DropdownOpen,
    /// A dropdown menu closed.
    DropdownClose,
    /// An option was selected.
    DropdownSelect,
    /// A multi-select option was deselected.
    DropdownDeselect,
    /// The selection was cleared.
    DropdownClear,
    /// The shared popover was shown for a trigger.
    PopoverShow,
    /// The shared popover was hidden.
    PopoverHide,
    /// The shared tooltip was shown for a trigger.
    TooltipShow,
    /// The active tab changed.
    TabChange,
    /// An accordion panel expanded.
    AccordionOpen,
    /// An accordion panel collapsed.
    AccordionClose,
    /// Files were added to an upload widget.
    FileUploadChange,
    /// A file was removed from an upload widget.
    FileUploadRemove,
    /// A chip dropdown opened.
    ChipDropdownOpen,
    /// A chip dropdown closed.
    ChipDropdownClose,
    /// A chip dropdown option was selected.
    ChipDropdownSelect,
    /// The checked set of a checkbox group changed.
    CheckboxGroupChange,
}

impl EventKind {
    /// Stable event name listeners subscribe to.
    pub const fn name(self) -> &'static str {
        match self {
            Self::DropdownOpen => "dropdown:open",
            Self::DropdownClose => "dropdown:close",
            Self::DropdownSelect => "dropdown:select",
            Self::DropdownDeselect => "dropdown:deselect",
            Self::DropdownClear => "dropdown:clear",
            Self::PopoverShow => "popover:show",
            Self::PopoverHide => "popover:hide",
            Self::TooltipShow => "tooltip:show",
            Self::TabChange => "tab:change",
            Self::AccordionOpen => "accordion:open",
            Self::AccordionClose => "accordion:close",
            Self::FileUploadChange => "file-upload:change",
            Self::FileUploadRemove => "file-upload:remove",
            Self::ChipDropdownOpen => "chip-dropdown:open",
            Self::ChipDropdownClose => "chip-dropdown:close",
            Self::ChipDropdownSelect => "chip-dropdown:select",
            Self::CheckboxGroupChange => "checkbox-group:change",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A widget event emitted by a controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetEvent {
    /// What happened.
    pub kind: EventKind,
    /// Widget element the event concerns (root, trigger, item, or panel).
    pub target: NodeId,
    /// Value payload (option value, tab target, file name).
    pub value: Option<String>,
    /// Human readable payload (option label, tab text).
    pub text: Option<String>,
}

impl WidgetEvent {
    /// Event without payload.
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            value: None,
            text: None,
        }
    }

    /// Attach a value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attach a text payload.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Stable event name.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// A recoverable inconsistency found in markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// More than one tab in a group was marked active; only the first was kept.
    MultipleActiveTabs {
        /// The `.tabs` group.
        group: NodeId,
        /// How many tabs were marked active.
        count: usize,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleActiveTabs { group, count } => write!(
                f,
                "tab group {group:?} had {count} active tabs; keeping the first"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_are_stable() {
        assert_eq!(EventKind::DropdownDeselect.name(), "dropdown:deselect");
        assert_eq!(EventKind::FileUploadRemove.to_string(), "file-upload:remove");
        assert_eq!(
            EventKind::CheckboxGroupChange.name(),
            "checkbox-group:change"
        );
    }
}
