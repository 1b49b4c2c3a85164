// SPDX-License-Identifier: MPL-2.0
//! Markup template for the mute dock button.
//!
//! `mute_template` is a pure function from a [`ViewDescriptor`] to an
//! element tree: the same descriptor always produces byte-identical markup.
//! The id and class it stamps on the button are part of the external
//! contract shared with the player's stylesheet and gesture resolution.

use crate::dom::Element;

/// Default id of the mute dock button. External contract; the surrounding
/// stylesheet keys on it.
pub const MUTE_DOCK_ID: &str = "mute-dock";

/// Marker class of the mute dock button. External contract; gesture
/// resolution and the stylesheet key on it.
pub const MUTE_BUTTON_CLASS: &str = "jw-mute-dock-btn";

const ICON_CLASS: &str = "jw-mute-icon";
const TOOLTIP_CLASS: &str = "jw-tooltip";

const ICON_MUTED: &str = "\u{1F507}";
const ICON_UNMUTED: &str = "\u{1F50A}";

/// Immutable per-render description of the button. Rebuilt fresh for every
/// render pass from the control's current fields and never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDescriptor {
    /// Optional icon image URI. When absent, a glyph icon is rendered.
    pub image: Option<String>,
    /// Localized tooltip text.
    pub tooltip: String,
    /// Element id stamped on the button.
    pub dom_id: String,
    /// Marker class stamped on the button.
    pub css_class: String,
    /// Current mute flag, as reported by the model.
    pub muted: bool,
}

impl ViewDescriptor {
    pub fn new(image: Option<String>, tooltip: String, muted: bool) -> Self {
        Self {
            image,
            tooltip,
            dom_id: MUTE_DOCK_ID.to_string(),
            css_class: MUTE_BUTTON_CLASS.to_string(),
            muted,
        }
    }
}

/// Builds the button's element tree from a descriptor.
///
/// Shape: a `div` carrying the descriptor's id and class, an icon child
/// (`img` when an image URI is set, glyph `span` otherwise), and a tooltip
/// `span`.
pub fn mute_template(descriptor: &ViewDescriptor) -> Element {
    let button = Element::new("div");
    button.set_id(&descriptor.dom_id);
    button.add_class(&descriptor.css_class);
    if descriptor.muted {
        button.add_class("jw-off");
    }

    let icon = match &descriptor.image {
        Some(uri) => {
            let img = Element::new("img");
            img.add_class(ICON_CLASS);
            img.set_attr("src", uri);
            img
        }
        None => {
            let glyph = Element::new("span");
            glyph.add_class(ICON_CLASS);
            glyph.set_text(if descriptor.muted {
                ICON_MUTED
            } else {
                ICON_UNMUTED
            });
            glyph
        }
    };
    button.append_child(&icon);

    let tooltip = Element::new("span");
    tooltip.add_class(TOOLTIP_CLASS);
    tooltip.set_text(&descriptor.tooltip);
    button.append_child(&tooltip);

    button
}
