// SPDX-License-Identifier: MPL-2.0
//! The mute dock control.
//!
//! A clickable indicator reflecting the player's current mute state. The
//! control owns its mounted element and a subscription to the model's mute
//! attribute; user activation is forwarded to an owner-supplied callback and
//! the control itself never writes the model. Each mute notification
//! re-renders the element's inner content in place, so the mounted node and
//! its gesture listener survive every render pass.

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::Element;
use crate::gesture::{GestureEvent, RawPointerEvent, UiListener};
use crate::i18n::I18n;
use crate::model::{PlayerAttribute, PlayerModel, Subscription};
use crate::template::{mute_template, ViewDescriptor};

/// What happens to the dock visually when the user clicks it.
///
/// The default relies solely on the model's change notification: a click
/// invokes the callback and nothing else, so visible state can never drift
/// from the actual mute state if the request is rejected upstream.
/// `OptimisticHide` additionally hides the element immediately after the
/// callback, treating the click as one-shot; nothing un-hides it short of an
/// external re-mount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HidePolicy {
    #[default]
    ModelDriven,
    OptimisticHide,
}

type ActivationCallback = Rc<dyn Fn(&GestureEvent)>;

struct ControlState {
    model: PlayerModel,
    i18n: Rc<I18n>,
    callback: Option<ActivationCallback>,
    element: Element,
    descriptor: ViewDescriptor,
    image: Option<String>,
    policy: HidePolicy,
    disposed: bool,
}

/// The mute dock control. See the module docs for the ownership contract.
pub struct MuteControl {
    state: Rc<RefCell<ControlState>>,
    listener: Rc<UiListener>,
    subscription: Subscription,
}

impl MuteControl {
    /// Builds the control with the default [`HidePolicy::ModelDriven`].
    ///
    /// Synchronously renders the initial markup, applies the dock's layout
    /// hints, attaches the click/tap listener, and subscribes to mute
    /// changes on `model`. The model is shared, not owned; `callback` is
    /// owned and immutable for the control's life.
    pub fn new(
        model: &PlayerModel,
        i18n: Rc<I18n>,
        callback: impl Fn(&GestureEvent) + 'static,
    ) -> Self {
        Self::with_policy(model, i18n, callback, HidePolicy::default())
    }

    pub fn with_policy(
        model: &PlayerModel,
        i18n: Rc<I18n>,
        callback: impl Fn(&GestureEvent) + 'static,
        policy: HidePolicy,
    ) -> Self {
        let descriptor = build_descriptor(model, &i18n, None);
        let element = mute_template(&descriptor);
        // Dock placement within the parent container.
        element.set_style(&[("position", "absolute"), ("bottom", "-2.5em"), ("right", "0")]);

        let state = Rc::new(RefCell::new(ControlState {
            model: model.clone(),
            i18n,
            callback: Some(Rc::new(callback)),
            element: element.clone(),
            descriptor,
            image: None,
            policy,
            disposed: false,
        }));

        let listener = Rc::new(UiListener::new(&element));
        let for_clicks = Rc::downgrade(&state);
        listener.on_activate(move |event| {
            if let Some(state) = for_clicks.upgrade() {
                handle_activation(&state, event);
            }
        });

        let for_renders = Rc::downgrade(&state);
        let subscription = model.on(PlayerAttribute::Mute, move |_| {
            if let Some(state) = for_renders.upgrade() {
                render_state(&state);
            }
        });

        Self {
            state,
            listener,
            subscription,
        }
    }

    /// The mounted element, by reference, for the parent layout owner to
    /// attach to the page. The control keeps responsibility for the node's
    /// content.
    pub fn element(&self) -> Element {
        self.state.borrow().element.clone()
    }

    /// Rebuilds the descriptor from current fields and replaces the mounted
    /// element's inner content. Idempotent; the element's identity never
    /// changes. No-op after [`MuteControl::dispose`].
    pub fn render(&self) {
        render_state(&self.state);
    }

    /// Sets or clears the icon image URI and re-renders.
    pub fn set_image(&self, image: Option<String>) {
        {
            let mut state = self.state.borrow_mut();
            if state.disposed {
                return;
            }
            state.image = image;
        }
        self.render();
    }

    /// Feeds one raw pointer/touch event into the control's gesture
    /// listener.
    pub fn dispatch_pointer(&self, event: &RawPointerEvent) {
        self.listener.dispatch(event);
    }

    /// Tears the control down: unsubscribes from the model, detaches the
    /// gesture listener, and drops the callback. Idempotent; every
    /// operation on a disposed control is a no-op.
    pub fn dispose(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.disposed {
                return;
            }
            state.disposed = true;
            state.callback = None;
        }
        self.subscription.unsubscribe();
        self.listener.detach();
    }

    pub fn is_disposed(&self) -> bool {
        self.state.borrow().disposed
    }
}

impl Drop for MuteControl {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn build_descriptor(model: &PlayerModel, i18n: &I18n, image: Option<String>) -> ViewDescriptor {
    let muted = model.mute();
    // The tooltip names the action a click performs.
    let tooltip = if muted {
        i18n.tr("mute-tooltip-unmute")
    } else {
        i18n.tr("mute-tooltip-mute")
    };
    ViewDescriptor::new(image, tooltip, muted)
}

/// Maps a raw gesture target to the button the user meant to activate: the
/// target itself when it carries the marker class, otherwise its immediate
/// parent when that parent carries it. Icon and tooltip children need no
/// listeners of their own.
fn resolve_activation_target(marker_class: &str, event: &GestureEvent) -> Option<Element> {
    if event.target.has_class(marker_class) {
        return Some(event.target.clone());
    }
    event
        .target
        .parent()
        .filter(|parent| parent.has_class(marker_class))
}

fn handle_activation(state: &Rc<RefCell<ControlState>>, event: &GestureEvent) {
    let (marker_class, callback, policy, element) = {
        let state = state.borrow();
        if state.disposed {
            return;
        }
        (
            state.descriptor.css_class.clone(),
            state.callback.clone(),
            state.policy,
            state.element.clone(),
        )
    };

    if resolve_activation_target(&marker_class, event).is_none() {
        return;
    }
    let Some(callback) = callback else {
        return;
    };
    // The borrow is released above: the callback may mutate the model,
    // which re-enters this control through its mute subscription.
    callback(event);

    if policy == HidePolicy::OptimisticHide {
        element.set_style(&[("display", "none")]);
    }
}

fn render_state(state: &Rc<RefCell<ControlState>>) {
    let mut state = state.borrow_mut();
    if state.disposed {
        return;
    }
    state.descriptor = build_descriptor(&state.model, &state.i18n, state.image.clone());
    let fresh = mute_template(&state.descriptor);
    state.element.replace_inner(&fresh);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::gesture::GestureKind;
    use crate::template::MUTE_BUTTON_CLASS;

    fn english() -> Rc<I18n> {
        Rc::new(I18n::new(Some("en-US".to_string()), &Config::default()))
    }

    fn gesture_on(target: &Element) -> GestureEvent {
        GestureEvent {
            kind: GestureKind::Click,
            target: target.clone(),
        }
    }

    #[test]
    fn resolves_marked_target_directly() {
        let button = Element::new("div");
        button.add_class(MUTE_BUTTON_CLASS);
        let resolved = resolve_activation_target(MUTE_BUTTON_CLASS, &gesture_on(&button))
            .expect("marked target resolves");
        assert!(resolved.same_node(&button));
    }

    #[test]
    fn resolves_child_target_to_parent() {
        let button = Element::new("div");
        button.add_class(MUTE_BUTTON_CLASS);
        let icon = Element::new("span");
        button.append_child(&icon);
        let resolved = resolve_activation_target(MUTE_BUTTON_CLASS, &gesture_on(&icon))
            .expect("child target resolves to parent");
        assert!(resolved.same_node(&button));
    }

    #[test]
    fn unrelated_target_does_not_resolve() {
        let stray = Element::new("div");
        assert!(resolve_activation_target(MUTE_BUTTON_CLASS, &gesture_on(&stray)).is_none());

        let unmarked_parent = Element::new("div");
        let parented = Element::new("span");
        unmarked_parent.append_child(&parented);
        assert!(resolve_activation_target(MUTE_BUTTON_CLASS, &gesture_on(&parented)).is_none());
    }

    #[test]
    fn descriptor_tooltip_names_the_action() {
        let model = PlayerModel::new();
        let i18n = english();
        assert_eq!(build_descriptor(&model, &i18n, None).tooltip, "Mute");
        model.set_mute(true);
        assert_eq!(build_descriptor(&model, &i18n, None).tooltip, "Unmute");
    }

    #[test]
    fn construction_applies_dock_layout_hints() {
        let model = PlayerModel::new();
        let control = MuteControl::new(&model, english(), |_| {});
        let element = control.element();
        assert_eq!(element.style("position").as_deref(), Some("absolute"));
        assert_eq!(element.style("bottom").as_deref(), Some("-2.5em"));
        assert_eq!(element.style("right").as_deref(), Some("0"));
    }

    #[test]
    fn set_image_rerenders_with_img_icon() {
        let model = PlayerModel::new();
        let control = MuteControl::new(&model, english(), |_| {});
        control.set_image(Some("skins/mute.png".to_string()));
        let icon = control
            .element()
            .query_class("jw-mute-icon")
            .expect("icon child");
        assert_eq!(icon.tag(), "img");
    }
}
