// SPDX-License-Identifier: MPL-2.0
//! Pointer/touch normalization for the dock controls.
//!
//! Raw pointer and touch events are collapsed into a two-word vocabulary,
//! `click` and `tap`, so a control registers one activation handler instead
//! of tracking press state itself. Dispatch bubbles: a listener bound to a
//! node fires for events targeting that node or any of its descendants.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::dom::Element;

/// Raw input kinds as delivered by the host's event plumbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    MouseDown,
    MouseUp,
    TouchStart,
    TouchEnd,
}

/// A raw pointer/touch event. The target may be any node in the tree.
#[derive(Debug, Clone)]
pub struct RawPointerEvent {
    pub kind: PointerKind,
    pub target: Element,
}

impl RawPointerEvent {
    pub fn new(kind: PointerKind, target: &Element) -> Self {
        Self {
            kind,
            target: target.clone(),
        }
    }
}

/// Normalized activation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Mouse press completed within the listener's scope.
    Click,
    /// Touch completed within the listener's scope.
    Tap,
}

/// A normalized gesture. Keeps the original raw target so handlers can
/// resolve which logical element the user meant to activate.
#[derive(Debug, Clone)]
pub struct GestureEvent {
    pub kind: GestureKind,
    pub target: Element,
}

type ActivationHandler = Rc<dyn Fn(&GestureEvent)>;

/// A listenable bound to one element.
///
/// `MouseDown`/`TouchStart` arms the listener; the matching `MouseUp` or
/// `TouchEnd` within the same scope emits the normalized gesture. Events
/// outside the scope, or a release without a preceding press, are ignored.
pub struct UiListener {
    element: Element,
    handler: RefCell<Option<ActivationHandler>>,
    pressed: Cell<bool>,
}

impl UiListener {
    pub fn new(element: &Element) -> Self {
        Self {
            element: element.clone(),
            handler: RefCell::new(None),
            pressed: Cell::new(false),
        }
    }

    /// Registers the single activation handler, fired for both `click` and
    /// `tap`. A later registration replaces the earlier one.
    pub fn on_activate(&self, handler: impl Fn(&GestureEvent) + 'static) {
        *self.handler.borrow_mut() = Some(Rc::new(handler));
    }

    /// Drops the handler. Idempotent; dispatch afterwards is a no-op.
    pub fn detach(&self) {
        *self.handler.borrow_mut() = None;
        self.pressed.set(false);
    }

    /// Feeds one raw event through normalization.
    pub fn dispatch(&self, event: &RawPointerEvent) {
        let in_scope =
            event.target.same_node(&self.element) || event.target.is_descendant_of(&self.element);

        match event.kind {
            PointerKind::MouseDown | PointerKind::TouchStart => {
                self.pressed.set(in_scope);
            }
            PointerKind::MouseUp | PointerKind::TouchEnd => {
                let armed = self.pressed.replace(false);
                if !armed || !in_scope {
                    return;
                }
                let kind = if event.kind == PointerKind::MouseUp {
                    GestureKind::Click
                } else {
                    GestureKind::Tap
                };
                // Clone out of the RefCell so a handler may detach itself.
                let handler = self.handler.borrow().clone();
                if let Some(handler) = handler {
                    handler(&GestureEvent {
                        kind,
                        target: event.target.clone(),
                    });
                }
            }
        }
    }
}
