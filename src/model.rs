// SPDX-License-Identifier: MPL-2.0
//! Player state model boundary.
//!
//! The model is the player's source of truth for playback attributes. Dock
//! controls read it and subscribe to per-attribute change notifications;
//! they never write it. Mutation happens elsewhere in the player, upholding
//! a one-writer-many-readers discipline at this boundary.
//!
//! Notifications are synchronous and delivered in registration order for a
//! given attribute. Subscriptions return an explicit handle; teardown is the
//! subscriber's responsibility and is idempotent.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Typed attribute keys for the playback attributes the dock controls read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAttribute {
    Mute,
    Volume,
}

/// A change notification for one attribute, carrying the new value.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    Mute(bool),
    Volume(f32),
}

impl ChangeEvent {
    pub fn attribute(&self) -> PlayerAttribute {
        match self {
            ChangeEvent::Mute(_) => PlayerAttribute::Mute,
            ChangeEvent::Volume(_) => PlayerAttribute::Volume,
        }
    }
}

type ChangeHandler = Rc<dyn Fn(&ChangeEvent)>;

struct Listener {
    id: u64,
    attribute: PlayerAttribute,
    handler: ChangeHandler,
}

struct ModelInner {
    mute: bool,
    volume: f32,
    listeners: Vec<Listener>,
    next_id: u64,
}

/// Cheap-clone shared handle to the player's state model.
#[derive(Clone)]
pub struct PlayerModel {
    inner: Rc<RefCell<ModelInner>>,
}

impl Default for PlayerModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerModel {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ModelInner {
                mute: false,
                volume: 1.0,
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    pub fn mute(&self) -> bool {
        self.inner.borrow().mute
    }

    pub fn volume(&self) -> f32 {
        self.inner.borrow().volume
    }

    /// Player-side write. Notifies `Mute` listeners only when the value
    /// actually changed.
    pub fn set_mute(&self, mute: bool) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.mute == mute {
                return;
            }
            inner.mute = mute;
        }
        self.emit(ChangeEvent::Mute(mute));
    }

    /// Player-side write. Notifies `Volume` listeners only when the value
    /// actually changed.
    pub fn set_volume(&self, volume: f32) {
        {
            let mut inner = self.inner.borrow_mut();
            if (inner.volume - volume).abs() < f32::EPSILON {
                return;
            }
            inner.volume = volume;
        }
        self.emit(ChangeEvent::Volume(volume));
    }

    /// Subscribes `handler` to changes of one attribute. The returned handle
    /// is the only way to unsubscribe; dropping it without calling
    /// [`Subscription::unsubscribe`] leaves the listener registered.
    pub fn on(
        &self,
        attribute: PlayerAttribute,
        handler: impl Fn(&ChangeEvent) + 'static,
    ) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push(Listener {
                id,
                attribute,
                handler: Rc::new(handler),
            });
            id
        };
        Subscription {
            model: Rc::downgrade(&self.inner),
            id,
            active: std::cell::Cell::new(true),
        }
    }

    fn emit(&self, event: ChangeEvent) {
        // Snapshot before invoking so handlers may subscribe or unsubscribe
        // without tripping the RefCell.
        let handlers: Vec<ChangeHandler> = {
            let inner = self.inner.borrow();
            inner
                .listeners
                .iter()
                .filter(|listener| listener.attribute == event.attribute())
                .map(|listener| Rc::clone(&listener.handler))
                .collect()
        };
        for handler in handlers {
            handler(&event);
        }
    }

    #[cfg(test)]
    fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Unsubscribe handle returned by [`PlayerModel::on`].
///
/// `unsubscribe` is idempotent and a no-op once the model is gone.
pub struct Subscription {
    model: Weak<RefCell<ModelInner>>,
    id: u64,
    active: std::cell::Cell<bool>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if !self.active.replace(false) {
            return;
        }
        if let Some(model) = self.model.upgrade() {
            model
                .borrow_mut()
                .listeners
                .retain(|listener| listener.id != self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}
