//! Outbound notifications from the atlas engine.
//!
//! Observers subscribe for a channel receiver; the engine pushes an event for
//! every effective change. Receivers that have been dropped are pruned on the
//! next emit.

use std::sync::mpsc::{Receiver, Sender, channel};

use crate::model::{LayerId, Viewport};
use crate::selection::Selection;

/// A change observers may react to.
#[derive(Debug, Clone, PartialEq)]
pub enum AtlasEvent {
    /// Center, zoom or base map changed
    ViewportChanged(Viewport),
    /// Selection changed; `None` after dismissal or auto-clear
    SelectionChanged(Option<Box<Selection>>),
    /// The set of enabled layers changed, in catalogue order
    EnabledLayersChanged(Vec<LayerId>),
    /// The map surface failed to mount; the view is unusable
    CanvasFailed(String),
}

/// Fan-out of events to any number of subscribers.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<AtlasEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new observer.
    pub fn subscribe(&mut self) -> Receiver<AtlasEvent> {
        let (send, recv) = channel();
        self.subscribers.push(send);
        recv
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver `event` to every live subscriber.
    pub fn emit(&mut self, event: AtlasEvent) {
        log::trace!("Emitting {:?}", event);
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}
