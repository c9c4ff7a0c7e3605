//! Contact events
//!
//! Detection and policy are split: detectors push `ContactEvent`s into a
//! single-consumer queue, and only the owning scene drains it and mutates
//! balls, scores and the gap. Events are edge-triggered: a contact fires
//! once when it begins, never again while it is held.

use std::collections::BTreeSet;
use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};

use super::geometry::WallKind;

/// What a ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContactKind {
    Wall(WallKind),
    /// Another ball, by id
    Ball(u32),
    /// The scoring gap
    Hole,
}

/// A contact between a ball and some other body
///
/// Ball pairs are stored once, with the lower id in `ball`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContactEvent {
    pub ball: u32,
    pub other: ContactKind,
}

impl ContactEvent {
    pub fn wall(ball: u32, wall: WallKind) -> Self {
        Self {
            ball,
            other: ContactKind::Wall(wall),
        }
    }

    pub fn hole(ball: u32) -> Self {
        Self {
            ball,
            other: ContactKind::Hole,
        }
    }

    pub fn pair(a: u32, b: u32) -> Self {
        Self {
            ball: a.min(b),
            other: ContactKind::Ball(a.max(b)),
        }
    }

    /// Scoring contacts are handled after bounces in the same batch
    pub fn is_scoring(&self) -> bool {
        self.other == ContactKind::Hole
    }

    pub fn involves(&self, id: u32) -> bool {
        self.ball == id || self.other == ContactKind::Ball(id)
    }
}

/// Remembers which contacts are held so only beginnings are reported
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    active: BTreeSet<ContactEvent>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held set with `touching`; returns contacts that just began
    ///
    /// Bounces come first, scoring contacts last, each group in stable order.
    pub fn update(&mut self, touching: BTreeSet<ContactEvent>) -> Vec<ContactEvent> {
        let mut begun: Vec<ContactEvent> = touching.difference(&self.active).copied().collect();
        begun.sort_by_key(|c| c.is_scoring());
        self.active = touching;
        begun
    }

    /// Drop every held contact of a ball (it was teleported)
    pub fn forget_ball(&mut self, id: u32) {
        self.active.retain(|c| !c.involves(id));
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn is_held(&self, contact: &ContactEvent) -> bool {
        self.active.contains(contact)
    }
}

/// Producer handle; cheap to clone and `Send`
#[derive(Debug, Clone)]
pub struct ContactSender {
    tx: Sender<ContactEvent>,
}

impl ContactSender {
    /// Fire-and-forget; a dropped queue just discards the event
    pub fn send(&self, event: ContactEvent) {
        if self.tx.send(event).is_err() {
            log::debug!("Contact queue closed, dropping {:?}", event);
        }
    }
}

/// Single-consumer contact queue owned by the scene
#[derive(Debug)]
pub struct ContactQueue {
    tx: Sender<ContactEvent>,
    rx: Receiver<ContactEvent>,
}

impl Default for ContactQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> ContactSender {
        ContactSender { tx: self.tx.clone() }
    }

    pub fn push(&self, event: ContactEvent) {
        // The queue holds its own receiver, so this cannot fail
        let _ = self.tx.send(event);
    }

    /// Next pending event, if any
    pub fn pop(&self) -> Option<ContactEvent> {
        self.rx.try_recv().ok()
    }

    /// Throw away everything pending (match restart/stop)
    pub fn discard_pending(&self) -> usize {
        self.rx.try_iter().count()
    }
}
