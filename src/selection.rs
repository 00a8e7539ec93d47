//! Single-slot publish/subscribe channel coupling independently built views.
//!
//! The box plot publishes the family size a user picked; the scatter plot
//! subscribes and re-derives its highlight. Delivery is synchronous, in
//! subscription order, and never buffered: publishing with no subscribers
//! drops the event, and new subscribers do not see past events.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use crate::record::FamilySize;

/// Currently selected family-size category, or `None` for no selection.
pub type FamilySelection = Option<FamilySize>;

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`SelectionBroadcaster::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

pub struct SelectionBroadcaster<T> {
    inner: Mutex<Inner<T>>,
}

struct Inner<T> {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Handler<T>)>,
    latest: Option<T>,
}

static FAMILY_SELECTION: SelectionBroadcaster<FamilySelection> = SelectionBroadcaster::new();

/// The process-wide channel for family-size selection.
pub fn family_selection() -> &'static SelectionBroadcaster<FamilySelection> {
    &FAMILY_SELECTION
}

impl<T> SelectionBroadcaster<T> {
    pub const fn new() -> Self {
        SelectionBroadcaster {
            inner: Mutex::new(Inner {
                next_id: 0,
                subscribers: Vec::new(),
                latest: None,
            }),
        }
    }

    /// Registers `handler` for every future publish.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.subscribers.push((id, Arc::new(handler)));
        debug!(
            subscription = id.0,
            subscribers = inner.subscribers.len(),
            "Selection subscriber added"
        );
        id
    }

    /// Removes a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sid, _)| *sid != id);
        let removed = inner.subscribers.len() != before;
        if removed {
            debug!(subscription = id.0, "Selection subscriber removed");
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> SelectionBroadcaster<T> {
    /// Records `value` as the latest selection and delivers it to every
    /// current subscriber.
    ///
    /// Handlers run after the internal lock is released, against a snapshot
    /// of the subscriber list taken at publish time. Handlers may therefore
    /// subscribe, unsubscribe or publish themselves; such changes apply from
    /// the next round on.
    pub fn publish(&self, value: T) {
        let handlers: Vec<Handler<T>> = {
            let mut inner = self.lock();
            inner.latest = Some(value.clone());
            inner
                .subscribers
                .iter()
                .map(|(_, handler)| Arc::clone(handler))
                .collect()
        };

        if handlers.is_empty() {
            trace!("Selection published with no subscribers; dropped");
            return;
        }

        for handler in handlers {
            handler(&value);
        }
    }

    /// The most recently published value, if any.
    pub fn current(&self) -> Option<T> {
        self.lock().latest.clone()
    }
}

impl<T> Default for SelectionBroadcaster<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for SelectionBroadcaster<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionBroadcaster")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
