use crate::{error::SweepError, events::Event, scalar::Scalar};

/// Pending sweep events, smallest first.
///
/// Backed by a vector kept sorted in *descending* order with binary
/// search insertion, so the minimum is popped off the back. Insertion
/// is O(n); this is fine for the segment counts the sweep targets and
/// keeps duplicate detection trivial: the same comparator locates the
/// insertion point and decides equality.
#[derive(Debug, Clone)]
pub struct EventQueue<T: Scalar> {
    events: Vec<Event<T>>,
}

impl<T: Scalar> Default for EventQueue<T> {
    fn default() -> Self {
        EventQueue { events: Vec::new() }
    }
}

impl<T: Scalar> EventQueue<T> {
    pub fn with_capacity(size: usize) -> Self {
        EventQueue {
            events: Vec::with_capacity(size),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Locate `event`: `Ok` if an equal event is queued, else the
    /// insertion index.
    #[inline]
    fn search(&self, event: &Event<T>) -> Result<usize, usize> {
        // Descending order: an element greater than `event` sorts before it.
        self.events.binary_search_by(|other| event.cmp(other))
    }

    /// Insert an event, keeping duplicates.
    pub fn insert(&mut self, event: Event<T>) {
        let idx = match self.search(&event) {
            Ok(idx) | Err(idx) => idx,
        };
        self.events.insert(idx, event);
    }

    /// Insert an event unless an equal one is already queued.
    ///
    /// Returns `true` if the event was inserted.
    pub fn insert_if_absent(&mut self, event: Event<T>) -> bool {
        match self.search(&event) {
            Ok(_) => false,
            Err(idx) => {
                self.events.insert(idx, event);
                true
            }
        }
    }

    pub fn contains(&self, event: &Event<T>) -> bool {
        self.search(event).is_ok()
    }

    /// Remove and return the smallest event.
    pub fn pop_min(&mut self) -> Result<Event<T>, SweepError> {
        self.events.pop().ok_or(SweepError::EmptyQueue)
    }

    #[inline]
    pub fn peek_min(&self) -> Option<&Event<T>> {
        self.events.last()
    }
}

impl<T: Scalar> Extend<Event<T>> for EventQueue<T> {
    fn extend<I: IntoIterator<Item = Event<T>>>(&mut self, iter: I) {
        for event in iter {
            self.insert(event);
        }
    }
}
