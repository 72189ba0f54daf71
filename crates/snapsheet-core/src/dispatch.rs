//! Deferred event delivery.
//!
//! Physics ticks must never call back into user code while motor state is
//! half-updated. Events raised during a tick are pushed onto a
//! [`DeferredQueue`] and flushed into an [`EventSink`] once the tick has
//! committed its state. Hosts that run their UI on another thread hand the
//! engine an `mpsc::Sender` and receive events there.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::mpsc::Sender;

/// Receiver of events flushed after a tick.
pub trait EventSink<E> {
    /// Deliver one event. Called outside of any physics step.
    fn deliver(&mut self, event: E);
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl<E> EventSink<E> for NullSink {
    fn deliver(&mut self, _event: E) {}
}

impl<E> EventSink<E> for Sender<E> {
    fn deliver(&mut self, event: E) {
        if self.send(event).is_err() {
            log::warn!("event receiver dropped; discarding event");
        }
    }
}

/// Shared recording sink, handy for hosts that poll and for tests.
impl<E> EventSink<E> for Rc<RefCell<Vec<E>>> {
    fn deliver(&mut self, event: E) {
        self.borrow_mut().push(event);
    }
}

/// FIFO of events raised during a tick.
#[derive(Debug)]
pub struct DeferredQueue<E> {
    pending: VecDeque<E>,
}

impl<E> Default for DeferredQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> DeferredQueue<E> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    pub fn push(&mut self, event: E) {
        self.pending.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Deliver every pending event in order, leaving the queue empty.
    pub fn flush_into(&mut self, sink: &mut dyn EventSink<E>) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.pending.pop_front() {
            sink.deliver(event);
            delivered += 1;
        }
        delivered
    }
}
