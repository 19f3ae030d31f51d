//! Post-transition hooks.
//!
//! Hooks run after a transition has left the collection consistent, with
//! the row that was added or removed.

use std::cell::RefCell;
use std::rc::Rc;

use crate::row::{Row, RowId};

/// Callbacks invoked after add and delete transitions.
pub trait FormsetHooks {
    /// Called with the freshly inserted row.
    fn added(&mut self, _row: &Row) {}

    /// Called with the removed or hidden row.
    fn removed(&mut self, _row: &Row) {}
}

/// Hooks that do nothing; used when none are configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl FormsetHooks for NoopHooks {}

/// A hook invocation recorded by [`RecordingHooks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    /// The post-add hook ran for this row.
    Added(RowId),
    /// The post-remove hook ran for this row.
    Removed(RowId),
}

/// Shared hooks that store invocations in an `Rc<RefCell<Vec<HookEvent>>>`
/// for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingHooks {
    target: Rc<RefCell<Vec<HookEvent>>>,
}

impl RecordingHooks {
    /// Create hooks backed by the supplied shared vector.
    pub fn new(target: Rc<RefCell<Vec<HookEvent>>>) -> Self {
        Self { target }
    }

    /// Access the underlying shared storage.
    pub fn target(&self) -> Rc<RefCell<Vec<HookEvent>>> {
        Rc::clone(&self.target)
    }
}

impl FormsetHooks for RecordingHooks {
    fn added(&mut self, row: &Row) {
        self.target.borrow_mut().push(HookEvent::Added(row.id()));
    }

    fn removed(&mut self, row: &Row) {
        self.target.borrow_mut().push(HookEvent::Removed(row.id()));
    }
}
