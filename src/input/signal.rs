//! Single-slot broadcast between the tool picker and the input router.
//!
//! The picker publishes selections into a shared cell; each subscriber
//! remembers the last generation it applied. Last write wins and there is no
//! acknowledgment, so a subscriber that polls late sees only the newest
//! selection.

use super::tool::ToolSelection;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    latest: Option<ToolSelection>,
}

/// Publisher side, cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct ToolSignal {
    slot: Rc<RefCell<Slot>>,
}

impl ToolSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, selection: ToolSelection) {
        let mut slot = self.slot.borrow_mut();
        slot.generation += 1;
        slot.latest = Some(selection);
        log::debug!("Tool selection #{}: {:?}", slot.generation, selection);
    }

    /// The newest published selection, if any.
    pub fn current(&self) -> Option<ToolSelection> {
        self.slot.borrow().latest
    }

    /// Creates a subscriber that has not yet seen anything, so an existing
    /// selection is delivered on its first poll.
    pub fn subscribe(&self) -> ToolSubscription {
        ToolSubscription {
            slot: Rc::clone(&self.slot),
            seen: 0,
        }
    }
}

/// Subscriber side.
#[derive(Debug)]
pub struct ToolSubscription {
    slot: Rc<RefCell<Slot>>,
    seen: u64,
}

impl ToolSubscription {
    /// Returns the newest selection if one was published since the last call.
    pub fn take_latest(&mut self) -> Option<ToolSelection> {
        let slot = self.slot.borrow();
        if slot.generation == self.seen {
            return None;
        }
        self.seen = slot.generation;
        slot.latest
    }
}
