//! View state machines for the catalog listing and the product detail page.
//!
//! Views own their data and never perform I/O. A caller starts a fetch with
//! a [`LoadTicket`], runs it, and hands the result back together with the
//! ticket. Only the most recently issued ticket is accepted, so a slow fetch
//! that finishes after a newer one (or after cancellation) is dropped.

pub mod catalog;
pub mod detail;

pub use catalog::{CatalogStatus, CatalogView, Listing, LOADING_PRODUCTS};
pub use detail::{DetailStatus, DetailView};

/// Proof that a fetch was started by a view, checked when its result returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Issues tickets and remembers which one is current.
#[derive(Debug, Default)]
struct Generation {
    current: u64,
}

impl Generation {
    /// Issues a new ticket, superseding every earlier one.
    fn next(&mut self) -> LoadTicket {
        self.current += 1;
        LoadTicket(self.current)
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.current
    }

    /// Makes every issued ticket stale without issuing a new one.
    fn invalidate(&mut self) {
        self.current += 1;
    }
}
