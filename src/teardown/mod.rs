//! Lifecycle management of a fixture root: prepare, runtime edits, reset and cleanup.

mod error;
mod ledger;
mod teardown_impl;

pub use error::{Action, ErrorKind, Lifecycle, TeardownError};
pub use ledger::RuntimeLedger;
pub use teardown_impl::Teardown;
