//! Response stream reconciliation.
//!
//! The host pushes the running text of the AI's current turn as a series
//! of fragments. [`ResponseReconciler`] folds those into a [`ResponseLog`],
//! deciding per fragment whether it updates the in-progress entry or starts
//! a new one.

mod log;
mod policy;
mod reconciler;

pub use log::ResponseLog;
pub use policy::{FillerPolicy, StatusPolicy};
pub use reconciler::{FragmentOutcome, ResponseReconciler, StreamState};
