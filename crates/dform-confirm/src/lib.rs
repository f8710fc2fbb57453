//! dform Confirmation
//!
//! Read-only view of a submission handed off by the form engine. The view
//! reads the hand-off store once, labels each key through a
//! [`DisplayNames`](dform_catalog::DisplayNames) mapping and renders values
//! for display: booleans as `Yes`/`No`, list entries joined with `", "`.
//!
//! A missing record is not an error; the view is simply empty.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod view;

pub use view::{ConfirmationRow, ConfirmationView, CONFIRMATION_TITLE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
