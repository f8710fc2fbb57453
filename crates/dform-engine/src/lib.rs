//! dform Engine
//!
//! Drives one form instance from a [`Catalog`](dform_catalog::Catalog):
//! - Seeds per-type defaults when mounted
//! - Resolves `hideWhen` visibility after every edit, clearing hidden values
//! - Manages dynamic list fields as owned sub-collections
//! - Derives a validation schema once and checks only visible fields
//! - Hands the validated record to a [`HandoffStore`] on submission
//!
//! # Lifecycle
//!
//! ```text
//! Initial → Editing → Validating → Submitted
//!                ↑          ↓
//!                └──── Rejected
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use dform_catalog::Catalog;
//! use dform_engine::{FormEngine, MemoryStore, SubmitOutcome};
//!
//! let catalog = Catalog::load("formFields.json")?;
//! let mut form = FormEngine::mount(catalog);
//!
//! form.set_value("email", "a@b.com")?;
//! form.set_value("maritalStatus", "Married")?;
//!
//! let mut store = MemoryStore::new();
//! match form.submit(&mut store)? {
//!     SubmitOutcome::Submitted(record) => println!("handed off {} values", record.len()),
//!     SubmitOutcome::Rejected(errors) => {
//!         for e in errors.iter() {
//!             println!("{}: {}", e.field(), e.message());
//!         }
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod list;
pub mod render;
pub mod schema;
pub mod state;
pub mod store;
pub mod visibility;

// Re-exports for convenience
pub use config::{FormConfig, CONFIRMATION_KEY};
pub use engine::{default_value, FormEngine, SubmitOutcome, ValidationReport};
pub use error::{EngineError, EngineResult, StoreError, ValidationError};
pub use lifecycle::{allowed_transitions, validate_transition, FormPhase};
pub use list::{DynamicList, OutOfBounds};
pub use render::{Choice, Control, InputType, ListEntry, RenderedField};
pub use schema::{is_email, FieldValidator, Schema};
pub use state::{ErrorMap, FormState, Submission};
pub use store::{HandoffStore, JsonFileStore, MemoryStore};
pub use visibility::{is_hidden, VisibilityDelta, VisibilityResolver};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a form
    pub use crate::{
        EngineError, FormConfig, FormEngine, FormPhase, HandoffStore, JsonFileStore, MemoryStore,
        SubmitOutcome,
    };
    pub use dform_catalog::{Catalog, FieldDescriptor, FieldType, FieldValue};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
