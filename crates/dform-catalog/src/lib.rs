//! dform Field Catalog
//!
//! The declarative input of the form engine: an ordered list of field
//! descriptors read from JSON or YAML and checked once at load time.
//!
//! # Core Concepts
//!
//! - [`FieldDescriptor`]: one field (name, label, type, options, rules, visibility)
//! - [`Catalog`]: the validated, immutable, ordered collection of descriptors
//! - [`FieldValue`]: the value a field holds in live form state
//! - [`DisplayNames`]: name → human label mapping used by read-only views
//!
//! # Example
//!
//! ```rust,ignore
//! use dform_catalog::Catalog;
//!
//! let catalog = Catalog::load("formFields.json")?;
//! for field in catalog.iter() {
//!     println!("{} ({})", field.label, field.field_type);
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod catalog;
pub mod display;
pub mod error;
pub mod field;
pub mod value;

// Re-exports for convenience
pub use catalog::{Catalog, CatalogFormat};
pub use display::DisplayNames;
pub use error::{CatalogError, CatalogResult, ConfigurationError};
pub use field::{
    Condition, FieldDescriptor, FieldOption, FieldType, Relation, Scalar, ValidationRules,
    VisibilityGroup,
};
pub use value::FieldValue;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
