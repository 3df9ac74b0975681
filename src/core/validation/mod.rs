//! Validation and filtering system
//!
//! Form values are filtered (trimmed, coerced) and then validated field by
//! field. The outcome is either typed form fields or a [`FieldErrors`] map
//! the form can re-render.

pub mod filters;
pub mod schema;
pub mod state;
pub mod validators;

pub use schema::{FieldRule, FormSchema, InvoiceForm, InvoiceSchema};
pub use state::{FieldErrors, FormState};
