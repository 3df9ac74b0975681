//! Server module exposing the invoice actions over HTTP
//!
//! This module provides a `ServerBuilder` that registers:
//! - Form routes for create, update and delete
//! - Health routes
//! - Any custom routes (listing and form pages live outside this crate)

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::InvoiceAppState;
pub use router::build_invoice_routes;
