//! Core module containing the invoice domain, its validation and the
//! collaborator traits the actions depend on

pub mod cache;
pub mod clock;
pub mod error;
pub mod invoice;
pub mod service;
pub mod validation;

pub use cache::{BroadcastViewCache, CacheEvent, ViewCache};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::ActionError;
pub use invoice::{Invoice, InvoiceChanges, InvoiceStatus, NewInvoice};
pub use service::InvoiceStore;
