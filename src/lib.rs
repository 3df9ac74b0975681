//! # Invoice Actions
//!
//! Server-side form actions for invoices: create, update and delete.
//!
//! ## Features
//!
//! - **Schema Validation**: filter-then-validate pipeline with per-field messages
//! - **Derived Form Schemas**: create/update forms omit server-assigned `id` and `date`
//! - **Returned Navigation**: actions return [`ActionOutcome::Redirect`] instead of aborting
//! - **Injected Cache Invalidation**: every successful write calls a [`ViewCache`]
//! - **Pluggable Storage**: in-memory by default, PostgreSQL behind the `postgres` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoices::prelude::*;
//!
//! let actions = InvoiceActions::new(
//!     Arc::new(InMemoryInvoiceStore::new()),
//!     Arc::new(BroadcastViewCache::default()),
//! );
//!
//! let mut form = HashMap::new();
//! form.insert("customerId".to_string(), "c1".to_string());
//! form.insert("amount".to_string(), "19.99".to_string());
//! form.insert("status".to_string(), "pending".to_string());
//!
//! match actions.create_invoice(&FormState::default(), &form).await? {
//!     ActionOutcome::Redirect(to) => println!("go to {}", to),
//!     ActionOutcome::Invalid(state) => println!("fix: {:?}", state.errors),
//! }
//! ```
//!
//! [`ActionOutcome::Redirect`]: actions::ActionOutcome::Redirect
//! [`ViewCache`]: core::ViewCache

pub mod actions;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Actions ===
    pub use crate::actions::{ActionOutcome, DEFAULT_LISTING_PATH, InvoiceActions};

    // === Core ===
    pub use crate::core::{
        ActionError, BroadcastViewCache, CacheEvent, Clock, FixedClock, Invoice, InvoiceChanges,
        InvoiceStatus, InvoiceStore, NewInvoice, SystemClock, ViewCache,
        validation::{FieldErrors, FormSchema, FormState, InvoiceForm, InvoiceSchema},
    };

    // === Storage ===
    pub use crate::storage::InMemoryInvoiceStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresInvoiceStore;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
    pub use serde::{Deserialize, Serialize};
    pub use std::collections::HashMap;
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
