//! Service trait for invoice persistence

use crate::core::invoice::{Invoice, InvoiceChanges, NewInvoice};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence boundary for invoices
///
/// Each write is a single statement. Implementations report failures as
/// `anyhow::Error`; callers decide how fatal they are.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a new invoice; the store assigns its id
    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice>;

    /// Overwrite customer, amount and status of the invoice with `id`
    ///
    /// Returns the number of matched rows. Zero is not an error.
    async fn update(&self, id: &Uuid, changes: InvoiceChanges) -> Result<u64>;

    /// Remove the invoice with `id`
    ///
    /// Returns the number of removed rows. Zero is not an error.
    async fn delete(&self, id: &Uuid) -> Result<u64>;

    /// Get an invoice by ID
    async fn get(&self, id: &Uuid) -> Result<Option<Invoice>>;

    /// List all invoices, newest first
    async fn list(&self) -> Result<Vec<Invoice>>;
}
