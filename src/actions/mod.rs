//! Invoice form actions: create, update, delete
//!
//! Each action is one validate → write → revalidate sequence:
//!
//! ```text
//! form ──▶ FormSchema::safe_parse ──▶ InvoiceStore write ──▶ ViewCache::revalidate ──▶ Redirect
//!                 │                          │
//!                 └─▶ Invalid(FormState)     └─▶ ActionError (logged)
//! ```
//!
//! Navigation is returned, not performed: create and update resolve to
//! [`ActionOutcome::Redirect`] and the caller decides how to follow it.

use crate::core::clock::{Clock, SystemClock};
use crate::core::error::ActionError;
use crate::core::validation::{FormSchema, FormState, InvoiceSchema};
use crate::core::{InvoiceStore, ViewCache};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Route of the invoice listing view
pub const DEFAULT_LISTING_PATH: &str = "/dashboard/invoices";

/// Result of a create or update submission
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The write succeeded; send the caller here
    Redirect(String),
    /// Validation failed; re-render the form with this state
    Invalid(FormState),
}

/// Form actions over an invoice store
///
/// Cheap to clone; all collaborators are shared.
#[derive(Clone)]
pub struct InvoiceActions {
    store: Arc<dyn InvoiceStore>,
    cache: Arc<dyn ViewCache>,
    clock: Arc<dyn Clock>,
    listing_path: String,
    create_form: FormSchema,
    update_form: FormSchema,
}

impl InvoiceActions {
    pub fn new(store: Arc<dyn InvoiceStore>, cache: Arc<dyn ViewCache>) -> Self {
        Self {
            store,
            cache,
            clock: Arc::new(SystemClock),
            listing_path: DEFAULT_LISTING_PATH.to_string(),
            create_form: InvoiceSchema::create_form(),
            update_form: InvoiceSchema::update_form(),
        }
    }

    /// Date new invoices with `clock` instead of the system clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_listing_path(mut self, path: impl Into<String>) -> Self {
        self.listing_path = path.into();
        self
    }

    pub fn listing_path(&self) -> &str {
        &self.listing_path
    }

    /// Create an invoice from a submitted form
    ///
    /// `_prev` is the state the form was rendered with; it does not influence
    /// the outcome.
    pub async fn create_invoice(
        &self,
        _prev: &FormState,
        form: &HashMap<String, String>,
    ) -> Result<ActionOutcome, ActionError> {
        let fields = match self.create_form.safe_parse(form) {
            Ok(fields) => fields,
            Err(errors) => {
                tracing::debug!(fields = ?errors.keys().collect::<Vec<_>>(), "create invoice rejected");
                return Ok(ActionOutcome::Invalid(self.create_form.failure_state(errors)));
            }
        };

        let invoice = fields.into_new_invoice(self.clock.today());
        let created = self.store.insert(invoice).await.map_err(|e| {
            tracing::error!(error = %e, "failed to create invoice");
            ActionError::Create(e)
        })?;

        tracing::info!(invoice_id = %created.id, amount = created.amount, "invoice created");
        Ok(self.revalidate_and_redirect())
    }

    /// Update the customer, amount and status of invoice `id`
    ///
    /// An `id` matching no invoice is not reported.
    pub async fn update_invoice(
        &self,
        id: Uuid,
        _prev: &FormState,
        form: &HashMap<String, String>,
    ) -> Result<ActionOutcome, ActionError> {
        let fields = match self.update_form.safe_parse(form) {
            Ok(fields) => fields,
            Err(errors) => {
                tracing::debug!(invoice_id = %id, fields = ?errors.keys().collect::<Vec<_>>(), "update invoice rejected");
                return Ok(ActionOutcome::Invalid(self.update_form.failure_state(errors)));
            }
        };

        let matched = self
            .store
            .update(&id, fields.into_changes())
            .await
            .map_err(|e| {
                tracing::error!(invoice_id = %id, error = %e, "failed to update invoice");
                ActionError::Update(e)
            })?;

        tracing::info!(invoice_id = %id, matched, "invoice updated");
        Ok(self.revalidate_and_redirect())
    }

    /// Delete invoice `id`
    ///
    /// Deleting an unknown id succeeds. No redirect: the listing that issued
    /// the delete is the view being revalidated.
    pub async fn delete_invoice(&self, id: Uuid) -> Result<(), ActionError> {
        let removed = self.store.delete(&id).await.map_err(|e| {
            tracing::error!(invoice_id = %id, error = %e, "failed to delete invoice");
            ActionError::Delete(e)
        })?;

        tracing::info!(invoice_id = %id, removed, "invoice deleted");
        self.cache.revalidate(&self.listing_path);
        Ok(())
    }

    fn revalidate_and_redirect(&self) -> ActionOutcome {
        self.cache.revalidate(&self.listing_path);
        ActionOutcome::Redirect(self.listing_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::BroadcastViewCache;
    use crate::core::clock::FixedClock;
    use crate::core::invoice::{Invoice, InvoiceChanges, InvoiceStatus, NewInvoice};
    use crate::core::validation::schema::{
        AMOUNT, AMOUNT_MESSAGE, CREATE_FAILED_MESSAGE, CUSTOMER_ID, CUSTOMER_ID_MESSAGE, STATUS,
        STATUS_MESSAGE, UPDATE_FAILED_MESSAGE,
    };
    use crate::storage::InMemoryInvoiceStore;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store whose every call fails and counts attempts
    #[derive(Default)]
    struct FailingStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl InvoiceStore for FailingStore {
        async fn insert(&self, _invoice: NewInvoice) -> Result<Invoice> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(anyhow!("connection reset"))
        }
        async fn update(&self, _id: &Uuid, _changes: InvoiceChanges) -> Result<u64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(anyhow!("connection reset"))
        }
        async fn delete(&self, _id: &Uuid) -> Result<u64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(anyhow!("connection reset"))
        }
        async fn get(&self, _id: &Uuid) -> Result<Option<Invoice>> {
            Ok(None)
        }
        async fn list(&self) -> Result<Vec<Invoice>> {
            Ok(vec![])
        }
    }

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_form() -> HashMap<String, String> {
        form(&[("customerId", "c1"), ("amount", "19.99"), ("status", "pending")])
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn setup() -> (InvoiceActions, InMemoryInvoiceStore, BroadcastViewCache) {
        let store = InMemoryInvoiceStore::new();
        let cache = BroadcastViewCache::new(8);
        let actions = InvoiceActions::new(Arc::new(store.clone()), Arc::new(cache.clone()))
            .with_clock(Arc::new(FixedClock(today())));
        (actions, store, cache)
    }

    async fn seed(store: &InMemoryInvoiceStore) -> Invoice {
        store
            .insert(NewInvoice {
                customer_id: "c1".to_string(),
                amount: 500,
                status: InvoiceStatus::Pending,
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            })
            .await
            .unwrap()
    }

    // === create ===

    #[tokio::test]
    async fn test_create_stores_cents_and_today() {
        let (actions, store, cache) = setup();

        let outcome = actions
            .create_invoice(&FormState::default(), &valid_form())
            .await
            .unwrap();

        assert_eq!(outcome, ActionOutcome::Redirect(DEFAULT_LISTING_PATH.to_string()));
        let stored = store.list().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].customer_id, "c1");
        assert_eq!(stored[0].amount, 1999);
        assert_eq!(stored[0].status, InvoiceStatus::Pending);
        assert_eq!(stored[0].date, today());
        assert_eq!(cache.revision(DEFAULT_LISTING_PATH), 1);
    }

    #[tokio::test]
    async fn test_create_with_system_clock_uses_current_date() {
        let store = InMemoryInvoiceStore::new();
        let actions = InvoiceActions::new(
            Arc::new(store.clone()),
            Arc::new(BroadcastViewCache::default()),
        );

        let before = chrono::Utc::now().date_naive();
        actions
            .create_invoice(&FormState::default(), &valid_form())
            .await
            .unwrap();
        let after = chrono::Utc::now().date_naive();

        let date = store.list().await.unwrap()[0].date;
        assert!(date == before || date == after);
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_amount_without_writing() {
        let (actions, store, cache) = setup();

        for amount in ["0", "-12.5"] {
            let outcome = actions
                .create_invoice(
                    &FormState::default(),
                    &form(&[("customerId", "c1"), ("amount", amount), ("status", "paid")]),
                )
                .await
                .unwrap();

            let ActionOutcome::Invalid(state) = outcome else {
                panic!("expected validation failure for amount {}", amount);
            };
            assert_eq!(state.field_errors(AMOUNT), [AMOUNT_MESSAGE.to_string()]);
            assert_eq!(state.message.as_deref(), Some(CREATE_FAILED_MESSAGE));
        }

        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(cache.revision(DEFAULT_LISTING_PATH), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_amounts_without_a_storable_cent_value() {
        let (actions, store, cache) = setup();

        for amount in ["0.001", "1e300"] {
            let outcome = actions
                .create_invoice(
                    &FormState::default(),
                    &form(&[("customerId", "c1"), ("amount", amount), ("status", "paid")]),
                )
                .await
                .unwrap();

            let ActionOutcome::Invalid(state) = outcome else {
                panic!("expected validation failure for amount {}", amount);
            };
            assert_eq!(state.field_errors(AMOUNT), [AMOUNT_MESSAGE.to_string()]);
        }

        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(cache.revision(DEFAULT_LISTING_PATH), 0);
    }

    #[tokio::test]
    async fn test_create_reports_every_invalid_field() {
        let (actions, _store, _cache) = setup();

        let outcome = actions
            .create_invoice(&FormState::default(), &form(&[("status", "late")]))
            .await
            .unwrap();

        let ActionOutcome::Invalid(state) = outcome else {
            panic!("expected validation failure");
        };
        assert_eq!(state.field_errors(CUSTOMER_ID), [CUSTOMER_ID_MESSAGE.to_string()]);
        assert_eq!(state.field_errors(AMOUNT), [AMOUNT_MESSAGE.to_string()]);
        assert_eq!(state.field_errors(STATUS), [STATUS_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn test_create_ignores_previous_state() {
        let (actions, store, _cache) = setup();
        let prev = FormState {
            errors: None,
            message: Some("Missing Fields. Failed to Create Invoice.".to_string()),
        };

        let outcome = actions.create_invoice(&prev, &valid_form()).await.unwrap();

        assert!(matches!(outcome, ActionOutcome::Redirect(_)));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_store_failure_is_prefixed() {
        let store = Arc::new(FailingStore::default());
        let cache = BroadcastViewCache::new(8);
        let actions = InvoiceActions::new(store.clone(), Arc::new(cache.clone()));

        let err = actions
            .create_invoice(&FormState::default(), &valid_form())
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::Create(_)));
        assert_eq!(err.to_string(), "There was an error creating: connection reset");
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.revision(DEFAULT_LISTING_PATH), 0);
    }

    // === update ===

    #[tokio::test]
    async fn test_update_changes_fields_and_keeps_id_and_date() {
        let (actions, store, cache) = setup();
        let existing = seed(&store).await;

        let outcome = actions
            .update_invoice(
                existing.id,
                &FormState::default(),
                &form(&[("customerId", "c9"), ("amount", "42.5"), ("status", "paid")]),
            )
            .await
            .unwrap();

        assert_eq!(outcome, ActionOutcome::Redirect(DEFAULT_LISTING_PATH.to_string()));
        let stored = store.get(&existing.id).await.unwrap().unwrap();
        assert_eq!(stored.id, existing.id);
        assert_eq!(stored.date, existing.date);
        assert_eq!(stored.customer_id, "c9");
        assert_eq!(stored.amount, 4250);
        assert_eq!(stored.status, InvoiceStatus::Paid);
        assert_eq!(cache.revision(DEFAULT_LISTING_PATH), 1);
    }

    #[tokio::test]
    async fn test_update_invalid_form_uses_edit_message() {
        let (actions, store, _cache) = setup();
        let existing = seed(&store).await;

        let outcome = actions
            .update_invoice(
                existing.id,
                &FormState::default(),
                &form(&[("customerId", "c9"), ("amount", "10"), ("status", "void")]),
            )
            .await
            .unwrap();

        let ActionOutcome::Invalid(state) = outcome else {
            panic!("expected validation failure");
        };
        assert_eq!(state.message.as_deref(), Some(UPDATE_FAILED_MESSAGE));
        assert_eq!(store.get(&existing.id).await.unwrap(), Some(existing));
    }

    #[tokio::test]
    async fn test_update_rejects_sub_cent_amount_and_keeps_stored_value() {
        let (actions, store, cache) = setup();
        let existing = seed(&store).await;

        for amount in ["0.001", "1e300"] {
            let outcome = actions
                .update_invoice(
                    existing.id,
                    &FormState::default(),
                    &form(&[("customerId", "c1"), ("amount", amount), ("status", "paid")]),
                )
                .await
                .unwrap();

            assert!(matches!(outcome, ActionOutcome::Invalid(_)), "amount {}", amount);
        }

        assert_eq!(store.get(&existing.id).await.unwrap(), Some(existing));
        assert_eq!(cache.revision(DEFAULT_LISTING_PATH), 0);
    }

    #[tokio::test]
    async fn test_update_unknown_id_still_redirects() {
        let (actions, store, _cache) = setup();

        let outcome = actions
            .update_invoice(Uuid::new_v4(), &FormState::default(), &valid_form())
            .await
            .unwrap();

        assert!(matches!(outcome, ActionOutcome::Redirect(_)));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_store_failure_is_prefixed() {
        let actions = InvoiceActions::new(
            Arc::new(FailingStore::default()),
            Arc::new(BroadcastViewCache::default()),
        );

        let err = actions
            .update_invoice(Uuid::new_v4(), &FormState::default(), &valid_form())
            .await
            .unwrap_err();

        assert_eq!(err.operation(), "update");
        assert!(err.to_string().contains("There was an error updating:"));
    }

    // === delete ===

    #[tokio::test]
    async fn test_delete_removes_and_revalidates() {
        let (actions, store, cache) = setup();
        let existing = seed(&store).await;

        actions.delete_invoice(existing.id).await.unwrap();

        assert!(store.get(&existing.id).await.unwrap().is_none());
        assert_eq!(cache.revision(DEFAULT_LISTING_PATH), 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_ok() {
        let (actions, _store, cache) = setup();

        actions.delete_invoice(Uuid::new_v4()).await.unwrap();
        actions.delete_invoice(Uuid::new_v4()).await.unwrap();

        assert_eq!(cache.revision(DEFAULT_LISTING_PATH), 2);
    }

    #[tokio::test]
    async fn test_delete_store_failure_is_prefixed() {
        let actions = InvoiceActions::new(
            Arc::new(FailingStore::default()),
            Arc::new(BroadcastViewCache::default()),
        );

        let err = actions.delete_invoice(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, ActionError::Delete(_)));
        assert!(err.to_string().contains("There was an error deleting:"));
    }

    #[tokio::test]
    async fn test_custom_listing_path_is_redirected_and_revalidated() {
        let store = InMemoryInvoiceStore::new();
        let cache = BroadcastViewCache::default();
        let actions = InvoiceActions::new(Arc::new(store), Arc::new(cache.clone()))
            .with_listing_path("/billing/invoices");

        let outcome = actions
            .create_invoice(&FormState::default(), &valid_form())
            .await
            .unwrap();

        assert_eq!(outcome, ActionOutcome::Redirect("/billing/invoices".to_string()));
        assert_eq!(cache.revision("/billing/invoices"), 1);
        assert_eq!(actions.listing_path(), "/billing/invoices");
    }
}
