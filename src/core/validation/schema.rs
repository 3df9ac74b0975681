//! Invoice schema and the form schemas derived from it
//!
//! The full [`InvoiceSchema`] describes every invoice field. Forms never
//! supply `id` or `date`, so the create and update forms are derived with
//! [`InvoiceSchema::omit`].

use super::state::{FieldErrors, FormState};
use super::{filters, validators};
use crate::core::invoice::{InvoiceChanges, InvoiceStatus, NewInvoice, to_minor_units};
use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

pub const ID: &str = "id";
pub const CUSTOMER_ID: &str = "customerId";
pub const AMOUNT: &str = "amount";
pub const STATUS: &str = "status";
pub const DATE: &str = "date";

pub const CUSTOMER_ID_MESSAGE: &str = "Please select a customer.";
pub const AMOUNT_MESSAGE: &str = "Please enter an amount greater than $0.";
pub const STATUS_MESSAGE: &str = "Please select an invoice status.";

pub const CREATE_FAILED_MESSAGE: &str = "Missing Fields. Failed to Create Invoice.";
pub const UPDATE_FAILED_MESSAGE: &str = "Missing Fields. Failed to Edit Invoice.";

/// Fields assigned by the server, never accepted from a form
pub const SERVER_ASSIGNED: &[&str] = &[ID, DATE];

type FieldFilter = Arc<dyn Fn(&str, Value) -> Result<Value> + Send + Sync>;
type FieldValidator = Arc<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

/// Filters and validators for one field
///
/// Filters run first, in order; then validators run until the first failure.
/// A field therefore reports at most one message.
#[derive(Clone)]
pub struct FieldRule {
    name: &'static str,
    filters: Vec<FieldFilter>,
    validators: Vec<FieldValidator>,
    message: Option<&'static str>,
}

impl FieldRule {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            filters: Vec::new(),
            validators: Vec::new(),
            message: None,
        }
    }

    pub fn filter(
        mut self,
        filter: impl Fn(&str, Value) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    pub fn validate(
        mut self,
        validator: impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Report this message instead of the validator's own reason
    pub fn message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn failure(&self, reason: String) -> String {
        self.message.map(str::to_string).unwrap_or(reason)
    }

    /// Filter then validate a single raw value
    pub fn check(&self, raw: Value) -> std::result::Result<Value, String> {
        let mut value = raw;
        for filter in &self.filters {
            value = filter(self.name, value).map_err(|e| self.failure(e.to_string()))?;
        }
        for validator in &self.validators {
            validator(self.name, &value).map_err(|reason| self.failure(reason))?;
        }
        Ok(value)
    }
}

/// Ordered set of field rules describing an invoice
#[derive(Clone)]
pub struct InvoiceSchema {
    fields: Vec<FieldRule>,
}

impl InvoiceSchema {
    /// The full invoice schema, including server-assigned fields
    pub fn new() -> Self {
        let statuses = InvoiceStatus::ALL
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();

        Self {
            fields: vec![
                FieldRule::new(ID)
                    .validate(validators::required())
                    .validate(validators::uuid_format()),
                FieldRule::new(CUSTOMER_ID)
                    .filter(filters::trim())
                    .validate(validators::required())
                    .validate(validators::non_empty_string())
                    .message(CUSTOMER_ID_MESSAGE),
                FieldRule::new(AMOUNT)
                    .filter(filters::coerce_number())
                    .validate(validators::required())
                    .validate(validators::greater_than(0.0))
                    .validate(whole_cents())
                    .message(AMOUNT_MESSAGE),
                FieldRule::new(STATUS)
                    .validate(validators::required())
                    .validate(validators::in_list(statuses))
                    .message(STATUS_MESSAGE),
                FieldRule::new(DATE)
                    .validate(validators::required())
                    .validate(validators::date_format("%Y-%m-%d")),
            ],
        }
    }

    /// Derive a schema without the named fields
    pub fn omit(&self, names: &[&str]) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .filter(|rule| !names.contains(&rule.name()))
                .cloned()
                .collect(),
        }
    }

    /// Field names, in declaration order
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(FieldRule::name).collect()
    }

    /// Filter and validate every declared field of `input`
    ///
    /// Keys the schema does not declare are ignored. On failure every failing
    /// field is reported, in declaration order.
    pub fn check(
        &self,
        input: &HashMap<String, String>,
    ) -> std::result::Result<Map<String, Value>, FieldErrors> {
        let mut values = Map::new();
        let mut errors = FieldErrors::new();

        for rule in &self.fields {
            let raw = input
                .get(rule.name())
                .map(|s| Value::String(s.clone()))
                .unwrap_or(Value::Null);

            match rule.check(raw) {
                Ok(value) => {
                    values.insert(rule.name().to_string(), value);
                }
                Err(message) => {
                    errors
                        .entry(rule.name().to_string())
                        .or_default()
                        .push(message);
                }
            }
        }

        if errors.is_empty() {
            Ok(values)
        } else {
            Err(errors)
        }
    }

    /// Schema used by the create form
    pub fn create_form() -> FormSchema {
        FormSchema::new(Self::new().omit(SERVER_ASSIGNED), CREATE_FAILED_MESSAGE)
    }

    /// Schema used by the edit form
    pub fn update_form() -> FormSchema {
        FormSchema::new(Self::new().omit(SERVER_ASSIGNED), UPDATE_FAILED_MESSAGE)
    }
}

impl Default for InvoiceSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator: amount converts to at least one cent that fits in `i64`
fn whole_cents()
-> impl Fn(&str, &Value) -> std::result::Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_f64() {
        Some(amount) if to_minor_units(amount).is_none() => Err(format!(
            "'{}' must be at least one cent and within range (value: {})",
            field, amount
        )),
        _ => Ok(()),
    }
}

/// Validated invoice form fields
///
/// Only [`FormSchema::safe_parse`] and [`InvoiceForm::new`] build one, so the
/// amount always has a cent value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceForm {
    pub customer_id: String,
    /// Major units, as entered
    pub amount: f64,
    pub status: InvoiceStatus,
    #[serde(skip)]
    cents: i64,
}

impl InvoiceForm {
    /// `None` when `amount` rounds to less than one cent or overflows `i64` cents
    pub fn new(
        customer_id: impl Into<String>,
        amount: f64,
        status: InvoiceStatus,
    ) -> Option<Self> {
        Some(Self {
            customer_id: customer_id.into(),
            amount,
            status,
            cents: to_minor_units(amount)?,
        })
    }

    pub fn amount_in_cents(&self) -> i64 {
        self.cents
    }

    pub fn into_new_invoice(self, date: NaiveDate) -> NewInvoice {
        NewInvoice {
            amount: self.amount_in_cents(),
            customer_id: self.customer_id,
            status: self.status,
            date,
        }
    }

    pub fn into_changes(self) -> InvoiceChanges {
        InvoiceChanges {
            amount: self.amount_in_cents(),
            customer_id: self.customer_id,
            status: self.status,
        }
    }
}

/// A form-facing schema: field rules plus the top-level failure message
#[derive(Clone)]
pub struct FormSchema {
    schema: InvoiceSchema,
    failure_message: &'static str,
}

impl FormSchema {
    pub fn new(schema: InvoiceSchema, failure_message: &'static str) -> Self {
        Self {
            schema,
            failure_message,
        }
    }

    pub fn schema(&self) -> &InvoiceSchema {
        &self.schema
    }

    pub fn failure_message(&self) -> &'static str {
        self.failure_message
    }

    /// Validate raw form data into typed fields, or per-field messages
    pub fn safe_parse(
        &self,
        input: &HashMap<String, String>,
    ) -> std::result::Result<InvoiceForm, FieldErrors> {
        let values = self.schema.check(input)?;
        let customer_id = values
            .get(CUSTOMER_ID)
            .and_then(Value::as_str)
            .ok_or_else(|| single_error(CUSTOMER_ID, CUSTOMER_ID_MESSAGE))?;
        let amount = values
            .get(AMOUNT)
            .and_then(Value::as_f64)
            .ok_or_else(|| single_error(AMOUNT, AMOUNT_MESSAGE))?;
        let status = values
            .get(STATUS)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| single_error(STATUS, STATUS_MESSAGE))?;

        InvoiceForm::new(customer_id, amount, status)
            .ok_or_else(|| single_error(AMOUNT, AMOUNT_MESSAGE))
    }

    /// The state handed back to the form when validation fails
    pub fn failure_state(&self, errors: FieldErrors) -> FormState {
        FormState {
            errors: Some(errors),
            message: Some(self.failure_message.to_string()),
        }
    }
}

fn single_error(field: &str, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), vec![message.to_string()]);
    errors
}
