//! Invoice domain types
//!
//! An invoice is created with a server-assigned `id` and `date`, after which
//! only `customer_id`, `amount` and `status` may change.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    /// Every accepted status, in the order forms list them
    pub const ALL: [InvoiceStatus; 2] = [InvoiceStatus::Pending, InvoiceStatus::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(anyhow!("Unknown invoice status: {}", other)),
        }
    }
}

/// A stored invoice
///
/// `amount` is held in minor units (cents).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Insert payload: everything but the id, which the store assigns
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl NewInvoice {
    /// Materialize the stored record once the store has picked an id
    pub fn into_invoice(self, id: Uuid) -> Invoice {
        Invoice {
            id,
            customer_id: self.customer_id,
            amount: self.amount,
            status: self.status,
            date: self.date,
        }
    }
}

/// Update payload. Carries neither `id` nor `date`, so neither can change.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceChanges {
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Apply an update in place, leaving `id` and `date` untouched
    pub fn apply(&mut self, changes: InvoiceChanges) {
        self.customer_id = changes.customer_id;
        self.amount = changes.amount;
        self.status = changes.status;
    }
}

/// Convert a major-unit amount (dollars) to minor units (cents)
///
/// Rounds to the nearest cent so that binary float noise such as
/// `19.99 * 100.0 == 1998.9999999999998` still lands on `1999`.
///
/// Returns `None` unless the result is at least one cent and fits in `i64`.
pub fn to_minor_units(amount: f64) -> Option<i64> {
    let cents = (amount * 100.0).round();
    // i64::MAX as f64 is 2^63, itself out of range
    if cents.is_finite() && cents >= 1.0 && cents < i64::MAX as f64 {
        Some(cents as i64)
    } else {
        None
    }
}
