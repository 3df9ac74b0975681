//! HTTP handlers for invoice form posts
//!
//! Forms arrive URL-encoded. Outcomes map to responses as follows:
//! - redirect: `303 See Other` to the listing
//! - rejected form: `422` with the [`FormState`](crate::core::validation::FormState) as JSON
//! - store failure: `500` with an [`ErrorResponse`](crate::core::error::ErrorResponse)

use crate::actions::{ActionOutcome, InvoiceActions};
use crate::core::error::ActionError;
use crate::core::validation::FormState;
use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use std::collections::HashMap;
use uuid::Uuid;

/// Invoice-specific AppState
#[derive(Clone)]
pub struct InvoiceAppState {
    pub actions: InvoiceActions,
}

impl IntoResponse for ActionOutcome {
    fn into_response(self) -> Response {
        match self {
            ActionOutcome::Redirect(path) => Redirect::to(&path).into_response(),
            ActionOutcome::Invalid(state) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(state)).into_response()
            }
        }
    }
}

/// POST {listing}
pub async fn create_invoice(
    State(state): State<InvoiceAppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<ActionOutcome, ActionError> {
    state
        .actions
        .create_invoice(&FormState::default(), &form)
        .await
}

/// POST {listing}/{id}/edit
pub async fn update_invoice(
    State(state): State<InvoiceAppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<ActionOutcome, ActionError> {
    state
        .actions
        .update_invoice(id, &FormState::default(), &form)
        .await
}

/// POST {listing}/{id}/delete
pub async fn delete_invoice(
    State(state): State<InvoiceAppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ActionError> {
    state.actions.delete_invoice(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
