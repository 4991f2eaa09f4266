//! Contact attachment handler
//!
//! Contacts are only created through this endpoint, always against an
//! existing passenger addressed by id.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::{debug, warn};

use paxreg_common::db::{contacts, passengers};

use crate::api::passengers::MSG_NOT_FOUND;
use crate::api::views::PassengerView;
use crate::{ApiError, ApiResult, AppState};

/// Request body for POST /contato
#[derive(Debug, Deserialize)]
pub struct AddContactRequest {
    pub passageiro_id: i64,
    pub telefone: String,
    pub tipo: String,
}

/// POST /contato
///
/// Appends a contact to the addressed passenger and answers with the
/// shaped passenger including the new contact. An unknown passenger id
/// answers 404 and creates nothing.
pub async fn add_contact(
    State(state): State<AppState>,
    Json(payload): Json<AddContactRequest>,
) -> ApiResult<Json<PassengerView>> {
    let passenger = passengers::find_by_id(&state.db, payload.passageiro_id)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let Some(passenger) = passenger else {
        warn!(
            "Cannot attach contact: no passenger with id {}",
            payload.passageiro_id
        );
        return Err(ApiError::NotFound(MSG_NOT_FOUND.to_string()));
    };

    contacts::add_contact(&state.db, passenger.id, &payload.telefone, &payload.tipo)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    // Re-fetch so the response carries the full, freshly persisted
    // contact collection
    let passenger = passengers::find_by_id(&state.db, passenger.id)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .ok_or_else(|| ApiError::Internal(format!("Passenger {} missing", payload.passageiro_id)))?;

    debug!("Added contact to passenger #{}", passenger.id);
    Ok(Json(passenger.into()))
}
