//! Passenger CRUD handlers
//!
//! Create/list/lookup/update/delete over the passenger store. Lookup and
//! delete address passengers by cpf; update addresses them by id so the
//! cpf itself can change.

use axum::{
    extract::{Query, State},
    Json,
};
use percent_encoding::percent_decode_str;
use serde::Deserialize;
use tracing::{debug, warn};

use paxreg_common::db::models::{parse_birthdate, NewPassenger};
use paxreg_common::db::passengers;
use paxreg_common::Error;

use crate::api::views::{DeleteConfirmation, PassengerListView, PassengerView};
use crate::{ApiError, ApiResult, AppState};

/// Canned conflict message for a duplicate cpf on insert
pub const MSG_DUPLICATE_CPF: &str = "Passageiro de mesmo cpf já salvo na base :/";
/// Canned message for any other insert failure
pub const MSG_SAVE_FAILED: &str = "Não foi possível salvar novo item :/";
/// Canned message when no passenger matches the given cpf or id
pub const MSG_NOT_FOUND: &str = "Passageiro não encontrado na base :/";
/// Canned deletion confirmation
pub const MSG_REMOVED: &str = "Passageiro removido";
/// Canned message for an unparsable birthdate
pub const MSG_BAD_BIRTHDATE: &str =
    "Data de nascimento inválida, use o formato YYYY-MM-DDTHH:MM:SS";

/// Request body for POST /passageiro
#[derive(Debug, Deserialize)]
pub struct CreatePassengerRequest {
    pub nome: String,
    pub cpf: String,
    pub birthdate: String,
    pub flight: String,
}

/// Request body for PUT /passageiro
#[derive(Debug, Deserialize)]
pub struct UpdatePassengerRequest {
    pub id: i64,
    pub nome: String,
    pub cpf: String,
    pub birthdate: String,
    pub flight: String,
}

/// Query parameters for cpf-addressed operations
#[derive(Debug, Deserialize)]
pub struct CpfQuery {
    pub cpf: Option<String>,
}

/// POST /passageiro
///
/// Inserts a new passenger. Duplicate cpf answers 409 with the canned
/// conflict message; any other store failure answers 400.
pub async fn create_passenger(
    State(state): State<AppState>,
    Json(payload): Json<CreatePassengerRequest>,
) -> ApiResult<Json<PassengerView>> {
    let birthdate = parse_birthdate(&payload.birthdate).map_err(|_| {
        warn!(
            "Birthdate '{}' is not in the expected format",
            payload.birthdate
        );
        ApiError::BadRequest(MSG_BAD_BIRTHDATE.to_string())
    })?;

    let new = NewPassenger {
        name: payload.nome,
        cpf: payload.cpf,
        birthdate,
        flight: payload.flight,
    };

    match passengers::insert_passenger(&state.db, &new).await {
        Ok(passenger) => {
            debug!(
                "Added passenger '{}' with cpf '{}'",
                passenger.name, passenger.cpf
            );
            Ok(Json(passenger.into()))
        }
        Err(Error::Duplicate(cpf)) => {
            warn!("Rejected insert for already-registered cpf '{}'", cpf);
            Err(ApiError::Conflict(MSG_DUPLICATE_CPF.to_string()))
        }
        Err(e) => {
            warn!("Failed to insert passenger '{}': {}", new.cpf, e);
            Err(ApiError::BadRequest(MSG_SAVE_FAILED.to_string()))
        }
    }
}

/// GET /passageiros
///
/// Lists all passengers; an empty store answers `{"passageiros": []}`.
pub async fn list_passengers(
    State(state): State<AppState>,
) -> ApiResult<Json<PassengerListView>> {
    let passengers = passengers::list_passengers(&state.db)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    debug!("{} passengers found", passengers.len());

    Ok(Json(PassengerListView {
        passageiros: passengers.into_iter().map(PassengerView::from).collect(),
    }))
}

/// GET /passageiro?cpf=...
///
/// A missing cpf parameter and an unknown cpf both answer 404 with the
/// canned not-found message.
pub async fn get_passenger(
    State(state): State<AppState>,
    Query(query): Query<CpfQuery>,
) -> ApiResult<Json<PassengerView>> {
    let cpf = query
        .cpf
        .ok_or_else(|| ApiError::NotFound(MSG_NOT_FOUND.to_string()))?;

    let passenger = passengers::find_by_cpf(&state.db, &cpf)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .ok_or_else(|| {
            warn!("No passenger with cpf '{}'", cpf);
            ApiError::NotFound(MSG_NOT_FOUND.to_string())
        })?;

    debug!("Passenger found: '{}'", passenger.cpf);
    Ok(Json(passenger.into()))
}

/// PUT /passageiro
///
/// Full-replacement update addressed by id. The birthdate is parsed (and
/// rejected when malformed) but not written back; the stored value is
/// kept as created.
pub async fn update_passenger(
    State(state): State<AppState>,
    Json(payload): Json<UpdatePassengerRequest>,
) -> ApiResult<Json<PassengerView>> {
    parse_birthdate(&payload.birthdate).map_err(|_| {
        warn!(
            "Birthdate '{}' is not in the expected format",
            payload.birthdate
        );
        ApiError::BadRequest(MSG_BAD_BIRTHDATE.to_string())
    })?;

    let affected = passengers::update_passenger(
        &state.db,
        payload.id,
        &payload.nome,
        &payload.cpf,
        &payload.flight,
    )
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    if affected == 0 {
        warn!("No passenger with id {} to update", payload.id);
        return Err(ApiError::NotFound(MSG_NOT_FOUND.to_string()));
    }

    let passenger = passengers::find_by_id(&state.db, payload.id)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .ok_or_else(|| ApiError::Internal(format!("Updated passenger {} missing", payload.id)))?;

    debug!("Updated passenger #{}", payload.id);
    Ok(Json(passenger.into()))
}

/// DELETE /passageiro?cpf=...
///
/// The cpf is percent-decoded twice before the lookup, compensating for
/// the extra encoding applied by upstream callers.
pub async fn delete_passenger(
    State(state): State<AppState>,
    Query(query): Query<CpfQuery>,
) -> ApiResult<Json<DeleteConfirmation>> {
    let cpf = query
        .cpf
        .ok_or_else(|| ApiError::NotFound(MSG_NOT_FOUND.to_string()))?;
    let cpf = double_decode(&cpf);

    let affected = passengers::delete_by_cpf(&state.db, &cpf)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    if affected == 0 {
        warn!("No passenger with cpf '{}' to delete", cpf);
        return Err(ApiError::NotFound(MSG_NOT_FOUND.to_string()));
    }

    debug!("Deleted passenger '{}'", cpf);
    Ok(Json(DeleteConfirmation {
        message: MSG_REMOVED.to_string(),
        id: cpf,
    }))
}

fn double_decode(value: &str) -> String {
    let once = percent_decode_str(value).decode_utf8_lossy().into_owned();
    percent_decode_str(&once).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_decode_plain_value() {
        assert_eq!(double_decode("27036343826"), "27036343826");
    }

    #[test]
    fn test_double_decode_twice_encoded_value() {
        // %32 is '2'; one decode still leaves an escape, two resolve it
        assert_eq!(double_decode("%2532%2537036343826"), "27036343826");
        assert_eq!(double_decode("%327036343826"), "27036343826");
    }
}
