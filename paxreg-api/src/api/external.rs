//! External verification passthrough
//!
//! Validates the query parameters, delegates to the verification client,
//! and maps its failures onto 502/504/500 outcomes.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::services::verify_client::VerifyResult;
use crate::{ApiError, ApiResult, AppState};

/// Query parameters for GET /external-data
#[derive(Debug, Deserialize)]
pub struct ExternalDataQuery {
    pub cpf: Option<String>,
    pub birthdate: Option<String>,
}

/// GET /external-data?cpf=...&birthdate=...
///
/// Example: `/external-data?cpf=71454597011&birthdate=1935-12-04`
pub async fn get_external_data(
    State(state): State<AppState>,
    Query(query): Query<ExternalDataQuery>,
) -> ApiResult<Json<VerifyResult>> {
    let cpf = query.cpf.filter(|v| !v.is_empty());
    let birthdate = query.birthdate.filter(|v| !v.is_empty());

    let cpf = cpf.ok_or(ApiError::MissingParam("cpf"))?;
    let birthdate = birthdate.ok_or(ApiError::MissingParam("birthdate"))?;

    debug!("Verifying cpf '{}'", cpf);
    let result = state.verifier.verify(&cpf, &birthdate).await?;

    Ok(Json(result))
}
