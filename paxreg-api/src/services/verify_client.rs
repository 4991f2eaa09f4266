//! Federal-registry cpf verification client
//!
//! One outbound POST per lookup, bounded by the configured timeout. The
//! endpoint URL and access token are injected configuration; there are no
//! retries.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("paxreg/", env!("CARGO_PKG_VERSION"));

/// Verification client errors
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("External API request timed out")]
    Timeout,

    #[error("External API error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Raw upstream response payload
#[derive(Debug, Deserialize)]
struct VerifyResponse {
    code: Option<i64>,
    data_count: Option<i64>,
    #[serde(default)]
    data: Vec<VerifyRecord>,
}

#[derive(Debug, Deserialize)]
struct VerifyRecord {
    nome: Option<String>,
    situacao_cadastral: Option<String>,
}

/// Shaped verification result
///
/// When the upstream reports zero matching records, `nome` and `situacao`
/// are empty strings rather than absent fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyResult {
    pub code: Option<i64>,
    pub count: i64,
    pub nome: String,
    pub situacao: String,
}

impl From<VerifyResponse> for VerifyResult {
    fn from(response: VerifyResponse) -> Self {
        let count = response.data_count.unwrap_or(0);
        if count == 0 {
            return Self {
                code: response.code,
                count: 0,
                nome: String::new(),
                situacao: String::new(),
            };
        }

        let first = response.data.into_iter().next();
        Self {
            code: response.code,
            count,
            nome: first
                .as_ref()
                .and_then(|r| r.nome.clone())
                .unwrap_or_default(),
            situacao: first
                .and_then(|r| r.situacao_cadastral)
                .unwrap_or_default(),
        }
    }
}

/// Verification API client
#[derive(Clone)]
pub struct VerifyClient {
    http_client: reqwest::Client,
    url: String,
    token: String,
}

impl VerifyClient {
    /// Create a client against `url` with the pre-shared `token`
    pub fn new(
        url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, VerifyError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| VerifyError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            url: url.into(),
            token: token.into(),
        })
    }

    /// Look up the registration status for a cpf and birthdate pair
    pub async fn verify(&self, cpf: &str, birthdate: &str) -> Result<VerifyResult, VerifyError> {
        tracing::debug!(cpf = %cpf, "Querying cpf verification API");

        let response = self
            .http_client
            .post(&self.url)
            .query(&[
                ("token", self.token.as_str()),
                ("cpf", cpf),
                ("birthdate", birthdate),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VerifyError::Timeout
                } else {
                    VerifyError::Network(e.to_string())
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VerifyError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let payload: VerifyResponse = response
            .json()
            .await
            .map_err(|e| VerifyError::Parse(e.to_string()))?;

        let result = VerifyResult::from(payload);
        tracing::debug!(
            code = ?result.code,
            count = result.count,
            "cpf verification lookup complete"
        );

        Ok(result)
    }
}
