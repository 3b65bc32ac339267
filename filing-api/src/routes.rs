use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use filing_core::{
    BracketRegistry, FilingData, IncomeDocument, IncomeDocumentKind, TaxCalculationResult,
    TaxCalculator,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::json;
use tracing::info;

use crate::error::ApiError;

/// Shared service state.
///
/// The registry is built once at startup and only ever read. A future
/// hot-reload of a new tax year replaces the `Arc`, never a table in place,
/// so in-flight calculations always see a complete schedule.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<BracketRegistry>,
}

impl AppState {
    pub fn new(registry: BracketRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness))
        .route("/api/v1/calculations", post(calculate))
        .with_state(state)
}

/// One income document as collected by the filing wizard.
///
/// Box values default to zero so a caller can omit boxes a document type
/// does not carry.
#[derive(Debug, Deserialize)]
pub struct DocumentPayload {
    kind: IncomeDocumentKind,
    #[serde(default)]
    wages: Decimal,
    #[serde(default)]
    federal_tax_withheld: Decimal,
    #[serde(default)]
    social_security_tax_withheld: Decimal,
    #[serde(default)]
    medicare_tax_withheld: Decimal,
    #[serde(default)]
    state_wages: Decimal,
    #[serde(default)]
    state_tax_withheld: Decimal,
}

impl From<DocumentPayload> for IncomeDocument {
    fn from(payload: DocumentPayload) -> Self {
        Self {
            kind: payload.kind,
            wages: payload.wages,
            federal_tax_withheld: payload.federal_tax_withheld,
            social_security_tax_withheld: payload.social_security_tax_withheld,
            medicare_tax_withheld: payload.medicare_tax_withheld,
            state_wages: payload.state_wages,
            state_tax_withheld: payload.state_tax_withheld,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CalculationRequest {
    tax_year: i32,
    /// Absent (or null) when the income section was never completed; an
    /// empty list is a completed section with no documents.
    #[serde(default)]
    documents: Option<Vec<DocumentPayload>>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    date_entered_us: Option<NaiveDate>,
}

impl CalculationRequest {
    fn into_filing_data(self) -> FilingData {
        FilingData {
            tax_year: self.tax_year,
            documents: self
                .documents
                .map(|documents| documents.into_iter().map(IncomeDocument::from).collect()),
            date_entered_us: self.date_entered_us,
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ready",
        "supported_tax_years": state.registry.supported_years(),
    }))
}

async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Result<Json<TaxCalculationResult>, ApiError> {
    let Json(request) = payload?;
    let filing = request.into_filing_data();

    let calculator = TaxCalculator::new(&state.registry);
    let result = calculator.calculate(&filing)?;

    info!(
        tax_year = result.tax_year,
        effective_tax_year = result.effective_tax_year,
        %result.net_amount,
        "calculation served"
    );

    Ok(Json(result))
}
