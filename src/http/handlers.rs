//! Endpoint handlers.
//!
//! `dispatch` is the single entry point: it resolves the route, runs the
//! endpoint, and turns any `ApiError` into its JSON envelope.

use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

use crate::http::request::request_id;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::projection::{
    find_by_key, project_deal, select_activity, ActivityProjection, DealProjection,
    FieldProjection, SalesRepLabels,
};
use crate::routing::{FieldLookup, Route};

/// Main relay handler.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers);
    let route = state.router.resolve(&method, uri.path());
    let label = route.label();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
        route = label,
        "Dispatching request"
    );

    let result = match route {
        Route::Preflight => Ok(StatusCode::NO_CONTENT.into_response()),
        Route::MethodNotAllowed => Err(ApiError::MethodNotAllowed),
        Route::NotFound => Err(ApiError::NotFound),
        Route::Deals => list_deals(&state).await.map(|deals| Json(deals).into_response()),
        Route::DealActivity { deal_id } => deal_activity(&state, &deal_id)
            .await
            .map(|activity| Json(activity).into_response()),
        Route::DealField(lookup) => deal_field(&state, &lookup)
            .await
            .map(|field| Json(field).into_response()),
    };

    let response = match result {
        Ok(response) => response,
        Err(err) => {
            if err.status().is_server_error() {
                tracing::error!(request_id = %request_id, route = label, error = %err, "Request failed");
            } else {
                tracing::debug!(request_id = %request_id, route = label, error = %err, "Request rejected");
            }
            err.into_response()
        }
    };

    metrics::record_request(label, response.status().as_u16(), start_time);
    response
}

/// `GET /deals`: demo-sale deals with resolved sales-rep labels.
async fn list_deals(state: &AppState) -> Result<Vec<DealProjection>, ApiError> {
    let schema = &state.schema;

    let rep_field = state
        .crm
        .deal_field(&schema.sales_rep_field_id.to_string())
        .await?;
    let reps = SalesRepLabels::from_field(rep_field.as_ref());

    let deals = state
        .crm
        .deals_by_filter(schema.demo_sale_filter_id, schema.deals_limit)
        .await?;

    tracing::debug!(deals = deals.len(), rep_labels = reps.len(), "Projecting deals");

    Ok(deals
        .iter()
        .map(|deal| project_deal(deal, schema, &reps))
        .collect())
}

/// `GET /deals/{id}/activity`: due date/time of the most relevant activity.
async fn deal_activity(state: &AppState, deal_id: &str) -> Result<ActivityProjection, ApiError> {
    let activities = state.crm.deal_activities(deal_id).await?;
    Ok(ActivityProjection::from(select_activity(&activities)))
}

/// `GET /deal-fields/{key}`: one field definition by numeric id or hex key.
async fn deal_field(state: &AppState, lookup: &FieldLookup) -> Result<FieldProjection, ApiError> {
    let field = match lookup {
        FieldLookup::Id(id) => state
            .crm
            .deal_field(id)
            .await?
            .ok_or(ApiError::MissingRecord)?,
        FieldLookup::Key(key) => {
            let fields = state.crm.deal_fields().await?;
            find_by_key(fields, key).ok_or_else(|| ApiError::FieldNotFound(key.clone()))?
        }
    };

    Ok(FieldProjection::from(field))
}
