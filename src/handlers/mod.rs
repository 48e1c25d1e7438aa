pub mod categories;
pub mod health;
pub mod inflation;
pub mod inflation_reports;
pub mod items;
pub mod price_alerts;
pub mod prices;
pub mod shopping_lists;
pub mod stores;
pub mod users;

use axum::extract::{rejection::QueryRejection, Query};
use tracing::warn;

use crate::error::ServiceError;
use crate::models::pagination::{PageQuery, PageRequest, SortKey};
use crate::AppState;

/// Log a rejected request and turn the message into a 400
pub(crate) fn rejected(message: String) -> ServiceError {
    warn!(error = %message, "Invalid request");
    ServiceError::validation(message)
}

/// Resolve pagination parameters against the configured page size limits
pub(crate) fn page_request<S: SortKey>(
    state: &AppState,
    query: &PageQuery,
) -> Result<PageRequest<S>, ServiceError> {
    query
        .validate(state.config.default_page_size, state.config.max_page_size)
        .map_err(rejected)
}

/// Unwrap query parameters, reporting malformed values (bad dates, unknown
/// enum names) with the usual validation body instead of axum's plain text
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ServiceError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| rejected(rejection.body_text()))
}
