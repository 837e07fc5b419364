// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::{error::ApiError, state::AppState};

pub mod balance;
pub mod transactions;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(balance::get_account_balance))
        .route("/send-transaction", post(transactions::send_transaction))
        .with_state(state);

    routes
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
}

/// Outermost fault boundary: any panic in request handling becomes the
/// generic 500 envelope and the process keeps serving.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!("request handling panicked: {detail}");
    ApiError::internal(detail).into_response()
}

#[derive(OpenApi)]
#[openapi(
    paths(
        balance::get_account_balance,
        transactions::send_transaction
    ),
    components(
        schemas(
            balance::BalanceResult,
            balance::GetBalanceResponse,
            transactions::SendTransactionRequest,
            transactions::TxHashResult,
            transactions::SendTransactionResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Account", description = "Balance queries and value transfers")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_secret",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-API-Secret"))),
            );
        }
    }
}
