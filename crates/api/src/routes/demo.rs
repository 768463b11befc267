//! Demonstration handlers built only from the envelope helpers.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::check_bearer;
use crate::sink::BufferedResponse;
use crate::state::AppState;

/// Body of `POST /probe`.
#[derive(Debug, Deserialize)]
pub struct ProbeRequest {
    pub divisor: i32,
    /// Roll back unconditionally after the query instead of committing.
    #[serde(default)]
    pub abort: bool,
}

#[derive(Debug, Serialize)]
pub struct ProbeResult {
    pub quotient: i32,
}

#[derive(Debug, Serialize)]
pub struct Identity {
    pub authenticated: bool,
}

/// POST /echo -- answers 201 with the request body as `data`.
pub async fn echo(State(state): State<AppState>, body: Bytes) -> BufferedResponse {
    let mut w = BufferedResponse::new();
    let parsed = serde_json::from_slice::<Value>(&body);
    if let Some(payload) =
        state
            .responder
            .check(parsed, "decode body", StatusCode::BAD_REQUEST, &mut w)
    {
        state
            .responder
            .success_create_or_update(&payload, "echoed", &mut w);
    }
    w
}

/// GET /whoami -- 200 with a valid bearer token, 401 otherwise.
pub async fn whoami(State(state): State<AppState>, headers: HeaderMap) -> BufferedResponse {
    let mut w = BufferedResponse::new();
    match check_bearer(&headers, state.config.api_token.as_deref()) {
        Ok(()) => state.responder.success(
            &Identity {
                authenticated: true,
            },
            "authorized",
            StatusCode::OK,
            &mut w,
        ),
        Err(e) => state.responder.unauthorized(&mut w, &e),
    }
    w
}

/// POST /probe -- computes `100 / divisor` inside a transaction.
///
/// A failing query (division by zero) rolls the transaction back and answers
/// 500; `abort: true` rolls back unconditionally.
pub async fn probe(State(state): State<AppState>, body: Bytes) -> BufferedResponse {
    let responder = state.responder;
    let mut w = BufferedResponse::new();

    let Some(request) = responder.check(
        serde_json::from_slice::<ProbeRequest>(&body),
        "decode probe request",
        StatusCode::BAD_REQUEST,
        &mut w,
    ) else {
        return w;
    };

    let Some(mut tx) = responder.check(
        state.pool.begin().await,
        "begin transaction",
        StatusCode::INTERNAL_SERVER_ERROR,
        &mut w,
    ) else {
        return w;
    };

    let ctx = state.config.rollback_context();

    let quotient = sqlx::query_scalar::<_, i32>("SELECT 100 / $1")
        .bind(request.divisor)
        .fetch_one(&mut *tx)
        .await;

    let quotient = match quotient {
        Ok(quotient) => quotient,
        Err(e) => {
            responder
                .error_bool_tx(tx, &ctx, Some(&e), "probe query", &mut w)
                .await;
            return w;
        }
    };

    if request.abort {
        responder
            .error_tx(tx, &ctx, "probe aborted by request", &mut w)
            .await;
        return w;
    }

    if responder
        .check(
            tx.commit().await,
            "commit probe",
            StatusCode::INTERNAL_SERVER_ERROR,
            &mut w,
        )
        .is_none()
    {
        return w;
    }

    tracing::debug!(divisor = request.divisor, quotient, "Probe committed");
    responder.success(
        &ProbeResult { quotient },
        "probe committed",
        StatusCode::OK,
        &mut w,
    );
    w
}
