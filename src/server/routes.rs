//! HTTP routes
//!
//! Maps the six POST routes onto protocol commands. `OPTIONS` on any path is
//! answered with an empty 200; every other unmatched method or path is a 404.

use axum::Router;
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::handler::Handler;
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodRouter, post};

use crate::error::GatewayError;
use crate::middleware::{log_request, with_cors_headers};
use crate::protocol::parser::{self, SaveQuery};
use crate::protocol::{Command, Operation, Outcome, handle_command};
use crate::server::state::AppState;

type Reply = Result<Outcome, GatewayError>;

pub fn router(state: AppState) -> Router {
    let body_limit = state.max_body_bytes();

    let app = Router::new()
        .route(Operation::Load.route(), operation(load))
        .route(Operation::Save.route(), operation(save))
        .route(Operation::List.route(), operation(list))
        .route(Operation::Delete.route(), operation(delete))
        .route(Operation::Mkdir.route(), operation(mkdir))
        .route(Operation::Rmdir.route(), operation(rmdir))
        .fallback(unmatched)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(from_fn(log_request))
        .with_state(state);

    with_cors_headers(app)
}

/// POST-only route whose other methods fall through to `unmatched`
fn operation<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    post(handler).fallback(unmatched)
}

async fn unmatched(method: Method) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    GatewayError::NotFound("Not found".into()).into_response()
}

async fn dispatch(state: &AppState, command: Result<Command, GatewayError>) -> Reply {
    handle_command(state.root_handle(), command?).await
}

async fn load(State(state): State<AppState>, body: Result<Bytes, BytesRejection>) -> Reply {
    dispatch(&state, parser::parse_load(&body?)).await
}

async fn save(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Reply {
    let Query(pairs) = query?;
    let query = SaveQuery::from_pairs(pairs);
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    dispatch(&state, parser::parse_save(query, content_type, &body?)).await
}

async fn list(State(state): State<AppState>, body: Result<Bytes, BytesRejection>) -> Reply {
    dispatch(&state, parser::parse_list(&body?)).await
}

async fn delete(State(state): State<AppState>, body: Result<Bytes, BytesRejection>) -> Reply {
    dispatch(&state, parser::parse_delete(&body?)).await
}

async fn mkdir(State(state): State<AppState>, body: Result<Bytes, BytesRejection>) -> Reply {
    dispatch(&state, parser::parse_mkdir(&body?)).await
}

async fn rmdir(State(state): State<AppState>, body: Result<Bytes, BytesRejection>) -> Reply {
    dispatch(&state, parser::parse_rmdir(&body?)).await
}
