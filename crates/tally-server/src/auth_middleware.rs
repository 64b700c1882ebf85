// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication middleware and extractors.
//!
//! [`auth_layer`] runs on every request and inserts an [`AuthContext`] into
//! the request extensions. It never rejects: a missing, malformed, expired or
//! refresh-kind token simply yields an unauthenticated context, and the route
//! layers in [`crate::authz_middleware`] or the [`RequireAuth`] extractor turn
//! that into a 401.
//!
//! ```ignore
//! Router::new()
//!     .route("/auth/me", get(me))
//!     .layer(from_fn_with_state(state.clone(), auth_layer));
//!
//! async fn me(RequireAuth(user): RequireAuth) -> impl IntoResponse { .. }
//! ```

use axum::{
	body::Body,
	extract::{FromRequestParts, State},
	http::{request::Parts, Request, StatusCode},
	middleware::Next,
	response::{IntoResponse, Response},
	Json,
};
use tally_server_api::ErrorResponse;
use tally_server_auth::{authenticate_headers, AuthContext, CurrentUser};
use tracing::instrument;

use crate::api::AppState;

/// Authenticate the bearer token, if any, and attach the result.
#[instrument(
	name = "auth_layer",
	skip(state, request, next),
	fields(user_id = tracing::field::Empty)
)]
pub async fn auth_layer(
	State(state): State<AppState>,
	mut request: Request<Body>,
	next: Next,
) -> Response {
	let auth_ctx = authenticate_headers(request.headers(), &state.signer);

	if let Some(user) = auth_ctx.user() {
		tracing::Span::current().record("user_id", tracing::field::display(user.id()));
	}

	request.extensions_mut().insert(auth_ctx);
	next.run(request).await
}

/// Extractor for authenticated handlers. Rejects with 401 when the request
/// carries no valid access token.
pub struct RequireAuth(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAuth
where
	S: Send + Sync,
{
	type Rejection = Response;

	#[instrument(name = "RequireAuth::from_request_parts", skip_all)]
	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let auth_ctx = parts
			.extensions
			.get::<AuthContext>()
			.cloned()
			.unwrap_or_else(AuthContext::unauthenticated);

		match auth_ctx.current_user {
			Some(user) => {
				tracing::debug!(user_id = %user.id(), "authentication required: success");
				Ok(RequireAuth(user))
			}
			None => {
				tracing::debug!("authentication required: no valid credentials");
				Err(
					(
						StatusCode::UNAUTHORIZED,
						Json(ErrorResponse::new("unauthorized", "Authentication required")),
					)
						.into_response(),
				)
			}
		}
	}
}
