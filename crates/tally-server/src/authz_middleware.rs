// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Route-level authorization layers and handler-level helpers.
//!
//! Authorization uses two tiers:
//!
//! 1. **Route-level**: [`RequireAbility`] and [`RequireRole`] reject a request
//!    before the handler runs. They see only the `(action, subject)` pair or
//!    the required role, so conditional rules never grant here.
//! 2. **Handler-level**: [`check_authorization`] (or the [`authorize!`] macro)
//!    checks a concrete resource loaded by the handler.
//!
//! Every decision goes through [`tally_server_auth::authorize`].
//!
//! - Unauthenticated requests are rejected with 401 Unauthorized
//! - Denied requests are rejected with 403 Forbidden
//! - Error bodies never say which rule failed
//!
//! ```ignore
//! Router::new()
//!     .route("/api/admin/users/{id}/role", put(update_role))
//!     .route_layer(RequireRole::admin());
//!
//! Router::new()
//!     .route("/api/dashboard", get(dashboard))
//!     .route_layer(RequireAbility::new(Action::Read, Subject::Dashboard));
//! ```

use axum::{
	body::Body,
	http::{Request, StatusCode},
	response::{IntoResponse, Response},
	Json,
};
use pin_project_lite::pin_project;
use serde::Serialize;
use std::{
	future::Future,
	pin::Pin,
	task::{Context, Poll},
};
use tally_server_api::ErrorResponse;
use tally_server_auth::{
	authorize, Action, AuthContext, Decision, DenyReason, Identity, Requirement, ResourceAttrs,
	Role, Subject,
};
use tower::{Layer, Service};
use tracing::instrument;

// =============================================================================
// Route-Level Authorization Layers
// =============================================================================

/// Route layer that checks an `(action, subject)` capability.
///
/// Only unconditional rules can satisfy this check.
#[derive(Debug, Clone, Copy)]
pub struct RequireAbility {
	action: Action,
	subject: Subject,
}

impl RequireAbility {
	pub fn new(action: Action, subject: Subject) -> Self {
		Self { action, subject }
	}
}

impl<S> Layer<S> for RequireAbility {
	type Service = RequireAbilityService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		RequireAbilityService {
			inner,
			action: self.action,
			subject: self.subject,
		}
	}
}

/// Service wrapper for [`RequireAbility`].
#[derive(Clone)]
pub struct RequireAbilityService<S> {
	inner: S,
	action: Action,
	subject: Subject,
}

impl<S> Service<Request<Body>> for RequireAbilityService<S>
where
	S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
	S::Future: Send,
{
	type Response = Response;
	type Error = S::Error;
	type Future = GuardFuture<S::Future>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, req: Request<Body>) -> Self::Future {
		let decision = decide(
			&req,
			Requirement::capability(self.action, self.subject),
		);
		guard(decision, || self.inner.call(req))
	}
}

/// Route layer that requires a role, or a role above it in the hierarchy.
#[derive(Debug, Clone, Copy)]
pub struct RequireRole {
	role: Role,
}

impl RequireRole {
	pub fn new(role: Role) -> Self {
		Self { role }
	}

	pub fn admin() -> Self {
		Self::new(Role::Admin)
	}

	pub fn manager() -> Self {
		Self::new(Role::Manager)
	}
}

impl<S> Layer<S> for RequireRole {
	type Service = RequireRoleService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		RequireRoleService {
			inner,
			role: self.role,
		}
	}
}

/// Service wrapper for [`RequireRole`].
#[derive(Clone)]
pub struct RequireRoleService<S> {
	inner: S,
	role: Role,
}

impl<S> Service<Request<Body>> for RequireRoleService<S>
where
	S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
	S::Future: Send,
{
	type Response = Response;
	type Error = S::Error;
	type Future = GuardFuture<S::Future>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, req: Request<Body>) -> Self::Future {
		let decision = decide(&req, Requirement::Role(self.role));
		guard(decision, || self.inner.call(req))
	}
}

fn decide(req: &Request<Body>, requirement: Requirement<'_>) -> Decision {
	let identity = req
		.extensions()
		.get::<AuthContext>()
		.and_then(AuthContext::identity);
	authorize(identity, requirement)
}

fn guard<F>(decision: Decision, call: impl FnOnce() -> F) -> GuardFuture<F> {
	match decision.deny_reason() {
		None => GuardFuture::Inner { fut: call() },
		Some(DenyReason::Unauthenticated) => GuardFuture::Rejected {
			resp: Some(unauthorized_response()),
		},
		Some(DenyReason::MissingRole | DenyReason::Forbidden) => GuardFuture::Rejected {
			resp: Some(forbidden_response()),
		},
	}
}

pin_project! {
	/// Future for the route guard services.
	#[project = GuardFutureProj]
	pub enum GuardFuture<F> {
		Inner { #[pin] fut: F },
		Rejected { resp: Option<Response> },
	}
}

impl<F, E> Future for GuardFuture<F>
where
	F: Future<Output = Result<Response, E>>,
{
	type Output = Result<Response, E>;

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		match self.project() {
			GuardFutureProj::Inner { fut } => fut.poll(cx),
			GuardFutureProj::Rejected { resp } => {
				Poll::Ready(Ok(resp.take().expect("polled after completion")))
			}
		}
	}
}

fn unauthorized_response() -> Response {
	(
		StatusCode::UNAUTHORIZED,
		Json(ErrorResponse::new("unauthorized", "Authentication required")),
	)
		.into_response()
}

fn forbidden_response() -> Response {
	(
		StatusCode::FORBIDDEN,
		Json(ErrorResponse::new("forbidden", "Insufficient permissions")),
	)
		.into_response()
}

// =============================================================================
// Handler-level authorization helpers
// =============================================================================

/// Fine-grained check failure. Responds 403 with a generic message.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationError {
	/// Always "forbidden".
	pub error: String,
	pub message: String,
}

impl AuthorizationError {
	pub fn forbidden(message: impl Into<String>) -> Self {
		Self {
			error: "forbidden".to_string(),
			message: message.into(),
		}
	}
}

impl std::fmt::Display for AuthorizationError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {}", self.error, self.message)
	}
}

impl std::error::Error for AuthorizationError {}

impl IntoResponse for AuthorizationError {
	fn into_response(self) -> Response {
		(StatusCode::FORBIDDEN, Json(self)).into_response()
	}
}

/// Check whether `identity` may perform `action` on a concrete resource.
///
/// ```ignore
/// check_authorization(&user.identity, Action::Approve, &transaction.resource())?;
/// ```
#[instrument(
	skip(identity, resource),
	fields(
		user_id = %identity.id,
		action = %action,
		subject = %resource.subject,
	)
)]
pub fn check_authorization(
	identity: &Identity,
	action: Action,
	resource: &ResourceAttrs,
) -> Result<(), AuthorizationError> {
	match authorize(Some(identity), Requirement::on_resource(action, resource)) {
		Decision::Allow => Ok(()),
		Decision::Deny(_) => Err(AuthorizationError::forbidden("Insufficient permissions")),
	}
}

/// Inline form of [`check_authorization`].
///
/// ```ignore
/// async fn approve(
///     RequireAuth(user): RequireAuth,
///     State(state): State<AppState>,
///     Path(id): Path<TransactionId>,
/// ) -> Result<Json<TransactionResponse>, ServerError> {
///     let transaction = load(&state, id).await?;
///     authorize!(&user.identity, Action::Approve, &transaction.resource())?;
///     // ...
/// }
/// ```
#[macro_export]
macro_rules! authorize {
	($identity:expr, $action:expr, $resource:expr) => {
		$crate::authz_middleware::check_authorization($identity, $action, $resource)
	};
}
