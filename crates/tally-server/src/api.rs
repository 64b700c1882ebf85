// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router assembly.

use std::sync::Arc;

use axum::{
	middleware::from_fn_with_state,
	routing::{get, post, put},
	Router,
};
use chrono::Utc;
use tally_server_auth::{
	generate_signing_secret, hash_password, Action, Role, Subject, TokenSigner, UserId,
};
use tally_server_config::ServerConfig;
use tower_http::trace::TraceLayer;

use crate::{
	auth_middleware::auth_layer,
	authz_middleware::{RequireAbility, RequireRole},
	error::ServerError,
	routes,
	store::{RefreshTokenRegistry, Store, UserRecord},
};

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
	pub store: Arc<Store>,
	pub refresh_tokens: Arc<RefreshTokenRegistry>,
	pub signer: Arc<TokenSigner>,
	pub config: Arc<ServerConfig>,
	/// Argon2 hash of a random password. Logins for unknown usernames verify
	/// against it so they cost the same as a wrong password.
	pub login_decoy_hash: Arc<str>,
}

/// Build the application state from configuration.
///
/// Without a configured signing key a per-process key is generated; tokens
/// then stop verifying when the process restarts. The bootstrap admin, when
/// configured, is created here.
pub async fn create_app_state(config: ServerConfig) -> Result<AppState, ServerError> {
	let secret = match &config.auth.jwt_secret {
		Some(secret) => secret.clone(),
		None => {
			tracing::warn!(
				environment = %config.auth.environment,
				"no JWT signing key configured; generated a per-process key"
			);
			generate_signing_secret()
		}
	};

	let signer = TokenSigner::new(
		&secret,
		config.auth.issuer.clone(),
		config.auth.access_token_ttl_secs,
		config.auth.refresh_token_ttl_secs,
	);

	let login_decoy_hash = hash_password(generate_signing_secret().expose())?;

	let state = AppState {
		store: Arc::new(Store::new()),
		refresh_tokens: Arc::new(RefreshTokenRegistry::new()),
		signer: Arc::new(signer),
		config: Arc::new(config),
		login_decoy_hash: Arc::from(login_decoy_hash),
	};

	bootstrap_admin(&state).await?;

	Ok(state)
}

/// Create the configured admin account if it does not exist yet.
async fn bootstrap_admin(state: &AppState) -> Result<(), ServerError> {
	let Some((username, password)) = state.config.bootstrap.admin_credentials() else {
		return Ok(());
	};

	if state.store.find_user_by_username(username).await.is_some() {
		tracing::debug!(%username, "bootstrap admin already present");
		return Ok(());
	}

	let admin = UserRecord {
		id: UserId::generate(),
		username: username.to_string(),
		display_name: "Administrator".to_string(),
		password_hash: hash_password(password.expose())?,
		role: Role::Admin,
		department_id: None,
		transaction_limit: None,
		created_at: Utc::now(),
	};
	let user_id = admin.id;
	state.store.insert_user(admin).await?;

	tracing::info!(%username, %user_id, "created bootstrap admin");
	Ok(())
}

pub fn create_router(state: AppState) -> Router {
	// Public routes
	let public = Router::new()
		.route("/health", get(routes::health::health_check))
		.route("/auth/login", post(routes::auth::login))
		.route("/auth/refresh", post(routes::auth::refresh));

	// Authenticated routes; fine-grained checks happen in the handlers
	let authed = Router::new()
		.route("/auth/logout", post(routes::auth::logout))
		.route("/auth/me", get(routes::auth::me))
		.route(
			"/api/users",
			get(routes::users::list_users).post(routes::users::create_user),
		)
		.route(
			"/api/users/{id}",
			get(routes::users::get_user)
				.patch(routes::users::update_user)
				.delete(routes::users::delete_user),
		)
		.route(
			"/api/accounts",
			get(routes::accounts::list_accounts).post(routes::accounts::create_account),
		)
		.route(
			"/api/accounts/{id}",
			get(routes::accounts::get_account).delete(routes::accounts::delete_account),
		)
		.route(
			"/api/transactions",
			get(routes::transactions::list_transactions)
				.post(routes::transactions::create_transaction),
		)
		.route(
			"/api/transactions/{id}",
			get(routes::transactions::get_transaction),
		)
		.route(
			"/api/transactions/{id}/approve",
			post(routes::transactions::approve_transaction),
		)
		.route(
			"/api/transactions/{id}/reject",
			post(routes::transactions::reject_transaction),
		)
		.route(
			"/api/tenders",
			get(routes::tenders::list_tenders).post(routes::tenders::create_tender),
		)
		.route("/api/tenders/{id}", get(routes::tenders::get_tender))
		.route(
			"/api/reports",
			get(routes::reports::list_reports).post(routes::reports::create_report),
		)
		.route("/api/reports/{id}", get(routes::reports::get_report))
		.route(
			"/api/reports/{id}/export",
			get(routes::reports::export_report),
		);

	// Routes guarded before the handler runs
	let guarded = Router::new()
		.route(
			"/api/dashboard",
			get(routes::dashboard::get_dashboard)
				.route_layer(RequireAbility::new(Action::Read, Subject::Dashboard)),
		)
		.route(
			"/api/settings",
			get(routes::settings::get_settings)
				.route_layer(RequireAbility::new(Action::Read, Subject::Settings))
				.merge(
					put(routes::settings::update_settings)
						.route_layer(RequireAbility::new(Action::Update, Subject::Settings)),
				),
		);

	let admin = Router::new()
		.route(
			"/api/admin/users/{id}/role",
			put(routes::admin::update_user_role),
		)
		.route_layer(RequireRole::admin());

	Router::new()
		.merge(public)
		.merge(authed)
		.merge(guarded)
		.merge(admin)
		.layer(from_fn_with_state(state.clone(), auth_layer))
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}
