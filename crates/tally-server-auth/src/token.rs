// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HS256 session tokens.
//!
//! A login yields a [`TokenPair`]: a short-lived access token carrying the
//! identity the permission model needs, and a long-lived refresh token. Both
//! are JWTs signed with the same key and told apart by the `typ` claim.
//! Servers keep only [`hash_refresh_token`] digests of live refresh tokens.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tally_common_secret::SecretString;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::TokenError;
use crate::{DepartmentId, Identity, Role, UserId};

/// Upper bound on any configured lifetime (ten years).
const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Bytes of entropy in a generated signing key.
pub const GENERATED_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
	Access,
	Refresh,
}

impl fmt::Display for TokenKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TokenKind::Access => f.write_str("access"),
			TokenKind::Refresh => f.write_str("refresh"),
		}
	}
}

/// JWT claims for both token kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
	pub sub: UserId,
	pub role: Option<Role>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub department_id: Option<DepartmentId>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub transaction_limit: Option<i64>,
	pub iss: String,
	pub iat: i64,
	pub exp: i64,
	pub typ: TokenKind,
	pub jti: Uuid,
}

impl Claims {
	pub fn identity(&self) -> Identity {
		Identity {
			id: self.sub,
			role: self.role,
			department_id: self.department_id,
			transaction_limit: self.transaction_limit,
		}
	}

	pub fn expires_at(&self) -> DateTime<Utc> {
		DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
	}
}

/// Freshly issued access and refresh tokens.
#[derive(Debug, Clone)]
pub struct TokenPair {
	pub access_token: SecretString,
	pub access_expires_at: DateTime<Utc>,
	pub refresh_token: SecretString,
	pub refresh_expires_at: DateTime<Utc>,
}

/// Signs and verifies session tokens with one HS256 key.
#[derive(Clone)]
pub struct TokenSigner {
	encoding: EncodingKey,
	decoding: DecodingKey,
	issuer: String,
	access_ttl: Duration,
	refresh_ttl: Duration,
}

impl fmt::Debug for TokenSigner {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TokenSigner")
			.field("issuer", &self.issuer)
			.field("access_ttl", &self.access_ttl)
			.field("refresh_ttl", &self.refresh_ttl)
			.finish_non_exhaustive()
	}
}

fn ttl(secs: u64) -> Duration {
	Duration::seconds(secs.min(MAX_TTL_SECS) as i64)
}

impl TokenSigner {
	pub fn new(
		secret: &SecretString,
		issuer: impl Into<String>,
		access_ttl_secs: u64,
		refresh_ttl_secs: u64,
	) -> Self {
		let key = secret.expose().as_bytes();
		Self {
			encoding: EncodingKey::from_secret(key),
			decoding: DecodingKey::from_secret(key),
			issuer: issuer.into(),
			access_ttl: ttl(access_ttl_secs),
			refresh_ttl: ttl(refresh_ttl_secs),
		}
	}

	pub fn access_ttl(&self) -> Duration {
		self.access_ttl
	}

	/// Issue an access/refresh pair for `identity`.
	pub fn issue_pair(&self, identity: &Identity) -> Result<TokenPair, TokenError> {
		self.issue_pair_at(identity, Utc::now())
	}

	#[instrument(level = "debug", skip(self, identity), fields(user_id = %identity.id))]
	pub fn issue_pair_at(
		&self,
		identity: &Identity,
		now: DateTime<Utc>,
	) -> Result<TokenPair, TokenError> {
		let (access_token, access_expires_at) =
			self.sign(identity, TokenKind::Access, now, self.access_ttl)?;
		let (refresh_token, refresh_expires_at) =
			self.sign(identity, TokenKind::Refresh, now, self.refresh_ttl)?;

		debug!(%access_expires_at, %refresh_expires_at, "issued token pair");

		Ok(TokenPair {
			access_token,
			access_expires_at,
			refresh_token,
			refresh_expires_at,
		})
	}

	fn sign(
		&self,
		identity: &Identity,
		typ: TokenKind,
		now: DateTime<Utc>,
		ttl: Duration,
	) -> Result<(SecretString, DateTime<Utc>), TokenError> {
		let expires_at = now + ttl;
		let claims = Claims {
			sub: identity.id,
			role: identity.role,
			department_id: identity.department_id,
			transaction_limit: identity.transaction_limit,
			iss: self.issuer.clone(),
			iat: now.timestamp(),
			exp: expires_at.timestamp(),
			typ,
			jti: Uuid::new_v4(),
		};

		let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
			.map_err(|e| TokenError::Signing(e.to_string()))?;

		Ok((SecretString::new(token), expires_at))
	}

	/// Verify signature, expiry, issuer and kind, returning the claims.
	#[instrument(level = "debug", skip(self, token))]
	pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
		let mut validation = Validation::new(Algorithm::HS256);
		validation.set_issuer(&[self.issuer.as_str()]);
		validation.set_required_spec_claims(&["exp", "iss", "sub"]);
		validation.leeway = 0;

		let claims = decode::<Claims>(token, &self.decoding, &validation)
			.map_err(|e| match e.kind() {
				ErrorKind::ExpiredSignature => TokenError::Expired,
				_ => TokenError::Invalid(e.to_string()),
			})?
			.claims;

		if claims.typ != expected {
			return Err(TokenError::WrongKind {
				expected,
				actual: claims.typ,
			});
		}

		Ok(claims)
	}
}

/// SHA-256 hex digest of a refresh token, the form servers persist.
pub fn hash_refresh_token(token: &str) -> String {
	hex::encode(Sha256::digest(token.as_bytes()))
}

/// A random hex signing key for deployments that did not configure one.
pub fn generate_signing_secret() -> SecretString {
	let mut bytes = [0u8; GENERATED_SECRET_BYTES];
	rand::thread_rng().fill_bytes(&mut bytes);
	SecretString::new(hex::encode(bytes))
}
