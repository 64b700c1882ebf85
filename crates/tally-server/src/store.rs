// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory entity store and refresh-token registry.
//!
//! Each collection sits behind its own [`RwLock`]. Records know how to
//! describe themselves to the permission model via `resource()`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tally_server_api::{
	AccountResponse, ReportResponse, SettingsResponse, TenderResponse, TransactionResponse,
	TransactionStatus, UserResponse,
};
use tally_server_auth::{
	AccountId, DepartmentId, Identity, ReportId, ResourceAttrs, Role, TenderId,
	TransactionId, UserId,
};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
	#[error("{0} not found")]
	NotFound(String),
	#[error("{0}")]
	Conflict(String),
}

// =============================================================================
// Records
// =============================================================================

#[derive(Debug, Clone)]
pub struct UserRecord {
	pub id: UserId,
	pub username: String,
	pub display_name: String,
	pub password_hash: String,
	pub role: Role,
	pub department_id: Option<DepartmentId>,
	pub transaction_limit: Option<i64>,
	pub created_at: DateTime<Utc>,
}

impl UserRecord {
	/// The identity a token issued for this user carries.
	pub fn identity(&self) -> Identity {
		Identity {
			id: self.id,
			role: Some(self.role),
			department_id: self.department_id,
			transaction_limit: self.transaction_limit,
		}
	}

	pub fn resource(&self) -> ResourceAttrs {
		let resource = ResourceAttrs::user(self.id, self.role);
		match self.department_id {
			Some(department_id) => resource.with_department(department_id),
			None => resource,
		}
	}

	pub fn to_response(&self) -> UserResponse {
		UserResponse {
			id: self.id,
			username: self.username.clone(),
			display_name: self.display_name.clone(),
			role: self.role,
			department_id: self.department_id,
			transaction_limit: self.transaction_limit,
			created_at: self.created_at,
		}
	}
}

#[derive(Debug, Clone)]
pub struct AccountRecord {
	pub id: AccountId,
	pub name: String,
	pub department_id: DepartmentId,
	pub balance: i64,
	pub created_by: UserId,
	pub created_at: DateTime<Utc>,
}

impl AccountRecord {
	pub fn resource(&self) -> ResourceAttrs {
		ResourceAttrs::account(self.department_id).with_created_by(self.created_by)
	}

	pub fn to_response(&self) -> AccountResponse {
		AccountResponse {
			id: self.id,
			name: self.name.clone(),
			department_id: self.department_id,
			balance: self.balance,
			created_by: self.created_by,
			created_at: self.created_at,
		}
	}
}

#[derive(Debug, Clone)]
pub struct TransactionRecord {
	pub id: TransactionId,
	pub account_id: AccountId,
	pub amount: i64,
	pub description: String,
	pub status: TransactionStatus,
	pub is_locked: bool,
	pub created_by: UserId,
	pub reviewed_by: Option<UserId>,
	pub review_note: Option<String>,
	pub created_at: DateTime<Utc>,
}

impl TransactionRecord {
	pub fn resource(&self) -> ResourceAttrs {
		ResourceAttrs::transaction(self.created_by, self.amount).with_locked(self.is_locked)
	}

	pub fn to_response(&self) -> TransactionResponse {
		TransactionResponse {
			id: self.id,
			account_id: self.account_id,
			amount: self.amount,
			description: self.description.clone(),
			status: self.status,
			is_locked: self.is_locked,
			created_by: self.created_by,
			reviewed_by: self.reviewed_by,
			review_note: self.review_note.clone(),
			created_at: self.created_at,
		}
	}
}

#[derive(Debug, Clone)]
pub struct TenderRecord {
	pub id: TenderId,
	pub title: String,
	pub start_date: DateTime<Utc>,
	pub end_date: DateTime<Utc>,
	pub is_closed: bool,
	pub participants: Vec<UserId>,
	pub created_by: UserId,
}

impl TenderRecord {
	pub fn resource(&self) -> ResourceAttrs {
		ResourceAttrs::tender(self.start_date, self.end_date)
			.with_closed(self.is_closed)
			.with_participants(self.participants.iter().copied())
			.with_created_by(self.created_by)
	}

	pub fn to_response(&self) -> TenderResponse {
		TenderResponse {
			id: self.id,
			title: self.title.clone(),
			start_date: self.start_date,
			end_date: self.end_date,
			is_closed: self.is_closed,
			participants: self.participants.clone(),
			created_by: self.created_by,
		}
	}
}

/// A report covers the accounts of one department, or all accounts when
/// `department_id` is `None`.
#[derive(Debug, Clone)]
pub struct ReportRecord {
	pub id: ReportId,
	pub title: String,
	pub is_public: bool,
	pub department_id: Option<DepartmentId>,
	pub created_by: UserId,
	pub created_at: DateTime<Utc>,
}

impl ReportRecord {
	pub fn resource(&self) -> ResourceAttrs {
		let resource = ResourceAttrs::report(self.is_public).with_created_by(self.created_by);
		match self.department_id {
			Some(department_id) => resource.with_department(department_id),
			None => resource,
		}
	}

	pub fn to_response(&self) -> ReportResponse {
		ReportResponse {
			id: self.id,
			title: self.title.clone(),
			is_public: self.is_public,
			department_id: self.department_id,
			created_by: self.created_by,
			created_at: self.created_at,
		}
	}
}

/// Platform-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	pub currency: String,
	pub fiscal_year_start_month: u8,
	pub approval_threshold: i64,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			currency: "USD".to_string(),
			fiscal_year_start_month: 1,
			approval_threshold: 100_000,
		}
	}
}

impl Settings {
	pub fn to_response(&self) -> SettingsResponse {
		SettingsResponse {
			currency: self.currency.clone(),
			fiscal_year_start_month: self.fiscal_year_start_month,
			approval_threshold: self.approval_threshold,
		}
	}
}

// =============================================================================
// Store
// =============================================================================

/// All platform entities, held in memory.
#[derive(Debug, Default)]
pub struct Store {
	users: RwLock<HashMap<UserId, UserRecord>>,
	accounts: RwLock<HashMap<AccountId, AccountRecord>>,
	transactions: RwLock<HashMap<TransactionId, TransactionRecord>>,
	tenders: RwLock<HashMap<TenderId, TenderRecord>>,
	reports: RwLock<HashMap<ReportId, ReportRecord>>,
	settings: RwLock<Settings>,
}

impl Store {
	pub fn new() -> Self {
		Self::default()
	}

	// ---- users ----------------------------------------------------------

	/// Insert a user. Usernames are unique, compared case-insensitively.
	pub async fn insert_user(&self, user: UserRecord) -> Result<(), StoreError> {
		let mut users = self.users.write().await;
		if users
			.values()
			.any(|u| u.username.eq_ignore_ascii_case(&user.username))
		{
			return Err(StoreError::Conflict(format!(
				"username '{}' is already taken",
				user.username
			)));
		}
		users.insert(user.id, user);
		Ok(())
	}

	pub async fn get_user(&self, id: UserId) -> Option<UserRecord> {
		self.users.read().await.get(&id).cloned()
	}

	pub async fn find_user_by_username(&self, username: &str) -> Option<UserRecord> {
		self
			.users
			.read()
			.await
			.values()
			.find(|u| u.username.eq_ignore_ascii_case(username))
			.cloned()
	}

	pub async fn list_users(&self) -> Vec<UserRecord> {
		let mut users: Vec<_> = self.users.read().await.values().cloned().collect();
		users.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
		users
	}

	/// Apply `update` to a user under the write lock and return the result.
	pub async fn update_user<F>(&self, id: UserId, update: F) -> Result<UserRecord, StoreError>
	where
		F: FnOnce(&mut UserRecord),
	{
		let mut users = self.users.write().await;
		let user = users
			.get_mut(&id)
			.ok_or_else(|| StoreError::NotFound("user".to_string()))?;
		update(user);
		Ok(user.clone())
	}

	pub async fn delete_user(&self, id: UserId) -> Result<UserRecord, StoreError> {
		self
			.users
			.write()
			.await
			.remove(&id)
			.ok_or_else(|| StoreError::NotFound("user".to_string()))
	}

	// ---- accounts -------------------------------------------------------

	pub async fn insert_account(&self, account: AccountRecord) {
		self.accounts.write().await.insert(account.id, account);
	}

	pub async fn get_account(&self, id: AccountId) -> Option<AccountRecord> {
		self.accounts.read().await.get(&id).cloned()
	}

	pub async fn list_accounts(&self) -> Vec<AccountRecord> {
		let mut accounts: Vec<_> = self.accounts.read().await.values().cloned().collect();
		accounts.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
		accounts
	}

	/// Delete an account. Accounts with transactions cannot be deleted.
	pub async fn delete_account(&self, id: AccountId) -> Result<AccountRecord, StoreError> {
		let transactions = self.transactions.read().await;
		let mut accounts = self.accounts.write().await;
		if !accounts.contains_key(&id) {
			return Err(StoreError::NotFound("account".to_string()));
		}
		if transactions.values().any(|t| t.account_id == id) {
			return Err(StoreError::Conflict(
				"account has transactions and cannot be deleted".to_string(),
			));
		}
		accounts
			.remove(&id)
			.ok_or_else(|| StoreError::NotFound("account".to_string()))
	}

	// ---- transactions ---------------------------------------------------

	/// Record a transaction against an existing account. Holds both locks so a
	/// concurrent [`Store::delete_account`] cannot leave it orphaned.
	pub async fn insert_transaction(
		&self,
		transaction: TransactionRecord,
	) -> Result<(), StoreError> {
		let mut transactions = self.transactions.write().await;
		let accounts = self.accounts.read().await;
		if !accounts.contains_key(&transaction.account_id) {
			return Err(StoreError::NotFound("account".to_string()));
		}
		transactions.insert(transaction.id, transaction);
		Ok(())
	}

	pub async fn get_transaction(&self, id: TransactionId) -> Option<TransactionRecord> {
		self.transactions.read().await.get(&id).cloned()
	}

	pub async fn list_transactions(&self) -> Vec<TransactionRecord> {
		let mut transactions: Vec<_> = self.transactions.read().await.values().cloned().collect();
		transactions.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
		transactions
	}

	/// Record a review and lock the transaction. An approval posts the amount
	/// to the account balance. Fails with a conflict when the transaction is
	/// already locked.
	pub async fn review_transaction(
		&self,
		id: TransactionId,
		status: TransactionStatus,
		reviewer: UserId,
		note: Option<String>,
	) -> Result<TransactionRecord, StoreError> {
		let mut transactions = self.transactions.write().await;
		let transaction = transactions
			.get_mut(&id)
			.ok_or_else(|| StoreError::NotFound("transaction".to_string()))?;
		if transaction.is_locked {
			return Err(StoreError::Conflict(
				"transaction has already been reviewed".to_string(),
			));
		}

		if status == TransactionStatus::Approved {
			let mut accounts = self.accounts.write().await;
			let account = accounts
				.get_mut(&transaction.account_id)
				.ok_or_else(|| StoreError::NotFound("account".to_string()))?;
			account.balance = account.balance.saturating_add(transaction.amount);
		}

		transaction.status = status;
		transaction.is_locked = true;
		transaction.reviewed_by = Some(reviewer);
		transaction.review_note = note;
		Ok(transaction.clone())
	}

	// ---- tenders --------------------------------------------------------

	pub async fn insert_tender(&self, tender: TenderRecord) {
		self.tenders.write().await.insert(tender.id, tender);
	}

	pub async fn get_tender(&self, id: TenderId) -> Option<TenderRecord> {
		self.tenders.read().await.get(&id).cloned()
	}

	pub async fn list_tenders(&self) -> Vec<TenderRecord> {
		let mut tenders: Vec<_> = self.tenders.read().await.values().cloned().collect();
		tenders.sort_by(|a, b| (a.start_date, a.id).cmp(&(b.start_date, b.id)));
		tenders
	}

	// ---- reports --------------------------------------------------------

	pub async fn insert_report(&self, report: ReportRecord) {
		self.reports.write().await.insert(report.id, report);
	}

	pub async fn get_report(&self, id: ReportId) -> Option<ReportRecord> {
		self.reports.read().await.get(&id).cloned()
	}

	pub async fn list_reports(&self) -> Vec<ReportRecord> {
		let mut reports: Vec<_> = self.reports.read().await.values().cloned().collect();
		reports.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
		reports
	}

	// ---- settings -------------------------------------------------------

	pub async fn settings(&self) -> Settings {
		self.settings.read().await.clone()
	}

	pub async fn update_settings<F>(&self, update: F) -> Settings
	where
		F: FnOnce(&mut Settings),
	{
		let mut settings = self.settings.write().await;
		update(&mut settings);
		settings.clone()
	}
}

// =============================================================================
// Refresh tokens
// =============================================================================

/// Digests of live refresh tokens, keyed to the user they were issued for.
#[derive(Debug, Default)]
pub struct RefreshTokenRegistry {
	live: RwLock<HashMap<String, UserId>>,
}

impl RefreshTokenRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn register(&self, token_hash: String, user_id: UserId) {
		self.live.write().await.insert(token_hash, user_id);
	}

	/// Remove a digest, returning the user it belonged to. A second call with
	/// the same digest returns `None`, so each refresh token rotates once.
	pub async fn consume(&self, token_hash: &str) -> Option<UserId> {
		self.live.write().await.remove(token_hash)
	}

	/// Remove a digest only if it belongs to `user_id`.
	pub async fn revoke(&self, token_hash: &str, user_id: UserId) -> bool {
		let mut live = self.live.write().await;
		if live.get(token_hash) == Some(&user_id) {
			live.remove(token_hash);
			true
		} else {
			false
		}
	}

	pub async fn revoke_all_for_user(&self, user_id: UserId) -> usize {
		let mut live = self.live.write().await;
		let before = live.len();
		live.retain(|_, owner| *owner != user_id);
		before - live.len()
	}

	pub async fn len(&self) -> usize {
		self.live.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.live.read().await.is_empty()
	}
}
