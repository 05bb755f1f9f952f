//! Postgres profile store
//!
//! sqlx-backed implementation of [`ProfileStore`]. Uniqueness of email,
//! account number and identity reference is enforced by unique indexes;
//! unique violations are classified by constraint name so callers get a
//! typed conflict, never a string to inspect.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::{AccountNumber, Balance, Currency, IdentityRef, NewProfile, UserProfile};

use super::{ProfileStore, StoreError};

/// Raw row shape shared by all reads.
type ProfileRow = (
    i64,            // id
    String,         // identity_ref
    String,         // full_name
    String,         // country
    String,         // contact_number
    String,         // email
    String,         // currency
    String,         // account_number
    Decimal,        // balance
    DateTime<Utc>,  // created_at
);

const SELECT_PROFILE: &str = r#"
    SELECT id, identity_ref, full_name, country, contact_number, email,
           currency, account_number, balance, created_at
    FROM profiles
"#;

/// Postgres-backed profile store.
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn create_profile(&self, profile: NewProfile) -> Result<UserProfile, StoreError> {
        let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO profiles
                (identity_ref, full_name, country, contact_number, email,
                 currency, account_number, balance, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
            RETURNING id, created_at
            "#,
        )
        .bind(profile.identity_ref.as_str())
        .bind(&profile.full_name)
        .bind(&profile.country)
        .bind(&profile.contact_number)
        .bind(&profile.email)
        .bind(profile.currency.code())
        .bind(profile.account_number.as_str())
        .bind(profile.balance.value())
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(UserProfile {
            id,
            identity_ref: profile.identity_ref,
            full_name: profile.full_name,
            country: profile.country,
            contact_number: profile.contact_number,
            email: profile.email,
            currency: profile.currency,
            account_number: profile.account_number,
            balance: profile.balance,
            created_at,
        })
    }

    async fn profile_by_email(&self, email: &str) -> Result<Option<UserProfile>, StoreError> {
        let row: Option<ProfileRow> =
            sqlx::query_as(&format!("{} WHERE email = $1", SELECT_PROFILE))
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(unavailable)?;

        row.map(decode_row).transpose()
    }

    async fn profile_by_id(&self, id: i64) -> Result<Option<UserProfile>, StoreError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_PROFILE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unavailable)?;

        row.map(decode_row).transpose()
    }

    async fn profile_by_identity(
        &self,
        identity_ref: &IdentityRef,
    ) -> Result<Option<UserProfile>, StoreError> {
        let row: Option<ProfileRow> =
            sqlx::query_as(&format!("{} WHERE identity_ref = $1", SELECT_PROFILE))
                .bind(identity_ref.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(unavailable)?;

        row.map(decode_row).transpose()
    }
}

fn unavailable(err: sqlx::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

/// Classify insert failures. SQLSTATE 23505 is a unique violation; the
/// constraint name tells us which invariant tripped.
fn map_write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            return match db_err.constraint() {
                Some("profiles_account_number_key") => StoreError::DuplicateAccountNumber,
                Some("profiles_email_key") => StoreError::DuplicateEmail,
                Some("profiles_identity_ref_key") => StoreError::DuplicateIdentityRef,
                _ => StoreError::Unavailable(err.to_string()),
            };
        }
    }
    StoreError::Unavailable(err.to_string())
}

/// Rebuild domain types from a raw row, rejecting values that should never
/// have been persisted.
fn decode_row(row: ProfileRow) -> Result<UserProfile, StoreError> {
    let (
        id,
        identity_ref,
        full_name,
        country,
        contact_number,
        email,
        currency,
        account_number,
        balance,
        created_at,
    ) = row;

    let currency: Currency = currency
        .parse()
        .map_err(|e| StoreError::Corrupt(format!("profile {}: {}", id, e)))?;
    let account_number = AccountNumber::parse(&account_number)
        .map_err(|e| StoreError::Corrupt(format!("profile {}: {}", id, e)))?;
    let balance =
        Balance::new(balance).map_err(|e| StoreError::Corrupt(format!("profile {}: {}", id, e)))?;

    Ok(UserProfile {
        id,
        identity_ref: IdentityRef(identity_ref),
        full_name,
        country,
        contact_number,
        email,
        currency,
        account_number,
        balance,
        created_at,
    })
}
