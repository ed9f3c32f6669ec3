use chrono::{DateTime, Utc};
use sqlx::{Sqlite, Transaction};
use uuid::Uuid;

use crate::persistence::RepositoryErrorMapper;
use wastewatch_domain::shared::{DomainError, UserId};
use wastewatch_domain::user::PointsCredit;

/// Append a ledger row and bump the user's total inside `tx`.
///
/// A credit whose `source_key` is already present is skipped; returns
/// whether points were applied.
pub(crate) async fn apply_credit(
    tx: &mut Transaction<'static, Sqlite>,
    user_id: &UserId,
    credit: &PointsCredit,
    at: DateTime<Utc>,
) -> Result<bool, DomainError> {
    if credit.amount == 0 {
        return Ok(false);
    }

    let inserted = sqlx::query(
        r#"
        INSERT INTO point_transactions (id, user_id, amount, reason, source_key, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT(source_key) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(user_id.as_str())
    .bind(credit.amount)
    .bind(&credit.reason)
    .bind(&credit.source_key)
    .bind(at)
    .execute(&mut **tx)
    .await
    .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Insert point transaction"))?;

    if inserted.rows_affected() == 0 {
        return Ok(false);
    }

    let updated = sqlx::query("UPDATE users SET total_points = total_points + ?1 WHERE id = ?2")
        .bind(credit.amount)
        .bind(user_id.as_str())
        .execute(&mut **tx)
        .await
        .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Credit user points"))?;

    if updated.rows_affected() == 0 {
        return Err(DomainError::UserNotFound(user_id.to_string()));
    }

    Ok(true)
}
