//! The kiosk balance pool: one shared float backing third-party game kiosk
//! settlements. Balance changes are single conditional updates so concurrent
//! approvals can never lose each other's effect.

use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::prelude::*;
use diesel::PgConnection;
use tracing::{info, warn};

use crate::amount;
use crate::database::{idgen, models};
use crate::error::{BalanceSource, LedgerError};
use crate::lifecycle::KioskOperation;

const POOL_ID: i32 = 1;

// creates the singleton pool record, inactive and empty; on conflict does nothing
fn init_pool(conn: &mut PgConnection) -> Result<bool, diesel::result::Error> {
    use crate::schema::kiosk_pool::dsl::*;
    diesel::insert_into(kiosk_pool)
        .values((
            id.eq(POOL_ID),
            balance.eq(amount::zero()),
            status.eq(false),
            min_balance.eq(amount::zero()),
            updated_at.eq(Utc::now().naive_utc()),
        ))
        .on_conflict(id)
        .do_nothing()
        .execute(conn)
        .map(|res| res > 0)
}

/// Loads the pool, creating it on first access.
pub fn load_pool(conn: &mut PgConnection) -> Result<models::KioskPool, LedgerError> {
    if init_pool(conn)? {
        info!("kiosk pool initialized");
    }
    use crate::schema::kiosk_pool::dsl::*;
    Ok(kiosk_pool.find(POOL_ID).first::<models::KioskPool>(conn)?)
}

/// Adds to or subtracts from the pool and appends the matching log row.
///
/// Unlike [`load_pool`] this never creates the pool: adjusting a pool that
/// was never initialized is an external dependency failure.
pub fn adjust(
    conn: &mut PgConnection,
    operation: KioskOperation,
    delta: &BigDecimal,
    actor: &str,
    note: Option<&str>,
) -> Result<models::KioskPool, LedgerError> {
    amount::ensure_positive(delta)?;

    conn.transaction::<_, LedgerError, _>(|conn| {
        let now = Utc::now().naive_utc();
        let updated = {
            use crate::schema::kiosk_pool::dsl::*;
            match operation {
                KioskOperation::Add => diesel::update(kiosk_pool.find(POOL_ID))
                    .set((balance.eq(balance + delta.clone()), updated_at.eq(now)))
                    .get_result::<models::KioskPool>(conn)
                    .optional()?,
                // the balance check and the decrement are one statement
                KioskOperation::Subtract => diesel::update(kiosk_pool.find(POOL_ID).filter(balance.ge(delta.clone())))
                    .set((balance.eq(balance - delta.clone()), updated_at.eq(now)))
                    .get_result::<models::KioskPool>(conn)
                    .optional()?,
            }
        };
        let pool = match updated {
            Some(pool) => pool,
            None => {
                let current = {
                    use crate::schema::kiosk_pool::dsl::*;
                    kiosk_pool.find(POOL_ID).first::<models::KioskPool>(conn).optional()?
                };
                return Err(match current {
                    Some(pool) => LedgerError::InsufficientBalance {
                        balance: BalanceSource::KioskPool,
                        available: pool.balance.to_string(),
                        required: delta.to_string(),
                    },
                    None => LedgerError::ExternalDependency("kiosk pool is not initialized".to_string()),
                });
            }
        };

        let previous = match operation {
            KioskOperation::Add => &pool.balance - delta,
            KioskOperation::Subtract => &pool.balance + delta,
        };
        let entry = models::NewKioskTransactionLog {
            id: idgen::next(),
            operation: operation.as_str().to_string(),
            amount: delta.clone(),
            previous_balance: previous.clone(),
            new_balance: pool.balance.clone(),
            process_by: actor.to_string(),
            remark: note.map(str::to_string),
            created_at: now,
        };
        diesel::insert_into(crate::schema::kiosk_transaction_log::table)
            .values(&entry)
            .execute(conn)?;

        if pool.balance < pool.min_balance {
            warn!(
                balance = %pool.balance,
                min_balance = %pool.min_balance,
                "kiosk pool balance is below the alert threshold"
            );
        }
        info!(%operation, amount = %delta, %previous, current = %pool.balance, actor, "kiosk pool adjusted");
        Ok(pool)
    })
}

pub fn set_status(conn: &mut PgConnection, active: bool, actor: &str) -> Result<models::KioskPool, LedgerError> {
    init_pool(conn)?;
    use crate::schema::kiosk_pool::dsl::*;
    let pool = diesel::update(kiosk_pool.find(POOL_ID))
        .set((status.eq(active), updated_at.eq(Utc::now().naive_utc())))
        .get_result::<models::KioskPool>(conn)?;
    info!(active, actor, "kiosk pool status changed");
    Ok(pool)
}

// alert threshold only, subtract does not enforce it
pub fn set_min_balance(
    conn: &mut PgConnection,
    threshold: &BigDecimal,
    actor: &str,
) -> Result<models::KioskPool, LedgerError> {
    init_pool(conn)?;
    use crate::schema::kiosk_pool::dsl::*;
    let pool = diesel::update(kiosk_pool.find(POOL_ID))
        .set((min_balance.eq(threshold.clone()), updated_at.eq(Utc::now().naive_utc())))
        .get_result::<models::KioskPool>(conn)?;
    info!(min_balance = %pool.min_balance, actor, "kiosk pool threshold changed");
    Ok(pool)
}

pub fn list_logs(conn: &mut PgConnection, limit: i64) -> Result<Vec<models::KioskTransactionLog>, LedgerError> {
    use crate::schema::kiosk_transaction_log::dsl::*;
    Ok(kiosk_transaction_log
        .order((created_at.desc(), id.desc()))
        .limit(limit)
        .load::<models::KioskTransactionLog>(conn)?)
}
