//! Bank channel ledgers. Every mutation locks the channel row, moves one
//! counter, recomputes the balance from the full formula and appends a log
//! row, all inside one database transaction.

use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::prelude::*;
use diesel::PgConnection;
use tracing::info;

use crate::amount;
use crate::database::{idgen, models};
use crate::error::{Entity, LedgerError};
use crate::lifecycle::LedgerEntryType;

pub struct NewChannel {
    pub name: String,
    pub owner_name: String,
    pub starting_balance: BigDecimal,
    pub limits: models::BankLimits,
}

pub fn create_channel(conn: &mut PgConnection, req: NewChannel, actor: &str) -> Result<models::BankChannel, LedgerError> {
    if req.name.trim().is_empty() {
        return Err(LedgerError::InvalidRequest("bank channel name is empty".to_string()));
    }
    amount::ensure_non_negative(&req.starting_balance)?;
    let record = models::NewBankChannel {
        id: idgen::next(),
        name: req.name,
        owner_name: req.owner_name,
        is_active: true,
        starting_balance: req.starting_balance.clone(),
        current_balance: req.starting_balance,
        total_deposits: amount::zero(),
        total_withdrawals: amount::zero(),
        total_cash_in: amount::zero(),
        total_cash_out: amount::zero(),
        daily_deposit_limit: req.limits.daily_deposit_limit,
        daily_withdraw_limit: req.limits.daily_withdraw_limit,
        monthly_deposit_limit: req.limits.monthly_deposit_limit,
        monthly_withdraw_limit: req.limits.monthly_withdraw_limit,
        created_at: Utc::now().naive_utc(),
    };
    let channel = diesel::insert_into(crate::schema::bank_channel::table)
        .values(&record)
        .get_result::<models::BankChannel>(conn)?;
    info!(bank_id = channel.id, name = %channel.name, actor, "bank channel created");
    Ok(channel)
}

pub fn load_channel(conn: &mut PgConnection, channel_id: i64) -> Result<models::BankChannel, LedgerError> {
    use crate::schema::bank_channel::dsl::*;
    bank_channel
        .find(channel_id)
        .first::<models::BankChannel>(conn)
        .optional()?
        .ok_or_else(|| LedgerError::not_found(Entity::BankChannel, channel_id))
}

pub fn list_channels(conn: &mut PgConnection) -> Result<Vec<models::BankChannel>, LedgerError> {
    use crate::schema::bank_channel::dsl::*;
    Ok(bank_channel.order(created_at.asc()).load::<models::BankChannel>(conn)?)
}

/// Applies one ledger entry to a channel under a row lock.
///
/// `tx_ref` links the log row to the money transaction that caused it.
pub fn apply_entry(
    conn: &mut PgConnection,
    channel_id: i64,
    entry: LedgerEntryType,
    delta: &BigDecimal,
    actor: &str,
    note: Option<&str>,
    tx_ref: Option<i64>,
) -> Result<models::BankChannel, LedgerError> {
    match entry {
        LedgerEntryType::AdjustStartingBalance => amount::ensure_non_negative(delta)?,
        _ => amount::ensure_positive(delta)?,
    }

    conn.transaction::<_, LedgerError, _>(|conn| {
        let channel = {
            use crate::schema::bank_channel::dsl::*;
            bank_channel
                .find(channel_id)
                .for_update()
                .first::<models::BankChannel>(conn)
                .optional()?
                .ok_or_else(|| LedgerError::not_found(Entity::BankChannel, channel_id))?
        };
        let next = channel.counters().apply(entry, delta)?;
        let next_balance = next.current_balance();

        let updated = {
            use crate::schema::bank_channel::dsl::*;
            diesel::update(bank_channel.find(channel_id))
                .set((
                    starting_balance.eq(next.starting_balance),
                    total_deposits.eq(next.total_deposits),
                    total_withdrawals.eq(next.total_withdrawals),
                    total_cash_in.eq(next.total_cash_in),
                    total_cash_out.eq(next.total_cash_out),
                    current_balance.eq(next_balance.clone()),
                ))
                .get_result::<models::BankChannel>(conn)?
        };

        let log = models::NewBankTransactionLog {
            id: idgen::next(),
            bank_id: channel_id,
            transaction_type: entry.as_str().to_string(),
            amount: delta.clone(),
            last_balance: channel.current_balance.clone(),
            current_balance: next_balance,
            process_by: actor.to_string(),
            remark: note.map(str::to_string),
            transaction_id: tx_ref,
            created_at: Utc::now().naive_utc(),
        };
        diesel::insert_into(crate::schema::bank_transaction_log::table)
            .values(&log)
            .execute(conn)?;

        info!(
            bank_id = channel_id,
            %entry,
            amount = %delta,
            last_balance = %channel.current_balance,
            current_balance = %updated.current_balance,
            actor,
            "bank ledger updated"
        );
        Ok(updated)
    })
}

pub fn cash_in(
    conn: &mut PgConnection,
    channel_id: i64,
    delta: &BigDecimal,
    actor: &str,
    note: Option<&str>,
) -> Result<models::BankChannel, LedgerError> {
    apply_entry(conn, channel_id, LedgerEntryType::CashIn, delta, actor, note, None)
}

pub fn cash_out(
    conn: &mut PgConnection,
    channel_id: i64,
    delta: &BigDecimal,
    actor: &str,
    note: Option<&str>,
) -> Result<models::BankChannel, LedgerError> {
    apply_entry(conn, channel_id, LedgerEntryType::CashOut, delta, actor, note, None)
}

pub fn set_starting_balance(
    conn: &mut PgConnection,
    channel_id: i64,
    value: &BigDecimal,
    actor: &str,
    note: Option<&str>,
) -> Result<models::BankChannel, LedgerError> {
    apply_entry(conn, channel_id, LedgerEntryType::AdjustStartingBalance, value, actor, note, None)
}

// soft disable; channels referenced by logs are never deleted
pub fn set_status(
    conn: &mut PgConnection,
    channel_id: i64,
    active: bool,
    actor: &str,
) -> Result<models::BankChannel, LedgerError> {
    use crate::schema::bank_channel::dsl::*;
    let channel = diesel::update(bank_channel.find(channel_id))
        .set(is_active.eq(active))
        .get_result::<models::BankChannel>(conn)
        .optional()?
        .ok_or_else(|| LedgerError::not_found(Entity::BankChannel, channel_id))?;
    info!(bank_id = channel_id, active, actor, "bank channel status changed");
    Ok(channel)
}

pub fn set_limits(
    conn: &mut PgConnection,
    channel_id: i64,
    limits: &models::BankLimits,
    actor: &str,
) -> Result<models::BankChannel, LedgerError> {
    use crate::schema::bank_channel::dsl::*;
    let channel = diesel::update(bank_channel.find(channel_id))
        .set(limits)
        .get_result::<models::BankChannel>(conn)
        .optional()?
        .ok_or_else(|| LedgerError::not_found(Entity::BankChannel, channel_id))?;
    info!(bank_id = channel_id, actor, "bank channel limits changed");
    Ok(channel)
}

pub fn list_logs(
    conn: &mut PgConnection,
    channel_id: i64,
    limit: i64,
) -> Result<Vec<models::BankTransactionLog>, LedgerError> {
    use crate::schema::bank_transaction_log::dsl::*;
    Ok(bank_transaction_log
        .filter(bank_id.eq(channel_id))
        .order((created_at.desc(), id.desc()))
        .limit(limit)
        .load::<models::BankTransactionLog>(conn)?)
}
