//! The deposit / withdraw / bonus lifecycle.
//!
//! Every operation runs inside one database transaction. The conditional
//! status flip is the first write, so of two concurrent requests for the same
//! transaction only one can get past it; any later failure rolls back the
//! flip together with all balance effects.

use bigdecimal::BigDecimal;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error};
use diesel::PgConnection;
use tracing::{debug, info, warn};

use crate::amount;
use crate::database::{banks, idgen, kiosk, models, queries};
use crate::error::{BalanceSource, Entity, LedgerError};
use crate::lifecycle::{format_process_time, LifecycleAction, TransactionKind, TransactionStatus};

pub struct Submission {
    pub kind: TransactionKind,
    pub transaction_ref: String,
    pub username: String,
    pub amount: BigDecimal,
    pub bank_id: Option<i64>,
    pub agent_commission_report_id: Option<i64>,
    pub remark: Option<String>,
}

// creates user record with empty wallet, on conflict does nothing
pub fn init_user(conn: &mut PgConnection, req_username: &str, req_vip_level: &str) -> Result<models::User, LedgerError> {
    if req_username.trim().is_empty() {
        return Err(LedgerError::InvalidRequest("username is empty".to_string()));
    }
    {
        use crate::schema::users::dsl::*;
        diesel::insert_into(users)
            .values((
                username.eq(req_username),
                wallet.eq(amount::zero()),
                total_deposit.eq(amount::zero()),
                total_withdraw.eq(amount::zero()),
                total_bonus.eq(amount::zero()),
                total_turnover.eq(amount::zero()),
                vip_level.eq(req_vip_level),
                created_at.eq(Utc::now().naive_utc()),
            ))
            .on_conflict(username)
            .do_nothing()
            .execute(conn)?;
    }
    queries::load_user(conn, req_username)
}

pub fn create_admin(conn: &mut PgConnection, req_username: &str) -> Result<models::Admin, LedgerError> {
    if req_username.trim().is_empty() {
        return Err(LedgerError::InvalidRequest("username is empty".to_string()));
    }
    use crate::schema::admin::dsl::*;
    let created = diesel::insert_into(admin)
        .values((
            id.eq(idgen::next()),
            username.eq(req_username),
            processed_count.eq(0i64),
            total_processing_seconds.eq(0i64),
            total_reverted_deposits.eq(0i64),
            total_reverted_withdrawals.eq(0i64),
            total_reverted_bonuses.eq(0i64),
        ))
        .get_result::<models::Admin>(conn)
        .map_err(|e| match e {
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                LedgerError::InvalidRequest(format!("admin {req_username} already exists"))
            }
            e => e.into(),
        })?;
    info!(admin_id = created.id, username = %created.username, "admin created");
    Ok(created)
}

/// Files a new pending money transaction and its wallet log mirror.
///
/// `transaction_ref` is the caller's idempotency key: submitting the same
/// reference twice returns the transaction created the first time.
pub fn submit(conn: &mut PgConnection, req: Submission) -> Result<models::MoneyTransaction, LedgerError> {
    amount::ensure_positive(&req.amount)?;
    if req.transaction_ref.trim().is_empty() {
        return Err(LedgerError::InvalidRequest("transactionId is empty".to_string()));
    }
    match (req.kind.uses_bank_channel(), req.bank_id) {
        (true, None) => return Err(LedgerError::InvalidRequest(format!("{} requires a bank channel", req.kind))),
        (false, Some(_)) => return Err(LedgerError::InvalidRequest(format!("{} takes no bank channel", req.kind))),
        _ => {}
    }
    if req.kind != TransactionKind::Bonus && req.agent_commission_report_id.is_some() {
        return Err(LedgerError::InvalidRequest(
            "only bonuses can reference an agent commission report".to_string(),
        ));
    }

    conn.transaction::<_, LedgerError, _>(|conn| {
        // idempotency check
        let existing = {
            use crate::schema::money_transaction::dsl::*;
            money_transaction
                .filter(transaction_id.eq(&req.transaction_ref))
                .first::<models::MoneyTransaction>(conn)
                .optional()?
        };
        if let Some(existing) = existing {
            if existing.kind()? == req.kind && existing.username == req.username && existing.amount == req.amount {
                return Ok(existing);
            }
            return Err(LedgerError::InvalidRequest(format!(
                "transactionId {} is already used by another transaction",
                req.transaction_ref
            )));
        }

        queries::load_user(conn, &req.username)?;
        if let Some(bank) = req.bank_id {
            let channel = banks::load_channel(conn, bank)?;
            if !channel.is_active {
                return Err(LedgerError::InvalidRequest(format!("bank channel {bank} is disabled")));
            }
        }
        if let Some(report) = req.agent_commission_report_id {
            queries::load_commission_report(conn, report)?;
        }

        let now = Utc::now().naive_utc();
        let record = models::NewMoneyTransaction {
            id: idgen::next(),
            kind: req.kind.as_str().to_string(),
            transaction_id: req.transaction_ref.clone(),
            username: req.username.clone(),
            amount: req.amount.clone(),
            status: TransactionStatus::Pending.as_str().to_string(),
            reverted: false,
            bank_id: req.bank_id,
            agent_commission_report_id: req.agent_commission_report_id,
            remark: req.remark.clone(),
            created_at: now,
        };
        let created = diesel::insert_into(crate::schema::money_transaction::table)
            .values(&record)
            .get_result::<models::MoneyTransaction>(conn)
            .map_err(|e| match e {
                Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => LedgerError::InvalidRequest(format!(
                    "transactionId {} is already used by another transaction",
                    req.transaction_ref
                )),
                e => e.into(),
            })?;

        let mirror = models::NewUserWalletLog {
            id: idgen::next(),
            transaction_id: created.transaction_id.clone(),
            username: created.username.clone(),
            transaction_type: created.kind.clone(),
            amount: created.amount.clone(),
            status: created.status.clone(),
            created_at: now,
            updated_at: now,
        };
        diesel::insert_into(crate::schema::user_wallet_log::table)
            .values(&mirror)
            .execute(conn)?;

        info!(
            id = created.id,
            kind = %req.kind,
            username = %created.username,
            amount = %created.amount,
            "money transaction submitted"
        );
        Ok(created)
    })
}

pub fn approve(
    conn: &mut PgConnection,
    req_kind: TransactionKind,
    req_id: i64,
    req_admin_id: i64,
) -> Result<models::MoneyTransaction, LedgerError> {
    conn.transaction::<_, LedgerError, _>(|conn| {
        let action = LifecycleAction::Approve;
        let tx = flip_status(conn, req_kind, req_id, action)?;
        let actor = queries::load_admin(conn, req_admin_id)?;
        let user = queries::lock_user(conn, &tx.username)?;
        let delta = tx.amount.clone();
        let now = Utc::now().naive_utc();

        settle_kiosk_pool(conn, req_kind, action, &tx, &actor.username)?;

        {
            use crate::schema::users::dsl::*;
            let target = users.find(&tx.username);
            match req_kind {
                TransactionKind::Deposit => diesel::update(target)
                    .set((
                        wallet.eq(wallet + delta.clone()),
                        total_deposit.eq(total_deposit + delta.clone()),
                        first_deposit_date.eq(user.first_deposit_date.or(Some(now))),
                    ))
                    .execute(conn)?,
                TransactionKind::Bonus => diesel::update(target)
                    .set((wallet.eq(wallet + delta.clone()), total_bonus.eq(total_bonus + delta.clone())))
                    .execute(conn)?,
                // the wallet was debited when the withdraw was filed
                TransactionKind::Withdraw => diesel::update(target)
                    .set(total_withdraw.eq(total_withdraw + delta.clone()))
                    .execute(conn)?,
            };
        }

        settle_bank_channel(conn, req_kind, action, &tx, &actor.username)?;

        let elapsed = now - tx.created_at;
        let stamped = {
            use crate::schema::money_transaction::dsl::*;
            diesel::update(money_transaction.find(req_id))
                .set((
                    process_by.eq(Some(actor.username.clone())),
                    process_time.eq(Some(format_process_time(elapsed))),
                    processed_at.eq(Some(now)),
                ))
                .get_result::<models::MoneyTransaction>(conn)?
        };
        mirror_status(conn, &stamped, TransactionStatus::Approved, now)?;
        record_processing_time(conn, actor.id, elapsed.num_seconds().max(0))?;

        info!(
            id = req_id,
            kind = %req_kind,
            username = %stamped.username,
            amount = %stamped.amount,
            admin = %actor.username,
            process_time = stamped.process_time.as_deref().unwrap_or_default(),
            "money transaction approved"
        );
        Ok(stamped)
    })
}

pub fn reject(
    conn: &mut PgConnection,
    req_kind: TransactionKind,
    req_id: i64,
    req_admin_id: i64,
    req_remark: Option<&str>,
) -> Result<models::MoneyTransaction, LedgerError> {
    conn.transaction::<_, LedgerError, _>(|conn| {
        let tx = flip_status(conn, req_kind, req_id, LifecycleAction::Reject)?;
        let actor = queries::load_admin(conn, req_admin_id)?;
        let now = Utc::now().naive_utc();
        let elapsed = now - tx.created_at;

        let stamped = {
            use crate::schema::money_transaction::dsl::*;
            diesel::update(money_transaction.find(req_id))
                .set((
                    process_by.eq(Some(actor.username.clone())),
                    process_time.eq(Some(format_process_time(elapsed))),
                    processed_at.eq(Some(now)),
                    remark.eq(req_remark.map(str::to_string).or(tx.remark.clone())),
                ))
                .get_result::<models::MoneyTransaction>(conn)?
        };
        mirror_status(conn, &stamped, TransactionStatus::Rejected, now)?;
        record_processing_time(conn, actor.id, elapsed.num_seconds().max(0))?;

        info!(id = req_id, kind = %req_kind, admin = %actor.username, "money transaction rejected");
        Ok(stamped)
    })
}

pub fn revert(
    conn: &mut PgConnection,
    req_kind: TransactionKind,
    req_id: i64,
    req_admin_id: i64,
) -> Result<models::MoneyTransaction, LedgerError> {
    conn.transaction::<_, LedgerError, _>(|conn| {
        let action = LifecycleAction::Revert;
        let tx = flip_status(conn, req_kind, req_id, action)?;
        let actor = queries::load_admin(conn, req_admin_id)?;
        let user = queries::lock_user(conn, &tx.username)?;
        let delta = tx.amount.clone();
        let now = Utc::now().naive_utc();

        if req_kind.revert_needs_wallet_floor() && user.wallet < delta {
            return Err(LedgerError::InsufficientBalance {
                balance: BalanceSource::Wallet,
                available: user.wallet.to_string(),
                required: delta.to_string(),
            });
        }

        settle_kiosk_pool(conn, req_kind, action, &tx, &actor.username)?;

        {
            use crate::schema::users::dsl::*;
            let target = users.find(&tx.username);
            match req_kind {
                TransactionKind::Deposit => diesel::update(target)
                    .set((
                        wallet.eq(wallet - delta.clone()),
                        total_deposit.eq(total_deposit - delta.clone()),
                    ))
                    .execute(conn)?,
                TransactionKind::Bonus => diesel::update(target)
                    .set((wallet.eq(wallet - delta.clone()), total_bonus.eq(total_bonus - delta.clone())))
                    .execute(conn)?,
                TransactionKind::Withdraw => diesel::update(target)
                    .set((
                        wallet.eq(wallet + delta.clone()),
                        total_withdraw.eq(total_withdraw - delta.clone()),
                    ))
                    .execute(conn)?,
            };
        }

        settle_bank_channel(conn, req_kind, action, &tx, &actor.username)?;

        let stamped = {
            use crate::schema::money_transaction::dsl::*;
            diesel::update(money_transaction.find(req_id))
                .set((
                    reverted_process_by.eq(Some(actor.username.clone())),
                    reverted_at.eq(Some(now)),
                ))
                .get_result::<models::MoneyTransaction>(conn)?
        };
        mirror_status(conn, &stamped, TransactionStatus::Reverted, now)?;

        {
            use crate::schema::admin::dsl::*;
            let target = admin.find(actor.id);
            match req_kind {
                TransactionKind::Deposit => diesel::update(target)
                    .set(total_reverted_deposits.eq(total_reverted_deposits + 1i64))
                    .execute(conn)?,
                TransactionKind::Withdraw => diesel::update(target)
                    .set(total_reverted_withdrawals.eq(total_reverted_withdrawals + 1i64))
                    .execute(conn)?,
                TransactionKind::Bonus => diesel::update(target)
                    .set(total_reverted_bonuses.eq(total_reverted_bonuses + 1i64))
                    .execute(conn)?,
            };
        }

        if let (TransactionKind::Bonus, Some(report)) = (req_kind, stamped.agent_commission_report_id) {
            use crate::schema::agent_commission_report::dsl::*;
            diesel::update(agent_commission_report.find(report))
                .set(status.eq("cancel"))
                .execute(conn)?;
            info!(id = req_id, report, "agent commission report cancelled");
        }

        info!(
            id = req_id,
            kind = %req_kind,
            username = %stamped.username,
            amount = %stamped.amount,
            admin = %actor.username,
            "money transaction reverted"
        );
        Ok(stamped)
    })
}

// conditional status update: only one caller can move a transaction out of
// the state `action` requires
fn flip_status(
    conn: &mut PgConnection,
    req_kind: TransactionKind,
    req_id: i64,
    action: LifecycleAction,
) -> Result<models::MoneyTransaction, LedgerError> {
    let from = TransactionStatus::required_for(action);
    let to = from.transition(action)?;

    let flipped = {
        use crate::schema::money_transaction::dsl::*;
        let target = money_transaction
            .filter(id.eq(req_id))
            .filter(kind.eq(req_kind.as_str()))
            .filter(status.eq(from.as_str()));
        match action {
            LifecycleAction::Revert => diesel::update(target.filter(reverted.eq(false)))
                .set((status.eq(to.as_str()), reverted.eq(true)))
                .get_result::<models::MoneyTransaction>(conn)
                .optional()?,
            _ => diesel::update(target)
                .set(status.eq(to.as_str()))
                .get_result::<models::MoneyTransaction>(conn)
                .optional()?,
        }
    };
    if let Some(tx) = flipped {
        return Ok(tx);
    }

    let current = queries::load_transaction(conn, req_id)?;
    if current.kind()? != req_kind {
        return Err(LedgerError::not_found(Entity::Transaction, req_id));
    }
    Err(LedgerError::InvalidState {
        current: current.status()?,
        action: action.as_str(),
    })
}

// the pool silently does not participate while it is inactive
fn settle_kiosk_pool(
    conn: &mut PgConnection,
    req_kind: TransactionKind,
    action: LifecycleAction,
    tx: &models::MoneyTransaction,
    actor: &str,
) -> Result<(), LedgerError> {
    let Some(operation) = req_kind.kiosk_operation(action) else {
        return Ok(());
    };
    let pool = kiosk::load_pool(conn)?;
    if !pool.status {
        debug!(id = tx.id, "kiosk pool inactive, skipping adjustment");
        return Ok(());
    }
    let note = format!("{} {} {}", action, req_kind, tx.transaction_id);
    kiosk::adjust(conn, operation, &tx.amount, actor, Some(&note))?;
    Ok(())
}

fn settle_bank_channel(
    conn: &mut PgConnection,
    req_kind: TransactionKind,
    action: LifecycleAction,
    tx: &models::MoneyTransaction,
    actor: &str,
) -> Result<(), LedgerError> {
    let Some(entry) = req_kind.ledger_entry(action) else {
        return Ok(());
    };
    let bank = tx
        .bank_id
        .ok_or_else(|| LedgerError::not_found(Entity::BankChannel, format!("for transaction {}", tx.id)))?;
    banks::apply_entry(conn, bank, entry, &tx.amount, actor, tx.remark.as_deref(), Some(tx.id))?;
    Ok(())
}

// keeps the wallet log in step with its transaction; a missing mirror row is
// recreated instead of being skipped
fn mirror_status(
    conn: &mut PgConnection,
    tx: &models::MoneyTransaction,
    next: TransactionStatus,
    now: NaiveDateTime,
) -> Result<(), LedgerError> {
    let updated = {
        use crate::schema::user_wallet_log::dsl::*;
        diesel::update(user_wallet_log.filter(transaction_id.eq(&tx.transaction_id)))
            .set((status.eq(next.as_str()), updated_at.eq(now)))
            .execute(conn)?
    };
    if updated == 0 {
        warn!(id = tx.id, transaction_id = %tx.transaction_id, "wallet log mirror missing, recreating");
        let mirror = models::NewUserWalletLog {
            id: idgen::next(),
            transaction_id: tx.transaction_id.clone(),
            username: tx.username.clone(),
            transaction_type: tx.kind.clone(),
            amount: tx.amount.clone(),
            status: next.as_str().to_string(),
            created_at: tx.created_at,
            updated_at: now,
        };
        diesel::insert_into(crate::schema::user_wallet_log::table)
            .values(&mirror)
            .execute(conn)?;
    }
    Ok(())
}

fn record_processing_time(conn: &mut PgConnection, req_admin_id: i64, seconds: i64) -> Result<(), LedgerError> {
    use crate::schema::admin::dsl::*;
    diesel::update(admin.find(req_admin_id))
        .set((
            processed_count.eq(processed_count + 1i64),
            total_processing_seconds.eq(total_processing_seconds + seconds),
        ))
        .execute(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::banks::tests::new_channel;
    use crate::database::connect::test_pool;
    use crate::database::kiosk::tests::reset_pool;
    use std::str::FromStr;
    use std::sync::{Arc, Barrier};

    struct Fixture {
        admin: models::Admin,
        username: String,
        bank: models::BankChannel,
    }

    // fresh admin, user and bank channel; the kiosk pool is active only when
    // a starting balance is given
    fn fixture(conn: &mut PgConnection, bank_start: i64, pool_start: Option<i64>) -> Result<Fixture, LedgerError> {
        let suffix = idgen::next();
        let admin = create_admin(conn, &format!("admin-{suffix}"))?;
        let user = init_user(conn, &format!("user-{suffix}"), "member")?;
        let bank = new_channel(conn, bank_start)?;
        match pool_start {
            Some(start) => reset_pool(conn, start, true)?,
            None => reset_pool(conn, 0, false)?,
        }
        Ok(Fixture {
            admin,
            username: user.username,
            bank,
        })
    }

    fn wallet_log(conn: &mut PgConnection, req_ref: &str) -> Result<Option<models::UserWalletLog>, LedgerError> {
        use crate::schema::user_wallet_log::dsl::*;
        Ok(user_wallet_log
            .filter(transaction_id.eq(req_ref))
            .first::<models::UserWalletLog>(conn)
            .optional()?)
    }

    impl Fixture {
        fn file(
            &self,
            conn: &mut PgConnection,
            kind: TransactionKind,
            value: i64,
        ) -> Result<models::MoneyTransaction, LedgerError> {
            submit(
                conn,
                Submission {
                    kind,
                    transaction_ref: format!("ref-{}", idgen::next()),
                    username: self.username.clone(),
                    amount: BigDecimal::from(value),
                    bank_id: kind.uses_bank_channel().then_some(self.bank.id),
                    agent_commission_report_id: None,
                    remark: None,
                },
            )
        }

        fn user(&self, conn: &mut PgConnection) -> models::User {
            queries::load_user(conn, &self.username).unwrap()
        }

        fn bank_balance(&self, conn: &mut PgConnection) -> BigDecimal {
            banks::load_channel(conn, self.bank.id).unwrap().current_balance
        }

        fn set_wallet(&self, conn: &mut PgConnection, value: i64) {
            use crate::schema::users::dsl::*;
            diesel::update(users.find(&self.username))
                .set(wallet.eq(BigDecimal::from(value)))
                .execute(conn)
                .unwrap();
        }
    }

    #[actix_web::test]
    async fn test_deposit_approve_then_revert() {
        let Some(db) = test_pool() else { return };
        db.get().unwrap().test_transaction::<_, LedgerError, _>(|conn| {
            let fx = fixture(conn, 1000, None)?;
            let tx = fx.file(conn, TransactionKind::Deposit, 200)?;
            assert_eq!(tx.status, "pending");

            let approved = approve(conn, TransactionKind::Deposit, tx.id, fx.admin.id)?;
            assert_eq!(approved.status, "approved");
            assert_eq!(approved.process_by.as_deref(), Some(fx.admin.username.as_str()));
            assert_eq!(approved.process_time.as_ref().map(|t| t.len()), Some(8));
            assert_eq!(fx.bank_balance(conn), BigDecimal::from(1200));
            let user = fx.user(conn);
            assert_eq!(user.wallet, BigDecimal::from(200));
            assert_eq!(user.total_deposit, BigDecimal::from(200));
            assert!(user.first_deposit_date.is_some());

            let reverted = revert(conn, TransactionKind::Deposit, tx.id, fx.admin.id)?;
            assert_eq!(reverted.status, "reverted");
            assert!(reverted.reverted);
            assert_eq!(reverted.reverted_process_by.as_deref(), Some(fx.admin.username.as_str()));
            assert_eq!(fx.bank_balance(conn), BigDecimal::from(1000));
            assert_eq!(fx.user(conn).wallet, BigDecimal::from(0));

            let err = revert(conn, TransactionKind::Deposit, tx.id, fx.admin.id).unwrap_err();
            assert!(matches!(
                err,
                LedgerError::InvalidState {
                    current: TransactionStatus::Reverted,
                    ..
                }
            ));
            assert_eq!(fx.bank_balance(conn), BigDecimal::from(1000));
            assert_eq!(fx.user(conn).wallet, BigDecimal::from(0));

            let admin = queries::load_admin(conn, fx.admin.id)?;
            assert_eq!(admin.processed_count, 1);
            assert_eq!(admin.total_reverted_deposits, 1);
            Ok(())
        });
    }

    #[actix_web::test]
    async fn test_pool_shortfall_aborts_whole_approval() {
        let Some(db) = test_pool() else { return };
        db.get().unwrap().test_transaction::<_, LedgerError, _>(|conn| {
            let fx = fixture(conn, 5000, Some(500))?;

            let withdraw = fx.file(conn, TransactionKind::Withdraw, 600)?;
            approve(conn, TransactionKind::Withdraw, withdraw.id, fx.admin.id)?;
            assert_eq!(kiosk::load_pool(conn)?.balance, BigDecimal::from(1100));
            assert_eq!(fx.user(conn).total_withdraw, BigDecimal::from(600));
            assert_eq!(fx.bank_balance(conn), BigDecimal::from(4400));

            let deposit = fx.file(conn, TransactionKind::Deposit, 1200)?;
            let err = approve(conn, TransactionKind::Deposit, deposit.id, fx.admin.id).unwrap_err();
            assert!(matches!(
                err,
                LedgerError::InsufficientBalance {
                    balance: BalanceSource::KioskPool,
                    ..
                }
            ));
            assert_eq!(queries::load_transaction(conn, deposit.id)?.status, "pending");
            assert_eq!(kiosk::load_pool(conn)?.balance, BigDecimal::from(1100));
            assert_eq!(fx.user(conn).wallet, BigDecimal::from(0));
            assert_eq!(fx.bank_balance(conn), BigDecimal::from(4400));
            let mirror = wallet_log(conn, &deposit.transaction_id)?.unwrap();
            assert_eq!(mirror.status, "pending");
            Ok(())
        });
    }

    #[actix_web::test]
    async fn test_illegal_transitions_change_nothing() {
        let Some(db) = test_pool() else { return };
        db.get().unwrap().test_transaction::<_, LedgerError, _>(|conn| {
            let fx = fixture(conn, 1000, None)?;

            let rejected = fx.file(conn, TransactionKind::Deposit, 300)?;
            let err = revert(conn, TransactionKind::Deposit, rejected.id, fx.admin.id).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidState { current: TransactionStatus::Pending, .. }));

            let done = reject(conn, TransactionKind::Deposit, rejected.id, fx.admin.id, Some("blurry receipt"))?;
            assert_eq!(done.status, "rejected");
            assert_eq!(done.remark.as_deref(), Some("blurry receipt"));
            assert!(done.process_time.is_some());
            for result in [
                approve(conn, TransactionKind::Deposit, rejected.id, fx.admin.id),
                reject(conn, TransactionKind::Deposit, rejected.id, fx.admin.id, None),
                revert(conn, TransactionKind::Deposit, rejected.id, fx.admin.id),
            ] {
                assert!(matches!(
                    result,
                    Err(LedgerError::InvalidState {
                        current: TransactionStatus::Rejected,
                        ..
                    })
                ));
            }

            let approved = fx.file(conn, TransactionKind::Deposit, 100)?;
            approve(conn, TransactionKind::Deposit, approved.id, fx.admin.id)?;
            for result in [
                approve(conn, TransactionKind::Deposit, approved.id, fx.admin.id),
                reject(conn, TransactionKind::Deposit, approved.id, fx.admin.id, None),
            ] {
                assert!(matches!(
                    result,
                    Err(LedgerError::InvalidState {
                        current: TransactionStatus::Approved,
                        ..
                    })
                ));
            }

            assert_eq!(fx.user(conn).wallet, BigDecimal::from(100));
            assert_eq!(fx.bank_balance(conn), BigDecimal::from(1100));
            let mirror = wallet_log(conn, &rejected.transaction_id)?.unwrap();
            assert_eq!(mirror.status, "rejected");
            Ok(())
        });
    }

    #[actix_web::test]
    async fn test_revert_requires_wallet_floor_for_deposits_only() {
        let Some(db) = test_pool() else { return };
        db.get().unwrap().test_transaction::<_, LedgerError, _>(|conn| {
            let fx = fixture(conn, 1000, None)?;

            let deposit = fx.file(conn, TransactionKind::Deposit, 200)?;
            approve(conn, TransactionKind::Deposit, deposit.id, fx.admin.id)?;
            // the user already spent most of it
            fx.set_wallet(conn, 50);
            let err = revert(conn, TransactionKind::Deposit, deposit.id, fx.admin.id).unwrap_err();
            assert!(matches!(
                err,
                LedgerError::InsufficientBalance {
                    balance: BalanceSource::Wallet,
                    ..
                }
            ));
            assert_eq!(queries::load_transaction(conn, deposit.id)?.status, "approved");
            assert_eq!(fx.bank_balance(conn), BigDecimal::from(1200));

            // withdraw reverts give money back, so an empty wallet is fine
            fx.set_wallet(conn, 0);
            let withdraw = fx.file(conn, TransactionKind::Withdraw, 100)?;
            approve(conn, TransactionKind::Withdraw, withdraw.id, fx.admin.id)?;
            assert_eq!(fx.user(conn).wallet, BigDecimal::from(0));
            assert_eq!(fx.bank_balance(conn), BigDecimal::from(1100));
            revert(conn, TransactionKind::Withdraw, withdraw.id, fx.admin.id)?;
            let user = fx.user(conn);
            assert_eq!(user.wallet, BigDecimal::from(100));
            assert_eq!(user.total_withdraw, BigDecimal::from(0));
            assert_eq!(fx.bank_balance(conn), BigDecimal::from(1200));
            assert_eq!(queries::load_admin(conn, fx.admin.id)?.total_reverted_withdrawals, 1);
            Ok(())
        });
    }

    #[actix_web::test]
    async fn test_revert_then_reapprove_round_trip() {
        let Some(db) = test_pool() else { return };
        db.get().unwrap().test_transaction::<_, LedgerError, _>(|conn| {
            let fx = fixture(conn, 1000, Some(10_000))?;
            let first = fx.file(conn, TransactionKind::Deposit, 250)?;
            approve(conn, TransactionKind::Deposit, first.id, fx.admin.id)?;
            let wallet_before = fx.user(conn).wallet;
            let bank_before = fx.bank_balance(conn);
            let pool_before = kiosk::load_pool(conn)?.balance;

            revert(conn, TransactionKind::Deposit, first.id, fx.admin.id)?;
            assert_eq!(kiosk::load_pool(conn)?.balance, BigDecimal::from(10_000));
            let second = fx.file(conn, TransactionKind::Deposit, 250)?;
            approve(conn, TransactionKind::Deposit, second.id, fx.admin.id)?;

            assert_eq!(fx.user(conn).wallet, wallet_before);
            assert_eq!(fx.bank_balance(conn), bank_before);
            assert_eq!(kiosk::load_pool(conn)?.balance, pool_before);
            Ok(())
        });
    }

    #[actix_web::test]
    async fn test_bonus_revert_cancels_commission_report() {
        let Some(db) = test_pool() else { return };
        db.get().unwrap().test_transaction::<_, LedgerError, _>(|conn| {
            let fx = fixture(conn, 0, None)?;
            let report_id = idgen::next();
            {
                use crate::schema::agent_commission_report::dsl::*;
                diesel::insert_into(agent_commission_report)
                    .values((
                        id.eq(report_id),
                        agent_username.eq("agent-1"),
                        amount.eq(BigDecimal::from(40)),
                        status.eq("paid"),
                        created_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)?;
            }
            let bonus = submit(
                conn,
                Submission {
                    kind: TransactionKind::Bonus,
                    transaction_ref: format!("ref-{}", idgen::next()),
                    username: fx.username.clone(),
                    amount: BigDecimal::from(40),
                    bank_id: None,
                    agent_commission_report_id: Some(report_id),
                    remark: Some("agent commission".to_string()),
                },
            )?;
            approve(conn, TransactionKind::Bonus, bonus.id, fx.admin.id)?;
            let user = fx.user(conn);
            assert_eq!(user.wallet, BigDecimal::from(40));
            assert_eq!(user.total_bonus, BigDecimal::from(40));
            assert!(user.first_deposit_date.is_none());

            revert(conn, TransactionKind::Bonus, bonus.id, fx.admin.id)?;
            assert_eq!(queries::load_commission_report(conn, report_id)?.status, "cancel");
            assert_eq!(fx.user(conn).total_bonus, BigDecimal::from(0));
            assert_eq!(queries::load_admin(conn, fx.admin.id)?.total_reverted_bonuses, 1);
            // bonuses never touch the bank ledger
            assert!(banks::list_logs(conn, fx.bank.id, 10)?.is_empty());
            Ok(())
        });
    }

    #[actix_web::test]
    async fn test_submit_validation_and_idempotency() {
        let Some(db) = test_pool() else { return };
        db.get().unwrap().test_transaction::<_, LedgerError, _>(|conn| {
            let fx = fixture(conn, 0, None)?;
            let request = |reference: &str, value: i64| Submission {
                kind: TransactionKind::Deposit,
                transaction_ref: reference.to_string(),
                username: fx.username.clone(),
                amount: BigDecimal::from(value),
                bank_id: Some(fx.bank.id),
                agent_commission_report_id: None,
                remark: None,
            };
            let reference = format!("ref-{}", idgen::next());
            let first = submit(conn, request(&reference, 10))?;
            let again = submit(conn, request(&reference, 10))?;
            assert_eq!(first.id, again.id);
            assert!(matches!(
                submit(conn, request(&reference, 11)),
                Err(LedgerError::InvalidRequest(_))
            ));

            assert!(matches!(
                submit(conn, request("other-ref", 0)),
                Err(LedgerError::InvalidAmount(_))
            ));
            // larger than the amount columns can hold
            let mut oversized = request(&format!("ref-{}", idgen::next()), 1);
            oversized.amount = BigDecimal::from_str("10000000000000000000").unwrap();
            assert!(matches!(submit(conn, oversized), Err(LedgerError::InvalidAmount(_))));
            let mut no_bank = request(&format!("ref-{}", idgen::next()), 5);
            no_bank.bank_id = None;
            assert!(matches!(submit(conn, no_bank), Err(LedgerError::InvalidRequest(_))));
            let mut stranger = request(&format!("ref-{}", idgen::next()), 5);
            stranger.username = format!("nobody-{}", idgen::next());
            assert!(matches!(
                submit(conn, stranger),
                Err(LedgerError::NotFound { entity: Entity::User, .. })
            ));

            banks::set_status(conn, fx.bank.id, false, &fx.admin.username)?;
            assert!(matches!(
                submit(conn, request(&format!("ref-{}", idgen::next()), 5)),
                Err(LedgerError::InvalidRequest(_))
            ));
            Ok(())
        });
    }

    #[actix_web::test]
    async fn test_wrong_kind_missing_admin_and_missing_mirror() {
        let Some(db) = test_pool() else { return };
        db.get().unwrap().test_transaction::<_, LedgerError, _>(|conn| {
            let fx = fixture(conn, 0, None)?;
            let tx = fx.file(conn, TransactionKind::Deposit, 70)?;

            assert!(matches!(
                approve(conn, TransactionKind::Withdraw, tx.id, fx.admin.id),
                Err(LedgerError::NotFound { entity: Entity::Transaction, .. })
            ));
            assert!(matches!(
                approve(conn, TransactionKind::Deposit, tx.id, -1),
                Err(LedgerError::NotFound { entity: Entity::Admin, .. })
            ));
            // the failed attempt did not consume the pending state
            assert_eq!(queries::load_transaction(conn, tx.id)?.status, "pending");

            {
                use crate::schema::user_wallet_log::dsl::*;
                diesel::delete(user_wallet_log.filter(transaction_id.eq(&tx.transaction_id))).execute(conn)?;
            }
            approve(conn, TransactionKind::Deposit, tx.id, fx.admin.id)?;
            let mirror = wallet_log(conn, &tx.transaction_id)?.unwrap();
            assert_eq!(mirror.status, "approved");
            assert_eq!(mirror.amount, BigDecimal::from(70));
            Ok(())
        });
    }

    // runs against committed rows: two connections race to approve the same deposit
    #[test]
    fn test_concurrent_approvals_have_one_winner() {
        let Some(db) = test_pool() else { return };
        let suffix = idgen::next();
        let (admin, tx, bank_id, user) = {
            let mut conn = db.get().unwrap();
            conn.transaction::<_, LedgerError, _>(|conn| {
                let admin = create_admin(conn, &format!("race-admin-{suffix}"))?;
                let user = init_user(conn, &format!("race-user-{suffix}"), "member")?;
                let bank = new_channel(conn, 0)?;
                let tx = submit(
                    conn,
                    Submission {
                        kind: TransactionKind::Deposit,
                        transaction_ref: format!("race-{suffix}"),
                        username: user.username.clone(),
                        amount: BigDecimal::from(75),
                        bank_id: Some(bank.id),
                        agent_commission_report_id: None,
                        remark: None,
                    },
                )?;
                Ok((admin, tx, bank.id, user.username))
            })
            .unwrap()
        };

        let barrier = Arc::new(Barrier::new(2));
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let barrier = barrier.clone();
                let (tx_id, admin_id) = (tx.id, admin.id);
                std::thread::spawn(move || {
                    let mut conn = db.get().unwrap();
                    barrier.wait();
                    approve(&mut conn, TransactionKind::Deposit, tx_id, admin_id)
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results.iter().any(|r| matches!(
            r,
            Err(LedgerError::InvalidState {
                current: TransactionStatus::Approved,
                ..
            })
        )));

        let mut conn = db.get().unwrap();
        assert_eq!(queries::load_user(&mut conn, &user).unwrap().wallet, BigDecimal::from(75));
        let channel = banks::load_channel(&mut conn, bank_id).unwrap();
        assert_eq!(channel.total_deposits, BigDecimal::from(75));
        assert_eq!(banks::list_logs(&mut conn, bank_id, 10).unwrap().len(), 1);
        assert_eq!(queries::load_admin(&mut conn, admin.id).unwrap().processed_count, 1);
    }
}
