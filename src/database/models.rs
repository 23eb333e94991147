use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::bank::BankCounters;
use crate::error::LedgerError;
use crate::lifecycle::{TransactionKind, TransactionStatus};

#[derive(Queryable, Debug, Clone, PartialEq)]
pub struct User {
    pub username: String,
    pub wallet: BigDecimal,
    pub total_deposit: BigDecimal,
    pub total_withdraw: BigDecimal,
    pub total_bonus: BigDecimal,
    pub total_turnover: BigDecimal,
    pub first_deposit_date: Option<NaiveDateTime>,
    pub vip_level: String,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, Debug, Clone, PartialEq)]
pub struct Admin {
    pub id: i64,
    pub username: String,
    pub processed_count: i64,
    pub total_processing_seconds: i64,
    pub total_reverted_deposits: i64,
    pub total_reverted_withdrawals: i64,
    pub total_reverted_bonuses: i64,
}

impl Admin {
    pub fn average_processing_seconds(&self) -> f64 {
        if self.processed_count == 0 {
            0.0
        } else {
            self.total_processing_seconds as f64 / self.processed_count as f64
        }
    }
}

#[derive(Queryable, Debug, Clone, PartialEq)]
pub struct BankChannel {
    pub id: i64,
    pub name: String,
    pub owner_name: String,
    pub is_active: bool,
    pub starting_balance: BigDecimal,
    pub current_balance: BigDecimal,
    pub total_deposits: BigDecimal,
    pub total_withdrawals: BigDecimal,
    pub total_cash_in: BigDecimal,
    pub total_cash_out: BigDecimal,
    pub daily_deposit_limit: Option<BigDecimal>,
    pub daily_withdraw_limit: Option<BigDecimal>,
    pub monthly_deposit_limit: Option<BigDecimal>,
    pub monthly_withdraw_limit: Option<BigDecimal>,
    pub created_at: NaiveDateTime,
}

impl BankChannel {
    pub fn counters(&self) -> BankCounters {
        BankCounters {
            starting_balance: self.starting_balance.clone(),
            total_deposits: self.total_deposits.clone(),
            total_withdrawals: self.total_withdrawals.clone(),
            total_cash_in: self.total_cash_in.clone(),
            total_cash_out: self.total_cash_out.clone(),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::bank_channel)]
pub struct NewBankChannel {
    pub id: i64,
    pub name: String,
    pub owner_name: String,
    pub is_active: bool,
    pub starting_balance: BigDecimal,
    pub current_balance: BigDecimal,
    pub total_deposits: BigDecimal,
    pub total_withdrawals: BigDecimal,
    pub total_cash_in: BigDecimal,
    pub total_cash_out: BigDecimal,
    pub daily_deposit_limit: Option<BigDecimal>,
    pub daily_withdraw_limit: Option<BigDecimal>,
    pub monthly_deposit_limit: Option<BigDecimal>,
    pub monthly_withdraw_limit: Option<BigDecimal>,
    pub created_at: NaiveDateTime,
}

// stored only, no approval path reads them
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::bank_channel, treat_none_as_null = true)]
pub struct BankLimits {
    pub daily_deposit_limit: Option<BigDecimal>,
    pub daily_withdraw_limit: Option<BigDecimal>,
    pub monthly_deposit_limit: Option<BigDecimal>,
    pub monthly_withdraw_limit: Option<BigDecimal>,
}

#[derive(Queryable, Debug, Clone, PartialEq)]
pub struct BankTransactionLog {
    pub id: i64,
    pub bank_id: i64,
    pub transaction_type: String,
    pub amount: BigDecimal,
    pub last_balance: BigDecimal,
    pub current_balance: BigDecimal,
    pub process_by: String,
    pub remark: Option<String>,
    pub transaction_id: Option<i64>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::bank_transaction_log)]
pub struct NewBankTransactionLog {
    pub id: i64,
    pub bank_id: i64,
    pub transaction_type: String,
    pub amount: BigDecimal,
    pub last_balance: BigDecimal,
    pub current_balance: BigDecimal,
    pub process_by: String,
    pub remark: Option<String>,
    pub transaction_id: Option<i64>,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, Debug, Clone, PartialEq)]
pub struct KioskPool {
    pub id: i32,
    pub balance: BigDecimal,
    pub status: bool,
    pub min_balance: BigDecimal,
    pub updated_at: NaiveDateTime,
}

#[derive(Queryable, Debug, Clone, PartialEq)]
pub struct KioskTransactionLog {
    pub id: i64,
    pub operation: String,
    pub amount: BigDecimal,
    pub previous_balance: BigDecimal,
    pub new_balance: BigDecimal,
    pub process_by: String,
    pub remark: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::kiosk_transaction_log)]
pub struct NewKioskTransactionLog {
    pub id: i64,
    pub operation: String,
    pub amount: BigDecimal,
    pub previous_balance: BigDecimal,
    pub new_balance: BigDecimal,
    pub process_by: String,
    pub remark: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, Debug, Clone, PartialEq)]
pub struct MoneyTransaction {
    pub id: i64,
    pub kind: String,
    pub transaction_id: String,
    pub username: String,
    pub amount: BigDecimal,
    pub status: String,
    pub reverted: bool,
    pub bank_id: Option<i64>,
    pub agent_commission_report_id: Option<i64>,
    pub remark: Option<String>,
    pub process_by: Option<String>,
    pub process_time: Option<String>,
    pub reverted_process_by: Option<String>,
    pub created_at: NaiveDateTime,
    pub processed_at: Option<NaiveDateTime>,
    pub reverted_at: Option<NaiveDateTime>,
}

impl MoneyTransaction {
    pub fn kind(&self) -> Result<TransactionKind, LedgerError> {
        self.kind.parse()
    }

    pub fn status(&self) -> Result<TransactionStatus, LedgerError> {
        self.status.parse()
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::money_transaction)]
pub struct NewMoneyTransaction {
    pub id: i64,
    pub kind: String,
    pub transaction_id: String,
    pub username: String,
    pub amount: BigDecimal,
    pub status: String,
    pub reverted: bool,
    pub bank_id: Option<i64>,
    pub agent_commission_report_id: Option<i64>,
    pub remark: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, Debug, Clone, PartialEq)]
pub struct UserWalletLog {
    pub id: i64,
    pub transaction_id: String,
    pub username: String,
    pub transaction_type: String,
    pub amount: BigDecimal,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::user_wallet_log)]
pub struct NewUserWalletLog {
    pub id: i64,
    pub transaction_id: String,
    pub username: String,
    pub transaction_type: String,
    pub amount: BigDecimal,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Queryable, Debug, Clone, PartialEq)]
pub struct AgentCommissionReport {
    pub id: i64,
    pub agent_username: String,
    pub amount: BigDecimal,
    pub status: String,
    pub created_at: NaiveDateTime,
}
