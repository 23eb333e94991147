//! Wire messages of the admin API.
//!
//! Every message is both a protobuf message and a camelCase JSON object, so a
//! handler renders the same value for either content type. Money is a plain
//! number on the wire; ids are strings because snowflake ids do not fit into
//! a JSON double.

use prost_wkt_types::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[prost(string, tag = "1")]
    pub code: String,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(string, optional, tag = "3")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericOutput {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(message, optional, tag = "2")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Error>,
    #[prost(message, optional, tag = "3")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<Transaction>,
    #[prost(message, repeated, tag = "4")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<Transaction>,
    #[prost(message, optional, tag = "5")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kiosk_pool: Option<KioskPool>,
    #[prost(message, repeated, tag = "6")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kiosk_logs: Vec<KioskLog>,
    #[prost(message, optional, tag = "7")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_channel: Option<BankChannel>,
    #[prost(message, repeated, tag = "8")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bank_channels: Vec<BankChannel>,
    #[prost(message, repeated, tag = "9")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bank_logs: Vec<BankLog>,
    #[prost(message, optional, tag = "10")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet: Option<Wallet>,
    #[prost(message, optional, tag = "11")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_stats: Option<AdminStats>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub kind: String,
    #[prost(string, tag = "3")]
    pub transaction_id: String,
    #[prost(string, tag = "4")]
    pub username: String,
    #[prost(double, tag = "5")]
    pub amount: f64,
    #[prost(string, tag = "6")]
    pub status: String,
    #[prost(bool, tag = "7")]
    pub reverted: bool,
    #[prost(string, optional, tag = "8")]
    pub bank_id: Option<String>,
    #[prost(string, optional, tag = "9")]
    pub agent_commission_report_id: Option<String>,
    #[prost(string, optional, tag = "10")]
    pub remark: Option<String>,
    #[prost(string, optional, tag = "11")]
    pub process_by: Option<String>,
    #[prost(string, optional, tag = "12")]
    pub process_time: Option<String>,
    #[prost(string, optional, tag = "13")]
    pub reverted_process_by: Option<String>,
    #[prost(message, optional, tag = "14")]
    pub created_at: Option<Timestamp>,
    #[prost(message, optional, tag = "15")]
    pub processed_at: Option<Timestamp>,
    #[prost(message, optional, tag = "16")]
    pub reverted_at: Option<Timestamp>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskPool {
    #[prost(double, tag = "1")]
    pub balance: f64,
    #[prost(bool, tag = "2")]
    pub status: bool,
    #[prost(double, tag = "3")]
    pub min_balance: f64,
    #[prost(message, optional, tag = "4")]
    pub updated_at: Option<Timestamp>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskLog {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub operation: String,
    #[prost(double, tag = "3")]
    pub amount: f64,
    #[prost(double, tag = "4")]
    pub previous_balance: f64,
    #[prost(double, tag = "5")]
    pub new_balance: f64,
    #[prost(string, tag = "6")]
    pub process_by: String,
    #[prost(string, optional, tag = "7")]
    pub remark: Option<String>,
    #[prost(message, optional, tag = "8")]
    pub created_at: Option<Timestamp>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankChannel {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub owner_name: String,
    #[prost(bool, tag = "4")]
    pub is_active: bool,
    #[prost(double, tag = "5")]
    pub starting_balance: f64,
    #[prost(double, tag = "6")]
    pub current_balance: f64,
    #[prost(double, tag = "7")]
    pub total_deposits: f64,
    #[prost(double, tag = "8")]
    pub total_withdrawals: f64,
    #[prost(double, tag = "9")]
    pub total_cash_in: f64,
    #[prost(double, tag = "10")]
    pub total_cash_out: f64,
    #[prost(double, optional, tag = "11")]
    pub daily_deposit_limit: Option<f64>,
    #[prost(double, optional, tag = "12")]
    pub daily_withdraw_limit: Option<f64>,
    #[prost(double, optional, tag = "13")]
    pub monthly_deposit_limit: Option<f64>,
    #[prost(double, optional, tag = "14")]
    pub monthly_withdraw_limit: Option<f64>,
    #[prost(message, optional, tag = "15")]
    pub created_at: Option<Timestamp>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankLog {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub bank_id: String,
    #[prost(string, tag = "3")]
    pub transaction_type: String,
    #[prost(double, tag = "4")]
    pub amount: f64,
    #[prost(double, tag = "5")]
    pub last_balance: f64,
    #[prost(double, tag = "6")]
    pub current_balance: f64,
    #[prost(string, tag = "7")]
    pub process_by: String,
    #[prost(string, optional, tag = "8")]
    pub remark: Option<String>,
    #[prost(string, optional, tag = "9")]
    pub transaction_id: Option<String>,
    #[prost(message, optional, tag = "10")]
    pub created_at: Option<Timestamp>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    #[prost(string, tag = "1")]
    pub username: String,
    #[prost(double, tag = "2")]
    pub wallet: f64,
    #[prost(double, tag = "3")]
    pub total_deposit: f64,
    #[prost(double, tag = "4")]
    pub total_withdraw: f64,
    #[prost(double, tag = "5")]
    pub total_bonus: f64,
    #[prost(double, tag = "6")]
    pub total_turnover: f64,
    #[prost(message, optional, tag = "7")]
    pub first_deposit_date: Option<Timestamp>,
    #[prost(string, tag = "8")]
    pub vip_level: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub username: String,
    #[prost(int64, tag = "3")]
    pub processed_count: i64,
    #[prost(double, tag = "4")]
    pub average_processing_seconds: f64,
    #[prost(int64, tag = "5")]
    pub total_reverted_deposits: i64,
    #[prost(int64, tag = "6")]
    pub total_reverted_withdrawals: i64,
    #[prost(int64, tag = "7")]
    pub total_reverted_bonuses: i64,
}

// request bodies

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTransactionInput {
    #[prost(string, tag = "1")]
    pub transaction_id: String,
    #[prost(string, tag = "2")]
    pub username: String,
    #[prost(double, tag = "3")]
    pub amount: f64,
    #[prost(string, optional, tag = "4")]
    #[serde(default)]
    pub bank_id: Option<String>,
    #[prost(string, optional, tag = "5")]
    #[serde(default)]
    pub agent_commission_report_id: Option<String>,
    #[prost(string, optional, tag = "6")]
    #[serde(default)]
    pub remark: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectInput {
    #[prost(string, optional, tag = "1")]
    #[serde(default)]
    pub remark: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskAdjustInput {
    #[prost(string, tag = "1")]
    pub operation: String,
    #[prost(double, tag = "2")]
    pub amount: f64,
    #[prost(string, optional, tag = "3")]
    #[serde(default)]
    pub remark: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskStatusInput {
    #[prost(bool, tag = "1")]
    pub status: bool,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskMinBalanceInput {
    #[prost(double, tag = "1")]
    pub min_balance: f64,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankLimitsInput {
    #[prost(double, optional, tag = "1")]
    #[serde(default)]
    pub daily_deposit_limit: Option<f64>,
    #[prost(double, optional, tag = "2")]
    #[serde(default)]
    pub daily_withdraw_limit: Option<f64>,
    #[prost(double, optional, tag = "3")]
    #[serde(default)]
    pub monthly_deposit_limit: Option<f64>,
    #[prost(double, optional, tag = "4")]
    #[serde(default)]
    pub monthly_withdraw_limit: Option<f64>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBankChannelInput {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub owner_name: String,
    #[prost(double, tag = "3")]
    #[serde(default)]
    pub starting_balance: f64,
    #[prost(message, optional, tag = "4")]
    #[serde(default)]
    pub limits: Option<BankLimitsInput>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAmountInput {
    #[prost(double, tag = "1")]
    pub amount: f64,
    #[prost(string, optional, tag = "2")]
    #[serde(default)]
    pub remark: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankStatusInput {
    #[prost(bool, tag = "1")]
    pub is_active: bool,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    #[prost(string, tag = "1")]
    pub username: String,
    #[prost(string, optional, tag = "2")]
    #[serde(default)]
    pub vip_level: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminInput {
    #[prost(string, tag = "1")]
    pub username: String,
}
