use actix_web::http::header;
use actix_web::{HttpResponse, HttpResponseBuilder};
use bytes::Bytes;
use chrono::NaiveDateTime;
use prost::Message;
use prost_wkt_types::Timestamp;
use tracing::error;

use crate::amount::to_wire;
use crate::database::models;
use crate::error::LedgerError;
use crate::proto::{self, GenericOutput};

pub const PROTOBUF: &str = "application/x-protobuf";

pub fn wants_protobuf(accept: &header::Accept) -> bool {
    accept.iter().any(|a| a.item.essence_str() == PROTOBUF)
}

fn render(mut builder: HttpResponseBuilder, data: &GenericOutput, is_protobuf: bool) -> HttpResponse {
    if is_protobuf {
        return builder.content_type(PROTOBUF).body(Bytes::from(data.encode_to_vec()));
    }
    match serde_json::to_vec(data) {
        Ok(body) => builder.content_type("application/json").body(body),
        Err(e) => {
            error!("failed to serialize response: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn success_http_response(mut data: GenericOutput, is_protobuf: bool) -> HttpResponse {
    data.success = true;
    render(HttpResponse::Ok(), &data, is_protobuf)
}

fn failure(code: &str, message: String, field: Option<&str>) -> GenericOutput {
    GenericOutput {
        success: false,
        error: Some(proto::Error {
            code: code.to_string(),
            message,
            field: field.map(str::to_string),
        }),
        ..Default::default()
    }
}

// business failures keep HTTP 200 with success=false, only internal errors use 500
pub fn ledger_error_http_response(err: &LedgerError, is_protobuf: bool) -> HttpResponse {
    let data = failure(err.code(), err.client_message(), None);
    if err.is_internal() {
        error!(error = %err, "request failed");
        render(HttpResponse::InternalServerError(), &data, is_protobuf)
    } else {
        render(HttpResponse::Ok(), &data, is_protobuf)
    }
}

pub fn bad_parameter_http_response(field: &str, is_protobuf: bool) -> HttpResponse {
    let data = failure("bad_parameter", format!("{field} is invalid"), Some(field));
    render(HttpResponse::Ok(), &data, is_protobuf)
}

pub fn unauthorized_http_response(header_name: &str, is_protobuf: bool) -> HttpResponse {
    let data = failure(
        "unauthorized",
        format!("{header_name} header is missing or malformed"),
        Some(header_name),
    );
    render(HttpResponse::Unauthorized(), &data, is_protobuf)
}

pub fn internal_error_http_response(is_protobuf: bool) -> HttpResponse {
    let data = failure("internal_error", "Internal server error".to_string(), None);
    render(HttpResponse::InternalServerError(), &data, is_protobuf)
}

fn timestamp(value: NaiveDateTime) -> Timestamp {
    Timestamp {
        seconds: value.timestamp(),
        nanos: value.timestamp_subsec_nanos() as i32,
    }
}

impl From<&models::MoneyTransaction> for proto::Transaction {
    fn from(tx: &models::MoneyTransaction) -> Self {
        proto::Transaction {
            id: tx.id.to_string(),
            kind: tx.kind.clone(),
            transaction_id: tx.transaction_id.clone(),
            username: tx.username.clone(),
            amount: to_wire(&tx.amount),
            status: tx.status.clone(),
            reverted: tx.reverted,
            bank_id: tx.bank_id.map(|v| v.to_string()),
            agent_commission_report_id: tx.agent_commission_report_id.map(|v| v.to_string()),
            remark: tx.remark.clone(),
            process_by: tx.process_by.clone(),
            process_time: tx.process_time.clone(),
            reverted_process_by: tx.reverted_process_by.clone(),
            created_at: Some(timestamp(tx.created_at)),
            processed_at: tx.processed_at.map(timestamp),
            reverted_at: tx.reverted_at.map(timestamp),
        }
    }
}

impl From<&models::KioskPool> for proto::KioskPool {
    fn from(pool: &models::KioskPool) -> Self {
        proto::KioskPool {
            balance: to_wire(&pool.balance),
            status: pool.status,
            min_balance: to_wire(&pool.min_balance),
            updated_at: Some(timestamp(pool.updated_at)),
        }
    }
}

impl From<&models::KioskTransactionLog> for proto::KioskLog {
    fn from(log: &models::KioskTransactionLog) -> Self {
        proto::KioskLog {
            id: log.id.to_string(),
            operation: log.operation.clone(),
            amount: to_wire(&log.amount),
            previous_balance: to_wire(&log.previous_balance),
            new_balance: to_wire(&log.new_balance),
            process_by: log.process_by.clone(),
            remark: log.remark.clone(),
            created_at: Some(timestamp(log.created_at)),
        }
    }
}

impl From<&models::BankChannel> for proto::BankChannel {
    fn from(channel: &models::BankChannel) -> Self {
        proto::BankChannel {
            id: channel.id.to_string(),
            name: channel.name.clone(),
            owner_name: channel.owner_name.clone(),
            is_active: channel.is_active,
            starting_balance: to_wire(&channel.starting_balance),
            current_balance: to_wire(&channel.current_balance),
            total_deposits: to_wire(&channel.total_deposits),
            total_withdrawals: to_wire(&channel.total_withdrawals),
            total_cash_in: to_wire(&channel.total_cash_in),
            total_cash_out: to_wire(&channel.total_cash_out),
            daily_deposit_limit: channel.daily_deposit_limit.as_ref().map(to_wire),
            daily_withdraw_limit: channel.daily_withdraw_limit.as_ref().map(to_wire),
            monthly_deposit_limit: channel.monthly_deposit_limit.as_ref().map(to_wire),
            monthly_withdraw_limit: channel.monthly_withdraw_limit.as_ref().map(to_wire),
            created_at: Some(timestamp(channel.created_at)),
        }
    }
}

impl From<&models::BankTransactionLog> for proto::BankLog {
    fn from(log: &models::BankTransactionLog) -> Self {
        proto::BankLog {
            id: log.id.to_string(),
            bank_id: log.bank_id.to_string(),
            transaction_type: log.transaction_type.clone(),
            amount: to_wire(&log.amount),
            last_balance: to_wire(&log.last_balance),
            current_balance: to_wire(&log.current_balance),
            process_by: log.process_by.clone(),
            remark: log.remark.clone(),
            transaction_id: log.transaction_id.map(|v| v.to_string()),
            created_at: Some(timestamp(log.created_at)),
        }
    }
}

impl From<&models::User> for proto::Wallet {
    fn from(user: &models::User) -> Self {
        proto::Wallet {
            username: user.username.clone(),
            wallet: to_wire(&user.wallet),
            total_deposit: to_wire(&user.total_deposit),
            total_withdraw: to_wire(&user.total_withdraw),
            total_bonus: to_wire(&user.total_bonus),
            total_turnover: to_wire(&user.total_turnover),
            first_deposit_date: user.first_deposit_date.map(timestamp),
            vip_level: user.vip_level.clone(),
        }
    }
}

impl From<&models::Admin> for proto::AdminStats {
    fn from(admin: &models::Admin) -> Self {
        proto::AdminStats {
            id: admin.id.to_string(),
            username: admin.username.clone(),
            processed_count: admin.processed_count,
            average_processing_seconds: admin.average_processing_seconds(),
            total_reverted_deposits: admin.total_reverted_deposits,
            total_reverted_withdrawals: admin.total_reverted_withdrawals,
            total_reverted_bonuses: admin.total_reverted_bonuses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Entity;
    use crate::lifecycle::TransactionStatus;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    async fn json_body(res: HttpResponse) -> serde_json::Value {
        let body = to_bytes(res.into_body()).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn test_wants_protobuf() {
        let accept = header::Accept(vec![
            header::QualityItem::max("application/json".parse().unwrap()),
            header::QualityItem::max(PROTOBUF.parse().unwrap()),
        ]);
        assert!(wants_protobuf(&accept));
        assert!(!wants_protobuf(&header::Accept::json()));
        assert!(!wants_protobuf(&header::Accept(vec![])));
    }

    #[actix_web::test]
    async fn test_business_errors_keep_status_200() {
        let err = LedgerError::InvalidState {
            current: TransactionStatus::Reverted,
            action: "revert",
        };
        let res = ledger_error_http_response(&err, false);
        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "invalid_state");
        assert_eq!(body["error"]["message"], "transaction is reverted, cannot revert");
        assert!(body.get("transaction").is_none());

        let res = ledger_error_http_response(&LedgerError::not_found(Entity::User, "ghost"), false);
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await["error"]["code"], "not_found");
    }

    #[actix_web::test]
    async fn test_internal_errors_are_opaque() {
        let err = LedgerError::from(diesel::result::Error::RollbackTransaction);
        let res = ledger_error_http_response(&err, false);
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(res).await;
        assert_eq!(body["error"]["code"], "internal_error");
        assert_eq!(body["error"]["message"], "Internal server error");
    }

    #[actix_web::test]
    async fn test_bad_parameter_names_the_field() {
        let body = json_body(bad_parameter_http_response("amount", false)).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "bad_parameter");
        assert_eq!(body["error"]["field"], "amount");
    }

    #[actix_web::test]
    async fn test_unauthorized_uses_the_envelope() {
        let res = unauthorized_http_response("X-Admin-Id", false);
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(res).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "unauthorized");
        assert_eq!(body["error"]["field"], "X-Admin-Id");

        let res = unauthorized_http_response("X-Admin-Id", true);
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = to_bytes(res.into_body()).await.unwrap();
        let decoded = GenericOutput::decode(body).unwrap();
        assert!(!decoded.success);
        assert_eq!(decoded.error.unwrap().code, "unauthorized");
    }

    #[actix_web::test]
    async fn test_protobuf_body_decodes() {
        let pool = models::KioskPool {
            id: 1,
            balance: BigDecimal::from_str("1100.50").unwrap(),
            status: true,
            min_balance: BigDecimal::from(100),
            updated_at: NaiveDateTime::from_timestamp_opt(1_700_000_000, 0).unwrap(),
        };
        let data = GenericOutput {
            kiosk_pool: Some((&pool).into()),
            ..Default::default()
        };
        let res = success_http_response(data, true);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap(),
            PROTOBUF
        );
        let body = to_bytes(res.into_body()).await.unwrap();
        let decoded = GenericOutput::decode(body).unwrap();
        assert!(decoded.success);
        let wire = decoded.kiosk_pool.unwrap();
        assert_eq!(wire.balance, 1100.5);
        assert_eq!(wire.updated_at.unwrap().seconds, 1_700_000_000);
    }

    #[actix_web::test]
    async fn test_amounts_are_plain_json_numbers() {
        let user = models::User {
            username: "alice".to_string(),
            wallet: BigDecimal::from_str("200.10").unwrap(),
            total_deposit: BigDecimal::from(200),
            total_withdraw: BigDecimal::from(0),
            total_bonus: BigDecimal::from_str("0.10").unwrap(),
            total_turnover: BigDecimal::from(0),
            first_deposit_date: None,
            vip_level: "member".to_string(),
            created_at: NaiveDateTime::from_timestamp_opt(0, 0).unwrap(),
        };
        let body = json_body(success_http_response(
            GenericOutput {
                wallet: Some((&user).into()),
                ..Default::default()
            },
            false,
        ))
        .await;
        assert_eq!(body["success"], true);
        assert_eq!(body["wallet"]["wallet"], 200.1);
        assert_eq!(body["wallet"]["totalBonus"], 0.1);
        assert_eq!(body["wallet"]["vipLevel"], "member");
        assert!(body.get("error").is_none());
    }
}
