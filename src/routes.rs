use std::future::{ready, Ready};
use std::ops::DerefMut;

use actix_request_identifier::RequestId;
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::http::header::Header;
use actix_web::{get, http::header, post, web, FromRequest, HttpRequest, HttpResponse};
use diesel::PgConnection;
use serde::Deserialize;
use tracing::{error, info, instrument};

use crate::database::connect::DbPool;
use crate::database::{banks, kiosk, models, mutations, queries};
use crate::error::LedgerError;
use crate::lifecycle::{KioskOperation, TransactionKind};
use crate::proto::{self, GenericOutput};
use crate::{amount, responses};

pub const ADMIN_ID_HEADER: &str = "X-Admin-Id";

const DEFAULT_LOG_LIMIT: i64 = 100;
const MAX_LOG_LIMIT: i64 = 1000;

/// Acting admin, put on the request by the authentication layer in front of
/// this service. Handlers that change state load the admin row before acting,
/// so an unknown id fails with `not_found`.
#[derive(Debug, Clone, Copy)]
pub struct AdminIdentity(pub i64);

impl FromRequest for AdminIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let id = req
            .headers()
            .get(ADMIN_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i64>().ok());
        ready(match id {
            Some(id) => Ok(AdminIdentity(id)),
            None => {
                let is_protobuf = header::Accept::parse(req)
                    .map_or(false, |accept| responses::wants_protobuf(&accept));
                let response = responses::unauthorized_http_response(ADMIN_ID_HEADER, is_protobuf);
                Err(InternalError::from_response("missing or malformed admin identity", response).into())
            }
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LogQuery {
    limit: Option<i64>,
}

impl LogQuery {
    fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LOG_LIMIT).clamp(1, MAX_LOG_LIMIT)
    }
}

// runs a blocking ledger job on the thread pool and renders its outcome
async fn run_blocking<F>(db: web::Data<DbPool>, is_protobuf: bool, job: F) -> HttpResponse
where
    F: FnOnce(&mut PgConnection) -> Result<GenericOutput, LedgerError> + Send + 'static,
{
    let res = web::block(move || {
        let mut conn = db.get()?;
        job(conn.deref_mut())
    })
    .await;
    match res {
        Ok(Ok(data)) => responses::success_http_response(data, is_protobuf),
        Ok(Err(e)) => responses::ledger_error_http_response(&e, is_protobuf),
        Err(e) => {
            error!("{e}");
            responses::internal_error_http_response(is_protobuf)
        }
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok()
}

fn parse_optional_id(raw: &Option<String>) -> Result<Option<i64>, ()> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse::<i64>().map(Some).map_err(|_| ()),
    }
}

fn transaction_output(tx: &models::MoneyTransaction) -> GenericOutput {
    GenericOutput {
        transaction: Some(tx.into()),
        ..Default::default()
    }
}

fn kiosk_output(pool: &models::KioskPool) -> GenericOutput {
    GenericOutput {
        kiosk_pool: Some(pool.into()),
        ..Default::default()
    }
}

fn bank_output(channel: &models::BankChannel) -> GenericOutput {
    GenericOutput {
        bank_channel: Some(channel.into()),
        ..Default::default()
    }
}

fn limits_from_wire(input: &proto::BankLimitsInput) -> Result<models::BankLimits, &'static str> {
    let convert = |value: Option<f64>, field: &'static str| {
        value
            .map(|v| amount::non_negative_from_wire(v).map_err(|_| field))
            .transpose()
    };
    Ok(models::BankLimits {
        daily_deposit_limit: convert(input.daily_deposit_limit, "dailyDepositLimit")?,
        daily_withdraw_limit: convert(input.daily_withdraw_limit, "dailyWithdrawLimit")?,
        monthly_deposit_limit: convert(input.monthly_deposit_limit, "monthlyDepositLimit")?,
        monthly_withdraw_limit: convert(input.monthly_withdraw_limit, "monthlyWithdrawLimit")?,
    })
}

// money transaction lifecycle

/// Files a pending transaction. Submissions come from the player-facing
/// flow, so no admin identity is taken here; admins act on approval.
#[post("/submit{kind}")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn submit_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    kind: web::Path<String>,
    input: web::Json<proto::SubmitTransactionInput>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);

    let Ok(req_kind) = kind.parse::<TransactionKind>() else {
        return responses::bad_parameter_http_response("kind", is_protobuf);
    };
    let input = input.into_inner();
    if input.transaction_id.trim().is_empty() {
        return responses::bad_parameter_http_response("transactionId", is_protobuf);
    }
    if input.username.trim().is_empty() {
        return responses::bad_parameter_http_response("username", is_protobuf);
    }
    let req_amount = match amount::positive_from_wire(input.amount) {
        Ok(v) => v,
        Err(_) => return responses::bad_parameter_http_response("amount", is_protobuf),
    };
    let Ok(req_bank_id) = parse_optional_id(&input.bank_id) else {
        return responses::bad_parameter_http_response("bankId", is_protobuf);
    };
    let Ok(req_report_id) = parse_optional_id(&input.agent_commission_report_id) else {
        return responses::bad_parameter_http_response("agentCommissionReportId", is_protobuf);
    };

    let submission = mutations::Submission {
        kind: req_kind,
        transaction_ref: input.transaction_id,
        username: input.username,
        amount: req_amount,
        bank_id: req_bank_id,
        agent_commission_report_id: req_report_id,
        remark: input.remark,
    };
    run_blocking(db, is_protobuf, move |conn| {
        mutations::submit(conn, submission).map(|tx| transaction_output(&tx))
    })
    .await
}

#[post("/approve{kind}/{id}")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn approve_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    admin: AdminIdentity,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    let (kind, id) = path.into_inner();
    let Ok(req_kind) = kind.parse::<TransactionKind>() else {
        return responses::bad_parameter_http_response("kind", is_protobuf);
    };
    let Some(req_id) = parse_id(&id) else {
        return responses::bad_parameter_http_response("id", is_protobuf);
    };

    run_blocking(db, is_protobuf, move |conn| {
        mutations::approve(conn, req_kind, req_id, admin.0).map(|tx| transaction_output(&tx))
    })
    .await
}

#[post("/reject{kind}/{id}")]
#[instrument(skip(db, accept, input), fields(request_id = request_id.as_str()))]
pub async fn reject_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    admin: AdminIdentity,
    path: web::Path<(String, String)>,
    input: Option<web::Json<proto::RejectInput>>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    let (kind, id) = path.into_inner();
    let Ok(req_kind) = kind.parse::<TransactionKind>() else {
        return responses::bad_parameter_http_response("kind", is_protobuf);
    };
    let Some(req_id) = parse_id(&id) else {
        return responses::bad_parameter_http_response("id", is_protobuf);
    };
    // the body is optional, a reject without remark is valid
    let req_remark = input.and_then(|i| i.into_inner().remark);

    run_blocking(db, is_protobuf, move |conn| {
        mutations::reject(conn, req_kind, req_id, admin.0, req_remark.as_deref()).map(|tx| transaction_output(&tx))
    })
    .await
}

#[post("/revert{kind}/{id}")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn revert_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    admin: AdminIdentity,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    let (kind, id) = path.into_inner();
    let Ok(req_kind) = kind.parse::<TransactionKind>() else {
        return responses::bad_parameter_http_response("kind", is_protobuf);
    };
    let Some(req_id) = parse_id(&id) else {
        return responses::bad_parameter_http_response("id", is_protobuf);
    };

    run_blocking(db, is_protobuf, move |conn| {
        mutations::revert(conn, req_kind, req_id, admin.0).map(|tx| transaction_output(&tx))
    })
    .await
}

#[get("/transaction/{id}")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn transaction_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    id: web::Path<String>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    let Some(req_id) = parse_id(&id) else {
        return responses::bad_parameter_http_response("id", is_protobuf);
    };
    run_blocking(db, is_protobuf, move |conn| {
        queries::load_transaction(conn, req_id).map(|tx| transaction_output(&tx))
    })
    .await
}

// kiosk balance pool

#[get("/kiosk")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn kiosk_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    run_blocking(db, is_protobuf, |conn| kiosk::load_pool(conn).map(|pool| kiosk_output(&pool))).await
}

#[post("/kiosk/adjust")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn kiosk_adjust_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    admin: AdminIdentity,
    input: web::Json<proto::KioskAdjustInput>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    let Ok(operation) = input.operation.parse::<KioskOperation>() else {
        return responses::bad_parameter_http_response("operation", is_protobuf);
    };
    let Ok(delta) = amount::positive_from_wire(input.amount) else {
        return responses::bad_parameter_http_response("amount", is_protobuf);
    };
    let note = input.into_inner().remark;

    run_blocking(db, is_protobuf, move |conn| {
        let actor = queries::load_admin(conn, admin.0)?;
        kiosk::adjust(conn, operation, &delta, &actor.username, note.as_deref()).map(|pool| kiosk_output(&pool))
    })
    .await
}

#[post("/kiosk/status")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn kiosk_status_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    admin: AdminIdentity,
    input: web::Json<proto::KioskStatusInput>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    let active = input.status;
    run_blocking(db, is_protobuf, move |conn| {
        let actor = queries::load_admin(conn, admin.0)?;
        kiosk::set_status(conn, active, &actor.username).map(|pool| kiosk_output(&pool))
    })
    .await
}

#[post("/kiosk/minbalance")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn kiosk_min_balance_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    admin: AdminIdentity,
    input: web::Json<proto::KioskMinBalanceInput>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    let Ok(threshold) = amount::non_negative_from_wire(input.min_balance) else {
        return responses::bad_parameter_http_response("minBalance", is_protobuf);
    };
    run_blocking(db, is_protobuf, move |conn| {
        let actor = queries::load_admin(conn, admin.0)?;
        kiosk::set_min_balance(conn, &threshold, &actor.username).map(|pool| kiosk_output(&pool))
    })
    .await
}

#[get("/kiosk/logs")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn kiosk_logs_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    query: web::Query<LogQuery>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    let limit = query.limit();
    run_blocking(db, is_protobuf, move |conn| {
        let logs = kiosk::list_logs(conn, limit)?;
        Ok(GenericOutput {
            kiosk_logs: logs.iter().map(Into::into).collect(),
            ..Default::default()
        })
    })
    .await
}

// bank channels

#[post("/bank")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn create_bank_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    admin: AdminIdentity,
    input: web::Json<proto::CreateBankChannelInput>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    let input = input.into_inner();
    if input.name.trim().is_empty() {
        return responses::bad_parameter_http_response("name", is_protobuf);
    }
    let Ok(starting) = amount::non_negative_from_wire(input.starting_balance) else {
        return responses::bad_parameter_http_response("startingBalance", is_protobuf);
    };
    let limits = match input.limits.as_ref().map(limits_from_wire).transpose() {
        Ok(limits) => limits.unwrap_or_default(),
        Err(field) => return responses::bad_parameter_http_response(field, is_protobuf),
    };

    let new_channel = banks::NewChannel {
        name: input.name,
        owner_name: input.owner_name,
        starting_balance: starting,
        limits,
    };
    run_blocking(db, is_protobuf, move |conn| {
        let actor = queries::load_admin(conn, admin.0)?;
        banks::create_channel(conn, new_channel, &actor.username).map(|channel| bank_output(&channel))
    })
    .await
}

#[get("/banks")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn banks_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    run_blocking(db, is_protobuf, |conn| {
        let channels = banks::list_channels(conn)?;
        Ok(GenericOutput {
            bank_channels: channels.iter().map(Into::into).collect(),
            ..Default::default()
        })
    })
    .await
}

#[get("/bank/{id}")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn bank_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    id: web::Path<String>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    let Some(channel_id) = parse_id(&id) else {
        return responses::bad_parameter_http_response("id", is_protobuf);
    };
    run_blocking(db, is_protobuf, move |conn| {
        banks::load_channel(conn, channel_id).map(|channel| bank_output(&channel))
    })
    .await
}

/// Manual bank movements: `cashin`, `cashout` and `startingbalance`.
#[post("/bank/{id}/{movement}")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn bank_movement_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    admin: AdminIdentity,
    path: web::Path<(String, String)>,
    input: web::Json<proto::BankAmountInput>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    let (id, movement) = path.into_inner();
    let Some(channel_id) = parse_id(&id) else {
        return responses::bad_parameter_http_response("id", is_protobuf);
    };
    let input = input.into_inner();
    // a starting balance may be zero, cash movements may not
    let value = match movement.as_str() {
        "startingbalance" => amount::non_negative_from_wire(input.amount),
        "cashin" | "cashout" => amount::positive_from_wire(input.amount),
        _ => return responses::bad_parameter_http_response("movement", is_protobuf),
    };
    let Ok(value) = value else {
        return responses::bad_parameter_http_response("amount", is_protobuf);
    };

    run_blocking(db, is_protobuf, move |conn| {
        let actor = queries::load_admin(conn, admin.0)?;
        let note = input.remark.as_deref();
        let channel = match movement.as_str() {
            "cashin" => banks::cash_in(conn, channel_id, &value, &actor.username, note)?,
            "cashout" => banks::cash_out(conn, channel_id, &value, &actor.username, note)?,
            _ => banks::set_starting_balance(conn, channel_id, &value, &actor.username, note)?,
        };
        Ok(bank_output(&channel))
    })
    .await
}

#[post("/bank/{id}/status")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn bank_status_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    admin: AdminIdentity,
    id: web::Path<String>,
    input: web::Json<proto::BankStatusInput>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    let Some(channel_id) = parse_id(&id) else {
        return responses::bad_parameter_http_response("id", is_protobuf);
    };
    let active = input.is_active;
    run_blocking(db, is_protobuf, move |conn| {
        let actor = queries::load_admin(conn, admin.0)?;
        banks::set_status(conn, channel_id, active, &actor.username).map(|channel| bank_output(&channel))
    })
    .await
}

#[post("/bank/{id}/limits")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn bank_limits_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    admin: AdminIdentity,
    id: web::Path<String>,
    input: web::Json<proto::BankLimitsInput>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    let Some(channel_id) = parse_id(&id) else {
        return responses::bad_parameter_http_response("id", is_protobuf);
    };
    let limits = match limits_from_wire(&input) {
        Ok(limits) => limits,
        Err(field) => return responses::bad_parameter_http_response(field, is_protobuf),
    };
    run_blocking(db, is_protobuf, move |conn| {
        let actor = queries::load_admin(conn, admin.0)?;
        banks::set_limits(conn, channel_id, &limits, &actor.username).map(|channel| bank_output(&channel))
    })
    .await
}

#[get("/bank/{id}/logs")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn bank_logs_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    id: web::Path<String>,
    query: web::Query<LogQuery>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    let Some(channel_id) = parse_id(&id) else {
        return responses::bad_parameter_http_response("id", is_protobuf);
    };
    let limit = query.limit();
    run_blocking(db, is_protobuf, move |conn| {
        // listing logs of an unknown channel is a not_found, not an empty page
        banks::load_channel(conn, channel_id)?;
        let logs = banks::list_logs(conn, channel_id, limit)?;
        Ok(GenericOutput {
            bank_logs: logs.iter().map(Into::into).collect(),
            ..Default::default()
        })
    })
    .await
}

// users and admins

#[post("/users")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn create_user_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    admin: AdminIdentity,
    input: web::Json<proto::CreateUserInput>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    let input = input.into_inner();
    if input.username.trim().is_empty() {
        return responses::bad_parameter_http_response("username", is_protobuf);
    }
    let vip_level = input.vip_level.unwrap_or_else(|| "member".to_string());
    run_blocking(db, is_protobuf, move |conn| {
        let actor = queries::load_admin(conn, admin.0)?;
        let user = mutations::init_user(conn, &input.username, &vip_level)?;
        info!(username = %user.username, actor = %actor.username, "user provisioned");
        Ok(GenericOutput {
            wallet: Some((&user).into()),
            ..Default::default()
        })
    })
    .await
}

#[get("/wallet/{username}")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn wallet_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    username: web::Path<String>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    let req_username = username.into_inner();
    run_blocking(db, is_protobuf, move |conn| {
        let user = queries::load_user(conn, &req_username)?;
        Ok(GenericOutput {
            wallet: Some((&user).into()),
            ..Default::default()
        })
    })
    .await
}

#[get("/wallet/{username}/transactions")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn user_transactions_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    username: web::Path<String>,
    query: web::Query<LogQuery>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    let req_username = username.into_inner();
    let limit = query.limit();
    run_blocking(db, is_protobuf, move |conn| {
        queries::load_user(conn, &req_username)?;
        let txs = queries::list_user_transactions(conn, &req_username, limit)?;
        Ok(GenericOutput {
            transactions: txs.iter().map(Into::into).collect(),
            ..Default::default()
        })
    })
    .await
}

#[post("/admins")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn create_admin_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    admin: AdminIdentity,
    input: web::Json<proto::CreateAdminInput>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    let input = input.into_inner();
    if input.username.trim().is_empty() {
        return responses::bad_parameter_http_response("username", is_protobuf);
    }
    run_blocking(db, is_protobuf, move |conn| {
        // the first admin bootstraps the table, every later one needs a known creator
        let creator = if queries::any_admin_exists(conn)? {
            queries::load_admin(conn, admin.0)?.username
        } else {
            "bootstrap".to_string()
        };
        let created = mutations::create_admin(conn, &input.username)?;
        info!(admin_id = created.id, creator = %creator, "admin provisioned");
        Ok(GenericOutput {
            admin_stats: Some((&created).into()),
            ..Default::default()
        })
    })
    .await
}

#[get("/admin/{id}/stats")]
#[instrument(skip(db, accept), fields(request_id = request_id.as_str()))]
pub async fn admin_stats_handler(
    db: web::Data<DbPool>,
    request_id: RequestId,
    accept: web::Header<header::Accept>,
    id: web::Path<String>,
) -> HttpResponse {
    let is_protobuf = responses::wants_protobuf(&accept);
    let Some(req_id) = parse_id(&id) else {
        return responses::bad_parameter_http_response("id", is_protobuf);
    };
    run_blocking(db, is_protobuf, move |conn| {
        let stats = queries::load_admin(conn, req_id)?;
        Ok(GenericOutput {
            admin_stats: Some((&stats).into()),
            ..Default::default()
        })
    })
    .await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin/api")
            .service(submit_handler)
            .service(approve_handler)
            .service(reject_handler)
            .service(revert_handler)
            .service(transaction_handler)
            .service(kiosk_handler)
            .service(kiosk_adjust_handler)
            .service(kiosk_status_handler)
            .service(kiosk_min_balance_handler)
            .service(kiosk_logs_handler)
            .service(create_bank_handler)
            .service(banks_handler)
            .service(bank_handler)
            .service(bank_status_handler)
            .service(bank_limits_handler)
            .service(bank_logs_handler)
            .service(bank_movement_handler)
            .service(create_user_handler)
            .service(wallet_handler)
            .service(user_transactions_handler)
            .service(create_admin_handler)
            .service(admin_stats_handler),
    );
}
