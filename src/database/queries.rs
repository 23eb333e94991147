use diesel::prelude::*;
use diesel::PgConnection;

use crate::database::models;
use crate::error::{Entity, LedgerError};

pub fn load_transaction(conn: &mut PgConnection, req_id: i64) -> Result<models::MoneyTransaction, LedgerError> {
    use crate::schema::money_transaction::dsl::*;
    money_transaction
        .find(req_id)
        .first::<models::MoneyTransaction>(conn)
        .optional()?
        .ok_or_else(|| LedgerError::not_found(Entity::Transaction, req_id))
}

pub fn list_user_transactions(
    conn: &mut PgConnection,
    req_username: &str,
    req_limit: i64,
) -> Result<Vec<models::MoneyTransaction>, LedgerError> {
    use crate::schema::money_transaction::dsl::*;
    Ok(money_transaction
        .filter(username.eq(req_username))
        .order((created_at.desc(), id.desc()))
        .limit(req_limit)
        .load::<models::MoneyTransaction>(conn)?)
}

pub fn load_user(conn: &mut PgConnection, req_username: &str) -> Result<models::User, LedgerError> {
    use crate::schema::users::dsl::*;
    users
        .find(req_username)
        .first::<models::User>(conn)
        .optional()?
        .ok_or_else(|| LedgerError::not_found(Entity::User, req_username))
}

// same as load_user but holds the row until the surrounding transaction ends
pub fn lock_user(conn: &mut PgConnection, req_username: &str) -> Result<models::User, LedgerError> {
    use crate::schema::users::dsl::*;
    users
        .find(req_username)
        .for_update()
        .first::<models::User>(conn)
        .optional()?
        .ok_or_else(|| LedgerError::not_found(Entity::User, req_username))
}

pub fn load_admin(conn: &mut PgConnection, req_id: i64) -> Result<models::Admin, LedgerError> {
    use crate::schema::admin::dsl::*;
    admin
        .find(req_id)
        .first::<models::Admin>(conn)
        .optional()?
        .ok_or_else(|| LedgerError::not_found(Entity::Admin, req_id))
}

pub fn load_commission_report(
    conn: &mut PgConnection,
    req_id: i64,
) -> Result<models::AgentCommissionReport, LedgerError> {
    use crate::schema::agent_commission_report::dsl::*;
    agent_commission_report
        .find(req_id)
        .first::<models::AgentCommissionReport>(conn)
        .optional()?
        .ok_or_else(|| LedgerError::not_found(Entity::CommissionReport, req_id))
}

// an empty admin table lets the first admin be provisioned without a creator
pub fn any_admin_exists(conn: &mut PgConnection) -> Result<bool, LedgerError> {
    use crate::schema::admin::dsl::*;
    Ok(diesel::select(diesel::dsl::exists(admin.select(id))).get_result::<bool>(conn)?)
}
