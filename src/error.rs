use thiserror::Error;

use crate::lifecycle::TransactionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Transaction,
    User,
    Admin,
    BankChannel,
    CommissionReport,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Transaction => "transaction",
            Entity::User => "user",
            Entity::Admin => "admin",
            Entity::BankChannel => "bank channel",
            Entity::CommissionReport => "agent commission report",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceSource {
    KioskPool,
    BankChannel,
    Wallet,
}

impl BalanceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceSource::KioskPool => "kiosk pool",
            BalanceSource::BankChannel => "bank channel",
            BalanceSource::Wallet => "wallet",
        }
    }
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{} not found: {id}", .entity.as_str())]
    NotFound { entity: Entity, id: String },

    #[error("transaction is {current}, cannot {action}")]
    InvalidState { current: TransactionStatus, action: &'static str },

    #[error("insufficient {} balance: available {available}, required {required}", .balance.as_str())]
    InsufficientBalance {
        balance: BalanceSource,
        available: String,
        required: String,
    },

    #[error("external dependency failure: {0}")]
    ExternalDependency(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

impl LedgerError {
    pub fn not_found(entity: Entity, id: impl ToString) -> Self {
        LedgerError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    // business-rule failures are reported to the caller, everything else is internal
    pub fn is_internal(&self) -> bool {
        matches!(self, LedgerError::Database(_) | LedgerError::Pool(_))
    }

    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::NotFound { .. } => "not_found",
            LedgerError::InvalidState { .. } => "invalid_state",
            LedgerError::InsufficientBalance { .. } => "insufficient_balance",
            LedgerError::ExternalDependency(_) => "external_dependency_failure",
            LedgerError::InvalidAmount(_) => "invalid_amount",
            LedgerError::InvalidRequest(_) => "invalid_request",
            LedgerError::Database(_) | LedgerError::Pool(_) => "internal_error",
        }
    }

    /// Message safe to show to API callers; persistence details never leave the server.
    pub fn client_message(&self) -> String {
        if self.is_internal() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_hides_internals() {
        let err = LedgerError::from(diesel::result::Error::NotFound);
        assert!(err.is_internal());
        assert_eq!(err.code(), "internal_error");
        assert_eq!(err.client_message(), "Internal server error");
    }

    #[test]
    fn test_business_messages() {
        let err = LedgerError::not_found(Entity::BankChannel, 42);
        assert_eq!(err.client_message(), "bank channel not found: 42");
        assert_eq!(err.code(), "not_found");

        let err = LedgerError::InvalidState {
            current: TransactionStatus::Reverted,
            action: "revert",
        };
        assert_eq!(err.to_string(), "transaction is reverted, cannot revert");
        assert!(!err.is_internal());

        let err = LedgerError::InsufficientBalance {
            balance: BalanceSource::KioskPool,
            available: "1100.00".into(),
            required: "1200.00".into(),
        };
        assert_eq!(
            err.to_string(),
            "insufficient kiosk pool balance: available 1100.00, required 1200.00"
        );
        assert_eq!(err.code(), "insufficient_balance");
    }
}
