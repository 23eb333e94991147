//! Closed vocabularies of the money-movement lifecycle and the pure rules that
//! decide which transitions and balance effects an admin action produces.

use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    Bonus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    Pending,
    Approved,
    Rejected,
    Reverted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Approve,
    Reject,
    Revert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KioskOperation {
    Add,
    Subtract,
}

/// Tag stored on every bank transaction log row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerEntryType {
    Deposit,
    Withdraw,
    CashIn,
    CashOut,
    AdjustStartingBalance,
    RevertedDeposit,
    RevertedWithdraw,
}

macro_rules! string_enum {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = LedgerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($ty::$variant),)+
                    other => Err(LedgerError::InvalidRequest(format!(
                        "unknown {}: {}",
                        stringify!($ty),
                        other
                    ))),
                }
            }
        }
    };
}

string_enum!(TransactionKind {
    Deposit => "deposit",
    Withdraw => "withdraw",
    Bonus => "bonus",
});

string_enum!(TransactionStatus {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
    Reverted => "reverted",
});

string_enum!(LifecycleAction {
    Approve => "approve",
    Reject => "reject",
    Revert => "revert",
});

string_enum!(KioskOperation {
    Add => "add",
    Subtract => "subtract",
});

string_enum!(LedgerEntryType {
    Deposit => "deposit",
    Withdraw => "withdraw",
    CashIn => "cashin",
    CashOut => "cashout",
    AdjustStartingBalance => "adjust starting balance",
    RevertedDeposit => "reverted deposit",
    RevertedWithdraw => "reverted withdraw",
});

impl TransactionStatus {
    /// Status required before `action` may run.
    pub fn required_for(action: LifecycleAction) -> TransactionStatus {
        match action {
            LifecycleAction::Approve | LifecycleAction::Reject => TransactionStatus::Pending,
            LifecycleAction::Revert => TransactionStatus::Approved,
        }
    }

    /// Status after a successful `action`, or `InvalidState` when the
    /// transition is not part of the lifecycle.
    pub fn transition(self, action: LifecycleAction) -> Result<TransactionStatus, LedgerError> {
        match (self, action) {
            (TransactionStatus::Pending, LifecycleAction::Approve) => Ok(TransactionStatus::Approved),
            (TransactionStatus::Pending, LifecycleAction::Reject) => Ok(TransactionStatus::Rejected),
            (TransactionStatus::Approved, LifecycleAction::Revert) => Ok(TransactionStatus::Reverted),
            (current, action) => Err(LedgerError::InvalidState {
                current,
                action: action.as_str(),
            }),
        }
    }
}

impl TransactionKind {
    pub fn uses_bank_channel(&self) -> bool {
        !matches!(self, TransactionKind::Bonus)
    }

    /// Deposits and bonuses release money to the user, so reverting them
    /// must claw it back from the wallet.
    pub fn revert_needs_wallet_floor(&self) -> bool {
        matches!(self, TransactionKind::Deposit | TransactionKind::Bonus)
    }

    /// Kiosk pool movement caused by `action`, if any.
    pub fn kiosk_operation(&self, action: LifecycleAction) -> Option<KioskOperation> {
        let on_approve = match self {
            TransactionKind::Deposit | TransactionKind::Bonus => KioskOperation::Subtract,
            TransactionKind::Withdraw => KioskOperation::Add,
        };
        match action {
            LifecycleAction::Approve => Some(on_approve),
            LifecycleAction::Revert => Some(on_approve.opposite()),
            LifecycleAction::Reject => None,
        }
    }

    /// Bank ledger entry caused by `action`, if any.
    pub fn ledger_entry(&self, action: LifecycleAction) -> Option<LedgerEntryType> {
        match (self, action) {
            (TransactionKind::Deposit, LifecycleAction::Approve) => Some(LedgerEntryType::Deposit),
            (TransactionKind::Deposit, LifecycleAction::Revert) => Some(LedgerEntryType::RevertedDeposit),
            (TransactionKind::Withdraw, LifecycleAction::Approve) => Some(LedgerEntryType::Withdraw),
            (TransactionKind::Withdraw, LifecycleAction::Revert) => Some(LedgerEntryType::RevertedWithdraw),
            _ => None,
        }
    }
}

impl KioskOperation {
    pub fn opposite(self) -> KioskOperation {
        match self {
            KioskOperation::Add => KioskOperation::Subtract,
            KioskOperation::Subtract => KioskOperation::Add,
        }
    }
}

/// Elapsed time between creation and processing, rendered as `HH:MM:SS`.
/// Hours are not wrapped at 24 and negative spans clamp to zero.
pub fn format_process_time(elapsed: chrono::Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
