use bigdecimal::BigDecimal;

use crate::error::{BalanceSource, LedgerError};
use crate::lifecycle::LedgerEntryType;

/// The mutable part of a bank channel. The current balance is never stored
/// independently of the counters; it is always derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct BankCounters {
    pub starting_balance: BigDecimal,
    pub total_deposits: BigDecimal,
    pub total_withdrawals: BigDecimal,
    pub total_cash_in: BigDecimal,
    pub total_cash_out: BigDecimal,
}

impl BankCounters {
    pub fn current_balance(&self) -> BigDecimal {
        &self.starting_balance + &self.total_deposits - &self.total_withdrawals + &self.total_cash_in
            - &self.total_cash_out
    }

    /// Applies one ledger entry, touching exactly one counter. For
    /// `AdjustStartingBalance` the amount replaces the starting balance.
    pub fn apply(&self, entry: LedgerEntryType, amount: &BigDecimal) -> Result<BankCounters, LedgerError> {
        let mut next = self.clone();
        match entry {
            LedgerEntryType::Deposit => next.total_deposits += amount,
            LedgerEntryType::RevertedDeposit => next.total_deposits -= amount,
            LedgerEntryType::Withdraw => next.total_withdrawals += amount,
            LedgerEntryType::RevertedWithdraw => next.total_withdrawals -= amount,
            LedgerEntryType::CashIn => next.total_cash_in += amount,
            LedgerEntryType::CashOut => {
                let available = self.current_balance();
                if amount > &available {
                    return Err(LedgerError::InsufficientBalance {
                        balance: BalanceSource::BankChannel,
                        available: available.to_string(),
                        required: amount.to_string(),
                    });
                }
                next.total_cash_out += amount
            }
            LedgerEntryType::AdjustStartingBalance => next.starting_balance = amount.clone(),
        }
        Ok(next)
    }
}
