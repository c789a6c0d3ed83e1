use super::account::{AccountId, Money};
use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Globally unique payment identifier; never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

impl PaymentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Result<Self, LedgerError> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|e| LedgerError::Parse(format!("invalid payment id {value:?}: {e}")))
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-form payment label such as `auto` or `food`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub String);

impl Category {
    pub fn new(category: impl Into<String>) -> Self {
        Self(category.into())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a payment.
///
/// `InProgress` is the initial state. `Failed` is terminal and is only reached
/// through [`Payment::reject`]. `Completed` is accepted from snapshots but no
/// ledger operation produces it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
pub enum PaymentStatus {
    #[default]
    #[serde(rename = "INPROGRESS")]
    InProgress,
    #[serde(rename = "OK")]
    Completed,
    #[serde(rename = "FAIL")]
    Failed,
}

/// A debit against an account. Field order matches the
/// `id;amount;category;accountID;status` snapshot record.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Payment {
    pub id: PaymentId,
    pub amount: Money,
    pub category: Category,
    pub account_id: AccountId,
    pub status: PaymentStatus,
}

impl Payment {
    pub fn new(account_id: AccountId, amount: Money, category: Category) -> Self {
        Self {
            id: PaymentId::new(),
            amount,
            category,
            account_id,
            status: PaymentStatus::InProgress,
        }
    }

    /// Moves the payment to `Failed` and returns the amount owed back to the
    /// account. The caller must credit it while still holding the ledger lock.
    pub fn reject(&mut self) -> Result<Money, LedgerError> {
        match self.status {
            PaymentStatus::Failed => Err(LedgerError::PaymentAlreadyRejected),
            PaymentStatus::InProgress | PaymentStatus::Completed => {
                self.status = PaymentStatus::Failed;
                Ok(self.amount)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment() -> Payment {
        Payment::new(AccountId(1), Money::new(1_000_00), Category::new("auto"))
    }

    #[test]
    fn test_new_payment_is_in_progress() {
        let payment = payment();
        assert_eq!(payment.status, PaymentStatus::InProgress);
        assert_ne!(payment.id, PaymentId::new());
    }

    #[test]
    fn test_reject_is_terminal() {
        let mut payment = payment();
        assert_eq!(payment.reject().unwrap(), Money::new(1_000_00));
        assert_eq!(payment.status, PaymentStatus::Failed);

        assert!(matches!(
            payment.reject(),
            Err(LedgerError::PaymentAlreadyRejected)
        ));
        assert_eq!(payment.status, PaymentStatus::Failed);
    }

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::InProgress).unwrap(),
            "\"INPROGRESS\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Completed).unwrap(),
            "\"OK\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Failed).unwrap(),
            "\"FAIL\""
        );
    }

    #[test]
    fn test_parse_payment_id() {
        let id = PaymentId::new();
        assert_eq!(PaymentId::parse(&id.to_string()).unwrap(), id);
        assert!(matches!(
            PaymentId::parse("not-a-uuid"),
            Err(LedgerError::Parse(_))
        ));
    }
}
