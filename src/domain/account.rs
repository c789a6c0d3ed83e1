use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A monetary value in the smallest currency unit.
///
/// Integer arithmetic only, so splitting a sum across workers can never change
/// its result. Arithmetic is checked: a result outside `i64` is
/// [`LedgerError::AmountOverflow`], never a wrapped value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Self = Self(0);

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self, LedgerError> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(LedgerError::AmountOverflow)
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self, LedgerError> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(LedgerError::AmountOverflow)
    }

    /// Adds up `values`, stopping at the first overflow.
    pub fn checked_sum<I>(values: I) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = Self>,
    {
        values
            .into_iter()
            .try_fold(Self::ZERO, |total, value| total.checked_add(value))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A strictly positive amount accepted by deposits and payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Money);

impl Amount {
    pub fn new(value: Money) -> Result<Self, LedgerError> {
        if value > Money::ZERO {
            Ok(Self(value))
        } else {
            Err(LedgerError::AmountMustBePositive)
        }
    }

    pub fn money(&self) -> Money {
        self.0
    }
}

impl TryFrom<Money> for Amount {
    type Error = LedgerError;

    fn try_from(value: Money) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Money {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AccountId(pub i64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contact key of an account, unique across the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phone(pub String);

impl Phone {
    pub fn new(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered wallet account.
///
/// Field order matches the `id;phone;balance` snapshot record.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Account {
    pub id: AccountId,
    pub phone: Phone,
    /// Never negative: every debit goes through [`Account::withdraw`].
    pub balance: Money,
}

impl Account {
    pub fn new(id: AccountId, phone: Phone) -> Self {
        Self {
            id,
            phone,
            balance: Money::ZERO,
        }
    }

    /// Credits the balance. The balance is untouched when the credit would
    /// overflow.
    pub fn deposit(&mut self, amount: Amount) -> Result<(), LedgerError> {
        self.balance = self.balance.checked_add(amount.money())?;
        Ok(())
    }

    /// Debits the balance, failing closed when it would go negative.
    pub fn withdraw(&mut self, amount: Amount) -> Result<(), LedgerError> {
        if self.balance >= amount.money() {
            self.balance = self.balance.checked_sub(amount.money())?;
            Ok(())
        } else {
            Err(LedgerError::NotEnoughBalance)
        }
    }

    /// Returns money previously taken by [`Account::withdraw`].
    pub fn refund(&mut self, amount: Money) -> Result<(), LedgerError> {
        self.balance = self.balance.checked_add(amount)?;
        Ok(())
    }
}
