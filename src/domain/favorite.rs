use super::account::{AccountId, Money};
use super::payment::{Category, Payment};
use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteId(Uuid);

impl FavoriteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Result<Self, LedgerError> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|e| LedgerError::Parse(format!("invalid favorite id {value:?}: {e}")))
    }
}

impl Default for FavoriteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FavoriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A saved payment template. Immutable once created.
///
/// Field order matches the `id;amount;category;accountID;name` snapshot record.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Favorite {
    pub id: FavoriteId,
    pub amount: Money,
    pub category: Category,
    pub account_id: AccountId,
    pub name: String,
}

impl Favorite {
    /// Snapshots the amount, category and owner of `payment`.
    pub fn from_payment(payment: &Payment, name: impl Into<String>) -> Self {
        Self {
            id: FavoriteId::new(),
            amount: payment.amount,
            category: payment.category.clone(),
            account_id: payment.account_id,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_copies_payment_template() {
        let payment = Payment::new(AccountId(7), Money::new(1_000_00), Category::new("food"));
        let favorite = Favorite::from_payment(&payment, "lunch");

        assert_eq!(favorite.amount, payment.amount);
        assert_eq!(favorite.category, payment.category);
        assert_eq!(favorite.account_id, payment.account_id);
        assert_eq!(favorite.name, "lunch");
    }
}
