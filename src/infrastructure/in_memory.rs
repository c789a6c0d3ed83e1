use crate::domain::account::{Account, AccountId, Amount, Money, Phone};
use crate::domain::favorite::{Favorite, FavoriteId};
use crate::domain::payment::{Payment, PaymentId};
use crate::domain::ports::LedgerSnapshot;
use crate::error::{LedgerError, Result};
use tracing::warn;

/// The authoritative account, payment and favorite collections.
///
/// Collections are kept in insertion order and every lookup is a linear scan.
/// This type is not synchronized on its own; the `Ledger` wraps it in a lock
/// and is the only owner.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    next_account_id: i64,
    accounts: Vec<Account>,
    payments: Vec<Payment>,
    favorites: Vec<Favorite>,
}

impl InMemoryLedger {
    /// Creates a new, empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new account with the next identifier.
    pub fn insert_account(&mut self, phone: Phone) -> Result<&Account> {
        if self.accounts.iter().any(|account| account.phone == phone) {
            return Err(LedgerError::PhoneAlreadyRegistered);
        }

        self.next_account_id += 1;
        let index = self.accounts.len();
        self.accounts
            .push(Account::new(AccountId(self.next_account_id), phone));
        Ok(&self.accounts[index])
    }

    pub fn account(&self, id: AccountId) -> Result<&Account> {
        self.accounts
            .iter()
            .find(|account| account.id == id)
            .ok_or(LedgerError::AccountNotFound)
    }

    pub fn account_mut(&mut self, id: AccountId) -> Result<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|account| account.id == id)
            .ok_or(LedgerError::AccountNotFound)
    }

    pub fn insert_payment(&mut self, payment: Payment) -> &Payment {
        let index = self.payments.len();
        self.payments.push(payment);
        &self.payments[index]
    }

    pub fn payment(&self, id: PaymentId) -> Result<&Payment> {
        self.payments
            .iter()
            .find(|payment| payment.id == id)
            .ok_or(LedgerError::PaymentNotFound)
    }

    /// Borrows a payment and its owning account together, so a status change
    /// and the matching balance change happen under one `&mut` borrow.
    pub fn payment_with_account_mut(
        &mut self,
        id: PaymentId,
    ) -> Result<(&mut Payment, &mut Account)> {
        let payment = self
            .payments
            .iter_mut()
            .find(|payment| payment.id == id)
            .ok_or(LedgerError::PaymentNotFound)?;
        let account = self
            .accounts
            .iter_mut()
            .find(|account| account.id == payment.account_id)
            .ok_or(LedgerError::AccountNotFound)?;
        Ok((payment, account))
    }

    pub fn insert_favorite(&mut self, favorite: Favorite) -> &Favorite {
        let index = self.favorites.len();
        self.favorites.push(favorite);
        &self.favorites[index]
    }

    pub fn favorite(&self, id: FavoriteId) -> Result<&Favorite> {
        self.favorites
            .iter()
            .find(|favorite| favorite.id == id)
            .ok_or(LedgerError::FavoriteNotFound)
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            accounts: self.accounts.clone(),
            payments: self.payments.clone(),
            favorites: self.favorites.clone(),
        }
    }

    /// Merges a snapshot, skipping records whose identifier is already present.
    ///
    /// Records that would break a ledger invariant are skipped with a warning:
    /// accounts with a negative balance or a phone already in use, and payments
    /// or favorites with a non-positive amount or an unknown account.
    ///
    /// Returns how many records were added. The account counter moves past the
    /// largest known id so freshly registered accounts never collide.
    pub fn merge(&mut self, snapshot: LedgerSnapshot) -> usize {
        let mut added = 0;

        for account in snapshot.accounts {
            if self.account(account.id).is_ok() {
                continue;
            }
            if account.balance < Money::ZERO {
                warn!(
                    account = %account.id,
                    balance = %account.balance,
                    "skipping imported account with negative balance"
                );
                continue;
            }
            if self.accounts.iter().any(|known| known.phone == account.phone) {
                warn!(
                    account = %account.id,
                    phone = %account.phone,
                    "skipping imported account with duplicate phone"
                );
                continue;
            }
            self.next_account_id = self.next_account_id.max(account.id.0);
            self.accounts.push(account);
            added += 1;
        }
        for payment in snapshot.payments {
            if self.payment(payment.id).is_ok() {
                continue;
            }
            if let Err(reason) = self.check_import(payment.account_id, payment.amount) {
                warn!(
                    payment = %payment.id,
                    account = %payment.account_id,
                    amount = %payment.amount,
                    "skipping imported payment: {reason}"
                );
                continue;
            }
            self.payments.push(payment);
            added += 1;
        }
        for favorite in snapshot.favorites {
            if self.favorite(favorite.id).is_ok() {
                continue;
            }
            if let Err(reason) = self.check_import(favorite.account_id, favorite.amount) {
                warn!(
                    favorite = %favorite.id,
                    account = %favorite.account_id,
                    amount = %favorite.amount,
                    "skipping imported favorite: {reason}"
                );
                continue;
            }
            self.favorites.push(favorite);
            added += 1;
        }

        added
    }

    fn check_import(&self, account_id: AccountId, amount: Money) -> Result<()> {
        Amount::new(amount)?;
        self.account(account_id)?;
        Ok(())
    }
}
