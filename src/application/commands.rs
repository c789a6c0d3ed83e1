use super::ledger::Ledger;
use crate::domain::account::{Account, AccountId, Money, Phone};
use crate::domain::command::{Command, CommandType};
use crate::domain::favorite::{Favorite, FavoriteId};
use crate::domain::payment::{Category, Payment, PaymentId};
use crate::error::{LedgerError, Result};

/// What a successfully executed [`Command`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Registered(Account),
    Deposited,
    Paid(Payment),
    Rejected,
    Favorited(Favorite),
}

impl Ledger {
    /// Runs one script command against the ledger.
    pub async fn execute(&self, command: Command) -> Result<Outcome> {
        match command.r#type {
            CommandType::Register => {
                let phone = required(command.phone, "phone", command.r#type)?;
                Ok(Outcome::Registered(
                    self.register_account(Phone::new(phone)).await?,
                ))
            }
            CommandType::Deposit => {
                let account = required(command.account, "account", command.r#type)?;
                let amount = required(command.amount, "amount", command.r#type)?;
                self.deposit(AccountId(account), Money::new(amount)).await?;
                Ok(Outcome::Deposited)
            }
            CommandType::Pay => {
                let account = required(command.account, "account", command.r#type)?;
                let amount = required(command.amount, "amount", command.r#type)?;
                let category = required(command.category, "category", command.r#type)?;
                let payment = self
                    .pay(AccountId(account), Money::new(amount), Category::new(category))
                    .await?;
                Ok(Outcome::Paid(payment))
            }
            CommandType::Reject => {
                let id = payment_reference(command.reference, command.r#type)?;
                self.reject(id).await?;
                Ok(Outcome::Rejected)
            }
            CommandType::Repeat => {
                let id = payment_reference(command.reference, command.r#type)?;
                Ok(Outcome::Paid(self.repeat(id).await?))
            }
            CommandType::Favorite => {
                let id = payment_reference(command.reference, command.r#type)?;
                let name = command.name.unwrap_or_default();
                Ok(Outcome::Favorited(self.favorite_payment(id, name).await?))
            }
            CommandType::PayFavorite => {
                let reference = required(command.reference, "reference", command.r#type)?;
                let id = FavoriteId::parse(&reference)?;
                Ok(Outcome::Paid(self.pay_from_favorite(id).await?))
            }
        }
    }
}

fn required<T>(value: Option<T>, column: &str, command: CommandType) -> Result<T> {
    value.ok_or_else(|| LedgerError::Parse(format!("{command:?} command is missing {column}")))
}

fn payment_reference(reference: Option<String>, command: CommandType) -> Result<PaymentId> {
    PaymentId::parse(&required(reference, "reference", command)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(r#type: CommandType) -> Command {
        Command {
            r#type,
            phone: None,
            account: None,
            amount: None,
            category: None,
            reference: None,
            name: None,
        }
    }

    #[tokio::test]
    async fn test_execute_script_flow() {
        let ledger = Ledger::new();

        let Outcome::Registered(account) = ledger
            .execute(Command {
                phone: Some("+992000000001".to_string()),
                ..command(CommandType::Register)
            })
            .await
            .unwrap()
        else {
            panic!("expected a registered account");
        };

        ledger
            .execute(Command {
                account: Some(account.id.0),
                amount: Some(10_000),
                ..command(CommandType::Deposit)
            })
            .await
            .unwrap();

        let Outcome::Paid(payment) = ledger
            .execute(Command {
                account: Some(account.id.0),
                amount: Some(1_000),
                category: Some("auto".to_string()),
                ..command(CommandType::Pay)
            })
            .await
            .unwrap()
        else {
            panic!("expected a payment");
        };

        let outcome = ledger
            .execute(Command {
                reference: Some(payment.id.to_string()),
                ..command(CommandType::Reject)
            })
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Rejected);

        let balance = ledger.find_account_by_id(account.id).await.unwrap().balance;
        assert_eq!(balance, Money::new(10_000));
    }

    #[tokio::test]
    async fn test_missing_column_is_a_parse_error() {
        let ledger = Ledger::new();
        let result = ledger.execute(command(CommandType::Pay)).await;
        assert!(matches!(result, Err(LedgerError::Parse(_))));
    }

    #[tokio::test]
    async fn test_invalid_reference_is_a_parse_error() {
        let ledger = Ledger::new();
        let result = ledger
            .execute(Command {
                reference: Some("42".to_string()),
                ..command(CommandType::Repeat)
            })
            .await;
        assert!(matches!(result, Err(LedgerError::Parse(_))));
    }
}
