use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum CommandType {
    Register,
    Deposit,
    Pay,
    Reject,
    Repeat,
    Favorite,
    PayFavorite,
}

/// One row of a command script.
///
/// Which columns are required depends on the type: `register` needs `phone`,
/// `deposit` needs `account` and `amount`, `pay` also needs `category`,
/// `reject`/`repeat`/`favorite`/`pay_favorite` need `reference` (a payment or
/// favorite id) and `favorite` takes an optional `name`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Command {
    pub r#type: CommandType,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub account: Option<i64>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_deserialization() {
        let csv = "type, phone, account, amount, category, reference, name\npay, , 1, 100, auto, , ";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes());

        let command: Command = reader
            .deserialize()
            .next()
            .unwrap()
            .expect("Failed to deserialize command");
        assert_eq!(command.r#type, CommandType::Pay);
        assert_eq!(command.phone, None);
        assert_eq!(command.account, Some(1));
        assert_eq!(command.amount, Some(100));
        assert_eq!(command.category.as_deref(), Some("auto"));
        assert_eq!(command.reference, None);
    }

    #[test]
    fn test_pay_favorite_type_name() {
        let csv = "type, reference\npay_favorite, abc";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes());

        let command: Command = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(command.r#type, CommandType::PayFavorite);
        assert_eq!(command.reference.as_deref(), Some("abc"));
        assert_eq!(command.amount, None);
    }
}
