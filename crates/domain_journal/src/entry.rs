//! Transaction entries

use serde::{Deserialize, Serialize};

use core_kernel::{AccountType, Amount, CoreError, NominalCode, SignClass};

/// One posting of a transaction against an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEntry")]
pub struct Entry {
    code: NominalCode,
    amount: Amount,
    account_type: AccountType,
}

// Deserialization goes through `Entry::new` so stored entries are re-checked
#[derive(Deserialize)]
struct RawEntry {
    code: NominalCode,
    amount: Amount,
    account_type: AccountType,
}

impl TryFrom<RawEntry> for Entry {
    type Error = CoreError;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        Entry::new(raw.code, raw.amount, raw.account_type)
    }
}

impl Entry {
    /// Creates an entry oriented by `account_type`
    ///
    /// # Errors
    ///
    /// - `DummyAccountType` for the dummy type
    /// - `UnknownBalanceType` for the real type, which has no posting side
    pub fn new(code: NominalCode, amount: Amount, account_type: AccountType) -> Result<Self, CoreError> {
        match account_type.sign_class() {
            None => Err(CoreError::DummyAccountType),
            Some(SignClass::Real) => Err(CoreError::UnknownBalanceType(account_type.bits())),
            Some(SignClass::Debit | SignClass::Credit) => Ok(Self {
                code,
                amount,
                account_type,
            }),
        }
    }

    /// A plain debit entry
    pub fn debit(code: NominalCode, amount: Amount) -> Self {
        Self {
            code,
            amount,
            account_type: AccountType::DR,
        }
    }

    /// A plain credit entry
    pub fn credit(code: NominalCode, amount: Amount) -> Self {
        Self {
            code,
            amount,
            account_type: AccountType::CR,
        }
    }

    pub fn code(&self) -> &NominalCode {
        &self.code
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn is_debit(&self) -> bool {
        self.account_type.is_debit()
    }

    pub fn is_credit(&self) -> bool {
        self.account_type.is_credit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> NominalCode {
        NominalCode::new(s).unwrap()
    }

    #[test]
    fn test_orientation_follows_type() {
        let bank = Entry::new(code("1210"), Amount::new(100), AccountType::BANK).unwrap();
        let sales = Entry::new(code("4100"), Amount::new(100), AccountType::INCOME).unwrap();

        assert!(bank.is_debit());
        assert!(!bank.is_credit());
        assert!(sales.is_credit());
        assert_eq!(bank.amount(), Amount::new(100));
    }

    #[test]
    fn test_rejects_types_without_a_side() {
        assert_eq!(
            Entry::new(code("1"), Amount::new(1), AccountType::Dummy),
            Err(CoreError::DummyAccountType)
        );
        assert_eq!(
            Entry::new(code("1"), Amount::new(1), AccountType::REAL),
            Err(CoreError::UnknownBalanceType(1))
        );
    }

    #[test]
    fn test_deserialize_rechecks_type() {
        let ok: Entry =
            serde_json::from_str(r#"{"code":"1210","amount":100,"account_type":"bank"}"#).unwrap();
        assert!(ok.is_debit());

        let real = serde_json::from_str::<Entry>(r#"{"code":"0000","amount":1,"account_type":"real"}"#);
        assert!(real.is_err());
    }

    #[test]
    fn test_shorthands() {
        assert_eq!(Entry::debit(code("1"), Amount::new(5)).account_type(), AccountType::DR);
        assert_eq!(Entry::credit(code("2"), Amount::new(5)).account_type(), AccountType::CR);
    }
}
