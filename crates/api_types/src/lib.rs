use serde::{Deserialize, Serialize};

pub mod transaction {
    use std::{fmt, str::FromStr};

    use thiserror::Error;

    use super::*;

    /// Category of a transaction.
    ///
    /// The backend speaks Spanish on the wire:
    /// - `ingreso`: money coming in.
    /// - `gasto`: money going out.
    /// - `transferencia`: money moved between accounts.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum TransactionKind {
        #[default]
        #[serde(rename = "ingreso")]
        Income,
        #[serde(rename = "gasto")]
        Expense,
        #[serde(rename = "transferencia")]
        Transfer,
    }

    impl TransactionKind {
        pub const ALL: [TransactionKind; 3] = [Self::Income, Self::Expense, Self::Transfer];

        /// Returns the canonical wire value.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Income => "ingreso",
                Self::Expense => "gasto",
                Self::Transfer => "transferencia",
            }
        }

        /// Human label shown next to the radio button.
        pub fn label(self) -> &'static str {
            match self {
                Self::Income => "Ingreso",
                Self::Expense => "Gasto",
                Self::Transfer => "Transferencia",
            }
        }

        pub fn next(self) -> Self {
            match self {
                Self::Income => Self::Expense,
                Self::Expense => Self::Transfer,
                Self::Transfer => Self::Income,
            }
        }

        pub fn prev(self) -> Self {
            match self {
                Self::Income => Self::Transfer,
                Self::Expense => Self::Income,
                Self::Transfer => Self::Expense,
            }
        }
    }

    impl fmt::Display for TransactionKind {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    #[error("unknown transaction type \"{0}\"")]
    pub struct UnknownKind(pub String);

    impl FromStr for TransactionKind {
        type Err = UnknownKind;

        /// Case-insensitive: `"INGRESO"` and `"ingreso"` are the same kind.
        fn from_str(s: &str) -> Result<Self, Self::Err> {
            Self::ALL
                .into_iter()
                .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
                .ok_or_else(|| UnknownKind(s.to_string()))
        }
    }

    /// A transaction as stored by the backend.
    ///
    /// `type` is kept as the raw string the server sent; use
    /// [`Transaction::kind`] to classify it.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Transaction {
        pub id: i64,
        pub amount: f64,
        #[serde(rename = "type")]
        pub kind: String,
        /// Missing or `null` on the wire reads as empty.
        #[serde(default, deserialize_with = "null_as_empty")]
        pub description: String,
    }

    fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }

    impl Transaction {
        pub fn kind(&self) -> Option<TransactionKind> {
            self.kind.parse().ok()
        }
    }

    /// Body of `POST /transaction`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub amount: f64,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub description: String,
    }
}

pub mod error {
    use super::*;

    /// Optional body carried by failed responses.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ErrorBody {
        #[serde(default)]
        pub message: Option<String>,
    }
}
