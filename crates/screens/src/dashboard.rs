//! Summary figures shown above the recent transactions.
//!
//! The figures are not computed here: they are read from a JSON document so
//! they can be swapped without touching the screens. A missing file falls
//! back to [`Dashboard::sample`].

use std::{fs, path::Path};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::DashboardError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dashboard {
    pub user_name: String,
    pub earning: f64,
    pub expenses: Vec<ExpenseItem>,
    pub income: Vec<IncomeItem>,
    pub spending: Vec<SpendingItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub name: String,
    pub amount: f64,
    /// Share of total expenses, 0–100.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeItem {
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingItem {
    pub name: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl Dashboard {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DashboardError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("{} not found, using sample dashboard", path.display());
                return Ok(Self::sample());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Built-in figures used when no dashboard file is configured.
    pub fn sample() -> Self {
        let expense = |name: &str, amount: f64, percentage: f64| ExpenseItem {
            name: name.to_string(),
            amount,
            percentage,
        };
        let income = |name: &str, amount: f64| IncomeItem {
            name: name.to_string(),
            amount,
        };
        let spending = |name: &str, amount: f64, (y, m, d): (i32, u32, u32)| SpendingItem {
            name: name.to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        };

        Self {
            user_name: "Sara".to_string(),
            earning: 7000.77,
            expenses: vec![
                expense("Alquiler", 1200.0, 47.0),
                expense("Comida", 1020.5, 40.0),
                expense("Transporte", 410.0, 16.0),
                expense("Otros", 180.25, 7.0),
            ],
            income: vec![
                income("Salario", 5500.0),
                income("Freelance", 1200.77),
                income("Intereses", 300.0),
            ],
            spending: vec![
                spending("Supermercado", 850.4, (2024, 5, 3)),
                spending("Gasolina", 600.0, (2024, 5, 2)),
                spending("Cine", 220.0, (2024, 4, 28)),
            ],
        }
    }

    pub fn expense_total(&self) -> f64 {
        self.expenses.iter().map(|item| item.amount).sum()
    }

    pub fn income_total(&self) -> f64 {
        self.income.iter().map(|item| item.amount).sum()
    }

    pub fn spending_total(&self) -> f64 {
        self.spending.iter().map(|item| item.amount).sum()
    }
}
