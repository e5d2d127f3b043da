//! Investment holdings tracked against their cost basis.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: InvestmentKind,
    /// Cost basis.
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    pub purchase_date: NaiveDate,
    pub current_value: f64,
    pub last_update: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

impl Investment {
    pub fn new(
        name: impl Into<String>,
        kind: InvestmentKind,
        amount: f64,
        purchase_date: NaiveDate,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            kind,
            amount,
            quantity: None,
            purchase_date,
            current_value: amount,
            last_update: purchase_date,
            notes: String::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_valuation(mut self, current_value: f64, last_update: NaiveDate) -> Self {
        self.current_value = current_value;
        self.last_update = last_update;
        self
    }

    pub fn apply(&mut self, patch: InvestmentPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(purchase_date) = patch.purchase_date {
            self.purchase_date = purchase_date;
        }
        if let Some(current_value) = patch.current_value {
            self.current_value = current_value;
        }
        if let Some(last_update) = patch.last_update {
            self.last_update = last_update;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }
}

impl Identifiable for Investment {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Investment {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for Investment {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Asset classes. Serialized with the French tags used by stored data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentKind {
    /// Stocks.
    Action,
    Crypto,
    /// Real estate.
    Immobilier,
    /// Anything else.
    Autre,
}

impl fmt::Display for InvestmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InvestmentKind::Action => "Actions",
            InvestmentKind::Crypto => "Crypto",
            InvestmentKind::Immobilier => "Immobilier",
            InvestmentKind::Autre => "Autre",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvestmentPatch {
    pub name: Option<String>,
    pub kind: Option<InvestmentKind>,
    pub amount: Option<f64>,
    pub quantity: Option<Option<f64>>,
    pub purchase_date: Option<NaiveDate>,
    pub current_value: Option<f64>,
    pub last_update: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_investment_without_notes() {
        let raw = r#"{"id":"inv-1","name":"ETF Monde","type":"action","amount":1000,"quantity":12.5,"purchaseDate":"2024-01-10","currentValue":1180,"lastUpdate":"2025-04-01"}"#;
        let investment: Investment = serde_json::from_str(raw).expect("parse investment");
        assert_eq!(investment.kind, InvestmentKind::Action);
        assert_eq!(investment.quantity, Some(12.5));
        assert!(investment.notes.is_empty());
    }
}
