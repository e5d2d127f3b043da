//! Domain types representing transaction categories.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::*;
use crate::transaction::TransactionKind;

/// Label shown for transactions whose category no longer exists.
pub const UNCATEGORIZED_LABEL: &str = "Non catégorisé";

/// Categorises transactions for budgeting and reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    #[serde(default)]
    pub color: String,
}

impl Category {
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            icon: String::new(),
            kind,
            color: String::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_style(mut self, icon: impl Into<String>, color: impl Into<String>) -> Self {
        self.icon = icon.into();
        self.color = color.into();
        self
    }

    /// Returns `true` when transactions of `kind` may use this category.
    pub fn accepts(&self, kind: TransactionKind) -> bool {
        match self.kind {
            CategoryKind::Both => true,
            CategoryKind::Income => kind == TransactionKind::Income,
            CategoryKind::Expense => kind == TransactionKind::Expense,
        }
    }

    pub fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}

/// Resolves a category name, falling back to [`UNCATEGORIZED_LABEL`] for dangling ids.
pub fn category_name<'a>(categories: &'a [Category], id: &str) -> &'a str {
    find_by_id(categories, id)
        .map(|category| category.name.as_str())
        .unwrap_or(UNCATEGORIZED_LABEL)
}

/// Categories eligible for budgets (expense or mixed).
pub fn expense_categories(categories: &[Category]) -> Vec<&Category> {
    categories
        .iter()
        .filter(|category| category.accepts(TransactionKind::Expense))
        .collect()
}

/// Supported category types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
    Both,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryKind::Income => "Income",
            CategoryKind::Expense => "Expense",
            CategoryKind::Both => "Both",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub kind: Option<CategoryKind>,
    pub color: Option<String>,
}
