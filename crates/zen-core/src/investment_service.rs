//! Profit and loss for investments measured against their cost basis.

use serde::Serialize;
use zen_domain::{find_by_id, Investment};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub profit_loss: f64,
    pub profit_loss_percentage: f64,
    /// Break-even counts as profit.
    pub is_profit: bool,
}

impl Performance {
    fn from_values(cost_basis: f64, current_value: f64) -> Self {
        let profit_loss = current_value - cost_basis;
        let profit_loss_percentage = if cost_basis == 0.0 {
            0.0
        } else {
            profit_loss * 100.0 / cost_basis
        };
        Self {
            profit_loss,
            profit_loss_percentage,
            is_profit: profit_loss >= 0.0,
        }
    }
}

/// Aggregate of every holding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub invested: f64,
    pub current_value: f64,
    pub profit_loss: f64,
    pub profit_loss_percentage: f64,
    pub is_profit: bool,
}

pub struct InvestmentService;

impl InvestmentService {
    pub fn performance(investment: &Investment) -> Performance {
        Performance::from_values(investment.amount, investment.current_value)
    }

    /// Unknown ids yield a zeroed, non-profit result.
    pub fn performance_for(investments: &[Investment], id: &str) -> Performance {
        find_by_id(investments, id)
            .map(Self::performance)
            .unwrap_or_default()
    }

    pub fn portfolio_summary(investments: &[Investment]) -> PortfolioSummary {
        let invested: f64 = investments.iter().map(|inv| inv.amount).sum();
        let current_value: f64 = investments.iter().map(|inv| inv.current_value).sum();
        let Performance {
            profit_loss,
            profit_loss_percentage,
            is_profit,
        } = Performance::from_values(invested, current_value);
        PortfolioSummary {
            invested,
            current_value,
            profit_loss,
            profit_loss_percentage,
            is_profit,
        }
    }
}
