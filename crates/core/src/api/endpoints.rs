use crate::domain::{CalculatedTradesId, GroupId};
use reqwest::Method;

/// Every route the client talks to, with its path parameters typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Login,
    PortfolioGroups,
    GroupInfo {
        group_id: &'a GroupId,
    },
    Impact {
        group_id: &'a GroupId,
        calculated_trades_id: &'a CalculatedTradesId,
    },
    PlaceOrders {
        group_id: &'a GroupId,
        calculated_trades_id: &'a CalculatedTradesId,
    },
}

impl Endpoint<'_> {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Login | Endpoint::PlaceOrders { .. } => Method::POST,
            Endpoint::PortfolioGroups | Endpoint::GroupInfo { .. } | Endpoint::Impact { .. } => {
                Method::GET
            }
        }
    }

    /// Path relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Login => "auth/login".to_string(),
            Endpoint::PortfolioGroups => "portfolioGroups/".to_string(),
            Endpoint::GroupInfo { group_id } => format!("portfolioGroups/{group_id}/info"),
            Endpoint::Impact {
                group_id,
                calculated_trades_id,
            } => format!("portfolioGroups/{group_id}/calculatedtrades/{calculated_trades_id}/impact"),
            Endpoint::PlaceOrders {
                group_id,
                calculated_trades_id,
            } => format!(
                "portfolioGroups/{group_id}/calculatedtrades/{calculated_trades_id}/placeOrders"
            ),
        }
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.path())
    }
}
