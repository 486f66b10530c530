use crate::api::error::detail_text;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(GroupId);
string_id!(CalculatedTradesId);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioGroup {
    pub id: GroupId,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupInfo {
    #[serde(default)]
    pub calculated_trades: Option<CalculatedTrades>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatedTrades {
    pub id: CalculatedTradesId,
    #[serde(default)]
    pub trades: Vec<Trade>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub action: String,
    pub units: f64,
    pub universal_symbol: UniversalSymbol,
    pub price: f64,
}

impl Trade {
    pub fn symbol(&self) -> &str {
        &self.universal_symbol.symbol
    }

    pub fn currency(&self) -> &str {
        &self.universal_symbol.currency.code
    }

    pub fn total(&self) -> f64 {
        self.price * self.units
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniversalSymbol {
    pub symbol: String,
    pub currency: Currency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
}

/// Body of the impact and place-orders endpoints.
///
/// Any object carrying a `detail` key is the server declining; everything else
/// (including an empty body) is the success payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DetailOr {
    Detail { detail: Value },
    Payload(Value),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImpactResult {
    Approved,
    Rejected { detail: String },
}

impl From<DetailOr> for ImpactResult {
    fn from(body: DetailOr) -> Self {
        match body {
            DetailOr::Detail { detail } => ImpactResult::Rejected {
                detail: detail_text(&detail),
            },
            DetailOr::Payload(_) => ImpactResult::Approved,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderResult {
    Executed,
    Declined { detail: String },
}

impl From<DetailOr> for OrderResult {
    fn from(body: DetailOr) -> Self {
        match body {
            DetailOr::Detail { detail } => OrderResult::Declined {
                detail: detail_text(&detail),
            },
            DetailOr::Payload(_) => OrderResult::Executed,
        }
    }
}
