use crate::api::{ApiClient, ApiError, Endpoint};
use crate::domain::{CalculatedTradesId, DetailOr, GroupId, GroupInfo, PortfolioGroup};
use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, AUTHORIZATION};

/// Authenticated calls the pipeline needs.
#[async_trait::async_trait]
pub trait PortfolioApi: Send + Sync {
    async fn list_groups(&self) -> Result<Vec<PortfolioGroup>, ApiError>;

    async fn group_info(&self, group_id: &GroupId) -> Result<GroupInfo, ApiError>;

    async fn impact(
        &self,
        group_id: &GroupId,
        calculated_trades_id: &CalculatedTradesId,
    ) -> Result<DetailOr, ApiError>;

    async fn place_orders(
        &self,
        group_id: &GroupId,
        calculated_trades_id: &CalculatedTradesId,
    ) -> Result<DetailOr, ApiError>;
}

/// An authenticated connection. Built once by `auth::authenticate`, never mutated.
#[derive(Debug, Clone)]
pub struct Session {
    client: ApiClient,
    auth_headers: HeaderMap,
}

impl Session {
    pub fn new(client: ApiClient, token: &str) -> Result<Self, InvalidHeaderValue> {
        let mut value = HeaderValue::from_str(&format!("JWT {token}"))?;
        value.set_sensitive(true);

        let mut auth_headers = HeaderMap::new();
        auth_headers.insert(AUTHORIZATION, value);

        Ok(Self {
            client,
            auth_headers,
        })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn auth_headers(&self) -> &HeaderMap {
        &self.auth_headers
    }
}

#[async_trait::async_trait]
impl PortfolioApi for Session {
    async fn list_groups(&self) -> Result<Vec<PortfolioGroup>, ApiError> {
        self.client
            .send::<_, ()>(Endpoint::PortfolioGroups, &self.auth_headers, None)
            .await
    }

    async fn group_info(&self, group_id: &GroupId) -> Result<GroupInfo, ApiError> {
        // The info endpoint may legitimately return `null` for an empty group.
        let info: Option<GroupInfo> = self
            .client
            .send::<_, ()>(Endpoint::GroupInfo { group_id }, &self.auth_headers, None)
            .await?;
        Ok(info.unwrap_or_default())
    }

    async fn impact(
        &self,
        group_id: &GroupId,
        calculated_trades_id: &CalculatedTradesId,
    ) -> Result<DetailOr, ApiError> {
        let endpoint = Endpoint::Impact {
            group_id,
            calculated_trades_id,
        };
        self.client
            .send::<_, ()>(endpoint, &self.auth_headers, None)
            .await
    }

    async fn place_orders(
        &self,
        group_id: &GroupId,
        calculated_trades_id: &CalculatedTradesId,
    ) -> Result<DetailOr, ApiError> {
        let endpoint = Endpoint::PlaceOrders {
            group_id,
            calculated_trades_id,
        };
        let empty = serde_json::json!({});
        self.client
            .send(endpoint, &self.auth_headers, Some(&empty))
            .await
    }
}
