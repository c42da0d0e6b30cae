//! Script gateway adapter
//!
//! All mutations and the login exchange go through a single script
//! endpoint that dispatches on a function name. Requests are
//! `{"function": name, "parameters": [...]}`; responses are an envelope
//! with `status` of `success` or `error`. A reported application error
//! and a body that is not an envelope at all are distinct failures: the
//! former carries the server's message, the latter is a parse problem.

use async_trait::async_trait;
use orderdesk_core::auth::AuthGateway;
use orderdesk_core::orders::OrdersGateway;
use orderdesk_domain::{
    GatewayConfig, OrderDeskError, OrderPayload, PriceUpdate, Result, Status,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::http::HttpClient;

#[derive(Serialize)]
struct RpcRequest<'a> {
    function: &'a str,
    parameters: Vec<Value>,
}

#[derive(Deserialize)]
struct RpcEnvelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    #[serde(default)]
    message: String,
}

/// Client for the script gateway endpoint.
pub struct ScriptGateway {
    http: HttpClient,
    config: GatewayConfig,
}

impl ScriptGateway {
    pub fn new(http: HttpClient, config: GatewayConfig) -> Self {
        Self { http, config }
    }

    async fn call(&self, function: &str, parameters: Vec<Value>) -> Result<Value> {
        debug!(function, "calling script gateway");
        let request = RpcRequest { function, parameters };
        let body = self.http.post_json(&self.config.exec_url, &request).await?;

        let envelope: RpcEnvelope = serde_json::from_str(&body).map_err(|_| {
            OrderDeskError::Parse("Niepoprawny format odpowiedzi z serwera".into())
        })?;

        match envelope.status.as_deref() {
            Some("success") => Ok(envelope.data),
            _ => {
                let message = envelope
                    .error
                    .map(|e| e.message)
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "Niepoprawna odpowiedź z serwera".to_string());
                Err(OrderDeskError::Network(message))
            }
        }
    }
}

#[async_trait]
impl AuthGateway for ScriptGateway {
    async fn login_user(&self, sub: &str) -> Result<String> {
        let data = self.call("loginUser", vec![json!(sub)]).await?;
        data.get("token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| OrderDeskError::Auth("Nie udało się uzyskać tokena".into()))
    }
}

#[async_trait]
impl OrdersGateway for ScriptGateway {
    async fn add_orders(&self, orders: &[OrderPayload]) -> Result<()> {
        self.call("addOrders", vec![json!(orders)]).await?;
        Ok(())
    }

    async fn update_orders(&self, orders: &[OrderPayload]) -> Result<()> {
        self.call("updateOrders", vec![json!(orders)]).await?;
        Ok(())
    }

    async fn update_orders_status(
        &self,
        ids: &[String],
        new_status: Status,
        sub: &str,
    ) -> Result<()> {
        let args = json!({ "ids": ids, "newStatus": new_status, "sub": sub });
        self.call("updateOrdersStatus", vec![args]).await?;
        Ok(())
    }

    async fn update_order_price(&self, update: &PriceUpdate) -> Result<()> {
        self.call("updateOrderPrice", vec![json!(update)]).await?;
        Ok(())
    }

    async fn update_allow_notifications(&self, sub: &str, allow: bool) -> Result<()> {
        let flag = if allow { 1 } else { 0 };
        self.call("updateAllowNotifications", vec![json!(sub), json!(flag)]).await?;
        Ok(())
    }
}
