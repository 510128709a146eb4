//! REST command surface: `POST <base>/v1/<resource>.<verb>` with a JSON body.

pub mod channels;
pub mod guilds;
pub mod members;
pub mod messages;
pub mod reactions;
pub mod roles;
pub mod users;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::Client;
use crate::error::ApiError;
use crate::gateway::uri::{self, Transport};

impl Client {
    /// Call a command and decode its JSON response.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: Value,
    ) -> Result<T, ApiError> {
        let resp = self.post(method, body).await?;
        Ok(resp.json::<T>().await?)
    }

    /// Call a command whose response body carries nothing of interest.
    pub async fn call_void(&self, method: &str, body: Value) -> Result<(), ApiError> {
        self.post(method, body).await?;
        Ok(())
    }

    async fn post(&self, method: &str, body: Value) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}/v1/{method}", rest_base(self.endpoint())?);
        let identity = self.identity();
        let (platform, self_id) = identity
            .as_deref()
            .map(|i| (i.platform.as_str(), i.self_id.as_str()))
            .unwrap_or(("", ""));

        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token()))
            .header("X-Platform", platform)
            .header("X-Self-ID", self_id)
            .json(&body)
            .send()
            .await?;

        if resp.status() != StatusCode::OK {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(resp)
    }
}

/// HTTP base URL for an endpoint, with any `+<transport>` annotation
/// removed. Only TCP transports can carry REST commands.
pub fn rest_base(endpoint: &str) -> Result<String, ApiError> {
    let (transport, _) = uri::resolve(endpoint);
    match transport {
        Transport::Tcp | Transport::Tcp4 | Transport::Tcp6 => {}
        other => return Err(ApiError::UnsupportedTransport(other.to_string())),
    }
    Ok(match endpoint.split_once("://") {
        Some((scheme, rest)) => {
            let scheme = scheme.split_once('+').map_or(scheme, |(s, _)| s);
            format!("{scheme}://{rest}")
        }
        None => endpoint.to_string(),
    })
}

/// Build a request body, leaving out an empty pagination cursor.
pub(crate) fn paged(mut body: Value, next: Option<&str>) -> Value {
    if let (Some(next), Some(obj)) = (next.filter(|n| !n.is_empty()), body.as_object_mut()) {
        obj.insert("next".to_string(), Value::String(next.to_string()));
    }
    body
}
