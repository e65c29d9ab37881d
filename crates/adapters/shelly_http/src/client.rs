//! Shelly HTTP client — implements the device client port.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;

use shuttersync_app::ports::DeviceClient;
use shuttersync_domain::actuator::ActuatorStatus;
use shuttersync_domain::channel::{ChannelId, CoverId};
use shuttersync_domain::cover::CoverSnapshot;
use shuttersync_domain::error::ControlError;

use crate::config::ShellyConfig;
use crate::error::ShellyError;
use crate::status::{DeviceStatus, RpcError, RpcRequest, SwitchStatus};

/// Client-side RPC request counter, shared across clients.
static REQUEST_ID: AtomicU32 = AtomicU32::new(1);

fn next_request_id() -> u32 {
    REQUEST_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Serialize)]
struct SwitchGetParams {
    id: u8,
}

#[derive(Serialize)]
struct SwitchSetParams {
    id: u8,
    on: bool,
}

/// HTTP client for one Shelly device.
///
/// Every port method is a single request/response exchange; retries and
/// timeouts beyond the per-request deadline are the caller's concern.
pub struct ShellyHttpClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ShellyHttpClient {
    /// Build a client from the connection config.
    ///
    /// # Errors
    ///
    /// Returns [`ShellyError::InvalidBaseUrl`] when the base URL does not
    /// parse, or [`ShellyError::Http`] when the HTTP client cannot be built.
    pub fn new(config: &ShellyConfig) -> Result<Self, ShellyError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|_| ShellyError::InvalidBaseUrl(config.base_url.clone()))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ShellyError::Http)?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ShellyError> {
        self.base_url
            .join(path)
            .map_err(|_| ShellyError::InvalidBaseUrl(self.base_url.to_string()))
    }

    async fn fetch_status(&self) -> Result<DeviceStatus, ShellyError> {
        let url = self.endpoint("/rpc/Shelly.GetStatus")?;
        let body = self
            .http
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(ShellyError::Http)?
            .text()
            .await
            .map_err(ShellyError::Http)?;
        serde_json::from_str(&body).map_err(ShellyError::Decode)
    }

    async fn rpc<P, T>(&self, method: &'static str, params: P) -> Result<T, ShellyError>
    where
        P: Serialize + Send + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint("/rpc")?;
        let request = RpcRequest {
            id: next_request_id(),
            method,
            params,
        };
        let envelope: serde_json::Value = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(ShellyError::Http)?
            .json()
            .await
            .map_err(ShellyError::Http)?;

        if let Some(error) = envelope.get("error") {
            let rpc: RpcError =
                serde_json::from_value(error.clone()).map_err(ShellyError::Decode)?;
            return Err(ShellyError::Rpc {
                code: rpc.code,
                message: rpc.message,
            });
        }
        let result = envelope
            .get("result")
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        serde_json::from_value(result).map_err(ShellyError::Decode)
    }

    async fn drive_cover(&self, cover: CoverId, target_pos: u8) -> Result<(), ShellyError> {
        let mut url = self.endpoint(&format!("/roller/{cover}"))?;
        url.query_pairs_mut()
            .append_pair("go", "to_pos")
            .append_pair("roller_pos", &target_pos.to_string());
        self.http
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(ShellyError::Http)?;
        Ok(())
    }
}

impl DeviceClient for ShellyHttpClient {
    async fn cover_positions(&self) -> Result<CoverSnapshot, ControlError> {
        let status = self.fetch_status().await?;
        let snapshot = status.snapshot();
        tracing::debug!(
            pos_0 = snapshot.positions()[0].current_pos,
            pos_1 = snapshot.positions()[1].current_pos,
            "read cover positions"
        );
        Ok(snapshot)
    }

    async fn actuator_status(&self, channel: ChannelId) -> Result<ActuatorStatus, ControlError> {
        let status: SwitchStatus = self
            .rpc("Switch.GetStatus", SwitchGetParams { id: channel.as_u8() })
            .await?;
        Ok(ActuatorStatus {
            channel,
            is_on: status.output,
        })
    }

    async fn set_actuator(&self, channel: ChannelId, on: bool) -> Result<(), ControlError> {
        tracing::debug!(%channel, on, "setting switch");
        let _: serde_json::Value = self
            .rpc(
                "Switch.Set",
                SwitchSetParams {
                    id: channel.as_u8(),
                    on,
                },
            )
            .await?;
        Ok(())
    }

    async fn command_cover(&self, cover: CoverId, target_pos: u8) -> Result<(), ControlError> {
        tracing::debug!(%cover, target_pos, "commanding cover");
        self.drive_cover(cover, target_pos).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ShellyHttpClient {
        ShellyHttpClient::new(&ShellyConfig {
            base_url: "http://192.168.178.248".to_string(),
            request_timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn should_reject_an_unparseable_base_url() {
        let result = ShellyHttpClient::new(&ShellyConfig {
            base_url: "not a url".to_string(),
            request_timeout_secs: 5,
        });
        assert!(matches!(result, Err(ShellyError::InvalidBaseUrl(_))));
    }

    #[test]
    fn should_build_the_status_endpoint() {
        let url = client().endpoint("/rpc/Shelly.GetStatus").unwrap();
        assert_eq!(url.as_str(), "http://192.168.178.248/rpc/Shelly.GetStatus");
    }

    #[test]
    fn should_build_the_roller_endpoint_with_query() {
        let c = client();
        let mut url = c.endpoint("/roller/1").unwrap();
        url.query_pairs_mut()
            .append_pair("go", "to_pos")
            .append_pair("roller_pos", "6");
        assert_eq!(
            url.as_str(),
            "http://192.168.178.248/roller/1?go=to_pos&roller_pos=6"
        );
    }

    #[test]
    fn should_hand_out_monotonic_request_ids() {
        let first = next_request_id();
        let second = next_request_id();
        assert!(second > first);
    }
}
