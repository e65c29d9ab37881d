//! Wire payloads for the Shelly status and RPC endpoints.

use serde::{Deserialize, Serialize};

use shuttersync_domain::cover::CoverSnapshot;

/// Body of `Shelly.GetStatus` — only the two cover components matter here,
/// everything else in the (large) status document is ignored.
///
/// Both cover keys are required: an absent component means the device is not
/// the expected two-cover profile and the body is treated as malformed.
#[derive(Debug, Deserialize)]
pub struct DeviceStatus {
    #[serde(rename = "cover:0")]
    cover_0: CoverComponent,
    #[serde(rename = "cover:1")]
    cover_1: CoverComponent,
}

#[derive(Debug, Deserialize)]
struct CoverComponent {
    current_pos: u8,
}

impl DeviceStatus {
    /// Positions of both covers as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CoverSnapshot {
        CoverSnapshot::new(self.cover_0.current_pos, self.cover_1.current_pos)
    }
}

/// Request envelope for the `/rpc` endpoint.
#[derive(Debug, Serialize)]
pub struct RpcRequest<P> {
    /// Client-side request identifier.
    pub id: u32,
    /// RPC method name, e.g. `Switch.Set`.
    pub method: &'static str,
    /// Method parameters.
    pub params: P,
}

/// Error object carried by a failed RPC response.
#[derive(Debug, Deserialize)]
pub struct RpcError {
    /// Device-reported error code.
    pub code: i32,
    /// Device-reported error message.
    pub message: String,
}

/// Result payload of `Switch.GetStatus`.
#[derive(Debug, Deserialize)]
pub struct SwitchStatus {
    /// Whether the relay output is on.
    pub output: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trimmed-down capture of a real Shelly.GetStatus body.
    const STATUS_BODY: &str = r#"{
        "sys": {"mac": "A8032ABCDEF0", "uptime": 1234},
        "cover:0": {"id": 0, "state": "stopped", "current_pos": 37, "source": "HTTP_in"},
        "cover:1": {"id": 1, "state": "closing", "current_pos": 82, "source": "HTTP_in"},
        "input:0": {"id": 0, "state": false},
        "input:1": {"id": 1, "state": false}
    }"#;

    #[test]
    fn should_parse_cover_positions_from_status_body() {
        let status: DeviceStatus = serde_json::from_str(STATUS_BODY).unwrap();
        let snapshot = status.snapshot();
        assert_eq!(
            snapshot.position_of(shuttersync_domain::channel::CoverId::ZERO).current_pos,
            37
        );
        assert_eq!(
            snapshot.position_of(shuttersync_domain::channel::CoverId::ONE).current_pos,
            82
        );
    }

    #[test]
    fn should_fail_when_a_cover_component_is_missing() {
        let body = r#"{"cover:0": {"current_pos": 37}}"#;
        let result: Result<DeviceStatus, _> = serde_json::from_str(body);
        assert!(result.is_err());
    }

    #[test]
    fn should_fail_on_empty_body() {
        let result: Result<DeviceStatus, _> = serde_json::from_str("");
        assert!(result.is_err());
    }

    #[test]
    fn should_serialize_rpc_request_envelope() {
        #[derive(Serialize)]
        struct Params {
            id: u8,
            on: bool,
        }
        let request = RpcRequest {
            id: 7,
            method: "Switch.Set",
            params: Params { id: 1, on: true },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "method": "Switch.Set",
                "params": {"id": 1, "on": true}
            })
        );
    }

    #[test]
    fn should_parse_rpc_error_object() {
        let error: RpcError =
            serde_json::from_str(r#"{"code": -114, "message": "roller is busy"}"#).unwrap();
        assert_eq!(error.code, -114);
        assert_eq!(error.message, "roller is busy");
    }

    #[test]
    fn should_parse_switch_status_result() {
        let status: SwitchStatus =
            serde_json::from_str(r#"{"id": 0, "source": "button", "output": true, "apower": 8.9}"#)
                .unwrap();
        assert!(status.output);
    }
}
