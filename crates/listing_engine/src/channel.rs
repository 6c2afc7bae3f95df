//! Wire shapes exchanged with the control surface.

use listing_core::{EngineSettings, ListingStats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    ApplySettings { settings: EngineSettings },
    GetStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplySettingsResponse {
    pub success: bool,
}

impl ApplySettingsResponse {
    pub const OK: Self = Self { success: true };
    pub const FAILED: Self = Self { success: false };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Applied(ApplySettingsResponse),
    Stats(ListingStats),
}

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("engine is no longer running")]
    Disconnected,
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn decode_request(raw: &str) -> Result<Request, ChannelError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn encode_response(response: &Response) -> Result<String, ChannelError> {
    Ok(serde_json::to_string(response)?)
}

#[cfg(test)]
mod tests {
    use listing_core::{AppliedAction, EngineSettings, ListingStats, SortPolicy};
    use pretty_assertions::assert_eq;

    use super::{decode_request, encode_response, ApplySettingsResponse, Request, Response};

    #[test]
    fn decodes_apply_settings() {
        let raw = r#"{"action":"applySettings","settings":{"sortBy":"recent","appliedAction":"hide","highlightViewed":false}}"#;
        assert_eq!(
            decode_request(raw).unwrap(),
            Request::ApplySettings {
                settings: EngineSettings {
                    sort_by: SortPolicy::Recent,
                    applied_action: AppliedAction::Hide,
                    highlight_viewed: false,
                }
            }
        );
    }

    #[test]
    fn decodes_get_stats_without_payload() {
        assert_eq!(
            decode_request(r#"{"action":"getStats"}"#).unwrap(),
            Request::GetStats
        );
    }

    #[test]
    fn rejects_unknown_actions() {
        assert!(decode_request(r#"{"action":"explode"}"#).is_err());
        assert!(decode_request("not json").is_err());
    }

    #[test]
    fn responses_have_flat_shapes() {
        assert_eq!(
            encode_response(&Response::Applied(ApplySettingsResponse::OK)).unwrap(),
            r#"{"success":true}"#
        );
        assert_eq!(
            encode_response(&Response::Stats(ListingStats {
                total: 12,
                viewed: 3,
                applied: 1
            }))
            .unwrap(),
            r#"{"total":12,"viewed":3,"applied":1}"#
        );
    }
}
