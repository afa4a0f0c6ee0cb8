use super::EnvironmentProfile;
use crate::error::Result;
use crate::state_codec::StateCodec;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// URL-safe alphabet, no padding on output; padding optional on input.
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Environment snapshot carried through an auth redirect.
///
/// Serialized as `{"ts":…,"ua":…,"bt":…,"sid":…}`. Only `ua` takes part in
/// change detection; the other fields are informational.
///
/// The token built from it is neither signed nor encrypted: anyone holding it
/// can read and rewrite it. It is a diagnostic carrier, not a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatePayload {
    /// Capture time, epoch milliseconds.
    pub ts: i64,
    /// Captured user agent.
    pub ua: String,
    /// Captured browser type, e.g. `"embedded-instagram"`.
    pub bt: String,
    /// Session identifier, see [`StateCodec::new_session_id`].
    pub sid: String,
}

impl AuthStatePayload {
    pub fn new(
        ts: i64,
        ua: impl Into<String>,
        bt: impl Into<String>,
        sid: impl Into<String>,
    ) -> Self {
        Self {
            ts,
            ua: ua.into(),
            bt: bt.into(),
            sid: sid.into(),
        }
    }

    /// Snapshot `profile` now, under a fresh session id.
    pub fn capture(profile: &EnvironmentProfile) -> Self {
        Self::new(
            chrono::Utc::now().timestamp_millis(),
            profile.user_agent.as_str(),
            profile.browser_type.as_str(),
            StateCodec::new_session_id(),
        )
    }

    /// JSON, then base64 (URL-safe alphabet, unpadded).
    pub fn to_token(&self) -> String {
        let json = serde_json::to_vec(self).expect("payload serializes to JSON");
        TOKEN_ENGINE.encode(json)
    }

    /// Accepts both the standard and the URL-safe base64 alphabets, with or
    /// without padding.
    pub fn from_token(token: &str) -> Result<Self> {
        let normalized: String = token
            .chars()
            .map(|c| match c {
                '+' => '-',
                '/' => '_',
                c => c,
            })
            .collect();
        let bytes = TOKEN_ENGINE.decode(normalized.as_bytes())?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
