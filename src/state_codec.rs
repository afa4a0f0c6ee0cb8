use super::environment_classifier::EnvironmentClassifier;
use super::error::Result;
use super::types::*;
use rand::Rng;

const SESSION_ID_PREFIX: &str = "sid_";
const SESSION_ID_FRAGMENT_LEN: usize = 13;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Encodes environment snapshots into auth `state` tokens and checks them on
/// the way back.
///
/// Tokens are unsigned: a client can forge one with any `ua` it likes. Use them
/// to notice that a redirect came back in a different browser, never to
/// authorize anything.
pub struct StateCodec;

impl StateCodec {
    /// `sid_` followed by two independent random base36 fragments. Good enough
    /// for telling sessions apart in logs; not a secret.
    pub fn new_session_id() -> String {
        let mut rng = rand::thread_rng();
        let mut fragment = || -> String {
            (0..SESSION_ID_FRAGMENT_LEN)
                .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
                .collect()
        };
        let first = fragment();
        let second = fragment();
        format!("{SESSION_ID_PREFIX}{first}{second}")
    }

    /// Snapshot `profile` and turn it into a URL-query-safe token.
    pub fn encode(profile: &EnvironmentProfile) -> String {
        let payload = AuthStatePayload::capture(profile);
        tracing::trace!(sid = %payload.sid, bt = %payload.bt, "encoded auth state");
        payload.to_token()
    }

    /// Decode a token received back from the redirect.
    ///
    /// A failure means "no prior state": it is logged here and returned so the
    /// caller can branch on it, never propagated as a panic.
    pub fn decode(token: &str) -> Result<AuthStatePayload> {
        AuthStatePayload::from_token(token).inspect_err(|e| {
            tracing::warn!(error = %e, token_len = token.len(), "invalid auth state parameter");
        })
    }

    /// `true` iff the user agent captured in `decoded` differs from the current
    /// one. No other field is compared.
    pub fn has_environment_changed(
        decoded: &AuthStatePayload,
        current: &EnvironmentProfile,
    ) -> bool {
        decoded.ua != current.user_agent
    }

    /// Classify `current` and compare it against `decoded`.
    pub fn did_browser_change(
        classifier: &EnvironmentClassifier,
        decoded: &AuthStatePayload,
        current: &PlatformSignals,
    ) -> bool {
        Self::has_environment_changed(decoded, &classifier.classify(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const UA: &str = "Mozilla/5.0 (Linux; Android 13; Pixel 7; wv) AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/120.0.6099.43 Mobile Safari/537.36 Instagram 311.0.0.32.118 Android";

    fn profile(ua: &str) -> EnvironmentProfile {
        EnvironmentClassifier::new()
            .unwrap()
            .classify(&PlatformSignals::new(ua))
    }

    #[test]
    fn session_id_shape() {
        let sid = StateCodec::new_session_id();
        assert!(sid.starts_with("sid_"));
        let body = &sid["sid_".len()..];
        assert_eq!(body.len(), 2 * SESSION_ID_FRAGMENT_LEN);
        assert!(body
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_ne!(sid, StateCodec::new_session_id());
    }

    #[test]
    fn session_id_fragments_are_uniform_base36() {
        let body: String = (0..200)
            .map(|_| StateCodec::new_session_id()["sid_".len()..].to_owned())
            .collect();
        for symbol in BASE36.iter().map(|&b| char::from(b)) {
            assert!(body.contains(symbol), "{symbol:?} never generated");
        }
        let digits = body.chars().filter(char::is_ascii_digit).count();
        let share = digits as f64 / body.len() as f64;
        assert!((0.22..0.34).contains(&share), "digit share {share}");
    }

    #[test]
    fn round_trip() {
        let p = profile(UA);
        let decoded = StateCodec::decode(&StateCodec::encode(&p)).unwrap();
        assert_eq!(decoded.ua, p.user_agent);
        assert_eq!(decoded.bt, "embedded-instagram");
        assert!(decoded.ts > 0);
        assert!(!StateCodec::has_environment_changed(&decoded, &p));
    }

    #[test]
    fn round_trip_empty_user_agent() {
        let p = profile("");
        let decoded = StateCodec::decode(&StateCodec::encode(&p)).unwrap();
        assert_eq!(decoded.ua, "");
        assert_eq!(decoded.bt, "standard");
    }

    #[test]
    fn decode_failures() {
        assert!(matches!(
            StateCodec::decode(""),
            Err(Error::InvalidPayload(_))
        ));
        assert!(matches!(
            StateCodec::decode("not-valid-base64!!"),
            Err(Error::InvalidToken(_))
        ));

        let mut token = StateCodec::encode(&profile(UA));
        token.pop();
        assert!(StateCodec::decode(&token).is_err());

        // Valid base64, but not JSON.
        assert!(matches!(
            StateCodec::decode("aGVsbG8gd29ybGQ"),
            Err(Error::InvalidPayload(_))
        ));
    }

    #[test]
    fn only_user_agent_is_compared() {
        let current = profile("UA_B");

        let other_ua = AuthStatePayload::new(1, "UA_A", "standard", "sid_x");
        assert!(StateCodec::has_environment_changed(&other_ua, &current));

        let same_ua = AuthStatePayload::new(0, "UA_B", "embedded-twitter", "sid_other");
        assert!(!StateCodec::has_environment_changed(&same_ua, &current));
    }

    #[test]
    fn did_browser_change_classifies_current_signals() {
        let classifier = EnvironmentClassifier::new().unwrap();
        let decoded = StateCodec::decode(&StateCodec::encode(&profile(UA))).unwrap();

        assert!(!StateCodec::did_browser_change(
            &classifier,
            &decoded,
            &PlatformSignals::new(UA)
        ));
        assert!(StateCodec::did_browser_change(
            &classifier,
            &decoded,
            &PlatformSignals::new("Mozilla/5.0 (Linux; Android 13; Pixel 7) Chrome/120.0 Mobile Safari/537.36"),
        ));
    }
}
