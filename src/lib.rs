//! Browser environment classification and auth-redirect change detection.
//!
//! [`EnvironmentClassifier`] turns a user agent plus a handful of client-side
//! signals into an [`EnvironmentProfile`]: browser vendor, platform, and whether
//! the page is running inside an app's embedded WebView (Facebook, Instagram,
//! ...). [`StateCodec`] packs the user agent of such a profile into an auth
//! `state` token and tells, after the redirect, whether the flow came back in a
//! different browser.
//!
//! ```
//! use embedded_browser_detector::{EnvironmentClassifier, PlatformSignals, StateCodec};
//!
//! let classifier = EnvironmentClassifier::new()?;
//! let signals = PlatformSignals::new(
//!     "Mozilla/5.0 (Linux; Android 13; wv) AppleWebKit/537.36 Chrome/120.0 Mobile Safari/537.36 [FBAN/EMA;FBAV/400.0;]",
//! );
//! let profile = classifier.classify(&signals);
//! assert_eq!(profile.browser_type.as_str(), "embedded-facebook");
//!
//! let token = StateCodec::encode(&profile);
//! let state = StateCodec::decode(&token)?;
//! assert!(!StateCodec::has_environment_changed(&state, &profile));
//! # Ok::<(), embedded_browser_detector::Error>(())
//! ```
//!
//! Everything here works on client-supplied strings and is trivially spoofed.
//! The token is not signed.

mod db;
mod environment_classifier;
mod error;
mod helpers;
mod markers;
mod parser;
mod parser_data;
mod state_codec;
mod types;

pub use environment_classifier::EnvironmentClassifier;
pub use error::{Error, Result};
pub use state_codec::StateCodec;
pub use types::*;
