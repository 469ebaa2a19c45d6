use axum::http::HeaderMap;

use crate::config::AuthConfig;

pub const AUTHORIZATION_HEADER: &str = "authorization";

#[derive(Clone, Debug)]
pub struct SharedSecretAuth {
    expected: Option<String>,
}

impl SharedSecretAuth {
    pub fn new(cfg: &AuthConfig) -> Self {
        Self {
            expected: cfg.shared_secret.as_ref().map(|s| format!("Bearer {}", s)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.expected.is_some()
    }

    pub fn validate(&self, presented: Option<&str>) -> bool {
        let expected = match &self.expected {
            Some(expected) => expected,
            None => return true, // auth disabled
        };
        match presented {
            Some(got) => constant_time_eq(expected.as_bytes(), got.as_bytes()),
            None => false,
        }
    }

    pub fn validate_headers(&self, headers: &HeaderMap) -> bool {
        let presented = headers
            .get(AUTHORIZATION_HEADER)
            .and_then(|value| value.to_str().ok());
        self.validate(presented)
    }
}

/// Succeeds when no secret is configured, or when the presented credential is
/// exactly `Bearer <secret>`.
pub fn authenticate(presented: Option<&str>, configured: Option<&str>) -> bool {
    let cfg = AuthConfig {
        shared_secret: configured.map(str::to_string),
    };
    SharedSecretAuth::new(&cfg).validate(presented)
}

/// Header pairs safe for logging, with the credential value replaced.
pub fn redacted_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if name.as_str() == AUTHORIZATION_HEADER {
                "<redacted>".to_string()
            } else {
                value.to_str().unwrap_or("<binary>").to_string()
            };
            (name.as_str().to_string(), shown)
        })
        .collect()
}

// Minimal constant-time equality to avoid timing leaks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut r: u8 = 0;
    for i in 0..a.len() {
        r |= a[i] ^ b[i];
    }
    r == 0
}
