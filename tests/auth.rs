use relay_mcp::{authenticate, config::AuthConfig, SharedSecretAuth};

#[test]
fn no_secret_allows_any() {
    let auth = SharedSecretAuth::new(&AuthConfig::default());
    assert!(!auth.is_enabled());
    assert!(auth.validate(None));
    assert!(auth.validate(Some("whatever")));
}

#[test]
fn configured_secret_requires_exact_bearer() {
    let cfg = AuthConfig {
        shared_secret: Some("s3cr3t".into()),
    };
    let auth = SharedSecretAuth::new(&cfg);
    assert!(auth.validate(Some("Bearer s3cr3t")));
    assert!(!auth.validate(Some("s3cr3t")));
    assert!(!auth.validate(Some("bearer s3cr3t")));
    assert!(!auth.validate(Some("Bearer s3cr3t ")));
    assert!(!auth.validate(Some("Bearer wrong")));
    assert!(!auth.validate(None));
}

#[test]
fn authenticate_truth_table() {
    assert!(authenticate(None, None));
    assert!(!authenticate(None, Some("s3cr3t")));
    assert!(authenticate(Some("Bearer s3cr3t"), Some("s3cr3t")));
    assert!(!authenticate(Some("Bearer wrong"), Some("s3cr3t")));
}
