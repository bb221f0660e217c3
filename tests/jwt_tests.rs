use chrono::Utc;
use donorlink_backend::config::JwtConfig;
use donorlink_backend::util::jwt::*;

fn create_test_jwt_utils() -> JwtTokenUtilsImpl {
    JwtTokenUtilsImpl::new(JwtConfig::from_test_env())
}

#[test]
fn test_generate_verification_token_success() {
    let jwt_utils = create_test_jwt_utils();

    let result = jwt_utils.generate_verification_token("Rahim Uddin", "rahim@example.com");
    assert!(result.is_ok());

    let token = result.unwrap();
    assert!(!token.is_empty());

    let claims = jwt_utils.validate_verification_token(&token).unwrap();
    assert_eq!(claims.displayName, "Rahim Uddin");
    assert_eq!(claims.email, "rahim@example.com");
}

#[test]
fn test_token_expiry_is_five_hours() {
    let jwt_utils = create_test_jwt_utils();
    let token = jwt_utils
        .generate_verification_token("Rahim", "rahim@example.com")
        .unwrap();
    let claims = jwt_utils.validate_verification_token(&token).unwrap();

    let lifetime = claims.exp - claims.iat;
    assert_eq!(lifetime, 300 * 60);
    assert!(claims.exp > Utc::now().timestamp());
}

#[test]
fn test_tokens_have_unique_ids() {
    let jwt_utils = create_test_jwt_utils();
    let a = jwt_utils.generate_verification_token("A", "a@x.com").unwrap();
    let b = jwt_utils.generate_verification_token("A", "a@x.com").unwrap();
    let claims_a = jwt_utils.validate_verification_token(&a).unwrap();
    let claims_b = jwt_utils.validate_verification_token(&b).unwrap();
    assert_ne!(claims_a.jti, claims_b.jti);
}

#[test]
fn test_validate_garbage_token_fails() {
    let jwt_utils = create_test_jwt_utils();
    assert!(jwt_utils.validate_verification_token("not-a-jwt").is_err());
    assert!(jwt_utils.validate_verification_token("").is_err());
}

#[test]
fn test_validate_token_signed_with_other_secret_fails() {
    let jwt_utils = create_test_jwt_utils();
    let other = JwtTokenUtilsImpl::new(JwtConfig {
        jwt_secret: "a-completely-different-secret-also-long-enough".to_string(),
        token_expiration_minutes: 300,
    });
    let token = other
        .generate_verification_token("Rahim", "rahim@example.com")
        .unwrap();
    assert!(jwt_utils.validate_verification_token(&token).is_err());
}

#[test]
fn test_expired_token_is_rejected() {
    // Sign with a TTL that is already in the past by the time we validate
    let jwt_utils = JwtTokenUtilsImpl::new(JwtConfig {
        jwt_secret: "test-secret-key-that-is-long-enough-for-hs256".to_string(),
        token_expiration_minutes: -10,
    });
    let token = jwt_utils
        .generate_verification_token("Rahim", "rahim@example.com")
        .unwrap();
    let validator = create_test_jwt_utils();
    assert!(validator.validate_verification_token(&token).is_err());
}
