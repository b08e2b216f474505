use elearning_backend::config::JwtConfig;
use elearning_backend::util::jwt::*;

fn create_test_jwt_utils() -> JwtTokenUtilsImpl {
    JwtTokenUtilsImpl::new(JwtConfig::default())
}

const USER_ID: &str = "64b7f0c2a1e4d93f5c2b1a01";

#[test]
fn test_token_type_as_str() {
    assert_eq!(TokenType::Access.as_str(), "access");
    assert_eq!(TokenType::Refresh.as_str(), "refresh");
}

#[test]
fn test_generate_token_pair() {
    let jwt_utils = create_test_jwt_utils();
    let pair = jwt_utils.generate_token_pair(USER_ID, "alice@example.com", "instructor").unwrap();

    assert_ne!(pair.access_token, pair.refresh_token);
    assert_eq!(pair.token_type, "Bearer");
    assert_eq!(pair.expires_in, jwt_utils.jwt_config.access_token_expiration * 60);

    let claims = jwt_utils.validate_access_token(&pair.access_token).unwrap();
    assert_eq!(claims.sub, USER_ID);
    assert_eq!(claims.email, "alice@example.com");
    assert_eq!(claims.role, "instructor");
    assert_eq!(claims.token_type, "access");
    assert_eq!(claims.iss.as_deref(), Some("elearning-backend-test"));

    let claims = jwt_utils.validate_refresh_token(&pair.refresh_token).unwrap();
    assert_eq!(claims.token_type, "refresh");
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_token_types_are_not_interchangeable() {
    let jwt_utils = create_test_jwt_utils();
    let pair = jwt_utils.generate_token_pair(USER_ID, "a@example.com", "student").unwrap();

    assert!(matches!(
        jwt_utils.validate_refresh_token(&pair.access_token),
        Err(JwtError::InvalidTokenType { .. })
    ));
    assert!(matches!(
        jwt_utils.validate_access_token(&pair.refresh_token),
        Err(JwtError::InvalidTokenType { .. })
    ));
}

#[test]
fn test_each_token_has_unique_jti() {
    let jwt_utils = create_test_jwt_utils();
    let first = jwt_utils.generate_token_pair(USER_ID, "a@example.com", "student").unwrap();
    let second = jwt_utils.generate_token_pair(USER_ID, "a@example.com", "student").unwrap();
    let jti1 = jwt_utils.validate_access_token(&first.access_token).unwrap().jti;
    let jti2 = jwt_utils.validate_access_token(&second.access_token).unwrap().jti;
    assert_ne!(jti1, jti2);
}

#[test]
fn test_token_signed_with_other_secret_is_rejected() {
    let jwt_utils = create_test_jwt_utils();
    let other = JwtTokenUtilsImpl::new(JwtConfig {
        jwt_secret: "a_completely_different_secret_that_is_long_enough".to_string(),
        ..JwtConfig::default()
    });
    let pair = other.generate_token_pair(USER_ID, "a@example.com", "admin").unwrap();
    assert!(matches!(
        jwt_utils.validate_access_token(&pair.access_token),
        Err(JwtError::DecodingFailed(_))
    ));
}

#[test]
fn test_expired_token() {
    let jwt_utils = JwtTokenUtilsImpl::new(JwtConfig {
        access_token_expiration: -5,
        ..JwtConfig::default()
    });
    let pair = jwt_utils.generate_token_pair(USER_ID, "a@example.com", "student").unwrap();
    assert!(matches!(
        jwt_utils.validate_access_token(&pair.access_token),
        Err(JwtError::TokenExpired)
    ));
}

#[test]
fn test_audience_mismatch_is_rejected() {
    let issuer = JwtTokenUtilsImpl::new(JwtConfig {
        jwt_audience: Some("someone-else".to_string()),
        ..JwtConfig::default()
    });
    let pair = issuer.generate_token_pair(USER_ID, "a@example.com", "student").unwrap();
    assert!(create_test_jwt_utils().validate_access_token(&pair.access_token).is_err());
}

#[test]
fn test_extract_token_from_header() {
    let jwt_utils = create_test_jwt_utils();
    assert_eq!(jwt_utils.extract_token_from_header("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
    assert!(matches!(
        jwt_utils.extract_token_from_header("Basic dXNlcjpwYXNz"),
        Err(JwtError::InvalidToken)
    ));
    assert!(matches!(jwt_utils.extract_token_from_header("Bearer "), Err(JwtError::InvalidToken)));
    assert!(jwt_utils.extract_token_from_header("").is_err());
}

#[test]
fn test_malformed_token() {
    let jwt_utils = create_test_jwt_utils();
    assert!(jwt_utils.validate_access_token("not.a.jwt").is_err());
    assert!(jwt_utils.validate_access_token("").is_err());
}
