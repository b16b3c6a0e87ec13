use crate::error::{AppError, AppResult};
use crate::models::Claims;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

pub fn create_jwt(admin_id: i64, secret: &str, expires_in: &str) -> AppResult<String> {
    let exp = expires_at(expires_in)?;

    let claims = Claims {
        sub: admin_id.to_string(),
        exp,
        iat: Utc::now().timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

pub fn verify_jwt(token: &str, secret: &str) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Unix timestamp at which a token issued now with `expires_in` lapses.
pub fn expires_at(expires_in: &str) -> AppResult<i64> {
    let expiration = parse_duration(expires_in)?;
    Utc::now()
        .checked_add_signed(expiration)
        .map(|dt| dt.timestamp())
        .ok_or_else(|| AppError::InternalServerError("Invalid expiration time".to_string()))
}

pub fn parse_duration(duration_str: &str) -> AppResult<Duration> {
    let duration_str = duration_str.trim();

    if let Some(hours) = duration_str.strip_suffix('h') {
        let hours: i64 = hours
            .parse()
            .map_err(|_| AppError::BadRequest("Invalid duration format".to_string()))?;
        Ok(Duration::hours(hours))
    } else if let Some(days) = duration_str.strip_suffix('d') {
        let days: i64 = days
            .parse()
            .map_err(|_| AppError::BadRequest("Invalid duration format".to_string()))?;
        Ok(Duration::days(days))
    } else if let Some(minutes) = duration_str.strip_suffix('m') {
        let minutes: i64 = minutes
            .parse()
            .map_err(|_| AppError::BadRequest("Invalid duration format".to_string()))?;
        Ok(Duration::minutes(minutes))
    } else {
        // Default to hours
        let hours: i64 = duration_str
            .parse()
            .map_err(|_| AppError::BadRequest("Invalid duration format".to_string()))?;
        Ok(Duration::hours(hours))
    }
}

pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ").map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("12h").unwrap(), Duration::hours(12));
        assert_eq!(parse_duration("7d").unwrap(), Duration::days(7));
        assert_eq!(parse_duration("30m").unwrap(), Duration::minutes(30));
        assert_eq!(parse_duration(" 2 ").unwrap(), Duration::hours(2));
        assert!(parse_duration("forever").is_err());
    }

    #[test]
    fn test_jwt_round_trip_and_wrong_secret() {
        let token = create_jwt(42, "secret", "1h").unwrap();

        let claims = verify_jwt(&token, "secret").unwrap();
        assert_eq!(claims.sub, "42");
        assert!(claims.exp > claims.iat);

        assert!(verify_jwt(&token, "other-secret").is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Far enough in the past to clear the default leeway
        let token = create_jwt(1, "secret", "-1h").unwrap();
        assert!(verify_jwt(&token, "secret").is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
    }
}
