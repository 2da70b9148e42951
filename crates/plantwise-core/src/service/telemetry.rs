//! Telemetry ingress
//!
//! A device authenticates with `Authorization: Bearer <token>`. Every
//! authentication failure carries the same message so callers cannot tell a
//! malformed header from an unknown token.

use chrono::Utc;
use tracing::{debug, info};

use plantwise_common::PlantwiseError;
use plantwise_persistence::entity::device;
use plantwise_persistence::sea_orm::prelude::Expr;
use plantwise_persistence::sea_orm::*;

pub const INVALID_TOKEN_MESSAGE: &str = "missing or invalid device token";

const BEARER_PREFIX: &str = "Bearer ";

fn invalid_token() -> PlantwiseError {
    PlantwiseError::Authentication(INVALID_TOKEN_MESSAGE.to_string())
}

/// Pull the token out of an `Authorization` header value.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, PlantwiseError> {
    let token = header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .unwrap_or_default();

    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(invalid_token());
    }
    Ok(token)
}

/// Find the device owning `token`.
pub async fn authenticate(db: &DatabaseConnection, token: &str) -> anyhow::Result<device::Model> {
    device::Entity::find()
        .filter(device::Column::Token.eq(token))
        .one(db)
        .await?
        .ok_or_else(|| invalid_token().into())
}

/// Parse a telemetry body. An empty body is an empty object.
pub fn parse_payload(body: &[u8]) -> Result<serde_json::Value, PlantwiseError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::json!({}));
    }

    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value @ serde_json::Value::Object(_)) => Ok(value),
        Ok(_) => Err(PlantwiseError::validation(
            "telemetry payload must be a JSON object",
        )),
        Err(e) => Err(PlantwiseError::validation(format!(
            "invalid telemetry payload: {}",
            e
        ))),
    }
}

/// Authenticate, then replace the device's latest telemetry and stamp
/// `last_seen`. Returns the device id.
pub async fn ingest(db: &DatabaseConnection, token: &str, body: &[u8]) -> anyhow::Result<i64> {
    let device = authenticate(db, token).await?;
    let payload = parse_payload(body)?;

    let result = device::Entity::update_many()
        .col_expr(device::Column::LatestTelemetry, Expr::value(payload))
        .col_expr(device::Column::LastSeen, Expr::value(Utc::now()))
        .filter(device::Column::Token.eq(token))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        debug!(device_id = device.id, "device removed before telemetry write");
        return Err(invalid_token().into());
    }

    info!(device_id = device.id, "telemetry recorded");
    Ok(device.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token(Some("Bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn test_extract_bearer_token_failures_share_message() {
        for header in [
            None,
            Some(""),
            Some("Token abc"),
            Some("Bearer "),
            Some("abc"),
            Some("Bearer  abc"),
            Some("Bearer abc "),
            Some("bearer abc"),
        ] {
            let err = extract_bearer_token(header).unwrap_err();
            assert!(matches!(err, PlantwiseError::Authentication(_)));
            assert_eq!(err.to_string(), INVALID_TOKEN_MESSAGE);
        }
    }

    #[test]
    fn test_parse_payload() {
        assert_eq!(parse_payload(b"").unwrap(), serde_json::json!({}));
        assert_eq!(parse_payload(b"  \n").unwrap(), serde_json::json!({}));
        assert_eq!(
            parse_payload(br#"{"rpm": 1200}"#).unwrap(),
            serde_json::json!({"rpm": 1200})
        );
    }

    #[test]
    fn test_parse_payload_rejects_non_objects() {
        assert!(parse_payload(b"[1, 2]").is_err());
        assert!(parse_payload(b"42").is_err());
        assert!(parse_payload(b"{not json").is_err());
    }
}
