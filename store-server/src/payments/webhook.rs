//! Webhook 签名校验与事件解析
//!
//! 支付提供商通过 `x-webhook-signature` 头推送异步结果，格式：
//!
//! ```text
//! t=1492774577,v1=5257a869e7ecebeda32affa62cdca3fa51cad7e77a0e56ff536d0ce8e108d8bd
//! ```
//!
//! `v1` 是以共享密钥对 `"{t}.{raw_body}"` 计算的 HMAC-SHA256
//! (hex)。时间戳超出容忍窗口的事件按重放拒绝。比较使用常数时间
//! 实现 (`ring::constant_time`)。

use std::collections::HashMap;

use ring::hmac;
use serde::Deserialize;

use shared::AppError;

/// 结账会话完成 (支付成功)
pub const EVENT_SESSION_COMPLETED: &str = "checkout.session.completed";
/// 支付失败
pub const EVENT_PAYMENT_FAILED: &str = "payment_intent.payment_failed";

/// 会话 metadata 里携带订单号的键
pub const METADATA_ORDER_ID: &str = "orderId";

/// 提供商推送的事件
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookData {
    pub object: SessionObject,
}

/// 事件内嵌的会话对象
#[derive(Debug, Clone, Deserialize)]
pub struct SessionObject {
    pub id: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl SessionObject {
    /// 从会话 metadata 取订单号
    pub fn order_id(&self) -> Option<&str> {
        self.metadata.get(METADATA_ORDER_ID).map(String::as_str)
    }
}

/// Webhook 签名校验器
pub struct SignatureVerifier {
    key: hmac::Key,
    tolerance_secs: i64,
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 不打印密钥
        f.debug_struct("SignatureVerifier")
            .field("tolerance_secs", &self.tolerance_secs)
            .finish()
    }
}

impl SignatureVerifier {
    pub fn new(secret: &str, tolerance_secs: i64) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes()),
            tolerance_secs,
        }
    }

    /// 校验签名头并解析事件
    ///
    /// 先验签后解析：签名无效绝不解释 payload。
    pub fn construct_event(&self, payload: &[u8], header: &str) -> Result<WebhookEvent, AppError> {
        self.verify(payload, header)?;
        serde_json::from_slice(payload)
            .map_err(|e| AppError::payload(format!("Webhook payload invalid: {}", e)))
    }

    /// 校验签名头
    pub fn verify(&self, payload: &[u8], header: &str) -> Result<(), AppError> {
        let (timestamp, candidates) = parse_signature_header(header)?;

        let now = chrono::Utc::now().timestamp();
        if (now - timestamp).abs() > self.tolerance_secs {
            return Err(AppError::signature("Webhook timestamp outside tolerance"));
        }

        let mut signed = Vec::with_capacity(payload.len() + 16);
        signed.extend_from_slice(timestamp.to_string().as_bytes());
        signed.push(b'.');
        signed.extend_from_slice(payload);
        let expected = hmac::sign(&self.key, &signed);

        for candidate in &candidates {
            if let Ok(bytes) = hex::decode(candidate)
                && ring::constant_time::verify_slices_are_equal(expected.as_ref(), &bytes).is_ok()
            {
                return Ok(());
            }
        }

        Err(AppError::signature("Webhook signature mismatch"))
    }

    /// 生成签名头 (测试与本地联调用)
    pub fn sign(&self, payload: &[u8], timestamp: i64) -> String {
        let mut signed = Vec::with_capacity(payload.len() + 16);
        signed.extend_from_slice(timestamp.to_string().as_bytes());
        signed.push(b'.');
        signed.extend_from_slice(payload);
        let tag = hmac::sign(&self.key, &signed);
        format!("t={},v1={}", timestamp, hex::encode(tag.as_ref()))
    }
}

/// 解析 `t=...,v1=...` 签名头，允许多个 v1 候选 (密钥轮换期)
fn parse_signature_header(header: &str) -> Result<(i64, Vec<&str>), AppError> {
    let mut timestamp = None;
    let mut candidates = Vec::new();

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", v)) => {
                timestamp = Some(v.parse::<i64>().map_err(|_| {
                    AppError::signature("Webhook signature header has invalid timestamp")
                })?);
            }
            Some(("v1", v)) => candidates.push(v),
            _ => {} // 未知 scheme 忽略，向前兼容
        }
    }

    let timestamp =
        timestamp.ok_or_else(|| AppError::signature("Webhook signature header missing t="))?;
    if candidates.is_empty() {
        return Err(AppError::signature("Webhook signature header missing v1="));
    }
    Ok((timestamp, candidates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    const SECRET: &str = "whsec_test_secret";

    fn verifier() -> SignatureVerifier {
        SignatureVerifier::new(SECRET, 300)
    }

    fn event_body(event_type: &str, order_id: &str) -> String {
        format!(
            r#"{{"type":"{}","data":{{"object":{{"id":"sess_123","metadata":{{"orderId":"{}"}}}}}}}}"#,
            event_type, order_id
        )
    }

    #[test]
    fn test_valid_signature_accepted() {
        let v = verifier();
        let body = event_body(EVENT_SESSION_COMPLETED, "A1");
        let header = v.sign(body.as_bytes(), chrono::Utc::now().timestamp());

        let event = v.construct_event(body.as_bytes(), &header).unwrap();
        assert_eq!(event.event_type, EVENT_SESSION_COMPLETED);
        assert_eq!(event.data.object.order_id(), Some("A1"));
        assert_eq!(event.data.object.id, "sess_123");
    }

    #[test]
    fn test_tampered_body_rejected() {
        let v = verifier();
        let body = event_body(EVENT_SESSION_COMPLETED, "A1");
        let header = v.sign(body.as_bytes(), chrono::Utc::now().timestamp());

        let tampered = event_body(EVENT_SESSION_COMPLETED, "A2");
        let err = v.construct_event(tampered.as_bytes(), &header).unwrap_err();
        assert_eq!(err.code, ErrorCode::WebhookSignatureInvalid);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let other = SignatureVerifier::new("whsec_other", 300);
        let body = event_body(EVENT_PAYMENT_FAILED, "A1");
        let header = other.sign(body.as_bytes(), chrono::Utc::now().timestamp());

        let err = verifier().verify(body.as_bytes(), &header).unwrap_err();
        assert_eq!(err.code, ErrorCode::WebhookSignatureInvalid);
    }

    #[test]
    fn test_stale_timestamp_rejected() {
        let v = verifier();
        let body = event_body(EVENT_SESSION_COMPLETED, "A1");
        let stale = chrono::Utc::now().timestamp() - 3600;
        let header = v.sign(body.as_bytes(), stale);

        let err = v.verify(body.as_bytes(), &header).unwrap_err();
        assert_eq!(err.code, ErrorCode::WebhookSignatureInvalid);
    }

    #[test]
    fn test_malformed_header_rejected() {
        let v = verifier();
        let body = b"{}";
        assert!(v.verify(body, "garbage").is_err());
        assert!(v.verify(body, "t=notanumber,v1=aa").is_err());
        assert!(v.verify(body, "v1=aa").is_err());
        assert!(
            v.verify(body, &format!("t={}", chrono::Utc::now().timestamp()))
                .is_err()
        );
    }

    #[test]
    fn test_multiple_v1_candidates() {
        // 密钥轮换：头里带一个旧签名 + 一个有效签名
        let v = verifier();
        let body = event_body(EVENT_SESSION_COMPLETED, "A1");
        let ts = chrono::Utc::now().timestamp();
        let valid = v.sign(body.as_bytes(), ts);
        let sig = valid.split_once(",v1=").unwrap().1;
        let header = format!("t={},v1={},v1={}", ts, "ab".repeat(32), sig);

        assert!(v.verify(body.as_bytes(), &header).is_ok());
    }

    #[test]
    fn test_invalid_payload_after_valid_signature() {
        let v = verifier();
        let body = b"not json";
        let header = v.sign(body, chrono::Utc::now().timestamp());

        let err = v.construct_event(body, &header).unwrap_err();
        assert_eq!(err.code, ErrorCode::WebhookPayloadInvalid);
    }
}
