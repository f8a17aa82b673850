//! Order Record Model
//!
//! 订单记录：一次结账尝试及其支付结果的持久化表示。
//! 记录以 camelCase JSON 存储在账本文件中，读取时保持宽容
//! (未知字段忽略，可选字段取默认值)。

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current time as an RFC 3339 / ISO-8601 string (millisecond precision, UTC)
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Payment status of an order record
///
/// # 状态机
///
/// ```text
/// pending ──→ completed
///    └──────→ failed
/// ```
///
/// 终态是粘性的：completed/failed 之后不再接受相反的迁移，
/// 重复迁移到相同状态视为幂等成功。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    /// Whether this status is terminal (no further transitions)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Validate a status transition
    ///
    /// Allowed: pending→completed, pending→failed, and any X→X
    /// (idempotent repeat). Everything else is rejected, including
    /// completed→pending and failed→completed.
    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (Self::Pending, Self::Completed) | (Self::Pending, Self::Failed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Customer contact info captured at checkout
///
/// 所有字段在创建时必填 (仅做存在性校验，不做格式校验)。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub phone: String,
}

impl CustomerInfo {
    /// Return the first blank field, if any
    pub fn missing_field(&self) -> Option<&'static str> {
        let fields: [(&'static str, &str); 6] = [
            ("customerInfo.name", &self.name),
            ("customerInfo.email", &self.email),
            ("customerInfo.address", &self.address),
            ("customerInfo.city", &self.city),
            ("customerInfo.postalCode", &self.postal_code),
            ("customerInfo.phone", &self.phone),
        ];
        fields
            .into_iter()
            .find(|(_, v)| v.trim().is_empty())
            .map(|(name, _)| name)
    }
}

/// One purchased product line inside an order record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedProduct {
    pub id: i64,
    pub title: String,
    /// Unit price in currency unit (legacy records use `unitPrice`)
    #[serde(alias = "unitPrice")]
    pub price: f64,
    pub quantity: u32,
}

impl OrderedProduct {
    /// Line subtotal (unit price × quantity)
    pub fn subtotal(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Durable representation of one checkout attempt and its payment outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// Externally supplied unique key within the ledger
    pub order_id: String,
    pub customer_info: CustomerInfo,
    pub products: Vec<OrderedProduct>,
    pub total_amount: f64,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub payment_method: String,
    /// Payment provider session correlation handle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// ISO-8601, set at creation and refreshed on every mutation
    #[serde(default = "now_iso")]
    pub timestamp: String,
}

/// Float comparison tolerance for total amount validation
const AMOUNT_EPSILON: f64 = 0.005;

impl OrderRecord {
    /// Sum of all line subtotals
    pub fn computed_total(&self) -> f64 {
        self.products.iter().map(|p| p.subtotal()).sum()
    }

    /// Validate a record at creation time
    ///
    /// Checks: non-blank orderId, non-empty products, every quantity
    /// ≥ 1, all customer fields present, and `totalAmount` equal to
    /// the sum of line subtotals. `totalAmount` is not re-validated
    /// on later updates.
    pub fn validate_for_create(&self) -> Result<(), String> {
        if self.order_id.trim().is_empty() {
            return Err("orderId must not be empty".into());
        }
        if self.payment_method.trim().is_empty() {
            return Err("paymentMethod must not be empty".into());
        }
        if self.products.is_empty() {
            return Err("products must not be empty".into());
        }
        if let Some(p) = self.products.iter().find(|p| p.quantity < 1) {
            return Err(format!("product {} has invalid quantity", p.id));
        }
        if let Some(field) = self.customer_info.missing_field() {
            return Err(format!("missing required field: {}", field));
        }
        let computed = self.computed_total();
        if (computed - self.total_amount).abs() > AMOUNT_EPSILON {
            return Err(format!(
                "totalAmount {} does not match sum of line items {}",
                self.total_amount, computed
            ));
        }
        Ok(())
    }

    /// Refresh the mutation timestamp
    pub fn touch(&mut self) {
        self.timestamp = now_iso();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            address: "12 Analytical St".into(),
            city: "London".into(),
            postal_code: "N1 9GU".into(),
            phone: "+44 20 1234 5678".into(),
        }
    }

    fn record() -> OrderRecord {
        OrderRecord {
            order_id: "A1".into(),
            customer_info: customer(),
            products: vec![OrderedProduct {
                id: 1,
                title: "Widget".into(),
                price: 10.0,
                quantity: 2,
            }],
            total_amount: 20.0,
            payment_status: PaymentStatus::Pending,
            payment_method: "card".into(),
            session_id: None,
            timestamp: now_iso(),
        }
    }

    #[test]
    fn test_transitions_from_pending() {
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Completed));
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Failed));
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Pending));
    }

    #[test]
    fn test_terminal_states_are_sticky() {
        assert!(!PaymentStatus::Completed.can_transition_to(PaymentStatus::Pending));
        assert!(!PaymentStatus::Completed.can_transition_to(PaymentStatus::Failed));
        assert!(!PaymentStatus::Failed.can_transition_to(PaymentStatus::Completed));
        assert!(!PaymentStatus::Failed.can_transition_to(PaymentStatus::Pending));
    }

    #[test]
    fn test_idempotent_repeat_allowed() {
        assert!(PaymentStatus::Completed.can_transition_to(PaymentStatus::Completed));
        assert!(PaymentStatus::Failed.can_transition_to(PaymentStatus::Failed));
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Completed).unwrap(),
            r#""completed""#
        );
        let status: PaymentStatus = serde_json::from_str(r#""failed""#).unwrap();
        assert_eq!(status, PaymentStatus::Failed);
    }

    #[test]
    fn test_validate_for_create_ok() {
        assert!(record().validate_for_create().is_ok());
    }

    #[test]
    fn test_validate_rejects_total_mismatch() {
        let mut r = record();
        r.total_amount = 25.0;
        assert!(r.validate_for_create().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_quantity() {
        let mut r = record();
        r.products[0].quantity = 0;
        assert!(r.validate_for_create().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_customer_field() {
        let mut r = record();
        r.customer_info.email = "  ".into();
        let err = r.validate_for_create().unwrap_err();
        assert!(err.contains("customerInfo.email"));
    }

    #[test]
    fn test_tolerant_reading_of_legacy_record() {
        // Legacy PaymentRecord shape: `unitPrice` alias, missing
        // optional fields, unknown extra fields.
        let json = r#"{
            "orderId": "B2",
            "customerInfo": {
                "name": "n", "email": "e", "address": "a",
                "city": "c", "postalCode": "p", "phone": "t"
            },
            "products": [{"id": 7, "title": "Gadget", "unitPrice": 5.5, "quantity": 1}],
            "totalAmount": 5.5,
            "paymentMethod": "card",
            "legacyField": true
        }"#;
        let r: OrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.payment_status, PaymentStatus::Pending);
        assert_eq!(r.products[0].price, 5.5);
        assert!(r.session_id.is_none());
        assert!(!r.timestamp.is_empty());
    }
}
