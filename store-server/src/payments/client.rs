//! 支付会话客户端
//!
//! 与外部支付提供商交互，创建托管结账会话。提供商被当作不透明
//! 服务：这里只负责建会话并拿回会话 ID，支付结果由客户端回跳
//! 和 webhook 回调异步送达。

use serde::{Deserialize, Serialize};
use serde_json::json;

use shared::models::{CartLine, CustomerInfo};
use shared::AppError;

use crate::core::PaymentConfig;

/// 价格转提供商最小货币单位的换算倍率 (美分)
const MINOR_UNITS: f64 = 100.0;

/// 提供商对商品描述的长度上限
const MAX_DESCRIPTION_LEN: usize = 255;

/// 提供商侧的一条结账行项目
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionLineItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// 单价，最小货币单位 (四舍五入，不截断)
    pub unit_amount: i64,
    pub quantity: u32,
}

/// 提供商返回的结账会话
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    /// 会话 ID，返回给客户端用于跳转
    pub id: String,
}

/// 把购物车行转换为提供商行项目
///
/// 单价按四舍五入转为最小货币单位；描述截断到提供商上限。
pub fn to_line_items(items: &[CartLine]) -> Vec<SessionLineItem> {
    items
        .iter()
        .map(|item| SessionLineItem {
            name: item.title.clone(),
            description: if item.description.is_empty() {
                None
            } else {
                Some(truncate(&item.description, MAX_DESCRIPTION_LEN))
            },
            image: if item.image.is_empty() {
                None
            } else {
                Some(item.image.clone())
            },
            unit_amount: (item.price * MINOR_UNITS).round() as i64,
            quantity: item.quantity,
        })
        .collect()
}

fn truncate(s: &str, max: usize) -> String {
    s.char_indices()
        .nth(max)
        .map(|(idx, _)| s[..idx].to_string())
        .unwrap_or_else(|| s.to_string())
}

/// 支付提供商客户端
#[derive(Debug)]
pub struct CheckoutClient {
    api_url: String,
    secret_key: String,
    currency: String,
    client: reqwest::Client,
}

impl CheckoutClient {
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
            currency: config.currency.clone(),
            client: reqwest::Client::new(),
        }
    }

    /// 创建托管结账会话
    ///
    /// `origin` 用于拼接成功/取消回跳 URL。客户信息作为会话
    /// metadata 随行 —— 在订单记录落盘之前，会话是唯一的持久句柄。
    ///
    /// 提供商的任何失败 (网络、校验) 都映射为
    /// [`AppError::upstream`]，并透传提供商的错误信息。
    pub async fn create_session(
        &self,
        items: &[CartLine],
        customer: &CustomerInfo,
        origin: &str,
    ) -> Result<CheckoutSession, AppError> {
        let line_items = to_line_items(items);

        let resp = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.api_url))
            .bearer_auth(&self.secret_key)
            .json(&json!({
                "payment_method_types": ["card"],
                "mode": "payment",
                "currency": self.currency,
                "line_items": line_items,
                "success_url": format!(
                    "{}/checkout/success?session_id={{CHECKOUT_SESSION_ID}}",
                    origin
                ),
                "cancel_url": format!("{}/checkout", origin),
                "metadata": {
                    "customerName": customer.name,
                    "customerEmail": customer.email,
                    "customerAddress": customer.address,
                    "customerCity": customer.city,
                    "customerPostalCode": customer.postal_code,
                    "customerPhone": customer.phone,
                },
            }))
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Payment provider connection failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(AppError::upstream(format!(
                "Payment session creation failed: {} - {}",
                status, text
            )));
        }

        let session: CheckoutSession = resp
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Invalid provider response: {}", e)))?;

        tracing::info!(session_id = %session.id, "Checkout session created");
        Ok(session)
    }

    /// 取回既有结账会话
    ///
    /// 成功页回跳后客户端用它拿回会话详情 (metadata、行项目)
    /// 来组装订单记录。会话对象按提供商返回的原样透传，
    /// 这里不解释其内部结构。
    pub async fn retrieve_session(&self, session_id: &str) -> Result<serde_json::Value, AppError> {
        let resp = self
            .client
            .get(format!(
                "{}/v1/checkout/sessions/{}",
                self.api_url, session_id
            ))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Payment provider connection failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(AppError::upstream(format!(
                "Checkout session retrieval failed: {} - {}",
                status, text
            )));
        }

        resp.json()
            .await
            .map_err(|e| AppError::upstream(format!("Invalid provider response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: f64, quantity: u32) -> CartLine {
        CartLine {
            title: "Widget".into(),
            image: String::new(),
            description: String::new(),
            price,
            quantity,
        }
    }

    #[test]
    fn test_minor_units_are_rounded_not_truncated() {
        assert_eq!(to_line_items(&[line(19.99, 1)])[0].unit_amount, 1999);
        // .6 of a cent rounds up; truncation would give 1000
        assert_eq!(to_line_items(&[line(10.006, 1)])[0].unit_amount, 1001);
        assert_eq!(to_line_items(&[line(10.004, 1)])[0].unit_amount, 1000);
    }

    #[test]
    fn test_quantity_passthrough() {
        let items = to_line_items(&[line(5.0, 3)]);
        assert_eq!(items[0].quantity, 3);
        assert_eq!(items[0].unit_amount, 500);
    }

    #[test]
    fn test_description_truncated_to_provider_limit() {
        let mut l = line(1.0, 1);
        l.description = "x".repeat(300);
        let items = to_line_items(&[l]);
        assert_eq!(items[0].description.as_ref().unwrap().len(), 255);
    }

    #[test]
    fn test_empty_optional_fields_are_omitted() {
        let items = to_line_items(&[line(1.0, 1)]);
        assert!(items[0].description.is_none());
        assert!(items[0].image.is_none());

        let json = serde_json::to_string(&items[0]).unwrap();
        assert!(!json.contains("description"));
        assert!(!json.contains("image"));
    }
}
