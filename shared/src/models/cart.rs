//! Cart Model

use serde::{Deserialize, Serialize};

/// One client-side cart line submitted at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub title: String,
    /// Image reference forwarded to the payment provider
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    /// Unit price in currency unit
    pub price: f64,
    pub quantity: u32,
}
