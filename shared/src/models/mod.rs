//! Data models
//!
//! - [`order`] - durable order records and the payment status machine
//! - [`cart`] - checkout cart input types

pub mod cart;
pub mod order;

pub use cart::CartLine;
pub use order::{now_iso, CustomerInfo, OrderRecord, OrderedProduct, PaymentStatus};
