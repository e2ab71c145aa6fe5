//! Payment layer: PayPal checkout orders for generated formulas.
//!
//! Only the formula id, name, and price cross into this crate; formulation
//! never depends on payment outcome.

mod order;
pub use order::{OrderRequest, PayPalMode, PaymentConfig, PaymentError};

#[cfg(feature = "http")]
pub mod paypal;

#[cfg(feature = "http")]
pub use paypal::{CapturedOrder, ClientConfig, CreatedOrder, PaymentClient};
