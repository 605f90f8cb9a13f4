// ==========================================
// EA Portal Data Core - CART workflow transformer
// ==========================================

pub mod transformer;

pub use transformer::{transform_cart_requests, CartTransformOutput, PENDING_WITH_CART};
