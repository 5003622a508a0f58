use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

/// Fields returned by the Razorpay checkout handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct VerifyPaymentRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Order id is required"))
    )]
    pub razorpay_order_id: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Payment id is required"))
    )]
    pub razorpay_payment_id: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Signature is required"))
    )]
    pub razorpay_signature: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub order_id: String,
    pub payment_id: String,
}
