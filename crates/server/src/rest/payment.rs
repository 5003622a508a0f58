use axum::{extract::State, Json};
use std::sync::Arc;

use shared_types::{AppError, VerifyPaymentRequest, VerifyPaymentResponse};

use crate::auth::extractors::AuthRequired;
use crate::config::Settings;
use crate::error_convert::ValidateRequest;
use crate::razorpay::verify_payment_signature;

// ---------------------------------------------------------------------------
// POST /api/payments/verify
// ---------------------------------------------------------------------------

/// Verify the signature Razorpay returns from checkout.
#[utoipa::path(
    post,
    path = "/api/payments/verify",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Signature is valid", body = VerifyPaymentResponse),
        (status = 400, description = "Invalid signature", body = AppError),
        (status = 401, description = "Not authenticated", body = AppError),
        (status = 500, description = "Payment verification not configured", body = AppError)
    ),
    security(("bearer" = [])),
    tag = "payments"
)]
pub async fn verify_payment(
    State(settings): State<Arc<Settings>>,
    AuthRequired(claims): AuthRequired,
    Json(body): Json<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>, AppError> {
    body.validate_request()?;

    let Some(secret) = settings.razorpay_key_secret.as_deref() else {
        tracing::error!("RAZORPAY_KEY_SECRET is not set; cannot verify payments");
        return Err(AppError::internal("Payment verification is not configured"));
    };

    if !verify_payment_signature(
        secret,
        &body.razorpay_order_id,
        &body.razorpay_payment_id,
        &body.razorpay_signature,
    ) {
        tracing::warn!(
            user_id = %claims.sub,
            order_id = %body.razorpay_order_id,
            "payment signature mismatch"
        );
        return Err(AppError::bad_request("Invalid payment signature"));
    }

    tracing::info!(
        user_id = %claims.sub,
        order_id = %body.razorpay_order_id,
        payment_id = %body.razorpay_payment_id,
        "payment verified"
    );
    Ok(Json(VerifyPaymentResponse {
        success: true,
        order_id: body.razorpay_order_id,
        payment_id: body.razorpay_payment_id,
    }))
}
