use hmac::{Hmac, Mac};

type HmacSha256 = Hmac<sha2::Sha256>;

fn payment_mac(key_secret: &str, order_id: &str, payment_id: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(key_secret.as_bytes()).ok()?;
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    Some(mac)
}

/// Hex signature Razorpay attaches to a successful checkout:
/// `HMAC-SHA256(key_secret, "<order_id>|<payment_id>")`.
pub fn sign_payment(key_secret: &str, order_id: &str, payment_id: &str) -> Option<String> {
    payment_mac(key_secret, order_id, payment_id).map(|mac| hex::encode(mac.finalize().into_bytes()))
}

/// Check a checkout signature in constant time. Non-hex input is rejected.
pub fn verify_payment_signature(
    key_secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> bool {
    let Ok(provided) = hex::decode(signature.trim()) else {
        return false;
    };
    let Some(mac) = payment_mac(key_secret, order_id, payment_id) else {
        return false;
    };
    mac.verify_slice(&provided).is_ok()
}
