/// Authentication core configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared secret for one-time code generation. Must be at least 16 bytes.
    pub otp_secret: String,
    /// One-time code width in digits (default 6). Env var: `OTP_DIGITS`.
    pub otp_digits: usize,
    /// One-time code time step in seconds (default 30). Env var: `OTP_STEP_SECS`.
    pub otp_step_secs: u64,
    /// Delivery gateway URL the code adapter POSTs to (e.g. "https://gateway/messages").
    pub delivery_url: String,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            otp_secret: std::env::var("OTP_SECRET").expect("OTP_SECRET"),
            otp_digits: std::env::var("OTP_DIGITS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(6),
            otp_step_secs: std::env::var("OTP_STEP_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            delivery_url: std::env::var("DELIVERY_URL").expect("DELIVERY_URL"),
        }
    }
}
