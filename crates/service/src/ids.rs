//! Identifier and session token generation.
//!
//! Values combine the current wall-clock millisecond with random fragments
//! drawn from `rand::thread_rng()`, which is seeded from the OS once per
//! thread. Collisions are improbable, not impossible, and the output is not a
//! cryptographic secret: callers that need uniqueness re-check against their
//! collection.

use rand::Rng;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Render `n` in lowercase base 36.
pub fn base36(mut n: u128) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

fn now_millis() -> u128 {
    chrono::Utc::now().timestamp_millis().max(0) as u128
}

/// `<millis>-<random>-<random>`, e.g. `lx2k9c1q-3f9a0k2m1x8z-8d1m2k4p0q7s`.
pub fn session_token() -> String {
    let mut rng = rand::thread_rng();
    format!(
        "{}-{}-{}",
        base36(now_millis()),
        base36(rng.gen::<u64>() as u128),
        base36(rng.gen::<u64>() as u128)
    )
}

fn record_id(prefix: &str) -> String {
    let salt: u32 = rand::thread_rng().gen_range(0..100_000);
    format!("{prefix}-{}-{}", base36(now_millis()), base36(salt as u128))
}

/// Product ids look like `p-lx2k9c1q-1bk3`.
pub fn product_id() -> String {
    record_id("p")
}

/// User ids look like `u-lx2k9c1q-2ab`.
pub fn user_id() -> String {
    record_id("u")
}
