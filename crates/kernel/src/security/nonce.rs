//! Request nonces for the listing endpoint.
//!
//! A nonce is an HMAC-SHA256 over an action name and a time tick. Ticks are
//! half the configured lifetime long, and a nonce verifies during the tick it
//! was issued in and the one after, so its effective lifetime is between half
//! and the full lifetime.

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Action name bound into listing nonces.
pub const LISTING_ACTION: &str = "coursegrid_listing";

/// Issues and verifies time-limited request nonces.
#[derive(Clone)]
pub struct NonceService {
    secret: Vec<u8>,
    tick_secs: i64,
}

impl NonceService {
    /// Create a service with the given signing secret and nonce lifetime.
    pub fn new(secret: impl Into<Vec<u8>>, lifetime_secs: u64) -> Self {
        let half = i64::try_from(lifetime_secs / 2).unwrap_or(i64::MAX);
        Self {
            secret: secret.into(),
            tick_secs: half.max(1),
        }
    }

    /// Create a service with a random secret. Nonces will not survive restarts.
    pub fn ephemeral(lifetime_secs: u64) -> Self {
        let mut secret = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut secret);
        Self::new(secret.to_vec(), lifetime_secs)
    }

    /// Issue a nonce for an action at the current time.
    pub fn issue(&self, action: &str) -> String {
        self.issue_at(action, chrono::Utc::now().timestamp())
    }

    /// Verify a nonce for an action at the current time.
    pub fn verify(&self, action: &str, nonce: &str) -> bool {
        self.verify_at(action, nonce, chrono::Utc::now().timestamp())
    }

    /// Issue a nonce as of a unix timestamp.
    pub fn issue_at(&self, action: &str, now: i64) -> String {
        self.sign(action, self.tick(now))
    }

    /// Verify a nonce as of a unix timestamp.
    pub fn verify_at(&self, action: &str, nonce: &str, now: i64) -> bool {
        if nonce.is_empty() {
            return false;
        }
        let tick = self.tick(now);
        [tick, tick - 1].into_iter().any(|t| {
            let expected = self.sign(action, t);
            bool::from(expected.as_bytes().ct_eq(nonce.as_bytes()))
        })
    }

    fn tick(&self, now: i64) -> i64 {
        now.div_euclid(self.tick_secs)
    }

    fn sign(&self, action: &str, tick: i64) -> String {
        // HMAC accepts keys of any length, so this never fails.
        let Ok(mut mac) = HmacSha256::new_from_slice(&self.secret) else {
            return String::new();
        };
        mac.update(action.as_bytes());
        mac.update(b"|");
        mac.update(tick.to_string().as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for NonceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonceService")
            .field("tick_secs", &self.tick_secs)
            .finish_non_exhaustive()
    }
}
