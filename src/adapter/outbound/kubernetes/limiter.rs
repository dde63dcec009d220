//! Token-bucket request limiter for per-context clients.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::time::sleep;

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

/// Sustained `qps` with up to `burst` requests back to back.
#[derive(Debug)]
pub struct TokenBucket {
    qps: f64,
    burst: f64,
    bucket: Mutex<Bucket>,
}

impl TokenBucket {
    pub fn new(qps: u32, burst: u32) -> Self {
        let qps = f64::from(qps.max(1));
        let burst = f64::from(burst.max(1));
        Self {
            qps,
            burst,
            bucket: Mutex::new(Bucket {
                tokens: burst,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Take one token, or report how long until one is available.
    fn try_take(&self) -> Result<(), Duration> {
        let mut bucket = self.bucket.lock();
        let now = Instant::now();
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.qps).min(self.burst);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            Ok(())
        } else {
            Err(Duration::from_secs_f64((1.0 - bucket.tokens) / self.qps))
        }
    }

    /// Wait until a request may be sent.
    pub async fn acquire(&self) {
        while let Err(wait) = self.try_take() {
            sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_is_available_immediately() {
        let bucket = TokenBucket::new(1, 3);
        assert!(bucket.try_take().is_ok());
        assert!(bucket.try_take().is_ok());
        assert!(bucket.try_take().is_ok());
        let wait = bucket.try_take().unwrap_err();
        assert!(wait <= Duration::from_secs(1));
        assert!(wait > Duration::from_millis(900));
    }

    #[tokio::test]
    async fn acquire_waits_for_refill() {
        let bucket = TokenBucket::new(100, 1);
        bucket.acquire().await;
        let started = Instant::now();
        bucket.acquire().await;
        assert!(started.elapsed() >= Duration::from_millis(5));
    }
}
