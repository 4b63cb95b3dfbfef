use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Keeps successive LLM calls at least `delay` apart
#[derive(Debug)]
pub struct RateLimiter {
    delay: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_call: Mutex::new(None),
        }
    }

    /// Sleep for whatever remains of the delay, then stamp the call time
    pub async fn wait(&self) {
        let mut last_call = self.last_call.lock().await;

        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.delay {
                let remaining = self.delay - elapsed;
                debug!("Rate limiting: sleeping {:?}", remaining);
                tokio::time::sleep(remaining).await;
            }
        }

        *last_call = Some(Instant::now());
    }
}
