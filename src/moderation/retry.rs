use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Retry policy with exponential backoff
///
/// Decoupled from any specific API call; drives both the chat-completion and
/// captioning requests.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// How many times to retry after the first failed attempt
    pub max_retries: u32,
    /// Base sleep for exponential backoff
    pub base_delay: Duration,
    /// Whether to add random jitter to each delay
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(800),
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given retry count
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Builder pattern: set base delay
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Builder pattern: enable or disable jitter
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Total number of attempts this policy allows
    pub fn attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Backoff delay before retrying after the given zero-based attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let backoff = self.base_delay.saturating_mul(2u32.saturating_pow(attempt));
        if self.jitter {
            let fraction: f64 = rand::rng().random_range(0.0..0.5);
            backoff + self.base_delay.mul_f64(fraction)
        } else {
            backoff
        }
    }

    /// Run `op` until it succeeds or the policy is exhausted
    ///
    /// Sleeps between attempts; the final error is returned unchanged.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(_) if attempt < self.max_retries => {
                    tokio::time::sleep(self.delay_for(attempt)).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
