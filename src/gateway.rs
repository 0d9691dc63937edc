//! Wait-bounded element access on top of a [`Backend`].
//!
//! The gateway owns every timing decision: presence polling, the settle delay
//! after clearing an input, and the scroll cadence used by the stabilization
//! loop. Components hold a gateway reference and never touch the backend
//! directly.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::backend::Backend;
use crate::{Error, Result};

/// Timing knobs for element access and scrolling.
///
/// Tests run the engine with millisecond values; the defaults match the
/// production site's rendering behavior.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// How long `await_presence` keeps polling before giving up.
    pub wait_timeout: Duration,
    /// Pause between presence polls.
    pub poll_interval: Duration,
    /// Pause between clearing an input and typing into it. Cleared inputs
    /// re-validate asynchronously; typing too early drops keystrokes.
    pub settle_delay: Duration,
    /// Pixels scrolled per stabilization step.
    pub scroll_step: i64,
    /// Pause after each scroll step for lazy content to mount.
    pub scroll_settle: Duration,
    /// Pause after the final scroll-to-end.
    pub final_settle: Duration,
    /// Safety cap on stabilization iterations.
    pub max_scroll_iterations: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            wait_timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(250),
            settle_delay: Duration::from_millis(300),
            scroll_step: 1000,
            scroll_settle: Duration::from_millis(1500),
            final_settle: Duration::from_millis(1000),
            max_scroll_iterations: 60,
        }
    }
}

/// Selector-keyed element access with bounded waits.
pub struct ElementGateway<B> {
    backend: B,
    config: GatewayConfig,
}

impl<B: Backend> ElementGateway<B> {
    /// Create a gateway with default timings.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, GatewayConfig::default())
    }

    /// Create a gateway with custom timings.
    pub fn with_config(backend: B, config: GatewayConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Poll until `selector` matches something, up to the wait timeout.
    pub async fn await_presence(&self, selector: &str) -> Result<()> {
        let deadline = Instant::now() + self.config.wait_timeout;
        loop {
            if self.backend.exists(selector).await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::NotFound {
                    selector: selector.to_string(),
                    waited_ms: self.config.wait_timeout.as_millis() as u64,
                });
            }
            sleep(self.config.poll_interval).await;
        }
    }

    /// Immediate presence check. Absence is a valid answer here, not an
    /// error; use this where an element is allowed to be missing.
    pub async fn check_presence(&self, selector: &str) -> Result<bool> {
        self.backend.exists(selector).await
    }

    /// Wait for `selector`, then click it.
    pub async fn click(&self, selector: &str) -> Result<()> {
        self.await_presence(selector).await?;
        debug!("click: {selector}");
        self.backend.click(selector).await
    }

    /// Wait for `selector`, clear it, let the input settle, then type `text`.
    pub async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        self.await_presence(selector).await?;
        debug!("type: {selector} = '{text}'");
        self.backend.clear(selector).await?;
        sleep(self.config.settle_delay).await;
        self.backend.type_text(selector, text).await
    }

    /// Immediate match count.
    pub async fn count(&self, selector: &str) -> Result<usize> {
        self.backend.count(selector).await
    }

    /// Immediate text snapshot of all matches, in document order.
    pub async fn texts(&self, selector: &str) -> Result<Vec<String>> {
        self.backend.texts(selector).await
    }

    /// Send the escape key to the page.
    pub async fn press_escape(&self) -> Result<()> {
        self.backend.press_key("Escape").await
    }

    pub async fn scroll_by(&self, dx: i64, dy: i64) -> Result<()> {
        self.backend.scroll_by(dx, dy).await
    }

    pub async fn scroll_to_end(&self) -> Result<()> {
        self.backend.scroll_to_end().await
    }

    pub async fn scroll_extent(&self) -> Result<u64> {
        self.backend.scroll_extent().await
    }
}
