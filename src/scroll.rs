//! Lazy-load stabilization.

use tokio::time::sleep;
use tracing::debug;

use crate::backend::Backend;
use crate::gateway::ElementGateway;
use crate::{Error, Result};

/// Scroll forward in fixed steps until the scrollable extent stops growing,
/// then jump to the absolute end and let the page settle.
///
/// This is the only way to know that later bulk queries see the complete
/// result set rather than a lazily-loaded prefix. The iteration cap guards
/// against a page that never stops growing.
pub async fn scroll_to_stable_end<B: Backend>(gateway: &ElementGateway<B>) -> Result<()> {
    let config = gateway.config();
    let mut last_extent = gateway.scroll_extent().await?;

    for iteration in 0..config.max_scroll_iterations {
        gateway.scroll_by(0, config.scroll_step).await?;
        sleep(config.scroll_settle).await;

        let extent = gateway.scroll_extent().await?;
        if extent == last_extent {
            debug!("scroll stabilized at {extent}px after {} steps", iteration + 1);
            gateway.scroll_to_end().await?;
            sleep(config.final_settle).await;
            return Ok(());
        }
        last_extent = extent;
    }

    Err(Error::StabilizationTimeout {
        iterations: config.max_scroll_iterations,
    })
}
