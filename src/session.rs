//! Browser session lifecycle.

use eoka::{Browser, Page};
use tracing::{debug, info};

use crate::backend::LiveBackend;
use crate::config::BrowserOptions;
use crate::gateway::{ElementGateway, GatewayConfig};
use crate::locators;
use crate::{Error, Result};

/// How long to wait for the cookie-consent dialog before assuming it was
/// already handled.
const CONSENT_WAIT: std::time::Duration = std::time::Duration::from_secs(5);

/// One live browser session. The session owns the browser; components borrow
/// its page through a [`LiveBackend`].
pub struct Session {
    browser: Browser,
    page: Page,
}

impl Session {
    /// Launch a browser with the given options.
    pub async fn launch(options: &BrowserOptions) -> Result<Self> {
        let stealth = eoka::StealthConfig {
            headless: options.headless,
            proxy: options.proxy.clone(),
            user_agent: options.user_agent.clone(),
            viewport_width: options.viewport.as_ref().map(|v| v.width).unwrap_or(1280),
            viewport_height: options.viewport.as_ref().map(|v| v.height).unwrap_or(720),
            ..Default::default()
        };

        debug!("launching browser (headless: {})", options.headless);
        let browser = Browser::launch_with_config(stealth).await?;
        let page = browser.new_page("about:blank").await?;
        Ok(Self { browser, page })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Navigate to `url` and dismiss the cookie-consent dialog if it shows up.
    pub async fn open(&self, url: &str) -> Result<()> {
        info!("opening {url}");
        self.page.goto(url).await?;
        self.dismiss_consent().await
    }

    /// The consent dialog may legitimately never appear (returning visitor,
    /// stored preferences), so its absence is not an error.
    async fn dismiss_consent(&self) -> Result<()> {
        let gateway = ElementGateway::with_config(
            LiveBackend::new(&self.page),
            GatewayConfig {
                wait_timeout: CONSENT_WAIT,
                ..GatewayConfig::default()
            },
        );
        match gateway.click(locators::COOKIE_ACCEPT).await {
            Ok(()) => info!("cookie consent accepted"),
            Err(Error::NotFound { .. }) => debug!("cookie consent dialog not shown"),
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Close the browser.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        Ok(())
    }
}
