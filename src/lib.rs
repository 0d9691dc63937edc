//! # listing-qa
//!
//! Browser-driven QA checks for a property-listing search site: apply an area
//! search and price/size filters, then verify that every listing on every
//! results page satisfies the filter ranges, the ascending price sort, and the
//! per-listing image cap.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use listing_qa::{run_scenario, ScenarioConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> listing_qa::Result<()> {
//! let config = ScenarioConfig::load("configs/pangrati.yaml")?;
//! run_scenario(&config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! The engine is written against the [`backend::Backend`] trait; the live
//! implementation drives a real browser through `eoka`, and tests drive the
//! same engine through a scripted in-memory backend.

pub mod backend;
pub mod config;
pub mod extract;
pub mod gateway;
pub mod locators;
pub mod phone;
pub mod scroll;
pub mod search;
pub mod session;
pub mod validate;

pub use backend::{Backend, LiveBackend};
pub use config::{BrowserOptions, ScenarioConfig};
pub use gateway::{ElementGateway, GatewayConfig};
pub use phone::PhoneRevealCheck;
pub use search::AreaSearch;
pub use session::Session;
pub use validate::{Filter, FilterKind, PageReport, ResultsValidator, Violation};

use tracing::info;

/// Result type for listing-qa operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving or validating the search site.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("browser error: {0}")]
    Browser(#[from] eoka::Error),

    #[error("element '{selector}' did not appear within {waited_ms}ms")]
    NotFound { selector: String, waited_ms: u64 },

    #[error("page kept growing after {iterations} scroll iterations")]
    StabilizationTimeout { iterations: usize },

    #[error("assertion failed: {0}")]
    Assertion(String),

    #[error("validation failed on {0}")]
    Validation(PageReport),
}

/// Run one configured scenario end to end: launch a browser, search the
/// configured area, check the phone-reveal flow, then apply the filters and
/// validate every results page.
///
/// The browser is closed before the first error is propagated.
pub async fn run_scenario(config: &ScenarioConfig) -> Result<()> {
    let session = Session::launch(&config.browser).await?;
    let outcome = drive(&session, config).await;
    session.close().await?;
    outcome
}

async fn drive(session: &Session, config: &ScenarioConfig) -> Result<()> {
    session.open(&config.target.url).await?;

    let gateway = ElementGateway::new(LiveBackend::new(session.page()));

    let selected = AreaSearch::new(&gateway).search(&config.search.query).await?;
    info!("searched '{}' ({} areas selected)", config.search.query, selected);

    if config.check_phone_reveal {
        PhoneRevealCheck::new(&gateway).validate_reveal_sequence().await?;
        info!("phone-reveal sequence ok");
    }

    ResultsValidator::new(&gateway).validate(&config.filters).await
}
