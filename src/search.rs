//! Multi-select autocomplete reconciliation.

use tracing::{debug, info};

use crate::backend::Backend;
use crate::gateway::ElementGateway;
use crate::locators;
use crate::{Error, Result};

/// Drives the area search box: types a query, selects every suggestion that
/// is not already applied as a chip, and submits.
pub struct AreaSearch<'a, B> {
    gateway: &'a ElementGateway<B>,
}

impl<'a, B: Backend> AreaSearch<'a, B> {
    pub fn new(gateway: &'a ElementGateway<B>) -> Self {
        Self { gateway }
    }

    /// Type `query` and select every suggestion not yet applied.
    ///
    /// Suggestion texts are snapshotted up front: clicking any suggestion can
    /// invalidate the rest of the panel, so no element state is held across a
    /// selection. Membership in the applied-chip set is re-queried by text for
    /// the same reason. Selecting a suggestion clears the input, so the query
    /// is re-typed after each click to keep the panel populated.
    ///
    /// Returns the number of suggestions selected; calling this again with a
    /// fully-applied set selects nothing.
    pub async fn select_areas(&self, query: &str) -> Result<usize> {
        let input = locators::search_input("area");
        self.gateway.type_text(&input, query).await?;

        // The panel renders asynchronously after typing.
        match self.gateway.await_presence(locators::SUGGESTION).await {
            Ok(()) => {}
            Err(Error::NotFound { .. }) => {
                debug!("no suggestions offered for '{query}'");
                return Ok(0);
            }
            Err(e) => return Err(e),
        }

        let options = self.gateway.texts(locators::SUGGESTION).await?;
        debug!("{} suggestions for '{query}'", options.len());

        let mut selected = 0;
        for text in &options {
            if self.gateway.count(&locators::selected_tag(text)).await? > 0 {
                debug!("'{text}' already applied");
                continue;
            }
            info!("selecting area '{text}'");
            self.gateway
                .click(&locators::suggestion_with_text(text))
                .await?;
            self.gateway.type_text(&input, query).await?;
            selected += 1;
        }
        Ok(selected)
    }

    /// Submit the search form.
    pub async fn submit(&self) -> Result<()> {
        self.gateway.click(locators::SEARCH_SUBMIT).await
    }

    /// Reconcile the selection for `query`, then submit.
    pub async fn search(&self, query: &str) -> Result<usize> {
        let selected = self.select_areas(query).await?;
        self.submit().await?;
        Ok(selected)
    }
}
