//! Scripted in-memory backend for driving the engine without a browser.
//!
//! The mock models a tiny listing site: an autocomplete panel, applied area
//! chips, paginated listings, a lazily-growing scroll extent, and the
//! phone-reveal dialog. Selectors are recognized by comparing against the
//! same `locators` constructors the engine uses, so no selector parsing is
//! needed.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use listing_qa::backend::Backend;
use listing_qa::gateway::{ElementGateway, GatewayConfig};
use listing_qa::{locators, Error, Result};

/// One rendered listing card.
#[derive(Debug, Clone)]
pub struct MockListing {
    pub price_text: Option<String>,
    pub body_text: String,
    pub images: usize,
}

/// A listing with the given price and size and a normal image count.
pub fn listing(price: u32, size: u32) -> MockListing {
    MockListing {
        price_text: Some(format!("{price} €")),
        body_text: format!("Διαμέρισμα {size} τ.μ., {price} €"),
        images: 5,
    }
}

/// A listing whose price text is missing entirely.
pub fn unpriced_listing(size: u32) -> MockListing {
    MockListing {
        price_text: None,
        body_text: format!("Διαμέρισμα {size} τ.μ."),
        images: 5,
    }
}

#[derive(Debug, Default)]
pub struct SiteState {
    pub query: String,
    pub suggestions: Vec<String>,
    pub selected: Vec<String>,
    pub pages: Vec<Vec<MockListing>>,
    pub current_page: usize,
    /// Successive scroll-extent readings; the last value repeats once the
    /// sequence is exhausted (the page has stopped growing).
    pub extents: Vec<u64>,
    pub extent_idx: usize,
    /// When set, the extent keeps growing forever instead of stabilizing.
    pub grow_forever: bool,
    pub phone_has_reveal_button: bool,
    pub phone_visible: bool,
    // Recorded interactions.
    pub clicks: Vec<String>,
    pub typed: Vec<(String, String)>,
    pub suggestion_clicks: usize,
    pub scroll_steps: usize,
    pub end_scrolls: usize,
}

impl SiteState {
    /// One results page with the given listings; everything else default.
    pub fn with_page(listings: Vec<MockListing>) -> Self {
        Self {
            pages: vec![listings],
            ..Self::default()
        }
    }

    fn page(&self) -> &[MockListing] {
        self.pages
            .get(self.current_page)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn count_for(&self, selector: &str) -> usize {
        // Fixed controls that are always rendered.
        if selector == locators::SEARCH_SUBMIT
            || selector == locators::PRICE_FILTER
            || selector == locators::MIN_PRICE_INPUT
            || selector == locators::MAX_PRICE_INPUT
            || selector == locators::SIZE_FILTER
            || selector == locators::MIN_SIZE_INPUT
            || selector == locators::MAX_SIZE_INPUT
            || selector == locators::FILTER_SUBMIT
            || selector == locators::SORT_DROPDOWN
            || selector == locators::SORT_ASCENDING
            || selector == locators::search_input("area")
        {
            return 1;
        }
        if selector == locators::SUGGESTION {
            return self.suggestions.len();
        }
        for text in &self.suggestions {
            if selector == locators::suggestion_with_text(text) {
                return 1;
            }
        }
        for text in &self.selected {
            if selector == locators::selected_tag(text) {
                return 1;
            }
        }
        if selector == locators::RESULT_ITEM {
            return self.page().len();
        }
        for index in 1..=self.page().len() {
            if selector == locators::result_item(index) {
                return 1;
            }
            if selector == locators::result_price(index) {
                return usize::from(self.page()[index - 1].price_text.is_some());
            }
            if selector == locators::result_images(index) {
                return self.page()[index - 1].images;
            }
        }
        if selector == locators::PAGINATION_ENTRY {
            return if self.pages.len() > 1 { self.pages.len() } else { 0 };
        }
        for page in 1..=self.pages.len() {
            if selector == locators::page_button(page) {
                return 1;
            }
        }
        if selector == locators::PHONE_CONTAINER {
            return usize::from(self.phone_visible);
        }
        if selector == locators::CALL_BUTTON {
            return usize::from(self.phone_has_reveal_button);
        }
        0
    }

    fn texts_for(&self, selector: &str) -> Vec<String> {
        if selector == locators::SUGGESTION {
            return self.suggestions.clone();
        }
        for index in 1..=self.page().len() {
            if selector == locators::result_price(index) {
                return self.page()[index - 1].price_text.iter().cloned().collect();
            }
            if selector == locators::result_item(index) {
                return vec![self.page()[index - 1].body_text.clone()];
            }
        }
        Vec::new()
    }

    fn apply_click(&mut self, selector: &str) {
        let suggestions = self.suggestions.clone();
        for text in suggestions {
            if selector == locators::suggestion_with_text(&text) {
                if !self.selected.contains(&text) {
                    self.selected.push(text);
                }
                // Selecting a suggestion clears the input and collapses
                // the panel state the engine must re-assert.
                self.query.clear();
                self.suggestion_clicks += 1;
                return;
            }
        }
        for page in 1..=self.pages.len() {
            if selector == locators::page_button(page) {
                self.current_page = page - 1;
                self.extent_idx = 0;
                return;
            }
        }
        if selector == locators::CALL_BUTTON {
            self.phone_visible = true;
        }
    }

    fn next_extent(&mut self) -> u64 {
        if self.extents.is_empty() {
            return 1000;
        }
        if self.extent_idx < self.extents.len() {
            let extent = self.extents[self.extent_idx];
            self.extent_idx += 1;
            return extent;
        }
        let last = *self.extents.last().unwrap();
        if self.grow_forever {
            let overshoot = (self.extent_idx - self.extents.len() + 1) as u64;
            self.extent_idx += 1;
            return last + overshoot * 1000;
        }
        last
    }
}

/// Cloneable handle over shared site state; the gateway owns one clone and
/// the test keeps another for inspection.
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<SiteState>>,
}

impl MockBackend {
    pub fn new(state: SiteState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn state(&self) -> MutexGuard<'_, SiteState> {
        self.state.lock().unwrap()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn exists(&self, selector: &str) -> Result<bool> {
        Ok(self.state().count_for(selector) > 0)
    }

    async fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.state().count_for(selector))
    }

    async fn texts(&self, selector: &str) -> Result<Vec<String>> {
        Ok(self.state().texts_for(selector))
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let mut state = self.state();
        if state.count_for(selector) == 0 {
            return Err(Error::Assertion(format!(
                "mock: click on missing element {selector}"
            )));
        }
        state.clicks.push(selector.to_string());
        state.apply_click(selector);
        Ok(())
    }

    async fn clear(&self, selector: &str) -> Result<()> {
        let mut state = self.state();
        if selector == locators::search_input("area") {
            state.query.clear();
        }
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        let mut state = self.state();
        if selector == locators::search_input("area") {
            state.query = text.to_string();
        }
        state.typed.push((selector.to_string(), text.to_string()));
        Ok(())
    }

    async fn press_key(&self, key: &str) -> Result<()> {
        if key == "Escape" {
            self.state().phone_visible = false;
        }
        Ok(())
    }

    async fn scroll_by(&self, _dx: i64, _dy: i64) -> Result<()> {
        self.state().scroll_steps += 1;
        Ok(())
    }

    async fn scroll_to_end(&self) -> Result<()> {
        self.state().end_scrolls += 1;
        Ok(())
    }

    async fn scroll_extent(&self) -> Result<u64> {
        Ok(self.state().next_extent())
    }
}

/// Gateway with millisecond timings so absent-element waits fail fast.
pub fn test_gateway(backend: MockBackend) -> ElementGateway<MockBackend> {
    ElementGateway::with_config(backend, test_config())
}

pub fn test_config() -> GatewayConfig {
    GatewayConfig {
        wait_timeout: Duration::from_millis(40),
        poll_interval: Duration::from_millis(5),
        settle_delay: Duration::from_millis(1),
        scroll_step: 1000,
        scroll_settle: Duration::from_millis(1),
        final_settle: Duration::from_millis(1),
        max_scroll_iterations: 20,
    }
}
