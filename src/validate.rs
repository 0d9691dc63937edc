//! Filter application and multi-page result validation.

use std::fmt;

use serde::Deserialize;
use tracing::{debug, info};

use crate::backend::Backend;
use crate::extract::FactExtractor;
use crate::gateway::ElementGateway;
use crate::locators;
use crate::scroll;
use crate::{Error, Result};

/// No listing may render more than this many images, regardless of filters.
pub const MAX_IMAGES_PER_LISTING: usize = 30;

/// Which listing fact a filter constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Price,
    Size,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::Price => f.write_str("price"),
            FilterKind::Size => f.write_str("size"),
        }
    }
}

/// One inclusive range constraint on a listing fact.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Filter {
    pub kind: FilterKind,
    pub min: u32,
    pub max: u32,
}

impl Filter {
    pub fn validate(&self) -> Result<()> {
        if self.min > self.max {
            return Err(Error::Config(format!(
                "{} filter: min {} exceeds max {}",
                self.kind, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// One broken invariant on one listing. Item indices are 1-based positions in
/// document order on the reported page.
#[derive(Debug, Clone)]
pub enum Violation {
    /// A fact fell outside its filter range.
    Range {
        item: usize,
        kind: FilterKind,
        value: u32,
        min: u32,
        max: u32,
    },
    /// A price broke the ascending sort.
    Order {
        item: usize,
        value: u32,
        previous: u32,
    },
    /// A listing rendered more images than the cap allows.
    Cardinality {
        item: usize,
        count: usize,
        limit: usize,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Range {
                item,
                kind,
                value,
                min,
                max,
            } => write!(f, "item {item}: {kind} {value} outside {min}..{max}"),
            Violation::Order {
                item,
                value,
                previous,
            } => write!(
                f,
                "item {item}: price {value} breaks ascending order (previous {previous})"
            ),
            Violation::Cardinality { item, count, limit } => {
                write!(f, "item {item}: {count} images exceeds limit of {limit}")
            }
        }
    }
}

/// Every violation found on one results page.
#[derive(Debug, Clone)]
pub struct PageReport {
    pub page: usize,
    pub violations: Vec<Violation>,
}

impl fmt::Display for PageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {}: {} violation(s)", self.page, self.violations.len())?;
        for violation in &self.violations {
            write!(f, "\n  {violation}")?;
        }
        Ok(())
    }
}

/// Current position in a paginated result set, derived once per run from the
/// pagination control and assumed stable afterwards.
#[derive(Debug, Clone, Copy)]
pub struct PageCursor {
    pub current: usize,
    pub total: usize,
}

/// Applies filters and sort, then walks every results page asserting the
/// range, order, and image-cap invariants.
pub struct ResultsValidator<'a, B> {
    gateway: &'a ElementGateway<B>,
    extractor: FactExtractor,
}

impl<'a, B: Backend> ResultsValidator<'a, B> {
    pub fn new(gateway: &'a ElementGateway<B>) -> Self {
        Self {
            gateway,
            extractor: FactExtractor::new(),
        }
    }

    /// Open each filter's control, enter its bounds, and submit. Filters are
    /// applied in the order given, each submitted on its own.
    pub async fn apply_filters(&self, filters: &[Filter]) -> Result<()> {
        for filter in filters {
            filter.validate()?;
            let (button, min_input, max_input) = match filter.kind {
                FilterKind::Price => (
                    locators::PRICE_FILTER,
                    locators::MIN_PRICE_INPUT,
                    locators::MAX_PRICE_INPUT,
                ),
                FilterKind::Size => (
                    locators::SIZE_FILTER,
                    locators::MIN_SIZE_INPUT,
                    locators::MAX_SIZE_INPUT,
                ),
            };
            self.gateway.click(button).await?;
            self.gateway
                .type_text(min_input, &filter.min.to_string())
                .await?;
            self.gateway
                .type_text(max_input, &filter.max.to_string())
                .await?;
            self.gateway.click(locators::FILTER_SUBMIT).await?;
            info!(
                "applied {} filter {}..{}",
                filter.kind, filter.min, filter.max
            );
        }
        Ok(())
    }

    /// Open the sort control and pick ascending order.
    pub async fn sort_ascending(&self) -> Result<()> {
        self.gateway.click(locators::SORT_DROPDOWN).await?;
        self.gateway.click(locators::SORT_ASCENDING).await?;
        info!("sorting ascending");
        Ok(())
    }

    /// Apply `filters`, sort ascending, and validate every results page.
    ///
    /// Violations on a page are collected and reported together; the first
    /// page carrying any violation ends the run, since later pages cannot be
    /// trusted once the process is already in a flagged state.
    pub async fn validate(&self, filters: &[Filter]) -> Result<()> {
        self.apply_filters(filters).await?;
        self.sort_ascending().await?;

        let mut cursor = self.page_cursor().await?;
        info!("{} results page(s)", cursor.total);

        loop {
            info!("validating page {}/{}", cursor.current, cursor.total);
            scroll::scroll_to_stable_end(self.gateway).await?;

            let report = self.validate_page(filters, cursor.current).await?;
            if !report.violations.is_empty() {
                return Err(Error::Validation(report));
            }

            if cursor.current >= cursor.total {
                return Ok(());
            }
            cursor.current += 1;
            self.gateway
                .click(&locators::page_button(cursor.current))
                .await?;
        }
    }

    /// Page count from the pagination control; no control means one page.
    async fn page_cursor(&self) -> Result<PageCursor> {
        let entries = self.gateway.count(locators::PAGINATION_ENTRY).await?;
        Ok(PageCursor {
            current: 1,
            total: entries.max(1),
        })
    }

    /// Check every invariant on the current page, collecting all violations.
    async fn validate_page(&self, filters: &[Filter], page: usize) -> Result<PageReport> {
        let items = self.gateway.count(locators::RESULT_ITEM).await?;
        debug!("page {page}: {items} listings");

        let mut violations = Vec::new();

        // Image cap holds unconditionally, independent of the active filters.
        for item in 1..=items {
            let count = self.gateway.count(&locators::result_images(item)).await?;
            if count > MAX_IMAGES_PER_LISTING {
                violations.push(Violation::Cardinality {
                    item,
                    count,
                    limit: MAX_IMAGES_PER_LISTING,
                });
            }
        }

        for filter in filters {
            match filter.kind {
                FilterKind::Price => {
                    self.check_prices(filter, items, &mut violations).await?;
                }
                FilterKind::Size => {
                    self.check_sizes(filter, items, &mut violations).await?;
                }
            }
        }

        Ok(PageReport { page, violations })
    }

    /// Range-check every parseable price, then check the parsed sequence for
    /// ascending order in document order.
    async fn check_prices(
        &self,
        filter: &Filter,
        items: usize,
        violations: &mut Vec<Violation>,
    ) -> Result<()> {
        let mut prices = Vec::new();
        for item in 1..=items {
            let texts = self.gateway.texts(&locators::result_price(item)).await?;
            let Some(text) = texts.first() else { continue };
            let Some(price) = self.extractor.price(text) else {
                debug!("item {item}: unparseable price text '{text}', skipped");
                continue;
            };
            if price < filter.min || price > filter.max {
                violations.push(Violation::Range {
                    item,
                    kind: filter.kind,
                    value: price,
                    min: filter.min,
                    max: filter.max,
                });
            }
            prices.push((item, price));
        }

        for pair in prices.windows(2) {
            let (_, previous) = pair[0];
            let (item, value) = pair[1];
            if value < previous {
                violations.push(Violation::Order {
                    item,
                    value,
                    previous,
                });
            }
        }
        Ok(())
    }

    /// Range-check every parseable size. Sizes carry no ordering invariant.
    async fn check_sizes(
        &self,
        filter: &Filter,
        items: usize,
        violations: &mut Vec<Violation>,
    ) -> Result<()> {
        for item in 1..=items {
            let texts = self.gateway.texts(&locators::result_item(item)).await?;
            let Some(text) = texts.first() else { continue };
            let Some(size) = self.extractor.size(text) else {
                debug!("item {item}: no size in rendered text, skipped");
                continue;
            };
            if size < filter.min || size > filter.max {
                violations.push(Violation::Range {
                    item,
                    kind: filter.kind,
                    value: size,
                    min: filter.min,
                    max: filter.max,
                });
            }
        }
        Ok(())
    }
}
