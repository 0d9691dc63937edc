//! Selector table for the search site.
//!
//! All selectors are XPath expressions, kept in one place so page structure
//! changes touch only this module. The engine treats them as opaque strings.

const SEARCH_INPUT_BASE: &str = "//input[@type='text']";
const SELECTED_TAG_BASE: &str = "//button[@class='area-tag-button']";
const RESULT_ITEM_BASE: &str = "//article[contains(@data-testid,'property-ad')]";
const PAGINATION_BASE: &str = "//nav[contains(@data-testid,'pagination')]";

/// Cookie-consent accept button shown on first load.
pub const COOKIE_ACCEPT: &str = "//button[@id='accept-btn']";

/// Submit control of the search form.
pub const SEARCH_SUBMIT: &str = "//input[@type='submit']";

/// Every suggestion in the autocomplete panel.
pub const SUGGESTION: &str = "//button[contains(@data-testid,'dropdown_option')]";

pub const PRICE_FILTER: &str = "//button[@data-testid='price-filter-button']";
pub const MIN_PRICE_INPUT: &str = "//input[@data-testid='minimum_price_input']";
pub const MAX_PRICE_INPUT: &str = "//input[@data-testid='maximum_price_input']";

pub const SIZE_FILTER: &str = "//button[@data-testid='size-filter-button']";
pub const MIN_SIZE_INPUT: &str = "//input[@data-testid='minimum_size_input']";
pub const MAX_SIZE_INPUT: &str = "//input[@data-testid='maximum_size_input']";

/// Submit control inside an open filter panel.
pub const FILTER_SUBMIT: &str = "//button[@data-testid='submit-input']";

pub const SORT_DROPDOWN: &str = "//button[contains(@data-testid,'open-property-sorting-dropdown')]";
pub const SORT_ASCENDING: &str = "//button[@data-testid='sorting_dropdown_option_price_asc']";

/// Every listing card on the current results page.
pub const RESULT_ITEM: &str = RESULT_ITEM_BASE;

/// Numbered page buttons of the pagination control.
pub const PAGINATION_ENTRY: &str =
    "//nav[contains(@data-testid,'pagination')]//button[@data-page]";

/// Revealed phone-number container on a listing.
pub const PHONE_CONTAINER: &str = "//div[contains(@data-testid,'phone-number')]";

/// Button that reveals the phone number.
pub const CALL_BUTTON: &str = "//button[contains(@data-testid,'call-action')]";

/// Search input for the given field kind (e.g. "area").
pub fn search_input(kind: &str) -> String {
    format!("{SEARCH_INPUT_BASE}[contains(@data-testid,'{kind}')]")
}

/// Autocomplete suggestion with exactly the given display text.
pub fn suggestion_with_text(text: &str) -> String {
    format!("{SUGGESTION}[.='{text}']")
}

/// Already-applied area chip with exactly the given display text.
pub fn selected_tag(text: &str) -> String {
    format!("{SELECTED_TAG_BASE}[.='{text}']")
}

/// The `index`-th listing card (1-based, document order).
pub fn result_item(index: usize) -> String {
    format!("({RESULT_ITEM_BASE})[{index}]")
}

/// Price element of the `index`-th listing card.
pub fn result_price(index: usize) -> String {
    format!("({RESULT_ITEM_BASE})[{index}]//span[contains(@data-testid,'property-price')]")
}

/// All images of the `index`-th listing card.
pub fn result_images(index: usize) -> String {
    format!("({RESULT_ITEM_BASE})[{index}]//img")
}

/// Pagination button for the given page number.
pub fn page_button(page: usize) -> String {
    format!("{PAGINATION_BASE}//button[@data-page='{page}']")
}
