//! Automation backend abstraction.
//!
//! The validation engine only ever talks to the page through this trait, and
//! only in terms of opaque selector strings and text snapshots. Element
//! handles are never exposed: every operation re-resolves its selector
//! against the live document.

mod live;

pub use live::LiveBackend;

use async_trait::async_trait;

use crate::Result;

/// One browser page, driven through selector-keyed primitives.
///
/// All operations are immediate: waiting and settle delays belong to the
/// [`ElementGateway`](crate::gateway::ElementGateway), not the backend.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Whether at least one element currently matches `selector`.
    async fn exists(&self, selector: &str) -> Result<bool>;

    /// Number of elements currently matching `selector`.
    async fn count(&self, selector: &str) -> Result<usize>;

    /// Trimmed rendered text of every element matching `selector`, in
    /// document order. The returned strings are plain snapshots and stay
    /// valid across later DOM mutation.
    async fn texts(&self, selector: &str) -> Result<Vec<String>>;

    /// Click the first element matching `selector`.
    async fn click(&self, selector: &str) -> Result<()>;

    /// Clear the value of the first input matching `selector`.
    async fn clear(&self, selector: &str) -> Result<()>;

    /// Type `text` into the first input matching `selector`.
    async fn type_text(&self, selector: &str, text: &str) -> Result<()>;

    /// Send a keyboard key (e.g. "Escape") to the page.
    async fn press_key(&self, key: &str) -> Result<()>;

    /// Scroll the viewport by the given pixel offsets.
    async fn scroll_by(&self, dx: i64, dy: i64) -> Result<()>;

    /// Jump to the absolute end of the scrollable document.
    async fn scroll_to_end(&self) -> Result<()>;

    /// Total scrollable extent of the document, in pixels.
    async fn scroll_extent(&self) -> Result<u64>;
}
