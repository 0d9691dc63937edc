//! Live backend over an `eoka` page.
//!
//! Read operations resolve XPath expressions via injected JS; write
//! operations reuse the page's own click/type/key primitives.

use async_trait::async_trait;
use eoka::Page;

use super::Backend;
use crate::{Error, Result};

/// Drives one live browser page.
pub struct LiveBackend<'a> {
    page: &'a Page,
}

impl<'a> LiveBackend<'a> {
    /// Wrap an existing eoka page.
    pub fn new(page: &'a Page) -> Self {
        Self { page }
    }

    /// Build a snippet that snapshots all matches of `selector` into `nodes`
    /// and then runs `body` over them.
    fn snapshot_js(selector: &str, body: &str) -> String {
        format!(
            r#"(() => {{
    const r = document.evaluate({sel}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null);
    const nodes = [];
    for (let i = 0; i < r.snapshotLength; i++) nodes.push(r.snapshotItem(i));
    {body}
}})()"#,
            sel = serde_json::to_string(selector).unwrap(),
            body = body,
        )
    }

    /// Resolve the first match and run `body` on it as `el`, or return `false`
    /// if nothing matches.
    async fn with_first(&self, selector: &str, body: &str) -> Result<()> {
        let js = Self::snapshot_js(
            selector,
            &format!("if (!nodes.length) return false; const el = nodes[0]; {body} return true;"),
        );
        let found: bool = self.page.evaluate(&js).await?;
        if !found {
            return Err(Error::NotFound {
                selector: selector.to_string(),
                waited_ms: 0,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for LiveBackend<'_> {
    async fn exists(&self, selector: &str) -> Result<bool> {
        Ok(self.count(selector).await? > 0)
    }

    async fn count(&self, selector: &str) -> Result<usize> {
        let js = Self::snapshot_js(selector, "return nodes.length;");
        Ok(self.page.evaluate(&js).await?)
    }

    async fn texts(&self, selector: &str) -> Result<Vec<String>> {
        let js = Self::snapshot_js(
            selector,
            "return nodes.map(n => (n.innerText ?? n.textContent ?? '').trim());",
        );
        Ok(self.page.evaluate(&js).await?)
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.with_first(selector, "el.scrollIntoView({block:'center'}); el.click();")
            .await
    }

    async fn clear(&self, selector: &str) -> Result<()> {
        // Framework-bound inputs only notice the clear if the events fire.
        self.with_first(
            selector,
            "el.focus(); el.value = ''; \
             el.dispatchEvent(new Event('input', {bubbles: true})); \
             el.dispatchEvent(new Event('change', {bubbles: true}));",
        )
        .await
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        self.with_first(selector, "el.focus();").await?;
        self.page.type_text(text).await?;
        Ok(())
    }

    async fn press_key(&self, key: &str) -> Result<()> {
        self.page.human().press_key(key).await?;
        Ok(())
    }

    async fn scroll_by(&self, dx: i64, dy: i64) -> Result<()> {
        self.page
            .execute(&format!("window.scrollBy({dx}, {dy})"))
            .await?;
        Ok(())
    }

    async fn scroll_to_end(&self) -> Result<()> {
        self.page
            .execute("window.scrollTo(0, document.body.scrollHeight)")
            .await?;
        Ok(())
    }

    async fn scroll_extent(&self) -> Result<u64> {
        Ok(self.page.evaluate("document.body.scrollHeight").await?)
    }
}
