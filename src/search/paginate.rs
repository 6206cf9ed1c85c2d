//! Page fetching and bounded aggregation.
//!
//! `fetch_all` exists because the remote corpus size is unknown: the loop is
//! explicitly bounded by a page cap and reports truncation instead of
//! looping forever or failing. A failure on any page aborts the whole
//! aggregation; partial results are never returned as if complete.

use tracing::debug;

use crate::client::HttpClient;
use crate::error::SearchError;
use crate::limiter::RateLimiter;
use crate::search::request;
use crate::types::{SearchCriteria, SearchDomain};

/// One fetched unit from the remote API.
#[derive(Debug, Clone)]
pub struct Page {
    /// Raw result items, in server order
    pub items: Vec<serde_json::Value>,
    /// Server's end-of-pages signal, when it sends one
    pub has_more: Option<bool>,
    /// Declared total item count. Advisory only; the remote is known to
    /// disagree with actual returned items, so nothing asserts equality.
    pub declared_total: Option<u64>,
}

impl Page {
    /// Extract a page from whatever shape the endpoint returned.
    ///
    /// The three Legifrance bases do not share a response schema, so the
    /// probing here is deliberately tolerant: a `results` or `items` array,
    /// or a bare top-level array.
    pub fn from_response(raw: serde_json::Value) -> Self {
        let (items, has_more, declared_total) = match raw {
            serde_json::Value::Array(items) => (items, None, None),
            serde_json::Value::Object(mut obj) => {
                let items = ["results", "items"]
                    .iter()
                    .find_map(|key| match obj.remove(*key) {
                        Some(serde_json::Value::Array(items)) => Some(items),
                        _ => None,
                    })
                    .unwrap_or_default();
                let has_more = obj.get("has_more").and_then(serde_json::Value::as_bool);
                let declared_total = ["total_results", "total"]
                    .iter()
                    .find_map(|key| obj.get(*key))
                    .and_then(serde_json::Value::as_u64);
                (items, has_more, declared_total)
            }
            _ => (Vec::new(), None, None),
        };

        Self {
            items,
            has_more,
            declared_total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Pages accumulated into one ordered result set.
#[derive(Debug, Clone)]
pub struct AggregatedResult {
    /// Items in server order across pages; never re-sorted locally
    pub items: Vec<serde_json::Value>,
    /// Pages actually fetched
    pub pages_fetched: u32,
    /// True when aggregation stopped at the page cap rather than end-of-pages
    pub truncated: bool,
    /// Advisory total from the last page that declared one
    pub declared_total: Option<u64>,
}

impl AggregatedResult {
    fn from_single(page: Page) -> Self {
        Self {
            items: page.items,
            pages_fetched: 1,
            truncated: false,
            declared_total: page.declared_total,
        }
    }
}

/// Drives rate-gated page requests to satisfy single-page or exhaustive
/// retrieval.
pub struct Paginator<'a> {
    http: &'a HttpClient,
    limiter: &'a RateLimiter,
    page_cap: u32,
}

impl<'a> Paginator<'a> {
    pub fn new(http: &'a HttpClient, limiter: &'a RateLimiter, page_cap: u32) -> Self {
        Self {
            http,
            limiter,
            page_cap: page_cap.max(1),
        }
    }

    /// Issue exactly one rate-gated request and return the first page,
    /// regardless of the exhaustive-retrieval flag.
    pub async fn fetch_one(
        &self,
        domain: SearchDomain,
        criteria: &SearchCriteria,
    ) -> Result<Page, SearchError> {
        let request = request::build(domain, criteria)?;
        self.limiter.acquire().await;
        let raw = self.http.post_search(request.endpoint, &request.body).await?;
        Ok(Page::from_response(raw))
    }

    /// Fetch successive pages until the server signals the end, an empty page
    /// arrives, or the page cap is hit (then `truncated` is set).
    ///
    /// Every page request passes through the rate limiter individually, so an
    /// exhaustive fetch cannot burst past the outbound ceiling.
    pub async fn fetch_all(
        &self,
        domain: SearchDomain,
        criteria: &SearchCriteria,
    ) -> Result<AggregatedResult, SearchError> {
        let request = request::build(domain, criteria)?;

        let mut items = Vec::new();
        let mut declared_total = None;
        let mut pages_fetched = 0u32;

        for page_number in 1..=self.page_cap {
            self.limiter.acquire().await;
            let paged = request.for_page(page_number);
            let raw = self.http.post_search(paged.endpoint, &paged.body).await?;
            let page = Page::from_response(raw);
            pages_fetched += 1;

            if page.declared_total.is_some() {
                declared_total = page.declared_total;
            }

            debug!(
                domain = %domain,
                page = page_number,
                items = page.items.len(),
                "fetched page"
            );

            if page.is_empty() {
                return Ok(AggregatedResult {
                    items,
                    pages_fetched,
                    truncated: false,
                    declared_total,
                });
            }

            items.extend(page.items);

            if page.has_more == Some(false) {
                return Ok(AggregatedResult {
                    items,
                    pages_fetched,
                    truncated: false,
                    declared_total,
                });
            }
        }

        Ok(AggregatedResult {
            items,
            pages_fetched,
            truncated: true,
            declared_total,
        })
    }

    /// Run the retrieval mode the criteria ask for.
    pub async fn run(
        &self,
        domain: SearchDomain,
        criteria: &SearchCriteria,
    ) -> Result<AggregatedResult, SearchError> {
        if criteria.fetch_all() {
            self.fetch_all(domain, criteria).await
        } else {
            let page = self.fetch_one(domain, criteria).await?;
            Ok(AggregatedResult::from_single(page))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_from_results_object() {
        let page = Page::from_response(json!({
            "results": [{"id": "a"}, {"id": "b"}],
            "total_results": 42
        }));
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.declared_total, Some(42));
        assert_eq!(page.has_more, None);
    }

    #[test]
    fn test_page_from_items_object_with_has_more() {
        let page = Page::from_response(json!({
            "items": [{"id": "a"}],
            "has_more": false,
            "total": 1
        }));
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.has_more, Some(false));
        assert_eq!(page.declared_total, Some(1));
    }

    #[test]
    fn test_page_from_bare_array() {
        let page = Page::from_response(json!([{"id": "a"}, {"id": "b"}, {"id": "c"}]));
        assert_eq!(page.items.len(), 3);
        assert!(page.declared_total.is_none());
    }

    #[test]
    fn test_unrecognized_shape_is_empty_page() {
        let page = Page::from_response(json!("plain text body"));
        assert!(page.is_empty());
    }

    #[test]
    fn test_item_order_preserved() {
        let page = Page::from_response(json!({
            "results": [{"n": 3}, {"n": 1}, {"n": 2}]
        }));
        let order: Vec<i64> = page.items.iter().map(|v| v["n"].as_i64().unwrap()).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }
}
