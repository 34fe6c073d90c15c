use crate::domain::model::Page;
use crate::utils::error::{HazardMapError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

pub const DEFAULT_PAGE_LIMIT: usize = 1000;
pub const DEFAULT_PAGE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub pages: u64,
    pub items: usize,
}

/// Walks a paginated collection endpoint one page at a time.
pub struct PaginatedFetcher {
    client: Client,
    page_limit: usize,
}

impl PaginatedFetcher {
    /// `page_timeout` bounds each page request (connect + body).
    pub fn new(page_limit: usize, page_timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(page_timeout).build()?;
        Ok(Self { client, page_limit })
    }

    /// Calls `on_item` for every item of every page, in the order received,
    /// following `meta.pagination.links.next` while `current_page < total_pages`.
    ///
    /// The first failing page aborts the walk. Items from earlier pages have
    /// already been handed to `on_item` by then.
    pub async fn fetch_all_pages<T, F>(
        &self,
        endpoint: &str,
        mut on_item: F,
        cancel: &CancellationToken,
    ) -> Result<FetchSummary>
    where
        T: DeserializeOwned,
        F: FnMut(T),
    {
        let mut summary = FetchSummary::default();
        let mut next = Some(endpoint.to_string());
        let mut previous_page: Option<u64> = None;

        while let Some(url) = next.take() {
            if cancel.is_cancelled() {
                tracing::warn!("Fetch cancelled before requesting {}", url);
                return Err(HazardMapError::Cancelled { url });
            }

            let page: Page<T> = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::warn!("Fetch cancelled while waiting for {}", url);
                    return Err(HazardMapError::Cancelled { url: url.clone() });
                }
                page = self.fetch_page(&url) => page?,
            };

            let pagination = page.meta.pagination;

            // current_page 必須遞增，否則後端可能讓我們無限循環
            if let Some(previous) = previous_page {
                if pagination.current_page <= previous {
                    return Err(HazardMapError::MalformedPage {
                        url,
                        reason: format!(
                            "current_page {} does not advance past {}",
                            pagination.current_page, previous
                        ),
                    });
                }
            }

            tracing::debug!(
                "Page {}/{} from {}: {} items",
                pagination.current_page,
                pagination.total_pages,
                url,
                page.data.len()
            );

            summary.pages += 1;
            for item in page.data {
                on_item(item);
                summary.items += 1;
            }

            if pagination.has_next() {
                let link = pagination.links.next.ok_or_else(|| HazardMapError::MalformedPage {
                    url: url.clone(),
                    reason: format!(
                        "page {} of {} has no links.next",
                        pagination.current_page, pagination.total_pages
                    ),
                })?;
                next = Some(resolve_link(&url, &link)?);
            }

            previous_page = Some(pagination.current_page);
        }

        tracing::info!(
            "Fetched {} items in {} pages from {}",
            summary.items,
            summary.pages,
            endpoint
        );

        Ok(summary)
    }

    /// Collects every item of the collection.
    pub async fn fetch_all<T>(&self, endpoint: &str, cancel: &CancellationToken) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut items = Vec::new();
        self.fetch_all_pages(endpoint, |item| items.push(item), cancel)
            .await?;
        Ok(items)
    }

    async fn fetch_page<T: DeserializeOwned>(&self, url: &str) -> Result<Page<T>> {
        let request_url = self.page_url(url)?;
        tracing::debug!("Making API request to: {}", request_url);

        let transport = |source| HazardMapError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(request_url)
            .send()
            .await
            .map_err(transport)?;

        tracing::debug!("API response status: {}", response.status());

        let response = response.error_for_status().map_err(transport)?;
        let body = response.bytes().await.map_err(transport)?;

        serde_json::from_slice(&body).map_err(|e| HazardMapError::MalformedPage {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    /// Adds `limit` unless the URL already has one (next links usually carry it).
    fn page_url(&self, url: &str) -> Result<Url> {
        let mut parsed = Url::parse(url).map_err(|e| HazardMapError::MalformedPage {
            url: url.to_string(),
            reason: format!("invalid page URL: {}", e),
        })?;

        if !parsed.query_pairs().any(|(key, _)| key == "limit") {
            parsed
                .query_pairs_mut()
                .append_pair("limit", &self.page_limit.to_string());
        }

        Ok(parsed)
    }
}

fn resolve_link(current: &str, link: &str) -> Result<String> {
    let malformed = |e: url::ParseError| HazardMapError::MalformedPage {
        url: current.to_string(),
        reason: format!("invalid links.next '{}': {}", link, e),
    };

    let base = Url::parse(current).map_err(malformed)?;
    Ok(base.join(link).map_err(malformed)?.to_string())
}
