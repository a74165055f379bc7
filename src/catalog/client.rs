use super::types::{BookPage, CatalogError, PageQuery};
use futures::StreamExt;
use reqwest::redirect::Policy;
use std::time::Duration;
use url::Url;

/// Catalog endpoint used when neither the config file nor the CLI names one.
pub const DEFAULT_BASE_URL: &str = "http://skunkworks.ignitesol.com:8000/books/";

/// The catalog is only ever asked for books that have a cover image.
const MIME_TYPE_FILTER: &str = "image/";

/// Create a redirect policy that follows at most 3 hops and stops on loops.
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        if attempt.previous().iter().any(|prev| prev.as_str() == url.as_str()) {
            return attempt.error("Redirect loop detected");
        }

        tracing::debug!(
            to = %url,
            hop = attempt.previous().len() + 1,
            "Following catalog redirect"
        );
        attempt.follow()
    })
}

/// HTTP client for the book catalog endpoint.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted, so
/// each background fetch task gets its own handle.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    max_response_bytes: usize,
}

impl CatalogClient {
    /// Build a client for `base_url`.
    ///
    /// Fails if the URL does not parse or the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        max_response_bytes: usize,
    ) -> Result<Self, CatalogError> {
        let base_url = Url::parse(base_url)?;
        let http = reqwest::Client::builder()
            .redirect(create_redirect_policy())
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url,
            timeout,
            max_response_bytes,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full request URL for one page.
    ///
    /// `topic` and `search` are always sent, empty when unset, which the
    /// catalog treats as "no filter".
    pub fn page_url(&self, query: &PageQuery) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("mime_type", MIME_TYPE_FILTER)
            .append_pair("page", &query.page.to_string())
            .append_pair("topic", &query.topic)
            .append_pair("search", &query.search);
        url
    }

    /// Fetch and decode one page of results.
    ///
    /// No retries: a failed page is reported once and left to the caller.
    pub async fn fetch_page(&self, query: &PageQuery) -> Result<BookPage, CatalogError> {
        let url = self.page_url(query);
        tracing::debug!(url = %url, page = query.page, "Requesting catalog page");

        let response = tokio::time::timeout(self.timeout, self.http.get(url).send())
            .await
            .map_err(|_| CatalogError::Timeout(self.timeout.as_secs()))??;

        if !response.status().is_success() {
            return Err(CatalogError::HttpStatus(response.status().as_u16()));
        }

        let body = tokio::time::timeout(
            self.timeout,
            read_limited_bytes(response, self.max_response_bytes),
        )
        .await
        .map_err(|_| CatalogError::Timeout(self.timeout.as_secs()))??;

        let page: BookPage = serde_json::from_slice(&body)?;
        tracing::debug!(
            page = query.page,
            count = page.count,
            received = page.results.len(),
            "Catalog page decoded"
        );
        Ok(page)
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, CatalogError> {
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(CatalogError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(CatalogError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
