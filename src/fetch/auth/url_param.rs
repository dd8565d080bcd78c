use crate::fetch::client::HttpClient;
use async_trait::async_trait;

/// An [`HttpClient`] wrapper that appends an API key as a URL query parameter.
///
/// JCDecaux expects its key as `apiKey=<key>` on every station request, so
/// the bike client wraps its transport in one of these.
pub struct UrlParam<C> {
    pub inner: C,
    pub param_name: String,
    pub key: String,
}

impl<C> UrlParam<C> {
    pub fn new(inner: C, param_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            inner,
            param_name: param_name.into(),
            key: key.into(),
        }
    }

    /// Returns `url` with the key parameter appended, as it will be sent.
    pub fn apply(&self, url: &mut reqwest::Url) {
        url.query_pairs_mut()
            .append_pair(&self.param_name, &self.key);
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for UrlParam<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.apply(req.url_mut());
        self.inner.execute(req).await
    }
}
