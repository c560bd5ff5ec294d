use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

/// A page as the fetcher saw it after any client-side rendering
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub url: Url,
    pub html: String,
}

/// Common trait for everything that can turn a URL into a rendered page.
/// The walker only talks to this, so fixtures can stand in for a browser.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch and render a single page
    async fn fetch(&self, url: &Url) -> Result<RenderedPage>;

    /// Get the name of the fetcher backend
    fn fetcher_name(&self) -> &'static str;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch(&self, url: &Url) -> Result<RenderedPage> {
        (**self).fetch(url).await
    }

    fn fetcher_name(&self) -> &'static str {
        (**self).fetcher_name()
    }
}
