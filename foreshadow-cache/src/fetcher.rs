//! Fetcher layer abstraction.
//!
//! Defines the trait the cache's owner uses to actually retrieve skeleton
//! markup, so the engine can work with any backend and tests can substitute
//! a deterministic fake for the network.

use crate::error::{FetchError, FetchResult};
use async_trait::async_trait;
use tracing::info;
use url::Url;

/// Retrieves skeleton markup for a resolved URL.
///
/// Fetching is the only suspension point in the whole subsystem; every
/// other operation completes synchronously on the caller's turn.
#[async_trait]
pub trait SkeletonFetcher: Send + Sync {
    /// Fetches the skeleton fragment for `url`.
    async fn fetch(&self, url: &str) -> FetchResult<String>;
}

/// HTTP-backed fetcher.
///
/// Cache keys are path+query relative to the page, so they are joined
/// against the configured base (the document origin) before the request
/// goes out.
pub struct HttpFetcher {
    client: reqwest::Client,
    base: Url,
}

impl HttpFetcher {
    /// Creates a fetcher resolving against the given base URL.
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }

    /// Creates a fetcher with a preconfigured client.
    #[must_use]
    pub fn with_client(base: Url, client: reqwest::Client) -> Self {
        Self { client, base }
    }
}

#[async_trait]
impl SkeletonFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        let resolved = self.base.join(url)?;
        info!(%resolved, "fetching skeleton");
        let response = self.client.get(resolved).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

/// A mock fetcher for testing.
pub mod mock {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    enum Script {
        Ready(FetchResult<String>),
        Gated(oneshot::Receiver<FetchResult<String>>),
    }

    /// A fetcher that serves scripted responses.
    ///
    /// Responses are queued per URL and consumed in order. A gated
    /// response suspends the fetch until the test releases it, which is
    /// how interleavings of "fetch resolves first" vs. "request resolves
    /// first" are driven deterministically.
    #[derive(Default)]
    pub struct MockFetcher {
        scripts: Mutex<HashMap<String, VecDeque<Script>>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockFetcher {
        /// Creates a mock with no scripted responses.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues a successful response for a URL.
        pub fn respond(&self, url: impl Into<String>, html: impl Into<String>) {
            self.push(url.into(), Script::Ready(Ok(html.into())));
        }

        /// Queues a failed response for a URL.
        pub fn fail(&self, url: impl Into<String>, status: u16) {
            self.push(url.into(), Script::Ready(Err(FetchError::Status { status })));
        }

        /// Queues a gated response; the fetch suspends until the returned
        /// sender is used (or dropped, which fails the fetch).
        pub fn gate(&self, url: impl Into<String>) -> oneshot::Sender<FetchResult<String>> {
            let (tx, rx) = oneshot::channel();
            self.push(url.into(), Script::Gated(rx));
            tx
        }

        /// Every URL fetched so far, in call order.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        /// How many times a URL has been fetched.
        pub fn call_count(&self, url: &str) -> usize {
            self.calls.lock().unwrap().iter().filter(|u| *u == url).count()
        }

        fn push(&self, url: String, script: Script) {
            self.scripts
                .lock()
                .unwrap()
                .entry(url)
                .or_default()
                .push_back(script);
        }
    }

    #[async_trait]
    impl SkeletonFetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> FetchResult<String> {
            self.calls.lock().unwrap().push(url.to_string());
            let script = self
                .scripts
                .lock()
                .unwrap()
                .get_mut(url)
                .and_then(VecDeque::pop_front);
            match script {
                Some(Script::Ready(result)) => result,
                Some(Script::Gated(rx)) => rx
                    .await
                    .unwrap_or(Err(FetchError::Status { status: 499 })),
                None => Err(FetchError::Status { status: 404 }),
            }
        }
    }
}
