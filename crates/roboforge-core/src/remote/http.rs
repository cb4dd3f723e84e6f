//! HTTP fetch abstraction for testability.
//!
//! The repository protocol is plain GET requests for small text documents and
//! archive bodies; this seam lets tests script responses without a network.

use std::future::Future;

use url::Url;

use crate::error::Result;

/// Byte/text GET seam. Mock implementations stand in for the network in
/// tests; [`HttpClient`] is the real one.
pub trait HttpFetch: Send + Sync {
    fn get_text(&self, url: &Url) -> impl Future<Output = Result<String>> + Send;
    fn get_bytes(&self, url: &Url) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// reqwest-backed fetcher.
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    async fn get(&self, url: &Url) -> Result<reqwest::Response> {
        let response = self.client.get(url.clone()).send().await?;
        Ok(response.error_for_status()?)
    }
}

impl HttpFetch for HttpClient {
    async fn get_text(&self, url: &Url) -> Result<String> {
        Ok(self.get(url).await?.text().await?)
    }

    async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        Ok(self.get(url).await?.bytes().await?.to_vec())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::{Arc, Mutex};

    /// Scripted fetcher keyed by the final path segment of the request URL.
    /// Unrouted URLs panic: a miss is a test bug, not a network condition.
    pub struct MockFetch {
        routes: Vec<(String, std::result::Result<Vec<u8>, String>)>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl MockFetch {
        pub fn new() -> Self {
            Self {
                routes: Vec::new(),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Serve `body` for requests whose URL ends in `file_name`.
        pub fn route(mut self, file_name: &str, body: impl Into<Vec<u8>>) -> Self {
            self.routes.push((file_name.to_string(), Ok(body.into())));
            self
        }

        /// Fail requests whose URL ends in `file_name`.
        pub fn fail(mut self, file_name: &str, message: &str) -> Self {
            self.routes
                .push((file_name.to_string(), Err(message.to_string())));
            self
        }

        /// Handle onto the request log, usable after the mock moves into an
        /// updater or client.
        pub fn recorder(&self) -> Arc<Mutex<Vec<String>>> {
            Arc::clone(&self.calls)
        }

        fn lookup(&self, url: &Url) -> Result<Vec<u8>> {
            self.calls.lock().unwrap().push(url.to_string());
            let last = url
                .path_segments()
                .and_then(|mut s| s.next_back())
                .unwrap_or_default()
                .to_string();
            for (file_name, response) in &self.routes {
                if *file_name == last {
                    return response.clone().map_err(Error::Network);
                }
            }
            panic!("unexpected URL in test: {url}");
        }
    }

    impl HttpFetch for MockFetch {
        async fn get_text(&self, url: &Url) -> Result<String> {
            String::from_utf8(self.lookup(url)?).map_err(|e| Error::Parse {
                what: "response body",
                detail: e.to_string(),
            })
        }

        async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>> {
            self.lookup(url)
        }
    }
}
