//! Image search port definition.

use async_trait::async_trait;

use crate::domain::entities::{PageResult, SearchQuery};
use crate::domain::errors::FetchError;

/// Port for fetching one page of image search results.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageSearchPort: Send + Sync {
    /// Fetches a 1-based page for the query.
    async fn fetch_page(&self, query: &SearchQuery, page: u32) -> Result<PageResult, FetchError>;

    /// Page size the adapter requests from the remote side.
    fn page_size(&self) -> u32;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::domain::entities::ImageRecord;

    /// Replays queued responses in order and records every request.
    pub struct ScriptedSearchPort {
        responses: Mutex<VecDeque<Result<PageResult, FetchError>>>,
        requests: Mutex<Vec<(String, u32)>>,
        page_size: u32,
    }

    impl ScriptedSearchPort {
        /// Creates port with the given page size and no responses.
        pub fn new(page_size: u32) -> Self {
            Self {
                responses: Mutex::new(VecDeque::new()),
                requests: Mutex::new(Vec::new()),
                page_size,
            }
        }

        /// Queues a successful page of `count` records numbered from `first_id`.
        #[must_use]
        pub fn with_page(self, first_id: u64, count: u64, total: u64) -> Self {
            self.push(Ok(PageResult::new(records(first_id, count), total)));
            self
        }

        /// Queues a failure.
        #[must_use]
        pub fn with_error(self, error: FetchError) -> Self {
            self.push(Err(error));
            self
        }

        pub fn push(&self, response: Result<PageResult, FetchError>) {
            self.responses.lock().unwrap().push_back(response);
        }

        /// Returns `(query, page)` for every request made so far.
        pub fn requests(&self) -> Vec<(String, u32)> {
            self.requests.lock().unwrap().clone()
        }
    }

    pub fn records(first_id: u64, count: u64) -> Vec<ImageRecord> {
        (first_id..first_id + count)
            .map(|i| {
                ImageRecord::new(
                    i,
                    format!("https://cdn.test/{i}_640.jpg"),
                    format!("https://cdn.test/{i}_1280.jpg"),
                    "test",
                )
            })
            .collect()
    }

    #[async_trait]
    impl ImageSearchPort for ScriptedSearchPort {
        async fn fetch_page(
            &self,
            query: &SearchQuery,
            page: u32,
        ) -> Result<PageResult, FetchError> {
            self.requests
                .lock()
                .unwrap()
                .push((query.as_str().to_string(), page));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::network("no scripted response")))
        }

        fn page_size(&self) -> u32 {
            self.page_size
        }
    }
}
