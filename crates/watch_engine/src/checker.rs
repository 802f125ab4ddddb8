use thiserror::Error;
use watch_core::{delivery_order, new_items, Link, LinkExtractor};
use watch_logging::{watch_info, watch_warn};

use crate::fetch::Fetcher;
use crate::notify::{Delivery, Notifier, NotifyError};
use crate::store::{ListStore, StoreError};
use crate::FetchError;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to persist the link list: {0}")]
    Persist(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyFailure {
    pub link: Link,
    pub error: NotifyError,
}

/// Result of one completed check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Number of qualifying links on the page, now the stored list.
    pub candidates: usize,
    /// New links in delivery order (oldest first).
    pub new_items: Vec<Link>,
    pub delivered: Vec<Delivery>,
    pub failures: Vec<NotifyFailure>,
}

impl CycleReport {
    pub fn delivered_count(&self) -> usize {
        self.delivered.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// First failure caused by the notifier's configuration rather than a transient error.
    pub fn fatal_failure(&self) -> Option<&NotifyFailure> {
        self.failures.iter().find(|failure| failure.error.is_fatal())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The page could not be retrieved; nothing was stored or announced.
    Skipped { error: FetchError },
    Completed(CycleReport),
}

/// Polls one listing page and announces links that were not on it last time.
pub struct Checker<F> {
    fetcher: F,
    store: ListStore,
    source_url: String,
    extractor: LinkExtractor,
}

impl<F: Fetcher> Checker<F> {
    pub fn new(
        fetcher: F,
        store: ListStore,
        source_url: impl Into<String>,
        extractor: LinkExtractor,
    ) -> Self {
        Self {
            fetcher,
            store,
            source_url: source_url.into(),
            extractor,
        }
    }

    pub fn store(&self) -> &ListStore {
        &self.store
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Runs one cycle: fetch, extract, diff, announce oldest first, then store
    /// the page's full listing.
    ///
    /// The stored list mirrors what the page currently lists, so a link that
    /// drops off the page and comes back is announced again.
    pub async fn check(&mut self, notifier: &dyn Notifier) -> Result<CycleOutcome, CheckError> {
        let page = match self.fetcher.fetch(&self.source_url).await {
            Ok(page) => page,
            Err(error) => {
                watch_warn!("Skipping check of {}: {}", self.source_url, error);
                return Ok(CycleOutcome::Skipped { error });
            }
        };

        let candidates = self.extractor.extract(&page.document());
        let fresh = new_items(&candidates, self.store.current());
        watch_info!(
            "{} Site fetch, {} new item(s) online",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            fresh.len()
        );

        let mut report = CycleReport {
            candidates: candidates.len(),
            new_items: delivery_order(fresh),
            ..CycleReport::default()
        };

        for link in &report.new_items {
            match notifier.notify(link).await {
                Ok(delivery) => report.delivered.push(delivery),
                Err(error) => {
                    watch_warn!("Failed to announce {}: {}", link, error);
                    report.failures.push(NotifyFailure {
                        link: link.clone(),
                        error,
                    });
                }
            }
        }

        self.store.replace(candidates)?;
        Ok(CycleOutcome::Completed(report))
    }
}
