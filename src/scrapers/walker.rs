//! Listing traversal and detail fan-out.
//!
//! The walker owns a queue of page tasks and a visited set. Tasks run on a
//! `JoinSet` bounded by a semaphore; finished listing pages feed new tasks
//! back into the set and finished profile pages go to the record sink.

use crate::error::CrawlError;
use crate::models::{AthleteRecord, PartialAthlete};
use crate::scrapers::traits::PageFetcher;
use crate::scrapers::ufc::{extract_athlete, parse_listing, ListingPage};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};
use url::Url;

/// Counters for one walk
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSummary {
    pub listing_pages: usize,
    pub detail_pages: usize,
    pub emitted: usize,
    /// Cards dropped because the athlete has no official bouts
    pub excluded: usize,
    /// Profiles of athletes who are no longer fighting
    pub inactive: usize,
    pub failed: usize,
}

enum Task {
    Listing { url: Url },
    Detail { url: Url, athlete: PartialAthlete },
}

enum Outcome {
    Listing {
        url: Url,
        result: Result<ListingPage, CrawlError>,
    },
    Detail {
        url: Url,
        result: Result<Option<AthleteRecord>, CrawlError>,
    },
}

pub struct PaginationWalker<F> {
    fetcher: Arc<F>,
    workers: Arc<Semaphore>,
    site_root: Url,
}

impl<F: PageFetcher + 'static> PaginationWalker<F> {
    pub fn new(fetcher: F, site_root: Url, workers: usize) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            workers: Arc::new(Semaphore::new(workers.max(1))),
            site_root,
        }
    }

    /// Walk the listing chain starting at `listing_root`, sending every
    /// extracted record to `sink`.
    ///
    /// Only a failure on the root listing page aborts the walk. Every other
    /// page failure is logged and counted.
    pub async fn walk(
        &self,
        listing_root: Url,
        sink: mpsc::Sender<AthleteRecord>,
    ) -> Result<CrawlSummary, CrawlError> {
        info!(
            root = %listing_root,
            fetcher = self.fetcher.fetcher_name(),
            "Starting athlete walk"
        );

        let mut summary = CrawlSummary::default();
        let mut visited: HashSet<Url> = HashSet::new();
        let mut tasks = JoinSet::new();

        visited.insert(listing_root.clone());
        self.spawn(&mut tasks, &listing_root, Task::Listing { url: listing_root.clone() });

        while let Some(joined) = tasks.join_next().await {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Page task aborted: {}", e);
                    summary.failed += 1;
                    continue;
                }
            };

            match outcome {
                Outcome::Listing { url, result: Ok(page) } => {
                    summary.listing_pages += 1;
                    summary.excluded += page.excluded;
                    info!(
                        page = %url,
                        athletes = page.entries.len(),
                        excluded = page.excluded,
                        "Listing page done"
                    );

                    for entry in page.entries {
                        if visited.insert(entry.detail_url.clone()) {
                            let task = Task::Detail {
                                url: entry.detail_url,
                                athlete: entry.athlete,
                            };
                            self.spawn(&mut tasks, &listing_root, task);
                        } else {
                            debug!(url = %entry.detail_url, "Profile already scheduled");
                        }
                    }

                    match page.next_page {
                        Some(next) if visited.insert(next.clone()) => {
                            debug!(next = %next, "Queueing next listing page");
                            self.spawn(&mut tasks, &listing_root, Task::Listing { url: next });
                        }
                        Some(next) => warn!(next = %next, "Next page was already visited, ending pagination"),
                        None => info!(last = %url, "No next page, pagination finished"),
                    }
                }
                Outcome::Listing { url, result: Err(e) } => {
                    if url == listing_root {
                        error!("Root listing page failed: {}", e);
                        tasks.abort_all();
                        return Err(e);
                    }
                    warn!("Listing page failed, pagination stops here: {}", e);
                    summary.failed += 1;
                }
                Outcome::Detail { url, result } => {
                    summary.detail_pages += 1;
                    match result {
                        Ok(Some(record)) => {
                            if sink.send(record).await.is_err() {
                                warn!("Record sink closed, stopping walk");
                                tasks.abort_all();
                                return Err(CrawlError::SinkClosed);
                            }
                            summary.emitted += 1;
                        }
                        Ok(None) => summary.inactive += 1,
                        Err(e) => {
                            warn!(url = %url, "Skipping athlete: {}", e);
                            summary.failed += 1;
                        }
                    }
                }
            }
        }

        info!(
            listing_pages = summary.listing_pages,
            detail_pages = summary.detail_pages,
            emitted = summary.emitted,
            excluded = summary.excluded,
            inactive = summary.inactive,
            failed = summary.failed,
            "Walk finished"
        );

        Ok(summary)
    }

    fn spawn(&self, tasks: &mut JoinSet<Outcome>, listing_root: &Url, task: Task) {
        let fetcher = Arc::clone(&self.fetcher);
        let workers = Arc::clone(&self.workers);
        let listing_root = listing_root.clone();
        let site_root = self.site_root.clone();

        tasks.spawn(async move {
            // The semaphore is never closed
            let _permit = workers.acquire_owned().await.ok();
            run(fetcher.as_ref(), task, &listing_root, &site_root).await
        });
    }
}

async fn run<F: PageFetcher + ?Sized>(
    fetcher: &F,
    task: Task,
    listing_root: &Url,
    site_root: &Url,
) -> Outcome {
    match task {
        Task::Listing { url } => {
            let result = match fetcher.fetch(&url).await {
                Ok(page) => Ok(parse_listing(&page.html, listing_root, site_root)),
                Err(e) => Err(CrawlError::Fetch {
                    url: url.clone(),
                    source: e.into(),
                }),
            };
            Outcome::Listing { url, result }
        }
        Task::Detail { url, athlete } => {
            let result = match fetcher.fetch(&url).await {
                Ok(page) => extract_athlete(&page.html, athlete, url.clone()).map_err(|source| {
                    CrawlError::Extract {
                        url: url.clone(),
                        source,
                    }
                }),
                Err(e) => Err(CrawlError::Fetch {
                    url: url.clone(),
                    source: e.into(),
                }),
            };
            Outcome::Detail { url, result }
        }
    }
}
