//! Worker fan-out: independent tasks each grinding through a query chunk.
//!
//! Workers share nothing during the run; each one launches its own browser
//! per query and writes its own output buckets. A query that errors or times
//! out counts as zero and the worker moves on.

use crate::export::{self, RunDir};
use crate::models::Business;
use crate::scrapers::MapsBrowserScraper;
use anyhow::Result;
use std::time::Duration;
use tokio::task;
use tokio::time::timeout;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub workers: usize,
    pub businesses_per_query: usize,
    pub query_timeout: Duration,
    pub delay_between_queries: Duration,
    pub headless: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            businesses_per_query: 25,
            query_timeout: Duration::from_secs(300),
            delay_between_queries: Duration::from_millis(100),
            headless: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub queries_completed: usize,
    pub queries_failed: usize,
    pub businesses: Vec<Business>,
}

/// Split queries into contiguous chunks, one per worker; the last worker
/// absorbs the remainder.
pub fn split_queries(queries: &[String], workers: usize) -> Vec<Vec<String>> {
    let workers = workers.clamp(1, queries.len().max(1));
    let chunk_size = queries.len() / workers;

    let mut chunks = Vec::with_capacity(workers);
    for i in 0..workers {
        let start = i * chunk_size;
        let end = if i == workers - 1 {
            queries.len()
        } else {
            (i + 1) * chunk_size
        };
        chunks.push(queries[start..end].to_vec());
    }
    chunks
}

/// Run the scrape across `config.workers` independent tasks
pub async fn run_workers(
    queries: Vec<String>,
    config: WorkerConfig,
    run_dir: RunDir,
) -> Result<RunReport> {
    let chunks = split_queries(&queries, config.workers);
    info!(
        "Dispatching {} queries across {} workers",
        queries.len(),
        chunks.len()
    );

    let mut handles = Vec::with_capacity(chunks.len());
    for (worker_id, chunk) in chunks.into_iter().enumerate() {
        let config = config.clone();
        let run_dir = run_dir.clone();
        handles.push(tokio::spawn(async move {
            run_worker(worker_id, chunk, config, run_dir).await
        }));
    }

    let mut report = RunReport::default();
    for handle in handles {
        match handle.await {
            Ok(worker_report) => {
                report.queries_completed += worker_report.queries_completed;
                report.queries_failed += worker_report.queries_failed;
                report.businesses.extend(worker_report.businesses);
            }
            Err(e) => warn!("Worker panicked: {}", e),
        }
    }

    info!(
        "Run finished: {} queries ok, {} failed, {} businesses",
        report.queries_completed,
        report.queries_failed,
        report.businesses.len()
    );
    Ok(report)
}

async fn run_worker(
    worker_id: usize,
    queries: Vec<String>,
    config: WorkerConfig,
    run_dir: RunDir,
) -> RunReport {
    info!("Worker {} starting with {} queries", worker_id, queries.len());
    let mut report = RunReport::default();

    for (i, query) in queries.iter().enumerate() {
        info!(
            "Worker {}: {}/{} - {}",
            worker_id,
            i + 1,
            queries.len(),
            query
        );

        let owned_query = query.clone();
        let limit = config.businesses_per_query;
        let headless = config.headless;

        // Each query gets a fresh browser in a blocking task; on timeout the
        // task keeps running but its result is dropped.
        let scrape = task::spawn_blocking(move || -> Result<Vec<Business>> {
            let scraper = MapsBrowserScraper::new(headless)?;
            scraper.scrape_query(&owned_query, limit)
        });

        match timeout(config.query_timeout, scrape).await {
            Ok(Ok(Ok(businesses))) => {
                if let Err(e) = save_query_buckets(&run_dir, query, &businesses) {
                    warn!("Worker {}: failed to save '{}': {:#}", worker_id, query, e);
                }
                report.queries_completed += 1;
                report.businesses.extend(businesses);
            }
            Ok(Ok(Err(e))) => {
                warn!("Worker {}: '{}' failed: {:#}", worker_id, query, e);
                report.queries_failed += 1;
            }
            Ok(Err(join_error)) => {
                warn!("Worker {}: scrape task died: {}", worker_id, join_error);
                report.queries_failed += 1;
            }
            Err(_) => {
                warn!(
                    "Worker {}: '{}' timed out after {:?}",
                    worker_id, query, config.query_timeout
                );
                report.queries_failed += 1;
            }
        }

        tokio::time::sleep(config.delay_between_queries).await;
    }

    info!(
        "Worker {} done: {} ok, {} failed",
        worker_id, report.queries_completed, report.queries_failed
    );
    report
}

fn save_query_buckets(run_dir: &RunDir, query: &str, businesses: &[Business]) -> Result<()> {
    if businesses.is_empty() {
        return Ok(());
    }
    let slug = export::slugify_query(query);
    export::save_json(businesses, &run_dir.file(&format!("{}.json", slug)))?;
    export::save_csv(businesses, &run_dir.file(&format!("{}.csv", slug)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queries(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("query {}", i)).collect()
    }

    #[test]
    fn chunks_cover_every_query_once() {
        let all = queries(10);
        let chunks = split_queries(&all, 3);
        assert_eq!(chunks.len(), 3);
        let flattened: Vec<String> = chunks.into_iter().flatten().collect();
        assert_eq!(flattened, all);
    }

    #[test]
    fn last_worker_absorbs_remainder() {
        let chunks = split_queries(&queries(10), 3);
        assert_eq!(chunks[0].len(), 3);
        assert_eq!(chunks[1].len(), 3);
        assert_eq!(chunks[2].len(), 4);
    }

    #[test]
    fn more_workers_than_queries_is_clamped() {
        let chunks = split_queries(&queries(2), 8);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn empty_query_list_yields_one_empty_chunk() {
        let chunks = split_queries(&[], 4);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_empty());
    }
}
