use anyhow::{Context, Result};
use bazar_scout::catalog;
use bazar_scout::export::{self, RunDir, RunSummary};
use bazar_scout::firebase::{self, rules, FirestoreClient};
use bazar_scout::generator::Generator;
use bazar_scout::models::Business;
use bazar_scout::runner::{self, WorkerConfig};
use bazar_scout::scrapers::{BusinessScraper, PlacesApiScraper};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bazar-scout", about = "Ujjain business data collector for Bazar Se")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape Google Maps listings with headless Chrome
    Scrape {
        /// Single search query instead of the full Ujjain set
        #[arg(short, long)]
        search: Option<String>,
        /// Max results per query
        #[arg(short, long, default_value_t = 25)]
        total: usize,
        /// Run the full Ujjain query set
        #[arg(long)]
        ujjain: bool,
        /// Cap the number of queries (useful for test runs)
        #[arg(long)]
        limit: Option<usize>,
        /// Number of parallel workers
        #[arg(long, default_value_t = 4)]
        workers: usize,
        /// Per-query timeout in seconds
        #[arg(long, default_value_t = 300)]
        timeout_secs: u64,
        /// Show the browser window
        #[arg(long)]
        headed: bool,
        /// Push results to Firestore after the run
        #[arg(long)]
        firebase: bool,
        #[arg(long, default_value = firebase::DEFAULT_PROJECT_ID)]
        project_id: String,
        #[arg(long, default_value = "Ujjain_Business_Data")]
        out: PathBuf,
    },
    /// Query the official Places Text Search API
    Places {
        /// Single search query instead of the full Ujjain set
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long, default_value_t = 25)]
        total: usize,
        /// Cap the number of queries
        #[arg(long)]
        limit: Option<usize>,
        /// API key; falls back to GOOGLE_PLACES_API_KEY
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        firebase: bool,
        #[arg(long, default_value = firebase::DEFAULT_PROJECT_ID)]
        project_id: String,
        #[arg(long, default_value = "Ujjain_Business_Data")]
        out: PathBuf,
    },
    /// Generate a synthetic placeholder dataset
    Generate {
        #[arg(long, default_value = "Ujjain_Generated_Data")]
        out: PathBuf,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        firebase: bool,
        #[arg(long, default_value = firebase::DEFAULT_PROJECT_ID)]
        project_id: String,
    },
    /// Push an existing JSON dataset into Firestore
    Populate {
        /// JSON file of business records
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = firebase::DEFAULT_PROJECT_ID)]
        project_id: String,
        #[arg(long, default_value = firebase::DEFAULT_COLLECTION)]
        collection: String,
        /// Also push the category taxonomy
        #[arg(long)]
        categories: bool,
    },
    /// Write and deploy the Firebase security rules
    Rules {
        #[arg(long, default_value = firebase::DEFAULT_PROJECT_ID)]
        project_id: String,
        #[arg(long, default_value = "firebase_rules")]
        dir: PathBuf,
        /// Keep re-deploying on a fixed interval
        #[arg(long)]
        watch: bool,
        #[arg(long, default_value_t = 300)]
        interval_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scrape {
            search,
            total,
            ujjain,
            limit,
            workers,
            timeout_secs,
            headed,
            firebase,
            project_id,
            out,
        } => {
            let queries = query_list(search, ujjain, limit)?;
            let run_dir = RunDir::dated(&out)?;
            info!("Saving results under {}", run_dir.path().display());

            let config = WorkerConfig {
                workers,
                businesses_per_query: total,
                query_timeout: Duration::from_secs(timeout_secs),
                headless: !headed,
                ..WorkerConfig::default()
            };

            let report = runner::run_workers(queries, config, run_dir.clone()).await?;

            let summary = RunSummary::from_businesses(&report.businesses, "google_maps_scraper");
            summary.save(&run_dir.file("run_summary.json"))?;

            if firebase {
                push_to_firestore(&project_id, firebase::DEFAULT_COLLECTION, &report.businesses)
                    .await?;
            }
        }
        Command::Places {
            search,
            total,
            limit,
            api_key,
            firebase,
            project_id,
            out,
        } => {
            let api_key = api_key
                .or_else(|| std::env::var("GOOGLE_PLACES_API_KEY").ok())
                .context("No API key; pass --api-key or set GOOGLE_PLACES_API_KEY")?;

            let queries = query_list(search, true, limit)?;
            let run_dir = RunDir::dated(&out)?;
            let scraper = PlacesApiScraper::new(api_key)?;

            let mut all = Vec::new();
            for query in &queries {
                match scraper.scrape(query, total).await {
                    Ok(businesses) => {
                        if !businesses.is_empty() {
                            let slug = export::slugify_query(query);
                            export::save_json(
                                &businesses,
                                &run_dir.file(&format!("{}.json", slug)),
                            )?;
                            export::save_csv(
                                &businesses,
                                &run_dir.file(&format!("{}.csv", slug)),
                            )?;
                        }
                        all.extend(businesses);
                    }
                    Err(e) => {
                        tracing::warn!("Query '{}' failed: {:#}", query, e);
                    }
                }
            }

            let summary = RunSummary::from_businesses(&all, "places_api");
            summary.save(&run_dir.file("run_summary.json"))?;

            if firebase {
                push_to_firestore(&project_id, firebase::DEFAULT_COLLECTION, &all).await?;
            }
        }
        Command::Generate {
            out,
            seed,
            firebase,
            project_id,
        } => {
            let mut generator = match seed {
                Some(seed) => Generator::with_seed(seed),
                None => Generator::new(),
            };
            let businesses = generator.generate_dataset();

            let run_dir = RunDir::stamped(&out)?;
            save_category_buckets(&run_dir, &businesses)?;
            export::save_json(&businesses, &run_dir.file("complete_ujjain_businesses.json"))?;

            let summary = RunSummary::from_businesses(&businesses, "generator");
            summary.save(&run_dir.file("dataset_summary.json"))?;

            if firebase {
                push_to_firestore(&project_id, firebase::DEFAULT_COLLECTION, &businesses).await?;
            }
        }
        Command::Populate {
            input,
            project_id,
            collection,
            categories,
        } => {
            let content = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let businesses: Vec<Business> =
                serde_json::from_str(&content).context("Input is not a business JSON array")?;
            info!("Loaded {} businesses from {}", businesses.len(), input.display());

            let client = FirestoreClient::new(&project_id)?;
            if categories {
                client.push_categories("categories").await;
            }
            client.push_all(&collection, &businesses).await;
        }
        Command::Rules {
            project_id,
            dir,
            watch,
            interval_secs,
        } => {
            if watch {
                rules::watch(&project_id, &dir, Duration::from_secs(interval_secs)).await?;
            } else {
                rules::check_cli().await?;
                rules::write_rules_files(&dir).await?;
                rules::deploy(&project_id, &dir).await?;
            }
        }
    }

    Ok(())
}

/// Build the query list from the CLI flags
fn query_list(search: Option<String>, ujjain: bool, limit: Option<usize>) -> Result<Vec<String>> {
    let mut queries = if let Some(search) = search {
        vec![search]
    } else if ujjain {
        catalog::build_queries()
    } else {
        anyhow::bail!("No queries; pass --search or --ujjain");
    };

    if let Some(limit) = limit {
        queries.truncate(limit);
    }

    info!("Using {} search queries", queries.len());
    Ok(queries)
}

/// Group businesses by primary category and write one bucket per category
fn save_category_buckets(run_dir: &RunDir, businesses: &[Business]) -> Result<()> {
    use std::collections::BTreeMap;

    let mut buckets: BTreeMap<String, Vec<Business>> = BTreeMap::new();
    for b in businesses {
        let key = b
            .primary_category
            .clone()
            .unwrap_or_else(|| catalog::DEFAULT_CATEGORY.to_string());
        buckets.entry(key).or_default().push(b.clone());
    }

    for (category, bucket) in &buckets {
        let slug = export::slugify_query(category);
        export::save_json(bucket, &run_dir.file(&format!("{}.json", slug)))?;
    }
    Ok(())
}

async fn push_to_firestore(
    project_id: &str,
    collection: &str,
    businesses: &[Business],
) -> Result<()> {
    let client = FirestoreClient::new(project_id)?;
    let written = client.push_all(collection, businesses).await;
    info!("Firestore push complete: {} documents", written);
    Ok(())
}
