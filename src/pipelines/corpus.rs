//! Corpus acquisition pipeline
//!
//! # Processing
//! 1. With caching requested and a snapshot in the store, the snapshot is returned as is.
//! 1. Otherwise, search pages are walked to discover repository identifiers (see [crate::sources::github::discovery]).
//! 1. Duplicate identifiers are dropped, keeping the first occurrence.
//! 1. Repository pages are fetched and read on a thread pool. Records keep the discovery order.
//! 1. The snapshot is saved, replacing the previous one.
//!
//! Pages and records that can't be fetched are skipped, logged and listed in the [BuildReport].
//! A build that yields no record is aborted instead, and leaves the store untouched.
use itertools::Itertools;
use log::{error, info, warn};
use rayon::prelude::*;

use crate::config::Config;
use crate::download::PageFetcher;
use crate::error::Error;
use crate::filtering::StopWordPolicy;
use crate::io::{SnapshotStore, WriteGuard};
use crate::pipelines::normalize::Normalizer;
use crate::pipelines::pipeline::Pipeline;
use crate::record::{CorpusSnapshot, NormalizedRecord, RawRecord};
use crate::sources::github::{discovery, repository};

/// What happened during a build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub pages_requested: usize,
    pub failed_pages: Vec<usize>,
    pub discovered: usize,
    pub duplicates: usize,
    pub fetched: usize,
    pub failed_identifiers: Vec<String>,
}

impl BuildReport {
    /// log a summary
    fn log(&self) {
        info!(
            "pages: {}/{} ok, identifiers: {} ({} duplicates), records: {} fetched, {} failed",
            self.pages_requested - self.failed_pages.len(),
            self.pages_requested,
            self.discovered,
            self.duplicates,
            self.fetched,
            self.failed_identifiers.len()
        );
        for page in &self.failed_pages {
            warn!("failed page: {}", page);
        }
        for identifier in &self.failed_identifiers {
            warn!("failed record: {}", identifier);
        }
    }
}

/// Builds corpus snapshots, using a [PageFetcher] to reach pages and a [SnapshotStore] to keep snapshots.
pub struct CorpusBuilder<F, S> {
    config: Config,
    fetcher: F,
    store: S,
}

impl<F, S> CorpusBuilder<F, S>
where
    F: PageFetcher,
    S: SnapshotStore,
{
    pub fn new(config: Config, fetcher: F, store: S) -> Self {
        Self {
            config,
            fetcher,
            store,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn thread_pool(&self) -> Result<rayon::ThreadPool, Error> {
        Ok(rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers.max(1))
            .build()?)
    }

    /// Return the stored snapshot if `use_cache` is set and there is one, build and save a new one otherwise.
    ///
    /// The [BuildReport] is only there when a build happened.
    /// A stored snapshot that can't be read is an error: it is not rebuilt over.
    pub fn load_or_build(
        &self,
        use_cache: bool,
    ) -> Result<(CorpusSnapshot, Option<BuildReport>), Error> {
        if use_cache && self.store.exists() {
            info!("using cached snapshot");
            return Ok((self.store.load()?, None));
        }
        let (snapshot, report) = self.build()?;
        Ok((snapshot, Some(report)))
    }

    /// [Self::load_or_build], then normalize every record with the provided stopword policy.
    pub fn load_or_build_normalized(
        &self,
        use_cache: bool,
        policy: &StopWordPolicy,
    ) -> Result<Vec<NormalizedRecord>, Error> {
        let (snapshot, _) = self.load_or_build(use_cache)?;
        let normalizer = Normalizer::new(policy);
        let pool = self.thread_pool()?;
        Ok(pool.install(|| normalizer.normalize_corpus(snapshot.records())))
    }

    /// Discover identifiers, fetch their records and save the snapshot.
    ///
    /// The store is locked before anything is fetched.
    /// Unless no search page was requested, a build that yields no record is an [Error::EmptyBuild].
    pub fn build(&self) -> Result<(CorpusSnapshot, BuildReport), Error> {
        let guard = self.store.lock()?;
        let discovery = discovery::discover(&self.fetcher, &self.config, self.config.page_count)?;

        if discovery.pages_requested() > 0
            && discovery.failed_pages().len() == discovery.pages_requested()
        {
            error!("every search page failed, keeping the stored snapshot");
            return Err(Error::Custom(format!(
                "all {} search pages failed",
                discovery.pages_requested()
            )));
        }

        let mut report = BuildReport {
            pages_requested: discovery.pages_requested(),
            failed_pages: discovery.failed_pages().to_vec(),
            ..Default::default()
        };
        let allow_empty = self.config.page_count == 0;
        let snapshot =
            self.fetch_and_save(discovery.into_identifiers(), &mut report, &guard, allow_empty)?;
        Ok((snapshot, report))
    }

    /// Fetch records of the provided identifiers (instead of discovering them) and save the snapshot.
    ///
    /// A build that yields no record is an [Error::EmptyBuild].
    pub fn build_from_identifiers(
        &self,
        identifiers: Vec<String>,
    ) -> Result<(CorpusSnapshot, BuildReport), Error> {
        let guard = self.store.lock()?;
        let mut report = BuildReport::default();
        let snapshot = self.fetch_and_save(identifiers, &mut report, &guard, false)?;
        Ok((snapshot, report))
    }

    fn fetch_and_save(
        &self,
        identifiers: Vec<String>,
        report: &mut BuildReport,
        guard: &WriteGuard<'_>,
        allow_empty: bool,
    ) -> Result<CorpusSnapshot, Error> {
        report.discovered = identifiers.len();
        let identifiers: Vec<String> = identifiers
            .into_iter()
            .map(|identifier| identifier.trim().to_string())
            .filter(|identifier| !identifier.is_empty())
            .unique()
            .collect();
        report.duplicates = report.discovered - identifiers.len();

        let (records, failed) = self.fetch_all(&identifiers)?;
        report.fetched = records.len();
        report.failed_identifiers = failed;
        report.log();

        if records.is_empty() && !allow_empty {
            error!(
                "no record fetched ({} failed), keeping the stored snapshot",
                report.failed_identifiers.len()
            );
            return Err(Error::EmptyBuild);
        }

        let snapshot = CorpusSnapshot::new(records);
        self.store.write(&snapshot, guard)?;
        Ok(snapshot)
    }

    /// Fetch records in parallel.
    ///
    /// Returns the records in `identifiers` order, along with the identifiers that failed.
    fn fetch_all(&self, identifiers: &[String]) -> Result<(Vec<RawRecord>, Vec<String>), Error> {
        let nb_identifiers = identifiers.len();
        let pool = self.thread_pool()?;

        let results: Vec<Result<RawRecord, Error>> = pool.install(|| {
            identifiers
                .par_iter()
                .enumerate()
                .map(|(idx, identifier)| {
                    info!("fetching {}/{}: {}", idx + 1, nb_identifiers, identifier);
                    repository::fetch(&self.fetcher, &self.config, identifier)
                })
                .collect()
        });

        let mut records = Vec::with_capacity(results.len());
        let mut failed = Vec::new();
        for (identifier, result) in identifiers.iter().zip(results) {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("skipping {}: {}", identifier, e);
                    failed.push(identifier.clone());
                }
            }
        }
        Ok((records, failed))
    }
}

impl<F, S> Pipeline<CorpusSnapshot> for CorpusBuilder<F, S>
where
    F: PageFetcher,
    S: SnapshotStore,
{
    /// [CorpusBuilder::load_or_build], following [Config::use_cache].
    fn run(&self) -> Result<CorpusSnapshot, Error> {
        let (snapshot, _) = self.load_or_build(self.config.use_cache)?;
        Ok(snapshot)
    }
}
