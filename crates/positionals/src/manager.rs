//! The synchronized positional table.
//!
//! [`PositionalManager`] owns one [`PositionalIndex`] and keeps it in step with
//! the remote sheet:
//!
//! - **sync**: fetch the sheet and replace the local cache file if the content changed
//! - **load**: parse the cache file into a fresh index and publish it
//! - **refresh**: sync then load; runs once on construction and again on [`reset`]
//!
//! None of these return errors. Failures go to the [`DiagnosticSink`] and the
//! manager keeps serving whatever index it already has.
//!
//! ## Example
//!
//! ```ignore
//! use positionals::{ManagerConfig, PositionalManager};
//!
//! let config = ManagerConfig::builder()
//!     .cache_dir(plugin_dir)
//!     .build();
//! let manager = PositionalManager::new(config);
//!
//! if manager.is_positional(3563) && manager.is_positional_hit(3563, 100) {
//!     // ...
//! }
//! ```
//!
//! [`reset`]: PositionalManager::reset

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::{debug, info};

use crate::cache::CacheFile;
use crate::config::ManagerConfig;
#[cfg(feature = "http")]
use crate::diagnostics::TracingSink;
use crate::diagnostics::{DiagnosticSink, Severity};
use crate::error::{Error, Result};
#[cfg(feature = "http")]
use crate::fetch::HttpSource;
use crate::fetch::SheetSource;
use crate::index::PositionalIndex;
use crate::model::{PositionalAction, PositionalParameters};
use crate::parser::parse_table;

/// Result of the fetch step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The cache file was written with new content
    Updated,
    /// The remote content matched the cache; nothing was written
    Unchanged,
    /// Fetch or write failed; the cache file was left as it was
    Failed,
}

/// Result of the load step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A new index was published
    Loaded { actions: usize, rows: usize },
    /// Loading failed; the previous index is still being served
    Kept,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshReport {
    pub sync: SyncOutcome,
    pub load: LoadOutcome,
}

pub struct PositionalManager {
    config: ManagerConfig,
    cache: CacheFile,
    source: Box<dyn SheetSource>,
    sink: Arc<dyn DiagnosticSink>,
    /// Current generation; replaced whole, never mutated
    index: RwLock<Arc<PositionalIndex>>,
    /// Serializes refreshes
    refresh_gate: Mutex<()>,
}

impl PositionalManager {
    /// Create a manager that fetches over HTTP and logs through `tracing`.
    ///
    /// Blocks for one refresh before returning.
    #[cfg(feature = "http")]
    pub fn new(config: ManagerConfig) -> Self {
        let source = HttpSource::new(config.source_url.clone(), config.timeout);
        Self::with_parts(config, source, Arc::new(TracingSink))
    }

    /// Create a manager from explicit collaborators.
    ///
    /// Blocks for one refresh before returning.
    pub fn with_parts<S>(config: ManagerConfig, source: S, sink: Arc<dyn DiagnosticSink>) -> Self
    where
        S: SheetSource + 'static,
    {
        let manager = Self::unloaded(config, source, sink);
        manager.refresh();
        manager
    }

    /// Like [`with_parts`](Self::with_parts) but without the initial refresh
    pub fn unloaded<S>(config: ManagerConfig, source: S, sink: Arc<dyn DiagnosticSink>) -> Self
    where
        S: SheetSource + 'static,
    {
        let cache = CacheFile::new(config.cache_path.clone());
        Self {
            config,
            cache,
            source: Box::new(source),
            sink,
            index: RwLock::new(Arc::new(PositionalIndex::new())),
            refresh_gate: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn cache(&self) -> &CacheFile {
        &self.cache
    }

    /// Re-run the refresh on demand
    pub fn reset(&self) -> RefreshReport {
        self.refresh()
    }

    /// Fetch, then load. Concurrent calls run one after another.
    pub fn refresh(&self) -> RefreshReport {
        let _guard = self
            .refresh_gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let sync = self.sync_locked();
        let load = self.load_locked();
        debug!("Refresh finished: {:?} / {:?}", sync, load);
        RefreshReport { sync, load }
    }

    /// Pull the remote table into the cache file
    pub fn sync(&self) -> SyncOutcome {
        let _guard = self
            .refresh_gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.sync_locked()
    }

    /// Rebuild the index from the cache file
    pub fn load(&self) -> LoadOutcome {
        let _guard = self
            .refresh_gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.load_locked()
    }

    fn sync_locked(&self) -> SyncOutcome {
        match self.try_sync() {
            Ok(true) => SyncOutcome::Updated,
            Ok(false) => SyncOutcome::Unchanged,
            Err(e) => {
                self.report_sync_error(&e);
                SyncOutcome::Failed
            }
        }
    }

    fn try_sync(&self) -> Result<bool> {
        let text = self.source.fetch()?;
        self.cache.write_if_changed(&text)
    }

    fn report_sync_error(&self, err: &Error) {
        let message = if err.is_transport() && err.severity() == Severity::Warning {
            format!("Fetch failed, using local cache: {}", err)
        } else {
            format!("Error while updating positional data: {}", err)
        };
        self.sink.report(err.severity(), &message);
    }

    fn load_locked(&self) -> LoadOutcome {
        match self.try_load() {
            Ok(index) => {
                let actions = index.len();
                let rows = index.row_count();
                self.publish(index);
                info!("Loaded {} positional actions ({} entries)", actions, rows);
                LoadOutcome::Loaded { actions, rows }
            }
            Err(e) => {
                let message = match &e {
                    Error::FileUnreadable { .. } => {
                        format!("Failed to read positional data: {}", e)
                    }
                    Error::Malformed { .. } => format!("Positional data is malformed: {}", e),
                    _ => format!("Unexpected error while loading positional data: {}", e),
                };
                self.sink.report(Severity::Error, &message);
                LoadOutcome::Kept
            }
        }
    }

    fn try_load(&self) -> Result<PositionalIndex> {
        let file = self.cache.open()?;
        parse_table(
            std::io::BufReader::new(file),
            &self.config.columns,
            self.cache.path(),
        )
    }

    fn publish(&self, index: PositionalIndex) {
        let mut current = self.index.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(index);
    }

    /// The current index generation.
    ///
    /// Holding the snapshot pins that generation; later refreshes do not
    /// affect it.
    pub fn snapshot(&self) -> Arc<PositionalIndex> {
        Arc::clone(&self.index.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Whether the action has any positional entry at all
    pub fn is_positional(&self, action_id: u32) -> bool {
        self.snapshot().contains(action_id)
    }

    /// Stored hit flag, `false` for anything unknown
    pub fn is_positional_hit(&self, action_id: u32, percent: u32) -> bool {
        self.snapshot().is_hit(action_id, percent)
    }

    pub fn positional_parameters(
        &self,
        action_id: u32,
        percent: u32,
    ) -> Option<PositionalParameters> {
        self.snapshot().parameters(action_id, percent).cloned()
    }

    pub fn positional_action(&self, action_id: u32) -> Option<PositionalAction> {
        self.snapshot().get(action_id).cloned()
    }
}

impl std::fmt::Debug for PositionalManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionalManager")
            .field("config", &self.config)
            .field("actions", &self.snapshot().len())
            .finish()
    }
}
