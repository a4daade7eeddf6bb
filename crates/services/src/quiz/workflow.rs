use tracing::info;

use quiz_core::Clock;
use quiz_core::model::Dataset;
use storage::{DatasetCatalog, DatasetEntry, DatasetLoader};

use super::controller::QuizController;
use super::map::MapSurface;
use super::session::{Outcome, QuizSession};
use super::timer::AdvanceScheduler;
use crate::config::QuizConfig;
use crate::error::QuizError;

//
// ─── DATASET SLOT ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Ready(Dataset),
    Failed(QuizError),
}

/// Identifies one load request; results for an older selection are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

/// The dataset currently selected in the UI and where its load stands.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSlot {
    entry: DatasetEntry,
    status: LoadStatus,
    generation: u64,
}

impl DatasetSlot {
    /// A slot that starts out loading `entry`.
    #[must_use]
    pub fn new(entry: DatasetEntry) -> Self {
        Self {
            entry,
            status: LoadStatus::Loading,
            generation: 0,
        }
    }

    #[must_use]
    pub fn entry(&self) -> &DatasetEntry {
        &self.entry
    }

    #[must_use]
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading)
    }

    /// Token of the load currently in flight (or last finished).
    #[must_use]
    pub fn token(&self) -> LoadToken {
        LoadToken(self.generation)
    }

    /// Switch to another entry and mark it as loading.
    pub fn select(&mut self, entry: DatasetEntry) -> LoadToken {
        self.entry = entry;
        self.generation += 1;
        self.status = LoadStatus::Loading;
        self.token()
    }

    /// Store a load result. Returns `false` when the token is stale.
    pub fn finish(&mut self, token: LoadToken, result: Result<Dataset, QuizError>) -> bool {
        if token != self.token() {
            return false;
        }
        self.status = match result {
            Ok(dataset) => LoadStatus::Ready(dataset),
            Err(err) => LoadStatus::Failed(err),
        };
        true
    }

    /// The loaded dataset, if a quiz may start now.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Loading` while a load is pending and
    /// `QuizError::NoDataset` when the last load failed.
    pub fn dataset(&self) -> Result<&Dataset, QuizError> {
        match &self.status {
            LoadStatus::Ready(dataset) => Ok(dataset),
            LoadStatus::Loading => Err(QuizError::Loading),
            LoadStatus::Failed(_) => Err(QuizError::NoDataset),
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&QuizError> {
        match &self.status {
            LoadStatus::Failed(err) => Some(err),
            _ => None,
        }
    }
}

//
// ─── LOOP SERVICE ──────────────────────────────────────────────────────────────
//

/// Ties dataset loading to quiz sessions.
#[derive(Debug, Clone)]
pub struct QuizLoopService {
    loader: DatasetLoader,
    catalog: DatasetCatalog,
    config: QuizConfig,
    clock: Clock,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(loader: DatasetLoader, catalog: DatasetCatalog, config: QuizConfig) -> Self {
        Self {
            loader,
            catalog,
            config,
            clock: Clock::default(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &DatasetCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// # Errors
    ///
    /// Returns `QuizError::Data` if the dataset cannot be fetched or has no places.
    pub async fn load(&self, entry: &DatasetEntry) -> Result<Dataset, QuizError> {
        let dataset = self.loader.load(entry).await?;
        info!(dataset = entry.display_name(), places = dataset.len(), "dataset ready");
        Ok(dataset)
    }

    /// Load whatever `slot` has selected and store the result in it.
    pub async fn load_into(&self, slot: &mut DatasetSlot) {
        let token = slot.token();
        let entry = slot.entry().clone();
        let result = self.load(&entry).await;
        slot.finish(token, result);
    }

    /// A slot for the first catalog entry, still to be loaded.
    #[must_use]
    pub fn initial_slot(&self) -> DatasetSlot {
        DatasetSlot::new(self.catalog.first().clone())
    }

    #[must_use]
    pub fn new_session(&self) -> QuizSession {
        QuizSession::new(self.config).with_clock(self.clock)
    }

    #[must_use]
    pub fn controller<M: MapSurface, S: AdvanceScheduler>(
        &self,
        map: M,
        scheduler: S,
    ) -> QuizController<M, S> {
        QuizController::new(self.new_session(), map, scheduler)
    }
}

impl<M: MapSurface, S: AdvanceScheduler> QuizController<M, S> {
    /// Start a run over the slot's dataset.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Loading` or `QuizError::NoDataset` when the slot has
    /// nothing to play.
    pub fn start_from(&mut self, slot: &DatasetSlot) -> Result<Outcome, QuizError> {
        let dataset = slot.dataset()?;
        Ok(self.start(dataset))
    }
}
