//! Progress Store - the single authoritative holder of learner state.
//!
//! Scores, mastered skills and completed weeks live in memory for the
//! session; only the learner profile is written to durable storage.
//! Every change is published on a `watch` channel so views can follow
//! the latest snapshot without polling.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::domain::catalog::ContentCatalog;
use crate::domain::competency::{CompetencyId, CompetencyScores};
use crate::domain::foundation::{DomainError, ValidationError, WeekNumber};
use crate::domain::learner::LearnerProfile;
use crate::domain::progress::LearnerProgress;
use crate::ports::{KeyValueStore, StorageError, PROFILE_KEY};

pub struct ProgressStore {
    catalog: Arc<ContentCatalog>,
    storage: Arc<dyn KeyValueStore>,
    progress: watch::Sender<LearnerProgress>,
    setup_prompt: watch::Sender<bool>,
    setup_scheduled: AtomicBool,
    /// Serializes profile writes with their in-memory swap.
    profile_lock: Mutex<()>,
}

impl ProgressStore {
    /// Builds the store, restoring the profile from durable storage.
    ///
    /// A missing or unreadable profile record starts the learner without a
    /// profile; only storage I/O failures are errors.
    pub async fn load(
        catalog: Arc<ContentCatalog>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Result<Self, StorageError> {
        let profile = read_stored_profile(storage.as_ref()).await?;
        let progress = LearnerProgress {
            profile,
            ..LearnerProgress::default()
        };
        let (progress, _) = watch::channel(progress);
        let (setup_prompt, _) = watch::channel(false);

        Ok(Self {
            catalog,
            storage,
            progress,
            setup_prompt,
            setup_scheduled: AtomicBool::new(false),
            profile_lock: Mutex::new(()),
        })
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    /// Current state as an owned snapshot.
    pub fn snapshot(&self) -> LearnerProgress {
        self.progress.borrow().clone()
    }

    /// Receives every subsequent change to learner progress.
    pub fn subscribe(&self) -> watch::Receiver<LearnerProgress> {
        self.progress.subscribe()
    }

    pub fn scores(&self) -> CompetencyScores {
        self.progress.borrow().scores
    }

    pub fn mastered_skills(&self) -> BTreeSet<String> {
        self.progress.borrow().mastered_skills.clone()
    }

    pub fn completed_weeks(&self) -> BTreeSet<WeekNumber> {
        self.progress.borrow().completed_weeks.clone()
    }

    pub fn profile(&self) -> Option<LearnerProfile> {
        self.progress.borrow().profile.clone()
    }

    /// Overwrites one dimension. Levels above 5 are accepted as given.
    pub fn set_score(&self, id: CompetencyId, level: u32) -> Result<CompetencyScores, ValidationError> {
        let mut outcome = Ok(());
        self.progress.send_if_modified(|p| {
            outcome = p.set_score(id, level);
            outcome.is_ok()
        });
        outcome?;
        tracing::debug!(dimension = %id, level, "competency score set");
        Ok(self.scores())
    }

    /// Restores default scores and clears skills and weeks. The profile stays.
    pub fn reset_all(&self) {
        self.progress.send_modify(LearnerProgress::reset);
        tracing::info!("learner progress reset");
    }

    /// Returns whether the skill is mastered after the toggle.
    pub fn toggle_mastered_skill(&self, skill_id: &str) -> Result<bool, ValidationError> {
        let mut outcome = Ok(false);
        self.progress.send_if_modified(|p| {
            outcome = p.toggle_mastered_skill(&self.catalog, skill_id);
            outcome.is_ok()
        });
        let mastered = outcome?;
        tracing::debug!(skill_id, mastered, "mastered skill toggled");
        Ok(mastered)
    }

    /// Returns true when the week was newly completed.
    pub fn mark_week_complete(&self, week: WeekNumber) -> bool {
        let mut added = false;
        self.progress.send_if_modified(|p| {
            added = p.mark_week_complete(week);
            added
        });
        if added {
            tracing::info!(week = week.value(), "week completed");
        }
        added
    }

    /// Validates, persists and then adopts the profile. Closes the setup
    /// prompt if it was open.
    pub async fn save_profile(&self, profile: LearnerProfile) -> Result<(), DomainError> {
        profile.validate()?;

        let json = serde_json::to_string(&profile)
            .map_err(|e| StorageError::SerializationFailed(e.to_string()))?;
        let _guard = self.profile_lock.lock().await;
        self.storage.set(PROFILE_KEY, &json).await.map_err(|e| {
            tracing::error!(error = %e, "failed to persist learner profile");
            DomainError::from(e)
        })?;

        self.progress.send_modify(|p| p.profile = Some(profile));
        self.setup_prompt.send_if_modified(|open| std::mem::replace(open, false));
        tracing::info!("learner profile saved");
        Ok(())
    }

    /// Re-reads the profile from durable storage, replacing the in-memory one.
    pub async fn reload_profile(&self) -> Result<Option<LearnerProfile>, DomainError> {
        let _guard = self.profile_lock.lock().await;
        let profile = read_stored_profile(self.storage.as_ref()).await?;
        self.progress.send_modify(|p| p.profile = profile.clone());
        Ok(profile)
    }

    pub fn setup_prompt_open(&self) -> bool {
        *self.setup_prompt.borrow()
    }

    pub fn subscribe_setup_prompt(&self) -> watch::Receiver<bool> {
        self.setup_prompt.subscribe()
    }

    /// After `delay`, opens the first-run setup prompt if there is still no
    /// profile. Fires at most once per store; later calls return `None`.
    pub fn schedule_setup_prompt(self: &Arc<Self>, delay: Duration) -> Option<JoinHandle<()>> {
        if self.setup_scheduled.swap(true, Ordering::AcqRel) {
            return None;
        }
        let store = Arc::clone(self);
        Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let has_profile = store.progress.borrow().profile.is_some();
            if !has_profile {
                store.setup_prompt.send_replace(true);
                tracing::info!("no learner profile found, opening setup prompt");
            }
        }))
    }

    pub fn open_profile_editor(&self) {
        self.setup_prompt.send_replace(true);
    }

    pub fn close_profile_editor(&self) {
        self.setup_prompt.send_replace(false);
    }
}

async fn read_stored_profile(
    storage: &dyn KeyValueStore,
) -> Result<Option<LearnerProfile>, StorageError> {
    let raw = match storage.get(PROFILE_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Ok(None),
        Err(StorageError::DeserializationFailed(e)) => {
            tracing::warn!(error = %e, "ignoring undecodable stored learner profile");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };
    match serde_json::from_str::<LearnerProfile>(&raw) {
        Ok(profile) => Ok(Some(profile)),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed stored learner profile");
            Ok(None)
        }
    }
}
