//! FlowContext - I/O primitives for flow storage
//!
//! The context provides access to storage and utilities. No business logic
//! methods, just data access primitives. Commands do all the work.

use crate::error::{FlowError, Result};
use crate::types::{Deal, DealId, Flow, FormLayout, Stage, StageId};
use dealflow_operations::LogEntry;
use fs2::FileExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Context passed to every command - provides access, not logic
pub struct FlowContext {
    /// Path to the .dealflow directory
    root: PathBuf,
}

impl FlowContext {
    /// Create a new context for the given .dealflow directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a context by finding the .dealflow directory from a starting path
    pub fn find(start: impl AsRef<Path>) -> Result<Self> {
        let mut current = start.as_ref().to_path_buf();

        loop {
            let flow_dir = current.join(".dealflow");
            if flow_dir.is_dir() {
                return Ok(Self::new(flow_dir));
            }

            if !current.pop() {
                return Err(FlowError::NotInitialized {
                    path: start.as_ref().to_path_buf(),
                });
            }
        }
    }

    // =========================================================================
    // Path helpers
    // =========================================================================

    /// Get the root .dealflow directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to flow.json
    pub fn flow_path(&self) -> PathBuf {
        self.root.join("flow.json")
    }

    /// Path to stages directory
    pub fn stages_dir(&self) -> PathBuf {
        self.root.join("stages")
    }

    /// Path to a stage's JSON file
    pub fn stage_path(&self, id: &StageId) -> PathBuf {
        self.stages_dir().join(format!("{}.json", id))
    }

    /// Path to deals directory
    pub fn deals_dir(&self) -> PathBuf {
        self.root.join("deals")
    }

    /// Path to a deal's JSON file
    pub fn deal_path(&self, id: &DealId) -> PathBuf {
        self.deals_dir().join(format!("{}.json", id))
    }

    /// Path to a deal's log file
    pub fn deal_log_path(&self, id: &DealId) -> PathBuf {
        self.deals_dir().join(format!("{}.jsonl", id))
    }

    /// Path to layouts directory
    pub fn layouts_dir(&self) -> PathBuf {
        self.root.join("layouts")
    }

    /// Path to an entity's form layout file
    pub fn layout_path(&self, entity: &str) -> PathBuf {
        self.layouts_dir().join(format!("{}.json", entity))
    }

    /// Path to the activity directory
    pub fn activity_dir(&self) -> PathBuf {
        self.root.join("activity")
    }

    /// Path to the current activity log
    pub fn activity_path(&self) -> PathBuf {
        self.activity_dir().join("current.jsonl")
    }

    /// Path to the lock file
    pub fn lock_path(&self) -> PathBuf {
        self.root.join(".lock")
    }

    // =========================================================================
    // Directory initialization
    // =========================================================================

    /// Check if the flow is initialized
    pub fn is_initialized(&self) -> bool {
        self.flow_path().exists()
    }

    /// Check if all required directories exist
    pub fn directories_exist(&self) -> bool {
        self.root.exists()
            && self.stages_dir().exists()
            && self.deals_dir().exists()
            && self.layouts_dir().exists()
            && self.activity_dir().exists()
    }

    /// Create the directory structure for a new flow
    ///
    /// This is idempotent - safe to call multiple times.
    pub async fn create_directories(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        fs::create_dir_all(self.stages_dir()).await?;
        fs::create_dir_all(self.deals_dir()).await?;
        fs::create_dir_all(self.layouts_dir()).await?;
        fs::create_dir_all(self.activity_dir()).await?;
        Ok(())
    }

    /// Ensure directories exist, creating them if needed
    pub async fn ensure_directories(&self) -> Result<()> {
        if !self.directories_exist() {
            self.create_directories().await?;
        }
        Ok(())
    }

    // =========================================================================
    // Flow I/O
    // =========================================================================

    /// Read the flow file
    pub async fn read_flow(&self) -> Result<Flow> {
        let path = self.flow_path();
        if !path.exists() {
            return Err(FlowError::NotInitialized {
                path: self.root.clone(),
            });
        }

        let content = fs::read_to_string(&path).await?;
        let flow: Flow = serde_json::from_str(&content)?;
        Ok(flow)
    }

    /// Write the flow file (atomic write via temp file)
    pub async fn write_flow(&self, flow: &Flow) -> Result<()> {
        let path = self.flow_path();
        let content = serde_json::to_string_pretty(flow)?;
        atomic_write(&path, content.as_bytes()).await
    }

    // =========================================================================
    // Stage I/O
    // =========================================================================

    /// Read a stage file; the id is restored from the filename
    pub async fn read_stage(&self, id: &StageId) -> Result<Stage> {
        let path = self.stage_path(id);
        if !path.exists() {
            return Err(FlowError::StageNotFound { id: id.to_string() });
        }

        let content = fs::read_to_string(&path).await?;
        let mut stage: Stage = serde_json::from_str(&content)?;
        stage.id = id.clone();
        Ok(stage)
    }

    /// Write a stage file (atomic write via temp file)
    pub async fn write_stage(&self, stage: &Stage) -> Result<()> {
        let path = self.stage_path(&stage.id);
        let content = serde_json::to_string_pretty(stage)?;
        atomic_write(&path, content.as_bytes()).await
    }

    /// Delete a stage file
    pub async fn delete_stage_file(&self, id: &StageId) -> Result<()> {
        let path = self.stage_path(id);
        if path.exists() {
            fs::remove_file(&path).await?;
        }
        Ok(())
    }

    /// List all stage IDs by reading the stages directory
    pub async fn list_stage_ids(&self) -> Result<Vec<StageId>> {
        Ok(list_json_stems(&self.stages_dir())
            .await?
            .into_iter()
            .map(StageId::from_string)
            .collect())
    }

    /// Read all stages
    pub async fn read_all_stages(&self) -> Result<Vec<Stage>> {
        let ids = self.list_stage_ids().await?;
        let mut stages = Vec::with_capacity(ids.len());
        for id in ids {
            stages.push(self.read_stage(&id).await?);
        }
        Ok(stages)
    }

    /// Check if a stage exists
    pub fn stage_exists(&self, id: &StageId) -> bool {
        self.stage_path(id).exists()
    }

    // =========================================================================
    // Deal I/O
    // =========================================================================

    /// Read a deal file
    pub async fn read_deal(&self, id: &DealId) -> Result<Deal> {
        let path = self.deal_path(id);
        if !path.exists() {
            return Err(FlowError::DealNotFound { id: id.to_string() });
        }

        let content = fs::read_to_string(&path).await?;
        let deal: Deal = serde_json::from_str(&content)?;
        Ok(deal)
    }

    /// Write a deal file (atomic write via temp file)
    pub async fn write_deal(&self, deal: &Deal) -> Result<()> {
        let path = self.deal_path(&deal.id);
        let content = serde_json::to_string_pretty(deal)?;
        atomic_write(&path, content.as_bytes()).await
    }

    /// Delete a deal file and its log
    pub async fn delete_deal_file(&self, id: &DealId) -> Result<()> {
        let deal_path = self.deal_path(id);
        let log_path = self.deal_log_path(id);

        if deal_path.exists() {
            fs::remove_file(&deal_path).await?;
        }
        if log_path.exists() {
            fs::remove_file(&log_path).await?;
        }
        Ok(())
    }

    /// List all deal IDs by reading the deals directory
    pub async fn list_deal_ids(&self) -> Result<Vec<DealId>> {
        Ok(list_json_stems(&self.deals_dir())
            .await?
            .into_iter()
            .map(DealId::from_string)
            .collect())
    }

    /// Read all deals
    pub async fn read_all_deals(&self) -> Result<Vec<Deal>> {
        let ids = self.list_deal_ids().await?;
        let mut deals = Vec::with_capacity(ids.len());
        for id in ids {
            deals.push(self.read_deal(&id).await?);
        }
        Ok(deals)
    }

    /// Check if a deal exists
    pub fn deal_exists(&self, id: &DealId) -> bool {
        self.deal_path(id).exists()
    }

    // =========================================================================
    // Form layout I/O
    // =========================================================================

    /// Read an entity's form layout
    pub async fn read_layout(&self, entity: &str) -> Result<FormLayout> {
        let path = self.layout_path(entity);
        if !path.exists() {
            return Err(FlowError::LayoutNotFound {
                entity: entity.to_string(),
            });
        }

        let content = fs::read_to_string(&path).await?;
        let layout: FormLayout = serde_json::from_str(&content)?;
        Ok(layout)
    }

    /// Write an entity's form layout (atomic write via temp file)
    pub async fn write_layout(&self, layout: &FormLayout) -> Result<()> {
        let path = self.layout_path(&layout.entity);
        let content = serde_json::to_string_pretty(layout)?;
        debug!(entity = %layout.entity, fields = layout.fields.len(), "writing form layout");
        atomic_write(&path, content.as_bytes()).await
    }

    // =========================================================================
    // Activity logging
    // =========================================================================

    /// Append a log entry to the global activity log
    pub async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        self.append_log(&self.activity_path(), entry).await
    }

    /// Append a log entry to a deal's log
    pub async fn append_deal_log(&self, deal_id: &DealId, entry: &LogEntry) -> Result<()> {
        self.append_log(&self.deal_log_path(deal_id), entry).await
    }

    /// Append a log entry to a JSONL file
    async fn append_log(&self, path: &Path, entry: &LogEntry) -> Result<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Read activity log entries, newest first
    pub async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        let path = self.activity_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path).await?;
        let mut entries: Vec<LogEntry> = content
            .lines()
            .filter(|line| !line.is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();

        entries.reverse();

        if let Some(limit) = limit {
            entries.truncate(limit);
        }

        Ok(entries)
    }

    // =========================================================================
    // Locking
    // =========================================================================

    /// Try to acquire an exclusive lock (non-blocking)
    pub async fn lock(&self) -> Result<FlowLock> {
        let lock_path = self.lock_path();

        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                debug!(path = %lock_path.display(), "acquired flow lock");
                Ok(FlowLock { file })
            }
            Err(_) => Err(FlowError::LockBusy),
        }
    }
}

/// RAII lock guard - releases on drop
pub struct FlowLock {
    file: std::fs::File,
}

impl Drop for FlowLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// File stems of all .json files in a directory; empty when it doesn't exist
async fn list_json_stems(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut stems = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                stems.push(stem.to_string());
            }
        }
    }
    Ok(stems)
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;
    fs::rename(&temp_path, path).await?;
    Ok(())
}
