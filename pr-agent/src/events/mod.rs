//! Read-only access to the CI event log
//!
//! An external webhook listener appends GitHub Actions events to a JSON
//! array on disk. This module only ever reads that file: [`EventSource`] is
//! the seam, [`FileEventSource`] the production reader, and [`EventLog`]
//! answers the two queries the tools expose.

use crate::{PrAgentError, Result};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Event type that carries workflow run state
pub const WORKFLOW_RUN_EVENT: &str = "workflow_run";

/// One entry of the event log
///
/// Fields other than `type`, `payload` and `timestamp` are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// GitHub event name, e.g. `workflow_run`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// Raw webhook payload
    #[serde(default)]
    pub payload: Value,
    /// When the listener received the event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Any other recorded fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    /// Whether this is a `workflow_run` event
    pub fn is_workflow_run(&self) -> bool {
        self.event_type.as_deref() == Some(WORKFLOW_RUN_EVENT)
    }
}

/// Events read from a log together with the size of the log
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventBatch {
    /// Parsed events in recorded order
    pub events: Vec<Event>,
    /// Entries in the log, unparseable ones included
    pub total_entries: usize,
}

/// Source of recorded events
pub trait EventSource: Send + Sync {
    /// Read every event in recorded order
    fn read_all_events(&self) -> Result<Vec<Event>>;

    /// Read every event along with the number of entries in the log
    ///
    /// Sources that skip malformed entries override this so the count
    /// still covers them.
    fn read_batch(&self) -> Result<EventBatch> {
        let events = self.read_all_events()?;
        Ok(EventBatch {
            total_entries: events.len(),
            events,
        })
    }
}

/// Reads events from a JSON array file
#[derive(Debug, Clone)]
pub struct FileEventSource {
    path: PathBuf,
}

impl FileEventSource {
    /// Create a reader for `path`; the file is not touched until read
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the event log
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSource for FileEventSource {
    fn read_all_events(&self) -> Result<Vec<Event>> {
        self.read_batch().map(|batch| batch.events)
    }

    fn read_batch(&self) -> Result<EventBatch> {
        if !self.path.exists() {
            return Err(PrAgentError::EventsFileNotFound(self.path.clone()));
        }

        let raw = fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&raw).map_err(PrAgentError::InvalidEventsJson)?;
        let Value::Array(entries) = value else {
            return Err(PrAgentError::InvalidEventsFormat(format!(
                "expected a JSON array in {}",
                self.path.display()
            )));
        };

        let total = entries.len();
        let events: Vec<Event> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                if !entry.is_object() {
                    tracing::warn!("Skipping event {}: not a JSON object", index);
                    return None;
                }
                match serde_json::from_value(entry) {
                    Ok(event) => Some(event),
                    Err(e) => {
                        tracing::warn!("Skipping event {}: {}", index, e);
                        None
                    }
                }
            })
            .collect();

        tracing::debug!(
            "Read {} of {} events from {}",
            events.len(),
            total,
            self.path.display()
        );
        Ok(EventBatch {
            events,
            total_entries: total,
        })
    }
}

/// The most recent events in recorded order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentEvents {
    /// Up to `limit` events from the front of the log
    pub events: Vec<Event>,
    /// Number of events in the whole log
    pub total_events: usize,
    /// Number of events returned
    pub showing: usize,
}

/// Latest known state of one CI workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowSummary {
    /// Workflow name
    pub name: String,
    /// Run status such as `completed` or `in_progress`
    pub status: String,
    /// Run conclusion such as `success`, null while running
    pub conclusion: Option<String>,
    /// Time of the run's last update
    pub updated_at: String,
    /// Branch the run was triggered on
    pub head_branch: String,
    /// Link to the run
    pub html_url: Option<String>,
    /// Sequential run number
    pub run_number: i64,
}

/// Workflow summaries keyed by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowStatusReport {
    /// One entry per workflow, sorted by name
    pub workflows: BTreeMap<String, WorkflowSummary>,
    /// Number of workflows reported
    pub total_workflows: usize,
    /// The workflow name filter, or `all workflows`
    pub filtered_by: String,
}

fn str_field<'a>(object: &'a Value, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

impl WorkflowSummary {
    fn from_run(run: &Value) -> Self {
        let updated_at = str_field(run, "updated_at")
            .or_else(|| str_field(run, "created_at"))
            .unwrap_or_default();
        Self {
            name: str_field(run, "name").unwrap_or("Unknown").to_string(),
            status: str_field(run, "status").unwrap_or("unknown").to_string(),
            conclusion: str_field(run, "conclusion").map(str::to_string),
            updated_at: updated_at.to_string(),
            head_branch: str_field(run, "head_branch")
                .unwrap_or("unknown")
                .to_string(),
            html_url: str_field(run, "html_url").map(str::to_string),
            run_number: run.get("run_number").and_then(Value::as_i64).unwrap_or(0),
        }
    }
}

/// Compare two event times, chronologically when both parse as RFC 3339
fn compare_times(a: &str, b: &str) -> Ordering {
    let parse = |s: &str| DateTime::<FixedOffset>::parse_from_rfc3339(s).ok();
    match (parse(a), parse(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

/// Queries over an [`EventSource`]
#[derive(Clone)]
pub struct EventLog {
    source: Arc<dyn EventSource>,
}

impl EventLog {
    /// Create a log over `source`
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self { source }
    }

    /// The first `limit` events with the total count
    pub fn recent(&self, limit: usize) -> Result<RecentEvents> {
        let EventBatch {
            mut events,
            total_entries: total_events,
        } = self.source.read_batch()?;
        events.truncate(limit);
        Ok(RecentEvents {
            showing: events.len(),
            events,
            total_events,
        })
    }

    /// Latest state of each workflow, optionally for one workflow only
    pub fn workflow_status(&self, workflow_name: Option<&str>) -> Result<WorkflowStatusReport> {
        let events = self.source.read_all_events()?;

        let mut workflows: BTreeMap<String, WorkflowSummary> = BTreeMap::new();
        for event in events.iter().filter(|e| e.is_workflow_run()) {
            let run = match event.payload.get(WORKFLOW_RUN_EVENT) {
                Some(run) if run.as_object().is_some_and(|fields| !fields.is_empty()) => run,
                _ => {
                    tracing::debug!("Skipping workflow_run event without run data");
                    continue;
                }
            };
            let summary = WorkflowSummary::from_run(run);

            if workflow_name.is_some_and(|wanted| wanted != summary.name) {
                continue;
            }

            match workflows.get(&summary.name) {
                Some(existing)
                    if compare_times(&summary.updated_at, &existing.updated_at)
                        != Ordering::Greater => {}
                _ => {
                    workflows.insert(summary.name.clone(), summary);
                }
            }
        }

        tracing::info!("Summarized {} workflows", workflows.len());
        Ok(WorkflowStatusReport {
            total_workflows: workflows.len(),
            workflows,
            filtered_by: workflow_name.unwrap_or("all workflows").to_string(),
        })
    }
}
