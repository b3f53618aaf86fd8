//! Change inspection for the working tree
//!
//! [`ChangeInspector`] answers "what differs from the base branch?" by
//! running four read-only git queries (name-status, stat, full diff and
//! commit log) and bounding the diff with a [`TruncationPolicy`]. Every
//! failure is folded into the returned [`ChangeSet`] so callers always get
//! a well-formed result.

pub mod truncation;

use crate::git::{validate_revision, CommandOutput, GitRunner};
use crate::Result;
use serde::Serialize;
use std::sync::Arc;

pub use truncation::{Truncated, TruncationPolicy, DEFAULT_MAX_DIFF_LINES};

/// A single file reported by `git diff --name-status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedFile {
    /// One or two letter status code (`M`, `A`, `D`, `R100`, ...)
    pub status: String,
    /// Path of the changed file
    pub filename: String,
}

/// Parse `git diff --name-status` output
///
/// Lines without a tab separated filename are skipped. For renames and
/// copies the first path (the source) is reported.
pub fn parse_name_status(output: &str) -> Vec<ChangedFile> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let mut parts = line.split('\t');
            let status = parts.next()?.trim();
            let filename = parts.next()?;
            if status.is_empty() || filename.is_empty() {
                return None;
            }
            Some(ChangedFile {
                status: status.to_string(),
                filename: filename.to_string(),
            })
        })
        .collect()
}

/// Arguments for a change analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Branch or commit to compare the working tree against
    pub base_branch: String,
    /// Whether to fetch the diff body
    pub include_diff: bool,
    /// Switch to the line-count policy with this many lines
    pub max_diff_lines: Option<usize>,
}

impl AnalyzeOptions {
    /// Options comparing against `base_branch` with the diff included
    pub fn new(base_branch: impl Into<String>) -> Self {
        Self {
            base_branch: base_branch.into(),
            include_diff: true,
            max_diff_lines: None,
        }
    }
}

/// Description of how the working tree diverges from a base reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    /// The reference compared against
    pub base_branch: String,
    /// Changed files in git's output order
    pub files_changed: Vec<ChangedFile>,
    /// Number of changed files
    pub total_files: usize,
    /// `git diff --stat` summary
    pub statistics: String,
    /// `git log --oneline` for commits on HEAD that the base lacks
    pub commits: String,
    /// Diff body, possibly truncated, empty when not requested
    pub diff: String,
    /// Whether the diff body was cut
    pub diff_truncated: bool,
    /// Size of the untruncated diff in characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_diff_size: Option<usize>,
    /// Line count of the untruncated diff
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_diff_lines: Option<usize>,
    /// Stderr of a failed `git diff`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_error: Option<String>,
    /// Failure that prevented listing changed files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChangeSet {
    /// An empty change set carrying an error
    pub fn failed(base_branch: &str, error: impl Into<String>) -> Self {
        Self {
            base_branch: base_branch.to_string(),
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Runs the git queries behind `analyze_file_changes`
#[derive(Clone)]
pub struct ChangeInspector {
    git: Arc<dyn GitRunner>,
    max_diff_chars: usize,
}

impl ChangeInspector {
    /// Create an inspector using `git` and a character budget for diffs
    pub fn new(git: Arc<dyn GitRunner>, max_diff_chars: usize) -> Self {
        Self {
            git,
            max_diff_chars,
        }
    }

    /// List files that differ between the working tree and `base_ref`
    pub fn list_changed_files(&self, base_ref: &str) -> Result<Vec<ChangedFile>> {
        validate_revision(base_ref)?;
        let stdout = self
            .git
            .run(&["diff", "--name-status", base_ref])?
            .into_stdout(&format!("diff --name-status {base_ref}"))?;
        Ok(parse_name_status(&stdout))
    }

    /// Run the full diff against `base_ref`, returning the raw process result
    pub fn get_diff(&self, base_ref: &str) -> Result<CommandOutput> {
        validate_revision(base_ref)?;
        self.git.run(&["diff", base_ref])
    }

    /// Per-file insertion/deletion summary against `base_ref`
    pub fn diff_stat(&self, base_ref: &str) -> Result<String> {
        validate_revision(base_ref)?;
        self.git
            .run(&["diff", "--stat", base_ref])?
            .into_stdout(&format!("diff --stat {base_ref}"))
    }

    /// One line per commit reachable from HEAD but not from `base_ref`
    pub fn commit_log(&self, base_ref: &str) -> Result<String> {
        validate_revision(base_ref)?;
        let range = format!("{base_ref}..HEAD");
        self.git
            .run(&["log", "--oneline", &range])?
            .into_stdout(&format!("log --oneline {range}"))
    }

    /// Build the full change description; never fails
    pub fn analyze(&self, options: &AnalyzeOptions) -> ChangeSet {
        let base = options.base_branch.trim();

        let files_changed = match self.list_changed_files(base) {
            Ok(files) => files,
            Err(e) => {
                tracing::error!("Failed to list changed files against {}: {}", base, e);
                return ChangeSet::failed(base, format!("Git command failed: {e}"));
            }
        };
        tracing::info!("{} files changed against {}", files_changed.len(), base);

        let mut change_set = ChangeSet {
            base_branch: base.to_string(),
            total_files: files_changed.len(),
            files_changed,
            statistics: self.diff_stat(base).unwrap_or_else(|e| {
                tracing::warn!("Diff statistics unavailable: {}", e);
                String::new()
            }),
            commits: self.commit_log(base).unwrap_or_else(|e| {
                tracing::warn!("Commit log unavailable: {}", e);
                String::new()
            }),
            ..ChangeSet::default()
        };

        if !options.include_diff || change_set.files_changed.is_empty() {
            return change_set;
        }

        match self.get_diff(base) {
            Ok(output) if output.success => {
                let policy =
                    TruncationPolicy::for_request(options.max_diff_lines, self.max_diff_chars);
                let truncated = policy.apply(&output.stdout);
                if truncated.truncated {
                    tracing::info!(
                        "Diff truncated from {} characters ({} lines)",
                        truncated.original_chars,
                        truncated.original_lines
                    );
                }
                change_set.diff = truncated.content;
                change_set.diff_truncated = truncated.truncated;
                change_set.original_diff_size = Some(truncated.original_chars);
                change_set.total_diff_lines = Some(truncated.original_lines);
            }
            Ok(output) => {
                change_set.diff_error = Some(output.stderr.trim().to_string());
            }
            Err(e) => {
                change_set.diff_error = Some(e.to_string());
            }
        }

        change_set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{commit_all, create_test_git_repo, MockGitRunner};
    use std::fs;

    fn inspector(runner: MockGitRunner) -> ChangeInspector {
        ChangeInspector::new(Arc::new(runner), 20_000)
    }

    #[test]
    fn test_parse_name_status() {
        let output = "M\tsrc/lib.rs\nA\tREADME.md\n\nbogus-line\nR100\told.rs\tnew.rs\n";
        let files = parse_name_status(output);
        assert_eq!(
            files,
            vec![
                ChangedFile {
                    status: "M".into(),
                    filename: "src/lib.rs".into()
                },
                ChangedFile {
                    status: "A".into(),
                    filename: "README.md".into()
                },
                ChangedFile {
                    status: "R100".into(),
                    filename: "old.rs".into()
                },
            ]
        );
    }

    #[test]
    fn test_parse_name_status_empty() {
        assert!(parse_name_status("").is_empty());
        assert!(parse_name_status("\n\n").is_empty());
    }

    #[test]
    fn test_no_changes() {
        let runner = MockGitRunner::new()
            .with_output("diff --name-status main", CommandOutput::ok(""))
            .with_output("diff --stat main", CommandOutput::ok(""))
            .with_output("log --oneline main..HEAD", CommandOutput::ok(""));

        let change_set = inspector(runner).analyze(&AnalyzeOptions::new("main"));
        assert!(change_set.files_changed.is_empty());
        assert_eq!(change_set.total_files, 0);
        assert_eq!(change_set.diff, "");
        assert!(!change_set.diff_truncated);
        assert!(change_set.error.is_none());
    }

    #[test]
    fn test_large_diff_is_truncated() {
        let line = format!("{}\n", "x".repeat(99));
        let diff: String = line.repeat(300);
        assert_eq!(diff.chars().count(), 30_000);

        let runner = MockGitRunner::new()
            .with_output(
                "diff --name-status main",
                CommandOutput::ok("M\tsrc/a.rs\nM\tsrc/b.rs\n"),
            )
            .with_output("diff --stat main", CommandOutput::ok(" 2 files changed"))
            .with_output("log --oneline main..HEAD", CommandOutput::ok("abc123 work\n"))
            .with_output("diff main", CommandOutput::ok(diff));

        let change_set = inspector(runner).analyze(&AnalyzeOptions::new("main"));
        assert_eq!(change_set.total_files, 2);
        assert!(change_set.diff_truncated);
        assert_eq!(change_set.original_diff_size, Some(30_000));
        assert!(change_set.diff.chars().count() <= 20_000);
        assert_eq!(change_set.statistics, " 2 files changed");
        assert_eq!(change_set.commits, "abc123 work\n");
    }

    #[test]
    fn test_line_limit_switches_policy() {
        let diff = (0..50).map(|i| format!("+line {i}")).collect::<Vec<_>>().join("\n");
        let runner = MockGitRunner::new()
            .with_output("diff --name-status main", CommandOutput::ok("M\tsrc/a.rs\n"))
            .with_output("diff main", CommandOutput::ok(diff));

        let options = AnalyzeOptions {
            max_diff_lines: Some(10),
            ..AnalyzeOptions::new("main")
        };
        let change_set = inspector(runner).analyze(&options);
        assert!(change_set.diff_truncated);
        assert_eq!(change_set.total_diff_lines, Some(50));
        assert!(change_set.diff.contains("Showing 10 of 50 lines"));
    }

    #[test]
    fn test_include_diff_false_skips_diff() {
        let runner = MockGitRunner::new()
            .with_output("diff --name-status main", CommandOutput::ok("M\tsrc/a.rs\n"))
            .with_output("diff main", CommandOutput::ok("should not be read"));

        let runner = Arc::new(runner);
        let options = AnalyzeOptions {
            include_diff: false,
            ..AnalyzeOptions::new("main")
        };
        let change_set = ChangeInspector::new(runner.clone(), 20_000).analyze(&options);
        assert_eq!(change_set.total_files, 1);
        assert_eq!(change_set.diff, "");
        assert!(change_set.original_diff_size.is_none());
        assert!(!runner.calls().contains(&"diff main".to_string()));
    }

    #[test]
    fn test_name_status_failure_is_reported_inline() {
        let runner = MockGitRunner::new().with_output(
            "diff --name-status nope",
            CommandOutput::failed("fatal: bad revision 'nope'\n", 128),
        );

        let change_set = inspector(runner).analyze(&AnalyzeOptions::new("nope"));
        let error = change_set.error.unwrap();
        assert!(error.contains("bad revision"));
        assert!(change_set.files_changed.is_empty());
        assert_eq!(change_set.diff, "");
    }

    #[test]
    fn test_diff_failure_is_reported_as_diff_error() {
        let runner = MockGitRunner::new()
            .with_output("diff --name-status main", CommandOutput::ok("M\tsrc/a.rs\n"))
            .with_output("diff main", CommandOutput::failed("fatal: out of memory", 1));

        let change_set = inspector(runner).analyze(&AnalyzeOptions::new("main"));
        assert_eq!(change_set.total_files, 1);
        assert_eq!(change_set.diff, "");
        assert_eq!(change_set.diff_error.as_deref(), Some("fatal: out of memory"));
        assert!(change_set.error.is_none());
    }

    #[test]
    fn test_option_like_base_is_rejected() {
        let runner = MockGitRunner::new();
        let change_set = inspector(runner).analyze(&AnalyzeOptions::new("--output=/tmp/x"));
        assert!(change_set.error.is_some());
    }

    #[test]
    fn test_against_real_repository() {
        let temp_dir = create_test_git_repo().unwrap();
        let repo = temp_dir.path();

        fs::write(repo.join("README.md"), "# Test Repository\n\nMore words\n").unwrap();
        fs::write(repo.join("new.txt"), "fresh file\n").unwrap();
        commit_all(repo, "Edit readme");
        fs::write(repo.join("README.md"), "# Changed again\n").unwrap();

        let git = crate::git::GitOperations::with_work_dir(repo.to_path_buf()).unwrap();
        let inspector = ChangeInspector::new(Arc::new(git), 20_000);

        let change_set = inspector.analyze(&AnalyzeOptions::new("HEAD~1"));
        assert!(change_set.error.is_none(), "{:?}", change_set.error);
        assert_eq!(change_set.total_files, 2);
        let names: Vec<_> = change_set
            .files_changed
            .iter()
            .map(|f| f.filename.as_str())
            .collect();
        assert_eq!(names, vec!["README.md", "new.txt"]);
        assert!(change_set.diff.contains("+# Changed again"));
        assert!(!change_set.diff_truncated);
        assert!(change_set.commits.contains("Edit readme"));
    }

    #[test]
    fn test_real_repository_without_changes() {
        let temp_dir = create_test_git_repo().unwrap();
        let git = crate::git::GitOperations::with_work_dir(temp_dir.path().to_path_buf()).unwrap();
        let inspector = ChangeInspector::new(Arc::new(git), 20_000);

        let change_set = inspector.analyze(&AnalyzeOptions::new("HEAD"));
        assert!(change_set.error.is_none());
        assert_eq!(change_set.total_files, 0);
        assert_eq!(change_set.diff, "");
    }
}
