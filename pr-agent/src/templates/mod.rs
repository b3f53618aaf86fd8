//! Pull request description templates
//!
//! Templates are plain markdown files named `<type>.md` in a single
//! directory. [`TemplateStore`] lists them in one of two catalog modes and
//! pairs a free-form change type with a template via [`resolve`].

pub mod type_mapping;

use crate::config::TemplateCatalog;
use crate::{PrAgentError, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use type_mapping::{
    display_label, known_template_files, normalize, resolve, Resolution, DEFAULT_TEMPLATE,
    FIXED_CATALOG, TYPE_MAPPING,
};

/// One template as reported to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrTemplate {
    /// File name including the `.md` extension
    pub filename: String,
    /// File stem
    pub name: String,
    /// Template kind: the stem, or the display label in the fixed catalog
    #[serde(rename = "type")]
    pub template_type: String,
    /// Markdown body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Why the body could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A resolved template recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// Filename of the chosen template
    pub recommended_template: String,
    /// Kind of the chosen template, as `get_pr_templates` reports it
    pub template_type: String,
    /// Markdown body of the chosen template
    pub template_content: String,
    /// Caller's description of the changes, echoed back
    pub changes_summary: String,
    /// Change type as the caller gave it
    pub detected_change_type: String,
    /// Whether the default template was used
    pub fallback_used: bool,
    /// Short explanation of the choice
    pub reasoning: String,
    /// What to do with the template next
    pub usage_hint: String,
    /// Present only when the default template was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Read-only view of a templates directory
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
    catalog: TemplateCatalog,
}

impl TemplateStore {
    /// Create a store over `dir`
    pub fn new(dir: impl Into<PathBuf>, catalog: TemplateCatalog) -> Self {
        Self {
            dir: dir.into(),
            catalog,
        }
    }

    /// The templates directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The catalog mode in use
    pub fn catalog(&self) -> TemplateCatalog {
        self.catalog
    }

    /// List templates sorted by name
    ///
    /// Entries whose body cannot be read carry an `error` instead of content.
    pub fn list_templates(&self) -> Result<Vec<PrTemplate>> {
        if !self.dir.is_dir() {
            return Err(PrAgentError::TemplatesDirNotFound(self.dir.clone()));
        }

        let mut templates = match self.catalog {
            TemplateCatalog::Scan => self.scan_directory(),
            TemplateCatalog::Fixed => self.fixed_catalog(),
        };
        templates.sort_by(|a, b| a.name.cmp(&b.name));

        tracing::info!(
            "Listed {} templates from {}",
            templates.len(),
            self.dir.display()
        );
        Ok(templates)
    }

    fn scan_directory(&self) -> Vec<PrTemplate> {
        WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable directory entry: {}", e);
                    None
                }
            })
            .filter(|entry| {
                let path = entry.path();
                path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("md")
            })
            .filter_map(|entry| {
                let filename = entry.file_name().to_str()?.to_string();
                let name = stem_of(&filename).to_string();
                Some(self.load_entry(filename, name.clone(), name))
            })
            .collect()
    }

    fn fixed_catalog(&self) -> Vec<PrTemplate> {
        FIXED_CATALOG
            .iter()
            .map(|(filename, label)| {
                self.load_entry(
                    filename.to_string(),
                    stem_of(filename).to_string(),
                    label.to_string(),
                )
            })
            .collect()
    }

    fn load_entry(&self, filename: String, name: String, template_type: String) -> PrTemplate {
        let (content, error) = match fs::read_to_string(self.dir.join(&filename)) {
            Ok(content) => (Some(content), None),
            Err(e) => {
                tracing::warn!("Failed to read template {}: {}", filename, e);
                (None, Some(format!("Failed to read template: {e}")))
            }
        };
        PrTemplate {
            filename,
            name,
            template_type,
            content,
            error,
        }
    }

    /// Read one template body by filename
    pub fn read_template(&self, filename: &str) -> Result<String> {
        if filename.contains(&['/', '\\'][..]) || filename.starts_with('.') {
            return Err(PrAgentError::TemplateNotFound(filename.to_string()));
        }
        let path = self.dir.join(filename);
        if !path.is_file() {
            return Err(PrAgentError::TemplateNotFound(filename.to_string()));
        }
        Ok(fs::read_to_string(path)?)
    }

    /// Pick a template for `change_type` and load it
    ///
    /// Fails with [`PrAgentError::TemplateNotFound`] when the resolved file
    /// is absent from the directory.
    pub fn suggest(&self, changes_summary: &str, change_type: &str) -> Result<Suggestion> {
        let resolution = resolve(change_type);
        let template_content = self.read_template(resolution.filename)?;

        let template_type = match self.catalog {
            TemplateCatalog::Fixed => display_label(resolution.filename),
            TemplateCatalog::Scan => None,
        }
        .unwrap_or_else(|| stem_of(resolution.filename))
        .to_string();

        let note = resolution.fallback_used.then(|| {
            format!("No specific template found for '{change_type}', defaulting to feature template")
        });

        Ok(Suggestion {
            recommended_template: resolution.filename.to_string(),
            template_type: template_type.clone(),
            template_content,
            changes_summary: changes_summary.to_string(),
            detected_change_type: change_type.to_string(),
            fallback_used: resolution.fallback_used,
            reasoning: format!(
                "Based on your analysis: '{changes_summary}', this appears to be a {template_type} change."
            ),
            usage_hint:
                "Fill out this template from the analyzed changes before opening the pull request."
                    .to_string(),
            note,
        })
    }
}

fn stem_of(filename: &str) -> &str {
    filename.strip_suffix(".md").unwrap_or(filename)
}
