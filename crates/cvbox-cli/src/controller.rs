//! List/upload/download/delete controller over the selected store.
//!
//! The controller is the last stop for errors: every failure is recorded as
//! the current error message and the previously loaded list stays as it was.

use cvbox_core::{CvId, CvRecord, NewCv};
use cvbox_storage::{keys, CvError, CvStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::format::format_row;

pub const EMPTY_MESSAGE: &str = "No CVs uploaded yet.";

/// Built-in text CVs for trying the app out.
pub const SAMPLE_CVS: [(&str, &str, &str); 3] = [
    (
        "John-Doe-CV.txt",
        "text/plain",
        "John Doe\nSenior Software Engineer\nSkills: React, Node.js, PostgreSQL, AWS\nExperience: 8+ years building web apps.",
    ),
    (
        "Jane-Smith-Resume.txt",
        "text/plain",
        "Jane Smith\nProduct Manager\nSkills: Roadmapping, Analytics, UX, A/B Testing\nExperience: 6+ years in product-led startups.",
    ),
    (
        "Alex-UX-Portfolio.txt",
        "text/plain",
        "Alex Kim\nUX Designer\nSkills: Figma, Prototyping, User Research\nExperience: 5+ years, fintech and healthtech.",
    ),
];

pub struct Controller {
    store: Arc<dyn CvStore>,
    items: Vec<CvRecord>,
    error: Option<String>,
    loaded: bool,
}

impl Controller {
    pub fn new(store: Arc<dyn CvStore>) -> Self {
        Controller {
            store,
            items: Vec::new(),
            error: None,
            loaded: false,
        }
    }

    pub fn items(&self) -> &[CvRecord] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn fail(&mut self, err: CvError) {
        tracing::warn!(error = %err, "Operation failed");
        self.error = Some(err.user_message());
    }

    /// Reload the list from the store.
    pub async fn refresh(&mut self) {
        self.error = None;
        match self.store.list_cvs().await {
            Ok(items) => self.items = items,
            Err(e) => self.fail(e),
        }
        self.loaded = true;
    }

    /// Upload one file, then reload the list.
    pub async fn upload(&mut self, file: NewCv) -> Option<CvId> {
        self.error = None;
        match self.store.add_cv(file).await {
            Ok(id) => {
                self.refresh().await;
                Some(id)
            }
            Err(e) => {
                self.fail(e);
                None
            }
        }
    }

    /// Read a file from disk and upload it.
    pub async fn upload_path(&mut self, path: &Path) -> Option<CvId> {
        match NewCv::from_path(path).await {
            Ok(file) => self.upload(file).await,
            Err(e) => {
                self.error = Some(format!("Could not read {}: {}", path.display(), e));
                None
            }
        }
    }

    /// Upload the built-in sample CVs in order, then reload the list.
    ///
    /// Stops at the first failure; samples already uploaded stay.
    pub async fn add_samples(&mut self) {
        self.error = None;
        for (name, content_type, content) in SAMPLE_CVS {
            let file = NewCv::new(name, content_type, content.as_bytes().to_vec());
            if let Err(e) = self.store.add_cv(file).await {
                self.fail(e);
                return;
            }
        }
        self.refresh().await;
    }

    /// Delete a record and drop it from the loaded list.
    pub async fn delete(&mut self, id: &CvId) -> bool {
        self.error = None;
        match self.store.delete_cv(id).await {
            Ok(()) => {
                self.items.retain(|r| &r.id != id);
                true
            }
            Err(e) => {
                self.fail(e);
                false
            }
        }
    }

    /// Fetch a record and write its content to `dir` under the record name.
    pub async fn download(&mut self, id: &CvId, dir: &Path) -> Option<PathBuf> {
        self.error = None;
        let record = match self.store.get_cv(id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                self.error = Some(format!("No CV with id {}", id));
                return None;
            }
            Err(e) => {
                self.fail(e);
                return None;
            }
        };

        let Some(blob) = record.blob else {
            self.error = Some(format!("CV {} has no content", id));
            return None;
        };

        // Remote names come from decoded keys and may carry separators.
        let target = dir.join(keys::sanitize_name(&record.name));

        match tokio::fs::write(&target, &blob).await {
            Ok(()) => {
                tracing::info!(id = %id, path = %target.display(), size_bytes = blob.len(), "Downloaded CV");
                Some(target)
            }
            Err(e) => {
                self.error = Some(format!("Could not write {}: {}", target.display(), e));
                None
            }
        }
    }

    /// Render the current state as text.
    pub fn render(&self) -> String {
        let mut out = String::from("CV Uploads\n");

        if let Some(ref error) = self.error {
            out.push_str(&format!("Error: {}\n", error));
        }

        if !self.loaded {
            out.push_str("Loading...\n");
        } else if self.items.is_empty() {
            out.push_str(EMPTY_MESSAGE);
            out.push('\n');
        } else {
            for record in &self.items {
                out.push_str(&format!("[{}] {}\n", record.id, format_row(record)));
            }
        }

        out
    }
}
