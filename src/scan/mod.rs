pub mod filesystem;

use crate::error::Result;
use crate::types::config::LayoutConfig;
use filesystem::{file_exists, read_text};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Submission files whose presence the grader checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectFile {
    Entry,
    Script,
    Style,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructureSignals {
    pub has_entry: bool,
    pub has_script: bool,
    pub has_style: bool,
}

impl StructureSignals {
    pub fn has(&self, file: ProjectFile) -> bool {
        match file {
            ProjectFile::Entry => self.has_entry,
            ProjectFile::Script => self.has_script,
            ProjectFile::Style => self.has_style,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectModel {
    pub root: PathBuf,
    pub layout: LayoutConfig,
    pub structure: StructureSignals,
}

impl ProjectModel {
    pub fn path_of(&self, file: ProjectFile) -> PathBuf {
        let relative = match file {
            ProjectFile::Entry => &self.layout.entry,
            ProjectFile::Script => &self.layout.script,
            ProjectFile::Style => &self.layout.style,
        };
        self.root.join(relative)
    }

    /// Returns the file's text, or `None` when the probe found it absent.
    pub fn read(&self, file: ProjectFile) -> Result<Option<String>> {
        if !self.structure.has(file) {
            return Ok(None);
        }
        let content = read_text(&self.path_of(file))?;
        Ok(Some(content))
    }
}

pub fn discover(root: &Path, layout: &LayoutConfig) -> ProjectModel {
    let structure = StructureSignals {
        has_entry: file_exists(&root.join(&layout.entry)),
        has_script: file_exists(&root.join(&layout.script)),
        has_style: file_exists(&root.join(&layout.style)),
    };

    if !structure.has_entry {
        warn!(entry = %layout.entry, "entry file is missing");
    }
    debug!(
        has_entry = structure.has_entry,
        has_script = structure.has_script,
        has_style = structure.has_style,
        "probed project structure"
    );

    ProjectModel {
        root: root.to_path_buf(),
        layout: layout.clone(),
        structure,
    }
}
