use crate::compiler::GeneratedProject;
use crate::error::EmitError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writes a [`GeneratedProject`] below an output root directory.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    root: PathBuf,
    clean: bool,
}

fn io_error(path: &Path, error: std::io::Error) -> EmitError {
    EmitError::Io {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}

impl OutputWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            clean: false,
        }
    }

    /// Deletes an existing project directory before writing.
    pub fn clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Creates every directory and writes every file, returning the written file paths.
    pub fn write(&self, project: &GeneratedProject) -> Result<Vec<PathBuf>, EmitError> {
        let project_dir = self.root.join(&project.name);
        if self.clean && project_dir.exists() {
            debug!(path = %project_dir.display(), "removing previous output");
            fs::remove_dir_all(&project_dir).map_err(|e| io_error(&project_dir, e))?;
        }

        for directory in &project.directories {
            let path = self.root.join(directory);
            fs::create_dir_all(&path).map_err(|e| io_error(&path, e))?;
        }

        let mut written = Vec::with_capacity(project.files.len());
        for generated in &project.files {
            let path = self.root.join(&generated.path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
            }
            let mut file = fs::File::create(&path).map_err(|e| io_error(&path, e))?;
            file.write_all(generated.contents.as_bytes())
                .map_err(|e| io_error(&path, e))?;
            written.push(path);
        }

        info!(
            root = %self.root.display(),
            files = written.len(),
            "wrote generated project"
        );
        Ok(written)
    }
}
