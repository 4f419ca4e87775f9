//! Hands written sources to an installed JDK.
//!
//! Generation never needs a JDK. This module only exists for callers that want the
//! output compiled right away, like `blockflow-cli --compile`.
use crate::error::ToolchainError;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

const JAVAC: &str = if cfg!(windows) { "javac.exe" } else { "javac" };
const JAVA: &str = if cfg!(windows) { "java.exe" } else { "java" };

/// A `javac` executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Javac {
    path: PathBuf,
}

impl Javac {
    /// Uses the executable at `path` without checking that it exists.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Looks in `$JAVA_HOME/bin` first, then in every directory on `PATH`.
    pub fn locate() -> Option<Self> {
        let java_home = env::var_os("JAVA_HOME").map(|home| PathBuf::from(home).join("bin"));
        let path = env::var_os("PATH");
        let on_path = path
            .iter()
            .flat_map(|paths| env::split_paths(paths).collect::<Vec<_>>());
        Self::search(java_home.into_iter().chain(on_path))
    }

    /// The first of `directories` that contains a `javac` file.
    pub fn search(directories: impl IntoIterator<Item = PathBuf>) -> Option<Self> {
        let path = directories
            .into_iter()
            .map(|directory| directory.join(JAVAC))
            .find(|candidate| candidate.is_file())?;
        debug!(path = %path.display(), "found javac");
        Some(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `java` launcher installed next to this compiler.
    pub fn launcher(&self) -> PathBuf {
        self.path.with_file_name(JAVA)
    }

    /// Compiles `source` with `class_path` as the class path.
    ///
    /// Pointing the class path at the output root lets javac pick up every generated
    /// class the source refers to. Class files are written next to their sources.
    pub fn compile(&self, class_path: &Path, source: &Path) -> Result<(), ToolchainError> {
        debug!(javac = %self.path.display(), source = %source.display(), "running javac");
        let output = Command::new(&self.path)
            .arg("-encoding")
            .arg("UTF-8")
            .arg("-cp")
            .arg(class_path)
            .arg(source)
            .output()
            .map_err(|e| ToolchainError::Launch {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ToolchainError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }
        info!(source = %source.display(), "javac finished");
        Ok(())
    }
}
