//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the blockflow
//! crate, so applications can load, compile and write projects with a single import.
//!
//! # Example
//!
//! ```rust,no_run
//! use blockflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let project = ProjectFile::from_file("path/to/project.json")?.into_project()?;
//! let written = Compiler::builder(project)
//!     .entry_function("Demo.app.main")
//!     .build()
//!     .compile_to("path/to/output", false)?;
//! println!("Wrote {} files", written.len());
//! # Ok(())
//! # }
//! ```

// Compilation
pub use crate::compiler::{
    CompileOptions, Compiler, CompilerBuilder, FailurePolicy, GeneratedFile, GeneratedProject,
};
pub use crate::javac::Javac;
pub use crate::output::OutputWriter;

// Project model
pub use crate::project::{
    Block, BlockContent, BlockKind, Call, Connection, IntoProject, Item, ItemKind, ProjectFile,
    Side, Statement, StatementKind, ValueType,
};

// Error types
pub use crate::error::{
    CompileError, EmitError, ProjectConversionError, ProjectLoadError, ToolchainError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
