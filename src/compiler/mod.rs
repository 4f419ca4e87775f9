use crate::error::{CompileError, EmitError};
use crate::index::ResolutionIndex;
use crate::output::OutputWriter;
use crate::project::{Item, ItemKind};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

mod block;
mod declaration;
mod entry;
mod expression;
pub mod operators;
mod options;
pub mod types;

pub use block::{CompiledBody, compile_function_body};
pub use declaration::{
    COMMENTS_FILE, DeclarationEmitter, DeclarationUnit, PROJECT_MARKER, is_java_identifier,
};
pub use entry::bootstrap;
pub use expression::ExpressionCompiler;
pub use options::{CompileOptions, FailurePolicy};

/// One generated file, with its path relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// The in-memory result of a compile pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedProject {
    /// Name of the project, also the top-level output directory.
    pub name: String,
    /// Sorted, relative to the output root.
    pub directories: Vec<PathBuf>,
    /// Sorted by path.
    pub files: Vec<GeneratedFile>,
    /// Declarations left out under `FailurePolicy::SkipDeclaration`.
    pub skipped: Vec<CompileError>,
}

impl GeneratedProject {
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&GeneratedFile> {
        let path = path.as_ref();
        self.files.iter().find(|file| file.path == path)
    }

    /// The source file generated for the declaration with the given full name.
    pub fn declaration(&self, full_name: &str) -> Option<&GeneratedFile> {
        let mut path: PathBuf = full_name.split('.').collect();
        path.set_extension("java");
        self.file(path)
    }
}

pub struct Compiler {
    project: Item,
    options: CompileOptions,
}

pub struct CompilerBuilder {
    project: Item,
    options: CompileOptions,
}

impl CompilerBuilder {
    pub fn new(project: Item) -> Self {
        Self {
            project,
            options: CompileOptions::default(),
        }
    }

    /// Replaces all options at once, e.g. with options loaded from JSON.
    pub fn options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Marks the function (by full name) that receives a `main` bootstrap.
    pub fn entry_function(mut self, full_name: &str) -> Self {
        self.options.entry_function = Some(full_name.to_string());
        self
    }

    pub fn parameter(mut self, name: &str, value: &str) -> Self {
        self.options
            .parameters
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn parameters<I, K, V>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.options.parameters.extend(
            parameters
                .into_iter()
                .map(|(name, value)| (name.into(), value.into())),
        );
        self
    }

    pub fn ignore_comments(mut self) -> Self {
        self.options.include_comments = false;
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.options.failure_policy = policy;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.options.parallel = parallel;
        self
    }

    pub fn build(self) -> Compiler {
        Compiler {
            project: self.project,
            options: self.options,
        }
    }
}

impl Compiler {
    pub fn builder(project: Item) -> CompilerBuilder {
        CompilerBuilder::new(project)
    }

    pub fn project(&self) -> &Item {
        &self.project
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compiles the whole project into memory. Nothing is written to disk.
    pub fn compile(&self) -> Result<GeneratedProject, CompileError> {
        let index = ResolutionIndex::build(&self.project)?;
        self.check_entry(&index)?;

        let layout = declaration::plan(&self.project, self.options.include_comments)?;
        info!(
            project = %self.project.name,
            declarations = layout.units.len(),
            parallel = self.options.parallel,
            "compiling project"
        );

        let emitter = DeclarationEmitter::new(&index, &self.options);
        let emit = |unit: &DeclarationUnit<'_>| {
            emitter
                .emit(unit)
                .map_err(|e| e.in_declaration(&unit.full_name))
        };
        let results: Vec<Result<GeneratedFile, CompileError>> = if self.options.parallel {
            layout.units.par_iter().map(emit).collect()
        } else {
            layout.units.iter().map(emit).collect()
        };

        let mut files = layout.files;
        let mut skipped = Vec::new();
        for result in results {
            match result {
                Ok(file) => files.push(file),
                Err(error) => match self.options.failure_policy {
                    FailurePolicy::Abort => return Err(error),
                    FailurePolicy::SkipDeclaration => {
                        warn!(%error, "skipping declaration");
                        skipped.push(error);
                    }
                },
            }
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        let mut directories = layout.directories;
        directories.sort();
        directories.dedup();

        info!(
            files = files.len(),
            skipped = skipped.len(),
            "generated project"
        );
        Ok(GeneratedProject {
            name: self.project.name.clone(),
            directories,
            files,
            skipped,
        })
    }

    /// Compiles the project and writes it under `output_root`.
    pub fn compile_to(
        &self,
        output_root: impl AsRef<Path>,
        clean: bool,
    ) -> Result<Vec<PathBuf>, EmitError> {
        let project = self.compile()?;
        OutputWriter::new(output_root.as_ref())
            .clean(clean)
            .write(&project)
    }

    /// The entry function must be a package-level function whose parameters match
    /// the supplied values. Checked up front so a bad invocation never gets skipped.
    fn check_entry(&self, index: &ResolutionIndex<'_>) -> Result<(), CompileError> {
        let Some(name) = self.options.entry_function.as_deref() else {
            return Ok(());
        };
        let entry = index
            .item(name)
            .filter(|entry| entry.kind() == ItemKind::Function)
            .ok_or_else(|| CompileError::EntryFunctionNotFound(name.to_string()))?;
        if !entry.is_static() {
            return Err(CompileError::InvalidItem {
                name: name.to_string(),
                message: "the entry function must be declared in a package".to_string(),
            });
        }
        bootstrap(entry.item, name, &self.options.parameters).map(|_| ())
    }
}
