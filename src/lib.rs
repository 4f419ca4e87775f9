//! # blockflow - Flowchart to Java Compiler
//!
//! **blockflow** turns flowchart programs into Java source code. A project is a tree
//! of packages, classes, functions, variables and parameters, and every function owns
//! a graph of typed blocks (START, END, DECISION, ASSIGNMENT, CALL, INPUT, OUTPUT).
//! The compiler walks each graph from its START block and emits structured,
//! deterministic Java: one `.java` file per class, package-level function and
//! package-level variable, laid out in directories that mirror the packages.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Project**: Read the IDE's JSON project file with [`project::ProjectFile`],
//!     or implement [`project::IntoProject`] for your own format.
//! 2.  **Compile**: Configure a [`compiler::Compiler`] through `Compiler::builder` and call
//!     `compile()`. The result is an in-memory [`compiler::GeneratedProject`].
//! 3.  **Write**: Hand the generated project to an [`output::OutputWriter`], or use
//!     `Compiler::compile_to` for both steps at once.
//! 4.  **Build (optional)**: With a JDK installed, [`javac::Javac`] compiles the
//!     written entry class and every generated class it reaches.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blockflow::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let project = ProjectFile::from_file("demos/hello.json")?.into_project()?;
//!
//!     let compiler = Compiler::builder(project)
//!         .entry_function("Hello.app.greet")
//!         .parameter("name", "World")
//!         .build();
//!
//!     let generated = compiler.compile()?;
//!     for file in &generated.files {
//!         println!("{}", file.path.display());
//!     }
//!
//!     OutputWriter::new("out").clean(true).write(&generated)?;
//!     Ok(())
//! }
//! ```

pub mod ast;
pub mod compiler;
pub mod error;
pub mod index;
pub mod javac;
pub mod output;
pub mod prelude;
pub mod project;
