use blockflow::prelude::*;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Compiles a flowchart project file into Java sources
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the project JSON file
    #[arg(short, long)]
    path: PathBuf,

    /// Full name of the function that receives the `main` bootstrap, e.g. `Demo.app.main`
    #[arg(short, long)]
    function: String,

    /// Value for a parameter of the entry function, as `name=value` (repeatable)
    #[arg(short = 'a', long = "parameter", value_parser = parse_parameter)]
    parameters: Vec<(String, String)>,

    /// Output directory. Defaults to the directory of the project file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not turn item comments into Javadoc and comment files
    #[arg(long)]
    ignore_comments: bool,

    /// Leave out declarations that fail to compile instead of aborting
    #[arg(long)]
    skip_failed: bool,

    /// Compile declarations in parallel
    #[arg(long)]
    parallel: bool,

    /// Delete the previously generated project directory first
    #[arg(long)]
    clean: bool,

    /// Run javac (from JAVA_HOME or PATH) on the entry class after writing
    #[arg(long)]
    compile: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

/// The stages of a run. A failure exits with the stage's number.
#[derive(Debug, Clone, Copy)]
enum Stage {
    ParseArguments = 1,
    LoadProject = 2,
    GenerateCode = 3,
    CompileCode = 4,
}

impl Stage {
    fn label(self) -> &'static str {
        match self {
            Stage::ParseArguments => "COMMANDLINE PARSING",
            Stage::LoadProject => "PROJECT PARSING",
            Stage::GenerateCode => "CODE GENERATION",
            Stage::CompileCode => "CODE COMPILATION",
        }
    }

    fn complete(self) {
        println!("[STAGE {}: {} COMPLETE]", self as i32, self.label());
    }
}

fn parse_parameter(raw: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("parameter name missing in '{}'", raw));
    }
    Ok((name.to_string(), value.to_string()))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        let code = if e.use_stderr() {
            Stage::ParseArguments as i32
        } else {
            0
        };
        process::exit(code);
    });
    init_tracing(cli.verbose);

    let mut seen = std::collections::BTreeSet::new();
    for (name, _) in &cli.parameters {
        if !seen.insert(name.as_str()) {
            exit_with_error(
                Stage::ParseArguments,
                &format!("Parameter '{}' given more than once", name),
            );
        }
    }
    Stage::ParseArguments.complete();

    let total_start = Instant::now();

    // --- 2. Load ---
    let load_start = Instant::now();
    let project = ProjectFile::from_file(&cli.path)
        .map_err(|e| e.to_string())
        .and_then(|file| file.into_project().map_err(|e| e.to_string()))
        .unwrap_or_else(|e| exit_with_error(Stage::LoadProject, &e));
    let load_duration = load_start.elapsed();
    Stage::LoadProject.complete();

    // --- 3. Generate and write ---
    let compile_start = Instant::now();
    let mut builder = Compiler::builder(project)
        .entry_function(&cli.function)
        .parameters(cli.parameters)
        .parallel(cli.parallel);
    if cli.ignore_comments {
        builder = builder.ignore_comments();
    }
    if cli.skip_failed {
        builder = builder.failure_policy(FailurePolicy::SkipDeclaration);
    }
    let generated = builder
        .build()
        .compile()
        .unwrap_or_else(|e| exit_with_error(Stage::GenerateCode, &e.to_string()));
    let compile_duration = compile_start.elapsed();
    for error in &generated.skipped {
        eprintln!("Skipped: {}", error);
    }

    let write_start = Instant::now();
    let output_root = cli.output.unwrap_or_else(|| {
        cli.path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    });
    let written = OutputWriter::new(&output_root)
        .clean(cli.clean)
        .write(&generated)
        .unwrap_or_else(|e| exit_with_error(Stage::GenerateCode, &e.to_string()));
    let write_duration = write_start.elapsed();
    Stage::GenerateCode.complete();

    // --- 4. Compile (opt-in) ---
    let javac_duration = cli.compile.then(|| {
        let javac_start = Instant::now();
        let source = generated
            .declaration(&cli.function)
            .map(|file| output_root.join(&file.path))
            .unwrap_or_else(|| {
                exit_with_error(
                    Stage::CompileCode,
                    &format!("No source was generated for '{}'", cli.function),
                )
            });
        Javac::locate()
            .ok_or(ToolchainError::NotFound)
            .and_then(|javac| javac.compile(&output_root, &source))
            .unwrap_or_else(|e| exit_with_error(Stage::CompileCode, &e.to_string()));
        Stage::CompileCode.complete();
        javac_start.elapsed()
    });

    println!("\n--- Summary ---");
    println!("Project:          {}", generated.name);
    println!("Files written:    {}", written.len());
    println!("Skipped:          {}", generated.skipped.len());
    println!("Output:           {}", output_root.display());
    println!("Loading:          {:?}", load_duration);
    println!("Code generation:  {:?}", compile_duration);
    println!("Writing:          {:?}", write_duration);
    if let Some(duration) = javac_duration {
        println!("javac:            {:?}", duration);
    }
    println!("Total:            {:?}", total_start.elapsed());
}

fn exit_with_error(stage: Stage, message: &str) -> ! {
    println!("[STAGE {}: {} FAILED]", stage as i32, stage.label());
    eprintln!("\nError: {}", message);
    process::exit(stage as i32);
}
