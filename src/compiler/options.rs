use serde::Deserialize;
use std::collections::BTreeMap;

/// What the compiler does when a declaration fails to compile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// The first failure aborts the whole pass.
    #[default]
    Abort,
    /// Failed declarations are left out and reported, the rest is still generated.
    SkipDeclaration,
}

/// Settings for one compile pass.
///
/// Usually assembled through [`CompilerBuilder`](super::CompilerBuilder), but can
/// also be loaded from JSON:
///
/// ```rust
/// use blockflow::compiler::{CompileOptions, FailurePolicy};
///
/// let options: CompileOptions = serde_json::from_str(
///     r#"{ "entry_function": "Demo.app.main", "failure_policy": "skip_declaration" }"#,
/// ).unwrap();
/// assert_eq!(options.failure_policy, FailurePolicy::SkipDeclaration);
/// assert!(options.include_comments);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Full name of the function that receives a `main` bootstrap.
    pub entry_function: Option<String>,
    /// Values passed to the entry function, keyed by parameter name.
    pub parameters: BTreeMap<String, String>,
    pub include_comments: bool,
    pub failure_policy: FailurePolicy,
    /// Compile declarations on the rayon thread pool.
    pub parallel: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            entry_function: None,
            parameters: BTreeMap::new(),
            include_comments: true,
            failure_policy: FailurePolicy::Abort,
            parallel: false,
        }
    }
}
