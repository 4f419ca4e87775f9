use super::definition::Item;
use crate::error::ProjectConversionError;

/// A trait for custom data models that can be converted into a `blockflow` project tree.
///
/// The compiler only ever sees the canonical [`Item`] tree. Implementing this trait on
/// your own structs lets you feed it projects stored in any format. The IDE's JSON
/// format is supported out of the box through [`ProjectFile`](super::ProjectFile).
///
/// # Example
///
/// ```rust,no_run
/// use blockflow::prelude::*;
/// use blockflow::error::ProjectConversionError;
/// use uuid::Uuid;
///
/// struct MyScript { name: String, lines: Vec<String> }
///
/// impl IntoProject for MyScript {
///     fn into_project(self) -> std::result::Result<Item, ProjectConversionError> {
///         if self.lines.is_empty() {
///             return Err(ProjectConversionError::ValidationError(
///                 "script has no lines".to_string(),
///             ));
///         }
///         // Build packages, functions and their blocks from `self.lines` here.
///         Ok(Item::project(&self.name, Uuid::nil()))
///     }
/// }
/// ```
pub trait IntoProject {
    /// Consumes the object and converts it into a project tree rooted at a PROJECT item.
    fn into_project(self) -> Result<Item, ProjectConversionError>;
}

impl IntoProject for Item {
    fn into_project(self) -> Result<Item, ProjectConversionError> {
        Ok(self)
    }
}
