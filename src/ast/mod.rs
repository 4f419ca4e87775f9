//! Structured representation of the generated Java code.
//!
//! The compiler builds these nodes first and renders them to text in a separate
//! pass through their `Display` implementations.

pub mod declaration;
pub mod expression;
pub mod statement;
pub mod types;

pub use declaration::*;
pub use expression::*;
pub use statement::*;
pub use types::*;
