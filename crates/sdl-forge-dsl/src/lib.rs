//! # sdl-forge-dsl
//!
//! Text side of SDL Forge: parsing SDL into a [`Schema`], printing it back,
//! the directive text codec, and an [`Editor`] session that re-prints and
//! notifies a [`ChangeSink`] after every change.
//!
//! This crate provides:
//! - A logos lexer and a recursive descent parser with error recovery
//! - A printer producing canonical SDL
//! - Round-trip fidelity: `parse(print(schema))` is structurally equal to
//!   any schema built through the edit operations
//!
//! # Example
//!
//! ```
//! use sdl_forge_dsl::{parse, print};
//!
//! let source = r#"
//! type User @dataEntity(dataEntityVersionId: 'de-7') {
//!     id: ID!
//!     email: String @dpi_requiredScope(scope: "pii")
//!     roles: [Role!]!
//! }
//!
//! enum Role { ADMIN USER }
//! "#;
//!
//! let schema = parse(source).expect("parse failed");
//! assert_eq!(schema.len(), 2);
//! assert_eq!(schema.types()[0].fields()[1].access_scope(), Some("pii"));
//!
//! let sdl = print(&schema).expect("print failed");
//! assert!(sdl.starts_with("type User @dataEntity(dataEntityVersionId:\"de-7\") {"));
//! ```
//!
//! [`Schema`]: sdl_forge_core::Schema

pub mod directive;
pub mod editor;
pub mod error;
mod lexer;
pub mod parser;
pub mod printer;
pub mod token;

pub use editor::{Change, ChangeSink, Editor};
pub use error::{DslError, EditorError, ErrorKind, GenerationError, Span};
pub use parser::parse;
pub use printer::{print, print_with, PrintOptions};
