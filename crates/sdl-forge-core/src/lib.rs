//! # sdl-forge-core
//!
//! In-memory model and edit engine for a GraphQL SDL subset made of object
//! types and enums.
//!
//! This crate provides:
//! - The schema model: [`Schema`], [`TypeDecl`], [`FieldDecl`], [`Directive`]
//! - Stable ids ([`TypeDeclId`], [`FieldId`]) that survive renames and moves
//! - Edit operations as [`Schema`] methods and as the serializable [`SchemaEdit`]
//!
//! Parsing and printing live in `sdl-forge-dsl`.
//!
//! # Example
//!
//! ```
//! use sdl_forge_core::{EditTarget, Name, Schema, TypeKind};
//!
//! let mut schema = Schema::new();
//! let user = schema.add_type(TypeKind::Object, &Name::new("User").unwrap());
//! let email = schema.add_field(&user, &Name::new("email").unwrap()).unwrap();
//! schema
//!     .set_access_scope(&EditTarget::of_field(&user, &email), "admin")
//!     .unwrap();
//!
//! let (_, field) = schema.field(&email).unwrap();
//! assert_eq!(field.access_scope(), Some("admin"));
//! ```

pub mod edit;
pub mod error;
pub mod types;

pub use edit::{EditOutcome, EditTarget, SchemaEdit};
pub use error::SchemaError;
pub use types::{
    Directive, FieldDecl, FieldId, Name, Schema, TypeBody, TypeDecl, TypeDeclId, TypeKind,
    WellKnownDirective,
};
