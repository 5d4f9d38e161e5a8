mod directive;
mod field_decl;
mod id;
mod name;
mod schema;
mod type_decl;

pub use directive::{access_scope, directive_name, Directive, WellKnownDirective};
pub use field_decl::FieldDecl;
pub use id::{FieldId, FieldTarget, Id, IdTarget, TypeDeclId, TypeDeclTarget};
pub use name::{is_identifier, Name};
pub use schema::{Schema, BUILTIN_SCALARS};
pub use type_decl::{TypeBody, TypeDecl, TypeKind};
