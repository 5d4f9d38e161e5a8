use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

use super::name::Name;

/// A metadata annotation on a type or field, e.g. `@dpi_requiredScope(scope:"admin")`.
///
/// Arguments are kept in key order; their insertion order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Directive {
    pub name: Name,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub arguments: BTreeMap<String, String>,
}

impl Directive {
    /// Creates a directive without arguments.
    pub fn new(name: Name) -> Self {
        Self {
            name,
            arguments: BTreeMap::new(),
        }
    }

    /// Creates a directive with the given arguments.
    pub fn with_arguments<K, V>(
        name: Name,
        arguments: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name,
            arguments: arguments
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Creates the bare `@deprecated` directive.
    pub fn deprecated() -> Self {
        Self::new(Name::from_static(DEPRECATED))
    }

    /// Returns the value of an argument.
    pub fn argument(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).map(String::as_str)
    }

    /// Returns the well-known family of this directive, if any.
    pub fn well_known(&self) -> Option<WellKnownDirective> {
        WellKnownDirective::from_name(self.name.as_str())
    }

    /// True for `@deprecated`.
    pub fn is_deprecated(&self) -> bool {
        self.name == DEPRECATED
    }
}

const DEPRECATED: &str = "deprecated";

/// Directive families whose arguments carry meaning to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WellKnownDirective {
    /// `@dpi_requiredScope(scope:"...")`: authorization requirement.
    AccessScope,
    /// `@standardizedAttribute(standardizedAttributeVersionId:"...")`.
    StandardizedAttribute,
    /// `@dataEntity(dataEntityVersionId:"...")`.
    DataEntity,
}

impl WellKnownDirective {
    pub const ALL: [WellKnownDirective; 3] = [
        Self::AccessScope,
        Self::StandardizedAttribute,
        Self::DataEntity,
    ];

    /// The directive name, without `@`.
    pub fn name(self) -> &'static str {
        match self {
            Self::AccessScope => "dpi_requiredScope",
            Self::StandardizedAttribute => "standardizedAttribute",
            Self::DataEntity => "dataEntity",
        }
    }

    /// The single argument this family carries.
    pub fn argument(self) -> &'static str {
        match self {
            Self::AccessScope => "scope",
            Self::StandardizedAttribute => "standardizedAttributeVersionId",
            Self::DataEntity => "dataEntityVersionId",
        }
    }

    /// Looks up a family by directive name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.name() == name)
    }

    /// True for the versioned-attribute families.
    pub fn is_versioned(self) -> bool {
        matches!(self, Self::StandardizedAttribute | Self::DataEntity)
    }

    /// Builds the directive carrying `value`.
    pub fn compose(self, value: impl Into<String>) -> Directive {
        let value: String = value.into();
        Directive::with_arguments(self.directive_name(), [(self.argument(), value)])
    }

    /// Extracts this family's argument from `directive`.
    ///
    /// Returns `None` if the directive belongs to another family or lacks the argument.
    pub fn value_of(self, directive: &Directive) -> Option<&str> {
        if directive.name != self.name() {
            return None;
        }
        directive.argument(self.argument())
    }

    /// The directive name as a validated `Name`.
    pub fn directive_name(self) -> Name {
        Name::from_static(self.name())
    }
}

impl std::fmt::Display for WellKnownDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.name())
    }
}

/// Finds the access scope among `directives`.
pub fn access_scope(directives: &[Directive]) -> Option<&str> {
    directives
        .iter()
        .find_map(|d| WellKnownDirective::AccessScope.value_of(d))
}

/// Validates a directive name given without its `@` sigil.
pub fn directive_name(s: &str) -> Result<Name, SchemaError> {
    Name::new(s.strip_prefix('@').unwrap_or(s))
}
