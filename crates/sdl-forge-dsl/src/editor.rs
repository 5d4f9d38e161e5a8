//! Editing session: a schema, its SDL text and a change sink kept in step.
//!
//! Every successful edit or import re-prints the schema and hands
//! `(schema, sdl)` to the sink. A failed edit changes nothing and emits
//! nothing; that includes an edit whose result cannot be printed, which is
//! rolled back.

use sdl_forge_core::error::SchemaError;
use sdl_forge_core::types::Schema;
use sdl_forge_core::{EditOutcome, SchemaEdit};

use crate::error::EditorError;
use crate::parser::parse;
use crate::printer::{print_with, PrintOptions};

/// Receives the schema and its SDL after every successful change.
pub trait ChangeSink {
    fn emit(&mut self, schema: &Schema, sdl: &str);
}

impl<F> ChangeSink for F
where
    F: FnMut(&Schema, &str),
{
    fn emit(&mut self, schema: &Schema, sdl: &str) {
        self(schema, sdl)
    }
}

/// One recorded emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub schema: Schema,
    pub sdl: String,
}

impl ChangeSink for Vec<Change> {
    fn emit(&mut self, schema: &Schema, sdl: &str) {
        self.push(Change {
            schema: schema.clone(),
            sdl: sdl.to_string(),
        });
    }
}

/// Discards every change.
impl ChangeSink for () {
    fn emit(&mut self, _schema: &Schema, _sdl: &str) {}
}

#[derive(Debug)]
pub struct Editor<S: ChangeSink = ()> {
    schema: Schema,
    sdl: String,
    sink: S,
    options: PrintOptions,
}

impl<S: ChangeSink> Editor<S> {
    /// Starts from an empty schema.
    pub fn new(sink: S) -> Self {
        Self {
            schema: Schema::new(),
            sdl: String::new(),
            sink,
            options: PrintOptions::default(),
        }
    }

    /// Starts from the host's initial SDL. Nothing is emitted.
    pub fn from_sdl(text: &str, sink: S) -> Result<Self, EditorError> {
        Self::from_sdl_with(text, sink, PrintOptions::default())
    }

    pub fn from_sdl_with(text: &str, sink: S, options: PrintOptions) -> Result<Self, EditorError> {
        let schema = parse(text)?;
        let sdl = print_with(&schema, &options)?;
        Ok(Self {
            schema,
            sdl,
            sink,
            options,
        })
    }

    /// Replaces the schema with parsed `text` and emits.
    ///
    /// On a syntax error the current schema stays in place.
    pub fn import(&mut self, text: &str) -> Result<(), EditorError> {
        let schema = parse(text)?;
        let sdl = print_with(&schema, &self.options)?;
        self.schema = schema;
        self.sdl = sdl;
        tracing::debug!(types = self.schema.len(), "imported SDL");
        self.sink.emit(&self.schema, &self.sdl);
        Ok(())
    }

    /// Applies one edit request, re-prints and emits.
    pub fn apply(&mut self, edit: SchemaEdit) -> Result<EditOutcome, EditorError> {
        self.edit(|schema| schema.apply(edit))
    }

    /// Runs `f` against the schema with the same print, emit and rollback
    /// handling as [`Editor::apply`]. If `f` fails, whatever it already
    /// changed is undone.
    pub fn edit<T, F>(&mut self, f: F) -> Result<T, EditorError>
    where
        F: FnOnce(&mut Schema) -> Result<T, SchemaError>,
    {
        let previous = self.schema.clone();
        let value = match f(&mut self.schema) {
            Ok(value) => value,
            Err(e) => {
                self.schema = previous;
                return Err(e.into());
            }
        };
        match print_with(&self.schema, &self.options) {
            Ok(sdl) => {
                self.sdl = sdl;
                self.sink.emit(&self.schema, &self.sdl);
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(error = %e, "edit produced unprintable schema; rolled back");
                self.schema = previous;
                Err(e.into())
            }
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The canonical SDL of the current schema.
    pub fn sdl(&self) -> &str {
        &self.sdl
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_parts(self) -> (Schema, String, S) {
        (self.schema, self.sdl, self.sink)
    }
}
