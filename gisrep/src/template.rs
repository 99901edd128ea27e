//! Template engine and rendering functionality

use crate::{GisrepError, Issue, Result};
use liquid::Parser;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// A named report template backed by a Liquid document
pub struct Template {
    name: String,
    description: Option<String>,
    source: Option<PathBuf>,
    parser: Parser,
    template_str: String,
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("source", &self.source)
            .field("template_str", &self.template_str)
            .finish()
    }
}

impl Template {
    /// Create a new template from a string
    ///
    /// The template body is parsed immediately so a malformed template is
    /// rejected before any issues are fetched.
    pub fn new(name: impl Into<String>, template_str: &str) -> Result<Self> {
        let parser = default_parser();
        parser
            .parse(template_str)
            .map_err(|e| GisrepError::Template(e.to_string()))?;

        Ok(Self {
            name: name.into(),
            description: None,
            source: None,
            parser,
            template_str: template_str.to_string(),
        })
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the source file path
    pub fn with_source(mut self, source: PathBuf) -> Self {
        self.source = Some(source);
        self
    }

    /// Template name, used as its registry tag
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description from the template's front matter
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Source file path, if the template was loaded from disk
    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }

    /// Get the raw template string
    pub fn raw(&self) -> &str {
        &self.template_str
    }

    /// Render the template over a list of issues
    ///
    /// Templates see two globals: `issues`, the records themselves, and
    /// `all_labels`, the sorted set of label names across the result set.
    pub fn render(&self, issues: &[Issue]) -> Result<String> {
        let template = self
            .parser
            .parse(&self.template_str)
            .map_err(|e| GisrepError::Template(e.to_string()))?;

        let all_labels: BTreeSet<&str> = issues
            .iter()
            .flat_map(|issue| issue.labels.iter().map(String::as_str))
            .collect();

        let mut globals = liquid::Object::new();
        globals.insert(
            "issues".to_string().into(),
            json_to_liquid_value(&serde_json::to_value(issues)?),
        );
        globals.insert(
            "all_labels".to_string().into(),
            json_to_liquid_value(&serde_json::to_value(&all_labels)?),
        );

        template
            .render(&globals)
            .map_err(|e| GisrepError::Template(e.to_string()))
    }
}

/// Convert a serde_json value into the equivalent liquid value
fn json_to_liquid_value(value: &serde_json::Value) -> liquid::model::Value {
    use serde_json::Value;

    match value {
        Value::String(s) => liquid::model::Value::scalar(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                liquid::model::Value::scalar(i)
            } else if let Some(f) = n.as_f64() {
                liquid::model::Value::scalar(f)
            } else {
                liquid::model::Value::scalar(n.to_string())
            }
        }
        Value::Bool(b) => liquid::model::Value::scalar(*b),
        Value::Null => liquid::model::Value::Nil,
        Value::Array(arr) => {
            let liquid_array: Vec<liquid::model::Value> =
                arr.iter().map(json_to_liquid_value).collect();
            liquid::model::Value::Array(liquid_array)
        }
        Value::Object(obj) => {
            let mut liquid_object = liquid::Object::new();
            for (key, value) in obj {
                liquid_object.insert(key.clone().into(), json_to_liquid_value(value));
            }
            liquid::model::Value::Object(liquid_object)
        }
    }
}

/// Liquid parser with the stdlib tags and filters
fn default_parser() -> Parser {
    liquid::ParserBuilder::with_stdlib()
        .build()
        .expect("Failed to build Liquid parser")
}
