//! Template library and loading
//!
//! Built-in templates ship embedded in the binary. User templates can be
//! loaded from an explicit file path or pulled in from a directory of
//! `.liquid` files. Template files may start with a YAML front matter block
//! carrying a one-line description:
//!
//! ```text
//! ---
//! description: One markdown bullet per issue
//! ---
//! {% for issue in issues %}...{% endfor %}
//! ```

use crate::{GisrepError, Registry, Result, Template};
use rust_embed::RustEmbed;
use serde::Deserialize;
use std::path::Path;

/// File extension for template files
pub const TEMPLATE_EXTENSION: &str = "liquid";

#[derive(RustEmbed)]
#[folder = "templates/"]
struct BuiltinTemplates;

#[derive(Debug, Deserialize)]
struct FrontMatter {
    description: Option<String>,
}

/// A collection of report templates, looked up by tag
pub struct TemplateLibrary {
    registry: Registry<Template>,
}

impl TemplateLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Create a library holding the built-in templates
    pub fn builtin() -> Result<Self> {
        let mut library = Self::new();

        for file in BuiltinTemplates::iter() {
            let embedded = BuiltinTemplates::get(&file).ok_or_else(|| {
                GisrepError::Template(format!("embedded template missing: {}", file))
            })?;
            let content = std::str::from_utf8(&embedded.data)
                .map_err(|e| GisrepError::Template(format!("{}: {}", file, e)))?;

            let name = template_name(&file);
            library.add(parse_template(name, content)?)?;
        }

        Ok(library)
    }

    /// Add a single template
    pub fn add(&mut self, template: Template) -> Result<()> {
        self.registry.register(template.name().to_string(), template)
    }

    /// Add all `.liquid` files found under a directory
    ///
    /// Returns the number of templates loaded.
    pub fn add_directory(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let mut count = 0;

        for entry in walkdir::WalkDir::new(path)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_template_file(path) {
                self.add(load_file(path)?)?;
                count += 1;
            }
        }

        Ok(count)
    }

    /// Get a template by tag
    pub fn get(&self, tag: &str) -> Result<&Template> {
        self.registry
            .get(tag)
            .ok_or_else(|| GisrepError::TemplateNotFound(tag.to_string()))
    }

    /// List all templates in tag order
    pub fn list(&self) -> Vec<&Template> {
        self.registry.iter().map(|(_, template)| template).collect()
    }

    /// Get all template tags, sorted
    pub fn tags(&self) -> Vec<String> {
        self.registry.tags()
    }
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a single template from a file path
pub fn load_file(path: impl AsRef<Path>) -> Result<Template> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| GisrepError::Template(format!("invalid file name: {}", path.display())))?;

    let template = parse_template(template_name(file_name), &content)?;
    Ok(template.with_source(path.to_path_buf()))
}

/// Parse template content, splitting off any front matter block
fn parse_template(name: impl Into<String>, content: &str) -> Result<Template> {
    let (front_matter, body) = split_front_matter(content)?;

    let mut template = Template::new(name, body)?;
    if let Some(front_matter) = front_matter {
        if let Some(description) = front_matter.description {
            template = template.with_description(description);
        }
    }

    Ok(template)
}

fn split_front_matter(content: &str) -> Result<(Option<FrontMatter>, &str)> {
    if content.starts_with("---\n") {
        let parts: Vec<&str> = content.splitn(3, "---\n").collect();
        if parts.len() >= 3 {
            let front_matter: FrontMatter = serde_yaml::from_str(parts[1])?;
            return Ok((Some(front_matter), parts[2].trim_start()));
        }
    }

    Ok((None, content))
}

/// Derive a template tag from its file name, e.g. `simple-report.md.liquid`
/// becomes `simple-report.md`
fn template_name(file_name: &str) -> &str {
    file_name
        .strip_suffix(".liquid")
        .unwrap_or(file_name)
}

fn is_template_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(TEMPLATE_EXTENSION))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Issue;

    fn sample_issues() -> Vec<Issue> {
        vec![
            Issue::new(1, "Issue 1", "https://example.com/1")
                .with_labels(vec!["bug".to_string()]),
            Issue::new(2, "Issue 2", "https://example.com/2")
                .with_labels(vec!["enhancement".to_string()]),
        ]
    }

    #[test]
    fn test_builtin_library_contents() {
        let library = TemplateLibrary::builtin().unwrap();
        assert_eq!(
            library.tags(),
            vec!["list-by-labels.html", "release-notes.md", "simple-report.md"]
        );
    }

    #[test]
    fn test_builtin_templates_carry_descriptions() {
        let library = TemplateLibrary::builtin().unwrap();
        for template in library.list() {
            assert!(
                template.description().is_some(),
                "built-in template '{}' has no description",
                template.name()
            );
        }
    }

    #[test]
    fn test_unknown_tag_is_reportable() {
        let library = TemplateLibrary::builtin().unwrap();
        let err = library.get("nonexistent").unwrap_err();
        assert!(matches!(err, GisrepError::TemplateNotFound(_)));
        assert!(err.to_string().contains("nonexistent"));
    }

    #[test]
    fn test_simple_report_renders_fixed_string() {
        let library = TemplateLibrary::builtin().unwrap();
        let template = library.get("simple-report.md").unwrap();

        let report = template.render(&sample_issues()).unwrap();
        assert_eq!(report, "- Issue 1 [#1]\n- Issue 2 [#2]\n");
    }

    #[test]
    fn test_release_notes_groups_by_label() {
        let library = TemplateLibrary::builtin().unwrap();
        let template = library.get("release-notes.md").unwrap();

        let report = template.render(&sample_issues()).unwrap();
        assert!(report.contains("## Enhancements"));
        assert!(report.contains("## Fixes"));
        assert!(report.contains("- Issue 2 (#2)"));
        assert!(report.contains("- Issue 1 (#1)"));
        // The bug does not show up under enhancements
        let enhancements = report.split("## Fixes").next().unwrap();
        assert!(!enhancements.contains("Issue 1"));
    }

    #[test]
    fn test_list_by_labels_links_issues() {
        let library = TemplateLibrary::builtin().unwrap();
        let template = library.get("list-by-labels.html").unwrap();

        let report = template.render(&sample_issues()).unwrap();
        assert!(report.contains("<li>bug"));
        assert!(report.contains("<li>enhancement"));
        assert!(report.contains(r#"<a href="https://example.com/1">Issue 1</a>"#));
    }

    #[test]
    fn test_load_file_strips_front_matter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.md.liquid");
        std::fs::write(
            &path,
            "---\ndescription: Custom report\n---\n{% for issue in issues %}{{ issue.number }}{% endfor %}",
        )
        .unwrap();

        let template = load_file(&path).unwrap();
        assert_eq!(template.name(), "custom.md");
        assert_eq!(template.description(), Some("Custom report"));
        assert_eq!(template.render(&sample_issues()).unwrap(), "12");
    }

    #[test]
    fn test_load_file_without_front_matter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.liquid");
        std::fs::write(&path, "{{ issues | size }}").unwrap();

        let template = load_file(&path).unwrap();
        assert_eq!(template.name(), "plain");
        assert!(template.description().is_none());
        assert_eq!(template.render(&sample_issues()).unwrap(), "2");
    }

    #[test]
    fn test_add_directory_loads_liquid_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("one.liquid"), "one").unwrap();
        std::fs::write(dir.path().join("two.md.liquid"), "two").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "skip me").unwrap();

        let mut library = TemplateLibrary::new();
        let count = library.add_directory(dir.path()).unwrap();

        assert_eq!(count, 2);
        assert_eq!(library.tags(), vec!["one", "two.md"]);
    }

    #[test]
    fn test_duplicate_template_tag_is_an_error() {
        let mut library = TemplateLibrary::new();
        library.add(Template::new("report", "a").unwrap()).unwrap();

        let err = library
            .add(Template::new("report", "b").unwrap())
            .unwrap_err();
        assert!(err.to_string().contains("already registered"));
    }
}
