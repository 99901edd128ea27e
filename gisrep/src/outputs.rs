//! Output sinks for publishing reports
//!
//! A report goes to exactly one sink per invocation, selected by tag:
//! `stdout`, `clipboard`, or `file`.

use crate::{GisrepError, Registry, Result};
use std::path::PathBuf;

/// A sink that a rendered report can be published to
pub trait Output: std::fmt::Debug {
    /// Publish the report
    fn publish(&self, report: &str) -> Result<()>;
}

/// Options collected from the command line that sinks may need
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Target path for the `file` sink
    pub file: Option<PathBuf>,
}

/// A registered output sink: its tag, description, and constructor
pub struct OutputKind {
    tag: &'static str,
    description: &'static str,
    build: fn(&OutputOptions) -> Result<Box<dyn Output>>,
}

impl OutputKind {
    /// Tag used to select this sink
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// One-line description for listing commands
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Construct the sink from command-line options
    pub fn build(&self, options: &OutputOptions) -> Result<Box<dyn Output>> {
        (self.build)(options)
    }
}

/// Prints the report to stdout
#[derive(Debug)]
pub struct StdoutOutput;

impl Output for StdoutOutput {
    fn publish(&self, report: &str) -> Result<()> {
        println!("{}", report);
        Ok(())
    }
}

/// Copies the report to the system clipboard
#[derive(Debug)]
pub struct ClipboardOutput;

impl Output for ClipboardOutput {
    fn publish(&self, report: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| GisrepError::Output(format!("clipboard not available: {}", e)))?;
        clipboard
            .set_text(report)
            .map_err(|e| GisrepError::Output(format!("failed to copy to clipboard: {}", e)))
    }
}

/// Writes the report to a file
#[derive(Debug)]
pub struct FileOutput {
    path: PathBuf,
}

impl FileOutput {
    /// Create a file sink targeting the given path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Output for FileOutput {
    fn publish(&self, report: &str) -> Result<()> {
        std::fs::write(&self.path, report)?;
        Ok(())
    }
}

/// Registry of the available output sinks, built once at startup
pub struct OutputRegistry {
    registry: Registry<OutputKind>,
}

impl OutputRegistry {
    /// Create a registry holding the built-in sinks
    pub fn builtin() -> Result<Self> {
        let mut registry = Registry::new();

        for kind in [
            OutputKind {
                tag: "stdout",
                description: "Prints the report to stdout",
                build: |_| Ok(Box::new(StdoutOutput)),
            },
            OutputKind {
                tag: "clipboard",
                description: "Copies the report to the clipboard",
                build: |_| Ok(Box::new(ClipboardOutput)),
            },
            OutputKind {
                tag: "file",
                description: "Saves the report to a file",
                build: |options| {
                    let path = options.file.clone().ok_or_else(|| {
                        GisrepError::Config(
                            "the 'file' output requires --output-file".to_string(),
                        )
                    })?;
                    Ok(Box::new(FileOutput::new(path)))
                },
            },
        ] {
            registry.register(kind.tag, kind)?;
        }

        Ok(Self { registry })
    }

    /// Resolve a tag into a ready-to-use sink
    pub fn resolve(&self, tag: &str, options: &OutputOptions) -> Result<Box<dyn Output>> {
        let kind = self
            .registry
            .get(tag)
            .ok_or_else(|| GisrepError::OutputNotFound(tag.to_string()))?;
        kind.build(options)
    }

    /// List all registered sinks in tag order
    pub fn list(&self) -> Vec<&OutputKind> {
        self.registry.iter().map(|(_, kind)| kind).collect()
    }

    /// Get all sink tags, sorted
    pub fn tags(&self) -> Vec<String> {
        self.registry.tags()
    }
}
