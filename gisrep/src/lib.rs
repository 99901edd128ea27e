//! # Gisrep
//!
//! A library for publishing reports of issues from GitHub and GitLab.
//!
//! ## Features
//!
//! - **Issue Trackers**: Query the GitHub and GitLab issue search APIs
//! - **Template Engine**: Liquid-based report rendering with built-in templates
//! - **Output Sinks**: Publish reports to stdout, the clipboard, or a file
//! - **Credential Storage**: Usernames in a TOML config file, secrets in the
//!   platform keyring
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gisrep::{GithubReporter, IssueQuery, TemplateLibrary};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! // Load the built-in templates
//! let library = TemplateLibrary::builtin()?;
//! let template = library.get("simple-report.md")?;
//!
//! // Query GitHub anonymously and render a report
//! let reporter = GithubReporter::anonymous()?;
//! let query = IssueQuery::new("repo:rust-lang/rust state:closed label:bug");
//! let report = gisrep::generate_report(&reporter, &query, template).await?;
//!
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Config file management
pub mod config;

/// Credential storage backed by the platform keyring
pub mod credentials;

/// Issue data model and query filters
pub mod issue;

/// Output sinks for publishing reports
pub mod outputs;

/// Tag registry for locating implementations by name
pub mod registry;

/// Issue tracker clients and report generation
pub mod reporter;

/// Template engine and rendering
pub mod template;

/// Template library and loading
pub mod templates;

/// GitHub issue search client
pub mod github;

/// GitLab issue listing client
pub mod gitlab;

// Re-export core types
pub use config::Config;
pub use credentials::{CredentialStore, Credentials};
pub use github::GithubReporter;
pub use gitlab::GitlabReporter;
pub use issue::{Issue, IssueQuery};
pub use outputs::{Output, OutputKind, OutputOptions, OutputRegistry};
pub use registry::Registry;
pub use reporter::{generate_report, Reporter};
pub use template::Template;
pub use templates::TemplateLibrary;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod error;
pub use error::{GisrepError, Result};
