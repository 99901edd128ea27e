use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum Tracker {
    Github,
    Gitlab,
}

#[derive(Parser, Debug)]
#[command(name = "gisrep")]
#[command(version)]
#[command(about = "Tool for publishing reports of GitHub and GitLab issues")]
#[command(long_about = "
gisrep fetches issues from the GitHub or GitLab REST API, formats them
through a selectable template, and writes the report to stdout, the
clipboard, or a file.

Example usage:
  gisrep init                                   # Store credentials for GitHub
  gisrep report \"repo:octo/widgets is:closed\"   # Publish a report
  gisrep templates list                         # List available templates
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialise the tool to access GitHub
    #[command(long_about = "
Prompts for a GitHub username and password (or personal access token),
stores the secret in the platform keyring, and writes ~/.gisreprc with the
non-secret identifiers. The secret itself never lands in the config file.

Example:
  gisrep init
  gisrep init --force    # Replace an existing config file
")]
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
    /// Publish a report of issues matching a search query
    #[command(long_about = "
Fetches the issues matching QUERY, renders them through a template, and
publishes the result to an output sink.

For GitHub the query uses the issue search syntax
(help.github.com/articles/searching-issues-and-pull-requests/) and is
passed to the API verbatim. Stored credentials are used when ~/.gisreprc
exists; otherwise the query runs anonymously. For GitLab, pass --token and
optionally --url, and scope with --project.

Examples:
  gisrep report \"repo:octo/widgets is:closed\"
  gisrep report \"is:closed\" --template release-notes.md --milestone v1.0
  gisrep report \"widget\" --output file --output-file report.md
  gisrep report \"widget\" --tracker gitlab --project group/widgets --token TOKEN
")]
    Report(ReportArgs),
    /// Manage report templates
    Templates {
        #[command(subcommand)]
        subcommand: TemplatesSubcommand,
    },
    /// Manage output sinks
    Outputs {
        #[command(subcommand)]
        subcommand: OutputsSubcommand,
    },
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Issue search query, passed to the tracker verbatim
    pub query: String,

    /// Issue tracker to query
    #[arg(long, value_enum, default_value = "github")]
    pub tracker: Tracker,

    /// Tag of the template to format issues with
    #[arg(short, long, default_value = "simple-report.md")]
    pub template: String,

    /// Path to a template file to format issues with
    #[arg(short = 'u', long, conflicts_with = "template")]
    pub template_file: Option<PathBuf>,

    /// Output sink to publish the report to
    #[arg(short, long, default_value = "stdout")]
    pub output: String,

    /// Target path for the 'file' output
    #[arg(long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Milestone to filter issues by
    #[arg(long)]
    pub milestone: Option<String>,

    /// Label to filter issues by (repeatable)
    #[arg(long = "label", value_name = "LABEL")]
    pub labels: Vec<String>,

    /// Project to filter issues by, e.g. group/widgets
    #[arg(long)]
    pub project: Option<String>,

    /// GitLab personal access token
    #[arg(long)]
    pub token: Option<String>,

    /// GitLab instance URL
    #[arg(long, default_value = gisrep::gitlab::GITLAB_DEFAULT_URL)]
    pub url: String,
}

#[derive(Subcommand, Debug)]
pub enum TemplatesSubcommand {
    /// List the available templates
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Subcommand, Debug)]
pub enum OutputsSubcommand {
    /// List the available output sinks
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    #[allow(dead_code)]
    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }
}
