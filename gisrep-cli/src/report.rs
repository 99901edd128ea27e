//! Report command implementation

use crate::cli::{ReportArgs, Tracker};
use crate::error::{CliError, CliResult};
use crate::exit_codes::{EXIT_ERROR, EXIT_WARNING};

use gisrep::{
    generate_report, templates, Config, GisrepError, GithubReporter, GitlabReporter, IssueQuery,
    OutputOptions, OutputRegistry, Reporter, Template, TemplateLibrary,
};

/// Main entry point for the report command
///
/// Template and output are resolved before any network traffic so a
/// mistyped tag fails fast with a selection error.
pub async fn run_report_command(args: ReportArgs) -> CliResult<()> {
    let library = load_template_library().map_err(cli_error)?;

    let loaded;
    let template: &Template = match &args.template_file {
        Some(path) => {
            loaded = templates::load_file(path).map_err(cli_error)?;
            &loaded
        }
        None => library.get(&args.template).map_err(cli_error)?,
    };

    let outputs = OutputRegistry::builtin().map_err(cli_error)?;
    let options = OutputOptions {
        file: args.output_file.clone(),
    };
    let output = outputs.resolve(&args.output, &options).map_err(cli_error)?;

    let reporter: Box<dyn Reporter> = match args.tracker {
        Tracker::Github => Box::new(github_reporter().map_err(cli_error)?),
        Tracker::Gitlab => {
            Box::new(GitlabReporter::new(&args.url, args.token.clone()).map_err(cli_error)?)
        }
    };

    let query = build_query(&args);
    tracing::info!(tracker = reporter.name(), "fetching issues");
    let report = generate_report(reporter.as_ref(), &query, template)
        .await
        .map_err(cli_error)?;

    output.publish(&report).map_err(cli_error)?;
    Ok(())
}

/// Built-in templates plus any user templates under ~/.gisrep/templates
fn load_template_library() -> gisrep::Result<TemplateLibrary> {
    let mut library = TemplateLibrary::builtin()?;

    let user_dir = dirs::home_dir()
        .map(|home| home.join(".gisrep").join("templates"))
        .filter(|path| path.exists());

    if let Some(dir) = user_dir {
        let count = library.add_directory(&dir)?;
        tracing::debug!(count, dir = %dir.display(), "loaded user templates");
    }

    Ok(library)
}

/// Stored credentials when a config file exists, anonymous access otherwise
fn github_reporter() -> gisrep::Result<GithubReporter> {
    let path = Config::default_path()?;
    if path.exists() {
        let config = Config::load(&path)?;
        let credentials = config.credentials()?;
        tracing::debug!(username = %credentials.username, "using stored credentials");
        GithubReporter::new(credentials)
    } else {
        tracing::debug!("no config file found, querying anonymously");
        GithubReporter::anonymous()
    }
}

fn build_query(args: &ReportArgs) -> IssueQuery {
    IssueQuery {
        search: args.query.clone(),
        milestone: args.milestone.clone(),
        labels: args.labels.clone(),
        project: args.project.clone(),
    }
}

fn cli_error(error: GisrepError) -> CliError {
    let exit_code = match &error {
        GisrepError::TemplateNotFound(_)
        | GisrepError::OutputNotFound(_)
        | GisrepError::Config(_) => EXIT_ERROR,
        _ => EXIT_WARNING,
    };
    CliError::from_error(error, exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report_args(query: &str) -> ReportArgs {
        ReportArgs {
            query: query.to_string(),
            tracker: Tracker::Github,
            template: "simple-report.md".to_string(),
            template_file: None,
            output: "stdout".to_string(),
            output_file: None,
            milestone: None,
            labels: Vec::new(),
            project: None,
            token: None,
            url: gisrep::gitlab::GITLAB_DEFAULT_URL.to_string(),
        }
    }

    #[test]
    fn test_build_query_carries_filters() {
        let mut args = report_args("is:closed");
        args.milestone = Some("v1.0".to_string());
        args.labels = vec!["bug".to_string()];
        args.project = Some("octo/widgets".to_string());

        let query = build_query(&args);
        assert_eq!(query.search, "is:closed");
        assert_eq!(query.milestone.as_deref(), Some("v1.0"));
        assert_eq!(query.labels, vec!["bug"]);
        assert_eq!(query.project.as_deref(), Some("octo/widgets"));
    }

    #[test]
    fn test_selection_errors_get_the_selection_exit_code() {
        let err = cli_error(GisrepError::TemplateNotFound("nope".to_string()));
        assert_eq!(err.exit_code, EXIT_ERROR);

        let err = cli_error(GisrepError::OutputNotFound("printer".to_string()));
        assert_eq!(err.exit_code, EXIT_ERROR);
    }

    #[test]
    fn test_runtime_errors_get_the_general_exit_code() {
        let err = cli_error(GisrepError::NoIssues);
        assert_eq!(err.exit_code, EXIT_WARNING);

        let err = cli_error(GisrepError::ConfigNotFound(PathBuf::from("/nowhere")));
        assert_eq!(err.exit_code, EXIT_WARNING);
    }

    #[tokio::test]
    async fn test_unknown_template_fails_before_any_fetch() {
        let mut args = report_args("widget");
        args.template = "does-not-exist".to_string();

        let err = run_report_command(args).await.unwrap_err();
        assert_eq!(err.exit_code, EXIT_ERROR);
        assert!(err.message.contains("Template not found"));
    }

    #[tokio::test]
    async fn test_unknown_output_fails_before_any_fetch() {
        let mut args = report_args("widget");
        args.output = "printer".to_string();

        let err = run_report_command(args).await.unwrap_err();
        assert_eq!(err.exit_code, EXIT_ERROR);
        assert!(err.message.contains("Output not found"));
    }
}
