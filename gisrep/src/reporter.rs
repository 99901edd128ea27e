//! Issue tracker clients and report generation

use crate::{GisrepError, Issue, IssueQuery, Result, Template};
use async_trait::async_trait;

/// A client for one issue tracker
///
/// One `search` call happens per invocation; there are no retries and no
/// caching. Implementations normalize their wire formats into [`Issue`].
#[async_trait]
pub trait Reporter: Send + Sync {
    /// Tracker name, e.g. `github`
    fn name(&self) -> &'static str;

    /// Fetch the issues matching a query
    async fn search(&self, query: &IssueQuery) -> Result<Vec<Issue>>;
}

/// Fetch issues for a query and render them through a template
///
/// An empty result set is an error: a report over nothing is more likely a
/// mistyped query than a useful artifact.
pub async fn generate_report(
    reporter: &dyn Reporter,
    query: &IssueQuery,
    template: &Template,
) -> Result<String> {
    tracing::debug!(tracker = reporter.name(), search = %query.search, "requesting issues");
    let issues = reporter.search(query).await?;

    if issues.is_empty() {
        return Err(GisrepError::NoIssues);
    }

    tracing::debug!(count = issues.len(), template = template.name(), "rendering report");
    template.render(&issues)
}
