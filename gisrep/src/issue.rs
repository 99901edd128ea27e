//! Issue data model and query filters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single issue record as presented to templates
///
/// Both trackers normalize their wire formats into this shape, so templates
/// render the same regardless of where the issues came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number within its repository or project
    pub number: u64,

    /// Issue title
    pub title: String,

    /// Browser URL of the issue
    pub url: String,

    /// Issue state, e.g. `open` or `closed`
    pub state: String,

    /// Login of the user who opened the issue
    pub author: Option<String>,

    /// Label names attached to the issue
    pub labels: Vec<String>,

    /// Milestone title, if the issue is assigned to one
    pub milestone: Option<String>,

    /// When the issue was opened
    pub created_at: Option<DateTime<Utc>>,

    /// When the issue was closed, if it has been
    pub closed_at: Option<DateTime<Utc>>,
}

impl Issue {
    /// Create a new issue with the required fields
    pub fn new(number: u64, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            url: url.into(),
            state: "open".to_string(),
            author: None,
            labels: Vec::new(),
            milestone: None,
            created_at: None,
            closed_at: None,
        }
    }

    /// Set the state
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    /// Set the labels
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }
}

/// A search query with optional filters, passed to an issue tracker
///
/// The search string goes to the remote API verbatim. Filters narrow the
/// result set in whatever way the tracker expresses them: GitHub folds them
/// into search qualifiers, GitLab passes them as request parameters.
#[derive(Debug, Clone, Default)]
pub struct IssueQuery {
    /// Free-form search string
    pub search: String,

    /// Milestone title to filter by
    pub milestone: Option<String>,

    /// Label names to filter by
    pub labels: Vec<String>,

    /// Project to filter by (GitLab `group/project` path)
    pub project: Option<String>,
}

impl IssueQuery {
    /// Create a query from a search string
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..Default::default()
        }
    }

    /// Set the milestone filter
    pub fn with_milestone(mut self, milestone: impl Into<String>) -> Self {
        self.milestone = Some(milestone.into());
        self
    }

    /// Set the label filters
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    /// Set the project filter
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }
}
