use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ResourceId;

/// Review status of a job application.
///
/// The set is closed: anything else the backend reports is read as
/// [`ApplicationStatus::Pending`] (see [`ApplicationStatus::normalize`]).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Shortlisted,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Yellow,
    Blue,
    Purple,
    Green,
    Red,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Reviewed,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Reviewed => "Reviewed",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    pub const fn badge(self) -> BadgeColor {
        match self {
            ApplicationStatus::Pending => BadgeColor::Yellow,
            ApplicationStatus::Reviewed => BadgeColor::Blue,
            ApplicationStatus::Shortlisted => BadgeColor::Purple,
            ApplicationStatus::Accepted => BadgeColor::Green,
            ApplicationStatus::Rejected => BadgeColor::Red,
        }
    }

    /// Statuses a reviewer may move an application to from `self`.
    pub const fn allowed_next(self) -> &'static [ApplicationStatus] {
        use ApplicationStatus::*;
        match self {
            Pending => &[Reviewed, Shortlisted],
            Reviewed => &[Shortlisted],
            Shortlisted => &[Accepted, Rejected],
            Accepted | Rejected => &[Pending],
        }
    }

    pub fn can_transition_to(self, target: ApplicationStatus) -> bool {
        self.allowed_next().contains(&target)
    }

    /// Button caption for the action that moves an application *into* `self`.
    pub const fn action_label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Reset to Pending",
            ApplicationStatus::Reviewed => "Mark as Reviewed",
            ApplicationStatus::Shortlisted => "Shortlist",
            ApplicationStatus::Accepted => "Accept",
            ApplicationStatus::Rejected => "Reject",
        }
    }

    /// Actions offered to a reviewer for an application currently in `self`.
    pub fn actions(self) -> Vec<ReviewAction> {
        self.allowed_next()
            .iter()
            .map(|&target| ReviewAction {
                target,
                label: target.action_label(),
            })
            .collect()
    }

    /// Lenient read of a backend status value.
    pub fn normalize(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok())
            .unwrap_or(ApplicationStatus::Pending)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewAction {
    pub target: ApplicationStatus,
    pub label: &'static str,
}

/// A job application as held by the client after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Application {
    pub id: ResourceId,
    pub job_id: Option<ResourceId>,
    pub job_title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub candidate_name: Option<String>,
    pub candidate_email: Option<String>,
    pub applied_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub status: ApplicationStatus,
    pub cv_path: Option<String>,
}

impl Application {
    pub fn has_cv(&self) -> bool {
        self.cv_path.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Per-status tally derived from a full collection of applications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub reviewed: usize,
    pub shortlisted: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn from_applications<'a, I>(applications: I) -> Self
    where
        I: IntoIterator<Item = &'a Application>,
    {
        applications
            .into_iter()
            .fold(StatusCounts::default(), |mut counts, app| {
                *counts.slot(app.status) += 1;
                counts
            })
    }

    pub fn get(&self, status: ApplicationStatus) -> usize {
        match status {
            ApplicationStatus::Pending => self.pending,
            ApplicationStatus::Reviewed => self.reviewed,
            ApplicationStatus::Shortlisted => self.shortlisted,
            ApplicationStatus::Accepted => self.accepted,
            ApplicationStatus::Rejected => self.rejected,
        }
    }

    pub fn total(&self) -> usize {
        ApplicationStatus::ALL.iter().map(|s| self.get(*s)).sum()
    }

    fn slot(&mut self, status: ApplicationStatus) -> &mut usize {
        match status {
            ApplicationStatus::Pending => &mut self.pending,
            ApplicationStatus::Reviewed => &mut self.reviewed,
            ApplicationStatus::Shortlisted => &mut self.shortlisted,
            ApplicationStatus::Accepted => &mut self.accepted,
            ApplicationStatus::Rejected => &mut self.rejected,
        }
    }
}
