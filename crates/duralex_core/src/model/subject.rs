//! Subjects, view selectors and navigation metadata.
//!
//! # Responsibility
//! - Define the closed set of law-school subjects.
//! - Define the selector that switches between the aggregate dashboard and a
//!   subject-scoped view.
//! - Provide the static navigation table (`APP_VIEWS`).
//!
//! # Invariants
//! - Wire names are the display names; parsing is exact after trimming.
//! - `APP_VIEWS` always starts with the aggregate entry.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Law-school course category used to scope notes, cases and events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "Torts")]
    Torts,
    #[serde(rename = "Medicina Forensis")]
    MedicinaForensis,
    #[serde(rename = "Commercial Transactions")]
    CommercialTransactions,
    #[serde(rename = "Corporation Law")]
    CorporationLaw,
    #[serde(rename = "Civil Procedure")]
    CivilProcedure,
    #[serde(rename = "Labour Law")]
    LabourLaw,
    #[serde(rename = "Administrative Law")]
    AdministrativeLaw,
}

const ALL_SUBJECTS: &[Subject] = &[
    Subject::Torts,
    Subject::MedicinaForensis,
    Subject::CommercialTransactions,
    Subject::CorporationLaw,
    Subject::CivilProcedure,
    Subject::LabourLaw,
    Subject::AdministrativeLaw,
];

impl Subject {
    /// Every known subject, in declaration order.
    pub fn all() -> &'static [Subject] {
        ALL_SUBJECTS
    }

    /// Display name, also used as the wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Torts => "Torts",
            Self::MedicinaForensis => "Medicina Forensis",
            Self::CommercialTransactions => "Commercial Transactions",
            Self::CorporationLaw => "Corporation Law",
            Self::CivilProcedure => "Civil Procedure",
            Self::LabourLaw => "Labour Law",
            Self::AdministrativeLaw => "Administrative Law",
        }
    }

    /// Parses a display name. Surrounding whitespace is ignored, case is not.
    pub fn parse(value: &str) -> Result<Self, UnknownSelectorError> {
        let normalized = value.trim();
        ALL_SUBJECTS
            .iter()
            .copied()
            .find(|subject| subject.as_str() == normalized)
            .ok_or_else(|| UnknownSelectorError(normalized.to_string()))
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of the aggregate selector.
pub const DASHBOARD_VIEW_NAME: &str = "Dashboard";

/// Active view: the aggregate dashboard or exactly one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewSelector {
    #[default]
    Dashboard,
    Subject(Subject),
}

impl ViewSelector {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => DASHBOARD_VIEW_NAME,
            Self::Subject(subject) => subject.as_str(),
        }
    }

    /// Parses `Dashboard` or any subject display name.
    pub fn parse(value: &str) -> Result<Self, UnknownSelectorError> {
        if value.trim() == DASHBOARD_VIEW_NAME {
            return Ok(Self::Dashboard);
        }
        Subject::parse(value).map(Self::Subject)
    }

    /// Returns the scoped subject, or `None` for the aggregate view.
    pub fn subject(self) -> Option<Subject> {
        match self {
            Self::Dashboard => None,
            Self::Subject(subject) => Some(subject),
        }
    }

    pub fn is_dashboard(self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

impl Display for ViewSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a selector or subject name is not part of the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSelectorError(pub String);

impl Display for UnknownSelectorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown view or subject: `{}`", self.0)
    }
}

impl Error for UnknownSelectorError {}

/// Icon category tag rendered by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewIcon {
    LayoutDashboard,
    HeartPulse,
    ArrowRightLeft,
    Building,
    Gavel,
    Users,
    Landmark,
}

impl ViewIcon {
    /// Stable tag string for presentation-side icon lookup.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LayoutDashboard => "layout_dashboard",
            Self::HeartPulse => "heart_pulse",
            Self::ArrowRightLeft => "arrow_right_left",
            Self::Building => "building",
            Self::Gavel => "gavel",
            Self::Users => "users",
            Self::Landmark => "landmark",
        }
    }
}

/// One navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppView {
    pub selector: ViewSelector,
    pub icon: ViewIcon,
}

/// Navigation table. `Torts` has no dedicated view and only shows up in the
/// aggregate dashboard.
pub const APP_VIEWS: &[AppView] = &[
    AppView {
        selector: ViewSelector::Dashboard,
        icon: ViewIcon::LayoutDashboard,
    },
    AppView {
        selector: ViewSelector::Subject(Subject::MedicinaForensis),
        icon: ViewIcon::HeartPulse,
    },
    AppView {
        selector: ViewSelector::Subject(Subject::CommercialTransactions),
        icon: ViewIcon::ArrowRightLeft,
    },
    AppView {
        selector: ViewSelector::Subject(Subject::CorporationLaw),
        icon: ViewIcon::Building,
    },
    AppView {
        selector: ViewSelector::Subject(Subject::CivilProcedure),
        icon: ViewIcon::Gavel,
    },
    AppView {
        selector: ViewSelector::Subject(Subject::LabourLaw),
        icon: ViewIcon::Users,
    },
    AppView {
        selector: ViewSelector::Subject(Subject::AdministrativeLaw),
        icon: ViewIcon::Landmark,
    },
];

/// Looks up navigation metadata, falling back to the dashboard entry.
pub fn app_view_for(selector: ViewSelector) -> AppView {
    APP_VIEWS
        .iter()
        .copied()
        .find(|view| view.selector == selector)
        .unwrap_or(APP_VIEWS[0])
}

#[cfg(test)]
mod tests {
    use super::{app_view_for, Subject, ViewIcon, ViewSelector, APP_VIEWS};

    #[test]
    fn parse_accepts_display_names_and_trims() {
        assert_eq!(
            ViewSelector::parse(" Civil Procedure ").unwrap(),
            ViewSelector::Subject(Subject::CivilProcedure)
        );
        assert_eq!(
            ViewSelector::parse("Dashboard").unwrap(),
            ViewSelector::Dashboard
        );
    }

    #[test]
    fn parse_is_case_sensitive() {
        let err = ViewSelector::parse("civil procedure").unwrap_err();
        assert!(err.to_string().contains("civil procedure"));
    }

    #[test]
    fn every_subject_round_trips_through_its_name() {
        for subject in Subject::all() {
            assert_eq!(Subject::parse(subject.as_str()).unwrap(), *subject);
        }
    }

    #[test]
    fn navigation_table_starts_with_dashboard_and_skips_torts() {
        assert_eq!(APP_VIEWS[0].selector, ViewSelector::Dashboard);
        assert_eq!(APP_VIEWS.len(), 7);
        assert!(APP_VIEWS
            .iter()
            .all(|view| view.selector != ViewSelector::Subject(Subject::Torts)));
    }

    #[test]
    fn unknown_view_falls_back_to_dashboard_entry() {
        let view = app_view_for(ViewSelector::Subject(Subject::Torts));
        assert_eq!(view.icon, ViewIcon::LayoutDashboard);
        let gavel = app_view_for(ViewSelector::Subject(Subject::CivilProcedure));
        assert_eq!(gavel.icon.as_str(), "gavel");
    }
}
