use std::collections::HashSet;

use crate::domain::LaunchRecord;
use crate::store::LikedSet;

/// Which launches the user wants to see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Exact agency name; `None` (or empty) shows every agency
    pub agency: Option<String>,
    pub only_liked: bool,
}

impl FilterSpec {
    pub fn new(agency: Option<String>, only_liked: bool) -> Self {
        Self { agency, only_liked }
    }

    pub fn matches(&self, launch: &LaunchRecord, liked: &LikedSet) -> bool {
        let agency_ok = match self.agency.as_deref() {
            Some(agency) if !agency.is_empty() => launch.agency_name == agency,
            _ => true,
        };
        agency_ok && (!self.only_liked || liked.contains(&launch.id))
    }

    /// Picking the already-selected agency clears the agency filter.
    pub fn toggle_agency(&mut self, agency: &str) {
        if self.agency.as_deref() == Some(agency) {
            self.agency = None;
        } else {
            self.agency = Some(agency.to_string());
        }
    }
}

/// Launches matching `spec`, in feed order.
pub fn visible<'a>(
    items: &'a [LaunchRecord],
    liked: &LikedSet,
    spec: &FilterSpec,
) -> Vec<&'a LaunchRecord> {
    items
        .iter()
        .filter(|launch| spec.matches(launch, liked))
        .collect()
}

/// Distinct agency names in first-seen order.
pub fn agencies(items: &[LaunchRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|launch| seen.insert(launch.agency_name.as_str()))
        .map(|launch| launch.agency_name.clone())
        .collect()
}
