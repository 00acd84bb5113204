use crate::domain::{ActionLink, LaunchRecord};
use crate::feed::FilterSpec;
use crate::store::LikedSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Retrying,
    Failed,
}

impl FetchStatus {
    pub fn is_in_flight(self) -> bool {
        matches!(self, FetchStatus::Loading | FetchStatus::Retrying)
    }
}

/// Everything loaded so far for the open feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedState {
    /// Pages in fetch order; duplicates across pages are kept
    pub items: Vec<LaunchRecord>,
    pub next_offset: usize,
    pub status: FetchStatus,
    pub retry_count: u32,
}

/// A launch as it should be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleLaunch {
    pub launch: LaunchRecord,
    pub liked: bool,
    pub action: ActionLink,
}

/// What observers receive whenever the feed, likes or filter change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedSnapshot {
    pub state: FeedState,
    pub visible: Vec<VisibleLaunch>,
    pub agencies: Vec<String>,
    pub filter: FilterSpec,
    pub liked: LikedSet,
    /// A reset fetch is in flight
    pub is_refreshing: bool,
    /// User-facing message for the last failed fetch
    pub notice: Option<String>,
}

impl FeedSnapshot {
    pub fn is_loading_more(&self) -> bool {
        self.state.status.is_in_flight() && !self.is_refreshing
    }

    pub fn empty_notice(&self) -> Option<&'static str> {
        (self.visible.is_empty() && self.filter.only_liked)
            .then_some("You haven't liked any launches yet.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_statuses() {
        assert!(!FetchStatus::Idle.is_in_flight());
        assert!(FetchStatus::Loading.is_in_flight());
        assert!(FetchStatus::Retrying.is_in_flight());
        assert!(!FetchStatus::Failed.is_in_flight());
    }

    #[test]
    fn test_empty_notice_only_for_liked_filter() {
        let mut snapshot = FeedSnapshot::default();
        assert_eq!(snapshot.empty_notice(), None);

        snapshot.filter.only_liked = true;
        assert_eq!(
            snapshot.empty_notice(),
            Some("You haven't liked any launches yet.")
        );
    }

    #[test]
    fn test_loading_more_vs_refreshing() {
        let mut snapshot = FeedSnapshot::default();
        snapshot.state.status = FetchStatus::Loading;
        assert!(snapshot.is_loading_more());

        snapshot.is_refreshing = true;
        assert!(!snapshot.is_loading_more());
    }
}
