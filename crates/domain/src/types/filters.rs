//! Filter, sort, and paging specification for order listings.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PAGE_SIZE;

/// Order field a listing can be sorted on. Serialized names match the sheet
/// column labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(ts_rs::TS))]
pub enum SortField {
    Id,
    CreatedAt,
    CreatedBy,
    ModifiedAt,
    ModifiedBy,
    Store,
    PricePerUnit,
    TotalPrice,
    Currency,
    OrderName,
    Status,
    Deadline,
    Object,
    Link,
    Quantity,
    Address,
    Note,
    Tgid,
}

/// Sort direction of the single-field listing sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts-gen", derive(ts_rs::TS))]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Keyword used by the tabular query dialect.
    pub const fn as_keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Filter, sort, and paging state of the order listing.
///
/// Ephemeral: held per session, optionally snapshotted by the application
/// context, never persisted server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "ts-gen", derive(ts_rs::TS))]
pub struct FilterSpec {
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub statuses: Vec<String>,
    pub objects: Vec<String>,
    pub created_by: Vec<String>,
    pub stores: Vec<String>,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    /// When set, the query is bounded to the last 90 days of creation dates
    /// and pagination is omitted entirely.
    pub last_90_days: bool,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            statuses: Vec::new(),
            objects: Vec::new(),
            created_by: Vec::new(),
            stores: Vec::new(),
            sort_field: SortField::CreatedAt,
            sort_direction: SortDirection::Desc,
            last_90_days: false,
        }
    }
}

impl FilterSpec {
    /// Row offset of the requested page.
    pub const fn offset(&self) -> u32 {
        (self.page.saturating_sub(1)) * self.page_size
    }

    /// A spec selecting the last 90 days, newest first, without paging.
    pub fn last_90_days() -> Self {
        Self { last_90_days: true, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_listing_view() {
        let spec = FilterSpec::default();
        assert_eq!(spec.page, 1);
        assert_eq!(spec.page_size, 25);
        assert_eq!(spec.sort_field, SortField::CreatedAt);
        assert_eq!(spec.sort_direction, SortDirection::Desc);
        assert!(!spec.last_90_days);
    }

    #[test]
    fn offset_is_zero_based() {
        let spec = FilterSpec { page: 3, page_size: 25, ..FilterSpec::default() };
        assert_eq!(spec.offset(), 50);
        assert_eq!(FilterSpec::default().offset(), 0);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let spec = FilterSpec {
            page: 2,
            search: "pręty".into(),
            statuses: vec!["nowe".into()],
            ..FilterSpec::default()
        };
        let json = serde_json::to_string(&spec).expect("serialize");
        let back: FilterSpec = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, spec);
    }
}
