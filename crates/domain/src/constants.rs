//! Shared constants

/// Local-store key holding the signed session token.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Local-store key holding the theme preference.
pub const THEME_KEY: &str = "theme";

/// Theme applied when no preference has been stored yet.
pub const DEFAULT_THEME: &str = "nord";

/// Session-scoped key for the last-applied filter snapshot.
pub const FILTERS_SNAPSHOT_KEY: &str = "ordersFilters";

/// Project options always offered alongside the active-project list.
pub const DEFAULT_OBJECTS: [&str; 2] = ["Serwis", "Magazyn (Biuro)"];

/// Store option appended to the suggestions when absent.
pub const FALLBACK_STORE: &str = "inny";

/// Default page size for order listings.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Page size choices exposed by the listing view.
pub const PAGE_SIZES: [u32; 4] = [25, 50, 75, 100];

/// Time-to-live of the cached full order list, in seconds.
pub const ORDERS_CACHE_TTL_SECS: u64 = 180;

/// Width of the creation-date window used by the dashboard, in days.
pub const DASHBOARD_WINDOW_DAYS: i64 = 90;

/// Position shown when the token carries none.
pub const DEFAULT_POSITION: &str = "Brak stanowiska";
