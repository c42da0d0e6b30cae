//! Tabular query builder
//!
//! Queries are assembled as a small predicate tree and serialized in one
//! place, so quoting and escaping cannot drift between call sites. The
//! only escape the dialect needs is `'` → `\'` inside string literals.

use chrono::NaiveDate;
use orderdesk_domain::{FilterSpec, SortDirection, SortField};

/// Column letters of the sheets this client reads.
pub mod columns {
    /// Orders sheet, columns A through R in listing order.
    pub mod orders {
        pub const ID: &str = "A";
        pub const CREATED_AT: &str = "B";
        pub const CREATED_BY: &str = "C";
        pub const MODIFIED_AT: &str = "D";
        pub const MODIFIED_BY: &str = "E";
        pub const STORE: &str = "F";
        pub const PRICE_PER_UNIT: &str = "G";
        pub const TOTAL_PRICE: &str = "H";
        pub const CURRENCY: &str = "I";
        pub const ORDER_NAME: &str = "J";
        pub const STATUS: &str = "K";
        pub const DEADLINE: &str = "L";
        pub const OBJECT: &str = "M";
        pub const LINK: &str = "N";
        pub const QUANTITY: &str = "O";
        pub const ADDRESS: &str = "P";
        pub const NOTE: &str = "Q";
        pub const TGID: &str = "R";

        /// All columns, in select order.
        pub const ALL: [&str; 18] = [
            ID,
            CREATED_AT,
            CREATED_BY,
            MODIFIED_AT,
            MODIFIED_BY,
            STORE,
            PRICE_PER_UNIT,
            TOTAL_PRICE,
            CURRENCY,
            ORDER_NAME,
            STATUS,
            DEADLINE,
            OBJECT,
            LINK,
            QUANTITY,
            ADDRESS,
            NOTE,
            TGID,
        ];
    }

    /// Users sheet.
    pub mod users {
        pub const SUB: &str = "A";
        pub const POSITION: &str = "E";
        pub const ALLOW_NOTIFICATIONS: &str = "G";
    }

    /// Planning sheet listing active projects.
    pub mod projects {
        pub const NAME: &str = "C";
        pub const ACTIVE_UNTIL: &str = "F";
    }
}

/// Column letter a sort field maps to on the orders sheet.
pub fn sort_column(field: SortField) -> &'static str {
    use columns::orders as col;
    match field {
        SortField::Id => col::ID,
        SortField::CreatedAt => col::CREATED_AT,
        SortField::CreatedBy => col::CREATED_BY,
        SortField::ModifiedAt => col::MODIFIED_AT,
        SortField::ModifiedBy => col::MODIFIED_BY,
        SortField::Store => col::STORE,
        SortField::PricePerUnit => col::PRICE_PER_UNIT,
        SortField::TotalPrice => col::TOTAL_PRICE,
        SortField::Currency => col::CURRENCY,
        SortField::OrderName => col::ORDER_NAME,
        SortField::Status => col::STATUS,
        SortField::Deadline => col::DEADLINE,
        SortField::Object => col::OBJECT,
        SortField::Link => col::LINK,
        SortField::Quantity => col::QUANTITY,
        SortField::Address => col::ADDRESS,
        SortField::Note => col::NOTE,
        SortField::Tgid => col::TGID,
    }
}

/// One node of the filter condition tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `{col}='{value}'`
    Eq(&'static str, String),
    /// `{col} >= date '{date}'`
    OnOrAfterDate(&'static str, NaiveDate),
    /// `{col} IS NOT NULL`
    IsNotNull(&'static str),
    /// `LOWER({col}) CONTAINS '{value}'`
    ContainsLower(&'static str, String),
    /// `DATEDIFF({col}, NOW()) > {days}`
    DateDiffFromNowGt(&'static str, i64),
    /// OR-joined group, parenthesized
    AnyOf(Vec<Predicate>),
    /// AND-joined group, parenthesized when nested
    AllOf(Vec<Predicate>),
}

impl Predicate {
    fn render(&self, top_level: bool) -> String {
        match self {
            Self::Eq(col, value) => format!("{col}='{}'", escape(value)),
            Self::OnOrAfterDate(col, date) => {
                format!("{col} >= date '{}'", date.format("%Y-%m-%d"))
            }
            Self::IsNotNull(col) => format!("{col} IS NOT NULL"),
            Self::ContainsLower(col, value) => {
                format!("LOWER({col}) CONTAINS '{}'", escape(&value.to_lowercase()))
            }
            Self::DateDiffFromNowGt(col, days) => format!("DATEDIFF({col}, NOW()) > {days}"),
            Self::AnyOf(children) => {
                let joined =
                    children.iter().map(|p| p.render(false)).collect::<Vec<_>>().join(" OR ");
                format!("({joined})")
            }
            Self::AllOf(children) => {
                let joined =
                    children.iter().map(|p| p.render(false)).collect::<Vec<_>>().join(" AND ");
                if top_level { joined } else { format!("({joined})") }
            }
        }
    }
}

/// What the query selects.
#[derive(Debug, Clone, PartialEq)]
pub enum Select {
    Columns(Vec<&'static str>),
    Count(&'static str),
}

/// A complete tabular query.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub select: Select,
    pub filter: Option<Predicate>,
    pub order_by: Option<(&'static str, SortDirection)>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Query {
    pub fn new(select: Select) -> Self {
        Self { select, filter: None, order_by: None, limit: None, offset: None }
    }

    /// Serialize to the query dialect string.
    pub fn to_tq(&self) -> String {
        let mut parts = Vec::new();

        let selected = match &self.select {
            Select::Columns(cols) => cols.join(", "),
            Select::Count(col) => format!("COUNT({col})"),
        };
        parts.push(format!("SELECT {selected}"));

        if let Some(filter) = &self.filter {
            parts.push(format!("WHERE {}", filter.render(true)));
        }
        if let Some((col, direction)) = &self.order_by {
            parts.push(format!("ORDER BY {col} {}", direction.as_keyword()));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            parts.push(format!("OFFSET {offset}"));
        }

        parts.join(" ")
    }
}

fn escape(value: &str) -> String {
    value.replace('\'', "\\'")
}

/// The filter conditions a listing spec translates to, shared by the page
/// and count queries.
fn filter_conditions(spec: &FilterSpec, today: NaiveDate) -> Vec<Predicate> {
    use columns::orders as col;

    let mut conditions = Vec::new();

    if spec.last_90_days {
        let from = today - chrono::Duration::days(orderdesk_domain::constants::DASHBOARD_WINDOW_DAYS);
        conditions.push(Predicate::OnOrAfterDate(col::CREATED_AT, from));
    }
    if !spec.statuses.is_empty() {
        conditions.push(Predicate::AnyOf(
            spec.statuses.iter().map(|s| Predicate::Eq(col::STATUS, s.clone())).collect(),
        ));
    }
    if !spec.objects.is_empty() {
        conditions.push(Predicate::AnyOf(
            spec.objects.iter().map(|o| Predicate::Eq(col::OBJECT, o.clone())).collect(),
        ));
    }
    if !spec.created_by.is_empty() {
        conditions.push(Predicate::AnyOf(
            spec.created_by.iter().map(|c| Predicate::Eq(col::CREATED_BY, c.clone())).collect(),
        ));
    }
    if !spec.stores.is_empty() {
        conditions.push(Predicate::AnyOf(
            spec.stores.iter().map(|s| Predicate::Eq(col::STORE, s.clone())).collect(),
        ));
    }
    if !spec.search.trim().is_empty() {
        let needle = spec.search.trim().to_string();
        conditions.push(Predicate::AnyOf(
            [col::ORDER_NAME, col::CREATED_BY, col::LINK]
                .iter()
                .map(|field| Predicate::ContainsLower(field, needle.clone()))
                .collect(),
        ));
    }

    conditions
}

/// Page query for the order listing.
///
/// The 90-day window variant drops pagination entirely, everything else
/// pages with `LIMIT`/`OFFSET`.
pub fn orders_page(spec: &FilterSpec, today: NaiveDate) -> Query {
    let conditions = filter_conditions(spec, today);
    let mut query = Query::new(Select::Columns(columns::orders::ALL.to_vec()));
    if !conditions.is_empty() {
        query.filter = Some(Predicate::AllOf(conditions));
    }
    query.order_by = Some((sort_column(spec.sort_field), spec.sort_direction));
    if !spec.last_90_days {
        query.limit = Some(spec.page_size);
        query.offset = Some(spec.offset());
    }
    query
}

/// Count query matching the same filter as [`orders_page`], ignoring
/// pagination.
pub fn orders_count(spec: &FilterSpec, today: NaiveDate) -> Query {
    use columns::orders as col;

    let mut conditions = vec![Predicate::IsNotNull(col::ID)];
    conditions.extend(filter_conditions(spec, today));

    let mut query = Query::new(Select::Count(col::ID));
    query.filter = Some(Predicate::AllOf(conditions));
    query
}

/// Active projects from the planning sheet: rows whose end date is less
/// than 30 days in the past.
pub fn active_projects() -> Query {
    use columns::projects as col;

    let mut query = Query::new(Select::Columns(vec![col::NAME]));
    query.filter = Some(Predicate::AllOf(vec![
        Predicate::IsNotNull(col::ACTIVE_UNTIL),
        Predicate::DateDiffFromNowGt(col::ACTIVE_UNTIL, -30),
    ]));
    query
}

/// Single order lookup by id.
pub fn order_by_id(id: &str) -> Query {
    use columns::orders as col;

    let mut query = Query::new(Select::Columns(col::ALL.to_vec()));
    query.filter = Some(Predicate::Eq(col::ID, id.to_string()));
    query.limit = Some(1);
    query
}

/// Creator column of every order that has one.
pub fn unique_creators() -> Query {
    use columns::orders as col;

    let mut query = Query::new(Select::Columns(vec![col::CREATED_BY]));
    query.filter = Some(Predicate::IsNotNull(col::CREATED_BY));
    query
}

/// Position cell for a user on the users sheet.
pub fn user_position(sub: &str) -> Query {
    use columns::users as col;

    let mut query = Query::new(Select::Columns(vec![col::POSITION]));
    query.filter = Some(Predicate::Eq(col::SUB, sub.to_string()));
    query.limit = Some(1);
    query
}

/// Notification flag for a user on the users sheet.
pub fn user_allow_notifications(sub: &str) -> Query {
    use columns::users as col;

    let mut query = Query::new(Select::Columns(vec![col::ALLOW_NOTIFICATIONS]));
    query.filter = Some(Predicate::Eq(col::SUB, sub.to_string()));
    query.limit = Some(1);
    query
}
