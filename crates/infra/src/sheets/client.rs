//! Read adapter for the order spreadsheet.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use orderdesk_common::time::Clock;
use orderdesk_core::orders::OrdersSource;
use orderdesk_domain::{Currency, FilterSpec, Order, OrdersPage, Result, SheetsConfig, Status};
use tracing::debug;

use super::query::{self, Query};
use super::response::{CellValue, Record, parse_response};
use crate::http::HttpClient;

/// Key the count query's single column decodes under after header
/// promotion.
const COUNT_LABEL: &str = "count id";
/// Key the planning sheet's name column decodes under.
const PROJECT_LABEL: &str = "project";

/// Orders read client over the spreadsheet tabular query endpoint.
pub struct SheetsClient {
    http: HttpClient,
    config: SheetsConfig,
    clock: Arc<dyn Clock>,
}

impl SheetsClient {
    pub fn new(http: HttpClient, config: SheetsConfig, clock: Arc<dyn Clock>) -> Self {
        Self { http, config, clock }
    }

    fn query_url(&self, spreadsheet_id: &str, sheet: &str, query: &Query) -> String {
        let tq = query.to_tq();
        debug!(sheet, %tq, "tabular query");
        format!(
            "{}/{}/gviz/tq?sheet={}&tq={}&headers=1",
            self.config.base_url,
            spreadsheet_id,
            urlencoding::encode(sheet),
            urlencoding::encode(&tq),
        )
    }

    async fn fetch_records(
        &self,
        spreadsheet_id: &str,
        sheet: &str,
        query: &Query,
    ) -> Result<Vec<Record>> {
        let url = self.query_url(spreadsheet_id, sheet, query);
        let body = self.http.get_text(&url).await?;
        parse_response(&body)
    }

    async fn fetch_orders_records(&self, query: &Query) -> Result<Vec<Record>> {
        self.fetch_records(&self.config.orders_spreadsheet_id, &self.config.orders_sheet, query)
            .await
    }

    async fn fetch_users_records(&self, query: &Query) -> Result<Vec<Record>> {
        self.fetch_records(&self.config.orders_spreadsheet_id, &self.config.users_sheet, query)
            .await
    }

    fn today(&self) -> NaiveDate {
        DateTime::<Utc>::from(self.clock.system_time()).date_naive()
    }
}

/// A cell by label, tolerating single-column responses whose promoted
/// label differs from the expected one.
fn cell<'a>(record: &'a Record, label: &str) -> Option<&'a CellValue> {
    record.get(label).or_else(|| {
        if record.len() == 1 { record.values().next() } else { None }
    })
}

fn text(record: &Record, label: &str) -> String {
    cell(record, label).map(CellValue::as_text).unwrap_or_default()
}

fn order_from_record(record: &Record) -> Result<Order> {
    let status_text = text(record, "status");
    let status = if status_text.trim().is_empty() {
        // Rows created before the workflow existed have no status cell.
        Status::default()
    } else {
        status_text.trim().parse()?
    };

    let currency_text = text(record, "currency");
    let currency: Option<Currency> = if currency_text.trim().is_empty() {
        None
    } else {
        Some(currency_text.trim().parse()?)
    };

    let tgid = text(record, "tgid");

    Ok(Order {
        id: text(record, "id"),
        created_at: cell(record, "createdAt").and_then(CellValue::as_datetime),
        created_by: text(record, "createdBy"),
        modified_at: cell(record, "modifiedAt").and_then(CellValue::as_datetime),
        modified_by: text(record, "modifiedBy"),
        store: text(record, "store"),
        price_per_unit: cell(record, "pricePerUnit").and_then(CellValue::as_number),
        total_price: cell(record, "totalPrice").and_then(CellValue::as_number),
        currency,
        order_name: text(record, "orderName"),
        status,
        deadline: cell(record, "deadline").and_then(CellValue::as_date),
        object: text(record, "object"),
        link: text(record, "link"),
        quantity: cell(record, "quantity")
            .and_then(CellValue::as_number)
            .map_or(0, |n| n.max(0.0) as u32),
        address: text(record, "address"),
        note: text(record, "note"),
        tgid: if tgid.trim().is_empty() { None } else { Some(tgid) },
    })
}

#[async_trait]
impl OrdersSource for SheetsClient {
    async fn fetch_page(&self, filter: &FilterSpec) -> Result<OrdersPage> {
        let today = self.today();
        let page_query = query::orders_page(filter, today);
        let count_query = query::orders_count(filter, today);
        let projects_query = query::active_projects();

        let (order_records, count_records, project_records) = tokio::try_join!(
            self.fetch_orders_records(&page_query),
            self.fetch_orders_records(&count_query),
            self.fetch_records(
                &self.config.projects_spreadsheet_id,
                &self.config.projects_sheet,
                &projects_query,
            ),
        )?;

        let orders: Vec<Order> =
            order_records.iter().map(order_from_record).collect::<Result<_>>()?;

        let total = count_records
            .first()
            .and_then(|record| cell(record, COUNT_LABEL))
            .and_then(CellValue::as_number)
            .map_or(0, |n| n.max(0.0) as u64);

        let projects: Vec<String> = project_records
            .iter()
            .map(|record| text(record, PROJECT_LABEL))
            .filter(|name| !name.trim().is_empty())
            .collect();

        Ok(OrdersPage { orders, projects, total })
    }

    async fn order_by_id(&self, id: &str) -> Result<Option<Order>> {
        let records = self.fetch_orders_records(&query::order_by_id(id)).await?;
        records.first().map(order_from_record).transpose()
    }

    async fn unique_creators(&self) -> Result<Vec<String>> {
        let records = self.fetch_orders_records(&query::unique_creators()).await?;
        let mut seen = std::collections::HashSet::new();
        Ok(records
            .iter()
            .map(|record| text(record, "createdBy"))
            .filter(|name| !name.trim().is_empty())
            .filter(|name| seen.insert(name.clone()))
            .collect())
    }

    async fn position_by_sub(&self, sub: &str) -> Result<Option<String>> {
        if sub.trim().is_empty() {
            return Ok(None);
        }
        let records = self.fetch_users_records(&query::user_position(sub)).await?;
        Ok(records
            .first()
            .map(|record| text(record, "position"))
            .filter(|position| !position.trim().is_empty()))
    }

    async fn allow_notifications(&self, sub: &str) -> Result<bool> {
        let records = self.fetch_users_records(&query::user_allow_notifications(sub)).await?;
        Ok(records
            .first()
            .and_then(|record| cell(record, "allow_notifications"))
            .is_some_and(CellValue::is_truthy_flag))
    }
}
