//! Price reconciliation and order submission rules
//!
//! The order form keeps quantity, unit price, and total as raw strings so
//! the user can type comma or dot decimals. A last-edited marker records
//! which of the three fields changed most recently; one reconciliation
//! pass then repairs the dependent field and consumes the marker.
//! `total = round2(quantity × price)` is the invariant being maintained,
//! with the total-edited direction deriving the price instead.

use chrono::NaiveDateTime;
use orderdesk_domain::{OrderDeskError, OrderDraft, OrderPayload, Result, TokenClaims};

/// Which commercial field the user touched last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastEdited {
    Quantity,
    Price,
    Total,
}

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse a decimal the way the form accepts it: trimmed, comma or dot
/// separator. Empty or unparseable input yields `None`.
pub fn parse_decimal(input: &str) -> Option<f64> {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok()
}

/// One reconciliation pass over the draft's commercial fields.
///
/// The marker is consumed: callers clear their stored marker after the
/// call regardless of whether anything changed.
pub fn reconcile(draft: &mut OrderDraft, last_edited: Option<LastEdited>) {
    let quantity = parse_decimal(&draft.quantity).unwrap_or(0.0);
    let price = parse_decimal(&draft.price_per_unit).unwrap_or(0.0);
    let total = parse_decimal(&draft.total_price).unwrap_or(0.0);

    match last_edited {
        Some(LastEdited::Quantity | LastEdited::Price) => {
            let new_total = round2(quantity * price);
            if new_total != round2(total) {
                draft.total_price = format!("{new_total:.2}");
            }
        }
        Some(LastEdited::Total) => {
            if quantity > 0.0 {
                let new_price = round2(total / quantity);
                if new_price != round2(price) {
                    draft.price_per_unit = format!("{new_price:.2}");
                }
            }
        }
        None => {}
    }
}

/// Format a timestamp the way the sheet stores it.
pub fn format_date_for_sheet(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Normalize a deadline string to `YYYY-MM-DD`, or empty when it does not
/// parse as a date.
pub fn normalize_deadline(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Ok(at) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return at.format("%Y-%m-%d").to_string();
    }
    if let Ok(at) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return at.format("%Y-%m-%d").to_string();
    }
    String::new()
}

/// Validate a draft before submission.
///
/// Returns the first failure as a `Validation` error with a user-facing
/// message.
pub fn validate_draft(draft: &OrderDraft) -> Result<()> {
    if draft.order_name.trim().is_empty() {
        return Err(OrderDeskError::Validation("Nazwa zamówienia jest wymagana".into()));
    }
    if draft.object.trim().is_empty() {
        return Err(OrderDeskError::Validation("Obiekt jest wymagany".into()));
    }
    if draft.deadline.trim().is_empty() {
        return Err(OrderDeskError::Validation("Pożądana data dostawy jest wymagana".into()));
    }
    let quantity: u32 = draft.quantity.trim().parse().unwrap_or(0);
    if quantity < 1 {
        return Err(OrderDeskError::Validation("Ilość musi być większa niż 0".into()));
    }
    if draft.address.trim().is_empty() {
        return Err(OrderDeskError::Validation("Adres dostawy jest wymagany".into()));
    }
    match parse_decimal(&draft.price_per_unit) {
        Some(price) if price > 0.0 => {}
        _ => return Err(OrderDeskError::Validation("Cena musi być większa niż 0".into())),
    }
    if draft.currency.is_none() {
        return Err(OrderDeskError::Validation("Wybierz walutę".into()));
    }
    if !draft.link.trim().is_empty() && url::Url::parse(draft.link.trim()).is_err() {
        return Err(OrderDeskError::Validation("Nieprawidłowy format linku".into()));
    }
    if draft.store.trim().is_empty() {
        return Err(OrderDeskError::Validation("Sklep jest wymagany".into()));
    }
    Ok(())
}

/// Build the normalized write payload for an add or update call.
///
/// A draft without an id is a new order: creation metadata is stamped
/// from the session and `now`. An existing order keeps its creation
/// metadata; modification metadata is stamped either way.
pub fn prepare_order_to_send(
    draft: &OrderDraft,
    claims: &TokenClaims,
    now: NaiveDateTime,
) -> OrderPayload {
    let is_new = draft.id.is_none();
    let price_per_unit = round2(parse_decimal(&draft.price_per_unit).unwrap_or(0.0));
    let quantity: u32 = draft.quantity.trim().parse().unwrap_or(0);
    let total_price = round2(price_per_unit * f64::from(quantity));
    let stamp = format_date_for_sheet(now);

    OrderPayload {
        id: draft.id.clone(),
        order_name: draft.order_name.clone(),
        object: draft.object.clone(),
        deadline: draft.deadline.clone(),
        quantity,
        price_per_unit,
        total_price,
        currency: draft.currency.unwrap_or_default(),
        link: draft.link.clone(),
        store: draft.store.clone(),
        address: draft.address.clone(),
        note: draft.note.clone(),
        status: draft.status,
        created_at: if is_new {
            stamp.clone()
        } else {
            draft.created_at.map(format_date_for_sheet).unwrap_or_default()
        },
        modified_at: stamp,
        created_by: if is_new { claims.name.clone() } else { draft.created_by.clone() },
        modified_by: claims.name.clone(),
        user_name: claims.name.clone(),
        sub: claims.sub.clone(),
        tgid: draft.tgid.clone(),
    }
}

/// Compute the total for an inline price edit.
pub fn total_for_price(price_per_unit: f64, quantity: u32) -> f64 {
    round2(price_per_unit * f64::from(quantity))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use orderdesk_domain::{Currency, Role, Status};

    use super::*;

    fn claims() -> TokenClaims {
        TokenClaims {
            sub: "user-1".into(),
            role: Role::OrderManager,
            name: "Jan Kowalski".into(),
            email: "jan@example.com".into(),
            position: "Kierownik".into(),
            exp: 4_102_444_800,
        }
    }

    fn draft() -> OrderDraft {
        OrderDraft {
            id: None,
            order_name: "Pręty zbrojeniowe".into(),
            object: "Serwis".into(),
            deadline: "2024-05-10".into(),
            quantity: "4".into(),
            price_per_unit: "12,50".into(),
            total_price: String::new(),
            currency: Some(Currency::Pln),
            link: String::new(),
            store: "inny".into(),
            address: "ul. Budowlana 7, Kraków".into(),
            note: String::new(),
            status: Status::Nowe,
            created_at: None,
            created_by: String::new(),
            tgid: None,
        }
    }

    #[test]
    fn comma_decimals_parse() {
        assert_eq!(parse_decimal("12,50"), Some(12.5));
        assert_eq!(parse_decimal(" 3.1 "), Some(3.1));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
    }

    #[test]
    fn quantity_edit_recomputes_total() {
        let mut d = draft();
        d.quantity = "3".into();
        d.price_per_unit = "10,00".into();
        reconcile(&mut d, Some(LastEdited::Quantity));
        assert_eq!(d.total_price, "30.00");
    }

    #[test]
    fn price_edit_recomputes_total() {
        let mut d = draft();
        d.quantity = "4".into();
        d.price_per_unit = "2,25".into();
        reconcile(&mut d, Some(LastEdited::Price));
        assert_eq!(d.total_price, "9.00");
    }

    #[test]
    fn total_edit_derives_price() {
        let mut d = draft();
        d.quantity = "4".into();
        d.total_price = "10".into();
        reconcile(&mut d, Some(LastEdited::Total));
        assert_eq!(d.price_per_unit, "2.50");
    }

    #[test]
    fn total_edit_with_zero_quantity_changes_nothing() {
        let mut d = draft();
        d.quantity = "0".into();
        d.price_per_unit = "5".into();
        d.total_price = "10".into();
        reconcile(&mut d, Some(LastEdited::Total));
        assert_eq!(d.price_per_unit, "5");
        assert_eq!(d.total_price, "10");
    }

    #[test]
    fn no_marker_changes_nothing() {
        let mut d = draft();
        d.total_price = "999".into();
        reconcile(&mut d, None);
        assert_eq!(d.total_price, "999");
    }

    #[test]
    fn reconcile_is_idempotent_once_consistent() {
        let mut d = draft();
        reconcile(&mut d, Some(LastEdited::Price));
        let after_first = d.clone();
        reconcile(&mut d, Some(LastEdited::Quantity));
        assert_eq!(d, after_first);
    }

    #[test]
    fn validation_rejects_missing_fields() {
        let mut d = draft();
        d.order_name = "  ".into();
        assert!(matches!(validate_draft(&d), Err(OrderDeskError::Validation(_))));

        let mut d = draft();
        d.quantity = "0".into();
        assert!(matches!(validate_draft(&d), Err(OrderDeskError::Validation(_))));

        let mut d = draft();
        d.price_per_unit = "0".into();
        assert!(matches!(validate_draft(&d), Err(OrderDeskError::Validation(_))));

        let mut d = draft();
        d.link = "not a url".into();
        assert!(matches!(validate_draft(&d), Err(OrderDeskError::Validation(_))));

        assert!(validate_draft(&draft()).is_ok());
    }

    #[test]
    fn new_order_payload_is_stamped_from_session() {
        let now = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(10, 30, 0))
            .unwrap_or_default();
        let payload = prepare_order_to_send(&draft(), &claims(), now);

        assert_eq!(payload.price_per_unit, 12.5);
        assert_eq!(payload.quantity, 4);
        assert_eq!(payload.total_price, 50.0);
        assert_eq!(payload.currency, Currency::Pln);
        assert_eq!(payload.created_at, "2024-05-01 10:30:00");
        assert_eq!(payload.modified_at, "2024-05-01 10:30:00");
        assert_eq!(payload.created_by, "Jan Kowalski");
        assert_eq!(payload.modified_by, "Jan Kowalski");
        assert_eq!(payload.sub, "user-1");
    }

    #[test]
    fn existing_order_keeps_creation_metadata() {
        let created = NaiveDate::from_ymd_opt(2024, 4, 1)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap_or_default();
        let now = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(10, 30, 0))
            .unwrap_or_default();

        let mut d = draft();
        d.id = Some("42".into());
        d.created_at = Some(created);
        d.created_by = "Anna Nowak".into();

        let payload = prepare_order_to_send(&d, &claims(), now);
        assert_eq!(payload.created_at, "2024-04-01 09:00:00");
        assert_eq!(payload.created_by, "Anna Nowak");
        assert_eq!(payload.modified_by, "Jan Kowalski");
    }

    #[test]
    fn missing_currency_defaults_to_pln_in_payload() {
        let mut d = draft();
        d.currency = None;
        let payload = prepare_order_to_send(&d, &claims(), NaiveDateTime::default());
        assert_eq!(payload.currency, Currency::Pln);
    }

    #[test]
    fn deadline_normalization() {
        assert_eq!(normalize_deadline("2024-05-10"), "2024-05-10");
        assert_eq!(normalize_deadline("2024-05-10 14:00:00"), "2024-05-10");
        assert_eq!(normalize_deadline("2024-05-10T14:00:00+02:00"), "2024-05-10");
        assert_eq!(normalize_deadline("wkrótce"), "");
        assert_eq!(normalize_deadline(""), "");
    }
}
