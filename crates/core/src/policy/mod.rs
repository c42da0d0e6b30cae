//! Role policy for status transitions and edit rights
//!
//! Every decision about who may move an order where is encoded here as
//! data, looked up by the services and the command layer. The transition
//! tables mirror the role matrix of the order workflow: bulk actions on
//! uniform selections, per-role status choices in the edit form, and the
//! edit gates for the form and the inline price field.

mod tables;

pub use tables::{BulkAction, bulk_actions_for};

use orderdesk_domain::{Role, Status};

/// Statuses an order may only enter when it carries a positive unit price.
pub const PRICE_GATED_STATUSES: [Status; 3] =
    [Status::DoPotwierdzenia, Status::DoOplaty, Status::Oplacone];

/// Bulk actions available for a selection of orders.
///
/// Only a uniform selection (all orders in the same status) offers any
/// action; an empty or mixed selection offers none.
pub fn bulk_actions(role: Role, selected_statuses: &[Status]) -> Vec<BulkAction> {
    let Some((first, rest)) = selected_statuses.split_first() else {
        return Vec::new();
    };
    if rest.iter().any(|status| status != first) {
        return Vec::new();
    }
    bulk_actions_for(role, *first)
}

/// Whether the role may mark selected orders as rejected.
///
/// Rejection skips the price gate and applies to any non-empty selection.
pub const fn can_reject(role: Role) -> bool {
    matches!(role, Role::Admin | Role::OrderManager | Role::Approver | Role::Accountant)
}

/// Whether entering `target` requires every selected order to carry a
/// positive unit price.
pub fn requires_price(target: Status) -> bool {
    PRICE_GATED_STATUSES.contains(&target)
}

/// Status choices offered by the order form.
///
/// `current` is `None` for a brand-new order. For an existing order the
/// choices depend on the status the order had when the form was opened,
/// and always include that status so the form can be saved unchanged.
pub fn form_status_options(role: Role, current: Option<Status>) -> Vec<Status> {
    let Some(initial) = current else {
        return match role {
            Role::Admin => Status::ALL.to_vec(),
            _ => vec![Status::Nowe],
        };
    };

    match role {
        Role::Admin => Status::ALL.to_vec(),
        Role::OrderManager => match initial {
            Status::Nowe => vec![Status::Nowe, Status::Odrzucone, Status::DoPotwierdzenia],
            Status::DoPotwierdzenia => vec![Status::DoPotwierdzenia, Status::Anulowane],
            Status::DoOplaty => vec![Status::DoOplaty, Status::Anulowane],
            Status::Oplacone => vec![
                Status::Oplacone,
                Status::WDrodzeDoBiura,
                Status::WDrodzeNaBudowe,
                Status::NaMagazynie,
            ],
            Status::NaMagazynie => {
                vec![Status::NaMagazynie, Status::WDrodzeDoBiura, Status::WDrodzeNaBudowe]
            }
            Status::DoWyjasnienia => vec![Status::DoWyjasnienia, Status::Bledne],
            other => vec![other],
        },
        Role::Approver => match initial {
            Status::DoPotwierdzenia => {
                vec![Status::DoPotwierdzenia, Status::Odrzucone, Status::DoOplaty]
            }
            other => vec![other],
        },
        Role::Accountant => match initial {
            Status::DoOplaty => vec![Status::DoOplaty, Status::Odrzucone, Status::Oplacone],
            other => vec![other],
        },
        Role::StockController => match initial {
            Status::Nowe => vec![Status::Nowe, Status::NaMagazynie],
            other => vec![other],
        },
    }
}

/// Whether the role may edit an order's fields in the form.
pub fn can_edit(role: Role, status: Status) -> bool {
    match role {
        Role::Admin => true,
        Role::OrderManager => matches!(status, Status::Nowe | Status::DoPotwierdzenia),
        _ => false,
    }
}

/// Whether the role may edit the unit price inline in the listing.
///
/// Unlike the form gate this also constrains admins to early statuses:
/// once an order is past confirmation its price is settled.
pub fn can_edit_price_inline(role: Role, status: Status) -> bool {
    matches!(role, Role::Admin | Role::OrderManager)
        && matches!(status, Status::Nowe | Status::DoPotwierdzenia)
}

/// Status filter applied when a user opens the listing without a saved
/// filter snapshot: each reviewing role lands on its own inbox.
pub fn default_status_filter(role: Role) -> Vec<Status> {
    match role {
        Role::Approver => vec![Status::DoPotwierdzenia],
        Role::Accountant => vec![Status::DoOplaty],
        _ => Vec::new(),
    }
}
