//! Bulk-action transition tables, one row per (role, selection status).

use std::collections::HashMap;

use once_cell::sync::Lazy;
use orderdesk_domain::{Role, Status};

/// A status transition offered on a uniform selection, with the label the
/// action is presented under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkAction {
    pub label: &'static str,
    pub target: Status,
}

const TO_CONFIRM: BulkAction =
    BulkAction { label: "Do potwierdzenia", target: Status::DoPotwierdzenia };
const APPROVE: BulkAction = BulkAction { label: "Zatwierdź wybrane", target: Status::DoOplaty };
const MARK_PAID: BulkAction = BulkAction { label: "Oznacz jako opłacone", target: Status::Oplacone };
const TO_SITE: BulkAction =
    BulkAction { label: "W drodze na budowę", target: Status::WDrodzeNaBudowe };
const TO_WAREHOUSE: BulkAction = BulkAction { label: "Na magazynie", target: Status::NaMagazynie };
const TO_OFFICE: BulkAction =
    BulkAction { label: "W drodze do biura", target: Status::WDrodzeDoBiura };

/// Dispatch choices shown once a paid selection leaves the payment stage.
const DISPATCH: [BulkAction; 3] = [TO_SITE, TO_WAREHOUSE, TO_OFFICE];

static TRANSITIONS: Lazy<HashMap<(Role, Status), Vec<BulkAction>>> = Lazy::new(|| {
    let mut table: HashMap<(Role, Status), Vec<BulkAction>> = HashMap::new();

    table.insert((Role::Admin, Status::Nowe), vec![TO_CONFIRM]);
    table.insert((Role::Admin, Status::DoPotwierdzenia), vec![APPROVE]);
    table.insert((Role::Admin, Status::DoOplaty), vec![MARK_PAID]);
    table.insert((Role::Admin, Status::Oplacone), DISPATCH.to_vec());

    table.insert((Role::OrderManager, Status::Nowe), vec![TO_CONFIRM]);
    table.insert((Role::OrderManager, Status::Oplacone), DISPATCH.to_vec());

    table.insert((Role::Approver, Status::DoPotwierdzenia), vec![APPROVE]);

    table.insert((Role::Accountant, Status::DoOplaty), vec![MARK_PAID]);

    table
});

/// Bulk actions for a uniform selection in `status`, empty when the role
/// has none at that stage.
pub fn bulk_actions_for(role: Role, status: Status) -> Vec<BulkAction> {
    TRANSITIONS.get(&(role, status)).cloned().unwrap_or_default()
}
