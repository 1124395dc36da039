//! Display metadata for status-like enums.
//!
//! Kept apart from the domain enums so the quota engine only ever deals
//! with tagged variants.

use serde::Serialize;

use crate::models::request_status::RequestStatus;
use crate::models::vacation_policy::LimitKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

pub fn status_badge(status: RequestStatus) -> StatusBadge {
    let (label, color, icon) = match status {
        RequestStatus::Pending => ("Pending", "amber", "clock"),
        RequestStatus::Approved => ("Approved", "green", "check-circle"),
        RequestStatus::Rejected => ("Rejected", "red", "x-circle"),
        RequestStatus::Cancelled => ("Cancelled", "gray", "slash-circle"),
    };
    StatusBadge { label, color, icon }
}

pub fn limit_kind_label(kind: LimitKind) -> &'static str {
    match kind {
        LimitKind::Weekly => "Weekly limit",
        LimitKind::Monthly => "Monthly limit",
        LimitKind::Flexible => "Flexible limits",
    }
}
