use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::calendar_date::CalendarDate;
use crate::models::request_status::RequestStatus;
use crate::types::{CompanyId, EmployeeId, VacationRequestId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot move vacation request from {from} to {to}")]
pub struct TransitionError {
    pub from: RequestStatus,
    pub to: RequestStatus,
}

/// A submitted set of vacation dates for one employee and one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacationRequest {
    pub id: VacationRequestId,
    pub company_id: CompanyId,
    pub employee_id: EmployeeId,
    pub target_year: i32,
    pub target_month: u32,
    pub dates: BTreeSet<CalendarDate>,
    pub submit_date: DateTime<Utc>,
    pub status: RequestStatus,
    pub note: Option<String>,
    pub reviewed_by: Option<EmployeeId>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_comment: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VacationRequest {
    pub fn new(
        company_id: CompanyId,
        employee_id: EmployeeId,
        (target_year, target_month): (i32, u32),
        dates: BTreeSet<CalendarDate>,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: VacationRequestId::new(),
            company_id,
            employee_id,
            target_year,
            target_month,
            dates,
            submit_date: now,
            status: RequestStatus::Pending,
            note,
            reviewed_by: None,
            reviewed_at: None,
            review_comment: None,
            cancelled_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn approve(
        &mut self,
        reviewer: EmployeeId,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        self.review(RequestStatus::Approved, reviewer, comment, now)
    }

    pub fn reject(
        &mut self,
        reviewer: EmployeeId,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        self.review(RequestStatus::Rejected, reviewer, comment, now)
    }

    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        self.ensure_pending(RequestStatus::Cancelled)?;
        self.status = RequestStatus::Cancelled;
        self.cancelled_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, RequestStatus::Pending)
    }

    pub fn covers_period(&self, year: i32, month: u32) -> bool {
        self.target_year == year && self.target_month == month
    }

    /// Dates in the store's `YYYY-MM-DD` encoding.
    pub fn date_strings(&self) -> Vec<String> {
        self.dates.iter().map(ToString::to_string).collect()
    }

    fn review(
        &mut self,
        to: RequestStatus,
        reviewer: EmployeeId,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        self.ensure_pending(to)?;
        self.status = to;
        self.reviewed_by = Some(reviewer);
        self.reviewed_at = Some(now);
        self.review_comment = comment;
        self.updated_at = now;
        Ok(())
    }

    fn ensure_pending(&self, to: RequestStatus) -> Result<(), TransitionError> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(TransitionError {
                from: self.status,
                to,
            })
        }
    }
}
