use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::calendar_date::CalendarDate;
use crate::models::vacation_request::VacationRequest;
use crate::repositories::vacation_store::VacationStoreTrait;
use crate::services::selection::CandidateSelection;
use crate::services::vacation_validator::validate_submission;
use crate::types::{CompanyId, EmployeeId, VacationRequestId};
use crate::utils::time::Clock;

/// Submission and review of vacation requests.
///
/// An employee holds at most one active (pending or approved) request per
/// target month; rejected or cancelled requests free the month again.
#[derive(Clone)]
pub struct VacationRequestService {
    store: Arc<dyn VacationStoreTrait>,
    clock: Clock,
}

impl VacationRequestService {
    pub fn new(store: Arc<dyn VacationStoreTrait>, clock: Clock) -> Self {
        Self { store, clock }
    }

    pub async fn submit(
        &self,
        company_id: CompanyId,
        employee_id: EmployeeId,
        (year, month): (i32, u32),
        selection: &CandidateSelection,
        note: Option<String>,
    ) -> Result<VacationRequest, AppError> {
        let now = (self.clock)();
        let policy = self
            .store
            .find_policy(company_id, year, month)
            .await?
            .ok_or_else(|| AppError::NotFound("Vacation policy not found".into()))?;

        if !policy.is_published() {
            return Err(AppError::BadRequest(
                "vacation policy is not published".into(),
            ));
        }
        if selection.is_empty() {
            return Err(AppError::BadRequest("no vacation dates selected".into()));
        }
        if let Some(outside) = selection
            .sorted()
            .into_iter()
            .find(|date| !date.is_in_period(year, month))
        {
            return Err(AppError::BadRequest(format!(
                "{} is outside {}-{:02}",
                outside, year, month
            )));
        }

        let outcome = validate_submission(&policy, selection.as_set(), year, month, now);
        if !outcome.is_valid() {
            tracing::info!(
                %company_id,
                %employee_id,
                reason = %outcome,
                "Vacation request rejected by policy"
            );
            return Err(AppError::LimitViolation(outcome));
        }

        let request = VacationRequest::new(
            company_id,
            employee_id,
            (year, month),
            selection.sorted(),
            note,
            now,
        );
        self.store.create_request_if_none_active(&request).await?;

        tracing::info!(
            request_id = %request.id,
            %employee_id,
            days = request.dates.len(),
            "Vacation request submitted"
        );
        Ok(request)
    }

    pub async fn approve(
        &self,
        id: VacationRequestId,
        reviewer: EmployeeId,
        comment: Option<String>,
    ) -> Result<VacationRequest, AppError> {
        let now = (self.clock)();
        let mut request = self.load(id).await?;
        request.approve(reviewer, comment, now)?;
        self.store.update_request(&request).await?;
        tracing::info!(request_id = %id, %reviewer, "Vacation request approved");
        Ok(request)
    }

    pub async fn reject(
        &self,
        id: VacationRequestId,
        reviewer: EmployeeId,
        comment: Option<String>,
    ) -> Result<VacationRequest, AppError> {
        let now = (self.clock)();
        let mut request = self.load(id).await?;
        request.reject(reviewer, comment, now)?;
        self.store.update_request(&request).await?;
        tracing::info!(request_id = %id, %reviewer, "Vacation request rejected");
        Ok(request)
    }

    /// Withdraws a pending request. Only its owner may cancel it.
    pub async fn cancel(
        &self,
        id: VacationRequestId,
        employee_id: EmployeeId,
    ) -> Result<VacationRequest, AppError> {
        let now = (self.clock)();
        let mut request = self.load(id).await?;
        if request.employee_id != employee_id {
            return Err(AppError::Forbidden(
                "only the requesting employee can cancel".into(),
            ));
        }
        request.cancel(now)?;
        self.store.update_request(&request).await?;
        tracing::info!(request_id = %id, %employee_id, "Vacation request cancelled");
        Ok(request)
    }

    /// Dates already covered by the employee's active requests for the month.
    pub async fn submitted_dates(
        &self,
        company_id: CompanyId,
        employee_id: EmployeeId,
        year: i32,
        month: u32,
    ) -> Result<BTreeSet<CalendarDate>, AppError> {
        let requests = self
            .store
            .find_requests_for_employee(company_id, employee_id, year, month)
            .await?;
        Ok(requests
            .into_iter()
            .filter(|request| request.status.is_active())
            .flat_map(|request| request.dates)
            .collect())
    }

    pub async fn list_for_period(
        &self,
        company_id: CompanyId,
        year: i32,
        month: u32,
    ) -> Result<Vec<VacationRequest>, AppError> {
        self.store
            .find_requests_for_period(company_id, year, month)
            .await
    }

    async fn load(&self, id: VacationRequestId) -> Result<VacationRequest, AppError> {
        self.store
            .find_request(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vacation request not found".into()))
    }
}
