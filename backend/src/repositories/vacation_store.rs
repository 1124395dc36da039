//! Store port for vacation policies and requests.
//!
//! Services receive the store as an injected `Arc<dyn VacationStoreTrait>`;
//! `InMemoryVacationStore` backs tests and the command-line checker.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::vacation_policy::VacationPolicy;
use crate::models::vacation_request::VacationRequest;
use crate::types::{CompanyId, EmployeeId, VacationRequestId};

/// Repository trait for vacation policy and request persistence.
///
/// This trait is designed to be mockable using mockall for testing.
/// Use `MockVacationStoreTrait` in unit tests to mock the behavior.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VacationStoreTrait: Send + Sync {
    /// Find the policy for a company and target month
    async fn find_policy(
        &self,
        company_id: CompanyId,
        year: i32,
        month: u32,
    ) -> Result<Option<VacationPolicy>, AppError>;

    /// Insert or replace the policy for its (company, year, month)
    async fn save_policy(&self, policy: &VacationPolicy) -> Result<(), AppError>;

    /// Find a request by ID
    async fn find_request(
        &self,
        id: VacationRequestId,
    ) -> Result<Option<VacationRequest>, AppError>;

    /// Find an employee's requests for one target month
    async fn find_requests_for_employee(
        &self,
        company_id: CompanyId,
        employee_id: EmployeeId,
        year: i32,
        month: u32,
    ) -> Result<Vec<VacationRequest>, AppError>;

    /// Find every request of a company for one target month
    async fn find_requests_for_period(
        &self,
        company_id: CompanyId,
        year: i32,
        month: u32,
    ) -> Result<Vec<VacationRequest>, AppError>;

    /// Create a new request unless the employee already holds an active
    /// (pending or approved) request for the same target month. The check and
    /// the insert happen atomically; a clash returns `Conflict`.
    async fn create_request_if_none_active(
        &self,
        request: &VacationRequest,
    ) -> Result<(), AppError>;

    /// Update an existing request
    async fn update_request(&self, request: &VacationRequest) -> Result<(), AppError>;
}

type PolicyKey = (CompanyId, i32, u32);

#[derive(Debug, Default)]
pub struct InMemoryVacationStore {
    policies: RwLock<HashMap<PolicyKey, VacationPolicy>>,
    requests: RwLock<HashMap<VacationRequestId, VacationRequest>>,
}

impl InMemoryVacationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_submission(mut requests: Vec<VacationRequest>) -> Vec<VacationRequest> {
    requests.sort_by_key(|request| request.submit_date);
    requests
}

#[async_trait]
impl VacationStoreTrait for InMemoryVacationStore {
    async fn find_policy(
        &self,
        company_id: CompanyId,
        year: i32,
        month: u32,
    ) -> Result<Option<VacationPolicy>, AppError> {
        let policies = self.policies.read().await;
        Ok(policies.get(&(company_id, year, month)).cloned())
    }

    async fn save_policy(&self, policy: &VacationPolicy) -> Result<(), AppError> {
        let (year, month) = policy.period();
        let mut policies = self.policies.write().await;
        policies.insert((policy.company_id(), year, month), policy.clone());
        Ok(())
    }

    async fn find_request(
        &self,
        id: VacationRequestId,
    ) -> Result<Option<VacationRequest>, AppError> {
        let requests = self.requests.read().await;
        Ok(requests.get(&id).cloned())
    }

    async fn find_requests_for_employee(
        &self,
        company_id: CompanyId,
        employee_id: EmployeeId,
        year: i32,
        month: u32,
    ) -> Result<Vec<VacationRequest>, AppError> {
        let requests = self.requests.read().await;
        let matching = requests
            .values()
            .filter(|request| {
                request.company_id == company_id
                    && request.employee_id == employee_id
                    && request.covers_period(year, month)
            })
            .cloned()
            .collect();
        Ok(sorted_by_submission(matching))
    }

    async fn find_requests_for_period(
        &self,
        company_id: CompanyId,
        year: i32,
        month: u32,
    ) -> Result<Vec<VacationRequest>, AppError> {
        let requests = self.requests.read().await;
        let matching = requests
            .values()
            .filter(|request| request.company_id == company_id && request.covers_period(year, month))
            .cloned()
            .collect();
        Ok(sorted_by_submission(matching))
    }

    async fn create_request_if_none_active(
        &self,
        request: &VacationRequest,
    ) -> Result<(), AppError> {
        let mut requests = self.requests.write().await;
        if requests.contains_key(&request.id) {
            return Err(AppError::Conflict(format!(
                "vacation request {} already exists",
                request.id
            )));
        }
        let clash = requests.values().any(|existing| {
            existing.company_id == request.company_id
                && existing.employee_id == request.employee_id
                && existing.covers_period(request.target_year, request.target_month)
                && existing.status.is_active()
        });
        if clash {
            return Err(AppError::Conflict(
                "vacation request already submitted for this month".into(),
            ));
        }
        requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn update_request(&self, request: &VacationRequest) -> Result<(), AppError> {
        let mut requests = self.requests.write().await;
        match requests.get_mut(&request.id) {
            Some(existing) => {
                *existing = request.clone();
                Ok(())
            }
            None => Err(AppError::NotFound("Vacation request not found".into())),
        }
    }
}
