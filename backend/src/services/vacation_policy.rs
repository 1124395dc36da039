use std::sync::Arc;

use crate::error::AppError;
use crate::models::vacation_policy::{PolicySettings, VacationPolicy};
use crate::repositories::vacation_store::VacationStoreTrait;
use crate::types::CompanyId;
use crate::utils::time::Clock;

/// Administrator workflow around publishing monthly vacation limits.
#[derive(Clone)]
pub struct VacationPolicyService {
    store: Arc<dyn VacationStoreTrait>,
    clock: Clock,
}

impl VacationPolicyService {
    pub fn new(store: Arc<dyn VacationStoreTrait>, clock: Clock) -> Self {
        Self { store, clock }
    }

    pub async fn current_policy(
        &self,
        company_id: CompanyId,
        year: i32,
        month: u32,
    ) -> Result<VacationPolicy, AppError> {
        self.store
            .find_policy(company_id, year, month)
            .await?
            .ok_or_else(|| AppError::NotFound("Vacation policy not found".into()))
    }

    /// Creates or updates the policy for the period and marks it published.
    pub async fn publish(
        &self,
        company_id: CompanyId,
        year: i32,
        month: u32,
        settings: PolicySettings,
    ) -> Result<VacationPolicy, AppError> {
        let now = (self.clock)();
        let draft = match self.store.find_policy(company_id, year, month).await? {
            Some(existing) => existing.with_settings(settings)?,
            None => VacationPolicy::new(company_id, year, month, settings)?,
        };
        let policy = draft.published(now);
        self.store.save_policy(&policy).await?;

        tracing::info!(
            %company_id,
            year,
            month,
            max_days_per_month = policy.max_days_per_month(),
            max_days_per_week = policy.max_days_per_week(),
            deadline = %policy.deadline(),
            "Published vacation policy"
        );
        Ok(policy)
    }

    /// Withdraws publication. Limits stay stored for the next publish.
    pub async fn unpublish(
        &self,
        company_id: CompanyId,
        year: i32,
        month: u32,
    ) -> Result<VacationPolicy, AppError> {
        let policy = self
            .current_policy(company_id, year, month)
            .await?
            .unpublished();
        self.store.save_policy(&policy).await?;

        tracing::info!(%company_id, year, month, "Unpublished vacation policy");
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vacation_policy::LimitKind;
    use crate::repositories::vacation_store::MockVacationStoreTrait;
    use crate::utils::time::fixed_clock;
    use chrono::{DateTime, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 1, 9, 0, 0).unwrap()
    }

    fn settings(monthly: i64, weekly: i64) -> PolicySettings {
        PolicySettings {
            limit_kind: LimitKind::Flexible,
            max_days_per_month: monthly,
            max_days_per_week: weekly,
            deadline: Utc.with_ymd_and_hms(2025, 8, 20, 23, 59, 59).unwrap(),
        }
    }

    #[tokio::test]
    async fn publish_creates_policy_when_missing() {
        let company = CompanyId::new();
        let mut store = MockVacationStoreTrait::new();
        store
            .expect_find_policy()
            .returning(|_, _, _| Ok(None));
        store
            .expect_save_policy()
            .withf(|policy| policy.is_published() && policy.max_days_per_month() == 8)
            .times(1)
            .returning(|_| Ok(()));

        let service = VacationPolicyService::new(Arc::new(store), fixed_clock(now()));
        let policy = service
            .publish(company, 2025, 9, settings(8, 2))
            .await
            .unwrap();
        assert_eq!(policy.published_at(), Some(now()));
        assert_eq!(policy.company_id(), company);
    }

    #[tokio::test]
    async fn publish_rejects_negative_limits_without_saving() {
        let mut store = MockVacationStoreTrait::new();
        store
            .expect_find_policy()
            .returning(|_, _, _| Ok(None));
        store.expect_save_policy().never();

        let service = VacationPolicyService::new(Arc::new(store), fixed_clock(now()));
        let err = service
            .publish(CompanyId::new(), 2025, 9, settings(-1, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn unpublish_missing_policy_is_not_found() {
        let mut store = MockVacationStoreTrait::new();
        store
            .expect_find_policy()
            .returning(|_, _, _| Ok(None));

        let service = VacationPolicyService::new(Arc::new(store), fixed_clock(now()));
        let err = service
            .unpublish(CompanyId::new(), 2025, 9)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let mut store = MockVacationStoreTrait::new();
        store
            .expect_find_policy()
            .returning(|_, _, _| Err(AppError::InternalServerError(anyhow::anyhow!("offline"))));

        let service = VacationPolicyService::new(Arc::new(store), fixed_clock(now()));
        let err = service
            .current_policy(CompanyId::new(), 2025, 9)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INTERNAL_SERVER_ERROR");
    }
}
