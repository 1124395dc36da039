//! Vacation limits in force for one company and one target month.
//!
//! A policy is only ever built from a [`PolicyDraft`], so negative limits,
//! impossible target months and half-published states are rejected at
//! construction time instead of surfacing later inside the validator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::types::CompanyId;
use crate::validation::field_messages;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitKind {
    Weekly,
    Monthly,
    #[default]
    Flexible,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("invalid vacation policy: {}", .0.join(", "))]
    Invalid(Vec<String>),
}

/// Unvalidated policy shape, as received from an administrator or a store.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PolicyDraft {
    pub company_id: CompanyId,
    #[validate(range(min = 1, max = 9999))]
    pub target_year: i32,
    #[validate(range(min = 1, max = 12))]
    pub target_month: u32,
    /// 0 means unlimited.
    #[serde(default)]
    #[validate(range(min = 0))]
    pub max_days_per_month: i64,
    /// 0 means unlimited.
    #[serde(default)]
    #[validate(range(min = 0))]
    pub max_days_per_week: i64,
    #[serde(default)]
    pub limit_kind: LimitKind,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// The editable part of a policy, supplied when an administrator publishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicySettings {
    #[serde(default)]
    pub limit_kind: LimitKind,
    #[serde(default)]
    pub max_days_per_month: i64,
    #[serde(default)]
    pub max_days_per_week: i64,
    pub deadline: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PolicyDraft")]
pub struct VacationPolicy {
    company_id: CompanyId,
    target_year: i32,
    target_month: u32,
    max_days_per_month: u32,
    max_days_per_week: u32,
    limit_kind: LimitKind,
    deadline: DateTime<Utc>,
    is_published: bool,
    published_at: Option<DateTime<Utc>>,
}

impl TryFrom<PolicyDraft> for VacationPolicy {
    type Error = PolicyError;

    fn try_from(draft: PolicyDraft) -> Result<Self, Self::Error> {
        let mut problems = match draft.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => field_messages(&errors),
        };

        let max_days_per_month = u32::try_from(draft.max_days_per_month);
        if draft.max_days_per_month >= 0 && max_days_per_month.is_err() {
            problems.push("max_days_per_month: range".to_string());
        }
        let max_days_per_week = u32::try_from(draft.max_days_per_week);
        if draft.max_days_per_week >= 0 && max_days_per_week.is_err() {
            problems.push("max_days_per_week: range".to_string());
        }
        if !draft.is_published && draft.published_at.is_some() {
            problems.push("published_at: set_while_unpublished".to_string());
        }

        match (max_days_per_month, max_days_per_week) {
            (Ok(max_days_per_month), Ok(max_days_per_week)) if problems.is_empty() => Ok(Self {
                company_id: draft.company_id,
                target_year: draft.target_year,
                target_month: draft.target_month,
                max_days_per_month,
                max_days_per_week,
                limit_kind: draft.limit_kind,
                deadline: draft.deadline,
                is_published: draft.is_published,
                published_at: draft.published_at,
            }),
            _ => Err(PolicyError::Invalid(problems)),
        }
    }
}

impl From<&VacationPolicy> for PolicyDraft {
    fn from(policy: &VacationPolicy) -> Self {
        PolicyDraft {
            company_id: policy.company_id,
            target_year: policy.target_year,
            target_month: policy.target_month,
            max_days_per_month: i64::from(policy.max_days_per_month),
            max_days_per_week: i64::from(policy.max_days_per_week),
            limit_kind: policy.limit_kind,
            deadline: policy.deadline,
            is_published: policy.is_published,
            published_at: policy.published_at,
        }
    }
}

impl VacationPolicy {
    /// Builds an unpublished policy for the given period.
    pub fn new(
        company_id: CompanyId,
        target_year: i32,
        target_month: u32,
        settings: PolicySettings,
    ) -> Result<Self, PolicyError> {
        Self::try_from(PolicyDraft {
            company_id,
            target_year,
            target_month,
            max_days_per_month: settings.max_days_per_month,
            max_days_per_week: settings.max_days_per_week,
            limit_kind: settings.limit_kind,
            deadline: settings.deadline,
            is_published: false,
            published_at: None,
        })
    }

    /// Returns the next version of this policy with replaced limits and
    /// deadline. Publication state is carried over unchanged.
    pub fn with_settings(&self, settings: PolicySettings) -> Result<Self, PolicyError> {
        let mut draft = PolicyDraft::from(self);
        draft.limit_kind = settings.limit_kind;
        draft.max_days_per_month = settings.max_days_per_month;
        draft.max_days_per_week = settings.max_days_per_week;
        draft.deadline = settings.deadline;
        Self::try_from(draft)
    }

    pub fn published(mut self, now: DateTime<Utc>) -> Self {
        self.is_published = true;
        self.published_at = Some(now);
        self
    }

    /// Clears publication state. Limits and deadline are kept so that a
    /// reopened policy starts from its previous configuration.
    pub fn unpublished(mut self) -> Self {
        self.is_published = false;
        self.published_at = None;
        self
    }

    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    pub fn target_year(&self) -> i32 {
        self.target_year
    }

    pub fn target_month(&self) -> u32 {
        self.target_month
    }

    pub fn period(&self) -> (i32, u32) {
        (self.target_year, self.target_month)
    }

    pub fn max_days_per_month(&self) -> u32 {
        self.max_days_per_month
    }

    pub fn max_days_per_week(&self) -> u32 {
        self.max_days_per_week
    }

    pub fn limit_kind(&self) -> LimitKind {
        self.limit_kind
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    pub fn is_published(&self) -> bool {
        self.is_published
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    pub fn has_monthly_limit(&self) -> bool {
        self.max_days_per_month > 0
    }

    pub fn has_weekly_limit(&self) -> bool {
        self.max_days_per_week > 0
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.deadline
    }

    /// Published and still accepting submissions.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.is_published && !self.is_expired(now)
    }
}
