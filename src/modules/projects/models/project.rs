use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, EntityKind, Money, Record, Result};
use crate::modules::records::services::DerivedFields;
use crate::modules::records::validation::{require_text, validate_date_order};

/// Project ("obra") lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    InProgress,
    Paused,
    Finished,
    Cancelled,
}

impl ProjectStatus {
    /// Still consuming labour and materials
    pub fn is_active(&self) -> bool {
        matches!(self, ProjectStatus::Planning | ProjectStatus::InProgress)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub code: String,
    pub name: String,
    pub client_id: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    pub start_date: NaiveDate,
    pub estimated_end_date: NaiveDate,
    #[serde(default)]
    pub actual_end_date: Option<NaiveDate>,
    pub total_budget: Money,
    /// Completion, 0 to 100
    #[serde(default, with = "rust_decimal::serde::float")]
    pub progress_percent: Decimal,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub lead_architect: String,
}

impl Record for Project {
    const KIND: EntityKind = EntityKind::Project;
    const SORT_FIELDS: &'static [&'static str] = &[
        "code",
        "name",
        "start_date",
        "estimated_end_date",
        "progress_percent",
        "total_budget",
    ];
    const FILTER_FIELDS: &'static [&'static str] = &["client_id", "status", "city"];
    const UNIQUE_FIELD: Option<&'static str> = Some("code");

    fn unique_key(&self) -> Option<String> {
        Some(self.code.trim().to_string())
    }

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "code", &self.code)?;
        require_text(Self::KIND, "name", &self.name)?;
        require_text(Self::KIND, "client_id", &self.client_id)?;

        if self.progress_percent < Decimal::ZERO || self.progress_percent > Decimal::ONE_HUNDRED {
            return Err(AppError::constraint(format!(
                "project progress_percent must be between 0 and 100, got {}",
                self.progress_percent
            )));
        }

        validate_date_order(
            Self::KIND,
            "start_date",
            self.start_date,
            "estimated_end_date",
            self.estimated_end_date,
        )?;

        if let Some(actual_end_date) = self.actual_end_date {
            validate_date_order(
                Self::KIND,
                "start_date",
                self.start_date,
                "actual_end_date",
                actual_end_date,
            )?;
        }

        Ok(())
    }
}

impl DerivedFields for Project {}
