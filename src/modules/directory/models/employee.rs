use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{EntityKind, Money, Record, Result};
use crate::modules::records::services::DerivedFields;
use crate::modules::records::validation::{require_text, validate_date_order, validate_email};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    Indefinite,
    Temporary,
    /// Hired for the duration of a specific project
    FixedWork,
}

/// Employee master record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Cédula de identidad
    pub national_id: String,
    pub first_names: String,
    pub last_names: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub birth_date: NaiveDate,
    pub hire_date: NaiveDate,
    pub position: String,
    /// Monthly base salary
    pub salary: Money,
    #[serde(default)]
    pub marital_status: String,
    pub contract_type: ContractType,
    /// IPS affiliation number
    #[serde(default)]
    pub social_security_number: String,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_names.trim(), self.last_names.trim())
    }
}

impl Record for Employee {
    const KIND: EntityKind = EntityKind::Employee;
    const SORT_FIELDS: &'static [&'static str] =
        &["last_names", "first_names", "hire_date", "position", "salary"];
    const FILTER_FIELDS: &'static [&'static str] = &["national_id", "position", "contract_type"];
    const UNIQUE_FIELD: Option<&'static str> = Some("national_id");

    fn unique_key(&self) -> Option<String> {
        Some(self.national_id.trim().to_string())
    }

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "national_id", &self.national_id)?;
        require_text(Self::KIND, "first_names", &self.first_names)?;
        require_text(Self::KIND, "last_names", &self.last_names)?;
        require_text(Self::KIND, "position", &self.position)?;
        validate_email(Self::KIND, &self.email)?;
        validate_date_order(
            Self::KIND,
            "birth_date",
            self.birth_date,
            "hire_date",
            self.hire_date,
        )
    }
}

impl DerivedFields for Employee {}
