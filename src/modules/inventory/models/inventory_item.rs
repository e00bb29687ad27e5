use serde::{Deserialize, Serialize};

use crate::core::{EntityKind, Money, Record, Result, SortOrder};
use crate::modules::records::services::DerivedFields;
use crate::modules::records::validation::require_text;

/// Stocked material or tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Unit of measure, e.g. "bolsa", "m3", "unidad"
    pub unit: String,
    pub unit_price: Money,
    #[serde(default)]
    pub stock_on_hand: u64,
    #[serde(default)]
    pub minimum_stock: u64,
    #[serde(default)]
    pub supplier_id: Option<String>,
}

impl InventoryItem {
    pub fn is_below_minimum(&self) -> bool {
        self.stock_on_hand < self.minimum_stock
    }
}

impl Record for InventoryItem {
    const KIND: EntityKind = EntityKind::InventoryItem;
    const SORT_FIELDS: &'static [&'static str] =
        &["code", "name", "category", "unit_price", "stock_on_hand"];
    const FILTER_FIELDS: &'static [&'static str] = &["category", "supplier_id", "unit"];
    const UNIQUE_FIELD: Option<&'static str> = Some("code");

    fn default_order() -> SortOrder {
        SortOrder::asc("name")
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.code.trim().to_string())
    }

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "code", &self.code)?;
        require_text(Self::KIND, "name", &self.name)?;
        require_text(Self::KIND, "unit", &self.unit)
    }
}

impl DerivedFields for InventoryItem {}
