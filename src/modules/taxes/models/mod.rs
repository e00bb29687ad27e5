mod tax_rule_set;

pub use tax_rule_set::{NetPayPolicy, PricingContext, TaxRate, TaxRuleSet};
