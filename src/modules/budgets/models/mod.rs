mod budget;

pub use budget::{Budget, BudgetStatus};
