//! Application wiring: one record service per entity kind, all sharing the
//! same storage backend and pricing context, plus the route table.

use std::sync::Arc;

use actix_web::web;
use sqlx::MySqlPool;

use crate::core::{Record, RecordGateway, Result};
use crate::middleware::{json_error_handler, query_error_handler};
use crate::modules::budgets::models::Budget;
use crate::modules::directory::models::{Client, Employee, Supplier};
use crate::modules::inventory::models::InventoryItem;
use crate::modules::invoices::models::Invoice;
use crate::modules::payroll::models::PayrollRun;
use crate::modules::projects::models::Project;
use crate::modules::purchase_orders::models::PurchaseOrder;
use crate::modules::records::repositories::{InMemoryGateway, MySqlGateway};
use crate::modules::records::services::{DerivedFields, RecordService};
use crate::modules::taxes::models::PricingContext;
use crate::modules::work_orders::models::WorkOrder;
use crate::modules::{
    budgets, directory, health, inventory, invoices, payroll, projects, purchase_orders, taxes,
    work_orders,
};

/// Where records live
#[derive(Debug, Clone)]
pub enum Storage {
    /// Process-local maps, lost on restart
    Memory,
    MySql(MySqlPool),
}

impl Storage {
    /// Gateway for one entity kind on this backend
    pub fn gateway<R: Record>(&self) -> Arc<dyn RecordGateway<R>> {
        match self {
            Storage::Memory => Arc::new(InMemoryGateway::<R>::new()),
            Storage::MySql(pool) => Arc::new(MySqlGateway::<R>::new(pool.clone())),
        }
    }

    /// Round-trip to the backing store
    pub async fn ping(&self) -> Result<()> {
        match self {
            Storage::Memory => Ok(()),
            Storage::MySql(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
                Ok(())
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Storage::Memory => "memory",
            Storage::MySql(_) => "mysql",
        }
    }
}

/// Every service the HTTP layer needs, cheap to clone into each worker
#[derive(Clone)]
pub struct AppServices {
    pub storage: Storage,
    pub pricing: Arc<PricingContext>,
    pub employees: Arc<RecordService<Employee>>,
    pub clients: Arc<RecordService<Client>>,
    pub suppliers: Arc<RecordService<Supplier>>,
    pub projects: Arc<RecordService<Project>>,
    pub invoices: Arc<RecordService<Invoice>>,
    pub budgets: Arc<RecordService<Budget>>,
    pub purchase_orders: Arc<RecordService<PurchaseOrder>>,
    pub work_orders: Arc<RecordService<WorkOrder>>,
    pub inventory_items: Arc<RecordService<InventoryItem>>,
    pub payroll_runs: Arc<RecordService<PayrollRun>>,
}

impl AppServices {
    pub fn new(storage: Storage, pricing: PricingContext) -> Self {
        let pricing = Arc::new(pricing);

        Self {
            employees: service(&storage, &pricing),
            clients: service(&storage, &pricing),
            suppliers: service(&storage, &pricing),
            projects: service(&storage, &pricing),
            invoices: service(&storage, &pricing),
            budgets: service(&storage, &pricing),
            purchase_orders: service(&storage, &pricing),
            work_orders: service(&storage, &pricing),
            inventory_items: service(&storage, &pricing),
            payroll_runs: service(&storage, &pricing),
            storage,
            pricing,
        }
    }

    /// Services over in-memory gateways
    pub fn in_memory(pricing: PricingContext) -> Self {
        Self::new(Storage::Memory, pricing)
    }

    pub fn mysql(pool: MySqlPool, pricing: PricingContext) -> Self {
        Self::new(Storage::MySql(pool), pricing)
    }

    /// Register shared state, extractor error handlers and every route
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::Data::new(self.storage.clone()))
            .app_data(web::Data::new(self.pricing.clone()))
            .app_data(web::Data::new(self.employees.clone()))
            .app_data(web::Data::new(self.clients.clone()))
            .app_data(web::Data::new(self.suppliers.clone()))
            .app_data(web::Data::new(self.projects.clone()))
            .app_data(web::Data::new(self.invoices.clone()))
            .app_data(web::Data::new(self.budgets.clone()))
            .app_data(web::Data::new(self.purchase_orders.clone()))
            .app_data(web::Data::new(self.work_orders.clone()))
            .app_data(web::Data::new(self.inventory_items.clone()))
            .app_data(web::Data::new(self.payroll_runs.clone()));

        configure_routes(cfg);
    }
}

fn service<R: Record + DerivedFields>(
    storage: &Storage,
    pricing: &Arc<PricingContext>,
) -> Arc<RecordService<R>> {
    Arc::new(RecordService::new(storage.gateway::<R>(), pricing.clone()))
}

/// Route table; state must already be registered
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::controllers::configure)
        .configure(taxes::controllers::configure)
        .configure(directory::controllers::configure)
        .configure(projects::controllers::configure)
        .configure(invoices::controllers::configure)
        .configure(budgets::controllers::configure)
        .configure(purchase_orders::controllers::configure)
        .configure(work_orders::controllers::configure)
        .configure(inventory::controllers::configure)
        .configure(payroll::controllers::configure);
}
