// Record gateway contract
//
// The same scenarios run against the in-memory gateway and, when a MySQL
// server is available, the MySQL gateway:
// - create assigns id and timestamps
// - unknown ids are NotFound
// - duplicate natural keys are a Constraint violation
// - list honours filters and ordering
// - partial updates merge, reject unknown fields and re-validate
// - natural keys are compared trimmed and case-sensitively

use std::sync::Arc;

use serde_json::{json, Value};

use obras_admin::core::{AppError, ListQuery, RecordGateway, RecordPatch, SortOrder};
use obras_admin::core::record_from_json;
use obras_admin::modules::directory::models::{Client, TaxpayerType};
use obras_admin::modules::inventory::models::InventoryItem;
use obras_admin::records::{InMemoryGateway, MySqlGateway};

mod database_setup;
use database_setup::TestDatabase;

fn client(ruc: &str, business_name: &str, city: &str) -> Client {
    Client {
        ruc: ruc.to_string(),
        business_name: business_name.to_string(),
        trade_name: String::new(),
        address: String::new(),
        phone: String::new(),
        email: String::new(),
        city: city.to_string(),
        taxpayer_type: TaxpayerType::Vat,
    }
}

fn patch(value: Value) -> RecordPatch {
    value.as_object().cloned().expect("patch must be an object")
}

async fn create_and_find(gateway: Arc<dyn RecordGateway<Client>>) {
    let stored = gateway
        .create(client("80012345-6", "Constructora Guaraní S.A.", "Asunción"))
        .await
        .unwrap();

    assert!(!stored.id.is_empty());
    assert_eq!(stored.created_at, stored.updated_at);

    let found = gateway.find(&stored.id).await.unwrap().unwrap();
    assert_eq!(found.record, stored.record);

    assert!(gateway.find("no-such-id").await.unwrap().is_none());
}

async fn duplicate_key_rejected(gateway: Arc<dyn RecordGateway<Client>>) {
    gateway
        .create(client("80011111-1", "Hormigonera del Este", "Ciudad del Este"))
        .await
        .unwrap();

    let err = gateway
        .create(client("80011111-1", "Otra razón social", "Luque"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Constraint(_)), "got {:?}", err);
}

async fn invalid_record_rejected(gateway: Arc<dyn RecordGateway<Client>>) {
    let err = gateway
        .create(client("not-a-ruc", "Sin RUC", "Asunción"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Constraint(_)));
}

async fn list_filters_and_orders(gateway: Arc<dyn RecordGateway<Client>>) {
    for (ruc, name, city) in [
        ("80020001-1", "Zeta Obras", "Asunción"),
        ("80020002-2", "Alfa Construcciones", "Asunción"),
        ("80020003-3", "Mbareté Ingeniería", "Encarnación"),
    ] {
        gateway.create(client(ruc, name, city)).await.unwrap();
    }

    let names = |rows: Vec<obras_admin::core::StoredRecord<Client>>| {
        rows.into_iter()
            .map(|row| row.record.business_name)
            .collect::<Vec<_>>()
    };

    let all = gateway
        .list(&ListQuery::for_kind::<Client>())
        .await
        .unwrap();
    assert_eq!(
        names(all),
        vec!["Alfa Construcciones", "Mbareté Ingeniería", "Zeta Obras"]
    );

    let asuncion = gateway
        .list(
            &ListQuery::for_kind::<Client>()
                .filter("city", "Asunción")
                .ordered_by(SortOrder::desc("business_name")),
        )
        .await
        .unwrap();
    assert_eq!(names(asuncion), vec!["Zeta Obras", "Alfa Construcciones"]);

    let err = gateway
        .list(&ListQuery::for_kind::<Client>().filter("phone", "021"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

async fn update_merges_and_validates(gateway: Arc<dyn RecordGateway<Client>>) {
    let stored = gateway
        .create(client("80030001-4", "Techos Paraguay", "San Lorenzo"))
        .await
        .unwrap();

    let updated = gateway
        .update(&stored.id, patch(json!({"city": "Lambaré"})))
        .await
        .unwrap();
    assert_eq!(updated.record.city, "Lambaré");
    assert_eq!(updated.record.business_name, "Techos Paraguay");
    assert_eq!(updated.created_at, stored.created_at);
    assert!(updated.updated_at >= stored.updated_at);

    let unknown = gateway
        .update(&stored.id, patch(json!({"favourite_colour": "rojo"})))
        .await
        .unwrap_err();
    assert!(matches!(unknown, AppError::Constraint(_)));

    let malformed = gateway
        .update(&stored.id, patch(json!({"taxpayer_type": "pirate"})))
        .await
        .unwrap_err();
    assert!(matches!(malformed, AppError::Constraint(_)));

    let missing = gateway
        .update("no-such-id", patch(json!({"city": "Areguá"})))
        .await
        .unwrap_err();
    assert!(matches!(missing, AppError::NotFound(_)));
}

async fn delete_removes(gateway: Arc<dyn RecordGateway<Client>>) {
    let stored = gateway
        .create(client("80040001-7", "Pinturas Chaco", "Filadelfia"))
        .await
        .unwrap();

    gateway.delete(&stored.id).await.unwrap();
    assert!(gateway.find(&stored.id).await.unwrap().is_none());

    let err = gateway.delete(&stored.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

fn item(code: &str) -> InventoryItem {
    record_from_json(json!({
        "code": code,
        "name": "Cemento portland 50 kg",
        "unit": "bolsa",
        "unit_price": 58_000
    }))
    .unwrap()
}

async fn natural_keys_normalized(
    clients: Arc<dyn RecordGateway<Client>>,
    items: Arc<dyn RecordGateway<InventoryItem>>,
) {
    clients
        .create(client("80050001-2", "Aberturas Itá", "Itá"))
        .await
        .unwrap();
    let err = clients
        .create(client(" 80050001-2 ", "Aberturas Itá bis", "Itá"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Constraint(_)), "got {:?}", err);

    items.create(item("CEM-0042")).await.unwrap();
    items.create(item("cem-0042")).await.unwrap();
    let err = items.create(item("CEM-0042 ")).await.unwrap_err();
    assert!(matches!(err, AppError::Constraint(_)), "got {:?}", err);
}

fn memory() -> Arc<dyn RecordGateway<Client>> {
    Arc::new(InMemoryGateway::<Client>::new())
}

#[tokio::test]
async fn test_memory_create_and_find() {
    create_and_find(memory()).await;
}

#[tokio::test]
async fn test_memory_duplicate_key_rejected() {
    duplicate_key_rejected(memory()).await;
}

#[tokio::test]
async fn test_memory_invalid_record_rejected() {
    invalid_record_rejected(memory()).await;
}

#[tokio::test]
async fn test_memory_list_filters_and_orders() {
    list_filters_and_orders(memory()).await;
}

#[tokio::test]
async fn test_memory_update_merges_and_validates() {
    update_merges_and_validates(memory()).await;
}

#[tokio::test]
async fn test_memory_delete_removes() {
    delete_removes(memory()).await;
}

#[tokio::test]
async fn test_memory_natural_keys_normalized() {
    natural_keys_normalized(memory(), Arc::new(InMemoryGateway::<InventoryItem>::new())).await;
}

#[tokio::test]
#[ignore] // Requires MySQL connection
async fn test_mysql_gateway_contract() {
    let db = TestDatabase::new().await;
    let gateway: Arc<dyn RecordGateway<Client>> =
        Arc::new(MySqlGateway::<Client>::new(db.pool.clone()));

    create_and_find(gateway.clone()).await;
    db.cleanup().await;
    duplicate_key_rejected(gateway.clone()).await;
    db.cleanup().await;
    invalid_record_rejected(gateway.clone()).await;
    db.cleanup().await;
    list_filters_and_orders(gateway.clone()).await;
    db.cleanup().await;
    update_merges_and_validates(gateway.clone()).await;
    db.cleanup().await;
    natural_keys_normalized(
        gateway.clone(),
        Arc::new(MySqlGateway::<InventoryItem>::new(db.pool.clone())),
    )
    .await;
    db.cleanup().await;
    delete_removes(gateway).await;
}
