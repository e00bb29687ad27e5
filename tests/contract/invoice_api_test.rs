// Contract tests for the /invoices scope and the invoice total preview
//
// Drives the full route table in-process over in-memory gateways:
// - created invoices carry vat, withholding and total derived from subtotal
// - updates recompute derived fields and ignore client-supplied ones
// - errors use the {"error": {code, kind, message}} envelope

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{test, App};
use serde_json::json;

use helpers::{call_json, error_kind, invoice_payload, test_services};

#[actix_web::test]
async fn test_create_invoice_derives_totals() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/invoices")
        .set_json(invoice_payload("001-001-0000001", 1_000_000))
        .to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].is_string());
    assert!(body["created_at"].is_string());
    assert_eq!(body["subtotal"], 1_000_000);
    assert_eq!(body["vat"], 100_000);
    assert_eq!(body["withholding"], 300_000);
    assert_eq!(body["total"], 1_100_000);
    assert_eq!(body["status"], "issued");
}

#[actix_web::test]
async fn test_client_supplied_totals_are_overwritten() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let mut payload = invoice_payload("001-001-0000002", 1_000_000);
    payload["vat"] = json!(1);
    payload["total"] = json!(1);

    let req = test::TestRequest::post().uri("/invoices").set_json(payload).to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["vat"], 100_000);
    assert_eq!(body["total"], 1_100_000);
}

#[actix_web::test]
async fn test_update_invoice_recomputes_totals() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/invoices")
        .set_json(invoice_payload("001-001-0000003", 1_000_000))
        .to_request();
    let (_, created) = call_json(&app, req).await;
    let id = created["id"].as_str().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/invoices/{}", id))
        .set_json(json!({"subtotal": 2_000_000, "vat": 5}))
        .to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["vat"], 200_000);
    assert_eq!(body["withholding"], 600_000);
    assert_eq!(body["total"], 2_200_000);
    assert_eq!(body["number"], "001-001-0000003");

    let req = test::TestRequest::get().uri(&format!("/invoices/{}", id)).to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2_200_000);
}

#[actix_web::test]
async fn test_invalid_invoice_update_is_rejected() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/invoices")
        .set_json(invoice_payload("001-001-0000004", 500_000))
        .to_request();
    let (_, created) = call_json(&app, req).await;
    let id = created["id"].as_str().unwrap();

    // Due date before the issue date
    let req = test::TestRequest::patch()
        .uri(&format!("/invoices/{}", id))
        .set_json(json!({"due_date": "2025-09-01"}))
        .to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_kind(&body), "constraint");

    let req = test::TestRequest::get().uri(&format!("/invoices/{}", id)).to_request();
    let (_, body) = call_json(&app, req).await;
    assert_eq!(body["due_date"], "2025-10-31");
}

#[actix_web::test]
async fn test_duplicate_invoice_number_conflicts() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let payload = invoice_payload("001-001-0000005", 750_000);

    let req = test::TestRequest::post().uri("/invoices").set_json(&payload).to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);

    let req = test::TestRequest::post().uri("/invoices").set_json(&payload).to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_kind(&body), "constraint");
}

#[actix_web::test]
async fn test_unknown_invoice_is_not_found() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/invoices/does-not-exist").to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_kind(&body), "not_found");

    let req = test::TestRequest::patch()
        .uri("/invoices/does-not-exist")
        .set_json(json!({"notes": "x"}))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_list_invoices_filters_and_sorts() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    for (number, subtotal) in [
        ("001-001-0000010", 300_000),
        ("001-001-0000011", 900_000),
        ("001-001-0000012", 600_000),
    ] {
        let req = test::TestRequest::post()
            .uri("/invoices")
            .set_json(invoice_payload(number, subtotal))
            .to_request();
        let (status, _) = call_json(&app, req).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let mut draft = invoice_payload("001-001-0000013", 100_000);
    draft["status"] = json!("draft");
    let req = test::TestRequest::post().uri("/invoices").set_json(draft).to_request();
    call_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/invoices?status=issued&order_by=total&direction=desc")
        .to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    let totals: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|invoice| invoice["total"].as_u64().unwrap())
        .collect();
    assert_eq!(totals, vec![990_000, 660_000, 330_000]);
}

#[actix_web::test]
async fn test_list_rejects_unknown_sort_and_filter_fields() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/invoices?order_by=client_name").to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_kind(&body), "validation");

    let req = test::TestRequest::get().uri("/invoices?withholding=0").to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_kind(&body), "validation");

    let req = test::TestRequest::get().uri("/invoices?direction=sideways").to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_malformed_json_uses_error_envelope() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/invoices")
        .insert_header(ContentType::json())
        .set_payload("{\"number\": ")
        .to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_kind(&body), "validation");
}

#[actix_web::test]
async fn test_missing_required_field_is_a_constraint_error() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/invoices")
        .set_json(json!({"number": "001-001-0000020", "subtotal": 1000}))
        .to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_kind(&body), "constraint");
}

#[actix_web::test]
async fn test_delete_invoice() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/invoices")
        .set_json(invoice_payload("001-001-0000030", 1_000))
        .to_request();
    let (_, created) = call_json(&app, req).await;
    let id = created["id"].as_str().unwrap();

    let req = test::TestRequest::delete().uri(&format!("/invoices/{}", id)).to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let req = test::TestRequest::get().uri(&format!("/invoices/{}", id)).to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete().uri(&format!("/invoices/{}", id)).to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_invoice_totals_preview() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/taxes/invoice-totals")
        .set_json(json!({"subtotal": "1000000"}))
        .to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subtotal"], 1_000_000);
    assert_eq!(body["vat"], 100_000);
    assert_eq!(body["withholding"], 300_000);
    assert_eq!(body["total"], 1_100_000);

    let req = test::TestRequest::post()
        .uri("/taxes/invoice-totals")
        .set_json(json!({"subtotal": "-1"}))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_kind(&body), "invalid_amount");
}

#[actix_web::test]
async fn test_tax_rates_are_listed() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/taxes/rates").to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rates"]["vat"], "0.10");
    assert_eq!(body["rates"]["withholding"], "0.30");
    assert_eq!(body["net_pay_policy"], "reject");
}

#[actix_web::test]
async fn test_negative_subtotal_is_an_invalid_amount() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/invoices")
        .set_json(invoice_payload("001-001-0000040", 0))
        .to_request();
    let (status, created) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap();

    let mut payload = invoice_payload("001-001-0000041", 0);
    payload["subtotal"] = json!(-1);
    let req = test::TestRequest::post().uri("/invoices").set_json(payload).to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_kind(&body), "invalid_amount");

    let req = test::TestRequest::patch()
        .uri(&format!("/invoices/{}", id))
        .set_json(json!({"subtotal": -1}))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_kind(&body), "invalid_amount");

    let req = test::TestRequest::get().uri(&format!("/invoices/{}", id)).to_request();
    let (_, body) = call_json(&app, req).await;
    assert_eq!(body["subtotal"], 0);
}
