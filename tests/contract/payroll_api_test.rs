// Contract tests for payroll runs, work orders and inventory
//
// - payroll preview and recorded runs use the configured deduction rates
// - recorded payroll runs are append-only: PATCH and DELETE answer 409
// - work orders get a generated number and a derived subtotal
// - /inventory-items/low-stock is not shadowed by /inventory-items/{id}

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::http::StatusCode;
use actix_web::{test, App};
use rust_decimal_macros::dec;
use serde_json::json;

use helpers::{call_json, error_kind, payroll_payload, test_services};
use obras_admin::taxes::{NetPayPolicy, PricingContext, TaxRuleSet};
use obras_admin::AppServices;

/// Deductions larger than any salary: 90% + 50%
fn punitive_rules() -> TaxRuleSet {
    TaxRuleSet::default()
        .with_rate("social_security", dec!(0.9))
        .and_then(|rules| rules.with_rate("income_tax", dec!(0.5)))
        .unwrap()
}

#[actix_web::test]
async fn test_payroll_preview() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/payroll-runs/preview")
        .set_json(json!({"base_salary": "1000000"}))
        .to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["base_salary"], 1_000_000);
    assert_eq!(body["overtime_pay"], 0);
    assert_eq!(body["social_security_deduction"], 90_000);
    assert_eq!(body["income_tax_deduction"], 25_000);
    assert_eq!(body["total_deductions"], 115_000);
    assert_eq!(body["net_pay"], 885_000);
}

#[actix_web::test]
async fn test_payroll_preview_overtime_is_not_deducted() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/payroll-runs/preview")
        .set_json(json!({"base_salary": "1000000", "overtime_pay": "200000"}))
        .to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_deductions"], 115_000);
    assert_eq!(body["net_pay"], 1_085_000);
}

#[actix_web::test]
async fn test_payroll_preview_rejects_negative_salary() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/payroll-runs/preview")
        .set_json(json!({"base_salary": "-5"}))
        .to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_kind(&body), "invalid_amount");
}

#[actix_web::test]
async fn test_net_pay_policy_controls_excess_deductions() {
    let rejecting = AppServices::in_memory(PricingContext::new(punitive_rules(), NetPayPolicy::Reject));
    let app = test::init_service(App::new().configure(|cfg| rejecting.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/payroll-runs/preview")
        .set_json(json!({"base_salary": "1000"}))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_kind(&body), "invalid_amount");

    let clamping = AppServices::in_memory(PricingContext::new(
        punitive_rules(),
        NetPayPolicy::ClampToZero,
    ));
    let app = test::init_service(App::new().configure(|cfg| clamping.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/payroll-runs/preview")
        .set_json(json!({"base_salary": "1000"}))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_deductions"], 1_400);
    assert_eq!(body["net_pay"], 0);
}

#[actix_web::test]
async fn test_record_payroll_run() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let mut payload = payroll_payload("employee-7", 2_798_309);
    payload["net_pay"] = json!(1);

    let req = test::TestRequest::post().uri("/payroll-runs").set_json(payload).to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["period"], "2025-10");
    // 9% of 2_798_309 = 251_847.81, 2.5% = 69_957.725
    assert_eq!(body["social_security_deduction"], 251_848);
    assert_eq!(body["income_tax_deduction"], 69_958);
    assert_eq!(body["total_deductions"], 321_806);
    assert_eq!(body["net_pay"], 2_476_503);

    let req = test::TestRequest::get()
        .uri("/payroll-runs?employee_id=employee-7&period=2025-10")
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_payroll_runs_are_append_only() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/payroll-runs")
        .set_json(payroll_payload("employee-8", 1_000_000))
        .to_request();
    let (_, created) = call_json(&app, req).await;
    let id = created["id"].as_str().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/payroll-runs/{}", id))
        .set_json(json!({"base_salary": 5_000_000}))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_kind(&body), "immutable_record");

    let req = test::TestRequest::delete().uri(&format!("/payroll-runs/{}", id)).to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_kind(&body), "immutable_record");

    let req = test::TestRequest::get().uri(&format!("/payroll-runs/{}", id)).to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["base_salary"], 1_000_000);
}

#[actix_web::test]
async fn test_payroll_period_must_be_year_month() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    for period in ["2025-13", "2025/10", "25-10", "2025-+1"] {
        let mut payload = payroll_payload("employee-9", 1_000_000);
        payload["period"] = json!(period);

        let req = test::TestRequest::post().uri("/payroll-runs").set_json(payload).to_request();
        let (status, body) = call_json(&app, req).await;

        assert_eq!(status, StatusCode::CONFLICT, "period {}", period);
        assert_eq!(error_kind(&body), "constraint");
    }
}

#[actix_web::test]
async fn test_work_order_preview() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/work-orders/preview")
        .set_json(json!({"hours_worked": "7.5", "hourly_rate": "45000"}))
        .to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hours_worked"], 7.5);
    assert_eq!(body["subtotal"], 337_500);

    let req = test::TestRequest::post()
        .uri("/work-orders/preview")
        .set_json(json!({"hours_worked": "-1", "hourly_rate": "45000"}))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_kind(&body), "invalid_amount");
}

#[actix_web::test]
async fn test_create_work_order_generates_number() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/work-orders")
        .set_json(json!({
            "date": "2025-10-14",
            "project_id": "project-1",
            "employee_id": "employee-1",
            "description": "Encofrado de losa",
            "hours_worked": 8,
            "hourly_rate": 50_000
        }))
        .to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, StatusCode::CREATED);
    let number = body["number"].as_str().unwrap();
    assert!(number.starts_with("OT-202510-"), "unexpected number {}", number);
    assert_eq!(number.len(), "OT-202510-0000".len());
    assert_eq!(body["subtotal"], 400_000);
    assert_eq!(body["status"], "pending");
}

#[actix_web::test]
async fn test_low_stock_route_is_not_an_id() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    for (code, stock, minimum) in [("CEM-50", 5, 20), ("VAR-08", 120, 40), ("ARE-M3", 0, 3)] {
        let req = test::TestRequest::post()
            .uri("/inventory-items")
            .set_json(json!({
                "code": code,
                "name": format!("Material {}", code),
                "unit": "unidad",
                "unit_price": 58_000,
                "stock_on_hand": stock,
                "minimum_stock": minimum
            }))
            .to_request();
        let (status, _) = call_json(&app, req).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let req = test::TestRequest::get().uri("/inventory-items/low-stock").to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    let mut codes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["code"].as_str().unwrap())
        .collect();
    codes.sort();
    assert_eq!(codes, vec!["ARE-M3", "CEM-50"]);
}

#[actix_web::test]
async fn test_negative_work_order_inputs_are_invalid_amounts() {
    let services = test_services();
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    for (hours_worked, hourly_rate) in [(json!(8), json!(-50_000)), (json!(-8), json!(50_000))] {
        let req = test::TestRequest::post()
            .uri("/work-orders")
            .set_json(json!({
                "date": "2025-10-14",
                "project_id": "project-1",
                "employee_id": "employee-1",
                "hours_worked": hours_worked,
                "hourly_rate": hourly_rate
            }))
            .to_request();
        let (status, body) = call_json(&app, req).await;

        assert_eq!(
            status,
            StatusCode::UNPROCESSABLE_ENTITY,
            "hours {} rate {}",
            hours_worked,
            hourly_rate
        );
        assert_eq!(error_kind(&body), "invalid_amount");
    }

    let mut payload = payroll_payload("employee-10", 0);
    payload["base_salary"] = json!(-1_000);
    let req = test::TestRequest::post().uri("/payroll-runs").set_json(payload).to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_kind(&body), "invalid_amount");
}
