//! HTTP behavior tests for the client and page layer, against a mock server

use chrono::NaiveDate;
use hospdash_api::handlers::appointments::{AppointmentResponse, AppointmentSummary};
use hospdash_api::handlers::drug_cost::{DrugCostResponse, DrugCostSummary};
use hospdash_api::handlers::revenue::{InitResponse, QueryResponse, SummaryResponse};
use hospdash_client::{ApiClient, InpatientRevenuePage};
use hospdash_client::pages::{DrugCostPage, OutpatientAppointmentPage};
use hospdash_core::config::ClientConfig;
use hospdash_core::types::{
    DateRange, DepartmentOption, DoctorOption, ErrorResponse, RevenueDetailRow, RevenueSummary,
    SortColumn,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn range() -> DateRange {
    DateRange::new(date(2025, 3, 1), date(2025, 3, 7)).unwrap()
}

fn client_for(server: &MockServer, timeout_secs: u64) -> ApiClient {
    let config = ClientConfig {
        base_url: server.uri(),
        request_timeout: timeout_secs,
        per_page: 20,
    };
    ApiClient::new(&config).expect("client must build")
}

fn init_response() -> InitResponse {
    InitResponse {
        departments: vec![
            DepartmentOption {
                code: "CARD".to_string(),
                name: "Cardiology".to_string(),
            },
            DepartmentOption {
                code: "NEUR".to_string(),
                name: "Neurology".to_string(),
            },
        ],
        doctors: vec![
            DoctorOption {
                id: 1,
                name: "Amara Okafor".to_string(),
                department_code: Some("CARD".to_string()),
            },
            DoctorOption {
                id: 2,
                name: "Chen Wei".to_string(),
                department_code: Some("NEUR".to_string()),
            },
        ],
        default_range: range(),
        coverage: DateRange::new(date(2024, 1, 1), date(2025, 3, 31)).unwrap(),
    }
}

fn detail_row(day: u32, doctor_id: i64, revenue: i64) -> RevenueDetailRow {
    RevenueDetailRow {
        date: date(2025, 3, day),
        department_code: "CARD".to_string(),
        department_name: "Cardiology".to_string(),
        doctor_id,
        doctor_name: format!("Doctor {doctor_id}"),
        revenue: Decimal::from(revenue),
        cost: Decimal::from(revenue / 2),
        yoy_pct: Some(5.0),
        mom_pct: Some(1.5),
    }
}

fn summary_response() -> SummaryResponse {
    SummaryResponse {
        range: range(),
        summary: RevenueSummary {
            total_revenue: Decimal::from(4800),
            total_cost: Decimal::from(2400),
            yoy_pct: Some(8.2),
            mom_pct: Some(-1.4),
            row_count: 4,
        },
        trend: Vec::new(),
        generated_at: chrono::Utc::now(),
    }
}

fn query_response() -> QueryResponse {
    QueryResponse {
        range: range(),
        rows: vec![
            detail_row(1, 1, 900),
            detail_row(1, 2, 1500),
            detail_row(2, 1, 1200),
            detail_row(2, 2, 1200),
        ],
        total: 4,
        pagination: None,
    }
}

async fn mount_happy_path(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/inpatient_total_revenue/init"))
        .respond_with(ResponseTemplate::new(200).set_body_json(init_response()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/inpatient_total_revenue/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_response()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/inpatient_total_revenue/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_response()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn page_loads_and_shapes_rows_locally() {
    let server = MockServer::start().await;
    mount_happy_path(&server).await;
    let client = client_for(&server, 5);

    let mut page = InpatientRevenuePage::open(&client, 3)
        .await
        .expect("page must open");
    page.refresh(&client).await;

    assert!(page.error().is_none());
    assert_eq!(page.rows().len(), 4);
    assert_eq!(page.summary().unwrap().row_count, 4);

    // sort by revenue descending, shaped locally
    page.toggle_sort(SortColumn::Revenue);
    let shaped = page.visible_rows();

    assert_eq!(shaped.rows.len(), 3);
    assert_eq!(shaped.rows[0].revenue, Decimal::from(1500));
    assert_eq!(shaped.pagination.total_count, 4);
    assert!(shaped.pagination.has_next);

    // doctor filter applies without another fetch
    page.select_doctors([1]);
    let shaped = page.visible_rows();
    assert_eq!(shaped.pagination.total_count, 2);
    assert!(shaped.rows.iter().all(|r| r.doctor_id == 1));
}

#[tokio::test]
async fn department_selection_narrows_doctor_options() {
    let server = MockServer::start().await;
    mount_happy_path(&server).await;
    let client = client_for(&server, 5);

    let mut page = InpatientRevenuePage::open(&client, 20)
        .await
        .expect("page must open");

    page.select_doctors([1, 2]);
    page.select_departments(["CARD".to_string()]);

    let available: Vec<i64> = page
        .filter()
        .available_doctors()
        .iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(available, vec![1]);

    let selected: Vec<i64> = page.filter().selected_doctors().iter().copied().collect();
    assert_eq!(selected, vec![1], "stale selection must be pruned");
}

#[tokio::test]
async fn server_error_surfaces_as_single_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/inpatient_total_revenue/init"))
        .respond_with(ResponseTemplate::new(200).set_body_json(init_response()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/inpatient_total_revenue/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_response()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/inpatient_total_revenue/query"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(ErrorResponse::new("Report backend unavailable", "INTERNAL")),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let mut page = InpatientRevenuePage::open(&client, 20)
        .await
        .expect("page must open");
    page.refresh(&client).await;

    let message = page.error().expect("failure must surface");
    assert!(message.contains("Report backend unavailable"), "{message}");
}

#[tokio::test]
async fn error_clears_after_next_successful_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/inpatient_total_revenue/init"))
        .respond_with(ResponseTemplate::new(200).set_body_json(init_response()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/inpatient_total_revenue/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_response()))
        .mount(&server)
        .await;
    // first query fails, every later one succeeds
    Mock::given(method("GET"))
        .and(path("/api/inpatient_total_revenue/query"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/inpatient_total_revenue/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_response()))
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let mut page = InpatientRevenuePage::open(&client, 20)
        .await
        .expect("page must open");

    page.refresh(&client).await;
    assert!(page.error().is_some());

    page.refresh(&client).await;
    assert!(page.error().is_none());
    assert_eq!(page.rows().len(), 4);
}

#[tokio::test]
async fn timeout_reports_the_fixed_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200).set_delay(Duration::from_millis(2500)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, 1);
    let error = client.health().await.expect_err("request must time out");

    assert_eq!(error.to_string(), "Request timed out");
}

#[tokio::test]
async fn drug_cost_page_holds_report() {
    let server = MockServer::start().await;
    let report = DrugCostResponse {
        range: range(),
        summary: DrugCostSummary {
            total_cost: Decimal::new(1_234_567, 2),
            avg_daily_cost: Decimal::new(176_366, 2),
            yoy_pct: Some(3.4),
            mom_pct: None,
        },
        series: Vec::new(),
        generated_at: chrono::Utc::now(),
    };
    Mock::given(method("GET"))
        .and(path("/api/drug-cost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&report))
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let mut page = DrugCostPage::new();
    page.refresh(&client).await;

    assert!(page.error().is_none());
    let held = page.report().expect("report must be held");
    assert_eq!(held.summary.total_cost, Decimal::new(1_234_567, 2));
    assert!(held.summary.mom_pct.is_none());
}

#[tokio::test]
async fn appointment_page_holds_report() {
    let server = MockServer::start().await;
    let report = AppointmentResponse {
        range: range(),
        summary: AppointmentSummary {
            scheduled: 1680,
            completed: 1470,
            cancelled: 210,
            completion_rate_pct: Some(87.5),
            yoy_pct: Some(2.1),
            mom_pct: Some(0.4),
        },
        series: Vec::new(),
        generated_at: chrono::Utc::now(),
    };
    Mock::given(method("GET"))
        .and(path("/api/outpatient-appointment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&report))
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let mut page = OutpatientAppointmentPage::new();
    page.set_range(range());
    page.refresh(&client).await;

    assert!(page.error().is_none());
    let held = page.report().expect("report must be held");
    assert_eq!(held.summary.scheduled, 1680);
    assert_eq!(
        held.summary.scheduled,
        held.summary.completed + held.summary.cancelled
    );
}
