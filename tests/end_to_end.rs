//! End-to-end cycle scenarios against mock SEFAZ and portal endpoints.

use std::time::Duration;

use serde_json::Value;

mod common;

fn find_record<'a>(records: &'a [Value], state: &str, model: &str) -> &'a Value {
    records
        .iter()
        .find(|r| r["estado"] == state && r["modelo"] == model)
        .unwrap_or_else(|| panic!("no record for {}/{}", state, model))
}

fn all_green_portal() -> Vec<String> {
    vec![
        common::portal_row("PR", ["verde"; 5]),
        common::portal_row("SP", ["verde"; 5]),
    ]
}

#[tokio::test]
async fn healthy_probe_yields_online_record_with_latency() {
    let probe = common::start_mock_endpoint(
        200,
        "text/xml",
        common::wsdl_body(),
        Duration::from_millis(0),
    )
    .await;
    let portal = common::start_mock_endpoint(
        200,
        "text/html",
        common::portal_page(&all_green_portal()),
        Duration::from_millis(0),
    )
    .await;

    let config = common::test_config(
        format!("http://{}/nfce?wsdl", probe),
        format!("http://{}/disponibilidade.aspx", portal),
    );
    let (addr, _shutdown) = common::spawn_server(config).await;

    let response = reqwest::get(format!("http://{}/status", addr)).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["cache-control"],
        "no-store, no-cache, must-revalidate"
    );

    let records: Vec<Value> = response.json().await.unwrap();
    // Two states, two document models each.
    assert_eq!(records.len(), 4);

    let pr_nfce = find_record(&records, "PR", "NFCe");
    assert_eq!(pr_nfce["autorizacao"], "online");
    assert_eq!(pr_nfce["status_servico"], "online");
    assert!(pr_nfce["latency"].is_u64(), "probed pair carries latency");
    assert!(pr_nfce["details"].is_null());

    // Non-critical pairs come straight from the matrix, no latency.
    let sp_nfe = find_record(&records, "SP", "NFe");
    assert_eq!(sp_nfe["autorizacao"], "online");
    assert!(sp_nfe["latency"].is_null());
}

#[tokio::test]
async fn unreached_probe_cascades_offline_except_cancellation() {
    let probe = common::unreachable_addr().await;
    let portal = common::start_mock_endpoint(
        200,
        "text/html",
        common::portal_page(&all_green_portal()),
        Duration::from_millis(0),
    )
    .await;

    let config = common::test_config(
        format!("http://{}/nfce?wsdl", probe),
        format!("http://{}/disponibilidade.aspx", portal),
    );
    let (addr, _shutdown) = common::spawn_server(config).await;

    let records: Vec<Value> = reqwest::get(format!("http://{}/status", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let pr_nfce = find_record(&records, "PR", "NFCe");
    assert_eq!(pr_nfce["autorizacao"], "offline");
    assert_eq!(pr_nfce["status_servico"], "offline");
    assert_eq!(pr_nfce["retorno_autorizacao"], "offline");
    assert_eq!(pr_nfce["consulta"], "offline");
    // Voiding keeps the scraped value.
    assert_eq!(pr_nfce["inutilizacao"], "online");
    assert!(pr_nfce["details"].is_string());

    // The sibling NFe record is untouched by the override.
    let pr_nfe = find_record(&records, "PR", "NFe");
    assert_eq!(pr_nfe["autorizacao"], "online");
}

#[tokio::test]
async fn timeout_probe_is_offline() {
    let probe = common::start_silent_endpoint().await;
    let portal = common::start_mock_endpoint(
        200,
        "text/html",
        common::portal_page(&all_green_portal()),
        Duration::from_millis(0),
    )
    .await;

    let mut config = common::test_config(
        format!("http://{}/nfce?wsdl", probe),
        format!("http://{}/disponibilidade.aspx", portal),
    );
    config.probe.timeout_secs = 1;
    let (addr, _shutdown) = common::spawn_server(config).await;

    let records: Vec<Value> = reqwest::get(format!("http://{}/status", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let pr_nfce = find_record(&records, "PR", "NFCe");
    assert_eq!(pr_nfce["autorizacao"], "offline");
    let details = pr_nfce["details"].as_str().unwrap();
    assert!(details.contains("timeout"), "details: {}", details);
}

#[tokio::test]
async fn html_block_page_is_offline_despite_http_200() {
    let probe = common::start_mock_endpoint(
        200,
        "text/html",
        "<!DOCTYPE html><html><body>Access blocked by firewall</body></html>".to_string(),
        Duration::from_millis(0),
    )
    .await;
    let portal = common::start_mock_endpoint(
        200,
        "text/html",
        common::portal_page(&all_green_portal()),
        Duration::from_millis(0),
    )
    .await;

    let config = common::test_config(
        format!("http://{}/nfce?wsdl", probe),
        format!("http://{}/disponibilidade.aspx", portal),
    );
    let (addr, _shutdown) = common::spawn_server(config).await;

    let records: Vec<Value> = reqwest::get(format!("http://{}/status", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let pr_nfce = find_record(&records, "PR", "NFCe");
    assert_eq!(pr_nfce["autorizacao"], "offline");
    assert_eq!(pr_nfce["retorno_autorizacao"], "offline");
}

#[tokio::test]
async fn slow_probe_downgrades_to_unstable_without_cascade() {
    let probe = common::start_mock_endpoint(
        200,
        "text/xml",
        common::wsdl_body(),
        Duration::from_millis(300),
    )
    .await;
    let portal = common::start_mock_endpoint(
        200,
        "text/html",
        common::portal_page(&all_green_portal()),
        Duration::from_millis(0),
    )
    .await;

    let mut config = common::test_config(
        format!("http://{}/nfce?wsdl", probe),
        format!("http://{}/disponibilidade.aspx", portal),
    );
    config.probe.latency_threshold_ms = 50;
    let (addr, _shutdown) = common::spawn_server(config).await;

    let records: Vec<Value> = reqwest::get(format!("http://{}/status", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let pr_nfce = find_record(&records, "PR", "NFCe");
    assert_eq!(pr_nfce["autorizacao"], "instavel");
    assert_eq!(pr_nfce["status_servico"], "instavel");
    assert_eq!(pr_nfce["retorno_autorizacao"], "online");
    assert_eq!(pr_nfce["consulta"], "online");
}

#[tokio::test]
async fn redirect_is_judged_in_place_not_followed() {
    let (target, hits) = common::start_counting_endpoint(common::wsdl_body()).await;
    let probe = common::start_redirect_endpoint(
        format!("http://{}/nfce?wsdl", target),
        common::wsdl_body(),
    )
    .await;
    let portal = common::start_mock_endpoint(
        200,
        "text/html",
        common::portal_page(&all_green_portal()),
        Duration::from_millis(0),
    )
    .await;

    let config = common::test_config(
        format!("http://{}/nfce?wsdl", probe),
        format!("http://{}/disponibilidade.aspx", portal),
    );
    let (addr, _shutdown) = common::spawn_server(config).await;

    let records: Vec<Value> = reqwest::get(format!("http://{}/status", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // The 302 answer is the measurement; the Location target stays untouched.
    assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 0);

    let pr_nfce = find_record(&records, "PR", "NFCe");
    assert_eq!(pr_nfce["autorizacao"], "online");
    assert!(pr_nfce["latency"].is_u64());
}

#[tokio::test]
async fn layout_change_returns_502_and_persists_nothing() {
    let probe = common::start_mock_endpoint(
        200,
        "text/xml",
        common::wsdl_body(),
        Duration::from_millis(0),
    )
    .await;
    let portal = common::start_mock_endpoint(
        200,
        "text/html",
        "<html><body>portal em manutencao</body></html>".to_string(),
        Duration::from_millis(0),
    )
    .await;

    let config = common::test_config(
        format!("http://{}/nfce?wsdl", probe),
        format!("http://{}/disponibilidade.aspx", portal),
    );
    let (addr, _shutdown) = common::spawn_server(config).await;

    let response = reqwest::get(format!("http://{}/status", addr)).await.unwrap();
    assert_eq!(response.status(), 502);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "layout_changed");

    let history: Vec<Value> =
        reqwest::get(format!("http://{}/history?state=PR&documentType=NFCe", addr))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
    assert!(history.is_empty(), "nothing persisted on layout failure");
}
