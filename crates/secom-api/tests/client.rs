//! Endpoint-level tests against a mock MES quality service.

use std::time::Duration;

use anyhow::Result;
use secom_api::{ApiError, HttpError, SecomApiClient};
use secom_core::DefectType;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SecomApiClient {
    SecomApiClient::new(Some(server.uri()), None)
}

#[tokio::test]
async fn result_by_id_returns_matching_record() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quality/results/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultId": 1,
            "classification": -1,
            "predictedRisk": 0.12,
            "qualityScore": 97.5
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).get_result_by_id(1).await?;

    assert_eq!(result.result_id, Some(1));
    assert_eq!(result.classification, Some(-1));
    assert!(result.is_passed());
    assert!(!result.is_high_risk());
    Ok(())
}

#[tokio::test]
async fn every_request_sends_json_headers() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quality/results/7"))
        .and(header("Content-Type", "application/json"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "resultId": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).get_result_by_id(7).await?;
    Ok(())
}

#[tokio::test]
async fn result_by_id_maps_404_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quality/results/999"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such result"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_result_by_id(999)
        .await
        .unwrap_err();

    match err {
        ApiError::Http(http) => {
            assert_eq!(http.status(), Some(404));
            assert!(matches!(http, HttpError::NotFound { ref message } if message == "no such result"));
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn server_fault_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quality/results"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database offline"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_all_results(None, None)
        .await
        .unwrap_err();

    match err {
        ApiError::Http(HttpError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database offline");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn all_results_passes_page_and_size() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quality/results"))
        .and(query_param("page", "2"))
        .and(query_param("size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalPages": 4,
            "totalElements": 17,
            "size": 5,
            "number": 2,
            "numberOfElements": 5,
            "first": false,
            "last": false,
            "empty": false,
            "content": [{}, {}, {}, {}, {}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).get_all_results(Some(2), Some(5)).await?;

    assert_eq!(page.number, Some(2));
    assert_eq!(page.number_of_elements, Some(5));
    assert!(page.number_of_elements.unwrap() <= page.size.unwrap());
    Ok(())
}

#[tokio::test]
async fn unset_pagination_omits_query_parameters() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quality/results"))
        .and(query_param_is_missing("page"))
        .and(query_param_is_missing("size"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalElements": 0,
            "content": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).get_all_results(None, None).await?;
    Ok(())
}

#[tokio::test]
async fn passed_and_failed_hit_their_endpoints() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quality/results/passed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalElements": 2,
            "content": [{ "classification": -1 }, { "classification": -1 }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/quality/results/failed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalElements": 1,
            "content": [{ "classification": 1 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let passed = client.get_passed_results(None, None).await?;
    let failed = client.get_failed_results(None, None).await?;

    assert!(passed
        .content
        .unwrap()
        .iter()
        .all(|r| r.is_passed()));
    assert!(failed
        .content
        .unwrap()
        .iter()
        .all(|r| !r.is_passed()));
    Ok(())
}

#[tokio::test]
async fn result_by_lot_id_hits_lot_endpoint() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quality/results/lot/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultId": 9,
            "lot": { "lotId": 42, "lotNumber": "LOT-042" }
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).get_result_by_lot_id(42).await?;

    assert_eq!(result.lot.unwrap().lot_id, Some(42));
    Ok(())
}

#[tokio::test]
async fn high_risk_sends_default_threshold() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quality/results/high-risk"))
        .and(query_param("threshold", "0.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "resultId": 1, "predictedRisk": 0.91 },
            { "resultId": 2, "predictedRisk": 0.88 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server).get_high_risk_results(None).await?;

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.predicted_risk.unwrap() > 0.7));
    Ok(())
}

#[tokio::test]
async fn high_risk_sends_explicit_threshold() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quality/results/high-risk"))
        .and(query_param("threshold", "0.85"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server).get_high_risk_results(Some(0.85)).await?;

    assert!(results.is_empty());
    Ok(())
}

#[tokio::test]
async fn defect_lookup_uses_wire_name_as_path_segment() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quality/results/defect/dimensional_oor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "resultId": 4, "defectType": "dimensional_oor" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server)
        .get_results_by_defect_type(DefectType::DimensionalOor)
        .await?;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].defect_type, Some(DefectType::DimensionalOor));
    Ok(())
}

#[tokio::test]
async fn defect_lookup_with_no_matches_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quality/results/defect/electrical_fail"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no results for defect type"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_results_by_defect_type(DefectType::ElectricalFail)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Http(HttpError::NotFound { .. })
    ));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quality/results/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_result_by_id(3).await.unwrap_err();

    assert!(matches!(err, ApiError::Http(HttpError::Decode(_))));
}

#[tokio::test]
async fn slow_server_surfaces_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quality/results/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "resultId": 1 }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = SecomApiClient::new(Some(server.uri()), Some(Duration::from_millis(100)));
    let err = client.get_result_by_id(1).await.unwrap_err();

    match err {
        ApiError::Http(HttpError::Request(e)) => assert!(e.is_timeout()),
        other => panic!("expected transport error, got {:?}", other),
    }
}
