//! HTTP Contract Tests for PlugNotasClient
//!
//! These tests verify how the dispatcher builds requests and normalizes
//! responses:
//! - JSON content types are parsed, any other content type is kept raw
//! - 4xx / 5xx statuses are reported on the envelope, never retried
//! - transport failures surface as the envelope's `error` field
//! - the environment flag routes calls to exactly one of two base URLs

use std::time::Duration;

use plugnotas_sdk::client::PlugNotasClient;
use plugnotas_sdk::error::PlugNotasError;
use plugnotas_sdk::types::{ApiKey, DocumentId, Environment, QueryParams, ResponseBody};
use plugnotas_sdk::PlugNotas;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "2da392a6-79d2-4304-a8b7-959572c7e44d";

fn create_test_client(mock_server: &MockServer) -> PlugNotasClient {
    PlugNotasClient::builder()
        .api_key(ApiKey::new(API_KEY).unwrap())
        .production_url(mock_server.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_json_content_type_yields_parsed_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nfe/abc/resumo"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{"id":"abc","status":"CONCLUIDO"}]"#,
            "application/json; charset=utf-8",
        ))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let response = client.get("/nfe/abc/resumo", &QueryParams::new()).await.unwrap();

    assert_eq!(response.http_code, 200);
    assert_eq!(
        response.body,
        ResponseBody::Json(json!([{"id": "abc", "status": "CONCLUIDO"}]))
    );
    assert_eq!(
        response.info.content_type.as_deref(),
        Some("application/json; charset=utf-8")
    );
    assert!(response.error.is_none());
}

#[tokio::test]
async fn test_pdf_body_is_returned_unchanged() {
    let mock_server = MockServer::start().await;
    let pdf: Vec<u8> = vec![0x25, 0x50, 0x44, 0x46, 0x2d, 0x31, 0x2e, 0x34, 0x0a, 0xff, 0x00, 0xfe];
    Mock::given(method("GET"))
        .and(path("/nfe/abc/pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(pdf.clone(), "application/pdf"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let response = client.get("/nfe/abc/pdf", &QueryParams::new()).await.unwrap();

    assert_eq!(response.body, ResponseBody::Raw(pdf.clone()));
    assert_eq!(response.bytes(), Some(pdf.as_slice()));
}

#[tokio::test]
async fn test_json_looking_text_body_stays_raw() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nfe/abc/cce/status"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"a":1}"#, "text/plain"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let response = client
        .get("/nfe/abc/cce/status", &QueryParams::new())
        .await
        .unwrap();

    assert_eq!(response.body, ResponseBody::Raw(br#"{"a":1}"#.to_vec()));
}

#[tokio::test]
async fn test_path_without_leading_slash_is_normalized() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/empresa"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let response = client
        .post("empresa", &json!({"cpfCnpj": "08187168000160"}))
        .await
        .unwrap();

    assert_eq!(response.http_code, 201);
}

#[tokio::test]
async fn test_every_call_carries_api_key_and_json_content_type() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/certificado"))
        .and(header("x-api-key", API_KEY))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let response = client.get("/certificado", &QueryParams::new()).await.unwrap();

    assert!(response.is_success());
}

#[tokio::test]
async fn test_empty_query_pairs_are_dropped() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nfe/abc/xml"))
        .and(query_param("tipo", "autorizacao"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<xml/>", "application/xml"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let query = QueryParams::new()
        .with("tipo", "autorizacao")
        .with("vazio", "")
        .with("", "sem-nome");
    let response = client.get("/nfe/abc/xml", &query).await.unwrap();

    assert_eq!(response.http_code, 200);
    assert!(response.info.url.ends_with("/nfe/abc/xml?tipo=autorizacao"));
}

#[tokio::test]
async fn test_put_sends_json_body_with_api_key() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/empresa/08187168000160"))
        .and(header("x-api-key", API_KEY))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"razaoSocial": "Empresa Exemplo LTDA"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let response = client
        .put("empresa/08187168000160", &json!({"razaoSocial": "Empresa Exemplo LTDA"}))
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(response.info.method.as_str(), "PUT");
}

#[tokio::test]
async fn test_options_keeps_query() {
    let mock_server = MockServer::start().await;
    Mock::given(method("OPTIONS"))
        .and(path("/nfe"))
        .and(header("x-api-key", API_KEY))
        .and(query_param("versao", "4.00"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let query = QueryParams::new().with("versao", "4.00");
    let response = client.options("/nfe", &query).await.unwrap();

    assert_eq!(response.http_code, 204);
    assert!(response.body.is_empty());
    assert!(response.info.url.ends_with("/nfe?versao=4.00"));
}

#[tokio::test]
async fn test_truncated_body_keeps_status_and_sets_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await.unwrap();

        let response = "HTTP/1.1 200 OK\r\n\
                        Content-Type: application/pdf\r\n\
                        Content-Length: 1024\r\n\r\n%PDF-1.4";
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    let client = PlugNotasClient::builder()
        .api_key(ApiKey::new(API_KEY).unwrap())
        .production_url(format!("http://{}", addr))
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let response = client.get("/nfe/abc/pdf", &QueryParams::new()).await.unwrap();
    server.await.unwrap();

    assert_eq!(response.http_code, 200);
    assert_eq!(response.body, ResponseBody::Empty);
    assert!(response.error.is_some());
    assert_eq!(response.info.content_type.as_deref(), Some("application/pdf"));
    assert!(matches!(response.error_for_status(), Err(PlugNotasError::Transport(_))));
}

#[tokio::test]
async fn test_4xx_is_reported_on_envelope() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nfe/missing/resumo"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"message": "Nenhuma nota encontrada"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let response = client
        .get("/nfe/missing/resumo", &QueryParams::new())
        .await
        .unwrap();

    assert_eq!(response.http_code, 404);
    assert!(!response.is_success());
    assert!(response.error.is_none());
    assert_eq!(
        response.error_message().as_deref(),
        Some("Nenhuma nota encontrada")
    );

    match response.error_for_status() {
        Err(PlugNotasError::Api { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "Nenhuma nota encontrada");
        }
        other => panic!("expected api error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_5xx_is_not_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/nfe/abc/cancelamento"))
        .respond_with(ResponseTemplate::new(503).set_body_raw("upstream down", "text/plain"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let plugnotas = PlugNotas::builder()
        .api_key(ApiKey::new(API_KEY).unwrap())
        .production_url(mock_server.uri())
        .build()
        .unwrap();
    let response = plugnotas
        .cancel_nfe(&DocumentId::new("abc").unwrap(), "Erro de digitação")
        .await
        .unwrap();

    assert_eq!(response.http_code, 503);
    assert_eq!(response.text(), "upstream down");
}

#[tokio::test]
async fn test_transport_failure_sets_error_field() {
    let client = PlugNotasClient::builder()
        .api_key(ApiKey::new(API_KEY).unwrap())
        .production_url("http://127.0.0.1:1")
        .build()
        .unwrap();

    let response = client.get("/nfe/abc/pdf", &QueryParams::new()).await.unwrap();

    assert_eq!(response.http_code, 0);
    assert_eq!(response.body, ResponseBody::Empty);
    assert!(response.error.is_some());
    assert!(!response.is_success());
    assert!(matches!(response.error_for_status(), Err(PlugNotasError::Transport(_))));
}

#[tokio::test]
async fn test_environment_flag_routes_between_two_base_urls() {
    let production = MockServer::start().await;
    let sandbox = MockServer::start().await;
    for (server, name) in [(&production, "production"), (&sandbox, "sandbox")] {
        Mock::given(method("GET"))
            .and(path("/certificado"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"env": name})))
            .mount(server)
            .await;
    }

    let plugnotas = PlugNotas::builder()
        .api_key(ApiKey::new(API_KEY).unwrap())
        .production_url(production.uri())
        .sandbox_url(sandbox.uri())
        .build()
        .unwrap();

    let first = plugnotas.list_certificates().await.unwrap();
    assert_eq!(first.body.as_json().unwrap()["env"], json!("production"));

    plugnotas.set_production(false);
    assert_eq!(plugnotas.environment(), Environment::Sandbox);
    let second = plugnotas.list_certificates().await.unwrap();
    assert_eq!(second.body.as_json().unwrap()["env"], json!("sandbox"));

    plugnotas.set_environment(Environment::Production);
    let third = plugnotas.list_certificates().await.unwrap();
    assert_eq!(third.body.as_json().unwrap()["env"], json!("production"));

    assert_eq!(production.received_requests().await.unwrap().len(), 2);
    assert_eq!(sandbox.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_clones_share_environment_flag() {
    let sandbox = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/certificado"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&sandbox)
        .await;

    let plugnotas = PlugNotas::builder()
        .api_key(ApiKey::new(API_KEY).unwrap())
        .sandbox_url(sandbox.uri())
        .build()
        .unwrap();
    let clone = plugnotas.clone();
    plugnotas.set_production(false);

    let results = futures::future::join_all(vec![
        plugnotas.list_certificates(),
        clone.list_certificates(),
    ])
    .await;

    for result in results {
        assert!(result.unwrap().is_success());
    }
}

#[tokio::test]
async fn test_info_records_method_and_url() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/certificado/cert-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let response = client
        .delete("/certificado/cert-1", &QueryParams::new())
        .await
        .unwrap();

    assert_eq!(response.info.method, http::Method::DELETE);
    assert_eq!(
        response.info.url,
        format!("{}/certificado/cert-1", mock_server.uri())
    );
}
