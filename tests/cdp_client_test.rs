//! Integration tests for the CDP client against a mock HTTP server

use cdp_report::adapters::cdp::{CdpClient, ProfileSource};
use cdp_report::config::{secret_string, CdpConfig};
use cdp_report::core::report::format_result_line;
use cdp_report::domain::{CdpError, Predicate, ProfileQuery, ReportError};
use mockito::{Matcher, Server};

const CUSTOMERS_PATH: &str = "/api/businessunits/4_bu/views/4_view/customers";

fn config(base_url: String) -> CdpConfig {
    CdpConfig {
        base_url,
        business_unit: "4_bu".to_string(),
        view: "4_view".to_string(),
        user_key: secret_string("AKey".to_string()),
        secret: secret_string("s3cr3t&x".to_string()),
        timeout_seconds: Some(10),
    }
}

fn country_query() -> ProfileQuery {
    ProfileQuery::crm_ids(Predicate::eq("attributes.country", "GB"))
}

#[tokio::test]
async fn test_query_sends_credentials_and_query_text() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", CUSTOMERS_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("userKey".into(), "AKey".into()),
            Matcher::UrlEncoded("secret".into(), "s3cr3t&x".into()),
            Matcher::UrlEncoded(
                "query".into(),
                r#"SELECT attributes.crmId FROM profiles WHERE attributes.country = "GB""#.into(),
            ),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"totalCount": 7, "profiles": [
                {"attributes": {"crmId": ["111"]}},
                {"attributes": {"crmId": ["222"]}}
            ]}"#,
        )
        .create_async()
        .await;

    let client = CdpClient::new(&config(server.url())).unwrap();
    let result = client.query(&country_query()).await.unwrap();

    assert_eq!(result.total_count(), Some(7));
    assert_eq!(result.profiles.len(), 2);
    assert_eq!(result.profiles[1].crm_id(), Some("222"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_200_is_upstream_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", CUSTOMERS_PATH)
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"errorCode": 403005, "errorMessage": "Unauthorized user"}"#)
        .create_async()
        .await;

    let client = CdpClient::new(&config(server.url())).unwrap();
    let err = client.query(&country_query()).await.unwrap_err();

    match err {
        ReportError::Cdp(CdpError::Upstream { status, body }) => {
            assert_eq!(status, 403);
            assert!(body.contains("Unauthorized user"));
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", CUSTOMERS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = CdpClient::new(&config(server.url())).unwrap();
    let err = client.query(&country_query()).await.unwrap_err();

    match err {
        ReportError::Cdp(CdpError::Decode { body, .. }) => {
            assert_eq!(body, "<html>maintenance</html>");
        }
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_profiles_is_schema_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", CUSTOMERS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"totalCount": 3}"#)
        .create_async()
        .await;

    let client = CdpClient::new(&config(server.url())).unwrap();
    let err = client.query(&country_query()).await.unwrap_err();

    assert!(matches!(err, ReportError::Cdp(CdpError::Schema(_))));
}

#[tokio::test]
async fn test_unreachable_server_is_connection_error_without_secrets() {
    // Nothing listens on the local discard port
    let client = CdpClient::new(&config("http://127.0.0.1:9".to_string())).unwrap();
    let err = client.query(&country_query()).await.unwrap_err();

    assert!(matches!(err, ReportError::Cdp(CdpError::Connection(_))));
    assert!(!err.to_string().contains("s3cr3t"));
    assert!(!err.to_string().contains("AKey"));
}

#[tokio::test]
async fn test_unreadable_profile_after_sample_is_ignored() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", CUSTOMERS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"totalCount": 9, "profiles": [
                {"attributes": {"crmId": ["1"]}},
                {"attributes": {"crmId": ["2"]}},
                {"attributes": {"crmId": ["3"]}},
                {"attributes": {"crmId": ["4"]}},
                {"attributes": {"crmId": ["5"]}},
                {"attributes": {"crmId": "6"}},
                {"attributes": null}
            ]}"#,
        )
        .create_async()
        .await;

    let client = CdpClient::new(&config(server.url())).unwrap();
    let result = client.query(&country_query()).await.unwrap();

    assert_eq!(result.total_count(), Some(9));
    assert_eq!(
        format_result_line("Total users", &result),
        "Total users: 9\t(1, 2, 3, 4, 5, ...)"
    );
}
