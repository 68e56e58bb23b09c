//! Integration tests for the lookup pipeline over real HTTP.
//!
//! The blocking reqwest client is created, used and dropped inside
//! `spawn_blocking` so it never touches the async test runtime.

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use orcid_lookup::authority::{
    AuthorityLookupService, ChoiceAuthority, Confidence, LookupConfig, LookupError,
    RemoteQueryClient, XmlFetcher,
};
use orcid_lookup::ResultSet;
use wiremock::matchers::{method, path};
use wiremock::{Match, Mock, Request, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;

const FIELD: &str = "dc.contributor.author";

const THREE_AUTHORS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<authors>
  <author>
    <id>0000-0001-0000-0001</id>
    <name>Schweer, Andrea</name>
    <role>Repository Developer</role>
  </author>
  <author>
    <id>0000-0001-0000-0002</id>
    <name>Schweer, A.</name>
  </author>
  <author>
    <id>0000-0001-0000-0003</id>
    <name>Schweer, Andreas</name>
    <phone>+64 7 838 4000</phone>
  </author>
</authors>"#;

/// Matches when the raw query string equals the expected bytes exactly.
struct RawQuery(&'static str);

impl Match for RawQuery {
    fn matches(&self, request: &Request) -> bool {
        request.url.query() == Some(self.0)
    }
}

async fn run_blocking<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

fn search_service(search_url: String) -> AuthorityLookupService {
    AuthorityLookupService::new(LookupConfig::with_search_url(search_url)).unwrap()
}

#[tokio::test]
async fn test_lookup_matches_sends_registry_query_grammar() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/search/orcid-bio/"))
        .and(RawQuery("q=family-name:Schweer+AND+given-names:Andrea"))
        .respond_with(ResponseTemplate::new(200).set_body_string(THREE_AUTHORS))
        .expect(1)
        .mount(&server)
        .await;

    let search_url = format!("{}/search/orcid-bio/", server.uri());
    let result = run_blocking(move || {
        search_service(search_url).lookup_matches(FIELD, "Schweer, Andrea", -1, 0, 0, None)
    })
    .await;

    assert!(!result.is_error());
    assert_eq!(result.confidence(), Confidence::Ambiguous);
    assert_eq!(result.total_available(), 3);
    assert_eq!(result.default_selected(), Some(0));
    assert_eq!(result.candidates()[0].label, "Schweer, Andrea (Repository Developer)");
    assert_eq!(result.candidates()[2].label, "Schweer, Andreas phone: +64 7 838 4000");
}

#[tokio::test]
async fn test_lookup_matches_spaces_escaped_by_transport_only() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(RawQuery("q=family-name:Du%20Plessis+AND+given-names:Andries"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<authors><author><id>756d09d0</id><name>Du Plessis, Andries</name></author></authors>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let search_url = format!("{}/search/", server.uri());
    let result = run_blocking(move || {
        search_service(search_url).lookup_matches(FIELD, "Du Plessis, Andries", -1, 0, 0, None)
    })
    .await;

    assert_eq!(result.confidence(), Confidence::Uncertain);
    assert_eq!(result.default_selected(), None);
    assert!(!result.has_more());
}

#[tokio::test]
async fn test_lookup_matches_hash_in_name_keeps_given_names_clause() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(RawQuery("q=family-name:Smith%231+AND+given-names:John"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<authors><author><id>0000-0003</id><name>Smith#1, John</name></author></authors>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let search_url = format!("{}/search/", server.uri());
    let result = run_blocking(move || {
        search_service(search_url).lookup_matches(FIELD, "Smith#1, John", -1, 0, 0, None)
    })
    .await;

    assert!(!result.is_error());
    assert_eq!(result.confidence(), Confidence::Uncertain);
    assert_eq!(result.candidates()[0].authority_key, "0000-0003");
}

#[tokio::test]
async fn test_lookup_matches_window_reports_more() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(THREE_AUTHORS))
        .mount(&server)
        .await;

    let search_url = format!("{}/search/", server.uri());
    let result = run_blocking(move || {
        search_service(search_url).lookup_matches(FIELD, "Schweer, Andrea", -1, 1, 1, None)
    })
    .await;

    assert_eq!(result.candidates().len(), 1);
    assert_eq!(result.candidates()[0].authority_key, "0000-0001-0000-0002");
    assert_eq!(result.window_start(), 1);
    assert!(result.has_more());
}

#[tokio::test]
async fn test_lookup_best_match_over_http() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(THREE_AUTHORS))
        .expect(1)
        .mount(&server)
        .await;

    let search_url = format!("{}/search/", server.uri());
    let result = run_blocking(move || {
        search_service(search_url).lookup_best_match(FIELD, "Schweer, Andrea", -1, None)
    })
    .await;

    assert_eq!(result.candidates().len(), 1);
    assert_eq!(result.candidates()[0].authority_key, "0000-0001-0000-0001");
    assert_eq!(result.total_available(), 3);
    assert_eq!(result.confidence(), Confidence::Ambiguous);
    assert!(result.has_more());
}

#[tokio::test]
async fn test_lookup_matches_error_page_is_error_result() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let search_url = format!("{}/search/", server.uri());
    let result = run_blocking(move || {
        search_service(search_url).lookup_matches(FIELD, "Schweer, Andrea", -1, 0, 0, None)
    })
    .await;

    assert!(result.is_error());
}

#[tokio::test]
async fn test_lookup_matches_empty_body_is_error_result() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let search_url = format!("{}/search/", server.uri());
    let err = run_blocking(move || {
        let config = LookupConfig::with_search_url(search_url.clone());
        let fetcher = orcid_lookup::authority::HttpXmlFetcher::new(&config).unwrap();
        RemoteQueryClient::new(fetcher)
            .query(&search_url, Some("Andrea"), Some("Schweer"))
            .unwrap_err()
    })
    .await;

    assert!(matches!(err, LookupError::EmptyResponse { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_lookup_matches_slow_registry_times_out_once() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(THREE_AUTHORS)
                .set_delay(Duration::from_secs(3)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = LookupConfig {
        read_timeout_secs: 1,
        ..LookupConfig::with_search_url(format!("{}/search/", server.uri()))
    };
    let result = run_blocking(move || {
        AuthorityLookupService::new(config)
            .unwrap()
            .lookup_matches(FIELD, "Schweer, Andrea", -1, 0, 0, None)
    })
    .await;

    assert!(result.is_error(), "timed out lookup must be an error result");
}

#[tokio::test]
async fn test_resolve_label_reverse_lookup_over_http() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/author/reverse_lookup.xml"))
        .and(RawQuery("id=6d669816-7327-414c-a58a-c2287a54e712"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<author><displayname>Papoutsaki, Evangelia</displayname></author>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let config = LookupConfig::default()
        .reverse_lookup(format!("{}/author/reverse_lookup.xml", server.uri()));
    let label = run_blocking(move || {
        AuthorityLookupService::new(config).unwrap().resolve_label(
            FIELD,
            "6d669816-7327-414c-a58a-c2287a54e712",
            None,
        )
    })
    .await;

    assert_eq!(label, "Papoutsaki, Evangelia");
}

#[test]
fn test_resolve_label_unreachable_registry_returns_key() {
    let config = LookupConfig {
        connect_timeout_secs: 2,
        read_timeout_secs: 2,
        ..LookupConfig::default().reverse_lookup("http://127.0.0.1:9/reverse_lookup.xml")
    };
    let service = AuthorityLookupService::new(config).unwrap();
    assert_eq!(
        service.resolve_label(FIELD, "0000-0002-1825-0097", None),
        "0000-0002-1825-0097"
    );
}

#[test]
fn test_lookup_matches_unreachable_registry_is_error_result() {
    let config = LookupConfig {
        connect_timeout_secs: 2,
        read_timeout_secs: 2,
        ..LookupConfig::with_search_url("http://127.0.0.1:9/search/")
    };
    let service = AuthorityLookupService::new(config).unwrap();
    let result: ResultSet = service.lookup_matches(FIELD, "Schweer, Andrea", -1, 0, 0, None);
    assert!(result.is_error());
    assert_eq!(result.confidence(), Confidence::Error);
}

// ==================== Injected logging ====================

/// Transport that always refuses.
struct RefusingFetcher;

impl XmlFetcher for RefusingFetcher {
    fn fetch(&self, base_url: &str, query: &str) -> Result<String, LookupError> {
        Err(LookupError::transport(
            &format!("{base_url}?{query}"),
            "connection refused",
        ))
    }
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_failures_are_logged_to_injected_subscriber() {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let service = AuthorityLookupService::with_fetcher(LookupConfig::default(), RefusingFetcher);
    let result = tracing::subscriber::with_default(subscriber, || {
        service.lookup_matches("dc.creator", "Schweer, Andrea", -1, 0, 0, None)
    });

    assert!(result.is_error());
    let logs = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    assert!(logs.contains("Cannot look up matches"), "logs: {logs}");
    assert!(logs.contains("dc.creator"), "field should be logged: {logs}");
    assert!(logs.contains("Schweer, Andrea"), "text should be logged: {logs}");
}
