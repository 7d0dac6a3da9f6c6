//! HTTP client implementation.
//!
//! This module provides the concrete implementation of `SearchProvider`
//! on top of `reqwest`.

use async_trait::async_trait;
use reqwest::{header, Method};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use super::requests::{self, API_KEY_HEADER, APPLICATION_ID_HEADER};
use super::transport_config::TransportConfig;
use crate::errors::SearchError;
use crate::interfaces::SearchProvider;
use search_demo_shared::{
    host::{ACCEPT_READ, ACCEPT_WRITE},
    CallKind, HostDescriptor, Record, SaveObjectsResponse, SearchParams, SearchResponse,
    TaskStatus,
};

/// Client for the hosted search service's REST API.
///
/// Requests go to the hosts whose accept tag covers the call kind, in list
/// order. A transport failure on one host moves on to the next; any HTTP
/// response, success or not, ends the call.
///
/// # Example
///
/// ```ignore
/// let mut client = HttpSearchClient::new("applicationId", "apiKey")?;
/// client.set_hosts(vec![HostDescriptor::new("http", "localhost:3000", 1)]);
/// let response = client.search("poemas", &SearchParams::new("fuera")).await?;
/// ```
pub struct HttpSearchClient {
    http: reqwest::Client,
    application_id: String,
    api_key: String,
    hosts: Vec<HostDescriptor>,
}

impl HttpSearchClient {
    /// Create a client with default transport settings.
    pub fn new(
        application_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, SearchError> {
        Self::with_transport(application_id, api_key, TransportConfig::default())
    }

    /// Create a client with custom transport settings.
    ///
    /// # Returns
    ///
    /// * `Ok(HttpSearchClient)` - A client routed to the service's default hosts
    /// * `Err(SearchError)` - If a credential is empty or the HTTP client cannot be built
    pub fn with_transport(
        application_id: impl Into<String>,
        api_key: impl Into<String>,
        transport: TransportConfig,
    ) -> Result<Self, SearchError> {
        let application_id = application_id.into();
        let api_key = api_key.into();

        if application_id.is_empty() {
            return Err(SearchError::validation("application id is required"));
        }
        if api_key.is_empty() {
            return Err(SearchError::validation("api key is required"));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(transport.connect_timeout)
            .timeout(transport.request_timeout)
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let hosts = Self::default_hosts(&application_id);

        info!(
            application_id = %application_id,
            hosts = hosts.len(),
            "Created search client"
        );

        Ok(Self {
            http,
            application_id,
            api_key,
            hosts,
        })
    }

    /// The service's standard host list for an application.
    fn default_hosts(application_id: &str) -> Vec<HostDescriptor> {
        let mut hosts = vec![
            HostDescriptor::new(
                "https",
                format!("{}-dsn.algolia.net", application_id),
                ACCEPT_READ,
            ),
            HostDescriptor::new(
                "https",
                format!("{}.algolia.net", application_id),
                ACCEPT_WRITE,
            ),
        ];
        hosts.extend((1..=3).map(|n| {
            HostDescriptor::https(format!("{}-{}.algolianet.com", application_id, n))
        }));
        hosts
    }

    /// Send one request, walking the eligible hosts in order.
    async fn request(
        &self,
        kind: CallKind,
        method: Method,
        path: &[&str],
        body: Option<Vec<u8>>,
    ) -> Result<Value, SearchError> {
        let mut attempts = Vec::new();

        for host in self.hosts.iter().filter(|h| h.accepts(kind)) {
            let url = match requests::endpoint(host, path) {
                Ok(url) => url,
                Err(e) => {
                    warn!(host = %host, error = %e, "Skipping host");
                    attempts.push(e.to_string());
                    continue;
                }
            };

            let mut builder = self
                .http
                .request(method.clone(), url)
                .header(APPLICATION_ID_HEADER, &self.application_id)
                .header(API_KEY_HEADER, &self.api_key)
                .header(header::ACCEPT, "application/json");
            if let Some(ref body) = body {
                builder = builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(body.clone());
            }

            match builder.send().await {
                Ok(response) => return Self::read_response(response).await,
                Err(e) => {
                    warn!(host = %host, error = %e, "Host unreachable");
                    attempts.push(format!("{}: {}", host.base_url(), e));
                }
            }
        }

        if attempts.is_empty() {
            return Err(SearchError::connection(format!(
                "no host accepts {} calls",
                kind
            )));
        }

        error!(kind = %kind, attempts = attempts.len(), "All hosts failed");
        Err(SearchError::connection(attempts.join("; ")))
    }

    async fn read_response(response: reqwest::Response) -> Result<Value, SearchError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        if !status.is_success() {
            error!(status = %status, body = %text, "Request failed");
            return Err(SearchError::api(status.as_u16(), requests::error_message(&text)));
        }

        debug!(status = %status, bytes = text.len(), "Response received");
        serde_json::from_str(&text).map_err(|e| SearchError::parse(e.to_string()))
    }
}

#[async_trait]
impl SearchProvider for HttpSearchClient {
    fn hosts(&self) -> Vec<HostDescriptor> {
        self.hosts.clone()
    }

    fn set_hosts(&mut self, hosts: Vec<HostDescriptor>) {
        debug!(hosts = hosts.len(), "Replacing host list");
        self.hosts = hosts;
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    async fn save_objects(
        &self,
        index_name: &str,
        records: &[Record],
    ) -> Result<SaveObjectsResponse, SearchError> {
        let body = requests::batch_body(records)?;
        let value = self
            .request(
                CallKind::Write,
                Method::POST,
                &requests::batch_path(index_name),
                Some(body),
            )
            .await?;
        requests::parse_save_response(value, records)
    }

    #[instrument(skip(self, params), fields(query = %params.query))]
    async fn search(
        &self,
        index_name: &str,
        params: &SearchParams,
    ) -> Result<SearchResponse, SearchError> {
        let body = requests::query_body(params)?;
        let value = self
            .request(
                CallKind::Read,
                Method::POST,
                &requests::query_path(index_name),
                Some(body),
            )
            .await?;
        requests::parse_search_response(value)
    }

    #[instrument(skip(self))]
    async fn task_status(&self, index_name: &str, task_id: i64) -> Result<TaskStatus, SearchError> {
        let task_id = task_id.to_string();
        let value = self
            .request(
                CallKind::Read,
                Method::GET,
                &requests::task_path(index_name, &task_id),
                None,
            )
            .await?;
        requests::parse_task_response(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn host_for(server: &MockServer, accept: u8) -> HostDescriptor {
        let authority = server.uri().trim_start_matches("http://").to_string();
        HostDescriptor::new("http", authority, accept)
    }

    /// A host nothing listens on.
    fn dead_host(accept: u8) -> HostDescriptor {
        HostDescriptor::new("http", "127.0.0.1:9", accept)
    }

    fn client_with(hosts: Vec<HostDescriptor>) -> HttpSearchClient {
        let transport = TransportConfig::default()
            .with_connect_timeout(Duration::from_millis(500))
            .with_request_timeout(Duration::from_secs(5));
        let mut client =
            HttpSearchClient::with_transport("applicationId", "apiKey", transport).unwrap();
        client.set_hosts(hosts);
        client
    }

    #[test]
    fn test_default_hosts() {
        let client = HttpSearchClient::new("APP", "key").unwrap();
        let hosts = client.hosts();

        assert_eq!(hosts.len(), 5);
        assert_eq!(hosts[0].base_url(), "https://APP-dsn.algolia.net");
        assert!(hosts[0].accepts(CallKind::Read) && !hosts[0].accepts(CallKind::Write));
        assert_eq!(hosts[1].base_url(), "https://APP.algolia.net");
        assert!(hosts[1].accepts(CallKind::Write) && !hosts[1].accepts(CallKind::Read));
        assert_eq!(hosts[4].base_url(), "https://APP-3.algolianet.com");
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(matches!(
            HttpSearchClient::new("", "key"),
            Err(SearchError::ValidationError(_))
        ));
        assert!(matches!(
            HttpSearchClient::new("app", ""),
            Err(SearchError::ValidationError(_))
        ));
    }

    #[test]
    fn test_set_hosts_replaces_defaults_in_order() {
        let first = HostDescriptor::new("http", "localhost:3000", 1);
        let second = HostDescriptor::new("http", "localhost:3000", 2);
        let client = client_with(vec![first.clone(), second.clone(), first.clone()]);

        assert_eq!(client.hosts(), vec![first.clone(), second, first]);
    }

    #[tokio::test]
    async fn test_save_objects_sends_batch_with_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/1/indexes/poemas/batch"))
            .and(header_eq("X-Algolia-Application-Id", "applicationId"))
            .and(header_eq("X-Algolia-API-Key", "apiKey"))
            .and(body_json(json!({
                "requests": [{"action": "updateObject", "body": {"objectID": 1, "title": "El foo de la fuera"}}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "taskID": 7,
                "objectIDs": [1]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with(vec![host_for(&server, 2)]);
        let records = vec![Record::new(1).with_field("title", "El foo de la fuera")];
        let response = client.save_objects("poemas", &records).await.unwrap();

        assert_eq!(response.object_ids.len(), 1);
        assert_eq!(response.task_id, Some(7));
    }

    #[tokio::test]
    async fn test_calls_route_by_accept_tag() {
        let reads = MockServer::start().await;
        let writes = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/1/indexes/poemas/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": []})))
            .expect(1)
            .mount(&reads)
            .await;
        Mock::given(method("POST"))
            .and(path("/1/indexes/poemas/batch"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"objectIDs": [1]})))
            .expect(1)
            .mount(&writes)
            .await;

        let client = client_with(vec![host_for(&reads, 1), host_for(&writes, 2)]);
        client
            .save_objects("poemas", &[Record::new(1)])
            .await
            .unwrap();
        client
            .search("poemas", &SearchParams::new("fuera"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_host_falls_through_to_next() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/1/indexes/poemas/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hits": [{"objectID": 1, "title": "El foo de la fuera"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with(vec![dead_host(3), host_for(&server, 3)]);
        let response = client
            .search("poemas", &SearchParams::new("fuera"))
            .await
            .unwrap();

        assert_eq!(response.hits.len(), 1);
    }

    #[tokio::test]
    async fn test_http_error_does_not_fall_through() {
        let failing = MockServer::start().await;
        let healthy = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(json!({"message": "Invalid Application-ID or API key", "status": 403})),
            )
            .expect(1)
            .mount(&failing)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": []})))
            .expect(0)
            .mount(&healthy)
            .await;

        let client = client_with(vec![host_for(&failing, 3), host_for(&healthy, 3)]);
        let error = client
            .search("poemas", &SearchParams::new("fuera"))
            .await
            .unwrap_err();

        assert!(error.is_authentication());
        assert_eq!(
            error,
            SearchError::api(403, "Invalid Application-ID or API key")
        );
    }

    #[tokio::test]
    async fn test_not_found_with_plain_text_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string("msg: index [\"missing\"] not found"),
            )
            .mount(&server)
            .await;

        let client = client_with(vec![host_for(&server, 1)]);
        let error = client
            .search("missing", &SearchParams::new("fuera"))
            .await
            .unwrap_err();

        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_all_hosts_unreachable() {
        let client = client_with(vec![dead_host(2), dead_host(2)]);
        let error = client
            .save_objects("poemas", &[Record::new(1)])
            .await
            .unwrap_err();

        match error {
            SearchError::ConnectionError(msg) => assert_eq!(msg.matches("127.0.0.1:9").count(), 2),
            other => panic!("expected connection error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_eligible_host() {
        let client = client_with(vec![HostDescriptor::new("http", "localhost:3000", 1)]);
        let error = client
            .save_objects("poemas", &[Record::new(1)])
            .await
            .unwrap_err();

        assert_eq!(error, SearchError::connection("no host accepts write calls"));
    }

    #[tokio::test]
    async fn test_task_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/1/indexes/poemas/task/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "published"})))
            .mount(&server)
            .await;

        let client = client_with(vec![host_for(&server, 1)]);
        let status = client.task_status("poemas", 7).await.unwrap();
        assert_eq!(status, TaskStatus::Published);
    }

    #[tokio::test]
    async fn test_invalid_json_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("document indexed"))
            .mount(&server)
            .await;

        let client = client_with(vec![host_for(&server, 3)]);
        let error = client
            .save_objects("poemas", &[Record::new(1)])
            .await
            .unwrap_err();

        assert!(matches!(error, SearchError::ParseError(_)));
    }
}
