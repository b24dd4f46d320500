use tracing::debug;

use super::types::{Entity, EntitySearchResponse};
use super::{Endpoint, EntityLookup, WikiError, check_api_error};

/// Wikidata `wbsearchentities` client. Only the top-ranked entity is used.
#[derive(Clone)]
pub struct WikidataClient {
    endpoint: Endpoint,
    limit: usize,
}

impl WikidataClient {
    pub fn new(endpoint: Endpoint, limit: usize) -> Self {
        Self { endpoint, limit }
    }
}

impl EntityLookup for WikidataClient {
    async fn lookup_entity(&self, text: &str) -> Result<Option<Entity>, WikiError> {
        let limit = self.limit.to_string();
        let params = [
            ("action", "wbsearchentities"),
            ("search", text),
            ("language", "en"),
            ("limit", limit.as_str()),
        ];
        let body: EntitySearchResponse = self.endpoint.get_json(&params).await?;
        check_api_error(body.error)?;

        let entity = body
            .search
            .and_then(|entries| entries.into_iter().next())
            .and_then(|first| {
                let label = first.label.filter(|l| !l.trim().is_empty())?;
                Some(Entity {
                    label,
                    description: first.description,
                })
            });

        debug!(text, label = ?entity.as_ref().map(|e| &e.label), "wikidata lookup complete");
        Ok(entity)
    }
}

#[cfg(test)]
mod http_tests {
    use super::*;
    use reqwest::Client;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> WikidataClient {
        WikidataClient::new(
            Endpoint::with_base_url(Client::new(), &format!("{}/w/api.php", server.uri())),
            5,
        )
    }

    #[tokio::test]
    async fn returns_first_entity_label() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("action", "wbsearchentities"))
            .and(query_param("search", "Pies"))
            .and(query_param("language", "en"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "search": [
                    {"id": "Q144", "label": "Dog", "description": "domestic animal"},
                    {"id": "Q1", "label": "Pies (film)"}
                ]
            })))
            .mount(&server)
            .await;

        let entity = client(&server).lookup_entity("Pies").await.unwrap().unwrap();
        assert_eq!(entity.label, "Dog");
        assert_eq!(entity.description.as_deref(), Some("domestic animal"));
    }

    #[tokio::test]
    async fn no_results_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "search": []
            })))
            .mount(&server)
            .await;

        assert!(client(&server).lookup_entity("qwxz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn first_entity_without_label_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "search": [{"id": "Q9"}, {"id": "Q10", "label": "Later"}]
            })))
            .mount(&server)
            .await;

        assert!(client(&server).lookup_entity("x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client(&server).lookup_entity("x").await.unwrap_err();
        assert!(matches!(err, WikiError::Api { code: 404, .. }));
    }
}
