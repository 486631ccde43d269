use omniport::app::MigrateError;
use omniport::config::HttpConfig;
use omniport::publisher::graphql::{SAVE_PAGE_MUTATION, SAVE_URL_MUTATION};
use omniport::publisher::{GraphqlPublisher, Publisher, SaveInput};
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn input() -> SaveInput {
    SaveInput {
        client_request_id: "64343164-3863-6439-3866-303062323034".into(),
        url: "https://example.com/post".into(),
        saved_at: Some("2023-10-21".into()),
        labels: vec!["IMPORT/Evernote".into()],
        source: "api".into(),
    }
}

async fn server_responding(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/graphql"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

fn publisher_for(server: &MockServer) -> GraphqlPublisher {
    GraphqlPublisher::new(
        &format!("{}/api/graphql", server.uri()),
        "secret-key",
        &HttpConfig::default(),
    )
    .unwrap()
}

async fn sent_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    serde_json::from_slice(&requests[0].body).unwrap()
}

#[tokio::test]
async fn publish_url_sends_mutation_with_auth() {
    let server = server_responding(ResponseTemplate::new(200).set_body_string(
        r#"{"data":{"saveUrl":{"url":"https://example.com/post","clientRequestId":"x"}}}"#,
    ))
    .await;

    let response = publisher_for(&server).publish_url(&input()).await.unwrap();
    assert!(response.contains(r#""saveUrl""#));

    let requests = server.received_requests().await.unwrap();
    let headers = &requests[0].headers;
    assert_eq!(headers.get("authorization").unwrap(), "secret-key");
    assert_eq!(headers.get("content-type").unwrap(), "application/json");

    let body = sent_body(&server).await;
    assert_eq!(body["query"], SAVE_URL_MUTATION);
    let fields = &body["variables"]["input"];
    assert_eq!(fields["clientRequestId"], "64343164-3863-6439-3866-303062323034");
    assert_eq!(fields["state"], "ARCHIVED");
    assert_eq!(fields["savedAt"], "2023-10-21");
    assert_eq!(fields["labels"][0]["name"], "IMPORT/Evernote");
}

#[tokio::test]
async fn publish_article_embeds_title_and_content() {
    let server = server_responding(ResponseTemplate::new(200).set_body_string("{}")).await;

    publisher_for(&server)
        .publish_article(&input(), "A \"quoted\" title", "<en-note>body\n</en-note>")
        .await
        .unwrap();

    let body = sent_body(&server).await;
    assert_eq!(body["query"], SAVE_PAGE_MUTATION);
    assert_eq!(body["variables"]["input"]["title"], "A \"quoted\" title");
    assert_eq!(
        body["variables"]["input"]["originalContent"],
        "<en-note>body\n</en-note>"
    );
}

#[tokio::test]
async fn non_200_is_rejected() {
    let server =
        server_responding(ResponseTemplate::new(500).set_body_string("internal error")).await;

    let err = publisher_for(&server).publish_url(&input()).await.unwrap_err();
    match err {
        MigrateError::PublishRejected { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn other_2xx_is_rejected() {
    let server = server_responding(ResponseTemplate::new(201)).await;
    let err = publisher_for(&server).publish_url(&input()).await.unwrap_err();
    assert!(matches!(err, MigrateError::PublishRejected { status: 201, .. }));
}

#[tokio::test]
async fn save_error_in_200_body_is_a_failure() {
    let server = server_responding(ResponseTemplate::new(200).set_body_string(
        r#"{"data":{"savePage":{"errorCodes":["BAD_DATA"],"message":"invalid content"}}}"#,
    ))
    .await;

    let err = publisher_for(&server)
        .publish_article(&input(), "t", "c")
        .await
        .unwrap_err();
    assert!(matches!(err, MigrateError::SaveError { .. }));
}

#[tokio::test]
async fn transport_failure_is_an_error() {
    let publisher =
        GraphqlPublisher::new("http://127.0.0.1:1/graphql", "k", &HttpConfig::default()).unwrap();
    assert!(matches!(
        publisher.publish_url(&input()).await,
        Err(MigrateError::Http(_))
    ));
}
