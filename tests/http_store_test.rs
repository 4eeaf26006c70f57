use openwebui_reconcile::clients::HttpStore;
use openwebui_reconcile::model::{Group, Model, User};
use openwebui_reconcile::{ClientConfig, HttpProvider};
use pretty_assertions::assert_eq;
use reconcile_framework::{ManagedResource, Reconciler, ResourceStore, StoreError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(&server.uri(), "secret").unwrap()
}

fn desired_model() -> Model {
    Model {
        id: Some("research-assistant".to_string()),
        base_model_id: Some("gpt-4o".to_string()),
        name: Some("Research Assistant".to_string()),
        ..Default::default()
    }
}

fn model_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user_id": "u-admin",
        "base_model_id": "gpt-4o",
        "name": "Research Assistant",
        "params": {},
        "meta": null,
        "access_control": null,
        "is_active": false,
        "created_at": 1700000000,
        "updated_at": 1700000000
    })
}

// --- Models ---

#[tokio::test]
async fn model_create_posts_effective_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/models/create"))
        .and(header("authorization", "Bearer secret"))
        .and(body_partial_json(json!({
            "id": "research-assistant",
            "params": {},
            "access_control": null,
            "is_active": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_json("research-assistant")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = HttpProvider::connect(&config(&server)).unwrap();
    let created = provider.models.create(desired_model()).await.unwrap();

    assert_eq!(created.identity(), Some("research-assistant"));
    assert_eq!(created.user_id.as_deref(), Some("u-admin"));
    assert_eq!(created.created_at, Some(1700000000));
}

#[tokio::test]
async fn private_model_sends_owner_only_access() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/models/create"))
        .and(body_partial_json(json!({
            "access_control": {
                "read": {"group_ids": [], "user_ids": []},
                "write": {"group_ids": [], "user_ids": []}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_json("research-assistant")))
        .expect(1)
        .mount(&server)
        .await;

    let models = Reconciler::new(HttpStore::<Model>::new(&config(&server)).unwrap());
    let desired = Model {
        is_private: true,
        ..desired_model()
    };
    models.create(desired).await.unwrap();
}

#[tokio::test]
async fn model_read_restores_blank_identity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/models/model"))
        .and(query_param("id", "research-assistant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_json("")))
        .mount(&server)
        .await;

    let provider = HttpProvider::connect(&config(&server)).unwrap();
    let read = provider.models.read("research-assistant").await.unwrap();
    assert_eq!(read.id.as_deref(), Some("research-assistant"));
    assert_eq!(read.name.as_deref(), Some("Research Assistant"));
}

#[tokio::test]
async fn model_update_addresses_stored_identity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/models/model/update"))
        .and(query_param("id", "research-assistant"))
        .and(body_partial_json(json!({"id": "research-assistant"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_json("")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = HttpProvider::connect(&config(&server)).unwrap();
    let desired = Model {
        id: Some("renamed".to_string()),
        ..desired_model()
    };
    let updated = provider
        .models
        .update("research-assistant", desired)
        .await
        .unwrap();
    assert_eq!(updated.identity(), Some("research-assistant"));
}

#[tokio::test]
async fn model_not_found_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/models/model"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found"})))
        .mount(&server)
        .await;

    let provider = HttpProvider::connect(&config(&server)).unwrap();
    let err = provider.models.read("missing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn null_body_on_get_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/models/model"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let store = HttpStore::<Model>::new(&config(&server)).unwrap();
    assert_eq!(
        store.get("missing").await,
        Err(StoreError::NotFound("missing".to_string()))
    );
}

#[tokio::test]
async fn server_error_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/models/model/delete"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database is locked"))
        .mount(&server)
        .await;

    let store = HttpStore::<Model>::new(&config(&server)).unwrap();
    assert_eq!(
        store.delete("research-assistant").await,
        Err(StoreError::Status {
            status: 500,
            body: "database is locked".to_string()
        })
    );
}

#[tokio::test]
async fn invalid_validation_never_calls_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = HttpProvider::connect(&config(&server)).unwrap();
    let desired = Model {
        access_control: Some(Default::default()),
        ..desired_model()
    };
    let err = provider.models.create(desired).await.unwrap_err();
    assert_eq!(err.stage(), "validation");
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/models/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let store = HttpStore::<Model>::new(&config(&server)).unwrap();
    assert!(matches!(store.list().await, Err(StoreError::Decode(_))));
}

// --- Groups & users ---

#[tokio::test]
async fn group_delete_refused_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/groups/id/g-1/delete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(false)))
        .mount(&server)
        .await;

    let store = HttpStore::<Group>::new(&config(&server)).unwrap();
    assert!(matches!(
        store.delete("g-1").await,
        Err(StoreError::Status { status: 200, .. })
    ));
}

#[tokio::test]
async fn user_list_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [
                {"id": "u-1", "name": "Alice", "email": "alice@example.com", "role": "admin"},
                {"id": "u-2", "name": "Bob", "email": "bob@example.com", "role": "user"}
            ],
            "total": 2
        })))
        .mount(&server)
        .await;

    let provider = HttpProvider::connect(&config(&server)).unwrap();
    let users: Vec<User> = provider.users.list().await.unwrap();
    let emails: Vec<_> = users.iter().filter_map(|u| u.email.as_deref()).collect();
    assert_eq!(emails, vec!["alice@example.com", "bob@example.com"]);
}

#[tokio::test]
async fn user_create_goes_through_admin_add() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auths/add"))
        .and(body_partial_json(json!({
            "name": "Alice",
            "email": "alice@example.com",
            "role": "pending",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u-1",
            "name": "Alice",
            "email": "alice@example.com",
            "role": "pending"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = HttpProvider::connect(&config(&server)).unwrap();
    let desired = User {
        name: Some("Alice".to_string()),
        email: Some("alice@example.com".to_string()),
        password: Some("hunter2".to_string()),
        ..Default::default()
    };
    let created = provider.users.create(desired).await.unwrap();
    assert_eq!(created.identity(), Some("u-1"));
    assert_eq!(created.password, None);
}
