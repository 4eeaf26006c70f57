use openwebui_reconcile::model::{AccessControl, AccessList, Group, Knowledge, Model, User};
use openwebui_reconcile::InMemorySystem;
use pretty_assertions::assert_eq;
use reconcile_framework::{ManagedResource, ServerQuirks};

fn desired_model(id: &str) -> Model {
    Model {
        id: Some(id.to_string()),
        base_model_id: Some("llama3".to_string()),
        name: Some("Helper".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_model_lifecycle() {
    let system = InMemorySystem::start();
    let models = system.provider.models.clone();

    // 1. Create: the caller-chosen identity is kept
    let created = models.create(desired_model("m-1")).await.unwrap();
    assert_eq!(created.identity(), Some("m-1"));

    // 2. Read
    let read = models.read("m-1").await.unwrap();
    assert_eq!(read, created);

    // 3. Update to private with explicit readers
    let readers = AccessControl {
        read: AccessList {
            group_ids: vec!["g-eng".to_string()],
            user_ids: vec![],
        },
        write: AccessList::default(),
    };
    let desired = Model {
        is_private: true,
        access_control: Some(readers.clone()),
        ..desired_model("m-1")
    };
    let updated = models.update("m-1", desired).await.unwrap();
    assert_eq!(updated.access_control, Some(readers));

    // 4. Back to public drops the grants
    let updated = models.update("m-1", desired_model("m-1")).await.unwrap();
    assert_eq!(updated.access_control, None);

    // 5. Delete
    models.delete("m-1").await.unwrap();
    assert!(models.read("m-1").await.unwrap_err().is_not_found());

    drop(models);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_server_assigned_identities() {
    let system = InMemorySystem::start();
    let provider = &system.provider;

    let group = provider
        .groups
        .create(Group {
            name: Some("Engineering".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(group.identity(), Some("group_1"));

    let knowledge = provider
        .knowledge
        .create(Knowledge {
            name: Some("Handbook".to_string()),
            description: Some("Company handbook".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(knowledge.identity(), Some("knowledge_1"));

    let user = provider
        .users
        .create(User {
            name: Some("Alice".to_string()),
            email: Some("alice@example.com".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(user.identity(), Some("user_1"));
    assert_eq!(user.role.as_deref(), Some("pending"));

    let groups = provider.groups.list().await.unwrap();
    assert_eq!(groups, vec![group]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_identity_survives_blank_responses() {
    let system = InMemorySystem::with_quirks(ServerQuirks {
        blank_identity_on_read: true,
    });
    let groups = &system.provider.groups;

    let created = groups
        .create(Group {
            name: Some("Engineering".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let id = created.identity().unwrap().to_string();

    let read = groups.read(&id).await.unwrap();
    assert_eq!(read.identity(), Some(id.as_str()));

    let renamed = Group {
        name: Some("Platform".to_string()),
        ..Default::default()
    };
    let updated = groups.update(&id, renamed).await.unwrap();
    assert_eq!(updated.identity(), Some(id.as_str()));
    assert_eq!(updated.name.as_deref(), Some("Platform"));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_duplicate_model_identity_conflicts() {
    let system = InMemorySystem::start();
    let models = &system.provider.models;

    models.create(desired_model("m-1")).await.unwrap();
    let err = models.create(desired_model("m-1")).await.unwrap_err();
    assert_eq!(err.stage(), "remote");
    assert!(err.to_string().contains("already exists"));

    system.shutdown().await.unwrap();
}
