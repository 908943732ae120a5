use std::sync::Arc;

use uuid::Uuid;

use notification_cell::models::NotificationError;
use notification_cell::services::inbox::NotificationInboxService;
use shared_models::NewNotification;
use shared_storage::{MemoryStore, NotificationStore};
use shared_utils::test_utils::TestUser;

fn inbox(store: &Arc<MemoryStore>) -> NotificationInboxService {
    NotificationInboxService::with_stores(store.clone(), store.clone())
}

#[tokio::test]
async fn test_inbox_keeps_twenty_newest() {
    let store = Arc::new(MemoryStore::new());
    let provider = TestUser::provider("Diego", "diego@example.com");
    store.add_user(provider.to_user()).await;

    for i in 0..25 {
        store
            .insert(NewNotification {
                content: format!("booking {}", i),
                user_id: provider.id,
            })
            .await
            .unwrap();
    }

    let service = inbox(&store);
    let notifications = service.list(provider.id).await.unwrap();

    assert_eq!(notifications.len(), 20);
    assert_eq!(notifications[0].content, "booking 24");
    assert!(notifications.iter().all(|n| n.content != "booking 0"));
}

#[tokio::test]
async fn test_inbox_rejects_plain_client() {
    let store = Arc::new(MemoryStore::new());
    let client = TestUser::client("Laura", "laura@example.com");
    store.add_user(client.to_user()).await;

    let service = inbox(&store);
    let err = service.list(client.id).await.unwrap_err();

    assert!(matches!(err, NotificationError::NotProvider));
}

#[tokio::test]
async fn test_mark_read_flips_the_flag() {
    let store = Arc::new(MemoryStore::new());
    let provider = TestUser::provider("Diego", "diego@example.com");
    store.add_user(provider.to_user()).await;

    let created = store
        .insert(NewNotification {
            content: "Novo agendamento".to_string(),
            user_id: provider.id,
        })
        .await
        .unwrap();
    assert!(!created.read);

    let service = inbox(&store);
    let updated = service.mark_read(provider.id, created.id).await.unwrap();
    assert!(updated.read);

    let listed = service.list(provider.id).await.unwrap();
    assert!(listed[0].read);
}

#[tokio::test]
async fn test_mark_read_rejects_foreign_recipient() {
    let store = Arc::new(MemoryStore::new());
    let recipient = TestUser::provider("Diego", "diego@example.com");
    let intruder = TestUser::client("Pedro", "pedro@example.com");
    store.add_user(recipient.to_user()).await;
    store.add_user(intruder.to_user()).await;

    let created = store
        .insert(NewNotification {
            content: "Novo agendamento".to_string(),
            user_id: recipient.id,
        })
        .await
        .unwrap();

    let service = inbox(&store);
    let err = service.mark_read(intruder.id, created.id).await.unwrap_err();

    assert!(matches!(err, NotificationError::NotRecipient));
    // The row stays untouched
    let listed = service.list(recipient.id).await.unwrap();
    assert!(!listed[0].read);
}

#[tokio::test]
async fn test_mark_read_unknown_notification() {
    let store = Arc::new(MemoryStore::new());
    let service = inbox(&store);

    let err = service
        .mark_read(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, NotificationError::NotFound));
}
