use crate::error::RestError;
use crate::models::User;
use crate::store::UserStore;
use crate::test_utils::mock_user_store::MockUserStore;

fn test_user(id: i64, email: &str, status: &str) -> User {
    User {
        id,
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: email.to_string(),
        date_created: "2024-01-01T00:00:00Z".to_string(),
        status: status.to_string(),
    }
}

#[tokio::test]
async fn test_mock_user_store() {
    let store = MockUserStore::new();
    assert!(store.is_empty());

    // Store a user
    let saved = store
        .save_user(test_user(0, "test@example.com", "active"))
        .await
        .unwrap();
    assert_eq!(saved.id, 1);
    assert_ne!(saved.date_created, "2024-01-01T00:00:00Z");

    // Get the user
    let retrieved = store.get_user(saved.id).await.unwrap();
    assert_eq!(retrieved, saved);

    // Update the user
    let mut updated = saved.clone();
    updated.last_name = "Changed".to_string();
    store.update_user(updated).await.unwrap();
    assert_eq!(store.get_user(saved.id).await.unwrap().last_name, "Changed");

    // Delete the user
    store.delete_user(saved.id).await.unwrap();
    assert_eq!(
        store.get_user(saved.id).await.unwrap_err(),
        RestError::not_found("user not found")
    );
}

#[tokio::test]
async fn test_mock_user_store_with_data() {
    let store = MockUserStore::with_data(vec![
        test_user(3, "a@example.com", "active"),
        test_user(5, "b@example.com", "inactive"),
    ]);
    assert_eq!(store.len(), 2);

    // Ids continue after the seeded ones
    let saved = store
        .save_user(test_user(0, "c@example.com", "active"))
        .await
        .unwrap();
    assert_eq!(saved.id, 6);

    let active = store.find_by_status("active").await.unwrap();
    assert_eq!(active.iter().map(|u| u.id).collect::<Vec<_>>(), vec![3, 6]);

    let err = store
        .save_user(test_user(0, "a@example.com", ""))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert_eq!(store.len(), 3);
}
