use std::sync::Arc;

use bookstore_shared::error::{RestError, Result};
use bookstore_shared::models::User;
use bookstore_shared::store::UserStore;

/// Business rules for the user resource, on top of an injected store
pub struct UsersService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for UsersService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> UsersService<S>
where
    S: UserStore + ?Sized,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn create_user(&self, user: User) -> Result<User> {
        let user = validate(user)?;
        self.store.save_user(user).await
    }

    pub async fn get_user(&self, id: i64) -> Result<User> {
        self.store.get_user(id).await
    }

    /// Fetches the stored user first so that unknown ids surface as not found.
    ///
    /// A partial update only copies non-empty fields; a full update copies
    /// names and email as given, empty values included. `id`, `date_created`
    /// and `status` always keep their stored values.
    pub async fn update_user(&self, is_partial: bool, user: User) -> Result<User> {
        let mut current = self.get_user(user.id).await?;

        if is_partial {
            if !user.first_name.is_empty() {
                current.first_name = user.first_name;
            }
            if !user.last_name.is_empty() {
                current.last_name = user.last_name;
            }
            if !user.email.is_empty() {
                current.email = user.email;
            }
        } else {
            current.first_name = user.first_name;
            current.last_name = user.last_name;
            current.email = user.email;
        }

        self.store.update_user(current).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<()> {
        self.store.delete_user(id).await
    }

    pub async fn search(&self, status: &str) -> Result<Vec<User>> {
        self.store.find_by_status(status).await
    }
}

// Normalizes a user for creation and rejects missing required fields
fn validate(mut user: User) -> Result<User> {
    user.first_name = user.first_name.trim().to_string();
    user.last_name = user.last_name.trim().to_string();
    user.email = user.email.trim().to_lowercase();

    if user.email.is_empty() {
        return Err(RestError::bad_request("invalid email address"));
    }
    if user.first_name.is_empty() {
        return Err(RestError::bad_request("first name is required"));
    }
    if user.last_name.is_empty() {
        return Err(RestError::bad_request("last name is required"));
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_shared::test_utils::mock_user_store::MockUserStore;

    fn stored_user() -> User {
        User {
            id: 1,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            date_created: "2024-01-01T00:00:00Z".into(),
            status: "active".into(),
        }
    }

    fn service_with(users: Vec<User>) -> (UsersService<MockUserStore>, Arc<MockUserStore>) {
        let store = Arc::new(MockUserStore::with_data(users));
        (UsersService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_create_user_normalizes_input() {
        let (service, _) = service_with(vec![]);

        let created = service
            .create_user(User {
                first_name: "  Grace ".into(),
                last_name: "Hopper".into(),
                email: " Grace@Example.COM ".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.first_name, "Grace");
        assert_eq!(created.email, "grace@example.com");
        assert!(!created.date_created.is_empty());
    }

    #[tokio::test]
    async fn test_create_user_rejects_missing_fields() {
        let (service, store) = service_with(vec![]);

        let err = service
            .create_user(User {
                first_name: "Grace".into(),
                last_name: "Hopper".into(),
                email: "   ".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err, RestError::bad_request("invalid email address"));

        let err = service
            .create_user(User {
                last_name: "Hopper".into(),
                email: "grace@example.com".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err, RestError::bad_request("first name is required"));

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_create_user_passes_store_errors_through() {
        let (service, _) = service_with(vec![stored_user()]);

        let err = service
            .create_user(User {
                first_name: "Other".into(),
                last_name: "Person".into(),
                email: "ada@example.com".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err, RestError::bad_request("email already registered"));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_blank_fields() {
        let (service, store) = service_with(vec![stored_user()]);

        let updated = service
            .update_user(
                true,
                User {
                    id: 1,
                    last_name: "Byron".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let expected = User {
            last_name: "Byron".into(),
            ..stored_user()
        };
        assert_eq!(updated, expected);
        assert_eq!(store.get_user(1).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_full_update_replaces_with_empty_values() {
        let (service, _) = service_with(vec![stored_user()]);

        let updated = service
            .update_user(
                false,
                User {
                    id: 1,
                    last_name: "Byron".into(),
                    date_created: "1815-12-10T00:00:00Z".into(),
                    status: "changed".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.first_name, "");
        assert_eq!(updated.last_name, "Byron");
        assert_eq!(updated.email, "");
        assert_eq!(updated.date_created, "2024-01-01T00:00:00Z");
        assert_eq!(updated.status, "active");
    }

    #[tokio::test]
    async fn test_update_unknown_user_is_not_found() {
        let (service, _) = service_with(vec![]);

        let err = service
            .update_user(true, User::with_id(9))
            .await
            .unwrap_err();

        assert_eq!(err, RestError::not_found("user not found"));
    }

    #[tokio::test]
    async fn test_delete_unknown_user_succeeds() {
        let (service, store) = service_with(vec![stored_user()]);

        assert!(service.delete_user(9).await.is_ok());
        assert_eq!(store.len(), 1);

        assert!(service.delete_user(1).await.is_ok());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_search_returns_empty_list_when_nothing_matches() {
        let (service, _) = service_with(vec![stored_user()]);

        assert_eq!(service.search("active").await.unwrap().len(), 1);
        assert!(service.search("banned").await.unwrap().is_empty());
        assert!(service.search("").await.unwrap().is_empty());
    }
}
