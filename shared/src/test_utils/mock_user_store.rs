use std::sync::Mutex;

use async_trait::async_trait;
use crate::error::{RestError, Result};
use crate::models::{now_str, User};
use crate::store::UserStore;

/// MockUserStore is a simple in-memory implementation of UserStore for testing
///
/// It mirrors the SQL store's observable behavior: generated ids, the unique
/// email constraint and silent no-ops for unknown ids on update and delete.
pub struct MockUserStore {
    users: Mutex<Vec<User>>,
    next_id: Mutex<i64>,
}

impl MockUserStore {
    /// Create a new empty MockUserStore
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
        }
    }

    /// Create a MockUserStore with initial test data, keeping their ids
    pub fn with_data(users: Vec<User>) -> Self {
        let store = Self::new();
        let max_id = users.iter().map(|u| u.id).max().unwrap_or(0);

        *store.users.lock().unwrap() = users;
        *store.next_id.lock().unwrap() = max_id + 1;

        store
    }

    /// Number of users currently held
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MockUserStore {
    fn default() -> Self {
        Self::new()
    }
}

fn email_taken(users: &[User], email: &str, except_id: i64) -> bool {
    users.iter().any(|u| u.email == email && u.id != except_id)
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn get_user(&self, id: i64) -> Result<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| RestError::not_found("user not found"))
    }

    async fn save_user(&self, mut user: User) -> Result<User> {
        let mut users = self.users.lock().unwrap();

        if email_taken(&users, &user.email, 0) {
            return Err(RestError::bad_request("email already registered"));
        }

        let mut next_id = self.next_id.lock().unwrap();
        user.id = *next_id;
        *next_id += 1;
        user.date_created = now_str();

        users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, user: User) -> Result<User> {
        let mut users = self.users.lock().unwrap();

        if !users.iter().any(|u| u.id == user.id) {
            return Ok(user);
        }

        if email_taken(&users, &user.email, user.id) {
            return Err(RestError::bad_request("email already registered"));
        }

        if let Some(existing) = users.iter_mut().find(|u| u.id == user.id) {
            existing.first_name = user.first_name.clone();
            existing.last_name = user.last_name.clone();
            existing.email = user.email.clone();
        }

        Ok(user)
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        self.users.lock().unwrap().retain(|u| u.id != id);
        Ok(())
    }

    async fn find_by_status(&self, status: &str) -> Result<Vec<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.status == status)
            .cloned()
            .collect())
    }
}
