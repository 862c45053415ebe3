use async_trait::async_trait;

use crate::error::Result;
use crate::models::User;

// Expose the SQL store module
pub mod sql;

/// UserStore trait defining the interface for user persistence implementations
///
/// Implementations only translate storage failures; business rules such as
/// existence checks before an update live in the service layer.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Gets a fully hydrated user by ID
    async fn get_user(&self, id: i64) -> Result<User>;

    /// Inserts a new user, stamping `date_created` and assigning the generated ID
    async fn save_user(&self, user: User) -> Result<User>;

    /// Updates first name, last name and email of the user with the given ID.
    /// Updating an unknown ID is a silent no-op.
    async fn update_user(&self, user: User) -> Result<User>;

    /// Deletes a user by ID. Deleting an unknown ID is a silent no-op.
    async fn delete_user(&self, id: i64) -> Result<()>;

    /// Gets all users with the given status, in store order
    async fn find_by_status(&self, status: &str) -> Result<Vec<User>>;
}
