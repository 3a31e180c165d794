// src/store/users.rs

use chrono::Utc;

use crate::error::AppError;
use crate::models::quiz::Program;
use crate::models::user::{Role, UpdateUserRequest, User};

use super::{MemoryStore, READ, WRITE, fresh_id};

/// Fields the store needs to create an account; hashing happens at the
/// caller so the store never sees a plaintext password.
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub program: Option<Program>,
    pub is_verified: bool,
}

impl MemoryStore {
    pub async fn create_user(&self, new: NewUser) -> Result<User, AppError> {
        self.simulate_latency(WRITE).await;
        let mut tables = self.tables.write().await;

        if tables
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&new.email))
        {
            return Err(AppError::Conflict(format!(
                "An account with email '{}' already exists",
                new.email
            )));
        }

        let user = User {
            id: fresh_id(),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            role: new.role,
            program: new.program,
            is_verified: new.is_verified,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.simulate_latency(READ).await;
        let tables = self.tables.read().await;
        tables
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub async fn get_user(&self, id: &str) -> Result<User, AppError> {
        self.simulate_latency(READ).await;
        let tables = self.tables.read().await;
        tables
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn list_users(&self) -> Vec<User> {
        self.simulate_latency(READ).await;
        let tables = self.tables.read().await;
        tables.users.clone()
    }

    pub async fn update_user(
        &self,
        id: &str,
        update: UpdateUserRequest,
    ) -> Result<User, AppError> {
        self.simulate_latency(WRITE).await;
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(program) = update.program {
            user.program = Some(program);
        }
        Ok(user.clone())
    }

    /// Marks an instructor account as verified by an admin.
    pub async fn verify_user(&self, id: &str) -> Result<User, AppError> {
        self.simulate_latency(WRITE).await;
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        user.is_verified = true;
        let user = user.clone();
        tables.notify(
            &user.id,
            "Account verified",
            "An administrator verified your account. You can now publish content.".to_string(),
        );
        Ok(user)
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        self.simulate_latency(WRITE).await;
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        Ok(())
    }
}
