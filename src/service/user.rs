use crate::auth::password::{hash_password, verify_password};
use crate::error::HrmError;
use crate::model::user::User;
use crate::repository::UserRepository;
use std::sync::Arc;
use tracing::info;

/// Account registration and credential checks. Passwords are hashed
/// with argon2 before they reach the repository.
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, HrmError> {
        User::validate(name, email, password)?;

        if self.user_repo.get_by_email(email).await?.is_some() {
            return Err(HrmError::UserAlreadyExists);
        }

        let user = self
            .user_repo
            .create(name, email, &hash_password(password)?)
            .await?;

        info!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// A missing account and a wrong password are indistinguishable to
    /// the caller.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, HrmError> {
        let user = self
            .user_repo
            .get_by_email(email)
            .await?
            .ok_or(HrmError::InvalidCredentials)?;

        verify_password(password, &user.password).map_err(|_| HrmError::InvalidCredentials)?;

        info!(user_id = user.id, "user signed in");
        Ok(user)
    }

    pub async fn get_user_by_id(&self, id: u64) -> Result<User, HrmError> {
        self.user_repo.get_by_id(id).await
    }

    pub async fn list_users(&self, limit: u32, offset: u32) -> Result<Vec<User>, HrmError> {
        self.user_repo.list(limit, offset).await
    }

    /// Partial profile update. A changed email must stay unique; a new
    /// password is re-validated and re-hashed.
    pub async fn update_user(
        &self,
        id: u64,
        name: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<User, HrmError> {
        let mut user = self.user_repo.get_by_id(id).await?;

        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(HrmError::InvalidName);
            }
            user.name = name;
        }
        if let Some(email) = email {
            if email.trim().is_empty() || !email.contains('@') {
                return Err(HrmError::InvalidEmail);
            }
            if let Some(other) = self.user_repo.get_by_email(&email).await? {
                if other.id != id {
                    return Err(HrmError::UserAlreadyExists);
                }
            }
            user.email = email;
        }
        if let Some(password) = password {
            if password.len() < 6 {
                return Err(HrmError::InvalidPassword);
            }
            user.password = hash_password(&password)?;
        }

        self.user_repo.update(&user).await?;
        Ok(user)
    }

    pub async fn delete_user(&self, id: u64) -> Result<(), HrmError> {
        self.user_repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::{MemStore, MemUserRepo};

    fn service(store: &Arc<MemStore>) -> UserService {
        UserService::new(Arc::new(MemUserRepo(store.clone())))
    }

    #[actix_web::test]
    async fn sign_up_hashes_and_rejects_duplicates() {
        let store = MemStore::new();
        let svc = service(&store);

        let user = svc.sign_up("John", "john@company.com", "secret1").await.unwrap();
        assert_ne!(user.password, "secret1");

        assert!(matches!(
            svc.sign_up("Johnny", "john@company.com", "secret2").await,
            Err(HrmError::UserAlreadyExists)
        ));
    }

    #[actix_web::test]
    async fn sign_up_validates_input() {
        let store = MemStore::new();
        let svc = service(&store);

        assert!(matches!(
            svc.sign_up("", "a@b.com", "secret1").await,
            Err(HrmError::InvalidName)
        ));
        assert!(matches!(
            svc.sign_up("John", "nope", "secret1").await,
            Err(HrmError::InvalidEmail)
        ));
        assert!(matches!(
            svc.sign_up("John", "a@b.com", "short").await,
            Err(HrmError::InvalidPassword)
        ));
    }

    #[actix_web::test]
    async fn sign_in_masks_missing_user_and_bad_password() {
        let store = MemStore::new();
        let svc = service(&store);
        svc.sign_up("John", "john@company.com", "secret1").await.unwrap();

        assert!(svc.sign_in("john@company.com", "secret1").await.is_ok());
        assert!(matches!(
            svc.sign_in("john@company.com", "wrong-pass").await,
            Err(HrmError::InvalidCredentials)
        ));
        assert!(matches!(
            svc.sign_in("ghost@company.com", "secret1").await,
            Err(HrmError::InvalidCredentials)
        ));
    }

    #[actix_web::test]
    async fn sign_in_rejects_corrupted_stored_hash() {
        let store = MemStore::new();
        let svc = service(&store);
        // Seeded rows carry a placeholder password that is not a valid
        // PHC string; sign-in must fail cleanly, not unwind.
        store.add_user("John", "john@company.com");

        assert!(matches!(
            svc.sign_in("john@company.com", "secret1").await,
            Err(HrmError::InvalidCredentials)
        ));
    }

    #[actix_web::test]
    async fn update_enforces_email_uniqueness() {
        let store = MemStore::new();
        let svc = service(&store);
        let john = svc.sign_up("John", "john@company.com", "secret1").await.unwrap();
        svc.sign_up("Jane", "jane@company.com", "secret1").await.unwrap();

        assert!(matches!(
            svc.update_user(john.id, None, Some("jane@company.com".to_string()), None)
                .await,
            Err(HrmError::UserAlreadyExists)
        ));

        // Re-submitting one's own email is fine.
        let updated = svc
            .update_user(john.id, None, Some("john@company.com".to_string()), None)
            .await
            .unwrap();
        assert_eq!(updated.email, "john@company.com");
    }

    #[actix_web::test]
    async fn password_change_takes_effect() {
        let store = MemStore::new();
        let svc = service(&store);
        let user = svc.sign_up("John", "john@company.com", "secret1").await.unwrap();

        svc.update_user(user.id, None, None, Some("newsecret".to_string()))
            .await
            .unwrap();

        assert!(svc.sign_in("john@company.com", "newsecret").await.is_ok());
        assert!(matches!(
            svc.sign_in("john@company.com", "secret1").await,
            Err(HrmError::InvalidCredentials)
        ));
    }
}
