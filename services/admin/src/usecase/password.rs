use uuid::Uuid;

use crate::domain::repository::{AdminActionRepository, IdentityPort, ProfileRepository};
use crate::domain::types::MIN_PASSWORD_LEN;
use crate::error::AdminServiceError;
use crate::usecase::audit::record_action;

fn validate_password(password: &str) -> Result<(), AdminServiceError> {
    if password.is_empty() {
        return Err(AdminServiceError::MissingData);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AdminServiceError::PasswordTooShort);
    }
    Ok(())
}

// ── ResetPassword (admin) ────────────────────────────────────────────────────

pub struct ResetPasswordUseCase<I, P, A>
where
    I: IdentityPort,
    P: ProfileRepository,
    A: AdminActionRepository,
{
    pub identity: I,
    pub profiles: P,
    pub actions: A,
}

impl<I, P, A> ResetPasswordUseCase<I, P, A>
where
    I: IdentityPort,
    P: ProfileRepository,
    A: AdminActionRepository,
{
    pub async fn execute(
        &self,
        actor_id: Uuid,
        user_id: Uuid,
        password: &str,
    ) -> Result<(), AdminServiceError> {
        validate_password(password)?;
        let profile = self
            .profiles
            .find_by_id(user_id)
            .await?
            .ok_or(AdminServiceError::UserNotFound)?;
        self.identity.update_password(user_id, password).await?;
        record_action(
            &self.actions,
            actor_id,
            "change_user_password",
            format!("Changed password for {}", profile.email),
        )
        .await;
        Ok(())
    }
}

// ── ChangeOwnPassword ────────────────────────────────────────────────────────

pub struct ChangeOwnPasswordInput {
    pub password: String,
    pub confirmation: String,
}

pub struct ChangeOwnPasswordUseCase<I: IdentityPort> {
    pub identity: I,
}

impl<I: IdentityPort> ChangeOwnPasswordUseCase<I> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: ChangeOwnPasswordInput,
    ) -> Result<(), AdminServiceError> {
        if input.password.is_empty() || input.confirmation.is_empty() {
            return Err(AdminServiceError::MissingData);
        }
        if input.password != input.confirmation {
            return Err(AdminServiceError::PasswordMismatch);
        }
        validate_password(&input.password)?;
        self.identity.update_password(user_id, &input.password).await
    }
}
