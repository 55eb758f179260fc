use uuid::Uuid;

use essence_admin::domain::types::{DirectoryChange, Identity};
use essence_admin::error::AdminServiceError;
use essence_admin::usecase::password::ResetPasswordUseCase;
use essence_admin::usecase::profile::{
    SetSuspendedUseCase, UpdateProfileInput, UpdateProfileUseCase,
};
use essence_domain::id::UserId;
use essence_domain::user::UserRole;

use crate::helpers::{
    MockActionRepo, MockGroupRepo, MockIdentity, MockProfileRepo, provisioned_pair, test_group,
    test_profile,
};

fn update_input(user_id: Uuid, email: &str) -> UpdateProfileInput {
    UpdateProfileInput {
        actor_id: Uuid::now_v7(),
        user_id,
        email: email.into(),
        full_name: "Grace Hopper".into(),
        role: UserRole::Admin,
        group_id: None,
    }
}

fn update_usecase(
    profiles: MockProfileRepo,
    groups: MockGroupRepo,
) -> UpdateProfileUseCase<MockProfileRepo, MockGroupRepo, MockActionRepo> {
    UpdateProfileUseCase {
        profiles,
        groups,
        actions: MockActionRepo::default(),
    }
}

// ── UpdateProfileUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_update_profile_fields() {
    let group = test_group("North");
    let group_id = group.id;
    let profile = test_profile("grace@example.com", UserRole::User, None);
    let user_id = profile.id;
    let profiles = MockProfileRepo::with(vec![profile]);
    let rows = profiles.profiles_handle();
    let usecase = update_usecase(profiles, MockGroupRepo::with(vec![group]));

    let change = usecase
        .execute(UpdateProfileInput {
            group_id: Some(group_id),
            ..update_input(user_id, " Grace@Navy.mil ")
        })
        .await
        .unwrap();

    assert_eq!(change, DirectoryChange::UserUpdated(UserId(user_id)));
    let rows = rows.lock().unwrap();
    assert_eq!(rows[0].email, "grace@navy.mil");
    assert_eq!(rows[0].full_name, "Grace Hopper");
    assert_eq!(rows[0].role, UserRole::Admin);
    assert_eq!(rows[0].group_id, Some(group_id));
    let actions = usecase.actions.actions_handle();
    assert_eq!(actions.lock().unwrap()[0].action, "update_user");
}

#[tokio::test]
async fn should_reject_unknown_group_on_update() {
    let profile = test_profile("grace@example.com", UserRole::User, None);
    let user_id = profile.id;
    let profiles = MockProfileRepo::with(vec![profile]);
    let rows = profiles.profiles_handle();
    let usecase = update_usecase(profiles, MockGroupRepo::default());

    let result = usecase
        .execute(UpdateProfileInput {
            group_id: Some(Uuid::now_v7()),
            ..update_input(user_id, "grace@example.com")
        })
        .await;

    assert!(
        matches!(result, Err(AdminServiceError::GroupNotFound)),
        "expected GroupNotFound, got {result:?}"
    );
    assert_eq!(rows.lock().unwrap()[0].group_id, None);
}

#[tokio::test]
async fn should_return_profile_conflict_for_taken_email() {
    let taken = test_profile("ada@example.com", UserRole::User, None);
    let profile = test_profile("grace@example.com", UserRole::User, None);
    let user_id = profile.id;
    let usecase = update_usecase(
        MockProfileRepo::with(vec![taken, profile]),
        MockGroupRepo::default(),
    );

    let result = usecase
        .execute(update_input(user_id, "ADA@example.com"))
        .await;

    assert!(
        matches!(result, Err(AdminServiceError::ProfileConflict)),
        "expected ProfileConflict, got {result:?}"
    );
}

#[tokio::test]
async fn should_return_user_not_found_when_updating_missing_profile() {
    let usecase = update_usecase(MockProfileRepo::default(), MockGroupRepo::default());

    let result = usecase
        .execute(update_input(Uuid::now_v7(), "grace@example.com"))
        .await;

    assert!(
        matches!(result, Err(AdminServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
    assert!(usecase.actions.actions_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_require_email_and_name_on_update() {
    let profile = test_profile("grace@example.com", UserRole::User, None);
    let user_id = profile.id;
    let usecase = update_usecase(MockProfileRepo::with(vec![profile]), MockGroupRepo::default());

    let blank_email = usecase.execute(update_input(user_id, "  ")).await;
    assert!(matches!(blank_email, Err(AdminServiceError::MissingData)));

    let blank_name = usecase
        .execute(UpdateProfileInput {
            full_name: String::new(),
            ..update_input(user_id, "grace@example.com")
        })
        .await;
    assert!(matches!(blank_name, Err(AdminServiceError::MissingData)));
}

// ── SetSuspendedUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_suspend_and_restore_user() {
    let profile = test_profile("grace@example.com", UserRole::User, None);
    let user_id = profile.id;
    let profiles = MockProfileRepo::with(vec![profile]);
    let rows = profiles.profiles_handle();
    let usecase = SetSuspendedUseCase {
        profiles,
        actions: MockActionRepo::default(),
    };
    let actor_id = Uuid::now_v7();

    usecase.execute(actor_id, user_id, true).await.unwrap();
    assert!(rows.lock().unwrap()[0].is_suspended);

    let change = usecase.execute(actor_id, user_id, false).await.unwrap();
    assert!(!rows.lock().unwrap()[0].is_suspended);
    assert_eq!(change, DirectoryChange::UserUpdated(UserId(user_id)));

    let actions = usecase.actions.actions_handle();
    let recorded: Vec<String> = actions
        .lock()
        .unwrap()
        .iter()
        .map(|a| a.action.clone())
        .collect();
    assert_eq!(recorded, vec!["suspend_user", "restore_user"]);
}

#[tokio::test]
async fn should_return_user_not_found_when_suspending_missing_profile() {
    let usecase = SetSuspendedUseCase {
        profiles: MockProfileRepo::default(),
        actions: MockActionRepo::default(),
    };

    let result = usecase.execute(Uuid::now_v7(), Uuid::now_v7(), true).await;

    assert!(
        matches!(result, Err(AdminServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

// ── ResetPasswordUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_reset_password_and_record_action() {
    let (ident, profile) = provisioned_pair("grace@example.com", UserRole::User);
    let user_id = profile.id;
    let usecase = ResetPasswordUseCase {
        identity: MockIdentity::with(vec![ident]),
        profiles: MockProfileRepo::with(vec![profile]),
        actions: MockActionRepo::default(),
    };

    usecase
        .execute(Uuid::now_v7(), user_id, "n3w-password")
        .await
        .unwrap();

    let actions = usecase.actions.actions_handle();
    let actions = actions.lock().unwrap();
    assert_eq!(actions[0].action, "change_user_password");
    assert!(actions[0].details.contains("grace@example.com"));
}

#[tokio::test]
async fn should_validate_password_before_calling_identity_service() {
    // The identity is absent, so reaching the identity service would yield UserNotFound.
    let profile = test_profile("grace@example.com", UserRole::User, None);
    let user_id = profile.id;
    let usecase = ResetPasswordUseCase {
        identity: MockIdentity::default(),
        profiles: MockProfileRepo::with(vec![profile]),
        actions: MockActionRepo::default(),
    };

    let short = usecase.execute(Uuid::now_v7(), user_id, "12345").await;
    assert!(
        matches!(short, Err(AdminServiceError::PasswordTooShort)),
        "expected PasswordTooShort, got {short:?}"
    );

    let empty = usecase.execute(Uuid::now_v7(), user_id, "").await;
    assert!(matches!(empty, Err(AdminServiceError::MissingData)));
    assert!(usecase.actions.actions_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_return_user_not_found_when_resetting_unknown_user() {
    let stray = Identity {
        id: Uuid::now_v7(),
        email: Some("stray@example.com".into()),
    };
    let stray_id = stray.id;
    let usecase = ResetPasswordUseCase {
        identity: MockIdentity::with(vec![stray]),
        profiles: MockProfileRepo::default(),
        actions: MockActionRepo::default(),
    };

    let result = usecase
        .execute(Uuid::now_v7(), stray_id, "n3w-password")
        .await;

    assert!(
        matches!(result, Err(AdminServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}
