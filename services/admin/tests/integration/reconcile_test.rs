use uuid::Uuid;

use essence_admin::domain::types::Identity;
use essence_admin::usecase::reconcile::ReconcileUseCase;
use essence_domain::user::UserRole;

use crate::helpers::{MockIdentity, MockProfileRepo, provisioned_pair, test_profile};

#[tokio::test]
async fn should_report_clean_when_every_identity_has_a_profile() {
    let (a_ident, a_profile) = provisioned_pair("a@example.com", UserRole::User);
    let (b_ident, b_profile) = provisioned_pair("b@example.com", UserRole::Admin);
    let usecase = ReconcileUseCase {
        identity: MockIdentity::with(vec![a_ident, b_ident]),
        profiles: MockProfileRepo::with(vec![a_profile, b_profile]),
    };

    let report = usecase.execute().await.unwrap();

    assert!(report.is_clean(), "expected clean report, got {report:?}");
}

#[tokio::test]
async fn should_find_orphans_on_both_sides() {
    let (ident, profile) = provisioned_pair("a@example.com", UserRole::User);
    let stray_identity = Identity {
        id: Uuid::now_v7(),
        email: Some("stray@example.com".into()),
    };
    let stray_profile = test_profile("ghost@example.com", UserRole::User, None);
    let stray_profile_id = stray_profile.id;
    let usecase = ReconcileUseCase {
        identity: MockIdentity::with(vec![ident, stray_identity.clone()]),
        profiles: MockProfileRepo::with(vec![profile, stray_profile]),
    };

    let report = usecase.execute().await.unwrap();

    assert!(!report.is_clean());
    assert_eq!(report.identities_without_profile, vec![stray_identity]);
    assert_eq!(report.profiles_without_identity.len(), 1);
    assert_eq!(report.profiles_without_identity[0].id, stray_profile_id);
}
