//! Integration tests for the lifecycle controller over real HTTP.
//!
//! Each test starts its own [`FakeBackend`], so tests never share records.

use complaint_hub_core::{
    Category, ComplaintDraft, ComplaintId, ComplaintStatus, validate_draft,
};
use complaint_hub_integration_tests::{FAKE_CREATED_DATE, FakeBackend, stored_complaint};

fn alice_draft() -> ComplaintDraft {
    ComplaintDraft {
        name: "Alice".to_string(),
        email: "a@x.com".to_string(),
        phone: None,
        category: "Billing Problem".to_string(),
        description: "Overcharged".to_string(),
    }
}

// =============================================================================
// Register + Refresh
// =============================================================================

#[tokio::test]
async fn test_register_then_refresh_shows_new_record() {
    let backend = FakeBackend::start().await;
    backend.push_id("COMP-AB12CD34");
    let controller = backend.controller();

    let created = controller
        .register(&alice_draft())
        .await
        .expect("register succeeds");
    assert_eq!(created.complaint_id.as_str(), "COMP-AB12CD34");
    assert_eq!(created.status, ComplaintStatus::Pending);

    // Registering alone does not touch the authoritative list
    assert!(controller.complaints().is_empty());

    controller.refresh().await.expect("refresh succeeds");
    let complaints = controller.complaints();
    assert_eq!(complaints.len(), 1);

    let record = &complaints[0];
    let valid = validate_draft(&alice_draft()).expect("valid draft");
    assert_eq!(record.complaint_id.as_str(), "COMP-AB12CD34");
    assert!(record.matches_draft(&valid));
    assert_eq!(record.status, ComplaintStatus::Pending);
    assert_eq!(record.phone, None);
    assert_eq!(record.created_date.as_str(), FAKE_CREATED_DATE);
    assert!(controller.last_error().is_none());
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn test_register_with_phone_round_trips() {
    let backend = FakeBackend::start().await;
    let controller = backend.controller();

    let mut draft = alice_draft();
    draft.phone = Some("555-0100".to_string());
    draft.category = "Service Issue".to_string();

    let created = controller.register(&draft).await.expect("register succeeds");
    assert!(created.complaint_id.as_str().starts_with("COMP-"));
    assert_eq!(created.phone.as_deref(), Some("555-0100"));
    assert_eq!(created.category, Category::ServiceIssue);
}

#[tokio::test]
async fn test_register_trims_fields_before_sending() {
    let backend = FakeBackend::start().await;
    let controller = backend.controller();

    let mut draft = alice_draft();
    draft.name = "  Alice  ".to_string();

    controller.register(&draft).await.expect("register succeeds");

    let stored = backend.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Alice");
}

// =============================================================================
// Refresh
// =============================================================================

#[tokio::test]
async fn test_refresh_replaces_list_wholesale() {
    let backend = FakeBackend::start().await;
    backend.seed(stored_complaint("COMP-00000001", "Bob", Category::DeliveryIssue));
    let controller = backend.controller();

    controller.refresh().await.expect("first refresh");
    assert_eq!(controller.complaints().len(), 1);

    backend.seed(stored_complaint("COMP-00000002", "Carol", Category::Other));
    controller.refresh().await.expect("second refresh");

    let ids: Vec<String> = controller
        .complaints()
        .into_iter()
        .map(|c| c.complaint_id.into_inner())
        .collect();
    assert_eq!(ids, vec!["COMP-00000001", "COMP-00000002"]);
}

#[tokio::test]
async fn test_refresh_empty_backend() {
    let backend = FakeBackend::start().await;
    let controller = backend.controller();

    controller.refresh().await.expect("refresh succeeds");
    let view = controller.view();
    assert!(view.complaints.is_empty());
    assert!(!view.loading);
    assert!(view.last_error.is_none());
}

// =============================================================================
// Status Updates
// =============================================================================

#[tokio::test]
async fn test_set_status_resolves_and_refreshes() {
    let backend = FakeBackend::start().await;
    backend.push_id("COMP-AB12CD34");
    let controller = backend.controller();

    controller
        .register(&alice_draft())
        .await
        .expect("register succeeds");
    controller.refresh().await.expect("refresh succeeds");
    let before = controller.complaints();

    let updated = controller
        .set_status("COMP-AB12CD34", ComplaintStatus::Resolved)
        .await
        .expect("status update succeeds");
    assert_eq!(updated.status, ComplaintStatus::Resolved);

    // The follow-up refresh already ran
    let after = controller.complaints();
    assert_eq!(after.len(), 1);
    assert!(after[0].is_resolved());

    // Every other field is unchanged
    let mut expected = before[0].clone();
    expected.status = ComplaintStatus::Resolved;
    assert_eq!(after[0], expected);
}

#[tokio::test]
async fn test_set_status_back_to_pending() {
    let backend = FakeBackend::start().await;
    let mut seeded = stored_complaint("COMP-00000003", "Dave", Category::ProductQuality);
    seeded.status = ComplaintStatus::Resolved;
    backend.seed(seeded);
    let controller = backend.controller();

    controller
        .set_status("COMP-00000003", ComplaintStatus::Pending)
        .await
        .expect("status update succeeds");

    let id = ComplaintId::parse("COMP-00000003").expect("valid id");
    let record = controller.find(&id).expect("record present after refresh");
    assert_eq!(record.status, ComplaintStatus::Pending);
}

#[tokio::test]
async fn test_set_status_trims_complaint_id() {
    let backend = FakeBackend::start().await;
    backend.seed(stored_complaint("COMP-00000004", "Erin", Category::Other));
    let controller = backend.controller();

    let updated = controller
        .set_status("  COMP-00000004 ", ComplaintStatus::Resolved)
        .await
        .expect("status update succeeds");
    assert_eq!(updated.complaint_id.as_str(), "COMP-00000004");
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn test_concurrent_register_and_refresh() {
    let backend = FakeBackend::start().await;
    backend.push_id("COMP-AB12CD34");
    let controller = backend.controller();
    let other = controller.clone();

    let draft = alice_draft();
    let (registered, refreshed) = tokio::join!(controller.register(&draft), other.refresh());
    registered.expect("register succeeds");
    refreshed.expect("refresh succeeds");

    // Whichever order the backend saw, one more refresh converges
    controller.refresh().await.expect("final refresh");
    let complaints = controller.complaints();
    assert_eq!(complaints.len(), 1);
    assert_eq!(complaints[0].complaint_id.as_str(), "COMP-AB12CD34");
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn test_many_registrations_get_distinct_ids() {
    let backend = FakeBackend::start().await;
    let controller = backend.controller();

    for name in ["Ann", "Ben", "Cat"] {
        let mut draft = alice_draft();
        draft.name = name.to_string();
        controller.register(&draft).await.expect("register succeeds");
    }
    controller.refresh().await.expect("refresh succeeds");

    let mut ids: Vec<String> = controller
        .complaints()
        .into_iter()
        .map(|c| c.complaint_id.into_inner())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}
