//! PostgreSQL appliance repository tests. Run with `cargo test -- --ignored`.

mod common;

use appliance_buddy::domain::entities::{
    AppliancePatch, DocumentType, MaintenanceTaskPatch, NewAppliance, NewLinkedDocument,
    NewMaintenanceTask, NewSupportContact, ServiceProvider, TaskFrequency, TaskStatus,
};
use appliance_buddy::domain::repositories::ApplianceRepository;
use appliance_buddy::infrastructure::persistence::PgApplianceRepository;
use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_appliance(user_id: Uuid, name: &str) -> NewAppliance {
    NewAppliance {
        user_id,
        name: name.to_string(),
        brand: "Acme".to_string(),
        model: "X1".to_string(),
        purchase_date: date(2024, 1, 31),
        warranty_duration_months: 13,
        serial_number: Some("SN-1".to_string()),
        purchase_location: None,
        notes: None,
    }
}

fn new_task() -> NewMaintenanceTask {
    NewMaintenanceTask {
        task_name: "Descale".to_string(),
        scheduled_date: date(2025, 3, 1),
        frequency: TaskFrequency::OneTime,
        service_provider: Some(ServiceProvider {
            name: "FixIt".to_string(),
            phone: Some("555-0100".to_string()),
            email: None,
            notes: None,
        }),
        notes: None,
        status: TaskStatus::Upcoming,
        completed_date: None,
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_and_find(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "owner@example.com").await;
    let repo = PgApplianceRepository::new(Arc::new(pool));

    let created = repo.create(new_appliance(user_id, "Fridge")).await.unwrap();

    assert_eq!(created.name, "Fridge");
    assert_eq!(created.purchase_date, date(2024, 1, 31));
    assert_eq!(created.warranty_duration_months, 13);
    assert!(created.support_contacts.is_empty());

    let found = repo.find(user_id, created.id).await.unwrap().unwrap();
    assert_eq!(found, created);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_list_is_scoped_and_newest_first(pool: PgPool) {
    let owner = common::create_test_user(&pool, "owner@example.com").await;
    let other = common::create_test_user(&pool, "other@example.com").await;
    let repo = PgApplianceRepository::new(Arc::new(pool));

    repo.create(new_appliance(owner, "Old")).await.unwrap();
    repo.create(new_appliance(owner, "New")).await.unwrap();
    let foreign = repo.create(new_appliance(other, "Theirs")).await.unwrap();

    let names: Vec<String> = repo
        .list_for_user(owner)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, ["New", "Old"]);

    assert!(repo.find(owner, foreign.id).await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_update_patch(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "owner@example.com").await;
    let repo = PgApplianceRepository::new(Arc::new(pool));
    let created = repo.create(new_appliance(user_id, "Fridge")).await.unwrap();

    let updated = repo
        .update(
            user_id,
            created.id,
            AppliancePatch {
                warranty_duration_months: Some(36),
                serial_number: Some(None),
                notes: Some(Some("Garage".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.warranty_duration_months, 36);
    assert_eq!(updated.serial_number, None);
    assert_eq!(updated.notes.as_deref(), Some("Garage"));
    assert_eq!(updated.name, "Fridge");
    assert!(updated.updated_at >= created.updated_at);

    let missing = repo
        .update(
            Uuid::new_v4(),
            created.id,
            AppliancePatch {
                name: Some("Stolen".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_nested_records_round_trip(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "owner@example.com").await;
    let repo = PgApplianceRepository::new(Arc::new(pool));
    let appliance = repo.create(new_appliance(user_id, "Kettle")).await.unwrap();

    let contact = repo
        .add_contact(
            user_id,
            appliance.id,
            NewSupportContact {
                name: "Acme Support".to_string(),
                company: Some("Acme".to_string()),
                phone: None,
                email: Some("help@acme.example".to_string()),
                website: None,
                notes: None,
            },
        )
        .await
        .unwrap()
        .unwrap();

    let task = repo
        .add_task(user_id, appliance.id, new_task())
        .await
        .unwrap()
        .unwrap();

    let document = repo
        .add_document(
            user_id,
            appliance.id,
            NewLinkedDocument {
                title: "Manual".to_string(),
                url: "https://acme.example/manual.pdf".to_string(),
                document_type: DocumentType::Manual,
            },
        )
        .await
        .unwrap()
        .unwrap();

    let found = repo.find(user_id, appliance.id).await.unwrap().unwrap();
    assert_eq!(found.support_contacts, vec![contact.clone()]);
    assert_eq!(found.maintenance_tasks, vec![task.clone()]);
    assert_eq!(found.linked_documents, vec![document.clone()]);

    let updated = repo
        .update_task(
            user_id,
            appliance.id,
            task.id,
            MaintenanceTaskPatch {
                status: Some(TaskStatus::Completed),
                completed_date: Some(Some(date(2025, 3, 2))),
                service_provider: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, TaskStatus::Completed);
    assert_eq!(updated.service_provider, None);
    assert_eq!(updated.frequency, TaskFrequency::OneTime);

    assert!(
        repo.remove_contact(user_id, appliance.id, contact.id)
            .await
            .unwrap()
    );
    assert!(
        !repo
            .remove_contact(user_id, appliance.id, contact.id)
            .await
            .unwrap()
    );
    assert!(repo.remove_task(user_id, appliance.id, task.id).await.unwrap());
    assert!(
        repo.remove_document(user_id, appliance.id, document.id)
            .await
            .unwrap()
    );

    let found = repo.find(user_id, appliance.id).await.unwrap().unwrap();
    assert!(found.support_contacts.is_empty());
    assert!(found.maintenance_tasks.is_empty());
    assert!(found.linked_documents.is_empty());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_nested_writes_check_ownership(pool: PgPool) {
    let owner = common::create_test_user(&pool, "owner@example.com").await;
    let other = common::create_test_user(&pool, "other@example.com").await;
    let repo = PgApplianceRepository::new(Arc::new(pool));
    let appliance = repo.create(new_appliance(owner, "Kettle")).await.unwrap();

    let task = repo.add_task(other, appliance.id, new_task()).await.unwrap();
    assert!(task.is_none());

    let task = repo
        .add_task(owner, appliance.id, new_task())
        .await
        .unwrap()
        .unwrap();
    assert!(!repo.remove_task(other, appliance.id, task.id).await.unwrap());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_delete_cascades(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "owner@example.com").await;
    let repo = PgApplianceRepository::new(Arc::new(pool.clone()));
    let appliance = repo.create(new_appliance(user_id, "Kettle")).await.unwrap();
    repo.add_task(user_id, appliance.id, new_task())
        .await
        .unwrap()
        .unwrap();

    assert!(repo.delete(user_id, appliance.id).await.unwrap());
    assert!(!repo.delete(user_id, appliance.id).await.unwrap());

    let tasks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM maintenance_tasks")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(tasks, 0);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_health_check(pool: PgPool) {
    let repo = PgApplianceRepository::new(Arc::new(pool));
    assert!(repo.health_check().await);
}
