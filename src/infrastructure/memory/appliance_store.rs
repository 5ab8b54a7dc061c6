//! In-memory appliance repository.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{
    Appliance, AppliancePatch, LinkedDocument, MaintenanceTask, MaintenanceTaskPatch,
    NewAppliance, NewLinkedDocument, NewMaintenanceTask, NewSupportContact, SupportContact,
};
use crate::domain::repositories::ApplianceRepository;
use crate::error::AppError;

/// Appliances kept in insertion order; listing returns newest first.
#[derive(Default)]
pub struct InMemoryApplianceRepository {
    appliances: RwLock<Vec<Appliance>>,
}

impl InMemoryApplianceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn owned<'a>(
    appliances: &'a mut [Appliance],
    user_id: Uuid,
    id: Uuid,
) -> Option<&'a mut Appliance> {
    appliances
        .iter_mut()
        .find(|a| a.id == id && a.user_id == user_id)
}

/// Removes the first element matching `pred`, reporting whether one existed.
fn remove_where<T>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> bool {
    match items.iter().position(pred) {
        Some(i) => {
            items.remove(i);
            true
        }
        None => false,
    }
}

#[async_trait]
impl ApplianceRepository for InMemoryApplianceRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Appliance>, AppError> {
        let appliances = self.appliances.read().await;
        Ok(appliances
            .iter()
            .rev()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find(&self, user_id: Uuid, id: Uuid) -> Result<Option<Appliance>, AppError> {
        let appliances = self.appliances.read().await;
        Ok(appliances
            .iter()
            .find(|a| a.id == id && a.user_id == user_id)
            .cloned())
    }

    async fn create(&self, new_appliance: NewAppliance) -> Result<Appliance, AppError> {
        let appliance = Appliance::from_new(Uuid::new_v4(), new_appliance, Utc::now());
        self.appliances.write().await.push(appliance.clone());
        Ok(appliance)
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: AppliancePatch,
    ) -> Result<Option<Appliance>, AppError> {
        let mut appliances = self.appliances.write().await;
        Ok(owned(&mut *appliances, user_id, id).map(|appliance| {
            patch.apply_to(appliance, Utc::now());
            appliance.clone()
        }))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut appliances = self.appliances.write().await;
        Ok(remove_where(&mut *appliances, |a| {
            a.id == id && a.user_id == user_id
        }))
    }

    async fn add_contact(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        contact: NewSupportContact,
    ) -> Result<Option<SupportContact>, AppError> {
        let mut appliances = self.appliances.write().await;
        Ok(owned(&mut *appliances, user_id, appliance_id).map(|appliance| {
            let contact = SupportContact::from_new(Uuid::new_v4(), appliance_id, contact);
            appliance.support_contacts.push(contact.clone());
            contact
        }))
    }

    async fn remove_contact(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        contact_id: Uuid,
    ) -> Result<bool, AppError> {
        let mut appliances = self.appliances.write().await;
        Ok(owned(&mut *appliances, user_id, appliance_id)
            .is_some_and(|a| remove_where(&mut a.support_contacts, |c| c.id == contact_id)))
    }

    async fn add_task(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        task: NewMaintenanceTask,
    ) -> Result<Option<MaintenanceTask>, AppError> {
        let mut appliances = self.appliances.write().await;
        Ok(owned(&mut *appliances, user_id, appliance_id).map(|appliance| {
            let task = MaintenanceTask::from_new(Uuid::new_v4(), appliance_id, task);
            appliance.maintenance_tasks.push(task.clone());
            task
        }))
    }

    async fn update_task(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        task_id: Uuid,
        patch: MaintenanceTaskPatch,
    ) -> Result<Option<MaintenanceTask>, AppError> {
        let mut appliances = self.appliances.write().await;
        let task = owned(&mut *appliances, user_id, appliance_id)
            .and_then(|a| a.maintenance_tasks.iter_mut().find(|t| t.id == task_id));

        Ok(task.map(|task| {
            patch.apply_to(task);
            task.clone()
        }))
    }

    async fn remove_task(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        task_id: Uuid,
    ) -> Result<bool, AppError> {
        let mut appliances = self.appliances.write().await;
        Ok(owned(&mut *appliances, user_id, appliance_id)
            .is_some_and(|a| remove_where(&mut a.maintenance_tasks, |t| t.id == task_id)))
    }

    async fn add_document(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        document: NewLinkedDocument,
    ) -> Result<Option<LinkedDocument>, AppError> {
        let mut appliances = self.appliances.write().await;
        Ok(owned(&mut *appliances, user_id, appliance_id).map(|appliance| {
            let document = LinkedDocument::from_new(Uuid::new_v4(), appliance_id, document);
            appliance.linked_documents.push(document.clone());
            document
        }))
    }

    async fn remove_document(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        document_id: Uuid,
    ) -> Result<bool, AppError> {
        let mut appliances = self.appliances.write().await;
        Ok(owned(&mut *appliances, user_id, appliance_id)
            .is_some_and(|a| remove_where(&mut a.linked_documents, |d| d.id == document_id)))
    }

    async fn health_check(&self) -> bool {
        true
    }
}
