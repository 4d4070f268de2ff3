//! Bulk JSON export of every record kind.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::model::{Contact, Permit, Resident, ServiceRequest, Task};
use crate::persistence::{
    ContactRepository, ListOrder, PermitRepository, PersistenceError, ResidentRepository,
    ServiceRequestRepository, TaskRepository,
};
use crate::registry::Registry;

/// Snapshot of all five tables, unfiltered, in id order.
///
/// Timestamps and dates serialize as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub residents: Vec<Resident>,
    pub service_requests: Vec<ServiceRequest>,
    pub permits: Vec<Permit>,
    pub contacts: Vec<Contact>,
    pub tasks: Vec<Task>,
}

impl ExportDocument {
    pub async fn collect(registry: &Registry) -> Result<Self, PersistenceError> {
        Ok(Self {
            residents: registry.residents().list_residents().await?,
            service_requests: registry
                .service_requests()
                .list_requests(None, ListOrder::Id)
                .await?,
            permits: registry.permits().list_permits(None, ListOrder::Id).await?,
            contacts: registry.contacts().list_contacts(None).await?,
            tasks: registry.tasks().list_tasks(None).await?,
        })
    }

    pub fn record_count(&self) -> usize {
        self.residents.len()
            + self.service_requests.len()
            + self.permits.len()
            + self.contacts.len()
            + self.tasks.len()
    }

    /// Write the document as pretty-printed JSON, creating the parent
    /// directory if needed.
    pub fn write_to(&self, path: &Path) -> Result<(), PersistenceError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PersistenceError::Io(std::io::Error::other(e)))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewContact, NewPermit, NewResident, NewServiceRequest, NewTask};
    use crate::persistence::sqlite::Database;

    async fn seeded_registry() -> (Database, Registry) {
        let db = Database::new_in_memory().await.unwrap();
        let registry = Registry::new(&db);
        registry
            .residents()
            .create_resident(&NewResident {
                name: "A. Smith".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        registry
            .service_requests()
            .open_request(&NewServiceRequest {
                resident_id: Some(1),
                category: "pothole".to_string(),
                description: "Main St".to_string(),
            })
            .await
            .unwrap();
        let permit = registry
            .permits()
            .apply(&NewPermit {
                resident_id: Some(1),
                permit_type: "fence".to_string(),
            })
            .await
            .unwrap();
        registry.permits().decide(permit.id, "approved").await.unwrap();
        registry
            .contacts()
            .create_contact(&NewContact {
                department: "Roads".to_string(),
                name: "R. Diaz".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        for title in ["inspect", "follow up"] {
            registry
                .tasks()
                .create_task(&NewTask {
                    title: title.to_string(),
                    due_date: crate::model::parse_due_date("2024-07-01").ok(),
                    ..Default::default()
                })
                .await
                .unwrap();
        }
        (db, registry)
    }

    #[tokio::test]
    async fn test_export_reload_matches_list_counts() {
        let (_db, registry) = seeded_registry().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("export.json");

        let doc = ExportDocument::collect(&registry).await.unwrap();
        doc.write_to(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let reloaded: ExportDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(reloaded, doc);
        assert_eq!(reloaded.residents.len(), 1);
        assert_eq!(reloaded.service_requests.len(), 1);
        assert_eq!(reloaded.permits.len(), 1);
        assert_eq!(reloaded.contacts.len(), 1);
        assert_eq!(reloaded.tasks.len(), 2);
        assert_eq!(reloaded.record_count(), 6);
    }

    #[tokio::test]
    async fn test_export_shape_is_flat_with_text_timestamps() {
        let (_db, registry) = seeded_registry().await;
        let doc = ExportDocument::collect(&registry).await.unwrap();
        let value = serde_json::to_value(&doc).unwrap();

        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        for key in ["residents", "service_requests", "permits", "contacts", "tasks"] {
            assert!(keys.contains(&key), "missing {key}");
        }

        let permit = &value["permits"][0];
        assert_eq!(permit["type"], "fence");
        assert_eq!(permit["status"], "approved");
        assert!(permit["submitted_at"].is_string());
        assert!(permit["decided_at"].is_string());
        assert_eq!(value["tasks"][0]["due_date"], "2024-07-01");
        assert!(value["residents"][0]["email"].is_null());
    }
}
