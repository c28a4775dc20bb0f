//! In-memory store.
//!
//! Backs development and tests. The slug indexes are checked and updated
//! under a single write lock, which is the in-memory equivalent of the SQL
//! unique index on `(scope, slug)`: concurrent inserts of the same slug
//! serialize at the lock and the loser gets `SlugTaken`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use slate_core::{
    EntityType, Project, ProjectId, SlateResult, StorageError, Task, TaskId, UserId,
};

use crate::{ProjectUpdate, Store, TaskUpdate};

#[derive(Debug, Default)]
struct Inner {
    projects: HashMap<ProjectId, Project>,
    tasks: HashMap<TaskId, Task>,
    /// Global unique index: project slug -> project id.
    project_slugs: HashMap<String, ProjectId>,
    /// Per-project unique index: (project id, task slug) -> task id.
    task_slugs: HashMap<(ProjectId, String), TaskId>,
}

/// In-memory [`Store`] implementation.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get count of stored projects.
    pub fn project_count(&self) -> usize {
        self.inner.read().map(|i| i.projects.len()).unwrap_or(0)
    }

    /// Get count of stored tasks.
    pub fn task_count(&self) -> usize {
        self.inner.read().map(|i| i.tasks.len()).unwrap_or(0)
    }

    fn read(&self) -> SlateResult<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| StorageError::LockPoisoned.into())
    }

    fn write(&self) -> SlateResult<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| StorageError::LockPoisoned.into())
    }
}

fn paginate<T>(mut items: Vec<T>, limit: i64, offset: i64) -> Vec<T> {
    let offset = offset.max(0) as usize;
    let limit = limit.max(0) as usize;
    if offset >= items.len() {
        return Vec::new();
    }
    items.drain(..offset);
    items.truncate(limit);
    items
}

#[async_trait]
impl Store for MemoryStore {
    // === Project Operations ===

    async fn project_insert(&self, p: &Project) -> SlateResult<()> {
        let mut inner = self.write()?;
        if inner.project_slugs.contains_key(&p.slug) {
            return Err(StorageError::SlugTaken {
                slug: p.slug.clone(),
            }
            .into());
        }
        if inner.projects.contains_key(&p.project_id) {
            return Err(StorageError::InsertFailed {
                entity_type: EntityType::Project,
                reason: "already exists".to_string(),
            }
            .into());
        }
        inner.project_slugs.insert(p.slug.clone(), p.project_id);
        inner.projects.insert(p.project_id, p.clone());
        Ok(())
    }

    async fn project_get(&self, id: ProjectId) -> SlateResult<Option<Project>> {
        Ok(self.read()?.projects.get(&id).cloned())
    }

    async fn project_get_by_slug(&self, slug: &str) -> SlateResult<Option<Project>> {
        let inner = self.read()?;
        Ok(inner
            .project_slugs
            .get(slug)
            .and_then(|id| inner.projects.get(id))
            .cloned())
    }

    async fn project_slug_exists(&self, slug: &str) -> SlateResult<bool> {
        Ok(self.read()?.project_slugs.contains_key(slug))
    }

    async fn project_list_by_owner(
        &self,
        owner: UserId,
        limit: i64,
        offset: i64,
    ) -> SlateResult<Vec<Project>> {
        let inner = self.read()?;
        let mut projects: Vec<Project> = inner
            .projects
            .values()
            .filter(|p| p.owner == owner)
            .cloned()
            .collect();
        // UUIDv7 ids sort by creation time.
        projects.sort_by_key(|p| p.project_id);
        Ok(paginate(projects, limit, offset))
    }

    async fn project_count_by_owner(&self, owner: UserId) -> SlateResult<i64> {
        let inner = self.read()?;
        Ok(inner.projects.values().filter(|p| p.owner == owner).count() as i64)
    }

    async fn project_update(&self, id: ProjectId, update: ProjectUpdate) -> SlateResult<()> {
        let mut inner = self.write()?;
        let project = inner.projects.get_mut(&id).ok_or(StorageError::NotFound {
            entity_type: EntityType::Project,
            id,
        })?;

        if let Some(name) = update.name {
            project.name = name;
        }
        if let Some(client) = update.client {
            project.client = client;
        }
        project.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn project_link_task(&self, id: ProjectId, task_id: TaskId) -> SlateResult<()> {
        let mut inner = self.write()?;
        let project = inner.projects.get_mut(&id).ok_or(StorageError::NotFound {
            entity_type: EntityType::Project,
            id,
        })?;
        project.tasks.push(task_id);
        project.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn project_delete(&self, id: ProjectId) -> SlateResult<()> {
        let mut inner = self.write()?;
        let project = inner.projects.remove(&id).ok_or(StorageError::NotFound {
            entity_type: EntityType::Project,
            id,
        })?;
        inner.project_slugs.remove(&project.slug);

        // Cascade: a task is only addressable through its parent project.
        let orphaned: Vec<TaskId> = inner
            .tasks
            .values()
            .filter(|t| t.project == id)
            .map(|t| t.task_id)
            .collect();
        for task_id in orphaned {
            if let Some(task) = inner.tasks.remove(&task_id) {
                inner.task_slugs.remove(&(id, task.slug));
            }
        }
        Ok(())
    }

    // === Task Operations ===

    async fn task_insert(&self, t: &Task) -> SlateResult<()> {
        let mut inner = self.write()?;
        let key = (t.project, t.slug.clone());
        if inner.task_slugs.contains_key(&key) {
            return Err(StorageError::SlugTaken {
                slug: t.slug.clone(),
            }
            .into());
        }
        if inner.tasks.contains_key(&t.task_id) {
            return Err(StorageError::InsertFailed {
                entity_type: EntityType::Task,
                reason: "already exists".to_string(),
            }
            .into());
        }
        inner.task_slugs.insert(key, t.task_id);
        inner.tasks.insert(t.task_id, t.clone());
        Ok(())
    }

    async fn task_get(&self, id: TaskId) -> SlateResult<Option<Task>> {
        Ok(self.read()?.tasks.get(&id).cloned())
    }

    async fn task_get_by_slug(
        &self,
        project: ProjectId,
        slug: &str,
    ) -> SlateResult<Option<Task>> {
        let inner = self.read()?;
        Ok(inner
            .task_slugs
            .get(&(project, slug.to_string()))
            .and_then(|id| inner.tasks.get(id))
            .cloned())
    }

    async fn task_slug_exists(&self, project: ProjectId, slug: &str) -> SlateResult<bool> {
        Ok(self
            .read()?
            .task_slugs
            .contains_key(&(project, slug.to_string())))
    }

    async fn task_list_by_project(
        &self,
        project: ProjectId,
        limit: i64,
        offset: i64,
    ) -> SlateResult<Vec<Task>> {
        let inner = self.read()?;
        let mut tasks: Vec<Task> = inner
            .tasks
            .values()
            .filter(|t| t.project == project)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.task_id);
        Ok(paginate(tasks, limit, offset))
    }

    async fn task_count_by_project(&self, project: ProjectId) -> SlateResult<i64> {
        let inner = self.read()?;
        Ok(inner.tasks.values().filter(|t| t.project == project).count() as i64)
    }

    async fn task_update(&self, id: TaskId, update: TaskUpdate) -> SlateResult<()> {
        let mut inner = self.write()?;
        let task = inner.tasks.get_mut(&id).ok_or(StorageError::NotFound {
            entity_type: EntityType::Task,
            id,
        })?;

        if let Some(name) = update.name {
            task.name = name;
        }
        task.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn task_delete(&self, id: TaskId) -> SlateResult<()> {
        let mut inner = self.write()?;
        let task = inner.tasks.remove(&id).ok_or(StorageError::NotFound {
            entity_type: EntityType::Task,
            id,
        })?;
        inner.task_slugs.remove(&(task.project, task.slug.clone()));
        if let Some(project) = inner.projects.get_mut(&task.project) {
            project.tasks.retain(|t| *t != id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slate_core::{new_entity_id, SlateError, SELF_ENGAGED};

    fn make_project(owner: UserId, name: &str, slug: &str) -> Project {
        let now = chrono::Utc::now();
        Project {
            project_id: new_entity_id(),
            name: name.to_string(),
            slug: slug.to_string(),
            owner,
            client: SELF_ENGAGED.to_string(),
            tasks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn make_task(owner: UserId, project: ProjectId, name: &str, slug: &str) -> Task {
        let now = chrono::Utc::now();
        Task {
            task_id: new_entity_id(),
            name: name.to_string(),
            slug: slug.to_string(),
            owner,
            project,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn duplicate_project_slug_rejected() {
        let store = MemoryStore::new();
        let owner = new_entity_id();
        store
            .project_insert(&make_project(owner, "Plan", "plan"))
            .await
            .unwrap();

        let err = store
            .project_insert(&make_project(owner, "Plan", "plan"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SlateError::Storage(StorageError::SlugTaken { .. })
        ));
    }

    #[tokio::test]
    async fn task_slug_unique_per_project_only() {
        let store = MemoryStore::new();
        let owner = new_entity_id();
        let p1 = make_project(owner, "One", "one");
        let p2 = make_project(owner, "Two", "two");
        store.project_insert(&p1).await.unwrap();
        store.project_insert(&p2).await.unwrap();

        store
            .task_insert(&make_task(owner, p1.project_id, "Setup", "setup"))
            .await
            .unwrap();
        // Same slug in a different project is fine.
        store
            .task_insert(&make_task(owner, p2.project_id, "Setup", "setup"))
            .await
            .unwrap();
        // Same slug in the same project is not.
        let err = store
            .task_insert(&make_task(owner, p1.project_id, "Setup", "setup"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SlateError::Storage(StorageError::SlugTaken { .. })
        ));
    }

    #[tokio::test]
    async fn delete_frees_slug_for_reuse() {
        let store = MemoryStore::new();
        let owner = new_entity_id();
        let p = make_project(owner, "Plan", "plan");
        store.project_insert(&p).await.unwrap();
        store.project_delete(p.project_id).await.unwrap();

        assert!(!store.project_slug_exists("plan").await.unwrap());
        store
            .project_insert(&make_project(owner, "Plan", "plan"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn project_delete_cascades_to_tasks() {
        let store = MemoryStore::new();
        let owner = new_entity_id();
        let p = make_project(owner, "Plan", "plan");
        store.project_insert(&p).await.unwrap();
        let t = make_task(owner, p.project_id, "Setup", "setup");
        store.task_insert(&t).await.unwrap();
        store.project_link_task(p.project_id, t.task_id).await.unwrap();

        store.project_delete(p.project_id).await.unwrap();
        assert_eq!(store.task_count(), 0);
        assert!(store.task_get(t.task_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn link_preserves_creation_order() {
        let store = MemoryStore::new();
        let owner = new_entity_id();
        let p = make_project(owner, "Plan", "plan");
        store.project_insert(&p).await.unwrap();

        let mut expected = Vec::new();
        for i in 0..3 {
            let t = make_task(owner, p.project_id, "T", &format!("t-{}", i));
            store.task_insert(&t).await.unwrap();
            store.project_link_task(p.project_id, t.task_id).await.unwrap();
            expected.push(t.task_id);
        }

        let stored = store.project_get(p.project_id).await.unwrap().unwrap();
        assert_eq!(stored.tasks, expected);
    }

    #[tokio::test]
    async fn task_delete_unlinks_from_project() {
        let store = MemoryStore::new();
        let owner = new_entity_id();
        let p = make_project(owner, "Plan", "plan");
        store.project_insert(&p).await.unwrap();
        let t = make_task(owner, p.project_id, "Setup", "setup");
        store.task_insert(&t).await.unwrap();
        store.project_link_task(p.project_id, t.task_id).await.unwrap();

        store.task_delete(t.task_id).await.unwrap();
        let stored = store.project_get(p.project_id).await.unwrap().unwrap();
        assert!(stored.tasks.is_empty());
        assert!(!store
            .task_slug_exists(p.project_id, "setup")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn update_does_not_touch_slug() {
        let store = MemoryStore::new();
        let owner = new_entity_id();
        let p = make_project(owner, "Plan", "plan");
        store.project_insert(&p).await.unwrap();

        store
            .project_update(
                p.project_id,
                ProjectUpdate {
                    name: Some("Renamed Entirely".to_string()),
                    client: Some("Acme".to_string()),
                },
            )
            .await
            .unwrap();

        let stored = store.project_get(p.project_id).await.unwrap().unwrap();
        assert_eq!(stored.slug, "plan");
        assert_eq!(stored.name, "Renamed Entirely");
        assert_eq!(stored.client, "Acme");
    }

    #[tokio::test]
    async fn pagination_bounds() {
        let store = MemoryStore::new();
        let owner = new_entity_id();
        for i in 0..5 {
            store
                .project_insert(&make_project(owner, "P", &format!("p-{}", i)))
                .await
                .unwrap();
        }

        let page = store.project_list_by_owner(owner, 2, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        let past_end = store.project_list_by_owner(owner, 10, 99).await.unwrap();
        assert!(past_end.is_empty());
        assert_eq!(store.project_count_by_owner(owner).await.unwrap(), 5);
    }
}
