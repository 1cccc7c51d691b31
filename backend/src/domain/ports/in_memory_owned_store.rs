//! Process-local store backing [`InMemoryOwnedRepository`].
//!
//! Rows are kept flat, one table per kind, and linked by parent ids the way
//! the PostgreSQL schema links them. Every kind's repository reads the same
//! tables, so a task created inside a category is listed as a task too, and a
//! task created on its own shows up under its category.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::resources::{Category, Pomodoro, Schedule, Task, TimerSettings};
use crate::domain::{OwnedEntity, UserId};

use super::{OwnedRepository, OwnedRepositoryError};

/// Flat rows for every owned kind.
///
/// Stored roots never carry inline children; graphs are assembled on read.
#[derive(Debug, Clone, Default)]
pub struct MemoryTables {
    categories: Vec<Category>,
    timer_settings: Vec<TimerSettings>,
    tasks: Vec<Task>,
    schedules: Vec<Schedule>,
    pomodoros: Vec<Pomodoro>,
}

fn owned_row<'a, E: OwnedEntity>(rows: &'a [E], id: Uuid, owner: &UserId) -> Option<&'a E> {
    rows.iter()
        .find(|row| row.id() == id && row.owner() == owner)
}

fn ensure_new_id<E: OwnedEntity>(rows: &[E], id: Uuid) -> Result<(), OwnedRepositoryError> {
    if rows.iter().any(|row| row.id() == id) {
        return Err(OwnedRepositoryError::conflict(format!(
            "id {id} already exists"
        )));
    }
    Ok(())
}

fn ensure_parent<E: OwnedEntity>(
    rows: &[E],
    id: Uuid,
    owner: &UserId,
    kind: &str,
) -> Result<(), OwnedRepositoryError> {
    match owned_row(rows, id, owner) {
        Some(_) => Ok(()),
        None => Err(OwnedRepositoryError::missing_parent(kind)),
    }
}

fn replace_owned<E: OwnedEntity>(rows: &mut [E], root: E) {
    if let Some(slot) = rows
        .iter_mut()
        .find(|row| row.id() == root.id() && row.owner() == root.owner())
    {
        *slot = root;
    }
}

fn remove_owned<E: OwnedEntity>(rows: &mut Vec<E>, id: Uuid, owner: &UserId) -> u64 {
    let before = rows.len();
    rows.retain(|row| !(row.id() == id && row.owner() == owner));
    u64::try_from(before.saturating_sub(rows.len())).unwrap_or(u64::MAX)
}

impl MemoryTables {
    fn ensure_timer_settings(
        &self,
        id: Option<Uuid>,
        owner: &UserId,
    ) -> Result<(), OwnedRepositoryError> {
        match id {
            Some(id) => ensure_parent(&self.timer_settings, id, owner, "timer settings"),
            None => Ok(()),
        }
    }

    fn task_graph(&self, row: &Task) -> Task {
        Task {
            pomodoros: self
                .pomodoros
                .iter()
                .filter(|pomodoro| pomodoro.task_id == row.id)
                .cloned()
                .collect(),
            ..row.clone()
        }
    }

    fn category_graph(&self, row: &Category) -> Category {
        Category {
            tasks: self
                .tasks
                .iter()
                .filter(|task| task.category_id == row.id)
                .map(|task| self.task_graph(task))
                .collect(),
            schedules: self
                .schedules
                .iter()
                .filter(|schedule| schedule.category_id == row.id)
                .cloned()
                .collect(),
            ..row.clone()
        }
    }

    fn insert_task(&mut self, task: &Task) -> Result<(), OwnedRepositoryError> {
        ensure_new_id(&self.tasks, task.id)?;
        ensure_parent(&self.categories, task.category_id, &task.owner, "category")?;
        self.ensure_timer_settings(task.timer_settings_id, &task.owner)?;
        self.tasks.push(Task {
            pomodoros: Vec::new(),
            ..task.clone()
        });
        for pomodoro in &task.pomodoros {
            ensure_new_id(&self.pomodoros, pomodoro.id)?;
            ensure_parent(&self.tasks, pomodoro.task_id, &pomodoro.owner, "task")?;
            self.ensure_timer_settings(pomodoro.timer_settings_id, &pomodoro.owner)?;
            self.pomodoros.push(pomodoro.clone());
        }
        Ok(())
    }

    fn insert_schedule(&mut self, schedule: &Schedule) -> Result<(), OwnedRepositoryError> {
        ensure_new_id(&self.schedules, schedule.id)?;
        ensure_parent(
            &self.categories,
            schedule.category_id,
            &schedule.owner,
            "category",
        )?;
        self.schedules.push(schedule.clone());
        Ok(())
    }

    fn remove_task_rows(&mut self, doomed: &[Uuid]) {
        self.tasks.retain(|task| !doomed.contains(&task.id));
        self.pomodoros
            .retain(|pomodoro| !doomed.contains(&pomodoro.task_id));
    }
}

/// Kinds the in-memory store can hold as repository roots.
pub trait MemoryTable: OwnedEntity {
    /// Rows of this kind, in insertion order.
    fn rows(tables: &MemoryTables) -> &[Self];

    /// Assemble the graph rooted at `row` from the child tables.
    fn graph(tables: &MemoryTables, row: &Self) -> Self;

    /// Write `entity` and its children, checking ids and parent references.
    ///
    /// # Errors
    /// Returns `Conflict` for a taken id and `MissingReference` for a parent
    /// the owner does not hold. `tables` may be partially written on error.
    fn insert_graph(tables: &mut MemoryTables, entity: &Self)
    -> Result<(), OwnedRepositoryError>;

    /// Rewrite the root row matching id and owner; `false` when none matched.
    ///
    /// # Errors
    /// Returns `MissingReference` when the new scalars point at a parent the
    /// owner does not hold.
    fn update_root(tables: &mut MemoryTables, entity: &Self)
    -> Result<bool, OwnedRepositoryError>;

    /// Remove the owned root and apply the schema's delete rules to children.
    fn remove(tables: &mut MemoryTables, id: Uuid, owner: &UserId) -> u64;
}

impl MemoryTable for Category {
    fn rows(tables: &MemoryTables) -> &[Self] {
        &tables.categories
    }

    fn graph(tables: &MemoryTables, row: &Self) -> Self {
        tables.category_graph(row)
    }

    fn insert_graph(
        tables: &mut MemoryTables,
        entity: &Self,
    ) -> Result<(), OwnedRepositoryError> {
        ensure_new_id(&tables.categories, entity.id)?;
        tables.categories.push(Self {
            tasks: Vec::new(),
            schedules: Vec::new(),
            ..entity.clone()
        });
        for task in &entity.tasks {
            tables.insert_task(task)?;
        }
        for schedule in &entity.schedules {
            tables.insert_schedule(schedule)?;
        }
        Ok(())
    }

    fn update_root(
        tables: &mut MemoryTables,
        entity: &Self,
    ) -> Result<bool, OwnedRepositoryError> {
        if owned_row(&tables.categories, entity.id, &entity.owner).is_none() {
            return Ok(false);
        }
        let root = Self {
            tasks: Vec::new(),
            schedules: Vec::new(),
            ..entity.clone()
        };
        replace_owned(&mut tables.categories, root);
        Ok(true)
    }

    fn remove(tables: &mut MemoryTables, id: Uuid, owner: &UserId) -> u64 {
        let removed = remove_owned(&mut tables.categories, id, owner);
        if removed > 0 {
            let doomed: Vec<Uuid> = tables
                .tasks
                .iter()
                .filter(|task| task.category_id == id)
                .map(|task| task.id)
                .collect();
            tables.remove_task_rows(&doomed);
            tables
                .schedules
                .retain(|schedule| schedule.category_id != id);
        }
        removed
    }
}

impl MemoryTable for Task {
    fn rows(tables: &MemoryTables) -> &[Self] {
        &tables.tasks
    }

    fn graph(tables: &MemoryTables, row: &Self) -> Self {
        tables.task_graph(row)
    }

    fn insert_graph(
        tables: &mut MemoryTables,
        entity: &Self,
    ) -> Result<(), OwnedRepositoryError> {
        tables.insert_task(entity)
    }

    fn update_root(
        tables: &mut MemoryTables,
        entity: &Self,
    ) -> Result<bool, OwnedRepositoryError> {
        if owned_row(&tables.tasks, entity.id, &entity.owner).is_none() {
            return Ok(false);
        }
        ensure_parent(
            &tables.categories,
            entity.category_id,
            &entity.owner,
            "category",
        )?;
        tables.ensure_timer_settings(entity.timer_settings_id, &entity.owner)?;
        let root = Self {
            pomodoros: Vec::new(),
            ..entity.clone()
        };
        replace_owned(&mut tables.tasks, root);
        Ok(true)
    }

    fn remove(tables: &mut MemoryTables, id: Uuid, owner: &UserId) -> u64 {
        let removed = remove_owned(&mut tables.tasks, id, owner);
        if removed > 0 {
            tables.remove_task_rows(&[id]);
        }
        removed
    }
}

impl MemoryTable for Schedule {
    fn rows(tables: &MemoryTables) -> &[Self] {
        &tables.schedules
    }

    fn graph(_tables: &MemoryTables, row: &Self) -> Self {
        row.clone()
    }

    fn insert_graph(
        tables: &mut MemoryTables,
        entity: &Self,
    ) -> Result<(), OwnedRepositoryError> {
        tables.insert_schedule(entity)
    }

    fn update_root(
        tables: &mut MemoryTables,
        entity: &Self,
    ) -> Result<bool, OwnedRepositoryError> {
        if owned_row(&tables.schedules, entity.id, &entity.owner).is_none() {
            return Ok(false);
        }
        ensure_parent(
            &tables.categories,
            entity.category_id,
            &entity.owner,
            "category",
        )?;
        replace_owned(&mut tables.schedules, entity.clone());
        Ok(true)
    }

    fn remove(tables: &mut MemoryTables, id: Uuid, owner: &UserId) -> u64 {
        remove_owned(&mut tables.schedules, id, owner)
    }
}

impl MemoryTable for TimerSettings {
    fn rows(tables: &MemoryTables) -> &[Self] {
        &tables.timer_settings
    }

    fn graph(_tables: &MemoryTables, row: &Self) -> Self {
        row.clone()
    }

    fn insert_graph(
        tables: &mut MemoryTables,
        entity: &Self,
    ) -> Result<(), OwnedRepositoryError> {
        ensure_new_id(&tables.timer_settings, entity.id)?;
        tables.timer_settings.push(entity.clone());
        Ok(())
    }

    fn update_root(
        tables: &mut MemoryTables,
        entity: &Self,
    ) -> Result<bool, OwnedRepositoryError> {
        if owned_row(&tables.timer_settings, entity.id, &entity.owner).is_none() {
            return Ok(false);
        }
        replace_owned(&mut tables.timer_settings, entity.clone());
        Ok(true)
    }

    fn remove(tables: &mut MemoryTables, id: Uuid, owner: &UserId) -> u64 {
        let removed = remove_owned(&mut tables.timer_settings, id, owner);
        if removed > 0 {
            for task in tables
                .tasks
                .iter_mut()
                .filter(|task| task.timer_settings_id == Some(id))
            {
                task.timer_settings_id = None;
            }
            for pomodoro in tables
                .pomodoros
                .iter_mut()
                .filter(|pomodoro| pomodoro.timer_settings_id == Some(id))
            {
                pomodoro.timer_settings_id = None;
            }
        }
        removed
    }
}

/// Tables shared by every kind's [`InMemoryOwnedRepository`].
#[derive(Debug, Default)]
pub struct InMemoryOwnedStore {
    tables: RwLock<MemoryTables>,
}

impl InMemoryOwnedStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// [`OwnedRepository`] over one kind's view of an [`InMemoryOwnedStore`].
///
/// Used when no database is configured and as a deterministic store in
/// tests. Graph inserts are staged on a copy of the tables and only
/// published when every row was accepted.
pub struct InMemoryOwnedRepository<E> {
    store: Arc<InMemoryOwnedStore>,
    kind: PhantomData<fn() -> E>,
}

impl<E> InMemoryOwnedRepository<E> {
    /// Create a repository over its own empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryOwnedStore::new()))
    }

    /// Create a repository over tables shared with other kinds.
    #[must_use]
    pub const fn with_store(store: Arc<InMemoryOwnedStore>) -> Self {
        Self {
            store,
            kind: PhantomData,
        }
    }
}

impl<E> Default for InMemoryOwnedRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: MemoryTable> OwnedRepository<E> for InMemoryOwnedRepository<E> {
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<E>, OwnedRepositoryError> {
        let tables = self.store.tables.read().await;
        Ok(E::rows(&tables)
            .iter()
            .filter(|row| row.owner() == owner)
            .map(|row| E::graph(&tables, row))
            .collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<E>, OwnedRepositoryError> {
        let tables = self.store.tables.read().await;
        Ok(E::rows(&tables)
            .iter()
            .find(|row| row.id() == *id)
            .map(|row| E::graph(&tables, row)))
    }

    async fn find_if_owned(
        &self,
        id: &Uuid,
        owner: &UserId,
    ) -> Result<Option<E>, OwnedRepositoryError> {
        let tables = self.store.tables.read().await;
        Ok(owned_row(E::rows(&tables), *id, owner).map(|row| E::graph(&tables, row)))
    }

    async fn insert(&self, mut entity: E) -> Result<E, OwnedRepositoryError> {
        entity.assign_missing_ids();
        let mut tables = self.store.tables.write().await;
        let mut staged = tables.clone();
        E::insert_graph(&mut staged, &entity)?;
        *tables = staged;
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<Option<E>, OwnedRepositoryError> {
        let mut tables = self.store.tables.write().await;
        if !E::update_root(&mut tables, &entity)? {
            return Ok(None);
        }
        Ok(owned_row(E::rows(&tables), entity.id(), entity.owner())
            .map(|row| E::graph(&tables, row)))
    }

    async fn delete_if_owned(
        &self,
        id: &Uuid,
        owner: &UserId,
    ) -> Result<u64, OwnedRepositoryError> {
        let mut tables = self.store.tables.write().await;
        Ok(E::remove(&mut tables, *id, owner))
    }
}

#[cfg(test)]
#[path = "in_memory_owned_store_tests.rs"]
mod tests;
