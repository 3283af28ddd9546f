use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::repositories::{Entity, Repository, RepositoryError};

/// 基于内存的仓储, 未配置数据库时使用
pub struct InMemoryRepository<T: Entity> {
    inner: RwLock<Store<T>>,
}

struct Store<T> {
    entities: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Store {
                entities: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// 预置数据, 标识必须已分配
    pub fn with_entities(entities: impl IntoIterator<Item = T>) -> Self {
        let entities: BTreeMap<i32, T> = entities.into_iter().map(|e| (e.id(), e)).collect();
        let next_id = entities.last_key_value().map_or(1, |(id, _)| id.saturating_add(1));

        Self {
            inner: RwLock::new(Store { entities, next_id }),
        }
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError> {
        let store = self.inner.read().await;
        Ok(store.entities.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<T>, RepositoryError> {
        let store = self.inner.read().await;
        Ok(store.entities.get(&id).cloned())
    }

    async fn create(&self, mut entity: T) -> Result<(), RepositoryError> {
        let mut store = self.inner.write().await;

        if entity.id() <= 0 {
            entity.set_id(store.next_id);
        }

        // 标识用尽后 next_id 停在 i32::MAX, 再分配时落到这里
        if store.entities.contains_key(&entity.id()) {
            return Err(RepositoryError::Conflict(entity.id()));
        }

        store.next_id = store.next_id.max(entity.id().saturating_add(1));
        store.entities.insert(entity.id(), entity);
        Ok(())
    }

    async fn update(&self, entity: T) -> Result<(), RepositoryError> {
        let mut store = self.inner.write().await;
        match store.entities.get_mut(&entity.id()) {
            Some(stored) => {
                *stored = entity;
                Ok(())
            }
            None => Err(RepositoryError::NotFound(entity.id())),
        }
    }

    async fn delete(&self, entity: T) -> Result<(), RepositoryError> {
        let mut store = self.inner.write().await;
        store
            .entities
            .remove(&entity.id())
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(entity.id()))
    }
}
