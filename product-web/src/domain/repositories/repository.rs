use async_trait::async_trait;
use thiserror::Error;

/// 拥有唯一标识的持久化实体
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> i32;

    fn set_id(&mut self, id: i32);
}

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Entity with ID {0} not found")]
    NotFound(i32),

    #[error("Entity with ID {0} already exists")]
    Conflict(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// 通用仓储接口
///
/// `get_by_id` 找不到实体时返回 `Ok(None)`, 只有存储本身出错才返回 `Err`。
/// `update` 按实体标识整体替换。
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<T>, RepositoryError>;

    async fn create(&self, entity: T) -> Result<(), RepositoryError>;

    async fn update(&self, entity: T) -> Result<(), RepositoryError>;

    async fn delete(&self, entity: T) -> Result<(), RepositoryError>;
}
