use async_trait::async_trait;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

use crate::config::Config;
use crate::domain::models::product::Product;
use crate::domain::repositories::{Repository, RepositoryError};
use crate::error::AppError;

pub async fn init_mysql(config: &Config, url: &str) -> Result<MySqlPool, AppError> {
    tracing::info!("Initializing MySQL connection pool");

    let pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(url)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id    INT AUTO_INCREMENT PRIMARY KEY,
            name  VARCHAR(255) NOT NULL,
            price DOUBLE NOT NULL,
            stock INT NOT NULL,
            color VARCHAR(64) NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    Ok(pool)
}

pub struct MySqlProductRepository {
    pool: MySqlPool,
}

impl MySqlProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Product> for MySqlProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r#"SELECT id, name, price, stock, color FROM products ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r#"SELECT id, name, price, stock, color FROM products WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn create(&self, product: Product) -> Result<(), RepositoryError> {
        // id 为 0 时交给 AUTO_INCREMENT
        let id = (product.id > 0).then_some(product.id);

        let result = sqlx::query(
            r#"
            INSERT INTO products (id, name, price, stock, color)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.color)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(RepositoryError::Conflict(product.id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&self, product: Product) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?, price = ?, stock = ?, color = ?
            WHERE id = ?
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.color)
        .bind(product.id)
        .execute(&self.pool)
        .await?;

        // MySQL 对未改变的行也返回 0, 所以需要再确认一次是否存在
        if result.rows_affected() == 0 && self.get_by_id(product.id).await?.is_none() {
            return Err(RepositoryError::NotFound(product.id));
        }

        Ok(())
    }

    async fn delete(&self, product: Product) -> Result<(), RepositoryError> {
        let result = sqlx::query(r#"DELETE FROM products WHERE id = ?"#)
            .bind(product.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(product.id));
        }

        Ok(())
    }
}
