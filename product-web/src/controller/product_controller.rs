use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::controller::action_result::{ActionResult, INDEX_ACTION};
use crate::domain::models::product::Product;
use crate::domain::repositories::Repository;
use crate::domain::validation::ModelState;
use crate::error::AppError;

/// 商品的增删改查控制器
///
/// 找不到商品和校验失败都以 [`ActionResult`] 返回, 只有仓储本身的错误才会作为 `Err` 向上传播。
pub struct ProductsController {
    repository: Arc<dyn Repository<Product>>,
}

impl ProductsController {
    pub fn new(repository: Arc<dyn Repository<Product>>) -> Self {
        Self { repository }
    }

    pub async fn index(&self) -> Result<ActionResult<Vec<Product>>, AppError> {
        let products = self.repository.get_all().await?;
        debug!("Listing {} products", products.len());

        Ok(ActionResult::view(products))
    }

    pub async fn details(&self, id: Option<i32>) -> Result<ActionResult<Product>, AppError> {
        let Some(id) = id else {
            return Ok(ActionResult::redirect_to_action(INDEX_ACTION));
        };

        self.find(id).await
    }

    /// 空表单
    pub fn create(&self) -> ActionResult<Product> {
        ActionResult::empty_view()
    }

    pub async fn create_post(
        &self,
        product: Product,
        model_state: &ModelState,
    ) -> Result<ActionResult<Product>, AppError> {
        if !model_state.is_valid() {
            debug!("Rejected product create: {:?}", model_state.errors());
            return Ok(ActionResult::view(product));
        }

        info!("Creating product '{}'", product.name);
        self.repository.create(product).await?;

        Ok(ActionResult::redirect_to_action(INDEX_ACTION))
    }

    pub async fn edit(&self, id: Option<i32>) -> Result<ActionResult<Product>, AppError> {
        let Some(id) = id else {
            return Ok(ActionResult::redirect_to_action(INDEX_ACTION));
        };

        self.find(id).await
    }

    pub async fn edit_post(
        &self,
        id: i32,
        product: Product,
        model_state: &ModelState,
    ) -> Result<ActionResult<Product>, AppError> {
        if id != product.id {
            warn!("Edit route id {} does not match product id {}", id, product.id);
            return Ok(ActionResult::not_found());
        }

        if !model_state.is_valid() {
            debug!("Rejected product {} update: {:?}", id, model_state.errors());
            return Ok(ActionResult::view(product));
        }

        info!("Updating product {}", id);
        self.repository.update(product).await?;

        Ok(ActionResult::redirect_to_action(INDEX_ACTION))
    }

    pub async fn delete(&self, id: Option<i32>) -> Result<ActionResult<Product>, AppError> {
        let Some(id) = id else {
            return Ok(ActionResult::not_found());
        };

        self.find(id).await
    }

    /// 总是重定向到列表页。
    ///
    /// `delete` 需要一个已加载的 `Product`, 查不到时无法调用, 因此这里跳过删除但不改变返回结果,
    /// 而不是返回 404。
    pub async fn delete_confirmed(&self, id: i32) -> Result<ActionResult<Product>, AppError> {
        match self.repository.get_by_id(id).await? {
            Some(product) => {
                info!("Deleting product {}", id);
                self.repository.delete(product).await?;
            }
            None => warn!(
                "Product {} not found on delete confirmation, skipping repository delete and redirecting anyway",
                id
            ),
        }

        Ok(ActionResult::redirect_to_action(INDEX_ACTION))
    }

    async fn find(&self, id: i32) -> Result<ActionResult<Product>, AppError> {
        match self.repository.get_by_id(id).await? {
            Some(product) => Ok(ActionResult::view(product)),
            None => {
                debug!("Product {} not found", id);
                Ok(ActionResult::not_found())
            }
        }
    }
}
