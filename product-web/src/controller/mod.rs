pub mod action_result;
pub mod product_controller;

pub use action_result::{ActionResult, NotFoundResult, RedirectToActionResult, ViewResult};
pub use product_controller::ProductsController;
