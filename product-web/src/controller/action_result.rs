use axum::http::StatusCode;

pub const INDEX_ACTION: &str = "Index";

/// 控制器动作的结果
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult<T> {
    View(ViewResult<T>),
    RedirectToAction(RedirectToActionResult),
    NotFound(NotFoundResult),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewResult<T> {
    pub model: Option<T>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RedirectToActionResult {
    pub action_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotFoundResult;

impl NotFoundResult {
    pub fn status_code(&self) -> u16 {
        StatusCode::NOT_FOUND.as_u16()
    }
}

impl<T> ActionResult<T> {
    pub fn view(model: T) -> Self {
        ActionResult::View(ViewResult { model: Some(model) })
    }

    pub fn empty_view() -> Self {
        ActionResult::View(ViewResult { model: None })
    }

    pub fn redirect_to_action(action_name: &str) -> Self {
        ActionResult::RedirectToAction(RedirectToActionResult {
            action_name: action_name.to_string(),
        })
    }

    pub fn not_found() -> Self {
        ActionResult::NotFound(NotFoundResult)
    }

    pub fn into_view(self) -> Option<ViewResult<T>> {
        match self {
            ActionResult::View(view) => Some(view),
            _ => None,
        }
    }

    pub fn into_redirect(self) -> Option<RedirectToActionResult> {
        match self {
            ActionResult::RedirectToAction(redirect) => Some(redirect),
            _ => None,
        }
    }

    pub fn into_not_found(self) -> Option<NotFoundResult> {
        match self {
            ActionResult::NotFound(not_found) => Some(not_found),
            _ => None,
        }
    }
}
