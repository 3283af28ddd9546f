use std::collections::BTreeMap;

use serde::Serialize;
use validator::ValidationErrors;

/// 提交数据的校验结果, 由调用方在进入控制器之前计算好
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ModelState {
    errors: BTreeMap<String, Vec<String>>,
}

impl ModelState {
    pub fn valid() -> Self {
        Self::default()
    }

    /// 空消息同样会使状态无效
    pub fn add_model_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn merge(&mut self, other: ModelState) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl From<ValidationErrors> for ModelState {
    fn from(errors: ValidationErrors) -> Self {
        let mut state = ModelState::valid();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                state.add_model_error(field.to_string(), message);
            }
        }
        state
    }
}

impl From<Result<(), ValidationErrors>> for ModelState {
    fn from(result: Result<(), ValidationErrors>) -> Self {
        match result {
            Ok(()) => ModelState::valid(),
            Err(errors) => errors.into(),
        }
    }
}
