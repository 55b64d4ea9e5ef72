//! Education module endpoints.

use axum::{Json, extract::Path};
use serde::Serialize;

use crate::content::{self, Module, ModuleSummary};
use crate::dto::Success;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct ModuleList {
    pub modules: Vec<ModuleSummary>,
}

#[derive(Debug, Serialize)]
pub struct ModuleBody {
    pub module: &'static Module,
}

/// GET /api/education/modules - Module catalogue.
pub async fn list_modules() -> Json<Success<ModuleList>> {
    Json(Success::new(ModuleList {
        modules: content::modules(),
    }))
}

/// GET /api/education/module/{id} - One module's content.
pub async fn get_module(Path(id): Path<String>) -> Result<Json<Success<ModuleBody>>, ApiError> {
    let module =
        content::module(&id).ok_or_else(|| ApiError::NotFound(format!("module {id:?}")))?;
    Ok(Json(Success::new(ModuleBody { module })))
}
