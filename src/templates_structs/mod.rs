// Template context structures for Askama templates and JSON responses.
// All types are re-exported: `use vkusnosam::templates_structs::*`

use crate::config::AppConfig;

/// Common context shared by every page.
/// Templates access these as `ctx.app_name`, `ctx.lang`.
pub struct PageContext {
    pub app_name: String,
    pub lang: String,
}

impl PageContext {
    pub fn build(config: &AppConfig) -> Self {
        Self {
            app_name: "Vkusnosam".to_string(),
            lang: config.labels.code().to_string(),
        }
    }
}

mod recipe;

pub use self::recipe::{RecipeAddTemplate, StepsPreviewResponse, StepsQuery};
