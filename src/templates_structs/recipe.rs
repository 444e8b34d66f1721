use askama::Template;
use serde::{Deserialize, Serialize};

use crate::recipe_form::StepGroupSnapshot;

use super::PageContext;

#[derive(Template)]
#[template(path = "recipes/add.html")]
pub struct RecipeAddTemplate {
    pub ctx: PageContext,
    /// Pre-rendered recipe form markup.
    pub form_html: String,
    pub step_count: u32,
}

/// `?steps=N` on the recipe preview routes.
#[derive(Deserialize, Debug, Default)]
pub struct StepsQuery {
    pub steps: Option<u32>,
}

/// JSON view of the step section after N steps.
#[derive(Serialize, Debug, Clone)]
pub struct StepsPreviewResponse {
    pub counter: u32,
    pub label: String,
    pub control_label: String,
    pub groups: Vec<StepGroupSnapshot>,
}
