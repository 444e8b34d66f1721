use actix_web::{HttpResponse, web};

use crate::config::AppConfig;
use crate::dom::{Document, DomError, NodeId, html};
use crate::errors::{AppError, render};
use crate::expander::StepFormExpander;
use crate::recipe_form::{self, RecipeFormOptions, RecipePage};
use crate::templates_structs::{PageContext, RecipeAddTemplate, StepsPreviewResponse, StepsQuery};

pub const ADD_FORM_PATH: &str = "/recipes/add";

/// Requested step count, checked against the configured limit.
fn requested_steps(config: &AppConfig, query: &StepsQuery) -> Result<u32, AppError> {
    let steps = query.steps.unwrap_or(1);
    if steps == 0 || steps > config.max_preview_steps {
        return Err(AppError::BadRequest(format!(
            "steps must be between 1 and {}",
            config.max_preview_steps
        )));
    }
    Ok(steps)
}

/// Build the recipe page and click "add step" until it shows `steps` groups.
fn expanded_page(
    config: &AppConfig,
    steps: u32,
) -> Result<(RecipePage, StepFormExpander), AppError> {
    let options = RecipeFormOptions { labels: config.labels, ..Default::default() };
    let mut page = RecipePage::build(&options)?;
    let mut expander = page.expander()?;
    recipe_form::expand_to(&mut page.doc, &mut expander, steps)?;
    Ok((page, expander))
}

pub async fn add_form(
    config: web::Data<AppConfig>,
    query: web::Query<StepsQuery>,
) -> Result<HttpResponse, AppError> {
    let steps = requested_steps(&config, &query)?;
    let (mut page, expander) = expanded_page(&config, steps)?;

    let step_count = expander.counter().value();
    submit_for_next_step(
        &mut page.doc,
        expander.control(),
        step_count + 1,
        config.max_preview_steps,
    )?;

    let form_html = html::render(&page.doc, page.form)?;
    let tmpl = RecipeAddTemplate {
        ctx: PageContext::build(&config),
        form_html,
        step_count,
    };
    render(tmpl)
}

/// The served page carries no script, so the add-step control submits
/// itself: a GET back to this route asking for `next` steps. Past the
/// preview limit the control is disabled instead.
fn submit_for_next_step(
    doc: &mut Document,
    control: NodeId,
    next: u32,
    max_steps: u32,
) -> Result<(), DomError> {
    if next > max_steps {
        return doc.set_attribute(control, "disabled", "disabled");
    }
    doc.set_attribute(control, "type", "submit")?;
    doc.set_attribute(control, "name", "steps")?;
    doc.set_attribute(control, "value", &next.to_string())?;
    doc.set_attribute(control, "formaction", ADD_FORM_PATH)?;
    doc.set_attribute(control, "formmethod", "get")?;
    doc.set_attribute(control, "formnovalidate", "formnovalidate")
}

pub async fn steps_json(
    config: web::Data<AppConfig>,
    query: web::Query<StepsQuery>,
) -> Result<HttpResponse, AppError> {
    let steps = requested_steps(&config, &query)?;
    let (page, expander) = expanded_page(&config, steps)?;
    let preview = steps_preview(&page.doc, &expander)?;

    let body = serde_json::to_string(&preview)?;
    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}

fn steps_preview(doc: &Document, expander: &StepFormExpander) -> Result<StepsPreviewResponse, AppError> {
    Ok(StepsPreviewResponse {
        counter: expander.counter().value(),
        label: doc.text_content(expander.label())?,
        control_label: doc.text_content(expander.control())?,
        groups: recipe_form::snapshot_groups(doc, expander.container())?,
    })
}
