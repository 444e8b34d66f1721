//! Shared test infrastructure for the step form tests.
//!
//! - `recipe_page()` - default recipe creation page, English labels
//! - `recipe_page_with_preview()` - same page with an image preview under
//!   the first step's photo field
//! - `fill_first_group()` - simulate a user filling the first step

#![allow(dead_code)]

use vkusnosam::dom::{Document, NodeId};
use vkusnosam::expander::{GROUP_CLASS, StepFormExpander, StepLabels, current_controls};
use vkusnosam::recipe_form::{RecipeFormOptions, RecipePage};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const STEP_TEXT: &str = "Chop the onions finely";
pub const STEP_FILE: &str = "C:\\fakepath\\onions.jpg";
pub const PREVIEW_SRC: &str = "/media/recipe_step_preparing/onions.jpg";

// ============================================================================
// PAGE SETUP
// ============================================================================

pub fn recipe_page() -> RecipePage {
    RecipePage::build(&RecipeFormOptions::default()).expect("build recipe page")
}

pub fn recipe_page_with_preview() -> RecipePage {
    let options = RecipeFormOptions {
        step_preview: Some(PREVIEW_SRC.to_string()),
        ..Default::default()
    };
    RecipePage::build(&options).expect("build recipe page")
}

/// Page plus an expander attached through the normal lookup path.
pub fn initialized(page: &RecipePage) -> StepFormExpander {
    StepFormExpander::initialize(&page.doc, StepLabels::English).expect("initialize expander")
}

/// Put values into every field of the first step group.
pub fn fill_first_group(doc: &mut Document, container: NodeId) {
    let group = doc
        .first_by_class(container, GROUP_CLASS)
        .expect("query")
        .expect("first group");
    for field in doc.form_fields(group).expect("fields") {
        let value = if doc.input_type(field).expect("type") == "file" { STEP_FILE } else { STEP_TEXT };
        doc.set_value(field, value).expect("set value");
    }
}

pub fn control_count(doc: &Document) -> usize {
    current_controls(doc).expect("controls").len()
}

pub fn group_count(doc: &Document, container: NodeId) -> usize {
    doc.all_by_class(container, GROUP_CLASS).expect("groups").len()
}
