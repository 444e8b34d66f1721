//! Recipe creation page: the markup the step expander is attached to, and
//! read-back of the step groups for previews.

use serde::Serialize;

use crate::dom::{Document, DomError, NodeId};
use crate::expander::{
    ADD_STEP_ID, Anchors, CONTAINER_ID, ExpanderError, GROUP_CLASS, LABEL_CLASS, PREVIEW_CLASS,
    StepFormExpander, StepLabels,
};

pub const RECIPE_FORM_ID: &str = "recipeForm";

/// Recipe category offered in the `tags_category` select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub slug: String,
    pub name: String,
}

pub fn default_categories() -> Vec<Category> {
    [
        ("soups", "Soups"),
        ("salads", "Salads"),
        ("main-courses", "Main courses"),
        ("baking", "Baking"),
        ("desserts", "Desserts"),
        ("drinks", "Drinks"),
    ]
    .into_iter()
    .map(|(slug, name)| Category { slug: slug.to_string(), name: name.to_string() })
    .collect()
}

#[derive(Debug, Clone)]
pub struct RecipeFormOptions {
    pub categories: Vec<Category>,
    pub labels: StepLabels,
    /// Image URL for a preview shown under the first step's photo field.
    pub step_preview: Option<String>,
}

impl Default for RecipeFormOptions {
    fn default() -> Self {
        Self { categories: default_categories(), labels: StepLabels::default(), step_preview: None }
    }
}

/// A freshly built recipe creation page.
#[derive(Debug, Clone)]
pub struct RecipePage {
    pub doc: Document,
    pub form: NodeId,
    pub anchors: Anchors,
    /// Wording the page was built with; the expander reuses it.
    pub labels: StepLabels,
}

impl RecipePage {
    pub fn build(options: &RecipeFormOptions) -> Result<Self, DomError> {
        let mut doc = Document::new();
        let root = doc.root();
        let form = element(&mut doc, root, "form", &[
            ("id", RECIPE_FORM_ID),
            ("method", "post"),
            ("enctype", "multipart/form-data"),
        ])?;

        text_field(&mut doc, form, "name", "Dish name", "text")?;
        text_field(&mut doc, form, "image", "Recipe image", "file")?;
        textarea_field(&mut doc, form, "description", "Recipe description")?;
        textarea_field(&mut doc, form, "products", "Products")?;
        text_field(&mut doc, form, "number_servings", "Number of servings", "number")?;
        text_field(&mut doc, form, "time_preparing", "Preparation time", "number")?;
        category_field(&mut doc, form, &options.categories)?;
        text_field(&mut doc, form, "calorie", "Calories", "number")?;

        let container = element(&mut doc, form, "div", &[("id", CONTAINER_ID)])?;
        let label = element(&mut doc, container, "p", &[("class", LABEL_CLASS)])?;
        doc.set_text_content(label, &options.labels.progress(1))?;

        let group = element(&mut doc, container, "div", &[("class", GROUP_CLASS)])?;
        let caption = element(&mut doc, group, "label", &[])?;
        doc.set_text_content(caption, "Step description")?;
        element(&mut doc, group, "textarea", &[("name", "step_description"), ("rows", "3")])?;
        let caption = element(&mut doc, group, "label", &[])?;
        doc.set_text_content(caption, "Step photo")?;
        element(&mut doc, group, "input", &[
            ("type", "file"),
            ("name", "step_image"),
            ("accept", "image/*"),
        ])?;
        if let Some(src) = &options.step_preview {
            element(&mut doc, group, "img", &[
                ("class", PREVIEW_CLASS),
                ("src", src.as_str()),
                ("alt", "Step photo preview"),
            ])?;
        }

        let trigger = element(&mut doc, container, "button", &[
            ("id", ADD_STEP_ID),
            ("type", "button"),
        ])?;
        doc.set_text_content(trigger, &options.labels.control(2))?;

        let submit = element(&mut doc, form, "button", &[("type", "submit")])?;
        doc.set_text_content(submit, "Save recipe")?;

        Ok(Self {
            doc,
            form,
            anchors: Anchors { trigger, container, label },
            labels: options.labels,
        })
    }

    /// Attach an expander to this page, using the page's wording.
    pub fn expander(&self) -> Result<StepFormExpander, ExpanderError> {
        StepFormExpander::with_anchors(&self.doc, self.anchors, self.labels)
    }
}

fn element(
    doc: &mut Document,
    parent: NodeId,
    tag: &str,
    attributes: &[(&str, &str)],
) -> Result<NodeId, DomError> {
    let el = doc.create_element(tag);
    for (name, value) in attributes {
        doc.set_attribute(el, name, value)?;
    }
    doc.append_child(parent, el)?;
    Ok(el)
}

fn field_wrapper(
    doc: &mut Document,
    form: NodeId,
    name: &str,
    caption: &str,
) -> Result<NodeId, DomError> {
    let wrapper = element(doc, form, "div", &[("class", "recipe-field")])?;
    let label = element(doc, wrapper, "label", &[("for", format!("id_{name}").as_str())])?;
    doc.set_text_content(label, caption)?;
    Ok(wrapper)
}

fn text_field(
    doc: &mut Document,
    form: NodeId,
    name: &str,
    caption: &str,
    ty: &str,
) -> Result<NodeId, DomError> {
    let wrapper = field_wrapper(doc, form, name, caption)?;
    let id = format!("id_{name}");
    element(doc, wrapper, "input", &[("type", ty), ("name", name), ("id", id.as_str())])
}

fn textarea_field(
    doc: &mut Document,
    form: NodeId,
    name: &str,
    caption: &str,
) -> Result<NodeId, DomError> {
    let wrapper = field_wrapper(doc, form, name, caption)?;
    let id = format!("id_{name}");
    element(doc, wrapper, "textarea", &[("name", name), ("id", id.as_str())])
}

fn category_field(
    doc: &mut Document,
    form: NodeId,
    categories: &[Category],
) -> Result<NodeId, DomError> {
    let wrapper = field_wrapper(doc, form, "tags_category", "Choose the kind of dish")?;
    let select = element(doc, wrapper, "select", &[
        ("name", "tags_category"),
        ("id", "id_tags_category"),
    ])?;
    let placeholder = element(doc, select, "option", &[("value", "")])?;
    doc.set_text_content(placeholder, "---------")?;
    for category in categories {
        let option = element(doc, select, "option", &[("value", category.slug.as_str())])?;
        doc.set_text_content(option, &category.name)?;
    }
    Ok(select)
}

/// Click the current add-step control until the page shows `steps` groups.
pub fn expand_to(
    doc: &mut Document,
    expander: &mut StepFormExpander,
    steps: u32,
) -> Result<(), ExpanderError> {
    while expander.counter().value() < steps {
        let control = expander.control();
        if expander.handle_click(doc, control)?.is_none() {
            return Err(ExpanderError::MissingElement("add-step control"));
        }
    }
    Ok(())
}

// ============================================================================
// SNAPSHOTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSnapshot {
    pub name: String,
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepGroupSnapshot {
    pub fields: Vec<FieldSnapshot>,
    pub has_preview: bool,
}

/// Read every step group under `container`, in page order.
pub fn snapshot_groups(
    doc: &Document,
    container: NodeId,
) -> Result<Vec<StepGroupSnapshot>, DomError> {
    let mut groups = Vec::new();
    for group in doc.all_by_class(container, GROUP_CLASS)? {
        let mut fields = Vec::new();
        for field in doc.form_fields(group)? {
            fields.push(FieldSnapshot {
                name: doc.attribute(field, "name")?.unwrap_or_default().to_string(),
                kind: doc.input_type(field)?,
                value: doc.value(field)?.to_string(),
            });
        }
        let has_preview = doc.first_by_class(group, PREVIEW_CLASS)?.is_some();
        groups.push(StepGroupSnapshot { fields, has_preview });
    }
    Ok(groups)
}
