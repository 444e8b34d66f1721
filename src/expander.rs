//! Step form expander: adds another "preparation step" field group to the
//! recipe form each time the add-step control is activated.
//!
//! The expander captures its anchors (container, counter label, current
//! control) once at initialization and handles every click through a single
//! delegated handler on the container, so freshly created controls need no
//! wiring of their own.

use std::fmt;
use std::str::FromStr;

use crate::dom::{Document, DomError, NodeId};

pub const ADD_STEP_ID: &str = "addStep";
pub const ADD_STEP_NEW_ID: &str = "addStepNew";
/// `data-role` value carried by every control the expander creates.
pub const ADD_STEP_ROLE: &str = "add-step";
pub const CONTAINER_ID: &str = "formsContainer";
pub const LABEL_CLASS: &str = "step_preparing";
pub const GROUP_CLASS: &str = "form-group";
pub const PREVIEW_CLASS: &str = "image-preview";
pub const CONTROL_CLASS: &str = "dynamic-step-button";

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ExpanderError {
    /// A required element could not be found; carries the element's role.
    MissingElement(&'static str),
    TriggerOutsideContainer,
    Dom(DomError),
}

impl fmt::Display for ExpanderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpanderError::MissingElement(role) => write!(f, "missing required element: {role}"),
            ExpanderError::TriggerOutsideContainer => {
                write!(f, "add-step control must be inside the step container")
            }
            ExpanderError::Dom(e) => write!(f, "Document error: {e}"),
        }
    }
}

impl std::error::Error for ExpanderError {}

impl From<DomError> for ExpanderError {
    fn from(e: DomError) -> Self {
        ExpanderError::Dom(e)
    }
}

// ============================================================================
// LABELS
// ============================================================================

/// Wording for the counter label and the add-step control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepLabels {
    #[default]
    English,
    Russian,
}

impl StepLabels {
    /// Counter label shown once step `n` has been added.
    pub fn progress(self, n: u32) -> String {
        match self {
            StepLabels::English => format!("Adding step {n} of preparation: "),
            StepLabels::Russian => format!("Добавление {n} шага приготовления: "),
        }
    }

    /// Caption of the control that adds step `n`.
    pub fn control(self, n: u32) -> String {
        match self {
            StepLabels::English => format!("Add step {n} "),
            StepLabels::Russian => format!("Добавить {n} шаг "),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            StepLabels::English => "en",
            StepLabels::Russian => "ru",
        }
    }
}

impl FromStr for StepLabels {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(StepLabels::English),
            "ru" | "russian" => Ok(StepLabels::Russian),
            other => Err(format!("unknown label locale '{other}'")),
        }
    }
}

// ============================================================================
// COUNTER
// ============================================================================

/// Running number of step groups on the page. Starts at 1 for the group the
/// page ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCounter {
    value: u32,
}

impl Default for StepCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl StepCounter {
    pub fn new() -> Self {
        Self { value: 1 }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Bumps the counter by one and returns the new value.
    pub fn increment(&mut self) -> u32 {
        self.value += 1;
        self.value
    }
}

// ============================================================================
// EXPANDER
// ============================================================================

/// Element handles the expander works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchors {
    pub trigger: NodeId,
    pub container: NodeId,
    pub label: NodeId,
}

impl Anchors {
    /// Look the anchors up by their well-known ids and classes.
    pub fn resolve(doc: &Document) -> Result<Self, ExpanderError> {
        let trigger = doc
            .get_element_by_id(ADD_STEP_ID)
            .ok_or(ExpanderError::MissingElement("add-step control"))?;
        let container = doc
            .get_element_by_id(CONTAINER_ID)
            .ok_or(ExpanderError::MissingElement("step container"))?;
        let label = doc
            .first_by_class(doc.root(), LABEL_CLASS)?
            .ok_or(ExpanderError::MissingElement("step counter label"))?;
        Ok(Self { trigger, container, label })
    }
}

/// Result of one expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepAdded {
    pub step: u32,
    pub group: NodeId,
    pub control: NodeId,
}

#[derive(Debug, Clone)]
pub struct StepFormExpander {
    counter: StepCounter,
    container: NodeId,
    label: NodeId,
    control: NodeId,
    labels: StepLabels,
}

impl StepFormExpander {
    /// Resolve the page anchors and start listening for add-step clicks.
    pub fn initialize(doc: &Document, labels: StepLabels) -> Result<Self, ExpanderError> {
        let anchors = Anchors::resolve(doc)?;
        Self::with_anchors(doc, anchors, labels)
    }

    /// Build an expander from handles the caller already holds.
    pub fn with_anchors(
        doc: &Document,
        anchors: Anchors,
        labels: StepLabels,
    ) -> Result<Self, ExpanderError> {
        if !doc.is_attached(anchors.container) {
            return Err(ExpanderError::MissingElement("step container"));
        }
        if !doc.is_attached(anchors.label) {
            return Err(ExpanderError::MissingElement("step counter label"));
        }
        if !doc.is_attached(anchors.trigger) {
            return Err(ExpanderError::MissingElement("add-step control"));
        }
        if !doc.contains(anchors.container, anchors.trigger)? {
            return Err(ExpanderError::TriggerOutsideContainer);
        }
        log::debug!(
            "Step expander attached: container={} label={} trigger={}",
            anchors.container,
            anchors.label,
            anchors.trigger
        );
        Ok(Self {
            counter: StepCounter::new(),
            container: anchors.container,
            label: anchors.label,
            control: anchors.trigger,
            labels,
        })
    }

    pub fn counter(&self) -> StepCounter {
        self.counter
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn label(&self) -> NodeId {
        self.label
    }

    /// The add-step control currently on the page.
    pub fn control(&self) -> NodeId {
        self.control
    }

    /// Step groups currently inside the container.
    pub fn groups(&self, doc: &Document) -> Result<Vec<NodeId>, ExpanderError> {
        Ok(doc.all_by_class(self.container, GROUP_CLASS)?)
    }

    /// Delegated click handler for the container. Expands when the click
    /// lands on (or inside) an add-step control; clicks elsewhere, and clicks
    /// on controls that are no longer in the document, are ignored.
    pub fn handle_click(
        &mut self,
        doc: &mut Document,
        target: NodeId,
    ) -> Result<Option<StepAdded>, ExpanderError> {
        if !doc.is_attached(target) || !doc.contains(self.container, target)? {
            return Ok(None);
        }
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            if node == self.container {
                break;
            }
            if is_add_step_control(doc, node)? {
                return self.add_step(doc).map(Some);
            }
            cursor = doc.parent(node)?;
        }
        Ok(None)
    }

    /// Add one step group.
    ///
    /// Every element the expansion needs is resolved before the first
    /// mutation, so a failing call leaves the counter, the label and the
    /// group count as they were.
    pub fn add_step(&mut self, doc: &mut Document) -> Result<StepAdded, ExpanderError> {
        if !doc.is_attached(self.container) {
            return Err(ExpanderError::MissingElement("step container"));
        }
        if !doc.is_attached(self.label) {
            return Err(ExpanderError::MissingElement("step counter label"));
        }
        let template = doc
            .first_by_class(self.container, GROUP_CLASS)?
            .ok_or(ExpanderError::MissingElement("step form group"))?;
        let stale_controls = current_controls(doc)?;

        for control in stale_controls {
            doc.remove(control)?;
        }

        let step = self.counter.increment();
        doc.set_text_content(self.label, &self.labels.progress(step))?;

        let group = doc.deep_clone(template)?;
        clear_fields(doc, group)?;
        doc.append_child(self.container, group)?;

        let control = create_control(doc, &self.labels.control(step + 1))?;
        doc.append_child(self.container, control)?;
        self.control = control;

        log::debug!("Added preparation step {step}: group={group} control={control}");
        Ok(StepAdded { step, group, control })
    }
}

/// An element plays the add-step role when it carries the role marker or
/// one of the control ids the page uses.
pub fn is_add_step_control(doc: &Document, node: NodeId) -> Result<bool, DomError> {
    if !doc.is_element(node) {
        return Ok(false);
    }
    if doc.attribute(node, "data-role")? == Some(ADD_STEP_ROLE) {
        return Ok(true);
    }
    Ok(matches!(
        doc.attribute(node, "id")?,
        Some(ADD_STEP_ID) | Some(ADD_STEP_NEW_ID)
    ))
}

/// Every add-step control attached to the document.
pub fn current_controls(doc: &Document) -> Result<Vec<NodeId>, DomError> {
    let mut found = Vec::new();
    for node in doc.descendants(doc.root())? {
        if is_add_step_control(doc, node)? {
            found.push(node);
        }
    }
    Ok(found)
}

/// Reset every field under `group`: file fields lose their file and the
/// image preview right after them, everything else becomes empty.
pub fn clear_fields(doc: &mut Document, group: NodeId) -> Result<(), DomError> {
    for field in doc.form_fields(group)? {
        if doc.input_type(field)? == "file" {
            if let Some(next) = doc.next_element_sibling(field)? {
                if doc.has_class(next, PREVIEW_CLASS)? {
                    doc.remove(next)?;
                }
            }
        }
        doc.set_value(field, "")?;
    }
    Ok(())
}

fn create_control(doc: &mut Document, caption: &str) -> Result<NodeId, DomError> {
    let button = doc.create_element("button");
    doc.set_attribute(button, "id", ADD_STEP_NEW_ID)?;
    doc.set_attribute(button, "type", "button")?;
    doc.set_attribute(button, "data-role", ADD_STEP_ROLE)?;
    doc.add_class(button, CONTROL_CLASS)?;
    doc.set_text_content(button, caption)?;
    Ok(button)
}
