// In-memory document model the step form expander runs against.
// Nodes live in an arena owned by `Document`; removed subtrees stay in the
// arena detached from the root, the same way a removed browser node stays
// alive while something still holds a reference to it.

pub mod html;

use std::fmt;

/// Handle to a node inside a `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementData {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub classes: Vec<String>,
    /// Current form value for input/select/textarea elements.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomError {
    UnknownNode(NodeId),
    NotAnElement(NodeId),
    Cycle { parent: NodeId, child: NodeId },
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::UnknownNode(id) => write!(f, "Unknown node {id}"),
            DomError::NotAnElement(id) => write!(f, "Node {id} is not an element"),
            DomError::Cycle { parent, child } => {
                write!(f, "Cannot append {child} into its own subtree at {parent}")
            }
        }
    }
}

impl std::error::Error for DomError {}

/// Tags treated as form fields by `form_fields`.
pub const FIELD_TAGS: [&str; 3] = ["input", "select", "textarea"];

/// Arena of nodes. Slots are never reclaimed: every removal or text
/// replacement leaves an orphan behind, so a document should live for one
/// page session only.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty document whose root is a `body` element.
    pub fn new() -> Self {
        let body = Node {
            kind: NodeKind::Element(ElementData { tag: "body".to_string(), ..Default::default() }),
            parent: None,
            children: Vec::new(),
        };
        Self { nodes: vec![body], root: NodeId(0) }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { kind, parent: None, children: Vec::new() });
        id
    }

    fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.nodes.get(id.0).ok_or(DomError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.nodes.get_mut(id.0).ok_or(DomError::UnknownNode(id))
    }

    pub fn element(&self, id: NodeId) -> Result<&ElementData, DomError> {
        match &self.node(id)?.kind {
            NodeKind::Element(el) => Ok(el),
            NodeKind::Text(_) => Err(DomError::NotAnElement(id)),
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Element(el) => Ok(el),
            NodeKind::Text(_) => Err(DomError::NotAnElement(id)),
        }
    }

    pub fn kind(&self, id: NodeId) -> Result<&NodeKind, DomError> {
        Ok(&self.node(id)?.kind)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id.0), Some(Node { kind: NodeKind::Element(_), .. }))
    }

    // ------------------------------------------------------------------
    // Tree construction
    // ------------------------------------------------------------------

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(ElementData {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }))
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    /// Appends `child` as the last child of `parent`, moving it out of its
    /// previous parent if it had one.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.element(parent)?;
        self.node(child)?;
        if self.contains(child, parent)? {
            return Err(DomError::Cycle { parent, child });
        }
        self.detach(child)?;
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Detaches `id` and its subtree from the document. Removing a node that
    /// is already detached is a no-op.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
        self.detach(id)
    }

    fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        if let Some(parent) = self.node(id)?.parent {
            self.node_mut(parent)?.children.retain(|c| *c != id);
            self.node_mut(id)?.parent = None;
        }
        Ok(())
    }

    /// Structural copy of `id` and everything below it, values included.
    /// The copy is detached.
    pub fn deep_clone(&mut self, id: NodeId) -> Result<NodeId, DomError> {
        let source = self.node(id)?;
        let kind = source.kind.clone();
        let children = source.children.clone();
        let copy = self.push(kind);
        for child in children {
            let child_copy = self.deep_clone(child)?;
            self.nodes[child_copy.0].parent = Some(copy);
            self.nodes[copy.0].children.push(child_copy);
        }
        Ok(copy)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, DomError> {
        Ok(self.node(id)?.parent)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId], DomError> {
        Ok(&self.node(id)?.children)
    }

    /// True when `node` is `ancestor` or lies somewhere below it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> Result<bool, DomError> {
        self.node(ancestor)?;
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return Ok(true);
            }
            cursor = self.node(current)?.parent;
        }
        Ok(false)
    }

    /// True when the node is reachable from the document root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.contains(self.root, id).unwrap_or(false)
    }

    pub fn next_element_sibling(&self, id: NodeId) -> Result<Option<NodeId>, DomError> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(None);
        };
        let siblings = &self.node(parent)?.children;
        let next = siblings
            .iter()
            .skip_while(|s| **s != id)
            .skip(1)
            .find(|s| self.is_element(**s))
            .copied();
        Ok(next)
    }

    /// Pre-order list of every node below `id`, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Result<Vec<NodeId>, DomError> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(id)?.children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.node(current)?.children.iter().rev().copied());
        }
        Ok(out)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// First attached element whose `id` attribute equals `value`.
    pub fn get_element_by_id(&self, value: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .ok()?
            .into_iter()
            .find(|n| self.attribute(*n, "id").ok().flatten() == Some(value))
    }

    pub fn first_by_class(&self, scope: NodeId, class: &str) -> Result<Option<NodeId>, DomError> {
        Ok(self.all_by_class(scope, class)?.into_iter().next())
    }

    pub fn all_by_class(&self, scope: NodeId, class: &str) -> Result<Vec<NodeId>, DomError> {
        Ok(self
            .descendants(scope)?
            .into_iter()
            .filter(|n| self.has_class(*n, class).unwrap_or(false))
            .collect())
    }

    /// Every input, select and textarea below `scope`, in document order.
    pub fn form_fields(&self, scope: NodeId) -> Result<Vec<NodeId>, DomError> {
        Ok(self
            .descendants(scope)?
            .into_iter()
            .filter(|n| {
                self.element(*n)
                    .map(|el| FIELD_TAGS.contains(&el.tag.as_str()))
                    .unwrap_or(false)
            })
            .collect())
    }

    // ------------------------------------------------------------------
    // Element state
    // ------------------------------------------------------------------

    pub fn tag(&self, id: NodeId) -> Result<&str, DomError> {
        Ok(&self.element(id)?.tag)
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Result<Option<&str>, DomError> {
        Ok(self
            .element(id)?
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str()))
    }

    /// Sets an attribute. `class` is routed to the class list.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let el = self.element_mut(id)?;
        if name == "class" {
            el.classes = value.split_whitespace().map(str::to_string).collect();
            return Ok(());
        }
        match el.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => el.attributes.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> Result<bool, DomError> {
        Ok(self.element(id)?.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
        let el = self.element_mut(id)?;
        if !el.classes.iter().any(|c| c == class) {
            el.classes.push(class.to_string());
        }
        Ok(())
    }

    pub fn value(&self, id: NodeId) -> Result<&str, DomError> {
        Ok(&self.element(id)?.value)
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?.value = value.to_string();
        Ok(())
    }

    /// Field type as a browser reports it: the `type` attribute for inputs
    /// (`text` when absent), the tag name for everything else.
    pub fn input_type(&self, id: NodeId) -> Result<String, DomError> {
        let el = self.element(id)?;
        if el.tag != "input" {
            return Ok(el.tag.clone());
        }
        let ty = el
            .attributes
            .iter()
            .find(|(k, _)| k == "type")
            .map(|(_, v)| v.to_ascii_lowercase())
            .unwrap_or_else(|| "text".to_string());
        Ok(ty)
    }

    /// Concatenated text of every text node below `id`.
    pub fn text_content(&self, id: NodeId) -> Result<String, DomError> {
        if let NodeKind::Text(text) = &self.node(id)?.kind {
            return Ok(text.clone());
        }
        let mut out = String::new();
        for node in self.descendants(id)? {
            if let NodeKind::Text(text) = &self.node(node)?.kind {
                out.push_str(text);
            }
        }
        Ok(out)
    }

    /// Replaces every child of `id` with a single text node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        self.element(id)?;
        let old = std::mem::take(&mut self.node_mut(id)?.children);
        for child in old {
            self.node_mut(child)?.parent = None;
        }
        let text_node = self.create_text(text);
        self.append_child(id, text_node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(doc: &mut Document, parent: NodeId, tag: &str, ty: Option<&str>) -> NodeId {
        let el = doc.create_element(tag);
        if let Some(ty) = ty {
            doc.set_attribute(el, "type", ty).unwrap();
        }
        doc.append_child(parent, el).unwrap();
        el
    }

    #[test]
    fn deep_clone_copies_structure_and_values_detached() {
        let mut doc = Document::new();
        let group = doc.create_element("div");
        doc.add_class(group, "form-group").unwrap();
        doc.append_child(doc.root(), group).unwrap();
        let text = field(&mut doc, group, "input", Some("text"));
        doc.set_value(text, "chop onions").unwrap();
        field(&mut doc, group, "textarea", None);

        let copy = doc.deep_clone(group).unwrap();

        assert_ne!(copy, group);
        assert!(!doc.is_attached(copy));
        assert!(doc.has_class(copy, "form-group").unwrap());
        let fields = doc.form_fields(copy).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(doc.value(fields[0]).unwrap(), "chop onions");
        assert_eq!(doc.tag(fields[1]).unwrap(), "textarea");
        // Original is untouched
        assert_eq!(doc.children(group).unwrap().len(), 2);
    }

    #[test]
    fn remove_detaches_subtree() {
        let mut doc = Document::new();
        let button = doc.create_element("button");
        doc.set_attribute(button, "id", "addStep").unwrap();
        doc.append_child(doc.root(), button).unwrap();
        assert_eq!(doc.get_element_by_id("addStep"), Some(button));

        doc.remove(button).unwrap();

        assert!(!doc.is_attached(button));
        assert_eq!(doc.get_element_by_id("addStep"), None);
        // Second removal is a no-op
        doc.remove(button).unwrap();
    }

    #[test]
    fn append_into_own_subtree_is_rejected() {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(outer, inner).unwrap();
        assert_eq!(
            doc.append_child(inner, outer),
            Err(DomError::Cycle { parent: inner, child: outer })
        );
    }

    #[test]
    fn next_element_sibling_skips_text() {
        let mut doc = Document::new();
        let root = doc.root();
        let input = field(&mut doc, root, "input", Some("file"));
        let gap = doc.create_text(" ");
        doc.append_child(root, gap).unwrap();
        let img = field(&mut doc, root, "img", None);
        assert_eq!(doc.next_element_sibling(input).unwrap(), Some(img));
        assert_eq!(doc.next_element_sibling(img).unwrap(), None);
    }

    #[test]
    fn input_type_defaults_to_text() {
        let mut doc = Document::new();
        let root = doc.root();
        let plain = field(&mut doc, root, "input", None);
        let file = field(&mut doc, root, "input", Some("FILE"));
        let select = field(&mut doc, root, "select", None);
        assert_eq!(doc.input_type(plain).unwrap(), "text");
        assert_eq!(doc.input_type(file).unwrap(), "file");
        assert_eq!(doc.input_type(select).unwrap(), "select");
    }

    #[test]
    fn set_text_content_replaces_children() {
        let mut doc = Document::new();
        let label = doc.create_element("p");
        doc.append_child(doc.root(), label).unwrap();
        let bold = doc.create_element("b");
        doc.append_child(label, bold).unwrap();
        let old = doc.create_text("old");
        doc.append_child(bold, old).unwrap();

        doc.set_text_content(label, "new").unwrap();

        assert_eq!(doc.text_content(label).unwrap(), "new");
        assert_eq!(doc.children(label).unwrap().len(), 1);
        assert!(!doc.is_attached(bold));
    }

    #[test]
    fn unknown_handle_is_an_error() {
        let doc = Document::new();
        let bogus = NodeId(42);
        assert_eq!(doc.tag(bogus), Err(DomError::UnknownNode(bogus)));
    }
}
