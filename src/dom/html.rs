use super::{Document, DomError, NodeId, NodeKind};

/// Elements that never carry a closing tag.
const VOID_ELEMENTS: [&str; 8] = ["area", "br", "col", "hr", "img", "input", "link", "meta"];

/// Escape text for use in element content or a double-quoted attribute.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize `node` and its subtree to HTML.
///
/// Form values are written back as markup: inputs get a `value` attribute
/// (never for file inputs), a textarea's value becomes its content and the
/// option matching a select's value is marked `selected`.
pub fn render(doc: &Document, node: NodeId) -> Result<String, DomError> {
    let mut out = String::new();
    write_node(doc, node, None, &mut out)?;
    Ok(out)
}

/// Serialize only the children of `node`.
pub fn render_children(doc: &Document, node: NodeId) -> Result<String, DomError> {
    let mut out = String::new();
    let selected = select_value(doc, node)?;
    for child in doc.children(node)? {
        write_node(doc, *child, selected.as_deref(), &mut out)?;
    }
    Ok(out)
}

fn select_value(doc: &Document, node: NodeId) -> Result<Option<String>, DomError> {
    match doc.kind(node)? {
        NodeKind::Element(el) if el.tag == "select" => Ok(Some(el.value.clone())),
        _ => Ok(None),
    }
}

fn write_node(
    doc: &Document,
    node: NodeId,
    selected: Option<&str>,
    out: &mut String,
) -> Result<(), DomError> {
    let el = match doc.kind(node)? {
        NodeKind::Text(text) => {
            out.push_str(&escape(text));
            return Ok(());
        }
        NodeKind::Element(el) => el,
    };

    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attributes {
        if el.tag == "input" && name == "value" {
            continue;
        }
        out.push_str(&format!(" {name}=\"{}\"", escape(value)));
    }
    if !el.classes.is_empty() {
        out.push_str(&format!(" class=\"{}\"", escape(&el.classes.join(" "))));
    }
    if el.tag == "input" && !el.value.is_empty() && doc.input_type(node)? != "file" {
        out.push_str(&format!(" value=\"{}\"", escape(&el.value)));
    }
    if el.tag == "option" {
        let option_value = doc.attribute(node, "value")?.unwrap_or_default();
        if selected.is_some_and(|v| !v.is_empty() && v == option_value) {
            out.push_str(" selected");
        }
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&el.tag.as_str()) {
        return Ok(());
    }

    if el.tag == "textarea" {
        out.push_str(&escape(&el.value));
    } else {
        out.push_str(&render_children(doc, node)?);
    }

    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
    Ok(())
}
