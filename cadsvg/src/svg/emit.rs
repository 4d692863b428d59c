//! Depth-first tag emission for the element tree, plus the attribute-key
//! translation table.

use std::fmt::Write as _;

use super::element::{Attrs, Node};

const XML_PROLOGUE: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>";

/// Render a [`Node`] tree (expected to be rooted at `Node::Svg`) to a
/// complete SVG document, prologue included.
pub fn render_to_string(root: &Node) -> String {
    let mut out = String::new();
    out.push_str(XML_PROLOGUE);
    out.push('\n');
    write_node(&mut out, root);
    out
}

fn translate_key(key: &str) -> &str {
    match key {
        "strokewidth" => "stroke-width",
        "fillopacity" => "fill-opacity",
        "strokeopacity" => "stroke-opacity",
        "strokelinejoin" => "stroke-linejoin",
        "strokelinecap" => "stroke-linecap",
        "strokedasharray" => "stroke-dasharray",
        "styleclass" => "class",
        "fontsize" => "font-size",
        other => other,
    }
}

fn write_attrs(out: &mut String, attrs: &Attrs) {
    for (k, v) in attrs {
        let _ = write!(out, " {}=\"{}\"", translate_key(k), escape_attr(v));
    }
}

fn escape_attr(v: &str) -> String {
    v.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;")
}

fn escape_text(v: &str) -> String {
    v.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Svg(attrs, children) => write_container(out, "svg", attrs, children),
        Node::Group(attrs, children) => write_container(out, "g", attrs, children),
        Node::Polygon(attrs) => write_leaf(out, "polygon", attrs),
        Node::Line(attrs) => write_leaf(out, "line", attrs),
        Node::Path(attrs) => write_leaf(out, "path", attrs),
        Node::Text(attrs, content) => {
            let _ = write!(out, "<text");
            write_attrs(out, attrs);
            let _ = write!(out, ">{}</text>", escape_text(content));
        }
        Node::Style(content) => {
            let _ = write!(out, "<style>{}</style>", content);
        }
        Node::Raw(content) => out.push_str(content),
    }
}

fn write_container(out: &mut String, tag: &str, attrs: &Attrs, children: &[Node]) {
    let _ = write!(out, "<{}", tag);
    write_attrs(out, attrs);
    out.push('>');
    for child in children {
        write_node(out, child);
    }
    let _ = write!(out, "</{}>", tag);
}

fn write_leaf(out: &mut String, tag: &str, attrs: &Attrs) {
    let _ = write!(out, "<{}", tag);
    write_attrs(out, attrs);
    out.push_str(" />");
}
