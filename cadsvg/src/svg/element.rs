//! The in-memory SVG element tree (§4.8): a tagged variant per node type,
//! each carrying a map of string attributes (camel-ish internal spellings,
//! translated to hyphenated SVG names on emit) and, where it makes sense,
//! an ordered list of children.

use std::collections::BTreeMap;

pub type Attrs = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Svg(Attrs, Vec<Node>),
    Group(Attrs, Vec<Node>),
    Polygon(Attrs),
    Line(Attrs),
    Path(Attrs),
    Text(Attrs, String),
    Style(String),
    Raw(String),
}

impl Node {
    pub fn svg(attrs: Attrs, children: Vec<Node>) -> Self {
        Node::Svg(attrs, children)
    }

    pub fn group(attrs: Attrs, children: Vec<Node>) -> Self {
        Node::Group(attrs, children)
    }

    pub fn polygon(attrs: Attrs) -> Self {
        Node::Polygon(attrs)
    }

    pub fn line(attrs: Attrs) -> Self {
        Node::Line(attrs)
    }

    pub fn path(attrs: Attrs) -> Self {
        Node::Path(attrs)
    }

    pub fn text(attrs: Attrs, content: impl Into<String>) -> Self {
        Node::Text(attrs, content.into())
    }
}

/// Builds an [`Attrs`] map from `(key, value)` pairs, converting values via
/// `ToString`. Internal camel-ish keys (`strokewidth`, `fillopacity`, ...)
/// are translated to their hyphenated SVG names by the emitter, not here.
pub fn attrs<const N: usize>(pairs: [(&str, String); N]) -> Attrs {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}
