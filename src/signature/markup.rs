//! Inline-styled HTML tree for the signature
//!
//! Outlook's rendering engine drops stylesheets and classes and collapses
//! unstyled tables unpredictably, so the signature is built from a closed set
//! of tags whose every visual property is carried in a `style` attribute.
//! The table and image constructors bake in the zeroed spacing and borders,
//! which keeps call sites from forgetting them.

use std::fmt::Write as _;

// ─────────────────────────────────────────────────────────────────────────────
// Tags and Styles
// ─────────────────────────────────────────────────────────────────────────────

/// The tags a signature may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Div,
    Table,
    Tbody,
    Tr,
    Td,
    Span,
    A,
    Img,
    P,
}

impl Tag {
    /// HTML element name.
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::Table => "table",
            Tag::Tbody => "tbody",
            Tag::Tr => "tr",
            Tag::Td => "td",
            Tag::Span => "span",
            Tag::A => "a",
            Tag::Img => "img",
            Tag::P => "p",
        }
    }

    /// Void elements have no children and no closing tag.
    pub fn is_void(&self) -> bool {
        matches!(self, Tag::Img)
    }
}

/// Ordered list of inline CSS declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    props: Vec<(&'static str, String)>,
}

impl Style {
    /// Set a property, replacing an earlier value for the same name.
    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.props.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.props.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.props
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Serialize as `name: value; name: value`.
    pub fn to_css(&self) -> String {
        self.props
            .iter()
            .map(|(n, v)| format!("{}: {}", n, v))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Nodes
// ─────────────────────────────────────────────────────────────────────────────

/// A node of the signature tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// `&nbsp;`, used to keep otherwise empty cells from collapsing
    NonBreakingSpace,
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An element with attributes, inline style and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: Tag,
    attrs: Vec<(&'static str, String)>,
    style: Style,
    children: Vec<Node>,
}

impl Element {
    fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            style: Style::default(),
            children: Vec::new(),
        }
    }

    pub fn div() -> Self {
        Self::new(Tag::Div)
    }

    /// A layout table wrapping `rows` in a `tbody`.
    ///
    /// Cell padding, spacing and borders are zeroed and borders collapsed.
    pub fn table(rows: impl IntoIterator<Item = Element>) -> Self {
        let mut tbody = Self::new(Tag::Tbody);
        tbody.children = rows.into_iter().map(Node::Element).collect();

        Self::new(Tag::Table)
            .attr("cellpadding", "0")
            .attr("cellspacing", "0")
            .attr("border", "0")
            .css("border-collapse", "collapse")
            .child(tbody)
    }

    pub fn tr() -> Self {
        Self::new(Tag::Tr)
    }

    pub fn td() -> Self {
        Self::new(Tag::Td)
    }

    pub fn span(text: impl Into<String>) -> Self {
        Self::new(Tag::Span).text(text)
    }

    pub fn p(text: impl Into<String>) -> Self {
        Self::new(Tag::P).text(text)
    }

    pub fn a(href: impl Into<String>) -> Self {
        Self::new(Tag::A).attr("href", href)
    }

    /// A block image with no border at a fixed size.
    pub fn img(src: impl Into<String>, alt: impl Into<String>, width: u32, height: u32) -> Self {
        Self::new(Tag::Img)
            .attr("src", src)
            .attr("alt", alt)
            .attr("width", width.to_string())
            .attr("height", height.to_string())
            .css("display", "block")
            .css("border", "0")
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Set an attribute, replacing any earlier value.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn css(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.style.set(name, value);
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        debug_assert!(!self.tag.is_void(), "<{}> takes no children", self.tag.name());
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        for child in children {
            self = self.child(child);
        }
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn nbsp(self) -> Self {
        self.child(Node::NonBreakingSpace)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    /// Iterate over child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                Node::Element(e) => out.push_str(&e.text_content()),
                Node::Text(t) => out.push_str(t),
                Node::NonBreakingSpace => out.push('\u{a0}'),
            }
        }
        out
    }

    /// Depth-first search for the first element matching `pred`.
    pub fn find(&self, pred: &impl Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.child_elements().find_map(|c| c.find(pred))
    }

    /// Depth-first collection of all elements matching `pred`.
    pub fn find_all<'a>(&'a self, pred: &impl Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_matching(pred, &mut found);
        found
    }

    fn collect_matching<'a>(&'a self, pred: &impl Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if pred(self) {
            out.push(self);
        }
        for child in self.child_elements() {
            child.collect_matching(pred, out);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fragment
// ─────────────────────────────────────────────────────────────────────────────

/// A rendered signature, ready for preview or export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    root: Element,
}

impl Fragment {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// HTML including `id` attributes, for the on-screen preview.
    pub fn preview_html(&self) -> String {
        let mut out = String::new();
        write_element(&mut out, &self.root, true);
        out
    }

    /// HTML with every `id` attribute removed, for pasting into a mail client.
    pub fn export_html(&self) -> String {
        let mut out = String::new();
        write_element(&mut out, &self.root, false);
        out
    }

    /// One line per table row or paragraph, for the plain-text clipboard flavor.
    ///
    /// Links without text (the social icons) contribute their target URL.
    pub fn to_plain_text(&self) -> String {
        let mut lines = Vec::new();
        let mut line = String::new();
        collect_plain_text(&self.root, &mut line, &mut lines);
        flush_line(&mut line, &mut lines);
        lines.join("\n")
    }
}

fn write_element(out: &mut String, element: &Element, include_ids: bool) {
    let _ = write!(out, "<{}", element.tag.name());
    for (name, value) in &element.attrs {
        if !include_ids && *name == "id" {
            continue;
        }
        let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
    }
    if !element.style.is_empty() {
        let _ = write!(out, " style=\"{}\"", escape_attr(&element.style.to_css()));
    }
    out.push('>');

    if element.tag.is_void() {
        return;
    }

    for node in &element.children {
        match node {
            Node::Element(child) => write_element(out, child, include_ids),
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::NonBreakingSpace => out.push_str("&nbsp;"),
        }
    }
    let _ = write!(out, "</{}>", element.tag.name());
}

fn collect_plain_text(element: &Element, line: &mut String, lines: &mut Vec<String>) {
    let breaks_line = matches!(element.tag, Tag::Tr | Tag::P);
    if breaks_line {
        flush_line(line, lines);
    }

    if element.tag == Tag::A && element.text_content().trim().is_empty() {
        if let Some(href) = element.get_attr("href") {
            if !line.trim().is_empty() {
                line.push(' ');
            }
            line.push_str(href);
        }
    } else {
        for node in &element.children {
            match node {
                Node::Element(child) => collect_plain_text(child, line, lines),
                Node::Text(text) => line.push_str(text),
                Node::NonBreakingSpace => line.push(' '),
            }
        }
    }

    if breaks_line {
        flush_line(line, lines);
    }
}

fn flush_line(line: &mut String, lines: &mut Vec<String>) {
    let trimmed = line.trim();
    if !trimmed.is_empty() {
        lines.push(trimmed.to_string());
    }
    line.clear();
}

// ─────────────────────────────────────────────────────────────────────────────
// Escaping
// ─────────────────────────────────────────────────────────────────────────────

/// Escape text content.
fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value.
fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;").replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_constructor_zeroes_spacing() {
        let html = Fragment::new(Element::table([Element::tr()])).export_html();
        assert_eq!(
            html,
            "<table cellpadding=\"0\" cellspacing=\"0\" border=\"0\" \
             style=\"border-collapse: collapse\"><tbody><tr></tr></tbody></table>"
        );
    }

    #[test]
    fn test_img_is_void_and_borderless() {
        let html = Fragment::new(Element::img("a.png", "Logo", 20, 10)).export_html();
        assert_eq!(
            html,
            "<img src=\"a.png\" alt=\"Logo\" width=\"20\" height=\"10\" \
             style=\"display: block; border: 0\">"
        );
    }

    #[test]
    fn test_style_set_replaces() {
        let mut style = Style::default();
        style.set("color", "#000000");
        style.set("padding", "0");
        style.set("color", "#ffffff");
        assert_eq!(style.to_css(), "color: #ffffff; padding: 0");
        assert_eq!(style.get("padding"), Some("0"));
        assert_eq!(style.get("margin"), None);
    }

    #[test]
    fn test_text_and_attributes_are_escaped() {
        let el = Element::a("https://x.test/?a=1&b=\"2\"").text("<b>Tom & Jerry</b>");
        let html = Fragment::new(el).export_html();
        assert_eq!(
            html,
            "<a href=\"https://x.test/?a=1&amp;b=&quot;2&quot;\">&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;</a>"
        );
    }

    #[test]
    fn test_export_strips_ids_but_preview_keeps_them() {
        let fragment = Fragment::new(
            Element::div()
                .id("outer")
                .child(Element::span("x").id("inner")),
        );
        assert!(fragment.preview_html().contains("id=\"outer\""));
        assert!(fragment.preview_html().contains("id=\"inner\""));
        assert!(!fragment.export_html().contains("id="));
    }

    #[test]
    fn test_nbsp_serialization() {
        let html = Fragment::new(Element::td().nbsp()).export_html();
        assert_eq!(html, "<td>&nbsp;</td>");
    }

    #[test]
    fn test_plain_text_lines() {
        let fragment = Fragment::new(Element::table([
            Element::tr().child(Element::td().child(Element::span("Jane Doe"))),
            Element::tr().child(
                Element::td()
                    .child(Element::span("Email: "))
                    .child(Element::a("mailto:j@co.com").text("j@co.com")),
            ),
            Element::tr().child(
                Element::td()
                    .child(Element::a("https://x.com/j").child(Element::img("i.png", "X", 20, 20)))
                    .child(Element::a("https://fb.com/j").child(Element::img("f.png", "F", 20, 20))),
            ),
        ]));
        assert_eq!(
            fragment.to_plain_text(),
            "Jane Doe\nEmail: j@co.com\nhttps://x.com/j https://fb.com/j"
        );
    }

    #[test]
    fn test_find_helpers() {
        let root = Element::div()
            .child(Element::span("a"))
            .child(Element::div().child(Element::span("b")));
        let spans = root.find_all(&|e: &Element| e.tag() == Tag::Span);
        assert_eq!(spans.len(), 2);
        assert_eq!(
            root.find(&|e: &Element| e.text_content() == "b" && e.tag() == Tag::Span)
                .map(|e| e.text_content()),
            Some("b".to_string())
        );
    }
}
