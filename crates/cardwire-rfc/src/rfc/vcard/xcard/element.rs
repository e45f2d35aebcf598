//! Namespaced XML element tree used to assemble and read xCard documents.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::error::{ParseError, ParseResult};
use super::namespace::Namespace;
use crate::rfc::vcard::core::VCardVersion;

/// A child node of an [`XCardElement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XCardElement),
    Text(String),
}

/// An XML element with its namespace, attributes and children.
///
/// Text is held unescaped; escaping happens when the tree is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XCardElement {
    namespace: Namespace,
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XCardElement {
    /// Creates an empty element.
    #[must_use]
    pub fn new(namespace: Namespace, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an empty element in the xCard namespace of `version`.
    #[must_use]
    pub fn for_version(version: VCardVersion, name: impl Into<String>) -> Self {
        Self::new(Namespace::for_version(version), name)
    }

    /// Creates an element in the same namespace as `self` without attaching it.
    #[must_use]
    pub fn sibling(&self, name: impl Into<String>) -> Self {
        Self::new(self.namespace.clone(), name)
    }

    /// Returns the local name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Sets an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Appends a child element.
    pub fn push_element(&mut self, child: XCardElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// Appends text, merging with a directly preceding text node.
    pub fn push_text(&mut self, text: &str) {
        if let Some(XmlNode::Text(existing)) = self.children.last_mut() {
            existing.push_str(text);
        } else {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }

    /// Appends a child element named `name` holding `text`.
    pub fn append_text(&mut self, name: &str, text: &str) {
        let mut child = self.sibling(name);
        child.push_text(text);
        self.push_element(child);
    }

    /// Appends one `name` child per value, in order.
    pub fn append<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            self.append_text(name, value.as_ref());
        }
    }

    /// Returns the direct child nodes.
    #[must_use]
    pub fn nodes(&self) -> &[XmlNode] {
        &self.children
    }

    /// Iterates over the direct child elements.
    pub fn children(&self) -> impl Iterator<Item = &XCardElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// Iterates over the direct children named `name` in this element's namespace.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XCardElement> {
        self.children()
            .filter(move |e| e.name == name && e.namespace == self.namespace)
    }

    /// Text content of every `name` child, in document order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<String> {
        self.children_named(name)
            .map(XCardElement::text_content)
            .collect()
    }

    /// Text content of the first `name` child.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<String> {
        self.children_named(name).next().map(XCardElement::text_content)
    }

    /// Concatenated text of this element and all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(t) => out.push_str(t),
                XmlNode::Element(e) => e.collect_text(out),
            }
        }
    }

    /// Writes this element and its subtree.
    ///
    /// A default namespace declaration is emitted only where the namespace
    /// differs from `inherited`.
    ///
    /// ## Errors
    /// Returns an error if the underlying writer fails.
    pub fn write_to<W: std::io::Write>(
        &self,
        writer: &mut Writer<W>,
        inherited: Option<&Namespace>,
    ) -> Result<(), quick_xml::Error> {
        let mut start = BytesStart::new(self.name.as_str());
        if inherited != Some(&self.namespace) {
            start.push_attribute(("xmlns", self.namespace.as_str()));
        }
        for (name, value) in &self.attributes {
            start.push_attribute((name.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for node in &self.children {
            match node {
                XmlNode::Element(child) => child.write_to(writer, Some(&self.namespace))?,
                XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;

        Ok(())
    }

    /// Parses an XML document and returns its root element.
    ///
    /// ## Summary
    /// Resolves prefixed and default namespace declarations, unescapes
    /// entity and character references and keeps text nodes verbatim.
    ///
    /// ## Errors
    /// Returns an error if the XML is malformed or has no root element.
    #[tracing::instrument(skip(xml), fields(xml_len = xml.len()))]
    pub fn parse(xml: &[u8]) -> ParseResult<Self> {
        let mut reader = Reader::from_reader(xml);

        let mut buf = Vec::new();
        // In-scope declarations as (prefix, uri); "" is the default namespace.
        let mut namespaces: Vec<(String, String)> = Vec::new();
        // Open elements with the number of declarations each introduced.
        let mut stack: Vec<(Self, usize)> = Vec::new();
        let mut root: Option<Self> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let opened = open_element(e, &mut namespaces)?;
                    stack.push(opened);
                }
                Ok(Event::Empty(ref e)) => {
                    let (element, declared) = open_element(e, &mut namespaces)?;
                    namespaces.truncate(namespaces.len() - declared);
                    attach(element, &mut stack, &mut root)?;
                }
                Ok(Event::End(ref e)) => {
                    let Some((element, declared)) = stack.pop() else {
                        let name = std::str::from_utf8(e.name().as_ref())?.to_owned();
                        return Err(ParseError::unexpected_element(&name));
                    };
                    namespaces.truncate(namespaces.len() - declared);
                    attach(element, &mut stack, &mut root)?;
                }
                Ok(Event::Text(ref e)) => {
                    if let Some((current, _)) = stack.last_mut() {
                        let decoded = reader.decoder().decode(e.as_ref())?;
                        current.push_text(&decoded);
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if let Some((current, _)) = stack.last_mut() {
                        let text = std::str::from_utf8(e.as_ref())?;
                        current.push_text(text);
                    }
                }
                Ok(Event::GeneralRef(ref e)) => {
                    if let Some((current, _)) = stack.last_mut() {
                        let name = reader.decoder().decode(e.as_ref())?;
                        let reference = format!("&{name};");
                        let resolved = quick_xml::escape::unescape(&reference)?;
                        current.push_text(&resolved);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(ParseError::xml(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        if let Some((open, _)) = stack.last() {
            return Err(ParseError::xml(format!("unclosed element: {}", open.name)));
        }
        root.ok_or_else(|| ParseError::missing_element("document root"))
    }
}

/// Builds an element from a start tag, registering its namespace declarations.
fn open_element(
    e: &BytesStart<'_>,
    namespaces: &mut Vec<(String, String)>,
) -> ParseResult<(XCardElement, usize)> {
    let mut declared = 0;
    let mut attributes = Vec::new();

    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let raw = std::str::from_utf8(&attr.value)?;
        let value = quick_xml::escape::unescape(raw)?.into_owned();

        if let Some(prefix) = key.strip_prefix("xmlns:") {
            namespaces.push((prefix.to_string(), value));
            declared += 1;
        } else if key == "xmlns" {
            namespaces.push((String::new(), value));
            declared += 1;
        } else {
            attributes.push((key.to_string(), value));
        }
    }

    let name_bytes = e.name();
    let qualified = std::str::from_utf8(name_bytes.as_ref())?;
    let (prefix, local_name) = qualified.split_once(':').unwrap_or(("", qualified));

    let namespace = namespaces
        .iter()
        .rev()
        .find(|(p, _)| p == prefix)
        .map_or(Namespace::NONE, |(_, uri)| Namespace::new(uri.clone()));

    let mut element = XCardElement::new(namespace, local_name);
    element.attributes = attributes;
    Ok((element, declared))
}

/// Attaches a closed element to its parent, or makes it the document root.
fn attach(
    element: XCardElement,
    stack: &mut [(XCardElement, usize)],
    root: &mut Option<XCardElement>,
) -> ParseResult<()> {
    if let Some((parent, _)) = stack.last_mut() {
        parent.push_element(element);
        Ok(())
    } else if root.is_some() {
        Err(ParseError::unexpected_element(&element.name))
    } else {
        *root = Some(element);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_string(element: &XCardElement) -> String {
        let mut writer = Writer::new(Vec::new());
        element.write_to(&mut writer, None).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn append_creates_one_child_per_value() {
        let mut nickname = XCardElement::for_version(VCardVersion::V4_0, "nickname");
        nickname.append("text", ["Anna", "Ann"]);

        assert_eq!(nickname.children().count(), 2);
        assert_eq!(nickname.get_all("text"), vec!["Anna", "Ann"]);
        assert_eq!(nickname.first("text").as_deref(), Some("Anna"));
        assert_eq!(nickname.first("uri"), None);
    }

    #[test]
    fn write_declares_namespace_once() {
        let mut vcard = XCardElement::for_version(VCardVersion::V4_0, "vcard");
        let mut fn_element = vcard.sibling("fn");
        fn_element.append_text("text", "Anna & Bob <3");
        vcard.push_element(fn_element);

        let xml = write_string(&vcard);
        assert_eq!(
            xml,
            "<vcard xmlns=\"urn:ietf:params:xml:ns:vcard-4.0\"><fn><text>Anna &amp; Bob &lt;3</text></fn></vcard>"
        );
    }

    #[test]
    fn write_empty_element_and_attribute() {
        let mut group = XCardElement::for_version(VCardVersion::V4_0, "group");
        group.set_attribute("name", "item1");
        group.set_attribute("name", "item2");

        assert_eq!(group.attribute("name"), Some("item2"));
        assert_eq!(
            write_string(&group),
            "<group xmlns=\"urn:ietf:params:xml:ns:vcard-4.0\" name=\"item2\"/>"
        );
    }

    #[test]
    fn parse_resolves_namespaces_and_entities() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<x:nickname xmlns:x="urn:ietf:params:xml:ns:vcard-4.0">
  <x:text>Anna &amp; Bob</x:text>
  <x:text>&#65;nn</x:text>
  <text>not in namespace</text>
</x:nickname>"#;

        let element = XCardElement::parse(xml).unwrap();
        assert_eq!(element.name(), "nickname");
        assert_eq!(element.namespace(), &Namespace::XCARD);
        assert_eq!(element.get_all("text"), vec!["Anna & Bob", "Ann"]);
    }

    #[test]
    fn parse_default_namespace_and_cdata() {
        let xml = br#"<vcard xmlns="urn:ietf:params:xml:ns:vcard-4.0"><group name="work"><note><text><![CDATA[a <b>]]></text></note></group></vcard>"#;

        let element = XCardElement::parse(xml).unwrap();
        let group = element.children_named("group").next().unwrap();
        assert_eq!(group.attribute("name"), Some("work"));
        let note = group.children_named("note").next().unwrap();
        assert_eq!(note.get_all("text"), vec!["a <b>"]);
    }

    #[test]
    fn parse_round_trips_written_tree() {
        let mut vcard = XCardElement::for_version(VCardVersion::V4_0, "vcard");
        let mut categories = vcard.sibling("categories");
        categories.append("text", ["work", "friends & family"]);
        vcard.push_element(categories);

        let parsed = XCardElement::parse(write_string(&vcard).as_bytes()).unwrap();
        assert_eq!(parsed, vcard);
    }

    #[test]
    fn parse_rejects_empty_and_malformed_input() {
        assert!(XCardElement::parse(b"").is_err());
        assert!(XCardElement::parse(b"<a><b></a>").is_err());
        assert!(XCardElement::parse(b"<a/><b/>").is_err());
    }
}
