//! Owned XML element tree built with `quick-xml`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::query::XmlNode;

/// Tag of the synthetic node that holds the document's top-level element.
const DOCUMENT_TAG: &str = "#document";

/// Deepest element nesting [`Document::parse`] accepts.
pub const MAX_DEPTH: usize = 256;

/// Errors from parsing a response body as XML.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum XmlError {
    /// The reader rejected the input.
    #[error("malformed XML at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    /// An attribute could not be read.
    #[error("malformed attribute on <{element}>: {message}")]
    Attribute { element: String, message: String },

    /// Input ended inside an element.
    #[error("unclosed element <{0}>")]
    Unclosed(String),

    /// The body contained no element at all.
    #[error("document has no root element")]
    Empty,

    /// Elements were nested more than [`MAX_DEPTH`] levels deep.
    #[error("elements nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with its attributes and children.
///
/// Tag and attribute names are stored without namespace prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    fn new(name: String, attributes: Vec<(String, String)>) -> Self {
        Self {
            name,
            attributes,
            children: Vec::new(),
        }
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| XmlError::Attribute {
                element: name.clone(),
                message: e.to_string(),
            })?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| XmlError::Attribute {
                    element: name.clone(),
                    message: e.to_string(),
                })?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self::new(name, attributes))
    }

    /// Direct child elements, skipping text.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    fn collect<'a>(&'a self, tag: &str, out: &mut Vec<&'a Element>) {
        for child in self.children() {
            if child.name == tag {
                out.push(child);
            }
            child.collect(tag, out);
        }
    }

    fn push_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Element(element) => element.push_text(out),
                Node::Text(text) => out.push_str(text),
            }
        }
    }
}

impl XmlNode for Element {
    fn tag(&self) -> &str {
        &self.name
    }

    fn find_first(&self, tag: &str) -> Option<&Self> {
        for child in self.children() {
            if child.name == tag {
                return Some(child);
            }
            if let Some(found) = child.find_first(tag) {
                return Some(found);
            }
        }
        None
    }

    fn find_all(&self, tag: &str) -> Vec<&Self> {
        let mut found = Vec::new();
        self.collect(tag, &mut found);
        found
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }
}

/// A parsed response body.
///
/// Queries through [`Document::as_node`] see the top-level element as a
/// descendant, so `doc.as_node().find_first("Stations")` finds the root
/// `<Stations>` element itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    node: Element,
}

impl Document {
    /// Parse a complete XML document.
    ///
    /// Whitespace-only text between elements is dropped. Any other text is
    /// kept verbatim. Nesting beyond [`MAX_DEPTH`] is rejected.
    pub fn parse(xml: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(xml);

        // The stack holds the document node plus every open element.
        let mut stack = vec![Element::new(DOCUMENT_TAG.to_string(), Vec::new())];

        loop {
            let event = reader.read_event().map_err(|e| XmlError::Syntax {
                position: reader.buffer_position() as u64,
                message: e.to_string(),
            })?;

            match event {
                Event::Start(start) => {
                    if stack.len() > MAX_DEPTH {
                        return Err(XmlError::TooDeep { limit: MAX_DEPTH });
                    }
                    stack.push(Element::from_start(&start)?);
                }
                Event::Empty(start) => {
                    if stack.len() > MAX_DEPTH {
                        return Err(XmlError::TooDeep { limit: MAX_DEPTH });
                    }
                    let element = Element::from_start(&start)?;
                    push_child(&mut stack, Node::Element(element));
                }
                Event::End(_) => {
                    if stack.len() < 2 {
                        return Err(XmlError::Syntax {
                            position: reader.buffer_position() as u64,
                            message: "closing tag without matching opening tag".to_string(),
                        });
                    }
                    if let Some(element) = stack.pop() {
                        push_child(&mut stack, Node::Element(element));
                    }
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|e| XmlError::Syntax {
                        position: reader.buffer_position() as u64,
                        message: e.to_string(),
                    })?;
                    if !text.trim().is_empty() {
                        push_child(&mut stack, Node::Text(text.into_owned()));
                    }
                }
                Event::CData(data) => {
                    let text = std::str::from_utf8(&data).map_err(|e| XmlError::Syntax {
                        position: reader.buffer_position() as u64,
                        message: e.to_string(),
                    })?;
                    push_child(&mut stack, Node::Text(text.to_string()));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        let node = match stack.pop() {
            Some(node) if stack.is_empty() => node,
            Some(open) => return Err(XmlError::Unclosed(open.name)),
            None => return Err(XmlError::Empty),
        };

        if node.children().next().is_none() {
            return Err(XmlError::Empty);
        }

        Ok(Self { node })
    }

    /// The document node, for tree queries.
    pub fn as_node(&self) -> &Element {
        &self.node
    }

    /// The top-level element.
    pub fn root(&self) -> Option<&Element> {
        self.node.children().next()
    }
}

fn push_child(stack: &mut [Element], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Stations>
    <Station>
        <Code>GVC</Code>
        <Namen>
            <Kort>Den Haag C</Kort>
        </Namen>
        <Synoniemen>
            <Synoniem>Den Haag</Synoniem>
            <Synoniem>&apos;s-Gravenhage</Synoniem>
        </Synoniemen>
    </Station>
    <Station>
        <Code>UT</Code>
        <Spoor wijziging="true">5b</Spoor>
        <Leeg/>
    </Station>
</Stations>"#;

    #[test]
    fn document_node_sees_root() {
        let doc = Document::parse(SAMPLE).unwrap();
        assert_eq!(doc.root().unwrap().tag(), "Stations");
        assert_eq!(doc.as_node().find_first("Stations").unwrap().tag(), "Stations");
    }

    #[test]
    fn find_first_is_document_order() {
        let doc = Document::parse(SAMPLE).unwrap();
        let code = doc.as_node().find_first("Code").unwrap();
        assert_eq!(code.text(), "GVC");
    }

    #[test]
    fn find_all_preserves_order() {
        let doc = Document::parse(SAMPLE).unwrap();
        let synonyms: Vec<String> = doc
            .as_node()
            .find_all("Synoniem")
            .into_iter()
            .map(XmlNode::text)
            .collect();
        assert_eq!(synonyms, vec!["Den Haag", "'s-Gravenhage"]);
    }

    #[test]
    fn find_all_searches_only_descendants() {
        let doc = Document::parse(SAMPLE).unwrap();
        let second = doc.as_node().find_all("Station")[1];
        let codes = second.find_all("Code");
        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].text(), "UT");
        assert!(second.find_first("Station").is_none());
    }

    #[test]
    fn attributes_and_empty_elements() {
        let doc = Document::parse(SAMPLE).unwrap();
        let platform = doc.as_node().find_first("Spoor").unwrap();
        assert_eq!(platform.attribute("wijziging"), Some("true"));
        assert_eq!(platform.attribute("missing"), None);
        assert_eq!(platform.text(), "5b");

        let empty = doc.as_node().find_first("Leeg").unwrap();
        assert_eq!(empty.text(), "");
    }

    #[test]
    fn find_first_where_matches_attribute() {
        let xml = r#"<Prijzen>
            <ReisType name="Retour"><Prijs>1</Prijs></ReisType>
            <ReisType name="Enkele reis"><Prijs>2</Prijs></ReisType>
        </Prijzen>"#;
        let doc = Document::parse(xml).unwrap();
        let single = doc
            .as_node()
            .find_first_where("ReisType", "name", "Enkele reis")
            .unwrap();
        assert_eq!(single.text(), "2");
        assert!(
            doc.as_node()
                .find_first_where("ReisType", "name", "Dagretour")
                .is_none()
        );
    }

    #[test]
    fn text_concatenates_descendants() {
        let doc = Document::parse("<a>one<b>two</b><c><![CDATA[<three>]]></c></a>").unwrap();
        assert_eq!(doc.root().unwrap().text(), "onetwo<three>");
    }

    #[test]
    fn text_keeps_inner_whitespace() {
        let doc =
            Document::parse("<Bericht>Geen treinen <b>tussen</b> Utrecht en Gouda</Bericht>")
                .unwrap();
        assert_eq!(
            doc.root().unwrap().text(),
            "Geen treinen tussen Utrecht en Gouda"
        );

        let doc = Document::parse("<Station>\n  <Naam> Den Haag </Naam>\n</Station>").unwrap();
        let naam = doc.as_node().find_first("Naam").unwrap();
        assert_eq!(naam.text(), " Den Haag ");
        assert_eq!(doc.root().unwrap().text(), " Den Haag ");
    }

    fn nested(depth: usize) -> String {
        format!("{}{}", "<a>".repeat(depth), "</a>".repeat(depth))
    }

    #[test]
    fn nesting_at_the_limit_parses() {
        let doc = Document::parse(&nested(MAX_DEPTH)).unwrap();
        assert!(doc.as_node().find_first("missing").is_none());
        assert_eq!(doc.as_node().find_all("a").len(), MAX_DEPTH);
    }

    #[test]
    fn rejects_deep_nesting() {
        let limit = MAX_DEPTH;
        assert_eq!(
            Document::parse(&nested(MAX_DEPTH + 1)),
            Err(XmlError::TooDeep { limit })
        );
        assert_eq!(
            Document::parse(&nested(200_000)),
            Err(XmlError::TooDeep { limit })
        );

        let empty_leaf = format!("{}<a/>{}", "<a>".repeat(MAX_DEPTH), "</a>".repeat(MAX_DEPTH));
        assert_eq!(
            Document::parse(&empty_leaf),
            Err(XmlError::TooDeep { limit })
        );
    }

    #[test]
    fn namespace_prefixes_are_dropped() {
        let doc = Document::parse(r#"<ns:a xmlns:ns="urn:x"><ns:b ns:k="v"/></ns:a>"#).unwrap();
        let b = doc.as_node().find_first("b").unwrap();
        assert_eq!(b.attribute("k"), Some("v"));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            Document::parse("<a><b></a>"),
            Err(XmlError::Syntax { .. })
        ));
        assert_eq!(
            Document::parse("<a><b>"),
            Err(XmlError::Unclosed("b".to_string()))
        );
        assert_eq!(Document::parse(""), Err(XmlError::Empty));
        assert_eq!(Document::parse("   "), Err(XmlError::Empty));
    }
}
