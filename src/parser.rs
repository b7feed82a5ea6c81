//! Template parsing
//!
//! Use [`Parser::parse_str`] or [`Parser::parse_file`] to turn template source into a [`NodeTree`].
use crate::{
    Attributes, CommentNode, DoctypeNode, ElementNode, LineIndex, Located, NamespaceRegistry,
    Node, NodeSource, NodeTree, ParsePosition, TextNode, XmlDeclarationNode, XmlnsState,
    error::{ErrorContext, XmlError, XmlErrorKind, XmlResult},
};
use std::{path::Path, sync::Arc};
use tracing::{debug, instrument, trace};
use xmlparser::{ElementEnd, StrSpan, Token, Tokenizer};

/// File name recorded on nodes parsed from a string, unless one is configured.
pub const DEFAULT_SOURCE_FILE: &str = "<string>";

/// Options controlling how templates are parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// File name recorded on nodes parsed with [`Parser::parse_str`].
    pub source_file: String,

    /// Namespaces whose `xmlns:` declarations create template aliases.
    pub namespaces: NamespaceRegistry,
}
impl ParseOptions {
    /// Set the file name recorded on nodes parsed from a string.
    #[must_use]
    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = source_file.into();
        self
    }

    /// Recognise another template namespace.
    #[must_use]
    pub fn with_namespace(mut self, uri: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.namespaces = self.namespaces.with_namespace(uri, canonical);
        self
    }
}
impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            source_file: DEFAULT_SOURCE_FILE.to_string(),
            namespaces: NamespaceRegistry::default(),
        }
    }
}

/// Builds template trees from source text.
///
/// The parser is strict: it stops at the first malformed construct, and does not attempt to repair
/// unclosed or mismatched tags.
///
/// Every node records the file and line its markup starts on. Every element records the namespace
/// aliases in scope at that point, including the ones it declares itself.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParseOptions,
}
impl Parser {
    /// Create a parser with the given options.
    #[must_use]
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Returns the options of this parser.
    #[must_use]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a template from a string.
    ///
    /// # Errors
    /// Returns errors if the template is not well-formed XML.
    ///
    /// # Example
    /// ```rust
    /// use taltree::{Located, Parser};
    ///
    /// let tree = Parser::default().parse_str("<p>\n  <tal:block content=\"x\"/>\n</p>").unwrap();
    /// let p = tree.children()[0].as_element().unwrap();
    /// let block = p.children()[1].as_element().unwrap();
    ///
    /// assert_eq!(block.get_attribute("tal:content"), Some("x"));
    /// assert_eq!(block.source_line(), 2);
    /// ```
    pub fn parse_str(&self, src: &str) -> XmlResult<NodeTree> {
        self.parse(src, Arc::from(self.options.source_file.as_str()))
    }

    /// Read and parse a template file. Nodes record the path as their source file.
    ///
    /// # Errors
    /// Returns errors if the file cannot be read, or the template is not well-formed XML.
    #[instrument(skip(self))]
    pub fn parse_file(&self, path: &Path) -> XmlResult<NodeTree> {
        let src = std::fs::read_to_string(path)
            .map_err(|e| XmlError::from(e).with_path(path.to_path_buf()))?;

        let file = Arc::from(path.display().to_string());
        self.parse(&src, file)
            .map_err(|e| e.with_path(path.to_path_buf()))
    }

    fn parse(&self, src: &str, file: Arc<str>) -> XmlResult<NodeTree> {
        debug!(file = %file, bytes = src.len(), "parsing template");

        let mut reader = TemplateReader::new(src, file, &self.options.namespaces);
        let body_start = reader.read_prolog()?;

        // Templates may hold several top-level elements, or text around them.
        for token in Tokenizer::from_fragment(src, body_start..src.len()) {
            reader.read(token.map_err(tokenizer_error)?)?;
        }

        let tree = reader.finish()?;
        debug!(nodes = tree.descendants().count(), "parsed template");
        Ok(tree)
    }
}

fn tokenizer_error(e: xmlparser::Error) -> XmlError {
    let line = usize::try_from(e.pos().row).unwrap_or(usize::MAX);
    XmlError::new(XmlErrorKind::Xml(e), ErrorContext::new(line))
}

/// A start tag whose attributes are still being read.
struct OpenTag {
    name: String,
    line: usize,
    attributes: Attributes,
}

/// Turns tokens into nodes, tracking the current line and alias scope.
struct TemplateReader<'a> {
    src: &'a str,
    lines: LineIndex,
    namespaces: &'a NamespaceRegistry,
    position: ParsePosition,
    builder: TreeBuilder,
    open_tag: Option<OpenTag>,
    dtd_start: Option<usize>,
}
impl<'a> TemplateReader<'a> {
    fn new(src: &'a str, file: Arc<str>, namespaces: &'a NamespaceRegistry) -> Self {
        let position = ParsePosition::new(file, 1);
        let builder = TreeBuilder::new(&position);
        Self {
            src,
            lines: LineIndex::new(src),
            namespaces,
            position,
            builder,
            open_tag: None,
            dtd_start: None,
        }
    }

    /// Reads the XML declaration, DOCTYPE and any comments before the template body.
    ///
    /// Returns the offset the body starts at: the first start tag, or the first byte that cannot
    /// belong to a prolog.
    fn read_prolog(&mut self) -> XmlResult<usize> {
        let mut body_start = 0;

        for token in Tokenizer::from(self.src) {
            let token = match token {
                Ok(Token::ElementStart { span, .. }) => return Ok(span.start()),
                Ok(token) => token,
                Err(xmlparser::Error::UnknownToken(_)) if self.dtd_start.is_none() => break,
                Err(e) => return Err(tokenizer_error(e)),
            };

            let end = match token {
                Token::Declaration { span, .. }
                | Token::ProcessingInstruction { span, .. }
                | Token::Comment { span, .. }
                | Token::EmptyDtd { span, .. }
                | Token::DtdEnd { span, .. } => Some(span.end()),
                _ => None,
            };

            self.read(token)?;
            if let Some(end) = end.filter(|_| self.dtd_start.is_none()) {
                body_start = end;
            }
        }

        Ok(body_start)
    }

    fn read(&mut self, token: Token<'a>) -> XmlResult<()> {
        match token {
            Token::Declaration { span, .. } => {
                self.position.set_line(self.lines.line_of(span.start()));
                self.builder
                    .attach(XmlDeclarationNode::new(&self.position, span.as_str()));
            }

            Token::ProcessingInstruction { .. } | Token::Comment { .. }
                if self.dtd_start.is_some() =>
            {
                // inside the internal subset, kept with the whole doctype
            }

            Token::ProcessingInstruction { span, .. }
            | Token::Comment { span, .. }
            | Token::Cdata { span, .. } => {
                self.position.set_line(self.lines.line_of(span.start()));
                self.builder
                    .attach(CommentNode::new(&self.position, span.as_str()));
            }

            Token::EmptyDtd { span, .. } => {
                self.position.set_line(self.lines.line_of(span.start()));
                self.builder
                    .attach(DoctypeNode::new(&self.position, span.as_str()));
            }

            Token::DtdStart { span, .. } => {
                self.dtd_start = Some(span.start());
            }

            Token::EntityDeclaration { .. } => {
                // part of the internal subset, kept with the whole doctype
            }

            Token::DtdEnd { span, .. } => {
                let Some(start) = self.dtd_start.take() else {
                    bail!(
                        self.lines.line_of(span.start()),
                        msg = "Bug; DOCTYPE ended before it started"
                    );
                };

                self.position.set_line(self.lines.line_of(start));
                self.builder
                    .attach(DoctypeNode::new(&self.position, &self.src[start..span.end()]));
            }

            Token::ElementStart {
                prefix,
                local,
                span,
                ..
            } => {
                self.open_tag = Some(OpenTag {
                    name: qualified_name(prefix, local),
                    line: self.lines.line_of(span.start()),
                    attributes: Attributes::new(),
                });
            }

            Token::Attribute {
                prefix,
                local,
                value,
                span,
                ..
            } => {
                let Some(tag) = self.open_tag.as_mut() else {
                    bail!(
                        self.lines.line_of(span.start()),
                        msg = "Bug; Cannot apply attribute; no tag is open!"
                    );
                };

                tag.attributes
                    .insert(qualified_name(prefix, local), value.as_str());
            }

            Token::ElementEnd { end, span, .. } => {
                let line = self.lines.line_of(span.start());
                match end {
                    ElementEnd::Open | ElementEnd::Empty => {
                        let Some(tag) = self.open_tag.take() else {
                            bail!(line, msg = "Bug; Cannot end tag; no tag is open!");
                        };

                        let xmlns = self
                            .builder
                            .xmlns_state()
                            .declare(tag.attributes.pairs(), self.namespaces);
                        self.position.set_line(tag.line);
                        self.position.set_xmlns(xmlns);

                        let element = ElementNode::new(&self.position, tag.name, tag.attributes);
                        if matches!(end, ElementEnd::Open) {
                            self.builder.open(element);
                        } else {
                            trace!(name = element.name(), line = tag.line, "empty element");
                            self.builder.attach(element);
                        }
                    }

                    ElementEnd::Close(prefix, local) => {
                        let name = qualified_name(prefix, local);
                        self.builder.close(&name, line)?;
                    }
                }
            }

            Token::Text { text, .. } => {
                self.position.set_line(self.lines.line_of(text.start()));
                self.builder
                    .attach(TextNode::new(&self.position, text.as_str()));
            }
        }

        Ok(())
    }

    fn finish(self) -> XmlResult<NodeTree> {
        if let Some(tag) = self.open_tag {
            bail!(tag.line, XmlErrorKind::UnclosedTag(tag.name));
        }

        self.builder.finish()
    }
}

/// The document root plus the stack of elements whose closing tag has not been seen yet.
struct TreeBuilder {
    root: NodeTree,
    stack: Vec<ElementNode>,
    root_xmlns: XmlnsState,
}
impl TreeBuilder {
    fn new(source: &impl NodeSource) -> Self {
        Self {
            root: NodeTree::new(source),
            stack: vec![],
            root_xmlns: source.xmlns_state().clone(),
        }
    }

    /// The alias scope children of the innermost open element start from.
    fn xmlns_state(&self) -> &XmlnsState {
        self.stack
            .last()
            .map_or(&self.root_xmlns, ElementNode::xmlns_state)
    }

    fn attach(&mut self, node: impl Into<Node>) {
        match self.stack.last_mut() {
            Some(parent) => parent.add_child(node),
            None => self.root.add_child(node),
        }
    }

    fn open(&mut self, element: ElementNode) {
        trace!(name = element.name(), depth = self.stack.len(), "open element");
        self.stack.push(element);
    }

    fn close(&mut self, name: &str, line: usize) -> XmlResult<()> {
        let Some(element) = self.stack.pop() else {
            bail!(line, msg = "Unexpected closing tag </{}>", name);
        };

        if element.name() != name {
            bail!(
                line,
                XmlErrorKind::MismatchedTag {
                    expected: element.name().to_string(),
                    found: name.to_string(),
                }
            );
        }

        trace!(name, depth = self.stack.len(), "close element");
        self.attach(element);
        Ok(())
    }

    fn finish(mut self) -> XmlResult<NodeTree> {
        if let Some(element) = self.stack.pop() {
            bail!(
                element.source_line(),
                XmlErrorKind::UnclosedTag(element.name().to_string())
            );
        }

        let blank = |node: &Node| node.as_text().is_some_and(TextNode::is_whitespace);
        if self.root.children().iter().all(blank) {
            return Err(XmlError::new(
                XmlErrorKind::EmptyDocument,
                ErrorContext::default(),
            ));
        }

        Ok(self.root)
    }
}

fn qualified_name(prefix: StrSpan<'_>, local: StrSpan<'_>) -> String {
    if prefix.as_str().is_empty() {
        local.as_str().to_string()
    } else {
        format!("{}:{}", prefix.as_str(), local.as_str())
    }
}
