//! XSD schema reader.
//!
//! This module turns a stream of start/end markup events into a
//! [`ProtoTree`]. Each tag's local name selects a [`Construct`]; the start
//! handler pushes or mutates the innermost open declaration and the end
//! handler pops it and hands it to its owner.

use crate::components::{Attribute, AttributeGroup, Element, Group};
use crate::context::{ParseContext, Particle, Scope};
use crate::error::ParseError;
use crate::ir::{Declaration, ProtoTree};
use crate::resolver::{TypeResolver, strip_ns_prefix};
use crate::types::{ComplexType, Pattern, Restriction, SimpleType, XsdPrimitive};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;
use std::str::FromStr;

/// Maps an XSD built-in to the target language's primitive name.
pub type PrimitiveNaming = fn(XsdPrimitive) -> &'static str;

/// Options controlling how a schema document is read.
#[derive(Debug, Clone, Copy)]
pub struct ReaderOptions {
    lenient_facets: bool,
    primitive_name: PrimitiveNaming,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            lenient_facets: false,
            primitive_name: |primitive| primitive.rust_type(),
        }
    }
}

impl ReaderOptions {
    /// Creates the default options: strict facets, Rust primitive names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts malformed numeric facet literals as zero instead of failing.
    ///
    /// The facet is still marked present. This matches generators that
    /// ignored the parse error.
    #[must_use]
    pub fn lenient_facets(mut self, lenient: bool) -> Self {
        self.lenient_facets = lenient;
        self
    }

    /// Sets the primitive naming function.
    #[must_use]
    pub fn primitive_name(mut self, naming: PrimitiveNaming) -> Self {
        self.primitive_name = naming;
        self
    }

    /// Returns true if malformed facet literals are accepted.
    #[must_use]
    pub const fn is_lenient(&self) -> bool {
        self.lenient_facets
    }
}

/// Schema constructs with a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    /// `<schema>`.
    Schema,
    /// `<element>`.
    Element,
    /// `<attribute>`.
    Attribute,
    /// `<simpleType>`.
    SimpleType,
    /// `<complexType>`.
    ComplexType,
    /// `<group>`.
    Group,
    /// `<attributeGroup>`.
    AttributeGroup,
    /// `<sequence>`.
    Sequence,
    /// `<choice>`.
    Choice,
    /// `<all>`.
    All,
    /// `<restriction>`.
    Restriction,
    /// `<extension>`.
    Extension,
    /// `<list>`.
    List,
    /// `<union>`.
    Union,
    /// `<enumeration>`.
    Enumeration,
    /// `<minInclusive>`.
    MinInclusive,
    /// `<maxInclusive>`.
    MaxInclusive,
    /// `<minLength>`.
    MinLength,
    /// `<maxLength>`.
    MaxLength,
    /// `<length>`.
    Length,
    /// `<pattern>`.
    Pattern,
    /// `<documentation>`.
    Documentation,
}

impl Construct {
    /// Looks up the construct for a tag's local name.
    #[must_use]
    pub fn from_local_name(name: &str) -> Option<Self> {
        let construct = match name {
            "schema" => Self::Schema,
            "element" => Self::Element,
            "attribute" => Self::Attribute,
            "simpleType" => Self::SimpleType,
            "complexType" => Self::ComplexType,
            "group" => Self::Group,
            "attributeGroup" => Self::AttributeGroup,
            "sequence" => Self::Sequence,
            "choice" => Self::Choice,
            "all" => Self::All,
            "restriction" => Self::Restriction,
            "extension" => Self::Extension,
            "list" => Self::List,
            "union" => Self::Union,
            "enumeration" => Self::Enumeration,
            "minInclusive" => Self::MinInclusive,
            "maxInclusive" => Self::MaxInclusive,
            "minLength" => Self::MinLength,
            "maxLength" => Self::MaxLength,
            "length" => Self::Length,
            "pattern" => Self::Pattern,
            "documentation" => Self::Documentation,
            _ => return None,
        };
        Some(construct)
    }
}

/// Attributes of a start tag, keyed by local name.
#[derive(Debug, Clone, Default)]
pub struct Attrs {
    pairs: Vec<(String, String)>,
}

impl Attrs {
    /// Creates an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Returns the value of the attribute with local name `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Decodes the attributes of a quick-xml start tag.
    ///
    /// # Errors
    /// Returns `ParseError` on invalid UTF-8 or a malformed escape.
    pub fn from_start(e: &BytesStart<'_>) -> Result<Self, ParseError> {
        let mut attrs = Self::new();
        for attr in e.attributes().flatten() {
            let local = attr.key.local_name();
            let key = std::str::from_utf8(local.as_ref())?;
            let raw = std::str::from_utf8(&attr.value)?;
            let value = quick_xml::escape::unescape(raw)?;
            attrs.pairs.push((key.to_string(), value.into_owned()));
        }
        Ok(attrs)
    }
}

/// Splits `prefix:local` into its parts.
fn split_qname(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

/// Reads the occurrence bounds of a particle or element.
///
/// Returns `(plural, optional)`.
fn occurs(element: &str, attrs: &Attrs) -> Result<(bool, bool), ParseError> {
    let plural = match attrs.get("maxOccurs").map(str::trim) {
        None | Some("0" | "1") => false,
        Some("unbounded") => true,
        Some(v) => {
            v.parse::<u64>()
                .map_err(|_| ParseError::invalid_attr(element, "maxOccurs", v))?;
            true
        }
    };
    let optional = match attrs.get("minOccurs").map(str::trim) {
        None => false,
        Some(v) => {
            v.parse::<u64>()
                .map_err(|_| ParseError::invalid_attr(element, "minOccurs", v))?
                == 0
        }
    };
    Ok((plural, optional))
}

/// Event-driven XSD reader.
///
/// Feed events with [`start`](Self::start), [`text`](Self::text) and
/// [`end`](Self::end), or let [`read`](Self::read) drive quick-xml.
#[derive(Debug, Default)]
pub struct SchemaReader {
    options: ReaderOptions,
    tree: ProtoTree,
    ctx: ParseContext,
    xsd_prefix: Option<String>,
    doc: Option<String>,
}

impl SchemaReader {
    /// Creates a reader with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reader with the given options.
    #[must_use]
    pub fn with_options(options: ReaderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Returns the declarations read so far.
    #[must_use]
    pub fn tree(&self) -> &ProtoTree {
        &self.tree
    }

    /// Consumes the reader and returns the finished tree.
    #[must_use]
    pub fn finish(self) -> ProtoTree {
        if !self.ctx.elements.is_empty() || !self.ctx.complex_types.is_empty() {
            tracing::warn!("schema ended with unclosed declarations");
        }
        self.tree
    }

    /// Reads a whole XSD document.
    ///
    /// # Errors
    /// Returns `ParseError` on malformed XML, an invalid facet or pattern,
    /// or a circular type reference.
    pub fn read(mut self, xml: &str) -> Result<ProtoTree, ParseError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let name_bytes = e.name().as_ref().to_vec();
                    let name = std::str::from_utf8(&name_bytes)?;
                    self.start(name, &Attrs::from_start(e)?)?;
                }
                Ok(Event::Empty(ref e)) => {
                    let name_bytes = e.name().as_ref().to_vec();
                    let name = std::str::from_utf8(&name_bytes)?;
                    self.start(name, &Attrs::from_start(e)?)?;
                    self.end(name)?;
                }
                Ok(Event::End(ref e)) => {
                    let name_bytes = e.name().as_ref().to_vec();
                    let name = std::str::from_utf8(&name_bytes)?;
                    self.end(name)?;
                }
                Ok(Event::Text(ref t)) => {
                    let raw = std::str::from_utf8(t.as_ref())?;
                    self.text(&quick_xml::escape::unescape(raw)?);
                }
                Ok(Event::GeneralRef(ref r)) => {
                    let name = std::str::from_utf8(r.as_ref())?;
                    self.text(&quick_xml::escape::unescape(&format!("&{name};"))?);
                }
                Ok(Event::CData(ref t)) => {
                    self.text(std::str::from_utf8(t.as_ref())?);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(ParseError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        let tree = self.finish();
        tracing::info!("read schema with {} top-level declarations", tree.len());
        Ok(tree)
    }

    /// Handles a start tag.
    ///
    /// # Errors
    /// Returns `ParseError` on an invalid facet or pattern.
    pub fn start(&mut self, name: &str, attrs: &Attrs) -> Result<(), ParseError> {
        let (prefix, local) = split_qname(name);
        let Some(construct) = Construct::from_local_name(local) else {
            tracing::trace!("skipping <{}>", name);
            return Ok(());
        };

        match construct {
            Construct::Schema => {
                self.xsd_prefix = prefix.map(str::to_string);
                Ok(())
            }
            Construct::Element => self.on_element(attrs),
            Construct::Attribute => {
                self.on_attribute(attrs);
                Ok(())
            }
            Construct::SimpleType => {
                self.on_simple_type(attrs);
                Ok(())
            }
            Construct::ComplexType => {
                self.on_complex_type(attrs);
                Ok(())
            }
            Construct::Group => self.on_group(attrs),
            Construct::AttributeGroup => {
                self.on_attribute_group(attrs);
                Ok(())
            }
            Construct::Sequence => self.on_particle("sequence", attrs, false),
            Construct::All => self.on_particle("all", attrs, false),
            Construct::Choice => self.on_particle("choice", attrs, true),
            Construct::Restriction => {
                self.on_restriction(attrs);
                Ok(())
            }
            Construct::Extension => {
                self.on_extension(attrs);
                Ok(())
            }
            Construct::List => {
                self.on_list(attrs);
                Ok(())
            }
            Construct::Union => self.on_union(attrs),
            Construct::Enumeration => {
                self.on_enumeration(attrs);
                Ok(())
            }
            Construct::MinInclusive => {
                self.on_bound("minInclusive", attrs, |r, v| r.min_inclusive = Some(v))
            }
            Construct::MaxInclusive => {
                self.on_bound("maxInclusive", attrs, |r, v| r.max_inclusive = Some(v))
            }
            Construct::MinLength => {
                self.on_length("minLength", attrs, |r, v| r.min_length = Some(v))
            }
            Construct::MaxLength => {
                self.on_length("maxLength", attrs, |r, v| r.max_length = Some(v))
            }
            Construct::Length => self.on_length("length", attrs, |r, v| {
                r.min_length = Some(v);
                r.max_length = Some(v);
            }),
            Construct::Pattern => self.on_pattern(attrs),
            Construct::Documentation => {
                self.doc = Some(String::new());
                Ok(())
            }
        }
    }

    /// Handles an end tag.
    ///
    /// # Errors
    /// Returns `ParseError` if finalizing a declaration hits a circular
    /// type reference.
    pub fn end(&mut self, name: &str) -> Result<(), ParseError> {
        let (_, local) = split_qname(name);
        let Some(construct) = Construct::from_local_name(local) else {
            return Ok(());
        };

        match construct {
            Construct::Element => self.end_element(),
            Construct::Attribute => self.end_attribute(),
            Construct::SimpleType => self.end_simple_type()?,
            Construct::ComplexType => self.end_complex_type(),
            Construct::Group => self.end_group(),
            Construct::AttributeGroup => self.end_attribute_group(),
            Construct::Sequence | Construct::Choice | Construct::All => {
                self.ctx.particles.pop();
            }
            Construct::List => {
                self.ctx.leave(Scope::List);
            }
            Construct::Union => {
                self.ctx.leave(Scope::Union);
            }
            Construct::MinInclusive
            | Construct::MaxInclusive
            | Construct::MinLength
            | Construct::MaxLength
            | Construct::Length
            | Construct::Pattern => self.end_facet()?,
            Construct::Documentation => self.end_documentation(),
            Construct::Schema
            | Construct::Restriction
            | Construct::Extension
            | Construct::Enumeration => {}
        }
        Ok(())
    }

    /// Handles character data.
    pub fn text(&mut self, text: &str) {
        if let Some(doc) = self.doc.as_mut() {
            if !doc.is_empty() {
                doc.push(' ');
            }
            doc.push_str(text.trim());
        }
    }

    /// Maps a type reference, translating XSD built-ins to primitive names.
    fn map_type(&self, value: &str) -> String {
        let (prefix, local) = split_qname(value);
        let is_xsd = match prefix {
            None => self.xsd_prefix.is_none(),
            Some(p) => self.xsd_prefix.as_deref() == Some(p) || p == "xs" || p == "xsd",
        };
        if is_xsd {
            if let Some(primitive) = XsdPrimitive::from_xsd_name(local) {
                return (self.options.primitive_name)(primitive).to_string();
            }
        }
        value.to_string()
    }

    fn string_primitive(&self) -> String {
        (self.options.primitive_name)(XsdPrimitive::String).to_string()
    }

    fn push_decl(&mut self, decl: Declaration) {
        tracing::debug!("{} '{}' completed", decl.kind(), decl.name());
        self.tree.push(decl);
    }

    fn parse_facet<T: FromStr + Default>(&self, facet: &str, raw: &str) -> Result<T, ParseError> {
        match raw.trim().parse() {
            Ok(value) => Ok(value),
            Err(_) if self.options.lenient_facets => {
                tracing::debug!("malformed {} literal '{}' read as zero", facet, raw);
                Ok(T::default())
            }
            Err(_) => Err(ParseError::invalid_facet(facet, raw)),
        }
    }

    fn on_element(&mut self, attrs: &Attrs) -> Result<(), ParseError> {
        let particle = self.ctx.particle();
        let reference = attrs.get("ref");
        let mut element = Element::new(attrs.get("name").or(reference).unwrap_or_default(), "");
        if let Some(type_name) = attrs.get("type").or(reference) {
            element.type_name = self.map_type(type_name);
        }
        let (plural, optional) = occurs("element", attrs)?;
        element.plural = particle.plural || plural;
        element.optional = particle.optional || optional;

        self.ctx.elements.push(element);
        self.ctx.enter(Scope::Element);
        Ok(())
    }

    fn end_element(&mut self) {
        if self.ctx.leave(Scope::Element).is_none() {
            return;
        }
        let Some(element) = self.ctx.elements.pop() else {
            return;
        };

        match self.ctx.enclosing_declaration() {
            None => self.push_decl(Declaration::Element(element)),
            Some(Scope::ComplexType) => {
                if let Some(ct) = self.ctx.complex_types.peek_mut() {
                    ct.elements.push(element);
                }
            }
            Some(Scope::Group) => {
                if let Some(group) = self.ctx.groups.peek_mut() {
                    group.elements.push(element);
                }
            }
            Some(scope) => {
                tracing::warn!("element '{}' dropped inside {:?}", element.name, scope);
            }
        }
    }

    fn on_attribute(&mut self, attrs: &Attrs) {
        let reference = attrs.get("ref");
        let mut attribute =
            Attribute::new(attrs.get("name").or(reference).unwrap_or_default(), "");
        if let Some(type_name) = attrs.get("type").or(reference) {
            attribute.type_name = self.map_type(type_name);
        }
        attribute.optional = attrs.get("use") != Some("required");

        self.ctx.attributes.push(attribute);
        self.ctx.enter(Scope::Attribute);
    }

    fn end_attribute(&mut self) {
        if self.ctx.leave(Scope::Attribute).is_none() {
            return;
        }
        let Some(mut attribute) = self.ctx.attributes.pop() else {
            return;
        };
        if attribute.type_name.is_empty() {
            attribute.type_name = self.string_primitive();
        }

        match self.ctx.enclosing_declaration() {
            None => self.push_decl(Declaration::Attribute(attribute)),
            Some(Scope::ComplexType) => {
                if let Some(ct) = self.ctx.complex_types.peek_mut() {
                    ct.attributes.push(attribute);
                }
            }
            Some(Scope::AttributeGroup) => {
                if let Some(group) = self.ctx.attribute_groups.peek_mut() {
                    group.attributes.push(attribute);
                }
            }
            Some(scope) => {
                tracing::warn!("attribute '{}' dropped inside {:?}", attribute.name, scope);
            }
        }
    }

    fn on_complex_type(&mut self, attrs: &Attrs) {
        let name = match attrs.get("name") {
            Some(name) => name.to_string(),
            None => match self.ctx.enclosing_declaration() {
                Some(Scope::Element) => self.ctx.owner_name().unwrap_or_default(),
                _ => String::new(),
            },
        };
        self.ctx.complex_types.push(ComplexType::new(name));
        self.ctx.enter(Scope::ComplexType);
        self.ctx.particles.push(Particle::default());
    }

    fn end_complex_type(&mut self) {
        if self.ctx.leave(Scope::ComplexType).is_none() {
            return;
        }
        self.ctx.particles.pop();
        let Some(ct) = self.ctx.complex_types.pop() else {
            return;
        };

        if self.ctx.enclosing_declaration() == Some(Scope::Element) {
            if let Some(element) = self.ctx.elements.peek_mut() {
                if element.type_name.is_empty() {
                    element.type_name = ct.name.clone();
                }
            }
        }
        self.push_decl(Declaration::ComplexType(ct));
    }

    fn on_simple_type(&mut self, attrs: &Attrs) {
        let name = match attrs.get("name") {
            Some(name) => name.to_string(),
            None => self.anonymous_simple_type_name(),
        };
        self.ctx.simple_types.push(SimpleType::new(name));
        self.ctx.enter(Scope::SimpleType { consumed: false });
    }

    fn anonymous_simple_type_name(&self) -> String {
        let parent = || self.ctx.simple_types.peek().map(|st| st.name.as_str());
        match self.ctx.current() {
            Some(Scope::Union) => {
                let members = self
                    .ctx
                    .simple_types
                    .peek()
                    .map_or(0, |st| st.member_types.len());
                format!("{}Member{}", parent().unwrap_or_default(), members + 1)
            }
            Some(Scope::List) => format!("{}Item", parent().unwrap_or_default()),
            Some(Scope::Element | Scope::Attribute) => self.ctx.owner_name().unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn end_simple_type(&mut self) -> Result<(), ParseError> {
        let Some(scope) = self.ctx.leave(Scope::SimpleType { consumed: false }) else {
            return Ok(());
        };
        if scope == (Scope::SimpleType { consumed: true }) {
            return Ok(());
        }
        let Some(st) = self.ctx.simple_types.pop() else {
            return Ok(());
        };

        match self.ctx.current() {
            Some(Scope::Union) => {
                let (member, type_name, facets) = self.settle_anonymous(st)?;
                if let Some(union) = self.ctx.simple_types.peek_mut() {
                    union.member_types.insert(member.clone(), type_name);
                    union.member_restrictions.insert(member, facets);
                }
            }
            Some(Scope::List) => {
                let (_, type_name, facets) = self.settle_anonymous(st)?;
                if let Some(list) = self.ctx.simple_types.peek_mut() {
                    list.base = type_name;
                    list.restriction.inherit(&facets);
                }
            }
            Some(owner @ (Scope::Element | Scope::Attribute)) => {
                if st.is_plain_restriction() {
                    let resolved = TypeResolver::new(&self.tree).resolve(&st.base)?;
                    let facets = resolved.facets_under(&st.restriction);
                    self.assign_owner_type(owner, resolved.name, &facets);
                } else {
                    let name = st.name.clone();
                    self.push_decl(Declaration::SimpleType(st));
                    self.assign_owner_type(owner, name, &Restriction::new());
                }
            }
            _ => self.push_decl(Declaration::SimpleType(st)),
        }
        Ok(())
    }

    /// Settles an anonymous nested simple type.
    ///
    /// Plain restrictions collapse to their resolved base and keep their
    /// facets; anything else is promoted to a named top-level declaration.
    /// Returns the generated name, the type name to reference and the
    /// facets the reference carries.
    fn settle_anonymous(
        &mut self,
        st: SimpleType,
    ) -> Result<(String, String, Restriction), ParseError> {
        if st.is_plain_restriction() {
            let resolved = TypeResolver::new(&self.tree).resolve(&st.base)?;
            let facets = resolved.facets_under(&st.restriction);
            Ok((st.name, resolved.name, facets))
        } else {
            let name = st.name.clone();
            self.push_decl(Declaration::SimpleType(st));
            Ok((name.clone(), name, Restriction::new()))
        }
    }

    fn assign_owner_type(&mut self, owner: Scope, type_name: String, facets: &Restriction) {
        match owner {
            Scope::Element => {
                if let Some(element) = self.ctx.elements.peek_mut() {
                    element.type_name = type_name;
                    element.restriction.inherit(facets);
                }
            }
            Scope::Attribute => {
                if let Some(attribute) = self.ctx.attributes.peek_mut() {
                    attribute.type_name = type_name;
                    attribute.restriction.inherit(facets);
                }
            }
            _ => {}
        }
    }

    fn on_group(&mut self, attrs: &Attrs) -> Result<(), ParseError> {
        let group = match attrs.get("ref") {
            Some(reference) => {
                let particle = self.ctx.particle();
                let (plural, optional) = occurs("group", attrs)?;
                let mut group = Group::reference(reference);
                group.plural = particle.plural || plural;
                group.optional = particle.optional || optional;
                group
            }
            None => Group::new(attrs.get("name").unwrap_or_default()),
        };
        self.ctx.groups.push(group);
        self.ctx.enter(Scope::Group);
        self.ctx.particles.push(Particle::default());
        Ok(())
    }

    fn end_group(&mut self) {
        if self.ctx.leave(Scope::Group).is_none() {
            return;
        }
        self.ctx.particles.pop();
        let Some(group) = self.ctx.groups.pop() else {
            return;
        };

        if !group.is_reference() {
            self.push_decl(Declaration::Group(group));
            return;
        }
        match self.ctx.enclosing_declaration() {
            Some(Scope::ComplexType) => {
                if let Some(ct) = self.ctx.complex_types.peek_mut() {
                    ct.groups.push(group);
                }
            }
            Some(Scope::Group) => {
                if let Some(parent) = self.ctx.groups.peek_mut() {
                    parent.groups.push(group);
                }
            }
            _ => tracing::warn!("group reference '{}' has no owner", group.name),
        }
    }

    fn on_attribute_group(&mut self, attrs: &Attrs) {
        let group = match attrs.get("ref") {
            Some(reference) => AttributeGroup::reference(reference),
            None => AttributeGroup::new(attrs.get("name").unwrap_or_default()),
        };
        self.ctx.attribute_groups.push(group);
        self.ctx.enter(Scope::AttributeGroup);
    }

    fn end_attribute_group(&mut self) {
        if self.ctx.leave(Scope::AttributeGroup).is_none() {
            return;
        }
        let Some(group) = self.ctx.attribute_groups.pop() else {
            return;
        };

        if !group.is_reference() {
            self.push_decl(Declaration::AttributeGroup(group));
            return;
        }
        match self.ctx.enclosing_declaration() {
            Some(Scope::ComplexType) => {
                if let Some(ct) = self.ctx.complex_types.peek_mut() {
                    ct.attribute_groups.push(group);
                }
            }
            Some(Scope::AttributeGroup) => {
                if let Some(parent) = self.ctx.attribute_groups.peek_mut() {
                    parent.attribute_groups.push(group);
                }
            }
            _ => tracing::warn!("attribute group reference '{}' has no owner", group.name),
        }
    }

    fn on_particle(&mut self, kind: &str, attrs: &Attrs, choice: bool) -> Result<(), ParseError> {
        let parent = self.ctx.particle();
        let (plural, optional) = occurs(kind, attrs)?;
        self.ctx.particles.push(Particle {
            plural: parent.plural || plural,
            optional: parent.optional || choice || optional,
        });
        Ok(())
    }

    fn on_restriction(&mut self, attrs: &Attrs) {
        let Some(base) = attrs.get("base") else {
            return;
        };
        let base = self.map_type(base);
        match self.ctx.enclosing_declaration() {
            Some(Scope::SimpleType { consumed: false }) => {
                if let Some(st) = self.ctx.simple_types.peek_mut() {
                    st.base = base;
                }
            }
            Some(Scope::ComplexType) => {
                if let Some(ct) = self.ctx.complex_types.peek_mut() {
                    ct.base = Some(base);
                }
            }
            _ => {}
        }
    }

    fn on_extension(&mut self, attrs: &Attrs) {
        let Some(base) = attrs.get("base") else {
            return;
        };
        let base = self.map_type(base);
        if self.ctx.enclosing_declaration() == Some(Scope::ComplexType) {
            if let Some(ct) = self.ctx.complex_types.peek_mut() {
                ct.base = Some(base);
            }
        }
    }

    fn on_list(&mut self, attrs: &Attrs) {
        let item_type = attrs.get("itemType").map(|t| self.map_type(t));
        if self.ctx.live_simple_type() {
            if let Some(st) = self.ctx.simple_types.peek_mut() {
                st.list = true;
                if let Some(item_type) = item_type {
                    st.base = item_type;
                }
            }
        }
        self.ctx.enter(Scope::List);
    }

    fn on_union(&mut self, attrs: &Attrs) -> Result<(), ParseError> {
        let mut members = Vec::new();
        for member in attrs.get("memberTypes").unwrap_or_default().split_whitespace() {
            let mapped = self.map_type(member);
            let type_name = if mapped != member {
                mapped
            } else {
                let resolver = TypeResolver::new(&self.tree);
                if resolver.lookup(member).is_some() {
                    resolver.resolve_name(member)?
                } else {
                    String::new()
                }
            };
            members.push((strip_ns_prefix(member).to_string(), type_name));
        }

        if self.ctx.live_simple_type() {
            if let Some(st) = self.ctx.simple_types.peek_mut() {
                st.union = true;
                st.member_types.extend(members);
            }
        }
        self.ctx.enter(Scope::Union);
        Ok(())
    }

    fn on_enumeration(&mut self, attrs: &Attrs) {
        let Some(value) = attrs.get("value") else {
            return;
        };
        if self.ctx.enclosing_declaration() == Some(Scope::SimpleType { consumed: true }) {
            self.reopen_simple_type();
        }
        match self.ctx.facet_target() {
            Some(target) => target.enumerations.push(value.to_string()),
            None => tracing::debug!("enumeration '{}' outside any declaration ignored", value),
        }
    }

    /// Takes back an anonymous simple type that an earlier facet handed to
    /// its owner.
    ///
    /// The owner's type and facets move back into a simple type of the same
    /// name, which then closes as a named declaration like any other
    /// enumeration.
    fn reopen_simple_type(&mut self) {
        let taken = match self.ctx.innermost_field() {
            Some(Scope::Element) => self.ctx.elements.peek_mut().map(|e| {
                (
                    e.name.clone(),
                    std::mem::take(&mut e.type_name),
                    std::mem::take(&mut e.restriction),
                )
            }),
            Some(_) => self.ctx.attributes.peek_mut().map(|a| {
                (
                    a.name.clone(),
                    std::mem::take(&mut a.type_name),
                    std::mem::take(&mut a.restriction),
                )
            }),
            None => None,
        };
        let Some((name, base, restriction)) = taken else {
            return;
        };

        tracing::debug!("'{}' reopened by an enumeration", name);
        let mut st = SimpleType::new(name);
        st.base = base;
        st.restriction = restriction;
        self.ctx.simple_types.push(st);
        self.ctx.reopen_simple_type();
    }

    fn on_bound(
        &mut self,
        facet: &str,
        attrs: &Attrs,
        apply: fn(&mut Restriction, f64),
    ) -> Result<(), ParseError> {
        let Some(raw) = attrs.get("value") else {
            return Ok(());
        };
        if self.ctx.facet_target().is_none() {
            tracing::debug!("{} outside any declaration ignored", facet);
            return Ok(());
        }
        let value = self.parse_facet::<f64>(facet, raw)?;
        if let Some(target) = self.ctx.facet_target() {
            apply(target, value);
        }
        Ok(())
    }

    fn on_length(
        &mut self,
        facet: &str,
        attrs: &Attrs,
        apply: fn(&mut Restriction, usize),
    ) -> Result<(), ParseError> {
        let Some(raw) = attrs.get("value") else {
            return Ok(());
        };
        if self.ctx.facet_target().is_none() {
            tracing::debug!("{} outside any declaration ignored", facet);
            return Ok(());
        }
        let value = self.parse_facet::<usize>(facet, raw)?;
        if let Some(target) = self.ctx.facet_target() {
            apply(target, value);
        }
        Ok(())
    }

    fn on_pattern(&mut self, attrs: &Attrs) -> Result<(), ParseError> {
        let Some(raw) = attrs.get("value") else {
            return Ok(());
        };
        let declaration = if self.ctx.live_simple_type() {
            self.ctx
                .simple_types
                .peek()
                .map(|st| st.name.clone())
                .unwrap_or_default()
        } else {
            self.ctx.owner_name().unwrap_or_default()
        };
        let Some(target) = self.ctx.facet_target() else {
            tracing::debug!("pattern outside any declaration ignored");
            return Ok(());
        };

        let compiled = match &target.pattern {
            Some(existing) => existing.alternate(raw),
            None => Pattern::new(raw),
        }
        .map_err(|source| ParseError::InvalidPattern {
            declaration,
            pattern: raw.to_string(),
            source,
        })?;
        target.pattern = Some(compiled);
        Ok(())
    }

    /// Finalizes a facet.
    ///
    /// A facet closing inside an anonymous simple type that belongs to an
    /// element or attribute hands the type over to its owner: the simple
    /// type is popped, its base resolved and assigned as the owner's type,
    /// and its facets moved onto the owner. Later facets of the same type
    /// then land on the owner directly.
    fn end_facet(&mut self) -> Result<(), ParseError> {
        if !self.ctx.live_simple_type() {
            return Ok(());
        }
        let Some(owner) = self.ctx.simple_type_owner() else {
            return Ok(());
        };
        if !self
            .ctx
            .simple_types
            .peek()
            .is_some_and(SimpleType::is_plain_restriction)
        {
            return Ok(());
        }
        let Some(st) = self.ctx.simple_types.pop() else {
            return Ok(());
        };
        self.ctx.consume_simple_type();
        if let (Some(doc), Some(slot)) = (st.doc.clone(), self.owner_doc()) {
            append_doc(slot, doc);
        }

        let resolved = TypeResolver::new(&self.tree).resolve(&st.base)?;
        let facets = resolved.facets_under(&st.restriction);
        tracing::debug!("'{}' takes type '{}' from its facets", st.name, resolved.name);
        self.assign_owner_type(owner, resolved.name, &facets);
        Ok(())
    }

    fn end_documentation(&mut self) {
        let Some(doc) = self.doc.take() else {
            return;
        };
        let doc = doc.trim().to_string();
        if doc.is_empty() {
            return;
        }

        let slot = match self.ctx.enclosing_declaration() {
            Some(Scope::SimpleType { consumed: false }) => {
                self.ctx.simple_types.peek_mut().map(|v| &mut v.doc)
            }
            Some(Scope::SimpleType { consumed: true } | Scope::Element | Scope::Attribute) => {
                self.owner_doc()
            }
            Some(Scope::ComplexType) => self.ctx.complex_types.peek_mut().map(|v| &mut v.doc),
            Some(Scope::Group) => self.ctx.groups.peek_mut().map(|v| &mut v.doc),
            Some(Scope::AttributeGroup) => {
                self.ctx.attribute_groups.peek_mut().map(|v| &mut v.doc)
            }
            Some(Scope::List | Scope::Union) | None => None,
        };
        if let Some(slot) = slot {
            append_doc(slot, doc);
        }
    }

    /// Returns the doc slot of the innermost element or attribute.
    fn owner_doc(&mut self) -> Option<&mut Option<String>> {
        match self.ctx.innermost_field()? {
            Scope::Element => self.ctx.elements.peek_mut().map(|v| &mut v.doc),
            _ => self.ctx.attributes.peek_mut().map(|v| &mut v.doc),
        }
    }
}

fn append_doc(slot: &mut Option<String>, doc: String) {
    match slot {
        Some(existing) => {
            existing.push('\n');
            existing.push_str(&doc);
        }
        None => *slot = Some(doc),
    }
}

/// Parses an XSD document with default options.
///
/// # Arguments
/// * `xml` - XSD document content
///
/// # Returns
/// The ordered tree of top-level declarations.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed, a facet literal or pattern
/// is invalid, or a type chain is circular.
pub fn parse_schema(xml: &str) -> Result<ProtoTree, ParseError> {
    SchemaReader::new().read(xml)
}

/// Parses an XSD document with the given options.
///
/// # Errors
/// Returns `ParseError` under the same conditions as [`parse_schema`].
pub fn parse_schema_with(xml: &str, options: ReaderOptions) -> Result<ProtoTree, ParseError> {
    SchemaReader::with_options(options).read(xml)
}

/// Reads and parses an XSD file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or fails to parse.
pub fn parse_schema_file(path: &Path) -> Result<ProtoTree, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_schema(&xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::DeclKind;

    fn schema(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:tns="urn:test" targetNamespace="urn:test">
{body}
</xs:schema>"#
        )
    }

    fn parse(body: &str) -> ProtoTree {
        parse_schema(&schema(body)).expect("Failed to parse schema")
    }

    #[test]
    fn test_construct_lookup() {
        assert_eq!(Construct::from_local_name("minInclusive"), Some(Construct::MinInclusive));
        assert_eq!(Construct::from_local_name("simpleType"), Some(Construct::SimpleType));
        assert_eq!(Construct::from_local_name("annotation"), None);
    }

    #[test]
    fn test_parse_restricted_simple_type() {
        let tree = parse(
            r#"<xs:simpleType name="Percent">
    <xs:annotation><xs:documentation>A share of a whole.</xs:documentation></xs:annotation>
    <xs:restriction base="xs:int">
        <xs:minInclusive value="0"/>
        <xs:maxInclusive value="100"/>
    </xs:restriction>
</xs:simpleType>"#,
        );

        let st = tree.simple_type("Percent").expect("declared");
        assert_eq!(st.base, "i32");
        assert_eq!(st.restriction.min_inclusive, Some(0.0));
        assert_eq!(st.restriction.max_inclusive, Some(100.0));
        assert_eq!(st.doc.as_deref(), Some("A share of a whole."));
        assert!(st.is_plain_restriction());
    }

    #[test]
    fn test_parse_enumeration() {
        let tree = parse(
            r#"<xs:simpleType name="Side">
    <xs:restriction base="xs:string">
        <xs:enumeration value="Buy"/>
        <xs:enumeration value="Sell"/>
    </xs:restriction>
</xs:simpleType>"#,
        );
        let st = tree.simple_type("Side").expect("declared");
        assert_eq!(st.base, "String");
        assert_eq!(st.restriction.enumerations, vec!["Buy", "Sell"]);
    }

    #[test]
    fn test_parse_list_and_union() {
        let tree = parse(
            r#"<xs:simpleType name="Sizes">
    <xs:list itemType="xs:unsignedInt"/>
</xs:simpleType>
<xs:simpleType name="SizeOrCode">
    <xs:union memberTypes="xs:int tns:Code"/>
</xs:simpleType>
<xs:simpleType name="Code">
    <xs:restriction base="xs:string"/>
</xs:simpleType>"#,
        );

        let sizes = tree.simple_type("Sizes").expect("declared");
        assert!(sizes.list);
        assert_eq!(sizes.base, "u32");

        let union = tree.simple_type("SizeOrCode").expect("declared");
        assert!(union.has_members());
        let members: Vec<_> = union
            .member_types
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(members, vec![("int", "i32"), ("Code", "")]);
    }

    #[test]
    fn test_union_member_resolved_when_known() {
        let tree = parse(
            r#"<xs:simpleType name="Code">
    <xs:restriction base="xs:string"/>
</xs:simpleType>
<xs:simpleType name="AnyCode">
    <xs:union memberTypes="tns:Code"/>
</xs:simpleType>"#,
        );
        let union = tree.simple_type("AnyCode").expect("declared");
        assert_eq!(union.member_types.get("Code").map(String::as_str), Some("String"));
    }

    #[test]
    fn test_anonymous_union_members_stay_distinct() {
        let tree = parse(
            r#"<xs:simpleType name="Small">
    <xs:union>
        <xs:simpleType><xs:restriction base="xs:int"><xs:maxInclusive value="10"/></xs:restriction></xs:simpleType>
        <xs:simpleType><xs:restriction base="xs:string"><xs:maxLength value="2"/></xs:restriction></xs:simpleType>
        <xs:simpleType><xs:restriction base="xs:string"><xs:pattern value="[a-z]+"/></xs:restriction></xs:simpleType>
    </xs:union>
</xs:simpleType>"#,
        );

        assert_eq!(tree.len(), 1);
        let union = tree.simple_type("Small").expect("declared");
        let members: Vec<_> = union
            .member_types
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            members,
            vec![
                ("SmallMember1", "i32"),
                ("SmallMember2", "String"),
                ("SmallMember3", "String"),
            ]
        );
        let facets = &union.member_restrictions;
        assert_eq!(facets["SmallMember1"].max_inclusive, Some(10.0));
        assert_eq!(facets["SmallMember2"].max_length, Some(2));
        assert!(facets["SmallMember3"].pattern.is_some());
    }

    #[test]
    fn test_anonymous_list_item_facets_kept() {
        let tree = parse(
            r#"<xs:simpleType name="Codes">
    <xs:list>
        <xs:simpleType><xs:restriction base="xs:string"><xs:maxLength value="3"/></xs:restriction></xs:simpleType>
    </xs:list>
</xs:simpleType>"#,
        );

        let codes = tree.simple_type("Codes").expect("declared");
        assert!(codes.list);
        assert_eq!(codes.base, "String");
        assert_eq!(codes.restriction.max_length, Some(3));
    }

    #[test]
    fn test_parse_complex_type_with_particles() {
        let tree = parse(
            r#"<xs:complexType name="Order">
    <xs:sequence>
        <xs:element name="id" type="xs:long"/>
        <xs:element name="note" type="xs:string" minOccurs="0"/>
        <xs:element name="line" type="tns:Line" maxOccurs="unbounded"/>
        <xs:choice>
            <xs:element name="email" type="xs:string"/>
            <xs:element name="phone" type="xs:string"/>
        </xs:choice>
    </xs:sequence>
    <xs:attribute name="currency" type="xs:string" use="required"/>
    <xs:attribute name="channel"/>
    <xs:attributeGroup ref="tns:audit"/>
    <xs:group ref="tns:extras" maxOccurs="unbounded"/>
</xs:complexType>"#,
        );

        let ct = tree.complex_type("Order").expect("declared");
        let names: Vec<_> = ct.elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["id", "note", "line", "email", "phone"]);
        assert!(!ct.elements[0].optional && !ct.elements[0].plural);
        assert!(ct.elements[1].optional);
        assert!(ct.elements[2].plural);
        assert_eq!(ct.elements[2].type_name, "tns:Line");
        assert!(ct.elements[3].optional && ct.elements[4].optional);

        assert!(!ct.attributes[0].optional);
        assert!(ct.attributes[1].optional);
        assert_eq!(ct.attributes[1].type_name, "String");

        assert_eq!(ct.attribute_groups.len(), 1);
        assert_eq!(ct.attribute_groups[0].target(), "tns:audit");
        assert_eq!(ct.groups.len(), 1);
        assert!(ct.groups[0].plural);
    }

    #[test]
    fn test_anonymous_complex_type_named_after_element() {
        let tree = parse(
            r#"<xs:element name="invoice">
    <xs:complexType>
        <xs:sequence>
            <xs:element name="total" type="xs:decimal"/>
        </xs:sequence>
    </xs:complexType>
</xs:element>"#,
        );

        let kinds: Vec<_> = tree.iter().map(|d| (d.kind(), d.name())).collect();
        assert_eq!(
            kinds,
            vec![(DeclKind::ComplexType, "invoice"), (DeclKind::Element, "invoice")]
        );
        match tree.iter().nth(1) {
            Some(Declaration::Element(e)) => assert_eq!(e.type_name, "invoice"),
            other => panic!("unexpected declaration: {other:?}"),
        }
    }

    #[test]
    fn test_facet_end_assigns_element_type() {
        let tree = parse(
            r#"<xs:element name="age">
    <xs:simpleType>
        <xs:restriction base="xs:int">
            <xs:minInclusive value="5"/>
            <xs:maxInclusive value="10"/>
        </xs:restriction>
    </xs:simpleType>
</xs:element>"#,
        );

        assert_eq!(tree.len(), 1);
        match tree.iter().next() {
            Some(Declaration::Element(e)) => {
                assert_eq!(e.type_name, "i32");
                assert_eq!(e.restriction.min_inclusive, Some(5.0));
                assert_eq!(e.restriction.max_inclusive, Some(10.0));
            }
            other => panic!("unexpected declaration: {other:?}"),
        }
    }

    #[test]
    fn test_nested_anonymous_length_restriction() {
        let tree = parse(
            r#"<xs:complexType name="Customer">
    <xs:sequence>
        <xs:element name="code">
            <xs:simpleType>
                <xs:restriction base="xs:string">
                    <xs:minLength value="3"/>
                    <xs:pattern value="[A-Z]+"/>
                </xs:restriction>
            </xs:simpleType>
        </xs:element>
    </xs:sequence>
</xs:complexType>"#,
        );

        let ct = tree.complex_type("Customer").expect("declared");
        let code = &ct.elements[0];
        assert_eq!(code.type_name, "String");
        assert_eq!(code.restriction.min_length, Some(3));
        let pattern = code.restriction.pattern.as_ref().expect("pattern kept");
        assert!(pattern.is_match("ABC"));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_anonymous_enumeration_promoted() {
        let tree = parse(
            r#"<xs:element name="status">
    <xs:simpleType>
        <xs:restriction base="xs:string">
            <xs:enumeration value="open"/>
            <xs:enumeration value="closed"/>
        </xs:restriction>
    </xs:simpleType>
</xs:element>"#,
        );

        let kinds: Vec<_> = tree.iter().map(Declaration::kind).collect();
        assert_eq!(kinds, vec![DeclKind::SimpleType, DeclKind::Element]);
        match tree.iter().nth(1) {
            Some(Declaration::Element(e)) => assert_eq!(e.type_name, "status"),
            other => panic!("unexpected declaration: {other:?}"),
        }
    }

    #[test]
    fn test_enumeration_after_length_facet_promoted() {
        let tree = parse(
            r#"<xs:complexType name="Order">
    <xs:sequence>
        <xs:element name="status">
            <xs:simpleType>
                <xs:restriction base="xs:string">
                    <xs:maxLength value="6"/>
                    <xs:enumeration value="open"/>
                    <xs:enumeration value="closed"/>
                </xs:restriction>
            </xs:simpleType>
        </xs:element>
    </xs:sequence>
</xs:complexType>"#,
        );

        let st = tree.simple_type("status").expect("promoted");
        assert_eq!(st.base, "String");
        assert_eq!(st.restriction.enumerations, vec!["open", "closed"]);
        assert_eq!(st.restriction.max_length, Some(6));
        assert!(!st.is_plain_restriction());

        let status = &tree.complex_type("Order").expect("declared").elements[0];
        assert_eq!(status.type_name, "status");
        assert!(status.restriction.max_length.is_none());
        assert!(status.restriction.enumerations.is_empty());
    }

    #[test]
    fn test_attribute_enumeration_after_pattern_promoted() {
        let tree = parse(
            r#"<xs:attribute name="grade">
    <xs:simpleType>
        <xs:restriction base="xs:string">
            <xs:pattern value="[A-C]"/>
            <xs:enumeration value="A"/>
            <xs:enumeration value="B"/>
        </xs:restriction>
    </xs:simpleType>
</xs:attribute>"#,
        );

        let kinds: Vec<_> = tree.iter().map(Declaration::kind).collect();
        assert_eq!(kinds, vec![DeclKind::SimpleType, DeclKind::Attribute]);
        let st = tree.simple_type("grade").expect("promoted");
        assert_eq!(st.restriction.enumerations, vec!["A", "B"]);
        match tree.iter().nth(1) {
            Some(Declaration::Attribute(a)) => assert_eq!(a.type_name, "grade"),
            other => panic!("unexpected declaration: {other:?}"),
        }
    }

    #[test]
    fn test_inline_type_docs_reach_attribute() {
        let tree = parse(
            r#"<xs:element name="item">
    <xs:complexType>
        <xs:attribute name="code">
            <xs:simpleType>
                <xs:restriction base="xs:string">
                    <xs:minLength value="2"/>
                    <xs:maxLength value="4">
                        <xs:annotation><xs:documentation>Short code.</xs:documentation></xs:annotation>
                    </xs:maxLength>
                </xs:restriction>
            </xs:simpleType>
        </xs:attribute>
    </xs:complexType>
</xs:element>"#,
        );

        let item = tree.complex_type("item").expect("declared");
        let code = &item.attributes[0];
        assert_eq!(code.doc.as_deref(), Some("Short code."));
        assert_eq!(code.restriction.max_length, Some(4));
        match tree.iter().last() {
            Some(Declaration::Element(e)) => assert!(e.doc.is_none()),
            other => panic!("unexpected declaration: {other:?}"),
        }
    }

    #[test]
    fn test_extension_sets_complex_base() {
        let tree = parse(
            r#"<xs:complexType name="Price">
    <xs:simpleContent>
        <xs:extension base="xs:decimal">
            <xs:attribute name="currency" type="xs:string"/>
        </xs:extension>
    </xs:simpleContent>
</xs:complexType>
<xs:complexType name="Manager">
    <xs:complexContent>
        <xs:extension base="tns:Employee">
            <xs:sequence><xs:element name="reports" type="xs:int"/></xs:sequence>
        </xs:extension>
    </xs:complexContent>
</xs:complexType>"#,
        );

        let price = tree.complex_type("Price").expect("declared");
        assert_eq!(price.base(), Some("f64"));
        assert_eq!(price.attributes.len(), 1);

        let manager = tree.complex_type("Manager").expect("declared");
        assert_eq!(manager.base(), Some("tns:Employee"));
        assert_eq!(manager.elements[0].name, "reports");
    }

    #[test]
    fn test_group_and_attribute_group_definitions() {
        let tree = parse(
            r#"<xs:group name="extras">
    <xs:sequence>
        <xs:element name="tag" type="xs:string" maxOccurs="unbounded"/>
        <xs:group ref="tns:more"/>
    </xs:sequence>
</xs:group>
<xs:attributeGroup name="audit">
    <xs:attribute name="createdBy" type="xs:string"/>
    <xs:attributeGroup ref="tns:stamp"/>
</xs:attributeGroup>"#,
        );

        let kinds: Vec<_> = tree.iter().map(Declaration::kind).collect();
        assert_eq!(kinds, vec![DeclKind::Group, DeclKind::AttributeGroup]);
        match tree.iter().next() {
            Some(Declaration::Group(g)) => {
                assert_eq!(g.elements.len(), 1);
                assert!(g.elements[0].plural);
                assert_eq!(g.groups.len(), 1);
            }
            other => panic!("unexpected declaration: {other:?}"),
        }
        match tree.iter().nth(1) {
            Some(Declaration::AttributeGroup(g)) => {
                assert_eq!(g.attributes.len(), 1);
                assert_eq!(g.attribute_groups.len(), 1);
            }
            other => panic!("unexpected declaration: {other:?}"),
        }
    }

    #[test]
    fn test_nested_complex_type_resets_particles() {
        let tree = parse(
            r#"<xs:complexType name="Outer">
    <xs:sequence maxOccurs="unbounded">
        <xs:element name="inner">
            <xs:complexType>
                <xs:sequence>
                    <xs:element name="leaf" type="xs:string"/>
                </xs:sequence>
            </xs:complexType>
        </xs:element>
    </xs:sequence>
</xs:complexType>"#,
        );

        let inner = tree.complex_type("inner").expect("declared");
        assert!(!inner.elements[0].plural);
        let outer = tree.complex_type("Outer").expect("declared");
        assert!(outer.elements[0].plural);
        assert_eq!(outer.elements[0].type_name, "inner");
    }

    #[test]
    fn test_invalid_pattern_aborts() {
        let result = parse_schema(&schema(
            r#"<xs:simpleType name="Broken">
    <xs:restriction base="xs:string"><xs:pattern value="[unclosed"/></xs:restriction>
</xs:simpleType>"#,
        ));
        match result {
            Err(ParseError::InvalidPattern { declaration, pattern, .. }) => {
                assert_eq!(declaration, "Broken");
                assert_eq!(pattern, "[unclosed");
            }
            other => panic!("expected invalid pattern, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_facet_strict_and_lenient() {
        let xml = schema(
            r#"<xs:simpleType name="Odd">
    <xs:restriction base="xs:int"><xs:minInclusive value="five"/></xs:restriction>
</xs:simpleType>"#,
        );

        assert!(matches!(
            parse_schema(&xml),
            Err(ParseError::InvalidFacet { .. })
        ));

        let tree = parse_schema_with(&xml, ReaderOptions::new().lenient_facets(true))
            .expect("lenient parse");
        let st = tree.simple_type("Odd").expect("declared");
        assert_eq!(st.restriction.min_inclusive, Some(0.0));
    }

    #[test]
    fn test_bad_occurs_rejected() {
        let result = parse_schema(&schema(
            r#"<xs:element name="item" type="xs:string" maxOccurs="many"/>"#,
        ));
        match result {
            Err(ParseError::InvalidAttribute { attribute, value, .. }) => {
                assert_eq!(attribute, "maxOccurs");
                assert_eq!(value, "many");
            }
            other => panic!("expected invalid attribute, got {other:?}"),
        }
    }

    #[test]
    fn test_orphan_facet_is_ignored() {
        let mut reader = SchemaReader::new();
        reader
            .start("xs:minInclusive", &Attrs::new().with("value", "1"))
            .expect("ignored");
        reader.end("xs:minInclusive").expect("ignored");
        assert!(reader.finish().is_empty());
    }

    #[test]
    fn test_event_api_without_markup() {
        let mut reader = SchemaReader::new();
        reader.start("schema", &Attrs::new()).expect("start");
        reader
            .start("simpleType", &Attrs::new().with("name", "Name"))
            .expect("start");
        reader
            .start("restriction", &Attrs::new().with("base", "string"))
            .expect("start");
        reader
            .start("maxLength", &Attrs::new().with("value", "32"))
            .expect("start");
        reader.end("maxLength").expect("end");
        reader.end("restriction").expect("end");
        reader.end("simpleType").expect("end");
        reader.end("schema").expect("end");

        let tree = reader.finish();
        let st = tree.simple_type("Name").expect("declared");
        assert_eq!(st.base, "String");
        assert_eq!(st.restriction.max_length, Some(32));
    }

    #[test]
    fn test_escaped_attribute_values() {
        let tree = parse(
            r#"<xs:simpleType name="Brand">
    <xs:restriction base="xs:string"><xs:enumeration value="A&amp;B"/></xs:restriction>
</xs:simpleType>"#,
        );
        let st = tree.simple_type("Brand").expect("declared");
        assert_eq!(st.restriction.enumerations, vec!["A&B"]);
    }

    #[test]
    fn test_parse_schema_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("simple.xsd");
        std::fs::write(
            &path,
            schema(r#"<xs:element name="greeting" type="xs:string"/>"#),
        )
        .expect("write schema");

        let tree = parse_schema_file(&path).expect("parse file");
        assert_eq!(tree.count(DeclKind::Element), 1);
    }
}
