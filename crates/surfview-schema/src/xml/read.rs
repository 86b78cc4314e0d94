//! Descriptor document reader.
//!
//! Pull-parses one `<Displays>` document into a [`DisplayDescriptor`] and
//! runs staged validation on the result. Attribute names are the wire
//! contract and must not drift.

use crate::{
    Error,
    error::MalformedDocumentError,
    node::{
        Arc, CommonField, Content, DisplayDescriptor, DisplayField, DisplayFieldList,
        DisplayFieldRef, DisplayVersion, FieldBody, FieldElement, FieldSource, HtmlLink,
        InsertValue, LinkProperty, Mapping, MappingColumn, SecureLink, SecureLinkValue, SqlView,
        SubQuery, ViewLink,
    },
    types::{DataType, ElementName, SortOrder},
};
use quick_xml::{
    Reader,
    escape::unescape,
    events::{BytesStart, Event},
};

/// Parse a descriptor document and validate the result.
pub fn load(source: &str) -> Result<DisplayDescriptor, Error> {
    let mut reader = DocReader::new(source);
    let descriptor = reader.read_document()?;

    crate::validate::validate_descriptor(&descriptor)
        .map_err(MalformedDocumentError::Validation)?;

    Ok(descriptor)
}

///
/// DocReader
///

struct DocReader<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> DocReader<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            reader: Reader::from_str(source),
        }
    }

    // Next structural event; prolog, comments, and inter-element
    // whitespace are skipped.
    fn next(&mut self) -> Result<Event<'a>, MalformedDocumentError> {
        loop {
            let event = self.reader.read_event().map_err(xml_err)?;
            match event {
                Event::Decl(_) | Event::DocType(_) | Event::Comment(_) | Event::PI(_) => {}
                Event::Text(t) if t.iter().all(u8::is_ascii_whitespace) => {}
                event => return Ok(event),
            }
        }
    }

    fn read_document(&mut self) -> Result<DisplayDescriptor, Error> {
        loop {
            match self.next()? {
                Event::Start(e) => {
                    if e.name().as_ref() == b"Displays" {
                        return self.read_displays(&e, false);
                    }
                    return Err(unexpected("document", &e).into());
                }
                Event::Empty(e) => {
                    if e.name().as_ref() == b"Displays" {
                        return self.read_displays(&e, true);
                    }
                    return Err(unexpected("document", &e).into());
                }
                Event::Eof => return Err(MalformedDocumentError::MissingRoot.into()),
                _ => {}
            }
        }
    }

    fn read_displays(
        &mut self,
        start: &BytesStart<'_>,
        empty: bool,
    ) -> Result<DisplayDescriptor, Error> {
        let attrs = Attrs::parse(start, "Displays")?;

        // Root identifier shape is its own failure class; everything else
        // on the root is ordinary structure.
        let element = ElementName::parse(&attrs.required("schema-element")?)
            .map_err(Error::SchemaMismatch)?;

        let mut descriptor = DisplayDescriptor {
            element,
            brief_description: attrs.required("brief-description")?,
            full_description: attrs.required("full-description")?,
            arcs: Vec::new(),
            fields: DisplayFieldList::default(),
            versions: Vec::new(),
            view_links: Vec::new(),
            sql_views: Vec::new(),
        };

        if empty {
            return Ok(descriptor);
        }

        loop {
            match self.next()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"Arc" => descriptor.arcs.push(self.read_arc(&e, false)?),
                    b"DisplayField" => {
                        descriptor.fields.fields.push(self.read_field(&e, false, false)?);
                    }
                    b"SubQueryField" => {
                        descriptor.fields.fields.push(self.read_field(&e, true, false)?);
                    }
                    b"DisplayVersion" => {
                        descriptor.versions.push(self.read_version(&e, false)?);
                    }
                    b"SQLView" => descriptor.sql_views.push(self.read_sql_view(&e, false)?),
                    b"ViewLink" => descriptor.view_links.push(self.read_view_link(&e)?),
                    _ => return Err(unexpected("Displays", &e).into()),
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"Arc" => descriptor.arcs.push(self.read_arc(&e, true)?),
                    b"DisplayField" => {
                        descriptor.fields.fields.push(self.read_field(&e, false, true)?);
                    }
                    b"SubQueryField" => {
                        descriptor.fields.fields.push(self.read_field(&e, true, true)?);
                    }
                    b"DisplayVersion" => {
                        descriptor.versions.push(self.read_version(&e, true)?);
                    }
                    b"SQLView" => descriptor.sql_views.push(self.read_sql_view(&e, true)?),
                    b"ViewLink" => {
                        return Err(MalformedDocumentError::MissingChild {
                            parent: "ViewLink",
                            element: "Mapping",
                        }
                        .into());
                    }
                    _ => return Err(unexpected("Displays", &e).into()),
                },
                Event::End(_) => break,
                Event::Eof => return Err(eof().into()),
                _ => {}
            }
        }

        Ok(descriptor)
    }

    fn read_arc(
        &mut self,
        start: &BytesStart<'_>,
        empty: bool,
    ) -> Result<Arc, MalformedDocumentError> {
        let attrs = Attrs::parse(start, "Arc")?;
        let name = attrs.required("name")?;
        let mut common_fields = Vec::new();

        if !empty {
            loop {
                match self.next()? {
                    Event::Empty(e) if e.name().as_ref() == b"CommonField" => {
                        common_fields.push(read_common_field(&e)?);
                    }
                    Event::Start(e) if e.name().as_ref() == b"CommonField" => {
                        common_fields.push(read_common_field(&e)?);
                        self.close_leaf("CommonField")?;
                    }
                    Event::End(_) => break,
                    event => return Err(unexpected_event("Arc", &event)),
                }
            }
        }

        Ok(Arc {
            name,
            common_fields,
        })
    }

    fn read_field(
        &mut self,
        start: &BytesStart<'_>,
        sub_query: bool,
        empty: bool,
    ) -> Result<DisplayField, MalformedDocumentError> {
        let element: &'static str = if sub_query {
            "SubQueryField"
        } else {
            "DisplayField"
        };
        let attrs = Attrs::parse(start, element)?;

        let id = attrs.required("id")?;
        let header = attrs.required("header")?;
        let visible = attrs.required_flag("visible")?;
        let searchable = attrs.required_flag("searchable")?;
        let data_type: Option<DataType> = attrs.parsed("data-type")?;
        let image = attrs.flag("image", false)?;

        let mut elements = Vec::new();
        let mut content: Option<Content> = None;
        let mut query: Option<String> = None;
        let mut mapping_columns: Option<Vec<MappingColumn>> = None;
        let mut html_link: Option<HtmlLink> = None;

        if !empty {
            loop {
                match self.next()? {
                    Event::Empty(e) => match e.name().as_ref() {
                        b"DisplayFieldElement" if !sub_query => {
                            elements.push(read_field_element(&e)?);
                        }
                        _ => return Err(unexpected(element, &e)),
                    },
                    Event::Start(e) => match e.name().as_ref() {
                        b"DisplayFieldElement" if !sub_query => {
                            elements.push(read_field_element(&e)?);
                            self.close_leaf("DisplayFieldElement")?;
                        }
                        b"Content" if !sub_query => {
                            if content.is_some() {
                                return Err(duplicate(element, "Content"));
                            }
                            let content_attrs = Attrs::parse(&e, "Content")?;
                            let content_type = content_attrs
                                .get("type")
                                .map_or_else(|| "sql".to_string(), str::to_string);
                            content = Some(Content {
                                content_type,
                                template: self.read_text("Content")?,
                            });
                        }
                        b"SubQuery" if sub_query => {
                            if query.is_some() {
                                return Err(duplicate(element, "SubQuery"));
                            }
                            query = Some(self.read_text("SubQuery")?);
                        }
                        b"MappingColumns" if sub_query => {
                            if mapping_columns.is_some() {
                                return Err(duplicate(element, "MappingColumns"));
                            }
                            mapping_columns = Some(self.read_mapping_columns("MappingColumns")?);
                        }
                        b"HTML-Link" => {
                            if html_link.is_some() {
                                return Err(duplicate(element, "HTML-Link"));
                            }
                            html_link = Some(self.read_html_link()?);
                        }
                        _ => return Err(unexpected(element, &e)),
                    },
                    Event::End(_) => break,
                    Event::Eof => return Err(eof()),
                    _ => {}
                }
            }
        }

        let body = if sub_query {
            FieldBody::SubQuery(SubQuery {
                query: query.ok_or(MalformedDocumentError::MissingChild {
                    parent: "SubQueryField",
                    element: "SubQuery",
                })?,
                mapping_columns: mapping_columns.ok_or(MalformedDocumentError::MissingChild {
                    parent: "SubQueryField",
                    element: "MappingColumns",
                })?,
            })
        } else {
            FieldBody::Standard { elements, content }
        };

        Ok(DisplayField {
            id,
            header,
            visible,
            searchable,
            data_type,
            image,
            body,
            html_link,
        })
    }

    fn read_html_link(&mut self) -> Result<HtmlLink, MalformedDocumentError> {
        let mut properties = Vec::new();
        let mut secure_link: Option<SecureLink> = None;

        loop {
            match self.next()? {
                Event::Empty(e) => match e.name().as_ref() {
                    b"Property" => properties.push(self.read_property(&e, true)?),
                    _ => return Err(unexpected("HTML-Link", &e)),
                },
                Event::Start(e) => match e.name().as_ref() {
                    b"Property" => properties.push(self.read_property(&e, false)?),
                    b"SecureLink" => {
                        if secure_link.is_some() {
                            return Err(duplicate("HTML-Link", "SecureLink"));
                        }
                        secure_link = Some(self.read_secure_link(&e)?);
                    }
                    _ => return Err(unexpected("HTML-Link", &e)),
                },
                Event::End(_) => break,
                Event::Eof => return Err(eof()),
                _ => {}
            }
        }

        Ok(HtmlLink {
            properties,
            secure_link,
        })
    }

    fn read_property(
        &mut self,
        start: &BytesStart<'_>,
        empty: bool,
    ) -> Result<LinkProperty, MalformedDocumentError> {
        let attrs = Attrs::parse(start, "Property")?;
        let name = attrs.required("name")?;
        let value = attrs.required("value")?;
        let mut insert_values = Vec::new();

        if !empty {
            loop {
                match self.next()? {
                    Event::Empty(e) if e.name().as_ref() == b"InsertValue" => {
                        insert_values.push(read_insert_value(&e)?);
                    }
                    Event::Start(e) if e.name().as_ref() == b"InsertValue" => {
                        insert_values.push(read_insert_value(&e)?);
                        self.close_leaf("InsertValue")?;
                    }
                    Event::End(_) => break,
                    event => return Err(unexpected_event("Property", &event)),
                }
            }
        }

        Ok(LinkProperty {
            name,
            value,
            insert_values,
        })
    }

    fn read_secure_link(
        &mut self,
        start: &BytesStart<'_>,
    ) -> Result<SecureLink, MalformedDocumentError> {
        let attrs = Attrs::parse(start, "SecureLink")?;
        let element_name = attrs
            .element_name("elementName")?
            .ok_or(MalformedDocumentError::MissingAttribute {
                element: "SecureLink",
                attribute: "elementName",
            })?;
        let mut values = Vec::new();

        loop {
            match self.next()? {
                Event::Empty(e) if e.name().as_ref() == b"securityMappingValue" => {
                    values.push(read_security_mapping_value(&e)?);
                }
                Event::Start(e) if e.name().as_ref() == b"securityMappingValue" => {
                    values.push(read_security_mapping_value(&e)?);
                    self.close_leaf("securityMappingValue")?;
                }
                Event::End(_) => break,
                event => return Err(unexpected_event("SecureLink", &event)),
            }
        }

        Ok(SecureLink {
            element_name,
            values,
        })
    }

    fn read_version(
        &mut self,
        start: &BytesStart<'_>,
        empty: bool,
    ) -> Result<DisplayVersion, MalformedDocumentError> {
        let attrs = Attrs::parse(start, "DisplayVersion")?;
        let name = attrs.required("versionName")?;
        let default_order_by = attrs.get("default-order-by").map(str::to_string);
        let default_sort_order: SortOrder =
            attrs.parsed("default-sort-order")?.unwrap_or_default();
        let brief_description = attrs.get("brief-description").map(str::to_string);
        let dark_color = attrs.get("dark-color").map(str::to_string);
        let light_color = attrs.get("light-color").map(str::to_string);
        let mut fields = Vec::new();

        if !empty {
            loop {
                match self.next()? {
                    Event::Empty(e) if e.name().as_ref() == b"DisplayFieldRef" => {
                        fields.push(read_field_ref(&e)?);
                    }
                    Event::Start(e) if e.name().as_ref() == b"DisplayFieldRef" => {
                        fields.push(read_field_ref(&e)?);
                        self.close_leaf("DisplayFieldRef")?;
                    }
                    Event::End(_) => break,
                    event => return Err(unexpected_event("DisplayVersion", &event)),
                }
            }
        }

        Ok(DisplayVersion {
            name,
            default_order_by,
            default_sort_order,
            brief_description,
            dark_color,
            light_color,
            fields,
        })
    }

    fn read_sql_view(
        &mut self,
        start: &BytesStart<'_>,
        empty: bool,
    ) -> Result<SqlView, MalformedDocumentError> {
        let attrs = Attrs::parse(start, "SQLView")?;
        let view = SqlView {
            name: attrs.required("name")?,
            sql: attrs.required("sql")?,
        };

        if !empty {
            self.close_leaf("SQLView")?;
        }

        Ok(view)
    }

    fn read_view_link(
        &mut self,
        start: &BytesStart<'_>,
    ) -> Result<ViewLink, MalformedDocumentError> {
        let attrs = Attrs::parse(start, "ViewLink")?;
        let alias = attrs.required("alias")?;
        let mut mapping: Option<Mapping> = None;

        loop {
            match self.next()? {
                Event::Start(e) if e.name().as_ref() == b"Mapping" => {
                    if mapping.is_some() {
                        return Err(duplicate("ViewLink", "Mapping"));
                    }
                    let mapping_attrs = Attrs::parse(&e, "Mapping")?;
                    mapping = Some(Mapping {
                        table_name: mapping_attrs.required("TableName")?,
                        columns: self.read_mapping_columns("Mapping")?,
                    });
                }
                Event::Empty(e) if e.name().as_ref() == b"Mapping" => {
                    if mapping.is_some() {
                        return Err(duplicate("ViewLink", "Mapping"));
                    }
                    let mapping_attrs = Attrs::parse(&e, "Mapping")?;
                    mapping = Some(Mapping {
                        table_name: mapping_attrs.required("TableName")?,
                        columns: Vec::new(),
                    });
                }
                Event::End(_) => break,
                event => return Err(unexpected_event("ViewLink", &event)),
            }
        }

        Ok(ViewLink {
            alias,
            mapping: mapping.ok_or(MalformedDocumentError::MissingChild {
                parent: "ViewLink",
                element: "Mapping",
            })?,
        })
    }

    fn read_mapping_columns(
        &mut self,
        parent: &'static str,
    ) -> Result<Vec<MappingColumn>, MalformedDocumentError> {
        let mut columns = Vec::new();

        loop {
            match self.next()? {
                Event::Empty(e) if e.name().as_ref() == b"MappingColumn" => {
                    columns.push(read_mapping_column(&e)?);
                }
                Event::Start(e) if e.name().as_ref() == b"MappingColumn" => {
                    columns.push(read_mapping_column(&e)?);
                    self.close_leaf("MappingColumn")?;
                }
                Event::End(_) => break,
                event => return Err(unexpected_event(parent, &event)),
            }
        }

        Ok(columns)
    }

    // Collect the text payload of an element up to its end tag.
    fn read_text(&mut self, parent: &'static str) -> Result<String, MalformedDocumentError> {
        let mut out = String::new();

        loop {
            match self.next()? {
                Event::Text(t) => {
                    let decoded = t.decode().map_err(xml_err)?;
                    out.push_str(&unescape(&decoded).map_err(xml_err)?);
                }
                Event::GeneralRef(r) => {
                    let name = r.decode().map_err(xml_err)?;
                    out.push_str(&unescape(&format!("&{name};")).map_err(xml_err)?);
                }
                Event::CData(t) => out.push_str(&String::from_utf8_lossy(&t)),
                Event::End(_) => return Ok(out.trim().to_string()),
                event => return Err(unexpected_event(parent, &event)),
            }
        }
    }

    // A leaf opened with a start tag must close without further structure.
    fn close_leaf(&mut self, element: &'static str) -> Result<(), MalformedDocumentError> {
        loop {
            match self.next()? {
                Event::End(_) => return Ok(()),
                Event::Text(_) => {}
                event => return Err(unexpected_event(element, &event)),
            }
        }
    }
}

///
/// Attrs
///
/// Unescaped attribute bag for one element; namespace declarations are
/// not part of the model and are dropped.
///

struct Attrs {
    element: &'static str,
    pairs: Vec<(String, String)>,
}

impl Attrs {
    fn parse(e: &BytesStart<'_>, element: &'static str) -> Result<Self, MalformedDocumentError> {
        let mut pairs = Vec::new();

        for attr in e.attributes() {
            let attr = attr.map_err(xml_err)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            if key == "xmlns" || key.starts_with("xmlns:") {
                continue;
            }
            let raw = String::from_utf8_lossy(&attr.value).into_owned();
            let value = unescape(&raw).map_err(xml_err)?.into_owned();
            pairs.push((key, value));
        }

        Ok(Self { element, pairs })
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn required(&self, name: &'static str) -> Result<String, MalformedDocumentError> {
        self.get(name)
            .map(str::to_string)
            .ok_or(MalformedDocumentError::MissingAttribute {
                element: self.element,
                attribute: name,
            })
    }

    fn required_flag(&self, name: &'static str) -> Result<bool, MalformedDocumentError> {
        let value = self.required(name)?;
        self.parse_flag(name, &value)
    }

    fn flag(&self, name: &'static str, default: bool) -> Result<bool, MalformedDocumentError> {
        match self.get(name) {
            Some(value) => {
                let value = value.to_string();
                self.parse_flag(name, &value)
            }
            None => Ok(default),
        }
    }

    fn parse_flag(
        &self,
        name: &'static str,
        value: &str,
    ) -> Result<bool, MalformedDocumentError> {
        match value {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(MalformedDocumentError::InvalidAttribute {
                element: self.element,
                attribute: name,
                value: other.to_string(),
                reason: "expected 'true' or 'false'".to_string(),
            }),
        }
    }

    fn parsed<T>(&self, name: &'static str) -> Result<Option<T>, MalformedDocumentError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(name)
            .map(|value| {
                value
                    .parse::<T>()
                    .map_err(|e| MalformedDocumentError::InvalidAttribute {
                        element: self.element,
                        attribute: name,
                        value: value.to_string(),
                        reason: e.to_string(),
                    })
            })
            .transpose()
    }

    fn element_name(
        &self,
        name: &'static str,
    ) -> Result<Option<ElementName>, MalformedDocumentError> {
        self.get(name)
            .map(|value| {
                ElementName::parse(value).map_err(|e| MalformedDocumentError::InvalidAttribute {
                    element: self.element,
                    attribute: name,
                    value: value.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }
}

//
// leaf readers
//

fn read_common_field(e: &BytesStart<'_>) -> Result<CommonField, MalformedDocumentError> {
    let attrs = Attrs::parse(e, "CommonField")?;

    Ok(CommonField {
        id: attrs.required("id")?,
        local_field: attrs.required("local-field")?,
    })
}

fn read_field_element(e: &BytesStart<'_>) -> Result<FieldElement, MalformedDocumentError> {
    let attrs = Attrs::parse(e, "DisplayFieldElement")?;
    let name = attrs.required("name")?;

    let source = match (attrs.get("schema-element"), attrs.get("viewName")) {
        (Some(path), None) if attrs.get("viewColumn").is_none() => {
            FieldSource::SchemaElement(path.to_string())
        }
        (None, Some(view)) => {
            let column =
                attrs
                    .get("viewColumn")
                    .ok_or(MalformedDocumentError::MissingAttribute {
                        element: "DisplayFieldElement",
                        attribute: "viewColumn",
                    })?;
            FieldSource::ViewColumn {
                view: view.to_string(),
                column: column.to_string(),
            }
        }
        _ => return Err(MalformedDocumentError::InvalidFieldSource { name }),
    };

    Ok(FieldElement { name, source })
}

fn read_insert_value(e: &BytesStart<'_>) -> Result<InsertValue, MalformedDocumentError> {
    let attrs = Attrs::parse(e, "InsertValue")?;

    Ok(InsertValue {
        id: attrs.required("id")?,
        field: attrs.required("field")?,
    })
}

fn read_security_mapping_value(
    e: &BytesStart<'_>,
) -> Result<SecureLinkValue, MalformedDocumentError> {
    let attrs = Attrs::parse(e, "securityMappingValue")?;

    Ok(SecureLinkValue {
        display_field_id: attrs.required("displayFieldId")?,
        schema_element_map: attrs.required("schemaElementMap")?,
    })
}

fn read_field_ref(e: &BytesStart<'_>) -> Result<DisplayFieldRef, MalformedDocumentError> {
    let attrs = Attrs::parse(e, "DisplayFieldRef")?;

    Ok(DisplayFieldRef {
        id: attrs.required("id")?,
        element_name: attrs.element_name("element_name")?,
    })
}

fn read_mapping_column(e: &BytesStart<'_>) -> Result<MappingColumn, MalformedDocumentError> {
    let attrs = Attrs::parse(e, "MappingColumn")?;

    Ok(MappingColumn {
        root_element: attrs.element_name("rootElement")?,
        field_element: attrs.required("fieldElement")?,
        maps_to: attrs.required("mapsTo")?,
    })
}

//
// event helpers
//

fn xml_err(e: impl std::fmt::Display) -> MalformedDocumentError {
    MalformedDocumentError::Xml(e.to_string())
}

fn eof() -> MalformedDocumentError {
    MalformedDocumentError::Xml("unexpected end of document".to_string())
}

const fn duplicate(parent: &'static str, element: &'static str) -> MalformedDocumentError {
    MalformedDocumentError::DuplicateChild { parent, element }
}

fn unexpected(parent: &'static str, e: &BytesStart<'_>) -> MalformedDocumentError {
    MalformedDocumentError::UnexpectedElement {
        parent,
        element: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
    }
}

fn unexpected_event(parent: &'static str, event: &Event<'_>) -> MalformedDocumentError {
    let element = match event {
        Event::Start(e) | Event::Empty(e) => {
            String::from_utf8_lossy(e.name().as_ref()).into_owned()
        }
        Event::End(e) => format!("/{}", String::from_utf8_lossy(e.name().as_ref())),
        Event::Text(_) | Event::CData(_) => "#text".to_string(),
        Event::Eof => return eof(),
        _ => "#node".to_string(),
    };

    MalformedDocumentError::UnexpectedElement { parent, element }
}
