//! Round-trip idempotence: for every valid document,
//! `load(write(load(doc)))` equals `load(doc)`.

use surfview_schema::xml;

const FIXTURE: &str = include_str!("fixtures/fs_fsData_display.xml");

#[test]
fn fixture_round_trips() {
    let first = xml::load(FIXTURE).unwrap();
    let serialized = xml::write(&first);
    let second = xml::load(&serialized).unwrap();

    assert_eq!(first, second);
}

#[test]
fn serialized_form_round_trips_again() {
    // A second cycle guards against the serializer canonicalizing into a
    // form it cannot reproduce.
    let first = xml::load(FIXTURE).unwrap();
    let once = xml::write(&first);
    let twice = xml::write(&xml::load(&once).unwrap());

    assert_eq!(once, twice);
}

#[test]
fn wire_names_are_preserved() {
    let descriptor = xml::load(FIXTURE).unwrap();
    let out = xml::write(&descriptor);

    // The attribute vocabulary is a compatibility contract.
    for token in [
        "schema-element=\"fs:fsData\"",
        "brief-description=",
        "full-description=",
        "<Arc name=\"ASSESSOR\">",
        "local-field=",
        "<DisplayField id=",
        "<SubQueryField id=",
        "data-type=\"string\"",
        "image=\"true\"",
        "visible=\"true\"",
        "searchable=\"true\"",
        "<DisplayFieldElement name=\"Field1\"",
        "viewName=\"snap_view\"",
        "viewColumn=\"thumb_path\"",
        "<HTML-Link>",
        "<Property name=\"ONCLICK\"",
        "<InsertValue id=\"Field1\" field=\"EXPT_ID\"/>",
        "<SecureLink elementName=\"xnat:mrSessionData\">",
        "displayFieldId=\"SESSION_ID\"",
        "schemaElementMap=\"xnat:mrSessionData/ID\"",
        "<MappingColumns>",
        "fieldElement=\"EXPT_ID\"",
        "mapsTo=\"id\"",
        "versionName=\"listing\"",
        "default-order-by=\"EXPT_ID\"",
        "default-sort-order=\"DESC\"",
        "dark-color=\"9999CC\"",
        "light-color=\"CCCCFF\"",
        "element_name=\"xnat:mrSessionData\"",
        "<SQLView name=\"snap_view\"",
        "<ViewLink alias=\"snap_view\">",
        "<Mapping TableName=\"snap_view\">",
        "rootElement=\"fs:fsData\"",
    ] {
        assert!(out.contains(token), "missing wire token: {token}");
    }
}

#[test]
fn escaped_attribute_values_round_trip() {
    let doc = r#"<Displays schema-element="fs:fsData" brief-description="A &amp; B" full-description="x &lt; y">
  <DisplayField id="EXPT_ID" header="ID &quot;label&quot;" visible="true" searchable="true">
    <DisplayFieldElement name="Field1" schema-element="fs:fsData.ID"/>
    <Content type="sql">CASE WHEN @Field1 &lt; 0 THEN 'n/a' ELSE @Field1 END</Content>
  </DisplayField>
</Displays>
"#;

    let first = xml::load(doc).unwrap();
    assert_eq!(first.brief_description, "A & B");
    assert_eq!(first.full_description, "x < y");

    let expt = first.field("EXPT_ID").unwrap();
    assert_eq!(expt.header, "ID \"label\"");

    let second = xml::load(&xml::write(&first)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn minimal_descriptor_round_trips() {
    let doc = r#"<Displays schema-element="fs:aparcRegionAnalysis" brief-description="Parcellation" full-description="Cortical parcellation measures"></Displays>"#;

    let first = xml::load(doc).unwrap();
    assert!(first.fields.is_empty());

    let second = xml::load(&xml::write(&first)).unwrap();
    assert_eq!(first, second);
}
