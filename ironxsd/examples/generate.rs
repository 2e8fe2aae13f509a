//! Example generating Rust code from an XSD schema.
//!
//! Run with: `cargo run --example generate -- path/to/schema.xsd [out_dir]`
//!
//! Without arguments a small built-in schema is used and the code is printed.
//! Set `RUST_LOG=ironxsd_codegen=debug` to follow the generator.

use ironxsd::prelude::*;
use std::path::PathBuf;

const DEMO_SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" xmlns:tns="urn:demo">
    <xs:simpleType name="Side">
        <xs:restriction base="xs:string">
            <xs:enumeration value="Buy"/>
            <xs:enumeration value="Sell"/>
        </xs:restriction>
    </xs:simpleType>
    <xs:complexType name="Order">
        <xs:annotation><xs:documentation>A single order.</xs:documentation></xs:annotation>
        <xs:sequence>
            <xs:element name="symbol">
                <xs:simpleType>
                    <xs:restriction base="xs:string">
                        <xs:minLength value="1"/>
                        <xs:maxLength value="8"/>
                        <xs:pattern value="[A-Z]+"/>
                    </xs:restriction>
                </xs:simpleType>
            </xs:element>
            <xs:element name="side" type="tns:Side"/>
            <xs:element name="quantity" type="xs:positiveInteger"/>
            <xs:element name="note" type="xs:string" minOccurs="0"/>
        </xs:sequence>
        <xs:attribute name="id" type="xs:long" use="required"/>
    </xs:complexType>
</xs:schema>"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next().map(PathBuf::from) else {
        let config = CodegenConfig::new()
            .with_package("demo")
            .with_source_name("demo.xsd");
        let code = generate_from_xml(DEMO_SCHEMA, &config)?;
        println!("{code}");
        return Ok(());
    };

    let out_dir = args.next().map_or_else(|| PathBuf::from("."), PathBuf::from);
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("schema")
        .to_string();
    let source = input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    let config = CodegenConfig::new()
        .with_source_name(source)
        .with_output_dir(&out_dir)
        .with_file_stem(stem);

    let path = write_from_file(&input, &config)?;
    tracing::info!("generated {}", path.display());
    println!("Wrote {}", path.display());

    Ok(())
}
