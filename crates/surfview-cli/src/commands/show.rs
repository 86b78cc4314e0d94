//! Descriptor inspection.

use crate::error::{CliError, CliResult, EXIT_SUCCESS};
use std::fs;
use std::path::Path;
use surfview::schema::xml;

pub fn run(file: &Path, version: Option<&str>, json: bool) -> CliResult<i32> {
    let source = fs::read_to_string(file)?;
    let descriptor = xml::load(&source)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&descriptor)?);
        return Ok(EXIT_SUCCESS);
    }

    if let Some(name) = version {
        let version = descriptor.version(name).ok_or_else(|| {
            CliError::Usage(format!(
                "descriptor '{}' has no version '{name}'",
                descriptor.element
            ))
        })?;

        // Column order is display order; duplicates are aliases, not noise.
        for field_ref in &version.fields {
            match &field_ref.element_name {
                Some(element) => println!("{} ({element})", field_ref.id),
                None => println!("{}", field_ref.id),
            }
        }
        return Ok(EXIT_SUCCESS);
    }

    println!("element:  {}", descriptor.element);
    println!("brief:    {}", descriptor.brief_description);
    println!("full:     {}", descriptor.full_description);
    println!("fields:   {}", descriptor.fields.len());
    println!(
        "versions: {}",
        descriptor
            .versions
            .iter()
            .map(|v| v.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    if !descriptor.arcs.is_empty() {
        println!(
            "arcs:     {}",
            descriptor
                .arcs
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    if !descriptor.sql_views.is_empty() {
        println!(
            "views:    {}",
            descriptor
                .sql_views
                .iter()
                .map(|v| v.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(EXIT_SUCCESS)
}
