use anyhow::Result;
use colored::Colorize;
use entmgr_core::{AttributeValues, ResourceDescriptor};
use entmgr_resource::EnterpriseRecord;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::OutputFormat;

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_record(
    record: &EnterpriseRecord,
    descriptor: &ResourceDescriptor,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
        OutputFormat::Table => println!("{}", record_table(record, descriptor)),
    }
    Ok(())
}

pub fn print_schema(descriptor: &ResourceDescriptor, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(descriptor)?),
        OutputFormat::Table => {
            println!("{} {}", "Resource:".cyan(), descriptor.type_name.cyan());
            println!("{}", schema_table(descriptor));
        }
    }
    Ok(())
}

fn record_table(record: &EnterpriseRecord, descriptor: &ResourceDescriptor) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Attribute", "Value"]);
    builder.push_record(["id", record.id().unwrap_or("-")]);
    for spec in descriptor.attributes {
        builder.push_record([spec.name, record.attribute(spec.name).unwrap_or("-")]);
    }
    builder.build().with(Style::rounded()).to_string()
}

fn schema_table(descriptor: &ResourceDescriptor) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Attribute", "Mutability", "Presence", "Description"]);
    for spec in descriptor.attributes {
        builder.push_record([
            spec.name.to_string(),
            spec.mutability.to_string(),
            spec.presence.to_string(),
            spec.description.to_string(),
        ]);
    }
    builder.build().with(Style::rounded()).to_string()
}
