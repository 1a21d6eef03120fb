//! Implementation of the `popcat list` command.

use popcat_core::prelude::*;

use crate::{
    cli::{ListArgs, ListFormat, OutputFormat, Scope, global::GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

use super::{actor, build_catalog};

pub fn execute(
    args: ListArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let catalog = build_catalog(&config)?;
    let request = ListTemplatesRequest {
        layout_type: args.layout_type.clone(),
        category: CategoryFilter::from(&args.category),
        page: args.page,
        size: args.size,
    };

    let page = match args.scope {
        Scope::Common => catalog.list_common(&request)?,
        Scope::Private => {
            let actor = actor(&global);
            let owner = catalog.authorization().require_actor(actor.as_ref())?;
            catalog.list_private(owner.id(), &request)?
        }
    };

    let format = args.format.unwrap_or(match output.format() {
        OutputFormat::Json => ListFormat::Json,
        _ => ListFormat::Table,
    });

    match format {
        ListFormat::Json => output.json(&page)?,
        ListFormat::Csv => {
            output.print(&CSV_HEADER.join(","))?;
            for template in &page.rows {
                output.print(&csv_row(template))?;
            }
        }
        ListFormat::Table => {
            if page.rows.is_empty() {
                output.info("No templates found")?;
                return Ok(());
            }
            let rows: Vec<Vec<String>> = page.rows.iter().map(table_row).collect();
            output.table(&["ID", "NAME", "LAYOUT", "CATEGORY", "ACTIVE", "IMAGE"], &rows)?;
            output.print("")?;
            output.print(&format!(
                "Page {} ({} per page), {} matching",
                page.page, page.size, page.total_count
            ))?;
        }
    }

    Ok(())
}

const CSV_HEADER: [&str; 6] = ["id", "name", "layout_type", "category_big", "active", "image_url"];

fn table_row(template: &Template) -> Vec<String> {
    vec![
        template.id.to_string(),
        template.name.clone(),
        template.layout_type.clone(),
        template.category.big().unwrap_or("-").to_string(),
        if template.active { "Y" } else { "N" }.to_string(),
        template.image_url.clone().unwrap_or_else(|| "-".into()),
    ]
}

fn csv_row(template: &Template) -> String {
    [
        template.id.to_string(),
        template.name.clone(),
        template.layout_type.clone(),
        template.category.big().unwrap_or_default().to_string(),
        if template.active { "Y" } else { "N" }.to_string(),
        template.image_url.clone().unwrap_or_default(),
    ]
    .iter()
    .map(|field| csv_field(field))
    .collect::<Vec<_>>()
    .join(",")
}

/// Quote a CSV field when it holds a separator, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
