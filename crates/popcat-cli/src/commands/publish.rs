//! `popcat publish`: upload images as common templates.

use popcat_core::prelude::*;
use tracing::info;

use crate::{
    cli::{OutputFormat, PublishArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

use super::{actor, build_catalog, read_layout, read_upload};

pub fn execute(
    args: PublishArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let catalog = build_catalog(&config)?;
    let actor = actor(&global);

    // Reject before touching the upload files.
    catalog
        .authorization()
        .require_admin(actor.as_ref(), "create common templates")?;

    let files = args
        .files
        .iter()
        .map(|path| read_upload(path))
        .collect::<CliResult<Vec<_>>>()?;
    let layout_json = read_layout(&args.layout)?;

    info!(files = files.len(), name = %args.name, "Publishing common templates");

    let outcome = catalog.create_common_batch(
        CreateCommonBatchRequest {
            name: args.name,
            layout_type: args.layout_type,
            use_yn: args.use_yn,
            category: args.category,
            layout_json,
            files,
        },
        actor.as_ref(),
    )?;

    if output.format() == OutputFormat::Json {
        output.json(&outcome)?;
    } else {
        for item in &outcome.items {
            match (&item.id, &item.error) {
                (Some(id), _) => {
                    output.success(&format!("{} → #{id} {}", item.file_name, item.template_name))?
                }
                (None, error) => output.warning(&format!(
                    "{}: {}",
                    item.file_name,
                    error.as_deref().unwrap_or("not created")
                ))?,
            }
        }
        output.info(&outcome.message)?;
    }

    if !outcome.success {
        return Err(CliError::BatchFailed {
            failed: outcome.total_files - outcome.success_count,
            total: outcome.total_files,
        });
    }
    Ok(())
}
