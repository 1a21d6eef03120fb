//! `popcat delete`: remove a template and its stored assets.

use popcat_core::prelude::*;

use crate::{
    cli::{DeleteArgs, OutputFormat, global::GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

use super::{actor, build_catalog};

pub fn execute(
    args: DeleteArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let catalog = build_catalog(&config)?;
    let actor = actor(&global);

    let outcome = catalog.delete(TemplateId::new(args.id), actor.as_ref())?;

    if output.format() == OutputFormat::Json {
        output.json(&outcome)?;
    } else {
        output.success(&format!("Deleted template {} ({})", outcome.id, outcome.name))?;
    }
    Ok(())
}
