//! `popcat categories`: distinct top-level categories in use.

use crate::{
    cli::{CategoriesArgs, OutputFormat, Scope, global::GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

use super::{actor, build_catalog};

pub fn execute(
    args: CategoriesArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let catalog = build_catalog(&config)?;

    let categories = match args.scope {
        Scope::Common => catalog.distinct_categories()?,
        Scope::Private => {
            let actor = actor(&global);
            let owner = catalog.authorization().require_actor(actor.as_ref())?;
            catalog.distinct_categories_for(owner.id())?
        }
    };

    if output.format() == OutputFormat::Json {
        output.json(&categories)?;
        return Ok(());
    }

    if categories.is_empty() {
        output.info("No categories in use")?;
        return Ok(());
    }
    for category in &categories {
        output.print(category)?;
    }

    Ok(())
}
