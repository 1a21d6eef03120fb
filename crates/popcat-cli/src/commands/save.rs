//! `popcat save`: store a private template for the acting store.

use popcat_core::prelude::*;

use crate::{
    cli::{OutputFormat, SaveArgs, global::GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

use super::{actor, build_catalog, read_layout, read_upload};

pub fn execute(
    args: SaveArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let catalog = build_catalog(&config)?;
    let actor = actor(&global);

    // Unauthenticated callers fail before the thumbnail is read.
    catalog.authorization().require_actor(actor.as_ref())?;

    let thumbnail = args.thumbnail.as_deref().map(read_upload).transpose()?;
    let layout_json = read_layout(&args.layout)?;

    let outcome = catalog.save_private(
        SavePrivateRequest {
            name: args.name,
            layout_type: args.layout_type,
            category: CategoryPath::from(&args.category),
            image_url: args.background_url,
            layout_json,
            thumbnail,
        },
        actor.as_ref(),
    )?;

    if output.format() == OutputFormat::Json {
        output.json(&outcome)?;
    } else {
        output.success(&format!(
            "Saved private template #{} for {}",
            outcome.id, outcome.owner
        ))?;
        if let Some(url) = &outcome.thumbnail_url {
            output.info(&format!("Thumbnail: {url}"))?;
        }
    }
    Ok(())
}
