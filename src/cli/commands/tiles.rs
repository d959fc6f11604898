//! Tiles command - the launcher grid.

use super::prompt_continue;
use crate::cli::{Output, TilesAction};
use crate::config::Settings;
use crate::dashboard::{TileDraft, TileStore};
use crate::orchestrator::open_tile_store;
use anyhow::Result;
use console::style;

/// Run a tiles subcommand.
pub fn run_tiles(action: &TilesAction, settings: &Settings) -> Result<()> {
    let mut store = open_tile_store(settings);

    match action {
        TilesAction::List => list(&store),

        TilesAction::Add {
            title,
            description,
            icon,
            color,
        } => {
            let mut draft = TileDraft::new(title.as_str(), description.as_str());
            if let Some(icon) = icon {
                draft = draft.with_icon(*icon);
            }
            if let Some(color) = color {
                draft = draft.with_color(*color);
            }

            let tile = store.new_tile(draft)?;
            let id = tile.id.clone();
            store.add(tile)?;
            Output::success(&format!("Added tile {}", style(&id).bold()));
        }

        TilesAction::Remove { id, yes } => {
            let Some(tile) = store.find(id) else {
                Output::warning(&format!("No tile with id '{}'", id));
                return Ok(());
            };
            let (tile_id, title) = (tile.id.clone(), tile.title.clone());

            if !*yes && !prompt_continue(&format!("Remove \"{}\" from the launcher?", title))? {
                Output::info("Kept.");
                return Ok(());
            }

            if store.remove(&tile_id)? {
                Output::success(&format!("Removed \"{}\"", title));
            }
        }

        TilesAction::Show { id } => match store.find(id) {
            Some(tile) => {
                Output::header(&format!("{} {}", tile.icon.glyph(), tile.title));
                println!();
                println!("  {}", tile.description);
                println!();
                Output::kv("Id", &tile.id);
                Output::kv("Route", &tile.route);
                Output::kv("Icon", tile.icon.key());
                Output::kv(
                    "Color",
                    &tile.color.paint(format!("{} ({})", tile.color, tile.color.hex())).to_string(),
                );
            }
            None => {
                Output::error(&format!("No tile with id or route '{}'", id));
                anyhow::bail!("tile not found");
            }
        },
    }

    Ok(())
}

fn list(store: &TileStore) {
    if store.is_empty() {
        Output::info("The launcher is empty. Add a tile with 'voxdeck tiles add <title> <description>'.");
        return;
    }

    Output::header(&format!("Launcher ({} tiles)", store.len()));
    println!();
    for tile in store.tiles() {
        Output::tile(tile);
    }
}
