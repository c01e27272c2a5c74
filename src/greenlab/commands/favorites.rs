use crate::catalog;
use crate::commands::{AppData, Change, CmdMessage, CmdResult};
use uuid::Uuid;

/// Adds the plant to favorites if absent, removes it if present.
pub fn toggle(data: &mut AppData, plant_id: Uuid) -> CmdResult {
    let added = if data.favorites.remove(&plant_id) {
        false
    } else {
        data.favorites.insert(plant_id);
        true
    };

    let name = catalog::by_id(&plant_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| plant_id.to_string());
    let message = if added {
        format!("Added {} to favorites", name)
    } else {
        format!("Removed {} from favorites", name)
    };

    CmdResult::default()
        .with_change(Change::Favorites)
        .with_message(CmdMessage::success(message))
}

pub fn is_favorite(data: &AppData, plant_id: &Uuid) -> bool {
    data.favorites.contains(plant_id)
}
