//! Garden view helpers.

use db::models::plant::Plant;

use super::flora::ALL_TAGS;

/// Countdown label shown on a plant card.
pub fn watering_label(water_days: i32) -> String {
    match water_days {
        d if d <= 0 => "Water today".to_string(),
        1 => "Water in 1d".to_string(),
        d => format!("Water in {}d", d),
    }
}

/// Plants carrying `tag`; [`ALL_TAGS`] keeps everything.
pub fn filter_by_tag<'a>(plants: &'a [Plant], tag: &str) -> Vec<&'a Plant> {
    plants
        .iter()
        .filter(|p| tag == ALL_TAGS || p.tags.iter().any(|t| t == tag))
        .collect()
}

/// Filter chips: "All" followed by every distinct tag in first-seen order.
pub fn tag_chips(plants: &[Plant]) -> Vec<String> {
    let mut chips = vec![ALL_TAGS.to_string()];
    for tag in plants.iter().flat_map(|p| p.tags.iter()) {
        if !chips.contains(tag) {
            chips.push(tag.clone());
        }
    }
    chips
}

/// Id a locally added plant gets until the service assigns the real one.
pub fn next_local_id(plants: &[Plant]) -> i64 {
    plants.iter().map(|p| p.id).fold(0, i64::max) + 1
}

/// Plants due for watering today.
pub fn due_count(plants: &[Plant]) -> usize {
    plants.iter().filter(|p| p.is_due()).count()
}
