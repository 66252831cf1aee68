//! Item stacks, the host objects sounds are bound to.

use serde::{Deserialize, Serialize};

use crate::store::{AttributeStore, Components};

/// Number of slots in a shulker box.
pub const CONTAINER_SIZE: usize = 27;

/// Intrinsic type of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "variant", rename_all = "snake_case")]
pub enum ItemKind {
    /// Empty slot.
    Air,
    /// Music disc of the given vanilla variant (e.g. `cat`, `pigstep`).
    MusicDisc(String),
    GoatHorn,
    /// Shulker box, optionally dyed.
    ShulkerBox(Option<String>),
    /// Any other item, by registry id.
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub kind: ItemKind,
    pub count: u32,
    #[serde(default, skip_serializing_if = "Components::is_empty")]
    components: Components,
}

impl ItemStack {
    /// A single item of `kind` with no attributes.
    pub fn new(kind: ItemKind) -> Self {
        Self::with_count(kind, 1)
    }

    pub fn with_count(kind: ItemKind, count: u32) -> Self {
        Self {
            kind,
            count,
            components: Components::default(),
        }
    }

    pub fn empty() -> Self {
        Self::with_count(ItemKind::Air, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.kind == ItemKind::Air || self.count == 0
    }

    /// Name shown when hovering the item.
    pub fn display_name(&self) -> String {
        match &self.kind {
            ItemKind::Air => "Air".to_string(),
            ItemKind::MusicDisc(_) => "Music Disc".to_string(),
            ItemKind::GoatHorn => "Goat Horn".to_string(),
            ItemKind::ShulkerBox(None) => "Shulker Box".to_string(),
            ItemKind::ShulkerBox(Some(color)) => format!("{} Shulker Box", title_case(color)),
            ItemKind::Other(id) => id.clone(),
        }
    }
}

impl Default for ItemStack {
    fn default() -> Self {
        Self::empty()
    }
}

impl AttributeStore for ItemStack {
    fn components(&self) -> &Components {
        &self.components
    }

    fn components_mut(&mut self) -> &mut Components {
        &mut self.components
    }
}

/// `light_blue` -> `Light Blue`
fn title_case(raw: &str) -> String {
    raw.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Instrument, Lore, LoreLine};

    #[test]
    fn test_empty_stack() {
        let item = ItemStack::empty();
        assert!(item.is_empty());
        assert_eq!(ItemStack::default(), item);
    }

    #[test]
    fn test_zero_count_is_empty() {
        let item = ItemStack::with_count(ItemKind::GoatHorn, 0);
        assert!(item.is_empty());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(
            ItemStack::new(ItemKind::MusicDisc("cat".into())).display_name(),
            "Music Disc"
        );
        assert_eq!(ItemStack::new(ItemKind::GoatHorn).display_name(), "Goat Horn");
        assert_eq!(
            ItemStack::new(ItemKind::ShulkerBox(Some("light_blue".into()))).display_name(),
            "Light Blue Shulker Box"
        );
        assert_eq!(
            ItemStack::new(ItemKind::ShulkerBox(None)).display_name(),
            "Shulker Box"
        );
        assert_eq!(
            ItemStack::new(ItemKind::Other("minecraft:stick".into())).display_name(),
            "minecraft:stick"
        );
    }

    #[test]
    fn test_json_without_components() {
        let item = ItemStack::new(ItemKind::GoatHorn);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"]["type"], "goat_horn");
        assert_eq!(json["count"], 1);
        assert!(json.get("components").is_none());
    }

    #[test]
    fn test_json_keeps_components() {
        let mut item = ItemStack::new(ItemKind::GoatHorn);
        item.set::<Instrument>("minecraft:seek_goat_horn".into());
        item.set::<Lore>(vec![LoreLine::muted("Horn")]);

        let json = serde_json::to_string(&item).unwrap();
        let back: ItemStack = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("red"), "Red");
        assert_eq!(title_case("light_gray"), "Light Gray");
    }
}
