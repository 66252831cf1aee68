//! Host object classification and binding storage.
//!
//! Decides which items may carry a sound, how far that sound may reach,
//! and how a binding is written onto an item.

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::InvalidTargetReason;
use crate::item::{ItemKind, ItemStack, CONTAINER_SIZE};
use crate::sound::SoundReference;
use crate::store::{AttributeStore, Container, CustomSound, Flag, HideAdditionalTooltip, Instrument};

/// Items that play a bound sound themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerType {
    MusicDisc,
    GoatHorn,
}

impl PlayerType {
    pub fn from_item(item: &ItemStack) -> Option<Self> {
        match item.kind {
            ItemKind::MusicDisc(_) if !item.is_empty() => Some(Self::MusicDisc),
            ItemKind::GoatHorn if !item.is_empty() => Some(Self::GoatHorn),
            _ => None,
        }
    }

    /// Whether this particular item may take a binding.
    ///
    /// Only single items are eligible; a stack is skipped.
    pub fn is_valid(self, item: &ItemStack) -> bool {
        Self::from_item(item) == Some(self) && item.count == 1
    }

    /// Highest range a sound bound to this player may request.
    pub fn max_range(self, config: &Config) -> f32 {
        match self {
            Self::MusicDisc => config.max_music_disc_range,
            Self::GoatHorn => config.max_goat_horn_range,
        }
    }

    /// Range used when the binding does not set one.
    pub fn default_range(self, config: &Config) -> f32 {
        match self {
            Self::MusicDisc => config.music_disc_range,
            Self::GoatHorn => config.goat_horn_range,
        }
    }
}

/// Classification of a host object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Player(PlayerType),
    /// Holds other items; applying to it applies to every slot.
    Container,
}

impl Category {
    /// `None` when the item can neither carry a sound nor hold items that can.
    pub fn classify(item: &ItemStack) -> Option<Self> {
        if is_container(item) {
            return Some(Self::Container);
        }
        PlayerType::from_item(item).map(Self::Player)
    }
}

pub fn is_container(item: &ItemStack) -> bool {
    matches!(item.kind, ItemKind::ShulkerBox(_)) && !item.is_empty()
}

/// Why an unclassifiable item was rejected.
pub fn invalid_reason(item: &ItemStack) -> InvalidTargetReason {
    if item.is_empty() {
        InvalidTargetReason::EmptyHand
    } else {
        InvalidTargetReason::Unsupported
    }
}

pub fn current_binding(item: &ItemStack) -> Option<SoundReference> {
    item.get::<CustomSound>().cloned()
}

/// Replace the item's binding.
///
/// Also drops the vanilla instrument, which would otherwise play instead of
/// the custom sound, and hides the vanilla disc description.
pub fn write_binding(item: &mut ItemStack, sound: SoundReference) {
    debug!(sound = %sound.id(), item = %item.display_name(), "writing binding");
    item.set::<CustomSound>(sound);
    item.remove::<Instrument>();
    item.set::<HideAdditionalTooltip>(Flag {});
}

/// Number of slot entries stored on the item, which may exceed
/// `CONTAINER_SIZE` for hand-edited data.
pub fn stored_slot_count(item: &ItemStack) -> usize {
    item.get::<Container>().map_or(0, Vec::len)
}

/// Contents of a container item, always exactly `CONTAINER_SIZE` slots.
pub fn container_slots(item: &ItemStack) -> Vec<ItemStack> {
    let mut slots = item.get::<Container>().cloned().unwrap_or_default();
    if slots.len() > CONTAINER_SIZE {
        warn!(
            stored = slots.len(),
            dropped = slots.len() - CONTAINER_SIZE,
            "container holds more slots than a shulker box, extra slots dropped"
        );
    }
    slots.truncate(CONTAINER_SIZE);
    slots.resize_with(CONTAINER_SIZE, ItemStack::empty);
    slots
}

pub fn write_container_slots(item: &mut ItemStack, slots: Vec<ItemStack>) {
    item.set::<Container>(slots);
}
