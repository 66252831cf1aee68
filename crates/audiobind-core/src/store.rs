//! Typed attribute storage on host objects.
//!
//! Items carry a fixed set of side-data attributes. Each attribute is a
//! marker type naming its value type, so reads and writes are checked at
//! compile time and dispatch statically.

use serde::{Deserialize, Serialize};

use crate::item::ItemStack;
use crate::sound::SoundReference;

/// A single tooltip line shown under the item name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoreLine {
    pub text: String,
    pub color: TextColor,
    pub italic: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextColor {
    White,
    Gray,
}

/// Value of attributes that only mark presence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {}

impl LoreLine {
    /// Gray, non-italic line used for custom sound names.
    pub fn muted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: TextColor::Gray,
            italic: false,
        }
    }
}

/// Backing storage for every known attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_sound: Option<SoundReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lore: Option<Vec<LoreLine>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instrument: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    container: Option<Vec<ItemStack>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hide_additional_tooltip: Option<Flag>,
}

impl Components {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Key of a known attribute. Implemented only by the markers below.
pub trait Attribute: sealed::Sealed {
    type Value;
    const NAME: &'static str;

    fn slot(components: &Components) -> &Option<Self::Value>;
    fn slot_mut(components: &mut Components) -> &mut Option<Self::Value>;
}

macro_rules! attribute {
    ($(#[$meta:meta])* $marker:ident, $field:ident: $value:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $marker;

        impl sealed::Sealed for $marker {}

        impl Attribute for $marker {
            type Value = $value;
            const NAME: &'static str = stringify!($marker);

            fn slot(components: &Components) -> &Option<Self::Value> {
                &components.$field
            }

            fn slot_mut(components: &mut Components) -> &mut Option<Self::Value> {
                &mut components.$field
            }
        }
    };
}

attribute!(
    /// The persisted sound binding.
    CustomSound, custom_sound: SoundReference
);
attribute!(
    /// Tooltip lines; holds the display-name override.
    Lore, lore: Vec<LoreLine>
);
attribute!(
    /// Vanilla goat horn instrument. Conflicts with custom audio.
    Instrument, instrument: String
);
attribute!(
    /// Slot contents of a container item.
    Container, container: Vec<ItemStack>
);
attribute!(HideAdditionalTooltip, hide_additional_tooltip: Flag);

/// Keyed get/set/remove over a host object's attributes.
pub trait AttributeStore {
    fn components(&self) -> &Components;
    fn components_mut(&mut self) -> &mut Components;

    fn get<A: Attribute>(&self) -> Option<&A::Value> {
        A::slot(self.components()).as_ref()
    }

    fn has<A: Attribute>(&self) -> bool {
        A::slot(self.components()).is_some()
    }

    /// Replace the attribute, returning the previous value.
    fn set<A: Attribute>(&mut self, value: A::Value) -> Option<A::Value> {
        A::slot_mut(self.components_mut()).replace(value)
    }

    fn remove<A: Attribute>(&mut self) -> Option<A::Value> {
        A::slot_mut(self.components_mut()).take()
    }
}
