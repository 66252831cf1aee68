//! Sound references, the value bound to an item.
//!
//! A `SoundReference` names an uploaded sound by UUID and carries the
//! playback parameters chosen when it was applied. It is persisted on the
//! item under the `CustomSound`, `CustomSoundRange` and
//! `IsStaticCustomSound` keys.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::BindError;
use crate::host::PlayerType;

/// A sound bound (or about to be bound) to an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredSound")]
pub struct SoundReference {
    #[serde(rename = "CustomSound")]
    id: Uuid,
    #[serde(
        rename = "CustomSoundRange",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    range: Option<f32>,
    #[serde(rename = "IsStaticCustomSound", default)]
    is_static: bool,
}

/// Wire shape of a persisted sound, checked before it becomes a
/// `SoundReference`. A range without an id is rejected here.
#[derive(Deserialize)]
struct StoredSound {
    #[serde(rename = "CustomSound", default)]
    id: Option<Uuid>,
    #[serde(rename = "CustomSoundRange", default)]
    range: Option<f32>,
    #[serde(rename = "IsStaticCustomSound", default)]
    is_static: bool,
}

impl TryFrom<StoredSound> for SoundReference {
    type Error = BindError;

    fn try_from(stored: StoredSound) -> Result<Self, Self::Error> {
        let id = stored
            .id
            .ok_or_else(|| BindError::InvalidSound("missing sound id".into()))?;
        Self::new(id, stored.range, stored.is_static)
    }
}

impl SoundReference {
    /// Build a reference, rejecting ranges that are not finite and positive.
    pub fn new(id: Uuid, range: Option<f32>, is_static: bool) -> Result<Self, BindError> {
        if let Some(r) = range {
            if !r.is_finite() || r <= 0.0 {
                return Err(BindError::InvalidSound(format!(
                    "range must be positive, got {r}"
                )));
            }
        }
        Ok(Self {
            id,
            range,
            is_static,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn range(&self) -> Option<f32> {
        self.range
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Same sound and range with the static flag replaced.
    pub fn as_static(&self, enabled: bool) -> Self {
        Self {
            is_static: enabled,
            ..self.clone()
        }
    }

    /// Audible radius for playback: the explicit range, or the configured
    /// default of the player the sound is bound to.
    pub fn effective_range(&self, player: PlayerType, config: &Config) -> f32 {
        self.range.unwrap_or_else(|| player.default_range(config))
    }
}
