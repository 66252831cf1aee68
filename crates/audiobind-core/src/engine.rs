//! Binding engine. Applies sounds to items and mutates existing bindings.
//!
//! Every check for a target runs before anything is written to it, so a
//! rejected target is left exactly as it was. Containers are processed slot
//! by slot into a fresh slot list which is written back once at the end.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::error::BindError;
use crate::host::{self, Category, PlayerType};
use crate::item::ItemStack;
use crate::sound::SoundReference;
use crate::store::{AttributeStore, Lore, LoreLine};

/// Result of a successful `apply`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// The sound was bound; carries the item's display name.
    Updated { name: String },
    /// The item is of a supported kind but not eligible; nothing was written.
    Skipped,
    /// A container was processed; carries the names of the updated slots in
    /// slot order.
    Contents { updated: Vec<String> },
}

pub struct BindingEngine {
    config: Config,
}

impl BindingEngine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Bind `sound` to `target`, or to every eligible slot if `target` is a
    /// container.
    pub fn apply(
        &self,
        target: &mut ItemStack,
        sound: &SoundReference,
        display_name: Option<&str>,
    ) -> Result<ApplyOutcome, BindError> {
        match Category::classify(target) {
            Some(Category::Container) => Ok(self.apply_contents(target, sound, display_name)),
            Some(Category::Player(player)) => {
                self.apply_player(target, player, sound, display_name)
            }
            None => Err(BindError::InvalidTarget(host::invalid_reason(target))),
        }
    }

    /// Build a fresh, non-static binding from its parts and apply it.
    pub fn apply_direct(
        &self,
        target: &mut ItemStack,
        id: Uuid,
        range: Option<f32>,
        display_name: Option<&str>,
    ) -> Result<ApplyOutcome, BindError> {
        let sound = SoundReference::new(id, range, false)?;
        self.apply(target, &sound, display_name)
    }

    /// Toggle static playback on an existing binding, keeping its id and range.
    pub fn set_static(
        &self,
        target: &mut ItemStack,
        enabled: bool,
    ) -> Result<SoundReference, BindError> {
        if PlayerType::from_item(target).is_none() {
            return Err(BindError::InvalidTarget(host::invalid_reason(target)));
        }
        let current = host::current_binding(target).ok_or(BindError::NoBinding)?;

        let updated = current.as_static(enabled);
        host::write_binding(target, updated.clone());
        info!(sound = %updated.id(), enabled, "static audio updated");
        Ok(updated)
    }

    fn apply_player(
        &self,
        target: &mut ItemStack,
        player: PlayerType,
        sound: &SoundReference,
        display_name: Option<&str>,
    ) -> Result<ApplyOutcome, BindError> {
        check_range(player.max_range(&self.config), sound.range())?;

        if !player.is_valid(target) {
            debug!(?player, count = target.count, "item not eligible, skipping");
            return Ok(ApplyOutcome::Skipped);
        }

        let rebinding = host::current_binding(target).is_some();
        host::write_binding(target, sound.clone());
        match display_name {
            Some(name) => {
                target.set::<Lore>(vec![LoreLine::muted(name)]);
            }
            // The old name belongs to the old sound
            None if rebinding => {
                target.remove::<Lore>();
            }
            None => {}
        }

        let name = target.display_name();
        info!(sound = %sound.id(), item = %name, "sound applied");
        Ok(ApplyOutcome::Updated { name })
    }

    /// Apply to each slot of a container. Rejected slots are left untouched
    /// and never fail the container as a whole. Containers inside the
    /// container are not descended into.
    fn apply_contents(
        &self,
        container: &mut ItemStack,
        sound: &SoundReference,
        display_name: Option<&str>,
    ) -> ApplyOutcome {
        let mut updated = Vec::new();

        let slots: Vec<ItemStack> = host::container_slots(container)
            .into_iter()
            .enumerate()
            .map(|(index, mut slot)| {
                let Some(player) = PlayerType::from_item(&slot) else {
                    return slot;
                };
                match self.apply_player(&mut slot, player, sound, display_name) {
                    Ok(ApplyOutcome::Updated { name }) => updated.push(name),
                    Ok(_) => {}
                    Err(e) => warn!(slot = index, "slot rejected: {e}"),
                }
                slot
            })
            .collect();

        host::write_container_slots(container, slots);
        info!(updated = updated.len(), "container contents updated");
        ApplyOutcome::Contents { updated }
    }
}

/// Equal to the maximum is allowed.
fn check_range(max: f32, range: Option<f32>) -> Result<(), BindError> {
    match range {
        Some(range) if range > max => Err(BindError::RangeTooHigh { range, max }),
        _ => Ok(()),
    }
}
