//! Command handlers for the apply and setstatic operations.
//!
//! A `CommandSource` stands for whoever ran the command: it holds the item
//! being edited, answers permission checks and receives the messages the
//! player sees. Argument parsing and message rendering belong to the host.

use tracing::debug;
use uuid::Uuid;

use crate::engine::{ApplyOutcome, BindingEngine};
use crate::error::{BindError, InvalidTargetReason};
use crate::item::ItemStack;
use crate::sound::SoundReference;

pub const APPLY_PERMISSION: &str = "audioplayer.apply";
pub const SET_STATIC_PERMISSION: &str = "audioplayer.set_static";

pub trait PermissionOracle {
    fn has_permission(&self, node: &str) -> bool;
}

pub trait NotificationSink {
    fn send_success(&mut self, message: &str);
    fn send_failure(&mut self, message: &str);
}

pub trait CommandSource: PermissionOracle + NotificationSink {
    /// The item the command operates on.
    fn main_hand_mut(&mut self) -> &mut ItemStack;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplyArgs {
    pub sound: Uuid,
    pub range: Option<f32>,
    pub custom_name: Option<String>,
}

impl ApplyArgs {
    pub fn new(sound: Uuid) -> Self {
        Self {
            sound,
            range: None,
            custom_name: None,
        }
    }

    pub fn with_range(mut self, range: f32) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_custom_name(mut self, name: impl Into<String>) -> Self {
        self.custom_name = Some(name.into());
        self
    }
}

/// Player-facing text for a failed command.
pub fn failure_message(err: &BindError) -> String {
    match err {
        BindError::InvalidTarget(InvalidTargetReason::EmptyHand) => {
            "You don't have an item in your main hand".to_string()
        }
        BindError::InvalidTarget(InvalidTargetReason::Unsupported) => {
            "The item in your main hand can not have custom audio".to_string()
        }
        BindError::RangeTooHigh { range, max } => {
            format!("Float must not be more than {max}, found {range}")
        }
        BindError::NoBinding => "This item does not have custom audio".to_string(),
        BindError::InvalidSound(reason) => format!("Invalid sound: {reason}"),
        BindError::PermissionDenied(_) => {
            "You don't have permission to use this command".to_string()
        }
    }
}

fn require<S: CommandSource + ?Sized>(source: &S, node: &str) -> Result<(), BindError> {
    if source.has_permission(node) {
        Ok(())
    } else {
        debug!(node, "permission check failed");
        Err(BindError::PermissionDenied(node.to_string()))
    }
}

fn report_failure<S: CommandSource + ?Sized, T>(
    source: &mut S,
    result: Result<T, BindError>,
) -> Result<T, BindError> {
    if let Err(e) = &result {
        source.send_failure(&failure_message(e));
    }
    result
}

/// Apply a sound to the item in the main hand, or to the contents of the
/// shulker box held there.
pub fn apply_command<S: CommandSource + ?Sized>(
    source: &mut S,
    engine: &BindingEngine,
    args: &ApplyArgs,
) -> Result<ApplyOutcome, BindError> {
    let result = require(&*source, APPLY_PERMISSION)
        .and_then(|()| SoundReference::new(args.sound, args.range, false))
        .and_then(|sound| {
            engine.apply(source.main_hand_mut(), &sound, args.custom_name.as_deref())
        });
    let outcome = report_failure(source, result)?;

    match &outcome {
        ApplyOutcome::Updated { name } => {
            source.send_success(&format!("Successfully updated {name}"));
        }
        ApplyOutcome::Skipped => {}
        ApplyOutcome::Contents { updated } => {
            for name in updated {
                source.send_success(&format!("Successfully updated {name}"));
            }
            source.send_success("Successfully updated contents");
        }
    }
    Ok(outcome)
}

/// Turn static playback on or off for the item in the main hand.
/// `enabled` defaults to on.
pub fn set_static_command<S: CommandSource + ?Sized>(
    source: &mut S,
    engine: &BindingEngine,
    enabled: Option<bool>,
) -> Result<SoundReference, BindError> {
    let enabled = enabled.unwrap_or(true);
    let result = require(&*source, SET_STATIC_PERMISSION)
        .and_then(|()| engine.set_static(source.main_hand_mut(), enabled));
    let sound = report_failure(source, result)?;

    let state = if enabled { "Enabled" } else { "Disabled" };
    source.send_success(&format!("{state} static audio"));
    Ok(sound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::host;
    use crate::item::ItemKind;
    use crate::store::{AttributeStore, CustomSound};
    use std::collections::HashSet;

    struct TestSource {
        hand: ItemStack,
        permissions: HashSet<&'static str>,
        successes: Vec<String>,
        failures: Vec<String>,
    }

    impl TestSource {
        fn holding(hand: ItemStack) -> Self {
            Self {
                hand,
                permissions: [APPLY_PERMISSION, SET_STATIC_PERMISSION].into(),
                successes: Vec::new(),
                failures: Vec::new(),
            }
        }
    }

    impl PermissionOracle for TestSource {
        fn has_permission(&self, node: &str) -> bool {
            self.permissions.contains(node)
        }
    }

    impl NotificationSink for TestSource {
        fn send_success(&mut self, message: &str) {
            self.successes.push(message.to_string());
        }

        fn send_failure(&mut self, message: &str) {
            self.failures.push(message.to_string());
        }
    }

    impl CommandSource for TestSource {
        fn main_hand_mut(&mut self) -> &mut ItemStack {
            &mut self.hand
        }
    }

    fn engine() -> BindingEngine {
        BindingEngine::new(Config {
            max_music_disc_range: 8.0,
            ..Config::default()
        })
    }

    fn disc() -> ItemStack {
        ItemStack::new(ItemKind::MusicDisc("far".into()))
    }

    // ── apply ─────────────────────────────────────────────────────────

    #[test]
    fn test_apply_reports_success() {
        let mut source = TestSource::holding(disc());
        let args = ApplyArgs::new(Uuid::new_v4()).with_custom_name("Intro");
        apply_command(&mut source, &engine(), &args).unwrap();
        assert_eq!(source.successes, vec!["Successfully updated Music Disc"]);
        assert!(source.failures.is_empty());
        assert!(source.hand.has::<CustomSound>());
    }

    #[test]
    fn test_apply_empty_hand_message() {
        let mut source = TestSource::holding(ItemStack::empty());
        let result = apply_command(&mut source, &engine(), &ApplyArgs::new(Uuid::new_v4()));
        assert!(result.is_err());
        assert_eq!(
            source.failures,
            vec!["You don't have an item in your main hand"]
        );
    }

    #[test]
    fn test_apply_wrong_item_message() {
        let mut source =
            TestSource::holding(ItemStack::new(ItemKind::Other("minecraft:apple".into())));
        let _ = apply_command(&mut source, &engine(), &ApplyArgs::new(Uuid::new_v4()));
        assert_eq!(
            source.failures,
            vec!["The item in your main hand can not have custom audio"]
        );
    }

    #[test]
    fn test_apply_range_message_names_limit() {
        let mut source = TestSource::holding(disc());
        let args = ApplyArgs::new(Uuid::new_v4()).with_range(10.0);
        let err = apply_command(&mut source, &engine(), &args).unwrap_err();
        assert!(matches!(err, BindError::RangeTooHigh { .. }));
        assert_eq!(
            source.failures,
            vec!["Float must not be more than 8, found 10"]
        );
        assert!(!source.hand.has::<CustomSound>());
    }

    #[test]
    fn test_apply_without_permission_changes_nothing() {
        let mut source = TestSource::holding(disc());
        source.permissions.clear();
        let err = apply_command(&mut source, &engine(), &ApplyArgs::new(Uuid::new_v4()))
            .unwrap_err();
        assert!(matches!(err, BindError::PermissionDenied(ref node) if node == APPLY_PERMISSION));
        assert_eq!(source.hand, disc());
        assert_eq!(source.failures.len(), 1);
    }

    #[test]
    fn test_apply_skipped_item_is_silent() {
        let mut source =
            TestSource::holding(ItemStack::with_count(ItemKind::MusicDisc("far".into()), 2));
        let outcome =
            apply_command(&mut source, &engine(), &ApplyArgs::new(Uuid::new_v4())).unwrap();
        assert_eq!(outcome, ApplyOutcome::Skipped);
        assert!(source.successes.is_empty());
        assert!(source.failures.is_empty());
    }

    #[test]
    fn test_apply_shulker_reports_each_slot_then_contents() {
        let mut shulker = ItemStack::new(ItemKind::ShulkerBox(None));
        let mut slots = host::container_slots(&shulker);
        slots[3] = disc();
        slots[9] = ItemStack::new(ItemKind::GoatHorn);
        host::write_container_slots(&mut shulker, slots);

        let mut source = TestSource::holding(shulker);
        apply_command(&mut source, &engine(), &ApplyArgs::new(Uuid::new_v4())).unwrap();
        assert_eq!(
            source.successes,
            vec![
                "Successfully updated Music Disc",
                "Successfully updated Goat Horn",
                "Successfully updated contents",
            ]
        );
    }

    // ── setstatic ─────────────────────────────────────────────────────

    #[test]
    fn test_set_static_defaults_to_enabled() {
        let mut item = disc();
        host::write_binding(
            &mut item,
            SoundReference::new(Uuid::new_v4(), Some(5.0), false).unwrap(),
        );
        let mut source = TestSource::holding(item);
        let sound = set_static_command(&mut source, &engine(), None).unwrap();
        assert!(sound.is_static());
        assert_eq!(source.successes, vec!["Enabled static audio"]);
    }

    #[test]
    fn test_set_static_disable_message() {
        let mut item = disc();
        host::write_binding(
            &mut item,
            SoundReference::new(Uuid::new_v4(), None, true).unwrap(),
        );
        let mut source = TestSource::holding(item);
        set_static_command(&mut source, &engine(), Some(false)).unwrap();
        assert_eq!(source.successes, vec!["Disabled static audio"]);
    }

    #[test]
    fn test_set_static_without_binding_message() {
        let mut source = TestSource::holding(disc());
        let err = set_static_command(&mut source, &engine(), Some(true)).unwrap_err();
        assert!(matches!(err, BindError::NoBinding));
        assert_eq!(source.failures, vec!["This item does not have custom audio"]);
    }

    #[test]
    fn test_set_static_requires_its_own_permission() {
        let mut source = TestSource::holding(disc());
        source.permissions.remove(SET_STATIC_PERMISSION);
        let err = set_static_command(&mut source, &engine(), None).unwrap_err();
        assert!(matches!(err, BindError::PermissionDenied(_)));
    }

    #[test]
    fn test_failure_message_invalid_sound() {
        let msg = failure_message(&BindError::InvalidSound("range must be positive".into()));
        assert_eq!(msg, "Invalid sound: range must be positive");
    }
}
