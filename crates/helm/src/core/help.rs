use crate::api::collaborators::Player;
use crate::api::config::{ControllerConfig, Preferences};
use crate::ui::panels::Dialog;
use crate::ui::surface::Ui;
use crate::world::ship::ShipHandle;

/// Counts frames a new pilot spends far from the system center and decides
/// when the next "lost N" message is due.
#[derive(Debug, Clone, Default)]
pub struct LostTracker {
    lostness: u32,
    lost_count: u32,
}

impl LostTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more lost frame. Returns the stage to announce, if one is due.
    /// Stage N is due once `N * frames_per_stage` lost frames have passed.
    pub fn tick(&mut self, frames_per_stage: u32, max_stages: u32) -> Option<u32> {
        self.lostness += 1;
        let stage = self.lostness / frames_per_stage.max(1);
        if stage > self.lost_count && stage <= max_stages {
            self.lost_count += 1;
            Some(self.lost_count)
        } else {
            None
        }
    }

    pub fn lostness(&self) -> u32 {
        self.lostness
    }

    /// Stages announced so far.
    pub fn lost_count(&self) -> u32 {
        self.lost_count
    }
}

/// "fleet asteroid mining" → "Fleet Asteroid Mining".
pub fn capitalize(topic: &str) -> String {
    let mut out = String::with_capacity(topic.len());
    let mut at_word_start = true;
    for c in topic.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}

/// Show the help dialog for `topic` unless the player has seen it or there
/// is no text for it. Returns whether a dialog was pushed.
pub fn do_help(topic: &str, prefs: &mut Preferences, config: &ControllerConfig, ui: &mut dyn Ui) -> bool {
    if prefs.has_seen(topic) {
        return false;
    }
    let Some(message) = config.help_message(topic) else {
        return false;
    };
    prefs.mark_seen(topic);
    log::debug!("showing help: {}", topic);
    ui.push(Box::new(Dialog::new(format!("{}:\n\n{}", capitalize(topic), message))));
    true
}

/// Flagship facts the help triggers look at, copied out so no lock is held
/// while help dialogs are pushed.
struct FlagshipFacts {
    targetable: bool,
    destroyed: bool,
    disabled: bool,
    hyperspacing: bool,
    out_of_jumps: bool,
    can_refuel: bool,
    distance_from_center: f32,
    scans_asteroids: bool,
    friendly_target_disabled: bool,
}

impl FlagshipFacts {
    fn gather<P: Player>(player: &P, flagship: &ShipHandle) -> Self {
        let (facts, target) = {
            let ship = flagship.read();
            let facts = Self {
                targetable: ship.is_targetable,
                destroyed: ship.is_destroyed,
                disabled: ship.is_disabled,
                hyperspacing: ship.is_hyperspacing,
                out_of_jumps: ship.jumps_remaining == 0,
                can_refuel: player.system_has_fuel_for(&ship),
                distance_from_center: ship.position.length(),
                scans_asteroids: ship.attribute("asteroid scan power") != 0.0,
                friendly_target_disabled: false,
            };
            (facts, ship.target_ship())
        };
        let friendly_target_disabled = target.map_or(false, |t| {
            let t = t.read();
            t.is_disabled && !t.government.is_enemy
        });
        Self { friendly_target_disabled, ..facts }
    }
}

/// Run the tutorial triggers in order. The first one that shows a dialog
/// ends the check. Returns whether the controller is still active.
pub fn gate_help<P: Player>(
    player: &P,
    flagship: &ShipHandle,
    prefs: &mut Preferences,
    config: &ControllerConfig,
    lost: &mut LostTracker,
    ui: &mut dyn Ui,
) -> bool {
    let facts = FlagshipFacts::gather(player, flagship);
    let fleet = player.fleet_size();

    let early = [
        (prefs.control_ship_with_mouse, "control ship with mouse"),
        (facts.targetable, "navigation"),
        (facts.destroyed, "dead"),
        (facts.disabled && !facts.destroyed, "disabled"),
        (!facts.hyperspacing && facts.out_of_jumps && !facts.can_refuel, "stranded"),
        (facts.friendly_target_disabled, "friendly disabled"),
        (fleet > 1, "multiple ship controls"),
        (facts.targetable && fleet > 1, "fleet harvest tutorial"),
    ];
    for (triggered, topic) in early {
        if triggered && do_help(topic, prefs, config, ui) {
            return false;
        }
    }

    if facts.targetable && facts.scans_asteroids && fleet > 1 {
        // The shortcuts are only explained once the basics have been seen.
        if do_help("fleet asteroid mining", prefs, config, ui)
            || do_help("fleet asteroid mining shortcuts", prefs, config, ui)
        {
            return false;
        }
    }

    let late = [
        (player.display_carrier_help(), "try out fighters transfer cargo"),
        (prefs.fighters_transfer_cargo, "fighters transfer cargo"),
    ];
    for (triggered, topic) in late {
        if triggered && do_help(topic, prefs, config, ui) {
            return false;
        }
    }

    let is_lost = !facts.hyperspacing
        && facts.distance_from_center > config.lost_distance
        && player.days_since_start() <= config.lost_start_window_days;
    if is_lost {
        if let Some(stage) = lost.tick(config.lost_frames_per_stage, config.lost_max_stages) {
            if do_help(&format!("lost {stage}"), prefs, config, ui) {
                return false;
            }
        }
    }
    true
}
