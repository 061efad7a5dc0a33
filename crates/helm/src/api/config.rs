use std::collections::{BTreeMap, BTreeSet};
use serde::{Deserialize, Serialize};

/// Tuning for the frame controller, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Distance from the system center beyond which a new pilot counts as lost.
    pub lost_distance: f32,
    /// Frames spent lost before each successive "lost N" message (default: 3600).
    pub lost_frames_per_stage: u32,
    /// Highest "lost N" stage ever shown (default: 7).
    pub lost_max_stages: u32,
    /// Lost-in-space help only runs this many days into a new game.
    pub lost_start_window_days: u32,
    /// A drag shorter than this (screen units) is treated as a plain click.
    pub drag_threshold: f32,
    /// Frames averaged into one load reading.
    pub load_sample_frames: u32,
    pub map_min_zoom: i32,
    pub map_max_zoom: i32,
    /// Display order of outfit categories in scan reports.
    pub outfit_categories: Vec<String>,
    /// Help topic → message text.
    pub help_messages: BTreeMap<String, String>,
    /// Shown when the player hails a wormhole.
    pub wormhole_hail: String,
    /// RGBA of the drag-select rectangle.
    pub drag_color: [f32; 4],
}

impl Default for ControllerConfig {
    fn default() -> Self {
        let outfit_categories = [
            "Guns",
            "Turrets",
            "Secondary Weapons",
            "Ammunition",
            "Systems",
            "Power",
            "Engines",
            "Hand to Hand",
            "Special",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self {
            lost_distance: 10_000.0,
            lost_frames_per_stage: 3600,
            lost_max_stages: 7,
            lost_start_window_days: 4,
            drag_threshold: 5.0,
            load_sample_frames: 60,
            map_min_zoom: -2,
            map_max_zoom: 2,
            outfit_categories,
            help_messages: default_help_messages(),
            wormhole_hail: "The wormhole does not answer.".to_string(),
            drag_color: [0.2, 1.0, 0.0, 1.0],
        }
    }
}

impl ControllerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn help_message(&self, topic: &str) -> Option<&str> {
        self.help_messages.get(topic).map(String::as_str)
    }
}

fn default_help_messages() -> BTreeMap<String, String> {
    let mut messages: BTreeMap<String, String> = [
        ("control ship with mouse", "Your ship will fly toward the mouse pointer while the steering key is held."),
        ("navigation", "Select a destination on the map, then press the jump key to travel there."),
        ("dead", "Your flagship has been destroyed. You can load an earlier snapshot from the main menu."),
        ("disabled", "Your flagship is disabled. Wait for an escort or a passing ship to assist you."),
        ("stranded", "You are out of fuel and there is nowhere to refuel in this system. Hail a passing ship to ask for help."),
        ("friendly disabled", "The ship you are targeting is disabled. Board it to help repair it and refuel it."),
        ("multiple ship controls", "You now have more than one ship. Use the number keys to create and select groups of escorts."),
        ("fleet harvest tutorial", "Your escorts can collect flotsam for you. Order them to harvest after a fight."),
        ("fleet asteroid mining", "Escorts with asteroid scanners can mine the asteroid you target."),
        ("fleet asteroid mining shortcuts", "Press the target key on an asteroid to send your whole fleet mining."),
        ("try out fighters transfer cargo", "Your carried fighters can ferry cargo back to their carrier. Turn this on in the preferences."),
        ("fighters transfer cargo", "Fighters will now move the cargo they collect into their carrier when they dock."),
    ]
    .into_iter()
    .map(|(topic, text)| (topic.to_string(), text.to_string()))
    .collect();

    for stage in 1..=7 {
        messages.insert(
            format!("lost {stage}"),
            "You have wandered far from the center of the system. Open the map to find your way back.".to_string(),
        );
    }
    messages
}

/// How escorts spend ammunition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AmmoUsage {
    #[default]
    Always,
    Frugally,
    Never,
}

impl AmmoUsage {
    pub fn toggled(self) -> Self {
        match self {
            AmmoUsage::Always => AmmoUsage::Frugally,
            AmmoUsage::Frugally => AmmoUsage::Never,
            AmmoUsage::Never => AmmoUsage::Always,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AmmoUsage::Always => "always",
            AmmoUsage::Frugally => "frugally",
            AmmoUsage::Never => "never",
        }
    }
}

/// Player-facing toggles that the controller reads or changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub control_ship_with_mouse: bool,
    pub fighters_transfer_cargo: bool,
    pub show_load: bool,
    pub show_buttons_on_map: bool,
    pub ammo_usage: AmmoUsage,
    pub view_zoom: f32,
    pub min_view_zoom: f32,
    pub max_view_zoom: f32,
    /// Help topics already shown. Each is shown at most once.
    pub seen_help: BTreeSet<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            control_ship_with_mouse: false,
            fighters_transfer_cargo: false,
            show_load: false,
            show_buttons_on_map: true,
            ammo_usage: AmmoUsage::Always,
            view_zoom: 1.0,
            min_view_zoom: 0.25,
            max_view_zoom: 2.0,
            seen_help: BTreeSet::new(),
        }
    }
}

impl Preferences {
    const ZOOM_STEP: f32 = 1.2;

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn toggle_ammo_usage(&mut self) -> AmmoUsage {
        self.ammo_usage = self.ammo_usage.toggled();
        self.ammo_usage
    }

    pub fn zoom_view_in(&mut self) {
        self.view_zoom = (self.view_zoom * Self::ZOOM_STEP).min(self.max_view_zoom);
    }

    pub fn zoom_view_out(&mut self) {
        self.view_zoom = (self.view_zoom / Self::ZOOM_STEP).max(self.min_view_zoom);
    }

    pub fn has_seen(&self, topic: &str) -> bool {
        self.seen_help.contains(topic)
    }

    /// Returns false if the topic was already seen.
    pub fn mark_seen(&mut self, topic: &str) -> bool {
        self.seen_help.insert(topic.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = ControllerConfig::from_json(r#"{ "lost_frames_per_stage": 60 }"#).unwrap();
        assert_eq!(config.lost_frames_per_stage, 60);
        assert_eq!(config.lost_max_stages, 7);
        assert_eq!(config.outfit_categories[0], "Guns");
        assert!(config.help_message("lost 7").is_some());
        assert!(config.help_message("lost 8").is_none());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ControllerConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn view_zoom_is_clamped() {
        let mut prefs = Preferences::default();
        for _ in 0..20 {
            prefs.zoom_view_in();
        }
        assert_eq!(prefs.view_zoom, prefs.max_view_zoom);
        for _ in 0..40 {
            prefs.zoom_view_out();
        }
        assert_eq!(prefs.view_zoom, prefs.min_view_zoom);
    }

    #[test]
    fn ammo_usage_cycles() {
        let mut prefs = Preferences::default();
        assert_eq!(prefs.toggle_ammo_usage(), AmmoUsage::Frugally);
        assert_eq!(prefs.toggle_ammo_usage(), AmmoUsage::Never);
        assert_eq!(prefs.toggle_ammo_usage(), AmmoUsage::Always);
    }

    #[test]
    fn help_is_marked_seen_once() {
        let mut prefs = Preferences::default();
        assert!(prefs.mark_seen("navigation"));
        assert!(!prefs.mark_seen("navigation"));
        assert!(prefs.has_seen("navigation"));
    }
}
