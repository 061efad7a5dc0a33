use crate::api::collaborators::{BlockedTrigger, Player, Simulation};
use crate::core::event::{EventKind, ShipEvent};
use crate::core::frame::FrameController;
use crate::core::scan::scan_report;
use crate::ui::panels::{BoardingPanel, Dialog};
use crate::ui::surface::Ui;

impl<S: Simulation, P: Player> FrameController<S, P> {
    /// Handle queued events oldest first until the queue is empty or one of
    /// them opens a surface.
    ///
    /// The player hears about each event exactly once. If that opens a
    /// surface, the event stays at the head and its remaining checks run on
    /// the first frame this controller is back on top.
    pub(crate) fn step_events(&mut self, is_active: &mut bool, ui: &mut dyn Ui) {
        while *is_active {
            let Some(event) = self.queue.front().cloned() else {
                break;
            };

            if !self.queue.handled_front() {
                self.player.handle_event(&event, ui);
                self.queue.mark_front_handled();
            }
            *is_active = ui.top() == Some(self.id);
            if !*is_active {
                log::debug!("event {:?} opened a surface; pausing the queue", event.kind());
                break;
            }

            self.handle_boarding(&event, is_active, ui);
            if *is_active {
                self.handle_scan(&event, is_active, ui);
            }

            self.queue.retire_front();
        }
    }

    /// Boarding or assisting by the flagship may offer a narrative, and
    /// boarding a hostile ship nobody claimed opens the plunder surface.
    fn handle_boarding(&mut self, event: &ShipEvent, is_active: &mut bool, ui: &mut dyn Ui) {
        let kind = event.kind();
        if !kind.intersects(EventKind::BOARD | EventKind::ASSIST) || !event.actor_is_player() {
            return;
        }
        let Some(target) = event.target() else {
            return;
        };
        if target.is_destroyed() {
            return;
        }
        let Some(flagship) = self.player.flagship() else {
            return;
        };
        if !event.actor().map_or(false, |actor| actor.ptr_eq(&flagship)) {
            return;
        }

        let mut offered = false;
        if let Some(narrative) = self.player.find_boarding_narrative(target) {
            let has_space = {
                let ship = flagship.read();
                self.player.has_space(narrative, &ship)
            };
            if has_space {
                self.player.offer(narrative, target, ui);
                offered = true;
            } else {
                let trigger = if kind.intersects(EventKind::BOARD) {
                    BlockedTrigger::Boarding
                } else {
                    BlockedTrigger::Assisting
                };
                self.player.handle_blocked_narrative(trigger, ui);
            }
        }
        *is_active = ui.top() == Some(self.id);

        // A narrative may have destroyed or captured the target, so look again.
        if *is_active && kind == EventKind::BOARD && !offered {
            let plunderable = {
                let ship = target.read();
                !ship.is_destroyed && ship.government.is_enemy
            };
            if plunderable {
                ui.push(Box::new(BoardingPanel::new(target.clone())));
                *is_active = false;
            }
        }
    }

    /// Scans by the player show a report; scans of the player may cost a fine.
    fn handle_scan(&mut self, event: &ShipEvent, is_active: &mut bool, ui: &mut dyn Ui) {
        let kind = event.kind();
        if !kind.intersects(EventKind::SCAN_CARGO | EventKind::SCAN_OUTFITS) {
            return;
        }
        let Some(target) = event.target() else {
            return;
        };

        if event.actor_is_player() {
            let report = scan_report(kind, &target.read(), &self.config.outfit_categories);
            ui.push(Box::new(Dialog::new(report)));
            *is_active = false;
        } else if event.target_is_player() {
            let Some(authority) = event.actor_government() else {
                return;
            };
            if let Some(message) = authority.fine(kind, &target.read()) {
                log::info!("fined by {}", authority.name);
                ui.push(Box::new(Dialog::new(message)));
                *is_active = false;
            }
        }
    }
}
