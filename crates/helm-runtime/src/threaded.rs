use std::any::Any;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use crossbeam_channel::{Receiver, Sender};
use glam::Vec2;
use parking_lot::Mutex;
use helm::{DrawList, GovernmentRef, ShipEvent, Simulation};

/// The world state a worker thread advances one tick at a time.
pub trait TickWorld: Send + 'static {
    /// Advance one tick. `active` is false while the flight view is covered.
    fn tick(&mut self, active: bool) -> Vec<ShipEvent>;

    /// Apply player input gathered on the frame thread.
    fn apply(&mut self, input: WorldInput);

    fn place(&mut self);

    fn break_targeting(&mut self, government: &GovernmentRef);

    fn draw(&self, out: &mut DrawList);
}

/// Player input buffered between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldInput {
    Click { from: Vec2, to: Vec2, shift: bool, control: bool },
    RightClick { at: Vec2 },
    SelectGroup { group: u8, shift: bool, control: bool },
    FingerDown { at: Vec2, finger: i32 },
    FingerMove { at: Vec2, finger: i32 },
    FingerUp { at: Vec2, finger: i32 },
}

enum Task {
    Tick { active: bool },
}

enum TaskResult {
    Ticked { events: Vec<ShipEvent>, drawn: DrawList },
    Panicked(Box<dyn Any + Send + 'static>),
}

/// Runs a [`TickWorld`] on its own thread, one tick ahead of the frame.
///
/// `resume` starts a tick; the next `join` (or `step_async`) waits for it.
/// Input arrives between ticks, so it is buffered and handed to the world
/// only while no tick is running.
pub struct ThreadedSimulation<W: TickWorld> {
    world: Arc<Mutex<W>>,
    send_task: Option<Sender<Task>>,
    recv_task_result: Receiver<TaskResult>,
    worker: Option<JoinHandle<()>>,
    in_flight: bool,
    active: bool,
    input: Vec<WorldInput>,
    produced: Vec<ShipEvent>,
    drawn: DrawList,
}

impl<W: TickWorld> ThreadedSimulation<W> {
    pub fn new(world: W) -> Self {
        let world = Arc::new(Mutex::new(world));
        let (send_task, recv_task) = crossbeam_channel::unbounded();
        let (send_task_result, recv_task_result) = crossbeam_channel::unbounded();

        let worker = thread::Builder::new()
            .name("helm-sim".to_string())
            .spawn({
                let world = Arc::clone(&world);
                move || worker_thread_body(recv_task, send_task_result, world)
            });
        let worker = match worker {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::error!("failed to spawn simulation worker: {}", err);
                None
            }
        };

        Self {
            world,
            send_task: Some(send_task),
            recv_task_result,
            worker,
            in_flight: false,
            active: true,
            input: Vec::new(),
            produced: Vec::new(),
            drawn: DrawList::new(),
        }
    }

    /// Lock the world directly. Joins any running tick first.
    pub fn with_world<R>(&mut self, f: impl FnOnce(&mut W) -> R) -> R {
        self.join();
        f(&mut self.world.lock())
    }

    pub fn is_ticking(&self) -> bool {
        self.in_flight
    }

    fn buffer(&mut self, input: WorldInput) {
        self.input.push(input);
    }
}

impl<W: TickWorld> Simulation for ThreadedSimulation<W> {
    fn join(&mut self) {
        if !self.in_flight {
            return;
        }
        self.in_flight = false;
        match self.recv_task_result.recv() {
            Ok(TaskResult::Ticked { events, drawn }) => {
                self.produced.extend(events);
                self.drawn = drawn;
            }
            Ok(TaskResult::Panicked(panic)) => resume_unwind(panic),
            Err(_) => log::error!("simulation worker disconnected"),
        }
    }

    fn step_async(&mut self, active: bool) {
        self.join();
        self.active = active;
        if active && !self.input.is_empty() {
            let mut world = self.world.lock();
            for input in self.input.drain(..) {
                world.apply(input);
            }
        }
    }

    fn drain_produced_events(&mut self) -> Vec<ShipEvent> {
        std::mem::take(&mut self.produced)
    }

    fn resume(&mut self) {
        if self.in_flight {
            return;
        }
        let Some(send_task) = &self.send_task else {
            return;
        };
        if send_task.send(Task::Tick { active: self.active }).is_err() {
            log::error!("simulation task sender disconnected");
            return;
        }
        self.in_flight = true;
    }

    fn suspend(&mut self) {
        log::trace!("simulation suspended");
    }

    fn place(&mut self) {
        self.with_world(|world| world.place());
    }

    fn break_targeting(&mut self, government: &GovernmentRef) {
        self.with_world(|world| world.break_targeting(government));
    }

    fn click(&mut self, from: Vec2, to: Vec2, shift: bool, control: bool) {
        self.buffer(WorldInput::Click { from, to, shift, control });
    }

    fn rclick(&mut self, at: Vec2) {
        self.buffer(WorldInput::RightClick { at });
    }

    fn select_group(&mut self, group: u8, shift: bool, control: bool) {
        self.buffer(WorldInput::SelectGroup { group, shift, control });
    }

    fn finger_down(&mut self, at: Vec2, finger: i32) -> bool {
        self.buffer(WorldInput::FingerDown { at, finger });
        true
    }

    fn finger_move(&mut self, at: Vec2, finger: i32) -> bool {
        self.buffer(WorldInput::FingerMove { at, finger });
        true
    }

    fn finger_up(&mut self, at: Vec2, finger: i32) -> bool {
        self.buffer(WorldInput::FingerUp { at, finger });
        true
    }

    /// The picture from the last finished tick.
    fn draw(&self, out: &mut DrawList) {
        out.extend_from(&self.drawn);
    }
}

impl<W: TickWorld> Drop for ThreadedSimulation<W> {
    fn drop(&mut self) {
        // Closing the task channel ends the worker loop.
        self.send_task = None;
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("simulation worker panicked during shutdown");
            }
        }
    }
}

fn worker_thread_body<W: TickWorld>(
    recv_task: Receiver<Task>,
    send_task_result: Sender<TaskResult>,
    world: Arc<Mutex<W>>,
) {
    let loop_result = catch_unwind(AssertUnwindSafe(|| {
        while let Ok(Task::Tick { active }) = recv_task.recv() {
            let result = {
                let mut world = world.lock();
                let events = world.tick(active);
                let mut drawn = DrawList::new();
                world.draw(&mut drawn);
                TaskResult::Ticked { events, drawn }
            };
            if send_task_result.send(result).is_err() {
                log::trace!("simulation result receiver disconnected, terminating worker");
                return;
            }
        }
        log::trace!("simulation task channel closed, terminating worker");
    }));
    if let Err(panic) = loop_result {
        log::error!("simulation worker panicked, sending panic to frame thread");
        if send_task_result.send(TaskResult::Panicked(panic)).is_err() {
            log::error!("frame thread gone; dropping simulation worker panic");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use helm::{EventKind, Government, GovernmentId, Ship, ShipHandle, ShipId};

    /// Emits a JUMP event every third tick and records what it was asked.
    struct Counter {
        ticks: Arc<AtomicU32>,
        ship: ShipHandle,
        inputs: Vec<WorldInput>,
        broken: Vec<GovernmentId>,
        placed: bool,
    }

    impl Counter {
        fn new(ticks: Arc<AtomicU32>) -> Self {
            let government = Arc::new(Government::player(GovernmentId(0)));
            Self {
                ticks,
                ship: ShipHandle::new(Ship::new(ShipId(1), government)),
                inputs: Vec::new(),
                broken: Vec::new(),
                placed: false,
            }
        }
    }

    impl TickWorld for Counter {
        fn tick(&mut self, active: bool) -> Vec<ShipEvent> {
            let n = self.ticks.fetch_add(1, Ordering::SeqCst) + 1;
            if active && n % 3 == 0 {
                vec![ShipEvent::new(Some(&self.ship), None, EventKind::JUMP)]
            } else {
                Vec::new()
            }
        }

        fn apply(&mut self, input: WorldInput) {
            self.inputs.push(input);
        }

        fn place(&mut self) {
            self.placed = true;
        }

        fn break_targeting(&mut self, government: &GovernmentRef) {
            self.broken.push(government.id);
        }

        fn draw(&self, out: &mut DrawList) {
            out.text(format!("tick {}", self.ticks.load(Ordering::SeqCst)), Vec2::ZERO, 12, [1.0; 4]);
        }
    }

    #[test]
    fn ticks_run_one_per_resume() {
        let ticks = Arc::new(AtomicU32::new(0));
        let mut sim = ThreadedSimulation::new(Counter::new(Arc::clone(&ticks)));

        for _ in 0..6 {
            sim.step_async(true);
            sim.resume();
        }
        sim.join();
        assert_eq!(ticks.load(Ordering::SeqCst), 6);
        assert_eq!(sim.drain_produced_events().len(), 2);
        assert!(sim.drain_produced_events().is_empty());

        // A second resume while a tick is running does not queue another.
        sim.resume();
        sim.resume();
        sim.join();
        assert_eq!(ticks.load(Ordering::SeqCst), 7);

        let mut out = DrawList::new();
        sim.draw(&mut out);
        assert_eq!(out.texts[0].text, "tick 7");
    }

    #[test]
    fn input_waits_for_an_active_step() {
        let ticks = Arc::new(AtomicU32::new(0));
        let mut sim = ThreadedSimulation::new(Counter::new(ticks));
        sim.click(Vec2::ZERO, Vec2::ONE, true, false);
        sim.select_group(2, false, true);

        sim.step_async(false);
        assert!(sim.with_world(|w| w.inputs.is_empty()));

        sim.step_async(true);
        let inputs = sim.with_world(|w| w.inputs.clone());
        assert_eq!(
            inputs,
            vec![
                WorldInput::Click { from: Vec2::ZERO, to: Vec2::ONE, shift: true, control: false },
                WorldInput::SelectGroup { group: 2, shift: false, control: true },
            ]
        );
    }

    #[test]
    fn place_and_break_targeting_reach_the_world() {
        let ticks = Arc::new(AtomicU32::new(0));
        let mut sim = ThreadedSimulation::new(Counter::new(ticks));
        sim.resume();
        sim.place();
        assert!(!sim.is_ticking());
        let pirates = Arc::new(Government::new(GovernmentId(5), "Pirate"));
        sim.break_targeting(&pirates);
        assert!(sim.with_world(|w| w.placed && w.broken == vec![GovernmentId(5)]));
    }
}
