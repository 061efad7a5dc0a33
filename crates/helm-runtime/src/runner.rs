use helm::{
    DrawList, FrameController, InputEvent, InputQueue, Keymap, Message, MessageLog,
    PanelStack, Player, Simulation, Ui,
};

/// Steps per frame while fast-forwarding.
const FAST_FORWARD_STEPS: u32 = 3;

/// Drives the panel stack once per frame: input, then logic, then drawing.
///
/// The host pushes input as the platform delivers it and calls `tick` once
/// per display frame, then reads the draw list.
pub struct Runner {
    stack: PanelStack,
    input: InputQueue,
    draw_list: DrawList,
    messages: MessageLog,
    fast_forward: bool,
    frame: u64,
    steps: u64,
}

impl Runner {
    /// Root the panel stack at `controller`.
    pub fn new<S, P>(controller: FrameController<S, P>, keymap: Keymap) -> Self
    where
        S: Simulation + 'static,
        P: Player + 'static,
    {
        let keyboard = controller.keyboard().clone();
        let messages = controller.messages().clone();
        let mut stack = PanelStack::new(keymap, keyboard);
        stack.push(Box::new(controller));
        stack.push_or_pop();
        log::info!("runner started");

        Self {
            stack,
            input: InputQueue::new(),
            draw_list: DrawList::new(),
            messages,
            fast_forward: false,
            frame: 0,
            steps: 0,
        }
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Ask for extra steps per frame. Only honored while the top surface
    /// allows it.
    pub fn set_fast_forward(&mut self, fast_forward: bool) {
        self.fast_forward = fast_forward;
    }

    /// Run one frame.
    pub fn tick(&mut self) {
        for event in self.input.drain() {
            self.stack.handle(&event);
        }

        let steps = if self.fast_forward && self.stack.allows_fast_forward() {
            FAST_FORWARD_STEPS
        } else {
            1
        };
        for _ in 0..steps {
            self.stack.step_all();
        }
        self.steps += u64::from(steps);

        self.draw_list.clear();
        self.stack.draw_all(&mut self.draw_list);
        self.frame += 1;
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Messages posted since the last call.
    pub fn take_messages(&self) -> Vec<Message> {
        self.messages.drain()
    }

    pub fn stack(&self) -> &PanelStack {
        &self.stack
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}
