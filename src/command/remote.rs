use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use super::actions::Command;
use crate::transcript::Transcript;

/// Receiver for the remote control: a lamp that is either on or off.
#[derive(Debug)]
pub struct Light {
    is_on: bool,
    transcript: Transcript,
}

impl Light {
    pub fn new(transcript: Transcript) -> Self {
        Self {
            is_on: false,
            transcript,
        }
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn on(&mut self) {
        self.is_on = true;
        self.transcript.record("Light is on! It's so BRIGHT!");
    }

    pub fn off(&mut self) {
        self.is_on = false;
        self.transcript.record("Light is off! It's so DARK!");
    }
}

/// Flips the light, whichever way it currently is.
pub struct LightToggleCommand {
    light: Rc<RefCell<Light>>,
}

impl LightToggleCommand {
    pub fn new(light: Rc<RefCell<Light>>) -> Self {
        Self { light }
    }
}

impl Command for LightToggleCommand {
    fn name(&self) -> &'static str {
        "light-toggle"
    }

    fn execute(&mut self) -> bool {
        let mut light = self.light.borrow_mut();
        if light.is_on() {
            light.off();
        } else {
            light.on();
        }
        true
    }

    fn undo(&mut self) {
        self.execute();
    }
}

/// Invoker with a single programmable button.
#[derive(Default)]
pub struct RemoteControl {
    slot: Option<Box<dyn Command>>,
}

impl RemoteControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_command(&mut self, command: Box<dyn Command>) {
        self.slot = Some(command);
    }

    pub fn button_was_pressed(&mut self) {
        match self.slot.as_mut() {
            Some(command) => {
                command.execute();
            }
            None => debug!("button pressed with no command in slot"),
        }
    }
}
