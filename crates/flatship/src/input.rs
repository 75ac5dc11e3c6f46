//! Buttons, input modes and the commands they produce.
//!
//! Input dispatch is a pure function of the current `InputMode` and one
//! button event. The mode decides what a button means; nothing is rebound at
//! runtime. Only presses act, releases are ignored.

use std::fmt;
use std::str::FromStr;

/// Badge buttons (joystick directions plus A, B, START).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    Start,
}

impl Button {
    pub const ALL: [Button; 7] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::A,
        Button::B,
        Button::Start,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Button::Up => "up",
            Button::Down => "down",
            Button::Left => "left",
            Button::Right => "right",
            Button::A => "a",
            Button::B => "b",
            Button::Start => "start",
        }
    }

    #[inline]
    fn confirms(self) -> bool {
        matches!(self, Button::A | Button::B | Button::Start)
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown button name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseButtonError(pub String);

impl fmt::Display for ParseButtonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown button {:?}", self.0)
    }
}

impl std::error::Error for ParseButtonError {}

impl FromStr for Button {
    type Err = ParseButtonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Button::ALL
            .into_iter()
            .find(|b| b.name() == lower)
            .ok_or_else(|| ParseButtonError(s.to_string()))
    }
}

/// A button changing state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonEvent {
    pub button: Button,
    pub pressed: bool,
}

impl ButtonEvent {
    pub fn press(button: Button) -> Self {
        Self {
            button,
            pressed: true,
        }
    }

    pub fn release(button: Button) -> Self {
        Self {
            button,
            pressed: false,
        }
    }
}

/// Which set of button meanings is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Surface menu: up/down cycle surfaces, A/B/START begin the flight.
    #[default]
    ChooseSurface,
    /// In flight: left/right steer, A/B/START leave the game.
    Flying,
}

/// What an input asks the session to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    None,
    NextSurface,
    PrevSurface,
    Begin,
    TurnLeft,
    TurnRight,
    Exit,
}

impl InputMode {
    pub fn dispatch(self, event: ButtonEvent) -> Command {
        if !event.pressed {
            return Command::None;
        }
        match (self, event.button) {
            (InputMode::ChooseSurface, Button::Up) => Command::NextSurface,
            (InputMode::ChooseSurface, Button::Down) => Command::PrevSurface,
            (InputMode::ChooseSurface, b) if b.confirms() => Command::Begin,
            (InputMode::Flying, Button::Left) => Command::TurnLeft,
            (InputMode::Flying, Button::Right) => Command::TurnRight,
            (InputMode::Flying, b) if b.confirms() => Command::Exit,
            _ => Command::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_buttons() {
        let m = InputMode::ChooseSurface;
        assert_eq!(m.dispatch(ButtonEvent::press(Button::Up)), Command::NextSurface);
        assert_eq!(m.dispatch(ButtonEvent::press(Button::Down)), Command::PrevSurface);
        assert_eq!(m.dispatch(ButtonEvent::press(Button::Start)), Command::Begin);
        assert_eq!(m.dispatch(ButtonEvent::press(Button::B)), Command::Begin);
        assert_eq!(m.dispatch(ButtonEvent::press(Button::Left)), Command::None);
    }

    #[test]
    fn flight_buttons() {
        let m = InputMode::Flying;
        assert_eq!(m.dispatch(ButtonEvent::press(Button::Left)), Command::TurnLeft);
        assert_eq!(m.dispatch(ButtonEvent::press(Button::Right)), Command::TurnRight);
        assert_eq!(m.dispatch(ButtonEvent::press(Button::A)), Command::Exit);
        assert_eq!(m.dispatch(ButtonEvent::press(Button::Up)), Command::None);
    }

    #[test]
    fn releases_do_nothing() {
        for mode in [InputMode::ChooseSurface, InputMode::Flying] {
            for b in Button::ALL {
                assert_eq!(mode.dispatch(ButtonEvent::release(b)), Command::None);
            }
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!("Start".parse::<Button>(), Ok(Button::Start));
        assert_eq!(" left ".parse::<Button>(), Ok(Button::Left));
        assert!("select".parse::<Button>().is_err());
    }
}
