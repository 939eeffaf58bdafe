use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonColor {
    Blue,
    DarkGray,
}

/// The Start/Stop button. Its title and color mirror whether the toggle it drives is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Button {
    active: bool,
}

impl Default for Button {
    fn default() -> Self {
        Self::idle()
    }
}

impl Button {
    pub fn idle() -> Self {
        Button { active: false }
    }

    pub fn active() -> Self {
        Button { active: true }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn title(&self) -> &'static str {
        if self.active { "Stop" } else { "Start" }
    }

    pub fn color(&self) -> ButtonColor {
        if self.active {
            ButtonColor::DarkGray
        } else {
            ButtonColor::Blue
        }
    }
}

impl Display for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] ({:?})", self.title(), self.color())
    }
}
