//! Controller input snapshots and per-page control descriptions

use std::ops::BitOr;

/// Bitmask of controller buttons, using the console's button bit layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons(pub u16);

impl Buttons {
    pub const NONE: Buttons = Buttons(0x0000);
    pub const A: Buttons = Buttons(0x8000);
    pub const B: Buttons = Buttons(0x4000);
    pub const Z: Buttons = Buttons(0x2000);
    pub const START: Buttons = Buttons(0x1000);
    pub const L: Buttons = Buttons(0x0020);
    pub const R: Buttons = Buttons(0x0010);

    pub fn contains(self, other: Buttons) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Buttons;

    fn bitor(self, rhs: Buttons) -> Buttons {
        Buttons(self.0 | rhs.0)
    }
}

/// D-pad directions pressed this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Directions {
    pub fn any(self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Everything pressed during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerInput {
    pub pressed: Directions,
    pub buttons_pressed: Buttons,
}

impl ControllerInput {
    pub fn buttons(buttons: Buttons) -> Self {
        ControllerInput {
            buttons_pressed: buttons,
            ..Default::default()
        }
    }

    pub fn up() -> Self {
        Self::directions(Directions {
            up: true,
            ..Default::default()
        })
    }

    pub fn down() -> Self {
        Self::directions(Directions {
            down: true,
            ..Default::default()
        })
    }

    pub fn left() -> Self {
        Self::directions(Directions {
            left: true,
            ..Default::default()
        })
    }

    pub fn right() -> Self {
        Self::directions(Directions {
            right: true,
            ..Default::default()
        })
    }

    fn directions(pressed: Directions) -> Self {
        ControllerInput {
            pressed,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.pressed.any() && self.buttons_pressed.is_empty()
    }
}

/// A control shown in the controls popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlType {
    SwitchPage,
    ShowControls,
    Print,
    MemoryCursor,
    JumpToAddress,
    CycleDisplayMode,
    ListCursor,
    ChangeValue,
    ToggleSection,
    ResetSetting,
}

impl ControlType {
    /// Button label and what it does
    pub fn description(self) -> (&'static str, &'static str) {
        match self {
            ControlType::SwitchPage => ("L/R", "switch page"),
            ControlType::ShowControls => ("START", "show/hide controls"),
            ControlType::Print => ("PRINT", "print page to output"),
            ControlType::MemoryCursor => ("D-PAD", "move cursor"),
            ControlType::JumpToAddress => ("A", "jump to address"),
            ControlType::CycleDisplayMode => ("B", "cycle display mode"),
            ControlType::ListCursor => ("UP/DOWN", "select setting"),
            ControlType::ChangeValue => ("LEFT/RIGHT", "change value"),
            ControlType::ToggleSection => ("A", "expand/collapse section"),
            ControlType::ResetSetting => ("B", "reset to default"),
        }
    }
}
