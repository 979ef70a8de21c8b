pub use crate::Result;

use crate::geometry::Pos;
use crate::window::Window;

use std::convert::TryFrom;
use std::vec::Vec;

use anyhow::anyhow;

#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub enum Modifier {
    Ctrl = 1 << 0,
    Shift = 1 << 1,
    Alt = 1 << 2,
    AltGr = 1 << 3,
    Super = 1 << 4,
    NumLock = 1 << 5,
    ScrollLock = 1 << 6,
}

impl TryFrom<&str> for Modifier {
    type Error = anyhow::Error;

    fn try_from(val: &str) -> Result<Self> {
        match val {
            "C" | "Ctrl" | "Control" => Ok(Self::Ctrl),
            "A" | "Alt" | "Meta" => Ok(Self::Alt),
            "S" | "Shift" => Ok(Self::Shift),
            "M" | "Super" => Ok(Self::Super),
            "AGr" | "AltGr" => Ok(Self::AltGr),
            "N" | "NumLock" => Ok(Self::NumLock),
            "L" | "ScrollLock" => Ok(Self::ScrollLock),
            _ => Err(anyhow!("unable to resolve \"{}\" to modifier", val)),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Button {
    Left,
    Middle,
    Right,
    ScrollUp,
    ScrollDown,
    Backward,
    Forward,
}

impl TryFrom<&str> for Button {
    type Error = anyhow::Error;

    fn try_from(val: &str) -> Result<Self> {
        match val {
            "1" | "Left" => Ok(Self::Left),
            "2" | "Middle" => Ok(Self::Middle),
            "3" | "Right" => Ok(Self::Right),
            "4" | "ScrollUp" => Ok(Self::ScrollUp),
            "5" | "ScrollDown" => Ok(Self::ScrollDown),
            "8" | "Backward" => Ok(Self::Backward),
            "9" | "Forward" => Ok(Self::Forward),
            _ => Err(anyhow!("unable to resolve \"{}\" to button", val)),
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum MouseEventKind {
    Press,
    Release,
    Motion,
}

/// A button together with the modifiers held while pressing it.
/// Modifiers are kept sorted so that equal shortcuts hash equally.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct MouseShortcut {
    pub button: Button,
    pub modifiers: Vec<Modifier>,
}

impl MouseShortcut {
    pub fn new(
        button: Button,
        mut modifiers: Vec<Modifier>,
    ) -> Self {
        modifiers.sort();
        modifiers.dedup();

        Self {
            button,
            modifiers,
        }
    }

    pub fn mask(&self) -> u8 {
        self.modifiers.iter().fold(0u8, |acc, &m| acc | m as u8)
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub shortcut: MouseShortcut,
    pub window: Option<Window>,
    pub root_rpos: Pos,
}
