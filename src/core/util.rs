use winsys::input::Button;
use winsys::input::Modifier;
use winsys::input::MouseShortcut;

use std::convert::TryFrom;

pub struct Util;

impl Util {
    /// Parses `"[modifier-]*button"`, e.g. `"1-S-Left"`. The `1`/`Mod`
    /// and `2`/`Sec` modifiers resolve to Alt and Super in debug builds,
    /// and the other way around in release builds.
    pub fn parse_mouse_binding(mouse_binding: impl Into<String>) -> Option<MouseShortcut> {
        let s = mouse_binding.into();
        let mut constituents: Vec<&str> = s.split('-').collect();

        let button = Button::try_from(constituents.pop()?).ok()?;

        let modifiers = constituents
            .iter()
            .map(|&modifier| match modifier {
                "1" | "Mod" => Some(if cfg!(debug_assertions) {
                    Modifier::Alt
                } else {
                    Modifier::Super
                }),
                "2" | "Sec" => Some(if cfg!(debug_assertions) {
                    Modifier::Super
                } else {
                    Modifier::Alt
                }),
                modifier => Modifier::try_from(modifier).ok(),
            })
            .collect::<Option<Vec<Modifier>>>()?;

        Some(MouseShortcut::new(button, modifiers))
    }
}
