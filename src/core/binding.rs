use crate::pointer::PointerAction;
use crate::util::Util;

use winsys::input::MouseShortcut;

use std::collections::HashMap;
use std::str::FromStr;

pub type MouseBindings = HashMap<MouseShortcut, PointerAction>;

/// Builds the binding table from `("[modifiers]-button", "action")`
/// pairs, skipping entries that do not parse.
pub fn build_mouse_bindings(table: &[(&str, &str)]) -> MouseBindings {
    table
        .iter()
        .filter_map(|&(binding, action)| {
            let shortcut = match Util::parse_mouse_binding(binding) {
                Some(shortcut) => shortcut,
                None => {
                    warn!("ignoring invalid mouse binding \"{}\"", binding);
                    return None;
                },
            };

            match PointerAction::from_str(action) {
                Ok(PointerAction::None) | Err(_) => {
                    warn!("ignoring invalid pointer action \"{}\" for {}", action, binding);
                    None
                },
                Ok(action) => Some((shortcut, action)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::MOUSE_BINDINGS;

    use winsys::input::Button;
    use winsys::input::Modifier;

    #[test]
    fn default_bindings_all_parse() {
        assert_eq!(build_mouse_bindings(MOUSE_BINDINGS).len(), MOUSE_BINDINGS.len());
    }

    #[test]
    fn invalid_entries_are_skipped() {
        let bindings = build_mouse_bindings(&[
            ("S-Left", "move_tiled"),
            ("S-Thumb", "move"),
            ("S-Right", "teleport"),
            ("S-Middle", "none"),
        ]);

        assert_eq!(bindings.len(), 1);
        assert_eq!(
            bindings.get(&MouseShortcut::new(Button::Left, vec![Modifier::Shift])),
            Some(&PointerAction::MoveTiled)
        );
    }
}
