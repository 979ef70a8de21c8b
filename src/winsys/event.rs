use crate::geometry::Pos;
use crate::input::MouseEvent;
use crate::window::Window;
use crate::window::WindowState;

/// A decoded protocol event.
///
/// Consumers must carry a wildcard arm: new kinds of events may be
/// decoded in the future, and events a consumer does not know about are
/// to be ignored.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum Event {
    Mouse {
        event: MouseEvent,
    },
    MapRequest {
        window: Window,
    },
    Enter {
        window: Window,
        root_rpos: Pos,
        mode: CrossingMode,
    },
    Destroy {
        window: Window,
    },
    Unmap {
        window: Window,
    },
    ConfigureRequest {
        window: Window,
        request: ConfigureRequest,
    },
    Property {
        window: Window,
        kind: PropertyKind,
    },
    DesktopRequest {
        index: usize,
    },
    StateRequest {
        window: Window,
        action: ToggleAction,
        states: [Option<WindowState>; 2],
    },
    ActivateRequest {
        window: Window,
    },
}

#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq)]
pub enum StackMode {
    Above,
    Below,
    TopIf,
    BottomIf,
    Opposite,
}

#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq)]
pub enum ToggleAction {
    Toggle,
    Add,
    Remove,
}

#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq)]
pub enum PropertyKind {
    Hints,
    Name,
    Class,
}

/// The crossing mode of an enter event; only `Normal` crossings stem from
/// the pointer actually moving into a window.
#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq)]
pub enum CrossingMode {
    Normal,
    Grab,
    Ungrab,
    WhileGrabbed,
}

/// The fields a client asked to change in a configure request. A field is
/// `Some` exactly when its bit was set in the request's value mask.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ConfigureRequest {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub border_width: Option<u32>,
    pub sibling: Option<Window>,
    pub stack_mode: Option<StackMode>,
}
