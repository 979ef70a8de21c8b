/// The subset of ICCCM `WM_HINTS` the window manager acts upon.
#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq)]
pub struct Hints {
    pub urgent: bool,
}

impl Hints {
    pub fn new(urgent: bool) -> Self {
        Self {
            urgent,
        }
    }
}
