#[macro_export]
macro_rules! WM_NAME (
    () => { "twig" };
);

type Color = u32;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Settings {
    pub border_width: u32,
    pub window_gap: i32,
    pub fence_grip: i32,
    pub split_ratio: f64,
    pub focused_border_color: Color,
    pub active_border_color: Color,
    pub normal_border_color: Color,
    pub urgent_border_color: Color,
    pub status_fifo: Option<&'static str>,
    pub desktop_names: &'static [&'static str],
}

impl Settings {
    pub const DEFAULT: Self = Self {
        border_width: 2,
        window_gap: 6,
        fence_grip: 20,
        split_ratio: 0.5,
        focused_border_color: 0xe78a53,
        active_border_color: 0x5f8787,
        normal_border_color: 0x333333,
        urgent_border_color: 0xfbcb97,
        status_fifo: Some(concat!("/tmp/", WM_NAME!(), "-status")),
        desktop_names: &["main", "web", "term", "4", "5", "6", "7", "8", "9", "10"],
    };
}

impl Default for Settings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// "[modifiers]-button" => pointer action
pub const MOUSE_BINDINGS: &[(&str, &str)] = &[
    ("1-Left", "move"),
    ("1-Middle", "resize_side"),
    ("1-Right", "resize_corner"),
    ("1-S-Left", "move_tiled"),
    ("1-S-Right", "resize_tiled"),
    ("1-C-Left", "focus"),
];
