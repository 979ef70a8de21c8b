use crate::event::ConfigureRequest;
use crate::event::Event;
use crate::geometry::Pos;
use crate::geometry::Region;
use crate::hints::Hints;
use crate::input::MouseShortcut;
use crate::screen::Screen;
use crate::window::Window;
use crate::window::WindowState;
use crate::Result;

pub trait Connection {
    fn flush(&self) -> bool;
    fn step(&self) -> Option<Event>;
    fn connected_outputs(&self) -> Vec<Screen>;

    /// The pointer's root position and the top-level window beneath it,
    /// or `None` if the server did not answer.
    fn query_pointer(&self) -> Option<(Pos, Option<Window>)>;
    fn confine_pointer(&self);
    fn release_pointer(&self);
    fn cleanup(&self);

    // Window manipulation
    fn init_window(
        &self,
        window: Window,
    );
    fn map_window(
        &self,
        window: Window,
    );
    fn unmap_window(
        &self,
        window: Window,
    );
    fn place_window(
        &self,
        window: Window,
        region: &Region,
    );
    fn move_window(
        &self,
        window: Window,
        pos: Pos,
    );
    fn configure_window(
        &self,
        window: Window,
        request: &ConfigureRequest,
    );
    fn send_configure_notify(
        &self,
        window: Window,
        region: &Region,
        border_width: u32,
    );
    fn focus_window(
        &self,
        window: Window,
    );
    fn unfocus(&self);
    fn stack_window_above(
        &self,
        window: Window,
    );
    fn grab_bindings(
        &self,
        mouse_shortcuts: &[&MouseShortcut],
    );
    fn set_window_border_width(
        &self,
        window: Window,
        width: u32,
    );
    fn set_window_border_color(
        &self,
        window: Window,
        color: u32,
    );
    fn get_window_geometry(
        &self,
        window: Window,
    ) -> Result<Region>;
    fn must_manage_window(
        &self,
        window: Window,
    ) -> bool;

    // ICCCM
    fn get_icccm_window_hints(
        &self,
        window: Window,
    ) -> Option<Hints>;

    // EWMH
    fn init_wm_properties(
        &self,
        wm_name: &str,
        desktop_names: &[&str],
    );
    fn set_current_desktop(
        &self,
        index: usize,
    );
    fn set_window_desktop(
        &self,
        window: Window,
        index: usize,
    );
    fn set_window_state(
        &self,
        window: Window,
        state: WindowState,
        on: bool,
    );
    fn update_client_list(
        &self,
        clients: &[Window],
    );
}
