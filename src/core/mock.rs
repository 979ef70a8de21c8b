use crate::defaults::Settings;

use winsys::connection::Connection;
use winsys::event::ConfigureRequest;
use winsys::event::Event;
use winsys::geometry::Pos;
use winsys::geometry::Region;
use winsys::hints::Hints;
use winsys::input::MouseShortcut;
use winsys::screen::Screen;
use winsys::window::Window;
use winsys::window::WindowState;
use winsys::Result;

use anyhow::anyhow;

use std::cell::Cell;
use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::HashSet;
use std::collections::VecDeque;
use std::rc::Rc;

/// A request the window manager sent to the display server.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Cleanup,
    ConfinePointer,
    ReleasePointer,
    InitWindow(Window),
    Map(Window),
    Unmap(Window),
    Place(Window, Region),
    Move(Window, Pos),
    Configure(Window, ConfigureRequest),
    ConfigureNotify(Window, Region, u32),
    Focus(Window),
    Unfocus,
    Raise(Window),
    GrabBindings(Vec<MouseShortcut>),
    BorderWidth(Window, u32),
    BorderColor(Window, u32),
    WmProperties(Vec<String>),
    CurrentDesktop(usize),
    WindowDesktop(Window, usize),
    WindowState(Window, WindowState, bool),
    ClientList(Vec<Window>),
}

/// Server-side state shared between a test and the connection it hands
/// to the model.
#[derive(Default)]
pub struct MockState {
    outputs: Vec<Region>,
    requests: RefCell<Vec<Request>>,
    events: RefCell<VecDeque<Event>>,
    pointer: Cell<Option<(Pos, Option<Window>)>>,
    geometries: RefCell<HashMap<Window, Region>>,
    border_widths: RefCell<HashMap<Window, u32>>,
    hints: RefCell<HashMap<Window, Hints>>,
    unmanageable: RefCell<HashSet<Window>>,
}

impl MockState {
    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    pub fn push_event(
        &self,
        event: Event,
    ) {
        self.events.borrow_mut().push_back(event);
    }

    pub fn set_pointer(
        &self,
        pos: Pos,
        child: Option<Window>,
    ) {
        self.pointer.set(Some((pos, child)));
    }

    pub fn clear_pointer(&self) {
        self.pointer.set(None);
    }

    pub fn set_unmanageable(
        &self,
        window: Window,
    ) {
        self.unmanageable.borrow_mut().insert(window);
    }

    pub fn set_hints(
        &self,
        window: Window,
        hints: Hints,
    ) {
        self.hints.borrow_mut().insert(window, hints);
    }

    pub fn geometry(
        &self,
        window: Window,
    ) -> Option<Region> {
        self.geometries.borrow().get(&window).copied()
    }

    pub fn border_width(
        &self,
        window: Window,
    ) -> Option<u32> {
        self.border_widths.borrow().get(&window).copied()
    }

    fn record(
        &self,
        request: Request,
    ) {
        self.requests.borrow_mut().push(request);
    }
}

pub struct MockConnection {
    state: Rc<MockState>,
}

impl MockConnection {
    pub fn new(outputs: Vec<Region>) -> (Self, Rc<MockState>) {
        let state = Rc::new(MockState {
            outputs,
            ..Default::default()
        });

        (
            Self {
                state: Rc::clone(&state),
            },
            state,
        )
    }

    pub fn single_output() -> (Self, Rc<MockState>) {
        Self::new(vec![Region::new(0, 0, 1920, 1080)])
    }

    pub fn dual_output() -> (Self, Rc<MockState>) {
        Self::new(vec![
            Region::new(0, 0, 1920, 1080),
            Region::new(1920, 0, 1920, 1080),
        ])
    }

    pub fn settings() -> Settings {
        Settings {
            status_fifo: None,
            desktop_names: &["one", "two"],
            ..Settings::DEFAULT
        }
    }
}

impl Connection for MockConnection {
    /// Reports the connection as lost once all scripted events are
    /// consumed.
    fn flush(&self) -> bool {
        !self.state.events.borrow().is_empty()
    }

    fn step(&self) -> Option<Event> {
        self.state.events.borrow_mut().pop_front()
    }

    fn connected_outputs(&self) -> Vec<Screen> {
        self.state
            .outputs
            .iter()
            .enumerate()
            .map(|(i, &region)| Screen::new(region, i))
            .collect()
    }

    fn query_pointer(&self) -> Option<(Pos, Option<Window>)> {
        self.state.pointer.get()
    }

    fn confine_pointer(&self) {
        self.state.record(Request::ConfinePointer);
    }

    fn release_pointer(&self) {
        self.state.record(Request::ReleasePointer);
    }

    fn cleanup(&self) {
        self.state.record(Request::Cleanup);
    }

    fn init_window(
        &self,
        window: Window,
    ) {
        self.state.record(Request::InitWindow(window));
    }

    fn map_window(
        &self,
        window: Window,
    ) {
        self.state.record(Request::Map(window));
    }

    fn unmap_window(
        &self,
        window: Window,
    ) {
        self.state.record(Request::Unmap(window));
    }

    fn place_window(
        &self,
        window: Window,
        region: &Region,
    ) {
        self.state.geometries.borrow_mut().insert(window, *region);
        self.state.record(Request::Place(window, *region));
    }

    fn move_window(
        &self,
        window: Window,
        pos: Pos,
    ) {
        self.state
            .geometries
            .borrow_mut()
            .entry(window)
            .or_default()
            .pos = pos;

        self.state.record(Request::Move(window, pos));
    }

    fn configure_window(
        &self,
        window: Window,
        request: &ConfigureRequest,
    ) {
        self.state.record(Request::Configure(window, *request));
    }

    fn send_configure_notify(
        &self,
        window: Window,
        region: &Region,
        border_width: u32,
    ) {
        self.state
            .record(Request::ConfigureNotify(window, *region, border_width));
    }

    fn focus_window(
        &self,
        window: Window,
    ) {
        self.state.record(Request::Focus(window));
    }

    fn unfocus(&self) {
        self.state.record(Request::Unfocus);
    }

    fn stack_window_above(
        &self,
        window: Window,
    ) {
        self.state.record(Request::Raise(window));
    }

    fn grab_bindings(
        &self,
        mouse_shortcuts: &[&MouseShortcut],
    ) {
        self.state.record(Request::GrabBindings(
            mouse_shortcuts
                .iter()
                .map(|&shortcut| shortcut.clone())
                .collect(),
        ));
    }

    fn set_window_border_width(
        &self,
        window: Window,
        width: u32,
    ) {
        self.state.border_widths.borrow_mut().insert(window, width);
        self.state.record(Request::BorderWidth(window, width));
    }

    fn set_window_border_color(
        &self,
        window: Window,
        color: u32,
    ) {
        self.state.record(Request::BorderColor(window, color));
    }

    fn get_window_geometry(
        &self,
        window: Window,
    ) -> Result<Region> {
        self.state
            .geometry(window)
            .ok_or_else(|| anyhow!("unknown window {:#0x}", window))
    }

    fn must_manage_window(
        &self,
        window: Window,
    ) -> bool {
        !self.state.unmanageable.borrow().contains(&window)
    }

    fn get_icccm_window_hints(
        &self,
        window: Window,
    ) -> Option<Hints> {
        self.state.hints.borrow().get(&window).copied()
    }

    fn init_wm_properties(
        &self,
        _wm_name: &str,
        desktop_names: &[&str],
    ) {
        self.state.record(Request::WmProperties(
            desktop_names.iter().map(|&name| name.to_owned()).collect(),
        ));
    }

    fn set_current_desktop(
        &self,
        index: usize,
    ) {
        self.state.record(Request::CurrentDesktop(index));
    }

    fn set_window_desktop(
        &self,
        window: Window,
        index: usize,
    ) {
        self.state.record(Request::WindowDesktop(window, index));
    }

    fn set_window_state(
        &self,
        window: Window,
        state: WindowState,
        on: bool,
    ) {
        self.state.record(Request::WindowState(window, state, on));
    }

    fn update_client_list(
        &self,
        clients: &[Window],
    ) {
        self.state.record(Request::ClientList(clients.to_vec()));
    }
}
