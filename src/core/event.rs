use crate::change::Toggle;
use crate::location::Location;
use crate::model::Model;

use winsys::event::ConfigureRequest;
use winsys::event::CrossingMode;
use winsys::event::Event;
use winsys::event::PropertyKind;
use winsys::event::ToggleAction;
use winsys::geometry::Pos;
use winsys::input::MouseEvent;
use winsys::input::MouseEventKind;
use winsys::window::Window;
use winsys::window::WindowState;

impl<'a> Model<'a> {
    pub fn handle_event(
        &mut self,
        event: Event,
    ) {
        match event {
            Event::Mouse {
                event,
            } => self.handle_mouse(event),
            Event::MapRequest {
                window,
            } => self.handle_map_request(window),
            Event::Enter {
                window,
                root_rpos,
                mode,
            } => self.handle_enter(window, root_rpos, mode),
            Event::Destroy {
                window,
            } => self.handle_destroy(window),
            Event::Unmap {
                window,
            } => self.handle_unmap(window),
            Event::ConfigureRequest {
                window,
                request,
            } => self.handle_configure_request(window, request),
            Event::Property {
                window,
                kind,
            } => self.handle_property(window, kind),
            Event::DesktopRequest {
                index,
            } => self.handle_desktop_request(index),
            Event::StateRequest {
                window,
                action,
                states,
            } => self.handle_state_request(window, action, states),
            Event::ActivateRequest {
                window,
            } => self.handle_activate_request(window),
            _ => {},
        }
    }

    fn handle_mouse(
        &mut self,
        event: MouseEvent,
    ) {
        match event.kind {
            MouseEventKind::Press => {
                if let Some(&action) = self.mouse_bindings.get(&event.shortcut) {
                    self.grab_pointer(action);
                }
            },
            MouseEventKind::Motion => {
                if self.frozen.is_armed() {
                    self.track_pointer(event.root_rpos);
                } else if let Some(window) = event.window {
                    self.window_focus(window);
                }
            },
            MouseEventKind::Release => self.ungrab_pointer(),
        }
    }

    fn handle_map_request(
        &mut self,
        window: Window,
    ) {
        debug!("MAP_REQUEST for window {:#0x}", window);
        self.manage(window);
    }

    fn handle_enter(
        &mut self,
        window: Window,
        root_rpos: Pos,
        mode: CrossingMode,
    ) {
        if mode != CrossingMode::Normal || root_rpos == self.last_pointer_pos {
            return;
        }

        debug!("ENTER for window {:#0x}", window);
        self.window_focus(window);
    }

    fn handle_destroy(
        &mut self,
        window: Window,
    ) {
        debug!("DESTROY for window {:#0x}", window);

        if let Some(loc) = self.locate_window(window) {
            self.unmanage(loc);
        }
    }

    fn handle_unmap(
        &mut self,
        window: Window,
    ) {
        debug!("UNMAP for window {:#0x}", window);

        if let Some(loc) = self.locate_window(window) {
            let expected = self
                .client(loc)
                .map_or(false, |client| client.consume_unmap_if_expecting());

            if !expected {
                self.unmanage(loc);
            }
        }
    }

    fn handle_configure_request(
        &mut self,
        window: Window,
        mut request: ConfigureRequest,
    ) {
        debug!("CONFIGURE_REQUEST for window {:#0x}: {:?}", window, request);

        let loc = self.locate_window(window);
        let client = loc.and_then(|loc| self.client(loc));

        match client {
            Some(client) if !client.is_floating() => {
                let (region, border_width) = if client.is_fullscreen() {
                    let region = loc
                        .and_then(|loc| self.monitors.get(loc.monitor))
                        .map(|monitor| monitor.full_region())
                        .unwrap_or_else(|| client.tiled_region());

                    (region, 0)
                } else {
                    (client.tiled_region(), self.settings.border_width)
                };

                self.conn
                    .send_configure_notify(window, &region, border_width);
            },
            Some(client) => {
                let mut region = client.floating_region();

                if let Some(x) = request.x {
                    region.pos.x = x;
                }

                if let Some(y) = request.y {
                    region.pos.y = y;
                }

                if let Some(width) = request.width {
                    region.dim.w = width;
                }

                if let Some(height) = request.height {
                    region.dim.h = height;
                }

                client.set_floating_region(region);
                request.border_width = None;

                self.conn.configure_window(window, &request);

                if let Some(loc) = loc {
                    self.draw_border(loc);
                }
            },
            None => self.conn.configure_window(window, &request),
        }
    }

    fn handle_property(
        &mut self,
        window: Window,
        kind: PropertyKind,
    ) {
        if kind != PropertyKind::Hints {
            return;
        }

        let loc = match self.locate_window(window) {
            Some(loc) => loc,
            None => return,
        };

        debug!("PROPERTY for window {:#0x} of kind {:?}", window, kind);

        let urgent = self
            .conn
            .get_icccm_window_hints(window)
            .map_or(false, |hints| hints.urgent);

        if urgent
            && self.focused_node(loc.monitor, loc.desktop) != Some(loc.node)
            && self.set_urgency(loc, Toggle::On)
        {
            self.publish_status();
            self.arrange(loc.monitor, loc.desktop);
        }
    }

    fn handle_desktop_request(
        &mut self,
        index: usize,
    ) {
        debug!("DESKTOP_REQUEST for desktop {}", index);

        if let Some((monitor, desktop)) = self.locate_desktop(index) {
            self.select_monitor(monitor);
            self.select_desktop(desktop);
        }
    }

    fn handle_state_request(
        &mut self,
        window: Window,
        action: ToggleAction,
        states: [Option<WindowState>; 2],
    ) {
        debug!(
            "STATE_REQUEST for window {:#0x}, with states {:?} and action {:?}",
            window, states, action
        );

        if let Some(loc) = self.locate_window(window) {
            for &state in states.iter().flatten() {
                self.handle_state(loc, state, action);
            }
        }
    }

    fn handle_state(
        &mut self,
        loc: Location,
        state: WindowState,
        action: ToggleAction,
    ) {
        match state {
            WindowState::Fullscreen => {
                if self.set_fullscreen(loc, Toggle::from(action)) {
                    self.arrange(loc.monitor, loc.desktop);
                }
            },
            WindowState::DemandsAttention => {
                if self.set_urgency(loc, Toggle::from(action)) {
                    self.publish_status();
                    self.arrange(loc.monitor, loc.desktop);
                }
            },
            _ => {},
        }
    }

    fn handle_activate_request(
        &mut self,
        window: Window,
    ) {
        debug!("ACTIVATE_REQUEST for window {:#0x}", window);

        let loc = match self.locate_window(window) {
            Some(loc) => loc,
            None => return,
        };

        if let Some(focus) = self.focused_node(loc.monitor, loc.desktop) {
            let focus = Location {
                node: focus,
                ..loc
            };

            let focus_fullscreen = self
                .client(focus)
                .map_or(false, |client| client.is_fullscreen());

            if focus.node != loc.node && focus_fullscreen {
                self.set_fullscreen(focus, Toggle::Off);
            }
        }

        self.select_monitor(loc.monitor);
        self.select_desktop(loc.desktop);
        self.focus_node(loc);
        self.arrange(loc.monitor, loc.desktop);
    }
}
