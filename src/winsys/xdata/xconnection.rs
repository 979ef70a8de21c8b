use crate::connection::Connection;
use crate::event::ConfigureRequest;
use crate::event::CrossingMode;
use crate::event::Event;
use crate::event::PropertyKind;
use crate::event::StackMode;
use crate::event::ToggleAction;
use crate::geometry::Dim;
use crate::geometry::Pos;
use crate::geometry::Region;
use crate::hints::Hints;
use crate::input::Button;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::input::MouseShortcut;
use crate::screen::Screen;
use crate::window::Window;
use crate::window::WindowState;
use crate::xdata::input::mask_from_modifiers;
use crate::xdata::input::modifiers_from_state;
use crate::Result;

use std::cell::Cell;
use std::collections::HashMap;
use std::convert::TryFrom;

use x11rb::connection;
use x11rb::cursor::Handle as CursorHandle;
use x11rb::errors::ReplyError;
use x11rb::properties;
use x11rb::protocol::randr;
use x11rb::protocol::xproto;
use x11rb::protocol::xproto::ConnectionExt;
use x11rb::protocol::xproto::EventMask;
use x11rb::protocol::xproto::ModMask;
use x11rb::protocol::ErrorKind;
use x11rb::protocol::Event as XEvent;
use x11rb::resource_manager::Database;
use x11rb::wrapper::ConnectionExt as _;

use anyhow::anyhow;

type Atom = u32;

x11rb::atom_manager! {
    pub Atoms: AtomsCookie {
        ATOM,
        CARDINAL,
        WINDOW,
        UTF8_STRING,

        // ICCCM client properties
        WM_NAME,
        WM_CLASS,
        WM_HINTS,

        // EWMH root properties
        _NET_SUPPORTED,
        _NET_CLIENT_LIST,
        _NET_NUMBER_OF_DESKTOPS,
        _NET_CURRENT_DESKTOP,
        _NET_DESKTOP_NAMES,
        _NET_ACTIVE_WINDOW,
        _NET_SUPPORTING_WM_CHECK,

        // EWMH application properties
        _NET_WM_NAME,
        _NET_WM_DESKTOP,
        _NET_WM_WINDOW_TYPE,
        _NET_WM_STATE,
        _NET_WM_PID,

        // EWMH window states
        _NET_WM_STATE_MODAL,
        _NET_WM_STATE_STICKY,
        _NET_WM_STATE_MAXIMIZED_VERT,
        _NET_WM_STATE_MAXIMIZED_HORZ,
        _NET_WM_STATE_SHADED,
        _NET_WM_STATE_SKIP_TASKBAR,
        _NET_WM_STATE_SKIP_PAGER,
        _NET_WM_STATE_HIDDEN,
        _NET_WM_STATE_FULLSCREEN,
        _NET_WM_STATE_ABOVE,
        _NET_WM_STATE_BELOW,
        _NET_WM_STATE_DEMANDS_ATTENTION,

        // EWMH window types
        _NET_WM_WINDOW_TYPE_DESKTOP,
        _NET_WM_WINDOW_TYPE_DOCK,
        _NET_WM_WINDOW_TYPE_TOOLBAR,
        _NET_WM_WINDOW_TYPE_NOTIFICATION,
    }
}

pub struct XConnection<'conn, Conn: connection::Connection> {
    conn: &'conn Conn,
    atoms: Atoms,
    state_map: HashMap<Atom, WindowState>,
    screen: xproto::Screen,
    check_window: Window,
    confined: Cell<bool>,
    root_event_mask: EventMask,
    window_event_mask: EventMask,
    mouse_event_mask: EventMask,
}

impl<'conn, Conn: connection::Connection> XConnection<'conn, Conn> {
    pub fn new(
        conn: &'conn Conn,
        screen_num: usize,
    ) -> Result<Self> {
        let screen = conn.setup().roots[screen_num].clone();
        let root = screen.root;

        let aux = xproto::ChangeWindowAttributesAux::default()
            .event_mask(EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY);

        let res = conn.change_window_attributes(root, &aux)?.check();
        if let Err(ReplyError::X11Error(err)) = res {
            if err.error_kind == ErrorKind::Access {
                return Err(anyhow!("another window manager is already running"));
            } else {
                return Err(anyhow!("unable to set up window manager"));
            }
        }

        let atoms = Atoms::new(conn)?.reply()?;
        let check_window = conn.generate_id()?;

        let state_map: HashMap<Atom, WindowState> = map!(
            atoms._NET_WM_STATE_MODAL => WindowState::Modal,
            atoms._NET_WM_STATE_STICKY => WindowState::Sticky,
            atoms._NET_WM_STATE_MAXIMIZED_VERT => WindowState::MaximizedVert,
            atoms._NET_WM_STATE_MAXIMIZED_HORZ => WindowState::MaximizedHorz,
            atoms._NET_WM_STATE_SHADED => WindowState::Shaded,
            atoms._NET_WM_STATE_SKIP_TASKBAR => WindowState::SkipTaskbar,
            atoms._NET_WM_STATE_SKIP_PAGER => WindowState::SkipPager,
            atoms._NET_WM_STATE_HIDDEN => WindowState::Hidden,
            atoms._NET_WM_STATE_FULLSCREEN => WindowState::Fullscreen,
            atoms._NET_WM_STATE_ABOVE => WindowState::Above,
            atoms._NET_WM_STATE_BELOW => WindowState::Below,
            atoms._NET_WM_STATE_DEMANDS_ATTENTION => WindowState::DemandsAttention,
        );

        conn.create_window(
            x11rb::COPY_DEPTH_FROM_PARENT,
            check_window,
            root,
            -1,
            -1,
            1,
            1,
            0,
            xproto::WindowClass::INPUT_ONLY,
            x11rb::COPY_FROM_PARENT,
            &xproto::CreateWindowAux::default().override_redirect(1),
        )?;

        conn.map_window(check_window)?;
        conn.configure_window(
            check_window,
            &xproto::ConfigureWindowAux::default().stack_mode(xproto::StackMode::BELOW),
        )?;

        let database = Database::new_from_default(conn).ok();
        if let Some(ref database) = database {
            drop(
                CursorHandle::new(conn, screen_num, &database).map(|cookie| {
                    cookie.reply().map(|reply| {
                        let aux = xproto::ChangeWindowAttributesAux::default()
                            .cursor(reply.load_cursor(conn, "left_ptr").ok());

                        drop(conn.change_window_attributes(root, &aux));
                    })
                }),
            );
        }

        let root_event_mask: EventMask = EventMask::PROPERTY_CHANGE
            | EventMask::SUBSTRUCTURE_REDIRECT
            | EventMask::SUBSTRUCTURE_NOTIFY
            | EventMask::BUTTON_PRESS
            | EventMask::POINTER_MOTION;

        let window_event_mask: EventMask = EventMask::PROPERTY_CHANGE
            | EventMask::STRUCTURE_NOTIFY
            | EventMask::ENTER_WINDOW;

        let mouse_event_mask: EventMask =
            EventMask::BUTTON_PRESS | EventMask::BUTTON_RELEASE | EventMask::BUTTON_MOTION;

        Ok(Self {
            conn,
            atoms,
            state_map,
            screen,
            check_window,
            confined: Cell::new(false),
            root_event_mask,
            window_event_mask,
            mouse_event_mask,
        })
    }

    pub fn window_is_any_of_types(
        &self,
        window: Window,
        types: &[Atom],
    ) -> bool {
        self.conn
            .get_property(
                false,
                window,
                self.atoms._NET_WM_WINDOW_TYPE,
                self.atoms.ATOM,
                0,
                std::u32::MAX,
            )
            .map_or(false, |cookie| {
                cookie.reply().map_or(false, |reply| {
                    reply.value32().map_or(false, |mut window_types| {
                        window_types.any(|type_| types.contains(&type_))
                    })
                })
            })
    }

    pub fn window_is_any_of_states(
        &self,
        window: Window,
        states: &[Atom],
    ) -> bool {
        self.conn
            .get_property(
                false,
                window,
                self.atoms._NET_WM_STATE,
                self.atoms.ATOM,
                0,
                std::u32::MAX,
            )
            .map_or(false, |cookie| {
                cookie.reply().map_or(false, |reply| {
                    reply.value32().map_or(false, |mut window_states| {
                        window_states.any(|state| states.contains(&state))
                    })
                })
            })
    }

    #[inline]
    fn get_window_state_from_atom(
        &self,
        atom: Atom,
    ) -> Option<WindowState> {
        self.state_map.get(&atom).copied()
    }

    #[inline]
    fn get_atom_from_window_state(
        &self,
        state: WindowState,
    ) -> Atom {
        match state {
            WindowState::Modal => self.atoms._NET_WM_STATE_MODAL,
            WindowState::Sticky => self.atoms._NET_WM_STATE_STICKY,
            WindowState::MaximizedVert => self.atoms._NET_WM_STATE_MAXIMIZED_VERT,
            WindowState::MaximizedHorz => self.atoms._NET_WM_STATE_MAXIMIZED_HORZ,
            WindowState::Shaded => self.atoms._NET_WM_STATE_SHADED,
            WindowState::SkipTaskbar => self.atoms._NET_WM_STATE_SKIP_TASKBAR,
            WindowState::SkipPager => self.atoms._NET_WM_STATE_SKIP_PAGER,
            WindowState::Hidden => self.atoms._NET_WM_STATE_HIDDEN,
            WindowState::Fullscreen => self.atoms._NET_WM_STATE_FULLSCREEN,
            WindowState::Above => self.atoms._NET_WM_STATE_ABOVE,
            WindowState::Below => self.atoms._NET_WM_STATE_BELOW,
            WindowState::DemandsAttention => self.atoms._NET_WM_STATE_DEMANDS_ATTENTION,
        }
    }

    fn set_window_state_atom(
        &self,
        window: Window,
        state_atom: Atom,
        on: bool,
    ) {
        if on {
            if self.window_is_any_of_states(window, &[state_atom]) {
                return;
            }

            drop(self.conn.change_property32(
                xproto::PropMode::APPEND,
                window,
                self.atoms._NET_WM_STATE,
                xproto::AtomEnum::ATOM,
                &[state_atom],
            ));
        } else {
            let mut states = self
                .conn
                .get_property(
                    false,
                    window,
                    self.atoms._NET_WM_STATE,
                    self.atoms.ATOM,
                    0,
                    std::u32::MAX,
                )
                .map_or(Vec::with_capacity(0), |cookie| {
                    cookie.reply().map_or(Vec::with_capacity(0), |reply| {
                        reply
                            .value32()
                            .map_or(Vec::with_capacity(0), |window_states| {
                                window_states.collect()
                            })
                    })
                });

            states.retain(|&state| state != state_atom);

            drop(self.conn.change_property32(
                xproto::PropMode::REPLACE,
                window,
                self.atoms._NET_WM_STATE,
                xproto::AtomEnum::ATOM,
                &states,
            ));
        }
    }

    #[inline]
    fn target_window(
        &self,
        event: Window,
        child: Window,
    ) -> Option<Window> {
        if event == self.screen.root || event == x11rb::NONE {
            if child == x11rb::NONE {
                None
            } else {
                Some(child)
            }
        } else {
            Some(event)
        }
    }

    #[inline]
    fn on_button_press(
        &self,
        event: &xproto::ButtonPressEvent,
    ) -> Option<Event> {
        Some(Event::Mouse {
            event: MouseEvent {
                kind: MouseEventKind::Press,
                shortcut: MouseShortcut::new(
                    Button::try_from(event.detail).ok()?,
                    modifiers_from_state(event.state),
                ),
                window: self.target_window(event.event, event.child),
                root_rpos: Pos {
                    x: event.root_x as i32,
                    y: event.root_y as i32,
                },
            },
        })
    }

    #[inline]
    fn on_button_release(
        &self,
        event: &xproto::ButtonReleaseEvent,
    ) -> Option<Event> {
        Some(Event::Mouse {
            event: MouseEvent {
                kind: MouseEventKind::Release,
                shortcut: MouseShortcut::new(
                    Button::try_from(event.detail).ok()?,
                    modifiers_from_state(event.state),
                ),
                window: self.target_window(event.event, event.child),
                root_rpos: Pos {
                    x: event.root_x as i32,
                    y: event.root_y as i32,
                },
            },
        })
    }

    #[inline]
    fn on_motion_notify(
        &self,
        event: &xproto::MotionNotifyEvent,
    ) -> Option<Event> {
        Some(Event::Mouse {
            event: MouseEvent {
                kind: MouseEventKind::Motion,
                shortcut: MouseShortcut::new(Button::Left, modifiers_from_state(event.state)),
                window: self.target_window(event.event, event.child),
                root_rpos: Pos {
                    x: event.root_x as i32,
                    y: event.root_y as i32,
                },
            },
        })
    }

    #[inline]
    fn on_map_request(
        &self,
        event: &xproto::MapRequestEvent,
    ) -> Option<Event> {
        Some(Event::MapRequest {
            window: event.window,
        })
    }

    #[inline]
    fn on_enter_notify(
        &self,
        event: &xproto::EnterNotifyEvent,
    ) -> Option<Event> {
        Some(Event::Enter {
            window: event.event,
            root_rpos: Pos {
                x: event.root_x as i32,
                y: event.root_y as i32,
            },
            mode: match event.mode {
                xproto::NotifyMode::GRAB => CrossingMode::Grab,
                xproto::NotifyMode::UNGRAB => CrossingMode::Ungrab,
                xproto::NotifyMode::WHILE_GRABBED => CrossingMode::WhileGrabbed,
                _ => CrossingMode::Normal,
            },
        })
    }

    #[inline]
    fn on_destroy_notify(
        &self,
        event: &xproto::DestroyNotifyEvent,
    ) -> Option<Event> {
        Some(Event::Destroy {
            window: event.window,
        })
    }

    #[inline]
    fn on_unmap_notify(
        &self,
        event: &xproto::UnmapNotifyEvent,
    ) -> Option<Event> {
        Some(Event::Unmap {
            window: event.window,
        })
    }

    #[inline]
    fn on_configure_request(
        &self,
        event: &xproto::ConfigureRequestEvent,
    ) -> Option<Event> {
        let mask = event.value_mask;
        let has = |field: xproto::ConfigWindow| mask & u16::from(field) != 0;

        let request = ConfigureRequest {
            x: Some(event.x as i32).filter(|_| has(xproto::ConfigWindow::X)),
            y: Some(event.y as i32).filter(|_| has(xproto::ConfigWindow::Y)),
            width: Some(event.width as i32).filter(|_| has(xproto::ConfigWindow::WIDTH)),
            height: Some(event.height as i32).filter(|_| has(xproto::ConfigWindow::HEIGHT)),
            border_width: Some(event.border_width as u32)
                .filter(|_| has(xproto::ConfigWindow::BORDER_WIDTH)),
            sibling: Some(event.sibling).filter(|_| has(xproto::ConfigWindow::SIBLING)),
            stack_mode: if has(xproto::ConfigWindow::STACK_MODE) {
                Some(match event.stack_mode {
                    xproto::StackMode::ABOVE => StackMode::Above,
                    xproto::StackMode::BELOW => StackMode::Below,
                    xproto::StackMode::TOP_IF => StackMode::TopIf,
                    xproto::StackMode::BOTTOM_IF => StackMode::BottomIf,
                    _ => StackMode::Opposite,
                })
            } else {
                None
            },
        };

        Some(Event::ConfigureRequest {
            window: event.window,
            request,
        })
    }

    #[inline]
    fn on_property_notify(
        &self,
        event: &xproto::PropertyNotifyEvent,
    ) -> Option<Event> {
        let kind = if event.atom == self.atoms.WM_HINTS {
            PropertyKind::Hints
        } else if event.atom == self.atoms.WM_NAME || event.atom == self.atoms._NET_WM_NAME {
            PropertyKind::Name
        } else if event.atom == self.atoms.WM_CLASS {
            PropertyKind::Class
        } else {
            return None;
        };

        Some(Event::Property {
            window: event.window,
            kind,
        })
    }

    #[inline]
    fn on_client_message(
        &self,
        event: &xproto::ClientMessageEvent,
    ) -> Option<Event> {
        if event.format != 32 {
            return None;
        }

        let data = event.data.as_data32();

        if event.type_ == self.atoms._NET_CURRENT_DESKTOP {
            return Some(Event::DesktopRequest {
                index: data[0] as usize,
            });
        }

        if event.type_ == self.atoms._NET_WM_STATE {
            return Some(Event::StateRequest {
                window: event.window,
                action: match data[0] {
                    0 => ToggleAction::Remove,
                    1 => ToggleAction::Add,
                    2 => ToggleAction::Toggle,
                    _ => return None,
                },
                states: [
                    self.get_window_state_from_atom(data[1]),
                    self.get_window_state_from_atom(data[2]),
                ],
            });
        }

        if event.type_ == self.atoms._NET_ACTIVE_WINDOW {
            return Some(Event::ActivateRequest {
                window: event.window,
            });
        }

        None
    }
}

impl<'conn, Conn: connection::Connection> Connection for XConnection<'conn, Conn> {
    #[inline]
    fn flush(&self) -> bool {
        self.conn.flush().is_ok()
    }

    #[inline]
    fn step(&self) -> Option<Event> {
        self.conn
            .wait_for_event()
            .ok()
            .and_then(|event| match event {
                XEvent::ButtonPress(e) => self.on_button_press(&e),
                XEvent::ButtonRelease(e) => self.on_button_release(&e),
                XEvent::MotionNotify(e) => self.on_motion_notify(&e),
                XEvent::MapRequest(e) => self.on_map_request(&e),
                XEvent::EnterNotify(e) => self.on_enter_notify(&e),
                XEvent::DestroyNotify(e) => self.on_destroy_notify(&e),
                XEvent::UnmapNotify(e) => self.on_unmap_notify(&e),
                XEvent::ConfigureRequest(e) => self.on_configure_request(&e),
                XEvent::PropertyNotify(e) => self.on_property_notify(&e),
                XEvent::ClientMessage(e) => self.on_client_message(&e),
                _ => None,
            })
    }

    fn connected_outputs(&self) -> Vec<Screen> {
        let screens: Vec<Screen> = randr::get_screen_resources(self.conn, self.screen.root)
            .ok()
            .and_then(|cookie| cookie.reply().ok())
            .map_or(Vec::with_capacity(0), |reply| {
                reply
                    .crtcs
                    .into_iter()
                    .flat_map(|crtc| {
                        randr::get_crtc_info(self.conn, crtc, 0)
                            .ok()
                            .and_then(|cookie| cookie.reply().ok())
                    })
                    .map(|reply| {
                        Region::new(
                            reply.x as i32,
                            reply.y as i32,
                            reply.width as i32,
                            reply.height as i32,
                        )
                    })
                    .filter(|region| region.dim.w > 0 && region.dim.h > 0)
                    .enumerate()
                    .map(|(i, region)| Screen::new(region, i))
                    .collect()
            });

        if screens.is_empty() {
            let region = Region::new(
                0,
                0,
                self.screen.width_in_pixels as i32,
                self.screen.height_in_pixels as i32,
            );

            return vec![Screen::new(region, 0)];
        }

        screens
    }

    #[inline]
    fn query_pointer(&self) -> Option<(Pos, Option<Window>)> {
        let reply = self
            .conn
            .query_pointer(self.screen.root)
            .ok()?
            .reply()
            .ok()?;

        Some((
            Pos {
                x: reply.root_x as i32,
                y: reply.root_y as i32,
            },
            if reply.child == x11rb::NONE {
                None
            } else {
                Some(reply.child)
            },
        ))
    }

    #[inline]
    fn confine_pointer(&self) {
        if !self.confined.get() {
            if self
                .conn
                .grab_pointer(
                    false,
                    self.screen.root,
                    u32::from(EventMask::POINTER_MOTION | EventMask::BUTTON_RELEASE) as u16,
                    xproto::GrabMode::ASYNC,
                    xproto::GrabMode::ASYNC,
                    x11rb::NONE,
                    x11rb::NONE,
                    x11rb::CURRENT_TIME,
                )
                .is_ok()
            {
                self.confined.set(true);
            }
        }
    }

    #[inline]
    fn release_pointer(&self) {
        if self.confined.get() {
            drop(self.conn.ungrab_pointer(x11rb::CURRENT_TIME));
            self.confined.set(false);
        }
    }

    fn cleanup(&self) {
        drop(self.conn.ungrab_button(
            xproto::ButtonIndex::ANY,
            self.screen.root,
            xproto::ModMask::ANY,
        ));

        drop(self.conn.destroy_window(self.check_window));

        for &atom in &[
            self.atoms._NET_ACTIVE_WINDOW,
            self.atoms._NET_SUPPORTING_WM_CHECK,
            self.atoms._NET_WM_NAME,
            self.atoms.WM_CLASS,
            self.atoms._NET_SUPPORTED,
            self.atoms._NET_WM_PID,
            self.atoms._NET_CLIENT_LIST,
        ] {
            drop(self.conn.delete_property(self.screen.root, atom));
        }

        self.flush();
    }

    #[inline]
    fn init_window(
        &self,
        window: Window,
    ) {
        drop(self.conn.change_window_attributes(
            window,
            &xproto::ChangeWindowAttributesAux::default().event_mask(self.window_event_mask),
        ));
    }

    #[inline]
    fn map_window(
        &self,
        window: Window,
    ) {
        drop(self.conn.map_window(window));
    }

    #[inline]
    fn unmap_window(
        &self,
        window: Window,
    ) {
        drop(self.conn.unmap_window(window));
    }

    #[inline]
    fn place_window(
        &self,
        window: Window,
        region: &Region,
    ) {
        drop(
            self.conn.configure_window(
                window,
                &xproto::ConfigureWindowAux::default()
                    .x(region.pos.x as i32)
                    .y(region.pos.y as i32)
                    .width(region.dim.w as u32)
                    .height(region.dim.h as u32),
            ),
        );
    }

    #[inline]
    fn move_window(
        &self,
        window: Window,
        pos: Pos,
    ) {
        drop(
            self.conn.configure_window(
                window,
                &xproto::ConfigureWindowAux::default()
                    .x(pos.x as i32)
                    .y(pos.y as i32),
            ),
        );
    }

    fn configure_window(
        &self,
        window: Window,
        request: &ConfigureRequest,
    ) {
        let mut aux = xproto::ConfigureWindowAux::default();

        if let Some(x) = request.x {
            aux = aux.x(x);
        }

        if let Some(y) = request.y {
            aux = aux.y(y);
        }

        if let Some(width) = request.width {
            aux = aux.width(width as u32);
        }

        if let Some(height) = request.height {
            aux = aux.height(height as u32);
        }

        if let Some(border_width) = request.border_width {
            aux = aux.border_width(border_width);
        }

        if let Some(sibling) = request.sibling {
            aux = aux.sibling(sibling);
        }

        if let Some(stack_mode) = request.stack_mode {
            aux = aux.stack_mode(match stack_mode {
                StackMode::Above => xproto::StackMode::ABOVE,
                StackMode::Below => xproto::StackMode::BELOW,
                StackMode::TopIf => xproto::StackMode::TOP_IF,
                StackMode::BottomIf => xproto::StackMode::BOTTOM_IF,
                StackMode::Opposite => xproto::StackMode::OPPOSITE,
            });
        }

        drop(self.conn.configure_window(window, &aux));
    }

    #[inline]
    fn send_configure_notify(
        &self,
        window: Window,
        region: &Region,
        border_width: u32,
    ) {
        let event = xproto::ConfigureNotifyEvent {
            response_type: xproto::CONFIGURE_NOTIFY_EVENT,
            sequence: 0,
            event: window,
            window,
            above_sibling: x11rb::NONE,
            x: region.pos.x as i16,
            y: region.pos.y as i16,
            width: region.dim.w as u16,
            height: region.dim.h as u16,
            border_width: border_width as u16,
            override_redirect: false,
        };

        drop(
            self.conn
                .send_event(false, window, EventMask::STRUCTURE_NOTIFY, &event),
        );
    }

    #[inline]
    fn focus_window(
        &self,
        window: Window,
    ) {
        drop(
            self.conn
                .set_input_focus(xproto::InputFocus::PARENT, window, x11rb::CURRENT_TIME),
        );

        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            self.screen.root,
            self.atoms._NET_ACTIVE_WINDOW,
            xproto::AtomEnum::WINDOW,
            &[window],
        ));
    }

    #[inline]
    fn unfocus(&self) {
        drop(self.conn.set_input_focus(
            xproto::InputFocus::PARENT,
            self.check_window,
            x11rb::CURRENT_TIME,
        ));

        drop(
            self.conn
                .delete_property(self.screen.root, self.atoms._NET_ACTIVE_WINDOW),
        );
    }

    #[inline]
    fn stack_window_above(
        &self,
        window: Window,
    ) {
        drop(self.conn.configure_window(
            window,
            &xproto::ConfigureWindowAux::default().stack_mode(xproto::StackMode::ABOVE),
        ));
    }

    fn grab_bindings(
        &self,
        mouse_shortcuts: &[&MouseShortcut],
    ) {
        // also grab with the lock modifiers active
        for &m in &[0, u16::from(ModMask::M2), u16::from(ModMask::LOCK)] {
            for shortcut in mouse_shortcuts {
                let button = match xproto::ButtonIndex::try_from(u8::from(shortcut.button)) {
                    Ok(button) => button,
                    Err(_) => continue,
                };

                drop(self.conn.grab_button(
                    false,
                    self.screen.root,
                    u32::from(self.mouse_event_mask) as u16,
                    xproto::GrabMode::ASYNC,
                    xproto::GrabMode::ASYNC,
                    x11rb::NONE,
                    x11rb::NONE,
                    button,
                    mask_from_modifiers(&shortcut.modifiers) | m,
                ));
            }
        }

        drop(self.conn.change_window_attributes(
            self.screen.root,
            &xproto::ChangeWindowAttributesAux::default().event_mask(self.root_event_mask),
        ));

        self.flush();
    }

    #[inline]
    fn set_window_border_width(
        &self,
        window: Window,
        width: u32,
    ) {
        drop(self.conn.configure_window(
            window,
            &xproto::ConfigureWindowAux::default().border_width(width),
        ));
    }

    #[inline]
    fn set_window_border_color(
        &self,
        window: Window,
        color: u32,
    ) {
        drop(self.conn.change_window_attributes(
            window,
            &xproto::ChangeWindowAttributesAux::default().border_pixel(color),
        ));
    }

    #[inline]
    fn get_window_geometry(
        &self,
        window: Window,
    ) -> Result<Region> {
        let reply = self.conn.get_geometry(window)?.reply()?;

        Ok(Region {
            pos: Pos {
                x: reply.x as i32,
                y: reply.y as i32,
            },
            dim: Dim {
                w: reply.width as i32,
                h: reply.height as i32,
            },
        })
    }

    #[inline]
    fn must_manage_window(
        &self,
        window: Window,
    ) -> bool {
        let do_not_manage = self
            .conn
            .get_window_attributes(window)
            .map_or(false, |cookie| {
                cookie.reply().map_or(false, |reply| {
                    reply.override_redirect || reply.class == xproto::WindowClass::INPUT_ONLY
                })
            });

        if do_not_manage {
            return false;
        }

        let to_exclude = &[
            self.atoms._NET_WM_WINDOW_TYPE_DESKTOP,
            self.atoms._NET_WM_WINDOW_TYPE_DOCK,
            self.atoms._NET_WM_WINDOW_TYPE_TOOLBAR,
            self.atoms._NET_WM_WINDOW_TYPE_NOTIFICATION,
        ];

        !self.window_is_any_of_types(window, to_exclude)
    }

    #[inline]
    fn get_icccm_window_hints(
        &self,
        window: Window,
    ) -> Option<Hints> {
        let hints = properties::WmHints::get(self.conn, window)
            .ok()?
            .reply()
            .ok()?;

        Some(Hints::new(hints.urgent))
    }

    fn init_wm_properties(
        &self,
        wm_name: &str,
        desktop_names: &[&str],
    ) {
        let wm_instance_class_names = &[wm_name, wm_name];
        let wm_class = wm_instance_class_names.join("\0");

        drop(self.conn.change_property8(
            xproto::PropMode::REPLACE,
            self.check_window,
            self.atoms._NET_WM_NAME,
            self.atoms.UTF8_STRING,
            wm_name.as_bytes(),
        ));

        drop(self.conn.change_property8(
            xproto::PropMode::REPLACE,
            self.check_window,
            self.atoms.WM_CLASS,
            self.atoms.UTF8_STRING,
            wm_class.as_bytes(),
        ));

        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            self.check_window,
            self.atoms._NET_SUPPORTING_WM_CHECK,
            self.atoms.WINDOW,
            &[self.check_window],
        ));

        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            self.screen.root,
            self.atoms._NET_SUPPORTING_WM_CHECK,
            self.atoms.WINDOW,
            &[self.check_window],
        ));

        drop(self.conn.change_property8(
            xproto::PropMode::REPLACE,
            self.screen.root,
            self.atoms._NET_WM_NAME,
            self.atoms.UTF8_STRING,
            wm_name.as_bytes(),
        ));

        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            self.screen.root,
            self.atoms._NET_SUPPORTED,
            self.atoms.ATOM,
            &[
                self.atoms._NET_ACTIVE_WINDOW,
                self.atoms._NET_CLIENT_LIST,
                self.atoms._NET_CURRENT_DESKTOP,
                self.atoms._NET_DESKTOP_NAMES,
                self.atoms._NET_NUMBER_OF_DESKTOPS,
                self.atoms._NET_SUPPORTED,
                self.atoms._NET_SUPPORTING_WM_CHECK,
                self.atoms._NET_WM_DESKTOP,
                self.atoms._NET_WM_NAME,
                self.atoms._NET_WM_STATE,
                self.atoms._NET_WM_STATE_DEMANDS_ATTENTION,
                self.atoms._NET_WM_STATE_FULLSCREEN,
                self.atoms._NET_WM_WINDOW_TYPE,
            ],
        ));

        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            self.screen.root,
            self.atoms._NET_WM_PID,
            self.atoms.CARDINAL,
            &[std::process::id() as u32],
        ));

        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            self.screen.root,
            self.atoms._NET_NUMBER_OF_DESKTOPS,
            self.atoms.CARDINAL,
            &[desktop_names.len() as u32],
        ));

        drop(self.conn.change_property8(
            xproto::PropMode::REPLACE,
            self.screen.root,
            self.atoms._NET_DESKTOP_NAMES,
            self.atoms.UTF8_STRING,
            desktop_names.join("\0").as_bytes(),
        ));

        drop(
            self.conn
                .delete_property(self.screen.root, self.atoms._NET_CLIENT_LIST),
        );
    }

    #[inline]
    fn set_current_desktop(
        &self,
        index: usize,
    ) {
        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            self.screen.root,
            self.atoms._NET_CURRENT_DESKTOP,
            self.atoms.CARDINAL,
            &[index as u32],
        ));
    }

    #[inline]
    fn set_window_desktop(
        &self,
        window: Window,
        index: usize,
    ) {
        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            window,
            self.atoms._NET_WM_DESKTOP,
            self.atoms.CARDINAL,
            &[index as u32],
        ));
    }

    #[inline]
    fn set_window_state(
        &self,
        window: Window,
        state: WindowState,
        on: bool,
    ) {
        self.set_window_state_atom(window, self.get_atom_from_window_state(state), on);
    }

    #[inline]
    fn update_client_list(
        &self,
        clients: &[Window],
    ) {
        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            self.screen.root,
            self.atoms._NET_CLIENT_LIST,
            self.atoms.WINDOW,
            clients,
        ));
    }
}
