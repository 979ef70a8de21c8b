use crate::binding::MouseBindings;
use crate::change::Toggle;
use crate::client::Client;
use crate::defaults::Settings;
use crate::desktop::Desktop;
use crate::identify::Index;
use crate::identify::NodeId;
use crate::location::Location;
use crate::monitor::Monitor;
use crate::pointer::FrozenPointer;
use crate::status::Status;

use winsys::connection::Connection;
use winsys::geometry::Dim;
use winsys::geometry::Pos;
use winsys::geometry::Region;
use winsys::input::MouseShortcut;
use winsys::screen::Screen;
use winsys::window::Window;
use winsys::window::WindowState;

pub struct Model<'a> {
    pub(crate) conn: &'a mut dyn Connection,
    pub(crate) settings: Settings,
    pub(crate) monitors: Vec<Monitor>,
    pub(crate) selected: Index,
    pub(crate) frozen: FrozenPointer,
    pub(crate) mouse_bindings: MouseBindings,
    pub(crate) last_pointer_pos: Pos,
    status: Status,
    running: bool,
}

impl<'a> Model<'a> {
    pub fn new(
        conn: &'a mut dyn Connection,
        settings: Settings,
        mouse_bindings: MouseBindings,
    ) -> Self {
        let status = Status::new(settings.status_fifo);

        Self::init(Self {
            conn,
            settings,
            monitors: Vec::new(),
            selected: 0,
            frozen: FrozenPointer::default(),
            mouse_bindings,
            last_pointer_pos: Pos::default(),
            status,
            running: true,
        })
    }

    fn init(mut model: Self) -> Self {
        info!("initializing window manager");
        model.acquire_monitors();

        let desktop_names: Vec<&str> = model
            .monitors
            .iter()
            .flat_map(|monitor| monitor.desktops().iter().map(Desktop::name))
            .collect();

        model.conn.init_wm_properties(WM_NAME!(), &desktop_names);
        model.conn.set_current_desktop(0);

        model.conn.grab_bindings(
            &model
                .mouse_bindings
                .keys()
                .collect::<Vec<&MouseShortcut>>(),
        );

        model.publish_status();
        model
    }

    fn acquire_monitors(&mut self) {
        info!("acquiring monitors");

        let desktop_names = self.settings.desktop_names;
        let mut screens = self.conn.connected_outputs();

        if screens.is_empty() {
            warn!("no connected outputs reported");
            screens.push(Screen::new(
                Region {
                    pos: Pos::default(),
                    dim: Dim {
                        w: 1,
                        h: 1,
                    },
                },
                0,
            ));
        }

        self.monitors = screens
            .into_iter()
            .enumerate()
            .map(|(i, screen)| Monitor::new(screen, i, desktop_names))
            .collect();

        self.selected = 0;
    }

    pub fn run(&mut self) {
        while self.running {
            if let Some(event) = self.conn.step() {
                trace!("received event: {:?}", event);
                self.handle_event(event);
            }

            if !self.conn.flush() {
                warn!("lost connection to the display server");
                self.running = false;
            }
        }

        self.conn.release_pointer();
        self.conn.cleanup();
    }

    #[inline]
    pub fn desktop(
        &self,
        monitor: Index,
        desktop: Index,
    ) -> Option<&Desktop> {
        self.monitors.get(monitor)?.desktop(desktop)
    }

    #[inline]
    pub fn desktop_mut(
        &mut self,
        monitor: Index,
        desktop: Index,
    ) -> Option<&mut Desktop> {
        self.monitors.get_mut(monitor)?.desktop_mut(desktop)
    }

    #[inline]
    pub fn client(
        &self,
        loc: Location,
    ) -> Option<&Client> {
        self.desktop(loc.monitor, loc.desktop)?
            .tree()
            .client(loc.node)
    }

    /// The active desktop of the selected monitor.
    #[inline]
    pub fn selected_desktop(&self) -> Index {
        self.monitors
            .get(self.selected)
            .map_or(0, Monitor::active_desktop)
    }

    #[inline]
    pub fn is_visible(
        &self,
        monitor: Index,
        desktop: Index,
    ) -> bool {
        self.monitors
            .get(monitor)
            .map_or(false, |m| m.active_desktop() == desktop)
    }

    pub fn locate_window(
        &self,
        window: Window,
    ) -> Option<Location> {
        self.monitors
            .iter()
            .enumerate()
            .find_map(|(m, monitor)| {
                monitor
                    .desktops()
                    .iter()
                    .enumerate()
                    .find_map(|(d, desktop)| {
                        desktop.tree().client_node(window).map(|node| Location {
                            monitor: m,
                            desktop: d,
                            node,
                        })
                    })
            })
    }

    /// Resolves a desktop number, counted across all monitors, to a
    /// monitor and desktop index.
    pub fn locate_desktop(
        &self,
        mut index: usize,
    ) -> Option<(Index, Index)> {
        for (m, monitor) in self.monitors.iter().enumerate() {
            if index < monitor.desktops().len() {
                return Some((m, index));
            }

            index -= monitor.desktops().len();
        }

        None
    }

    pub fn desktop_number(
        &self,
        monitor: Index,
        desktop: Index,
    ) -> usize {
        self.monitors
            .iter()
            .take(monitor)
            .map(|m| m.desktops().len())
            .sum::<usize>()
            + desktop
    }

    pub fn monitor_at(
        &self,
        pos: Pos,
    ) -> Option<Index> {
        self.monitors
            .iter()
            .position(|monitor| monitor.contains(pos))
    }

    pub fn manage(
        &mut self,
        window: Window,
    ) {
        if self.locate_window(window).is_some() {
            return;
        }

        if !self.conn.must_manage_window(window) {
            debug!("not managing window {:#0x}", window);
            self.conn.map_window(window);
            return;
        }

        info!("managing window {:#0x}", window);

        let floating_region = self
            .conn
            .get_window_geometry(window)
            .unwrap_or_default()
            .with_minimum_dim(&Dim {
                w: 1,
                h: 1,
            });

        let client = Client::new(window, floating_region);

        if let Some(hints) = self.conn.get_icccm_window_hints(window) {
            client.set_urgent(Toggle::from(hints.urgent));
        }

        let monitor = self.selected;
        let desktop = self.selected_desktop();
        let ratio = self.settings.split_ratio;

        let node = match self.desktop_mut(monitor, desktop) {
            Some(target) => {
                let focus = target.focus();
                target.tree_mut().insert(client, focus, ratio)
            },
            None => return,
        };

        let loc = Location {
            monitor,
            desktop,
            node,
        };

        self.conn.init_window(window);
        self.conn
            .set_window_border_width(window, self.settings.border_width);
        self.conn
            .set_window_desktop(window, self.desktop_number(monitor, desktop));

        self.update_client_list();
        self.arrange(monitor, desktop);
        self.conn.map_window(window);
        self.focus_node(loc);
        self.publish_status();
    }

    /// Removes the node at `loc` from its tree, moving the desktop's focus
    /// to a remaining leaf if needed.
    pub fn remove_node(
        &mut self,
        loc: Location,
    ) -> Option<Client> {
        let desktop = self.desktop_mut(loc.monitor, loc.desktop)?;
        let was_focused = desktop.focus() == Some(loc.node);
        let client = desktop.tree_mut().remove(loc.node)?;

        if was_focused {
            let next = desktop.tree().leaves().last().copied();
            desktop.set_focus(next);
        }

        info!("removed window {:#0x}", client.window());
        self.update_client_list();

        if was_focused && loc.monitor == self.selected && self.is_visible(loc.monitor, loc.desktop)
        {
            match self.desktop(loc.monitor, loc.desktop).and_then(Desktop::focus) {
                Some(node) => self.focus_node(Location {
                    node,
                    ..loc
                }),
                None => self.conn.unfocus(),
            }
        }

        Some(client)
    }

    /// Forgets the window at `loc` and lays out what remains.
    pub fn unmanage(
        &mut self,
        loc: Location,
    ) {
        let window = self.client(loc).map(Client::window);

        if window.is_some() && self.frozen.window == window {
            debug!("dragged window vanished, releasing pointer");
            self.conn.release_pointer();
            self.frozen.reset();
        }

        if self.remove_node(loc).is_some() {
            self.arrange(loc.monitor, loc.desktop);
            self.publish_status();
        }
    }

    /// Moves the node at `from` to the given desktop, where it splits the
    /// focused leaf. Returns its new location.
    pub fn transfer_node(
        &mut self,
        from: Location,
        monitor: Index,
        desktop: Index,
    ) -> Option<Location> {
        if from.monitor == monitor && from.desktop == desktop {
            return Some(from);
        }

        self.desktop(monitor, desktop)?;

        let was_visible = self.is_visible(from.monitor, from.desktop);
        let client = self.remove_node(from)?;
        let window = client.window();
        let ratio = self.settings.split_ratio;

        let node = match self.desktop_mut(monitor, desktop) {
            Some(target) => {
                let focus = target.focus();
                let node = target.tree_mut().insert(client, focus, ratio);
                target.set_focus(Some(node));
                node
            },
            None => return None,
        };

        info!(
            "transferred window {:#0x} to desktop {} on monitor {}",
            window, desktop, monitor
        );

        self.conn
            .set_window_desktop(window, self.desktop_number(monitor, desktop));
        self.update_client_list();

        let to = Location {
            monitor,
            desktop,
            node,
        };

        match (was_visible, self.is_visible(monitor, desktop)) {
            (true, false) => {
                if let Some(client) = self.client(to) {
                    client.expect_unmap();
                }

                self.conn.unmap_window(window);
            },
            (false, true) => self.conn.map_window(window),
            _ => {},
        }

        self.arrange(from.monitor, from.desktop);
        self.arrange(monitor, desktop);

        Some(to)
    }

    pub fn update_client_list(&self) {
        let clients: Vec<Window> = self
            .monitors
            .iter()
            .flat_map(|monitor| monitor.desktops())
            .flat_map(|desktop| desktop.tree().clients().map(Client::window))
            .collect();

        self.conn.update_client_list(&clients);
    }

    /// Lays out the desktop if it is shown on its monitor.
    pub fn arrange(
        &mut self,
        monitor: Index,
        desktop: Index,
    ) {
        if !self.is_visible(monitor, desktop) {
            return;
        }

        debug!("arranging desktop {} on monitor {}", desktop, monitor);

        let gap = self.settings.window_gap;
        let border_width = self.settings.border_width;

        let (placements, raised) = match self.monitors.get_mut(monitor) {
            Some(m) => {
                let screen = m.full_region();

                match m.desktop_mut(desktop) {
                    Some(d) => {
                        let placements = d.tree_mut().arrange(screen, gap, border_width);
                        let raised: Vec<Window> = d
                            .tree()
                            .clients()
                            .filter(|client| !client.is_tiled())
                            .map(Client::window)
                            .collect();

                        (placements, raised)
                    },
                    None => return,
                }
            },
            None => return,
        };

        for placement in placements {
            self.conn
                .set_window_border_width(placement.window, placement.border_width);
            self.conn.place_window(placement.window, &placement.region);
        }

        for window in raised {
            self.conn.stack_window_above(window);
        }

        self.draw_borders(monitor, desktop);
    }

    pub fn draw_border(
        &self,
        loc: Location,
    ) {
        let focused = self
            .desktop(loc.monitor, loc.desktop)
            .and_then(Desktop::focus)
            == Some(loc.node);

        if let Some(client) = self.client(loc) {
            let color = if client.is_urgent() {
                self.settings.urgent_border_color
            } else if focused && loc.monitor == self.selected {
                self.settings.focused_border_color
            } else if focused {
                self.settings.active_border_color
            } else {
                self.settings.normal_border_color
            };

            self.conn.set_window_border_color(client.window(), color);
        }
    }

    pub fn draw_borders(
        &self,
        monitor: Index,
        desktop: Index,
    ) {
        if let Some(d) = self.desktop(monitor, desktop) {
            for node in d.tree().leaves() {
                self.draw_border(Location {
                    monitor,
                    desktop,
                    node,
                });
            }
        }
    }

    /// Makes `loc` the focus of its desktop, giving it input focus if the
    /// desktop is shown.
    pub fn focus_node(
        &mut self,
        loc: Location,
    ) {
        let previous = match self.desktop_mut(loc.monitor, loc.desktop) {
            Some(desktop) if desktop.tree().client(loc.node).is_some() => {
                let previous = desktop.focus();
                desktop.set_focus(Some(loc.node));
                previous
            },
            _ => return,
        };

        if let Some(client) = self.client(loc) {
            let window = client.window();
            debug!("focusing window {:#0x}", window);

            if client.set_urgent(Toggle::Off) {
                self.conn
                    .set_window_state(window, WindowState::DemandsAttention, false);
                self.publish_status();
            }

            if self.is_visible(loc.monitor, loc.desktop) {
                self.conn.focus_window(window);

                if let Some(client) = self.client(loc) {
                    if !client.is_tiled() {
                        self.conn.stack_window_above(window);
                    }
                }
            }
        }

        if let Some(previous) = previous.filter(|&previous| previous != loc.node) {
            self.draw_border(Location {
                node: previous,
                ..loc
            });
        }

        self.draw_border(loc);
    }

    pub fn select_monitor(
        &mut self,
        monitor: Index,
    ) {
        if monitor == self.selected || monitor >= self.monitors.len() {
            return;
        }

        info!("selecting monitor {}", monitor);

        let previous = self.selected;
        self.selected = monitor;

        for &m in &[previous, monitor] {
            let d = self.monitors[m].active_desktop();
            self.draw_borders(m, d);
        }

        self.conn
            .set_current_desktop(self.desktop_number(monitor, self.selected_desktop()));
        self.publish_status();
    }

    /// Shows `desktop` on the selected monitor, hiding the one it
    /// replaces.
    pub fn select_desktop(
        &mut self,
        desktop: Index,
    ) {
        let monitor = self.selected;

        let previous = match self.monitors.get_mut(monitor) {
            Some(m) if desktop < m.desktops().len() && desktop != m.active_desktop() => {
                let previous = m.active_desktop();
                m.set_active_desktop(desktop);
                previous
            },
            _ => return,
        };

        info!("selecting desktop {} on monitor {}", desktop, monitor);

        let shown: Vec<Window> = self
            .desktop(monitor, desktop)
            .map_or(Vec::new(), |d| d.tree().clients().map(Client::window).collect());

        let hidden: Vec<Window> = self.desktop(monitor, previous).map_or(Vec::new(), |d| {
            d.tree()
                .clients()
                .map(|client| {
                    client.expect_unmap();
                    client.window()
                })
                .collect()
        });

        for window in shown {
            self.conn.map_window(window);
        }

        for window in hidden {
            self.conn.unmap_window(window);
        }

        self.conn
            .set_current_desktop(self.desktop_number(monitor, desktop));
        self.arrange(monitor, desktop);

        match self.desktop(monitor, desktop).and_then(Desktop::focus) {
            Some(node) => self.focus_node(Location {
                monitor,
                desktop,
                node,
            }),
            None => self.conn.unfocus(),
        }

        self.publish_status();
    }

    /// Focuses the window under the pointer, unless it already holds the
    /// focus of the selected desktop.
    pub fn window_focus(
        &mut self,
        window: Window,
    ) {
        let loc = match self.locate_window(window) {
            Some(loc) => loc,
            None => return,
        };

        let already_focused = loc.monitor == self.selected
            && loc.desktop == self.selected_desktop()
            && self
                .desktop(loc.monitor, loc.desktop)
                .and_then(Desktop::focus)
                == Some(loc.node);

        if already_focused {
            return;
        }

        self.select_monitor(loc.monitor);
        self.select_desktop(loc.desktop);
        self.focus_node(loc);

        if let Some((pos, _)) = self.conn.query_pointer() {
            self.last_pointer_pos = pos;
        }
    }

    /// Returns whether the fullscreen flag changed.
    pub fn set_fullscreen(
        &mut self,
        loc: Location,
        toggle: Toggle,
    ) -> bool {
        match self.client(loc) {
            Some(client) if client.set_fullscreen(toggle) => {
                let window = client.window();
                let fullscreen = client.is_fullscreen();

                info!(
                    "{} fullscreen for window {:#0x}",
                    if fullscreen { "enabling" } else { "disabling" },
                    window
                );

                self.conn
                    .set_window_state(window, WindowState::Fullscreen, fullscreen);

                true
            },
            _ => false,
        }
    }

    /// Returns whether the floating flag changed. A client that starts
    /// floating takes its current tiled region as floating region.
    pub fn set_floating(
        &mut self,
        loc: Location,
        toggle: Toggle,
    ) -> bool {
        match self.client(loc) {
            Some(client) => {
                let was_tiled = client.is_tiled();
                let tiled_region = client.tiled_region();
                let changed = client.set_floating(toggle);

                if changed && was_tiled && client.is_floating() {
                    client.set_floating_region(tiled_region);
                }

                changed
            },
            None => false,
        }
    }

    /// Returns whether the urgency flag changed.
    pub fn set_urgency(
        &mut self,
        loc: Location,
        toggle: Toggle,
    ) -> bool {
        match self.client(loc) {
            Some(client) if client.set_urgent(toggle) => {
                self.conn.set_window_state(
                    client.window(),
                    WindowState::DemandsAttention,
                    client.is_urgent(),
                );

                true
            },
            _ => false,
        }
    }

    pub fn focused_node(
        &self,
        monitor: Index,
        desktop: Index,
    ) -> Option<NodeId> {
        self.desktop(monitor, desktop).and_then(Desktop::focus)
    }

    pub fn publish_status(&self) {
        self.status
            .publish(&Status::format(&self.monitors, self.selected));
    }
}
