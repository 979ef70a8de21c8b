use crate::change::Toggle;
use crate::identify::Index;
use crate::identify::NodeId;
use crate::location::Location;
use crate::model::Model;
use crate::tree::SplitType;

use winsys::geometry::Dim;
use winsys::geometry::Grip;
use winsys::geometry::Pos;
use winsys::geometry::Region;
use winsys::window::Window;

use strum_macros::EnumIter;
use strum_macros::EnumString;
use strum_macros::ToString;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter, EnumString, ToString)]
#[strum(serialize_all = "snake_case")]
pub enum PointerAction {
    None,
    Focus,
    Move,
    ResizeSide,
    ResizeCorner,
    ResizeTiled,
    MoveTiled,
}

/// The state of an interactive pointer operation, captured when the
/// operation is armed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrozenPointer {
    pub action: PointerAction,
    pub position: Pos,
    pub region: Region,
    pub monitor: Index,
    pub desktop: Index,
    pub node: Option<NodeId>,
    pub window: Option<Window>,
    pub grip: Option<Grip>,
}

impl Default for FrozenPointer {
    fn default() -> Self {
        Self {
            action: PointerAction::None,
            position: Pos::default(),
            region: Region::default(),
            monitor: 0,
            desktop: 0,
            node: None,
            window: None,
            grip: None,
        }
    }
}

impl FrozenPointer {
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.action != PointerAction::None
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl<'a> Model<'a> {
    pub fn grab_pointer(
        &mut self,
        action: PointerAction,
    ) {
        debug!("GRAB_POINTER for action {}", action.to_string());

        let (pos, child) = match self.conn.query_pointer() {
            Some(reply) => reply,
            None => return,
        };

        let loc = child.and_then(|window| self.locate_window(window));

        if loc.is_none() && action != PointerAction::ResizeTiled {
            self.frozen.reset();
            return;
        }

        self.frozen = FrozenPointer {
            action,
            position: pos,
            ..Default::default()
        };

        if let Some(loc) = loc {
            self.frozen.monitor = loc.monitor;
            self.frozen.desktop = loc.desktop;
            self.frozen.node = Some(loc.node);
            self.frozen.window = child;
        }

        let armed = match (action, loc) {
            (PointerAction::Focus, Some(loc)) => {
                self.focus_node(loc);
                true
            },
            (PointerAction::Move, Some(loc))
            | (PointerAction::ResizeSide, Some(loc))
            | (PointerAction::ResizeCorner, Some(loc)) => self.freeze_floating(loc, pos),
            (PointerAction::ResizeTiled, _) => self.freeze_fence(pos),
            (PointerAction::MoveTiled, Some(loc)) => {
                self.client(loc).map_or(false, |client| client.is_tiled())
            },
            _ => false,
        };

        if armed {
            self.conn.confine_pointer();
        } else {
            self.frozen.reset();
        }
    }

    /// Prepares a floating move or resize. Tiled clients start floating at
    /// their tiled region; fullscreen clients are left alone.
    fn freeze_floating(
        &mut self,
        loc: Location,
        pos: Pos,
    ) -> bool {
        let (tiled, fullscreen) = match self.client(loc) {
            Some(client) => (client.is_tiled(), client.is_fullscreen()),
            None => return false,
        };

        if fullscreen {
            return false;
        }

        if tiled {
            self.set_floating(loc, Toggle::On);
            self.arrange(loc.monitor, loc.desktop);
        }

        let region = match self.client(loc) {
            Some(client) => client.floating_region(),
            None => return false,
        };

        self.frozen.region = region;
        self.frozen.grip = match self.frozen.action {
            PointerAction::ResizeSide => Some(Grip::Edge(region.nearest_edge(pos))),
            PointerAction::ResizeCorner => Some(Grip::Corner(region.nearest_corner(pos))),
            _ => None,
        };

        true
    }

    /// Picks the split of the selected desktop whose fence is within grip
    /// distance of `pos`.
    fn freeze_fence(
        &mut self,
        pos: Pos,
    ) -> bool {
        let monitor = self.selected;
        let desktop = self.selected_desktop();
        let grip = self.settings.fence_grip;

        let fence = self.desktop(monitor, desktop).and_then(|d| {
            d.tree()
                .nearest_fence(pos)
                .filter(|&(_, distance)| distance < grip)
                .and_then(|(id, _)| d.tree().node(id))
                .map(|node| (node.id(), node.region()))
        });

        match fence {
            Some((node, region)) => {
                self.frozen.monitor = monitor;
                self.frozen.desktop = desktop;
                self.frozen.node = Some(node);
                self.frozen.window = None;
                self.frozen.region = region;
                true
            },
            None => false,
        }
    }

    pub fn track_pointer(
        &mut self,
        pos: Pos,
    ) {
        let frozen = self.frozen;

        match frozen.action {
            PointerAction::None | PointerAction::Focus => {},
            PointerAction::Move => {
                if let Some((_, window)) = self.resolve_frozen_window() {
                    self.conn
                        .move_window(window, frozen.region.pos + frozen.position.dist(pos));
                }
            },
            PointerAction::ResizeSide | PointerAction::ResizeCorner => {
                if let (Some((loc, window)), Some(grip)) =
                    (self.resolve_frozen_window(), frozen.grip)
                {
                    let region = Self::resize_region(
                        frozen.region,
                        grip,
                        frozen.position.dist(pos).values(),
                    );

                    self.conn.place_window(window, &region);

                    if let Some(client) = self.client(loc) {
                        client.set_floating_region(region);
                    }

                    self.draw_border(loc);
                }
            },
            PointerAction::ResizeTiled => self.track_fence(pos),
            PointerAction::MoveTiled => {
                if let Some((loc, _)) = self.resolve_frozen_window() {
                    let target = self
                        .conn
                        .query_pointer()
                        .and_then(|(_, child)| child)
                        .and_then(|child| self.locate_window(child))
                        .filter(|target| {
                            target.monitor == loc.monitor && target.desktop == loc.desktop
                        })
                        .filter(|&target| {
                            self.client(target)
                                .map_or(false, |client| client.is_tiled())
                        });

                    if let Some(target) = target {
                        let swapped = self
                            .desktop_mut(loc.monitor, loc.desktop)
                            .map_or(false, |d| d.tree_mut().swap(loc.node, target.node));

                        if swapped {
                            self.arrange(loc.monitor, loc.desktop);
                        }
                    }
                }
            },
        }
    }

    /// Looks the dragged window up again; resets the frozen pointer if it
    /// is gone.
    fn resolve_frozen_window(&mut self) -> Option<(Location, Window)> {
        let resolved = self
            .frozen
            .window
            .and_then(|window| self.locate_window(window).map(|loc| (loc, window)));

        if resolved.is_none() {
            self.frozen.reset();
        }

        resolved
    }

    /// Moves exactly the edges the grip holds by `(dx, dy)`; width and
    /// height never drop below 1.
    fn resize_region(
        region: Region,
        grip: Grip,
        (dx, dy): (i32, i32),
    ) -> Region {
        let (mut pos, mut dim) = region.values();

        if grip.is_left_grip() {
            pos.x += dx;
            dim.w -= dx;
        } else if grip.is_right_grip() {
            dim.w += dx;
        }

        if grip.is_top_grip() {
            pos.y += dy;
            dim.h -= dy;
        } else if grip.is_bottom_grip() {
            dim.h += dy;
        }

        Region {
            pos,
            dim: Dim {
                w: std::cmp::max(1, dim.w),
                h: std::cmp::max(1, dim.h),
            },
        }
    }

    fn track_fence(
        &mut self,
        pos: Pos,
    ) {
        let frozen = self.frozen;
        let half_gap = self.settings.window_gap / 2;

        let split_type = frozen
            .node
            .and_then(|id| self.desktop(frozen.monitor, frozen.desktop)?.tree().node(id))
            .and_then(|node| node.split_type());

        let (node, split_type) = match (frozen.node, split_type) {
            (Some(node), Some(split_type)) => (node, split_type),
            _ => {
                self.frozen.reset();
                return;
            },
        };

        let rect = frozen.region;
        let ratio = match split_type {
            SplitType::Vertical if rect.dim.w > 0 => {
                (pos.x - rect.pos.x + half_gap) as f64 / rect.dim.w as f64
            },
            SplitType::Horizontal if rect.dim.h > 0 => {
                (pos.y - rect.pos.y + half_gap) as f64 / rect.dim.h as f64
            },
            _ => return,
        };

        if let Some(desktop) = self.desktop_mut(frozen.monitor, frozen.desktop) {
            desktop.tree_mut().set_ratio(node, ratio);
        }

        self.arrange(self.selected, self.selected_desktop());
    }

    pub fn ungrab_pointer(&mut self) {
        if !self.frozen.is_armed() {
            return;
        }

        let frozen = self.frozen;
        debug!("UNGRAB_POINTER for action {}", frozen.action.to_string());

        if frozen.action != PointerAction::ResizeTiled {
            if let Some((loc, window)) = self.resolve_frozen_window() {
                self.settle_window(loc, window);
            }
        }

        self.conn.release_pointer();
        self.frozen.reset();
    }

    /// Syncs a dropped window's floating region with the server and hands
    /// it to the monitor its center ended up on.
    fn settle_window(
        &mut self,
        loc: Location,
        window: Window,
    ) {
        let region = match self.client(loc) {
            Some(client) if client.is_floating() => {
                if let Ok(geometry) = self.conn.get_window_geometry(window) {
                    client.set_floating_region(geometry);
                }

                client.floating_region()
            },
            Some(client) => client.tiled_region(),
            None => return,
        };

        if let Some(monitor) = self.monitor_at(Pos::from_center_of_region(region)) {
            if monitor != loc.monitor {
                let desktop = self.monitors[monitor].active_desktop();

                if self.transfer_node(loc, monitor, desktop).is_some() {
                    self.select_monitor(monitor);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::MouseBindings;
    use crate::mock::MockConnection;
    use crate::mock::Request;

    use winsys::event::Event;
    use winsys::event::ToggleAction;
    use winsys::geometry::Corner;
    use winsys::geometry::Edge;
    use winsys::window::WindowState;

    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn floating_at(
        model: &mut Model<'_>,
        window: Window,
        region: Region,
    ) -> Location {
        let loc = model.locate_window(window).unwrap();
        model.set_floating(loc, Toggle::On);
        model.client(loc).unwrap().set_floating_region(region);
        model.arrange(loc.monitor, loc.desktop);
        loc
    }

    fn pos(
        x: i32,
        y: i32,
    ) -> Pos {
        Pos {
            x,
            y,
        }
    }

    #[test]
    fn action_names_parse() {
        assert_eq!(PointerAction::from_str("resize_corner").unwrap(), PointerAction::ResizeCorner);
        assert_eq!(PointerAction::MoveTiled.to_string(), "move_tiled");
        assert_eq!(PointerAction::iter().count(), 7);
    }

    #[test]
    fn move_end_to_end() {
        let (mut conn, state) = MockConnection::single_output();
        let mut model = Model::new(&mut conn, MockConnection::settings(), MouseBindings::new());

        model.manage(1);
        let loc = model.locate_window(1).unwrap();
        let tiled_region = model.client(loc).unwrap().tiled_region();

        state.set_pointer(pos(200, 200), Some(1));
        model.grab_pointer(PointerAction::Move);

        assert_eq!(model.frozen.action, PointerAction::Move);
        assert_eq!(model.frozen.region, tiled_region);
        assert!(state.requests().contains(&Request::ConfinePointer));

        model.track_pointer(pos(250, 260));
        let moved = tiled_region.pos + pos(200, 200).dist(pos(250, 260));
        assert_eq!(state.requests().last(), Some(&Request::Move(1, moved)));

        model.ungrab_pointer();

        let client = model.client(model.locate_window(1).unwrap()).unwrap();
        assert!(client.is_floating());
        assert_eq!(client.floating_region().pos, moved);
        assert_eq!(client.floating_region().dim, tiled_region.dim);
        assert_eq!(model.frozen.action, PointerAction::None);
        assert!(state.requests().contains(&Request::ReleasePointer));
    }

    #[test]
    fn tiled_client_turns_floating_exactly_once() {
        let (mut conn, state) = MockConnection::single_output();
        let mut model = Model::new(&mut conn, MockConnection::settings(), MouseBindings::new());

        model.manage(1);
        let loc = model.locate_window(1).unwrap();
        let tiled_region = model.client(loc).unwrap().tiled_region();

        state.set_pointer(pos(300, 300), Some(1));
        model.grab_pointer(PointerAction::ResizeCorner);

        let client = model.client(loc).unwrap();
        assert!(client.is_floating());
        assert_eq!(client.floating_region(), tiled_region);

        model.ungrab_pointer();
        let loc = model.locate_window(1).unwrap();
        model.client(loc).unwrap().set_floating_region(Region::new(10, 10, 50, 50));

        model.grab_pointer(PointerAction::Move);
        assert_eq!(model.frozen.region, Region::new(10, 10, 50, 50));
    }

    #[test]
    fn side_resize_moves_only_the_grabbed_edge() {
        let (mut conn, state) = MockConnection::single_output();
        let mut model = Model::new(&mut conn, MockConnection::settings(), MouseBindings::new());
        let start = Region::new(100, 100, 200, 100);

        model.manage(1);

        for edge in Edge::iter() {
            let loc = floating_at(&mut model, 1, start);

            let grab = match edge {
                Edge::Left => pos(105, 150),
                Edge::Right => pos(295, 150),
                Edge::Top => pos(200, 105),
                Edge::Bottom => pos(200, 195),
            };

            state.set_pointer(grab, Some(1));
            model.grab_pointer(PointerAction::ResizeSide);
            assert_eq!(model.frozen.grip, Some(Grip::Edge(edge)));

            model.track_pointer(pos(grab.x + 10, grab.y + 20));

            let expected = match edge {
                Edge::Left => Region::new(110, 100, 190, 100),
                Edge::Right => Region::new(100, 100, 210, 100),
                Edge::Top => Region::new(100, 120, 200, 80),
                Edge::Bottom => Region::new(100, 100, 200, 120),
            };

            assert_eq!(model.client(loc).unwrap().floating_region(), expected);
            assert_eq!(state.requests().last(), Some(&Request::BorderColor(1, 0xe78a53)));

            model.ungrab_pointer();
        }
    }

    #[test]
    fn corner_resize_moves_two_edges() {
        let (mut conn, state) = MockConnection::single_output();
        let mut model = Model::new(&mut conn, MockConnection::settings(), MouseBindings::new());
        let start = Region::new(100, 100, 200, 100);

        model.manage(1);

        for corner in Corner::iter() {
            let loc = floating_at(&mut model, 1, start);

            let grab = match corner {
                Corner::TopLeft => pos(110, 110),
                Corner::TopRight => pos(290, 110),
                Corner::BottomLeft => pos(110, 190),
                Corner::BottomRight => pos(290, 190),
            };

            state.set_pointer(grab, Some(1));
            model.grab_pointer(PointerAction::ResizeCorner);
            assert_eq!(model.frozen.grip, Some(Grip::Corner(corner)));

            model.track_pointer(pos(grab.x - 10, grab.y + 10));

            let expected = match corner {
                Corner::TopLeft => Region::new(90, 110, 210, 90),
                Corner::TopRight => Region::new(100, 110, 190, 90),
                Corner::BottomLeft => Region::new(90, 100, 210, 110),
                Corner::BottomRight => Region::new(100, 100, 190, 110),
            };

            assert_eq!(model.client(loc).unwrap().floating_region(), expected);
            model.ungrab_pointer();
        }
    }

    #[test]
    fn resize_never_collapses_below_one_pixel() {
        let (mut conn, state) = MockConnection::single_output();
        let mut model = Model::new(&mut conn, MockConnection::settings(), MouseBindings::new());

        model.manage(1);
        let loc = floating_at(&mut model, 1, Region::new(100, 100, 200, 100));

        state.set_pointer(pos(290, 190), Some(1));
        model.grab_pointer(PointerAction::ResizeCorner);
        model.track_pointer(pos(-1000, -1000));

        assert_eq!(
            model.client(loc).unwrap().floating_region().dim,
            Dim {
                w: 1,
                h: 1,
            }
        );
    }

    #[test]
    fn tiled_ratio_follows_pointer_and_is_clamped() {
        let (mut conn, state) = MockConnection::single_output();
        let mut model = Model::new(&mut conn, MockConnection::settings(), MouseBindings::new());

        model.manage(1);
        model.manage(2);

        let root = model.desktop(0, 0).unwrap().tree().root().unwrap();
        let ratio = |model: &Model<'_>| {
            model
                .desktop(0, 0)
                .unwrap()
                .tree()
                .node(root)
                .unwrap()
                .ratio()
                .unwrap()
        };

        state.set_pointer(pos(965, 500), None);
        model.grab_pointer(PointerAction::ResizeTiled);
        assert_eq!(model.frozen.action, PointerAction::ResizeTiled);
        assert_eq!(model.frozen.node, Some(root));

        model.track_pointer(pos(5000, 500));
        assert_eq!(ratio(&model), 1f64);

        model.track_pointer(pos(-5000, 500));
        assert_eq!(ratio(&model), 0f64);

        model.track_pointer(pos(960, 500));
        assert_eq!(ratio(&model), 0.5);

        model.ungrab_pointer();
        assert_eq!(model.frozen.action, PointerAction::None);
    }

    #[test]
    fn tiled_resize_needs_a_fence_within_grip() {
        let (mut conn, state) = MockConnection::single_output();
        let mut model = Model::new(&mut conn, MockConnection::settings(), MouseBindings::new());

        model.manage(1);
        model.manage(2);

        state.set_pointer(pos(500, 500), Some(1));
        model.grab_pointer(PointerAction::ResizeTiled);

        assert_eq!(model.frozen.action, PointerAction::None);
        assert!(!state.requests().contains(&Request::ConfinePointer));
    }

    #[test]
    fn fullscreen_clients_refuse_floating_drags() {
        let (mut conn, state) = MockConnection::single_output();
        let mut model = Model::new(&mut conn, MockConnection::settings(), MouseBindings::new());

        model.manage(1);
        model.handle_event(Event::StateRequest {
            window: 1,
            action: ToggleAction::Add,
            states: [Some(WindowState::Fullscreen), None],
        });

        let loc = model.locate_window(1).unwrap();
        let before = state.requests().len();

        for &action in &[
            PointerAction::Move,
            PointerAction::ResizeSide,
            PointerAction::ResizeCorner,
        ] {
            state.set_pointer(pos(200, 200), Some(1));
            model.grab_pointer(action);

            assert_eq!(model.frozen.action, PointerAction::None);
        }

        let client = model.client(loc).unwrap();
        assert!(client.is_fullscreen());
        assert!(!client.is_floating());
        assert_eq!(state.requests().len(), before);
    }

    #[test]
    fn nothing_under_pointer_disarms() {
        let (mut conn, state) = MockConnection::single_output();
        let mut model = Model::new(&mut conn, MockConnection::settings(), MouseBindings::new());

        state.set_pointer(pos(10, 10), None);
        model.grab_pointer(PointerAction::Move);
        assert!(!model.frozen.is_armed());

        state.clear_pointer();
        model.grab_pointer(PointerAction::ResizeTiled);
        assert!(!model.frozen.is_armed());
    }

    #[test]
    fn destroying_the_dragged_window_mid_drag() {
        let (mut conn, state) = MockConnection::single_output();
        let mut model = Model::new(&mut conn, MockConnection::settings(), MouseBindings::new());

        model.manage(1);
        state.set_pointer(pos(200, 200), Some(1));
        model.grab_pointer(PointerAction::Move);

        model.handle_event(Event::Destroy {
            window: 1,
        });

        let before = state.requests().len();
        model.track_pointer(pos(300, 300));
        model.ungrab_pointer();

        assert!(!model.frozen.is_armed());
        assert!(model.locate_window(1).is_none());
        assert_eq!(state.requests().len(), before);
    }

    #[test]
    fn vanished_window_is_detected_while_tracking() {
        let (mut conn, state) = MockConnection::single_output();
        let mut model = Model::new(&mut conn, MockConnection::settings(), MouseBindings::new());

        model.manage(1);
        state.set_pointer(pos(200, 200), Some(1));
        model.grab_pointer(PointerAction::ResizeSide);

        let loc = model.locate_window(1).unwrap();
        model.remove_node(loc);

        model.track_pointer(pos(300, 300));
        assert!(!model.frozen.is_armed());
    }

    #[test]
    fn ungrab_twice_is_harmless() {
        let (mut conn, state) = MockConnection::single_output();
        let mut model = Model::new(&mut conn, MockConnection::settings(), MouseBindings::new());

        model.manage(1);
        state.set_pointer(pos(200, 200), Some(1));
        model.grab_pointer(PointerAction::Move);
        model.ungrab_pointer();

        let after_first = state.requests();
        model.ungrab_pointer();

        assert_eq!(state.requests(), after_first);
        assert!(!model.frozen.is_armed());
    }

    #[test]
    fn move_tiled_swaps_with_window_under_pointer() {
        let (mut conn, state) = MockConnection::single_output();
        let mut model = Model::new(&mut conn, MockConnection::settings(), MouseBindings::new());

        model.manage(1);
        model.manage(2);

        let first = model.locate_window(1).unwrap();
        let second = model.locate_window(2).unwrap();

        state.set_pointer(pos(100, 100), Some(1));
        model.grab_pointer(PointerAction::MoveTiled);
        assert_eq!(model.frozen.action, PointerAction::MoveTiled);

        state.set_pointer(pos(1500, 100), Some(2));
        model.track_pointer(pos(1500, 100));

        assert_eq!(model.locate_window(1).unwrap().node, second.node);
        assert_eq!(model.locate_window(2).unwrap().node, first.node);
        assert!(model.frozen.is_armed());
    }

    #[test]
    fn move_tiled_rejects_floating_target() {
        let (mut conn, state) = MockConnection::single_output();
        let mut model = Model::new(&mut conn, MockConnection::settings(), MouseBindings::new());

        model.manage(1);
        floating_at(&mut model, 1, Region::new(10, 10, 100, 100));

        state.set_pointer(pos(50, 50), Some(1));
        model.grab_pointer(PointerAction::MoveTiled);

        assert!(!model.frozen.is_armed());
    }

    #[test]
    fn dropping_on_another_monitor_transfers_the_window() {
        let (mut conn, state) = MockConnection::dual_output();
        let mut model = Model::new(&mut conn, MockConnection::settings(), MouseBindings::new());

        model.manage(1);
        state.set_pointer(pos(200, 200), Some(1));
        model.grab_pointer(PointerAction::Move);

        model.track_pointer(pos(2200, 200));
        model.ungrab_pointer();

        let loc = model.locate_window(1).unwrap();
        assert_eq!(loc.monitor, 1);
        assert_eq!(model.selected, 1);
        assert!(model.client(loc).unwrap().is_floating());

        model.select_monitor(0);
        model.manage(2);
        let loc = floating_at(&mut model, 2, Region::new(1820, 100, 200, 200));
        assert_eq!(loc.monitor, 0);

        // centered exactly on the boundary between both monitors
        state.set_pointer(pos(1900, 200), Some(2));
        model.grab_pointer(PointerAction::Move);
        model.track_pointer(pos(1900, 200));
        model.ungrab_pointer();

        assert_eq!(model.monitor_at(pos(1920, 200)), Some(1));
        assert_eq!(model.locate_window(2).unwrap().monitor, 1);
        assert_eq!(model.selected, 1);
    }

    #[test]
    fn focus_action_focuses_immediately() {
        let (mut conn, state) = MockConnection::single_output();
        let mut model = Model::new(&mut conn, MockConnection::settings(), MouseBindings::new());

        model.manage(1);
        model.manage(2);

        state.set_pointer(pos(100, 100), Some(1));
        model.grab_pointer(PointerAction::Focus);

        let loc = model.locate_window(1).unwrap();
        assert_eq!(model.focused_node(0, 0), Some(loc.node));
        assert_eq!(model.frozen.action, PointerAction::Focus);

        model.track_pointer(pos(500, 500));
        assert_eq!(model.frozen.action, PointerAction::Focus);
    }
}
