use crate::desktop::Desktop;
use crate::identify::Index;

use winsys::geometry::Pos;
use winsys::geometry::Region;
use winsys::screen::Screen;

pub struct Monitor {
    screen: Screen,
    index: Index,
    desktops: Vec<Desktop>,
    active_desktop: Index,
}

impl Monitor {
    pub fn new(
        screen: Screen,
        index: Index,
        desktop_names: &[&str],
    ) -> Self {
        let mut desktops: Vec<Desktop> = desktop_names
            .iter()
            .enumerate()
            .map(|(i, &name)| Desktop::new(name, i))
            .collect();

        if desktops.is_empty() {
            desktops.push(Desktop::new(index.to_string(), 0));
        }

        Self {
            screen,
            index,
            desktops,
            active_desktop: 0,
        }
    }

    #[inline]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[inline]
    pub fn index(&self) -> Index {
        self.index
    }

    #[inline]
    pub fn full_region(&self) -> Region {
        self.screen.full_region()
    }

    #[inline]
    pub fn contains(
        &self,
        pos: Pos,
    ) -> bool {
        self.screen.full_contains(pos)
    }

    #[inline]
    pub fn desktops(&self) -> &[Desktop] {
        &self.desktops
    }

    #[inline]
    pub fn desktop(
        &self,
        index: Index,
    ) -> Option<&Desktop> {
        self.desktops.get(index)
    }

    #[inline]
    pub fn desktop_mut(
        &mut self,
        index: Index,
    ) -> Option<&mut Desktop> {
        self.desktops.get_mut(index)
    }

    #[inline]
    pub fn active_desktop(&self) -> Index {
        self.active_desktop
    }

    #[inline]
    pub fn set_active_desktop(
        &mut self,
        index: Index,
    ) {
        if index < self.desktops.len() {
            self.active_desktop = index;
        }
    }
}

impl PartialEq for Monitor {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.screen.number() == other.screen.number()
    }
}

impl std::fmt::Debug for Monitor {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("screen", &self.screen)
            .field("index", &self.index)
            .field("active_desktop", &self.active_desktop)
            .finish()
    }
}
