use crate::change::Toggle;

use winsys::geometry::Region;
use winsys::window::Window;

use std::cell::Cell;

pub struct Client {
    window: Window,
    floating: Cell<bool>,
    fullscreen: Cell<bool>,
    urgent: Cell<bool>,
    floating_region: Cell<Region>,
    tiled_region: Cell<Region>,
    expected_unmap_count: Cell<u8>,
}

impl Client {
    pub fn new(
        window: Window,
        floating_region: Region,
    ) -> Self {
        Self {
            window,
            floating: Cell::new(false),
            fullscreen: Cell::new(false),
            urgent: Cell::new(false),
            floating_region: Cell::new(floating_region),
            tiled_region: Cell::new(floating_region),
            expected_unmap_count: Cell::new(0),
        }
    }

    #[inline]
    pub fn window(&self) -> Window {
        self.window
    }

    /// Whether the client takes part in the tiling of its desktop.
    #[inline]
    pub fn is_tiled(&self) -> bool {
        !self.floating.get() && !self.fullscreen.get()
    }

    /// Floating takes effect only while not fullscreen.
    #[inline]
    pub fn is_floating(&self) -> bool {
        self.floating.get() && !self.fullscreen.get()
    }

    #[inline]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.get()
    }

    #[inline]
    pub fn is_urgent(&self) -> bool {
        self.urgent.get()
    }

    /// Returns whether the flag changed.
    #[inline]
    pub fn set_floating(
        &self,
        toggle: Toggle,
    ) -> bool {
        let current = self.floating.get();
        let floating = toggle.eval(current);
        self.floating.set(floating);
        floating != current
    }

    /// Returns whether the flag changed.
    #[inline]
    pub fn set_fullscreen(
        &self,
        toggle: Toggle,
    ) -> bool {
        let current = self.fullscreen.get();
        let fullscreen = toggle.eval(current);
        self.fullscreen.set(fullscreen);
        fullscreen != current
    }

    /// Returns whether the flag changed.
    #[inline]
    pub fn set_urgent(
        &self,
        toggle: Toggle,
    ) -> bool {
        let current = self.urgent.get();
        let urgent = toggle.eval(current);
        self.urgent.set(urgent);
        urgent != current
    }

    #[inline]
    pub fn floating_region(&self) -> Region {
        self.floating_region.get()
    }

    #[inline]
    pub fn set_floating_region(
        &self,
        region: Region,
    ) {
        self.floating_region.set(region);
    }

    #[inline]
    pub fn tiled_region(&self) -> Region {
        self.tiled_region.get()
    }

    #[inline]
    pub fn set_tiled_region(
        &self,
        region: Region,
    ) {
        self.tiled_region.set(region);
    }

    #[inline]
    pub fn expect_unmap(&self) {
        self.expected_unmap_count
            .set(self.expected_unmap_count.get() + 1);
    }

    #[inline]
    pub fn consume_unmap_if_expecting(&self) -> bool {
        let expected_unmap_count = self.expected_unmap_count.get();
        let expecting = expected_unmap_count > 0;

        if expecting {
            self.expected_unmap_count.set(expected_unmap_count - 1);
        }

        expecting
    }
}

impl PartialEq for Client {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.window == other.window
    }
}

impl std::fmt::Debug for Client {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("window", &format!("{:#0x}", &self.window))
            .field("floating", &self.floating.get())
            .field("fullscreen", &self.fullscreen.get())
            .field("urgent", &self.urgent.get())
            .field("floating_region", &self.floating_region.get())
            .field("tiled_region", &self.tiled_region.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullscreen_overrides_floating() {
        let client = Client::new(1, Region::new(0, 0, 100, 100));
        assert!(client.is_tiled());

        client.set_floating(Toggle::On);
        assert!(client.is_floating());
        assert!(!client.is_tiled());

        client.set_fullscreen(Toggle::On);
        assert!(client.is_fullscreen());
        assert!(!client.is_floating());

        client.set_fullscreen(Toggle::Off);
        assert!(client.is_floating());
    }

    #[test]
    fn expected_unmaps_are_consumed_once() {
        let client = Client::new(1, Region::default());
        client.expect_unmap();

        assert!(client.consume_unmap_if_expecting());
        assert!(!client.consume_unmap_if_expecting());
    }

    #[test]
    fn toggles_report_changes() {
        let client = Client::new(1, Region::default());

        assert!(client.set_urgent(Toggle::On));
        assert!(!client.set_urgent(Toggle::On));
        assert!(client.set_urgent(Toggle::Reverse));
        assert!(!client.is_urgent());
    }
}
