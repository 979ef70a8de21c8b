use crate::geometry::Pos;
use crate::geometry::Region;

#[derive(Debug, Clone, Copy)]
pub struct Screen {
    number: usize,
    full_region: Region,
}

impl std::cmp::PartialEq<Self> for Screen {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.number == other.number
    }
}

impl Screen {
    pub fn new(
        region: Region,
        number: usize,
    ) -> Self {
        Self {
            number,
            full_region: region,
        }
    }

    #[inline]
    pub fn number(&self) -> usize {
        self.number
    }

    #[inline]
    pub fn full_region(&self) -> Region {
        self.full_region
    }

    #[inline]
    pub fn full_contains(
        &self,
        pos: Pos,
    ) -> bool {
        self.full_region.contains(pos)
    }
}
