//! Display-option bitmasks.

use core::ops::{BitAnd, BitOr, BitOrAssign};

macro_rules! bitmask {
    (
        $(#[$meta:meta])*
        pub struct $name:ident: $repr:ty {
            $( $(#[$fmeta:meta])* const $flag:ident = $value:expr; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
        pub struct $name($repr);

        impl $name {
            $( $(#[$fmeta])* pub const $flag: $name = $name($value); )*

            #[inline]
            pub const fn empty() -> Self {
                Self(0)
            }

            #[inline]
            pub const fn from_bits(bits: $repr) -> Self {
                Self(bits)
            }

            #[inline]
            pub const fn bits(self) -> $repr {
                self.0
            }

            /// True when every bit of `other` is set.
            #[inline]
            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            /// True when any bit of `other` is set.
            #[inline]
            pub const fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }

            #[inline]
            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }
        }

        impl BitOr for $name {
            type Output = Self;
            #[inline]
            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl BitOrAssign for $name {
            #[inline]
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl BitAnd for $name {
            type Output = Self;
            #[inline]
            fn bitand(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
        }
    };
}

bitmask! {
    /// What the caller asked to see. Vector assets carry the same mask and
    /// are drawn only when it intersects the relevant part of this one.
    pub struct MapOptions: u32 {
        const SECTOR_GRID = 0x0001;
        const SUBSECTOR_GRID = 0x0002;
        const SECTORS_SELECTED = 0x0004;
        const SECTORS_ALL = 0x0008;
        const SECTORS_MASK = 0x000c;
        const BORDERS_MAJOR = 0x0010;
        const BORDERS_MINOR = 0x0020;
        const BORDERS_MASK = 0x0030;
        const NAMES_MAJOR = 0x0040;
        const NAMES_MINOR = 0x0080;
        const NAMES_MASK = 0x00c0;
        const WORLDS_CAPITALS = 0x0100;
        const WORLDS_HOMEWORLDS = 0x0200;
        const WORLDS_MASK = 0x0300;
        const FORCE_HEXES = 0x2000;
        /// Color world discs by trade classification.
        const WORLD_COLORS = 0x4000;
        const FILLED_BORDERS = 0x8000;
    }
}

bitmask! {
    /// Per-world decorations enabled by the stylesheet.
    pub struct WorldDetails: u32 {
        const TYPE = 0x0001;
        const KEY_NAMES = 0x0002;
        const ALL_NAMES = 0x0004;
        const STARPORT = 0x0008;
        const GAS_GIANT = 0x0010;
        const ALLEGIANCE = 0x0020;
        const BASES = 0x0040;
        const ZONE = 0x0080;
        const HIGHLIGHT = 0x0100;
        const UWP = 0x0200;
        const ASTEROIDS = 0x0400;
        const HEX = 0x0800;

        const DOTMAP = 0x0001;
        const ATLAS = 0x01ff;
        const POSTER = 0x0dff;
    }
}

impl MapOptions {
    /// The default option set used by the map front end.
    pub const DEFAULT: MapOptions = MapOptions(
        Self::SECTOR_GRID.0
            | Self::SUBSECTOR_GRID.0
            | Self::SECTORS_SELECTED.0
            | Self::BORDERS_MASK.0
            | Self::NAMES_MASK.0
            | Self::WORLDS_MASK.0,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_cover_their_members() {
        assert!(MapOptions::BORDERS_MASK.contains(MapOptions::BORDERS_MAJOR | MapOptions::BORDERS_MINOR));
        assert!(MapOptions::NAMES_MINOR.intersects(MapOptions::NAMES_MASK));
        assert!(!MapOptions::WORLDS_CAPITALS.intersects(MapOptions::NAMES_MASK));
    }

    #[test]
    fn and_or_compose() {
        let o = MapOptions::SECTOR_GRID | MapOptions::WORLDS_HOMEWORLDS;
        assert_eq!(o & MapOptions::WORLDS_MASK, MapOptions::WORLDS_HOMEWORLDS);
        assert_eq!(o.bits(), 0x0201);
        assert!(MapOptions::DEFAULT.contains(o));
    }

    #[test]
    fn poster_details_include_hex_numbers() {
        assert!(WorldDetails::POSTER.contains(WorldDetails::HEX | WorldDetails::ZONE));
        assert!(!WorldDetails::ATLAS.contains(WorldDetails::UWP));
    }
}
