//! Core type definitions for the ANC codec.
//!
//! Provides zero-cost newtypes for the ST 291-1 identification words and
//! raster coordinates, preventing field mixups (DID vs. SDID, line vs.
//! horizontal offset) at compile time. All types use `#[repr(transparent)]`
//! for guaranteed zero runtime cost.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Macro to generate ANC word newtype wrappers with common implementations.
macro_rules! anc_newtype {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty) => $prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[derive(Serialize, Deserialize)]
        #[repr(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            /// Creates a new instance
            #[inline]
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Raw value
            #[inline]
            pub const fn value(self) -> $inner {
                self.0
            }
        }

        // Display with custom prefix, hex to match ST 291-1 registry notation
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "0x{:03X}"), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline]
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            #[inline]
            fn from(value: $name) -> Self {
                value.0
            }
        }

        // Enable direct comparisons with raw values
        impl PartialEq<$inner> for $name {
            #[inline]
            fn eq(&self, other: &$inner) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for $inner {
            #[inline]
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

anc_newtype! {
    /// Data Identification word, carried as a full 10-bit value including
    /// the two parity bits assigned by the ST 291-1 registry.
    Did(u16) => "DID-"
}

anc_newtype! {
    /// Secondary Data Identification word (Type 2 packets). A Type 1 packet
    /// carries the Data Block Number in this slot instead; the codec treats
    /// both identically.
    Sdid(u16) => "SDID-"
}

anc_newtype! {
    /// Digital interface line number locating an ANC packet in the raster.
    /// 11 bits on the wire.
    LineNumber(u16) => "LN-"
}

anc_newtype! {
    /// Horizontal offset from SAV, in 10-bit words of the indicated stream
    /// and channel. 12 bits on the wire.
    HorizontalOffset(u16) => "HO-"
}

impl LineNumber {
    /// No specific line location within the field or frame.
    pub const UNSPECIFIED: Self = Self(0x7FF);
    /// Any line between the second line after the RP 168 switching line and
    /// the last line before active video, inclusive.
    pub const SWITCHING_REGION: Self = Self(0x7FE);
    /// Line number too large to represent in 11 bits.
    pub const BEYOND_RANGE: Self = Self(0x7FD);

    /// Whether this value is one of the generic-region sentinels rather than
    /// an actual line number.
    #[inline]
    pub const fn is_sentinel(self) -> bool {
        self.0 >= Self::BEYOND_RANGE.0
    }
}

impl HorizontalOffset {
    /// No specific horizontal location.
    pub const UNSPECIFIED: Self = Self(0xFFF);
    /// Within the horizontal ancillary data space (HANC).
    pub const HANC: Self = Self(0xFFE);
    /// Within the ancillary data space between the SAV and EAV markers.
    pub const SAV_EAV: Self = Self(0xFFD);
    /// Horizontal offset too large to represent in 12 bits.
    pub const BEYOND_RANGE: Self = Self(0xFFC);

    /// Whether this value is one of the generic-region sentinels rather than
    /// an actual word offset.
    #[inline]
    pub const fn is_sentinel(self) -> bool {
        self.0 >= Self::BEYOND_RANGE.0
    }
}
