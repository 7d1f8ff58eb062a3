//! Sentinel-based link type for arena node references.
//!
//! Links between skip list nodes are stored as plain integers with a reserved
//! sentinel (`MAX`) instead of `Option<Idx>`, which keeps a level record at two
//! words and makes "points at the header" / "points past the end" a single
//! comparison.

/// A copyable arena index with a sentinel "none" value.
///
/// # Example
///
/// ```
/// use nexus_rankmap::Index;
///
/// let idx: u32 = 5;
/// let none: u32 = u32::NONE;
///
/// assert!(idx.is_some());
/// assert!(none.is_none());
/// assert_eq!(u32::try_from_usize(u32::MAX as usize), None);
/// ```
pub trait Index: Copy + Eq + core::fmt::Debug {
    /// Sentinel value representing "no index".
    ///
    /// As a predecessor it names the header sentinel; as a forward link it
    /// names the end of the chain.
    const NONE: Self;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this is not the sentinel value.
    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Widens the index for slab access.
    fn as_usize(self) -> usize;

    /// Narrows a slab key, returning `None` if it collides with or exceeds
    /// the sentinel.
    fn try_from_usize(val: usize) -> Option<Self>;
}

macro_rules! impl_index_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Index for $ty {
                const NONE: Self = <$ty>::MAX;

                #[inline]
                fn as_usize(self) -> usize {
                    self as usize
                }

                #[inline]
                fn try_from_usize(val: usize) -> Option<Self> {
                    <$ty>::try_from(val).ok().filter(|v| *v != Self::NONE)
                }
            }
        )*
    };
}

impl_index_for_unsigned!(u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_index_sentinel {
        ($($ty:ty => $name:ident),*) => {
            $(
                #[test]
                fn $name() {
                    assert!(<$ty>::NONE.is_none());
                    assert!(!<$ty>::NONE.is_some());
                    assert!((0 as $ty).is_some());
                    assert!((<$ty>::MAX - 1).is_some());
                }
            )*
        };
    }

    test_index_sentinel!(
        u8 => u8_sentinel,
        u16 => u16_sentinel,
        u32 => u32_sentinel,
        u64 => u64_sentinel,
        usize => usize_sentinel
    );

    #[test]
    fn narrowing_rejects_sentinel_and_overflow() {
        assert_eq!(u8::try_from_usize(254), Some(254));
        assert_eq!(u8::try_from_usize(255), None);
        assert_eq!(u8::try_from_usize(1000), None);
        assert_eq!(u32::try_from_usize(7), Some(7));
        assert_eq!(usize::try_from_usize(usize::MAX), None);
    }
}
