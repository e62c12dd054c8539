/// Declares a numeric id newtype.
///
/// Ids are plain `u64` values so they can be chosen by the caller, restored
/// verbatim on undo, and compared as numbers when allocating the next one.
/// `u64::MAX` is reserved: the store rejects it, so `next` never wraps.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u64);

        impl $name {
            /// Wraps a raw id value.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw id value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }

            /// The reserved id, never accepted by the store.
            pub const RESERVED: Self = Self(u64::MAX);

            /// Returns the id following this one, saturating at
            /// [`Self::RESERVED`].
            #[must_use]
            pub const fn next(self) -> Self {
                Self(self.0.saturating_add(1))
            }

            #[must_use]
            pub const fn is_reserved(self) -> bool {
                self.0 == u64::MAX
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

pub(crate) use define_id;

/// Returns the id after the largest key, or `1` for an empty map.
///
/// Saturates at `u64::MAX`, which insertion rejects.
pub(crate) fn next_after<K: Copy + Ord + From<u64> + Into<u64>, V>(
    map: &std::collections::BTreeMap<K, V>,
) -> K {
    map.keys().next_back().map_or(K::from(1_u64), |&last| {
        let raw: u64 = last.into();
        K::from(raw.saturating_add(1))
    })
}
