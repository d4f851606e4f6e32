//! Tiered assertion macros.
//!
//! Simple assertions are always enabled; moderate and advanced assertions are
//! only compiled in when the `debug-checks` feature is active (or under
//! `cfg(test)`), since they can be expensive on the hot propagation path.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const MARROW_ASSERT_LEVEL_DEFINITION: u8 = MARROW_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const MARROW_ASSERT_LEVEL_DEFINITION: u8 = MARROW_ASSERT_ADVANCED;

pub const MARROW_ASSERT_SIMPLE: u8 = 1;
pub const MARROW_ASSERT_MODERATE: u8 = 2;
pub const MARROW_ASSERT_ADVANCED: u8 = 3;

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_simple {
    ($($arg:tt)*) => {
        if $crate::marrow_asserts::MARROW_ASSERT_LEVEL_DEFINITION >= $crate::marrow_asserts::MARROW_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::marrow_asserts::MARROW_ASSERT_LEVEL_DEFINITION >= $crate::marrow_asserts::MARROW_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::marrow_asserts::MARROW_ASSERT_LEVEL_DEFINITION >= $crate::marrow_asserts::MARROW_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::marrow_asserts::MARROW_ASSERT_LEVEL_DEFINITION >= $crate::marrow_asserts::MARROW_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}
