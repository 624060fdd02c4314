//! Process-wide panic sink used by the `expect_*` accessors.

mod panicker;

pub use panicker::{AbortPanicker, Panicker, UnwindPanicker, panic, panicker, set_panicker};
