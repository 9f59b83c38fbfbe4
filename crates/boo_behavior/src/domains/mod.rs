//! The six behavior domains
//!
//! | Domain | Value | Intent | Commit |
//! |---|---|---|---|
//! | [`Active`] | `bool` | controlled | one tick later |
//! | [`Disabled`] | `bool` | `own \|\| parent` | immediate |
//! | [`ReadOnly`] | `bool` | `own \|\| parent` | immediate |
//! | [`Focus`] | `bool` | controlled or auto | immediate / one tick later |
//! | [`Press`] | `bool` | controlled or auto | immediate / one tick later |
//! | [`Validation`] | [`Validity`] | tri-state or auto | immediate / one tick later |

pub mod active;
pub mod disabled;
pub mod focus;
pub mod press;
pub mod read_only;
pub mod validity;

pub use active::{Active, ActiveProps, ActiveState};
pub use disabled::{Disabled, DisabledProps, DisabledState};
pub use focus::{Focus, FocusProps, FocusState};
pub use press::{Press, PressProps, PressState};
pub use read_only::{ReadOnly, ReadOnlyProps, ReadOnlyState};
pub use validity::{Validation, Validity, ValidityProps, ValidityState};

use boo_animation::Direction;

/// Direction for binary domains: `true` animates forward
pub(crate) fn binary_direction(target: bool) -> Direction {
    if target {
        Direction::Forward
    } else {
        Direction::Reverse
    }
}
