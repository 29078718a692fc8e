//! Restaurant catalog: listings, cuisine filtering, menus and item
//! customization.
//!
//! Pure domain logic; the catalog data itself is supplied by the caller.

pub mod menu;
pub mod restaurant;

pub use menu::{Choice, CustomizationOptions, MenuItem, Selection};
pub use restaurant::{Restaurant, RestaurantQuery, SortOrder, cuisine_slug};
