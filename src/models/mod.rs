//! Core data models.

mod ids;
mod lobby;
mod matches;
mod overlap;
mod region;

pub use ids::*;
pub use lobby::*;
pub use matches::*;
pub use overlap::*;
pub use region::*;
