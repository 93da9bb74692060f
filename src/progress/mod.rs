pub mod badges;
pub mod emissions;
pub mod goals;
pub mod snapshot;
pub mod streak;

pub use snapshot::EcoSnapshot;
