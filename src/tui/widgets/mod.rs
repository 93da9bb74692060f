pub mod activity_log;
pub mod badges;
pub mod goals;
pub mod header;
pub mod presets;
pub mod statusbar;
pub mod streak;
