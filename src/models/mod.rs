pub mod attendance;
pub mod grid;
pub mod selection;
