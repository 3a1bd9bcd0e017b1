pub mod play;
pub mod states;
pub mod train;
