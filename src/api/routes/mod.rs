pub mod game;
pub mod info;
pub mod snipes;
