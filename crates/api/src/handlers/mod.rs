pub mod element;
pub mod game;
