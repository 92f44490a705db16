pub mod audio;
pub mod boss;
pub mod combat;
pub mod config;
pub mod effects;
pub mod entities;
pub mod events;
pub mod flow;
pub mod geometry;
pub mod player;
pub mod powerups;
pub mod progression;
pub mod sim;
pub mod snapshot;
pub mod waves;
