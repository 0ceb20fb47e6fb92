// Game layer: the controlled character and the world that drives it

pub mod characters;
pub mod world;

pub use world::World;
