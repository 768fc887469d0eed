// Engine modules: fixed-timestep loop, physics, asset loading

pub mod assets;
pub mod game_loop;
pub mod physics;
