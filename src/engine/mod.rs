// Engine modules: animation, assets, state machine, input, frame timing

pub mod animation;
pub mod assets;
pub mod fsm;
pub mod game_loop;
pub mod input;
