pub mod assets;
pub mod renderer;
pub mod transitions;

pub use transitions::TransitionSettings;
