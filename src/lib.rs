pub mod analysis;
pub mod card;
pub mod combinations;
pub mod display;
pub mod error;
pub mod game;
pub mod scoring;

pub use analysis::*;
pub use card::*;
pub use combinations::*;
pub use error::ScoreError;
pub use game::*;
pub use scoring::*;
