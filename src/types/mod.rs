pub mod by_player;
pub mod card;
pub mod game_state;
pub mod hand;
pub mod input;
pub mod logging;
