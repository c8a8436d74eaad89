pub mod bid;
pub mod player;
pub mod round;
pub mod score;
pub mod side_gain;
