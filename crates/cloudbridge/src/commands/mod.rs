pub mod check;
pub mod key_pairs;
pub mod providers;
pub mod resolve;
