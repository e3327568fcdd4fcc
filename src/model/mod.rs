pub mod citizen;
pub mod credential;
