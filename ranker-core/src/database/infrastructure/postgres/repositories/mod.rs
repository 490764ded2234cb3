pub mod sessions;
pub mod users;
pub mod votes;
pub mod works;
