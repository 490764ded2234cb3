pub mod catalog;
pub mod session;
pub mod user;
pub mod validation;
pub mod vote;
pub mod work;
