//! Application services orchestrating the repository ports.

pub mod accounts;
pub mod catalog;
pub mod unit_of_work;
pub mod voting;

pub use accounts::{AccountService, LoginOutcome, UserProfile};
pub use catalog::{CatalogService, WorkDetails};
pub use unit_of_work::AppUnitOfWork;
pub use voting::{UpvoteOutcome, VotingService};
