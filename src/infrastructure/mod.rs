pub mod extraction;
pub mod layout;
pub mod observability;
