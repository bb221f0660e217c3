pub mod user;
pub mod donation_request;
pub mod blog;
pub mod donor;
pub mod reference;
