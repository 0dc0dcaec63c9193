pub mod home;
pub mod new_transaction;
