pub mod code;
pub mod credential;
pub mod login;
pub mod session;
