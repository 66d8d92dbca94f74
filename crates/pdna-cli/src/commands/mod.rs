pub mod admin;
pub mod classify;
pub mod context;
pub mod inquiry;
pub mod lookup;
