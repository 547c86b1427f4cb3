//! API handlers for sesamo.
//!
//! `user` carries the sign-up/sign-in/sign-out/profile flow and its stores;
//! `health` and `root` are the undecorated service endpoints.

pub mod health;
pub mod root;
pub mod user;
