pub mod config;
pub mod consts;
pub mod document;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod io;
pub mod layout;
pub mod model;
pub mod render;
pub mod requests;
pub mod services;
