pub mod autostart;
pub mod clock;
pub mod config;
pub mod daemon;
pub mod data_storage;
pub mod error;
pub mod formatter;
pub mod messages;
pub mod monthly;
pub mod motivation;
pub mod reminder;
pub mod screen;
pub mod status;
pub mod summary;
pub mod tracker;
pub mod view;
