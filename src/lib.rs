pub mod capture;
pub mod catalog;
pub mod controller;
pub mod gui;
pub mod hit_test;
pub mod hotkey;
pub mod launcher;
pub mod layout;
pub mod logging;
pub mod render;
pub mod settings;
pub mod visibility;
