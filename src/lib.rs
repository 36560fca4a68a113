pub mod cli;
pub mod commands;
pub mod config;
pub mod favorites;
pub mod generator;
pub mod image_capture;
pub mod ingredient;
pub mod logging;
pub mod matcher;
pub mod meal_plan;
pub mod pantry;
pub mod recipe;
pub mod session;
pub mod shopping_list;
