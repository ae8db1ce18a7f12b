pub mod file_formats;
pub mod intent;
pub mod profile;
pub mod region;
pub mod unit;
