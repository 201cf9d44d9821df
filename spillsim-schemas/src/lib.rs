pub mod dispersal;
pub mod environment;
pub mod file_formats;
pub mod impact;
pub mod oil;
pub mod spill;
