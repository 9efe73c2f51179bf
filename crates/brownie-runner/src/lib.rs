pub mod args;
pub mod error;
pub mod frame_loop;
pub mod input_source;
