pub mod common;
pub mod console;
pub mod logs;
pub mod results;
pub mod scan;
pub mod status;
pub mod watch;
