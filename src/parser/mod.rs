pub mod fmt_table;
pub mod main;
pub mod probe;
pub mod scanner;
pub mod stream;

pub use fmt_table::*;
pub use main::*;
pub use probe::*;
pub use scanner::*;
pub use stream::*;
