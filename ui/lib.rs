mod tab_bar;
mod util;
mod width;

pub use self::tab_bar::*;
pub use self::width::*;
