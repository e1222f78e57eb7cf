//! Terminal driver abstraction (C1): real and virtual implementations.

mod keymap;
mod real;
mod traits;
mod virtual_term;

pub use keymap::bytes_for_name;
pub use real::RealTerminal;
pub use traits::Terminal;
pub use virtual_term::VirtualTerminal;
