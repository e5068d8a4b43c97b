mod core;
mod palette_cmds;

pub use core::{cmd_extract, cmd_look, cmd_pick};
pub use palette_cmds::{cmd_analyze, cmd_contrast, cmd_harmony};
