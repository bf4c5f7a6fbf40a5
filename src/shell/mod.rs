//! Shell command execution, blocking and streamed.

pub mod command;
pub mod platform;
pub mod stream;

pub use command::{execute, CommandOptions, ExecOutput};
pub use platform::{detect_shell, is_ci, shell_flag};
pub use stream::{stream, ExitSummary, StreamEvent, StreamSession, Terminator};
