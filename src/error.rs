use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnakeError {
    #[error("Unsupported grid size {0}, expected one of 16, 32 or 64")]
    UnsupportedGridSize(u16),
    #[error("Terminal is {width}x{height} but the board needs at least {needed_width}x{needed_height}")]
    TerminalTooSmall {
        width: u16,
        height: u16,
        needed_width: u16,
        needed_height: u16,
    },
    #[error("Terminal I/O error:")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
