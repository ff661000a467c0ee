use thiserror::Error;

/// Everything that can take the process down. Reported once in `main`,
/// exit code 1; nothing below `main` terminates the process itself.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no output selected: use -c, -n/-p or -d/-b")]
    NoSink,

    #[error("no gamepad found at index {0}")]
    GamepadNotFound(usize),

    #[error("gamepad read failed: {0}")]
    GamepadRead(#[source] std::io::Error),

    #[error("connect to {addr} failed: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serial port {path}: {source}")]
    SerialOpen {
        path: String,
        #[source]
        source: tokio_serial::Error,
    },

    #[error("write to output failed: {0}")]
    SinkWrite(#[source] std::io::Error),
}
