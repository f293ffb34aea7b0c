use crate::sys::SOCKET_PATH;
use std::io::Write;
use std::os::unix::net::UnixStream;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("Failed to connect to orbit at {path}: {source}. Is orbit running?")]
    Connect {
        path: &'static str,
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub fn send_command(cmd: &str) -> Result<(), ControlError> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|source| ControlError::Connect {
        path: SOCKET_PATH,
        source,
    })?;
    log::debug!("sending {:?}", cmd);
    writeln!(stream, "{}", cmd)?;
    Ok(())
}
