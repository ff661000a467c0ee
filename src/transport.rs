use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_serial::SerialPortBuilderExt;

use crate::config::Sink;
use crate::error::Error;

/// Anything the sampler can write to and the echo task can read from.
pub trait Link: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> Link for T {}

/// Opens the resolved sink as one duplex stream, owned for the process
/// lifetime and closed on drop on every exit path.
pub async fn open(sink: &Sink) -> Result<Box<dyn Link>, Error> {
    match sink {
        Sink::Console => {
            // Write-only in practice; the read side never produces bytes.
            Ok(Box::new(tokio::io::join(
                tokio::io::empty(),
                tokio::io::stdout(),
            )))
        }
        Sink::Net { host, port } => {
            let addr = format!("{host}:{port}");
            let stream = TcpStream::connect(&addr).await.map_err(|source| Error::Connect {
                addr: addr.clone(),
                source,
            })?;
            log::info!("connected to {addr}");
            Ok(Box::new(stream))
        }
        Sink::Serial { device, baud } => {
            let port = tokio_serial::new(device.as_str(), *baud)
                .open_native_async()
                .map_err(|source| Error::SerialOpen {
                    path: device.clone(),
                    source,
                })?;
            log::info!("opened {device} at {baud} baud");
            Ok(Box::new(port))
        }
    }
}

/// Copies whatever comes back over the link to the console, for
/// diagnostics. Best effort: the first error just ends the task.
pub fn spawn_echo<R>(mut reader: R) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut console = tokio::io::stdout();
        if let Err(e) = tokio::io::copy(&mut reader, &mut console).await {
            log::debug!("echo task stopped: {e}");
        }
    })
}
