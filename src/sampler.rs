use std::time::Duration;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::time::{self, MissedTickBehavior};

use crate::error::Error;
use crate::gamepad::Sample;
use crate::packet;

/// Produces one control-state sample on demand.
pub trait Source {
    fn sample(&self) -> Result<Sample, Error>;
}

/// The main loop: every `period`, read one sample, frame it and write the
/// whole line in one go. Never returns except with a fatal error; read and
/// write failures both stop the loop.
pub async fn run<S, W>(source: &S, mut sink: W, period: Duration) -> Result<(), Error>
where
    S: Source,
    W: AsyncWrite + Unpin,
{
    let mut ticker = time::interval(period);
    // Late ticks must not burst into back-to-back packets
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let sample = source.sample()?;
        let line = packet::frame(&sample);
        sink.write_all(line.as_bytes())
            .await
            .map_err(Error::SinkWrite)?;
        sink.flush().await.map_err(Error::SinkWrite)?;
        log::trace!("sent {}", line.trim_end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tokio::io::{AsyncBufReadExt, BufReader};

    struct Fixed(Sample);

    impl Source for Fixed {
        fn sample(&self) -> Result<Sample, Error> {
            Ok(self.0)
        }
    }

    struct Unplugged;

    impl Source for Unplugged {
        fn sample(&self) -> Result<Sample, Error> {
            Err(Error::GamepadRead(io::Error::new(
                io::ErrorKind::NotFound,
                "device gone",
            )))
        }
    }

    #[tokio::test]
    async fn one_full_line_per_tick() {
        let state = Sample {
            buttons: 0x1234,
            axes: [1, 2, 3, 4, 5, 6],
        };
        let (near, far) = tokio::io::duplex(256);
        tokio::spawn(async move {
            let source = Fixed(state);
            let _ = run(&source, near, Duration::from_millis(1)).await;
        });

        let mut lines = BufReader::new(far).lines();
        let first = lines.next_line().await.unwrap().unwrap();
        let second = lines.next_line().await.unwrap().unwrap();
        let expected = packet::frame(&state);
        assert_eq!(format!("{first}\n"), expected);
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn read_failure_stops_the_loop() {
        let (near, _far) = tokio::io::duplex(64);
        let err = run(&Unplugged, near, Duration::from_millis(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::GamepadRead(_)));
    }

    #[tokio::test]
    async fn write_failure_is_fatal() {
        let (near, far) = tokio::io::duplex(64);
        drop(far);
        let source = Fixed(Sample {
            buttons: 0,
            axes: [0; 6],
        });
        let err = run(&source, near, Duration::from_millis(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SinkWrite(_)));
    }
}
