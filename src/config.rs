use clap::Parser;

use crate::error::Error;

/// Startup options. Short flags only; `-h` is our own flag so that help
/// exits with status 1 like every other usage problem.
#[derive(Parser, Debug)]
#[command(name = "padlink", disable_help_flag = true)]
pub struct Config {
    /// Display help
    #[arg(short = 'h')]
    pub help: bool,

    /// Serial device name
    #[arg(short = 'd', value_name = "DEV", default_value = "")]
    pub serial_device: String,

    /// Serial baudrate
    #[arg(short = 'b', value_name = "BAUD", default_value_t = 9600)]
    pub serial_baud: u32,

    /// Sample rate in ms
    #[arg(short = 'r', value_name = "MS", default_value_t = 100)]
    pub rate_ms: u64,

    /// Gamepad index
    #[arg(short = 'j', value_name = "N", default_value_t = 0)]
    pub gamepad_index: usize,

    /// Network host name
    #[arg(short = 'n', value_name = "HOST", default_value = "")]
    pub net_host: String,

    /// Network port
    #[arg(short = 'p', value_name = "PORT", default_value_t = 0)]
    pub net_port: u16,

    /// Write packets to the console instead of a serial or network link
    #[arg(short = 'c')]
    pub console: bool,
}

/// Where the packet stream goes. Exactly one per process, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Console,
    Net { host: String, port: u16 },
    Serial { device: String, baud: u32 },
}

impl Config {
    /// Resolves the output. Console wins over network, network over serial;
    /// network and serial each need both of their flags to count.
    pub fn sink(&self) -> Result<Sink, Error> {
        if self.console {
            return Ok(Sink::Console);
        }
        if !self.net_host.is_empty() && self.net_port != 0 {
            return Ok(Sink::Net {
                host: self.net_host.clone(),
                port: self.net_port,
            });
        }
        if !self.serial_device.is_empty() && self.serial_baud != 0 {
            return Ok(Sink::Serial {
                device: self.serial_device.clone(),
                baud: self.serial_baud,
            });
        }
        Err(Error::NoSink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("padlink").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let c = parse(&[]);
        assert!(!c.help);
        assert_eq!(c.serial_device, "");
        assert_eq!(c.serial_baud, 9600);
        assert_eq!(c.rate_ms, 100);
        assert_eq!(c.gamepad_index, 0);
        assert_eq!(c.net_host, "");
        assert_eq!(c.net_port, 0);
        assert!(!c.console);
    }

    #[test]
    fn no_transport_flags_is_an_error() {
        assert!(matches!(parse(&[]).sink(), Err(Error::NoSink)));
    }

    #[test]
    fn console_beats_everything() {
        let c = parse(&["-c", "-n", "host", "-p", "7777", "-d", "/dev/ttyUSB0"]);
        assert_eq!(c.sink().unwrap(), Sink::Console);
    }

    #[test]
    fn network_beats_serial() {
        let c = parse(&["-n", "host", "-p", "7777", "-d", "/dev/ttyUSB0", "-b", "115200"]);
        assert_eq!(
            c.sink().unwrap(),
            Sink::Net {
                host: "host".into(),
                port: 7777
            }
        );
    }

    #[test]
    fn network_needs_both_host_and_port() {
        assert!(matches!(parse(&["-n", "host"]).sink(), Err(Error::NoSink)));
        assert!(matches!(parse(&["-p", "7777"]).sink(), Err(Error::NoSink)));
    }

    #[test]
    fn serial_selected_when_network_is_absent() {
        let c = parse(&["-d", "/dev/ttyUSB0"]);
        assert_eq!(
            c.sink().unwrap(),
            Sink::Serial {
                device: "/dev/ttyUSB0".into(),
                baud: 9600
            }
        );
    }

    #[test]
    fn zero_baud_disables_serial() {
        let c = parse(&["-d", "/dev/ttyUSB0", "-b", "0"]);
        assert!(matches!(c.sink(), Err(Error::NoSink)));
    }

    #[test]
    fn positional_arguments_are_rejected() {
        assert!(Config::try_parse_from(["padlink", "stray"]).is_err());
    }
}
