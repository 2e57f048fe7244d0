// Licensed under the Apache-2.0 license

//! Shared infrastructure for i.MX driver modules: the leveled logging sink
//! consumed by the drivers, a discarding default, and an adapter over any
//! `embedded_io::Write` byte sink (typically a UART).

use core::fmt::Arguments;
use embedded_io::Write;

/// Severity of a diagnostic message. Ordered: `Error` is the most severe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// Sink for leveled diagnostic text from driver code.
pub trait Logger {
    fn log(&mut self, level: LogLevel, args: Arguments<'_>);
}

/// Logger that discards every message.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    fn log(&mut self, _level: LogLevel, _args: Arguments<'_>) {}
}

/// Logger that writes one formatted line per message into an
/// `embedded_io::Write` sink. Messages above `max_level` are dropped; write
/// failures are ignored rather than surfaced to the driver.
pub struct WriterLogger<W> {
    writer: W,
    max_level: LogLevel,
}

impl<W: Write> WriterLogger<W> {
    pub fn new(writer: W, max_level: LogLevel) -> Self {
        Self { writer, max_level }
    }

    /// Hand the underlying sink back to the caller.
    pub fn release(self) -> W {
        self.writer
    }
}

impl<W: Write> Logger for WriterLogger<W> {
    fn log(&mut self, level: LogLevel, args: Arguments<'_>) {
        if level <= self.max_level {
            let _ = writeln!(self.writer, "[{}] {}", level.as_str(), args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct VecWriter {
        bytes: Vec<u8>,
    }

    impl embedded_io::ErrorType for VecWriter {
        type Error = core::convert::Infallible;
    }

    impl Write for VecWriter {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn writer_logger_formats_level_and_message() {
        let mut logger = WriterLogger::new(VecWriter::default(), LogLevel::Debug);
        logger.log(LogLevel::Error, format_args!("status {:#06x}", 0x0030));

        let written = logger.release();
        let text = String::from_utf8(written.bytes).unwrap();
        assert_eq!(text, "[ERROR] status 0x0030\n");
    }

    #[test]
    fn writer_logger_drops_messages_above_max_level() {
        let mut logger = WriterLogger::new(VecWriter::default(), LogLevel::Warn);
        logger.log(LogLevel::Info, format_args!("divider selected"));
        logger.log(LogLevel::Debug, format_args!("poll iteration"));
        logger.log(LogLevel::Warn, format_args!("slow device"));

        let written = logger.release();
        let text = String::from_utf8(written.bytes).unwrap();
        assert_eq!(text, "[WARN] slow device\n");
    }
}
