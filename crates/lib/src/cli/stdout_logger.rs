use log::Log;

/// Logs records to stdout, prefixed with their source location.
pub(crate) struct StdoutLogger;

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        println!(
            "{file}:{line}: {level}: {args}",
            file = record.file().unwrap_or_default(),
            line = record.line().unwrap_or_default(),
            level = record.level(),
            args = record.args(),
        );
    }

    fn flush(&self) {}
}
