use std::path::PathBuf;

use anyhow::Context;
use cursive::reexports::log::error;
use cursive::{CbSink, Cursive, View};

use crate::util::panics::ResultExt;

pub trait SivExt {
    fn call_on_name<V, F, R>(&self, name: &str, callback: F)
    where
        V: View,
        F: Send + FnOnce(&mut V) -> R + 'static;

    fn send_box<F>(&self, callback: F)
    where
        F: FnOnce(&mut Cursive) + Send + 'static;
}

impl SivExt for CbSink {
    fn call_on_name<V, F, R>(&self, name: &str, callback: F)
    where
        V: View,
        F: Send + FnOnce(&mut V) -> R + 'static,
    {
        let name = name.to_string();
        self.send(Box::new(move |siv| {
            if siv.call_on_name(&name, callback).is_none() {
                error!("Could not find name: {}", name);
            }
        }))
        .unwrap_or_log();
    }

    fn send_box<F>(&self, callback: F)
    where
        F: FnOnce(&mut Cursive) + Send + 'static,
    {
        self.send(Box::new(callback)).unwrap_or_log();
    }
}

pub trait SivLogExt {
    fn setup_logger(&mut self, logs_dir: Option<PathBuf>) -> anyhow::Result<()>;
}

impl SivLogExt for Cursive {
    fn setup_logger(&mut self, logs_dir: Option<PathBuf>) -> anyhow::Result<()> {
        let logger = flexi_logger::Logger::try_with_env_or_str("info")?;
        let writer = cursive_flexi_logger_view::cursive_flexi_logger(self);

        let logger = match logs_dir {
            Some(logs_dir) => logger.log_to_file_and_writer(
                flexi_logger::FileSpec::default()
                    .directory(logs_dir)
                    .basename("cmdline")
                    .suppress_timestamp(),
                writer,
            ),
            None => logger.log_to_writer(writer),
        };

        logger
            .format(flexi_logger::colored_with_thread)
            .start()
            .context("Failed to start logger")?;

        Ok(())
    }
}
