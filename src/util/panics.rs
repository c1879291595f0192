use std::io::Write;

use cursive::reexports::log::error;

use crate::util::paths::CMDLINE_HOME_DIR;

pub(crate) trait ResultExt<T, E> {
    fn unwrap_or_log(self) -> T
    where
        E: std::fmt::Debug;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    #[inline]
    #[track_caller]
    fn unwrap_or_log(self) -> T
    where
        E: std::fmt::Debug,
    {
        match self {
            Ok(t) => t,
            Err(e) => fail(format_args!("Unwrapping Err: {e:?}")),
        }
    }
}

#[inline(never)]
#[cold]
#[track_caller]
fn fail(msg: std::fmt::Arguments) -> ! {
    let location = std::panic::Location::caller();
    let message = format!(
        "{}:{}:{} :: {msg}",
        location.file(),
        location.line(),
        location.column()
    );

    let additional_message = match write_to_panics(&message) {
        Ok(_) => "".to_string(),
        Err(err) => format!("; Failed writing an error to panics.log: {err}"),
    };

    error!("{message}{additional_message}");
    panic!("{message}{additional_message}");
}

fn write_to_panics(message: &str) -> std::io::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(CMDLINE_HOME_DIR.join("panics.log"))?;

    writeln!(file, "{message}")
}
