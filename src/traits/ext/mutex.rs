use std::sync::{Mutex, MutexGuard};

use cursive::reexports::log::{debug, error};

use crate::util::error::CmdlineError;
use crate::util::panics::ResultExt;

pub trait MutexExt<T: ?Sized> {
    fn lock_unwrap(&self) -> MutexGuard<'_, T>;
    fn lock_sync(&self) -> Result<MutexGuard<'_, T>, CmdlineError>;
}

impl<T: ?Sized> MutexExt<T> for Mutex<T> {
    #[inline(never)]
    #[track_caller]
    fn lock_unwrap(&self) -> MutexGuard<'_, T> {
        match self.try_lock() {
            Ok(guard) => guard,
            Err(err) => {
                let location = std::panic::Location::caller();
                debug!(
                    "Waiting for a lock: {}; file: {}:{}:{}",
                    err,
                    location.file(),
                    location.line(),
                    location.column()
                );
                self.lock().unwrap_or_log()
            }
        }
    }

    #[inline(never)]
    #[track_caller]
    fn lock_sync(&self) -> Result<MutexGuard<'_, T>, CmdlineError> {
        match self.lock() {
            Ok(guard) => Ok(guard),
            Err(err) => {
                let location = std::panic::Location::caller();
                error!(
                    "Failed to lock mutex: {}; file: {}:{}:{}",
                    err,
                    location.file(),
                    location.line(),
                    location.column()
                );
                Err(CmdlineError::MutexPoisoned(err.to_string()))
            }
        }
    }
}
