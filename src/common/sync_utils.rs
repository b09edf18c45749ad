// src/common/sync_utils.rs

use std::sync::{Mutex, MutexGuard};

// Um painel com lock envenenado ainda pode ser desenhado: o estado é só texto
// e números, então recuperamos o guard em vez de propagar o panic.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
