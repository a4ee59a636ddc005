const DEFAULT_THREADS_NUM:usize = 1;

/// Number of threads the runtime reports as usable, falling back to a single thread
/// when the platform cannot tell.
pub fn available_threads() -> usize {
    if let Ok(available_cpus) = std::thread::available_parallelism() {
        available_cpus.get()
    } else {
        DEFAULT_THREADS_NUM
    }
}

/// Extracts a readable message from a panic payload.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.to_owned()
    } else {
        "unknown panic".to_owned()
    }
}
