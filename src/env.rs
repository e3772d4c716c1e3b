use std::collections::{BTreeMap, HashMap};

/// Destination for parsed variables.
pub trait EnvSink {
    fn set_var(&mut self, key: &str, value: &str);
}

/// Writes into the current process environment.
///
/// This goes through [`std::env::set_var`], which mutates global process
/// state and is not thread-safe for concurrent environment access.
#[derive(Debug)]
pub struct ProcessEnv {
    _private: (),
}

impl ProcessEnv {
    /// Create a process-environment sink.
    ///
    /// # Safety
    ///
    /// The caller must ensure no other threads concurrently read or write
    /// the process environment while this sink is in use.
    #[must_use]
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl EnvSink for ProcessEnv {
    fn set_var(&mut self, key: &str, value: &str) {
        // SAFETY: upheld by the caller of `ProcessEnv::new`.
        unsafe { std::env::set_var(key, value) };
    }
}

impl EnvSink for BTreeMap<String, String> {
    fn set_var(&mut self, key: &str, value: &str) {
        self.insert(key.to_owned(), value.to_owned());
    }
}

impl EnvSink for HashMap<String, String> {
    fn set_var(&mut self, key: &str, value: &str) {
        self.insert(key.to_owned(), value.to_owned());
    }
}
