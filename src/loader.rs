//! File-backed parser holding the parsed map and its write-back path.

use std::path::Path;

use crate::Error;
use crate::env::EnvSink;
use crate::file::EnvFile;
use crate::formatter::{find_unrepresentable, format};
use crate::parser::{ParseOptions, parse_str_with};
use crate::token::{COMMENT, EQUALS, QUOTE_START};
use crate::value::{EnvMap, EnvValue};

/// Parses one `.env` file and keeps the result.
///
/// The file cursor only moves forward: a second [`parse`](Self::parse)
/// continues from where the previous one stopped. Call
/// [`reset`](Self::reset) to scan the file again from the start.
#[derive(Debug)]
pub struct EnvParser {
    file: EnvFile,
    options: ParseOptions,
    envs: Option<EnvMap>,
}

impl EnvParser {
    /// Open `path` with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        Ok(Self::from_file(EnvFile::open(path)?))
    }

    #[must_use]
    pub const fn from_file(file: EnvFile) -> Self {
        Self {
            file,
            options: ParseOptions::new(),
            envs: None,
        }
    }

    #[must_use]
    pub const fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub const fn options(&self) -> &ParseOptions {
        &self.options
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    #[must_use]
    pub const fn is_parsed(&self) -> bool {
        self.envs.is_some()
    }

    /// Scan the rest of the file under a shared lock.
    ///
    /// On success the parsed map replaces any earlier one. On failure the
    /// earlier state is left untouched.
    pub fn parse(&mut self, raw: bool) -> Result<(), Error> {
        let options = self.options.raw(raw);
        tracing::debug!(path = %self.file.path().display(), raw, "parsing env file");

        let envs = {
            let _lock = self.file.lock_shared()?;
            let input = self.file.read_remaining()?;
            parse_str_with(&input, &options)?
        };

        tracing::debug!(
            path = %self.file.path().display(),
            variables = envs.len(),
            "parsed env file"
        );
        self.envs = Some(envs);
        Ok(())
    }

    /// The parsed variables.
    pub fn get_envs(&self) -> Result<&EnvMap, Error> {
        self.envs.as_ref().ok_or(Error::NotParsed)
    }

    /// Rewind the file and forget the parsed state.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.file.rewind()?;
        self.envs = None;
        Ok(())
    }

    /// Set `key` and persist the whole map back to the file.
    ///
    /// Parses first when nothing has been parsed yet so existing variables
    /// survive the write. With `should_quote` the value is stored as a
    /// string and written in quotes; otherwise it is typed the same way an
    /// unquoted value in the file would be. Returns the bytes written.
    ///
    /// Fails with [`Error::UnrepresentableValue`] naming the first entry
    /// that would not read back unchanged. The file and the parsed map are
    /// left untouched in that case.
    pub fn write(&mut self, key: &str, value: &str, should_quote: bool) -> Result<usize, Error> {
        if self.envs.is_none() {
            self.parse(false)?;
        }
        validate_key(key)?;

        let mut envs = self.get_envs()?.clone();
        if should_quote {
            envs.insert_quoted(key, EnvValue::from(value));
        } else {
            envs.insert(key, self.options.detector().detect(value));
        }
        if let Some(bad) = find_unrepresentable(&envs) {
            return Err(Error::UnrepresentableValue {
                key: bad.to_owned(),
            });
        }

        let written = self.file.overwrite(&format(&envs))?;
        self.envs = Some(envs);

        tracing::debug!(
            path = %self.file.path().display(),
            key,
            bytes = written,
            "wrote env file"
        );
        Ok(written)
    }

    /// Publish every parsed variable to `sink`. Returns how many were set.
    pub fn load_into<S: EnvSink + ?Sized>(&self, sink: &mut S) -> Result<usize, Error> {
        let envs = self.get_envs()?;
        for (key, value) in envs.iter() {
            sink.set_var(key, &value.to_env_string());
        }
        Ok(envs.len())
    }
}

fn validate_key(key: &str) -> Result<(), Error> {
    let invalid = key.is_empty()
        || key
            .chars()
            .any(|ch| ch == EQUALS || ch == COMMENT || ch == QUOTE_START || ch.is_whitespace());
    if invalid {
        return Err(Error::InvalidKey(key.to_owned()));
    }
    Ok(())
}
