//! The memory-image loader: a whitespace-separated hex text file into memory.

use std::fmt;
use std::io;

use crate::constants::MEMORY_SIZE;
use crate::machine::Machine;
use crate::word::truncate;

/// Failure loading a memory image. Fatal to the caller; the interpreter
/// never starts if this is returned.
#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Malformed { token: String, position: usize },
    TooLarge { word_count: usize },
}

impl From<io::Error> for LoadError {
    fn from(error: io::Error) -> Self {
        LoadError::Io(error)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(error) => write!(f, "could not read memory image: {error}"),
            LoadError::Malformed { token, position } => write!(
                f,
                "malformed hex word {token:?} at position {position}"
            ),
            LoadError::TooLarge { word_count } => write!(
                f,
                "image has {word_count} words, which exceeds the {MEMORY_SIZE}-word memory"
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(error) => Some(error),
            LoadError::Malformed { .. } | LoadError::TooLarge { .. } => None,
        }
    }
}

/// Parse whitespace-separated hexadecimal words and load them into `machine`
/// starting at address 0, truncating each word to 12 bits.
pub fn load_image(machine: &mut Machine, contents: &str) -> Result<(), LoadError> {
    let mut position = 0;
    for token in contents.split_whitespace() {
        let value = u16::from_str_radix(token, 16).map_err(|_| LoadError::Malformed {
            token: token.to_string(),
            position,
        })?;
        if position >= MEMORY_SIZE {
            return Err(LoadError::TooLarge {
                word_count: position + 1,
            });
        }
        machine.write(position as u16, truncate(value));
        position += 1;
    }
    Ok(())
}

/// Read `path` and load it as described in [`load_image`].
pub fn load_image_file(machine: &mut Machine, path: &std::path::Path) -> Result<(), LoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_image(machine, &contents)
}
