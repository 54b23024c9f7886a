//! Command parsing and execution.
//!
//! One command per line, dispatched on a three-letter opcode:
//!
//! ```text
//! INC <key>             insert
//! REM <key>             delete
//! SUC <key> <version>   successor query
//! IMP <version>         in-order dump of a version
//! ```
//!
//! Blank lines and unknown opcodes are skipped; a recognized opcode with
//! malformed arguments is an error the caller reports without aborting.

use versa_common::error::{VersaError, VersaResult};
use versa_common::types::{Key, Version};
use versa_tree::{Color, TraversalOrder, VersaTree};

/// One parsed command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Insert a key.
    Insert(Key),
    /// Delete a key.
    Remove(Key),
    /// Successor of a key in a given version.
    Successor(Key, Version),
    /// In-order dump of a given version.
    PrintInOrder(Version),
}

impl Command {
    /// Parses one line. Returns `Ok(None)` for blank lines and unknown
    /// opcodes.
    pub fn parse(line: &str) -> VersaResult<Option<Self>> {
        let mut parts = line.split_whitespace();
        let Some(opcode) = parts.next() else {
            return Ok(None);
        };
        match opcode {
            "INC" => Ok(Some(Self::Insert(parse_key(parts.next(), line)?))),
            "REM" => Ok(Some(Self::Remove(parse_key(parts.next(), line)?))),
            "SUC" => {
                let key = parse_key(parts.next(), line)?;
                let version = parse_version(parts.next(), line)?;
                Ok(Some(Self::Successor(key, version)))
            }
            "IMP" => Ok(Some(Self::PrintInOrder(parse_version(parts.next(), line)?))),
            _ => Ok(None),
        }
    }

    /// Runs the command against `map`, returning the lines to print.
    pub fn execute(&self, map: &mut VersaTree) -> String {
        match *self {
            Self::Insert(key) => {
                map.insert(key);
                format!("INC {key}")
            }
            Self::Remove(key) => match map.delete(key) {
                Ok(()) => format!("REM {key}"),
                Err(_) => format!("REM {key}\nKey {key} not found in the tree"),
            },
            Self::Successor(key, version) => {
                let result = map
                    .successor(key, version)
                    .map_or(Key::MAX.as_i64(), |k| k.as_i64());
                format!("SUC {key} {}\n{result}", version.as_u64())
            }
            Self::PrintInOrder(version) => {
                let mut out = format!("IMP {}\n", version.as_u64());
                for entry in map.traverse_at(TraversalOrder::InOrder, version) {
                    out.push_str(&format!(
                        "{},{},{} ",
                        entry.key,
                        entry.depth,
                        color_letter(entry.color)
                    ));
                }
                out
            }
        }
    }
}

/// The single-letter color code used by the dump format.
fn color_letter(color: Color) -> char {
    match color {
        Color::Red => 'R',
        Color::Black => 'N',
    }
}

fn parse_key(token: Option<&str>, line: &str) -> VersaResult<Key> {
    let token = token
        .ok_or_else(|| VersaError::invalid_argument(format!("missing key in: {line}")))?;
    token
        .parse::<i64>()
        .map(Key::new)
        .map_err(|_| VersaError::invalid_argument(format!("bad key '{token}' in: {line}")))
}

fn parse_version(token: Option<&str>, line: &str) -> VersaResult<Version> {
    let token = token
        .ok_or_else(|| VersaError::invalid_argument(format!("missing version in: {line}")))?;
    token
        .parse::<u64>()
        .map(Version::new)
        .map_err(|_| VersaError::invalid_argument(format!("bad version '{token}' in: {line}")))
}
