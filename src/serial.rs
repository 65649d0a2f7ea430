//! Persistence of a finished trie as a gzip-compressed text dump.
//!
//! The format is three header lines followed by the key table:
//!
//! 1. `base` entries, comma-separated decimals;
//! 2. `check` entries, same encoding;
//! 3. the alphabet as `codepoint=code;` pairs, every pair `;`-terminated;
//! 4. one key per line, the last key without a trailing newline.
//!
//! Loading validates every field and fails with
//! [`InvalidFormat`](crate::DatrieError::InvalidFormat) on malformed input
//! rather than coercing bad fields to zero and corrupting the arrays.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;

use crate::alphabet::Alphabet;
use crate::error::{DatrieError, Result};
use crate::trie::DoubleArrayTrie;
use crate::StateId;

impl DoubleArrayTrie {
    /// Writes the trie to `path` as a gzip-compressed dump.
    ///
    /// On unix the file mode is set to `0o744`.
    pub fn dump<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut text = String::new();

        push_array(&mut text, self.base());
        text.push('\n');
        push_array(&mut text, self.check());
        text.push('\n');
        for (ch, code) in self.alphabet().pairs() {
            let _ = write!(text, "{}={};", ch as u32, code);
        }
        text.push('\n');
        let mut keys = self.keys().iter();
        if let Some(first) = keys.next() {
            text.push_str(first);
            for key in keys {
                text.push('\n');
                text.push_str(key);
            }
        }

        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(text.as_bytes())?;
        let file = encoder.finish()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o744))?;
        }
        #[cfg(not(unix))]
        let _ = file;

        debug!("dumped {} keys to {}", self.num_keys(), path.display());
        Ok(())
    }

    /// Reads a trie back from a dump previously written by
    /// [`dump`](Self::dump).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut text = String::new();
        GzDecoder::new(file).read_to_string(&mut text)?;

        let lines: Vec<&str> = text.split('\n').collect();
        if lines.len() < 3 {
            return Err(DatrieError::invalid_format(format!(
                "expected 3 header lines, found {}",
                lines.len()
            )));
        }

        let base = parse_array(lines[0], "base")?;
        let check = parse_array(lines[1], "check")?;
        if base.len() != check.len() {
            return Err(DatrieError::invalid_format(format!(
                "base has {} entries but check has {}",
                base.len(),
                check.len()
            )));
        }
        let alphabet = parse_alphabet(lines[2])?;

        let rest = &lines[3..];
        let keys: Vec<String> = if rest.is_empty() || (rest.len() == 1 && rest[0].is_empty()) {
            Vec::new()
        } else {
            rest.iter().map(|line| line.to_string()).collect()
        };

        // End-of-word markers index into the key table; a marker pointing
        // past it would panic at query time.
        for &b in &base {
            if b < 0 {
                let index = -(b as i64) - 1;
                if index >= keys.len() as i64 {
                    return Err(DatrieError::invalid_format(format!(
                        "terminal marker {} exceeds key count {}",
                        b,
                        keys.len()
                    )));
                }
            }
        }

        debug!("loaded {} keys from {}", keys.len(), path.display());
        Ok(Self::from_parts(base, check, alphabet, keys))
    }
}

fn push_array(text: &mut String, entries: &[StateId]) {
    let mut entries = entries.iter();
    if let Some(first) = entries.next() {
        let _ = write!(text, "{}", first);
        for entry in entries {
            let _ = write!(text, ",{}", entry);
        }
    }
}

fn parse_array(line: &str, name: &str) -> Result<Vec<StateId>> {
    if line.is_empty() {
        return Ok(Vec::new());
    }
    line.split(',')
        .map(|field| {
            field.parse::<StateId>().map_err(|_| {
                DatrieError::invalid_format(format!("invalid integer {:?} in {} line", field, name))
            })
        })
        .collect()
}

fn parse_alphabet(line: &str) -> Result<Alphabet> {
    if line.is_empty() {
        return Ok(Alphabet::from_pairs(Vec::new()));
    }
    let body = line.strip_suffix(';').ok_or_else(|| {
        DatrieError::invalid_format("alphabet line does not end with ';'".to_string())
    })?;

    let mut pairs = Vec::new();
    for entry in body.split(';') {
        let (cp, code) = entry.split_once('=').ok_or_else(|| {
            DatrieError::invalid_format(format!("invalid alphabet entry {:?}", entry))
        })?;
        let cp = cp.parse::<u32>().map_err(|_| {
            DatrieError::invalid_format(format!("invalid code point {:?} in alphabet", cp))
        })?;
        let ch = char::from_u32(cp).ok_or_else(|| {
            DatrieError::invalid_format(format!("code point {} is not a scalar value", cp))
        })?;
        let code = code.parse::<StateId>().map_err(|_| {
            DatrieError::invalid_format(format!("invalid code {:?} in alphabet", code))
        })?;
        pairs.push((ch, code));
    }
    Ok(Alphabet::from_pairs(pairs))
}
