use std::{fs, path::Path};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::{AppError, AppResult};

/// A token of a passage together with the character offset of its first
/// character in the original passage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub index: usize,
}

/// Split a passage on single ASCII spaces.
///
/// Consecutive spaces produce empty words; their `index` still advances so
/// that `index[i] == index[i - 1] + len(text[i - 1]) + 1` holds throughout.
pub fn tokenize(passage: &str) -> Vec<Word> {
    let mut offset = 0;
    passage
        .split(' ')
        .map(|text| {
            let word = Word {
                text: text.to_string(),
                index: offset,
            };
            offset += text.chars().count() + 1;
            word
        })
        .collect()
}

/// Non-empty, immutable list of passages supplied at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassageList(Vec<String>);

impl PassageList {
    /// Build a list from raw lines, dropping blank ones. Returns `None` when
    /// nothing is left.
    pub fn from_lines<I, S>(lines: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let passages: Vec<String> = lines
            .into_iter()
            .map(|l| l.as_ref().trim_end_matches('\r').to_string())
            .filter(|l| !l.trim().is_empty())
            .collect();

        if passages.is_empty() {
            None
        } else {
            Some(Self(passages))
        }
    }

    /// One passage per line; blank and whitespace-only lines are skipped.
    pub fn load(path: &Path) -> AppResult<Self> {
        let data = fs::read_to_string(path).map_err(|source| AppError::ReadPromptFile {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_lines(data.split('\n'))
            .ok_or_else(|| AppError::EmptyPromptFile(path.to_path_buf()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.0.get(idx).map(String::as_str)
    }
}

/// Draws passages uniformly at random. Used for the first round as well as
/// every later one.
#[derive(Debug)]
pub struct PassagePicker {
    passages: PassageList,
    rng: StdRng,
}

impl PassagePicker {
    pub fn new(passages: PassageList, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { passages, rng }
    }

    pub fn pick(&mut self) -> String {
        let idx = self.rng.gen_range(0..self.passages.0.len());
        self.passages.0[idx].clone()
    }
}
