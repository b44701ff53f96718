use crate::error::IndexError;
use crate::types::Chunk;

#[derive(Debug, Clone)]
pub struct SplitterConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// Sliding-window character splitter. The unit is Unicode scalar values;
/// each window advances by `chunk_size - chunk_overlap` so consecutive
/// chunks share `chunk_overlap` chars of context across the boundary.
pub struct TextSplitter {
    config: SplitterConfig,
}

impl TextSplitter {
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidConfig`] if `chunk_size` is zero or
    /// `chunk_overlap >= chunk_size`.
    pub fn new(config: SplitterConfig) -> Result<Self, IndexError> {
        if config.chunk_size == 0 {
            return Err(IndexError::InvalidConfig("chunk_size must be > 0".into()));
        }
        if config.chunk_overlap >= config.chunk_size {
            return Err(IndexError::InvalidConfig(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                config.chunk_overlap, config.chunk_size
            )));
        }
        Ok(Self { config })
    }

    /// Split `text` into overlapping windows. Every chunk except the last
    /// has exactly `chunk_size` chars; the walk stops at the window that
    /// reaches the end of the text. Empty input yields no chunks.
    #[must_use]
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let step = self.config.chunk_size - self.config.chunk_overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + self.config.chunk_size).min(chars.len());
            chunks.push(Chunk {
                id: chunks.len(),
                text: chars[start..end].iter().collect(),
                source_offset: start,
            });
            if end == chars.len() {
                break;
            }
            start += step;
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter(chunk_size: usize, chunk_overlap: usize) -> TextSplitter {
        TextSplitter::new(SplitterConfig {
            chunk_size,
            chunk_overlap,
        })
        .unwrap()
    }

    #[test]
    fn zero_chunk_size_rejected() {
        let result = TextSplitter::new(SplitterConfig {
            chunk_size: 0,
            chunk_overlap: 0,
        });
        assert!(matches!(result, Err(IndexError::InvalidConfig(_))));
    }

    #[test]
    fn overlap_equal_to_size_rejected() {
        let result = TextSplitter::new(SplitterConfig {
            chunk_size: 4,
            chunk_overlap: 4,
        });
        assert!(matches!(result, Err(IndexError::InvalidConfig(_))));
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(splitter(4, 2).split("").is_empty());
    }

    #[test]
    fn overlapping_windows() {
        let chunks = splitter(4, 2).split("abcdefghij");
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["abcd", "cdef", "efgh", "ghij"]);
    }

    #[test]
    fn ids_and_offsets_follow_the_walk() {
        let chunks = splitter(4, 2).split("abcdefghij");
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.id, i);
            assert_eq!(chunk.source_offset, i * 2);
        }
    }

    #[test]
    fn last_window_may_be_shorter() {
        let chunks = splitter(4, 0).split("abcdef");
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["abcd", "ef"]);
    }

    #[test]
    fn input_smaller_than_window() {
        let chunks = splitter(100, 10).split("short");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "short");
        assert_eq!(chunks[0].source_offset, 0);
    }

    #[test]
    fn multibyte_chars_counted_as_one() {
        let chunks = splitter(2, 0).split("héllo");
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["hé", "ll", "o"]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn all_but_last_have_exact_size(
                text in "[a-z]{1,300}",
                chunk_size in 1usize..50,
                overlap_frac in 0usize..50,
            ) {
                let chunk_overlap = overlap_frac * chunk_size.saturating_sub(1) / 50;
                let chunks = splitter(chunk_size, chunk_overlap).split(&text);
                for chunk in &chunks[..chunks.len() - 1] {
                    prop_assert_eq!(chunk.text.chars().count(), chunk_size);
                }
            }

            #[test]
            fn non_overlap_portions_reconstruct_input(
                text in "[a-z]{0,300}",
                chunk_size in 1usize..50,
                overlap_frac in 0usize..50,
            ) {
                let chunk_overlap = overlap_frac * chunk_size.saturating_sub(1) / 50;
                let chunks = splitter(chunk_size, chunk_overlap).split(&text);

                let mut rebuilt = String::new();
                for chunk in &chunks {
                    let skip = if chunk.id == 0 { 0 } else { chunk_overlap };
                    rebuilt.extend(chunk.text.chars().skip(skip));
                }
                prop_assert_eq!(rebuilt, text);
            }

            #[test]
            fn offsets_are_monotonic(
                text in "[a-z]{1,300}",
                chunk_size in 2usize..50,
            ) {
                let chunks = splitter(chunk_size, chunk_size / 2).split(&text);
                for pair in chunks.windows(2) {
                    prop_assert!(pair[0].source_offset < pair[1].source_offset);
                }
            }
        }
    }
}
