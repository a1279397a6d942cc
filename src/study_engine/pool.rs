use rand::Rng;
use rand::seq::SliceRandom;
use crate::study_engine::models::Word;

/// A shuffled draw pile over a slice of words.
///
/// Holds references only, so drawing never clones a word until the caller
/// decides to keep it.
pub struct WordPool<'a> {
    words: Vec<&'a Word>,
    cursor: usize,
}

impl<'a> WordPool<'a> {
    /// Build a pile from `words` and shuffle it with `rng`.
    pub fn new_shuffled<R: Rng>(rng: &mut R, words: &'a [Word]) -> Self {
        let mut words: Vec<&Word> = words.iter().collect();
        words.shuffle(rng);
        WordPool { words, cursor: 0 }
    }

    /// Draw one word, or `None` once the pile is empty.
    pub fn draw(&mut self) -> Option<&'a Word> {
        let word = self.words.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(word)
    }

    /// Draw up to `n` words; fewer if the pile runs out.
    pub fn draw_n(&mut self, n: usize) -> Vec<&'a Word> {
        let mut drawn = Vec::with_capacity(n.min(self.remaining()));
        while drawn.len() < n {
            match self.draw() {
                Some(word) => drawn.push(word),
                None => break,
            }
        }
        drawn
    }

    /// Words left to draw.
    pub fn remaining(&self) -> usize {
        self.words.len() - self.cursor
    }

    /// Everything drawn so far, in draw order.
    pub fn drawn(&self) -> &[&'a Word] {
        &self.words[..self.cursor]
    }
}
