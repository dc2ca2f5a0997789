//! Text renderings of a skip list for debugging.
//!
//! Everything here only walks the levels; nothing mutates the list.

use std::fmt;
use std::fmt::Write;

use crate::skip_list::SkipList;

/// Write values separated by single spaces.
fn write_joined<'a, T, W>(out: &mut W, values: impl Iterator<Item = &'a T>) -> fmt::Result
where
    T: fmt::Display + 'a,
    W: Write,
{
    for (i, value) in values.enumerate() {
        if i > 0 {
            out.write_char(' ')?;
        }
        write!(out, "{}", value)?;
    }
    return Ok(());
}

impl<T: fmt::Display, R> SkipList<T, R> {
    /// Render every level, top first, one line per level.
    ///
    /// ```
    /// use capped_skiplist::SkipList;
    ///
    /// let list = SkipList::from_slice(&[7]).unwrap();
    /// assert_eq!(list.to_full_string(), "7");
    /// ```
    pub fn to_full_string(&self) -> String {
        let mut out = String::new();
        for (i, level) in self.levels().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for (j, value) in level.enumerate() {
                if j > 0 {
                    out.push(' ');
                }
                out.push_str(&value.to_string());
            }
        }
        return out;
    }

    /// Print level 0 to stdout.
    pub fn print(&self) {
        println!("{}", self);
    }

    /// Print every level to stdout, top first.
    pub fn print_full(&self) {
        println!("{}", self.to_full_string());
    }
}

/// Level 0 as space-separated values. Empty lists render as "".
impl<T: fmt::Display, R> fmt::Display for SkipList<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write_joined(f, self.iter());
    }
}

impl<T: fmt::Debug, R> fmt::Debug for SkipList<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let levels: Vec<Vec<&T>> = self.levels().map(|level| level.collect()).collect();
        return f
            .debug_struct("SkipList")
            .field("len", &self.len())
            .field("height", &self.height())
            .field("levels", &levels)
            .finish();
    }
}
