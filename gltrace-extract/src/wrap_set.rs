use hashbrown::HashSet;
use tracing::{debug, instrument};
use ustr::Ustr;

use gltrace_util::Trace;

use crate::error::Error;
type Result<T, E = Error> = std::result::Result<T, E>;

/// The set of function names selected for tracing.
///
/// Held both as a hash set for membership tests and as a sorted list so that everything generated from it comes out
/// in the same order on every run.
#[derive(Debug, Clone, Default)]
pub struct WrapSet {
    members: HashSet<Ustr>,
    sorted: Vec<Ustr>,
}

impl WrapSet {
    /// Build the wrap set from the contents of a function list.
    ///
    /// Only the last whitespace-separated token of each line is significant, so lines may carry leading annotation
    /// columns. Lines starting with `//` are skipped. Blank lines are an error.
    #[instrument(level = "trace", skip(contents))]
    pub fn parse(contents: &str) -> Result<WrapSet> {
        let identifier = regex::Regex::new("^[A-Za-z_][A-Za-z0-9_]*$").unwrap();

        let mut members = HashSet::new();
        let mut sorted = Vec::new();

        for (index, line) in contents.lines().enumerate() {
            let line_number = index + 1;

            let name = match line.split_whitespace().last() {
                Some(name) => name,
                None => {
                    return Err(Error::BlankWrapListLine {
                        line: line_number,
                        source: Trace::new(),
                    })
                }
            };

            if line.trim_start().starts_with("//") {
                continue;
            }

            if !identifier.is_match(name) {
                return Err(Error::InvalidFunctionName {
                    line: line_number,
                    name: name.to_string(),
                });
            }

            let name = Ustr::from(name);
            if members.insert(name) {
                sorted.push(name);
            } else {
                debug!("\"{name}\" is listed more than once (line {line_number})");
            }
        }

        sorted.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        Ok(WrapSet { members, sorted })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(&Ustr::from(name))
    }

    /// Iterate the names in lexicographic order
    pub fn iter(&self) -> std::slice::Iter<'_, Ustr> {
        self.sorted.iter()
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
}

impl<'a> IntoIterator for &'a WrapSet {
    type Item = &'a Ustr;
    type IntoIter = std::slice::Iter<'a, Ustr>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
