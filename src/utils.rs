use std::collections::BTreeSet;
use std::io::{self, Write};

use itertools::Itertools;

pub fn slice_to_set_of_owned(input: &[&str]) -> BTreeSet<String> {
    input.iter().map(|x| x.to_string()).collect()
}

/// Every unordered pair of distinct positions, in lexicographic order of positions.
pub fn all_pairs<T: Clone>(items: &[T]) -> Vec<(T, T)> {
    items.iter().cloned().tuple_combinations().collect()
}

pub fn write(dest: &mut impl Write, input: &str) -> io::Result<()> {
    dest.write_all(input.as_bytes())
}
