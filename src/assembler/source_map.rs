//! Source map for bidirectional mapping between output offsets and source lines

/// Bidirectional mapping between output byte offsets and source lines
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    /// Emitted ranges with their source line.
    /// Appended in output order, so ranges are sorted and disjoint.
    entries: Vec<(OffsetRange, usize)>,
}

/// A range of output byte offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetRange {
    /// Starting offset (inclusive)
    pub start: u32,

    /// Ending offset (exclusive)
    pub end: u32,
}

impl OffsetRange {
    pub fn contains(&self, offset: u32) -> bool {
        self.start <= offset && offset < self.end
    }
}

impl SourceMap {
    /// Create a new empty source map
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `range` of the output came from source `line`.
    ///
    /// Ranges must be added in increasing offset order.
    pub fn add_mapping(&mut self, range: OffsetRange, line: usize) {
        self.entries.push((range, line));
    }

    /// Source line that emitted the byte at `offset`
    pub fn line_for_offset(&self, offset: u32) -> Option<usize> {
        let idx = self.entries.partition_point(|(range, _)| range.end <= offset);
        self.entries
            .get(idx)
            .filter(|(range, _)| range.contains(offset))
            .map(|(_, line)| *line)
    }

    /// Output range emitted by source `line`
    pub fn range_for_line(&self, line: usize) -> Option<OffsetRange> {
        self.entries
            .binary_search_by_key(&line, |(_, l)| *l)
            .ok()
            .map(|idx| self.entries[idx].0)
    }

    /// Number of mapped instructions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
