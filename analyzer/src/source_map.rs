/// Line index over a source text, for diagnostics.
pub struct SourceMap<'a> {
    src: &'a str,
    line_starts: Vec<u32>,
}

impl<'a> SourceMap<'a> {
    pub fn new(src: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(src.match_indices('\n').map(|(i, _)| i as u32 + 1))
            .collect();
        Self { src, line_starts }
    }

    fn line_index(&self, byte: u32) -> usize {
        self.line_starts
            .partition_point(|&start| start <= byte)
            .saturating_sub(1)
    }

    /// 1-based line and column. The column counts chars, not bytes.
    pub fn line_col(&self, byte: u32) -> (usize, usize) {
        let line = self.line_index(byte);
        let start = self.line_starts[line] as usize;
        let end = (byte as usize).min(self.src.len()).max(start);
        let col = self
            .src
            .get(start..end)
            .map_or(end - start, |text| text.chars().count());
        (line + 1, col + 1)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_count_chars() {
        let sm = SourceMap::new("class A {\n  String é = x;\n}");
        assert_eq!(sm.line_col(0), (1, 1));
        assert_eq!(sm.line_col(10), (2, 1));
        // `=` after the two-byte `é`.
        assert_eq!(sm.line_col(22), (2, 12));
        assert_eq!(sm.line_count(), 3);
    }
}
