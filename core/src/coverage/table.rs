use super::status::LineStatus;

/// Per-file table of line statuses over the closed range
/// `[begin_line, end_line]`, 1-based, initialized to `Empty`.
#[derive(Debug, Clone)]
pub struct LineStatuses {
    begin_line: u32,
    end_line: u32,
    statuses: Vec<LineStatus>,
}

impl LineStatuses {
    /// # Panics
    ///
    /// Panics when `begin_line < 1` or `end_line <= begin_line`. Bounds like
    /// that mean the upstream range extraction is defective, not a runtime
    /// condition to recover from.
    pub fn new(begin_line: u32, end_line: u32) -> Self {
        assert!(begin_line >= 1, "begin_line must be >= 1, got {begin_line}");
        assert!(
            end_line > begin_line,
            "end_line must be > begin_line, got [{begin_line}, {end_line}]"
        );
        let len = (end_line - begin_line + 1) as usize;
        Self {
            begin_line,
            end_line,
            statuses: vec![LineStatus::Empty; len],
        }
    }

    pub fn begin_line(&self) -> u32 {
        self.begin_line
    }

    pub fn end_line(&self) -> u32 {
        self.end_line
    }

    /// Paints `status` onto every listed line. Lines outside the table's
    /// range are ignored; coverage tools occasionally report lines beyond
    /// the measured span.
    pub fn paint<'a, I>(&mut self, lines: I, status: LineStatus)
    where
        I: IntoIterator<Item = &'a u32>,
    {
        for &line in lines {
            if let Some(idx) = self.index_of(line) {
                self.statuses[idx] = status;
            }
        }
    }

    /// Status of `line`; `Empty` for lines outside the table's range.
    pub fn status_at(&self, line: u32) -> LineStatus {
        self.index_of(line)
            .map(|idx| self.statuses[idx])
            .unwrap_or(LineStatus::Empty)
    }

    fn index_of(&self, line: u32) -> Option<usize> {
        if line < self.begin_line || line > self.end_line {
            None
        } else {
            Some((line - self.begin_line) as usize)
        }
    }
}
