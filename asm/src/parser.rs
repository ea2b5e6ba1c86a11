// ----------------------------------------------------------------------------
// Line

/// One source line split into its positional columns. The raw text is kept
/// (uppercased) because pass 1 copies it into the intermediate file and the
/// listing reproduces it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub raw: String,
    pub label: String,
    pub opcode: String,
    pub operand: String,
}

const DELIMS: [char; 2] = ['\t', ' '];

impl Line {
    /// Splits a source line into label, opcode and operand.
    ///
    /// The line is uppercased first. Runs of delimiters collapse. A line
    /// beginning with a delimiter carries no label; the label column is then
    /// the empty string, never absent. Tokens past the operand column are
    /// trailing comment and dropped.
    pub fn parse(src: &str) -> Line {
        let raw = src.to_ascii_uppercase();
        let mut cols: Vec<String> = raw
            .split(DELIMS)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        cols.resize_with(4, String::new);
        if raw.starts_with(DELIMS) {
            cols.insert(0, String::new());
        }
        let mut cols = cols.into_iter();
        Line {
            label: cols.next().unwrap_or_default(),
            opcode: cols.next().unwrap_or_default(),
            operand: cols.next().unwrap_or_default(),
            raw,
        }
    }

    /// True when every column is empty (a line of pure whitespace).
    pub fn is_blank(&self) -> bool {
        self.label.is_empty() && self.opcode.is_empty() && self.operand.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_line() {
        let line = Line::parse("COPY START 1000");
        assert_eq!(line.label, "COPY");
        assert_eq!(line.opcode, "START");
        assert_eq!(line.operand, "1000");
    }

    #[test]
    fn label_absent_when_line_starts_with_whitespace() {
        let line = Line::parse("\tLDA\tBUFFER");
        assert_eq!(line.label, "");
        assert_eq!(line.opcode, "LDA");
        assert_eq!(line.operand, "BUFFER");
    }

    #[test]
    fn delimiters_collapse() {
        let line = Line::parse("LOOP   TD \t INDEV");
        assert_eq!(line.label, "LOOP");
        assert_eq!(line.opcode, "TD");
        assert_eq!(line.operand, "INDEV");
    }

    #[test]
    fn line_is_uppercased() {
        let line = Line::parse("first lda buffer");
        assert_eq!(line.raw, "FIRST LDA BUFFER");
        assert_eq!(line.label, "FIRST");
        assert_eq!(line.opcode, "LDA");
        assert_eq!(line.operand, "BUFFER");
    }

    #[test]
    fn trailing_comment_dropped() {
        let line = Line::parse(" LDA BUFFER load the word");
        assert_eq!(line.operand, "BUFFER");
    }

    #[test]
    fn whitespace_only_line_is_blank() {
        assert!(Line::parse(" \t ").is_blank());
        assert!(!Line::parse(" RSUB").is_blank());
    }

    #[test]
    fn missing_columns_are_empty() {
        let line = Line::parse("HERE");
        assert_eq!(line.label, "HERE");
        assert_eq!(line.opcode, "");
        assert_eq!(line.operand, "");
    }
}
