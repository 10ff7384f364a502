//! Row tokenizer for manifest lines.
//!
//! Splits one line on top-level commas. Double quotes open and close a
//! quoted section in which commas are data; inside quotes `""` stands for a
//! literal `"`. Quote characters that toggle state are dropped, everything
//! else is kept verbatim (no trimming here).
//!
//! The scan is lenient: an unterminated quote swallows the rest of the line
//! into the current field and no error is raised.

/// Where the scanner is relative to quoted sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Outside,
    Inside,
    /// Inside quotes and the previous char was `"`; the next char decides
    /// between an escaped quote and a closing quote.
    InsideAfterQuote,
}

/// Fold state: finished fields, current buffer, quote position.
#[derive(Debug)]
struct Scan {
    fields: Vec<String>,
    buffer: String,
    quote: Quote,
}

impl Scan {
    fn new() -> Self {
        Self {
            fields: Vec::new(),
            buffer: String::new(),
            quote: Quote::Outside,
        }
    }

    fn step(mut self, c: char) -> Self {
        match (self.quote, c) {
            (Quote::Outside, '"') => self.quote = Quote::Inside,
            (Quote::Outside, ',') => {
                let field = std::mem::take(&mut self.buffer);
                self.fields.push(field);
            }
            (Quote::Outside, _) => self.buffer.push(c),

            (Quote::Inside, '"') => self.quote = Quote::InsideAfterQuote,
            (Quote::Inside, _) => self.buffer.push(c),

            (Quote::InsideAfterQuote, '"') => {
                self.buffer.push('"');
                self.quote = Quote::Inside;
            }
            (Quote::InsideAfterQuote, _) => {
                // The pending quote closed the section; reprocess c outside.
                self.quote = Quote::Outside;
                return self.step(c);
            }
        }
        self
    }

    fn finish(mut self) -> Vec<String> {
        self.fields.push(self.buffer);
        self.fields
    }
}

/// Split one line into raw fields.
///
/// Always returns at least one field; a line with `n` top-level commas
/// yields `n + 1` fields.
///
/// # Example
/// ```
/// use gallery::parser::tokenize_row;
///
/// let fields = tokenize_row(r#"abstract,"a, b",x"#);
/// assert_eq!(fields, vec!["abstract", "a, b", "x"]);
/// ```
pub fn tokenize_row(line: &str) -> Vec<String> {
    line.chars().fold(Scan::new(), Scan::step).finish()
}
