use std::cell::RefCell;

use crate::parser::base::ParseError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug)]
pub(crate) struct LeftWidth(pub usize);

#[derive(Debug)]
pub(crate) struct MiddleWidth(pub usize);

#[derive(Debug)]
pub(crate) struct TotalWidth(pub usize);

/// Lays out a left column (ex: option aliases) next to a word-wrapped middle column (ex: the hint).
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    left: LeftWidth,
    middle: MiddleWidth,
}

pub(crate) const PADDING_WIDTH: usize = 3;

// We'll target 95% of the total width, to ensure the renderer doesn't literally use the full space.
const TARGET_TOTAL_FACTOR: f64 = 0.95;
// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

impl ColumnRenderer {
    /// Produce a renderer based off the widths of the content.
    /// The middle column gets all the room it needs when it fits, and otherwise whatever remains of the total.
    pub(crate) fn guided(left: LeftWidth, middle: MiddleWidth, total_width: TotalWidth) -> Self {
        let non_middle = left.0 + PADDING_WIDTH;
        let target_total_width = (total_width.0 as f64 * TARGET_TOTAL_FACTOR) as usize;
        let guided_middle = std::cmp::max(middle.0, MINIMUM_MIDDLE_WIDTH);

        if guided_middle + non_middle <= target_total_width {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} and middle fit within the target total {target_total_width}.  Selecting middle: {guided_middle}.");
            }

            Self::new(left, MiddleWidth(guided_middle))
        } else if non_middle < total_width.0 {
            let calculated_middle =
                std::cmp::max(total_width.0 - non_middle, MINIMUM_MIDDLE_WIDTH);

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} fit within the total {}.  Selecting middle: {calculated_middle}.", total_width.0);
            }

            Self::new(left, MiddleWidth(calculated_middle))
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} do not fit within the total {}.  Selecting middle: {MINIMUM_MIDDLE_WIDTH}.", total_width.0);
            }

            Self::new(left, MiddleWidth(MINIMUM_MIDDLE_WIDTH))
        }
    }

    pub(crate) fn new(left: LeftWidth, middle: MiddleWidth) -> Self {
        Self { left, middle }
    }

    pub(crate) fn render(&self, indent: usize, left: &str, middle: &str) -> Vec<String> {
        let left_column_width = self.left.0;
        let middle_column_width = self.middle.0.saturating_sub(indent).max(2);
        let padding = format!("{:PADDING_WIDTH$}", "");
        let mut out: Vec<String> = chunk(middle, middle_column_width)
            .into_iter()
            .enumerate()
            .map(|(i, part)| {
                let left = if i == 0 { left } else { "" };
                format!("{:indent$}{:left_column_width$}{padding}{part}", "", left)
            })
            .collect();

        if out.is_empty() {
            out.push(format!("{:indent$}{left}", ""));
        }

        out
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ').filter(|word| !word.is_empty()) {
        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + word.chars().count() + 1 <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let characters: Vec<char> = word.chars().collect();
    let increment = width - 1;
    let mut left = 0;

    while left + increment + 1 < characters.len() {
        let piece: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{piece}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}

pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: ParseError);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: ParseError) {
        eprintln!("{error}");
    }
}

/// Collects the printed lines, for rendering into a string.
#[derive(Default)]
pub(crate) struct BufferInterface {
    lines: RefCell<Vec<String>>,
}

impl BufferInterface {
    pub(crate) fn into_string(self) -> String {
        self.lines.into_inner().join("\n")
    }
}

impl UserInterface for BufferInterface {
    fn print(&self, message: String) {
        self.lines.borrow_mut().push(message);
    }

    fn print_error(&self, error: ParseError) {
        self.lines.borrow_mut().push(error.to_string());
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 5, vec![])]
    #[case("   ", 5, vec![])]
    #[case("abc", 5, vec!["abc"])]
    #[case("abcde", 5, vec!["abcde"])]
    #[case("abcdef", 5, vec!["abcd-", "ef"])]
    #[case("abcdefghij", 5, vec!["abcd-", "efgh-", "ij"])]
    #[case("ab cd", 5, vec!["ab cd"])]
    #[case("ab  cd", 5, vec!["ab cd"])]
    #[case("ab cde", 5, vec!["ab", "cde"])]
    #[case("a bcdefgh i", 5, vec!["a", "bcde-", "fgh i"])]
    #[case("ééé ééé", 5, vec!["ééé", "ééé"])]
    #[case("éééééé", 5, vec!["éééé-", "éé"])]
    fn chunk_paragraph(
        #[case] paragraph: &str,
        #[case] width: usize,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(chunk(paragraph, width), expected);
    }

    #[rstest]
    #[case(20, 10, 80, 20)]
    #[case(5, 10, 80, MINIMUM_MIDDLE_WIDTH)]
    #[case(70, 10, 80, 67)]
    #[case(90, 10, 80, 67)]
    #[case(10, 70, 80, MINIMUM_MIDDLE_WIDTH)]
    #[case(10, 90, 80, MINIMUM_MIDDLE_WIDTH)]
    fn guided(
        #[case] middle: usize,
        #[case] left: usize,
        #[case] total: usize,
        #[case] expected_middle: usize,
    ) {
        let renderer = ColumnRenderer::guided(LeftWidth(left), MiddleWidth(middle), TotalWidth(total));
        assert_eq!(renderer.middle.0, expected_middle);
    }

    #[test]
    fn render() {
        // Setup
        let renderer = ColumnRenderer::new(LeftWidth(6), MiddleWidth(12));

        // Execute
        let lines = renderer.render(1, "-a", "one two three four");

        // Verify
        assert_eq!(
            lines,
            vec![
                " -a       one two",
                "          three four",
            ]
        );
    }

    #[test]
    fn render_without_middle() {
        let renderer = ColumnRenderer::new(LeftWidth(6), MiddleWidth(12));
        assert_eq!(renderer.render(1, "-a", ""), vec![" -a"]);
    }
}
