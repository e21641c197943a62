use crate::parser::{Error, ErrorContext};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// A column width with a lower bound, checked on construction.
macro_rules! bounded_width {
    ($name:ident, $minimum:expr) => {
        #[derive(Debug)]
        pub(crate) struct $name(usize);

        impl $name {
            pub(crate) fn new(width: usize) -> Result<Self, ()> {
                if width >= $minimum {
                    Ok($name(width))
                } else {
                    Err(())
                }
            }
        }
    };
}

bounded_width!(PaddingWidth, 1);
bounded_width!(LeftWidth, 1);
// Hyphenation needs room for one character plus the hyphen.
bounded_width!(MiddleWidth, 2);

#[derive(Debug)]
pub(crate) struct TotalWidth(pub usize);

/// Lays out a two column table: names on the left, wrapped descriptions in the middle.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    padding: PaddingWidth,
    left: LeftWidth,
    middle: MiddleWidth,
}

// Leaves a margin at the right edge.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Assuming an average word length of 5, this fits precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

impl ColumnRenderer {
    /// Fit the middle column between the fixed left column and the total width.
    pub(crate) fn guided(
        padding: PaddingWidth,
        left: LeftWidth,
        middle: MiddleWidth,
        total_width: TotalWidth,
    ) -> Self {
        let non_middle: usize = left.0 + padding.0;
        let target_total_width = (total_width.0 as f64 * TARGET_TOTAL_FACTOR) as usize;
        let guided_middle = std::cmp::max(middle.0, MINIMUM_MIDDLE_WIDTH);

        if guided_middle + non_middle <= target_total_width {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Middle {guided_middle} fits beside {non_middle} within {target_total_width}.");
            }

            Self::new(padding, left, MiddleWidth(guided_middle))
        } else if non_middle < total_width.0 {
            let calculated_middle = std::cmp::max(
                target_total_width.saturating_sub(non_middle),
                MINIMUM_MIDDLE_WIDTH,
            );

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Middle narrowed to {calculated_middle} beside {non_middle}.");
            }

            Self::new(padding, left, MiddleWidth(calculated_middle))
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Left {non_middle} overflows {}; middle falls back to {MINIMUM_MIDDLE_WIDTH}.", total_width.0);
            }

            Self::new(padding, left, MiddleWidth(MINIMUM_MIDDLE_WIDTH))
        }
    }

    pub(crate) fn new(padding: PaddingWidth, left: LeftWidth, middle: MiddleWidth) -> Self {
        Self {
            padding,
            left,
            middle,
        }
    }

    pub(crate) fn render(&self, indent: usize, left: &str, middle: &str) -> Vec<String> {
        let padding = self.padding.0;
        let padding = format!("{:padding$}", "");
        let left_column_width = self.left.0;
        assert!(left.chars().count() <= left_column_width);
        let middle_column_width = self.middle.0;
        let mut out = Vec::default();

        for (i, part) in chunk(middle, middle_column_width).iter().enumerate() {
            if i == 0 {
                out.push(format!(
                    "{:indent$}{:left_column_width$}{padding}{}",
                    "", left, part
                ));
            } else {
                out.push(format!(
                    "{:indent$}{:left_column_width$}{padding}{}",
                    "", "", part
                ));
            }
        }

        if out.is_empty() {
            out.push(format!("{:indent$}{}", "", left));
        }

        out
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if word.is_empty() {
            continue;
        }

        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + word.chars().count() < width {
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

// Splits on characters rather than bytes, so multi-byte text is never cut mid character.
fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let increment = width - 1;
    let characters: Vec<char> = word.chars().collect();
    let mut left = 0;

    while characters.len() - left > width {
        let piece: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{piece}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}

/// The sink for everything the controller shows the user in report mode.
pub trait UserInterface {
    /// Show a message (ex: the usage text).
    fn print(&self, message: String);

    /// Show an error.
    fn print_error(&self, error: Error);

    /// Show the command line context of the previous error.
    fn print_error_context(&self, error_context: ErrorContext);
}

/// Messages to stdout, errors to stderr.
#[derive(Default)]
pub struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: Error) {
        eprintln!("{error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}
