use terminal_size::{terminal_size, Width};

use crate::constant::*;
use crate::parser::{ColumnRenderer, LeftWidth, MiddleWidth, PaddingWidth, TotalWidth};
use crate::schema::{BindingId, Schema};

const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 1;

struct Row {
    left: String,
    description: String,
}

/// The width of the current terminal, or a default when there is none (ex: output is redirected).
pub(crate) fn terminal_width() -> usize {
    if let Some((Width(terminal_width), _)) = terminal_size() {
        terminal_width as usize
    } else {
        DEFAULT_TOTAL_WIDTH
    }
}

/// Renders the usage text of one level of a schema.
pub(crate) struct Printer<'a> {
    schema: &'a Schema,
    total_width: usize,
}

impl<'a> Printer<'a> {
    pub(crate) fn new(schema: &'a Schema, total_width: usize) -> Self {
        Self {
            schema,
            total_width,
        }
    }

    /// Render the usage of the level owned by `owner` (`None` for the root).
    pub(crate) fn render(&self, owner: Option<BindingId>) -> String {
        let mut required = Vec::default();
        let mut optional = Vec::default();

        for id in self.schema.level(owner) {
            if self.schema.binding(*id).is_required() {
                self.collect(*id, 0, &mut required);
            } else {
                self.collect(*id, 0, &mut optional);
            }
        }

        if self.schema.config().auto_help {
            optional.push(Row {
                left: format!("{HELP_SHORT}, {HELP_LONG}"),
                description: HELP_MESSAGE.to_string(),
            });
        }

        let rows = required.iter().chain(optional.iter());
        let left_column_width = rows
            .clone()
            .map(|row| row.left.chars().count())
            .max()
            .unwrap_or(1)
            .max(1);
        let middle_column_width = rows
            .map(|row| row.description.chars().count())
            .max()
            .unwrap_or(2)
            .max(2);
        let column_renderer = ColumnRenderer::guided(
            PaddingWidth::new(PADDING_WIDTH).expect("internal error - padding must be positive"),
            LeftWidth::new(left_column_width).expect("internal error - left must be positive"),
            MiddleWidth::new(middle_column_width)
                .expect("internal error - middle must be at least 2"),
            TotalWidth(self.total_width.saturating_sub(MAIN_INDENT)),
        );

        let mut lines = vec![format!(
            "usage: {} [options]",
            self.schema.qualified_name(owner)
        )];

        for (title, section) in [
            ("Required arguments:", &required),
            ("Optional arguments:", &optional),
        ] {
            if section.is_empty() {
                continue;
            }

            lines.push(String::default());
            lines.push(title.to_string());

            for row in section {
                lines.extend(column_renderer.render(MAIN_INDENT, &row.left, &row.description));
            }
        }

        lines.join("\n")
    }

    // Commands list their nested bindings beneath them, one indent deeper.
    fn collect(&self, id: BindingId, depth: usize, rows: &mut Vec<Row>) {
        let binding = self.schema.binding(id);
        let names = if depth > 0 && !binding.is_required() {
            format!("[{}]", binding.display_names())
        } else {
            binding.display_names()
        };
        let indent = depth * CHILD_INDENT;
        rows.push(Row {
            left: format!("{:indent$}{names}", ""),
            description: binding.description().to_string(),
        });

        for child in binding.children() {
            self.collect(*child, depth + 1, rows);
        }
    }
}
