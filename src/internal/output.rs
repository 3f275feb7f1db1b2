use crossterm::style::{Color, Stylize};
use std::io::Write;

use crate::error::Result;
use crate::internal::models::Item;
use crate::utils::datetime::format_age;
use crate::utils::html::render_body;
use crate::utils::url::display_domain;

/// Indent added per level of comment nesting.
pub const COMMENT_INDENT: &str = "    ";

pub const TIP: &str = "Tip: View the page or comments in your terminal with the following command:\n    hn view [#] [-c/--comments]";

/// Where listings, comments and pages end up.
pub trait Renderer {
    fn heading(&mut self, text: &str) -> Result<()>;
    fn story_row(&mut self, index: usize, item: &Item) -> Result<()>;
    fn tip(&mut self) -> Result<()>;
    fn comment(&mut self, item: &Item, depth: usize) -> Result<()>;
    fn notice(&mut self, text: &str) -> Result<()>;
    fn page(&mut self, text: &str) -> Result<()>;
}

/// Writes colored lines to a terminal (or any writer).
pub struct TerminalOutput<W: Write> {
    out: W,
    color: bool,
    wrap_width: usize,
    now: i64,
    pager: Option<String>,
    use_pager: bool,
}

impl<W: Write> TerminalOutput<W> {
    pub fn new(out: W, color: bool, wrap_width: usize, now: i64) -> Self {
        Self {
            out,
            color,
            wrap_width,
            now,
            pager: None,
            use_pager: false,
        }
    }

    /// Send pages through `pager` (or `$PAGER`) instead of writing them inline.
    pub fn with_pager(mut self, pager: Option<String>) -> Self {
        self.pager = pager;
        self.use_pager = true;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: Color) -> String {
        match self.color {
            true => text.with(color).to_string(),
            false => text.to_string(),
        }
    }
}

impl<W: Write> Renderer for TerminalOutput<W> {
    fn heading(&mut self, text: &str) -> Result<()> {
        let line = self.paint(text, Color::Blue);
        writeln!(self.out, "\n{}\n", line)?;
        Ok(())
    }

    fn story_row(&mut self, index: usize, item: &Item) -> Result<()> {
        let title = item.title.as_deref().unwrap_or_default();
        let mut first = format!(
            "{}{}",
            self.paint(&format!("  {}. ", index), Color::Magenta),
            self.paint(&format!("{}. ", title), Color::Blue)
        );
        if let Some(domain) = item.url.as_deref().and_then(display_domain) {
            first.push_str(&self.paint(&format!("({})", domain), Color::Magenta));
        }

        let second = format!(
            "{}{}{}{}",
            self.paint(&format!("     {} points ", item.score), Color::Green),
            self.paint(&format!("by {} ", item.author()), Color::Yellow),
            self.paint(
                &format!("{} ", format_age(item.submission_time, self.now)),
                Color::Cyan
            ),
            self.paint(
                &format!("| {} comments", item.comment_count()),
                Color::Green
            ),
        );

        writeln!(self.out, "{}\n{}\n", first, second)?;
        Ok(())
    }

    fn tip(&mut self) -> Result<()> {
        let tip = self.paint(TIP, Color::Blue);
        writeln!(self.out, "{}\n", tip)?;
        Ok(())
    }

    fn comment(&mut self, item: &Item, depth: usize) -> Result<()> {
        let indent = COMMENT_INDENT.repeat(depth);
        let header = self.paint(
            &format!(
                "{}{} - {}",
                indent,
                item.author(),
                format_age(item.submission_time, self.now)
            ),
            Color::Yellow,
        );
        let body = render_body(
            item.text.as_deref().unwrap_or_default(),
            &indent,
            self.wrap_width,
        );
        writeln!(self.out, "\n{}\n{}", header, body)?;
        Ok(())
    }

    fn notice(&mut self, text: &str) -> Result<()> {
        let line = self.paint(text, Color::Blue);
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    fn page(&mut self, text: &str) -> Result<()> {
        match self.use_pager {
            true => {
                self.out.flush()?;
                crate::utils::pager::page(text, self.pager.as_deref())?;
            }
            false => writeln!(self.out, "{}", text)?,
        }
        Ok(())
    }
}
