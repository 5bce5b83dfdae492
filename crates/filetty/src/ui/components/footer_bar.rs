use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ui::Component;

/// Footer row listing the active key bindings.
pub struct FooterBar;

impl Component for FooterBar {
    fn render(&self, f: &mut Frame, area: Rect) {
        let version = env!("CARGO_PKG_VERSION");
        let left_text = Span::styled(
            format!(" Filetty v{version}"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let hints = " tab: pane │ enter: open/select │ space: expand │ d: download │ r: refresh │ q: quit ";
        let right_text = Span::styled(hints, Style::default().fg(Color::Gray));
        let left_width = left_text.width();
        let right_width = right_text.width();
        let padding = (area.width as usize).saturating_sub(left_width + right_width);

        let footer = Paragraph::new(Line::from(vec![
            left_text,
            Span::raw(" ".repeat(padding)),
            right_text,
        ]))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
        f.render_widget(footer, area);
    }
}
