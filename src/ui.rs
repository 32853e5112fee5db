pub mod charting;
pub mod layout;
pub mod screen;

use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Chart, Clear, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{app::App, time_series};

pub const SKIP_HINT: &str = "Ctrl-L to skip";
pub const CONTINUE_HINT: &str = "Press Enter to continue.";

/// Draw whichever screen belongs to the current phase
pub fn draw(app: &App, f: &mut Frame) {
    screen::current_screen(app.phase).render(app, f);
}

pub fn render_typing(app: &App, f: &mut Frame) {
    let regions = layout::typing_regions(f.area());
    let hint_style = Style::default()
        .add_modifier(Modifier::DIM)
        .add_modifier(Modifier::ITALIC);

    let prompt = Paragraph::new(app.views.prompt.line())
        .wrap(Wrap { trim: false })
        .block(Block::bordered().title("Prompt"));
    f.render_widget(prompt, regions.paragraph);

    let skip = Paragraph::new(Span::styled(SKIP_HINT, hint_style));
    f.render_widget(skip, regions.skip.inner(Margin::new(1, 1)));

    f.render_widget(Clear, regions.wpm);
    let wpm = Paragraph::new(app.views.wpm.as_str()).block(Block::bordered().title("WPM"));
    f.render_widget(wpm, regions.wpm);

    let text = app.views.input.text();
    let input = Paragraph::new(text.as_str())
        .wrap(Wrap { trim: false })
        .block(Block::bordered().title("Type Here"));
    f.render_widget(input, regions.input);

    if let Some((x, y)) = caret_position(regions.input, &app.views.input.before_cursor()) {
        f.set_cursor_position((x, y));
    }
}

/// Terminal cell of the input caret inside a bordered, wrapped input region
fn caret_position(region: Rect, before_cursor: &str) -> Option<(u16, u16)> {
    let inner = region.inner(Margin::new(1, 1));
    if inner.width == 0 || inner.height == 0 {
        return None;
    }

    let col = before_cursor.width() as u16;
    let row = (col / inner.width).min(inner.height - 1);
    Some((inner.x + col % inner.width, inner.y + row))
}

pub fn render_stats(app: &App, f: &mut Frame) {
    let regions = layout::stats_regions(f.area());
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let magenta_style = Style::default().fg(Color::Magenta);

    let block = Block::bordered().title("Stats");
    let inner = block.inner(regions.stats);
    f.render_widget(block, regions.stats);

    let points = time_series::from_samples(&app.round.samples, app.settings().sample_interval);
    let (overall_duration, highest_wpm) = charting::compute_chart_params(&points);
    let data: Vec<(f64, f64)> = points.iter().copied().map(Into::into).collect();

    let datasets = vec![Dataset::default()
        .marker(Marker::Braille)
        .style(magenta_style)
        .graph_type(GraphType::Line)
        .data(&data)];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([0.0, overall_duration])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(overall_duration), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest_wpm])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(highest_wpm), bold_style),
                ]),
        );
    f.render_widget(chart, layout::scaled(inner, 90));

    f.render_widget(Clear, regions.average_wpm);
    let average = Paragraph::new(Span::styled(
        (app.average_wpm() as i64).to_string(),
        bold_style,
    ))
    .block(Block::bordered().title("WPM"));
    f.render_widget(average, regions.average_wpm);

    f.render_widget(Clear, regions.hint);
    let hint = Paragraph::new(CONTINUE_HINT)
        .wrap(Wrap { trim: true })
        .block(Block::bordered());
    f.render_widget(hint, regions.hint);
}
