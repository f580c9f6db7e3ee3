use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::Theme;
use crate::config::{ColorConfig, Palette};
use crate::domain::Platform;
use crate::tui::app::{ActivePane, InputField, ReleaseView, TuiApp};
use crate::tui::viewport::last_item_visible;

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig, commit_template: &str) {
    let palette = *colors.palette(app.theme.theme());

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Filter bar
            Constraint::Min(6),    // Releases + details
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0], &palette);
    render_filter_bar(frame, app, chunks[1], &palette);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    render_releases_pane(frame, app, body[0], &palette);
    render_details_pane(frame, app, body[1], &palette, commit_template);
    render_status_bar(frame, app, chunks[3], &palette);
}

fn render_header(frame: &mut Frame, app: &TuiApp, area: Rect, palette: &Palette) {
    let theme_icon = match app.theme.theme() {
        Theme::Dark => "☾ dark",
        Theme::Light => "☀ light",
    };

    let line = Line::from(vec![
        Span::styled(
            " Xenia Canary Mirror ",
            Style::default()
                .fg(palette.active_border)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "· nothing is hosted here, every link points at official sources ",
            Style::default().fg(palette.muted),
        ),
        Span::styled(format!("[{}]", theme_icon), Style::default().fg(palette.muted)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_filter_bar(frame: &mut Frame, app: &TuiApp, area: Rect, palette: &Palette) {
    let border_style = if app.input.is_some() {
        Style::default().fg(palette.active_border)
    } else {
        Style::default().fg(palette.inactive_border)
    };

    let mut spans = Vec::new();
    for (label, field, placeholder) in [
        ("Search", InputField::Search, "tag or title"),
        ("From", InputField::FromDate, "YYYY-MM-DD"),
        ("To", InputField::ToDate, "YYYY-MM-DD"),
    ] {
        let value = app.input_value(field);
        let focused = app.input == Some(field);

        let value_style = if app.is_bound_invalid(field) {
            Style::default().fg(palette.error)
        } else if value.is_empty() {
            Style::default().fg(palette.muted)
        } else {
            Style::default().fg(palette.text)
        };
        let value_style = if focused {
            value_style.add_modifier(Modifier::UNDERLINED)
        } else {
            value_style
        };

        let shown = if value.is_empty() && !focused {
            placeholder.to_string()
        } else if focused {
            format!("{}▏", value)
        } else {
            value.to_string()
        };

        spans.push(Span::styled(
            format!("{}: ", label),
            Style::default().fg(palette.muted),
        ));
        spans.push(Span::styled(shown, value_style));
        spans.push(Span::raw("   "));
    }
    spans.push(Span::styled(
        format!("Sort: {}", app.criteria.sort.label()),
        Style::default().fg(palette.date),
    ));

    let block = Block::default()
        .title(" Search & Filter ")
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_releases_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, palette: &Palette) {
    let is_active = app.active_pane == ActivePane::Releases && app.input.is_none();
    let border_style = if is_active {
        Style::default().fg(palette.active_border)
    } else {
        Style::default().fg(palette.inactive_border)
    };

    let title = format!(
        " Latest Builds ({}/{}) ",
        app.displayed().len(),
        app.pager.total()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let message = match app.view() {
        ReleaseView::Loading => Some(Text::styled(
            "Loading releases...",
            Style::default().fg(palette.muted),
        )),
        ReleaseView::Error(msg) => Some(Text::styled(
            format!("Error: {}", msg),
            Style::default().fg(palette.error),
        )),
        ReleaseView::NoResults => Some(Text::styled(
            "No results found.",
            Style::default().fg(palette.muted),
        )),
        ReleaseView::Results => None,
    };

    if let Some(message) = message {
        app.tail_visible = false;
        let paragraph = Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let items: Vec<ListItem> = app
        .displayed()
        .iter()
        .map(|release| {
            let platforms: Vec<&str> = [Platform::Windows, Platform::Linux]
                .into_iter()
                .filter(|p| release.asset_for(*p).is_some())
                .map(Platform::label)
                .collect();

            let title = Line::from(Span::styled(
                release.display_title().to_string(),
                Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
            ));
            let meta = Line::from(vec![
                Span::raw("  "),
                Span::styled(release.tag_name.clone(), Style::default().fg(palette.tag)),
                Span::styled(
                    format!("  {}", release.formatted_date()),
                    Style::default().fg(palette.date),
                ),
                Span::styled(
                    format!("  {}", platforms.join(" / ")),
                    Style::default().fg(palette.muted),
                ),
            ]);

            ListItem::new(vec![title, meta])
        })
        .collect();
    let heights: Vec<usize> = items.iter().map(ListItem::height).collect();

    let highlight_style = if is_active {
        Style::default()
            .bg(palette.selection_bg)
            .fg(palette.selection_fg)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };

    let list = List::new(items)
        .highlight_style(highlight_style)
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, parts[0], &mut app.release_list_state);

    app.tail_visible = last_item_visible(
        &heights,
        app.release_list_state.offset(),
        parts[0].height as usize,
    );

    let footer = if app.pager.is_loading() {
        Span::styled("Loading more...", Style::default().fg(palette.date))
    } else if app.pager.is_exhausted() {
        Span::styled("No more results", Style::default().fg(palette.muted))
    } else {
        Span::styled(
            format!("Scroll for more ({} remaining)", app.pager.total() - app.displayed().len()),
            Style::default().fg(palette.muted),
        )
    };
    frame.render_widget(
        Paragraph::new(Line::from(footer)).alignment(Alignment::Center),
        parts[1],
    );
}

fn render_details_pane(
    frame: &mut Frame,
    app: &TuiApp,
    area: Rect,
    palette: &Palette,
    commit_template: &str,
) {
    let is_active = app.active_pane == ActivePane::Details && app.input.is_none();
    let border_style = if is_active {
        Style::default().fg(palette.active_border)
    } else {
        Style::default().fg(palette.inactive_border)
    };

    let release = match app.view() {
        ReleaseView::Results => app.selected_release(),
        _ => None,
    };

    let (title, content) = if let Some(release) = release {
        let mut lines = vec![
            Line::from(Span::styled(
                release.display_title().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Tag: ", Style::default().fg(palette.muted)),
                Span::styled(release.tag_name.clone(), Style::default().fg(palette.tag)),
            ]),
            Line::from(Span::styled(
                format!("Released on {}", release.formatted_date()),
                Style::default().fg(palette.date),
            )),
            Line::from(Span::styled(
                format!("Release: {}", release.url),
                Style::default().fg(palette.link),
            )),
            Line::from(Span::styled(
                format!("Commit:  {}", release.commit_url(commit_template)),
                Style::default().fg(palette.link),
            )),
            Line::from(""),
        ];

        if release.assets.is_empty() {
            lines.push(Line::from(Span::styled(
                "No downloads",
                Style::default().fg(palette.muted),
            )));
        }
        for asset in &release.assets {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<8}", asset.platform().label()),
                    Style::default().fg(palette.tag).add_modifier(Modifier::BOLD),
                ),
                Span::styled(asset.url.clone(), Style::default().fg(palette.link)),
            ]));
        }

        if let Some(changes) = release.changes() {
            lines.push(Line::from(""));
            lines.push(Line::from(
                "─".repeat(area.width.saturating_sub(2) as usize),
            ));
            lines.push(Line::from(""));
            for line in changes.lines() {
                lines.push(Line::from(Span::styled(
                    line.to_string(),
                    Style::default().fg(palette.muted),
                )));
            }
        }

        (format!(" {} ", release.tag_name), Text::from(lines))
    } else {
        (" Details ".to_string(), Text::from("No release selected"))
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, palette: &Palette) {
    let status = if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if app.input.is_some() {
        "Type to filter  Backspace:Delete  Enter/Esc:Done".to_string()
    } else {
        "j/k:Navigate  /:Search  f/t:Dates  x:Clear  s:Sort  o:Open  c:Commit  w/l:Download  T:Theme  q:Quit"
            .to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(palette.status_fg).bg(palette.status_bg));

    frame.render_widget(paragraph, area);
}
