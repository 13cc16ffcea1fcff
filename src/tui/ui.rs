use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap};

use crate::filters::Mode;
use crate::output::{format_price, format_rank, format_spec, format_value, format_warranty, truncate_title};
use crate::scoring::{build_breakdown, spec_badge, value_badge, BreakdownRow};
use crate::tui::app::{App, InputMode, Screen};
use crate::tui::theme::ThemeColors;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 6 || area.width < 30 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Filters(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(1), // Filter bar
        Constraint::Fill(1),   // Screen body
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_filters(frame, chunks[1], app);
    match app.screen {
        Screen::Mode => render_mode_list(frame, chunks[2], app),
        Screen::Brand => render_brand_list(frame, chunks[2], app),
        Screen::Results => render_table(frame, chunks[2], app),
    }
    render_status_bar(frame, chunks[3], app);

    match app.input_mode {
        InputMode::Breakdown => render_breakdown_popup(frame, app),
        InputMode::Help => render_help_popup(frame, &app.theme),
        InputMode::Normal => {}
    }

    // Loading overlay appears on top of everything
    if app.is_loading {
        render_loading_overlay(frame, app);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let step = match app.screen {
        Screen::Mode => "1/3 Choose a mode",
        Screen::Brand => "2/3 Choose a brand",
        Screen::Results => "3/3 Results",
    };
    let left = "SmartBuy";
    let padding_len = (area.width as usize).saturating_sub(left.len() + step.chars().count());
    let title = Line::from(vec![
        Span::styled(left, Style::default().fg(app.theme.title_color).bold()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(step, Style::default().fg(app.theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_filters(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let label = |s: &'static str| Span::styled(s, Style::default().fg(theme.filter_label));
    let mut spans = vec![
        label("Mode "),
        Span::styled(app.mode.title(), theme.filter_value),
        label("  Brand "),
        Span::styled(app.brand_label().to_string(), theme.filter_value),
        label("  Max price "),
        Span::styled(app.price_label(), theme.filter_value),
    ];
    if let Some(min_ram) = app.min_ram {
        spans.push(label("  Min RAM "));
        spans.push(Span::styled(
            format!("{}GB", crate::catalog::types::fmt_num(min_ram)),
            theme.filter_value,
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_mode_list(frame: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let items: Vec<ListItem> = Mode::ALL
        .iter()
        .map(|mode| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<10}", mode.title()), theme.title_style),
                Span::styled(mode.tagline(), Style::default().fg(theme.muted)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::bordered().title(" Tailor recommendations "))
        .highlight_style(theme.row_selected)
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.mode_state);
}

fn render_brand_list(frame: &mut Frame, area: Rect, app: &mut App) {
    let items: Vec<ListItem> = app
        .brands
        .iter()
        .map(|b| ListItem::new(b.clone()))
        .collect();

    let list = List::new(items)
        .block(Block::bordered().title(format!(" {} • pick a brand ", app.mode.title())))
        .highlight_style(app.theme.row_selected)
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.brand_state);
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    if app.results.is_empty() {
        let text = if !app.has_searched {
            "Press / to search"
        } else {
            "No phones match these filters"
        };
        let empty_msg = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.muted));
        frame.render_widget(empty_msg, area);
        return;
    }

    let rows: Vec<Row> = app
        .results
        .iter()
        .enumerate()
        .map(|(idx, ranked)| {
            let phone = &ranked.item;
            let raw = phone.raw_score_value();
            let value = phone.smartbuy_value();

            let mut spec_spans = vec![Span::styled(
                format!("{:>4} ", format_spec(raw)),
                Style::default().fg(theme.badge_color(spec_badge(raw))),
            )];
            spec_spans.extend(score_bar(raw.unwrap_or(0.0), 10.0, 6, theme).spans);

            let mut name = vec![Span::raw(truncate_title(&phone.display_name(), 48))];
            if idx == 0 {
                name.push(Span::styled("  Top pick", Style::default().fg(theme.top_pick).bold()));
            }

            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(format_rank(ranked)).style(Style::default().fg(theme.index_color)),
                Cell::from(Line::from(name)),
                Cell::from(format_price(phone.price())),
                Cell::from(Line::from(spec_spans)),
                Cell::from(format_value(value))
                    .style(Style::default().fg(theme.badge_color(value_badge(value)))),
                Cell::from(format_warranty(phone).unwrap_or_default()),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(9),  // "#12 / 40"
        Constraint::Fill(1),    // Model + top pick
        Constraint::Length(11), // "S$1299.00"
        Constraint::Length(12), // "8.2 ████░░"
        Constraint::Length(9),  // SmartBuy pts
        Constraint::Length(4),  // Warranty
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Rank", "Model", "Price", "Spec", "SmartBuy", "Wty"])
                .style(theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(theme.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some(ref flash) = app.flash_message {
        let color = if flash.is_error {
            theme.flash_error
        } else {
            theme.flash_success
        };
        Line::from(Span::styled(flash.text.clone(), Style::default().fg(color)))
    } else {
        let hints: Vec<(&str, &str)> = match app.screen {
            Screen::Mode => vec![("j/k", ":nav "), ("Enter", ":choose "), ("q", ":quit")],
            Screen::Brand => vec![
                ("j/k", ":nav "),
                ("Enter", ":search "),
                ("Esc", ":back "),
                ("q", ":quit"),
            ],
            Screen::Results => vec![
                ("j/k", ":nav "),
                ("Enter", ":open "),
                ("i", ":specs "),
                ("m", ":mode "),
                ("b", ":brand "),
                ("p/P", ":price "),
                ("/", ":search "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
        };

        let mut spans = Vec::new();
        if app.screen == Screen::Results {
            spans.push(Span::styled(
                format!("{} phones  ", app.results.len()),
                Style::default().fg(theme.muted),
            ));
        }
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

fn score_bar(score: f64, max_score: f64, width: usize, theme: &ThemeColors) -> Line<'static> {
    let ratio = if max_score > 0.0 {
        (score / max_score).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let bar_color = theme.badge_color(spec_badge(Some(score)));

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled("█".repeat(filled), Style::default().fg(bar_color)));
    }
    if empty > 0 {
        spans.push(Span::styled("░".repeat(empty), Style::default().fg(theme.bar_empty)));
    }

    Line::from(spans)
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn breakdown_lines(row: &BreakdownRow, theme: &ThemeColors) -> Vec<Line<'static>> {
    let tier_style = Style::default().fg(theme.tier_color(row.tier));
    let mut head = vec![
        Span::styled(format!("{:<12}", row.label), theme.title_style),
        Span::styled(format!("{:>4.1} ", row.value), tier_style),
    ];
    head.extend(score_bar(row.value, 10.0, 10, theme).spans);
    head.push(Span::styled(format!("  {}", row.tier.label()), tier_style));

    let mut lines = vec![Line::from(head)];
    if !row.meta.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", row.meta),
            Style::default().fg(theme.muted),
        )));
    }
    lines.push(Line::from(format!("  {}", row.message)));
    lines.push(Line::from(Span::styled(
        format!("  Target: {}", row.target),
        Style::default().fg(theme.muted),
    )));
    lines
}

/// Render the spec breakdown popup for the selected phone
fn render_breakdown_popup(frame: &mut Frame, app: &App) {
    let Some(ranked) = app.selected_item() else {
        return;
    };
    let theme = &app.theme;
    let phone = &ranked.item;
    let breakdown = build_breakdown(phone, &app.categories, app.mode);

    let popup_area = centered_rect_fixed(72, frame.area().height.saturating_sub(2), frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(format!(" {} ", phone.display_name()), theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "Spec Rank #{} • SmartBuy Rank #{}",
                ranked.rank_raw, ranked.rank_value
            ),
            Style::default().fg(theme.muted),
        )),
        Line::from(""),
    ];

    if breakdown.is_empty() {
        lines.push(Line::from("No breakdown available."));
    }
    for (title, rows) in [("Core", &breakdown.core), ("Build", &breakdown.build)] {
        if rows.is_empty() {
            continue;
        }
        lines.push(Line::from(Span::styled(title, theme.header_style.underlined())));
        for row in rows {
            lines.extend(breakdown_lines(row, theme));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "j/k: next phone | Esc/i: close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(50, 17, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered().title(" Keyboard Shortcuts ");
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(theme.status_key_color).bold();
    let entries = [
        ("j / Down      ", "Move down"),
        ("k / Up        ", "Move up"),
        ("Enter / o     ", "Open price link in browser"),
        ("i             ", "Spec breakdown"),
        ("m             ", "Next mode"),
        ("b             ", "Next brand"),
        ("p / P         ", "Raise / lower max price"),
        ("/ / r         ", "Search again"),
        ("Esc           ", "Back one step"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];
    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}

/// Render the loading spinner overlay
fn render_loading_overlay(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(34, 3, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered();
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    // Braille spinner animation
    let spinner_chars = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let spinner = spinner_chars[app.spinner_frame % spinner_chars.len()];

    let loading_text = Paragraph::new(format!("{} Finding {} phones...", spinner, app.mode.as_str()))
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.title_color));

    frame.render_widget(loading_text, inner);
}
