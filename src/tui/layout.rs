//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Gauge, List, ListItem, ListState, Paragraph, Row, Table,
};

use super::runtime::{App, Focus};
use super::style;
use crate::catalog::{BatteryType, StationType, graph_filename};
use crate::session::Phase;

const FOOTER_HINTS: &str = concat!(
    " q:Quit  Tab:Switch list  ↑/↓:Move  Enter:Select  r:Run",
    "  f:Preview/Full  PgUp/PgDn:Scroll",
);

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(8), // selectors + artifact status
            Constraint::Length(3), // progress
            Constraint::Length(3), // headline metrics
            Constraint::Length(7), // remaining KPIs + graphs
            Constraint::Min(5),    // data table
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_selectors(frame, app, chunks[1]);
    render_progress(frame, app, chunks[2]);
    render_metrics(frame, app, chunks[3]);
    render_details(frame, app, chunks[4]);
    render_table(frame, app, chunks[5]);
    render_footer(frame, app, chunks[6]);
}

/// Header bar: title and run state.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let state = if app.is_playing() {
        "RUNNING".to_string()
    } else {
        match app.session().phase() {
            Phase::AwaitingSelection => "SELECT A CONFIGURATION".to_string(),
            Phase::Ready(cfg) => format!("READY: {cfg}"),
            Phase::Complete(cfg) => format!("RESULTS: {cfg}"),
        }
    };
    let header = Line::from(vec![
        Span::styled(
            " Battery Analytics Dashboard ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" │ {state}")),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn selector_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(style::FOCUS_BORDER)
    } else {
        Style::default()
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border)
}

/// Marks the list entry that is applied to the session.
fn list_item(label: &str, chosen: bool) -> ListItem<'static> {
    let mark = if chosen { "* " } else { "  " };
    ListItem::new(format!("{mark}{label}"))
}

/// Station and battery lists, plus artifact status of the selection.
fn render_selectors(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(20),
            Constraint::Percentage(35),
        ])
        .split(area);
    let highlight = Style::default()
        .bg(style::HIGHLIGHT_BG)
        .add_modifier(Modifier::BOLD);

    let stations: Vec<ListItem> = StationType::ALL
        .iter()
        .map(|&s| list_item(s.label(), app.session().station() == Some(s)))
        .collect();
    let list = List::new(stations)
        .block(selector_block(" Station ", app.focus == Focus::Station))
        .highlight_style(highlight);
    let mut state = ListState::default().with_selected(Some(app.station_cursor));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let batteries: Vec<ListItem> = BatteryType::ALL
        .iter()
        .map(|&b| list_item(b.label(), app.session().battery() == Some(b)))
        .collect();
    let list = List::new(batteries)
        .block(selector_block(" Battery ", app.focus == Focus::Battery))
        .highlight_style(highlight);
    let mut state = ListState::default().with_selected(Some(app.battery_cursor));
    frame.render_stateful_widget(list, chunks[1], &mut state);

    let lines: Vec<Line> = match app.artifact_status() {
        Some(status) => {
            [
                ("Simulation logs", status.log_csv),
                ("First hour graph", status.first_hour_graph),
                ("Customer graph", status.customers_graph),
            ]
            .into_iter()
            .map(|(name, present)| {
                let (word, color) = style::artifact_status(present);
                Line::from(vec![
                    Span::raw(format!("  {name:<18}")),
                    Span::styled(word, Style::default().fg(color)),
                ])
            })
            .collect()
        }
        None => vec![Line::from("  Choose a station and a battery type")],
    };
    let block = Block::default().title(" Artifacts ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), chunks[2]);
}

/// Progress gauge while the simulation animation plays.
fn render_progress(frame: &mut Frame, app: &App, area: Rect) {
    let (ratio, label) = match app.progress() {
        Some((fraction, message)) => (fraction, message.to_string()),
        None if app.results().is_some() => (1.0, "Simulation complete!".to_string()),
        None => (0.0, "Press r to run the simulation".to_string()),
    };
    let gauge = Gauge::default()
        .block(Block::default().title(" Simulation ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(style::PROGRESS_COLOR))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, area);
}

/// Total customers, first-hour served and simulation duration.
fn render_metrics(frame: &mut Frame, app: &App, area: Rect) {
    let kpi = app.results().and_then(|r| r.kpi.as_ref());
    let values = match kpi {
        Some(k) => [
            k.total_customers.to_string(),
            k.first_hour_customers.to_string(),
            format!("{:.1} hrs", k.simulation_duration),
        ],
        None => ["--".to_string(), "--".to_string(), "--".to_string()],
    };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);
    let titles = [" Total Customers ", " First Hour Served ", " Simulation Duration "];
    for ((title, value), chunk) in titles
        .into_iter()
        .zip(values)
        .zip(chunks.iter())
    {
        let text = Span::styled(
            value,
            Style::default()
                .fg(style::METRIC_FG)
                .add_modifier(Modifier::BOLD),
        );
        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(Paragraph::new(Line::from(text)).block(block), *chunk);
    }
}

/// The other five KPIs beside the graph locations.
fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let kpi_lines = match app.results().and_then(|r| r.kpi.as_ref()) {
        Some(k) => vec![
            Line::from(format!("  Average Battery Count:  {:.1}", k.avg_battery_count)),
            Line::from(format!("  Battery Utilization:    {:.1}%", k.battery_utilization)),
            Line::from(format!("  Peak Hour Customers:    {}", k.peak_hour_customers)),
            Line::from(format!("  Avg Service Interval:   {:.1} min", k.avg_service_interval)),
            Line::from(format!("  Success Rate:           {:.1}%", k.success_rate)),
        ],
        None => vec![Line::from("  Run the simulation to see KPIs")],
    };
    let block = Block::default().title(" KPI Report ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(kpi_lines).block(block), chunks[0]);

    let graph_lines: Vec<Line> = match app.results() {
        Some(r) => {
            let filename = graph_filename(r.config);
            [
                ("Total Customers Served", r.status.customers_graph),
                ("First Hour Analysis", r.status.first_hour_graph),
            ]
            .into_iter()
            .flat_map(|(title, present)| {
                let (word, color) = style::artifact_status(present);
                [
                    Line::from(vec![
                        Span::raw(format!("  {title}: ")),
                        Span::styled(word, Style::default().fg(color)),
                    ]),
                    Line::from(format!("    {filename}")),
                ]
            })
            .collect()
        }
        None => Vec::new(),
    };
    let block = Block::default().title(" Graphs ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(graph_lines).block(block), chunks[1]);
}

/// Log rows in preview or full mode, from the scroll offset down.
fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let preview_rows = app.dashboard().preview_rows();
    let title = format!(" Simulation Data: {} ", app.mode.label(preview_rows));
    let block = Block::default().title(title).borders(Borders::ALL);

    if let Some(e) = app.missing_folders() {
        let lines: Vec<Line> = e
            .report()
            .lines()
            .map(|l| Line::from(format!("  {l}")))
            .collect();
        let text = Paragraph::new(lines).style(Style::default().fg(style::MISSING));
        frame.render_widget(text.block(block), area);
        return;
    }

    let Some(results) = app.results() else {
        frame.render_widget(block, area);
        return;
    };
    let records = match &results.records {
        Ok(records) => records,
        Err(e) => {
            let text = Span::styled(
                format!("  Error loading CSV: {e}"),
                Style::default().fg(style::MISSING),
            );
            frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);
            return;
        }
    };

    let rows = app
        .mode
        .visible_rows(records, preview_rows)
        .iter()
        .skip(app.table_offset)
        .map(|row| Row::new(row.iter().map(|c| Cell::from(c.as_str()))));
    let header = Row::new(records.headers().iter().map(|h| Cell::from(h.as_str())))
        .style(Style::default().add_modifier(Modifier::BOLD));
    let widths = vec![Constraint::Fill(1); records.headers().len().max(1)];
    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

/// Footer with keybinding hints, or the current notice.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.notice {
        Some(notice) => Span::styled(
            format!(" {notice}"),
            Style::default().fg(style::NOTICE_FG),
        ),
        None => Span::styled(FOOTER_HINTS, Style::default().fg(style::FOOTER_FG)),
    };
    frame.render_widget(Paragraph::new(Line::from(line)), area);
}
