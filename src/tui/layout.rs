//! TUI layout and widget rendering.

use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Cell, Chart, Dataset, Gauge, Paragraph, Row, Table};

use super::runtime::{App, View};
use super::style;
use crate::forecast::Horizon;

/// Rows shown in the raw data preview.
const RAW_PREVIEW_ROWS: usize = 10;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // actual vs predicted
            Constraint::Length(3), // metrics + horizon slider
            Constraint::Min(10),   // forecast / neighborhoods
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_test_chart(frame, app, chunks[1]);
    render_controls(frame, app, chunks[2]);
    match app.view {
        View::Forecast => render_forecast(frame, app, chunks[3]),
        View::Neighborhoods => render_neighborhoods(frame, app, chunks[3]),
    }
    render_footer(frame, chunks[4]);
}

/// Days since `origin`, as a chart coordinate.
fn day_offset(origin: NaiveDate, date: NaiveDate) -> f64 {
    (date - origin).num_days() as f64
}

fn origin(app: &App) -> NaiveDate {
    app.run
        .observations
        .first()
        .map_or(NaiveDate::MIN, |o| o.date)
}

/// Header bar: dataset span, seed state, regeneration count.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let span = match (app.run.observations.first(), app.run.observations.last()) {
        (Some(first), Some(last)) => format!("{} → {}", first.date, last.date),
        _ => "no data".to_string(),
    };
    let header = Line::from(vec![
        Span::styled(
            " DEMAND FORECAST ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " {span} │ {} rows │ {} localities │ regen #{} ",
            app.run.observations.len(),
            app.run.encoder.categories().len(),
            app.generation,
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Held-out actual vs predicted demand chart.
fn render_test_chart(frame: &mut Frame, app: &App, area: Rect) {
    let origin = origin(app);
    let actual: Vec<(f64, f64)> = app
        .run
        .test_predictions
        .iter()
        .map(|p| (day_offset(origin, p.date), p.actual_demand))
        .collect();
    let predicted: Vec<(f64, f64)> = app
        .run
        .test_predictions
        .iter()
        .map(|p| (day_offset(origin, p.date), p.predicted_demand))
        .collect();

    let y_bounds = style::auto_bounds_y(&[&actual, &predicted]);
    let x_bounds = style::bounds_x(&actual);

    let datasets = vec![
        Dataset::default()
            .name("Actual")
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(style::ACTUAL_COLOR))
            .data(&actual),
        Dataset::default()
            .name("Predicted")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::PREDICTED_COLOR))
            .data(&predicted),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Actual vs Predicted Demand (test set) ")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("day")
                .bounds(x_bounds)
                .labels(vec![
                    format!("{}", x_bounds[0] as i64),
                    format!("{}", x_bounds[1] as i64),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("demand")
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.1}", y_bounds[0]),
                    format!("{:.1}", y_bounds[1]),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Metrics summary beside the horizon slider.
fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let eval = &app.run.evaluation;
    let metrics = Paragraph::new(Line::from(format!(
        " MAE={:.2}  RMSE={:.2}  train={} test={}",
        eval.mae, eval.rmse, eval.train_rows, eval.test_rows,
    )))
    .block(Block::default().title(" Model ").borders(Borders::ALL));
    frame.render_widget(metrics, chunks[0]);

    let days = app.horizon.days();
    let ratio = (days - Horizon::MIN_DAYS) as f64 / (Horizon::MAX_DAYS - Horizon::MIN_DAYS) as f64;
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Forecast horizon ")
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(style::SLIDER_COLOR))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{days} days"));
    frame.render_widget(gauge, chunks[1]);
}

/// Future demand chart plus either the forecast table or raw data.
fn render_forecast(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let origin = origin(app);
    let points: Vec<(f64, f64)> = app
        .forecast
        .iter()
        .map(|r| (day_offset(origin, r.date), r.predicted_demand))
        .collect();
    let y_bounds = style::auto_bounds_y(&[&points]);
    let x_bounds = style::bounds_x(&points);

    let first = app.forecast.first().map(|r| r.date.to_string()).unwrap_or_default();
    let last = app.forecast.last().map(|r| r.date.to_string()).unwrap_or_default();

    let chart = Chart::new(vec![
        Dataset::default()
            .name("Forecast")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::FORECAST_COLOR))
            .data(&points),
    ])
    .block(
        Block::default()
            .title(format!(" Future Demand ({}) ", app.run.encoder.reference()))
            .borders(Borders::ALL),
    )
    .x_axis(
        Axis::default()
            .title("date")
            .bounds(x_bounds)
            .labels(vec![first, last]),
    )
    .y_axis(
        Axis::default()
            .title("demand")
            .bounds(y_bounds)
            .labels(vec![
                format!("{:.1}", y_bounds[0]),
                format!("{:.1}", y_bounds[1]),
            ]),
    );
    frame.render_widget(chart, chunks[0]);

    if app.show_raw {
        render_raw(frame, app, chunks[1]);
    } else {
        let rows = app.forecast.iter().map(|r| {
            Row::new(vec![
                Cell::from(r.date.to_string()),
                Cell::from(r.day_of_year.to_string()),
                Cell::from(format!("{:.2}", r.predicted_demand)),
            ])
        });
        let table = Table::new(
            rows,
            [Constraint::Length(11), Constraint::Length(5), Constraint::Min(8)],
        )
        .header(bold_row(["Date", "Day", "Predicted"]))
        .block(Block::default().title(" Forecast ").borders(Borders::ALL));
        frame.render_widget(table, chunks[1]);
    }
}

/// First rows of the synthesized dataset.
fn render_raw(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app.run.observations.iter().take(RAW_PREVIEW_ROWS).map(|o| {
        Row::new(vec![
            Cell::from(o.date.to_string()),
            Cell::from(o.locality.clone()),
            Cell::from(format!("{:.2}", o.demand)),
        ])
    });
    let table = Table::new(
        rows,
        [Constraint::Length(11), Constraint::Min(10), Constraint::Length(8)],
    )
    .header(bold_row(["Date", "Locality", "Demand"]))
    .block(Block::default().title(" Raw Data ").borders(Borders::ALL));
    frame.render_widget(table, area);
}

/// Neighborhood projections with orders per capita.
fn render_neighborhoods(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app.neighborhoods.iter().map(|n| {
        Row::new(vec![
            Cell::from(n.neighborhood.clone()),
            Cell::from(format!("{:.0}", n.projected_population)),
            Cell::from(format!("{:.0}", n.predicted_order_volume)),
            Cell::from(format!("{:.4}", n.orders_per_capita())),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Min(14),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(10),
        ],
    )
    .header(bold_row(["Neighborhood", "Population", "Orders", "Per cap"]))
    .block(
        Block::default()
            .title(" Neighborhood Projections ")
            .borders(Borders::ALL),
    );
    frame.render_widget(table, area);
}

fn bold_row<const N: usize>(labels: [&'static str; N]) -> Row<'static> {
    Row::new(labels).style(Style::default().add_modifier(Modifier::BOLD))
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  +/-:Horizon  d:Raw data  n:Neighborhoods  r:Regenerate",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
