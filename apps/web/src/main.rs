mod api;
mod selection;
mod shapes;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Scrollbar,
        ScrollbarOrientation, ScrollbarState, Table, Wrap,
    },
    Terminal,
};
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen_futures::spawn_local;

use api::{fetch_json, BarSpec, DashboardViews, FilterOptions, TableSpec};
use selection::Selection;
use shapes::{exterior_rings, parse_hex, RegionShape, NO_DATA_COLOR};

const ACCENT: Color = Color::Rgb(189, 0, 38);
const TABLE_ROWS: usize = 16;

/// Views for the current filter, with map outlines decoded once on arrival.
struct LoadedViews {
    filter: String,
    map_title: String,
    domain: Option<[f64; 2]>,
    shapes: Vec<RegionShape>,
    bar: BarSpec,
    table: TableSpec,
}

impl From<DashboardViews> for LoadedViews {
    fn from(views: DashboardViews) -> Self {
        let shapes = views
            .map
            .regions
            .into_iter()
            .map(|region| RegionShape {
                rings: region.geometry.as_ref().map(exterior_rings).unwrap_or_default(),
                color: parse_hex(region.fill.as_deref()),
            })
            .collect();

        Self {
            filter: views.filter,
            map_title: views.map.title,
            domain: views.map.domain,
            shapes,
            bar: views.bar,
            table: views.table,
        }
    }
}

#[derive(Default)]
struct Dashboard {
    selection: Selection,
    views: Option<LoadedViews>,
    row_offset: usize,
}

enum Fetch {
    Views(String),
    Search(String),
}

fn main() -> io::Result<()> {
    let dashboard = Rc::new(RefCell::new(Dashboard::default()));

    spawn_local(load_options(dashboard.clone()));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let dashboard = dashboard.clone();
        move |event| {
            let fetch = {
                let mut state = dashboard.borrow_mut();
                handle_key(&mut state, event.code)
            };

            match fetch {
                Some(Fetch::Views(filter)) => spawn_local(load_views(dashboard.clone(), filter)),
                Some(Fetch::Search(query)) => spawn_local(load_matches(dashboard.clone(), query)),
                None => {}
            }
        }
    });

    terminal.draw_web(move |f| {
        let area = f.area();
        let block = Block::default()
            .title("Commercial Spyware Deployments")
            .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(area).inner(Margin::new(1, 1));
        f.render_widget(block, area);

        let state = dashboard.borrow();
        render_dashboard(&state, f, inner);
    });

    Ok(())
}

fn handle_key(state: &mut Dashboard, code: ratzilla::event::KeyCode) -> Option<Fetch> {
    use ratzilla::event::KeyCode;

    let before = state.selection.current().to_string();
    match code {
        KeyCode::Left => state.selection.prev(),
        KeyCode::Right => state.selection.next(),
        KeyCode::Esc => state.selection.reset(),
        KeyCode::Enter => {
            state.selection.accept_best_match();
        }
        KeyCode::Up => {
            state.row_offset = state.row_offset.saturating_sub(1);
            return None;
        }
        KeyCode::Down => {
            let rows = state.views.as_ref().map_or(0, |views| views.table.rows.len());
            state.row_offset = (state.row_offset + 1).min(rows.saturating_sub(1));
            return None;
        }
        KeyCode::Backspace => {
            state.selection.pop_char();
            return search_fetch(state);
        }
        KeyCode::Char(c) => {
            state.selection.push_char(c);
            return search_fetch(state);
        }
        _ => return None,
    }

    let after = state.selection.current();
    (after != before).then(|| Fetch::Views(after.to_string()))
}

fn search_fetch(state: &Dashboard) -> Option<Fetch> {
    let query = state.selection.query();
    (!query.is_empty()).then(|| Fetch::Search(query.to_string()))
}

async fn load_options(dashboard: Rc<RefCell<Dashboard>>) {
    let Some(options) = fetch_json::<FilterOptions>(api::OPTIONS_URL).await else {
        return;
    };

    let initial = {
        let mut state = dashboard.borrow_mut();
        state.selection = Selection::with_options(options.options);
        state.selection.current().to_string()
    };

    load_views(dashboard, initial).await;
}

async fn load_views(dashboard: Rc<RefCell<Dashboard>>, filter: String) {
    let Some(views) = fetch_json::<DashboardViews>(&api::views_url(&filter)).await else {
        return;
    };

    let mut state = dashboard.borrow_mut();
    // A newer selection may have been made while this request was in flight.
    if state.selection.current() == views.filter {
        state.views = Some(LoadedViews::from(views));
        state.row_offset = 0;
    }
}

async fn load_matches(dashboard: Rc<RefCell<Dashboard>>, query: String) {
    let Some(results) = fetch_json::<FilterOptions>(&api::search_url(&query)).await else {
        return;
    };

    dashboard
        .borrow_mut()
        .selection
        .set_matches(&query, results.options);
}

fn render_dashboard(state: &Dashboard, f: &mut ratzilla::ratatui::Frame<'_>, area: Rect) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Percentage(52),
            Constraint::Min(8),
        ])
        .split(area);

    render_filter_bar(state, f, main_layout[0]);

    let Some(views) = state.views.as_ref() else {
        let paragraph = Paragraph::new(Text::from(TextLine::from("Loading dashboard...")))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, main_layout[1]);
        return;
    };

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_layout[1]);

    render_map_panel(views, f, content[0]);
    render_bar_panel(&views.bar, f, content[1]);
    render_table_panel(views, state.row_offset, f, main_layout[2]);
}

fn render_filter_bar(state: &Dashboard, f: &mut ratzilla::ratatui::Frame<'_>, area: Rect) {
    let selection = &state.selection;

    let country = TextLine::from(vec![
        Span::styled("Country ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("< {} >", selection.current()),
            Style::default()
                .fg(Color::White)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  {} options", selection.option_count())),
    ]);

    let search = if selection.query().is_empty() {
        TextLine::from(Span::styled(
            "Type to search  Enter select  Left/Right cycle  Esc all  Up/Down scroll",
            Style::default().fg(Color::Gray),
        ))
    } else {
        let preview = selection
            .matches()
            .iter()
            .take(6)
            .cloned()
            .collect::<Vec<_>>()
            .join(" | ");
        TextLine::from(vec![
            Span::styled("Search ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}_", selection.query()),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("  "),
            Span::styled(preview, Style::default().fg(Color::White)),
        ])
    };

    let block = Block::default()
        .title("Filter")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let paragraph = Paragraph::new(Text::from(vec![country, search]))
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn render_map_panel(views: &LoadedViews, f: &mut ratzilla::ratatui::Frame<'_>, area: Rect) {
    let legend = views.domain.map_or_else(
        || "no data".to_string(),
        |[min, max]| format!("{min:.2} .. {max:.2}"),
    );

    let block = Block::default()
        .title(format!("{} [{legend}]", views.map_title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let canvas = Canvas::default()
        .block(block)
        .x_bounds([-180.0, 180.0])
        .y_bounds([-90.0, 90.0])
        .paint(|ctx| {
            // Countries without data first so coloured outlines stay on top.
            let ordered = views
                .shapes
                .iter()
                .filter(|shape| shape.color == NO_DATA_COLOR)
                .chain(views.shapes.iter().filter(|shape| shape.color != NO_DATA_COLOR));

            for shape in ordered {
                for ring in &shape.rings {
                    for segment in ring.windows(2) {
                        ctx.draw(&CanvasLine {
                            x1: segment[0].0,
                            y1: segment[0].1,
                            x2: segment[1].0,
                            y2: segment[1].1,
                            color: shape.color,
                        });
                    }
                }
            }
        });

    f.render_widget(canvas, area);
}

fn render_bar_panel(bar: &BarSpec, f: &mut ratzilla::ratatui::Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(bar.title.clone())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    if bar.bars.is_empty() {
        let paragraph = Paragraph::new("No deployments for this selection")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let bars: Vec<Bar<'_>> = bar
        .bars
        .iter()
        .map(|entry| {
            Bar::default()
                .value(entry.count)
                .label(TextLine::from(entry.category.clone()))
                .style(Style::default().fg(ACCENT))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();

    let max_value = bar.bars.iter().map(|entry| entry.count).max().unwrap_or(0).max(1);

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .max(max_value)
        .bar_gap(0)
        .bar_width(1);

    f.render_widget(chart, area);
}

fn render_table_panel(
    views: &LoadedViews,
    row_offset: usize,
    f: &mut ratzilla::ratatui::Frame<'_>,
    area: Rect,
) {
    let table_spec = &views.table;
    let block = Block::default()
        .title(format!(
            "Deployments ({}) - {} rows",
            views.filter,
            table_spec.rows.len()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    if table_spec.rows.is_empty() {
        let paragraph = Paragraph::new("No deployments for this selection")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let header = Row::new(table_spec.columns.iter().map(|column| Cell::from(column.clone())))
        .style(
            Style::default()
                .fg(ACCENT)
                .bg(Color::Rgb(200, 200, 200))
                .add_modifier(Modifier::BOLD),
        );

    let rows = table_spec
        .rows
        .iter()
        .skip(row_offset)
        .take(TABLE_ROWS)
        .map(|row| {
            Row::new(row.iter().map(|value| Cell::from(value.clone())))
                .style(Style::default().fg(Color::White))
        });

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(16),
            Constraint::Length(11),
            Constraint::Length(6),
            Constraint::Length(18),
            Constraint::Length(12),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .column_spacing(1);

    f.render_widget(table, inner);

    let mut scrollbar_state = ScrollbarState::new(table_spec.rows.len())
        .position(row_offset)
        .viewport_content_length(TABLE_ROWS.min(inner.height.saturating_sub(1) as usize));
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .thumb_style(Style::default().fg(ACCENT));
    let scroll_area = Rect {
        x: inner.x,
        y: inner.y.saturating_add(1),
        width: inner.width,
        height: inner.height.saturating_sub(1),
    };
    f.render_stateful_widget(scrollbar, scroll_area, &mut scrollbar_state);
}
