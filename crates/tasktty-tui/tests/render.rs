//! Screen layout checks against ratatui's in-memory backend.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::style::{Color, Modifier};
use ratatui::Terminal;
use tasktty_core::Due;
use tasktty_service::{BlockingService, MemoryBackend, TaskStore};
use tasktty_tui::app::App;

const WIDTH: u16 = 80;
const HEIGHT: u16 = 12;

fn make_app(backend: MemoryBackend) -> App<MemoryBackend> {
    let mut store = TaskStore::new(BlockingService::new(backend).unwrap());
    store.sync().unwrap();
    App::new(store)
}

fn seeded() -> MemoryBackend {
    let backend = MemoryBackend::new();
    let inbox = backend.insert_project("Inbox", true);
    let work = backend.insert_project("Work", false);
    let reports = backend.insert_project("Reports", false);
    backend.update_project(&reports, |p| p.indent = 2);
    backend.insert_item(&inbox, "Buy milk", 1);
    let report = backend.insert_item(&work, "Write report", 1);
    let sub = backend.insert_item(&work, "Collect numbers", 2);
    backend.update_item(&report, |i| i.due = Some(due("Fri 23 Mar 2018 20:59:59 +0000", true)));
    backend.update_item(&sub, |i| {
        i.indent = 2;
        i.parent_id = Some(report.clone());
        i.due = Some(due("Sat 24 Mar 2018 09:30:00 +0000", false));
    });
    backend
}

fn due(raw: &str, all_day: bool) -> Due {
    Due::parse_legacy(raw, all_day).unwrap()
}

fn type_text(app: &mut App<MemoryBackend>, text: &str) {
    for c in text.chars() {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }
}

fn draw(app: &App<MemoryBackend>, width: u16, height: u16) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    terminal.backend().buffer().clone()
}

fn row(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
}

fn find(buf: &Buffer, needle: &str) -> Option<(u16, u16)> {
    (0..buf.area.height).find_map(|y| {
        let line = row(buf, y);
        line.find(needle).map(|byte| {
            let x = line[..byte].chars().count() as u16;
            (x, y)
        })
    })
}

#[test]
fn project_menu_shows_nesting_and_selection() {
    let mut app = make_app(seeded());
    type_text(&mut app, "#Work");
    let buf = draw(&app, WIDTH, HEIGHT);

    let (inbox_x, inbox_y) = find(&buf, "Inbox").unwrap();
    let (reports_x, reports_y) = find(&buf, "Reports").unwrap();
    assert_eq!(inbox_y, 1);
    assert_eq!(reports_y, 3);
    assert_eq!(reports_x, inbox_x + 2);
    assert!(inbox_x < 25);

    let (work_x, work_y) = find(&buf, "Work ").unwrap();
    assert!(buf[(work_x, work_y)].modifier.contains(Modifier::REVERSED));
    assert!(!buf[(inbox_x, inbox_y)].modifier.contains(Modifier::REVERSED));
}

#[test]
fn project_menu_overflow_ends_with_ellipsis() {
    let backend = MemoryBackend::new();
    for n in 0..10 {
        backend.insert_project(&format!("Project {n}"), n == 0);
    }
    let app = make_app(backend);
    let buf = draw(&app, WIDTH, 6);

    assert!(find(&buf, "Project 3").is_some());
    assert!(find(&buf, "Project 4").is_none());
    let (_, y) = find(&buf, "...").unwrap();
    assert_eq!(y, 5);
}

#[test]
fn long_project_names_are_shortened() {
    let backend = MemoryBackend::new();
    backend.insert_project("An extraordinarily long project name", true);
    let app = make_app(backend);
    let buf = draw(&app, WIDTH, HEIGHT);
    assert!(find(&buf, "An extraordinarily l..").is_some());
}

#[test]
fn items_are_indented_with_due_dates_at_the_edge() {
    let mut app = make_app(seeded());
    type_text(&mut app, "#Work");
    let buf = draw(&app, WIDTH, HEIGHT);

    let (report_x, report_y) = find(&buf, "Write report").unwrap();
    let (sub_x, sub_y) = find(&buf, "Collect numbers").unwrap();
    assert_eq!(sub_y, report_y + 1);
    assert_eq!(sub_x, report_x + 2);

    let report_row = row(&buf, report_y);
    assert!(report_row.trim_end().ends_with("23.03.2018"));
    let sub_row = row(&buf, sub_y);
    assert!(sub_row.trim_end().ends_with("24.03.2018 09:30"));

    let (date_x, date_y) = find(&buf, "23.03.2018").unwrap();
    assert!(buf[(date_x, date_y)].modifier.contains(Modifier::DIM));
    assert_eq!(date_x + "23.03.2018".len() as u16, WIDTH);
    assert!(!buf[(report_x, report_y)].modifier.contains(Modifier::REVERSED));
}

#[test]
fn single_match_is_reversed() {
    let mut app = make_app(seeded());
    type_text(&mut app, "milk");
    let buf = draw(&app, WIDTH, HEIGHT);

    let (x, y) = find(&buf, "Buy milk").unwrap();
    assert!(buf[(x, y)].modifier.contains(Modifier::REVERSED));
    assert!(find(&buf, "Write report").is_none());
}

#[test]
fn command_bar_and_action_indicator() {
    let mut app = make_app(seeded());
    type_text(&mut app, "milk");
    let buf = draw(&app, WIDTH, HEIGHT);

    assert!(row(&buf, HEIGHT - 1).contains(" milk"));

    let (action_x, action_y) = find(&buf, "COMPLETE").unwrap();
    assert_eq!(action_y, HEIGHT - 1);
    assert!(action_x >= WIDTH - 15);
    assert!(buf[(action_x, action_y)].modifier.contains(Modifier::REVERSED));

    app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
    let buf = draw(&app, WIDTH, HEIGHT);
    assert!(find(&buf, "SELECT").is_some());
    assert!(find(&buf, "COMPLETE").is_none());
}

#[test]
fn long_buffer_keeps_its_tail() {
    let mut app = make_app(seeded());
    let long = "#Work ".to_string() + &"x".repeat(60) + "END";
    type_text(&mut app, &long);
    let buf = draw(&app, WIDTH, HEIGHT);

    let bottom = row(&buf, HEIGHT - 1);
    assert!(bottom.contains("..xxx"));
    assert!(bottom.contains("END"));
    assert!(!bottom.contains("#Work"));
}

#[test]
fn error_replaces_buffer_in_red() {
    let mut app = make_app(seeded());
    app.store().service().inner().set_offline(true);
    type_text(&mut app, "call mom");
    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    let buf = draw(&app, 120, HEIGHT);

    let (x, y) = find(&buf, "offline").unwrap();
    assert_eq!(y, HEIGHT - 1);
    assert_eq!(buf[(x, y)].fg, Color::Red);
    assert!(find(&buf, "call mom").is_none());
}

#[test]
fn selected_task_is_labelled() {
    let mut app = make_app(seeded());
    type_text(&mut app, "milk");
    app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    let buf = draw(&app, WIDTH, HEIGHT);

    let (_, y) = find(&buf, "selected: Buy milk").unwrap();
    assert_eq!(y, HEIGHT - 2);
    let (x, y) = find(&buf, "Buy milk").unwrap();
    assert!(buf[(x, y)].modifier.contains(Modifier::BOLD));
}
