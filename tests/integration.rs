//! Integration tests for gridbind.
//!
//! These tests exercise the public API from outside the crate: adopting host
//! markup, drawing, editing through the pilot, paging and lifecycle hooks.

use std::cell::RefCell;
use std::rc::Rc;

use gridbind::dom::{Dom, ElementData};
use gridbind::event::DomEvent;
use gridbind::grid::{Dispatched, GridEvent, PageOutcome};
use gridbind::pagination::{PageChange, Pagination};
use gridbind::resolve::{FunctionTable, Scope};
use gridbind::template::{GridTemplates, TemplateNode, ROW_TAG};
use gridbind::testing::{grid_to_lines, GridPilot};
use gridbind::{Grid, GridConfig, GridError, GridOptions};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn tasks(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| json!({"id": i, "title": format!("Task {i}"), "active": false, "owner": {"name": "Ada"}}))
        .collect()
}

fn task_templates() -> GridTemplates {
    GridTemplates::new(
        TemplateNode::new(ROW_TAG)
            .with_child(TemplateNode::new("td").with_text("{{id}}: {{title}} ({{owner.name}})"))
            .with_child(
                TemplateNode::new("td").with_child(
                    TemplateNode::new("input")
                        .with_id("title")
                        .with_attr("type", "text")
                        .with_attr("model", "{{title}}"),
                ),
            )
            .with_child(
                TemplateNode::new("td").with_child(
                    TemplateNode::new("input")
                        .with_id("active")
                        .with_attr("type", "checkbox")
                        .with_attr("model", "{{active}}"),
                ),
            ),
    )
    .with_header(TemplateNode::new(ROW_TAG).with_child(TemplateNode::new("th").with_text("Tasks")))
    .with_footer(TemplateNode::new(ROW_TAG).with_child(TemplateNode::new("td").with_text("{{total()}} tasks")))
}

fn task_grid(options: GridOptions) -> Grid {
    let config = GridConfig::new(options).with_function("total", |rows: &[Value], _: usize| json!(rows.len()));
    Grid::new(config, task_templates())
}

// ---------------------------------------------------------------------------
// Token resolution
// ---------------------------------------------------------------------------

#[test]
fn test_path_resolution() {
    let rows = vec![json!({"a": {"b": {"c": 7}}})];
    let functions = FunctionTable::new();
    let scope = Scope::new(&rows, 0, &functions);
    assert_eq!(scope.resolve("a.b.c"), Some(json!(7)));
    assert_eq!(scope.resolve("a.b.x"), None);
    assert_eq!(scope.interpolate("[{{a.b.x}}]").unwrap(), "[]");
}

#[test]
fn test_function_token() {
    let rows = vec![json!({"price": 1}), json!({"price": 3}), json!({"price": 5})];
    let mut functions = FunctionTable::new();
    functions.insert("total", |rows: &[Value], i: usize| {
        json!(rows[i]["price"].as_i64().unwrap_or_default() * 2)
    });
    let scope = Scope::new(&rows, 2, &functions);
    assert_eq!(scope.resolve("total()"), Some(json!(10)));
    assert_eq!(scope.interpolate("{{total()}}").unwrap(), "10");
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

#[test]
fn test_draw_renders_sections() {
    let mut grid = task_grid(GridOptions::new().with_grid_id("tasks").with_data_source(tasks(2)));
    grid.draw().unwrap();
    insta::assert_snapshot!(grid_to_lines(&grid), @r#"
    <tr><th>Tasks</th></tr>
    <tr id="tasks-row-0"><td>0: Task 0 (Ada)</td><td><input id="title-0" type="text" model="{{title}}" value="Task 0"></input></td><td><input id="active-0" type="checkbox" model="{{active}}"></input></td></tr>
    <tr id="tasks-row-1"><td>1: Task 1 (Ada)</td><td><input id="title-1" type="text" model="{{title}}" value="Task 1"></input></td><td><input id="active-1" type="checkbox" model="{{active}}"></input></td></tr>
    <tr><td>2 tasks</td></tr>
    "#);
}

#[test]
fn test_idempotent_render() {
    let mut grid = task_grid(GridOptions::new().with_data_source(tasks(3)));
    grid.draw().unwrap();
    let first = grid.to_markup();
    grid.draw().unwrap();
    assert_eq!(grid.to_markup(), first);
}

#[test]
fn test_registry_freshness_after_two_draws() {
    let mut grid = task_grid(GridOptions::new().with_data_source(tasks(4)).with_pagination(2));
    grid.draw().unwrap();
    grid.go_to_page(2).unwrap();

    let ids: Vec<_> = grid
        .registry()
        .entries()
        .iter()
        .map(|e| (e.element_id.clone(), e.row_index))
        .collect();
    assert_eq!(
        ids,
        vec![
            ("title-2".to_owned(), 2),
            ("active-2".to_owned(), 2),
            ("title-3".to_owned(), 3),
            ("active-3".to_owned(), 3),
        ]
    );
    assert_eq!(grid.listeners().len(), 4);
}

#[test]
fn test_adopt_host_markup() {
    let mut dom = Dom::new();
    let body = dom.insert(ElementData::new("body"));
    let table = dom.insert_child(body, ElementData::new("table").with_id("people"));
    let header = dom.insert_child(table, ElementData::new("headerRow"));
    dom.insert_child(header, ElementData::new("th").with_text("Name"));
    let data = dom.insert_child(table, ElementData::new("dataRow"));
    dom.insert_child(data, ElementData::new("td").with_text("{{name}}"));
    dom.insert_child(
        data,
        ElementData::new("input").with_id("name").with_attr("model", "{{name}}"),
    );

    let config = GridConfig::from_json(r#"{"gridId": "people", "dataSource": [{"name": "Ada"}, {"name": "Grace"}]}"#).unwrap();
    let mut grid = Grid::adopt(dom, config).unwrap();
    grid.draw().unwrap();

    let dom = grid.dom();
    assert_eq!(dom.parent(grid.root()), Some(body));
    assert!(dom.query_by_tag("dataRow").is_empty());
    assert_eq!(dom.children(grid.root()).len(), 3);
    assert_eq!(grid.registry().len(), 2);
}

#[test]
fn test_adopt_without_data_row_fails() {
    let mut dom = Dom::new();
    dom.insert(ElementData::new("table").with_id("people"));
    let config = GridConfig::new(GridOptions::new().with_grid_id("people"));
    assert!(matches!(Grid::adopt(dom, config), Err(GridError::Template(_))));
}

// ---------------------------------------------------------------------------
// Editing
// ---------------------------------------------------------------------------

#[test]
fn test_edit_round_trip_identity() {
    let mut pilot = GridPilot::drawn(task_grid(GridOptions::new().with_data_source(tasks(5)))).unwrap();
    assert_eq!(pilot.toggle("active-3").unwrap(), Dispatched::Edited { row_index: 3 });

    let grid = pilot.grid();
    assert_eq!(grid.rows()[3]["active"], json!(true));
    let updates = grid.get_data_updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].row_index, 3);
    assert!(std::ptr::eq(updates[0].row, &grid.rows()[3]));
}

#[test]
fn test_pending_set_holds_each_row_once() {
    let mut pilot = GridPilot::drawn(task_grid(GridOptions::new().with_data_source(tasks(3)))).unwrap();
    pilot.type_into("title-1", "First").unwrap();
    pilot.type_into("title-1", "Second").unwrap();
    pilot.toggle("active-0").unwrap();

    let updates: Vec<_> = pilot
        .grid()
        .get_data_updates()
        .iter()
        .map(|u| (u.row_index, u.row["title"].clone()))
        .collect();
    assert_eq!(updates, vec![(0, json!("Task 0")), (1, json!("Second"))]);

    pilot.grid_mut().clear_data_updates();
    assert!(pilot.grid().get_data_updates().is_empty());
}

#[test]
fn test_edit_redraws_only_that_row() {
    let redrawn = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&redrawn);
    let mut grid = task_grid(GridOptions::new().with_data_source(tasks(3)));
    grid.on_row_redraw_complete(move |i| log.borrow_mut().push(i));
    let mut pilot = GridPilot::drawn(grid).unwrap();
    let untouched = pilot.grid().row_node(0);

    pilot.type_into("title-2", "Renamed").unwrap();
    assert_eq!(*redrawn.borrow(), vec![2]);
    assert_eq!(pilot.grid().row_node(0), untouched);
    assert_eq!(
        pilot.row_texts(),
        vec!["0: Task 0 (Ada)", "1: Task 1 (Ada)", "2: Renamed (Ada)"]
    );
}

#[test]
fn test_text_value_is_stored_verbatim() {
    let mut pilot = GridPilot::drawn(task_grid(GridOptions::new().with_data_source(tasks(1)))).unwrap();
    pilot.type_into("title-0", "007").unwrap();
    assert_eq!(pilot.grid().rows()[0]["title"], json!("007"));
}

#[test]
fn test_shared_tokenized_id_edits_the_right_row() {
    let rows: Vec<Value> = ["one", "two", "three"]
        .iter()
        .map(|title| json!({"group": "a", "title": title}))
        .collect();
    let templates = GridTemplates::new(
        TemplateNode::new(ROW_TAG)
            .with_child(TemplateNode::new("td").with_text("{{title}}"))
            .with_child(
                TemplateNode::new("input")
                    .with_id("t-{{group}}")
                    .with_attr("model", "{{title}}"),
            ),
    );
    let grid = Grid::new(GridConfig::new(GridOptions::new().with_data_source(rows)), templates);
    let mut pilot = GridPilot::drawn(grid).unwrap();
    assert_eq!(pilot.grid().registry().len(), 3);
    assert_eq!(pilot.grid().listeners().len(), 3);

    assert_eq!(
        pilot.type_into("grid-r2-b0", "last").unwrap(),
        Dispatched::Edited { row_index: 2 }
    );
    assert_eq!(
        pilot.type_into("t-a", "first").unwrap(),
        Dispatched::Edited { row_index: 0 }
    );
    assert_eq!(pilot.row_texts(), vec!["first", "two", "last"]);
    assert_eq!(pilot.grid().registry().len(), 3);
}

#[test]
fn test_replaced_collection_drops_stale_rows() {
    let mut pilot = GridPilot::drawn(task_grid(GridOptions::new().with_data_source(tasks(3)))).unwrap();
    pilot.grid_mut().set_data_source(tasks(1));
    assert!(matches!(
        pilot.grid_mut().redraw_row(2),
        Err(GridError::RowNotVisible { index: 2 })
    ));
    assert_eq!(pilot.type_into("title-2", "gone").unwrap(), Dispatched::Ignored);
    assert_eq!(pilot.grid().rows().len(), 1);

    pilot.grid_mut().draw().unwrap();
    assert_eq!(pilot.row_texts(), vec!["0: Task 0 (Ada)"]);
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[test]
fn test_pagination_window() {
    let p = Pagination::new(23, Some(10));
    assert_eq!(p.page_count(), 3);
    assert_eq!((p.window(1).start, p.window(1).end), (0, 10));
    assert_eq!((p.window(3).start, p.window(3).end), (20, 23));
    assert_eq!(p.window(5), p.window(3));
}

#[test]
fn test_refused_transition() {
    let changed = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&changed);
    let config = GridConfig::new(GridOptions::new().with_data_source(tasks(23)).with_pagination(10))
        .before_grid_page_change(|_, _| false)
        .on_grid_page_change(move |a, b| log.borrow_mut().push((a, b)));
    let mut grid = Grid::new(config, task_templates());
    grid.draw().unwrap();

    let outcome = grid.go_to_page(2).unwrap();
    assert_eq!(outcome, PageOutcome::Refused(PageChange { from: 1, to: 2 }));
    assert_eq!(grid.current_page(), 1);
    assert!(changed.borrow().is_empty());
    assert_eq!(
        grid.drain_events(),
        vec![GridEvent::Loaded, GridEvent::PageChangeRefused { from: 1, to: 2 }]
    );
}

#[test]
fn test_disabled_paging() {
    let mut grid = task_grid(
        GridOptions::new()
            .with_data_source(tasks(23))
            .with_pagination(10)
            .with_allow_page_change(false),
    );
    grid.draw().unwrap();
    let markup = grid.to_markup();
    assert_eq!(grid.go_to_page(2).unwrap(), PageOutcome::Disabled);
    assert_eq!(grid.current_page(), 1);
    assert_eq!(grid.to_markup(), markup);

    let outcome = grid.dispatch(&DomEvent::click("grid-page-3")).unwrap();
    assert_eq!(outcome, Dispatched::Page(PageOutcome::Disabled));
    assert_eq!(grid.current_page(), 1);
}

#[test]
fn test_page_change_hooks_in_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let before = Rc::clone(&seen);
    let after = Rc::clone(&seen);
    let loaded = Rc::clone(&seen);
    let config = GridConfig::new(GridOptions::new().with_data_source(tasks(23)).with_pagination(10))
        .on_grid_loaded(move || loaded.borrow_mut().push("loaded".to_owned()))
        .before_grid_page_change(move |a, b| {
            before.borrow_mut().push(format!("before {a}->{b}"));
            true
        })
        .on_grid_page_change(move |a, b| after.borrow_mut().push(format!("after {a}->{b}")));
    let mut pilot = GridPilot::drawn(Grid::new(config, task_templates())).unwrap();

    pilot.click_page(9).unwrap();
    assert_eq!(pilot.grid().current_page(), 3);
    assert_eq!(pilot.row_texts().len(), 3);
    assert_eq!(
        *seen.borrow(),
        vec!["loaded", "before 1->3", "after 1->3"]
    );
}

#[test]
fn test_reentering_current_page_redraws() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let before = Rc::clone(&seen);
    let after = Rc::clone(&seen);
    let config = GridConfig::new(GridOptions::new().with_data_source(tasks(23)).with_pagination(10))
        .before_grid_page_change(move |a, b| {
            before.borrow_mut().push(format!("before {a}->{b}"));
            true
        })
        .on_grid_page_change(move |a, b| after.borrow_mut().push(format!("after {a}->{b}")));
    let mut grid = Grid::new(config, task_templates());
    grid.draw().unwrap();
    let first_row = grid.row_node(0);
    grid.drain_events();

    let outcome = grid.go_to_page(1).unwrap();
    assert_eq!(outcome, PageOutcome::Moved(PageChange { from: 1, to: 1 }));
    assert_eq!(grid.current_page(), 1);
    assert_ne!(grid.row_node(0), first_row);
    assert_eq!(*seen.borrow(), vec!["before 1->1", "after 1->1"]);
    assert_eq!(grid.drain_events(), vec![GridEvent::PageChanged { from: 1, to: 1 }]);
}

// ---------------------------------------------------------------------------
// Painting
// ---------------------------------------------------------------------------

#[test]
fn test_palette_rotation_and_hover() {
    let mut pilot = GridPilot::drawn(task_grid(
        GridOptions::new()
            .with_data_source(tasks(3))
            .with_data_row_colors(["#fff", "#eee"])
            .with_mouse_over_color("#ffc"),
    ))
    .unwrap();
    let background = |pilot: &GridPilot, i: usize| {
        let grid = pilot.grid();
        grid.dom().get(grid.row_node(i).unwrap()).unwrap().background.clone()
    };
    assert_eq!(background(&pilot, 0).as_deref(), Some("#fff"));
    assert_eq!(background(&pilot, 1).as_deref(), Some("#eee"));
    assert_eq!(background(&pilot, 2).as_deref(), Some("#fff"));

    pilot.hover(1).unwrap();
    assert_eq!(background(&pilot, 1).as_deref(), Some("#ffc"));
    pilot.leave(1).unwrap();
    assert_eq!(background(&pilot, 1).as_deref(), Some("#eee"));
}

#[test]
fn test_hover_survives_edit_redraw() {
    let mut pilot = GridPilot::drawn(task_grid(
        GridOptions::new()
            .with_data_source(tasks(2))
            .with_data_row_colors(["#fff"])
            .with_mouse_over_color("#ffc"),
    ))
    .unwrap();
    pilot.hover(0).unwrap();
    pilot.type_into("title-0", "Edited").unwrap();
    let grid = pilot.grid();
    let row = grid.dom().get(grid.row_node(0).unwrap()).unwrap();
    assert_eq!(row.background.as_deref(), Some("#ffc"));
    assert_eq!(pilot.row_texts()[0], "0: Edited (Ada)");
}
