//! Users table example.
//!
//! Builds a table of users, applies header edits the way a UI would and
//! prints every page the table produces.
//!
//! Run with: cargo run --example users

use emtable_lib::DataTable;
use emtable_lib::TableConfig;
use emtable_lib::header::HeaderCell;
use emtable_lib::model::DateOffset;
use emtable_lib::model::Day;
use emtable_lib::model::Fields;
use emtable_lib::model::FilterConfig;
use emtable_lib::model::FilterKind;
use emtable_lib::model::FilterOption;
use emtable_lib::model::HeaderConfig;
use emtable_lib::model::PageVm;
use emtable_lib::model::Value;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::SimpleLogger;

#[derive(Debug, Clone)]
struct User {
    id: u32,
    name: String,
    role: i64,
    status: i64,
    color: &'static str,
    last_login: Option<DateOffset>,
}

fn user(id: u32, name: &str, role: i64, status: i64, color: &'static str, last_login: &str) -> User {
    User {
        id,
        name: name.to_string(),
        role,
        status,
        color,
        last_login: DateOffset::parse(last_login),
    }
}

fn users() -> Vec<User> {
    vec![
        user(1, "Ada Lovelace", 0, 0, "r", "2024-03-01T08:15:00+01:00"),
        user(2, "Alan Turing", 1, 1, "b", "2024-02-11T17:40:00Z"),
        user(3, "Grace Hopper", 0, 0, "y", "2024-03-04T23:05:00-05:00"),
        user(4, "Edsger Dijkstra", 2, 1, "b", ""),
        user(5, "Barbara Liskov", 1, 0, "r", "2024-01-20T12:00:00+09:00"),
        user(6, "Donald Knuth", 2, 0, "y", "2024-03-02T06:30:00-08:00"),
    ]
}

fn fields() -> Fields<User> {
    Fields::new()
        .field("name", |u: &User| Value::from(&u.name))
        .field("role", |u: &User| Value::from(u.role))
        .field("status", |u: &User| Value::from(u.status))
        .field("color", |u: &User| Value::from(u.color))
        .field("lastLoginDate", |u: &User| Value::from(u.last_login))
}

fn columns() -> Vec<HeaderConfig> {
    vec![
        HeaderConfig::new("name", "Name")
            .sortable()
            .with_filter(FilterConfig::new(FilterKind::Text))
            .with_class("name"),
        HeaderConfig::new("role", "Role").with_filter(FilterConfig::with_options(
            FilterKind::Dropdown,
            [
                FilterOption::new(0, "Admin"),
                FilterOption::new(1, "Editor"),
                FilterOption::new(2, "Reader"),
            ],
        )),
        HeaderConfig::new("status", "Status").sortable().with_filter(FilterConfig::with_options(
            FilterKind::Checkbox,
            [FilterOption::new(0, "Locked"), FilterOption::new(1, "Disabled")],
        )),
        HeaderConfig::new("color", "Favorite Color").with_filter(FilterConfig::with_options(
            FilterKind::Radio,
            [
                FilterOption::new("r", "Red"),
                FilterOption::new("y", "Yellow"),
                FilterOption::new("b", "Blue"),
            ],
        )),
        HeaderConfig::new("lastLoginDate", "Last Login Date")
            .sortable()
            .with_filter(FilterConfig::new(FilterKind::DateRange)),
        HeaderConfig::untitled("action"),
    ]
}

fn print_page(page: &PageVm<User>) {
    println!(
        "page {}/{} ({} users)",
        page.page_number,
        page.page_count(),
        page.item_count
    );
    for user in &page.data {
        let login = user
            .last_login
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "never".to_string());
        println!("  #{} {:<16} role={} last login {}", user.id, user.name, user.role, login);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::init(LevelFilter::Debug, Config::default())?;

    let config = TableConfig::from_json(r#"{ "pageSize": 4, "quietPeriodMs": 25 }"#)?;
    let quiet = config.quiet_period;
    let table = DataTable::new(users(), fields(), columns(), &config);

    let _pages = table.page().subscribe(|page| match page {
        Ok(page) => print_page(page),
        Err(err) => eprintln!("table error: {err}"),
    });

    // the name header's sort toggle
    let mut name = HeaderCell::new(table.header().configs()[0].clone());
    if let Some(sort) = name.toggle_sort() {
        table.sort_edit(sort.field_id, sort.direction);
    }

    // filter on logins during March, then narrow down to admins
    let mut last_login = HeaderCell::new(table.header().configs()[4].clone());
    last_login.set_from(Some(Day::new(2024, 3, 1)));
    last_login.set_to(Some(Day::new(2024, 3, 31)));
    if let Some(edit) = last_login.apply() {
        println!("last login filter: {}", last_login.label().unwrap_or_default());
        table.filter_edit(edit);
    }

    let mut role = HeaderCell::new(table.header().configs()[1].clone());
    role.select(0);
    if let Some(edit) = role.apply() {
        println!("role filter: {}", role.label().unwrap_or_default());
        table.filter_edit(edit);
    }

    // both edits land in one filter change
    tokio::time::sleep(quiet * 2).await;
    println!("active filters: {:?}", table.filters());

    table.clear_filters();
    tokio::time::sleep(quiet * 2).await;
    table.set_page_number(2);

    table.dispose();
    Ok(())
}
