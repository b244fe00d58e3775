use crossterm::style::Stylize;
use hamwx_core::{
    Dashboard, Location, SolarReport, TimeOfDay, UnitSystem, Warning, WeatherReport,
    display::{self, Color, Painter, PlainPainter},
};

use crate::cli::Section;

/// Terminal colors via ANSI escapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiPainter;

impl Painter for AnsiPainter {
    fn paint(&self, text: &str, color: Color) -> String {
        match color {
            Color::Blue => text.blue().to_string(),
            Color::Green => text.green().to_string(),
            Color::Red => text.red().to_string(),
        }
    }
}

pub fn painter(plain: bool) -> Box<dyn Painter> {
    if plain { Box::new(PlainPainter) } else { Box::new(AnsiPainter) }
}

pub fn dashboard(board: &Dashboard, units: UnitSystem, section: Section, painter: &dyn Painter) {
    match &board.location {
        Some(location) => header(location),
        None => println!("Weather Information for --, --"),
    }

    let wants = |s: Section| section == Section::All || section == s;

    if wants(Section::Current) {
        heading("Current Weather");
        match &board.weather {
            Some(report) => current(report, units),
            None => println!("  --"),
        }
    }
    if wants(Section::Forecast) {
        heading("5-Day Forecast");
        match &board.weather {
            Some(report) => forecast(report, units, painter),
            None => println!("  --"),
        }
    }
    if wants(Section::Alerts) {
        heading("Weather Alerts");
        match &board.weather {
            Some(report) => println!("{}", display::alerts_text(&report.alerts)),
            None => println!("  --"),
        }
    }
    if wants(Section::Solar) {
        heading("Solar Weather");
        match &board.solar {
            Some(report) => solar(report, painter),
            None => println!("  Loading Solar Data..."),
        }
    }
}

pub fn warnings(warnings: &[Warning]) {
    for w in warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), w.message);
    }
}

fn header(location: &Location) {
    println!("{}", display::location_header(location).bold());
}

fn heading(title: &str) {
    println!();
    println!("{}", title.bold().underlined());
}

fn current(report: &WeatherReport, units: UnitSystem) {
    let c = &report.current;
    println!("  Icon: {}", display::icon_url(&c.icon_id));
    for (label, value) in display::current_rows(c, units) {
        println!("  {label}: {value}");
    }
}

fn forecast(report: &WeatherReport, units: UnitSystem, painter: &dyn Painter) {
    for day in &report.forecast {
        println!(
            "  {:<10} {}  {}",
            day.weekday_name,
            display::forecast_temperatures(day, units, painter),
            display::forecast_summary(day),
        );
        println!("  {:<10} {}", "", display::icon_url(&day.icon_id).dark_grey());
    }
}

fn solar(report: &SolarReport, painter: &dyn Painter) {
    println!("{}", display::solar_indices(report));
    println!();
    println!("Band Conditions (Day):");
    println!("{}", display::band_block(report, TimeOfDay::Day, painter));
    println!();
    println!("Band Conditions (Night):");
    println!("{}", display::band_block(report, TimeOfDay::Night, painter));
    println!();
    println!("{}", display::SOLAR_CREDIT.dark_grey());
}
