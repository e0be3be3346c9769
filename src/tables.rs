use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        history::DailyAverage,
        point::PricePoint,
        rating::DayRating,
        summary::{Dashboard, DaySummary},
        window::Window,
    },
    fmt::{FormattedDelta, FormattedEuro},
    quantity::rate::KilowattHourRate,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

const fn rating_color(rating: DayRating) -> Color {
    match rating {
        DayRating::Good => Color::Green,
        DayRating::Normal => Color::DarkYellow,
        DayRating::Bad => Color::Red,
    }
}

fn rate_cell(value: KilowattHourRate, reference: Option<KilowattHourRate>) -> Cell {
    let cell = Cell::new(FormattedEuro::from(value)).set_alignment(CellAlignment::Right);
    match reference {
        Some(reference) if value > reference => cell.fg(Color::Red),
        Some(_) => cell.fg(Color::Green),
        None => cell,
    }
}

fn delta_cell(delta: Option<KilowattHourRate>) -> Cell {
    delta.map_or_else(
        || Cell::new("n/a").add_attribute(Attribute::Dim),
        |delta| {
            // Cheaper than the average is good news:
            let color = if delta > KilowattHourRate::ZERO { Color::Red } else { Color::Green };
            Cell::new(FormattedDelta(delta)).set_alignment(CellAlignment::Right).fg(color)
        },
    )
}

fn point_row(label: &str, point: PricePoint, dashboard: &Dashboard) -> Vec<Cell> {
    vec![
        Cell::new(format!("{label} at {}:00", point.hour)),
        rate_cell(point.value, dashboard.trailing_average),
        delta_cell(dashboard.delta(point.value)),
    ]
}

#[must_use]
pub fn build_metrics_table(dashboard: &Dashboard) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Price", "Δ average"]);

    table.add_row(vec![
        Cell::new("Trailing average"),
        dashboard.trailing_average.map_or_else(
            || Cell::new("n/a").add_attribute(Attribute::Dim),
            |average| rate_cell(average, None),
        ),
        Cell::new(""),
    ]);
    if let Some(current) = dashboard.current {
        table.add_row(point_row("Now", current, dashboard));
    }
    for (label, summary) in [("Today", &dashboard.today), ("Tomorrow", &dashboard.tomorrow)] {
        if let Some(summary) = summary {
            table.add_row(point_row(&format!("{label} min"), summary.min, dashboard));
            table.add_row(point_row(&format!("{label} max"), summary.max, dashboard));
            if let Some(rating) = summary.rating {
                table.add_row(vec![
                    Cell::new(format!("{label} rating")),
                    Cell::new(rating).fg(rating_color(rating)),
                    Cell::new(""),
                ]);
            }
        }
    }
    table
}

#[must_use]
pub fn build_day_table(summary: &DaySummary) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new(summary.date.format("%a %b %d")),
        Cell::new("Price"),
        Cell::new("Δ day average"),
        Cell::new(""),
    ]);
    for point in &summary.prices {
        let is_within = |window: Option<&Window>| window.is_some_and(|window| window.contains(point));
        let marker = if is_within(summary.cheapest.as_ref()) {
            Cell::new("cheapest").fg(Color::Green)
        } else if is_within(summary.runner_up.as_ref()) {
            Cell::new("cheap").fg(Color::DarkGreen)
        } else if is_within(summary.most_expensive.as_ref()) {
            Cell::new("expensive").fg(Color::Red)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            Cell::new(format!("{}:00", point.hour)),
            rate_cell(point.value, Some(summary.average)),
            Cell::new(FormattedDelta(point.value - summary.average))
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            marker,
        ]);
    }
    table
}

#[must_use]
pub fn build_history_table(history: &[DailyAverage]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Average"]);
    for day in history {
        table.add_row(vec![
            Cell::new(day.date.format("%Y-%m-%d")),
            day.average.map_or_else(
                || Cell::new("n/a").add_attribute(Attribute::Dim),
                |average| rate_cell(average, None),
            ),
        ]);
    }
    table
}

#[must_use]
pub fn build_rating_table(summary: &DaySummary) -> Table {
    let mut table = new_table();
    table.set_header(vec![Cell::new(summary.date.format("%Y-%m-%d")), Cell::new("")]);
    table.add_row(vec![Cell::new("Rolling baseline"), rate_cell(summary.baseline, None)]);
    if let Some(cheapest) = &summary.cheapest {
        table.add_row(vec![
            Cell::new(format!(
                "Cheapest {}h from {}:00 to {}:59",
                cheapest.points().len(),
                cheapest.first().hour,
                cheapest.last().hour,
            )),
            rate_cell(cheapest.average(), Some(summary.baseline)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Rating"),
        summary.rating.map_or_else(
            || Cell::new("n/a").add_attribute(Attribute::Dim),
            |rating| Cell::new(rating).fg(rating_color(rating)),
        ),
    ]);
    table
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::core::{
        aggregate::tests::point,
        rating::DEFAULT_VARIANCE,
        series::PriceSeries,
        summary::DEFAULT_WINDOW_HOURS,
    };

    fn summary() -> DaySummary {
        let points = vec![point(0, 0.10), point(1, 0.08), point(2, 0.09), point(3, 0.20)];
        let series = PriceSeries::on(points[0].date, points);
        DaySummary::try_new(&series, KilowattHourRate(0.12), DEFAULT_WINDOW_HOURS, DEFAULT_VARIANCE)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_day_table() {
        let rendered = build_day_table(&summary()).to_string();
        assert!(rendered.contains("01:00"));
        assert!(rendered.contains("cheapest"));
        assert!(rendered.contains("expensive"));
    }

    #[test]
    fn test_rating_table() {
        let rendered = build_rating_table(&summary()).to_string();
        assert!(rendered.contains("good"));
        assert!(rendered.contains("Cheapest 3h from 00:00 to 02:59"));
    }

    #[test]
    fn test_history_table() {
        let history = [DailyAverage {
            date: NaiveDate::from_ymd_opt(2023, 5, 12).unwrap(),
            average: None,
        }];
        let rendered = build_history_table(&history).to_string();
        assert!(rendered.contains("2023-05-12"));
        assert!(rendered.contains("n/a"));
    }
}
