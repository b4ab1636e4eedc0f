use chrono::{Datelike, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Column headers, Sunday first
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Everything needed to lay a month into a 7-column grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub month_name: &'static str,
    pub year: i32,
    /// 1-based month number
    pub month: u32,
    /// Weekday of day 1, 0 = Sunday
    pub first_weekday: u32,
    pub days_in_month: u32,
}

impl MonthView {
    /// Grid cells: leading blanks followed by day numbers
    pub fn cells(&self) -> Vec<Option<u32>> {
        let mut cells = vec![None; self.first_weekday as usize];
        cells.extend((1..=self.days_in_month).map(Some));
        cells
    }

    /// Cells chunked into weeks of seven; the last week is padded with blanks
    pub fn weeks(&self) -> Vec<[Option<u32>; 7]> {
        self.cells()
            .chunks(7)
            .map(|chunk| {
                let mut week = [None; 7];
                week[..chunk.len()].copy_from_slice(chunk);
                week
            })
            .collect()
    }

    pub fn title(&self) -> String {
        format!("{} {}", self.month_name, self.year)
    }
}

/// First day of the month containing `date`
fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Build the month view for the month containing `date`
pub fn month_view(date: NaiveDate) -> MonthView {
    let first = first_of_month(date);
    MonthView {
        month_name: MONTH_NAMES[first.month0() as usize],
        year: first.year(),
        month: first.month(),
        first_weekday: first.weekday().num_days_from_sunday(),
        days_in_month: days_in_month(first.year(), first.month()),
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

/// Day 1 of the previous month. The day of month is dropped so
/// Mar 31 goes to Feb 1 rather than overflowing.
pub fn previous_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first.pred_opt().map(first_of_month).unwrap_or(first)
}

/// Day 1 of the next month
pub fn next_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    let days = days_in_month(first.year(), first.month()) as u64;
    first
        .checked_add_days(chrono::Days::new(days))
        .unwrap_or(first)
}

/// Whether `day` of the viewed month is `today`
pub fn is_today(view: &MonthView, day: u32, today: NaiveDate) -> bool {
    view.year == today.year() && view.month == today.month() && day == today.day()
}

/// Parse a `YYYY-MM` month argument into day 1 of that month
pub fn parse_month(text: &str) -> Option<NaiveDate> {
    let (year, month) = text.trim().split_once('-')?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// Plain-text month grid, `*` after today's date
pub fn month_text(view: &MonthView, today: NaiveDate) -> String {
    let mut out = format!("{:^28}\n", view.title());
    for label in WEEKDAY_LABELS {
        out.push_str(&format!("{:>4}", label));
    }
    out.push('\n');
    for week in view.weeks() {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                Some(day) if is_today(view, *day, today) => format!("{:>3}*", day),
                Some(day) => format!("{:>4}", day),
                None => "    ".to_string(),
            })
            .collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}
