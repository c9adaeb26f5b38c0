//! CSV assembly for booking exports, kept pure so it can be tested without
//! a server.

use chrono::NaiveDate;

use crate::models::BookingWithCar;

pub const CSV_HEADER: &str = "Car,Customer,Contact,Start,End,Status,Total,Created";

/// Quote a field when it contains a delimiter, quote, or newline; embedded
/// quotes are doubled.
pub fn csv_escape(value: &str) -> String {
    if value.contains(|c| c == '"' || c == ',' || c == '\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn bookings_csv(rows: &[BookingWithCar]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for booking in rows {
        let total = booking.total_price.map(|p| p.to_string()).unwrap_or_default();
        lines.push(
            [
                csv_escape(booking.car_name.as_deref().unwrap_or("")),
                csv_escape(&booking.customer_name),
                csv_escape(&booking.contact),
                booking.start_date.format("%Y-%m-%d").to_string(),
                booking.end_date.format("%Y-%m-%d").to_string(),
                csv_escape(&booking.status),
                csv_escape(&total),
                booking.created_at.format("%Y-%m-%d").to_string(),
            ]
            .join(","),
        );
    }
    lines.join("\n")
}

pub fn report_filename(from: Option<NaiveDate>, to: Option<NaiveDate>) -> String {
    let part = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "all".to_string());
    format!("bookings_{}_{}.csv", part(from), part(to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn row(customer: &str, contact: &str) -> BookingWithCar {
        BookingWithCar {
            id: Uuid::new_v4(),
            car_id: Uuid::new_v4(),
            customer_name: customer.to_string(),
            contact: contact.to_string(),
            start_date: day("2025-08-01"),
            end_date: day("2025-08-03"),
            total_price: Some(150.0),
            status: "confirmed".to_string(),
            source: "manual".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 7, 20, 10, 0, 0).unwrap(),
            car_name: Some("Toyota Vios".to_string()),
            car_price_per_day: Some(50.0),
        }
    }

    #[test]
    fn escape_quotes_only_when_needed() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn csv_has_header_and_one_line_per_booking() {
        let rows = vec![row("Ana Cruz", "0917"), row("Lee, Min", "0918")];
        let csv = bookings_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].starts_with("Toyota Vios,Ana Cruz,0917,2025-08-01,2025-08-03,confirmed,150,"));
        // comma in the name forces quoting
        assert!(lines[2].contains("\"Lee, Min\""));
    }

    #[test]
    fn deleted_car_exports_as_empty_field() {
        let mut orphan = row("Jo", "");
        orphan.car_name = None;
        let csv = bookings_csv(&[orphan]);
        assert!(csv.lines().nth(1).unwrap().starts_with(",Jo,"));
    }

    #[test]
    fn filename_uses_all_for_open_ends() {
        assert_eq!(report_filename(None, None), "bookings_all_all.csv");
        assert_eq!(
            report_filename(Some(day("2025-01-01")), None),
            "bookings_2025-01-01_all.csv"
        );
    }
}
