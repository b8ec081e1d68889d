use chrono::{DateTime, NaiveDate, TimeZone};

/// Форматирует число с разделителями тысяч (точками)
///
/// # Примеры
/// ```ignore
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Replaces `/`, `:` and whitespace with `_` so the text can be a file name part.
pub fn sanitize_file_part(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c == '/' || c == ':' || c.is_whitespace() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Дата в виде YYYY-MM-DD для имён файлов
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Дата/время так, как их показывает испанская локаль: "31/12/2024, 18:05:09"
pub fn display_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%d/%m/%Y, %H:%M:%S").to_string()
}
