//! Plain-text rendering of weather reports.

use crate::weather::types::WeatherReport;

/// Render a report as the five-line chat reply.
pub fn format_report(report: &WeatherReport) -> String {
    format!(
        "🌍 Погода в городе {}:\n\
         🌡 Температура: {}°C\n\
         🤔 Ощущается как: {}°C\n\
         💧 Влажность: {}%\n\
         ☁️ {}",
        report.city,
        format_temperature(report.temperature),
        format_temperature(report.feels_like),
        report.humidity,
        capitalize(&report.description),
    )
}

/// Shortest exact digits, always with a decimal point (`17.0`, `18.5`).
pub fn format_temperature(value: f64) -> String {
    let s = value.to_string();
    if !value.is_finite() || s.contains('.') {
        return s;
    }
    format!("{s}.0")
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> WeatherReport {
        WeatherReport {
            city: "Paris".to_string(),
            temperature: 18.5,
            feels_like: 17.0,
            humidity: 60.0,
            description: "clear sky".to_string(),
        }
    }

    #[test]
    fn report_contains_all_fields() {
        let out = format_report(&paris());
        assert_eq!(
            out,
            "🌍 Погода в городе Paris:\n\
             🌡 Температура: 18.5°C\n\
             🤔 Ощущается как: 17.0°C\n\
             💧 Влажность: 60%\n\
             ☁️ Clear sky"
        );
    }

    #[test]
    fn temperature_keeps_one_decimal_for_whole_numbers() {
        assert_eq!(format_temperature(17.0), "17.0");
        assert_eq!(format_temperature(-3.25), "-3.25");
        assert_eq!(format_temperature(0.0), "0.0");
        assert_eq!(format_temperature(18.5), "18.5");
    }

    #[test]
    fn capitalize_handles_cyrillic_and_mixed_case() {
        assert_eq!(capitalize("clear sky"), "Clear sky");
        assert_eq!(capitalize("ясно"), "Ясно");
        assert_eq!(capitalize("LIGHT RAIN"), "Light rain");
        assert_eq!(capitalize(""), "");
    }
}
