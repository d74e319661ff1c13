//! Plain-text output for each command.

use std::io::{self, Write};

use chrono::{DateTime, FixedOffset};
use owm_core::{
    AirPollutionReport, FindReport, Place, Units, WeatherReport,
    endpoint::onecall::{PointWeather, WeatherSummary},
    model::WeatherCondition,
};

const HOURLY_ROWS: usize = 12;

fn local_time(ts: i64, offset_secs: i32) -> String {
    let Some(utc) = DateTime::from_timestamp(ts, 0) else {
        return ts.to_string();
    };
    match FixedOffset::east_opt(offset_secs) {
        Some(tz) => utc.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string(),
        None => utc.format("%Y-%m-%d %H:%M UTC").to_string(),
    }
}

fn describe(conditions: &[WeatherCondition]) -> String {
    match conditions.first() {
        Some(c) => c.description.clone(),
        None => "-".to_string(),
    }
}

fn summary_line(s: &WeatherSummary, units: Units) -> String {
    let mut line = format!(
        "humidity {}%  pressure {} hPa  wind {} {} {}°",
        s.humidity,
        s.pressure,
        s.wind_speed,
        units.speed_symbol(),
        s.wind_deg
    );
    if let Some(pop) = s.pop.as_option() {
        line.push_str(&format!("  pop {:.0}%", pop * 100.0));
    }
    if let Some(rain) = s.rain.as_option() {
        line.push_str(&format!("  rain {} mm", rain.millimetres()));
    }
    if let Some(snow) = s.snow.as_option() {
        line.push_str(&format!("  snow {} mm", snow.millimetres()));
    }
    line
}

fn point_line(p: &PointWeather, units: Units, offset: i32) -> String {
    let t = units.temperature_symbol();
    format!(
        "{}  {:>7.1}{t} (feels {:.1}{t})  {}",
        local_time(p.summary.dt, offset),
        p.temp,
        p.feels_like,
        describe(&p.summary.weather)
    )
}

pub fn weather(out: &mut impl Write, report: &WeatherReport, units: Option<Units>) -> io::Result<()> {
    let units = units.unwrap_or(Units::Standard);
    let offset = report.timezone_offset;
    let t = units.temperature_symbol();

    writeln!(out, "{} ({:.3}, {:.3})", report.timezone, report.lat, report.lon)?;

    if let Some(current) = report.current.as_option() {
        writeln!(out, "Now: {}", point_line(current, units, offset))?;
        writeln!(out, "     {}", summary_line(&current.summary, units))?;
        if let (Some(rise), Some(set)) = (
            current.summary.sunrise.as_option(),
            current.summary.sunset.as_option(),
        ) {
            writeln!(
                out,
                "     sunrise {}  sunset {}",
                local_time(*rise, offset),
                local_time(*set, offset)
            )?;
        }
    }

    let minutely = report.minutely.entries();
    if !minutely.is_empty() {
        let total: f64 = minutely.iter().map(|m| m.precipitation).sum();
        writeln!(
            out,
            "Next hour: {total:.2} mm over {} minutes",
            minutely.len()
        )?;
    }

    let hourly = report.hourly.entries();
    if !hourly.is_empty() {
        writeln!(out, "Hourly:")?;
        for hour in hourly.iter().take(HOURLY_ROWS) {
            writeln!(out, "  {}", point_line(hour, units, offset))?;
        }
    }

    let daily = report.daily.entries();
    if !daily.is_empty() {
        writeln!(out, "Daily:")?;
        for day in daily {
            let date = local_time(day.summary.dt, offset);
            writeln!(
                out,
                "  {}  {:>6.1}{t} / {:>6.1}{t}  {}",
                date.split(' ').next().unwrap_or(&date),
                day.temp.min,
                day.temp.max,
                describe(&day.summary.weather)
            )?;
        }
    }

    for alert in report.alerts.entries() {
        writeln!(
            out,
            "Alert: {} ({}) {} .. {}",
            alert.event,
            alert.sender_name,
            local_time(alert.start, offset),
            local_time(alert.end, offset)
        )?;
    }

    Ok(())
}

pub fn air_pollution(out: &mut impl Write, report: &AirPollutionReport) -> io::Result<()> {
    writeln!(out, "Air quality at ({}, {})", report.coord.lat, report.coord.lon)?;
    if report.list.is_empty() {
        writeln!(out, "  no samples")?;
    }
    for sample in &report.list {
        let when = sample
            .observed_at()
            .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| sample.dt.to_string());
        let c = &sample.components;
        writeln!(
            out,
            "  {when}  AQI {}  PM2.5 {}  PM10 {}  O3 {}  NO2 {}  CO {}",
            sample.main.aqi, c.pm2_5, c.pm10, c.o3, c.no2, c.co
        )?;
    }
    Ok(())
}

pub fn places(out: &mut impl Write, places: &[Place]) -> io::Result<()> {
    if places.is_empty() {
        writeln!(out, "No matching places.")?;
    }
    for place in places {
        match place.state.as_option() {
            Some(state) => write!(out, "{}, {}, {}", place.name, state, place.country)?,
            None => write!(out, "{}, {}", place.name, place.country)?,
        }
        writeln!(out, "  ({}, {})", place.lat, place.lon)?;
    }
    Ok(())
}

pub fn find(out: &mut impl Write, report: &FindReport, units: Option<Units>) -> io::Result<()> {
    let units = units.unwrap_or(Units::Standard);
    let t = units.temperature_symbol();

    writeln!(out, "{} result(s)", report.count)?;
    for entry in &report.list {
        writeln!(
            out,
            "  {}, {} [{}]  {:.1}{t} ({:.1}{t} .. {:.1}{t})  {}",
            entry.name,
            entry.sys.country,
            entry.id,
            entry.main.temp,
            entry.main.temp_min,
            entry.main.temp_max,
            describe(&entry.weather)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn weather_shows_current_and_daily_in_local_time() {
        let report: WeatherReport = serde_json::from_str(
            r#"{
                "lat": 45.07, "lon": 7.687, "timezone": "Europe/Rome", "timezone_offset": 7200,
                "current": {
                    "dt": 1690000000, "temp": 24.5, "feels_like": 24.9, "pressure": 1012,
                    "humidity": 60, "dew_point": 16.1, "uvi": 5.2, "clouds": 0,
                    "wind_speed": 1.5, "wind_deg": 220, "rain": {"1h": 0.4},
                    "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}]
                },
                "daily": [{
                    "dt": 1690020000, "pressure": 1012, "humidity": 60, "dew_point": 16.1,
                    "uvi": 5.2, "clouds": 0, "wind_speed": 1.5, "wind_deg": 220, "rain": 2.5,
                    "temp": {"day": 25, "min": 15.2, "max": 28.9, "night": 18, "eve": 22, "morn": 16},
                    "feels_like": {"day": 25, "night": 18, "eve": 22, "morn": 16},
                    "weather": []
                }]
            }"#,
        )
        .unwrap();

        let text = rendered(|out| weather(out, &report, Some(Units::Metric)));

        assert!(text.starts_with("Europe/Rome (45.070, 7.687)"));
        // 1690000000 is 04:26 UTC, 06:26 at +02:00.
        assert!(text.contains("Now: 2023-07-22 06:26"));
        assert!(text.contains("24.5°C (feels 24.9°C)  light rain"));
        assert!(text.contains("wind 1.5 m/s 220°"));
        assert!(text.contains("rain 0.4 mm"));
        assert!(text.contains("Daily:\n  2023-07-22"));
        assert!(text.contains("15.2°C"));
        assert!(!text.contains("Hourly:"));
    }

    #[test]
    fn missing_units_render_as_kelvin() {
        let report: FindReport = serde_json::from_str(
            r#"{"cod": "200", "count": 1, "list": [{
                "id": 3165524, "name": "Turin", "coord": {"lat": 45.07, "lon": 7.68},
                "main": {"temp": 291.2, "feels_like": 290.9, "temp_min": 290.0,
                         "temp_max": 292.5, "pressure": 1016, "humidity": 72},
                "dt": 1690000000, "wind": {"speed": 1.0, "deg": 250}, "sys": {"country": "IT"},
                "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01n"}]
            }]}"#,
        )
        .unwrap();

        let text = rendered(|out| find(out, &report, None));

        assert!(text.starts_with("1 result(s)"));
        assert!(text.contains("Turin, IT [3165524]  291.2K (290.0K .. 292.5K)  clear sky"));
    }

    #[test]
    fn places_include_state_only_when_present() {
        let places_json = r#"[
            {"name": "Springfield", "lat": 39.8, "lon": -89.6, "country": "US", "state": "Illinois"},
            {"name": "London", "lat": 51.5, "lon": -0.1, "country": "GB"}
        ]"#;
        let list: Vec<Place> = serde_json::from_str(places_json).unwrap();

        let text = rendered(|out| places(out, &list));

        assert_eq!(
            text,
            "Springfield, Illinois, US  (39.8, -89.6)\nLondon, GB  (51.5, -0.1)\n"
        );
        assert_eq!(rendered(|out| places(out, &[])), "No matching places.\n");
    }

    #[test]
    fn air_pollution_lists_samples_in_utc() {
        let report: AirPollutionReport = serde_json::from_str(
            r#"{"coord": {"lat": 45, "lon": 7}, "list": [{"dt": 1606147200, "main": {"aqi": 4},
                "components": {"co": 203.6, "no": 0, "no2": 0.39, "o3": 75.1, "so2": 0.64,
                               "pm2_5": 23.2, "pm10": 92.2, "nh3": 0.11}}]}"#,
        )
        .unwrap();

        let text = rendered(|out| air_pollution(out, &report));

        assert!(text.contains("2020-11-23 16:00 UTC  AQI 4  PM2.5 23.2  PM10 92.2"));
    }
}
