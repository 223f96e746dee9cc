//! HTML message templates for channel alerts.
//!
//! All alert messages are bilingual: english lines are framed with the
//! US flag emoji, spanish lines with the spanish flag emoji. The messages
//! use Telegram HTML formatting, so every upstream string is escaped
//! before interpolation.

use chrono::NaiveDateTime;

use crate::alerts::Weekend;
use crate::circuits::country_flag;
use crate::f1::{ConstructorStanding, DriverResult, DriverStanding, ResultsData, TimetableEntry};
use crate::telegram::translate::to_spanish;
use crate::weather::{SessionWeather, WeatherReport, emoji_for_weather_code};

/// Racing car emoji framing message headers.
const RACING_CAR: &str = "\u{1F3CE}";

/// Flag emoji framing english lines.
const EN_FLAG: &str = "\u{1F1FA}\u{1F1F8}";

/// Flag emoji framing spanish lines.
const ES_FLAG: &str = "\u{1F1EA}\u{1F1F8}";

/// Trophy emoji framing the championship standings header.
const TROPHY: &str = "\u{1F3C6}";

/// Chequered flag emoji framing the circuit photo caption.
const CHEQUERED_FLAG: &str = "\u{1F3C1}";

/// Escapes a string for interpolation into Telegram HTML.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Formats the `{flag} {locality}, {country} {flag}` location line of a
/// weekend. The flags are omitted for countries without flag data.
fn location_line(weekend: &Weekend) -> String {
    let flag = country_flag(&weekend.country);
    let location = format!("{}, {}", escape(&weekend.locality), escape(&weekend.country));

    if flag.is_empty() {
        location
    } else {
        format!("{} {} {}", flag, location, flag)
    }
}

/// Formats the start time of a session in circuit local time.
fn format_start_time(entry: &TimetableEntry) -> String {
    let local = NaiveDateTime::parse_from_str(&entry.start_time, "%Y-%m-%dT%H:%M:%S")
        .map(|start| start.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|_| entry.start_time.clone());

    format!("{} (UTC{})", local, escape(&entry.gmt_offset))
}

/// Formats the two weather lines of a report: condition emoji with the
/// localized description, then temperature, humidity and wind readings.
fn weather_lines(report: &WeatherReport, temp_unit: &str, speed_unit: &str) -> String {
    let condition = report.condition();
    let emoji = condition
        .map(|condition| emoji_for_weather_code(condition.id))
        .unwrap_or("\u{1F300}");
    let description = condition
        .map(|condition| escape(&condition.description))
        .unwrap_or_default();

    format!(
        "{} {}\n\u{1F321} {:.1} {}  \u{1F4A7} {}%  \u{1F4A8} {:.1} {}",
        emoji, description, report.main.temp, temp_unit, report.main.humidity, report.wind.speed,
        speed_unit
    )
}

/// Formats the schedule alert message announcing an upcoming session.
pub fn incoming_session_message(entry: &TimetableEntry, weekend: &Weekend) -> String {
    format!(
        "{car} <b>{name}</b> {car}\n\
         {location}\n\n\
         {en} <b>INCOMING SESSION</b> {en}\n\
         {es} <b>PRÓXIMA SESIÓN</b> {es}\n\n\
         {en} <b>{session_en}</b> {en}\n\
         {es} <b>{session_es}</b> {es}\n\n\
         <b>\u{2139} INFO \u{2139}</b>\n\
         <b>Start / Inicio:</b> {start}",
        car = RACING_CAR,
        name = escape(&weekend.official_name.to_uppercase()),
        location = location_line(weekend),
        en = EN_FLAG,
        es = ES_FLAG,
        session_en = escape(&entry.description),
        session_es = escape(to_spanish(&entry.description)),
        start = format_start_time(entry),
    )
}

/// Formats the session start alert message, with the current weather at
/// the circuit when available.
pub fn session_starting_message(
    entry: &TimetableEntry,
    weekend: &Weekend,
    weather: Option<&SessionWeather>,
) -> String {
    let mut message = format!(
        "{car} <b>{name}</b> {car}\n\
         {location}\n\n\
         {en} <b>SESSION STARTING SOON</b> {en}\n\
         {es} <b>LA SESIÓN EMPIEZA PRONTO</b> {es}\n\n\
         {en} <b>{session_en}</b> {en}\n\
         {es} <b>{session_es}</b> {es}\n\n\
         <b>Start / Inicio:</b> {start}",
        car = RACING_CAR,
        name = escape(&weekend.official_name.to_uppercase()),
        location = location_line(weekend),
        en = EN_FLAG,
        es = ES_FLAG,
        session_en = escape(&entry.description),
        session_es = escape(to_spanish(&entry.description)),
        start = format_start_time(entry),
    );

    if let Some(weather) = weather {
        message.push_str(&format!(
            "\n\n<b>\u{2600} WEATHER / TIEMPO \u{2600}</b>\n\n\
             {en} {english}\n\n\
             {es} {spanish}",
            en = EN_FLAG,
            english = weather_lines(&weather.english, "°F", "mph"),
            es = ES_FLAG,
            spanish = weather_lines(&weather.spanish, "°C", "m/s"),
        ));
    }

    message
}

/// Formats the results alert header announcing that session results follow.
pub fn results_header_message(data: &ResultsData) -> String {
    format!(
        "{car} <b>{name}</b> {car}\n\n\
         {en} <b>SESSION RESULTS</b> {en}\n\
         {es} <b>RESULTADOS DE LA SESIÓN</b> {es}\n\n\
         {en} <b>{session_en}</b> {en}\n\
         {es} <b>{session_es}</b> {es}\n\n\
         \u{2B07}\u{2B07}\u{2B07}\u{2B07}\u{2B07}\u{2B07}",
        car = RACING_CAR,
        name = escape(&data.race_name),
        en = EN_FLAG,
        es = ES_FLAG,
        session_en = escape(&data.session_name),
        session_es = escape(to_spanish(&data.session_name)),
    )
}

/// Formats the final classification of a session as a preformatted block.
///
/// Drivers are listed in finishing order. The lap count lines are only
/// included for sessions that report laps.
pub fn results_table_message(data: &ResultsData) -> String {
    let mut lines = vec![
        data.race_name.clone(),
        String::new(),
        data.session_name.to_uppercase(),
        to_spanish(&data.session_name).to_uppercase(),
    ];

    if data.laps > 0 {
        lines.push(String::new());
        lines.push(format!("{} LAPS", data.laps));
        lines.push(format!("{} VUELTAS", data.laps));
    }

    lines.push(String::new());

    let mut classified: Vec<&DriverResult> = data.drivers.iter().collect();
    classified.sort_by_key(|driver| driver.position().parse::<u32>().unwrap_or(u32::MAX));

    let name_width = classified
        .iter()
        .map(|driver| driver.driver_name().chars().count())
        .max()
        .unwrap_or(0);

    for driver in classified {
        lines.push(format!(
            "{:>2}  {:>2}  {:<width$}  {}",
            driver.position(),
            driver.racing_number(),
            driver.driver_name(),
            driver.result_time(),
            width = name_width,
        ));
    }

    format!("<pre>{}</pre>", escape(&lines.join("\n")))
}

/// Formats the championship standings message sent after a race weekend.
pub fn standings_update_message(
    drivers: &[DriverStanding],
    constructors: &[ConstructorStanding],
) -> String {
    let driver_names: Vec<String> = drivers
        .iter()
        .map(|standing| {
            format!(
                "{} {}",
                standing.driver.given_name, standing.driver.family_name
            )
        })
        .collect();
    let driver_width = driver_names
        .iter()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0);
    let driver_rows = drivers
        .iter()
        .zip(&driver_names)
        .map(|(standing, name)| {
            format!(
                "{:>2}  {:<width$}  {:>6}",
                standing.position,
                name,
                standing.points,
                width = driver_width,
            )
        })
        .collect::<Vec<String>>()
        .join("\n");

    let constructor_width = constructors
        .iter()
        .map(|standing| standing.constructor.name.chars().count())
        .max()
        .unwrap_or(0);
    let constructor_rows = constructors
        .iter()
        .map(|standing| {
            format!(
                "{:>2}  {:<width$}  {:>6}",
                standing.position,
                standing.constructor.name,
                standing.points,
                width = constructor_width,
            )
        })
        .collect::<Vec<String>>()
        .join("\n");

    format!(
        "{cup} <b>CHAMPIONSHIP STANDINGS</b> {cup}\n\
         {cup} <b>CLASIFICACIÓN DEL CAMPEONATO</b> {cup}\n\n\
         {en} <b>Drivers / Pilotos</b> {es}\n\
         <pre>{driver_rows}</pre>\n\n\
         {en} <b>Constructors / Constructores</b> {es}\n\
         <pre>{constructor_rows}</pre>",
        cup = TROPHY,
        en = EN_FLAG,
        es = ES_FLAG,
        driver_rows = escape(&driver_rows),
        constructor_rows = escape(&constructor_rows),
    )
}

/// Formats the caption of the circuit layout photo.
pub fn circuit_photo_caption(weekend: &Weekend) -> String {
    format!(
        "{flag} <b>{name}</b> {flag}\n\
         {location}\n\n\
         {en} Circuit layout {en}\n\
         {es} Trazado del circuito {es}",
        flag = CHEQUERED_FLAG,
        name = escape(&weekend.official_name),
        location = location_line(weekend),
        en = EN_FLAG,
        es = ES_FLAG,
    )
}
