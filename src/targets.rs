//! Target URL lists
//!
//! The built-in list covers the category pages of the news service. A
//! replacement list can come from the config file or a plain text file.

use std::path::Path;

/// Category pages fetched when no list is supplied
pub const DEFAULT_TARGETS: &[&str] = &[
    "http://news.yandex.ru/politics.html",
    "http://news.yandex.ru/world.html",
    "http://news.yandex.ru/society.html",
    "http://news.yandex.ru/business.html",
    "http://news.yandex.ru/sport.html",
    "http://news.yandex.ru/energy.html",
    "http://news.yandex.ru/metallurgy.html",
    "http://news.yandex.ru/transport.html",
    "http://news.yandex.ru/insurance.html",
    "http://news.yandex.ru/realty.html",
    "http://news.yandex.ru/football.html",
    "http://news.yandex.ru/hockey.html",
    "http://news.yandex.ru/basketball.html",
    "http://news.yandex.ru/tennis.html",
    "http://news.yandex.ru/auto_racing.html",
    "http://news.yandex.ru/martial_arts.html",
    "http://news.yandex.ru/incident.html",
    "http://news.yandex.ru/culture.html",
    "http://news.yandex.ru/music.html",
    "http://news.yandex.ru/theaters.html",
    "http://news.yandex.ru/galleries.html",
    "http://news.yandex.ru/science.html",
    "http://news.yandex.ru/health.html",
    "http://news.yandex.ru/computers.html",
    "http://news.yandex.ru/security.html",
    "http://news.yandex.ru/software.html",
    "http://news.yandex.ru/hardware.html",
    "http://news.yandex.ru/mobile.html",
    "http://news.yandex.ru/internet.html",
    "http://news.yandex.ru/games.html",
    "http://news.yandex.ru/auto.html",
    "http://news.yandex.ru/travels.html",
];

/// Returns the built-in target list as owned strings
pub fn default_targets() -> Vec<String> {
    DEFAULT_TARGETS.iter().map(|url| url.to_string()).collect()
}

/// Parses a newline-delimited target list
///
/// Lines are trimmed; blank lines and `#` comments are skipped.
pub fn parse_target_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Reads a target list file, one URL per line
pub fn read_target_list(path: &Path) -> std::io::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_target_list(&content))
}
