use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    println!("{} {}", Icons::DATABASE, text.style(theme().title.clone()));
}

/// Title line followed by a dimmed subtitle
pub fn banner(title: &str, subtitle: &str) {
    println!("{}", title.style(theme().title.clone()));
    println!("{}", subtitle.style(theme().label.clone()));
    println!();
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().ok.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().fail.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().caution.clone()));
}

pub fn info(label: &str, value: &str) {
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().key.clone()),
        label.style(theme().label.clone()),
        value
    );
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().title.clone()));
}

pub fn muted(text: &str) -> String {
    text.style(theme().faint.clone()).to_string()
}

/// `📁 <path> (#<id>)`
pub fn feature_line(path: &str, id: i64) {
    println!(
        "{} {} {}",
        Icons::FOLDER,
        path.style(theme().path.clone()),
        muted(&format!("(#{})", id))
    );
}

/// `  🔑 <key>: v1, v2`
pub fn value_line(key: i64, values: &[String]) {
    let rendered = if values.is_empty() {
        muted(Icons::EMPTY)
    } else {
        values.join(", ")
    };
    println!(
        "  {} {}: {}",
        Icons::KEY,
        key.to_string().style(theme().key.clone()),
        rendered
    );
}

pub fn granted(label: &str) {
    println!("{} {}", Icons::UNLOCK, label.style(theme().granted.clone()));
}

pub fn denied(label: &str) {
    println!("{} {}", Icons::LOCK, label.style(theme().denied.clone()));
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().label.clone()), value);
}
