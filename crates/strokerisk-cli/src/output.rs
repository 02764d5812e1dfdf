//! Coloured terminal rendering shared by the commands.

use std::sync::Arc;

use colored::{ColoredString, Colorize};
use strokerisk_core::hospital::Hospital;
use strokerisk_core::notification::{Notification, NotificationLevel, Notifier};
use strokerisk_core::scan::{RiskLevel, RiskResult, ScanSummary};

/// Prints notifications as coloured one-line toasts.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliNotifier;

impl CliNotifier {
    pub fn shared() -> Arc<dyn Notifier> {
        Arc::new(Self)
    }
}

impl Notifier for CliNotifier {
    fn notify(&self, notification: Notification) {
        let line = match notification.description {
            Some(description) => format!("{}: {}", notification.title, description),
            None => notification.title,
        };
        match notification.level {
            NotificationLevel::Success => println!("{}", format!("✓ {}", line).bright_green()),
            NotificationLevel::Error => println!("{}", format!("✗ {}", line).bright_red()),
        }
    }
}

pub fn level_badge(level: RiskLevel) -> ColoredString {
    let text = format!("{} RISK", level);
    match level {
        RiskLevel::High => text.on_red().white().bold(),
        RiskLevel::Medium => text.black().on_yellow(),
        RiskLevel::Low => text.black().on_green(),
    }
}

pub fn print_result(result: &RiskResult) {
    println!(
        "{}  score {}/100  confidence {}%",
        level_badge(result.risk_level),
        result.risk_score.to_string().bold(),
        result.confidence
    );
    println!("{}", result.timestamp.format("%Y-%m-%d %H:%M UTC").to_string().bright_black());
    if !result.factors.is_empty() {
        println!("{}", "Factors:".bold());
        for factor in &result.factors {
            println!("  - {}", factor);
        }
    }
    if !result.recommendations.is_empty() {
        println!("{}", "Recommendations:".bold());
        for recommendation in &result.recommendations {
            let line = format!("  - {}", recommendation);
            if result.risk_level == RiskLevel::High {
                println!("{}", line.bright_red());
            } else {
                println!("{}", line);
            }
        }
    }
}

pub fn print_history(results: &[RiskResult]) {
    if results.is_empty() {
        println!("{}", "No scans match.".bright_black());
        return;
    }
    for result in results {
        println!(
            "{}  {}  score {:>3}",
            result.timestamp.format("%Y-%m-%d %H:%M").to_string().bright_black(),
            level_badge(result.risk_level),
            result.risk_score
        );
    }
}

pub fn print_summary(summary: &ScanSummary) {
    println!("{} {}", "Total scans:".bold(), summary.total_scans);
    println!("{} {}", "Average risk:".bold(), summary.average_risk);
    if let Some(level) = summary.latest_level {
        println!("{} {}", "Latest:".bold(), level_badge(level));
    }
    println!(
        "{} low {}  medium {}  high {}",
        "By level:".bold(),
        summary.low_count,
        summary.medium_count,
        summary.high_count
    );
    let sparkline: String = summary.trend.iter().map(|p| spark(p.score)).collect();
    println!("{} {}", "Trend:".bold(), sparkline.bright_cyan());
}

fn spark(score: u8) -> char {
    const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    BARS[(usize::from(score.min(99)) * BARS.len()) / 100]
}

pub fn print_hospitals(hospitals: &[Hospital]) {
    if hospitals.is_empty() {
        println!("{}", "No hospitals found nearby.".bright_black());
        return;
    }
    for hospital in hospitals {
        let badge = if hospital.is_primary_stroke_center {
            " [stroke center]".bright_green().to_string()
        } else {
            String::new()
        };
        println!("{}{}", hospital.name.bold(), badge);
        println!("  {} | {:.1} km", hospital.address, hospital.distance);
        match hospital.wait_time {
            Some(wait) => println!("  {} | ~{} min wait", hospital.phone, wait),
            None => println!("  {}", hospital.phone),
        }
    }
}
