// Display unit conversions

const BYTE_UNITS: [&str; 5] = ["KB", "MB", "GB", "TB", "PB"];

/// Human readable byte count: `500 B`, `2.00 KB`, `1.00 MB`.
pub fn convert_bytes(bytes: f64) -> String {
    if !bytes.is_finite() || bytes < 0.0 {
        return "0 B".to_string();
    }
    if bytes < 1024.0 {
        return format!("{} B", bytes.trunc() as u64);
    }

    let mut value = bytes / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, BYTE_UNITS[unit])
}

/// Map a QoS code (0 best, 2 worst) onto a percentage. Unknown codes are 0.
pub fn score_translate(code: i64) -> u8 {
    match code {
        0..=2 => ((3 - code) * 100 / 3) as u8,
        _ => 0,
    }
}

pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = seconds % 86_400 / 3_600;
    let minutes = seconds % 3_600 / 60;
    let secs = seconds % 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
