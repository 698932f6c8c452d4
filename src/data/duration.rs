use std::time::Duration;

const SECS_PER_DAY: u64 = 86_400;

/// Format an uptime as `H:MM:SS`, prefixed with whole days when there are any
/// (`1 day, 0:00:09`, `3 days, 12:30:00`). Sub-second precision is dropped.
pub fn format_uptime(d: Duration) -> String {
    let total = d.as_secs();
    let days = total / SECS_PER_DAY;
    let rem = total % SECS_PER_DAY;
    let clock = format!("{}:{:02}:{:02}", rem / 3600, (rem % 3600) / 60, rem % 60);

    match days {
        0 => clock,
        1 => format!("1 day, {}", clock),
        n => format!("{} days, {}", n, clock),
    }
}
