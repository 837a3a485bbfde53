/// Render seconds as `m:ss`
///
/// Minutes are not wrapped into hours. Anything that is not a finite,
/// non-negative number renders as `0:00`.
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "0:00".to_string();
    }

    let whole = secs.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}
