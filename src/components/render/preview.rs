use crate::components::playbook::DayEmployee;

const RULE_WIDTH: usize = 79;

/// Plain-text table of a day's employees for a quick look before writing.
///
/// Returns `None` when there is nobody to show.
pub fn render_preview(title: &str, employees: &[DayEmployee]) -> Option<String> {
    if employees.is_empty() {
        return None;
    }

    let mut lines = vec![format!("  {title}"), String::new()];
    lines.push(preview_line("NAME", "SHIFT", "BREAK", "ZONE"));
    lines.push(format!("  {}", "-".repeat(RULE_WIDTH)));
    lines.extend(employees.iter().map(|emp| {
        preview_line(&emp.name, &emp.shift_text, &emp.break_text, &emp.zone_label())
    }));

    Some(lines.join("\n"))
}

fn preview_line(name: &str, shift: &str, break_text: &str, zone: &str) -> String {
    format!("  {name:<22} {shift:<22} {break_text:<8} {zone:<25}")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::playbook::ManualEntry;

    #[test]
    fn test_preview_layout() {
        let emp = ManualEntry {
            name: "Smith, Jane".to_string(),
            shift_text: "9A-12P / 1P-5P".to_string(),
            break_text: "12P".to_string(),
            zone: "Adults".to_string(),
            ..ManualEntry::default()
        }
        .into_employee()
        .unwrap();

        let text = render_preview("Monday 3/3", &[emp]).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "  Monday 3/3");
        assert_eq!(lines[1], "");
        assert!(lines[2].starts_with("  NAME                   SHIFT"));
        assert_eq!(lines[3].len(), 2 + RULE_WIDTH);
        assert_eq!(
            lines[4],
            format!("  {:<22} {:<22} {:<8} Adults", "Smith, Jane", "9A-12P / 1P-5P", "12P")
        );
    }

    #[test]
    fn test_preview_empty() {
        assert!(render_preview("Monday 3/3", &[]).is_none());
    }
}
