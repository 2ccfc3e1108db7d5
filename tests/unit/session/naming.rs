use super::*;
use crate::foundation::core::CanvasSize;

fn info(day: u32, theme: &str, started_at: Option<i64>) -> DayInfo {
    DayInfo {
        day,
        theme: theme.to_owned(),
        size: CanvasSize::new(1, 1).unwrap(),
        started_at,
    }
}

#[test]
fn name_uses_utc_date_day_and_theme() {
    // 2023-08-09T00:00:00Z
    let name = output_file_name(&info(1, "Sunrise", Some(1_691_539_200)));
    assert_eq!(name, "2023-08-09_#1_Sunrise.mp4");
}

#[test]
fn unknown_timestamp_falls_back() {
    assert_eq!(
        output_file_name(&info(12, "Ocean", None)),
        "UNKNOWN_DATE_#12_Ocean.mp4"
    );
    assert_eq!(date_label(Some(i64::MAX)), UNKNOWN_DATE);
}

#[test]
fn theme_path_separators_are_replaced() {
    assert_eq!(
        output_file_name(&info(3, "Day/Night: 2", None)),
        "UNKNOWN_DATE_#3_Day_Night_ 2.mp4"
    );
    assert_eq!(
        output_file_name(&info(3, "  ", None)),
        "UNKNOWN_DATE_#3_untitled.mp4"
    );
}

#[test]
fn dot_dot_theme_stays_a_plain_file_name() {
    let name = output_file_name(&info(1, "..", None));
    assert_eq!(name, "UNKNOWN_DATE_#1_...mp4");

    let name = output_file_name(&info(1, "../../etc", None));
    assert_eq!(name, "UNKNOWN_DATE_#1_.._.._etc.mp4");

    let out_dir = std::path::Path::new("out");
    let joined = out_dir.join(&name);
    assert_eq!(joined.parent(), Some(out_dir));
    assert_eq!(joined.file_name().and_then(|n| n.to_str()), Some(name.as_str()));
}
