use chrono::NaiveDate;
use kinbook_core::{BirthdayGreeting, ContactRecord, Directory};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn directory_with(entries: &[(&str, Option<&str>)]) -> Directory {
    let mut directory = Directory::new();
    for (name, birthday) in entries {
        let mut record = ContactRecord::new(*name).unwrap();
        record.add_phone("1234567890").unwrap();
        if let Some(value) = birthday {
            record.set_birthday(value).unwrap();
        }
        directory.add_record(record);
    }
    directory
}

fn greeting(name: &str, date: &str) -> BirthdayGreeting {
    BirthdayGreeting {
        name: name.to_string(),
        congratulation_date: date.to_string(),
    }
}

#[test]
fn weekday_birthday_inside_window_is_greeted_on_the_day() {
    // 2024-02-25 is a Sunday; 2024-02-28 a Wednesday.
    let directory = directory_with(&[("Edd", Some("28.02.1996"))]);
    let greetings = directory.upcoming_birthdays_on(day(2024, 2, 25));
    assert_eq!(greetings, vec![greeting("Edd", "2024.02.28")]);
}

#[test]
fn saturday_birthday_moves_to_monday() {
    // 2024-03-02 is a Saturday, six days out.
    let directory = directory_with(&[("Edd", Some("02.03.1990"))]);
    let greetings = directory.upcoming_birthdays_on(day(2024, 2, 25));
    assert_eq!(greetings, vec![greeting("Edd", "2024.03.04")]);
}

#[test]
fn sunday_birthday_moves_to_monday() {
    // 2024-03-03 is a Sunday, exactly seven days out.
    let directory = directory_with(&[("Edd", Some("03.03.1990"))]);
    let greetings = directory.upcoming_birthdays_on(day(2024, 2, 25));
    assert_eq!(greetings, vec![greeting("Edd", "2024.03.04")]);
}

#[test]
fn birthday_eight_days_out_is_not_greeted() {
    // 2024-03-04 is eight days past the scan date.
    let directory = directory_with(&[("Edd", Some("04.03.1990"))]);
    assert!(directory
        .upcoming_birthdays_on(day(2024, 2, 25))
        .is_empty());
}

#[test]
fn birthday_today_counts_and_still_shifts_off_weekends() {
    // The scan day itself, 2024-02-25, is a Sunday.
    let directory = directory_with(&[("Edd", Some("25.02.1988"))]);
    let greetings = directory.upcoming_birthdays_on(day(2024, 2, 25));
    assert_eq!(greetings, vec![greeting("Edd", "2024.02.26")]);
}

#[test]
fn birthday_already_past_this_year_still_appears() {
    // The window check has no lower bound, so an occurrence behind the scan
    // date qualifies and is reported with its past date.
    let directory = directory_with(&[("Edd", Some("01.01.1990"))]);
    let greetings = directory.upcoming_birthdays_on(day(2024, 2, 25));
    assert_eq!(greetings, vec![greeting("Edd", "2024.01.01")]);
}

#[test]
fn feb_29_birthday_is_greeted_on_march_1_in_non_leap_years() {
    // 2025-03-01 is a Saturday, so the greeting lands on Monday the 3rd.
    let directory = directory_with(&[("Edd", Some("29.02.1996"))]);
    let greetings = directory.upcoming_birthdays_on(day(2025, 2, 24));
    assert_eq!(greetings, vec![greeting("Edd", "2025.03.03")]);
}

#[test]
fn feb_29_birthday_is_greeted_on_the_day_in_leap_years() {
    // 2024-02-29 is a Thursday.
    let directory = directory_with(&[("Edd", Some("29.02.1996"))]);
    let greetings = directory.upcoming_birthdays_on(day(2024, 2, 25));
    assert_eq!(greetings, vec![greeting("Edd", "2024.02.29")]);
}

#[test]
fn records_without_birthdays_are_skipped() {
    let directory = directory_with(&[("Edd", Some("28.02.1996")), ("Mike", None)]);
    let greetings = directory.upcoming_birthdays_on(day(2024, 2, 25));
    assert_eq!(greetings.len(), 1);
    assert_eq!(greetings[0].name, "Edd");
}

#[test]
fn empty_directory_yields_no_greetings() {
    assert!(Directory::new()
        .upcoming_birthdays_on(day(2024, 2, 25))
        .is_empty());
}

#[test]
fn greetings_come_back_in_name_order() {
    let directory = directory_with(&[
        ("Zed", Some("28.02.1996")),
        ("Anna", Some("27.02.1990")),
        ("Mike", Some("01.03.1985")),
    ]);

    let greetings = directory.upcoming_birthdays_on(day(2024, 2, 25));
    let names: Vec<&str> = greetings
        .iter()
        .map(|greeting| greeting.name.as_str())
        .collect();
    assert_eq!(names, vec!["Anna", "Mike", "Zed"]);
}

#[test]
fn repeated_scans_return_identical_output() {
    let directory = directory_with(&[("Edd", Some("28.02.1996"))]);
    let first = directory.upcoming_birthdays_on(day(2024, 2, 25));
    let second = directory.upcoming_birthdays_on(day(2024, 2, 25));
    assert_eq!(first, second);
}

#[test]
fn greeting_serializes_with_name_and_congratulation_date() {
    let directory = directory_with(&[("Edd", Some("28.02.1996"))]);
    let greetings = directory.upcoming_birthdays_on(day(2024, 2, 25));

    let value = serde_json::to_value(&greetings).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{ "name": "Edd", "congratulation_date": "2024.02.28" }])
    );
}
