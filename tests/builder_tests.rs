use classboard::store::input_types::{
    CourseAdd, CourseEdit, DaySelection, QuizAdd,
};
use classboard::store::wrapper_builder::StoreWrapperBuilder;
use classboard::types::BoardError;
use reqwest::Client;

#[test]
fn fail_construct_wrapper() {
    let wrapper = StoreWrapperBuilder::new()
        .with_client(Client::new())
        .with_auth_token("abc")
        .try_build_wrapper();
    assert!(wrapper.is_none());

    let wrapper = StoreWrapperBuilder::new()
        .with_database_url("https://my-app.firebaseio.com")
        .try_build_wrapper();
    assert!(wrapper.is_none());

    let wrapper = StoreWrapperBuilder::new()
        .with_database_url("ftp://my-app.firebaseio.com")
        .with_auth_token("abc")
        .try_build_wrapper();
    assert!(wrapper.is_none());
}

#[test]
fn success_construct_wrapper() {
    let wrapper = StoreWrapperBuilder::new()
        .with_database_url("https://my-app.firebaseio.com/?ns=abc#top")
        .with_auth_token("abc")
        .try_build_wrapper()
        .unwrap();

    assert_eq!(None, wrapper.database_url().query());
    assert_eq!(None, wrapper.database_url().fragment());
}

#[test]
fn day_selection() {
    assert_eq!(Some(DaySelection::Preset("TuTh".into())), DaySelection::preset("TuTh"));
    assert_eq!(None, DaySelection::preset("MTu"));
    assert_eq!("MWF", DaySelection::default().day_code());

    let mut days = DaySelection::from_day_code("MSa");
    assert_eq!(DaySelection::Custom(vec!["Sa".into(), "M".into()]), days);

    days.toggle("Sa");
    days.toggle("Th");
    days.toggle("Xy");
    assert_eq!("MTh", days.day_code());

    let mut preset = DaySelection::from_day_code("MW");
    preset.toggle("F");
    assert_eq!("MW", preset.day_code());
}

#[test]
fn build_course_add() {
    let course = CourseAdd::builder()
        .with_subject("Biology")
        .with_days(DaySelection::Custom(vec!["F".into(), "Tu".into()]))
        .with_start_time("8:00")
        .with_end_time("9:15")
        .try_build()
        .unwrap();

    assert_eq!("Biology", course.subject);
    assert_eq!("FTu", course.day_code);
    assert_eq!("08:00–09:15", course.time);
    assert!(!course.created_at.is_empty());
}

#[test]
fn build_course_add_invalid() {
    let res = CourseAdd::builder()
        .with_subject("  ")
        .with_start_time("8:00")
        .with_end_time("9:00")
        .try_build();
    assert!(matches!(res, Err(BoardError::InputError("subject", _))));

    let res = CourseAdd::builder()
        .with_subject("Biology")
        .with_days(DaySelection::Custom(vec![]))
        .with_start_time("8:00")
        .with_end_time("9:00")
        .try_build();
    assert!(matches!(res, Err(BoardError::InputError("days", _))));

    let res = CourseAdd::builder()
        .with_subject("Biology")
        .with_start_time("8:00")
        .try_build();
    assert!(matches!(res, Err(BoardError::InputError("time", _))));

    let res = CourseAdd::builder()
        .with_subject("Biology")
        .with_start_time("9:00")
        .with_end_time("9:00")
        .try_build();
    assert!(matches!(res, Err(BoardError::InputError("end", _))));

    let res = CourseAdd::builder()
        .with_subject("Biology")
        .with_start_time("9am")
        .with_end_time("10:00")
        .try_build();
    assert!(matches!(res, Err(BoardError::FormatError(_))));
}

#[test]
fn build_course_edit() {
    let edit = CourseEdit::builder().try_build().unwrap();
    assert!(edit.is_empty());

    let edit = CourseEdit::builder()
        .with_days(DaySelection::preset("TuTh").unwrap())
        .with_times("13:00", "14:15")
        .try_build()
        .unwrap();
    assert!(!edit.is_empty());
    assert_eq!(None, edit.subject);
    assert_eq!(Some("TuTh".to_string()), edit.day_code);
    assert_eq!(Some("13:00–14:15".to_string()), edit.time);

    let res = CourseEdit::builder().with_times("14:00", "13:00").try_build();
    assert!(matches!(res, Err(BoardError::InputError("end", _))));
}

#[test]
fn build_quiz_add() {
    let quiz = QuizAdd::builder()
        .with_course("-NxA1bio", "Biology")
        .with_lesson("Cell Structure")
        .with_day("F")
        .try_build()
        .unwrap();

    let json = serde_json::to_value(&quiz).unwrap();
    assert_eq!("Biology", json["subject"]);
    assert_eq!("Cell Structure", json["lesson"]);
    assert_eq!("F", json["day"]);
    assert!(json.get("subject_id").is_none());
    assert_eq!("-NxA1bio", quiz.subject_id);
}

#[test]
fn build_quiz_add_invalid() {
    let res = QuizAdd::builder()
        .with_lesson("Cell Structure")
        .with_day("F")
        .try_build();
    assert!(matches!(res, Err(BoardError::InputError("subject", _))));

    let res = QuizAdd::builder()
        .with_course("-NxA1bio", "Biology")
        .with_lesson("")
        .with_day("F")
        .try_build();
    assert!(matches!(res, Err(BoardError::InputError("lesson", _))));

    let res = QuizAdd::builder()
        .with_course("-NxA1bio", "Biology")
        .with_lesson("Cell Structure")
        .with_day("MWF")
        .try_build();
    assert!(matches!(res, Err(BoardError::InputError("day", _))));
}
