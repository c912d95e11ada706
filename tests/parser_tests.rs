#[cfg(test)]
mod schedule_parser_tests {
    use classboard::parser::parse_courses;
    use classboard::raw_types::RawSchedule;
    use classboard::types::CourseRecord;

    #[test]
    pub fn test_parse_schedule() {
        let schedule_str = include_str!("json/schedule1.json");
        let raw = serde_json::from_str::<RawSchedule>(schedule_str).unwrap();

        let courses = parse_courses(raw);
        assert_eq!(
            vec![
                // Entries without a creation time sort first.
                CourseRecord {
                    id: "-NxC3old".into(),
                    subject: "Writing".into(),
                    day_code: "SaSu".into(),
                    time: "10:00–11:30".into(),
                    created_at: "".into(),
                },
                CourseRecord {
                    id: "-NxA1bio".into(),
                    subject: "Biology".into(),
                    day_code: "MWF".into(),
                    time: "08:00–09:00".into(),
                    created_at: "2024-01-01T09:30:00.000Z".into(),
                },
                CourseRecord {
                    id: "-NxB2chem".into(),
                    subject: "Chemistry".into(),
                    day_code: "TuTh".into(),
                    time: "13:00–14:15".into(),
                    created_at: "2024-01-02T10:00:00.000Z".into(),
                },
            ],
            courses
        );
    }

    #[test]
    pub fn test_parse_schedule_skips_broken_entries() {
        let schedule_str = include_str!("json/schedule2.json");
        let raw = serde_json::from_str::<RawSchedule>(schedule_str).unwrap();

        let courses = parse_courses(raw);
        let summary = courses
            .iter()
            .map(|c| (c.id.as_str(), c.day_code.as_str(), c.time.as_str()))
            .collect::<Vec<_>>();

        assert_eq!(
            vec![
                ("-NxA1bio", "MWF", "08:00–09:00"),
                ("-NxG7noday", "", "15:00–16:00"),
            ],
            summary
        );
    }

    #[test]
    pub fn test_parse_empty_schedule() {
        let raw = serde_json::from_str::<RawSchedule>("null").unwrap();
        assert!(parse_courses(raw).is_empty());
    }
}

#[cfg(test)]
mod quiz_parser_tests {
    use classboard::parser::parse_quizzes;
    use classboard::raw_types::RawQuizzes;

    #[test]
    pub fn test_parse_quizzes_flattened() {
        let quiz_str = include_str!("json/quizzes1.json");
        let raw = serde_json::from_str::<RawQuizzes>(quiz_str).unwrap();

        let quizzes = parse_quizzes(raw);
        let summary = quizzes
            .iter()
            .map(|q| (q.subject_id.as_str(), q.id.as_str(), q.lesson.as_str(), q.day.as_str()))
            .collect::<Vec<_>>();

        assert_eq!(
            vec![
                ("-NxA1bio", "-NyQ1", "Cell Structure", "F"),
                ("-NxA1bio", "-NyQ2", "Mitosis", "M"),
                ("-NxB2chem", "-NyQ3", "Stoichiometry", ""),
            ],
            summary
        );
    }

    #[test]
    pub fn test_parse_quizzes_skips_broken_entries() {
        let quiz_str = include_str!("json/quizzes2.json");
        let raw = serde_json::from_str::<RawQuizzes>(quiz_str).unwrap();

        let quizzes = parse_quizzes(raw);
        let summary = quizzes
            .iter()
            .map(|q| (q.id.as_str(), q.lesson.as_str(), q.day.as_str()))
            .collect::<Vec<_>>();

        // A quiz missing its lesson can still expire, so it is kept.
        assert_eq!(vec![("-NyQ1", "", "F"), ("-NyQ2", "Mitosis", "M")], summary);
    }

    #[test]
    pub fn test_parse_empty_quizzes() {
        let raw = serde_json::from_str::<RawQuizzes>("null").unwrap();
        assert!(parse_quizzes(raw).is_empty());
    }
}
