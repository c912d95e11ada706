#[cfg(test)]
mod stream_parser_tests {
    use classboard::store::feed::{ChangeEvent, ChangeKind, FeedMessage, StreamParser};
    use classboard::types::BoardError;

    fn change(kind: ChangeKind, path: &str) -> Option<FeedMessage> {
        Some(FeedMessage::Change(ChangeEvent {
            kind,
            path: path.into(),
        }))
    }

    #[test]
    pub fn test_put_then_patch() {
        let mut parser = StreamParser::new();
        parser.push_bytes(
            b"event: put\ndata: {\"path\":\"/\",\"data\":null}\n\n\
              event: patch\ndata: {\"path\":\"/-NxA1bio\",\"data\":{\"time\":\"08:00\xe2\x80\x9309:30\"}}\n\n",
        );

        assert_eq!(change(ChangeKind::Put, "/"), parser.next_message().unwrap());
        assert_eq!(
            change(ChangeKind::Patch, "/-NxA1bio"),
            parser.next_message().unwrap()
        );
        assert_eq!(None, parser.next_message().unwrap());
    }

    #[test]
    pub fn test_split_across_chunks() {
        let mut parser = StreamParser::new();
        parser.push_bytes(b"event: pu");
        assert_eq!(None, parser.next_message().unwrap());

        parser.push_bytes(b"t\r\ndata: {\"path\":\"/a\",");
        assert_eq!(None, parser.next_message().unwrap());

        parser.push_bytes(b"\"data\":1}\r\n");
        assert_eq!(None, parser.next_message().unwrap());

        parser.push_bytes(b"\r\n");
        assert_eq!(change(ChangeKind::Put, "/a"), parser.next_message().unwrap());
    }

    #[test]
    pub fn test_keep_alive_skipped() {
        let mut parser = StreamParser::new();
        parser.push_bytes(
            b"event: keep-alive\ndata: null\n\n\
              event: something-new\ndata: {}\n\n\
              event: put\ndata: {\"path\":\"/\",\"data\":{}}\n\n",
        );

        assert_eq!(change(ChangeKind::Put, "/"), parser.next_message().unwrap());
    }

    #[test]
    pub fn test_cancel_and_revoked_close() {
        let mut parser = StreamParser::new();
        parser.push_bytes(b"event: cancel\ndata: Permission denied\n\n");
        assert_eq!(Some(FeedMessage::Closed), parser.next_message().unwrap());

        parser.push_bytes(b"event: auth_revoked\ndata: credential is no longer valid\n\n");
        assert_eq!(Some(FeedMessage::Closed), parser.next_message().unwrap());
    }

    #[test]
    pub fn test_bad_data() {
        let mut parser = StreamParser::new();
        parser.push_bytes(b"event: put\ndata: not json\n\n");
        assert!(matches!(
            parser.next_message(),
            Err(BoardError::SerdeError(_))
        ));
    }
}
