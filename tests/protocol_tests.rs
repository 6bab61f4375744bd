use seabattle::{Message, ProtocolError, ShotResult};

#[test]
fn test_encode_lines() {
    assert_eq!(Message::Shot { x: 3, y: 7 }.to_string(), "SHOT:3:7");
    assert_eq!(Message::Result(ShotResult::Hit).to_string(), "RESULT:HIT");
    assert_eq!(Message::Result(ShotResult::Miss).to_string(), "RESULT:MISS");
    assert_eq!(Message::Result(ShotResult::Win).to_string(), "RESULT:WIN");
    assert_eq!(Message::Destroyed { length: 3 }.to_string(), "DESTROYED:3");
    assert_eq!(Message::Reset.to_string(), "RESET");
    assert_eq!(Message::Close.to_string(), "CLOSE");
}

#[test]
fn test_decode_is_case_insensitive_and_trimmed() {
    assert_eq!("shot:0:9".parse::<Message>(), Ok(Message::Shot { x: 0, y: 9 }));
    assert_eq!("Shot: 4 : 5 \r\n".parse::<Message>(), Ok(Message::Shot { x: 4, y: 5 }));
    assert_eq!("result:win".parse::<Message>(), Ok(Message::Result(ShotResult::Win)));
    assert_eq!("RESULT: Miss\n".parse::<Message>(), Ok(Message::Result(ShotResult::Miss)));
    assert_eq!("destroyed:2".parse::<Message>(), Ok(Message::Destroyed { length: 2 }));
    assert_eq!("reset\r\n".parse::<Message>(), Ok(Message::Reset));
    assert_eq!("  Close".parse::<Message>(), Ok(Message::Close));
}

#[test]
fn test_malformed_lines_rejected() {
    assert_eq!("".parse::<Message>(), Err(ProtocolError::UnknownToken));
    assert_eq!("FIRE:1:2".parse::<Message>(), Err(ProtocolError::UnknownToken));
    assert_eq!("SHOT:3".parse::<Message>(), Err(ProtocolError::FieldCount));
    assert_eq!("SHOT:1:2:3".parse::<Message>(), Err(ProtocolError::FieldCount));
    assert_eq!("SHOT:a:2".parse::<Message>(), Err(ProtocolError::BadNumber));
    assert_eq!("SHOT:-1:2".parse::<Message>(), Err(ProtocolError::BadNumber));
    assert_eq!("SHOT:1:300".parse::<Message>(), Err(ProtocolError::BadNumber));
    assert_eq!("RESULT".parse::<Message>(), Err(ProtocolError::FieldCount));
    assert_eq!("RESULT:SUNK".parse::<Message>(), Err(ProtocolError::BadResultTag));
    assert_eq!("DESTROYED:x".parse::<Message>(), Err(ProtocolError::BadNumber));
    assert_eq!("RESET:now".parse::<Message>(), Err(ProtocolError::FieldCount));
    assert_eq!("CLOSE:1".parse::<Message>(), Err(ProtocolError::FieldCount));
}

#[test]
fn test_result_tags() {
    assert_eq!(ShotResult::from_tag(" hit "), Some(ShotResult::Hit));
    assert_eq!(ShotResult::from_tag("WIN"), Some(ShotResult::Win));
    assert_eq!(ShotResult::from_tag("draw"), None);
    assert!(ShotResult::Win.is_hit());
    assert!(!ShotResult::Miss.is_hit());
}
