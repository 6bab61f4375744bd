//! Line protocol exchanged between the two peers.
//!
//! Every message is one line of text: colon-separated fields, tokens matched
//! without regard to ASCII case.
//!
//! | Message     | Line              |
//! |-------------|-------------------|
//! | `Shot`      | `SHOT:<x>:<y>`    |
//! | `Result`    | `RESULT:<tag>`    |
//! | `Destroyed` | `DESTROYED:<len>` |
//! | `Reset`     | `RESET`           |
//! | `Close`     | `CLOSE`           |

use core::fmt;
use core::str::FromStr;

use crate::core::ShotResult;

/// Messages exchanged between the two peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Sender fires at the receiver's (x, y).
    Shot { x: u8, y: u8 },
    /// Outcome of the receiver's most recent shot.
    Result(ShotResult),
    /// The receiver's most recent shot sank a ship of this length.
    Destroyed { length: u8 },
    /// Sender wants to play another round.
    Reset,
    /// Sender is ending the session.
    Close,
}

/// Why a line could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// Leading token is not a known message.
    UnknownToken,
    /// Wrong number of colon-separated fields.
    FieldCount,
    /// A numeric field did not parse.
    BadNumber,
    /// `RESULT` carried an unknown tag.
    BadResultTag,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::UnknownToken => write!(f, "unknown message token"),
            ProtocolError::FieldCount => write!(f, "wrong number of fields"),
            ProtocolError::BadNumber => write!(f, "field is not a number"),
            ProtocolError::BadResultTag => write!(f, "unknown result tag"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProtocolError {}

impl fmt::Display for Message {
    /// Encode without the trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Shot { x, y } => write!(f, "SHOT:{}:{}", x, y),
            Message::Result(res) => write!(f, "RESULT:{}", res),
            Message::Destroyed { length } => write!(f, "DESTROYED:{}", length),
            Message::Reset => f.write_str("RESET"),
            Message::Close => f.write_str("CLOSE"),
        }
    }
}

fn number(field: &str) -> Result<u8, ProtocolError> {
    field.trim().parse().map_err(|_| ProtocolError::BadNumber)
}

impl FromStr for Message {
    type Err = ProtocolError;

    /// Decode one line; a trailing `\r` or surrounding whitespace is ignored.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let mut fields = line.split(':');
        let token = fields.next().unwrap_or_default();
        let rest: alloc::vec::Vec<&str> = fields.collect();

        if token.eq_ignore_ascii_case("SHOT") {
            match rest.as_slice() {
                [x, y] => Ok(Message::Shot {
                    x: number(x)?,
                    y: number(y)?,
                }),
                _ => Err(ProtocolError::FieldCount),
            }
        } else if token.eq_ignore_ascii_case("RESULT") {
            match rest.as_slice() {
                [tag] => ShotResult::from_tag(tag)
                    .map(Message::Result)
                    .ok_or(ProtocolError::BadResultTag),
                _ => Err(ProtocolError::FieldCount),
            }
        } else if token.eq_ignore_ascii_case("DESTROYED") {
            match rest.as_slice() {
                [len] => Ok(Message::Destroyed {
                    length: number(len)?,
                }),
                _ => Err(ProtocolError::FieldCount),
            }
        } else if token.eq_ignore_ascii_case("RESET") {
            rest.is_empty()
                .then_some(Message::Reset)
                .ok_or(ProtocolError::FieldCount)
        } else if token.eq_ignore_ascii_case("CLOSE") {
            rest.is_empty()
                .then_some(Message::Close)
                .ok_or(ProtocolError::FieldCount)
        } else {
            Err(ProtocolError::UnknownToken)
        }
    }
}
