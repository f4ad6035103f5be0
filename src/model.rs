use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Subject {
    Telugu,
    Hindi,
    English,
    Maths,
    Science,
    Social,
}

impl Subject {
    /// Form order.
    pub const ALL: [Subject; 6] = [
        Subject::Telugu,
        Subject::Hindi,
        Subject::English,
        Subject::Maths,
        Subject::Science,
        Subject::Social,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Telugu => "Telugu",
            Subject::Hindi => "Hindi",
            Subject::English => "English",
            Subject::Maths => "Maths",
            Subject::Science => "Science",
            Subject::Social => "Social",
        }
    }

    pub fn parse(raw: &str) -> Option<Subject> {
        let t = raw.trim();
        Subject::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(t))
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pass => "Pass",
            Status::Fail => "Fail",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub subject: Subject,
    pub marks: f64,
    pub status: Status,
}

/// Validated input for a new row, built by `NewStudent::from_params` in `rules`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub age: i64,
    pub subject: Subject,
    pub marks: f64,
}
