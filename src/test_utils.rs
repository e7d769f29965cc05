/// # Test Utilities Module
///
/// In-memory database fixtures shared by the unit tests.

use crate::core::db::SqliteSource;
use crate::core::Result;
use crate::people::{ensure_person_table, upsert_person, SAMPLE_PEOPLE};
use rusqlite::Connection;
use std::io;
use std::sync::{Arc, Mutex};

/// Isolated database test fixture with the Person table created
pub struct DatabaseFixture {
    pub name: String,
    pub source: SqliteSource,
}

impl DatabaseFixture {
    /// Create a new in-memory database with an empty Person table
    pub fn new(name: &str) -> Result<Self> {
        let source = SqliteSource::open_in_memory()?;
        ensure_person_table(source.connection())?;

        Ok(DatabaseFixture {
            name: name.to_string(),
            source,
        })
    }

    /// Create fixture with every sample person inserted
    pub fn with_sample_people(name: &str) -> Result<Self> {
        let fixture = Self::new(name)?;
        for person in &SAMPLE_PEOPLE {
            upsert_person(fixture.connection(), person)?;
        }
        Ok(fixture)
    }

    pub fn connection(&self) -> &Connection {
        self.source.connection()
    }
}

/// In-memory log sink handed to a `tracing_subscriber::fmt` subscriber
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a DEBUG-level subscriber installed for this thread and
/// returns its result together with everything that was logged
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::db::QuerySource;
    use crate::display::write_formatted_list;
    use crate::render::{render_csv, RenderOptions};

    #[test]
    fn test_database_fixture_creation() {
        let fixture = DatabaseFixture::new("test_create").unwrap();
        assert_eq!(fixture.name, "test_create");

        let result = fixture.source.query("SELECT * FROM Person").unwrap();
        assert_eq!(
            result.columns(),
            ["Id", "LastName", "FirstName", "Age", "Email"]
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_sample_people_render_end_to_end() {
        let fixture = DatabaseFixture::with_sample_people("render").unwrap();
        let result = fixture
            .source
            .query("SELECT * FROM Person WHERE Age < 100 ORDER BY Id")
            .unwrap();
        let lines = render_csv(&result);
        assert_eq!(
            lines,
            vec![
                "Id,LastName,FirstName,Age,Email",
                "2,Coyote,Wiley,50,wiley@acme.org",
                "3,Bunny,Bugs,50,bugs@warner_bros.org",
                "4,Squarepants,Spongebob,15,spongebob@pineapple_grove.org",
            ]
        );

        let mut out = Vec::new();
        write_formatted_list(&mut out, &lines, &RenderOptions::default()).unwrap();
        let expected = "\
Id | LastName    | FirstName | Age | Email
2  | Coyote      | Wiley     | 50  | wiley@acme.org
3  | Bunny       | Bugs      | 50  | bugs@warner_bros.org
4  | Squarepants | Spongebob | 15  | spongebob@pineapple_grove.org

";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_capture_logs_collects_events() {
        let (value, logs) = capture_logs(|| {
            tracing::debug!("captured line");
            7
        });
        assert_eq!(value, 7);
        assert!(logs.contains("captured line"));
    }
}
