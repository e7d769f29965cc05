//! Sample `Person` table used by the walkthrough binary.
use crate::core::db::table_exists;
use crate::core::Result;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

pub const PERSON_TABLE: &str = "Person";

const CREATE_PERSON_SQL: &str = r#"
CREATE TABLE Person (
    Id          INTEGER     PRIMARY KEY AUTOINCREMENT,
    LastName    TEXT        NOT NULL,
    FirstName   TEXT        NOT NULL,
    Age         INTEGER     NOT NULL,
    Email       TEXT        NULL
)"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Person<'a> {
    pub last_name: &'a str,
    pub first_name: &'a str,
    pub age: i64,
    pub email: Option<&'a str>,
}

pub const SAMPLE_PEOPLE: [Person<'static>; 4] = [
    Person {
        last_name: "Dinosaur",
        first_name: "Barney",
        age: 10000,
        email: Some("barney@prehistoric.org"),
    },
    Person {
        last_name: "Coyote",
        first_name: "Wiley",
        age: 50,
        email: Some("wiley@acme.org"),
    },
    Person {
        last_name: "Bunny",
        first_name: "Bugs",
        age: 50,
        email: Some("bugs@warner_bros.org"),
    },
    Person {
        last_name: "Squarepants",
        first_name: "Spongebob",
        age: 15,
        email: Some("spongebob@pineapple_grove.org"),
    },
];

/// Whether `upsert_person` created a row or rewrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted(i64),
    Updated(i64),
}

/// Creates the Person table unless a table or view of that name exists.
///
/// Returns `true` if the table was created.
pub fn ensure_person_table(conn: &Connection) -> Result<bool> {
    if table_exists(conn, PERSON_TABLE)? {
        return Ok(false);
    }
    info!("creating table {}", PERSON_TABLE);
    conn.execute(CREATE_PERSON_SQL, [])?;
    Ok(true)
}

/// Id of the most recently inserted person with this name, if any.
pub fn find_person_id(conn: &Connection, last_name: &str, first_name: &str) -> Result<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT Id FROM Person WHERE LastName = ?1 AND FirstName = ?2 ORDER BY Id DESC LIMIT 1",
            params![last_name, first_name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

/// Inserts `person`, or updates the existing row with the same name.
pub fn upsert_person(conn: &Connection, person: &Person<'_>) -> Result<Upsert> {
    match find_person_id(conn, person.last_name, person.first_name)? {
        Some(id) => {
            conn.execute(
                "UPDATE Person SET LastName = ?1, FirstName = ?2, Age = ?3, Email = ?4 WHERE Id = ?5",
                params![person.last_name, person.first_name, person.age, person.email, id],
            )?;
            debug!(id, "updated person");
            Ok(Upsert::Updated(id))
        }
        None => {
            conn.execute(
                "INSERT INTO Person (LastName, FirstName, Age, Email) VALUES (?1, ?2, ?3, ?4)",
                params![person.last_name, person.first_name, person.age, person.email],
            )?;
            let id = conn.last_insert_rowid();
            debug!(id, "inserted person");
            Ok(Upsert::Inserted(id))
        }
    }
}

/// Deletes every person with this name. Returns the number of rows removed.
pub fn delete_person(conn: &Connection, last_name: &str, first_name: &str) -> Result<usize> {
    if find_person_id(conn, last_name, first_name)?.is_none() {
        return Ok(0);
    }
    let removed = conn.execute(
        "DELETE FROM Person WHERE LastName = ?1 AND FirstName = ?2",
        params![last_name, first_name],
    )?;
    Ok(removed)
}
