//! Output sink for rendered lines.
//!
//! Every listing is written line by line and closed with a blank line. The
//! `write_*` functions take any writer; the `display_*` wrappers use stdout.

use crate::core::db::{QuerySource, SchemaIntrospector, SqliteSource};
use crate::core::Result;
use crate::render::{render_csv, render_fixed_width, RenderOptions};
use std::io::{self, Write};

/// Writes each line, then a blank line.
pub fn write_list<W: Write, S: AsRef<str>>(out: &mut W, lines: &[S]) -> Result<()> {
    for line in lines {
        writeln!(out, "{}", line.as_ref())?;
    }
    writeln!(out)?;
    Ok(())
}

/// Renders CSV lines as a fixed-width table and writes it like `write_list`.
///
/// Nothing is written if rendering fails.
pub fn write_formatted_list<W: Write, S: AsRef<str>>(
    out: &mut W,
    lines: &[S],
    opts: &RenderOptions,
) -> Result<()> {
    let table = render_fixed_width(lines, opts)?;
    write_list(out, &table)
}

/// Runs `sql` and writes the result as CSV.
pub fn write_result_csv<W: Write, Q: QuerySource>(
    out: &mut W,
    source: &Q,
    sql: &str,
) -> Result<()> {
    let lines = render_csv(&source.query(sql)?);
    write_list(out, &lines)
}

/// Runs `sql` and writes the result as a fixed-width table.
pub fn write_result<W: Write, Q: QuerySource>(
    out: &mut W,
    source: &Q,
    sql: &str,
    opts: &RenderOptions,
) -> Result<()> {
    let lines = render_csv(&source.query(sql)?);
    write_formatted_list(out, &lines, opts)
}

/// Runs a multi-statement script and writes every result set as CSV.
pub fn write_result_sets<W: Write>(
    out: &mut W,
    source: &SqliteSource,
    sql: &str,
    opts: &RenderOptions,
) -> Result<()> {
    for lines in source.query_batch_csv(sql, opts)? {
        write_list(out, &lines)?;
    }
    Ok(())
}

pub fn write_tables_csv<W: Write, Q: QuerySource>(
    out: &mut W,
    introspector: &SchemaIntrospector<'_, Q>,
) -> Result<()> {
    write_list(out, &introspector.tables_csv()?)
}

pub fn write_table_schema_csv<W: Write, Q: QuerySource>(
    out: &mut W,
    introspector: &SchemaIntrospector<'_, Q>,
    table: &str,
) -> Result<()> {
    write_list(out, &introspector.table_schema_csv(table)?)
}

/// Writes the column schema of `table` as a fixed-width table.
pub fn write_table_schema<W: Write, Q: QuerySource>(
    out: &mut W,
    introspector: &SchemaIntrospector<'_, Q>,
    table: &str,
) -> Result<()> {
    let lines = introspector.table_schema_csv(table)?;
    write_formatted_list(out, &lines, introspector.options())
}

pub fn display_list<S: AsRef<str>>(lines: &[S]) -> Result<()> {
    write_list(&mut io::stdout().lock(), lines)
}

pub fn display_formatted_list<S: AsRef<str>>(lines: &[S], opts: &RenderOptions) -> Result<()> {
    write_formatted_list(&mut io::stdout().lock(), lines, opts)
}

/// Runs `sql` and prints the result as CSV.
pub fn display_result_csv<Q: QuerySource>(source: &Q, sql: &str) -> Result<()> {
    write_result_csv(&mut io::stdout().lock(), source, sql)
}

/// Runs `sql` and prints the result as a fixed-width table.
pub fn display_result<Q: QuerySource>(source: &Q, sql: &str, opts: &RenderOptions) -> Result<()> {
    write_result(&mut io::stdout().lock(), source, sql, opts)
}

/// Prints every result set of a multi-statement script as CSV.
pub fn display_result_sets(source: &SqliteSource, sql: &str, opts: &RenderOptions) -> Result<()> {
    write_result_sets(&mut io::stdout().lock(), source, sql, opts)
}

/// Prints the table listing as CSV.
pub fn display_tables_csv<Q: QuerySource>(introspector: &SchemaIntrospector<'_, Q>) -> Result<()> {
    write_tables_csv(&mut io::stdout().lock(), introspector)
}

/// Prints the column schema of `table` as CSV.
pub fn display_table_schema_csv<Q: QuerySource>(
    introspector: &SchemaIntrospector<'_, Q>,
    table: &str,
) -> Result<()> {
    write_table_schema_csv(&mut io::stdout().lock(), introspector, table)
}

/// Prints the column schema of `table` as a fixed-width table.
pub fn display_table_schema<Q: QuerySource>(
    introspector: &SchemaIntrospector<'_, Q>,
    table: &str,
) -> Result<()> {
    write_table_schema(&mut io::stdout().lock(), introspector, table)
}
